//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit`. Nodes that can span several lines take
//! the nesting level they start at, so inline object types and documentation
//! comments indent consistently with their surroundings.

use raml2ts_common::{format_literal, is_identifier, quote_key, wrap_paragraphs};

use super::types::{
    DocComment, DocSection, TsDecl, TsInterface, TsModule, TsPrimitive, TsProp, TsType,
    TsTypeAlias,
};

/// Layout settings shared by every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitStyle {
    /// One level of indentation
    pub indentation: String,
    /// Target width of documentation comment lines
    pub max_line_length: usize,
}

impl Default for EmitStyle {
    fn default() -> Self {
        Self {
            indentation: "  ".to_string(),
            max_line_length: 80,
        }
    }
}

impl EmitStyle {
    fn prefix(&self, level: usize) -> String {
        self.indentation.repeat(level)
    }
}

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to TypeScript, starting at nesting `level`.
    fn emit(&self, style: &EmitStyle, level: usize) -> String;
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self, _style: &EmitStyle, _level: usize) -> String {
        match self {
            TsPrimitive::Any => "any",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Number => "number",
            TsPrimitive::String => "string",
            TsPrimitive::Void => "void",
        }
        .to_string()
    }
}

impl Emit for TsType {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        match self {
            TsType::Primitive(p) => p.emit(style, level),
            TsType::Ref(name) => name.clone(),
            TsType::Literal(lit) => format_literal(lit, &style.indentation),
            TsType::Array(inner) => {
                let inner = inner.emit(style, level);
                if is_identifier(&inner) {
                    format!("{inner}[]")
                } else {
                    format!("Array<{inner}>")
                }
            }
            TsType::Union(types) => types
                .iter()
                .map(|t| t.emit(style, level))
                .collect::<Vec<_>>()
                .join(" | "),
            TsType::Map(value) => format!("{{ [key: string]: {} }}", value.emit(style, level)),
            TsType::Object(props) => {
                if props.is_empty() {
                    return "{}".to_string();
                }
                let mut output = "{\n".to_string();
                for prop in props {
                    output.push_str(&prop.emit(style, level + 1));
                }
                output.push_str(&style.prefix(level));
                output.push('}');
                output
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        let mut output = self.docs.emit(style, level);
        let readonly = if self.readonly { "readonly " } else { "" };
        let opt = if self.optional { "?" } else { "" };
        output.push_str(&format!(
            "{}{}{}{}: {};\n",
            style.prefix(level),
            readonly,
            quote_key(&self.name),
            opt,
            self.ty.emit(style, level)
        ));
        output
    }
}

// =============================================================================
// Documentation comments
// =============================================================================

impl DocComment {
    /// Comment body lines, wrapped to `width`, sections separated by a blank line.
    pub fn lines(&self, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            match section {
                DocSection::Text(text) => lines.extend(wrap_paragraphs(text, width)),
                DocSection::Lines(verbatim) => lines.extend(verbatim.iter().cloned()),
            }
        }
        lines.iter().map(|line| line.replace("*/", "*\\/")).collect()
    }
}

impl Emit for DocComment {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        if self.is_empty() {
            return String::new();
        }

        let prefix = style.prefix(level);
        let width = style
            .max_line_length
            .saturating_sub(prefix.len() + 3)
            .max(1);
        let lines = self.lines(width);

        if let ([DocSection::Text(_)], [line]) = (self.sections.as_slice(), lines.as_slice()) {
            return format!("{prefix}/** {line} */\n");
        }

        let mut output = format!("{prefix}/**\n");
        for line in &lines {
            if line.is_empty() {
                output.push_str(&format!("{prefix} *\n"));
            } else {
                output.push_str(&format!("{prefix} * {line}\n"));
            }
        }
        output.push_str(&format!("{prefix} */\n"));
        output
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for TsInterface {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        let mut output = self.docs.emit(style, level);
        let prefix = style.prefix(level);
        if self.props.is_empty() && self.index_signature.is_none() {
            output.push_str(&format!("{prefix}export interface {} {{}}\n", self.name));
            return output;
        }
        output.push_str(&format!("{prefix}export interface {} {{\n", self.name));
        for prop in &self.props {
            output.push_str(&prop.emit(style, level + 1));
        }
        if let Some(value) = &self.index_signature {
            output.push_str(&format!(
                "{}[key: string]: {};\n",
                style.prefix(level + 1),
                value.emit(style, level + 1)
            ));
        }
        output.push_str(&format!("{prefix}}}\n"));
        output
    }
}

impl Emit for TsTypeAlias {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        let mut output = self.docs.emit(style, level);
        output.push_str(&format!(
            "{}export type {} = {};\n",
            style.prefix(level),
            self.name,
            self.ty.emit(style, level)
        ));
        output
    }
}

impl Emit for TsDecl {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        match self {
            TsDecl::Interface(interface) => interface.emit(style, level),
            TsDecl::TypeAlias(alias) => alias.emit(style, level),
        }
    }
}

impl Emit for TsModule {
    fn emit(&self, style: &EmitStyle, level: usize) -> String {
        let mut output = String::new();

        for line in &self.header {
            output.push_str(&format!("// {line}\n"));
        }
        if !self.header.is_empty() {
            output.push('\n');
        }

        for decl in &self.decls {
            output.push_str(&decl.emit(style, level));
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use raml2ts_common::Literal;

    fn style() -> EmitStyle {
        EmitStyle::default()
    }

    fn prop(name: &str, ty: TsType) -> TsProp {
        TsProp {
            name: name.to_string(),
            ty,
            optional: false,
            readonly: false,
            docs: DocComment::default(),
        }
    }

    fn text(s: &str) -> DocComment {
        let mut docs = DocComment::default();
        docs.push_text(s);
        docs
    }

    #[test]
    fn test_array_of_identifier() {
        let ty = TsType::Array(Box::new(TsType::Ref("Project".into())));
        assert_eq!(ty.emit(&style(), 0), "Project[]");

        let ty = TsType::Array(Box::new(TsType::Primitive(TsPrimitive::String)));
        assert_eq!(ty.emit(&style(), 0), "string[]");
    }

    #[test]
    fn test_array_of_complex_type() {
        let nested = TsType::Array(Box::new(TsType::Array(Box::new(TsType::Ref("Node".into())))));
        assert_eq!(nested.emit(&style(), 0), "Array<Node[]>");

        let union = TsType::Array(Box::new(TsType::Union(vec![
            TsType::Literal(Literal::String("a".into())),
            TsType::Literal(Literal::String("b".into())),
        ])));
        assert_eq!(union.emit(&style(), 0), "Array<'a' | 'b'>");

        let map = TsType::Array(Box::new(TsType::Map(Box::new(TsType::Primitive(
            TsPrimitive::Number,
        )))));
        assert_eq!(map.emit(&style(), 0), "Array<{ [key: string]: number }>");
    }

    #[test]
    fn test_union_collapses_duplicates() {
        let ty = TsType::union([
            TsType::Ref("A".into()),
            TsType::Primitive(TsPrimitive::Void),
            TsType::Ref("A".into()),
        ]);
        assert_eq!(ty.emit(&style(), 0), "A | void");

        let single = TsType::union([TsType::Ref("A".into()), TsType::Ref("A".into())]);
        assert_eq!(single, TsType::Ref("A".into()));
    }

    #[test]
    fn test_nested_object_indentation() {
        let ty = TsType::Object(vec![prop(
            "request",
            TsType::Object(vec![prop("body", TsType::Ref("Project".into()))]),
        )]);
        assert_eq!(
            ty.emit(&style(), 1),
            "{\n    request: {\n      body: Project;\n    };\n  }"
        );
        assert_eq!(TsType::Object(vec![]).emit(&style(), 3), "{}");
    }

    #[test]
    fn test_prop_modifiers_and_quoting() {
        let mut p = prop("content-type", TsType::Primitive(TsPrimitive::String));
        p.optional = true;
        p.readonly = true;
        assert_eq!(p.emit(&style(), 1), "  readonly 'content-type'?: string;\n");
    }

    #[test]
    fn test_doc_single_line() {
        assert_eq!(text("The project name.").emit(&style(), 1), "  /** The project name. */\n");
        assert_eq!(DocComment::default().emit(&style(), 0), "");
    }

    #[test]
    fn test_doc_wraps_to_width() {
        let style = EmitStyle {
            indentation: "  ".into(),
            max_line_length: 23,
        };
        let docs = text("A line that is exactly 32 characters long.");
        assert_eq!(
            docs.emit(&style, 0),
            "/**\n * A line that is\n * exactly 32\n * characters long.\n */\n"
        );
    }

    #[test]
    fn test_doc_sections_and_escape() {
        let mut docs = text("Ends a comment */ early.");
        docs.push_lines(vec!["@example".into(), "{ }".into()]);
        assert_eq!(
            docs.emit(&style(), 0),
            "/**\n * Ends a comment *\\/ early.\n *\n * @example\n * { }\n */\n"
        );
    }

    #[test]
    fn test_interface_and_module() {
        let module = TsModule {
            header: vec!["Generated from Demo version v1. Do not edit.".into()],
            decls: vec![
                TsDecl::TypeAlias(TsTypeAlias {
                    name: "Integer".into(),
                    docs: text("An integer."),
                    ty: TsType::Primitive(TsPrimitive::Number),
                }),
                TsDecl::Interface(TsInterface {
                    name: "Empty".into(),
                    docs: DocComment::default(),
                    props: vec![],
                    index_signature: None,
                }),
                TsDecl::Interface(TsInterface {
                    name: "Project".into(),
                    docs: DocComment::default(),
                    props: vec![prop("name", TsType::Primitive(TsPrimitive::String))],
                    index_signature: Some(TsType::Primitive(TsPrimitive::Any)),
                }),
            ],
        };
        assert_eq!(
            module.emit(&style(), 0),
            "// Generated from Demo version v1. Do not edit.\n\
             \n\
             /** An integer. */\n\
             export type Integer = number;\n\
             \n\
             export interface Empty {}\n\
             \n\
             export interface Project {\n\
             \x20 name: string;\n\
             \x20 [key: string]: any;\n\
             }\n\
             \n"
        );
    }
}

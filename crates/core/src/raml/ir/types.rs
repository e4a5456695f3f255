//! TypeScript IR types for code generation.
//!
//! This module defines the subset of TypeScript needed for declaration files:
//! - TsType: types (primitives, references, literals, arrays, unions, maps, objects)
//! - DocComment: documentation comments with wrapped and verbatim sections
//! - TsDecl: exported interfaces and type aliases

use raml2ts_common::Literal;

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `any`
    Any,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
    /// `void`, for bodyless responses
    Void,
}

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: any, boolean, number, string, void
    Primitive(TsPrimitive),
    /// Named type reference: "Project", "Integer"
    Ref(String),
    /// Literal type: 'foo', 42, true
    Literal(Literal),
    /// Array type: T[] or Array<T>
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// String-keyed map: { [key: string]: V }
    Map(Box<TsType>),
    /// Inline object type, one member per line
    Object(Vec<TsProp>),
}

impl TsType {
    /// Build a union, collapsing duplicates and single-member unions.
    pub fn union(types: impl IntoIterator<Item = TsType>) -> TsType {
        let mut members: Vec<TsType> = Vec::new();
        for ty in types {
            if !members.contains(&ty) {
                members.push(ty);
            }
        }
        match members.len() {
            1 => members.remove(0),
            _ => TsType::Union(members),
        }
    }
}

/// Object or interface member
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Member name, quoted on output when needed
    pub name: String,
    /// Member type
    pub ty: TsType,
    /// Emit `?`
    pub optional: bool,
    /// Emit `readonly`
    pub readonly: bool,
    /// Leading documentation comment
    pub docs: DocComment,
}

/// One block of a documentation comment. Blocks are separated by a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSection {
    /// Prose, word-wrapped to the comment width
    Text(String),
    /// Pre-formatted lines, emitted as is
    Lines(Vec<String>),
}

/// Documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Blocks in output order
    pub sections: Vec<DocSection>,
}

impl DocComment {
    /// Whether the comment would print nothing.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Append a prose block. Blank text is ignored.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.sections.push(DocSection::Text(text));
        }
    }

    /// Append a verbatim block. An empty block is ignored.
    pub fn push_lines(&mut self, lines: Vec<String>) {
        if !lines.is_empty() {
            self.sections.push(DocSection::Lines(lines));
        }
    }
}

/// `export interface Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TsInterface {
    /// Interface name
    pub name: String,
    /// Leading documentation comment
    pub docs: DocComment,
    /// Named members
    pub props: Vec<TsProp>,
    /// Value type of `[key: string]` members, emitted after `props`
    pub index_signature: Option<TsType>,
}

/// `export type Name = T;`
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeAlias {
    /// Alias name
    pub name: String,
    /// Leading documentation comment
    pub docs: DocComment,
    /// Aliased type
    pub ty: TsType,
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum TsDecl {
    /// `export interface`
    Interface(TsInterface),
    /// `export type`
    TypeAlias(TsTypeAlias),
}

/// A complete declaration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsModule {
    /// Leading `//` comment lines
    pub header: Vec<String>,
    /// Declarations, each followed by a blank line
    pub decls: Vec<TsDecl>,
}

//! RAML to TypeScript declaration generator.
//!
//! This module reads RAML 0.8 documents and generates TypeScript with:
//! - One interface per JSON schema model, de-duplicated by `id`
//! - Documentation comments from descriptions, defaults, and examples
//! - An optional endpoint index typing every request and response

mod emitter;
mod ir;
mod spec;

pub use emitter::{RamlInput, generate_declarations, parse_document, render};
pub use ir::api::{
    Endpoint, HttpMethod, Parameter, ParameterType, ParsedDocument, RequestBody, Response,
};
pub use ir::docs::{DocParts, build_doc_comment, sort_endpoints_for_jsdoc, splice_default};
pub use ir::schema::{ModelRegistry, ObjectDefinition, Primitive, PropertyDefinition, PropertyKind};
pub use ir::types::{DocComment, DocSection};
pub use ir::utils::model_name;
pub use ir::{decode_schema, inherit_uri_parameters, normalize_schema};
pub use spec::{RawSchema, decode_document};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::RendererOptions;
    use pretty_assertions::assert_eq;

    const TEST_RAML: &str = r#"#%RAML 0.8
title: Catalog
version: 2
/:
  /items:
    description: Catalog items.
    get:
      queryParameters:
        tag:
          type: string
          repeat: true
          example: red
      responses:
        200:
          body:
            application/json:
              schema: |
                {
                  "type": "array",
                  "items": {
                    "type": "object",
                    "id": "urn:catalog:Item",
                    "description": "An item in the catalog.",
                    "properties": {
                      "sku": { "type": "string", "required": true },
                      "color": { "type": "string", "enum": ["red", "green"] },
                      "price": { "type": "number", "default": 0 }
                    }
                  }
                }
    post:
      body:
        application/json:
          schema: '{ "$ref": "urn:catalog:Item" }'
          example: '{ "sku": "A-1", "color": "red" }'
      responses:
        201:
          body:
            application/json:
              schema: '{ "$ref": "urn:catalog:Item" }'
  /items/{sku}:
    uriParameters:
      sku:
        type: string
    get:
      responses:
        200:
          body:
            application/json:
              schema: '{ "$ref": "urn:catalog:Item" }'
"#;

    fn generate(options: &RendererOptions) -> String {
        generate_declarations(TEST_RAML, options).unwrap()
    }

    #[test]
    fn test_generate_full_code() {
        let ts_code = generate(&RendererOptions::default());

        assert!(ts_code.starts_with("// Generated from Catalog version 2. Do not edit.\n\n"));
        assert!(ts_code.contains("export type Integer = number;\n"));
        assert!(ts_code.contains("/** An item in the catalog. */\nexport interface Item {\n"));
        assert!(ts_code.contains("  sku: string;\n"));
        assert!(ts_code.contains("  color?: 'red' | 'green';\n"));
        assert!(ts_code.contains("  /** Defaults to `0`. */\n  price?: number;\n"));
        assert!(!ts_code.contains("export interface Endpoints"));
        assert!(ts_code.ends_with("}\n\n"));
    }

    #[test]
    fn test_interface_names_and_modifiers() {
        let ts_code = generate(&RendererOptions {
            interface_prefix: "I".into(),
            interface_suffix: "Dto".into(),
            emit_interfaces_as_readonly: true,
            emit_integer_as: "Int".into(),
            ..RendererOptions::default()
        });

        assert!(ts_code.contains("export type Integer = number;\n"));
        assert!(!ts_code.contains("export type Int "));
        assert!(ts_code.contains("export interface IItemDto {\n"));
        assert!(ts_code.contains("  readonly sku: string;\n"));
    }

    #[test]
    fn test_sort_keys() {
        let unsorted = generate(&RendererOptions::default());
        let sku = unsorted.find("sku: string").unwrap();
        let color = unsorted.find("color?:").unwrap();
        assert!(sku < color);

        let sorted = generate(&RendererOptions {
            sort_keys: true,
            ..RendererOptions::default()
        });
        let sku = sorted.find("sku: string").unwrap();
        let color = sorted.find("color?:").unwrap();
        let price = sorted.find("price?:").unwrap();
        assert!(color < price && price < sku);
    }

    #[test]
    fn test_request_urls_list() {
        let ts_code = generate(&RendererOptions {
            emit_request_urls: true,
            ..RendererOptions::default()
        });

        assert!(ts_code.contains(
            "/**\n * An item in the catalog.\n *\n * Returned for:\n * - `GET /items/{sku}`\n * - `POST /items`\n */\nexport interface Item {\n"
        ));
    }

    #[test]
    fn test_request_example_fallback() {
        let ts_code = generate(&RendererOptions {
            emit_request_examples: true,
            ..RendererOptions::default()
        });

        assert!(ts_code.contains(
            " * @example\n * {\n *   sku: 'A-1',\n *   color: 'red'\n * }\n */\nexport interface Item {\n"
        ));
    }

    #[test]
    fn test_endpoint_index_parameters() {
        let ts_code = generate(&RendererOptions {
            add_endpoint_list: true,
            ..RendererOptions::default()
        });

        assert!(ts_code.contains(
            "    /** Catalog items. */\n    '/items': {\n      request?: {\n        query?: {\n          /**\n           * @example\n           * 'red'\n           */\n          tag?: string | string[];\n        };\n      };\n      response: Item[];\n"
        ));
        assert!(ts_code.contains(
            "      request: {\n        params: {\n          sku: string;\n        };\n      };\n      response: Item;\n"
        ));
        assert!(ts_code.contains(
            "      request: {\n        body: Item;\n      };\n      response: Item;\n      responses: {\n        201: Item;\n      };\n"
        ));
    }

    #[test]
    fn test_wrapped_descriptions() {
        let raml = r#"
title: Wrapping
/:
  /x:
    get:
      responses:
        200:
          body:
            application/json:
              schema: |
                {
                  "type": "object",
                  "id": "urn:x:Long",
                  "description": "A line that is exactly 32 characters long.\n\nSecond paragraph."
                }
"#;
        let ts_code = generate_declarations(
            raml,
            &RendererOptions {
                max_line_length: 23,
                ..RendererOptions::default()
            },
        )
        .unwrap();

        assert!(ts_code.contains(
            "/**\n * A line that is\n * exactly 32\n * characters long.\n *\n * Second paragraph.\n */\nexport interface Long {}\n"
        ));
    }

    #[test]
    fn test_cyclic_models() {
        let raml = r#"
title: Trees
/:
  /tree:
    get:
      responses:
        200:
          body:
            application/json:
              schema: |
                {
                  "type": "object",
                  "id": "urn:x:Tree",
                  "properties": {
                    "children": { "type": "array", "items": { "$ref": "urn:x:Tree" } },
                    "parent": { "type": "object", "id": "urn:x:Tree", "properties": {} }
                  }
                }
"#;
        let ts_code = generate_declarations(raml, &RendererOptions::default()).unwrap();
        assert_eq!(
            ts_code,
            "// Generated from Trees. Do not edit.\n\
             \n\
             /** An integral number, represented as a `number`. */\n\
             export type Integer = number;\n\
             \n\
             export interface Tree {\n\
             \x20 children?: Tree[];\n\
             \x20 parent?: Tree;\n\
             }\n\
             \n"
        );
    }
}

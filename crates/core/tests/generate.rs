//! End-to-end generation over RAML fixtures.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use raml2ts_core::raml::{HttpMethod, PropertyKind, decode_document};
use raml2ts_core::{GenerateError, RendererOptions, generate_declarations, parse_document};

const PROJECTS: &str = include_str!("fixtures/projects.raml");

#[test]
fn test_default_output_is_exact() {
    let output = generate_declarations(PROJECTS, &RendererOptions::default()).unwrap();
    assert_eq!(
        output,
        r#"// Generated from Projects API version v1. Do not edit.

/** An integral number, represented as a `number`. */
export type Integer = number;

export interface Node {
  name: string;
  parent?: Node;
}

export interface NodeList {
  nodes?: Node[];
}

/** A project. */
export interface Project {
  /** Unique name. */
  name: string;
  size?: Integer;
}

"#
    );
}

#[test]
fn test_endpoint_index_output_is_exact() {
    let options = RendererOptions {
        add_endpoint_list: true,
        emit_request_urls: true,
        emit_response_examples: true,
        ..RendererOptions::default()
    };
    let output = generate_declarations(PROJECTS, &options).unwrap();
    assert_eq!(
        output,
        r#"// Generated from Projects API version v1. Do not edit.

/** An integral number, represented as a `number`. */
export type Integer = number;

export interface Endpoints {
  GET: {
    /** List all projects. */
    '/': {
      request?: {};
      response: Project[];
      responses: {
        200: Project[];
      };
    };
    /** Fetch one project. */
    '/{project}': {
      request: {
        params: {
          /** The project name. */
          project: string;
        };
      };
      response: Project;
      responses: {
        /**
         * The project.
         *
         * @example
         * {
         *   name: 'demo',
         *   size: 3
         * }
         */
        200: Project;
      };
    };
    '/{project}/nodes': {
      request: {
        params: {
          /** The project name. */
          project: string;
        };
        query?: {
          /** Page size. Defaults to `10`. */
          limit?: number;
        };
      };
      response: NodeList;
      responses: {
        200: NodeList;
      };
    };
  };
  POST: {};
  PUT: {};
  PATCH: {};
  DELETE: {
    '/{project}': {
      request: {
        params: {
          /** The project name. */
          project: string;
        };
      };
      response: void;
      responses: {
        /** Deleted. */
        204: void;
      };
    };
  };
}

export interface Node {
  name: string;
  parent?: Node;
}

/** Returned for `GET /{project}/nodes`. */
export interface NodeList {
  nodes?: Node[];
}

/**
 * A project.
 *
 * Returned for `GET /{project}`.
 *
 * @example
 * {
 *   name: 'demo',
 *   size: 3
 * }
 */
export interface Project {
  /** Unique name. */
  name: string;
  size?: Integer;
}

"#
    );
}

#[test]
fn test_text_and_decoded_inputs_agree() {
    let decoded = decode_document(PROJECTS).unwrap();
    let options = RendererOptions {
        add_endpoint_list: true,
        ..RendererOptions::default()
    };
    assert_eq!(
        generate_declarations(&decoded, &options).unwrap(),
        generate_declarations(PROJECTS, &options).unwrap()
    );
}

#[test]
fn test_parsed_document_shape() {
    let doc = parse_document(PROJECTS).unwrap();

    assert_eq!(doc.title.as_deref(), Some("Projects API"));
    assert_eq!(doc.version.as_deref(), Some("v1"));
    assert_eq!(doc.base_uri.as_deref(), Some("https://api.example.com/{version}"));

    let endpoints: Vec<_> = doc
        .endpoints
        .iter()
        .map(|e| (e.method, e.url.as_str()))
        .collect();
    assert_eq!(
        endpoints,
        vec![
            (HttpMethod::Get, "/"),
            (HttpMethod::Get, "/{project}"),
            (HttpMethod::Delete, "/{project}"),
            (HttpMethod::Get, "/{project}/nodes"),
        ]
    );

    let ids: Vec<_> = doc.models.iter().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec!["urn:example:Project", "urn:example:NodeList", "urn:example:Node"]
    );
}

#[test]
fn test_nodes_inherit_project_parameter() {
    let doc = parse_document(PROJECTS).unwrap();
    let project = &doc.endpoints[1];
    let nodes = &doc.endpoints[3];
    assert_eq!(nodes.url, "/{project}/nodes");
    assert_eq!(nodes.url_parameters["project"], project.url_parameters["project"]);
    assert!(nodes.url_parameters["project"].required);
}

#[test]
fn test_bodyless_response() {
    let doc = parse_document(PROJECTS).unwrap();
    let delete = &doc.endpoints[2];
    let response = &delete.responses[&204];
    assert_eq!(response.description.as_deref(), Some("Deleted."));
    assert!(response.body_schema.is_none());
    assert!(response.body_example.is_none());
}

#[test]
fn test_shared_id_is_one_model() {
    let raml = r#"
title: Shared
/:
  /a:
    get:
      responses:
        200:
          body:
            application/json:
              schema: '{ "type": "object", "id": "urn:x:Thing", "properties": { "a": { "type": "string" } } }'
  /b:
    get:
      responses:
        200:
          body:
            application/json:
              schema: '{ "type": "object", "id": "urn:x:Thing", "properties": { "b": { "type": "number" } } }'
    post:
      body:
        application/json:
          schema: '{ "$ref": "urn:x:Thing" }'
"#;
    let doc = parse_document(raml).unwrap();
    assert_eq!(doc.models.len(), 1);

    let thing = doc.models.get("urn:x:Thing").unwrap().as_object().unwrap();
    assert!(thing.properties.contains_key("a"));
    assert!(!thing.properties.contains_key("b"));

    let kinds: Vec<_> = doc
        .endpoints
        .iter()
        .filter_map(|e| {
            e.responses
                .get(&200)
                .and_then(|r| r.body_schema.as_ref())
                .or(e.request_body.as_ref().and_then(|b| b.schema.as_ref()))
        })
        .map(|def| def.kind.clone())
        .collect();
    assert_eq!(kinds, vec![PropertyKind::Model("urn:x:Thing".into()); 3]);

    let output = generate_declarations(raml, &RendererOptions::default()).unwrap();
    assert_eq!(output.matches("export interface Thing").count(), 1);
}

#[test]
fn test_request_body_fields_match_schema() {
    let raml = r#"
title: Bodies
/:
  /projects:
    post:
      body:
        application/json:
          schema: |
            {
              "type": "object",
              "id": "urn:x:NewProject",
              "required": ["name"],
              "properties": {
                "name": { "type": "string" },
                "tags": { "type": "array", "items": { "type": "string" } },
                "labels": { "type": "object", "additionalProperties": { "type": "string" } }
              }
            }
"#;
    let output = generate_declarations(raml, &RendererOptions::default()).unwrap();
    assert!(output.contains(
        "export interface NewProject {\n  name: string;\n  tags?: string[];\n  labels?: { [key: string]: string };\n}\n"
    ));
}

#[test]
fn test_body_with_required_field_is_required() {
    let raml = r#"
title: Bodies
/:
  /projects:
    post:
      body:
        application/json:
          schema: '{ "type": "object", "id": "urn:x:P", "required": false, "properties": { "name": { "type": "string", "required": true } } }'
"#;
    let options = RendererOptions {
        add_endpoint_list: true,
        ..RendererOptions::default()
    };
    let output = generate_declarations(raml, &options).unwrap();
    assert!(output.contains("      request: {\n        body: P;\n      };\n"));
}

#[test]
fn test_integer_alias_with_custom_integer_type() {
    let options = RendererOptions {
        emit_integer_as: "number".into(),
        ..RendererOptions::default()
    };
    let output = generate_declarations(PROJECTS, &options).unwrap();
    assert!(output.contains("export type Integer = number;\n"));
    assert!(!output.contains("export type number"));
    assert!(output.contains("  size?: number;\n"));
}

#[test]
fn test_form_body_is_inline_object() {
    let raml = r#"
title: Forms
/:
  /upload:
    post:
      body:
        multipart/form-data:
          formParameters:
            file:
              type: file
              required: true
            note:
              type: string
"#;
    let options = RendererOptions {
        add_endpoint_list: true,
        ..RendererOptions::default()
    };
    let output = generate_declarations(raml, &options).unwrap();
    assert!(output.contains(
        "      request: {\n        body: {\n          file: any;\n          note?: string;\n        };\n      };\n"
    ));
}

#[test]
fn test_empty_document_renders_nothing() {
    let output = generate_declarations("title: Nothing\n", &RendererOptions::default()).unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_missing_uri_parameter_fails() {
    let raml = r#"
title: Broken
/:
  /{project}/nodes:
    get:
      responses:
        200:
"#;
    let err = generate_declarations(raml, &RendererOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::MissingUriParameter { ref name, ref url } if name == "project" && url == "/{project}/nodes"
    ));
}

#[test]
fn test_malformed_embedded_json_fails() {
    let raml = r#"
title: Broken
/:
  /x:
    get:
      responses:
        200:
          body:
            application/json:
              schema: '{ "type": '
"#;
    let err = generate_declarations(raml, &RendererOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidJson { .. }));
}

#[test]
fn test_unhandled_schema_fails() {
    let raml = r#"
title: Broken
/:
  /x:
    get:
      responses:
        200:
          body:
            application/json:
              schema: '{ "type": "object", "id": "urn:x:X", "properties": { "at": { "type": "date" } } }'
"#;
    let err = generate_declarations(raml, &RendererOptions::default()).unwrap_err();
    assert!(err.to_string().contains("date"));
}

#[test]
fn test_non_mapping_root_fails() {
    let err = generate_declarations("- a\n- b\n", &RendererOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidDocument(_)));
}

//! OpenAPI document and Swagger UI.
//!
//! The document is OpenAPI 3.1. Component schemas come from the `JsonSchema`
//! derives on the wire types; schemars `$defs` are hoisted into
//! `components/schemas` and their `$ref`s rewritten to match.

use axum::response::Html;
use axum::Json;
use schemars::{schema_for, JsonSchema};
use serde_json::{json, Map, Value};

use crate::catalog::{PagedResponse, Product, ProductInput};
use crate::http::handlers::{CreatedResponse, HealthStatus};

/// Path of the generated document, as the Swagger UI requests it.
pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";
/// Short alias of [`OPENAPI_PATH`].
pub const OPENAPI_ALIAS_PATH: &str = "/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger";

const TITLE: &str = "Catalog Proxy API";

/// One documented operation.
struct Operation {
    method: &'static str,
    path: &'static str,
    summary: &'static str,
    params: &'static [Param],
    request: Option<&'static str>,
    /// Success status and the component it returns, if any.
    success: (u16, Option<&'static str>),
    /// Error statuses this operation may answer with.
    errors: &'static [u16],
}

struct Param {
    name: &'static str,
    location: &'static str,
    kind: &'static str,
    required: bool,
}

const ID: Param = Param { name: "id", location: "path", kind: "integer", required: true };

const OPERATIONS: &[Operation] = &[
    Operation {
        method: "get",
        path: "/api/products",
        summary: "List upstream products with optional search, category filter and pagination",
        params: &[
            Param { name: "query", location: "query", kind: "string", required: false },
            Param { name: "category", location: "query", kind: "string", required: false },
            Param { name: "page", location: "query", kind: "integer", required: false },
            Param { name: "pageSize", location: "query", kind: "integer", required: false },
        ],
        request: None,
        success: (200, Some("ProductPage")),
        errors: &[400, 404, 500, 502],
    },
    Operation {
        method: "post",
        path: "/api/products",
        summary: "Create a local product",
        params: &[],
        request: Some("ProductInput"),
        success: (201, Some("CreatedProduct")),
        errors: &[400],
    },
    Operation {
        method: "get",
        path: "/api/products/{id}",
        summary: "Fetch one upstream product",
        params: &[ID],
        request: None,
        success: (200, Some("Product")),
        errors: &[400, 404, 408, 500, 503],
    },
    Operation {
        method: "delete",
        path: "/api/products/{id}",
        summary: "Delete a local product",
        params: &[ID],
        request: None,
        success: (204, None),
        errors: &[400, 404],
    },
    Operation {
        method: "get",
        path: "/api/categories",
        summary: "List upstream category names",
        params: &[],
        request: None,
        success: (200, None),
        errors: &[500, 502],
    },
    Operation {
        method: "get",
        path: "/api/local-products",
        summary: "List local products",
        params: &[],
        request: None,
        success: (200, None),
        errors: &[],
    },
    Operation {
        method: "get",
        path: "/api/local-products/{id}",
        summary: "Fetch one local product",
        params: &[ID],
        request: None,
        success: (200, Some("Product")),
        errors: &[400, 404],
    },
    Operation {
        method: "get",
        path: "/health",
        summary: "Service health",
        params: &[],
        request: None,
        success: (200, Some("HealthStatus")),
        errors: &[],
    },
];

fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Rewrite schemars-local references to component references.
fn rewrite_refs(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(target)) = obj.get_mut("$ref") {
                if let Some(name) = target.strip_prefix("#/$defs/") {
                    *target = format!("#/components/schemas/{name}");
                }
            }
            obj.values_mut().for_each(rewrite_refs);
        }
        Value::Array(items) => items.iter_mut().for_each(rewrite_refs),
        _ => {}
    }
}

/// Add `T` under `name`, hoisting its nested definitions.
fn register<T: JsonSchema>(schemas: &mut Map<String, Value>, name: &str) {
    let mut schema = schema_for!(T).to_value();
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        if let Some(Value::Object(defs)) = obj.remove("$defs") {
            for (def_name, mut def) in defs {
                rewrite_refs(&mut def);
                schemas.entry(def_name).or_insert(def);
            }
        }
    }
    rewrite_refs(&mut schema);
    schemas.insert(name.to_string(), schema);
}

fn components() -> Map<String, Value> {
    let mut schemas = Map::new();
    register::<Product>(&mut schemas, "Product");
    register::<ProductInput>(&mut schemas, "ProductInput");
    register::<PagedResponse<Product>>(&mut schemas, "ProductPage");
    register::<CreatedResponse>(&mut schemas, "CreatedProduct");
    register::<HealthStatus>(&mut schemas, "HealthStatus");

    schemas.insert(
        "Error".into(),
        json!({
            "type": "object",
            "properties": { "error": { "type": "string" } },
            "required": ["error"]
        }),
    );
    schemas.insert(
        "ValidationErrors".into(),
        json!({
            "type": "object",
            "properties": { "errors": { "type": "array", "items": { "type": "string" } } },
            "required": ["errors"]
        }),
    );
    schemas
}

fn success_schema(op: &Operation) -> Option<Value> {
    match (op.success.1, op.path) {
        (Some(name), _) => Some(component_ref(name)),
        (None, "/api/categories") => Some(json!({ "type": "array", "items": { "type": "string" } })),
        (None, "/api/local-products") => {
            Some(json!({ "type": "array", "items": component_ref("Product") }))
        }
        (None, _) => None,
    }
}

fn operation_json(op: &Operation) -> Value {
    let mut operation = Map::new();
    operation.insert("summary".into(), json!(op.summary));

    if !op.params.is_empty() {
        let params: Vec<Value> = op
            .params
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "in": p.location,
                    "required": p.required,
                    "schema": { "type": p.kind }
                })
            })
            .collect();
        operation.insert("parameters".into(), Value::Array(params));
    }

    if let Some(body) = op.request {
        operation.insert(
            "requestBody".into(),
            json!({
                "required": true,
                "content": { "application/json": { "schema": component_ref(body) } }
            }),
        );
    }

    let mut responses = Map::new();
    let (status, _) = op.success;
    let mut success = Map::new();
    success.insert("description".into(), json!("Success"));
    if let Some(schema) = success_schema(op) {
        success.insert(
            "content".into(),
            json!({ "application/json": { "schema": schema } }),
        );
    }
    responses.insert(status.to_string(), Value::Object(success));

    for code in op.errors {
        let schema = if *code == 400 && op.request.is_some() {
            json!({ "oneOf": [component_ref("ValidationErrors"), component_ref("Error")] })
        } else {
            component_ref("Error")
        };
        responses.insert(
            code.to_string(),
            json!({
                "description": "Failure",
                "content": { "application/json": { "schema": schema } }
            }),
        );
    }
    operation.insert("responses".into(), Value::Object(responses));

    Value::Object(operation)
}

/// Build the OpenAPI document for every public route.
pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    for op in OPERATIONS {
        let entry = paths.entry(op.path).or_insert_with(|| json!({}));
        if let Some(obj) = entry.as_object_mut() {
            obj.insert(op.method.to_string(), operation_json(op));
        }
    }

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": TITLE,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Reshaped product catalog plus a local in-memory product store"
        },
        "paths": paths,
        "components": { "schemas": components() }
    })
}

/// `GET /swagger/v1/swagger.json` and `GET /openapi.json`
pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

/// `GET /swagger`
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{TITLE}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{OPENAPI_PATH}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>"##
    ))
}

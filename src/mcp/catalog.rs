use crate::errors::ToolError;
use crate::utils::suggest::suggest;
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

static TOOL_CATALOG: Lazy<Vec<ToolDef>> = Lazy::new(|| {
    let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tool_catalog.json"));
    serde_json::from_str(raw).expect("tool_catalog.json must be valid JSON")
});

static TOOL_MAP: Lazy<HashMap<String, ToolDef>> = Lazy::new(|| {
    TOOL_CATALOG
        .iter()
        .cloned()
        .map(|tool| (tool.name.clone(), tool))
        .collect()
});

static TOOL_VALIDATORS: Lazy<HashMap<String, JSONSchema>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for tool in TOOL_CATALOG.iter() {
        if let Ok(schema) = JSONSchema::compile(&tool.input_schema) {
            map.insert(tool.name.clone(), schema);
        }
    }
    map
});

pub fn tool_catalog() -> &'static Vec<ToolDef> {
    &TOOL_CATALOG
}

pub fn tool_by_name(name: &str) -> Option<&'static ToolDef> {
    TOOL_MAP.get(name)
}

pub fn unknown_tool_message(name: &str) -> String {
    let names: Vec<String> = TOOL_CATALOG.iter().map(|tool| tool.name.clone()).collect();
    let suggestions = suggest(name, &names, 3);
    if suggestions.is_empty() {
        format!("Unknown tool: {}", name)
    } else {
        format!(
            "Unknown tool: {}. Did you mean: {}?",
            name,
            suggestions.join(", ")
        )
    }
}

pub fn validate_tool_args(tool_name: &str, args: &Value) -> Result<(), ToolError> {
    let Some(validator) = TOOL_VALIDATORS.get(tool_name) else {
        return Ok(());
    };
    if let Err(errors) = validator.validate(args) {
        let rendered: Vec<String> = errors.take(5).map(|err| render_error(&err)).collect();
        return Err(ToolError::invalid_params(format!(
            "Invalid arguments for {}: {}",
            tool_name,
            rendered.join("; ")
        )));
    }
    Ok(())
}

fn render_error(err: &jsonschema::ValidationError) -> String {
    let raw_path = err.instance_path.to_string();
    let path = if raw_path.is_empty() {
        "(root)".to_string()
    } else {
        raw_path
    };
    match &err.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            format!("missing required field {}", property)
        }
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            let allowed: Vec<&str> = options
                .as_array()
                .map(|opts| opts.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            format!("{}: expected one of {}", path, allowed.join(", "))
        }
        _ => format!("{}: {}", path, err),
    }
}

//! JSON Schema helpers built on `schemars`.
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde_json::Value;

/// JSON Schema for `T` as a JSON object, without the `$schema` marker.
pub fn object_schema<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(mut map)) => {
            map.remove("$schema");
            map
        }
        _ => {
            let mut map = JsonObject::new();
            map.insert("type".into(), Value::String("object".into()));
            map
        }
    }
}

/// Names listed under `required` in an object schema.
pub fn required_properties(schema: &JsonObject) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// JSON types a property accepts, read from `type` and any `anyOf` branches.
pub fn property_types<'a>(schema: &'a JsonObject, property: &str) -> Vec<&'a str> {
    let Some(definition) = schema
        .get("properties")
        .and_then(|properties| properties.get(property))
    else {
        return Vec::new();
    };

    let mut types = Vec::new();
    collect_types(definition, &mut types);
    if let Some(branches) = definition.get("anyOf").and_then(Value::as_array) {
        for branch in branches {
            collect_types(branch, &mut types);
        }
    }
    types
}

fn collect_types<'a>(definition: &'a Value, types: &mut Vec<&'a str>) {
    match definition.get("type") {
        Some(Value::String(name)) => types.push(name),
        Some(Value::Array(names)) => types.extend(names.iter().filter_map(Value::as_str)),
        _ => {}
    }
}

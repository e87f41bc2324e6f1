//! JSON schema helpers for strict structured output.
//!
//! Strict mode requires every object schema to list all of its properties
//! as required and to forbid additional properties. Subschemas are inlined
//! so the request carries no `$ref` indirection.

use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde_json::Value;

use crate::error::Result;

/// Generate the strict-mode JSON schema for `T`.
///
/// The root `$schema` and `title` keywords are dropped.
///
/// # Errors
///
/// Returns [`Error::Json`] if the generated schema cannot be converted to
/// a JSON value.
///
/// # Example
///
/// ```
/// use cardsmith::strict_schema_for;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// #[allow(dead_code)]
/// struct Pair {
///     left: String,
///     right: String,
/// }
///
/// let schema = strict_schema_for::<Pair>()?;
/// assert_eq!(schema["additionalProperties"], false);
/// assert_eq!(schema["required"].as_array().map(Vec::len), Some(2));
/// assert!(schema.get("title").is_none());
/// # Ok::<(), cardsmith::Error>(())
/// ```
pub fn strict_schema_for<T: JsonSchema>() -> Result<Value> {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let root = generator.into_root_schema_for::<T>();

    let mut schema = serde_json::to_value(root)?;
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
        map.remove("title");
    }
    make_strict(&mut schema);
    Ok(schema)
}

/// Rewrite a schema in place so every object schema is strict.
pub fn make_strict(schema: &mut Value) {
    match schema {
        Value::Array(items) => items.iter_mut().for_each(make_strict),
        Value::Object(map) => {
            let names = match map.get_mut("properties") {
                Some(Value::Object(props)) => {
                    props.values_mut().for_each(make_strict);
                    Some(props.keys().cloned().map(Value::String).collect())
                }
                _ => None,
            };
            if let Some(names) = names {
                map.insert("required".to_string(), Value::Array(names));
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            if let Some(items) = map.get_mut("items") {
                make_strict(items);
            }
            for key in ["anyOf", "allOf", "oneOf"] {
                if let Some(variants) = map.get_mut(key) {
                    make_strict(variants);
                }
            }
            for key in ["definitions", "$defs"] {
                if let Some(Value::Object(defs)) = map.get_mut(key) {
                    defs.values_mut().for_each(make_strict);
                }
            }
        }
        _ => {}
    }
}

//! Translation of a pipeline definition's `appParams` section into engine flags.
//!
//! ```json
//! { "ffmpegPipelineDefinition": { "appParams": { "codec": "jpegxs", "port": 9002 } } }
//! ```
//! becomes `-c jpegxs -port 9002`. Keys are emitted in sorted order.

use std::path::Path;

use serde_json::Value;

use crate::foundation::error::{BcsError, BcsResult};

/// Flags for the `appParams` object `params`.
pub fn process_app_params(params: &Value) -> BcsResult<Vec<String>> {
    let Value::Object(map) = params else {
        return Err(BcsError::validation("appParams must be an object"));
    };

    let mut args = Vec::with_capacity(map.len() * 2);
    for (key, value) in map {
        let (flag, rendered) = match key.as_str() {
            "codec" => ("-c".to_string(), scalar(key, value)?),
            "format" => ("-f".to_string(), scalar(key, value)?),
            "frame_rate" => (format!("-{key}"), frame_rate(value)?),
            _ => (format!("-{key}"), scalar(key, value)?),
        };
        tracing::debug!(flag = %flag, value = %rendered, "app param");
        args.push(flag);
        args.push(rendered);
    }
    Ok(args)
}

/// Read a pipeline definition file and translate its `appParams` section.
pub fn process_config_file(path: &Path) -> BcsResult<Vec<String>> {
    use anyhow::Context as _;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not open the configuration file '{}'", path.display()))?;
    let doc: Value = serde_json::from_str(&text)?;

    let definition = doc
        .get("ffmpegPipelineDefinition")
        .ok_or_else(|| BcsError::missing("ffmpegPipelineDefinition section not found"))?;
    let params = definition
        .get("appParams")
        .ok_or_else(|| BcsError::missing("appParams section not found"))?;
    process_app_params(params)
}

fn scalar(key: &str, value: &Value) -> BcsResult<String> {
    let rendered = match value {
        Value::Null => return Err(BcsError::missing(format!("key {key} has no value"))),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => {
            return Err(BcsError::validation(format!(
                "key {key} must hold a scalar value"
            )));
        }
    };
    if rendered.is_empty() {
        return Err(BcsError::validation(format!("key {key} has an empty value")));
    }
    Ok(rendered)
}

fn frame_rate(value: &Value) -> BcsResult<String> {
    let part = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| BcsError::validation(format!("frame_rate.{name} must be a number")))
    };
    if !value.is_object() {
        return Err(BcsError::validation(
            "frame_rate must be an object with numerator and denominator",
        ));
    }
    let numerator = part("numerator")?;
    let denominator = part("denominator")?;
    if denominator == 0.0 {
        return Err(BcsError::validation("invalid frame_rate: denominator is zero"));
    }
    // integer frames per second, truncated toward zero
    Ok(((numerator / denominator).trunc() as i64).to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/exec/app_params.rs"]
mod tests;

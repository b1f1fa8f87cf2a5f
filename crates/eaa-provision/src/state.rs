//! State mapping helpers.
//!
//! The settings structs flatten to JSON maps and merge field-by-field via
//! serde round-trips, so a managed delta can overlay the complete
//! server-side mirror without disturbing unmanaged fields.

use serde::Serialize;
use serde_json::{Map, Value};

use eaa_client::apps::{AdvancedSettings, AdvancedSettingsComplete};

use crate::error::{ProvisionError, ProvisionResult};

/// Flatten a settings struct into a JSON map, dropping unset fields.
pub fn flatten_settings<T: Serialize>(settings: &T) -> ProvisionResult<Map<String, Value>> {
    let value = serde_json::to_value(settings).map_err(|e| ProvisionError::State(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect()),
        other => Err(ProvisionError::State(format!(
            "expected a settings object, got {other}"
        ))),
    }
}

/// Overlay the managed settings delta onto the complete mirror. Fields the
/// delta leaves unset keep their server-side values.
pub fn merge_settings(
    complete: &mut AdvancedSettingsComplete,
    delta: &AdvancedSettings,
) -> ProvisionResult<()> {
    let mut base = flatten_settings(complete)?;
    for (key, value) in flatten_settings(delta)? {
        base.insert(key, value);
    }
    *complete = serde_json::from_value(Value::Object(base))
        .map_err(|e| ProvisionError::State(e.to_string()))?;
    Ok(())
}

/// Entries of `left` that do not appear in `right`, compared
/// case-insensitively. Original casing is preserved in the result.
#[must_use]
pub fn difference_ignore_case(left: &[String], right: &[String]) -> Vec<String> {
    let lowered: Vec<String> = right.iter().map(|item| item.to_lowercase()).collect();
    left.iter()
        .filter(|item| !lowered.contains(&item.to_lowercase()))
        .cloned()
        .collect()
}

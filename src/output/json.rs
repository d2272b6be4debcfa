use crate::error::Result;
use crate::model::ScanResult;

use super::OutputFormatter;

/// Pretty-printed JSON of [`ScanResult::to_json_value`].
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ScanResult) -> Result<String> {
        let value = result.to_json_value()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

//! Host-supplied input data for the vector field component.

use serde::Deserialize;

/// Payload the embedding page provides: the text to visualize and an
/// optional theme preset name.
#[derive(Clone, Debug, Deserialize)]
pub struct FieldData {
	/// The text that is sampled into particles.
	pub text: String,
	/// Theme preset name (`"ion"`, `"ember"`, `"aurora"`, `"overlay"`);
	/// unknown or missing names fall back to the default theme.
	#[serde(default)]
	pub theme: Option<String>,
}

impl Default for FieldData {
	fn default() -> Self {
		Self {
			text: "Text = Field Vectors".to_string(),
			theme: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_with_and_without_theme() {
		let bare: FieldData = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
		assert_eq!(bare.text, "hi");
		assert!(bare.theme.is_none());

		let themed: FieldData =
			serde_json::from_str(r#"{"text": "hi", "theme": "ember"}"#).unwrap();
		assert_eq!(themed.theme.as_deref(), Some("ember"));
	}
}

use serde::{Deserialize, Serialize};

use crate::Result;

/// How keys carrying nested mappings are matched to destination fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedLookup {
	/// Resolve through the promotion-aware type spec, like scalar keys.
	#[default]
	Promoted,
	/// Match only direct, non-embedded members whose raw tag equals the key.
	ImmediateTag,
}

/// Registry behavior switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Maximum embedding nesting accepted while compiling a type spec.
	pub max_embed_depth: usize,
	/// Resolution rule for nested-mapping keys.
	pub nested_lookup: NestedLookup,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			max_embed_depth: 32,
			nested_lookup: NestedLookup::Promoted,
		}
	}
}

impl Config {
	/// Preset matching the legacy nested-mapping lookup by raw tag.
	pub fn immediate_tag() -> Self {
		Self {
			nested_lookup: NestedLookup::ImmediateTag,
			..Self::default()
		}
	}

	/// Parse a JSON config document; missing keys take their defaults.
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}

use crate::value::{Map, Value};
use crate::{Result, ScanError};

/// JSON documents map onto the value model as config sources would deliver them:
/// booleans and non-integral numbers become text, arrays are rejected.
impl TryFrom<serde_json::Value> for Value {
	type Error = ScanError;

	fn try_from(json: serde_json::Value) -> Result<Self> {
		Ok(match json {
			serde_json::Value::Null => Self::Nil,
			serde_json::Value::Bool(flag) => Self::Text(flag.to_string()),
			serde_json::Value::Number(number) => match number.as_i64() {
				Some(n) => Self::Integer(n),
				None => Self::Text(number.to_string()),
			},
			serde_json::Value::String(text) => Self::Text(text),
			serde_json::Value::Array(_) => return Err(ScanError::UnsupportedInput { kind: "array" }),
			serde_json::Value::Object(object) => {
				let mut map = Map::new();
				for (key, value) in object {
					map.insert(key, Self::try_from(value)?);
				}
				Self::Map(map)
			}
		})
	}
}

use std::collections::BTreeMap;

/// Keyed source mapping. Key order carries no meaning.
pub type Map = BTreeMap<String, Value>;

/// Dynamically-typed source value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
	/// Absent value.
	#[default]
	Nil,
	/// UTF-8 text.
	Text(String),
	/// Opaque bulk bytes, kept apart from text to avoid needless conversion.
	Bytes(Vec<u8>),
	/// Signed integer.
	Integer(i64),
	/// Error reply carried as data.
	Error(String),
	/// Nested mapping.
	Map(Map),
}

impl Value {
	/// Build a mapping value from `(key, value)` pairs.
	pub fn map<K, V, I>(entries: I) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
		I: IntoIterator<Item = (K, V)>,
	{
		Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}

	/// Build an error value.
	pub fn error(message: impl Into<String>) -> Self {
		Self::Error(message.into())
	}

	/// Human-readable variant name used in conversion errors.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Text(_) => "simple string",
			Self::Bytes(_) => "bulk string",
			Self::Integer(_) => "integer",
			Self::Error(_) => "error",
			Self::Map(_) => "mapping",
		}
	}

	/// Borrow the nested mapping, if any.
	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow the text payload, if any.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Whether this is [`Value::Nil`].
	pub fn is_nil(&self) -> bool {
		matches!(self, Self::Nil)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Integer(i64::from(value))
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Self::Integer(i64::from(value))
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(value)
	}
}

impl From<&[u8]> for Value {
	fn from(value: &[u8]) -> Self {
		Self::Bytes(value.to_vec())
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Self::Map(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Nil, Into::into)
	}
}

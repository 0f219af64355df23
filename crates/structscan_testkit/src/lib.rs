//! Shared test helpers for workspace crates.

use std::net::IpAddr;
use std::sync::Once;

use structscan::{BoxError, Decode, Map, Value};

/// Build a source mapping from `(key, value)` pairs.
pub fn source<K, V, I>(entries: I) -> Map
where
	K: Into<String>,
	V: Into<Value>,
	I: IntoIterator<Item = (K, V)>,
{
	entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect()
}

/// Install a test-writer tracing subscriber once per process. Honors `RUST_LOG`.
pub fn init_tracing() {
	static INIT: Once = Once::new();
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_test_writer()
			.try_init();
	});
}

/// Network address decoded from text or bulk bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub IpAddr);

impl Default for Addr {
	fn default() -> Self {
		Self(IpAddr::from([0, 0, 0, 0]))
	}
}

impl Decode for Addr {
	fn decode(&mut self, value: &Value, _options: &str) -> Result<(), BoxError> {
		let text = match value {
			Value::Text(text) => text.as_str(),
			Value::Bytes(bytes) => std::str::from_utf8(bytes)?,
			other => return Err(format!("cannot convert from {} to address", other.kind_name()).into()),
		};
		self.0 = text.parse()?;
		Ok(())
	}
}

structscan::custom_slot!(Addr);

/// Records every value and option string it is asked to decode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
	/// `(value, options)` pairs in call order.
	pub calls: Vec<(Value, String)>,
}

impl Decode for Recorder {
	fn decode(&mut self, value: &Value, options: &str) -> Result<(), BoxError> {
		self.calls.push((value.clone(), options.to_owned()));
		Ok(())
	}
}

structscan::custom_slot!(Recorder);

/// Calendar date parsed with a layout passed through field options.
///
/// Layouts use `%Y`, `%m`, and `%d` placeholders separated by literal characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Date {
	/// Year.
	pub year: i32,
	/// Month, 1-based.
	pub month: u8,
	/// Day of month, 1-based.
	pub day: u8,
}

impl Decode for Date {
	fn decode(&mut self, value: &Value, options: &str) -> Result<(), BoxError> {
		let Value::Text(text) = value else {
			return Err(format!("expected text, got {}", value.kind_name()).into());
		};
		let layout = if options.is_empty() { "%Y-%m-%d" } else { options };
		*self = parse_date(text, layout).ok_or_else(|| format!("{text:?} does not match layout {layout:?}"))?;
		Ok(())
	}
}

structscan::custom_slot!(Date);

fn parse_date(text: &str, layout: &str) -> Option<Date> {
	let mut date = Date::default();
	let mut rest = text;
	let mut spec = layout;
	while !spec.is_empty() {
		if let Some(tail) = spec.strip_prefix('%') {
			let code = tail.chars().next()?;
			spec = &tail[code.len_utf8()..];
			let width = if code == 'Y' { 4 } else { 2 };
			let digits = rest.get(..width)?;
			rest = &rest[width..];
			match code {
				'Y' => date.year = digits.parse().ok()?,
				'm' => date.month = digits.parse().ok()?,
				'd' => date.day = digits.parse().ok()?,
				_ => return None,
			}
		} else {
			let literal = spec.chars().next()?;
			spec = &spec[literal.len_utf8()..];
			rest = rest.strip_prefix(literal)?;
		}
	}
	(rest.is_empty() && (1..=12).contains(&date.month) && (1..=31).contains(&date.day)).then_some(date)
}

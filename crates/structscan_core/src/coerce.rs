use std::fmt::Display;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::CoerceError;
use crate::shape::{Dest, FloatSlot, IntSlot, Nullable, Slot, UintSlot};
use crate::value::Value;

/// Convert one source value into one destination field.
///
/// Custom decoders see every value first, including mappings and nil, also when
/// wrapped in an optional. Scalar failures leave the destination at its zero
/// value; a failed non-custom optional is left empty.
pub fn coerce(slot: &mut dyn Slot, value: &Value, options: &str) -> Result<(), CoerceError> {
	let to = slot.type_name();
	match slot.dest() {
		Dest::Custom(custom) => custom.decode(value, options).map_err(CoerceError::Custom),
		Dest::Optional(nullable) => coerce_optional(nullable, value, options),
		dest => match value {
			Value::Nil => assign_nil(dest, to),
			Value::Bytes(bytes) => assign_bytes(dest, bytes, to),
			Value::Integer(n) => assign_integer(dest, *n, to),
			Value::Text(text) => assign_text(dest, text, value.kind_name(), to),
			Value::Error(message) => assign_error(dest, message, to),
			Value::Map(_) => Err(unconvertible(value.kind_name(), to)),
		},
	}
}

fn coerce_optional(nullable: &mut dyn Nullable, value: &Value, options: &str) -> Result<(), CoerceError> {
	// A custom pointee is allocated and sees every value, nil included.
	if let Dest::Custom(custom) = nullable.fill().dest() {
		return custom.decode(value, options).map_err(CoerceError::Custom);
	}

	if value.is_nil() {
		nullable.clear();
		return Ok(());
	}

	let result = coerce(nullable.fill(), value, options);
	if result.is_err() {
		nullable.clear();
	}
	result
}

fn assign_nil(dest: Dest<'_>, to: &'static str) -> Result<(), CoerceError> {
	match dest {
		Dest::Bytes(bytes) => {
			bytes.clear();
			Ok(())
		}
		_ => Err(unconvertible("nil", to)),
	}
}

fn assign_bytes(dest: Dest<'_>, bytes: &[u8], to: &'static str) -> Result<(), CoerceError> {
	match dest {
		Dest::Bytes(dst) => {
			dst.clear();
			dst.extend_from_slice(bytes);
			Ok(())
		}
		dest if accepts_text(&dest) => match std::str::from_utf8(bytes) {
			Ok(text) => assign_text(dest, text, "bulk string", to),
			Err(_) => {
				zero(dest);
				Err(CoerceError::Malformed {
					text: String::from_utf8_lossy(bytes).into_owned(),
					to,
				})
			}
		},
		_ => Err(unconvertible("bulk string", to)),
	}
}

fn assign_integer(dest: Dest<'_>, n: i64, to: &'static str) -> Result<(), CoerceError> {
	match dest {
		Dest::Int(slot) => slot.store(n, to),
		Dest::Uint(slot) => slot.store(n, to),
		Dest::Float(slot) => slot.store(n, to),
		Dest::Bool(dst) => {
			*dst = n != 0;
			Ok(())
		}
		_ => Err(unconvertible("integer", to)),
	}
}

fn assign_text(dest: Dest<'_>, text: &str, from: &'static str, to: &'static str) -> Result<(), CoerceError> {
	match dest {
		Dest::Int(slot) => slot.parse(text, to),
		Dest::Uint(slot) => slot.parse(text, to),
		Dest::Float(slot) => slot.parse(text, to),
		Dest::Bool(dst) => match parse_bool(text) {
			Some(flag) => {
				*dst = flag;
				Ok(())
			}
			None => {
				*dst = false;
				Err(malformed(text, to))
			}
		},
		Dest::Str(dst) => {
			text.clone_into(dst);
			Ok(())
		}
		Dest::Bytes(dst) => {
			dst.clear();
			dst.extend_from_slice(text.as_bytes());
			Ok(())
		}
		_ => Err(unconvertible(from, to)),
	}
}

fn assign_error(dest: Dest<'_>, message: &str, to: &'static str) -> Result<(), CoerceError> {
	match dest {
		Dest::Str(dst) => {
			message.clone_into(dst);
			Ok(())
		}
		Dest::Bytes(dst) => {
			dst.clear();
			dst.extend_from_slice(message.as_bytes());
			Ok(())
		}
		_ => Err(unconvertible("error", to)),
	}
}

fn accepts_text(dest: &Dest<'_>) -> bool {
	matches!(dest, Dest::Int(_) | Dest::Uint(_) | Dest::Float(_) | Dest::Bool(_) | Dest::Str(_))
}

fn zero(dest: Dest<'_>) {
	match dest {
		Dest::Int(slot) => slot.zero(),
		Dest::Uint(slot) => slot.zero(),
		Dest::Float(FloatSlot::F32(dst)) => *dst = 0.0,
		Dest::Float(FloatSlot::F64(dst)) => *dst = 0.0,
		Dest::Bool(dst) => *dst = false,
		Dest::Str(dst) => dst.clear(),
		Dest::Bytes(dst) => dst.clear(),
		Dest::Optional(nullable) => nullable.clear(),
		Dest::Record(_) | Dest::Custom(_) => {}
	}
}

/// Boolean spellings accepted from text.
fn parse_bool(text: &str) -> Option<bool> {
	match text {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
		_ => None,
	}
}

fn unconvertible(from: &'static str, to: &'static str) -> CoerceError {
	CoerceError::Unconvertible { from, to }
}

fn malformed(text: &str, to: &'static str) -> CoerceError {
	CoerceError::Malformed { text: text.to_owned(), to }
}

fn out_of_range(value: impl Display, to: &'static str) -> CoerceError {
	CoerceError::OutOfRange {
		value: value.to_string(),
		to,
	}
}

/// Store `n` if it fits `T`; otherwise zero the destination.
fn store_checked<T>(dst: &mut T, n: i64, to: &'static str) -> Result<(), CoerceError>
where
	T: TryFrom<i64> + Default,
{
	match T::try_from(n) {
		Ok(value) => {
			*dst = value;
			Ok(())
		}
		Err(_) => {
			*dst = T::default();
			Err(out_of_range(n, to))
		}
	}
}

/// Parse base-10 text at the width of `T`; overflow is a range error, anything else malformed.
fn parse_int<T>(dst: &mut T, text: &str, to: &'static str) -> Result<(), CoerceError>
where
	T: FromStr<Err = ParseIntError> + Default,
{
	match text.parse::<T>() {
		Ok(value) => {
			*dst = value;
			Ok(())
		}
		Err(err) => {
			*dst = T::default();
			match err.kind() {
				IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(out_of_range(text, to)),
				_ => Err(malformed(text, to)),
			}
		}
	}
}

macro_rules! dispatch {
	($slot:expr, $enum:ident { $($variant:ident),+ }, |$dst:ident| $body:expr) => {
		match $slot {
			$($enum::$variant($dst) => $body,)+
		}
	};
}

impl IntSlot<'_> {
	fn store(self, n: i64, to: &'static str) -> Result<(), CoerceError> {
		dispatch!(self, IntSlot { I8, I16, I32, I64, Isize }, |dst| store_checked(dst, n, to))
	}

	fn parse(self, text: &str, to: &'static str) -> Result<(), CoerceError> {
		dispatch!(self, IntSlot { I8, I16, I32, I64, Isize }, |dst| parse_int(dst, text, to))
	}

	fn zero(self) {
		dispatch!(self, IntSlot { I8, I16, I32, I64, Isize }, |dst| *dst = 0)
	}
}

impl UintSlot<'_> {
	fn store(self, n: i64, to: &'static str) -> Result<(), CoerceError> {
		dispatch!(self, UintSlot { U8, U16, U32, U64, Usize }, |dst| store_checked(dst, n, to))
	}

	fn parse(self, text: &str, to: &'static str) -> Result<(), CoerceError> {
		dispatch!(self, UintSlot { U8, U16, U32, U64, Usize }, |dst| parse_int(dst, text, to))
	}

	fn zero(self) {
		dispatch!(self, UintSlot { U8, U16, U32, U64, Usize }, |dst| *dst = 0)
	}
}

impl FloatSlot<'_> {
	/// Integers must survive the round trip through the float width.
	fn store(self, n: i64, to: &'static str) -> Result<(), CoerceError> {
		let exact = match self {
			FloatSlot::F32(dst) => {
				let value = n as f32;
				let exact = value as i128 == i128::from(n);
				*dst = if exact { value } else { 0.0 };
				exact
			}
			FloatSlot::F64(dst) => {
				let value = n as f64;
				let exact = value as i128 == i128::from(n);
				*dst = if exact { value } else { 0.0 };
				exact
			}
		};
		if exact { Ok(()) } else { Err(out_of_range(n, to)) }
	}

	fn parse(self, text: &str, to: &'static str) -> Result<(), CoerceError> {
		match self {
			FloatSlot::F32(dst) => parse_float(dst, text, to),
			FloatSlot::F64(dst) => parse_float(dst, text, to),
		}
	}
}

trait FloatBits: FromStr + Default + Copy {
	fn is_infinite(self) -> bool;
}

impl FloatBits for f32 {
	fn is_infinite(self) -> bool {
		f32::is_infinite(self)
	}
}

impl FloatBits for f64 {
	fn is_infinite(self) -> bool {
		f64::is_infinite(self)
	}
}

fn parse_float<T: FloatBits>(dst: &mut T, text: &str, to: &'static str) -> Result<(), CoerceError> {
	match text.parse::<T>() {
		// `str::parse` saturates overflow to infinity instead of failing.
		Ok(value) if value.is_infinite() && !text.to_ascii_lowercase().contains("inf") => {
			*dst = T::default();
			Err(out_of_range(text, to))
		}
		Ok(value) => {
			*dst = value;
			Ok(())
		}
		Err(_) => {
			*dst = T::default();
			Err(malformed(text, to))
		}
	}
}

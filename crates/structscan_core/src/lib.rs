//! Decode dynamically-shaped key-value data into statically declared, tagged structs.
//!
//! Destination types derive [`Scan`], which emits a static [`Shape`] table. The
//! [`Registry`] compiles each shape once into a name-indexed [`TypeSpec`] that
//! honors embedding promotion and shadowing, and [`decode`] drives the coercion
//! engine over every key of a source [`Map`].

extern crate self as structscan;

mod coerce;
mod config;
mod decode;
mod error;
mod json;
mod registry;
mod shape;
mod slot;
mod spec;
mod tag;
mod value;

/// Value-coercion engine entry point.
pub use coerce::coerce;
/// Runtime configuration.
pub use config::{Config, NestedLookup};
/// Error, error-kind, and result aliases.
pub use error::{BoxError, CoerceError, ErrorKind, Result, ScanError};
/// Descriptor cache, default instance, and the top-level decode entry point.
pub use registry::{Registry, decode, global};
/// Static shape descriptors and destination access traits.
pub use shape::{Decode, Dest, Embed, Field, FloatSlot, IntSlot, Member, Nullable, Record, Scan, Shape, Slot, UintSlot};
/// Compiled field-resolution tables.
pub use spec::{FieldSpec, TypeSpec};
/// Derive macro generating [`Shape`] tables and access impls.
pub use structscan_derive::Scan;
/// Dynamic input value model.
pub use value::{Map, Value};

/// Implement [`Slot`] for types whose decoding is fully delegated to their [`Decode`] impl.
///
/// ```
/// use structscan::{BoxError, Decode, Value};
///
/// #[derive(Default)]
/// struct Upper(String);
///
/// impl Decode for Upper {
/// 	fn decode(&mut self, value: &Value, _options: &str) -> Result<(), BoxError> {
/// 		match value {
/// 			Value::Text(text) => {
/// 				self.0 = text.to_uppercase();
/// 				Ok(())
/// 			}
/// 			other => Err(format!("expected text, got {}", other.kind_name()).into()),
/// 		}
/// 	}
/// }
///
/// structscan::custom_slot!(Upper);
/// ```
#[macro_export]
macro_rules! custom_slot {
	($($ty:ty),+ $(,)?) => {
		$(
			impl $crate::Slot for $ty {
				fn dest(&mut self) -> $crate::Dest<'_> {
					$crate::Dest::Custom(self)
				}
			}
		)+
	};
}

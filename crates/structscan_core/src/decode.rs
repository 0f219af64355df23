use std::borrow::Cow;

use crate::coerce::coerce;
use crate::config::NestedLookup;
use crate::error::CoerceError;
use crate::registry::Registry;
use crate::shape::{Dest, Member, Record, Shape, Slot};
use crate::spec::TypeSpec;
use crate::value::{Map, Value};
use crate::{Result, ScanError};

/// Field a source key resolved to.
struct Target<'s> {
	name: &'static str,
	path: Cow<'s, [usize]>,
	options: &'static str,
}

pub(crate) fn decode_root(registry: &Registry, source: &Map, dest: &mut dyn Slot) -> Result<()> {
	let type_name = dest.type_name();
	match dest.dest() {
		Dest::Record(record) => decode_record(registry, source, record),
		Dest::Optional(nullable) => decode_root(registry, source, nullable.fill()),
		_ => Err(ScanError::InvalidDestination { type_name }),
	}
}

fn decode_record(registry: &Registry, source: &Map, record: &mut dyn Record) -> Result<()> {
	let shape = record.shape();
	let spec = registry.spec_for(shape)?;

	for (key, value) in source {
		let Some(target) = resolve_key(registry, &spec, shape, key, value) else {
			tracing::trace!(type_name = shape.type_name, key = key.as_str(), "skipping unmatched key");
			continue;
		};
		let slot = member_slot(record, &target.path).ok_or_else(|| ScanError::ShapeMismatch {
			type_name: shape.type_name,
			path: target.path.to_vec(),
		})?;

		match value {
			Value::Map(inner) => decode_nested(registry, slot, value, inner, target.name, target.options)?,
			_ => coerce(slot, value, target.options).map_err(|source| ScanError::field_error(target.name, source))?,
		}
	}

	Ok(())
}

/// Mapping values recurse into record fields, allocating optional records on the way.
fn decode_nested(registry: &Registry, slot: &mut dyn Slot, value: &Value, source: &Map, name: &str, options: &str) -> Result<()> {
	let to = slot.type_name();
	match slot.dest() {
		Dest::Custom(custom) => custom
			.decode(value, options)
			.map_err(|err| ScanError::field_error(name, CoerceError::Custom(err))),
		Dest::Record(record) => decode_record(registry, source, record).map_err(|err| err.nested_in(name)),
		Dest::Optional(nullable) => {
			let pointee = nullable.fill();
			// Records keep partial writes and custom decoders own their state.
			let clears = !matches!(pointee.dest(), Dest::Record(_) | Dest::Custom(_));
			let result = decode_nested(registry, pointee, value, source, name, options);
			if result.is_err() && clears {
				nullable.clear();
			}
			result
		}
		_ => Err(ScanError::field_error(
			name,
			CoerceError::Unconvertible {
				from: value.kind_name(),
				to,
			},
		)),
	}
}

fn resolve_key<'s>(registry: &Registry, spec: &'s TypeSpec, shape: &'static Shape, key: &str, value: &Value) -> Option<Target<'s>> {
	if value.as_map().is_some() && registry.config().nested_lookup == NestedLookup::ImmediateTag {
		let (idx, field) = shape
			.fields
			.iter()
			.enumerate()
			.find(|(_, field)| !field.is_embedded() && field.tag == Some(key))?;
		return Some(Target {
			name: field.tag.unwrap_or(field.name),
			path: Cow::Owned(vec![idx]),
			options: field.options,
		});
	}

	spec.field(key).map(|field| Target {
		name: field.name,
		path: Cow::Borrowed(field.path.as_slice()),
		options: field.options,
	})
}

/// Walk embedded members down to the slot at the end of `path`.
fn member_slot<'a>(mut record: &'a mut dyn Record, path: &[usize]) -> Option<&'a mut dyn Slot> {
	let (last, parents) = path.split_last()?;
	for idx in parents {
		record = match record.member_mut(*idx)? {
			Member::Embedded(inner) => inner,
			Member::Slot(_) => return None,
		};
	}

	match record.member_mut(*last)? {
		Member::Slot(slot) => Some(slot),
		Member::Embedded(_) => None,
	}
}

use std::any::TypeId;

use crate::error::BoxError;
use crate::value::Value;

/// Static descriptor of a destination struct, emitted by `#[derive(Scan)]`.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
	/// Declared type name.
	pub type_name: &'static str,
	/// Type identity used as the descriptor cache key.
	pub type_id: fn() -> TypeId,
	/// Members in declaration order.
	pub fields: &'static [Field],
}

impl Shape {
	/// Identity of the described type.
	pub fn id(&self) -> TypeId {
		(self.type_id)()
	}

	/// Look up a member by declared name.
	pub fn field(&self, name: &str) -> Option<(usize, &'static Field)> {
		self.fields.iter().enumerate().find(|(_, field)| field.name == name)
	}
}

/// One declared member of a [`Shape`].
#[derive(Debug, Clone, Copy)]
pub struct Field {
	/// Declared member name.
	pub name: &'static str,
	/// Raw scan tag (`name[,option]*` or `-`).
	pub tag: Option<&'static str>,
	/// Auxiliary option text handed verbatim to custom decoders.
	pub options: &'static str,
	/// Shape of an embedded member whose fields are promoted into this namespace.
	///
	/// The indirection allows self-referential shapes.
	pub embedded: Option<fn() -> &'static Shape>,
}

impl Field {
	/// Plain member with no tag.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			tag: None,
			options: "",
			embedded: None,
		}
	}

	/// Attach a raw scan tag.
	pub const fn tag(mut self, tag: &'static str) -> Self {
		self.tag = Some(tag);
		self
	}

	/// Attach auxiliary option text.
	pub const fn options(mut self, options: &'static str) -> Self {
		self.options = options;
		self
	}

	/// Mark as embedded with the given member shape.
	pub const fn embedded(mut self, shape: fn() -> &'static Shape) -> Self {
		self.embedded = Some(shape);
		self
	}

	/// Whether this member splices another shape into the enclosing namespace.
	pub fn is_embedded(&self) -> bool {
		self.embedded.is_some()
	}
}

/// Mutable access to a record member.
pub enum Member<'a> {
	/// Ordinary field.
	Slot(&'a mut dyn Slot),
	/// Embedded record, allocated on access when nullable.
	Embedded(&'a mut dyn Record),
}

/// Struct-like destination whose members are addressed by declaration index.
pub trait Record {
	/// Static shape of the concrete type.
	fn shape(&self) -> &'static Shape;

	/// Access the member at `index` in [`Shape::fields`] order.
	fn member_mut(&mut self, index: usize) -> Option<Member<'_>>;
}

/// Record types with a statically known shape.
pub trait Scan: Record + 'static {
	/// Shape table for this type.
	const SHAPE: &'static Shape;
}

/// Types usable as embedded members.
pub trait Embed {
	/// Shape spliced into the enclosing namespace.
	fn embedded_shape() -> &'static Shape;

	/// Record to write promoted fields into.
	fn record_mut(&mut self) -> &mut dyn Record;
}

impl<T: Embed> Embed for Box<T> {
	fn embedded_shape() -> &'static Shape {
		T::embedded_shape()
	}

	fn record_mut(&mut self) -> &mut dyn Record {
		(**self).record_mut()
	}
}

impl<T: Embed + Default> Embed for Option<T> {
	fn embedded_shape() -> &'static Shape {
		T::embedded_shape()
	}

	fn record_mut(&mut self) -> &mut dyn Record {
		self.get_or_insert_with(T::default).record_mut()
	}
}

/// Custom-decode capability.
///
/// A field whose [`Slot::dest`] yields [`Dest::Custom`] bypasses every structural
/// coercion rule and receives the raw source value plus the field's option text.
pub trait Decode {
	/// Decode `value` into `self`.
	fn decode(&mut self, value: &Value, options: &str) -> Result<(), BoxError>;
}

/// Nullable destination such as `Option<T>`.
pub trait Nullable {
	/// Whether the destination is currently empty.
	fn is_null(&self) -> bool;

	/// Reset to the empty representation.
	fn clear(&mut self);

	/// Allocate the pointee if empty and return it.
	fn fill(&mut self) -> &mut dyn Slot;
}

/// Signed integer destination.
pub enum IntSlot<'a> {
	/// `i8` field.
	I8(&'a mut i8),
	/// `i16` field.
	I16(&'a mut i16),
	/// `i32` field.
	I32(&'a mut i32),
	/// `i64` field.
	I64(&'a mut i64),
	/// `isize` field.
	Isize(&'a mut isize),
}

/// Unsigned integer destination.
pub enum UintSlot<'a> {
	/// `u8` field.
	U8(&'a mut u8),
	/// `u16` field.
	U16(&'a mut u16),
	/// `u32` field.
	U32(&'a mut u32),
	/// `u64` field.
	U64(&'a mut u64),
	/// `usize` field.
	Usize(&'a mut usize),
}

/// Floating point destination.
pub enum FloatSlot<'a> {
	/// `f32` field.
	F32(&'a mut f32),
	/// `f64` field.
	F64(&'a mut f64),
}

/// Typed view of one destination field.
pub enum Dest<'a> {
	/// Signed integer.
	Int(IntSlot<'a>),
	/// Unsigned integer.
	Uint(UintSlot<'a>),
	/// Floating point.
	Float(FloatSlot<'a>),
	/// Boolean.
	Bool(&'a mut bool),
	/// Owned text.
	Str(&'a mut String),
	/// Raw byte sequence.
	Bytes(&'a mut Vec<u8>),
	/// Nullable wrapper around another slot.
	Optional(&'a mut dyn Nullable),
	/// Nested record, reachable by mapping values.
	Record(&'a mut dyn Record),
	/// Type with its own decode logic.
	Custom(&'a mut dyn Decode),
}

/// A destination field the coercion engine can write.
pub trait Slot {
	/// Typed view used for dispatch.
	fn dest(&mut self) -> Dest<'_>;

	/// Rust type name used in conversion errors.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

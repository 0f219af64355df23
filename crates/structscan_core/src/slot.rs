use crate::shape::{Dest, FloatSlot, IntSlot, Nullable, Slot, UintSlot};

macro_rules! scalar_slot {
	($($ty:ty => $dest:ident($slot:ident :: $variant:ident)),+ $(,)?) => {
		$(
			impl Slot for $ty {
				fn dest(&mut self) -> Dest<'_> {
					Dest::$dest($slot::$variant(self))
				}
			}
		)+
	};
}

scalar_slot! {
	i8 => Int(IntSlot::I8),
	i16 => Int(IntSlot::I16),
	i32 => Int(IntSlot::I32),
	i64 => Int(IntSlot::I64),
	isize => Int(IntSlot::Isize),
	u8 => Uint(UintSlot::U8),
	u16 => Uint(UintSlot::U16),
	u32 => Uint(UintSlot::U32),
	u64 => Uint(UintSlot::U64),
	usize => Uint(UintSlot::Usize),
	f32 => Float(FloatSlot::F32),
	f64 => Float(FloatSlot::F64),
}

impl Slot for bool {
	fn dest(&mut self) -> Dest<'_> {
		Dest::Bool(self)
	}
}

impl Slot for String {
	fn dest(&mut self) -> Dest<'_> {
		Dest::Str(self)
	}
}

impl Slot for Vec<u8> {
	fn dest(&mut self) -> Dest<'_> {
		Dest::Bytes(self)
	}
}

impl<T: Slot + ?Sized> Slot for Box<T> {
	fn dest(&mut self) -> Dest<'_> {
		(**self).dest()
	}

	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}
}

impl<T: Slot + Default> Slot for Option<T> {
	fn dest(&mut self) -> Dest<'_> {
		Dest::Optional(self)
	}
}

impl<T: Slot + Default> Nullable for Option<T> {
	fn is_null(&self) -> bool {
		self.is_none()
	}

	fn clear(&mut self) {
		*self = None;
	}

	fn fill(&mut self) -> &mut dyn Slot {
		self.get_or_insert_with(T::default)
	}
}

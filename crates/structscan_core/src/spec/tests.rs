use std::any::TypeId;

use super::TypeSpec;
use crate::shape::{Field, Shape};
use crate::{ErrorKind, ScanError};

struct Marker;

macro_rules! shape {
	($name:literal, [$($field:expr),* $(,)?]) => {
		Shape {
			type_name: $name,
			type_id: TypeId::of::<Marker>,
			fields: &[$($field),*],
		}
	};
}

static LEFT: Shape = shape!("Left", [Field::new("X"), Field::new("Left").tag("left")]);
static RIGHT: Shape = shape!("Right", [Field::new("X"), Field::new("Right").tag("right")]);
static DEEP: Shape = shape!("Deep", [Field::new("Base").embedded(left)]);

fn left() -> &'static Shape {
	&LEFT
}

fn right() -> &'static Shape {
	&RIGHT
}

fn deep() -> &'static Shape {
	&DEEP
}

fn compile(shape: &'static Shape) -> TypeSpec {
	TypeSpec::compile(shape, 8).expect("shape compiles")
}

#[test]
fn declared_name_is_default_external_name() {
	static PLAIN: Shape = shape!("Plain", [Field::new("id"), Field::new("Name").tag("name"), Field::new("Secret").tag("-")]);
	let spec = compile(&PLAIN);

	assert_eq!(spec.len(), 2);
	assert_eq!(spec.field("id").map(|field| field.path.clone()), Some(vec![0]));
	assert_eq!(spec.field("name").map(|field| field.path.clone()), Some(vec![1]));
	assert!(spec.field("Name").is_none());
	assert!(spec.field("Secret").is_none());
}

#[test]
fn equal_depth_embedded_names_are_removed() {
	static BOTH: Shape = shape!("Both", [Field::new("L").embedded(left), Field::new("R").embedded(right)]);
	let spec = compile(&BOTH);

	assert!(spec.field("X").is_none(), "tie at equal depth must be unresolvable");
	assert!(spec.fields().iter().all(|field| field.name != "X"));
	assert_eq!(spec.field("left").map(|field| field.path.clone()), Some(vec![0, 1]));
	assert_eq!(spec.field("right").map(|field| field.path.clone()), Some(vec![1, 1]));
}

#[test]
fn shallow_field_wins_over_embedded_field() {
	static OUTER: Shape = shape!("Outer", [Field::new("L").embedded(left), Field::new("X")]);
	let spec = compile(&OUTER);

	let x = spec.field("X").expect("X resolves");
	assert_eq!(x.path, vec![1]);
	assert_eq!(x.depth(), 0);
	assert_eq!(spec.fields().iter().filter(|field| field.name == "X").count(), 1);
}

#[test]
fn shallow_field_beats_earlier_tie() {
	static OUTER: Shape = shape!("Outer", [Field::new("L").embedded(left), Field::new("R").embedded(right), Field::new("X").tag("X")]);
	let spec = compile(&OUTER);
	assert_eq!(spec.field("X").map(|field| field.path.clone()), Some(vec![2]));
}

#[test]
fn tie_at_depth_one_hides_depth_two_contribution() {
	static OUTER: Shape = shape!("Outer", [Field::new("L").embedded(left), Field::new("R").embedded(right), Field::new("D").embedded(deep)]);
	let spec = compile(&OUTER);
	assert!(spec.field("X").is_none());
	assert_eq!(spec.field("left").map(|field| field.path.clone()), Some(vec![0, 1]));
}

#[test]
fn deeper_entry_seen_first_is_replaced() {
	static OUTER: Shape = shape!("Outer", [Field::new("D").embedded(deep), Field::new("R").embedded(right)]);
	let spec = compile(&OUTER);

	assert_eq!(spec.field("X").map(|field| field.path.clone()), Some(vec![1, 0]));
	assert_eq!(spec.fields().iter().filter(|field| field.name == "X").count(), 1);
}

#[test]
fn options_and_omitempty_are_recorded() {
	static TAGGED: Shape = shape!("Tagged", [Field::new("When").tag("when,omitempty").options("%Y-%m-%d")]);
	let spec = compile(&TAGGED);

	let when = spec.field("when").expect("when resolves");
	assert!(when.omit_empty);
	assert_eq!(when.options, "%Y-%m-%d");
}

#[test]
fn unknown_tag_option_aborts_compilation() {
	static BAD: Shape = shape!("Bad", [Field::new("id").tag("id,required")]);
	let err = TypeSpec::compile(&BAD, 8).expect_err("unknown option rejected");

	assert_eq!(err.kind(), ErrorKind::SpecCompilation);
	match err {
		ScanError::UnknownTagOption { type_name, field, option } => {
			assert_eq!(type_name, "Bad");
			assert_eq!(field, "id");
			assert_eq!(option, "required");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn self_embedding_hits_depth_limit() {
	static LOOP: Shape = shape!("Loop", [Field::new("Next").embedded(looped)]);
	fn looped() -> &'static Shape {
		&LOOP
	}

	let err = TypeSpec::compile(&LOOP, 4).expect_err("recursive embedding rejected");
	assert!(matches!(err, ScanError::EmbedDepthExceeded { type_name: "Loop", max_depth: 4 }));
}

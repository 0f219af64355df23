#![allow(missing_docs)]

use structscan::{ErrorKind, Scan, Value};
use structscan_testkit::{init_tracing, source};

#[derive(Debug, Default, Scan)]
struct Num {
	#[scan("one")]
	one: i32,
	#[scan("two")]
	two: i32,
}

#[derive(Debug, Default, Scan)]
struct Area {
	#[scan("id")]
	id: String,
	#[scan("num")]
	num: Option<Box<Num>>,
}

#[derive(Debug, Default, Scan)]
struct Record {
	#[scan("area")]
	area: Option<Box<Area>>,
	#[scan("label")]
	label: Option<String>,
	#[scan("retries")]
	retries: u8,
	#[scan("ratio")]
	ratio: f64,
	#[scan("active")]
	active: bool,
	#[scan("raw")]
	raw: Vec<u8>,
	#[scan("-")]
	ignored: String,
	untagged: i32,
}

#[test]
fn nested_area_mapping_decodes() {
	init_tracing();
	let src = source([(
		"area",
		Value::map([("id", Value::from("119")), ("num", Value::map([("one", "1"), ("two", "2")]))]),
	)]);

	let mut record = Record::default();
	structscan::decode(&src, &mut record).expect("decode succeeds");

	let area = record.area.expect("area allocated");
	assert_eq!(area.id, "119");
	let num = area.num.expect("num allocated");
	assert_eq!(num.one, 1);
	assert_eq!(num.two, 2);
}

#[test]
fn scalar_fields_coerce_from_wire_values() {
	init_tracing();
	let src = source([
		("label", Value::Bytes(b"primary".to_vec())),
		("retries", Value::from("7")),
		("ratio", Value::Integer(3)),
		("active", Value::from("t")),
		("raw", Value::from("abc")),
	]);

	let mut record = Record::default();
	structscan::decode(&src, &mut record).expect("decode succeeds");

	assert_eq!(record.label.as_deref(), Some("primary"));
	assert_eq!(record.retries, 7);
	assert_eq!(record.ratio, 3.0);
	assert!(record.active);
	assert_eq!(record.raw, b"abc");
}

#[test]
fn excluded_members_are_unreachable_and_untagged_use_declared_name() {
	let src = source([
		("-", Value::from("dash")),
		("ignored", Value::from("named")),
		("untagged", Value::Integer(4)),
	]);

	let mut record = Record::default();
	structscan::decode(&src, &mut record).expect("unmatched keys are skipped");
	assert_eq!(record.ignored, "");
	assert_eq!(record.untagged, 4);
}

#[test]
fn nil_empties_nullable_fields() {
	let mut record = Record {
		label: Some("old".to_owned()),
		raw: b"old".to_vec(),
		..Record::default()
	};
	let src = source([("label", Value::Nil), ("raw", Value::Nil)]);

	structscan::decode(&src, &mut record).expect("decode succeeds");
	assert_eq!(record.label, None);
	assert!(record.raw.is_empty());
}

#[test]
fn nil_into_non_nullable_is_unconvertible() {
	let src = source([("retries", Value::Nil)]);
	let err = structscan::decode(&src, &mut Record::default()).expect_err("u8 cannot be nil");
	assert_eq!(err.kind(), ErrorKind::UnconvertibleType);
	assert_eq!(err.field(), Some("retries"));
}

#[test]
fn error_reply_fails_with_field_context() {
	let src = source([("retries", Value::error("ERR busy"))]);
	let err = structscan::decode(&src, &mut Record::default()).expect_err("error values are unconvertible");

	assert_eq!(err.kind(), ErrorKind::UnconvertibleType);
	assert_eq!(err.field(), Some("retries"));
	assert!(err.to_string().contains("retries"), "message names the field: {err}");
}

#[test]
fn nested_range_failure_reports_dotted_path() {
	let src = source([("area", Value::map([("num", Value::map([("two", Value::from("99999999999"))]))]))]);
	let err = structscan::decode(&src, &mut Record::default()).expect_err("i32 overflow");

	assert_eq!(err.kind(), ErrorKind::OutOfRange);
	assert_eq!(err.field(), Some("area.num.two"));
}

#![allow(missing_docs)]

use std::net::IpAddr;

use structscan::{ErrorKind, Scan, Value};
use structscan_testkit::{Addr, Date, Recorder, source};

#[derive(Debug, Default, Scan)]
struct Peer {
	#[scan("addr")]
	addr: Addr,
	#[scan("backup")]
	backup: Option<Addr>,
	#[scan("seen", options = "%d/%m/%Y")]
	seen: Date,
	#[scan("probe", options = "trace")]
	probe: Recorder,
	#[scan("plain")]
	plain: Recorder,
	#[scan("maybe")]
	maybe: Option<Recorder>,
}

#[test]
fn custom_decoder_receives_text_and_empty_options() {
	let src = source([("addr", "127.0.0.1"), ("plain", "127.0.0.1")]);
	let mut peer = Peer::default();
	structscan::decode(&src, &mut peer).expect("decode succeeds");
	assert_eq!(peer.addr.0, IpAddr::from([127, 0, 0, 1]));
	assert_eq!(peer.plain.calls, vec![(Value::from("127.0.0.1"), String::new())]);
}

#[test]
fn custom_decoder_accepts_bulk_bytes() {
	let src = source([("addr", Value::Bytes(b"::1".to_vec()))]);
	let mut peer = Peer::default();
	structscan::decode(&src, &mut peer).expect("decode succeeds");
	assert!(peer.addr.0.is_loopback());
}

#[test]
fn custom_failure_surfaces_as_custom_scan() {
	let src = source([("addr", "not-an-address")]);
	let err = structscan::decode(&src, &mut Peer::default()).expect_err("parse fails");
	assert_eq!(err.kind(), ErrorKind::CustomScan);
	assert_eq!(err.field(), Some("addr"));
}

#[test]
fn optional_custom_is_allocated_for_every_value() {
	let mut peer = Peer::default();
	structscan::decode(&source([("backup", "10.0.0.2")]), &mut peer).expect("decode succeeds");
	assert_eq!(peer.backup.map(|addr| addr.0), Some(IpAddr::from([10, 0, 0, 2])));

	structscan::decode(&source([("maybe", Value::Nil)]), &mut peer).expect("decode succeeds");
	let maybe = peer.maybe.as_ref().expect("nil is handed to the decoder");
	assert_eq!(maybe.calls, vec![(Value::Nil, String::new())]);
}

#[test]
fn optional_custom_failure_keeps_the_pointee() {
	let mut peer = Peer::default();
	let err = structscan::decode(&source([("backup", Value::Nil)]), &mut peer).expect_err("address rejects nil");
	assert_eq!(err.kind(), ErrorKind::CustomScan);
	assert_eq!(err.field(), Some("backup"));
	assert_eq!(peer.backup, Some(Addr::default()));
}

#[test]
fn field_options_reach_the_decoder() {
	let src = source([("seen", Value::from("05/11/2024")), ("probe", Value::Integer(9))]);
	let mut peer = Peer::default();
	structscan::decode(&src, &mut peer).expect("decode succeeds");

	assert_eq!((peer.seen.year, peer.seen.month, peer.seen.day), (2024, 11, 5));
	assert_eq!(peer.probe.calls, vec![(Value::Integer(9), "trace".to_owned())]);
}

#[test]
fn custom_decoder_takes_mappings_whole() {
	let nested = Value::map([("k", "v")]);
	let src = source([("probe", nested.clone())]);
	let mut peer = Peer::default();
	structscan::decode(&src, &mut peer).expect("decode succeeds");
	assert_eq!(peer.probe.calls, vec![(nested, "trace".to_owned())]);
}

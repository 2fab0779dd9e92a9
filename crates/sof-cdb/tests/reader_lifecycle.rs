//! Session lifecycle: open/close guarding, bulk clears and source-error
//! propagation.

mod common;

use sof_cdb::{CableDataQuantity, CdbError, CdbReader, MemorySource, Scalar, SourceError};

fn populated_source() -> MemorySource {
    let mut source = MemorySource::new();
    source.push_record(160, 0, common::cable(502, 1, 2, 3, 2.0));
    source.push_record(161, 1, common::cable_load(502, 10, 1.0, 1.0));
    source.push_record(162, 1, common::cable_result(502, -3.0, -3.1, 0.01, 1.99, 0.001, 1.0e5));
    source.push_record(20, 0, common::node(1, 0, 0.0, 0.0, 0.0));
    source.push_record(24, 1, common::node_displacement(1, 0.1, 0.0, 0.0));
    common::push_group(&mut source, 50, 160, 500, 600);
    source
}

#[test]
fn loading_before_open_is_a_precondition_violation() {
    let mut reader = CdbReader::new(populated_source());
    let error = reader.load_cable_data().expect_err("reader is not open");
    assert!(matches!(error, CdbError::NotOpen));
}

#[test]
fn loading_after_close_is_a_precondition_violation() {
    let mut reader = common::open_reader(populated_source());
    reader.load_cable_data().expect("load should succeed");
    reader.close();
    assert!(!reader.is_open());

    let error = reader
        .load_cable_loads(&[1])
        .expect_err("reader was closed");
    assert!(matches!(error, CdbError::NotOpen));
}

#[test]
fn loaded_data_survives_close() {
    let mut reader = common::open_reader(populated_source());
    reader.load_cable_data().expect("load should succeed");
    reader.close();

    assert_eq!(
        reader
            .cable_data
            .get(502, CableDataQuantity::N2)
            .expect("data stays queryable"),
        Scalar::Int(2)
    );
}

#[test]
fn open_is_idempotent_and_reopening_works() {
    let mut reader = common::open_reader(populated_source());
    reader.open().expect("second open is a no-op");
    reader.close();
    reader.open().expect("reopen should succeed");
    reader.load_cable_data().expect("load after reopen");
}

#[test]
fn bulk_clears_split_data_from_results() {
    let mut reader = common::open_reader(populated_source());
    reader.load_cable_data().expect("cable data");
    reader.load_cable_loads(&[1]).expect("cable loads");
    reader.load_cable_results(&[1]).expect("cable results");
    reader.load_node_data().expect("node data");
    reader.calculate_deflected_configuration(1).expect("deflected");

    reader.clear_results();
    assert!(reader.cable_results.is_empty());
    assert!(reader.nodes.results.is_empty());
    assert!(!reader.nodes.is_calculated(1));
    assert!(!reader.cable_data.is_empty());
    assert!(!reader.cable_load.is_empty());

    reader.clear_data();
    assert!(reader.cable_data.is_empty());
    assert!(reader.cable_load.is_empty());
    assert!(reader.nodes.data.is_empty());
}

#[test]
fn clear_drops_everything() {
    let mut reader = common::open_reader(populated_source());
    reader.load_cable_data().expect("cable data");
    reader.load_cable_results(&[1]).expect("cable results");

    reader.clear();
    assert!(reader.cable_data.is_empty());
    assert!(reader.cable_results.is_empty());
}

#[test]
fn source_errors_propagate_with_the_offending_key() {
    let mut source = populated_source();
    source.fail_key(162, 1, SourceError::new(12, "read beyond the index"));

    let mut reader = common::open_reader(source);
    let error = reader
        .load_cable_results(&[1])
        .expect_err("injected failure should surface");
    match error {
        CdbError::Source { key, subkey, source } => {
            assert_eq!((key, subkey), (162, 1));
            assert_eq!(source.code, 12);
        }
        other => panic!("unexpected error: {other}"),
    }
    // The failed load committed nothing.
    assert!(reader.cable_results.is_empty());
}

#[test]
fn echo_level_is_instance_scoped() {
    let mut reader = common::open_reader(populated_source());
    assert_eq!(reader.echo_level(), 0);
    reader.set_echo_level(2);
    assert_eq!(reader.echo_level(), 2);

    let other = CdbReader::new(MemorySource::new());
    assert_eq!(other.echo_level(), 0);
}

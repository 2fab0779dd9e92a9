//! Spring tables: definitions and results share key 170, separated by the
//! subkey.

mod common;

use sof_cdb::{MemorySource, Scalar, SpringDataQuantity, SpringResultQuantity};

fn spring_source() -> MemorySource {
    let mut source = MemorySource::new();
    source.push_record(170, 0, common::spring(30001, 10, 11, 1.0e6, 0.0, 250.0));
    source.push_record(170, 0, common::spring(30002, 12, 13, 0.0, 4.0e3, 0.0));
    source.push_record(170, 1, common::spring_result(30001, -80.0, 1.5, 0.4, -0.002, 0.0001, 0.0));
    common::push_group(&mut source, 3, 170, 30000, 30010);
    source
}

#[test]
fn definitions_and_results_load_from_the_same_key() {
    let mut reader = common::open_reader(spring_source());
    reader.load_spring_data().expect("data load");
    reader.load_spring_results(&[1]).expect("result load");

    assert_eq!(reader.spring_data.len(), 2);
    assert_eq!(reader.spring_results.len(), 1);
    assert_eq!(
        reader
            .spring_data
            .get(30001, SpringDataQuantity::Cp)
            .expect("cp"),
        Scalar::Float(1.0e6)
    );
    assert_eq!(
        reader
            .spring_results
            .get(30001, 1, SpringResultQuantity::Force)
            .expect("force"),
        -80.0
    );
    assert_eq!(
        reader
            .spring_results
            .get(30001, 1, SpringResultQuantity::Displacement)
            .expect("displacement"),
        f64::from(-0.002f32)
    );
}

#[test]
fn spring_results_carry_group_assignments() {
    let mut reader = common::open_reader(spring_source());
    reader.load_spring_results(&[1]).expect("result load");
    assert_eq!(reader.spring_results.rows()[0].group, 3);
}

#[test]
fn stiffness_predicates_reflect_the_definition() {
    let mut reader = common::open_reader(spring_source());
    reader.load_spring_data().expect("data load");

    let data = &reader.spring_data;
    assert!(data.has_axial_stiffness(30001).expect("axial 30001"));
    assert!(!data.has_lateral_stiffness(30001).expect("lateral 30001"));
    assert!(data.has_rotational_stiffness(30001).expect("rotational 30001"));

    assert!(!data.has_axial_stiffness(30002).expect("axial 30002"));
    assert!(data.has_lateral_stiffness(30002).expect("lateral 30002"));

    assert!(data.has_axial_stiffness(99999).is_err());
}

#[test]
fn result_and_data_lookups_do_not_interfere() {
    let mut reader = common::open_reader(spring_source());
    reader.load_spring_data().expect("data load");
    reader.load_spring_results(&[1]).expect("result load");

    reader.spring_results.clear(1);
    assert!(reader.spring_results.is_empty());
    // Clearing results must not disturb the definitions.
    assert_eq!(reader.spring_data.len(), 2);
}

#![allow(dead_code)]

//! Fixture builders shared by the integration suites.

use sof_cdb::records::{
    CableLoadRecord, CableRecord, CableResultRecord, GroupRecord, NodeDisplacementRecord,
    NodeRecord, SpringRecord, SpringResultRecord, TrussLoadRecord, TrussRecord, TrussResultRecord,
};
use sof_cdb::{CdbReader, GroupIndex, MemorySource};

pub fn cable(nr: u32, n1: u32, n2: u32, nrq: u32, dl: f32) -> Vec<u8> {
    CableRecord {
        nr,
        nodes: [n1, n2],
        nrq,
        dl,
    }
    .encode()
}

pub fn cable_load(nr: u32, typ: u32, pa: f32, pe: f32) -> Vec<u8> {
    CableLoadRecord { nr, typ, pa, pe }.encode()
}

pub fn cable_result(nr: u32, n: f32, n_m: f32, v: f32, l0: f32, eps0: f32, effs: f32) -> Vec<u8> {
    CableResultRecord {
        nr,
        n,
        n_m,
        v,
        l0,
        eps0,
        effs,
    }
    .encode()
}

pub fn truss(nr: u32, n1: u32, n2: u32, nrq: u32, dl: f32, gap: f32) -> Vec<u8> {
    TrussRecord {
        nr,
        nodes: [n1, n2],
        nrq,
        dl,
        gap,
    }
    .encode()
}

pub fn truss_load(nr: u32, typ: u32, pa: f32, pe: f32) -> Vec<u8> {
    TrussLoadRecord { nr, typ, pa, pe }.encode()
}

pub fn truss_result(nr: u32, n: f32, v: f32) -> Vec<u8> {
    TrussResultRecord { nr, n, v }.encode()
}

pub fn spring(nr: u32, n1: u32, n2: u32, cp: f32, cq: f32, cm: f32) -> Vec<u8> {
    SpringRecord {
        nr,
        nodes: [n1, n2],
        cp,
        cq,
        cm,
    }
    .encode()
}

pub fn spring_result(nr: u32, p: f32, pt: f32, m: f32, v: f32, vt: f32, phi: f32) -> Vec<u8> {
    SpringResultRecord {
        nr,
        p,
        pt,
        m,
        v,
        vt,
        phi,
    }
    .encode()
}

pub fn node(nr: u32, kfix: u32, x: f64, y: f64, z: f64) -> Vec<u8> {
    NodeRecord { nr, kfix, x, y, z }.encode()
}

pub fn node_displacement(nr: u32, ux: f32, uy: f32, uz: f32) -> Vec<u8> {
    NodeDisplacementRecord { nr, ux, uy, uz }.encode()
}

pub fn group(grp: u32, kind: u32, start: u32, stop: u32) -> Vec<u8> {
    GroupRecord {
        grp,
        kind,
        start,
        stop,
    }
    .encode()
}

pub fn push_group(source: &mut MemorySource, grp: u32, kind: u32, start: u32, stop: u32) {
    source.push_record(
        GroupIndex::KEY,
        GroupIndex::SUBKEY,
        group(grp, kind, start, stop),
    );
}

/// Wrap the source in an opened reader.
pub fn open_reader(source: MemorySource) -> CdbReader<MemorySource> {
    let mut reader = CdbReader::new(source);
    reader.open().expect("open should succeed");
    reader
}

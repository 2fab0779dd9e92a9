//! Fixed-size record payloads and their little-endian codecs.
//!
//! Every key of the database carries one static record shape: integers,
//! single-precision floats and, for node coordinates, doubles, in
//! declaration order with no padding. `decode` reads a fetched payload;
//! `encode` mirrors it so in-memory sources can replay captured streams.

use crate::error::{CdbError, Result};

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(table: &'static str, bytes: &'a [u8], expected: usize) -> Result<Self> {
        if bytes.len() < expected {
            return Err(CdbError::Truncated {
                table,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, pos: 0 })
    }

    fn u32(&mut self) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        u32::from_le_bytes(raw)
    }

    fn f32(&mut self) -> f32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        f32::from_le_bytes(raw)
    }

    fn f64(&mut self) -> f64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.bytes[self.pos..self.pos + 8]);
        self.pos += 8;
        f64::from_le_bytes(raw)
    }
}

#[derive(Default)]
struct Encoder {
    bytes: Vec<u8>,
}

impl Encoder {
    fn u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn f32(mut self, value: f32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn f64(mut self, value: f64) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }
}

/// Cable element definition, key 160/0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableRecord {
    pub nr: u32,
    pub nodes: [u32; 2],
    pub nrq: u32,
    pub dl: f32,
}

impl CableRecord {
    pub const LEN: usize = 20;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("cable data", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            nodes: [d.u32(), d.u32()],
            nrq: d.u32(),
            dl: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .u32(self.nodes[0])
            .u32(self.nodes[1])
            .u32(self.nrq)
            .f32(self.dl)
            .bytes
    }
}

/// Cable element load, key 161/LC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableLoadRecord {
    pub nr: u32,
    pub typ: u32,
    pub pa: f32,
    pub pe: f32,
}

impl CableLoadRecord {
    pub const LEN: usize = 16;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("cable load", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            typ: d.u32(),
            pa: d.f32(),
            pe: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .u32(self.typ)
            .f32(self.pa)
            .f32(self.pe)
            .bytes
    }
}

/// Cable element result, key 162/LC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableResultRecord {
    pub nr: u32,
    /// Axial force at the end point.
    pub n: f32,
    /// Mean axial force over the element.
    pub n_m: f32,
    /// Axial displacement.
    pub v: f32,
    /// Relaxed (stress-free) length.
    pub l0: f32,
    /// Total strain.
    pub eps0: f32,
    /// Effective axial stiffness.
    pub effs: f32,
}

impl CableResultRecord {
    pub const LEN: usize = 28;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("cable result", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            n: d.f32(),
            n_m: d.f32(),
            v: d.f32(),
            l0: d.f32(),
            eps0: d.f32(),
            effs: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .f32(self.n)
            .f32(self.n_m)
            .f32(self.v)
            .f32(self.l0)
            .f32(self.eps0)
            .f32(self.effs)
            .bytes
    }
}

/// Truss element definition, key 150/0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrussRecord {
    pub nr: u32,
    pub nodes: [u32; 2],
    pub nrq: u32,
    pub dl: f32,
    pub gap: f32,
}

impl TrussRecord {
    pub const LEN: usize = 24;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("truss data", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            nodes: [d.u32(), d.u32()],
            nrq: d.u32(),
            dl: d.f32(),
            gap: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .u32(self.nodes[0])
            .u32(self.nodes[1])
            .u32(self.nrq)
            .f32(self.dl)
            .f32(self.gap)
            .bytes
    }
}

/// Truss element load, key 151/LC. Same shape as [`CableLoadRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrussLoadRecord {
    pub nr: u32,
    pub typ: u32,
    pub pa: f32,
    pub pe: f32,
}

impl TrussLoadRecord {
    pub const LEN: usize = 16;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("truss load", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            typ: d.u32(),
            pa: d.f32(),
            pe: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .u32(self.typ)
            .f32(self.pa)
            .f32(self.pe)
            .bytes
    }
}

/// Truss element result, key 152/LC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrussResultRecord {
    pub nr: u32,
    pub n: f32,
    pub v: f32,
}

impl TrussResultRecord {
    pub const LEN: usize = 12;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("truss result", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            n: d.f32(),
            v: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default().u32(self.nr).f32(self.n).f32(self.v).bytes
    }
}

/// Spring element definition, key 170/0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringRecord {
    pub nr: u32,
    pub nodes: [u32; 2],
    /// Axial stiffness.
    pub cp: f32,
    /// Lateral stiffness.
    pub cq: f32,
    /// Rotational stiffness.
    pub cm: f32,
}

impl SpringRecord {
    pub const LEN: usize = 24;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("spring data", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            nodes: [d.u32(), d.u32()],
            cp: d.f32(),
            cq: d.f32(),
            cm: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .u32(self.nodes[0])
            .u32(self.nodes[1])
            .f32(self.cp)
            .f32(self.cq)
            .f32(self.cm)
            .bytes
    }
}

/// Spring element result, key 170/LC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringResultRecord {
    pub nr: u32,
    /// Axial force.
    pub p: f32,
    /// Transversal force.
    pub pt: f32,
    /// Moment.
    pub m: f32,
    /// Axial displacement.
    pub v: f32,
    /// Transversal displacement.
    pub vt: f32,
    /// Rotation.
    pub phi: f32,
}

impl SpringResultRecord {
    pub const LEN: usize = 28;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("spring result", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            p: d.f32(),
            pt: d.f32(),
            m: d.f32(),
            v: d.f32(),
            vt: d.f32(),
            phi: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .f32(self.p)
            .f32(self.pt)
            .f32(self.m)
            .f32(self.v)
            .f32(self.vt)
            .f32(self.phi)
            .bytes
    }
}

/// Node definition, key 20/0. Coordinates are stored as doubles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    pub nr: u32,
    /// Fixity bitmask.
    pub kfix: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl NodeRecord {
    pub const LEN: usize = 32;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("node data", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            kfix: d.u32(),
            x: d.f64(),
            y: d.f64(),
            z: d.f64(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .u32(self.kfix)
            .f64(self.x)
            .f64(self.y)
            .f64(self.z)
            .bytes
    }
}

/// Nodal displacements, key 24/LC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDisplacementRecord {
    pub nr: u32,
    pub ux: f32,
    pub uy: f32,
    pub uz: f32,
}

impl NodeDisplacementRecord {
    pub const LEN: usize = 16;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("node result", bytes, Self::LEN)?;
        Ok(Self {
            nr: d.u32(),
            ux: d.f32(),
            uy: d.f32(),
            uz: d.f32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.nr)
            .f32(self.ux)
            .f32(self.uy)
            .f32(self.uz)
            .bytes
    }
}

/// Group assignment, key 11/2. One record declares the element-id range a
/// group owns within one element kind; the kind discriminator uses the
/// vendor element-kind codes (100 beam, 150 truss, 160 cable, 170 spring).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRecord {
    pub grp: u32,
    pub kind: u32,
    pub start: u32,
    pub stop: u32,
}

impl GroupRecord {
    pub const LEN: usize = 16;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new("group data", bytes, Self::LEN)?;
        Ok(Self {
            grp: d.u32(),
            kind: d.u32(),
            start: d.u32(),
            stop: d.u32(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        Encoder::default()
            .u32(self.grp)
            .u32(self.kind)
            .u32(self.start)
            .u32(self.stop)
            .bytes
    }
}

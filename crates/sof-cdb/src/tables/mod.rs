//! Concrete table instantiations, one module per element category.
//!
//! Each module pairs a [`crate::table::TableSpec`] configuration with the
//! public accessor type and its quantity enum; the algorithmic behavior
//! lives entirely in [`crate::table::RecordTable`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod cable;
pub mod node;
pub mod spring;
pub mod truss;

pub use cable::{
    CableData, CableDataQuantity, CableDataRow, CableLoad, CableLoadRow, CableResultQuantity,
    CableResults, CableResultsRow,
};
pub use node::{
    DeflectedNode, NodeData, NodeDataQuantity, NodeDataRow, NodeResultQuantity, NodeResults,
    NodeResultsRow, Nodes,
};
pub use spring::{
    SpringData, SpringDataQuantity, SpringDataRow, SpringResultQuantity, SpringResults,
    SpringResultsRow,
};
pub use truss::{
    TrussData, TrussDataQuantity, TrussDataRow, TrussLoad, TrussLoadRow, TrussResultQuantity,
    TrussResults, TrussResultsRow,
};

/// Element load types shared by the cable and truss load tables.
///
/// The numeric code stored in a load record maps to one of these symbols
/// per category; the per-category maps differ slightly (the truss table
/// additionally knows the `T` temperature load) and are deliberately kept
/// separate. An unmapped code is a schema violation that aborts the load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LoadType {
    /// Load in gravity direction.
    Pg,
    /// Load in global X-direction.
    Pxx,
    /// Load in global Y-direction.
    Pyy,
    /// Load in global Z-direction.
    Pzz,
    /// Load in global x-direction measured in projection.
    Pxp,
    /// Load in global y-direction measured in projection.
    Pyp,
    /// Load in global z-direction measured in projection.
    Pzp,
    /// Strain in axial direction.
    Ex,
    /// Change of length.
    Wx,
    /// Temperature load.
    T,
    /// Temperature difference.
    Dt,
    /// Prestress.
    Vx,
}

impl LoadType {
    pub fn symbol(self) -> &'static str {
        match self {
            LoadType::Pg => "PG",
            LoadType::Pxx => "PXX",
            LoadType::Pyy => "PYY",
            LoadType::Pzz => "PZZ",
            LoadType::Pxp => "PXP",
            LoadType::Pyp => "PYP",
            LoadType::Pzp => "PZP",
            LoadType::Ex => "EX",
            LoadType::Wx => "WX",
            LoadType::T => "T",
            LoadType::Dt => "DT",
            LoadType::Vx => "VX",
        }
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where along the element a load value applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPoint {
    /// Start point.
    Pa,
    /// End point.
    Pe,
}

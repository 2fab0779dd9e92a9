//! Read-only access to SOFiSTiK CDB result databases.
//!
//! This crate provides:
//! - **RecordSource** contract for the keyed-cursor database binding, with
//!   an in-memory implementation for tests and stream replay
//! - **RecordTable**, the generic load/index engine every element table is
//!   an instantiation of
//! - **Element tables** for cables, trusses, springs and nodes (geometry,
//!   loads and results, partitioned by load case where applicable)
//! - **Group assignment** of elements via sorted ownership ranges
//! - **CdbReader**, the session object owning the source and the tables
//!
//! Data survives closing the database: tables keep their rows and stay
//! queryable after [`CdbReader::close`].

pub mod error;
pub mod group;
pub mod reader;
pub mod records;
pub mod source;
pub mod table;
pub mod tables;
pub mod util;

pub use error::{CdbError, Result};
pub use group::{ElementCategory, GroupIndex, GroupRange};
pub use reader::CdbReader;
pub use source::{
    FetchStatus, MAX_RECORD_LEN, MemorySource, RecordBuffer, RecordSource, SourceError,
};
pub use table::{RecordTable, Scalar, TableSpec};
pub use tables::{
    CableData, CableDataQuantity, CableDataRow, CableLoad, CableLoadRow, CableResultQuantity,
    CableResults, CableResultsRow, DeflectedNode, LoadPoint, LoadType, NodeData, NodeDataQuantity,
    NodeDataRow, NodeResultQuantity, NodeResults, NodeResultsRow, Nodes, SpringData,
    SpringDataQuantity, SpringDataRow, SpringResultQuantity, SpringResults, SpringResultsRow,
    TrussData, TrussDataQuantity, TrussDataRow, TrussLoad, TrussLoadRow, TrussResultQuantity,
    TrussResults, TrussResultsRow,
};
pub use util::{describe_status, element_kind_name, packed_str};

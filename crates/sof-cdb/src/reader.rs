//! The session object tying one record source to the table collection.

use crate::error::{CdbError, Result};
use crate::source::RecordSource;
use crate::tables::{
    CableData, CableLoad, CableResults, Nodes, SpringData, SpringResults, TrussData, TrussLoad,
    TrussResults,
};

/// Read-only access to one CDB database.
///
/// The reader owns the record source and every table reading from it. The
/// source handle is a scoped resource: acquired by [`CdbReader::open`],
/// released by [`CdbReader::close`]; any load issued while the database is
/// closed fails with [`CdbError::NotOpen`]. Loaded data stays available
/// after `close`.
///
/// Access is strictly sequential: every load takes `&mut self` and runs
/// one fetch loop to completion before returning.
#[derive(Debug)]
pub struct CdbReader<S: RecordSource> {
    source: S,
    is_open: bool,
    echo_level: u8,
    pub cable_data: CableData,
    pub cable_load: CableLoad,
    pub cable_results: CableResults,
    pub truss_data: TrussData,
    pub truss_load: TrussLoad,
    pub truss_results: TrussResults,
    pub spring_data: SpringData,
    pub spring_results: SpringResults,
    pub nodes: Nodes,
}

impl<S: RecordSource> CdbReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            is_open: false,
            echo_level: 0,
            cable_data: CableData::new(),
            cable_load: CableLoad::new(),
            cable_results: CableResults::new(),
            truss_data: TrussData::new(),
            truss_load: TrussLoad::new(),
            truss_results: TrussResults::new(),
            spring_data: SpringData::new(),
            spring_results: SpringResults::new(),
            nodes: Nodes::new(),
        }
    }

    /// Open the database in read-only mode. Must be called before any
    /// load; calling it on an open reader is a no-op.
    pub fn open(&mut self) -> Result<()> {
        if !self.is_open {
            self.source.open().map_err(CdbError::Open)?;
            self.is_open = true;
        }
        Ok(())
    }

    /// Release the database handle. Loaded tables stay queryable.
    pub fn close(&mut self) {
        self.source.close();
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn echo_level(&self) -> u8 {
        self.echo_level
    }

    /// Set the diagnostics verbosity for this reader and all its tables.
    pub fn set_echo_level(&mut self, echo_level: u8) {
        self.echo_level = echo_level;
        self.cable_data.set_echo_level(echo_level);
        self.cable_load.set_echo_level(echo_level);
        self.cable_results.set_echo_level(echo_level);
        self.truss_data.set_echo_level(echo_level);
        self.truss_load.set_echo_level(echo_level);
        self.truss_results.set_echo_level(echo_level);
        self.spring_data.set_echo_level(echo_level);
        self.spring_results.set_echo_level(echo_level);
        self.nodes.data.set_echo_level(echo_level);
        self.nodes.results.set_echo_level(echo_level);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open {
            Ok(())
        } else {
            Err(CdbError::NotOpen)
        }
    }

    /// Load all cable definitions.
    pub fn load_cable_data(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.cable_data.load_whole(&mut self.source)
    }

    /// Load cable loads for the given load cases.
    pub fn load_cable_loads(&mut self, load_cases: &[u32]) -> Result<()> {
        self.ensure_open()?;
        self.cable_load.load_cases(&mut self.source, load_cases)
    }

    /// Load cable results for the given load cases.
    pub fn load_cable_results(&mut self, load_cases: &[u32]) -> Result<()> {
        self.ensure_open()?;
        self.cable_results.load_cases(&mut self.source, load_cases)
    }

    /// Load all truss definitions.
    pub fn load_truss_data(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.truss_data.load_whole(&mut self.source)
    }

    /// Load truss loads for the given load cases.
    pub fn load_truss_loads(&mut self, load_cases: &[u32]) -> Result<()> {
        self.ensure_open()?;
        self.truss_load.load_cases(&mut self.source, load_cases)
    }

    /// Load truss results for the given load cases.
    pub fn load_truss_results(&mut self, load_cases: &[u32]) -> Result<()> {
        self.ensure_open()?;
        self.truss_results.load_cases(&mut self.source, load_cases)
    }

    /// Load all spring definitions.
    pub fn load_spring_data(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.spring_data.load_whole(&mut self.source)
    }

    /// Load spring results for the given load cases.
    pub fn load_spring_results(&mut self, load_cases: &[u32]) -> Result<()> {
        self.ensure_open()?;
        self.spring_results.load_cases(&mut self.source, load_cases)
    }

    /// Load all node definitions.
    pub fn load_node_data(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.nodes.data.load_whole(&mut self.source)
    }

    /// Load nodal displacements for the given load cases.
    pub fn load_node_results(&mut self, load_cases: &[u32]) -> Result<()> {
        self.ensure_open()?;
        self.nodes.results.load_cases(&mut self.source, load_cases)
    }

    /// Calculate the deflected configuration for `load_case`, loading
    /// node coordinates and displacements first when they are not
    /// resident yet.
    pub fn calculate_deflected_configuration(&mut self, load_case: u32) -> Result<()> {
        self.ensure_open()?;
        if self.nodes.data.is_empty() {
            self.nodes.data.load_whole(&mut self.source)?;
        }
        if !self.nodes.results.is_loaded(load_case) {
            self.nodes.results.load_cases(&mut self.source, &[load_case])?;
        }
        self.nodes.compute_deflected(load_case);
        Ok(())
    }

    /// Clear all loaded data and results.
    pub fn clear(&mut self) {
        self.clear_data();
        self.clear_results();
    }

    /// Clear all loaded definition data.
    pub fn clear_data(&mut self) {
        self.cable_data.clear_all();
        self.cable_load.clear_all();
        self.truss_data.clear_all();
        self.truss_load.clear_all();
        self.spring_data.clear_all();
        self.nodes.data.clear_all();
    }

    /// Clear all loaded results.
    pub fn clear_results(&mut self) {
        self.cable_results.clear_all();
        self.truss_results.clear_all();
        self.spring_results.clear_all();
        self.nodes.results.clear_all();
        self.nodes.clear_all();
    }
}

//! Node tables (coordinates 20/0, displacements 24/LC) and the facade
//! computing deflected configurations from the two.
//!
//! Nodes carry no group assignment; groups partition elements, not nodes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CdbError, Result};
use crate::group::ElementCategory;
use crate::records::{NodeDisplacementRecord, NodeRecord};
use crate::table::{RecordTable, Scalar, TableSpec};

/// One node definition row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDataRow {
    pub node: u32,
    /// Fixity bitmask.
    pub kfix: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeDataQuantity {
    Kfix,
    X,
    Y,
    Z,
}

pub enum NodeDataSpec {}

impl TableSpec for NodeDataSpec {
    const KEY: u16 = 20;
    const NAME: &'static str = "node data";
    const CATEGORY: Option<ElementCategory> = None;

    type Row = NodeDataRow;
    type Key = u32;
    type Quantity = NodeDataQuantity;

    fn decode(bytes: &[u8], _load_case: u32) -> Result<Option<NodeDataRow>> {
        let record = NodeRecord::decode(bytes)?;
        Ok(Some(NodeDataRow {
            node: record.nr,
            kfix: record.kfix,
            x: record.x,
            y: record.y,
            z: record.z,
        }))
    }

    fn element_id(row: &NodeDataRow) -> u32 {
        row.node
    }

    fn load_case(_row: &NodeDataRow) -> u32 {
        0
    }

    fn set_group(_row: &mut NodeDataRow, _group: u32) {}

    fn composite_key(row: &NodeDataRow) -> u32 {
        row.node
    }

    fn value(row: &NodeDataRow, quantity: NodeDataQuantity) -> Scalar {
        match quantity {
            NodeDataQuantity::Kfix => row.kfix.into(),
            NodeDataQuantity::X => row.x.into(),
            NodeDataQuantity::Y => row.y.into(),
            NodeDataQuantity::Z => row.z.into(),
        }
    }

    fn describe(key: &u32) -> String {
        format!("node id {key}")
    }
}

/// Node coordinate table.
pub type NodeData = RecordTable<NodeDataSpec>;

impl NodeData {
    /// Retrieve one quantity of the given node.
    pub fn get(&self, node: u32, quantity: NodeDataQuantity) -> Result<Scalar> {
        self.value(node, quantity)
    }

    /// As [`NodeData::get`], but returns `default` when the node is not
    /// present.
    pub fn get_or(&self, node: u32, quantity: NodeDataQuantity, default: Scalar) -> Scalar {
        self.value_or(node, quantity, default)
    }

    /// Drop all node definitions.
    pub fn clear(&mut self) {
        self.clear_all();
    }
}

/// One nodal displacement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResultsRow {
    pub load_case: u32,
    pub node: u32,
    pub ux: f64,
    pub uy: f64,
    pub uz: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeResultQuantity {
    Ux,
    Uy,
    Uz,
}

pub enum NodeResultsSpec {}

impl TableSpec for NodeResultsSpec {
    const KEY: u16 = 24;
    const NAME: &'static str = "node result";
    const CATEGORY: Option<ElementCategory> = None;

    type Row = NodeResultsRow;
    type Key = (u32, u32);
    type Quantity = NodeResultQuantity;

    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<NodeResultsRow>> {
        let record = NodeDisplacementRecord::decode(bytes)?;
        if record.nr == 0 {
            return Ok(None);
        }
        Ok(Some(NodeResultsRow {
            load_case,
            node: record.nr,
            ux: f64::from(record.ux),
            uy: f64::from(record.uy),
            uz: f64::from(record.uz),
        }))
    }

    fn element_id(row: &NodeResultsRow) -> u32 {
        row.node
    }

    fn load_case(row: &NodeResultsRow) -> u32 {
        row.load_case
    }

    fn set_group(_row: &mut NodeResultsRow, _group: u32) {}

    fn composite_key(row: &NodeResultsRow) -> (u32, u32) {
        (row.node, row.load_case)
    }

    fn value(row: &NodeResultsRow, quantity: NodeResultQuantity) -> Scalar {
        match quantity {
            NodeResultQuantity::Ux => row.ux.into(),
            NodeResultQuantity::Uy => row.uy.into(),
            NodeResultQuantity::Uz => row.uz.into(),
        }
    }

    fn describe(key: &(u32, u32)) -> String {
        format!("node id {} and load case {}", key.0, key.1)
    }
}

/// Nodal displacement table.
pub type NodeResults = RecordTable<NodeResultsSpec>;

impl NodeResults {
    /// Retrieve one displacement component of the given node and load
    /// case.
    pub fn get(&self, node: u32, load_case: u32, quantity: NodeResultQuantity) -> Result<f64> {
        self.value((node, load_case), quantity).map(Scalar::as_f64)
    }

    /// As [`NodeResults::get`], but returns `default` when the entry is
    /// not present.
    pub fn get_or(
        &self,
        node: u32,
        load_case: u32,
        quantity: NodeResultQuantity,
        default: f64,
    ) -> f64 {
        self.value_or((node, load_case), quantity, default.into())
            .as_f64()
    }

    /// Drop the rows of one load case; no-op when it is not resident.
    pub fn clear(&mut self, load_case: u32) {
        self.clear_case(load_case);
    }
}

/// Nodal coordinates in deflected configuration for one load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectedNode {
    pub load_case: u32,
    pub node: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Node data plus displacements, with a per-load-case cache of deflected
/// configurations derived from the two tables.
#[derive(Debug)]
pub struct Nodes {
    pub data: NodeData,
    pub results: NodeResults,
    deflected: Vec<DeflectedNode>,
    calculated: BTreeSet<u32>,
}

impl Nodes {
    pub(crate) fn new() -> Self {
        Self {
            data: NodeData::new(),
            results: NodeResults::new(),
            deflected: Vec::new(),
            calculated: BTreeSet::new(),
        }
    }

    pub fn is_calculated(&self, load_case: u32) -> bool {
        self.calculated.contains(&load_case)
    }

    /// Combine base coordinates with the displacements of `load_case`. A
    /// node without a displacement row contributes zero displacement.
    /// Both tables must already be loaded; recomputing an already cached
    /// load case is a no-op.
    pub(crate) fn compute_deflected(&mut self, load_case: u32) {
        if !self.calculated.insert(load_case) {
            return;
        }
        for base in self.data.rows() {
            let (ux, uy, uz) = self
                .results
                .find(&(base.node, load_case))
                .map_or((0.0, 0.0, 0.0), |row| (row.ux, row.uy, row.uz));
            self.deflected.push(DeflectedNode {
                load_case,
                node: base.node,
                x: base.x + ux,
                y: base.y + uy,
                z: base.z + uz,
            });
        }
    }

    /// Deflected coordinates of one load case, as an independent copy.
    pub fn deflected_configuration(&self, load_case: u32) -> Result<Vec<DeflectedNode>> {
        if !self.is_calculated(load_case) {
            return Err(CdbError::NotFound {
                table: "deflected configuration",
                lookup: format!("load case {load_case}"),
            });
        }
        Ok(self
            .deflected
            .iter()
            .filter(|row| row.load_case == load_case)
            .cloned()
            .collect())
    }

    /// Drop the deflected configuration of one load case; no-op when it
    /// was never calculated.
    pub fn clear(&mut self, load_case: u32) {
        if !self.calculated.remove(&load_case) {
            return;
        }
        self.deflected.retain(|row| row.load_case != load_case);
    }

    /// Drop every cached deflected configuration.
    pub fn clear_all(&mut self) {
        self.deflected.clear();
        self.calculated.clear();
    }
}

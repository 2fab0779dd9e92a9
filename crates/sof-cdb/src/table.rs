//! The generic record-table engine.
//!
//! Every element accessor of this crate is the same machine: page through a
//! key's record stream, project the fixed-size records into typed rows,
//! assign groups by range search over the sorted element ids, and keep the
//! result in a composite-keyed dataset that supports per-load-case
//! eviction and point lookup. [`TableSpec`] carries the four axes a
//! concrete table differs in (key pair, record projection, composite-key
//! arity and quantity set), so the per-category modules stay configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::error::{CdbError, Result};
use crate::group::{ElementCategory, GroupIndex};
use crate::source::{FetchStatus, RecordBuffer, RecordSource};

/// A single cell value: rows mix connectivity integers with physical
/// floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// Numeric view; integers widen losslessly for ids and counts in the
    /// supported ranges.
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(value) => value as f64,
            Scalar::Float(value) => value,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(value),
            Scalar::Float(_) => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

/// Static configuration of one concrete table.
pub trait TableSpec {
    /// Record key this table drains. The subkey is 0 for whole-model
    /// tables and the load-case number for per-load-case tables.
    const KEY: u16;
    /// Table name used in diagnostics and error messages.
    const NAME: &'static str;
    /// Category consulted for group assignment; `None` for ungrouped
    /// tables (nodes).
    const CATEGORY: Option<ElementCategory>;

    type Row: Clone + Debug;
    type Key: Ord + Clone + Debug;
    type Quantity: Copy;

    /// Project one fetched payload into a row. `Ok(None)` skips the
    /// record (result streams carry sentinel records with element id 0).
    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<Self::Row>>;

    fn element_id(row: &Self::Row) -> u32;

    /// Load-case component of the row; 0 on whole-model tables.
    fn load_case(row: &Self::Row) -> u32;

    fn set_group(row: &mut Self::Row, group: u32);

    fn composite_key(row: &Self::Row) -> Self::Key;

    fn value(row: &Self::Row, quantity: Self::Quantity) -> Scalar;

    /// Human-readable rendering of a composite key for NotFound errors.
    fn describe(key: &Self::Key) -> String;
}

/// Dataset plus composite index for one concrete table.
///
/// Rows live in merge order; the index maps each composite key to its row.
/// For per-load-case tables the set of resident load cases always equals
/// the distinct load-case values present in the rows.
pub struct RecordTable<S: TableSpec> {
    rows: Vec<S::Row>,
    index: BTreeMap<S::Key, usize>,
    loaded_cases: BTreeSet<u32>,
    echo_level: u8,
}

impl<S: TableSpec> Debug for RecordTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTable")
            .field("table", &S::NAME)
            .field("rows", &self.rows.len())
            .field("loaded_cases", &self.loaded_cases)
            .finish()
    }
}

impl<S: TableSpec> RecordTable<S> {
    pub(crate) fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: BTreeMap::new(),
            loaded_cases: BTreeSet::new(),
            echo_level: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrowed view of the dataset in merge order.
    pub fn rows(&self) -> &[S::Row] {
        &self.rows
    }

    /// Independent copy of the dataset; mutations on it never touch the
    /// live table.
    pub fn snapshot(&self) -> Vec<S::Row> {
        self.rows.clone()
    }

    /// Load cases currently resident, ascending.
    pub fn loaded_cases(&self) -> impl Iterator<Item = u32> + '_ {
        self.loaded_cases.iter().copied()
    }

    pub fn is_loaded(&self, load_case: u32) -> bool {
        self.loaded_cases.contains(&load_case)
    }

    /// Drop every row unconditionally.
    pub fn clear_all(&mut self) {
        self.rows.clear();
        self.index.clear();
        self.loaded_cases.clear();
    }

    /// Drop the rows of one load case; no-op when it is not resident.
    pub fn clear_case(&mut self, load_case: u32) {
        if !self.loaded_cases.remove(&load_case) {
            return;
        }
        self.rows.retain(|row| S::load_case(row) != load_case);
        self.rebuild_index();
    }

    pub(crate) fn set_echo_level(&mut self, echo_level: u8) {
        self.echo_level = echo_level;
    }

    pub(crate) fn find(&self, key: &S::Key) -> Option<&S::Row> {
        self.index.get(key).map(|&at| &self.rows[at])
    }

    pub(crate) fn value(&self, key: S::Key, quantity: S::Quantity) -> Result<Scalar> {
        match self.find(&key) {
            Some(row) => Ok(S::value(row, quantity)),
            None => Err(CdbError::NotFound {
                table: S::NAME,
                lookup: S::describe(&key),
            }),
        }
    }

    pub(crate) fn value_or(&self, key: S::Key, quantity: S::Quantity, default: Scalar) -> Scalar {
        self.find(&key)
            .map_or(default, |row| S::value(row, quantity))
    }

    /// Load a whole-model key (subkey 0). A missing key leaves the
    /// dataset untouched; otherwise the previous content is replaced.
    pub(crate) fn load_whole(&mut self, source: &mut dyn RecordSource) -> Result<()> {
        if !source.key_exists(S::KEY, 0) {
            if self.echo_level > 0 {
                tracing::warn!(
                    table = S::NAME,
                    key = S::KEY,
                    "key not present in the database; nothing loaded"
                );
            }
            return Ok(());
        }

        let mut staged = Vec::new();
        Self::drain(source, 0, 0, &mut staged)?;
        Self::sort_and_assign_groups(source, &mut staged)?;

        self.rows = staged;
        self.loaded_cases.clear();
        self.rebuild_index();
        Ok(())
    }

    /// Load one or more load cases of a per-load-case key. Requested
    /// cases whose subkey is missing are skipped without touching their
    /// prior state; cases that are present are re-fetched from scratch,
    /// so loading the same case twice equals loading it once.
    pub(crate) fn load_cases(&mut self, source: &mut dyn RecordSource, cases: &[u32]) -> Result<()> {
        let requested: BTreeSet<u32> = cases.iter().copied().collect();

        let mut staged = Vec::new();
        let mut fetched = BTreeSet::new();
        for &case in &requested {
            if !source.key_exists(S::KEY, case) {
                if self.echo_level > 0 {
                    tracing::warn!(
                        table = S::NAME,
                        key = S::KEY,
                        load_case = case,
                        "load case not present in the database; skipped"
                    );
                }
                continue;
            }
            Self::drain(source, case, case, &mut staged)?;
            fetched.insert(case);
        }
        if fetched.is_empty() {
            return Ok(());
        }

        Self::sort_and_assign_groups(source, &mut staged)?;

        // The staging succeeded as a whole; only now evict and merge.
        self.rows.retain(|row| !fetched.contains(&S::load_case(row)));
        self.rows.extend(staged);
        self.loaded_cases = self.rows.iter().map(|row| S::load_case(row)).collect();
        self.rebuild_index();
        Ok(())
    }

    /// Drain the fetch loop of `(KEY, subkey)` into `staged`, tagging
    /// per-load-case rows with `load_case`.
    fn drain(
        source: &mut dyn RecordSource,
        subkey: u32,
        load_case: u32,
        staged: &mut Vec<S::Row>,
    ) -> Result<()> {
        let mut buffer = RecordBuffer::new();
        let mut continuation = false;
        loop {
            let status = source
                .fetch_next(S::KEY, subkey, &mut buffer, continuation)
                .map_err(|source| CdbError::Source {
                    key: S::KEY,
                    subkey,
                    source,
                })?;
            if status == FetchStatus::End {
                break;
            }
            continuation = true;

            if let Some(row) = S::decode(buffer.as_slice(), load_case)? {
                staged.push(row);
            }
        }
        Ok(())
    }

    /// Stable-sort the staging rows by element id (ties keep fetch order,
    /// e.g. several load types of one element) and mark each ownership
    /// range via two binary searches over the sorted ids. Rows outside
    /// every range keep the sentinel group 0.
    fn sort_and_assign_groups(source: &mut dyn RecordSource, staged: &mut [S::Row]) -> Result<()> {
        staged.sort_by_key(|row| S::element_id(row));

        let Some(category) = S::CATEGORY else {
            return Ok(());
        };
        if staged.is_empty() {
            return Ok(());
        }

        let groups = GroupIndex::load(source)?;
        for range in groups.ranges_for(category) {
            if range.is_empty() {
                continue;
            }
            let lower = staged.partition_point(|row| S::element_id(row) < range.start);
            let upper = staged.partition_point(|row| S::element_id(row) < range.stop);
            for row in &mut staged[lower..upper] {
                S::set_group(row, range.group);
            }
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(at, row)| (S::composite_key(row), at))
            .collect();
    }
}

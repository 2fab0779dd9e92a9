//! Element groups: ownership ranges of element ids per element category.
//!
//! Groups partition the model into construction stages or organisational
//! units. The database stores the assignment as one record per
//! (group, category) pair carrying a half-open element-id range; ranges of
//! one category arrive sorted by start and pairwise non-overlapping. That
//! ordering is an upstream guarantee of the writing package and is not
//! re-validated here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CdbError, Result};
use crate::records::GroupRecord;
use crate::source::{FetchStatus, RecordBuffer, RecordSource};

/// Element categories that can carry a group assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementCategory {
    Beam,
    Truss,
    Cable,
    Spring,
}

impl ElementCategory {
    /// Vendor element-kind code, which doubles as the kind's base record
    /// key (150/0 holds truss definitions, 160/0 cable definitions, ...).
    pub fn kind_code(self) -> u32 {
        match self {
            ElementCategory::Beam => 100,
            ElementCategory::Truss => 150,
            ElementCategory::Cable => 160,
            ElementCategory::Spring => 170,
        }
    }

    pub fn from_kind_code(code: u32) -> Option<Self> {
        match code {
            100 => Some(ElementCategory::Beam),
            150 => Some(ElementCategory::Truss),
            160 => Some(ElementCategory::Cable),
            170 => Some(ElementCategory::Spring),
            _ => None,
        }
    }
}

/// One ownership range: element ids in `[start, stop)` belong to `group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRange {
    pub group: u32,
    pub start: u32,
    pub stop: u32,
}

impl GroupRange {
    /// An empty range signals "this group has no elements of the
    /// category" and must never contribute an assignment.
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }
}

/// The element-to-group assignment table.
///
/// Loaded fresh for every table load; draining the group key is cheap
/// relative to streaming element records and keeps the assignment in step
/// with the database.
#[derive(Debug, Default)]
pub struct GroupIndex {
    ranges: BTreeMap<ElementCategory, Vec<GroupRange>>,
}

impl GroupIndex {
    pub const KEY: u16 = 11;
    pub const SUBKEY: u32 = 2;

    /// Drain the group key and bucket the ranges by category. A missing
    /// key yields an empty index (no groups declared); records with an
    /// unknown kind discriminator belong to element kinds this crate does
    /// not read and are ignored.
    pub fn load(source: &mut dyn RecordSource) -> Result<Self> {
        let mut index = Self::default();
        if !source.key_exists(Self::KEY, Self::SUBKEY) {
            return Ok(index);
        }

        let mut buffer = RecordBuffer::new();
        let mut continuation = false;
        loop {
            let status = source
                .fetch_next(Self::KEY, Self::SUBKEY, &mut buffer, continuation)
                .map_err(|source| CdbError::Source {
                    key: Self::KEY,
                    subkey: Self::SUBKEY,
                    source,
                })?;
            if status == FetchStatus::End {
                break;
            }
            continuation = true;

            let record = GroupRecord::decode(buffer.as_slice())?;
            let Some(category) = ElementCategory::from_kind_code(record.kind) else {
                continue;
            };
            index.ranges.entry(category).or_default().push(GroupRange {
                group: record.grp,
                start: record.start,
                stop: record.stop,
            });
        }

        Ok(index)
    }

    /// Ranges of one category in stream order (upstream-sorted by start).
    pub fn ranges_for(&self, category: ElementCategory) -> &[GroupRange] {
        self.ranges.get(&category).map_or(&[], Vec::as_slice)
    }
}

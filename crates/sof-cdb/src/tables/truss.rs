//! Truss element tables: geometry (key 150/0), loads (151/LC) and
//! results (152/LC).

use serde::{Deserialize, Serialize};

use super::{LoadPoint, LoadType};
use crate::error::{CdbError, Result};
use crate::group::ElementCategory;
use crate::records::{TrussLoadRecord, TrussRecord, TrussResultRecord};
use crate::table::{RecordTable, Scalar, TableSpec};

/// Truss load-type map. Differs from the cable map in codes 60 (`T`) and
/// 61 (`DT`); the divergence mirrors the database writer and is kept
/// per-category instead of being unified.
fn load_type(code: u32, element: u32) -> Result<LoadType> {
    match code {
        10 => Ok(LoadType::Pg),
        11 => Ok(LoadType::Pxx),
        12 => Ok(LoadType::Pyy),
        13 => Ok(LoadType::Pzz),
        30 => Ok(LoadType::Ex),
        31 => Ok(LoadType::Wx),
        60 => Ok(LoadType::T),
        61 => Ok(LoadType::Dt),
        70 | 80 => Ok(LoadType::Vx),
        111 => Ok(LoadType::Pxp),
        212 => Ok(LoadType::Pyp),
        313 => Ok(LoadType::Pzp),
        _ => Err(CdbError::UnknownLoadType {
            table: "truss load",
            code,
            element,
        }),
    }
}

/// One truss definition row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussDataRow {
    pub group: u32,
    pub elem_id: u32,
    pub n1: u32,
    pub n2: u32,
    /// Initial length.
    pub l0: f64,
    pub property: u32,
    /// Slip gap before the truss picks up force.
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrussDataQuantity {
    N1,
    N2,
    L0,
    Property,
    Gap,
}

pub enum TrussDataSpec {}

impl TableSpec for TrussDataSpec {
    const KEY: u16 = 150;
    const NAME: &'static str = "truss data";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Truss);

    type Row = TrussDataRow;
    type Key = u32;
    type Quantity = TrussDataQuantity;

    fn decode(bytes: &[u8], _load_case: u32) -> Result<Option<TrussDataRow>> {
        let record = TrussRecord::decode(bytes)?;
        Ok(Some(TrussDataRow {
            group: 0,
            elem_id: record.nr,
            n1: record.nodes[0],
            n2: record.nodes[1],
            l0: f64::from(record.dl),
            property: record.nrq,
            gap: f64::from(record.gap),
        }))
    }

    fn element_id(row: &TrussDataRow) -> u32 {
        row.elem_id
    }

    fn load_case(_row: &TrussDataRow) -> u32 {
        0
    }

    fn set_group(row: &mut TrussDataRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &TrussDataRow) -> u32 {
        row.elem_id
    }

    fn value(row: &TrussDataRow, quantity: TrussDataQuantity) -> Scalar {
        match quantity {
            TrussDataQuantity::N1 => row.n1.into(),
            TrussDataQuantity::N2 => row.n2.into(),
            TrussDataQuantity::L0 => row.l0.into(),
            TrussDataQuantity::Property => row.property.into(),
            TrussDataQuantity::Gap => row.gap.into(),
        }
    }

    fn describe(key: &u32) -> String {
        format!("element id {key}")
    }
}

/// Truss geometry table.
pub type TrussData = RecordTable<TrussDataSpec>;

impl TrussData {
    /// Retrieve one quantity of the given truss.
    pub fn get(&self, element_id: u32, quantity: TrussDataQuantity) -> Result<Scalar> {
        self.value(element_id, quantity)
    }

    /// As [`TrussData::get`], but returns `default` when the truss is not
    /// present.
    pub fn get_or(&self, element_id: u32, quantity: TrussDataQuantity, default: Scalar) -> Scalar {
        self.value_or(element_id, quantity, default)
    }

    /// Drop all truss definitions.
    pub fn clear(&mut self) {
        self.clear_all();
    }
}

/// One truss load row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussLoadRow {
    pub load_case: u32,
    pub group: u32,
    pub elem_id: u32,
    pub load_type: LoadType,
    /// Load value at the start point.
    pub pa: f64,
    /// Load value at the end point.
    pub pe: f64,
}

pub enum TrussLoadSpec {}

impl TableSpec for TrussLoadSpec {
    const KEY: u16 = 151;
    const NAME: &'static str = "truss load";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Truss);

    type Row = TrussLoadRow;
    type Key = (u32, u32, LoadType);
    type Quantity = LoadPoint;

    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<TrussLoadRow>> {
        let record = TrussLoadRecord::decode(bytes)?;
        let load_type = load_type(record.typ, record.nr)?;
        Ok(Some(TrussLoadRow {
            load_case,
            group: 0,
            elem_id: record.nr,
            load_type,
            pa: f64::from(record.pa),
            pe: f64::from(record.pe),
        }))
    }

    fn element_id(row: &TrussLoadRow) -> u32 {
        row.elem_id
    }

    fn load_case(row: &TrussLoadRow) -> u32 {
        row.load_case
    }

    fn set_group(row: &mut TrussLoadRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &TrussLoadRow) -> (u32, u32, LoadType) {
        (row.elem_id, row.load_case, row.load_type)
    }

    fn value(row: &TrussLoadRow, quantity: LoadPoint) -> Scalar {
        match quantity {
            LoadPoint::Pa => row.pa.into(),
            LoadPoint::Pe => row.pe.into(),
        }
    }

    fn describe(key: &(u32, u32, LoadType)) -> String {
        format!(
            "element id {}, load case {} and load type {}",
            key.0, key.1, key.2
        )
    }
}

/// Truss load table.
pub type TrussLoad = RecordTable<TrussLoadSpec>;

impl TrussLoad {
    /// Retrieve the load value of the given truss, load case and load
    /// type at `point`.
    pub fn get(
        &self,
        element_id: u32,
        load_case: u32,
        load_type: LoadType,
        point: LoadPoint,
    ) -> Result<f64> {
        self.value((element_id, load_case, load_type), point)
            .map(Scalar::as_f64)
    }

    /// As [`TrussLoad::get`], but returns `default` when the entry is not
    /// present.
    pub fn get_or(
        &self,
        element_id: u32,
        load_case: u32,
        load_type: LoadType,
        point: LoadPoint,
        default: f64,
    ) -> f64 {
        self.value_or((element_id, load_case, load_type), point, default.into())
            .as_f64()
    }

    /// Drop the rows of one load case; no-op when it is not resident.
    pub fn clear(&mut self, load_case: u32) {
        self.clear_case(load_case);
    }
}

/// One truss result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussResultsRow {
    pub load_case: u32,
    pub group: u32,
    pub elem_id: u32,
    pub axial_force: f64,
    pub axial_displacement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrussResultQuantity {
    AxialForce,
    AxialDisplacement,
}

pub enum TrussResultsSpec {}

impl TableSpec for TrussResultsSpec {
    const KEY: u16 = 152;
    const NAME: &'static str = "truss result";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Truss);

    type Row = TrussResultsRow;
    type Key = (u32, u32);
    type Quantity = TrussResultQuantity;

    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<TrussResultsRow>> {
        let record = TrussResultRecord::decode(bytes)?;
        if record.nr == 0 {
            return Ok(None);
        }
        Ok(Some(TrussResultsRow {
            load_case,
            group: 0,
            elem_id: record.nr,
            axial_force: f64::from(record.n),
            axial_displacement: f64::from(record.v),
        }))
    }

    fn element_id(row: &TrussResultsRow) -> u32 {
        row.elem_id
    }

    fn load_case(row: &TrussResultsRow) -> u32 {
        row.load_case
    }

    fn set_group(row: &mut TrussResultsRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &TrussResultsRow) -> (u32, u32) {
        (row.elem_id, row.load_case)
    }

    fn value(row: &TrussResultsRow, quantity: TrussResultQuantity) -> Scalar {
        match quantity {
            TrussResultQuantity::AxialForce => row.axial_force.into(),
            TrussResultQuantity::AxialDisplacement => row.axial_displacement.into(),
        }
    }

    fn describe(key: &(u32, u32)) -> String {
        format!("element id {} and load case {}", key.0, key.1)
    }
}

/// Truss result table.
pub type TrussResults = RecordTable<TrussResultsSpec>;

impl TrussResults {
    /// Retrieve one result quantity of the given truss and load case.
    pub fn get(
        &self,
        element_id: u32,
        load_case: u32,
        quantity: TrussResultQuantity,
    ) -> Result<f64> {
        self.value((element_id, load_case), quantity)
            .map(Scalar::as_f64)
    }

    /// As [`TrussResults::get`], but returns `default` when the entry is
    /// not present.
    pub fn get_or(
        &self,
        element_id: u32,
        load_case: u32,
        quantity: TrussResultQuantity,
        default: f64,
    ) -> f64 {
        self.value_or((element_id, load_case), quantity, default.into())
            .as_f64()
    }

    /// Drop the rows of one load case; no-op when it is not resident.
    pub fn clear(&mut self, load_case: u32) {
        self.clear_case(load_case);
    }
}

//! Cable element tables: geometry (key 160/0), loads (161/LC) and
//! results (162/LC).

use serde::{Deserialize, Serialize};

use super::{LoadPoint, LoadType};
use crate::error::{CdbError, Result};
use crate::group::ElementCategory;
use crate::records::{CableLoadRecord, CableRecord, CableResultRecord};
use crate::table::{RecordTable, Scalar, TableSpec};

/// Cable load-type map. Codes 70 and 80 are both prestress variants and
/// collapse onto `VX`; code 60 is not part of the cable vocabulary (the
/// truss map has it).
fn load_type(code: u32, element: u32) -> Result<LoadType> {
    match code {
        10 => Ok(LoadType::Pg),
        11 => Ok(LoadType::Pxx),
        12 => Ok(LoadType::Pyy),
        13 => Ok(LoadType::Pzz),
        30 => Ok(LoadType::Ex),
        31 => Ok(LoadType::Wx),
        61 => Ok(LoadType::Dt),
        70 | 80 => Ok(LoadType::Vx),
        111 => Ok(LoadType::Pxp),
        212 => Ok(LoadType::Pyp),
        313 => Ok(LoadType::Pzp),
        _ => Err(CdbError::UnknownLoadType {
            table: "cable load",
            code,
            element,
        }),
    }
}

/// One cable definition row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableDataRow {
    pub group: u32,
    pub elem_id: u32,
    pub n1: u32,
    pub n2: u32,
    /// Initial length.
    pub l0: f64,
    pub property: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CableDataQuantity {
    N1,
    N2,
    L0,
    Property,
}

pub enum CableDataSpec {}

impl TableSpec for CableDataSpec {
    const KEY: u16 = 160;
    const NAME: &'static str = "cable data";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Cable);

    type Row = CableDataRow;
    type Key = u32;
    type Quantity = CableDataQuantity;

    fn decode(bytes: &[u8], _load_case: u32) -> Result<Option<CableDataRow>> {
        let record = CableRecord::decode(bytes)?;
        Ok(Some(CableDataRow {
            group: 0,
            elem_id: record.nr,
            n1: record.nodes[0],
            n2: record.nodes[1],
            l0: f64::from(record.dl),
            property: record.nrq,
        }))
    }

    fn element_id(row: &CableDataRow) -> u32 {
        row.elem_id
    }

    fn load_case(_row: &CableDataRow) -> u32 {
        0
    }

    fn set_group(row: &mut CableDataRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &CableDataRow) -> u32 {
        row.elem_id
    }

    fn value(row: &CableDataRow, quantity: CableDataQuantity) -> Scalar {
        match quantity {
            CableDataQuantity::N1 => row.n1.into(),
            CableDataQuantity::N2 => row.n2.into(),
            CableDataQuantity::L0 => row.l0.into(),
            CableDataQuantity::Property => row.property.into(),
        }
    }

    fn describe(key: &u32) -> String {
        format!("element id {key}")
    }
}

/// Cable geometry table.
pub type CableData = RecordTable<CableDataSpec>;

impl CableData {
    /// Retrieve one quantity of the given cable.
    pub fn get(&self, element_id: u32, quantity: CableDataQuantity) -> Result<Scalar> {
        self.value(element_id, quantity)
    }

    /// As [`CableData::get`], but returns `default` when the cable is not
    /// present.
    pub fn get_or(&self, element_id: u32, quantity: CableDataQuantity, default: Scalar) -> Scalar {
        self.value_or(element_id, quantity, default)
    }

    /// Drop all cable definitions.
    pub fn clear(&mut self) {
        self.clear_all();
    }
}

/// One cable load row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableLoadRow {
    pub load_case: u32,
    pub group: u32,
    pub elem_id: u32,
    pub load_type: LoadType,
    /// Load value at the start point.
    pub pa: f64,
    /// Load value at the end point.
    pub pe: f64,
}

pub enum CableLoadSpec {}

impl TableSpec for CableLoadSpec {
    const KEY: u16 = 161;
    const NAME: &'static str = "cable load";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Cable);

    type Row = CableLoadRow;
    type Key = (u32, u32, LoadType);
    type Quantity = LoadPoint;

    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<CableLoadRow>> {
        let record = CableLoadRecord::decode(bytes)?;
        let load_type = load_type(record.typ, record.nr)?;
        Ok(Some(CableLoadRow {
            load_case,
            group: 0,
            elem_id: record.nr,
            load_type,
            pa: f64::from(record.pa),
            pe: f64::from(record.pe),
        }))
    }

    fn element_id(row: &CableLoadRow) -> u32 {
        row.elem_id
    }

    fn load_case(row: &CableLoadRow) -> u32 {
        row.load_case
    }

    fn set_group(row: &mut CableLoadRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &CableLoadRow) -> (u32, u32, LoadType) {
        (row.elem_id, row.load_case, row.load_type)
    }

    fn value(row: &CableLoadRow, quantity: LoadPoint) -> Scalar {
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

/// Cable load table.
pub type CableLoad = RecordTable<CableLoadSpec>;

impl CableLoad {
    /// Retrieve the load value of the given cable, load case and load
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

    /// As [`CableLoad::get`], but returns `default` when the entry is not
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

/// One cable result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableResultsRow {
    pub load_case: u32,
    pub group: u32,
    pub elem_id: u32,
    pub axial_force: f64,
    pub avg_axial_force: f64,
    pub axial_displacement: f64,
    pub relaxed_length: f64,
    pub total_strain: f64,
    pub effective_stiffness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CableResultQuantity {
    AxialForce,
    AvgAxialForce,
    AxialDisplacement,
    RelaxedLength,
    TotalStrain,
    EffectiveStiffness,
}

pub enum CableResultsSpec {}

impl TableSpec for CableResultsSpec {
    const KEY: u16 = 162;
    const NAME: &'static str = "cable result";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Cable);

    type Row = CableResultsRow;
    type Key = (u32, u32);
    type Quantity = CableResultQuantity;

    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<CableResultsRow>> {
        let record = CableResultRecord::decode(bytes)?;
        // Result streams carry sentinel records with element number 0.
        if record.nr == 0 {
            return Ok(None);
        }
        Ok(Some(CableResultsRow {
            load_case,
            group: 0,
            elem_id: record.nr,
            axial_force: f64::from(record.n),
            avg_axial_force: f64::from(record.n_m),
            axial_displacement: f64::from(record.v),
            relaxed_length: f64::from(record.l0),
            total_strain: f64::from(record.eps0),
            effective_stiffness: f64::from(record.effs),
        }))
    }

    fn element_id(row: &CableResultsRow) -> u32 {
        row.elem_id
    }

    fn load_case(row: &CableResultsRow) -> u32 {
        row.load_case
    }

    fn set_group(row: &mut CableResultsRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &CableResultsRow) -> (u32, u32) {
        (row.elem_id, row.load_case)
    }

    fn value(row: &CableResultsRow, quantity: CableResultQuantity) -> Scalar {
        match quantity {
            CableResultQuantity::AxialForce => row.axial_force.into(),
            CableResultQuantity::AvgAxialForce => row.avg_axial_force.into(),
            CableResultQuantity::AxialDisplacement => row.axial_displacement.into(),
            CableResultQuantity::RelaxedLength => row.relaxed_length.into(),
            CableResultQuantity::TotalStrain => row.total_strain.into(),
            CableResultQuantity::EffectiveStiffness => row.effective_stiffness.into(),
        }
    }

    fn describe(key: &(u32, u32)) -> String {
        format!("element id {} and load case {}", key.0, key.1)
    }
}

/// Cable result table.
pub type CableResults = RecordTable<CableResultsSpec>;

impl CableResults {
    /// Retrieve one result quantity of the given cable and load case.
    pub fn get(
        &self,
        element_id: u32,
        load_case: u32,
        quantity: CableResultQuantity,
    ) -> Result<f64> {
        self.value((element_id, load_case), quantity)
            .map(Scalar::as_f64)
    }

    /// As [`CableResults::get`], but returns `default` when the entry is
    /// not present.
    pub fn get_or(
        &self,
        element_id: u32,
        load_case: u32,
        quantity: CableResultQuantity,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cable_map_covers_the_closed_vocabulary() {
        let pairs = [
            (10, LoadType::Pg),
            (11, LoadType::Pxx),
            (12, LoadType::Pyy),
            (13, LoadType::Pzz),
            (30, LoadType::Ex),
            (31, LoadType::Wx),
            (61, LoadType::Dt),
            (70, LoadType::Vx),
            (80, LoadType::Vx),
            (111, LoadType::Pxp),
            (212, LoadType::Pyp),
            (313, LoadType::Pzp),
        ];
        for (code, expected) in pairs {
            assert_eq!(
                load_type(code, 1).expect("code should be mapped"),
                expected
            );
        }
    }

    #[test]
    fn unknown_cable_code_is_fatal() {
        // 60 is a truss-only code; the cable map must reject it.
        let error = load_type(60, 5001).expect_err("code 60 should be unmapped");
        assert!(matches!(
            error,
            CdbError::UnknownLoadType {
                table: "cable load",
                code: 60,
                element: 5001,
            }
        ));
    }
}

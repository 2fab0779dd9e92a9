//! Spring element tables. Definitions and results share key 170; the
//! subkey separates them (0 for definitions, the load case for results).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::group::ElementCategory;
use crate::records::{SpringRecord, SpringResultRecord};
use crate::table::{RecordTable, Scalar, TableSpec};

/// One spring definition row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringDataRow {
    pub group: u32,
    pub elem_id: u32,
    pub n1: u32,
    pub n2: u32,
    /// Axial stiffness.
    pub cp: f64,
    /// Lateral stiffness.
    pub ct: f64,
    /// Rotational stiffness.
    pub cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringDataQuantity {
    N1,
    N2,
    Cp,
    Ct,
    Cm,
}

pub enum SpringDataSpec {}

impl TableSpec for SpringDataSpec {
    const KEY: u16 = 170;
    const NAME: &'static str = "spring data";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Spring);

    type Row = SpringDataRow;
    type Key = u32;
    type Quantity = SpringDataQuantity;

    fn decode(bytes: &[u8], _load_case: u32) -> Result<Option<SpringDataRow>> {
        let record = SpringRecord::decode(bytes)?;
        Ok(Some(SpringDataRow {
            group: 0,
            elem_id: record.nr,
            n1: record.nodes[0],
            n2: record.nodes[1],
            cp: f64::from(record.cp),
            ct: f64::from(record.cq),
            cm: f64::from(record.cm),
        }))
    }

    fn element_id(row: &SpringDataRow) -> u32 {
        row.elem_id
    }

    fn load_case(_row: &SpringDataRow) -> u32 {
        0
    }

    fn set_group(row: &mut SpringDataRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &SpringDataRow) -> u32 {
        row.elem_id
    }

    fn value(row: &SpringDataRow, quantity: SpringDataQuantity) -> Scalar {
        match quantity {
            SpringDataQuantity::N1 => row.n1.into(),
            SpringDataQuantity::N2 => row.n2.into(),
            SpringDataQuantity::Cp => row.cp.into(),
            SpringDataQuantity::Ct => row.ct.into(),
            SpringDataQuantity::Cm => row.cm.into(),
        }
    }

    fn describe(key: &u32) -> String {
        format!("element id {key}")
    }
}

/// Spring definition table.
pub type SpringData = RecordTable<SpringDataSpec>;

impl SpringData {
    /// Retrieve one quantity of the given spring.
    pub fn get(&self, element_id: u32, quantity: SpringDataQuantity) -> Result<Scalar> {
        self.value(element_id, quantity)
    }

    /// As [`SpringData::get`], but returns `default` when the spring is
    /// not present.
    pub fn get_or(&self, element_id: u32, quantity: SpringDataQuantity, default: Scalar) -> Scalar {
        self.value_or(element_id, quantity, default)
    }

    /// Drop all spring definitions.
    pub fn clear(&mut self) {
        self.clear_all();
    }

    /// `true` when the spring has a non-zero axial stiffness.
    pub fn has_axial_stiffness(&self, element_id: u32) -> Result<bool> {
        Ok(self.value(element_id, SpringDataQuantity::Cp)?.as_f64() != 0.0)
    }

    /// `true` when the spring has a non-zero lateral stiffness.
    pub fn has_lateral_stiffness(&self, element_id: u32) -> Result<bool> {
        Ok(self.value(element_id, SpringDataQuantity::Ct)?.as_f64() != 0.0)
    }

    /// `true` when the spring has a non-zero rotational stiffness.
    pub fn has_rotational_stiffness(&self, element_id: u32) -> Result<bool> {
        Ok(self.value(element_id, SpringDataQuantity::Cm)?.as_f64() != 0.0)
    }
}

/// One spring result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringResultsRow {
    pub load_case: u32,
    pub group: u32,
    pub elem_id: u32,
    pub force: f64,
    pub transversal_force: f64,
    pub moment: f64,
    pub displacement: f64,
    pub transversal_displacement: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringResultQuantity {
    Force,
    TransversalForce,
    Moment,
    Displacement,
    TransversalDisplacement,
    Rotation,
}

pub enum SpringResultsSpec {}

impl TableSpec for SpringResultsSpec {
    const KEY: u16 = 170;
    const NAME: &'static str = "spring result";
    const CATEGORY: Option<ElementCategory> = Some(ElementCategory::Spring);

    type Row = SpringResultsRow;
    type Key = (u32, u32);
    type Quantity = SpringResultQuantity;

    fn decode(bytes: &[u8], load_case: u32) -> Result<Option<SpringResultsRow>> {
        let record = SpringResultRecord::decode(bytes)?;
        if record.nr == 0 {
            return Ok(None);
        }
        Ok(Some(SpringResultsRow {
            load_case,
            group: 0,
            elem_id: record.nr,
            force: f64::from(record.p),
            transversal_force: f64::from(record.pt),
            moment: f64::from(record.m),
            displacement: f64::from(record.v),
            transversal_displacement: f64::from(record.vt),
            rotation: f64::from(record.phi),
        }))
    }

    fn element_id(row: &SpringResultsRow) -> u32 {
        row.elem_id
    }

    fn load_case(row: &SpringResultsRow) -> u32 {
        row.load_case
    }

    fn set_group(row: &mut SpringResultsRow, group: u32) {
        row.group = group;
    }

    fn composite_key(row: &SpringResultsRow) -> (u32, u32) {
        (row.elem_id, row.load_case)
    }

    fn value(row: &SpringResultsRow, quantity: SpringResultQuantity) -> Scalar {
        match quantity {
            SpringResultQuantity::Force => row.force.into(),
            SpringResultQuantity::TransversalForce => row.transversal_force.into(),
            SpringResultQuantity::Moment => row.moment.into(),
            SpringResultQuantity::Displacement => row.displacement.into(),
            SpringResultQuantity::TransversalDisplacement => {
                row.transversal_displacement.into()
            }
            SpringResultQuantity::Rotation => row.rotation.into(),
        }
    }

    fn describe(key: &(u32, u32)) -> String {
        format!("element id {} and load case {}", key.0, key.1)
    }
}

/// Spring result table.
pub type SpringResults = RecordTable<SpringResultsSpec>;

impl SpringResults {
    /// Retrieve one result quantity of the given spring and load case.
    pub fn get(
        &self,
        element_id: u32,
        load_case: u32,
        quantity: SpringResultQuantity,
    ) -> Result<f64> {
        self.value((element_id, load_case), quantity)
            .map(Scalar::as_f64)
    }

    /// As [`SpringResults::get`], but returns `default` when the entry is
    /// not present.
    pub fn get_or(
        &self,
        element_id: u32,
        load_case: u32,
        quantity: SpringResultQuantity,
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

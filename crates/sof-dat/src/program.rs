//! One PROG block of a dat file: the `±PROG <TYPE>` line, its body and
//! the closing `END`.

use std::fmt;
use std::str::FromStr;

use crate::error::{DatError, Result};

/// The closed set of program types the package ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgType {
    Aqb,
    Aqua,
    Ase,
    Maxima,
    Results,
    Sofiload,
    Sofimsha,
    Sofimshb,
    Sofimshc,
    Template,
    Wing,
}

impl ProgType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgType::Aqb => "AQB",
            ProgType::Aqua => "AQUA",
            ProgType::Ase => "ASE",
            ProgType::Maxima => "MAXIMA",
            ProgType::Results => "RESULTS",
            ProgType::Sofiload => "SOFILOAD",
            ProgType::Sofimsha => "SOFIMSHA",
            ProgType::Sofimshb => "SOFIMSHB",
            ProgType::Sofimshc => "SOFIMSHC",
            ProgType::Template => "TEMPLATE",
            ProgType::Wing => "WING",
        }
    }
}

impl fmt::Display for ProgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgType {
    type Err = DatError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "AQB" => Ok(ProgType::Aqb),
            "AQUA" => Ok(ProgType::Aqua),
            "ASE" => Ok(ProgType::Ase),
            "MAXIMA" => Ok(ProgType::Maxima),
            "RESULTS" => Ok(ProgType::Results),
            "SOFILOAD" => Ok(ProgType::Sofiload),
            "SOFIMSHA" => Ok(ProgType::Sofimsha),
            "SOFIMSHB" => Ok(ProgType::Sofimshb),
            "SOFIMSHC" => Ok(ProgType::Sofimshc),
            "TEMPLATE" => Ok(ProgType::Template),
            "WING" => Ok(ProgType::Wing),
            _ => Err(DatError::InvalidProgramType(raw.to_string())),
        }
    }
}

fn normalized(row: &str) -> String {
    row.trim_end().to_ascii_uppercase()
}

/// A named program block. Rows are kept uppercased and right-trimmed; the
/// active state is the leading `+`/`-` of the PROG line and is mirrored
/// into the row text by every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    content: Vec<String>,
    name: String,
    prog_type: ProgType,
    active: bool,
}

impl Program {
    /// Build a program from its raw rows (PROG line through END line).
    pub fn from_rows(rows: Vec<String>, name: &str) -> Result<Self> {
        let content: Vec<String> = rows.iter().map(|row| normalized(row)).collect();
        let first = content
            .first()
            .ok_or_else(|| DatError::MalformedProgram(String::new()))?;

        let active = match first.chars().next() {
            Some('+') => true,
            Some('-') => false,
            _ => return Err(DatError::MalformedProgram(first.clone())),
        };
        let prog_type = first
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .parse::<ProgType>()?;

        Ok(Self {
            content,
            name: name.trim().to_ascii_uppercase(),
            prog_type,
            active,
        })
    }

    /// Create a new program with an empty body.
    pub fn empty(name: &str, prog_type: ProgType, active: bool) -> Self {
        let name = name.trim().to_ascii_uppercase();
        let flag = if active { '+' } else { '-' };
        Self {
            content: vec![
                format!("{flag}PROG {prog_type}"),
                format!("\tHEAD {name}"),
                "END".to_string(),
            ],
            name,
            prog_type,
            active,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prog_type(&self) -> ProgType {
        self.prog_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn row_count(&self) -> usize {
        self.content.len()
    }

    pub fn rows(&self) -> &[String] {
        &self.content
    }

    pub fn row(&self, index: usize) -> Result<&str> {
        self.content
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| DatError::RowIndexOutOfBounds {
                index,
                program: self.name.clone(),
            })
    }

    /// Index of the first row equal to `row` (after normalization).
    pub fn row_index(&self, row: &str) -> Result<usize> {
        let needle = normalized(row);
        self.content
            .iter()
            .position(|candidate| *candidate == needle)
            .ok_or_else(|| DatError::RowNotFound {
                row: row.to_string(),
                program: self.name.clone(),
            })
    }

    /// Number of rows equal to `needle` (after normalization).
    pub fn count_rows(&self, needle: &str) -> usize {
        let needle = normalized(needle);
        self.content.iter().filter(|row| **row == needle).count()
    }

    /// Append a row at the end of the program.
    pub fn push_row(&mut self, row: &str) {
        self.content.push(normalized(row));
    }

    pub fn insert_row_before(&mut self, new_row: &str, target_row: &str) -> Result<()> {
        let at = self.row_index(target_row)?;
        self.content.insert(at, normalized(new_row));
        Ok(())
    }

    pub fn insert_row_after(&mut self, new_row: &str, target_row: &str) -> Result<()> {
        let at = self.row_index(target_row)?;
        self.content.insert(at + 1, normalized(new_row));
        Ok(())
    }

    pub fn remove_row_at(&mut self, index: usize) -> Result<()> {
        if index >= self.content.len() {
            return Err(DatError::RowIndexOutOfBounds {
                index,
                program: self.name.clone(),
            });
        }
        self.content.remove(index);
        Ok(())
    }

    pub fn remove_row(&mut self, row: &str) -> Result<()> {
        let at = self.row_index(row)?;
        self.content.remove(at);
        Ok(())
    }

    pub fn replace_row(&mut self, old_row: &str, new_row: &str) -> Result<()> {
        let at = self.row_index(old_row)?;
        self.content[at] = normalized(new_row);
        Ok(())
    }

    pub fn replace_row_at(&mut self, index: usize, new_row: &str) -> Result<()> {
        if index >= self.content.len() {
            return Err(DatError::RowIndexOutOfBounds {
                index,
                program: self.name.clone(),
            });
        }
        self.content[index] = normalized(new_row);
        Ok(())
    }

    /// Rename the program, rewriting its HEAD row.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim().to_ascii_uppercase();
        self.replace_row_at(1, &format!("HEAD {name}"))?;
        self.name = name;
        Ok(())
    }

    /// Change the program type, rewriting the PROG row.
    pub fn set_type(&mut self, prog_type: ProgType) {
        let flag = if self.active { '+' } else { '-' };
        if self.content.is_empty() {
            self.content.push(String::new());
        }
        self.content[0] = format!("{flag}PROG {prog_type}");
        self.prog_type = prog_type;
    }

    pub fn turn_on(&mut self) {
        self.active = true;
        if let Some(first) = self.content.first_mut() {
            first.replace_range(0..1, "+");
        }
    }

    pub fn turn_off(&mut self) {
        self.active = false;
        if let Some(first) = self.content.first_mut() {
            first.replace_range(0..1, "-");
        }
    }

    /// Overwrite this program with the content, type and state of
    /// `source`, keeping the name.
    pub fn copy_from(&mut self, source: &Program) -> Result<()> {
        self.content = source.content.clone();
        self.prog_type = source.prog_type;
        self.active = source.active;
        let name = self.name.clone();
        self.set_name(&name)
    }

    /// Drop the content, name and type of this program.
    pub fn clear(&mut self) {
        self.content.clear();
        self.name.clear();
    }

    pub fn serialize(&self) -> String {
        self.content.join("\n").trim_end().to_string()
    }
}

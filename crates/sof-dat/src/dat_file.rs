//! The dat-file manipulator: parse a deck into programs, chapters and
//! directives, edit them, and serialize the result back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::chapter::Chapter;
use crate::directive::{SysDirective, is_system_directive};
use crate::error::{DatError, Result};
use crate::program::{ProgType, Program};

/// Top-level content of a dat file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatItem {
    Program(Program),
    Chapter(Chapter),
    Directive(SysDirective),
}

impl DatItem {
    fn name(&self) -> &str {
        match self {
            DatItem::Program(program) => program.name(),
            DatItem::Chapter(chapter) => chapter.name(),
            DatItem::Directive(directive) => directive.content(),
        }
    }
}

/// Load an external text file, uppercased and right-trimmed per line.
pub fn load_text_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(|line| line.trim_end().to_ascii_uppercase())
        .collect())
}

/// One dat input deck.
///
/// Parsing keeps an untouched copy of the original lines for
/// [`DatFile::save_original_as`]; all structured content is uppercased
/// and right-trimmed the way the package's editor normalizes decks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatFile {
    path: PathBuf,
    echo_level: u8,
    original: Vec<String>,
    items: Vec<DatItem>,
}

impl DatFile {
    /// An empty deck to be filled programmatically.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            echo_level: 0,
            original: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Parse the deck at `path`.
    pub fn parse_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = fs::read_to_string(&path)?;
        Self::parse_str(path, &raw)
    }

    /// Parse a deck from its raw text.
    pub fn parse_str(path: impl Into<PathBuf>, raw: &str) -> Result<Self> {
        let original: Vec<String> = raw.lines().map(|line| line.trim_end().to_string()).collect();
        let items = build_structure(&original)?;
        Ok(Self {
            path: path.into(),
            echo_level: 0,
            original,
            items,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn echo_level(&self) -> u8 {
        self.echo_level
    }

    pub fn set_echo_level(&mut self, echo_level: u8) {
        self.echo_level = echo_level;
    }

    /// The deck lines as read from disk, without any modification.
    pub fn original_content(&self) -> &[String] {
        &self.original
    }

    /// Names of the top-level content in file order.
    pub fn content_names(&self) -> Vec<&str> {
        self.items.iter().map(DatItem::name).collect()
    }

    fn context(&self) -> String {
        format!("file \"{}\"", self.path.display())
    }

    pub fn has_program(&self, name: &str) -> bool {
        let name = name.trim().to_ascii_uppercase();
        self.items
            .iter()
            .any(|item| matches!(item, DatItem::Program(program) if program.name() == name))
    }

    pub fn has_chapter(&self, name: &str) -> bool {
        let name = name.trim().to_ascii_uppercase();
        self.items
            .iter()
            .any(|item| matches!(item, DatItem::Chapter(chapter) if chapter.name() == name))
    }

    pub fn has_directive(&self, name: &str) -> bool {
        let name = name.trim_end().to_ascii_uppercase();
        self.items
            .iter()
            .any(|item| matches!(item, DatItem::Directive(directive) if directive.content() == name))
    }

    /// Add a program at the end of the deck.
    pub fn add_program(&mut self, program: Program) -> Result<()> {
        if self.has_program(program.name()) {
            return Err(DatError::DuplicateProgram {
                name: program.name().to_string(),
                context: self.context(),
            });
        }
        self.items.push(DatItem::Program(program));
        Ok(())
    }

    /// Create a new empty program at the end of the deck.
    pub fn create_new_program(
        &mut self,
        name: &str,
        prog_type: ProgType,
        active: bool,
    ) -> Result<()> {
        self.add_program(Program::empty(name, prog_type, active))
    }

    /// Add a new empty chapter at the end of the deck.
    pub fn add_chapter(&mut self, name: &str) -> Result<()> {
        if self.has_chapter(name) {
            return Err(DatError::DuplicateChapter {
                name: name.trim().to_ascii_uppercase(),
                context: self.context(),
            });
        }
        self.items.push(DatItem::Chapter(Chapter::new(name)));
        Ok(())
    }

    /// Add a directive at the end of the deck.
    pub fn add_directive(&mut self, directive: SysDirective) -> Result<()> {
        if self.has_directive(directive.content()) {
            return Err(DatError::DuplicateDirective {
                name: directive.content().to_string(),
                context: self.context(),
            });
        }
        self.items.push(DatItem::Directive(directive));
        Ok(())
    }

    pub fn program(&self, name: &str) -> Result<&Program> {
        let wanted = name.trim().to_ascii_uppercase();
        self.items
            .iter()
            .find_map(|item| match item {
                DatItem::Program(program) if program.name() == wanted => Some(program),
                _ => None,
            })
            .ok_or_else(|| DatError::ProgramNotFound {
                name: wanted,
                context: self.context(),
            })
    }

    pub fn program_mut(&mut self, name: &str) -> Result<&mut Program> {
        let wanted = name.trim().to_ascii_uppercase();
        let context = self.context();
        self.items
            .iter_mut()
            .find_map(|item| match item {
                DatItem::Program(program) if program.name() == wanted => Some(program),
                _ => None,
            })
            .ok_or(DatError::ProgramNotFound {
                name: wanted,
                context,
            })
    }

    pub fn chapter(&self, name: &str) -> Result<&Chapter> {
        let wanted = name.trim().to_ascii_uppercase();
        self.items
            .iter()
            .find_map(|item| match item {
                DatItem::Chapter(chapter) if chapter.name() == wanted => Some(chapter),
                _ => None,
            })
            .ok_or_else(|| DatError::ChapterNotFound {
                name: wanted,
                context: self.context(),
            })
    }

    pub fn chapter_mut(&mut self, name: &str) -> Result<&mut Chapter> {
        let wanted = name.trim().to_ascii_uppercase();
        let context = self.context();
        self.items
            .iter_mut()
            .find_map(|item| match item {
                DatItem::Chapter(chapter) if chapter.name() == wanted => Some(chapter),
                _ => None,
            })
            .ok_or(DatError::ChapterNotFound {
                name: wanted,
                context,
            })
    }

    pub fn directive(&self, name: &str) -> Result<&SysDirective> {
        let wanted = name.trim_end().to_ascii_uppercase();
        self.items
            .iter()
            .find_map(|item| match item {
                DatItem::Directive(directive) if directive.content() == wanted => Some(directive),
                _ => None,
            })
            .ok_or_else(|| DatError::DirectiveNotFound {
                name: wanted,
                context: self.context(),
            })
    }

    pub fn directive_mut(&mut self, name: &str) -> Result<&mut SysDirective> {
        let wanted = name.trim_end().to_ascii_uppercase();
        let context = self.context();
        self.items
            .iter_mut()
            .find_map(|item| match item {
                DatItem::Directive(directive) if directive.content() == wanted => Some(directive),
                _ => None,
            })
            .ok_or(DatError::DirectiveNotFound {
                name: wanted,
                context,
            })
    }

    /// Position of a program within the top-level content.
    pub fn program_index(&self, name: &str) -> Result<usize> {
        let wanted = name.trim().to_ascii_uppercase();
        if !self.has_program(&wanted) {
            return Err(DatError::ProgramNotFound {
                name: wanted,
                context: self.context(),
            });
        }
        Ok(self
            .items
            .iter()
            .position(|item| item.name() == wanted)
            .unwrap_or_default())
    }

    /// Turn on every chapter, program and directive of the deck.
    pub fn turn_on(&mut self) {
        for item in &mut self.items {
            match item {
                DatItem::Program(program) => program.turn_on(),
                DatItem::Chapter(chapter) => chapter.turn_on(),
                DatItem::Directive(directive) => directive.turn_on(),
            }
        }
    }

    /// Turn off every chapter, program and directive of the deck.
    pub fn turn_off(&mut self) {
        for item in &mut self.items {
            match item {
                DatItem::Program(program) => program.turn_off(),
                DatItem::Chapter(chapter) => chapter.turn_off(),
                DatItem::Directive(directive) => directive.turn_off(),
            }
        }
    }

    /// Serialize the current content of the deck.
    pub fn serialize(&self) -> String {
        let mut output = String::new();
        for item in &self.items {
            match item {
                DatItem::Program(program) => {
                    output.push_str(&program.serialize());
                    output.push_str("\n\n");
                }
                DatItem::Chapter(chapter) => output.push_str(&chapter.serialize()),
                DatItem::Directive(directive) => {
                    output.push_str(directive.serialize());
                    output.push_str("\n\n");
                }
            }
        }
        output
    }

    /// Overwrite the original dat file.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.serialize())?;
        Ok(())
    }

    /// Save the current content to another file.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.serialize())?;
        Ok(())
    }

    /// Save the original, unmodified deck content to another file.
    pub fn save_original_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut output = String::new();
        for line in &self.original {
            output.push_str(line);
            output.push('\n');
        }
        fs::write(path, output)?;
        Ok(())
    }
}

/// Identify programs, chapters and directives in the uppercased deck
/// lines and build the content tree.
fn build_structure(lines: &[String]) -> Result<Vec<DatItem>> {
    let upper: Vec<String> = lines
        .iter()
        .map(|line| line.trim_end().to_ascii_uppercase())
        .collect();

    let first = upper
        .iter()
        .find(|line| !line.trim().is_empty())
        .ok_or(DatError::MissingLeadingProg)?;
    if first.trim_start().get(1..5) != Some("PROG") {
        return Err(DatError::MissingLeadingProg);
    }

    let programs = program_spans(&upper);
    let in_program =
        |at: usize| programs.iter().any(|&(start, end)| start <= at && at <= end);

    #[derive(Clone, Copy)]
    enum Event {
        Chapter(usize),
        Program(usize, usize),
        Directive(usize),
    }

    let mut events: Vec<(usize, Event)> = programs
        .iter()
        .map(|&(start, end)| (start, Event::Program(start, end)))
        .collect();
    for (at, line) in upper.iter().enumerate() {
        if in_program(at) {
            continue;
        }
        if line.trim_start().get(3..10) == Some("CHAPTER") {
            events.push((at, Event::Chapter(at)));
        } else if is_system_directive(line) {
            events.push((at, Event::Directive(at)));
        }
    }
    events.sort_by_key(|(at, _)| *at);

    let mut items: Vec<DatItem> = Vec::new();
    let mut open_chapter: Option<usize> = None;
    for (_, event) in events {
        match event {
            Event::Chapter(at) => {
                let heading = upper[at].trim_start();
                let active = heading.chars().nth(1) == Some('+');
                let name = heading
                    .split_whitespace()
                    .skip(1)
                    .collect::<Vec<_>>()
                    .join(" ");
                items.push(DatItem::Chapter(Chapter::with_state(&name, active)));
                open_chapter = Some(items.len() - 1);
            }
            Event::Program(start, end) => {
                let name = upper[start + 1].trim_start().get(5..).unwrap_or_default();
                let program = Program::from_rows(upper[start..=end].to_vec(), name)?;
                match open_chapter {
                    Some(at) => {
                        if let DatItem::Chapter(chapter) = &mut items[at] {
                            chapter.add_program(program)?;
                        }
                    }
                    None => items.push(DatItem::Program(program)),
                }
            }
            Event::Directive(at) => {
                let directive = SysDirective::from_line(&upper[at])?;
                match open_chapter {
                    Some(chapter_at) => {
                        if let DatItem::Chapter(chapter) = &mut items[chapter_at] {
                            chapter.add_directive(directive)?;
                        }
                    }
                    None => items.push(DatItem::Directive(directive)),
                }
            }
        }
    }
    Ok(items)
}

/// Start/end line pairs of the PROG blocks. A program body may contain at
/// most two END statements (a looped analysis closes its case block with
/// the first); the last END before the next PROG closes the block.
fn program_spans(lines: &[String]) -> Vec<(usize, usize)> {
    let mut bounds: Vec<usize> = Vec::new();
    let mut end_found = false;
    for (at, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.get(1..5) == Some("PROG") {
            bounds.push(at);
            end_found = false;
        }
        if trimmed.split_whitespace().next() == Some("END") {
            if end_found {
                bounds.pop();
            }
            bounds.push(at);
            end_found = true;
        }
    }
    bounds.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_spans_pair_prog_with_the_last_end() {
        let lines: Vec<String> = [
            "+PROG ASE",
            "HEAD LOOPED",
            "LC 1",
            "END",
            "END",
            "+PROG AQUA",
            "HEAD MAT",
            "END",
        ]
        .iter()
        .map(|line| line.to_string())
        .collect();

        assert_eq!(program_spans(&lines), vec![(0, 4), (5, 7)]);
    }

    #[test]
    fn first_content_must_be_a_prog_block() {
        let error = DatFile::parse_str("bad.dat", "LC 1\n+PROG ASE\nHEAD X\nEND\n")
            .expect_err("orphan data should fail");
        assert!(matches!(error, DatError::MissingLeadingProg));

        let empty = DatFile::parse_str("empty.dat", "").expect_err("empty deck should fail");
        assert!(matches!(empty, DatError::MissingLeadingProg));
    }
}

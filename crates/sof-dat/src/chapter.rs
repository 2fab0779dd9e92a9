//! Chapters: named runs of programs and directives under a
//! `!±!CHAPTER <name>` heading.

use crate::directive::SysDirective;
use crate::error::{DatError, Result};
use crate::program::{ProgType, Program};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterItem {
    Program(Program),
    Directive(SysDirective),
}

impl ChapterItem {
    fn name(&self) -> &str {
        match self {
            ChapterItem::Program(program) => program.name(),
            ChapterItem::Directive(directive) => directive.content(),
        }
    }
}

/// One chapter of a dat file, owning its programs and directives in file
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    name: String,
    active: bool,
    items: Vec<ChapterItem>,
}

impl Chapter {
    pub fn new(name: &str) -> Self {
        Self::with_state(name, true)
    }

    pub fn with_state(name: &str, active: bool) -> Self {
        Self {
            name: name.trim().to_ascii_uppercase(),
            active,
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Names of the chapter content in file order (programs and
    /// directives).
    pub fn content_names(&self) -> Vec<&str> {
        self.items.iter().map(ChapterItem::name).collect()
    }

    fn context(&self) -> String {
        format!("chapter \"{}\"", self.name)
    }

    fn position_of(&self, target: &str) -> Result<usize> {
        let target = target.trim().to_ascii_uppercase();
        self.items
            .iter()
            .position(|item| item.name() == target)
            .ok_or_else(|| DatError::TargetNotFound {
                target,
                context: self.context(),
            })
    }

    pub fn has_program(&self, name: &str) -> bool {
        let name = name.trim().to_ascii_uppercase();
        self.items
            .iter()
            .any(|item| matches!(item, ChapterItem::Program(program) if program.name() == name))
    }

    pub fn has_directive(&self, name: &str) -> bool {
        let name = name.trim_end().to_ascii_uppercase();
        self.items.iter().any(
            |item| matches!(item, ChapterItem::Directive(directive) if directive.content() == name),
        )
    }

    fn ensure_new_program(&self, name: &str) -> Result<()> {
        if self.has_program(name) {
            return Err(DatError::DuplicateProgram {
                name: name.trim().to_ascii_uppercase(),
                context: self.context(),
            });
        }
        Ok(())
    }

    /// Add a program at the end of the chapter.
    pub fn add_program(&mut self, program: Program) -> Result<()> {
        self.ensure_new_program(program.name())?;
        self.items.push(ChapterItem::Program(program));
        Ok(())
    }

    /// Add a program right before `target_name` (a program or directive
    /// name).
    pub fn add_program_before(&mut self, program: Program, target_name: &str) -> Result<()> {
        let at = self.position_of(target_name)?;
        self.ensure_new_program(program.name())?;
        self.items.insert(at, ChapterItem::Program(program));
        Ok(())
    }

    /// Add a program right after `target_name` (a program or directive
    /// name).
    pub fn add_program_after(&mut self, program: Program, target_name: &str) -> Result<()> {
        let at = self.position_of(target_name)?;
        self.ensure_new_program(program.name())?;
        self.items.insert(at + 1, ChapterItem::Program(program));
        Ok(())
    }

    /// Create a new empty program at the end of the chapter.
    pub fn create_new_program(
        &mut self,
        name: &str,
        prog_type: ProgType,
        active: bool,
    ) -> Result<()> {
        self.add_program(Program::empty(name, prog_type, active))
    }

    pub fn create_new_program_before(
        &mut self,
        target_name: &str,
        name: &str,
        prog_type: ProgType,
        active: bool,
    ) -> Result<()> {
        self.add_program_before(Program::empty(name, prog_type, active), target_name)
    }

    pub fn create_new_program_after(
        &mut self,
        target_name: &str,
        name: &str,
        prog_type: ProgType,
        active: bool,
    ) -> Result<()> {
        self.add_program_after(Program::empty(name, prog_type, active), target_name)
    }

    /// Add a directive at the end of the chapter.
    pub fn add_directive(&mut self, directive: SysDirective) -> Result<()> {
        if self.has_directive(directive.content()) {
            return Err(DatError::DuplicateDirective {
                name: directive.content().to_string(),
                context: self.context(),
            });
        }
        self.items.push(ChapterItem::Directive(directive));
        Ok(())
    }

    pub fn program(&self, name: &str) -> Result<&Program> {
        let wanted = name.trim().to_ascii_uppercase();
        self.items
            .iter()
            .find_map(|item| match item {
                ChapterItem::Program(program) if program.name() == wanted => Some(program),
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
                ChapterItem::Program(program) if program.name() == wanted => Some(program),
                _ => None,
            })
            .ok_or(DatError::ProgramNotFound {
                name: wanted,
                context,
            })
    }

    pub fn directive(&self, name: &str) -> Result<&SysDirective> {
        let wanted = name.trim_end().to_ascii_uppercase();
        self.items
            .iter()
            .find_map(|item| match item {
                ChapterItem::Directive(directive) if directive.content() == wanted => {
                    Some(directive)
                }
                _ => None,
            })
            .ok_or_else(|| DatError::DirectiveNotFound {
                name: wanted,
                context: self.context(),
            })
    }

    /// The last program of the chapter.
    pub fn last_program(&self) -> Result<&Program> {
        self.items
            .iter()
            .rev()
            .find_map(|item| match item {
                ChapterItem::Program(program) => Some(program),
                _ => None,
            })
            .ok_or_else(|| DatError::EmptyChapter(self.name.clone()))
    }

    /// Position of a program within the chapter content.
    pub fn program_index(&self, name: &str) -> Result<usize> {
        if !self.has_program(name) {
            return Err(DatError::ProgramNotFound {
                name: name.trim().to_ascii_uppercase(),
                context: self.context(),
            });
        }
        self.position_of(name)
    }

    /// Remove a program from the chapter.
    pub fn remove_program(&mut self, name: &str) -> Result<()> {
        if !self.has_program(name) {
            return Err(DatError::ProgramNotFound {
                name: name.trim().to_ascii_uppercase(),
                context: self.context(),
            });
        }
        let at = self.position_of(name)?;
        self.items.remove(at);
        Ok(())
    }

    /// Overwrite `target_program` with the content, type and state of
    /// `source_program`, keeping the target name.
    pub fn copy_program_to(&mut self, source_program: &str, target_program: &str) -> Result<()> {
        let source = self.program(source_program)?.clone();
        self.program_mut(target_program)?.copy_from(&source)
    }

    /// Turn off the chapter and everything in it.
    pub fn turn_off(&mut self) {
        self.active = false;
        for item in &mut self.items {
            match item {
                ChapterItem::Program(program) => program.turn_off(),
                ChapterItem::Directive(directive) => directive.turn_off(),
            }
        }
    }

    /// Turn on the chapter and everything in it.
    pub fn turn_on(&mut self) {
        self.active = true;
        for item in &mut self.items {
            match item {
                ChapterItem::Program(program) => program.turn_on(),
                ChapterItem::Directive(directive) => directive.turn_on(),
            }
        }
    }

    pub fn serialize(&self) -> String {
        let flag = if self.active { '+' } else { '-' };
        let mut output = format!("!{flag}!CHAPTER {}\n\n", self.name);
        for item in &self.items {
            match item {
                ChapterItem::Program(program) => {
                    output.push_str(&program.serialize());
                }
                ChapterItem::Directive(directive) => {
                    output.push_str(directive.serialize());
                }
            }
            output.push_str("\n\n");
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter_with_two_programs() -> Chapter {
        let mut chapter = Chapter::new("stages");
        chapter
            .create_new_program("STAGE 1", ProgType::Ase, true)
            .expect("first program");
        chapter
            .create_new_program("STAGE 2", ProgType::Ase, true)
            .expect("second program");
        chapter
    }

    #[test]
    fn names_are_normalized_to_uppercase() {
        let chapter = chapter_with_two_programs();
        assert_eq!(chapter.name(), "STAGES");
        assert!(chapter.has_program("stage 1"));
        assert_eq!(chapter.content_names(), ["STAGE 1", "STAGE 2"]);
    }

    #[test]
    fn duplicate_programs_are_rejected() {
        let mut chapter = chapter_with_two_programs();
        let error = chapter
            .create_new_program("stage 1", ProgType::Ase, true)
            .expect_err("duplicate should fail");
        assert!(matches!(error, DatError::DuplicateProgram { .. }));
    }

    #[test]
    fn insertion_is_relative_to_any_named_item() {
        let mut chapter = chapter_with_two_programs();
        chapter
            .add_directive(SysDirective::from_line("+SYS DEL X").expect("directive"))
            .expect("add directive");

        chapter
            .create_new_program_before("STAGE 2", "STAGE 1B", ProgType::Ase, true)
            .expect("insert before");
        chapter
            .create_new_program_after("+SYS DEL X", "CLEANUP", ProgType::Ase, false)
            .expect("insert after directive");

        assert_eq!(
            chapter.content_names(),
            ["STAGE 1", "STAGE 1B", "STAGE 2", "+SYS DEL X", "CLEANUP"]
        );
    }

    #[test]
    fn last_program_skips_trailing_directives() {
        let mut chapter = chapter_with_two_programs();
        chapter
            .add_directive(SysDirective::from_line("+SYS DEL X").expect("directive"))
            .expect("add directive");
        assert_eq!(
            chapter.last_program().expect("last program").name(),
            "STAGE 2"
        );

        let empty = Chapter::new("EMPTY");
        assert!(matches!(
            empty.last_program(),
            Err(DatError::EmptyChapter(_))
        ));
    }

    #[test]
    fn copy_program_to_overwrites_everything_but_the_name() {
        let mut chapter = chapter_with_two_programs();
        chapter
            .program_mut("STAGE 1")
            .expect("stage 1")
            .push_row("LC 10");

        chapter
            .copy_program_to("STAGE 1", "STAGE 2")
            .expect("copy should succeed");

        let target = chapter.program("STAGE 2").expect("stage 2");
        assert_eq!(target.name(), "STAGE 2");
        assert_eq!(target.count_rows("LC 10"), 1);
    }

    #[test]
    fn turn_off_cascades_and_marks_the_heading() {
        let mut chapter = chapter_with_two_programs();
        chapter.turn_off();
        assert!(!chapter.is_active());
        assert!(chapter.serialize().starts_with("!-!CHAPTER STAGES"));
        assert!(
            !chapter
                .program("STAGE 1")
                .expect("stage 1")
                .is_active()
        );
    }
}

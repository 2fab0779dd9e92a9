//! SYS directives: single shell-escape lines whose execution state is the
//! character right before the `SYS` keyword (`+` on, `-` off, `*` linked
//! to the preceding PROG line).

use crate::error::{DatError, Result};

/// Execution state of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveState {
    On,
    Off,
    Linked,
}

/// Return `true` when the line fits a SYS directive definition.
pub fn is_system_directive(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed
        .get(1..4)
        .is_some_and(|keyword| keyword.eq_ignore_ascii_case("SYS"))
}

/// One SYS directive line. The content is kept uppercased and
/// right-trimmed; state changes rewrite the flag character in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysDirective {
    content: String,
    state: DirectiveState,
}

impl SysDirective {
    /// Parse a directive from its raw line.
    pub fn from_line(line: &str) -> Result<Self> {
        let content = line.trim_end().to_ascii_uppercase();
        if content.trim_start().get(1..4) != Some("SYS") {
            return Err(DatError::MalformedDirective(line.to_string()));
        }

        let at = content
            .find("SYS")
            .filter(|&at| at > 0)
            .ok_or_else(|| DatError::MalformedDirective(line.to_string()))?;
        let state = match &content[at - 1..at] {
            "+" => DirectiveState::On,
            "-" => DirectiveState::Off,
            "*" => DirectiveState::Linked,
            _ => return Err(DatError::MalformedDirective(line.to_string())),
        };

        Ok(Self { content, state })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> DirectiveState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == DirectiveState::On
    }

    pub fn is_off(&self) -> bool {
        self.state == DirectiveState::Off
    }

    /// `true` when the execution is linked to the preceding PROG line.
    pub fn is_linked(&self) -> bool {
        self.state == DirectiveState::Linked
    }

    pub fn turn_on(&mut self) {
        self.set_state(DirectiveState::On);
    }

    pub fn turn_off(&mut self) {
        self.set_state(DirectiveState::Off);
    }

    /// Link the execution to the preceding PROG line.
    pub fn link_to_prog(&mut self) {
        self.set_state(DirectiveState::Linked);
    }

    fn set_state(&mut self, state: DirectiveState) {
        if self.state == state {
            return;
        }
        let flag = match state {
            DirectiveState::On => "+",
            DirectiveState::Off => "-",
            DirectiveState::Linked => "*",
        };
        // The flag sits right before the SYS keyword; from_line
        // guaranteed it exists.
        if let Some(at) = self.content.find("SYS").filter(|&at| at > 0) {
            self.content.replace_range(at - 1..at, flag);
        }
        self.state = state;
    }

    pub fn serialize(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_directive_lines() {
        assert!(is_system_directive("+SYS DEL $(NAME).PLB"));
        assert!(is_system_directive("  *sys copy a b"));
        assert!(!is_system_directive("+PROG ASE"));
        assert!(!is_system_directive(""));
    }

    #[test]
    fn parses_the_three_states() {
        let on = SysDirective::from_line("+SYS DEL X").expect("on");
        assert!(on.is_on());
        let off = SysDirective::from_line("-SYS DEL X").expect("off");
        assert!(off.is_off());
        let linked = SysDirective::from_line("*SYS DEL X").expect("linked");
        assert!(linked.is_linked());
    }

    #[test]
    fn rejects_lines_without_a_valid_flag() {
        assert!(matches!(
            SysDirective::from_line("SYS DEL X"),
            Err(DatError::MalformedDirective(_))
        ));
        assert!(matches!(
            SysDirective::from_line("!SYS DEL X"),
            Err(DatError::MalformedDirective(_))
        ));
    }

    #[test]
    fn state_changes_rewrite_the_flag_in_place() {
        let mut directive = SysDirective::from_line("+SYS ECHO HI").expect("parse");
        directive.turn_off();
        assert_eq!(directive.serialize(), "-SYS ECHO HI");
        directive.link_to_prog();
        assert_eq!(directive.serialize(), "*SYS ECHO HI");
        directive.turn_on();
        assert_eq!(directive.serialize(), "+SYS ECHO HI");
    }
}

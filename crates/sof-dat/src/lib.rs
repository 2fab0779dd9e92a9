//! Load, modify and save SOFiSTiK `dat` input decks.
//!
//! A deck is an ordered run of PROG blocks, `SYS` directives and optional
//! `!±!CHAPTER` sections grouping the two. This crate parses a deck into
//! that structure, supports the editing operations the package's own
//! editor offers (row edits, renames, activation toggles, relative
//! insertion), and serializes the result back to disk while keeping the
//! untouched original available.

pub mod chapter;
pub mod dat_file;
pub mod directive;
pub mod error;
pub mod program;

pub use chapter::{Chapter, ChapterItem};
pub use dat_file::{DatFile, DatItem, load_text_file};
pub use directive::{DirectiveState, SysDirective, is_system_directive};
pub use error::{DatError, Result};
pub use program::{ProgType, Program};

//! Error types for sof-dat

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatError>;

#[derive(Error, Debug)]
pub enum DatError {
    #[error("program \"{name}\" already exists in {context}")]
    DuplicateProgram { name: String, context: String },

    #[error("program \"{name}\" not found in {context}")]
    ProgramNotFound { name: String, context: String },

    #[error("chapter \"{name}\" already exists in {context}")]
    DuplicateChapter { name: String, context: String },

    #[error("chapter \"{name}\" not found in {context}")]
    ChapterNotFound { name: String, context: String },

    #[error("directive \"{name}\" already exists in {context}")]
    DuplicateDirective { name: String, context: String },

    #[error("directive \"{name}\" not found in {context}")]
    DirectiveNotFound { name: String, context: String },

    #[error("\"{target}\" not found in {context}")]
    TargetNotFound { target: String, context: String },

    #[error("row \"{row}\" not found in program \"{program}\"")]
    RowNotFound { row: String, program: String },

    #[error("row index {index} is out of bounds for program \"{program}\"")]
    RowIndexOutOfBounds { index: usize, program: String },

    #[error("program type \"{0}\" is not valid")]
    InvalidProgramType(String),

    #[error("program first character must be '+' or '-': {0}")]
    MalformedProgram(String),

    #[error("illegal SYS directive: {0}")]
    MalformedDirective(String),

    #[error("no programs found in chapter \"{0}\"")]
    EmptyChapter(String),

    #[error("dat files must start with PROG")]
    MissingLeadingProg,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

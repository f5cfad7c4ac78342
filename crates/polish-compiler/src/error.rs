//! Compile errors.
//!
//! Every error carries the byte span of the offending source so the
//! diagnostics printer can point at it.

use std::ops::Range;

/// Malformed token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("`{0}`")]
    InvalidToken(String),

    #[error("bad number prefix in `{0}`")]
    InvalidNumberPrefix(String),

    #[error("`{digit}` is not a base-{base} digit")]
    InvalidDigit { digit: char, base: u32 },

    #[error("number has no digits")]
    MissingDigits,

    #[error("empty label name")]
    EmptyLabel,

    #[error("unknown escape `\\{0}`")]
    BadEscape(char),

    #[error("unterminated string")]
    UnterminatedString,
}

/// Which label table limit was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelLimit {
    /// Number of labels.
    Count(usize),
    /// Total characters across all label names.
    Chars(usize),
}

impl std::fmt::Display for LabelLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "more than {n} labels"),
            Self::Chars(n) => write!(f, "more than {n} characters"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Program stack overflow; {size} bytes over the {limit}-byte limit")]
    ProgramTooLarge { size: usize, limit: usize },

    #[error("Overlarge number for type; {text} >= 2^{bits}")]
    NumberTooLarge { text: String, bits: u32 },

    #[error("Invalid token; {0}")]
    Lex(#[from] LexError),

    #[error("Unknown instruction; `{0}`")]
    UnknownInstruction(String),

    #[error("Program leaves valid memory before END; no `end` in {len} bytes")]
    MissingEnd { len: usize },

    #[error("Label redefinition; `{name}` already at {offset}")]
    DuplicateLabel { name: String, offset: usize },

    #[error("No label matching; `{0}`")]
    UndefinedLabel(String),

    #[error("Total label length exceeds buffer; `{name}` makes {limit}")]
    LabelStorageOverflow { name: String, limit: LabelLimit },
}

/// A compile error located in the source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub span: Range<usize>,
}

impl CompileError {
    pub fn new(kind: impl Into<ErrorKind>, span: Range<usize>) -> Self {
        Self {
            kind: kind.into(),
            span,
        }
    }
}

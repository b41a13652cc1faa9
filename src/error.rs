use std::fmt;

use thiserror::Error;

/// Errors produced while decoding, encoding or navigating a bencode tree.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// The input does not conform to the bencode grammar.
    #[error("syntax error at offset {offset}: {kind}")]
    Syntax { offset: usize, kind: SyntaxError },

    /// A well-formed integer literal does not fit in an `i64`.
    #[error("integer out of range for i64: {0}")]
    IntegerOverflow(String),

    /// A typed accessor or builder method was used on the wrong kind of node.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// Encoding was requested before any tree was decoded or built.
    #[error("no value to encode")]
    NoRoot,

    /// The tree still contains a placeholder that was never assigned.
    #[error("unassigned placeholder at {0}")]
    UnassignedPlaceholder(String),

    /// The byte source ran out while reading a string body.
    #[error("source exhausted before expected byte count reached (expected {expected}, available {available})")]
    SourceExhausted { expected: usize, available: usize },

    /// A numeric conversion out of the tree did not fit the target type.
    #[error("value {0} does not fit in an i64")]
    OutOfRange(u64),

    /// A list index or length too large to allocate.
    #[error("list index {0} out of range")]
    IndexOutOfRange(usize),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    /// Returns the grammar violation if this is a syntax error.
    pub fn syntax_kind(&self) -> Option<&SyntaxError> {
        match self {
            BencodeError::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        self.syntax_kind().is_some()
    }
}

/// The specific grammar rule a decode rejected the input for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("expected one of d/l/i/digit, found '{}'", escaped(.0))]
    InvalidLeadingByte(u8),

    #[error("missing terminating 'e' for {0}")]
    Unterminated(&'static str),

    #[error("invalid digit '{}' in number", escaped(.0))]
    InvalidDigit(u8),

    #[error("number has no digits")]
    EmptyInteger,

    #[error("number has a leading zero")]
    LeadingZero,

    #[error("negative zero is not allowed")]
    NegativeZero,

    #[error("integer too large for conversion buffer")]
    IntegerBufferOverflow,

    #[error("negative string length")]
    NegativeLength,

    #[error("string length {len} exceeds maximum of {max}")]
    StringTooLong { len: u64, max: usize },

    #[error("dictionary key must be a byte string, found '{}'", escaped(.0))]
    InvalidKey(u8),

    #[error("dictionary key \"{0}\" out of order")]
    KeyOrder(String),

    #[error("duplicate dictionary key \"{0}\"")]
    DuplicateKey(String),

    #[error("maximum parser depth exceeded ({0})")]
    MaxDepthExceeded(usize),

    #[error("trailing data after top-level value")]
    TrailingData,
}

fn escaped(byte: &u8) -> std::ascii::EscapeDefault {
    std::ascii::escape_default(*byte)
}

/// The kind of a [`Value`](crate::Value), used in type-mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Bytes,
    List,
    Dict,
    Hole,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Bytes => "byte string",
            Kind::List => "list",
            Kind::Dict => "dictionary",
            Kind::Hole => "unassigned placeholder",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

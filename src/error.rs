//! Errors raised while checking a simulation log.

use thiserror::Error;

/// Everything that can abort a check run.
///
/// There is no per-circle recovery: the first error ends the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CBOR encode error: {0}")]
    CborEncode(#[from] ciborium::ser::Error<std::io::Error>),
    #[error("CBOR decode error: {0}")]
    CborDecode(#[from] ciborium::de::Error<std::io::Error>),
    #[error("line {line}: malformed circle descriptor {text:?}, expected \"xc,yc,r\"")]
    MalformedDescriptor { line: usize, text: String },
    #[error("line {line}: {field:?} is not a hexadecimal number")]
    BadHex { line: usize, field: String },
    #[error("line {line}: {field:?} is outside the accepted range")]
    FieldRange { line: usize, field: String },
    #[error("{0:?} is not a hexadecimal word address")]
    NotHex(String),
    #[error("line {line}: address record appears before any circle descriptor")]
    OrphanRecord { line: usize },
    #[error("line {line}: malformed address record {text:?}, expected \"word_addr byte_select\"")]
    MalformedRecord { line: usize, text: String },
    #[error("line {line}: unknown byte select code {code:?} (expected one of e, d, b, 7)")]
    UnknownByteSelect { line: usize, code: String },
    #[error("word address {value} does not fit the canonical width")]
    AddressOverflow { value: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;

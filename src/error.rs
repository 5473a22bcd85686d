// src/error.rs
//! Error types for NMEA decoding and the surrounding tooling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GpsError>;

/// Reasons a single NMEA 0183 line was rejected.
///
/// Every variant carries the offending text. Field-level decoders report the
/// field itself; sentence decoders replace it with the whole raw sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NmeaError {
    /// Bad talker prefix or unrecognized three-letter sentence code
    #[error("unknown sentence type ({sentence})")]
    UnknownSentenceType { sentence: String },

    /// Calculated XOR checksum differs from the transmitted `*hh` value
    #[error("checksum mismatch, calculated {calculated:02X} ({sentence})")]
    ChecksumMismatch { calculated: u8, sentence: String },

    /// Field count not accepted by the sentence grammar
    #[error("wrong field count {count} ({sentence})")]
    WrongFieldCount { count: usize, sentence: String },

    /// Malformed or out of range sub-field
    #[error("invalid {what} ({sentence})")]
    InvalidFormat {
        what: &'static str,
        sentence: String,
    },
}

impl NmeaError {
    pub(crate) fn invalid(what: &'static str, text: &str) -> Self {
        NmeaError::InvalidFormat {
            what,
            sentence: text.to_string(),
        }
    }

    /// Text that caused the error
    pub fn sentence(&self) -> &str {
        match self {
            NmeaError::UnknownSentenceType { sentence }
            | NmeaError::ChecksumMismatch { sentence, .. }
            | NmeaError::WrongFieldCount { sentence, .. }
            | NmeaError::InvalidFormat { sentence, .. } => sentence,
        }
    }

    /// Re-targets the error at the complete raw sentence.
    pub(crate) fn in_sentence(self, raw: &str) -> Self {
        let sentence = raw.to_string();
        match self {
            NmeaError::UnknownSentenceType { .. } => NmeaError::UnknownSentenceType { sentence },
            NmeaError::ChecksumMismatch { calculated, .. } => {
                NmeaError::ChecksumMismatch { calculated, sentence }
            }
            NmeaError::WrongFieldCount { count, .. } => {
                NmeaError::WrongFieldCount { count, sentence }
            }
            NmeaError::InvalidFormat { what, .. } => NmeaError::InvalidFormat { what, sentence },
        }
    }
}

#[derive(Debug, Error)]
pub enum GpsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serial error: {0}")]
    Serial(#[from] tokio_serial::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("NMEA error: {0}")]
    Nmea(#[from] NmeaError),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for GpsError {
    fn from(error: anyhow::Error) -> Self {
        GpsError::Other(error.to_string())
    }
}

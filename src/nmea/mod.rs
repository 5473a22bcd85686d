// src/nmea/mod.rs
//! NMEA 0183 framing, decoding and aggregation

pub mod data;
pub mod fields;
pub mod parser;
pub mod sentence;

pub use data::SentenceData;
pub use fields::FaaMode;
pub use parser::Parser;
pub use sentence::{Sentence, SentenceType};

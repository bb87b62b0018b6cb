//! # gpumon Codec
//!
//! ## Purpose
//!
//! The "rules" layer between raw `gpu_metrics` bytes and typed values:
//! - Header sniffing ([`sniff`])
//! - Versioned decoding against the schema registry ([`decode`], [`decode_with`])
//! - Lazy, bounds-checked, unit-carrying field access ([`DecodedSample`])
//! - Error taxonomy returned as values ([`DecodeError`])
//! - Fixture synthesis for tests and replay ([`TableFixture`])
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → services/monitor
//!     ↑           ↓             ↓
//! Field tables  Sniff/Decode  Read/Poll/Render
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - File access, polling, sleeping or retries (belongs in services/monitor)
//! - Logging or printing; every outcome is returned to the caller
//! - Byte-order conversion; tables are read in native order
//!
//! ## Usage
//! ```rust
//! use gpumon_codec::{decode, DecodeError};
//!
//! let buffer = [0u8, 0, 9, 9];
//! match decode(&buffer) {
//!     Ok(sample) => println!("{}", sample.variant()),
//!     Err(DecodeError::UnknownVariant(f, c)) => println!("revision {f}.{c} not supported yet"),
//!     Err(other) => println!("skipping sample: {other}"),
//! }
//! ```

pub mod bounds;
pub mod decoder;
pub mod error;
pub mod fixture;
pub mod path;
pub mod sample;
pub mod sniffer;

pub use decoder::{decode, decode_with};
pub use error::{DecodeError, DecodeResult, HeaderError};
pub use fixture::{FixtureError, TableFixture};
pub use path::FieldPath;
pub use sample::{DecodedSample, FieldValue, OwnedSample};
pub use sniffer::sniff;

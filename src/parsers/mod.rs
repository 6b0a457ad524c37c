//! Archive parsing: record extraction and lenient field deserialization
//!
//! # Error Handling Strategy
//!
//! Extraction is all-or-nothing per method and first-success-wins across methods:
//!
//! - **Method failures**: A method that finds no candidate or whose candidate does not parse
//!   into a non-empty JSON array is logged at debug level and the next method is tried.
//!
//! - **Total failure**: Only when every method fails does extraction return
//!   [`ExtractionError::NoRecords`](crate::error::ExtractionError::NoRecords).
//!
//! - **Field leniency**: Field deserializers never reject a record for an unexpected field
//!   type; they map it to an absent value so one odd record cannot sink the archive.

pub mod deserializers;
pub mod extractor;

pub use deserializers::parse_created_at;
pub use extractor::{ExtractionMethod, extract, extract_with_method};

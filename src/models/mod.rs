//! Data models for tweet archive sampling.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`RawItem`] / [`RawRecord`] - One element of the extracted archive array, as exported
//! - [`Record`] - Normalized post with decoded text, parsed timestamp and classification flags
//! - [`FilteredView`] - Parallel text/record sequences after retweet/reply filtering
//! - [`Histogram`] - Year and year-month counts over the dated records of a view
//!
//! Raw models use serde with lenient field deserializers from the `parsers::deserializers`
//! module, since exports disagree on field types (ids as strings or numbers, nullable keys).

pub mod histogram;
pub mod raw;
pub mod record;
pub mod view;

pub use histogram::Histogram;
pub use raw::{RawItem, RawRecord};
pub use record::{Record, YearMonth};
pub use view::FilteredView;

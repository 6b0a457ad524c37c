//! Archive Sampler - Resurface random posts from a personal Twitter/X archive
//!
//! This library reads the `tweets.js` file from a Twitter/X data export and draws posts
//! from it under several temporal-distribution strategies. It supports:
//!
//! - Extracting the tweet array from the export's JavaScript assignment (or plain JSON)
//! - Normalizing heterogeneous tweet records and hiding retweets or replies
//! - Building year and year-month histograms of dated posts
//! - Drawing posts uniformly, from the newest 10%, per year, per month, or per
//!   chronological bucket
//!
//! # Example
//!
//! ```
//! use archive_sampler::{ContentFilter, Corpus, Histogram, Strategy, select};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let text = r#"window.YTD.tweets.part0 = [
//!   {"tweet": {"full_text": "hello", "created_at": "Wed Oct 10 20:19:24 +0000 2018"}}
//! ]"#;
//! let corpus = Corpus::from_text(text)?;
//! let view = corpus.view(&ContentFilter::default());
//! let histogram = Histogram::from_records(&view.records);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let selection = select(&view.texts, &view.records, Strategy::Year, &histogram, &mut rng);
//! assert_eq!(selection.map(|s| s.text), Some("hello".to_string()));
//! # Ok::<(), archive_sampler::error::ExtractionError>(())
//! ```

pub mod cli;
pub mod corpus;
pub mod error;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod sampler;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use corpus::{Corpus, normalize};
pub use error::{ArchiveError, ExtractionError};
pub use filters::ContentFilter;
pub use models::{FilteredView, Histogram, Record, YearMonth};
pub use parsers::extract;
pub use sampler::{Selection, Strategy, select};
pub use session::Session;

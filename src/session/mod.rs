//! Application state for one browsing session.
//!
//! [`Session`] is the single owner of everything that changes while a user browses an
//! archive:
//!
//! - **Corpus**: the extracted archive, kept so filter changes skip re-extraction
//! - **View and histogram**: derived from the corpus and the content filter, recomputed on
//!   every filter change
//! - **Selection**: the currently shown post and the strategy used to draw it
//!
//! Every operation runs to completion before the next one starts. A failed load leaves
//! all of the above untouched.
//!
//! # Example
//!
//! ```
//! use archive_sampler::sampler::Strategy;
//! use archive_sampler::session::Session;
//!
//! let mut session = Session::with_seed(1);
//! session.load_text(r#"window.YTD.tweets.part0 = [{"tweet": {"full_text": "hello"}}]"#)?;
//! session.set_strategy(Strategy::All);
//! assert_eq!(session.current().map(|s| s.text.as_str()), Some("hello"));
//! # Ok::<(), archive_sampler::error::ArchiveError>(())
//! ```

use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::corpus::Corpus;
use crate::error::ArchiveError;
use crate::filters::ContentFilter;
use crate::models::{FilteredView, Histogram};
use crate::sampler::{Selection, Strategy, select};
use crate::utils::read_file_as_text;

/// Current draw and the strategy that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub current: Option<Selection>,
    pub strategy: Strategy,
}

pub struct Session<R: Rng> {
    rng: R,
    corpus: Option<Corpus>,
    filter: ContentFilter,
    view: FilteredView,
    histogram: Histogram,
    selection: SelectionState,
}

impl Session<StdRng> {
    /// Session with a seeded standard generator, for reproducible draws
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Session seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            corpus: None,
            filter: ContentFilter::default(),
            view: FilteredView::default(),
            histogram: Histogram::default(),
            selection: SelectionState::default(),
        }
    }

    /// Start with the given filter and strategy instead of the defaults
    pub fn configured(mut self, filter: ContentFilter, strategy: Strategy) -> Self {
        self.filter = filter;
        self.selection.strategy = strategy;
        self
    }

    /// Load an archive from disk, replacing the current one on success
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] or [`ArchiveError::TooLarge`] if the file cannot be read,
    /// and [`ArchiveError::Extraction`] if it holds no records. State is unchanged on error.
    pub fn load_file(&mut self, path: &Path, max_bytes: Option<u64>) -> Result<(), ArchiveError> {
        let text = read_file_as_text(path, max_bytes)?;
        self.load_text(&text)
    }

    /// Load an archive from its text, replacing the current one on success
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Extraction`] if no records can be extracted. State is
    /// unchanged on error.
    pub fn load_text(&mut self, text: &str) -> Result<(), ArchiveError> {
        let corpus = Corpus::from_text(text)?;
        info!("Loaded archive with {} raw items", corpus.raw_len());
        self.corpus = Some(corpus);
        self.refresh_view();
        Ok(())
    }

    pub fn set_hide_retweets(&mut self, hide: bool) {
        self.set_filter(ContentFilter { hide_retweets: hide, ..self.filter });
    }

    pub fn set_hide_replies(&mut self, hide: bool) {
        self.set_filter(ContentFilter { hide_replies: hide, ..self.filter });
    }

    pub fn toggle_retweets(&mut self) {
        self.set_filter(self.filter.toggled_retweets());
    }

    pub fn toggle_replies(&mut self) {
        self.set_filter(self.filter.toggled_replies());
    }

    /// Change the content filter, re-normalizing the retained corpus and drawing again
    pub fn set_filter(&mut self, filter: ContentFilter) {
        self.filter = filter;
        if self.corpus.is_some() {
            self.refresh_view();
        }
    }

    /// Change the strategy and draw again with it
    pub fn set_strategy(&mut self, strategy: Strategy) -> Option<&Selection> {
        self.selection.strategy = strategy;
        self.next()
    }

    /// Draw another post with the current strategy
    pub fn next(&mut self) -> Option<&Selection> {
        self.selection.current = select(
            &self.view.texts,
            &self.view.records,
            self.selection.strategy,
            &self.histogram,
            &mut self.rng,
        );
        self.selection.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.corpus.is_some()
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn filter(&self) -> ContentFilter {
        self.filter
    }

    pub fn strategy(&self) -> Strategy {
        self.selection.strategy
    }

    pub fn current(&self) -> Option<&Selection> {
        self.selection.current.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    fn refresh_view(&mut self) {
        self.view = self.corpus.as_ref().map(|c| c.view(&self.filter)).unwrap_or_default();
        self.histogram = Histogram::from_records(&self.view.records);
        self.next();
    }
}

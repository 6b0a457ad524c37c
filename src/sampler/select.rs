use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, error};

use super::strategy::Strategy;
use crate::models::{Histogram, Record, YearMonth};

/// Number of chronological spans used by the recent window and the balanced buckets
const SPAN_COUNT: usize = 10;

/// A drawn post: its position in the view plus copies of its text and record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub index: usize,
    pub text: String,
    /// `None` only if the view's parallel sequences disagree in length
    pub record: Option<Record>,
}

/// A view position whose record carries a timestamp
#[derive(Debug, Clone, Copy)]
struct DatedEntry {
    index: usize,
    timestamp: DateTime<Utc>,
}

impl DatedEntry {
    fn period(&self) -> YearMonth {
        YearMonth::from_timestamp(&self.timestamp)
    }
}

/// Draw one post from a filtered view
///
/// Returns `None` only when `texts` is empty. Date-dependent strategies consider only posts
/// whose record has a timestamp; when there are none, or when any stage ends up with no
/// candidates, the draw falls back to a uniform pick over all of `texts`.
///
/// # Examples
///
/// ```
/// use archive_sampler::models::Histogram;
/// use archive_sampler::sampler::{Strategy, select};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let none = select(&[], &[], Strategy::Balanced, &Histogram::default(), &mut rng);
/// assert!(none.is_none());
/// ```
pub fn select<R: Rng + ?Sized>(
    texts: &[String],
    records: &[Record],
    strategy: Strategy,
    histogram: &Histogram,
    rng: &mut R,
) -> Option<Selection> {
    let index = pick_index(texts, records, strategy, histogram, rng)?;
    let text = texts.get(index)?.clone();
    Some(Selection { index, text, record: records.get(index).cloned() })
}

/// Index-only form of [`select`]
pub fn pick_index<R: Rng + ?Sized>(
    texts: &[String],
    records: &[Record],
    strategy: Strategy,
    histogram: &Histogram,
    rng: &mut R,
) -> Option<usize> {
    if texts.is_empty() {
        return None;
    }
    if texts.len() != records.len() {
        error!(
            "Mismatch between text and record counts ({} texts, {} records)",
            texts.len(),
            records.len()
        );
    }

    let picked = match strategy {
        Strategy::All => uniform_index(texts.len(), rng),
        Strategy::Recent => pick_recent(dated_entries(texts, records), rng),
        Strategy::Year => {
            let years = histogram.years();
            pick_by_period(&dated_entries(texts, records), &years, |e| e.period().year, rng)
        }
        Strategy::Month => {
            let months = histogram.months();
            pick_by_period(&dated_entries(texts, records), &months, DatedEntry::period, rng)
        }
        Strategy::Balanced => pick_balanced(dated_entries(texts, records), rng),
    };

    picked.or_else(|| {
        debug!("No dated candidates for {} strategy, drawing from all {} posts", strategy, texts.len());
        uniform_index(texts.len(), rng)
    })
}

/// Size of the `recent` window for `n` dated posts: the newest 10%, at least one
pub fn recent_window_len(n: usize) -> usize {
    if n == 0 { 0 } else { n.div_ceil(SPAN_COUNT).max(1) }
}

/// Bucket size for the `balanced` strategy over `n` dated posts
pub fn bucket_size(n: usize) -> usize {
    n.div_ceil(SPAN_COUNT).max(1)
}

/// Split chronologically sorted items into contiguous `balanced` buckets.
/// There are at most 10 and only the last may be smaller.
pub fn balanced_buckets<T>(sorted: &[T]) -> Vec<&[T]> {
    sorted.chunks(bucket_size(sorted.len())).collect()
}

fn uniform_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

fn dated_entries(texts: &[String], records: &[Record]) -> Vec<DatedEntry> {
    records
        .iter()
        .take(texts.len())
        .enumerate()
        .filter_map(|(index, record)| record.timestamp.map(|timestamp| DatedEntry { index, timestamp }))
        .collect()
}

fn choose_entry<R: Rng + ?Sized>(entries: &[DatedEntry], rng: &mut R) -> Option<usize> {
    entries.choose(rng).map(|e| e.index)
}

fn pick_recent<R: Rng + ?Sized>(mut dated: Vec<DatedEntry>, rng: &mut R) -> Option<usize> {
    dated.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let window = recent_window_len(dated.len());
    choose_entry(&dated[..window], rng)
}

/// Two-stage draw: a uniform key (year or year-month) from `keys`, then a uniform post with
/// that key. Sparse periods weigh the same as dense ones.
fn pick_by_period<K, F, R>(dated: &[DatedEntry], keys: &[K], key_of: F, rng: &mut R) -> Option<usize>
where
    K: PartialEq,
    F: Fn(&DatedEntry) -> K,
    R: Rng + ?Sized,
{
    let Some(key) = keys.choose(rng) else {
        return choose_entry(dated, rng);
    };

    let in_period: Vec<DatedEntry> = dated.iter().filter(|&e| key_of(e) == *key).copied().collect();
    if in_period.is_empty() {
        debug!("Chosen period has no dated posts, drawing from all {} dated posts", dated.len());
        return choose_entry(dated, rng);
    }

    choose_entry(&in_period, rng)
}

fn pick_balanced<R: Rng + ?Sized>(mut dated: Vec<DatedEntry>, rng: &mut R) -> Option<usize> {
    dated.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    let buckets = balanced_buckets(&dated);
    let bucket = buckets.choose(rng)?;
    choose_entry(bucket, rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const DRAWS: usize = 2000;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn dated(text: &str, timestamp: DateTime<Utc>) -> Record {
        Record::new(text.to_string(), text.to_string(), timestamp.to_rfc2822(), Some(timestamp), false)
    }

    fn undated(text: &str) -> Record {
        Record::new(text.to_string(), text.to_string(), String::new(), None, false)
    }

    fn texts_of(records: &[Record]) -> Vec<String> {
        records.iter().map(|r| r.text.clone()).collect()
    }

    /// `n` posts one hour apart starting at 2020-01-01, index order == chronological order
    fn hourly(n: usize) -> Vec<Record> {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| dated(&format!("post {}", i), start + Duration::hours(i as i64))).collect()
    }

    fn draw_many(records: &[Record], strategy: Strategy, histogram: &Histogram) -> Vec<usize> {
        let texts = texts_of(records);
        let mut rng = rng();
        (0..DRAWS)
            .map(|_| pick_index(&texts, records, strategy, histogram, &mut rng).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_view_selects_nothing() {
        let mut rng = rng();
        for strategy in Strategy::VARIANTS {
            assert!(select(&[], &[], strategy, &Histogram::default(), &mut rng).is_none());
        }
    }

    #[test]
    fn test_selection_carries_text_and_record() {
        let records = hourly(3);
        let texts = texts_of(&records);
        let histogram = Histogram::from_records(&records);
        let mut rng = rng();

        for strategy in Strategy::VARIANTS {
            let selection = select(&texts, &records, strategy, &histogram, &mut rng).unwrap();
            assert_eq!(selection.text, texts[selection.index]);
            assert_eq!(selection.record.as_ref(), Some(&records[selection.index]));
        }
    }

    #[test]
    fn test_undated_only_view_still_selects() {
        let records = vec![undated("a"), undated("b")];
        let texts = texts_of(&records);
        let histogram = Histogram::from_records(&records);
        let mut rng = rng();

        for strategy in Strategy::VARIANTS {
            assert!(pick_index(&texts, &records, strategy, &histogram, &mut rng).is_some());
        }
    }

    #[test]
    fn test_all_includes_undated_posts() {
        let ts = Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap();
        let records = vec![dated("dated", ts), undated("undated")];
        let histogram = Histogram::from_records(&records);

        let seen: HashSet<usize> = draw_many(&records, Strategy::All, &histogram).into_iter().collect();
        assert_eq!(seen, HashSet::from([0, 1]));
    }

    #[test]
    fn test_date_strategies_exclude_undated_posts() {
        let ts = Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap();
        let records = vec![undated("u1"), dated("dated", ts), undated("u2")];
        let histogram = Histogram::from_records(&records);

        for strategy in [Strategy::Recent, Strategy::Year, Strategy::Month, Strategy::Balanced] {
            let picks = draw_many(&records, strategy, &histogram);
            assert!(picks.iter().all(|&i| i == 1), "{} picked an undated post", strategy);
        }
    }

    #[test]
    fn test_recent_only_returns_latest_tenth() {
        let mut records = hourly(100);
        // Shuffle so that view order is not chronological order
        records.shuffle(&mut rng());
        let histogram = Histogram::from_records(&records);

        let mut by_age: Vec<usize> = (0..records.len()).collect();
        by_age.sort_by(|&a, &b| records[b].timestamp.cmp(&records[a].timestamp));
        let latest: HashSet<usize> = by_age[..10].iter().copied().collect();

        let seen: HashSet<usize> = draw_many(&records, Strategy::Recent, &histogram).into_iter().collect();
        assert_eq!(seen, latest);
    }

    #[test]
    fn test_recent_window_len() {
        assert_eq!(recent_window_len(0), 0);
        assert_eq!(recent_window_len(1), 1);
        assert_eq!(recent_window_len(9), 1);
        assert_eq!(recent_window_len(10), 1);
        assert_eq!(recent_window_len(11), 2);
        assert_eq!(recent_window_len(100), 10);
    }

    #[test]
    fn test_balanced_buckets_for_95() {
        let items: Vec<usize> = (0..95).collect();
        let buckets = balanced_buckets(&items);
        assert_eq!(buckets.len(), 10);
        assert!(buckets.iter().all(|b| b.len() <= 10));
        assert_eq!(buckets.last().map(|b| b.len()), Some(5));
        assert_eq!(buckets[3], &items[30..40]);
    }

    #[test]
    fn test_balanced_buckets_small_and_even() {
        let five: Vec<usize> = (0..5).collect();
        assert_eq!(balanced_buckets(&five).len(), 5);

        let hundred: Vec<usize> = (0..100).collect();
        let buckets = balanced_buckets(&hundred);
        assert_eq!(buckets.len(), 10);
        assert!(buckets.iter().all(|b| b.len() == 10));

        let empty: Vec<usize> = Vec::new();
        assert!(balanced_buckets(&empty).is_empty());
    }

    #[test]
    fn test_balanced_weights_buckets_not_posts() {
        // 11 posts → buckets of 2, the newest post is alone in the sixth bucket
        let records = hourly(11);
        let histogram = Histogram::from_records(&records);
        let picks = draw_many(&records, Strategy::Balanced, &histogram);

        let newest = picks.iter().filter(|&&i| i == 10).count() as f64 / DRAWS as f64;
        assert!((newest - 1.0 / 6.0).abs() < 0.04, "newest drawn {:.3} of the time", newest);
    }

    #[test]
    fn test_year_weights_years_not_posts() {
        let lonely = Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap();
        let busy = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let mut records = vec![dated("2015", lonely)];
        records.extend((0..500).map(|i| dated("2021", busy + Duration::hours(i))));
        let histogram = Histogram::from_records(&records);

        let picks = draw_many(&records, Strategy::Year, &histogram);
        let from_2015 = picks.iter().filter(|&&i| i == 0).count() as f64 / DRAWS as f64;
        assert!((from_2015 - 0.5).abs() < 0.05, "2015 drawn {:.3} of the time", from_2015);
    }

    #[test]
    fn test_month_weights_months_not_posts() {
        let january = Utc.with_ymd_and_hms(2020, 1, 10, 0, 0, 0).unwrap();
        let june = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let mut records = vec![dated("jan", january)];
        records.extend((0..200).map(|i| dated("jun", june + Duration::minutes(i))));
        let histogram = Histogram::from_records(&records);

        let picks = draw_many(&records, Strategy::Month, &histogram);
        let from_january = picks.iter().filter(|&&i| i == 0).count() as f64 / DRAWS as f64;
        assert!((from_january - 0.5).abs() < 0.05, "January drawn {:.3} of the time", from_january);
    }

    #[test]
    fn test_year_with_stale_histogram_falls_back_to_dated_posts() {
        let ts = Utc.with_ymd_and_hms(2020, 2, 2, 0, 0, 0).unwrap();
        let records = vec![undated("u"), dated("a", ts), dated("b", ts)];
        let stale = Histogram::from_records(&[dated("old", Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap())]);

        for strategy in [Strategy::Year, Strategy::Month] {
            let seen: HashSet<usize> = draw_many(&records, strategy, &stale).into_iter().collect();
            assert_eq!(seen, HashSet::from([1, 2]));
        }
    }

    #[test]
    fn test_year_with_empty_histogram_draws_from_dated_posts() {
        let ts = Utc.with_ymd_and_hms(2020, 2, 2, 0, 0, 0).unwrap();
        let records = vec![undated("u"), dated("a", ts)];

        let picks = draw_many(&records, Strategy::Year, &Histogram::default());
        assert!(picks.iter().all(|&i| i == 1));
    }

    #[test]
    fn test_single_record() {
        let records = hourly(1);
        let histogram = Histogram::from_records(&records);
        let mut rng = rng();
        for strategy in Strategy::VARIANTS {
            assert_eq!(pick_index(&texts_of(&records), &records, strategy, &histogram, &mut rng), Some(0));
        }
    }

    /// Log sink shared between a test and its scoped subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    #[test]
    fn test_missing_records_do_not_panic() {
        let records = hourly(2);
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let histogram = Histogram::from_records(&records);
        let mut rng = rng();

        let (_, logs) = with_captured_logs(|| {
            for _ in 0..100 {
                let selection =
                    select(&texts, &records, Strategy::All, &histogram, &mut rng).unwrap();
                assert_eq!(selection.record.is_none(), selection.index == 2);
            }
        });

        assert!(logs.contains("ERROR"));
        assert!(logs.contains("Mismatch between text and record counts (3 texts, 2 records)"));
    }

    #[test]
    fn test_records_without_texts_are_logged() {
        let records = hourly(3);
        let texts = vec!["a".to_string(), "b".to_string()];
        let histogram = Histogram::from_records(&records);
        let mut rng = rng();

        let (selection, logs) =
            with_captured_logs(|| select(&texts, &records, Strategy::Balanced, &histogram, &mut rng));

        assert!(selection.is_some_and(|s| s.index < 2));
        assert!(logs.contains("(2 texts, 3 records)"));
    }

    #[test]
    fn test_matching_lengths_log_no_error() {
        let records = hourly(5);
        let texts = texts_of(&records);
        let histogram = Histogram::from_records(&records);
        let mut rng = rng();

        let (_, logs) =
            with_captured_logs(|| select(&texts, &records, Strategy::All, &histogram, &mut rng));

        assert!(!logs.contains("Mismatch"));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let records = hourly(50);
        let histogram = Histogram::from_records(&records);
        for strategy in Strategy::VARIANTS {
            assert_eq!(
                draw_many(&records, strategy, &histogram),
                draw_many(&records, strategy, &histogram)
            );
        }
    }
}

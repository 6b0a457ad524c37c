use std::collections::BTreeMap;

use serde::Serialize;

use super::record::{Record, YearMonth};

/// Post counts per year and per year-month, over dated records only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub year_counts: BTreeMap<i32, usize>,
    pub month_counts: BTreeMap<YearMonth, usize>,
}

impl Histogram {
    pub fn from_records(records: &[Record]) -> Self {
        let mut histogram = Self::default();
        for period in records.iter().filter_map(Record::period) {
            *histogram.year_counts.entry(period.year).or_insert(0) += 1;
            *histogram.month_counts.entry(period).or_insert(0) += 1;
        }
        histogram
    }

    /// Distinct years, oldest first
    pub fn years(&self) -> Vec<i32> {
        self.year_counts.keys().copied().collect()
    }

    /// Distinct year-months, oldest first
    pub fn months(&self) -> Vec<YearMonth> {
        self.month_counts.keys().copied().collect()
    }

    pub fn year_count(&self, year: i32) -> usize {
        self.year_counts.get(&year).copied().unwrap_or(0)
    }

    pub fn month_count(&self, period: YearMonth) -> usize {
        self.month_counts.get(&period).copied().unwrap_or(0)
    }

    /// Number of records that contributed, i.e. records with a timestamp
    pub fn dated_total(&self) -> usize {
        self.year_counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.year_counts.is_empty()
    }
}

use crate::models::{BucketTable, EnergyDataset};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::{BTreeMap, BTreeSet};

/// Week boundary policy: weeks close on `week_end` and a weekly bucket is
/// labelled by that closing date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekAnchor {
    week_end: Weekday,
}

impl WeekAnchor {
    pub fn new(week_end: Weekday) -> Self {
        Self { week_end }
    }

    pub fn week_end(&self) -> Weekday {
        self.week_end
    }

    /// Closing date of the week containing `date`, `None` past the end of
    /// the calendar
    pub fn bucket_for(&self, date: NaiveDate) -> Option<NaiveDate> {
        let target = self.week_end.num_days_from_monday();
        let current = date.weekday().num_days_from_monday();
        let days_ahead = (target + 7 - current) % 7;
        date.checked_add_signed(Duration::days(i64::from(days_ahead)))
    }
}

impl Default for WeekAnchor {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

pub struct BucketAggregator {
    week_anchor: WeekAnchor,
}

impl BucketAggregator {
    pub fn new() -> Self {
        Self {
            week_anchor: WeekAnchor::default(),
        }
    }

    pub fn with_week_anchor(week_anchor: WeekAnchor) -> Self {
        Self { week_anchor }
    }

    /// Summed kWh per calendar day and source
    pub fn daily_totals(&self, dataset: &EnergyDataset) -> BucketTable {
        self.totals_by(dataset, 1, Some)
    }

    /// Summed kWh per anchored week and source
    pub fn weekly_totals(&self, dataset: &EnergyDataset) -> BucketTable {
        let anchor = self.week_anchor;
        self.totals_by(dataset, 7, move |date| anchor.bucket_for(date))
    }

    /// Group by source then bucket. Each source's series spans every bucket
    /// from its first to its last reading, so empty buckets inside that span
    /// appear as zero. The table rows are the union of those spans.
    fn totals_by<F>(&self, dataset: &EnergyDataset, step_days: i64, bucket_of: F) -> BucketTable
    where
        F: Fn(NaiveDate) -> Option<NaiveDate>,
    {
        let mut sums: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();

        for reading in dataset.iter() {
            let Some(bucket) = bucket_of(reading.day()) else {
                continue;
            };
            *sums
                .entry(reading.source.clone())
                .or_default()
                .entry(bucket)
                .or_insert(0.0) += reading.kwh;
        }

        let mut buckets = BTreeSet::new();
        for series in sums.values_mut() {
            let (Some(&first), Some(&last)) = (series.keys().next(), series.keys().next_back())
            else {
                continue;
            };

            let mut bucket = first;
            while bucket <= last {
                series.entry(bucket).or_insert(0.0);
                buckets.insert(bucket);
                match bucket.checked_add_signed(Duration::days(step_days)) {
                    Some(next) => bucket = next,
                    None => break,
                }
            }
        }

        BucketTable::from_sparse(buckets.into_iter().collect(), &sums)
    }
}

impl Default for BucketAggregator {
    fn default() -> Self {
        Self::new()
    }
}

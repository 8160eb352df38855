use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summed kWh per (bucket, source). Rows are buckets in ascending order,
/// columns are sources in lexicographic order, absent combinations hold 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketTable {
    buckets: Vec<NaiveDate>,
    sources: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl BucketTable {
    /// Build a dense table from sparse per-source sums.
    pub fn from_sparse(
        buckets: Vec<NaiveDate>,
        sums: &BTreeMap<String, BTreeMap<NaiveDate, f64>>,
    ) -> Self {
        let sources: Vec<String> = sums.keys().cloned().collect();
        let values = buckets
            .iter()
            .map(|bucket| {
                sources
                    .iter()
                    .map(|source| {
                        sums.get(source)
                            .and_then(|series| series.get(bucket))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();

        Self {
            buckets,
            sources,
            values,
        }
    }

    pub fn buckets(&self) -> &[NaiveDate] {
        &self.buckets
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, bucket: NaiveDate, source: &str) -> f64 {
        match (
            self.buckets.binary_search(&bucket),
            self.source_index(source),
        ) {
            (Ok(row), Some(col)) => self.values[row][col],
            _ => 0.0,
        }
    }

    /// Values of one source down every bucket, zeros included
    pub fn column(&self, source: &str) -> Vec<f64> {
        match self.source_index(source) {
            Some(col) => self.values.iter().map(|row| row[col]).collect(),
            None => Vec::new(),
        }
    }

    pub fn column_total(&self, source: &str) -> f64 {
        self.column(source).iter().sum()
    }

    /// Mean over every bucket of the table, so zero-filled buckets count
    pub fn column_mean(&self, source: &str) -> f64 {
        let column = self.column(source);
        if column.is_empty() {
            return 0.0;
        }
        column.iter().sum::<f64>() / column.len() as f64
    }

    fn source_index(&self, source: &str) -> Option<usize> {
        self.sources
            .binary_search_by(|s| s.as_str().cmp(source))
            .ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceStats {
    #[serde(skip)]
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl SourceStats {
    pub fn from_value(kwh: f64) -> Self {
        Self {
            count: 1,
            mean: kwh,
            min: kwh,
            max: kwh,
            sum: kwh,
        }
    }

    pub fn push(&mut self, kwh: f64) {
        self.count += 1;
        self.sum += kwh;
        self.min = self.min.min(kwh);
        self.max = self.max.max(kwh);
        self.mean = self.sum / self.count as f64;
    }
}

/// Whole-dataset statistics per source, keyed and iterated by source name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSummary {
    stats: BTreeMap<String, SourceStats>,
}

impl SourceSummary {
    pub fn new(stats: BTreeMap<String, SourceStats>) -> Self {
        Self { stats }
    }

    pub fn get(&self, source: &str) -> Option<&SourceStats> {
        self.stats.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceStats)> {
        self.stats.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Source with the highest sum. Ties go to the lexicographically
    /// smallest name.
    pub fn top_source(&self) -> Option<&str> {
        let mut top: Option<(&str, f64)> = None;
        for (source, stats) in self.iter() {
            match top {
                Some((_, best)) if stats.sum <= best => {}
                _ => top = Some((source, stats.sum)),
            }
        }
        top.map(|(source, _)| source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_dense_table_fills_zeros() {
        let mut sums = BTreeMap::new();
        sums.insert(
            "B".to_string(),
            BTreeMap::from([(date(1), 2.0), (date(2), 3.0)]),
        );
        sums.insert("A".to_string(), BTreeMap::from([(date(2), 5.0)]));

        let table = BucketTable::from_sparse(vec![date(1), date(2)], &sums);

        assert_eq!(table.sources(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.get(date(1), "A"), 0.0);
        assert_eq!(table.get(date(2), "A"), 5.0);
        assert_eq!(table.column("B"), vec![2.0, 3.0]);
        assert_eq!(table.column_mean("A"), 2.5);
        assert_eq!(table.get(date(9), "A"), 0.0);
        assert!(table.column("Z").is_empty());
    }

    #[test]
    fn test_top_source_tie_break() {
        let mut a = SourceStats::from_value(10.0);
        a.push(5.0);
        let b = SourceStats::from_value(15.0);
        let c = SourceStats::from_value(3.0);

        let summary = SourceSummary::new(BTreeMap::from([
            ("Gym".to_string(), b),
            ("Annex".to_string(), a),
            ("Cafe".to_string(), c),
        ]));

        // Annex and Gym both sum to 15
        assert_eq!(summary.top_source(), Some("Annex"));
        assert_eq!(SourceSummary::default().top_source(), None);
    }

    #[test]
    fn test_source_stats_push() {
        let mut stats = SourceStats::from_value(4.0);
        stats.push(-2.0);
        stats.push(10.0);

        assert_eq!(stats.count, 3);
        assert_eq!(stats.sum, 12.0);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.min, -2.0);
        assert_eq!(stats.max, 10.0);
    }
}

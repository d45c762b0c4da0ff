//! Bounded multi-series storage sharing one timeline.

use std::collections::{BTreeMap, VecDeque};

use crate::config::PlotterConfig;
use crate::datasource::smooth::catmull_rom;
use crate::datasource::{IngestReport, index_range};
use crate::geom::Point;
use crate::parser::SampleBatch;
use crate::view::Range;

/// Ring-buffered series cache.
///
/// Every series is exactly as long as the timeline. A series first seen
/// after `k` samples is backfilled with `k` zeros, and a batch that omits a
/// known series records `0.0` for it.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    series: BTreeMap<String, VecDeque<f64>>,
    timeline: VecDeque<i64>,
    max_retained: usize,
}

impl SeriesStore {
    /// Create an empty store retaining at most `max_retained` samples.
    pub fn new(max_retained: usize) -> Self {
        Self {
            series: BTreeMap::new(),
            timeline: VecDeque::new(),
            max_retained,
        }
    }

    /// Create an empty store using the retention limit of a configuration.
    pub fn with_config(config: &PlotterConfig) -> Self {
        Self::new(config.max_cache())
    }

    /// Append one batch and evict samples beyond the retention limit.
    pub fn ingest(&mut self, batch: &SampleBatch) -> IngestReport {
        let mut report = IngestReport::default();
        if batch.is_empty() {
            return report;
        }

        let len = self.timeline.len();
        for name in batch.names() {
            if !self.series.contains_key(name) {
                let mut values = VecDeque::with_capacity(self.max_retained.min(len + 1));
                values.resize(len, 0.0);
                self.series.insert(name.to_string(), values);
                tracing::debug!(series = name, backfill = len, "new series");
                report.new_series.push(name.to_string());
            }
        }

        self.timeline.push_back(batch.timestamp);
        for (name, values) in &mut self.series {
            values.push_back(batch.value(name).unwrap_or(0.0));
        }

        report.evicted = self.evict();
        report
    }

    /// Apply a new retention limit, evicting immediately if it shrank.
    pub fn update_config(&mut self, config: &PlotterConfig) {
        self.max_retained = config.max_cache();
        let evicted = self.evict();
        tracing::debug!(
            max_retained = self.max_retained,
            evicted,
            "store retention updated"
        );
    }

    /// Drop all samples and series.
    pub fn clear(&mut self) {
        self.series.clear();
        self.timeline.clear();
    }

    /// Series names in lexicographic order.
    pub fn series_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    /// Values of a series, oldest first.
    pub fn series(&self, name: &str) -> Option<&VecDeque<f64>> {
        self.series.get(name)
    }

    /// Timestamps of the retained samples, oldest first.
    pub fn time_points(&self) -> &VecDeque<i64> {
        &self.timeline
    }

    /// Number of retained samples.
    pub fn data_point_count(&self) -> usize {
        self.timeline.len()
    }

    /// Check whether no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Current retention limit.
    pub fn max_retained(&self) -> usize {
        self.max_retained
    }

    /// Spline-smoothed view of a whole series.
    pub fn smoothed(&self, name: &str) -> Option<Vec<Point>> {
        let values: Vec<f64> = self.series(name)?.iter().copied().collect();
        Some(catmull_rom(&values, 0.0))
    }

    /// Points of a series covering the X window.
    ///
    /// Smoothing uses the neighbouring samples outside the window as control
    /// points, so the curve matches [`SeriesStore::smoothed`] at every x.
    pub fn points(&self, name: &str, window: Range, smooth: bool) -> Option<Vec<Point>> {
        let series = self.series(name)?;
        let indices = index_range(window, series.len());
        if indices.is_empty() {
            return Some(Vec::new());
        }
        if smooth {
            let first = indices.start as f64;
            let last = (indices.end - 1) as f64;
            let lo = indices.start.saturating_sub(1);
            let hi = (indices.end + 1).min(series.len());
            let values: Vec<f64> = series.range(lo..hi).copied().collect();
            let mut points = catmull_rom(&values, lo as f64);
            points.retain(|point| point.x >= first && point.x <= last);
            return Some(points);
        }
        Some(
            series
                .range(indices.clone())
                .zip(indices)
                .map(|(value, index)| Point::new(index as f64, *value))
                .collect(),
        )
    }

    /// Every series value at one sample index, in name order.
    pub fn values_at(&self, index: usize) -> Vec<(&str, f64)> {
        self.series
            .iter()
            .filter_map(|(name, values)| values.get(index).map(|value| (name.as_str(), *value)))
            .collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &VecDeque<f64>)> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), values))
    }

    fn evict(&mut self) -> usize {
        let mut evicted = 0;
        while self.timeline.len() > self.max_retained {
            self.timeline.pop_front();
            for values in self.series.values_mut() {
                values.pop_front();
            }
            evicted += 1;
        }
        evicted
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::with_config(&PlotterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::SMOOTHING_SUBDIVISIONS;
    use crate::parser::Sample;

    fn batch(timestamp: i64, samples: &[(&str, f64)]) -> SampleBatch {
        SampleBatch::new(
            samples
                .iter()
                .map(|(name, value)| Sample::new(*name, *value))
                .collect(),
            timestamp,
        )
    }

    #[test]
    fn ingest_aligns_series() {
        let mut store = SeriesStore::new(100);
        store.ingest(&batch(1, &[("a", 1.0), ("b", 2.0)]));
        store.ingest(&batch(2, &[("a", 3.0)]));

        assert_eq!(store.data_point_count(), 2);
        assert_eq!(store.series("a").unwrap(), &VecDeque::from([1.0, 3.0]));
        assert_eq!(store.series("b").unwrap(), &VecDeque::from([2.0, 0.0]));
        assert_eq!(store.time_points(), &VecDeque::from([1, 2]));
    }

    #[test]
    fn late_series_is_backfilled() {
        let mut store = SeriesStore::new(100);
        for timestamp in 0..4 {
            store.ingest(&batch(timestamp, &[("a", 1.0)]));
        }
        let report = store.ingest(&batch(4, &[("late", 9.0)]));

        assert_eq!(report.new_series, vec!["late".to_string()]);
        assert_eq!(
            store.series("late").unwrap(),
            &VecDeque::from([0.0, 0.0, 0.0, 0.0, 9.0])
        );
        assert_eq!(store.series("a").unwrap().back(), Some(&0.0));
    }

    #[test]
    fn eviction_keeps_newest_in_order() {
        let mut store = SeriesStore::new(100);
        let mut evicted = 0;
        for timestamp in 0..250 {
            evicted += store.ingest(&batch(timestamp, &[("a", timestamp as f64)])).evicted;
        }
        assert_eq!(evicted, 150);
        assert_eq!(store.data_point_count(), 100);
        let expected: Vec<i64> = (150..250).collect();
        assert_eq!(store.time_points().iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(store.series("a").unwrap().front(), Some(&150.0));
    }

    #[test]
    fn update_config_evicts_immediately() {
        let mut store = SeriesStore::new(2000);
        for timestamp in 0..500 {
            store.ingest(&batch(timestamp, &[("a", 0.0)]));
        }
        let config = PlotterConfig::builder().max_cache(120).build().unwrap();
        store.update_config(&config);
        assert_eq!(store.data_point_count(), 120);
        assert_eq!(store.series("a").unwrap().len(), 120);
        assert_eq!(store.time_points().front(), Some(&380));
        assert_eq!(store.max_retained(), 120);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = SeriesStore::default();
        store.ingest(&batch(0, &[("a", 1.0)]));
        store.clear();
        assert!(store.series_names().is_empty());
        assert_eq!(store.data_point_count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn empty_batch_is_ignored() {
        let mut store = SeriesStore::default();
        let report = store.ingest(&SampleBatch::new(Vec::new(), 0));
        assert_eq!(report, IngestReport::default());
        assert!(store.is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let mut store = SeriesStore::default();
        store.ingest(&batch(0, &[("zeta", 1.0), ("alpha", 2.0)]));
        store.ingest(&batch(1, &[("mid", 3.0)]));
        assert_eq!(store.series_names(), vec!["alpha", "mid", "zeta"]);
        assert!(store.series("unknown").is_none());
    }

    #[test]
    fn smoothing_does_not_mutate_store() {
        let mut store = SeriesStore::default();
        for (timestamp, value) in [0.0, 1.0, 4.0].into_iter().enumerate() {
            store.ingest(&batch(timestamp as i64, &[("a", value)]));
        }
        let smoothed = store.smoothed("a").unwrap();
        assert_eq!(smoothed.len(), 9);
        assert_eq!(store.series("a").unwrap(), &VecDeque::from([0.0, 1.0, 4.0]));
    }

    #[test]
    fn points_cover_the_window_edges() {
        let mut store = SeriesStore::default();
        for timestamp in 0..10 {
            store.ingest(&batch(timestamp, &[("a", timestamp as f64 * 2.0)]));
        }
        let points = store.points("a", Range::new(2.5, 5.0), false).unwrap();
        assert_eq!(
            points,
            vec![
                Point::new(2.0, 4.0),
                Point::new(3.0, 6.0),
                Point::new(4.0, 8.0),
                Point::new(5.0, 10.0)
            ]
        );
        let smoothed = store.points("a", Range::new(2.5, 5.0), true).unwrap();
        assert_eq!(smoothed.first(), Some(&Point::new(2.0, 4.0)));
        assert_eq!(smoothed.last(), Some(&Point::new(5.0, 10.0)));
        assert_eq!(smoothed.len(), 13);
        assert!(store.points("a", Range::new(20.0, 30.0), true).unwrap().is_empty());
    }

    #[test]
    fn windowed_smoothing_matches_whole_series() {
        let mut store = SeriesStore::default();
        for timestamp in 0..30 {
            let value = if timestamp % 2 == 0 { 0.0 } else { 10.0 };
            store.ingest(&batch(timestamp, &[("a", value)]));
        }
        let whole = store.smoothed("a").unwrap();
        for window in [Range::new(5.0, 25.0), Range::new(0.0, 4.5), Range::new(27.2, 29.0)] {
            let points = store.points("a", window, true).unwrap();
            assert!(!points.is_empty());
            for point in &points {
                let expected = whole.iter().find(|candidate| candidate.x == point.x).unwrap();
                assert_eq!(point, expected);
            }
        }
    }

    #[test]
    fn narrow_window_is_still_smoothed() {
        let mut store = SeriesStore::default();
        for (timestamp, value) in [0.0, 1.0, 4.0, 9.0].into_iter().enumerate() {
            store.ingest(&batch(timestamp as i64, &[("a", value)]));
        }
        let points = store.points("a", Range::new(1.0, 2.0), true).unwrap();
        assert_eq!(points.len(), SMOOTHING_SUBDIVISIONS + 2);
        assert_eq!(points.first(), Some(&Point::new(1.0, 1.0)));
        assert_eq!(points.last(), Some(&Point::new(2.0, 4.0)));
    }

    #[test]
    fn values_at_reads_one_index() {
        let mut store = SeriesStore::default();
        store.ingest(&batch(0, &[("b", 1.0), ("a", 2.0)]));
        store.ingest(&batch(1, &[("b", 3.0)]));
        assert_eq!(store.values_at(1), vec![("a", 0.0), ("b", 3.0)]);
        assert!(store.values_at(5).is_empty());
    }
}

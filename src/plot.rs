//! Plotter entry point tying parsing, storage, and the viewport together.

use std::collections::VecDeque;

use crate::axis::y_range;
use crate::config::PlotterConfig;
use crate::datasource::{IngestReport, SeriesStore};
use crate::geom::Point;
use crate::listener::{ConnectionState, SerialListener};
use crate::parser::{LineBuffer, SampleBatch, parse_data, parse_line};
use crate::series::{SeriesAttributes, SeriesId, SeriesTable};
use crate::style::{Color, Theme};
use crate::view::{Range, ScrollbarModel, View, ViewportController};

/// One visible series, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSeries {
    /// Series identifier.
    pub id: SeriesId,
    /// Series name.
    pub name: String,
    /// Stroke color.
    pub color: Color,
    /// Points inside the X window, smoothed when enabled.
    pub points: Vec<Point>,
}

/// Everything a renderer needs for one repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    /// Visible X window, in sample indices.
    pub x: Range,
    /// Y axis range, absent when nothing visible holds data.
    pub y: Option<Range>,
    /// Visible series in name order.
    pub series: Vec<FrameSeries>,
}

/// Live plotter state owned by a single thread.
///
/// Raw serial text goes in through [`Plotter::push_chunk`] (or the
/// [`SerialListener`] impl); a renderer reads [`Plotter::frame`].
#[derive(Debug, Clone)]
pub struct Plotter {
    config: PlotterConfig,
    store: SeriesStore,
    viewport: ViewportController,
    series: SeriesTable,
    lines: LineBuffer,
}

impl Plotter {
    /// Create a plotter with the given configuration.
    pub fn new(config: PlotterConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start building a plotter with custom configuration.
    pub fn builder() -> PlotterBuilder {
        PlotterBuilder::default()
    }

    /// Access the active configuration.
    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// Access the series store.
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Access the viewport controller.
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Access the series attribute table.
    pub fn series_table(&self) -> &SeriesTable {
        &self.series
    }

    /// Series names in lexicographic order.
    pub fn series_names(&self) -> Vec<String> {
        self.store.series_names()
    }

    /// Values of a series, oldest first.
    pub fn series(&self, name: &str) -> Option<&VecDeque<f64>> {
        self.store.series(name)
    }

    /// Timestamps of the retained samples.
    pub fn time_points(&self) -> &VecDeque<i64> {
        self.store.time_points()
    }

    /// Number of retained samples.
    pub fn data_point_count(&self) -> usize {
        self.store.data_point_count()
    }

    /// Attributes of a series.
    pub fn attributes(&self, name: &str) -> Option<&SeriesAttributes> {
        self.series.get(name)
    }

    /// Feed a raw serial chunk; complete lines are parsed and stored.
    ///
    /// Returns the number of samples stored.
    pub fn push_chunk(&mut self, chunk: &str) -> usize {
        let lines = self.lines.push(chunk);
        let mut stored = 0;
        for line in lines {
            if let Some(batch) = parse_line(&line, &self.config) {
                self.ingest(&batch);
                stored += 1;
            }
        }
        stored
    }

    /// Feed text already split on line boundaries.
    ///
    /// Returns the number of samples stored.
    pub fn push_text(&mut self, text: &str) -> usize {
        let batches = parse_data(text, &self.config);
        for batch in &batches {
            self.ingest(batch);
        }
        batches.len()
    }

    /// Store one parsed batch and follow it with the viewport.
    pub fn ingest(&mut self, batch: &SampleBatch) -> IngestReport {
        let report = self.store.ingest(batch);
        for name in &report.new_series {
            self.series.register(name);
        }
        self.viewport.sync(self.store.data_point_count());
        report
    }

    /// Apply a validated configuration.
    pub fn update_config(&mut self, config: PlotterConfig) {
        self.store.update_config(&config);
        self.viewport.set_default_window_size(config.window_size());
        // The store may have evicted; the viewport still holds the old count.
        self.viewport.sync(self.store.data_point_count());
        tracing::debug!(?config, "plotter config updated");
        self.config = config;
    }

    /// Drop all data, colors, visibility, and any partial line.
    pub fn clear(&mut self) {
        self.store.clear();
        self.series.clear();
        self.lines.clear();
        self.viewport.sync(0);
        self.viewport.reset_view();
        tracing::debug!("plotter cleared");
    }

    /// Show an explicit X window.
    pub fn set_window(&mut self, min: f64, max: f64) {
        self.viewport.set_window(min, max);
    }

    /// Zoom by wheel rotation; negative zooms in.
    pub fn zoom(&mut self, delta: f64) {
        self.viewport.zoom(delta);
    }

    /// Pan by a pixel drag.
    pub fn pan(&mut self, delta_pixels: f64, pixels_per_unit: f64) {
        self.viewport.pan(delta_pixels, pixels_per_unit);
    }

    /// Move the window as a scrollbar drag does.
    pub fn scroll_to(&mut self, start: f64) {
        self.viewport.scroll_to(start);
    }

    /// Return to auto-follow.
    pub fn reset_view(&mut self) {
        self.viewport.reset_view();
    }

    /// Access the active view mode.
    pub fn view(&self) -> View {
        self.viewport.view()
    }

    /// Visible X window.
    pub fn window(&self) -> Range {
        self.viewport.window()
    }

    /// Geometry for an external scrollbar.
    pub fn scrollbar(&self) -> ScrollbarModel {
        self.viewport.scrollbar()
    }

    /// Flip a series' visibility; returns the new visibility.
    pub fn toggle_series(&mut self, name: &str) -> bool {
        self.series.toggle(name)
    }

    /// Check whether a series is drawn.
    pub fn is_series_visible(&self, name: &str) -> bool {
        self.series.is_visible(name)
    }

    /// Names of hidden series, sorted.
    pub fn hidden_series(&self) -> Vec<String> {
        self.series.hidden_names()
    }

    /// Y axis range over all visible series.
    pub fn y_range(&self) -> Option<Range> {
        y_range(&self.store, |name| self.series.is_visible(name))
    }

    /// Visible series values at a sample index, for a cursor readout.
    pub fn values_at(&self, index: usize) -> Vec<(&str, f64)> {
        self.store
            .values_at(index)
            .into_iter()
            .filter(|(name, _)| self.series.is_visible(name))
            .collect()
    }

    /// Build the render-ready frame for the current state.
    pub fn frame(&self) -> PlotFrame {
        let window = self.viewport.window();
        let smooth = self.config.smooth_line();
        let series = self
            .store
            .series_names()
            .into_iter()
            .filter_map(|name| {
                let attributes = self.series.get(&name)?;
                if !attributes.is_visible() {
                    return None;
                }
                let points = self.store.points(&name, window, smooth)?;
                Some(FrameSeries {
                    id: attributes.id(),
                    color: attributes.color(),
                    name,
                    points,
                })
            })
            .collect();
        PlotFrame {
            x: window,
            y: self.y_range(),
            series,
        }
    }
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new(PlotterConfig::default())
    }
}

impl SerialListener for Plotter {
    fn on_data(&mut self, chunk: &str) {
        self.push_chunk(chunk);
    }

    fn on_status(&mut self, state: ConnectionState) {
        tracing::debug!(?state, "serial connection state");
        if state == ConnectionState::Connected {
            self.clear();
        }
    }

    fn on_error(&mut self, message: &str) {
        tracing::warn!(message, "serial reader error");
    }
}

/// Builder for configuring a plotter before construction.
#[derive(Debug, Default)]
pub struct PlotterBuilder {
    config: PlotterConfig,
    theme: Theme,
}

impl PlotterBuilder {
    /// Set the parsing and retention configuration.
    pub fn config(mut self, config: PlotterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme used to color series.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build the plotter.
    pub fn build(self) -> Plotter {
        Plotter {
            store: SeriesStore::with_config(&self.config),
            viewport: ViewportController::new(self.config.window_size()),
            series: SeriesTable::new(self.theme),
            lines: LineBuffer::new(),
            config: self.config,
        }
    }
}

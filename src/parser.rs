//! Line parsing for `name:value` telemetry.
//!
//! A line such as `temp:21.5,hum:40` becomes a [`SampleBatch`] holding one
//! [`Sample`] per well-formed item. Malformed items and lines are dropped
//! silently: corrupt frames are expected on a serial link.

use crate::config::PlotterConfig;

/// Longest partial line kept while waiting for a newline, in bytes.
const MAX_PENDING_LINE: usize = 4096;

/// One named numeric reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Series name.
    pub name: String,
    /// Reading.
    pub value: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// All samples parsed from a single line.
///
/// Never empty when produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    /// Samples in line order.
    pub samples: Vec<Sample>,
    /// Wall-clock time in milliseconds since the UNIX epoch.
    pub timestamp: i64,
}

impl SampleBatch {
    /// Create a batch from samples and a timestamp.
    pub fn new(samples: Vec<Sample>, timestamp: i64) -> Self {
        Self { samples, timestamp }
    }

    /// Value of the first sample with the given name.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.samples
            .iter()
            .find(|sample| sample.name == name)
            .map(|sample| sample.value)
    }

    /// Names in line order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|sample| sample.name.as_str())
    }

    /// Check whether the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Parse one line, stamping it with the current wall-clock time.
pub fn parse_line(line: &str, config: &PlotterConfig) -> Option<SampleBatch> {
    parse_line_at(line, config, chrono::Utc::now().timestamp_millis())
}

/// Parse one line with an explicit timestamp.
pub fn parse_line_at(line: &str, config: &PlotterConfig, timestamp: i64) -> Option<SampleBatch> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let samples: Vec<Sample> = trimmed
        .split(config.item_separator())
        .filter_map(|item| parse_item(item, config.name_separator()))
        .collect();

    if samples.is_empty() {
        tracing::trace!(line = trimmed, "dropping line without samples");
        return None;
    }
    Some(SampleBatch::new(samples, timestamp))
}

/// Parse newline-separated text, keeping the well-formed lines in order.
pub fn parse_data(text: &str, config: &PlotterConfig) -> Vec<SampleBatch> {
    text.split('\n')
        .filter_map(|line| parse_line(line, config))
        .collect()
}

fn parse_item(item: &str, name_separator: &str) -> Option<Sample> {
    let mut parts = item.trim().split(name_separator);
    let name = parts.next()?.trim();
    let value = parts.next()?.trim();
    if parts.next().is_some() || name.is_empty() {
        return None;
    }
    let value: f64 = value.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(Sample::new(name, value))
}

/// Reassembles serial chunks into complete lines.
///
/// Chunks arrive with arbitrary split points; only text terminated by `\n`
/// is released, the remainder waits for the next chunk.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completes.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);
        let Some(last_newline) = self.pending.rfind('\n') else {
            self.enforce_limit();
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        let lines = complete
            .split_terminator('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        self.enforce_limit();
        lines
    }

    /// Text received after the last newline.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Drop any partial line.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn enforce_limit(&mut self) {
        if self.pending.len() > MAX_PENDING_LINE {
            tracing::warn!(
                bytes = self.pending.len(),
                "discarding unterminated serial line"
            );
            self.pending.clear();
        }
    }
}

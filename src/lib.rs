//! serial_liveplot is the data core of a serial-port live plotter.
//! It turns `name:value` telemetry lines into bounded, aligned time series
//! and drives a zoomable, auto-following X window over them.
//!
//! Rendering is left to the caller: [`Plotter::frame`] yields the visible
//! points, colors, and axis ranges for one repaint.

#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod datasource;
pub mod error;
pub mod geom;
pub mod handoff;
mod interaction;
pub mod listener;
pub mod parser;
pub mod plot;
pub mod series;
pub mod style;
pub mod view;

pub use axis::y_range;
pub use config::{PlotterConfig, PlotterConfigBuilder};
pub use datasource::{IngestReport, SeriesStore, catmull_rom};
pub use error::{ConfigError, HandoffError, LoadError};
pub use geom::Point;
pub use handoff::{EventQueue, EventSender, SerialEvent};
pub use listener::{ConnectionState, ListenerId, Listeners, SerialListener};
pub use parser::{LineBuffer, Sample, SampleBatch, parse_data, parse_line, parse_line_at};
pub use plot::{FrameSeries, PlotFrame, Plotter, PlotterBuilder};
pub use series::{SeriesAttributes, SeriesId, SeriesTable};
pub use style::{Color, Theme};
pub use view::{DEFAULT_EDGE_TOLERANCE, Range, ScrollbarModel, View, ViewportController};

//! Colors and the series palette.

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }
}

const DEFAULT_PALETTE: [Color; 10] = [
    Color::rgb8(31, 119, 180),
    Color::rgb8(255, 127, 14),
    Color::rgb8(44, 160, 44),
    Color::rgb8(214, 39, 40),
    Color::rgb8(148, 103, 189),
    Color::rgb8(140, 86, 75),
    Color::rgb8(227, 119, 194),
    Color::rgb8(127, 127, 127),
    Color::rgb8(188, 143, 143),
    Color::rgb8(23, 190, 207),
];

/// Visual theme for plots.
#[derive(Debug, Clone)]
pub struct Theme {
    palette: Vec<Color>,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a theme with a custom palette; an empty palette falls back to the default.
    pub fn with_palette(palette: Vec<Color>) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        Self { palette }
    }

    /// Color for the `index`-th series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

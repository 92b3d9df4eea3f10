//! PDF viewer zoom.
//!
//! Zoom is applied as a CSS scale on the embedded viewer; the value is clamped
//! to `[MIN_ZOOM, MAX_ZOOM]` and every change reports the new level with two decimals.

pub const MIN_ZOOM: f64 = 0.8;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Outcome of the viewer's load check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfLoad {
    Missing,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfZoom {
    current: f64,
}

impl Default for PdfZoom {
    fn default() -> Self {
        PdfZoom {
            current: DEFAULT_ZOOM,
        }
    }
}

impl PdfZoom {
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Clamps and stores `zoom`, returning the applied value.
    pub fn set(&mut self, zoom: f64) -> f64 {
        // Rounded to hundredths so repeated steps don't accumulate float drift.
        let rounded = (zoom * 100.0).round() / 100.0;
        self.current = rounded.clamp(MIN_ZOOM, MAX_ZOOM);
        self.current
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set(self.current + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set(self.current - ZOOM_STEP)
    }

    pub fn reset(&mut self) -> f64 {
        self.set(DEFAULT_ZOOM)
    }

    pub fn label(&self) -> String {
        format!("{:.2}", self.current)
    }

    /// Inline style for the viewer element.
    pub fn css_transform(&self) -> String {
        format!(
            "transform-origin: top center; transform: scale({});",
            self.current
        )
    }
}

/// Scroll offset past which the back-to-top button appears.
pub const BACK_TO_TOP_THRESHOLD: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUi {
    /// Width of the progress bar, in percent.
    pub progress: f64,
    pub show_back_to_top: bool,
}

pub fn scroll_ui(metrics: ScrollMetrics) -> ScrollUi {
    let scrollable = metrics.scroll_height - metrics.client_height;
    let progress = if scrollable > 0.0 {
        (metrics.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    ScrollUi {
        progress,
        show_back_to_top: metrics.scroll_top > BACK_TO_TOP_THRESHOLD,
    }
}

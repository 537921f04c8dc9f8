pub const DEFAULT_THRESHOLD: f64 = 50.0;

pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Toggle the `scrolled` class and let the stylesheet do the rest.
    Class,
    /// Write shadow and background inline.
    Inline,
}

pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Inline `(property, value)` pairs for the header in either state.
pub fn inline_styles(scrolled: bool) -> [(&'static str, &'static str); 2] {
    if scrolled {
        [
            ("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.1)"),
            ("background", "rgba(255, 255, 255, 0.98)"),
        ]
    } else {
        [
            ("box-shadow", "0 1px 3px rgba(0, 0, 0, 0.1)"),
            ("background", "#FFFFFF"),
        ]
    }
}

/// Hero offset for the slow parallax drift.
pub fn parallax_transform(scroll_y: f64, factor: f64) -> String {
    format!("translateY({}px)", scroll_y * factor)
}

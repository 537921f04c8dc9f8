//! In-page `#fragment` links that scroll smoothly below the fixed header.

use serde::Deserialize;

pub const DEFAULT_HEADER_OFFSET: f64 = 100.0;

/// What to do when a `#fragment` link names an id that isn't on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAnchor {
    /// Let the browser handle the click as usual.
    Follow,
    /// Cancel navigation anyway.
    Suppress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorOutcome {
    /// Not an in-page link; leave the click alone.
    Ignore,
    /// Cancel navigation and smooth-scroll to this document offset.
    ScrollTo(f64),
    /// Cancel navigation without scrolling.
    Suppress,
}

impl AnchorOutcome {
    pub fn prevents_default(self) -> bool {
        !matches!(self, AnchorOutcome::Ignore)
    }
}

/// Fragment id of an in-page link; `None` for bare `#` and other hrefs.
pub fn fragment_id(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorScroll {
    pub header_offset: f64,
    pub missing: MissingAnchor,
}

impl AnchorScroll {
    /// Decides a click on a link whose target (if any) sits at `target_top`.
    pub fn resolve(&self, href: Option<&str>, target_top: Option<f64>) -> AnchorOutcome {
        if href.and_then(fragment_id).is_none() {
            return AnchorOutcome::Ignore;
        }
        match (target_top, self.missing) {
            (Some(top), _) => AnchorOutcome::ScrollTo(top - self.header_offset),
            (None, MissingAnchor::Suppress) => AnchorOutcome::Suppress,
            (None, MissingAnchor::Follow) => AnchorOutcome::Ignore,
        }
    }
}

impl Default for AnchorScroll {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            missing: MissingAnchor::Follow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#pricing"), Some("pricing"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("about.html#team"), None);
        assert_eq!(fragment_id(""), None);
    }

    #[test]
    fn test_scrolls_below_header() {
        let scroll = AnchorScroll::default();
        let outcome = scroll.resolve(Some("#pricing"), Some(1400.0));
        assert_eq!(outcome, AnchorOutcome::ScrollTo(1300.0));
        assert!(outcome.prevents_default());
    }

    #[test]
    fn test_bare_hash_is_ignored() {
        let scroll = AnchorScroll {
            header_offset: DEFAULT_HEADER_OFFSET,
            missing: MissingAnchor::Suppress,
        };
        assert_eq!(scroll.resolve(Some("#"), None), AnchorOutcome::Ignore);
        assert_eq!(scroll.resolve(None, None), AnchorOutcome::Ignore);
    }

    #[test]
    fn test_missing_target_policies() {
        let suppress = AnchorScroll {
            header_offset: DEFAULT_HEADER_OFFSET,
            missing: MissingAnchor::Suppress,
        };
        let outcome = suppress.resolve(Some("#missing"), None);
        assert_eq!(outcome, AnchorOutcome::Suppress);
        assert!(outcome.prevents_default());

        let follow = AnchorScroll::default();
        let outcome = follow.resolve(Some("#missing"), None);
        assert_eq!(outcome, AnchorOutcome::Ignore);
        assert!(!outcome.prevents_default());
    }
}

//! Current-page detection for nav highlighting and home-only effects.

use serde::Deserialize;

/// Route key every root-like path normalizes to.
pub const HOME_ROUTE: &str = "index";

/// Page name assumed when the raw path ends without a file segment.
pub const HOME_PAGE: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMatching {
    /// Compare normalized route keys (`/About.html?x` and `about` match).
    Normalized,
    /// Compare the raw last path segment with the link's literal href.
    Literal,
}

/// Reduces a path or href to its route key.
///
/// Query and fragment are dropped, only the last non-empty segment is kept,
/// a trailing `.html` is stripped and the result is lowercased. Root paths
/// become [`HOME_ROUTE`]. An empty input, or a segment that is nothing but
/// `.html`, yields `None` so such links never match anything.
pub fn normalize_route(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let clean = value
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    if clean.is_empty() || clean == "/" {
        return Some(HOME_ROUTE.to_string());
    }

    let last = clean
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or(HOME_ROUTE);
    let route = strip_html_suffix(last);
    if route.is_empty() {
        return None;
    }
    Some(route.to_lowercase())
}

fn strip_html_suffix(segment: &str) -> &str {
    let len = segment.len();
    if len >= 5
        && segment.is_char_boundary(len - 5)
        && segment[len - 5..].eq_ignore_ascii_case(".html")
    {
        &segment[..len - 5]
    } else {
        segment
    }
}

/// Raw last path segment, defaulting to [`HOME_PAGE`].
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => HOME_PAGE,
    }
}

/// The page the browser is on, resolved once at boot.
#[derive(Debug, Clone)]
pub struct ActiveRoute {
    matching: RouteMatching,
    pathname: String,
    key: Option<String>,
}

impl ActiveRoute {
    pub fn new(matching: RouteMatching, pathname: &str) -> Self {
        let key = match matching {
            RouteMatching::Normalized => normalize_route(pathname),
            RouteMatching::Literal => Some(current_page(pathname).to_string()),
        };
        Self {
            matching,
            pathname: pathname.to_string(),
            key,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether a nav link with this `href` attribute points at the current page.
    pub fn is_active(&self, href: Option<&str>) -> bool {
        let Some(href) = href else {
            return false;
        };
        match self.matching {
            RouteMatching::Normalized => {
                normalize_route(href)
                    .is_some_and(|route| self.key.as_deref() == Some(route.as_str()))
            }
            RouteMatching::Literal => self.key.as_deref() == Some(href),
        }
    }

    pub fn is_home(&self) -> bool {
        match self.matching {
            RouteMatching::Normalized => self.key.as_deref() == Some(HOME_ROUTE),
            RouteMatching::Literal => {
                self.key.as_deref() == Some(HOME_PAGE)
                    || self.pathname == "/"
                    || self.pathname.ends_with('/')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_root_is_home() {
        assert_eq!(normalize_route("/").as_deref(), Some("index"));
        assert_eq!(normalize_route("?ref=ad").as_deref(), Some("index"));
        assert_eq!(normalize_route("//").as_deref(), Some("index"));
    }

    #[test]
    fn test_normalize_strips_suffix_and_query() {
        assert_eq!(normalize_route("/about.html").as_deref(), Some("about"));
        assert_eq!(
            normalize_route("/services/plans.html?x=1#y").as_deref(),
            Some("plans")
        );
        assert_eq!(normalize_route("Contact.HTML").as_deref(), Some("contact"));
        assert_eq!(normalize_route("/blog/").as_deref(), Some("blog"));
    }

    #[test]
    fn test_normalize_empty_href_never_matches() {
        assert_eq!(normalize_route(""), None);
        let route = ActiveRoute::new(RouteMatching::Normalized, "/");
        assert!(!route.is_active(Some("")));
        assert!(!route.is_active(None));
    }

    #[test]
    fn test_bare_html_suffix_has_no_route() {
        assert_eq!(normalize_route("/.html"), None);
        assert_eq!(normalize_route(".HTML?x=1"), None);
        let route = ActiveRoute::new(RouteMatching::Normalized, "/.html");
        assert_eq!(route.key(), None);
        assert!(!route.is_active(Some(".html")));
    }

    #[test]
    fn test_normalized_matching() {
        let route = ActiveRoute::new(RouteMatching::Normalized, "/site/About.html");
        assert!(route.is_active(Some("about.html")));
        assert!(route.is_active(Some("/about?tab=team")));
        assert!(!route.is_active(Some("services.html")));
        assert!(!route.is_home());

        let home = ActiveRoute::new(RouteMatching::Normalized, "/index.html");
        assert!(home.is_home());
        assert!(home.is_active(Some("/")));
    }

    #[test]
    fn test_literal_matching_is_verbatim() {
        let route = ActiveRoute::new(RouteMatching::Literal, "/site/about.html");
        assert_eq!(route.key(), Some("about.html"));
        assert!(route.is_active(Some("about.html")));
        assert!(!route.is_active(Some("About.html")));
        assert!(!route.is_active(Some("about.html?x=1")));
        assert!(!route.is_home());
    }

    #[test]
    fn test_literal_home_detection() {
        assert!(ActiveRoute::new(RouteMatching::Literal, "/").is_home());
        assert!(ActiveRoute::new(RouteMatching::Literal, "/shop/").is_home());
        assert!(ActiveRoute::new(RouteMatching::Literal, "/index.html").is_home());
        assert!(ActiveRoute::new(RouteMatching::Literal, "/").is_active(Some("index.html")));
        assert!(!ActiveRoute::new(RouteMatching::Literal, "/faq.html").is_home());
    }

    proptest! {
        #[test]
        fn normalized_key_ignores_query_and_fragment(
            page in "[a-z]{1,12}",
            query in "[a-z0-9=&]{0,10}",
            fragment in "[a-z]{0,8}",
        ) {
            let plain = normalize_route(&format!("/{page}.html"));
            let noisy = normalize_route(&format!("/{page}.html?{query}#{fragment}"));
            prop_assert_eq!(plain, noisy);
        }
    }
}

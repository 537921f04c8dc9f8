//! Per-site configuration.
//!
//! Each deployment picks a [`Preset`] and may override individual knobs.
//! Sources, highest precedence first:
//! 1. JSON in `<script type="application/json" id="site-fx-config">`
//! 2. the global `window.SITE_FX_CONFIG` object
//! 3. `data-fx-preset` on `<body>` (preset only)
//! 4. [`Preset::Sidebar`]

use log::{debug, warn};
use serde::Deserialize;

use crate::anchor::{AnchorScroll, MissingAnchor, DEFAULT_HEADER_OFFSET};
use crate::contact::{WhatsAppLink, DEFAULT_WHATSAPP_NUMBER};
use crate::counter;
use crate::error::{FxError, Result};
use crate::header::{self, HeaderStyle};
use crate::hover::HoverEffect;
use crate::reveal::{RevealConfig, RevealMode};
use crate::route::RouteMatching;

pub const CONFIG_SCRIPT_ID: &str = "site-fx-config";
pub const CONFIG_GLOBAL: &str = "SITE_FX_CONFIG";
pub const PRESET_ATTRIBUTE: &str = "data-fx-preset";

pub const NAV_LINK_SELECTOR: &str = ".nav-link";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Class-driven header and reveal, stat counters, off-canvas sidebar,
    /// WhatsApp popup, normalized route matching.
    #[default]
    Sidebar,
    /// Inline-style header and fade transitions, eager card hover, literal
    /// route matching, no menu.
    Inline,
    /// Class-driven reveal with step hover and a dropdown nav toggled by
    /// inline styles.
    Dropdown,
    /// Like `Sidebar`, but literal route matching and a trimmed WhatsApp
    /// message.
    SidebarLiteral,
}

impl Preset {
    pub fn parse(name: &str) -> Result<Self> {
        serde_json::from_value(serde_json::Value::String(name.trim().to_string()))
            .map_err(|_| FxError::ConfigValue(format!("unknown preset `{}`", name)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    pub steps: u32,
    pub interval_ms: u32,
    pub numeral_selector: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypingConfig {
    pub selector: String,
    pub interval_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuConfig {
    /// Off-canvas sidebar with overlay, wired by element ids.
    Sidebar,
    /// Button that toggles the nav-links container inline.
    Dropdown {
        button_selector: String,
        links_selector: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxConfig {
    pub selector: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconFloatConfig {
    pub selector: String,
    pub step_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub preset: Preset,
    pub header_style: HeaderStyle,
    pub header_threshold: f64,
    pub reveal: RevealConfig,
    /// Cards also get `animation-delay: index * step` in transition mode.
    pub card_delay_step_secs: Option<f64>,
    pub counter: Option<CounterConfig>,
    pub hover: HoverEffect,
    pub step_hover: bool,
    pub menu: Option<MenuConfig>,
    pub anchors: AnchorScroll,
    pub typing: Option<TypingConfig>,
    pub contact: Option<WhatsAppLink>,
    pub route_matching: RouteMatching,
    pub parallax: Option<ParallaxConfig>,
    pub icon_float: Option<IconFloatConfig>,
}

impl SiteConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Sidebar => Self::sidebar(preset),
            Preset::SidebarLiteral => Self {
                route_matching: RouteMatching::Literal,
                typing: Some(TypingConfig {
                    selector: ".hero-text h1".to_string(),
                    interval_ms: 30,
                }),
                contact: Some(WhatsAppLink::new(DEFAULT_WHATSAPP_NUMBER, true)),
                ..Self::sidebar(preset)
            },
            Preset::Inline => Self {
                preset,
                header_style: HeaderStyle::Inline,
                header_threshold: header::DEFAULT_THRESHOLD,
                reveal: RevealConfig {
                    mode: RevealMode::Transition,
                    stagger_unit_ms: 0,
                    hover_on_reveal: false,
                    ..RevealConfig::default()
                },
                card_delay_step_secs: Some(0.1),
                counter: None,
                hover: HoverEffect {
                    lift_px: 10.0,
                    scale: None,
                    scale_icon: false,
                    guard_viewport_top: true,
                },
                step_hover: false,
                menu: None,
                anchors: AnchorScroll {
                    header_offset: DEFAULT_HEADER_OFFSET,
                    missing: MissingAnchor::Suppress,
                },
                typing: None,
                contact: None,
                route_matching: RouteMatching::Literal,
                parallax: None,
                icon_float: Some(IconFloatConfig {
                    selector: ".feature-icon".to_string(),
                    step_secs: 0.2,
                }),
            },
            Preset::Dropdown => Self {
                preset,
                header_style: HeaderStyle::Class,
                header_threshold: header::DEFAULT_THRESHOLD,
                reveal: RevealConfig::default(),
                card_delay_step_secs: None,
                counter: None,
                hover: HoverEffect {
                    lift_px: 10.0,
                    scale: None,
                    scale_icon: true,
                    guard_viewport_top: true,
                },
                step_hover: true,
                menu: Some(MenuConfig::Dropdown {
                    button_selector: ".mobile-menu-btn".to_string(),
                    links_selector: ".nav-links".to_string(),
                }),
                anchors: AnchorScroll {
                    header_offset: DEFAULT_HEADER_OFFSET,
                    missing: MissingAnchor::Suppress,
                },
                typing: None,
                contact: None,
                route_matching: RouteMatching::Literal,
                parallax: Some(ParallaxConfig {
                    selector: ".hero, .page-hero".to_string(),
                    factor: 0.05,
                }),
                icon_float: Some(IconFloatConfig {
                    selector: ".feature-icon".to_string(),
                    step_secs: 0.2,
                }),
            },
        }
    }

    fn sidebar(preset: Preset) -> Self {
        Self {
            preset,
            header_style: HeaderStyle::Class,
            header_threshold: header::DEFAULT_THRESHOLD,
            reveal: RevealConfig::default(),
            card_delay_step_secs: None,
            counter: Some(CounterConfig {
                steps: counter::DEFAULT_STEPS,
                interval_ms: counter::DEFAULT_INTERVAL_MS,
                numeral_selector: "h3".to_string(),
            }),
            hover: HoverEffect {
                lift_px: 12.0,
                scale: Some(1.02),
                scale_icon: false,
                guard_viewport_top: false,
            },
            step_hover: false,
            menu: Some(MenuConfig::Sidebar),
            anchors: AnchorScroll::default(),
            typing: Some(TypingConfig {
                selector: ".hero-left .hero-title".to_string(),
                interval_ms: 30,
            }),
            contact: Some(WhatsAppLink::default()),
            route_matching: RouteMatching::Normalized,
            parallax: Some(ParallaxConfig {
                selector: ".hero".to_string(),
                factor: 0.05,
            }),
            icon_float: Some(IconFloatConfig {
                selector: ".service-icon".to_string(),
                step_secs: 0.2,
            }),
        }
    }

    /// Merges the page's sources, lowest precedence first: the preset named
    /// by the body attribute, the global object, then the script tag. A
    /// source that fails to parse or validate is logged and skipped.
    pub fn resolve(
        preset_attr: Option<&str>,
        global: Result<Option<ConfigOverrides>>,
        script: Result<Option<ConfigOverrides>>,
    ) -> Self {
        let preset = match preset_attr {
            Some(name) => Preset::parse(name).unwrap_or_else(|err| {
                warn!("{}, using default preset", err);
                Preset::default()
            }),
            None => Preset::default(),
        };
        let mut config = Self::from_preset(preset);

        for (source, overrides) in [(CONFIG_GLOBAL, global), (CONFIG_SCRIPT_ID, script)] {
            match overrides.and_then(|o| o.map(|o| config.clone().with_overrides(o)).transpose()) {
                Ok(Some(updated)) => {
                    debug!("Applied config overrides from {}", source);
                    config = updated;
                }
                Ok(None) => {}
                Err(err) => warn!("Ignoring config from {}: {}", source, err),
            }
        }
        config
    }

    /// Applies overrides on top of the overrides' preset (or `self`'s).
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Result<Self> {
        overrides.validate()?;
        let mut config = match overrides.preset {
            Some(preset) if preset != self.preset => Self::from_preset(preset),
            _ => self,
        };

        if let Some(threshold) = overrides.header_threshold {
            config.header_threshold = threshold;
        }
        if let Some(threshold) = overrides.reveal_threshold {
            config.reveal.threshold = threshold;
        }
        if let Some(margin) = overrides.root_margin {
            config.reveal.root_margin = margin;
        }
        if let Some(unit) = overrides.stagger_unit_ms {
            config.reveal.stagger_unit_ms = unit;
        }
        if let Some(counter) = config.counter.as_mut() {
            if let Some(steps) = overrides.counter_steps {
                counter.steps = steps;
            }
            if let Some(interval) = overrides.counter_interval_ms {
                counter.interval_ms = interval;
            }
        }
        if let (Some(typing), Some(interval)) =
            (config.typing.as_mut(), overrides.typing_interval_ms)
        {
            typing.interval_ms = interval;
        }
        if let Some(offset) = overrides.anchor_offset {
            config.anchors.header_offset = offset;
        }
        if let Some(missing) = overrides.missing_anchor {
            config.anchors.missing = missing;
        }
        if let Some(matching) = overrides.route_matching {
            config.route_matching = matching;
        }
        if let Some(contact) = config.contact.as_mut() {
            let trim = overrides.trim_message.unwrap_or(contact.trims_message());
            let number = overrides
                .whatsapp_number
                .unwrap_or_else(|| contact.number().to_string());
            *contact = WhatsAppLink::new(number, trim);
        }
        Ok(config)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

/// Deployment overrides as written in the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub preset: Option<Preset>,
    pub whatsapp_number: Option<String>,
    pub trim_message: Option<bool>,
    pub header_threshold: Option<f64>,
    pub reveal_threshold: Option<f64>,
    pub root_margin: Option<String>,
    pub stagger_unit_ms: Option<u32>,
    pub counter_steps: Option<u32>,
    pub counter_interval_ms: Option<u32>,
    pub typing_interval_ms: Option<u32>,
    pub anchor_offset: Option<f64>,
    pub missing_anchor: Option<MissingAnchor>,
    pub route_matching: Option<RouteMatching>,
}

impl ConfigOverrides {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<()> {
        if let Some(number) = &self.whatsapp_number {
            if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(FxError::ConfigValue(format!(
                    "whatsapp_number must be digits only, got `{}`",
                    number
                )));
            }
        }
        if let Some(threshold) = self.reveal_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(FxError::ConfigValue(format!(
                    "reveal_threshold must be within 0..=1, got {}",
                    threshold
                )));
            }
        }
        if self.counter_steps == Some(0) {
            return Err(FxError::ConfigValue("counter_steps must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sidebar() {
        let config = SiteConfig::default();
        assert_eq!(config.preset, Preset::Sidebar);
        assert_eq!(config.header_threshold, 50.0);
        assert_eq!(config.reveal.root_margin, "0px 0px -100px 0px");
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.menu, Some(MenuConfig::Sidebar));
        assert_eq!(config.route_matching, RouteMatching::Normalized);
        assert_eq!(config.anchors.missing, MissingAnchor::Follow);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(Preset::parse("inline").unwrap(), Preset::Inline);
        assert_eq!(Preset::parse(" sidebar-literal ").unwrap(), Preset::SidebarLiteral);
        assert!(matches!(Preset::parse("fancy"), Err(FxError::ConfigValue(_))));
    }

    #[test]
    fn test_presets_differ_where_sites_differ() {
        let inline = SiteConfig::from_preset(Preset::Inline);
        assert_eq!(inline.header_style, HeaderStyle::Inline);
        assert_eq!(inline.reveal.mode, RevealMode::Transition);
        assert!(inline.contact.is_none());
        assert!(inline.menu.is_none());

        let dropdown = SiteConfig::from_preset(Preset::Dropdown);
        assert!(matches!(dropdown.menu, Some(MenuConfig::Dropdown { .. })));
        assert!(dropdown.step_hover);

        let literal = SiteConfig::from_preset(Preset::SidebarLiteral);
        assert_eq!(literal.route_matching, RouteMatching::Literal);
        assert_eq!(
            literal.contact.map(|c| c.href(" hi ")).as_deref(),
            Some("https://wa.me/919876543210?text=hi")
        );
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides = ConfigOverrides::from_json(
            r#"{"preset": "dropdown", "anchor_offset": 80, "missing_anchor": "follow"}"#,
        )
        .unwrap();
        let config = SiteConfig::default().with_overrides(overrides).unwrap();
        assert_eq!(config.preset, Preset::Dropdown);
        assert_eq!(config.anchors.header_offset, 80.0);
        assert_eq!(config.anchors.missing, MissingAnchor::Follow);
    }

    #[test]
    fn test_whatsapp_number_override() {
        let overrides = ConfigOverrides {
            whatsapp_number: Some("4915112345678".to_string()),
            ..ConfigOverrides::default()
        };
        let config = SiteConfig::default().with_overrides(overrides).unwrap();
        assert_eq!(
            config.contact.unwrap().href("Hi there"),
            "https://wa.me/4915112345678?text=Hi%20there"
        );
    }

    #[test]
    fn test_counter_overrides_only_touch_counter_presets() {
        let overrides = ConfigOverrides {
            counter_steps: Some(20),
            ..ConfigOverrides::default()
        };
        let config = SiteConfig::from_preset(Preset::Inline)
            .with_overrides(overrides)
            .unwrap();
        assert!(config.counter.is_none());
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert!(matches!(
            ConfigOverrides::from_json(r#"{"colour": "red"}"#),
            Err(FxError::Config(_))
        ));

        let bad_number = ConfigOverrides {
            whatsapp_number: Some("+1 555".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(SiteConfig::default().with_overrides(bad_number).is_err());

        let bad_threshold = ConfigOverrides {
            reveal_threshold: Some(1.5),
            ..ConfigOverrides::default()
        };
        assert!(SiteConfig::default().with_overrides(bad_threshold).is_err());
    }

    fn overrides(json: &str) -> Result<Option<ConfigOverrides>> {
        ConfigOverrides::from_json(json).map(Some)
    }

    #[test]
    fn test_resolve_without_sources_is_default() {
        assert_eq!(SiteConfig::resolve(None, Ok(None), Ok(None)), SiteConfig::default());
    }

    #[test]
    fn test_resolve_body_attribute_beats_default() {
        let config = SiteConfig::resolve(Some("inline"), Ok(None), Ok(None));
        assert_eq!(config, SiteConfig::from_preset(Preset::Inline));

        let unknown = SiteConfig::resolve(Some("fancy"), Ok(None), Ok(None));
        assert_eq!(unknown.preset, Preset::Sidebar);
    }

    #[test]
    fn test_resolve_global_beats_body_attribute() {
        let config = SiteConfig::resolve(
            Some("inline"),
            overrides(r#"{"preset": "dropdown"}"#),
            Ok(None),
        );
        assert_eq!(config.preset, Preset::Dropdown);
    }

    #[test]
    fn test_resolve_script_beats_global() {
        let config = SiteConfig::resolve(
            None,
            overrides(r#"{"anchor_offset": 80, "whatsapp_number": "111"}"#),
            overrides(r#"{"anchor_offset": 60}"#),
        );
        assert_eq!(config.anchors.header_offset, 60.0);
        assert_eq!(config.contact.map(|c| c.number().to_string()).as_deref(), Some("111"));
    }

    #[test]
    fn test_resolve_new_preset_rebuilds_from_that_preset() {
        let switched = SiteConfig::resolve(
            None,
            overrides(r#"{"anchor_offset": 80}"#),
            overrides(r#"{"preset": "inline"}"#),
        );
        assert_eq!(switched, SiteConfig::from_preset(Preset::Inline));

        let same = SiteConfig::resolve(
            None,
            overrides(r#"{"anchor_offset": 80}"#),
            overrides(r#"{"preset": "sidebar"}"#),
        );
        assert_eq!(same.anchors.header_offset, 80.0);
    }

    #[test]
    fn test_resolve_skips_broken_sources() {
        let config = SiteConfig::resolve(
            Some("dropdown"),
            Err(FxError::ConfigValue("not an object".to_string())),
            overrides(r#"{"anchor_offset": 60}"#),
        );
        assert_eq!(config.preset, Preset::Dropdown);
        assert_eq!(config.anchors.header_offset, 60.0);

        let config = SiteConfig::resolve(
            None,
            overrides(r#"{"anchor_offset": 80}"#),
            overrides(r#"{"whatsapp_number": "+1 555"}"#),
        );
        assert_eq!(config.anchors.header_offset, 80.0);
        assert_eq!(
            config.contact.map(|c| c.number().to_string()).as_deref(),
            Some(DEFAULT_WHATSAPP_NUMBER)
        );
    }
}

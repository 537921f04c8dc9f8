//! Scroll-reveal dispatch.
//!
//! The DOM layer registers elements once at load and forwards every
//! intersection to [`RevealController::on_intersect`]. The controller owns
//! the one-shot bookkeeping and answers with the [`RevealAction`]s to carry
//! out, so repeated intersections never re-run an animation, restart a
//! counter or stack hover listeners.

use std::collections::HashMap;

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const DEFAULT_STAGGER_UNIT_MS: u32 = 100;
pub const DEFAULT_STAGGER_CYCLE: usize = 5;

/// Marks an element as waiting for its entrance; the stylesheet hides it.
pub const PENDING_CLASS: &str = "animate-on-scroll";

/// Class added once an element has been revealed.
pub const ANIMATED_CLASS: &str = "animated";

/// CSS time for the `index`-th element of a stagger of `step_secs`.
pub fn stagger_secs(index: usize, step_secs: f64) -> String {
    let secs = (index as f64 * step_secs * 1000.0).round() / 1000.0;
    format!("{}s", secs)
}

/// Entrance animation. Keyframes come from the site stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealVariant {
    #[default]
    FadeUp,
    FadeLeft,
    FadeRight,
    ScaleIn,
}

impl RevealVariant {
    pub const ALL: [RevealVariant; 4] = [
        RevealVariant::FadeUp,
        RevealVariant::FadeLeft,
        RevealVariant::FadeRight,
        RevealVariant::ScaleIn,
    ];

    /// Marker class used in markup to declare the variant.
    pub fn class(self) -> &'static str {
        match self {
            RevealVariant::FadeUp => "fade-in-up",
            RevealVariant::FadeLeft => "fade-in-left",
            RevealVariant::FadeRight => "fade-in-right",
            RevealVariant::ScaleIn => "scale-in",
        }
    }

    pub fn keyframes(self) -> &'static str {
        match self {
            RevealVariant::FadeUp => "fadeInUp",
            RevealVariant::FadeLeft => "fadeInLeft",
            RevealVariant::FadeRight => "fadeInRight",
            RevealVariant::ScaleIn => "scaleIn",
        }
    }

    /// Value for the CSS `animation` property.
    pub fn animation(self) -> String {
        let duration = match self {
            RevealVariant::ScaleIn => "0.6s",
            _ => "0.8s",
        };
        format!("{} {} ease-out forwards", self.keyframes(), duration)
    }

    /// Variant declared by a marker class, if the markup carries one.
    pub fn declared<'a>(mut classes: impl Iterator<Item = &'a str>) -> Option<Self> {
        classes.find_map(|class| Self::ALL.into_iter().find(|v| v.class() == class))
    }
}

/// How revealed elements are animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Add [`ANIMATED_CLASS`] and a keyframe `animation` after the stagger delay.
    Keyframes,
    /// Start hidden with inline styles and transition to visible.
    Transition,
}

/// Inline styles applied at registration in [`RevealMode::Transition`].
pub const TRANSITION_HIDDEN: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "opacity 0.8s ease, transform 0.8s ease"),
];

/// Inline styles applied on reveal in [`RevealMode::Transition`].
pub const TRANSITION_SHOWN: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(u32);

/// What an element takes part in, decided at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registration {
    /// Entrance animation and its stagger slot.
    pub reveal: Option<(RevealVariant, usize)>,
    /// Statistic item whose numeral counts up.
    pub counter: bool,
    /// Feature/service card that lifts on hover.
    pub card: bool,
    /// Process step whose number scales on hover.
    pub step: bool,
}

/// Classes that put an element in the staggered reveal group.
pub const GROUP_CLASSES: [&str; 5] = [
    "content-block",
    "feature-card",
    "service-card",
    "step",
    "position-card",
];
pub const SECTION_HEADER_CLASS: &str = "section-header";
pub const STAT_CLASS: &str = "stat-item";
pub const CARD_CLASSES: [&str; 2] = ["feature-card", "service-card"];
pub const STEP_CLASS: &str = "step";

/// Every element the reveal pass inspects, in one document-order query.
pub const OBSERVED_SELECTOR: &str = ".content-block, .feature-card, .service-card, .step, \
     .position-card, .section-header, .stat-item";

/// An element's registration plus any inline `animation-delay` it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub registration: Registration,
    pub animation_delay: Option<String>,
}

/// Turns class lists into registrations. Feed it elements in document
/// order: group members are numbered as they are seen.
#[derive(Debug, Clone)]
pub struct Classifier {
    reveal: RevealConfig,
    counters: bool,
    step_hover: bool,
    card_delay_step_secs: Option<f64>,
    group_position: usize,
}

impl Classifier {
    pub fn new(
        config: &RevealConfig,
        counters: bool,
        step_hover: bool,
        card_delay_step_secs: Option<f64>,
    ) -> Self {
        Self {
            reveal: config.clone(),
            counters,
            step_hover,
            card_delay_step_secs,
            group_position: 0,
        }
    }

    /// `None` when the element plays no part under this configuration.
    pub fn classify(&mut self, classes: &[&str]) -> Option<Classified> {
        let has = |class: &str| classes.iter().any(|c| *c == class);
        let declared = RevealVariant::declared(classes.iter().copied());
        let card = CARD_CLASSES.iter().any(|class| has(class));
        let stat = self.counters && has(STAT_CLASS);

        let mut animation_delay = None;
        let reveal = if GROUP_CLASSES.iter().any(|class| has(class)) {
            let position = self.group_position;
            self.group_position += 1;
            if card && self.reveal.mode == RevealMode::Transition {
                animation_delay = self
                    .card_delay_step_secs
                    .map(|step| stagger_secs(position, step));
            }
            let index = self.reveal.stagger_index(position);
            Some((declared.unwrap_or(RevealVariant::FadeUp), index))
        } else if has(SECTION_HEADER_CLASS) && self.reveal.mode == RevealMode::Keyframes {
            Some((declared.unwrap_or(RevealVariant::ScaleIn), 0))
        } else if stat {
            Some((declared.unwrap_or_default(), 0))
        } else {
            None
        };

        let registration = Registration {
            reveal,
            counter: stat,
            card,
            step: self.step_hover && has(STEP_CLASS),
        };
        if registration == Registration::default() {
            return None;
        }
        Some(Classified {
            registration,
            animation_delay,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Once {
    Pending,
    Done,
}

impl Once {
    fn take(slot: &mut Option<Once>) -> bool {
        match slot {
            Some(Once::Pending) => {
                *slot = Some(Once::Done);
                true
            }
            _ => false,
        }
    }
}

/// Per-element guard state. `None` means the element doesn't take part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementState {
    pub reveal: Option<Once>,
    pub counter: Option<Once>,
    pub hover: Option<Once>,
    pub step_hover: Option<Once>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    Reveal { variant: RevealVariant, delay_ms: u32 },
    StartCounter,
    BindCardHover,
    BindStepHover,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    pub mode: RevealMode,
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_unit_ms: u32,
    pub stagger_cycle: usize,
    /// Bind card hover on first reveal rather than eagerly at load.
    pub hover_on_reveal: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            mode: RevealMode::Keyframes,
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            stagger_unit_ms: DEFAULT_STAGGER_UNIT_MS,
            stagger_cycle: DEFAULT_STAGGER_CYCLE,
            hover_on_reveal: true,
        }
    }
}

impl RevealConfig {
    /// Stagger slot for the `position`-th element of a group.
    pub fn stagger_index(&self, position: usize) -> usize {
        position % self.stagger_cycle.max(1)
    }

    pub fn delay_ms(&self, stagger_index: usize) -> u32 {
        self.stagger_unit_ms.saturating_mul(stagger_index as u32)
    }
}

#[derive(Debug)]
struct Tracked {
    registration: Registration,
    state: ElementState,
}

#[derive(Debug, Default)]
pub struct RevealController {
    config: RevealConfig,
    elements: HashMap<ElementKey, Tracked>,
    next_key: u32,
}

impl RevealController {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            elements: HashMap::new(),
            next_key: 0,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn register(&mut self, registration: Registration) -> ElementKey {
        let key = ElementKey(self.next_key);
        self.next_key += 1;

        let pending = |on: bool| on.then_some(Once::Pending);
        let state = ElementState {
            reveal: pending(registration.reveal.is_some()),
            counter: pending(registration.counter),
            hover: pending(registration.card && self.config.hover_on_reveal),
            step_hover: pending(registration.step && self.config.hover_on_reveal),
        };
        self.elements.insert(key, Tracked { registration, state });
        key
    }

    pub fn state(&self, key: ElementKey) -> Option<&ElementState> {
        self.elements.get(&key).map(|tracked| &tracked.state)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Actions for an element entering the viewport. Each one is returned at
    /// most once per element over the page's lifetime.
    pub fn on_intersect(&mut self, key: ElementKey) -> Vec<RevealAction> {
        let mut actions = Vec::new();
        let Some(tracked) = self.elements.get_mut(&key) else {
            return actions;
        };
        let state = &mut tracked.state;

        if Once::take(&mut state.reveal) {
            if let Some((variant, index)) = tracked.registration.reveal {
                actions.push(RevealAction::Reveal {
                    variant,
                    delay_ms: self.config.delay_ms(index),
                });
            }
        }
        if Once::take(&mut state.counter) {
            actions.push(RevealAction::StartCounter);
        }
        if Once::take(&mut state.hover) {
            actions.push(RevealAction::BindCardHover);
        }
        if Once::take(&mut state.step_hover) {
            actions.push(RevealAction::BindStepHover);
        }
        actions
    }
}

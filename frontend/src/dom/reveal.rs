use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::{listen, set_styles, Page};
use crate::config::{CounterConfig, SiteConfig};
use crate::counter::{Counter, CounterFrame};
use crate::error::{FxError, Result};
use crate::hover::{step_number_transform, HoverEffect, ICON_SELECTOR, STEP_NUMBER_SELECTOR};
use crate::reveal::{
    stagger_secs, Classifier, ElementKey, Registration, RevealAction, RevealController,
    RevealMode, RevealVariant, ANIMATED_CLASS, CARD_CLASSES, OBSERVED_SELECTOR, PENDING_CLASS,
    STEP_CLASS, TRANSITION_HIDDEN, TRANSITION_SHOWN,
};

/// Registered elements and the controller deciding what each intersection does.
struct Revealer {
    controller: RevealController,
    elements: Vec<(Element, ElementKey)>,
}

impl Revealer {
    fn key_of(&self, target: &Element) -> Option<ElementKey> {
        self.elements
            .iter()
            .find(|(el, _)| el == target)
            .map(|(_, key)| *key)
    }
}

pub(crate) fn setup(page: &Page) -> Result<()> {
    let config = Rc::clone(&page.config);
    let mut classifier = Classifier::new(
        &config.reveal,
        config.counter.is_some(),
        config.step_hover,
        config.card_delay_step_secs,
    );
    let mut pending: Vec<(Element, Registration)> = Vec::new();

    for el in page.query_all(OBSERVED_SELECTOR)? {
        let class_name = el.class_name();
        let classes: Vec<&str> = class_name.split_whitespace().collect();
        let Some(classified) = classifier.classify(&classes) else {
            continue;
        };
        if let Some((variant, _)) = classified.registration.reveal {
            prepare(&el, &config, variant)?;
        }
        if let (Some(delay), Some(html)) =
            (&classified.animation_delay, el.dyn_ref::<HtmlElement>())
        {
            html.style().set_property("animation-delay", delay)?;
        }
        pending.push((el, classified.registration));
    }

    if !config.reveal.hover_on_reveal {
        bind_hover_eagerly(page)?;
    }

    if pending.is_empty() {
        debug!("No elements to reveal on this page");
        return Ok(());
    }

    let mut revealer = Revealer {
        controller: RevealController::new(config.reveal.clone()),
        elements: Vec::with_capacity(pending.len()),
    };
    for (el, registration) in pending {
        let key = revealer.controller.register(registration);
        revealer.elements.push((el, key));
    }
    let observed: Vec<Element> = revealer.elements.iter().map(|(el, _)| el.clone()).collect();
    let revealer = Rc::new(RefCell::new(revealer));

    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            let actions = {
                let mut revealer = revealer.borrow_mut();
                match revealer.key_of(&target) {
                    Some(key) => revealer.controller.on_intersect(key),
                    None => continue,
                }
            };
            for action in actions {
                if let Err(err) = dispatch(&config, &target, action) {
                    warn!("Reveal action {:?} failed: {}", action, err);
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(page.config.reveal.threshold));
    options.set_root_margin(&page.config.reveal.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for el in &observed {
        observer.observe(el);
    }
    callback.forget();
    debug!("Observing {} elements for reveal", observed.len());
    Ok(())
}

pub(crate) fn setup_icon_float(page: &Page) -> Result<()> {
    let Some(float) = page.config.icon_float.as_ref() else {
        return Ok(());
    };
    for (index, icon) in page.query_all_html(&float.selector)?.iter().enumerate() {
        icon.style()
            .set_property("animation-delay", &stagger_secs(index, float.step_secs))?;
    }
    Ok(())
}

/// Puts an element in its pre-reveal state.
fn prepare(el: &Element, config: &SiteConfig, variant: RevealVariant) -> Result<()> {
    match config.reveal.mode {
        RevealMode::Keyframes => el.class_list().add_2(PENDING_CLASS, variant.class())?,
        RevealMode::Transition => {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                set_styles(html, &TRANSITION_HIDDEN)?;
            }
        }
    }
    Ok(())
}

fn dispatch(config: &Rc<SiteConfig>, target: &Element, action: RevealAction) -> Result<()> {
    match action {
        RevealAction::Reveal { variant, delay_ms } => match config.reveal.mode {
            RevealMode::Keyframes => {
                let el = target.clone();
                Timeout::new(delay_ms, move || {
                    let result = el.class_list().add_1(ANIMATED_CLASS).and_then(|_| {
                        el.dyn_ref::<HtmlElement>().map_or(Ok(()), |html| {
                            html.style().set_property("animation", &variant.animation())
                        })
                    });
                    if let Err(err) = result {
                        warn!("Failed to reveal element: {}", FxError::from(err));
                    }
                })
                .forget();
            }
            RevealMode::Transition => {
                if let Some(html) = target.dyn_ref::<HtmlElement>() {
                    set_styles(html, &TRANSITION_SHOWN)?;
                }
            }
        },
        RevealAction::StartCounter => {
            if let Some(counter) = config.counter.as_ref() {
                if let Some(numeral) = target.query_selector(&counter.numeral_selector)? {
                    start_counter(numeral, counter);
                }
            }
        }
        RevealAction::BindCardHover => {
            if let Some(card) = target.dyn_ref::<HtmlElement>() {
                bind_card_hover(card, &config.hover)?;
            }
        }
        RevealAction::BindStepHover => {
            if let Some(step) = target.dyn_ref::<HtmlElement>() {
                bind_step_hover(step)?;
            }
        }
    }
    Ok(())
}

fn start_counter(numeral: Element, config: &CounterConfig) {
    let text = numeral.text_content().unwrap_or_default();
    let Some(mut counter) = Counter::from_text(&text, config.steps) else {
        debug!("Counter text `{}` is not a number, skipping", text.trim());
        return;
    };

    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let handle_clone = handle.clone();
    let interval = Interval::new(config.interval_ms, move || match counter.tick() {
        Some(CounterFrame::Step(value)) => {
            numeral.set_text_content(Some(&value.to_string()));
        }
        Some(CounterFrame::Finished(value)) => {
            numeral.set_text_content(Some(&value.to_string()));
            handle_clone.borrow_mut().take();
        }
        None => {}
    });
    *handle.borrow_mut() = Some(interval);
}

fn bind_hover_eagerly(page: &Page) -> Result<()> {
    let selector = CARD_CLASSES
        .iter()
        .map(|class| format!(".{}", class))
        .collect::<Vec<_>>()
        .join(", ");
    for card in page.query_all_html(&selector)? {
        bind_card_hover(&card, &page.config.hover)?;
    }
    if page.config.step_hover {
        for step in page.query_all_html(&format!(".{}", STEP_CLASS))? {
            bind_step_hover(&step)?;
        }
    }
    Ok(())
}

fn bind_card_hover(card: &HtmlElement, effect: &HoverEffect) -> Result<()> {
    let icon = if effect.scale_icon {
        card.query_selector(ICON_SELECTOR)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    } else {
        None
    };

    {
        let card_el = card.clone();
        let icon = icon.clone();
        let lift = effect.enter_transform();
        let icon_lift = effect.icon_transform(true);
        listen(card, "mouseenter", move |_| {
            set_transform(&card_el, &lift);
            if let (Some(icon), Some(transform)) = (&icon, icon_lift) {
                set_transform(icon, transform);
            }
        })?;
    }

    let card_el = card.clone();
    let effect = effect.clone();
    listen(card, "mouseleave", move |_| {
        let top = card_el.get_bounding_client_rect().top();
        let Some(reset) = effect.leave_transform(top) else {
            return;
        };
        set_transform(&card_el, reset);
        if let (Some(icon), Some(transform)) = (&icon, effect.icon_transform(false)) {
            set_transform(icon, transform);
        }
    })
}

fn bind_step_hover(step: &HtmlElement) -> Result<()> {
    for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
        let step_el = step.clone();
        listen(step, event, move |_| {
            let number = step_el
                .query_selector(STEP_NUMBER_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(number) = number {
                set_transform(&number, step_number_transform(hovered));
            }
        })?;
    }
    Ok(())
}

fn set_transform(el: &HtmlElement, transform: &str) {
    if let Err(err) = el.style().set_property("transform", transform) {
        warn!("Failed to set hover transform: {}", FxError::from(err));
    }
}

//! Browser wiring. Everything here runs once the document is parsed and
//! only binds listeners; the decisions live in the pure modules.

use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::config::{
    ConfigOverrides, SiteConfig, CONFIG_GLOBAL, CONFIG_SCRIPT_ID, PRESET_ATTRIBUTE,
};
use crate::error::{FxError, Result};
use crate::route::ActiveRoute;

mod header;
mod menu;
mod nav;
mod reveal;

/// Entry point: runs now if the DOM is ready, otherwise on `DOMContentLoaded`.
pub fn boot() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("No document available, page interactions disabled");
        return;
    };

    if document.ready_state() == "loading" {
        let mut started = false;
        let result = listen(&document, "DOMContentLoaded", move |_| {
            if !started {
                started = true;
                init();
            }
        });
        if let Err(err) = result {
            warn!("Could not wait for DOMContentLoaded: {}", err);
        }
    } else {
        init();
    }
}

fn init() {
    let Some(page) = Page::detect() else {
        warn!("Document has no body, page interactions disabled");
        return;
    };
    info!(
        "Starting page interactions (preset {:?}, route {:?})",
        page.config.preset,
        page.route.key()
    );

    run("header", header::setup(&page));
    run("parallax", header::setup_parallax(&page));
    run("reveal", reveal::setup(&page));
    run("icon float", reveal::setup_icon_float(&page));
    run("menu", menu::setup(&page));
    run("contact popup", menu::setup_contact(&page));
    run("anchors", nav::setup_anchors(&page));
    run("active nav", nav::mark_active_links(&page));
    run("typing", nav::setup_typing(&page));
}

fn run(feature: &str, result: Result<()>) {
    if let Err(err) = result {
        warn!("{} setup failed: {}", feature, err);
    }
}

pub(crate) struct Page {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub config: Rc<SiteConfig>,
    pub route: ActiveRoute,
}

impl Page {
    fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let body = document.body()?;
        let config = load_config(&window, &document, &body);
        let pathname = window.location().pathname().unwrap_or_else(|_| "/".to_string());
        let route = ActiveRoute::new(config.route_matching, &pathname);

        Some(Self {
            window,
            document,
            body,
            config: Rc::new(config),
            route,
        })
    }

    pub fn by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        self.document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
        let list = self.document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    pub fn query_all_html(&self, selector: &str) -> Result<Vec<HtmlElement>> {
        Ok(self
            .query_all(selector)?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect())
    }
}

/// Adds a listener that lives as long as the page.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub(crate) fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) -> Result<()> {
    let style = el.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn load_config(window: &Window, document: &Document, body: &HtmlElement) -> SiteConfig {
    SiteConfig::resolve(
        body.get_attribute(PRESET_ATTRIBUTE).as_deref(),
        global_overrides(window),
        script_overrides(document),
    )
}

fn global_overrides(window: &Window) -> Result<Option<ConfigOverrides>> {
    let value = Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|err| FxError::ConfigValue(err.to_string()))
}

fn script_overrides(document: &Document) -> Result<Option<ConfigOverrides>> {
    let Some(json) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
    else {
        return Ok(None);
    };
    if json.trim().is_empty() {
        return Ok(None);
    }
    ConfigOverrides::from_json(&json).map(Some)
}

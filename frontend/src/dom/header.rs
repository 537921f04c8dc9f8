use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{listen, set_styles, Page};
use crate::error::{FxError, Result};
use crate::header::{inline_styles, is_scrolled, parallax_transform, HeaderStyle, SCROLLED_CLASS};

const HEADER_ID: &str = "header";

pub(crate) fn setup(page: &Page) -> Result<()> {
    let Some(header) = page.by_id::<HtmlElement>(HEADER_ID) else {
        debug!("No #{} element, header scroll state disabled", HEADER_ID);
        return Ok(());
    };
    let style = page.config.header_style;
    let threshold = page.config.header_threshold;
    let window = page.window.clone();

    listen(&page.window, "scroll", move |_| {
        let scrolled = is_scrolled(window.scroll_y().unwrap_or(0.0), threshold);
        let result = match style {
            HeaderStyle::Class => header
                .class_list()
                .toggle_with_force(SCROLLED_CLASS, scrolled)
                .map(|_| ())
                .map_err(FxError::from),
            HeaderStyle::Inline => set_styles(&header, &inline_styles(scrolled)),
        };
        if let Err(err) = result {
            warn!("Failed to update header scroll state: {}", err);
        }
    })
}

pub(crate) fn setup_parallax(page: &Page) -> Result<()> {
    let Some(parallax) = page.config.parallax.clone() else {
        return Ok(());
    };
    let Some(hero) = page
        .document
        .query_selector(&parallax.selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("No hero matching `{}`, parallax disabled", parallax.selector);
        return Ok(());
    };
    let window = page.window.clone();

    listen(&page.window, "scroll", move |_| {
        let offset = window.page_y_offset().unwrap_or(0.0);
        let transform = parallax_transform(offset, parallax.factor);
        if let Err(err) = hero.style().set_property("transform", &transform) {
            warn!("Failed to move hero: {}", FxError::from(err));
        }
    })
}

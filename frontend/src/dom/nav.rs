use gloo_timers::future::TimeoutFuture;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::{listen, Page};
use crate::anchor::{fragment_id, AnchorOutcome};
use crate::config::NAV_LINK_SELECTOR;
use crate::error::Result;
use crate::typing::Typewriter;

const ACTIVE_CLASS: &str = "active";

pub(crate) fn setup_anchors(page: &Page) -> Result<()> {
    let links = page.query_all(r##"a[href^="#"]"##)?;
    for link in links {
        let anchors = page.config.anchors;
        let window = page.window.clone();
        let document = page.document.clone();
        let anchor = link.clone();

        listen(&link, "click", move |event: Event| {
            let href = anchor.get_attribute("href");
            let target_top = href
                .as_deref()
                .and_then(fragment_id)
                .and_then(|id| document.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|el| f64::from(el.offset_top()));

            let outcome = anchors.resolve(href.as_deref(), target_top);
            if outcome.prevents_default() {
                event.prevent_default();
            }
            if let AnchorOutcome::ScrollTo(top) = outcome {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
        })?;
    }
    Ok(())
}

pub(crate) fn mark_active_links(page: &Page) -> Result<()> {
    for link in page.query_all(NAV_LINK_SELECTOR)? {
        if page.route.is_active(link.get_attribute("href").as_deref()) {
            link.class_list().add_1(ACTIVE_CLASS)?;
        }
    }
    Ok(())
}

pub(crate) fn setup_typing(page: &Page) -> Result<()> {
    let Some(typing) = page.config.typing.clone() else {
        return Ok(());
    };
    if !page.route.is_home() {
        return Ok(());
    }
    let Some(heading) = page.document.query_selector(&typing.selector)? else {
        debug!("No `{}` heading, typing effect disabled", typing.selector);
        return Ok(());
    };

    let text = heading.text_content().unwrap_or_default();
    spawn_local(async move {
        for frame in Typewriter::new(text) {
            heading.set_text_content(Some(&frame));
            TimeoutFuture::new(typing.interval_ms).await;
        }
    });
    Ok(())
}

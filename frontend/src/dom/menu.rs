use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    KeyboardEvent,
};

use super::{listen, set_styles, Page};
use crate::config::MenuConfig;
use crate::contact::WhatsAppLink;
use crate::error::Result;
use crate::panel::{Panel, PanelEvent, PanelState};

const SIDEBAR_OPEN_CLASS: &str = "sidebar-open";
const POPUP_OPEN_CLASS: &str = "wa-open";

const DROPDOWN_OPEN_STYLES: [(&str, &str); 10] = [
    ("display", "flex"),
    ("flex-direction", "column"),
    ("position", "absolute"),
    ("top", "100%"),
    ("left", "0"),
    ("width", "100%"),
    ("background", "var(--white)"),
    ("padding", "2rem"),
    ("box-shadow", "var(--shadow-lg)"),
    ("gap", "1rem"),
];
const BARS_ICON: &str = r#"<i class="fas fa-bars"></i>"#;
const CLOSE_ICON: &str = r#"<i class="fas fa-times"></i>"#;

/// Applies a panel state to the page.
trait PanelView {
    fn render(&self, state: PanelState) -> Result<()>;
}

struct PanelDriver<V> {
    name: &'static str,
    panel: RefCell<Panel>,
    view: V,
}

impl<V: PanelView> PanelDriver<V> {
    fn send(&self, event: PanelEvent) {
        let next = self.panel.borrow_mut().handle(event);
        if let Some(state) = next {
            debug!("{} -> {:?} on {:?}", self.name, state, event);
            if let Err(err) = self.view.render(state) {
                warn!("Failed to render {} state: {}", self.name, err);
            }
        }
    }
}

fn on_click<V: PanelView + 'static>(
    target: &Element,
    driver: &Rc<PanelDriver<V>>,
    event: PanelEvent,
) -> Result<()> {
    let driver = Rc::clone(driver);
    listen(target, "click", move |_| driver.send(event))
}

fn on_escape<V: PanelView + 'static>(page: &Page, driver: &Rc<PanelDriver<V>>) -> Result<()> {
    let driver = Rc::clone(driver);
    listen(&page.document, "keydown", move |event: Event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape");
        if is_escape {
            driver.send(PanelEvent::Escape);
        }
    })
}

fn set_body_scroll_locked(body: &HtmlElement, locked: bool) -> Result<()> {
    let style = body.style();
    if locked {
        style.set_property("overflow", "hidden")?;
    } else {
        style.remove_property("overflow")?;
    }
    Ok(())
}

pub(crate) fn setup(page: &Page) -> Result<()> {
    match &page.config.menu {
        Some(MenuConfig::Sidebar) => setup_sidebar(page),
        Some(MenuConfig::Dropdown {
            button_selector,
            links_selector,
        }) => setup_dropdown(page, button_selector, links_selector),
        None => Ok(()),
    }
}

struct SidebarView {
    body: HtmlElement,
    sidebar: Element,
    button: Element,
}

impl PanelView for SidebarView {
    fn render(&self, state: PanelState) -> Result<()> {
        let open = state == PanelState::Open;
        if open {
            self.body.class_list().add_1(SIDEBAR_OPEN_CLASS)?;
        } else {
            self.body.class_list().remove_1(SIDEBAR_OPEN_CLASS)?;
        }
        self.sidebar.set_attribute("aria-hidden", if open { "false" } else { "true" })?;
        self.button.set_attribute("aria-expanded", if open { "true" } else { "false" })?;
        set_body_scroll_locked(&self.body, open)
    }
}

fn setup_sidebar(page: &Page) -> Result<()> {
    let (Some(button), Some(sidebar), Some(overlay), Some(close)) = (
        page.by_id::<Element>("mobileMenuBtn"),
        page.by_id::<Element>("sidebar"),
        page.by_id::<Element>("overlay"),
        page.by_id::<Element>("sidebarClose"),
    ) else {
        debug!("Sidebar markup incomplete, mobile menu disabled");
        return Ok(());
    };

    let driver = Rc::new(PanelDriver {
        name: "sidebar",
        panel: RefCell::new(Panel::sidebar()),
        view: SidebarView {
            body: page.body.clone(),
            sidebar: sidebar.clone(),
            button: button.clone(),
        },
    });

    on_click(&button, &driver, PanelEvent::Trigger)?;
    on_click(&close, &driver, PanelEvent::CloseButton)?;
    on_click(&overlay, &driver, PanelEvent::Overlay)?;
    on_escape(page, &driver)?;

    let link_driver = Rc::clone(&driver);
    listen(&sidebar, "click", move |event: Event| {
        let inside_link = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("a").ok().flatten())
            .is_some();
        if inside_link {
            link_driver.send(PanelEvent::InnerLink);
        }
    })
}

struct DropdownView {
    links: HtmlElement,
    button: Element,
}

impl PanelView for DropdownView {
    fn render(&self, state: PanelState) -> Result<()> {
        match state {
            PanelState::Open => {
                set_styles(&self.links, &DROPDOWN_OPEN_STYLES)?;
                self.button.set_inner_html(CLOSE_ICON);
            }
            PanelState::Closed => {
                self.links.style().set_property("display", "none")?;
                self.button.set_inner_html(BARS_ICON);
            }
        }
        Ok(())
    }
}

fn setup_dropdown(page: &Page, button_selector: &str, links_selector: &str) -> Result<()> {
    let Some(button) = page.document.query_selector(button_selector)? else {
        debug!("No `{}`, dropdown menu disabled", button_selector);
        return Ok(());
    };
    let Some(links) = page
        .document
        .query_selector(links_selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("No `{}`, dropdown menu disabled", links_selector);
        return Ok(());
    };

    let driver = Rc::new(PanelDriver {
        name: "dropdown",
        panel: RefCell::new(Panel::dropdown()),
        view: DropdownView {
            links,
            button: button.clone(),
        },
    });
    on_click(&button, &driver, PanelEvent::Trigger)
}

struct PopupView {
    body: HtmlElement,
    popup: Element,
    message: Element,
    send: Element,
    link: WhatsAppLink,
}

impl PopupView {
    fn refresh_link(&self) -> Result<()> {
        let href = self.link.href(&message_text(&self.message));
        match self.send.dyn_ref::<HtmlAnchorElement>() {
            Some(anchor) => anchor.set_href(&href),
            None => self.send.set_attribute("href", &href)?,
        }
        Ok(())
    }
}

impl PanelView for PopupView {
    fn render(&self, state: PanelState) -> Result<()> {
        let open = state == PanelState::Open;
        if open {
            self.body.class_list().add_1(POPUP_OPEN_CLASS)?;
        } else {
            self.body.class_list().remove_1(POPUP_OPEN_CLASS)?;
        }
        self.popup.set_attribute("aria-hidden", if open { "false" } else { "true" })?;
        set_body_scroll_locked(&self.body, open)?;
        if open {
            self.refresh_link()?;
        }
        Ok(())
    }
}

fn message_text(message: &Element) -> String {
    if let Some(area) = message.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(input) = message.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        String::new()
    }
}

pub(crate) fn setup_contact(page: &Page) -> Result<()> {
    let Some(link) = page.config.contact.clone() else {
        return Ok(());
    };
    let (Some(open), Some(overlay), Some(popup), Some(close), Some(message), Some(send)) = (
        page.by_id::<Element>("whatsappOpenBtn"),
        page.by_id::<Element>("waOverlay"),
        page.by_id::<Element>("waPopup"),
        page.by_id::<Element>("waCloseBtn"),
        page.by_id::<Element>("waMsg"),
        page.by_id::<Element>("waSendBtn"),
    ) else {
        debug!("WhatsApp popup markup incomplete, contact popup disabled");
        return Ok(());
    };

    let driver = Rc::new(PanelDriver {
        name: "contact popup",
        panel: RefCell::new(Panel::popup()),
        view: PopupView {
            body: page.body.clone(),
            popup,
            message: message.clone(),
            send,
            link,
        },
    });

    on_click(&open, &driver, PanelEvent::Trigger)?;
    on_click(&close, &driver, PanelEvent::CloseButton)?;
    on_click(&overlay, &driver, PanelEvent::Overlay)?;
    on_escape(page, &driver)?;

    let input_driver = Rc::clone(&driver);
    listen(&message, "input", move |_| {
        if let Err(err) = input_driver.view.refresh_link() {
            warn!("Failed to update WhatsApp link: {}", err);
        }
    })
}

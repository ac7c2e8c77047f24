//! Team bio overlay. One instance per page; opening it pauses smooth scroll.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement, KeyboardEvent};

use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;
use crate::smooth_scroll::{ScrollDriver, SmoothScroll};

const ACTIVE: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamProfile {
    pub name: String,
    pub role: String,
    pub image: String,
    pub bio: String,
}

impl TeamProfile {
    fn from_item(item: &Element) -> Self {
        let image = dom::query_in(item, "img")
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
            .map(|img| img.src())
            .unwrap_or_default();
        Self {
            name: dom::text_of(item, ".team-item__name"),
            role: dom::text_of(item, ".team-item__role"),
            image,
            bio: item.get_attribute("data-bio").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(TeamProfile),
}

impl ModalState {
    /// Opening while open just swaps the profile.
    pub fn open(&mut self, profile: TeamProfile) {
        *self = ModalState::Open(profile);
    }

    /// Returns whether the overlay should be hidden and scrolling resumed.
    /// Escape only counts while open; the button and backdrop always close.
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        if trigger == CloseTrigger::Escape && !self.is_open() {
            return false;
        }
        *self = ModalState::Closed;
        true
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }
}

/// Opens the modal and pauses page scrolling.
pub fn open_pausing(state: &mut ModalState, scroll: &mut SmoothScroll, profile: TeamProfile) {
    state.open(profile);
    scroll.stop();
}

/// Closes the modal, resuming page scrolling when it did close.
pub fn close_resuming(state: &mut ModalState, scroll: &mut SmoothScroll, trigger: CloseTrigger) -> bool {
    let closed = state.close(trigger);
    if closed {
        scroll.start();
    }
    closed
}

struct Fields {
    name: HtmlElement,
    role: HtmlElement,
    image: HtmlImageElement,
    bio: HtmlElement,
}

fn required(root: &Element, selector: &'static str) -> Result<HtmlElement, SiteError> {
    dom::query_in(root, selector).ok_or(SiteError::MissingElement(selector))
}

#[derive(Clone)]
struct TeamModal {
    root: HtmlElement,
    fields: Rc<Fields>,
    state: Rc<RefCell<ModalState>>,
    scroll: ScrollDriver,
}

impl TeamModal {
    fn open(&self, profile: TeamProfile) {
        debug!("Opening team modal for {}", profile.name);
        self.fields.name.set_text_content(Some(&profile.name));
        self.fields.role.set_text_content(Some(&profile.role));
        self.fields.image.set_src(&profile.image);
        self.fields.image.set_alt(&profile.name);
        self.fields.bio.set_text_content(Some(&profile.bio));
        let mut state = self.state.borrow_mut();
        self.scroll.with_state(|scroll| open_pausing(&mut state, scroll, profile));
        dom::set_class(&self.root, ACTIVE, true);
    }

    fn close(&self, trigger: CloseTrigger) {
        let mut state = self.state.borrow_mut();
        if self.scroll.with_state(|scroll| close_resuming(&mut state, scroll, trigger)) {
            dom::set_class(&self.root, ACTIVE, false);
        }
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let items = dom::query_all(".team-item")?;
    let Some(root) = dom::query(".team-modal") else {
        debug!("No team modal on this page");
        return Ok(Vec::new());
    };
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let image = required(&root, ".team-modal__img")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| SiteError::MissingElement(".team-modal__img"))?;
    let modal = TeamModal {
        fields: Rc::new(Fields {
            name: required(&root, ".team-modal__name")?,
            role: required(&root, ".team-modal__role")?,
            image,
            bio: required(&root, ".team-modal__bio")?,
        }),
        state: Rc::new(RefCell::new(ModalState::Closed)),
        scroll: ctx.scroll.clone(),
        root: root.clone(),
    };
    let close_button = required(&root, ".team-modal__close")?;
    let backdrop = required(&root, ".team-modal__overlay")?;

    let mut listeners = Vec::new();
    for item in &items {
        let modal = modal.clone();
        let source = item.clone();
        listeners.push(Listener::new(item, "click", move |_| {
            modal.open(TeamProfile::from_item(&source));
        })?);
    }

    let on_button = modal.clone();
    listeners.push(Listener::new(&close_button, "click", move |_| {
        on_button.close(CloseTrigger::Button)
    })?);
    let on_backdrop = modal.clone();
    listeners.push(Listener::new(&backdrop, "click", move |_| {
        on_backdrop.close(CloseTrigger::Backdrop)
    })?);
    let document = dom::document()?;
    listeners.push(Listener::new(&document, "keydown", move |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .map(|key| key.key() == "Escape")
            .unwrap_or(false);
        if escape {
            modal.close(CloseTrigger::Escape);
        }
    })?);

    info!("Team modal on {} entries", items.len());
    Ok(listeners)
}

//! Thin `web-sys` helpers shared by every page feature.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::anim::scroll::Viewport;
use crate::anim::trigger::Bounds;
use crate::error::SiteError;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::MissingElement("window"))
}

pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::MissingElement("document"))
}

pub fn by_id(id: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query_in(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Result<Vec<HtmlElement>, SiteError> {
    let nodes = document()?.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn text_of(root: &Element, selector: &str) -> String {
    query_in(root, selector)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn scroll_y() -> f64 {
    window().ok().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn viewport_size() -> (f64, f64) {
    let Ok(window) = window() else {
        return (0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Scrollable distance of the whole document.
pub fn scroll_limit() -> f64 {
    let (_, height) = viewport_size();
    let content = document()
        .ok()
        .and_then(|d| d.document_element())
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    (content - height).max(0.0)
}

pub fn viewport(dt: f64) -> Viewport {
    let (width, height) = viewport_size();
    Viewport {
        scroll_y: scroll_y(),
        width,
        height,
        dt,
    }
}

/// Element rectangle in document coordinates.
pub fn bounds(el: &Element) -> Bounds {
    let rect = el.get_bounding_client_rect();
    Bounds {
        top: rect.top() + scroll_y(),
        height: rect.height(),
    }
}

pub fn navigate(href: &str) {
    if let Ok(window) = window() {
        let _ = window.location().set_href(href);
    }
}

/// Creates a bare `div` right before (`after == false`) or after `anchor`.
pub fn insert_div(anchor: &Element, after: bool) -> Result<HtmlElement, SiteError> {
    let parent = anchor
        .parent_node()
        .ok_or(SiteError::MissingElement("parent node"))?;
    let div = document()?.create_element("div")?.unchecked_into::<HtmlElement>();
    let reference = if after { anchor.next_sibling() } else { Some(anchor.clone().into()) };
    parent.insert_before(&div, reference.as_ref())?;
    Ok(div)
}

/// An event subscription that lives exactly as long as this value.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self, SiteError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Like [`Listener::new`] but allowed to call `prevent_default` on
    /// events browsers register as passive by default (`wheel`).
    pub fn blocking<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self, SiteError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Keeps the subscription for the rest of the page's life.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop. Dropping it stops rescheduling.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    _callback: FrameCallback,
}

impl FrameLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, SiteError>
    where
        F: FnMut(f64) + 'static,
    {
        let window = window()?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let running = Rc::new(Cell::new(true));

        let next = callback.clone();
        let alive = running.clone();
        let frame_window = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
            if !alive.get() {
                return;
            }
            on_frame(time);
            if let Some(cb) = next.borrow().as_ref() {
                let _ = frame_window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }

        Ok(Self {
            running,
            _callback: callback,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.running.set(false);
    }
}

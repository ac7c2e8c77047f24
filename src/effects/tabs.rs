use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use web_sys::HtmlElement;

use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

const ACTIVE: &str = "active";

/// Which button and pane are active, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub button: usize,
    pub pane: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabSet {
    /// `data-tab` of each button.
    buttons: Vec<Option<String>>,
    /// `id` of each pane.
    panes: Vec<String>,
    active: Option<Selection>,
}

impl TabSet {
    pub fn new(buttons: Vec<Option<String>>, panes: Vec<String>) -> Self {
        Self {
            buttons,
            panes,
            active: None,
        }
    }

    /// Clicking `button`. Returns the new selection, or `None` (and leaves
    /// the current one in place) when no pane answers to its id.
    pub fn select(&mut self, button: usize) -> Option<Selection> {
        let id = self.buttons.get(button)?.as_deref()?;
        let pane = self.panes.iter().position(|pane| pane == id)?;
        let selection = Selection { button, pane };
        self.active = Some(selection);
        Some(selection)
    }

    pub fn active(&self) -> Option<Selection> {
        self.active
    }
}

fn apply(buttons: &[HtmlElement], panes: &[HtmlElement], selection: Selection) {
    for (i, button) in buttons.iter().enumerate() {
        dom::set_class(button, ACTIVE, i == selection.button);
    }
    for (i, pane) in panes.iter().enumerate() {
        dom::set_class(pane, ACTIVE, i == selection.pane);
    }
}

pub fn wire(_ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let buttons = Rc::new(dom::query_all(".tab-btn")?);
    let panes = Rc::new(dom::query_all(".tab-pane")?);
    let tabs = Rc::new(RefCell::new(TabSet::new(
        buttons.iter().map(|b| b.get_attribute("data-tab")).collect(),
        panes.iter().map(|p| p.id()).collect(),
    )));

    let mut listeners = Vec::new();
    for (index, button) in buttons.iter().enumerate() {
        let (tabs, buttons, panes) = (tabs.clone(), buttons.clone(), panes.clone());
        listeners.push(Listener::new(button, "click", move |_| {
            let selection = tabs.borrow_mut().select(index);
            if let Some(selection) = selection {
                apply(&buttons, &panes, selection);
            }
        })?);
    }
    if !listeners.is_empty() {
        info!("Tabs on {} buttons", listeners.len());
    }
    Ok(listeners)
}

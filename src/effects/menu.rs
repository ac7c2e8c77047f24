use log::{debug, info};

use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::effects::nav::NAV_ID;
use crate::error::SiteError;

const MENU_BUTTON_ID: &str = "menuBtn";
const OPEN: &str = "nav--open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn label(&self) -> &'static str {
        if self.open {
            "CLOSE"
        } else {
            "MENU"
        }
    }

    /// Body `overflow`; empty restores the stylesheet's value.
    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }
}

pub fn wire(_ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let (Some(button), Some(nav)) = (dom::by_id(MENU_BUTTON_ID), dom::by_id(NAV_ID)) else {
        debug!("No mobile menu on this page");
        return Ok(Vec::new());
    };
    let body = dom::document()?.body().ok_or(SiteError::MissingElement("body"))?;

    let label = button.clone();
    let listener = Listener::new(&button, "click", move |_| {
        let was_open = nav.class_list().contains(OPEN);
        let state = MenuState { open: was_open }.toggled();
        dom::set_class(&nav, OPEN, state.open);
        label.set_text_content(Some(state.label()));
        match state.body_overflow() {
            "" => dom::clear_style(&body, "overflow"),
            overflow => dom::set_style(&body, "overflow", overflow),
        }
    })?;
    info!("Mobile menu toggle wired");
    Ok(vec![listener])
}

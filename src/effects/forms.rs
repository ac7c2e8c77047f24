use gloo_timers::future::TimeoutFuture;
use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement};

use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::effects::transition::PageTransition;
use crate::error::SiteError;

pub const PENDING_LABEL: &str = "TRANSMITTING...";

fn mark_pending(button: &HtmlElement) {
    button.set_text_content(Some(PENDING_LABEL));
    dom::set_style(button, "opacity", "0.5");
    if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(true);
    }
}

/// Every form fakes a send, then leaves for the thank-you page.
pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let mut listeners = Vec::new();
    for form in dom::query_all("form")? {
        let ctx = ctx.clone();
        let form_el = form.clone();
        listeners.push(Listener::new(&form, "submit", move |event| {
            event.prevent_default();
            if let Some(button) = dom::query_in(&form_el, "button[type='submit']") {
                mark_pending(&button);
            }

            let ctx = ctx.clone();
            spawn_local(async move {
                TimeoutFuture::new(ctx.config.form_delay_ms).await;
                let destination = ctx.config.thank_you_url.clone();
                match PageTransition::find(&ctx) {
                    Some(transition) => transition.navigate(destination),
                    None => {
                        debug!("No transition overlay, going straight to {}", destination);
                        dom::navigate(&destination);
                    }
                }
            });
        })?);
    }
    info!("Submit handling on {} forms", listeners.len());
    Ok(listeners)
}

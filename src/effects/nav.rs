use log::{debug, info};

use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

pub const NAV_ID: &str = "nav";
const SCROLLED: &str = "scrolled";

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let Some(nav) = dom::by_id(NAV_ID) else {
        debug!("No #{} bar on this page", NAV_ID);
        return Ok(Vec::new());
    };
    let threshold = ctx.config.nav_scroll_threshold;
    dom::set_class(&nav, SCROLLED, is_scrolled(dom::scroll_y(), threshold));

    let window = dom::window()?;
    let listener = Listener::new(&window, "scroll", move |_| {
        dom::set_class(&nav, SCROLLED, is_scrolled(dom::scroll_y(), threshold));
    })?;
    info!("Nav bar scroll state above {}px", threshold);
    Ok(vec![listener])
}

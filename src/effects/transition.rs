//! Full-screen overlay that uncovers the page on load and covers it again
//! before navigating away.

use log::{debug, info};
use web_sys::HtmlElement;

use crate::anim::easing::Ease;
use crate::anim::tween::Tween;
use crate::config::SiteConfig;
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

pub const OVERLAY_ID: &str = "page-transition";

/// Links that get the cover animation: same-tab, not in-page, not mail.
pub fn should_intercept(href: Option<&str>, target: Option<&str>) -> bool {
    match href {
        Some(href) if !href.is_empty() => {
            !href.starts_with('#') && !href.starts_with("mailto:") && target != Some("_blank")
        }
        _ => false,
    }
}

pub fn reveal_tween(config: &SiteConfig) -> Tween {
    Tween::new(1.0, 0.0, config.reveal_duration)
        .eased(Ease::Power4InOut)
        .delayed(config.reveal_delay)
}

pub fn cover_tween(config: &SiteConfig) -> Tween {
    Tween::new(0.0, 1.0, config.cover_duration).eased(Ease::Power4InOut)
}

#[derive(Clone)]
pub struct PageTransition {
    overlay: HtmlElement,
    ctx: SiteContext,
}

impl PageTransition {
    pub fn find(ctx: &SiteContext) -> Option<Self> {
        dom::by_id(OVERLAY_ID).map(|overlay| Self {
            overlay,
            ctx: ctx.clone(),
        })
    }

    /// Shrinks the overlay upward, uncovering the page.
    pub fn reveal(&self) {
        dom::set_style(&self.overlay, "transform-origin", "top");
        let overlay = self.overlay.clone();
        self.ctx.animator.play(reveal_tween(&self.ctx.config), move |scale| {
            dom::set_style(&overlay, "transform", &format!("scaleY({})", scale));
        });
    }

    /// Grows the overlay up from the bottom; `done` runs once it covers the page.
    pub fn cover_then<F>(&self, done: F)
    where
        F: FnOnce() + 'static,
    {
        dom::set_style(&self.overlay, "transform-origin", "bottom");
        let overlay = self.overlay.clone();
        self.ctx.animator.play_then(
            cover_tween(&self.ctx.config),
            move |scale| dom::set_style(&overlay, "transform", &format!("scaleY({})", scale)),
            done,
        );
    }

    pub fn navigate(&self, href: String) {
        debug!("Covering page before navigating to {}", href);
        self.cover_then(move || dom::navigate(&href));
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let Some(transition) = PageTransition::find(ctx) else {
        debug!("No #{} overlay, links navigate normally", OVERLAY_ID);
        return Ok(Vec::new());
    };
    transition.reveal();

    let mut listeners = Vec::new();
    for link in dom::query_all("a")? {
        let href = link.get_attribute("href");
        let target = link.get_attribute("target");
        if !should_intercept(href.as_deref(), target.as_deref()) {
            continue;
        }
        let transition = transition.clone();
        let anchor = link.clone();
        listeners.push(Listener::new(&link, "click", move |event| {
            let Some(href) = anchor.get_attribute("href").filter(|href| !href.is_empty()) else {
                return;
            };
            event.prevent_default();
            transition.navigate(href);
        })?);
    }
    info!("Page transition on {} links", listeners.len());
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Animator;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn only_same_tab_internal_links_are_intercepted() {
        assert!(should_intercept(Some("about.html"), None));
        assert!(should_intercept(Some("/work/"), Some("_self")));
        assert!(should_intercept(Some("https://example.com"), None));

        assert!(!should_intercept(Some("#contact"), None));
        assert!(!should_intercept(Some("mailto:hello@vanguard.studio"), None));
        assert!(!should_intercept(Some("about.html"), Some("_blank")));
        assert!(!should_intercept(Some(""), None));
        assert!(!should_intercept(None, None));
    }

    #[test]
    fn navigation_waits_for_the_cover_to_finish() {
        let config = SiteConfig::default();
        let animator = Animator::new();
        let scales = Rc::new(RefCell::new(Vec::new()));
        let navigated = Rc::new(Cell::new(false));

        let seen = scales.clone();
        let flag = navigated.clone();
        let observed = scales.clone();
        animator.play_then(
            cover_tween(&config),
            move |scale| seen.borrow_mut().push(scale),
            move || {
                assert_eq!(observed.borrow().last().copied(), Some(1.0));
                flag.set(true);
            },
        );

        for t in [0.0, 300.0, 600.0, 999.0] {
            animator.tick(t);
            assert!(!navigated.get(), "navigated early at {}ms", t);
        }
        animator.tick(1_000.0);
        assert!(navigated.get());
    }

    #[test]
    fn reveal_starts_covered_and_ends_hidden() {
        let tween = reveal_tween(&SiteConfig::default());
        assert_eq!(tween.value_at(0.0), 1.0);
        assert_eq!(tween.value_at(0.2), 1.0);
        assert_eq!(tween.value_at(1.4), 0.0);
    }
}

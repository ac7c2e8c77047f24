use log::info;
use web_sys::HtmlElement;

use crate::anim::easing::Ease;
use crate::anim::scroll::{ScrollEffect, Viewport};
use crate::anim::trigger::{Bounds, Edge, Once, TriggerPosition};
use crate::anim::tween::Tween;
use crate::anim::Animator;
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

/// Distance (px) a section rises while fading in.
const RISE: f64 = 50.0;

/// Style for a section `progress` of the way through its reveal.
pub fn reveal_style(progress: f64) -> (f64, f64) {
    let progress = progress.clamp(0.0, 1.0);
    (progress, RISE * (1.0 - progress))
}

struct Reveal {
    section: HtmlElement,
    bounds: Bounds,
    start: TriggerPosition,
    once: Once,
    tween: Tween,
    animator: Animator,
}

fn paint(section: &HtmlElement, progress: f64) {
    let (opacity, offset) = reveal_style(progress);
    dom::set_style(section, "opacity", &opacity.to_string());
    dom::set_style(section, "transform", &format!("translateY({}px)", offset));
}

impl ScrollEffect for Reveal {
    fn update(&mut self, viewport: &Viewport) -> bool {
        let start = self.start.scroll_offset(self.bounds, viewport.height);
        if !self.once.check(viewport.scroll_y, start) {
            return true;
        }
        let section = self.section.clone();
        self.animator.play(self.tween, move |progress| paint(&section, progress));
        false
    }

    fn refresh(&mut self) {
        self.bounds = dom::bounds(&self.section);
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let start = TriggerPosition::new(Edge::Top, Edge::Percent(ctx.config.trigger_percent()));
    let tween = Tween::new(0.0, 1.0, ctx.config.section_reveal_duration).eased(Ease::Power3Out);

    let sections = dom::query_all("[data-scroll-section]")?;
    for section in &sections {
        paint(section, 0.0);
        ctx.triggers.add(Reveal {
            section: section.clone(),
            bounds: dom::bounds(section),
            start,
            once: Once::default(),
            tween,
            animator: ctx.animator.clone(),
        });
    }
    info!("Reveal on enter for {} sections", sections.len());
    Ok(Vec::new())
}

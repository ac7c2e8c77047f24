use log::info;
use web_sys::{Element, HtmlElement};

use crate::anim::scroll::{ScrollEffect, Viewport};
use crate::anim::trigger::{Bounds, Edge, TriggerEnd, TriggerPosition, TriggerSpan};
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

/// Images that sit in fixed frames and must not drift.
pub const EXCLUDED: &str = ".team-modal__img, .empire-bg img, .portrait__img";

/// How far (percent of its own height) an image drifts across the pass.
const DRIFT: f64 = 10.0;

const START: TriggerPosition = TriggerPosition::new(Edge::Top, Edge::Bottom);
const END: TriggerEnd = TriggerEnd::Position(TriggerPosition::new(Edge::Bottom, Edge::Top));

pub fn drift(progress: f64) -> f64 {
    DRIFT * progress.clamp(0.0, 1.0)
}

struct Parallax {
    image: HtmlElement,
    frame: Element,
    bounds: Bounds,
    last: Option<f64>,
}

impl ScrollEffect for Parallax {
    fn update(&mut self, viewport: &Viewport) -> bool {
        let span = TriggerSpan::resolve(START, END, self.bounds, viewport.height);
        let y = drift(span.progress(viewport.scroll_y));
        if self.last != Some(y) {
            dom::set_style(&self.image, "transform", &format!("translateY({}%)", y));
            self.last = Some(y);
        }
        true
    }

    fn refresh(&mut self) {
        self.bounds = dom::bounds(&self.frame);
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let mut images = 0;
    for image in dom::query_all("img")? {
        if image.matches(EXCLUDED)? {
            continue;
        }
        let Some(frame) = image.parent_element() else {
            continue;
        };
        ctx.triggers.add(Parallax {
            bounds: dom::bounds(&frame),
            image,
            frame,
            last: None,
        });
        images += 1;
    }
    info!("Parallax on {} images", images);
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_spans_ten_percent() {
        assert_eq!(drift(0.0), 0.0);
        assert_eq!(drift(0.5), 5.0);
        assert_eq!(drift(1.0), 10.0);
        assert_eq!(drift(3.0), 10.0);
    }

    #[test]
    fn drift_starts_when_the_frame_enters_from_below() {
        let frame = Bounds { top: 2_000.0, height: 600.0 };
        let span = TriggerSpan::resolve(START, END, frame, 900.0);
        assert_eq!(span.start, 1_100.0);
        assert_eq!(span.end, 2_600.0);
        assert_eq!(drift(span.progress(1_100.0)), 0.0);
        assert_eq!(drift(span.progress(2_600.0)), 10.0);
    }
}

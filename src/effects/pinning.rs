//! Sections that hold still while their content slides sideways.

use log::{debug, info};
use web_sys::HtmlElement;

use crate::anim::scroll::{Relayout, ScrollEffect, Viewport};
use crate::anim::trigger::{Bounds, Edge, Scrub, TriggerEnd, TriggerPosition, TriggerSpan};
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

const PIN_START: TriggerPosition = TriggerPosition::new(Edge::Top, Edge::Top);

/// Element ids for one pinned strip.
pub struct StripIds {
    pub section: &'static str,
    pub wrapper: &'static str,
    pub progress_bar: Option<&'static str>,
}

pub const STRIPS: &[StripIds] = &[
    StripIds {
        section: "expertise",
        wrapper: "expertiseWrapper",
        progress_bar: Some("expertiseProgressBar"),
    },
    StripIds {
        section: "testimonialsSection",
        wrapper: "testimonialsWrapper",
        progress_bar: None,
    },
];

/// Horizontal offset that right-aligns the content at `progress == 1`.
pub fn horizontal_offset(content_width: f64, viewport_width: f64, progress: f64) -> f64 {
    let overflow = (content_width - viewport_width).max(0.0);
    -overflow * progress.clamp(0.0, 1.0)
}

/// Where the strip is drawn for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripFrame {
    /// Smoothed progress driving the sideways slide.
    pub slide: f64,
    /// Raw scroll progress shown on the progress bar.
    pub bar: f64,
}

impl StripFrame {
    pub fn next(scrub: &mut Scrub, span: &TriggerSpan, scroll_y: f64, dt: f64) -> Self {
        let bar = span.progress(scroll_y);
        Self {
            slide: scrub.step(bar, dt),
            bar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinPhase {
    Before,
    Pinned,
    After,
}

impl PinPhase {
    pub fn at(scroll_y: f64, span: &TriggerSpan) -> Self {
        if scroll_y < span.start {
            PinPhase::Before
        } else if scroll_y <= span.end {
            PinPhase::Pinned
        } else {
            PinPhase::After
        }
    }
}

struct PinnedStrip {
    section: HtmlElement,
    wrapper: HtmlElement,
    progress_bar: Option<HtmlElement>,
    /// Sits right before the section and holds its place while it is fixed.
    placeholder: HtmlElement,
    distance: f64,
    scrub: Scrub,
    top: f64,
    phase: PinPhase,
    relayout: Relayout,
}

impl PinnedStrip {
    fn new(ctx: &SiteContext, ids: &StripIds) -> Result<Option<Self>, SiteError> {
        let (Some(section), Some(wrapper)) = (dom::by_id(ids.section), dom::by_id(ids.wrapper)) else {
            debug!("No #{} strip on this page", ids.section);
            return Ok(None);
        };
        let placeholder = dom::insert_div(&section, false)?;
        let spacer = dom::insert_div(&section, true)?;
        let distance = ctx.config.pin_distance;
        dom::set_style(&spacer, "height", &format!("{}px", distance));

        let mut strip = Self {
            section,
            wrapper,
            progress_bar: ids.progress_bar.and_then(dom::by_id),
            placeholder,
            distance,
            scrub: Scrub::new(ctx.config.pin_scrub),
            top: 0.0,
            phase: PinPhase::Before,
            relayout: ctx.triggers.relayout(),
        };
        strip.refresh();
        Ok(Some(strip))
    }

    fn apply_phase(&self, phase: PinPhase) {
        let section = &self.section;
        match phase {
            PinPhase::Before => {
                for property in ["position", "top", "left", "width", "transform"] {
                    dom::clear_style(section, property);
                }
                dom::set_style(&self.placeholder, "height", "0px");
            }
            PinPhase::Pinned => {
                let height = section.offset_height();
                dom::set_style(section, "position", "fixed");
                dom::set_style(section, "top", "0px");
                dom::set_style(section, "left", "0px");
                dom::set_style(section, "width", "100%");
                dom::clear_style(section, "transform");
                dom::set_style(&self.placeholder, "height", &format!("{}px", height));
            }
            PinPhase::After => {
                for property in ["position", "top", "left", "width"] {
                    dom::clear_style(section, property);
                }
                dom::set_style(section, "transform", &format!("translateY({}px)", self.distance));
                dom::set_style(&self.placeholder, "height", "0px");
            }
        }
    }
}

impl ScrollEffect for PinnedStrip {
    fn update(&mut self, viewport: &Viewport) -> bool {
        let span = TriggerSpan::resolve(
            PIN_START,
            TriggerEnd::After(self.distance),
            Bounds { top: self.top, height: 0.0 },
            viewport.height,
        );

        let phase = PinPhase::at(viewport.scroll_y, &span);
        if phase != self.phase {
            self.apply_phase(phase);
            self.phase = phase;
            self.relayout.request();
        }

        let frame = StripFrame::next(&mut self.scrub, &span, viewport.scroll_y, viewport.dt);
        let offset = horizontal_offset(self.wrapper.scroll_width() as f64, viewport.width, frame.slide);
        dom::set_style(&self.wrapper, "transform", &format!("translateX({}px)", offset));
        if let Some(bar) = &self.progress_bar {
            dom::set_style(bar, "transform", &format!("scaleX({})", frame.bar));
        }
        true
    }

    fn refresh(&mut self) {
        self.top = dom::bounds(&self.placeholder).top;
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let mut pinned = 0;
    for ids in STRIPS {
        if let Some(strip) = PinnedStrip::new(ctx, ids)? {
            ctx.triggers.add(strip);
            pinned += 1;
        }
    }
    info!("Pinned {} horizontal strips", pinned);
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_slides_until_right_aligned() {
        assert_eq!(horizontal_offset(3_000.0, 1_000.0, 0.0), 0.0);
        assert_eq!(horizontal_offset(3_000.0, 1_000.0, 0.5), -1_000.0);
        assert_eq!(horizontal_offset(3_000.0, 1_000.0, 1.0), -2_000.0);
    }

    #[test]
    fn narrow_content_never_moves() {
        assert_eq!(horizontal_offset(800.0, 1_000.0, 1.0), 0.0);
    }

    #[test]
    fn offset_tracks_scroll_through_the_budget() {
        let span = TriggerSpan { start: 2_000.0, end: 3_500.0 };
        let mut previous = 0.0;
        for step in 0..=30 {
            let y = 2_000.0 + step as f64 * 50.0;
            let offset = horizontal_offset(3_000.0, 1_000.0, span.progress(y));
            assert!(offset <= previous);
            previous = offset;
        }
        assert_eq!(previous, -2_000.0);
    }

    #[test]
    fn phases_follow_the_span() {
        let span = TriggerSpan { start: 1_000.0, end: 2_500.0 };
        assert_eq!(PinPhase::at(999.0, &span), PinPhase::Before);
        assert_eq!(PinPhase::at(1_000.0, &span), PinPhase::Pinned);
        assert_eq!(PinPhase::at(2_500.0, &span), PinPhase::Pinned);
        assert_eq!(PinPhase::at(2_501.0, &span), PinPhase::After);
    }

    #[test]
    fn progress_bar_tracks_the_scrollbar_while_the_slide_lags() {
        let span = TriggerSpan { start: 1_000.0, end: 2_500.0 };
        let mut scrub = Scrub::new(1.0);
        StripFrame::next(&mut scrub, &span, 1_000.0, 0.0);

        let frame = StripFrame::next(&mut scrub, &span, 1_750.0, 1.0 / 60.0);
        assert_eq!(frame.bar, 0.5);
        assert!(frame.slide > 0.0 && frame.slide < 0.5);
    }
}

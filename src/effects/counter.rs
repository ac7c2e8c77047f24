//! Statistics that count up from zero the first time they scroll into view.

use std::sync::OnceLock;

use log::{debug, info};
use regex::Regex;
use web_sys::HtmlElement;

use crate::anim::easing::Ease;
use crate::anim::scroll::{ScrollEffect, Viewport};
use crate::anim::trigger::{Bounds, Edge, Once, TriggerPosition};
use crate::anim::tween::Tween;
use crate::anim::Animator;
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

fn stat_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([^0-9]*)([0-9]+)(.*)$").expect("stat pattern is valid"))
}

/// `"+120 Clients"` split into `"+"`, `120` and `" Clients"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFormat {
    pub prefix: String,
    pub target: u64,
    pub suffix: String,
}

impl StatFormat {
    pub fn parse(text: &str) -> Option<Self> {
        let caps = stat_pattern().captures(text)?;
        Some(Self {
            prefix: caps[1].to_string(),
            target: caps[2].parse().ok()?,
            suffix: caps[3].to_string(),
        })
    }

    /// Whole number to show for an in-flight value, kept within `0..=target`.
    pub fn displayed(&self, value: f64) -> u64 {
        if value.is_nan() || value <= 0.0 {
            return 0;
        }
        (value.floor() as u64).min(self.target)
    }

    pub fn render(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, self.displayed(value), self.suffix)
    }

    pub fn tween(&self, duration: f64) -> Tween {
        Tween::new(0.0, self.target as f64, duration).eased(Ease::Power2Out)
    }
}

struct StatCounter {
    element: HtmlElement,
    bounds: Bounds,
    format: StatFormat,
    start: TriggerPosition,
    once: Once,
    duration: f64,
    animator: Animator,
}

impl ScrollEffect for StatCounter {
    fn update(&mut self, viewport: &Viewport) -> bool {
        let start = self.start.scroll_offset(self.bounds, viewport.height);
        if !self.once.check(viewport.scroll_y, start) {
            return true;
        }
        let element = self.element.clone();
        let format = self.format.clone();
        self.animator.play(self.format.tween(self.duration), move |value| {
            element.set_inner_text(&format.render(value));
        });
        false
    }

    fn refresh(&mut self) {
        self.bounds = dom::bounds(&self.element);
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let start = TriggerPosition::new(Edge::Top, Edge::Percent(ctx.config.trigger_percent()));
    let mut counters = 0;
    for element in dom::query_all(".stat-val")? {
        let text = element.inner_text();
        let Some(format) = StatFormat::parse(&text) else {
            debug!("Leaving non-numeric stat {:?} alone", text);
            continue;
        };
        element.set_inner_text(&format.render(0.0));
        ctx.triggers.add(StatCounter {
            bounds: dom::bounds(&element),
            element,
            format,
            start,
            once: Once::default(),
            duration: ctx.config.counter_duration,
            animator: ctx.animator.clone(),
        });
        counters += 1;
    }
    info!("Counters on {} stats", counters);
    Ok(Vec::new())
}

//! Process steps highlight while they cross the middle of the viewport.

use std::cell::Cell;
use std::rc::Rc;

use log::info;
use web_sys::HtmlElement;

use crate::anim::animator::TweenId;
use crate::anim::easing::Ease;
use crate::anim::scroll::{ScrollEffect, Viewport};
use crate::anim::trigger::{
    Action, Bounds, Edge, ToggleActions, TriggerEnd, TriggerPosition, TriggerSpan, ZoneTracker,
};
use crate::anim::tween::Tween;
use crate::anim::Animator;
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

const ACTIVE: &str = "active";
const NUDGE: f64 = 20.0;
const NUDGE_DURATION: f64 = 0.5;

const START: TriggerPosition = TriggerPosition::new(Edge::Top, Edge::Center);
const END: TriggerEnd = TriggerEnd::Position(TriggerPosition::new(Edge::Bottom, Edge::Center));

pub const ACTIONS: ToggleActions = ToggleActions {
    on_enter: Action::Play,
    on_leave: Action::Reverse,
    on_enter_back: Action::Play,
    on_leave_back: Action::Reverse,
};

/// Tween from wherever the step currently is toward its played or reversed end.
pub fn nudge(current: f64, action: Action) -> Option<Tween> {
    let to = match action {
        Action::Play => NUDGE,
        Action::Reverse => 0.0,
        Action::None => return None,
    };
    let remaining = ((to - current).abs() / NUDGE).min(1.0);
    Some(Tween::new(current, to, NUDGE_DURATION * remaining).eased(Ease::Power1Out))
}

struct ProcessStep {
    step: HtmlElement,
    bounds: Bounds,
    tracker: ZoneTracker,
    offset: Rc<Cell<f64>>,
    running: Option<TweenId>,
    animator: Animator,
}

impl ProcessStep {
    fn run(&mut self, action: Action) {
        let Some(tween) = nudge(self.offset.get(), action) else {
            return;
        };
        if let Some(id) = self.running.take() {
            self.animator.cancel(id);
        }
        dom::set_class(&self.step, ACTIVE, action == Action::Play);
        let (step, offset) = (self.step.clone(), self.offset.clone());
        self.running = Some(self.animator.play(tween, move |x| {
            offset.set(x);
            dom::set_style(&step, "transform", &format!("translateX({}px)", x));
        }));
    }
}

impl ScrollEffect for ProcessStep {
    fn update(&mut self, viewport: &Viewport) -> bool {
        let span = TriggerSpan::resolve(START, END, self.bounds, viewport.height);
        for crossing in self.tracker.update(span.zone(viewport.scroll_y)) {
            self.run(ACTIONS.action(crossing));
        }
        true
    }

    fn refresh(&mut self) {
        self.bounds = dom::bounds(&self.step);
    }
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let steps = dom::query_all(".process__step")?;
    for step in &steps {
        ctx.triggers.add(ProcessStep {
            step: step.clone(),
            bounds: dom::bounds(step),
            tracker: ZoneTracker::default(),
            offset: Rc::new(Cell::new(0.0)),
            running: None,
            animator: ctx.animator.clone(),
        });
    }
    info!("Highlight on {} process steps", steps.len());
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::trigger::Crossing;

    #[test]
    fn matches_the_declared_toggle_actions() {
        assert_eq!(ACTIONS, "play reverse play reverse".parse::<ToggleActions>().unwrap());
        assert_eq!(ACTIONS.action(Crossing::LeaveBack), Action::Reverse);
    }

    #[test]
    fn reversing_midway_heads_home_from_where_it_is() {
        let tween = nudge(12.0, Action::Reverse).unwrap();
        assert_eq!((tween.from, tween.to), (12.0, 0.0));
        assert!((tween.duration - 0.3).abs() < 1e-9);
        assert_eq!(tween.ease, Ease::Power1Out);
    }

    #[test]
    fn no_action_means_no_tween() {
        assert!(nudge(5.0, Action::None).is_none());
    }
}

use std::rc::Rc;

use crate::anim::scroll::TriggerSet;
use crate::anim::Animator;
use crate::config::SiteConfig;
use crate::dom::{self, FrameLoop};
use crate::error::SiteError;
use crate::smooth_scroll::ScrollDriver;
use crate::theme::RootStyle;

/// Everything page features share. Clones are cheap and all point at the
/// same driver, animator and trigger set.
#[derive(Clone)]
pub struct SiteContext {
    pub config: Rc<SiteConfig>,
    pub scroll: ScrollDriver,
    pub animator: Animator,
    pub triggers: TriggerSet,
    pub root_style: RootStyle,
}

impl SiteContext {
    pub fn new(config: SiteConfig) -> Result<Self, SiteError> {
        let scroll = ScrollDriver::new(config.smooth_scroll);
        Ok(Self {
            config: Rc::new(config),
            scroll,
            animator: Animator::new(),
            triggers: TriggerSet::new(),
            root_style: RootStyle::document()?,
        })
    }

    /// One frame: smooth scroll first so triggers see the new position.
    pub fn run_frames(&self) -> Result<FrameLoop, SiteError> {
        let ctx = self.clone();
        let mut last_frame: Option<f64> = None;
        FrameLoop::start(move |time| {
            let dt = last_frame
                .map(|last| ((time - last) / 1000.0).max(0.0))
                .unwrap_or(0.0);
            last_frame = Some(time);

            ctx.scroll.raf(time);
            ctx.animator.tick(time);
            ctx.triggers.update(&dom::viewport(dt));
        })
    }
}

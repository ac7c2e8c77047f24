use std::cell::RefCell;

use log::{error, info, warn};

pub mod config;
pub mod context;
pub mod dom;
pub mod error;
pub mod smooth_scroll;
pub mod theme;

pub mod anim {
    pub mod animator;
    pub mod easing;
    pub mod scroll;
    pub mod timeline;
    pub mod trigger;
    pub mod tween;

    pub use self::animator::Animator;
}

pub mod effects {
    pub mod counter;
    pub mod forms;
    pub mod hero;
    pub mod menu;
    pub mod modal;
    pub mod nav;
    pub mod parallax;
    pub mod pinning;
    pub mod process;
    pub mod reveal;
    pub mod tabs;
    pub mod transition;
}

pub mod components {
    pub mod theme_switcher;
}

use config::SiteConfig;
use context::SiteContext;
use dom::{FrameLoop, Listener};
use error::SiteError;

type Wire = fn(&SiteContext) -> Result<Vec<Listener>, SiteError>;

/// Page features, wired in this order. Each is independent: one failing to
/// wire is logged and the rest still run.
const FEATURES: &[(&str, Wire)] = &[
    ("page transition", effects::transition::wire),
    ("forms", effects::forms::wire),
    ("hero", effects::hero::wire),
    ("pinned strips", effects::pinning::wire),
    ("tabs", effects::tabs::wire),
    ("parallax", effects::parallax::wire),
    ("section reveal", effects::reveal::wire),
    ("process steps", effects::process::wire),
    ("stat counters", effects::counter::wire),
    ("nav bar", effects::nav::wire),
    ("mobile menu", effects::menu::wire),
    ("team modal", effects::modal::wire),
];

/// Everything the running page holds on to. Dropping it unsubscribes every
/// listener and stops the frame loop.
pub struct Site {
    pub ctx: SiteContext,
    _listeners: Vec<Listener>,
    _frames: FrameLoop,
}

impl Site {
    pub fn wire(ctx: SiteContext) -> Result<Self, SiteError> {
        let mut listeners = vec![ctx.scroll.attach()?];

        for (name, wire) in FEATURES {
            match wire(&ctx) {
                Ok(mut wired) => listeners.append(&mut wired),
                Err(err) => warn!("Skipping {}: {}", name, err),
            }
        }

        // Late images and fonts shift layout after wiring.
        let window = dom::window()?;
        for event in ["resize", "load"] {
            let triggers = ctx.triggers.clone();
            listeners.push(Listener::new(&window, event, move |_| triggers.refresh())?);
        }
        ctx.triggers.refresh();

        if ctx.config.theme_switcher {
            if let Err(err) = components::theme_switcher::mount(ctx.root_style.clone()) {
                warn!("Theme switcher unavailable: {}", err);
            }
        }

        let frames = ctx.run_frames()?;
        info!(
            "Site wired: {} listeners, {} scroll effects",
            listeners.len(),
            ctx.triggers.len()
        );
        Ok(Self {
            ctx,
            _listeners: listeners,
            _frames: frames,
        })
    }
}

thread_local! {
    static SITE: RefCell<Option<Site>> = RefCell::new(None);
}

fn boot() {
    let config = SiteConfig::load();
    let wired = SiteContext::new(config).and_then(Site::wire);
    match wired {
        Ok(site) => SITE.with(|slot| *slot.borrow_mut() = Some(site)),
        Err(err) => error!("Site runtime failed to start: {}", err),
    }
}

/// Wires the page now, or once the DOM has been parsed.
pub fn start() -> Result<(), SiteError> {
    let document = dom::document()?;
    if document.ready_state() == "loading" {
        Listener::new(&document, "DOMContentLoaded", |_| boot())?.forget();
    } else {
        boot();
    }
    Ok(())
}

use log::{debug, info};

use crate::anim::easing::Ease;
use crate::anim::timeline::{Position, Timeline};
use crate::anim::tween::Tween;
use crate::context::SiteContext;
use crate::dom::{self, Listener};
use crate::error::SiteError;

/// Title characters rise from one line-height below (`translateY(100%)`).
pub fn title_tween() -> Tween {
    Tween::new(100.0, 0.0, 1.5).eased(Ease::Power4Out).delayed(0.5)
}

pub fn subtitle_tween() -> Tween {
    Tween::new(0.0, 1.0, 1.0).eased(Ease::Power2Out)
}

/// Title characters staggered by 0.1s, subtitle fading in one second before
/// the last character lands.
pub fn schedule(chars: usize) -> (Vec<Tween>, Tween) {
    let mut timeline = Timeline::new();
    let title = timeline.to(title_tween(), chars, 0.1, Position::End);
    let subtitle = timeline
        .to(subtitle_tween(), 1, 0.0, Position::Relative(-1.0))
        .remove(0);
    (title, subtitle)
}

pub fn wire(ctx: &SiteContext) -> Result<Vec<Listener>, SiteError> {
    let chars = dom::query_all(".hero__title .char")?;
    let subtitle = dom::query(".hero__subtitle");
    if chars.is_empty() && subtitle.is_none() {
        debug!("No hero on this page");
        return Ok(Vec::new());
    }

    let (title_tweens, subtitle_tween) = schedule(chars.len());
    for (char_el, tween) in chars.iter().zip(title_tweens) {
        let char_el = char_el.clone();
        ctx.animator.play(tween, move |y| {
            dom::set_style(&char_el, "transform", &format!("translateY({}%)", y));
        });
    }
    if let Some(subtitle) = subtitle {
        ctx.animator.play(subtitle_tween, move |opacity| {
            dom::set_style(&subtitle, "opacity", &opacity.to_string());
        });
    }
    info!("Hero reveal over {} characters", chars.len());
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characters_follow_one_another() {
        let (title, _) = schedule(5);
        let starts: Vec<f64> = title.iter().map(|t| (t.delay * 10.0).round() / 10.0).collect();
        assert_eq!(starts, vec![0.5, 0.6, 0.7, 0.8, 0.9]);
        assert!(title.iter().all(|t| t.to == 0.0 && t.duration == 1.5));
    }

    #[test]
    fn subtitle_overlaps_the_title_by_a_second() {
        let (title, subtitle) = schedule(5);
        let title_end = title.last().unwrap().total();
        assert!((subtitle.delay - (title_end - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn subtitle_still_plays_without_characters() {
        let (title, subtitle) = schedule(0);
        assert!(title.is_empty());
        assert_eq!(subtitle.delay, 0.0);
    }
}

use super::easing::Ease;

/// A single numeric animation. Times are in seconds, measured from the
/// moment the tween is handed to an [`Animator`](super::animator::Animator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease: Ease::None,
        }
    }

    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn total(&self) -> f64 {
        self.delay + self.duration
    }

    pub fn has_started(&self, elapsed: f64) -> bool {
        elapsed >= self.delay
    }

    pub fn progress_at(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return if self.has_started(elapsed) { 1.0 } else { 0.0 };
        }
        ((elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, elapsed: f64) -> f64 {
        let progress = self.progress_at(elapsed);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }

    pub fn is_complete(&self, elapsed: f64) -> bool {
        elapsed >= self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_start_value_during_delay() {
        let tween = Tween::new(10.0, 20.0, 1.0).delayed(0.5);
        assert_eq!(tween.value_at(0.0), 10.0);
        assert_eq!(tween.value_at(0.5), 10.0);
        assert!(!tween.has_started(0.49));
        assert_eq!(tween.value_at(1.0), 15.0);
    }

    #[test]
    fn lands_exactly_on_target() {
        let tween = Tween::new(0.0, 120.0, 2.0).eased(Ease::Power2Out);
        assert_eq!(tween.value_at(2.0), 120.0);
        assert_eq!(tween.value_at(60.0), 120.0);
        assert!(tween.is_complete(2.0));
        assert!(!tween.is_complete(1.999));
    }

    #[test]
    fn zero_duration_jumps_after_delay() {
        let tween = Tween::new(1.0, 0.0, 0.0).delayed(0.2);
        assert_eq!(tween.value_at(0.1), 1.0);
        assert_eq!(tween.value_at(0.2), 0.0);
    }

    #[test]
    fn runs_downwards_too() {
        let tween = Tween::new(1.0, 0.0, 1.0);
        assert_eq!(tween.value_at(0.25), 0.75);
    }
}

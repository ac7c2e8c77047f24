use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::tween::Tween;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

struct Running {
    id: TweenId,
    tween: Tween,
    started_at: Option<f64>,
    on_update: Box<dyn FnMut(f64)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct Inner {
    running: RefCell<Vec<Running>>,
    cancelled: RefCell<Vec<TweenId>>,
    next_id: Cell<u64>,
}

/// Drives every time-based tween on the page from the shared frame loop.
///
/// Callbacks may start or cancel tweens while a tick is in progress; new
/// tweens begin on the following frame.
#[derive(Clone, Default)]
pub struct Animator {
    inner: Rc<Inner>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play<U>(&self, tween: Tween, on_update: U) -> TweenId
    where
        U: FnMut(f64) + 'static,
    {
        self.schedule(tween, Box::new(on_update), None)
    }

    /// Plays `tween` and calls `on_complete` once, after the final update.
    pub fn play_then<U, C>(&self, tween: Tween, on_update: U, on_complete: C) -> TweenId
    where
        U: FnMut(f64) + 'static,
        C: FnOnce() + 'static,
    {
        self.schedule(tween, Box::new(on_update), Some(Box::new(on_complete)))
    }

    fn schedule(
        &self,
        tween: Tween,
        on_update: Box<dyn FnMut(f64)>,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> TweenId {
        let id = TweenId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.running.borrow_mut().push(Running {
            id,
            tween,
            started_at: None,
            on_update,
            on_complete,
        });
        id
    }

    /// Stops a tween where it is. Its completion callback never runs.
    pub fn cancel(&self, id: TweenId) {
        self.inner.running.borrow_mut().retain(|r| r.id != id);
        self.inner.cancelled.borrow_mut().push(id);
    }

    pub fn is_idle(&self) -> bool {
        self.inner.running.borrow().is_empty()
    }

    /// Advances every tween to `now_ms` (a frame timestamp in milliseconds).
    pub fn tick(&self, now_ms: f64) {
        let mut batch = std::mem::take(&mut *self.inner.running.borrow_mut());
        let mut finished = Vec::new();

        for running in batch.iter_mut() {
            if self.is_cancelled(running.id) {
                continue;
            }
            let started_at = *running.started_at.get_or_insert(now_ms);
            let elapsed = (now_ms - started_at) / 1000.0;
            if running.tween.has_started(elapsed) {
                (running.on_update)(running.tween.value_at(elapsed));
            }
            if running.tween.is_complete(elapsed) {
                finished.push(running.id);
            }
        }

        let mut completions = Vec::new();
        batch.retain_mut(|running| {
            if self.is_cancelled(running.id) {
                return false;
            }
            if finished.contains(&running.id) {
                if let Some(done) = running.on_complete.take() {
                    completions.push(done);
                }
                return false;
            }
            true
        });

        {
            let mut running = self.inner.running.borrow_mut();
            let added = std::mem::take(&mut *running);
            *running = batch;
            running.extend(added);
        }
        self.inner.cancelled.borrow_mut().clear();

        for done in completions {
            done();
        }
    }

    fn is_cancelled(&self, id: TweenId) -> bool {
        self.inner.cancelled.borrow().contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::easing::Ease;

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl FnMut(f64) + 'static) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        (values, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn clock_starts_on_first_tick() {
        let animator = Animator::new();
        let (values, sink) = recorder();
        animator.play(Tween::new(0.0, 10.0, 1.0), sink);

        animator.tick(5_000.0);
        animator.tick(5_500.0);
        animator.tick(6_000.0);

        assert_eq!(*values.borrow(), vec![0.0, 5.0, 10.0]);
        assert!(animator.is_idle());
    }

    #[test]
    fn completion_runs_once_after_final_value() {
        let animator = Animator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let updates = log.clone();
        let done = log.clone();
        animator.play_then(
            Tween::new(0.0, 1.0, 0.5).eased(Ease::Power4InOut),
            move |v| updates.borrow_mut().push(format!("{:.1}", v)),
            move || done.borrow_mut().push("done".to_string()),
        );

        for t in [0.0, 250.0, 500.0, 750.0, 1_000.0] {
            animator.tick(t);
        }

        assert_eq!(*log.borrow(), vec!["0.0", "0.5", "1.0", "done"]);
    }

    #[test]
    fn delayed_tweens_stay_silent_until_they_start() {
        let animator = Animator::new();
        let (values, sink) = recorder();
        animator.play(Tween::new(3.0, 4.0, 1.0).delayed(1.0), sink);

        animator.tick(0.0);
        animator.tick(500.0);
        assert!(values.borrow().is_empty());

        animator.tick(1_000.0);
        assert_eq!(*values.borrow(), vec![3.0]);
    }

    #[test]
    fn cancelled_tweens_never_complete() {
        let animator = Animator::new();
        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();
        let id = animator.play_then(Tween::new(0.0, 1.0, 1.0), |_| {}, move || flag.set(true));

        animator.tick(0.0);
        animator.cancel(id);
        animator.tick(2_000.0);

        assert!(!completed.get());
        assert!(animator.is_idle());
    }

    #[test]
    fn callbacks_can_chain_new_tweens() {
        let animator = Animator::new();
        let (values, sink) = recorder();
        let chained = animator.clone();
        animator.play_then(Tween::new(0.0, 1.0, 0.0), |_| {}, move || {
            chained.play(Tween::new(7.0, 8.0, 1.0), sink);
        });

        animator.tick(0.0);
        assert!(values.borrow().is_empty());
        animator.tick(16.0);
        assert_eq!(*values.borrow(), vec![7.0]);
    }
}

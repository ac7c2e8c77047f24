use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What a scroll effect sees each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
    /// Seconds since the previous frame.
    pub dt: f64,
}

/// Something bound to the scroll position.
pub trait ScrollEffect {
    /// Called once per frame. Returning `false` retires the effect.
    fn update(&mut self, viewport: &Viewport) -> bool;

    /// Layout changed (resize); re-measure anything cached.
    fn refresh(&mut self) {}
}

/// Lets an effect ask for every effect to re-measure after the current frame.
#[derive(Clone, Default)]
pub struct Relayout {
    requested: Rc<Cell<bool>>,
}

impl Relayout {
    pub fn request(&self) {
        self.requested.set(true);
    }
}

/// Every live scroll effect on the page, evaluated from the frame loop.
#[derive(Clone, Default)]
pub struct TriggerSet {
    effects: Rc<RefCell<Vec<Box<dyn ScrollEffect>>>>,
    relayout: Relayout,
}

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<E>(&self, effect: E)
    where
        E: ScrollEffect + 'static,
    {
        self.effects.borrow_mut().push(Box::new(effect));
    }

    pub fn len(&self) -> usize {
        self.effects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.borrow().is_empty()
    }

    pub fn update(&self, viewport: &Viewport) {
        let mut batch = std::mem::take(&mut *self.effects.borrow_mut());
        batch.retain_mut(|effect| effect.update(viewport));

        {
            let mut effects = self.effects.borrow_mut();
            let added = std::mem::take(&mut *effects);
            *effects = batch;
            effects.extend(added);
        }
        if self.relayout.requested.replace(false) {
            self.refresh();
        }
    }

    pub fn relayout(&self) -> Relayout {
        self.relayout.clone()
    }

    pub fn refresh(&self) {
        for effect in self.effects.borrow_mut().iter_mut() {
            effect.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FireOnce {
        at: f64,
        fired: Rc<Cell<u32>>,
    }

    impl ScrollEffect for FireOnce {
        fn update(&mut self, viewport: &Viewport) -> bool {
            if viewport.scroll_y >= self.at {
                self.fired.set(self.fired.get() + 1);
                return false;
            }
            true
        }
    }

    struct Spawner {
        set: TriggerSet,
        fired: Rc<Cell<u32>>,
    }

    impl ScrollEffect for Spawner {
        fn update(&mut self, _viewport: &Viewport) -> bool {
            self.set.add(FireOnce { at: 0.0, fired: self.fired.clone() });
            false
        }
    }

    struct Measured {
        refreshes: Rc<Cell<u32>>,
        relayout: Option<Relayout>,
    }

    impl ScrollEffect for Measured {
        fn update(&mut self, _viewport: &Viewport) -> bool {
            if let Some(relayout) = self.relayout.take() {
                relayout.request();
            }
            true
        }

        fn refresh(&mut self) {
            self.refreshes.set(self.refreshes.get() + 1);
        }
    }

    fn at(scroll_y: f64) -> Viewport {
        Viewport { scroll_y, width: 1_280.0, height: 800.0, dt: 0.016 }
    }

    #[test]
    fn retired_effects_are_dropped() {
        let set = TriggerSet::new();
        let fired = Rc::new(Cell::new(0));
        set.add(FireOnce { at: 500.0, fired: fired.clone() });

        set.update(&at(100.0));
        assert_eq!(set.len(), 1);

        set.update(&at(600.0));
        set.update(&at(100.0));
        set.update(&at(700.0));
        assert_eq!(fired.get(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn effects_added_mid_update_run_next_frame() {
        let set = TriggerSet::new();
        let fired = Rc::new(Cell::new(0));
        set.add(Spawner { set: set.clone(), fired: fired.clone() });

        set.update(&at(0.0));
        assert_eq!((fired.get(), set.len()), (0, 1));

        set.update(&at(0.0));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn layout_requests_remeasure_every_effect_once() {
        let set = TriggerSet::new();
        let (a, b) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        set.add(Measured { refreshes: a.clone(), relayout: Some(set.relayout()) });
        set.add(Measured { refreshes: b.clone(), relayout: None });

        set.update(&at(0.0));
        assert_eq!((a.get(), b.get()), (1, 1));

        set.update(&at(10.0));
        assert_eq!((a.get(), b.get()), (1, 1));
    }
}

//! Scroll-trigger geometry: turning "top 85%" style positions into scroll
//! offsets, and tracking how the scroll position moves through them.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Percent(f64),
    Pixels(f64),
}

impl Edge {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent / 2.0,
            Edge::Bottom => extent,
            Edge::Percent(percent) => extent * percent / 100.0,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("bad trigger edge `{}`", s);
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => {
                if let Some(percent) = s.strip_suffix('%') {
                    percent.parse().map(Edge::Percent).map_err(|_| bad())
                } else {
                    s.strip_suffix("px")
                        .unwrap_or(s)
                        .parse()
                        .map(Edge::Pixels)
                        .map_err(|_| bad())
                }
            }
        }
    }
}

/// A point on the element meeting a point on the viewport, e.g. `"top 85%"`:
/// the element's top reaching 85% of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPosition {
    pub element: Edge,
    pub viewport: Edge,
}

impl TriggerPosition {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// The `scrollY` at which this position is reached.
    pub fn scroll_offset(&self, bounds: Bounds, viewport_height: f64) -> f64 {
        bounds.top + self.element.resolve(bounds.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for TriggerPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Self {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(format!("expected `<element> <viewport>`, got `{}`", s)),
        }
    }
}

/// Where a trigger ends: another position, or a fixed distance past the start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerEnd {
    Position(TriggerPosition),
    After(f64),
}

impl FromStr for TriggerEnd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().strip_prefix("+=") {
            Some(distance) => distance
                .parse()
                .map(TriggerEnd::After)
                .map_err(|_| format!("bad trigger distance `{}`", s)),
            None => s.parse().map(TriggerEnd::Position),
        }
    }
}

/// Element rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

/// Scroll offsets between which a trigger is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSpan {
    pub start: f64,
    pub end: f64,
}

impl TriggerSpan {
    pub fn resolve(start: TriggerPosition, end: TriggerEnd, bounds: Bounds, viewport_height: f64) -> Self {
        let start = start.scroll_offset(bounds, viewport_height);
        let end = match end {
            TriggerEnd::After(distance) => start + distance,
            TriggerEnd::Position(position) => position.scroll_offset(bounds, viewport_height),
        };
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn progress(&self, scroll_y: f64) -> f64 {
        if self.end <= self.start {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    pub fn zone(&self, scroll_y: f64) -> Zone {
        if scroll_y < self.start {
            Zone::Before
        } else if scroll_y > self.end {
            Zone::After
        } else {
            Zone::Inside
        }
    }
}

/// Fires the first time the scroll position reaches a start offset, never again.
#[derive(Debug, Clone, Copy, Default)]
pub struct Once {
    fired: bool,
}

impl Once {
    pub fn check(&mut self, scroll_y: f64, start: f64) -> bool {
        if self.fired || scroll_y < start {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Before,
    Inside,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Remembers which side of a span the scroll position was on and reports
/// every boundary crossed since the last update.
#[derive(Debug, Clone, Copy)]
pub struct ZoneTracker {
    zone: Zone,
}

impl Default for ZoneTracker {
    fn default() -> Self {
        Self { zone: Zone::Before }
    }
}

impl ZoneTracker {
    pub fn update(&mut self, zone: Zone) -> Vec<Crossing> {
        let crossings = match (self.zone, zone) {
            (Zone::Before, Zone::Inside) => vec![Crossing::Enter],
            (Zone::Before, Zone::After) => vec![Crossing::Enter, Crossing::Leave],
            (Zone::Inside, Zone::After) => vec![Crossing::Leave],
            (Zone::After, Zone::Inside) => vec![Crossing::EnterBack],
            (Zone::After, Zone::Before) => vec![Crossing::EnterBack, Crossing::LeaveBack],
            (Zone::Inside, Zone::Before) => vec![Crossing::LeaveBack],
            _ => Vec::new(),
        };
        self.zone = zone;
        crossings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    Reverse,
    None,
}

/// What to do on enter, leave, enter-back and leave-back, in that order,
/// e.g. `"play reverse play reverse"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: Action,
    pub on_leave: Action,
    pub on_enter_back: Action,
    pub on_leave_back: Action,
}

impl ToggleActions {
    pub fn action(&self, crossing: Crossing) -> Action {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(|word| match word {
                "play" => Ok(Action::Play),
                "reverse" => Ok(Action::Reverse),
                "none" => Ok(Action::None),
                other => Err(format!("unknown toggle action `{}`", other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        match actions[..] {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            _ => Err(format!("expected four toggle actions, got `{}`", s)),
        }
    }
}

/// Lags a value behind its target, reaching it in roughly `lag` seconds.
/// A lag of zero follows the target exactly.
#[derive(Debug, Clone, Copy)]
pub struct Scrub {
    lag: f64,
    current: Option<f64>,
}

impl Scrub {
    pub fn new(lag: f64) -> Self {
        Self { lag, current: None }
    }

    pub fn step(&mut self, target: f64, dt: f64) -> f64 {
        let next = match self.current {
            Some(current) if self.lag > 0.0 => {
                let blend = 1.0 - (-4.0 * dt.max(0.0) / self.lag).exp();
                let next = current + (target - current) * blend;
                if (target - next).abs() < 1e-4 {
                    target
                } else {
                    next
                }
            }
            _ => target,
        };
        self.current = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_positions_the_site_uses() {
        let reveal: TriggerPosition = "top 85%".parse().unwrap();
        assert_eq!(reveal, TriggerPosition::new(Edge::Top, Edge::Percent(85.0)));

        let pin: TriggerPosition = "top top".parse().unwrap();
        assert_eq!(pin, TriggerPosition::new(Edge::Top, Edge::Top));

        assert_eq!("+=1500".parse::<TriggerEnd>().unwrap(), TriggerEnd::After(1500.0));
        assert_eq!(
            "bottom center".parse::<TriggerEnd>().unwrap(),
            TriggerEnd::Position(TriggerPosition::new(Edge::Bottom, Edge::Center))
        );
        assert_eq!("120px".parse::<Edge>().unwrap(), Edge::Pixels(120.0));

        assert!("top".parse::<TriggerPosition>().is_err());
        assert!("middle top".parse::<TriggerPosition>().is_err());
    }

    #[test]
    fn reveal_line_sits_at_85_percent_of_the_viewport() {
        let bounds = Bounds { top: 2_000.0, height: 400.0 };
        let start = "top 85%".parse::<TriggerPosition>().unwrap();
        assert_eq!(start.scroll_offset(bounds, 1_000.0), 1_150.0);
    }

    #[test]
    fn pinned_span_runs_for_the_budget() {
        let bounds = Bounds { top: 3_000.0, height: 900.0 };
        let span = TriggerSpan::resolve(
            "top top".parse().unwrap(),
            TriggerEnd::After(1_500.0),
            bounds,
            800.0,
        );
        assert_eq!(span, TriggerSpan { start: 3_000.0, end: 4_500.0 });
        assert_eq!(span.progress(2_000.0), 0.0);
        assert_eq!(span.progress(3_750.0), 0.5);
        assert_eq!(span.progress(9_000.0), 1.0);
    }

    #[test]
    fn parallax_span_covers_the_whole_pass_through_the_viewport() {
        let span = TriggerSpan::resolve(
            "top bottom".parse().unwrap(),
            "bottom top".parse().unwrap(),
            Bounds { top: 1_000.0, height: 500.0 },
            800.0,
        );
        assert_eq!(span.start, 200.0);
        assert_eq!(span.end, 1_500.0);
    }

    #[test]
    fn once_fires_a_single_time() {
        let mut once = Once::default();
        assert!(!once.check(100.0, 500.0));
        assert!(once.check(500.0, 500.0));
        assert!(!once.check(900.0, 500.0));
        assert!(!once.check(100.0, 500.0));
        assert!(!once.check(600.0, 500.0));
        assert!(once.has_fired());
    }

    #[test]
    fn tracker_reports_every_crossing() {
        let mut tracker = ZoneTracker::default();
        assert!(tracker.update(Zone::Before).is_empty());
        assert_eq!(tracker.update(Zone::Inside), vec![Crossing::Enter]);
        assert_eq!(tracker.update(Zone::After), vec![Crossing::Leave]);
        assert_eq!(tracker.update(Zone::Before), vec![Crossing::EnterBack, Crossing::LeaveBack]);
        assert_eq!(tracker.update(Zone::After), vec![Crossing::Enter, Crossing::Leave]);
    }

    #[test]
    fn toggle_actions_map_crossings() {
        let actions: ToggleActions = "play reverse play reverse".parse().unwrap();
        assert_eq!(actions.action(Crossing::Enter), Action::Play);
        assert_eq!(actions.action(Crossing::Leave), Action::Reverse);
        assert_eq!(actions.action(Crossing::EnterBack), Action::Play);
        assert_eq!(actions.action(Crossing::LeaveBack), Action::Reverse);

        assert!("play reverse".parse::<ToggleActions>().is_err());
        assert!("play reverse play restart".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn scrub_catches_up_without_overshooting() {
        let mut scrub = Scrub::new(1.0);
        assert_eq!(scrub.step(0.0, 0.0), 0.0);

        let mut previous = 0.0;
        for _ in 0..30 {
            let value = scrub.step(1.0, 1.0 / 60.0);
            assert!(value > previous && value <= 1.0);
            previous = value;
        }
        assert!(previous < 1.0);

        for _ in 0..120 {
            previous = scrub.step(1.0, 1.0 / 60.0);
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn zero_lag_follows_directly() {
        let mut scrub = Scrub::new(0.0);
        scrub.step(0.2, 0.016);
        assert_eq!(scrub.step(0.9, 0.016), 0.9);
    }
}

use std::str::FromStr;

use super::tween::Tween;

/// Where the next entry of a [`Timeline`] starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// Right after everything placed so far.
    #[default]
    End,
    /// Offset from the current end, `"-=1"` or `"+=0.5"`.
    Relative(f64),
    /// Absolute time in seconds.
    At(f64),
}

impl Position {
    fn resolve(self, end: f64) -> f64 {
        match self {
            Position::End => end,
            Position::Relative(offset) => (end + offset).max(0.0),
            Position::At(at) => at.max(0.0),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| format!("bad timeline position `{}`", s))
        };
        if s.is_empty() {
            Ok(Position::End)
        } else if let Some(rest) = s.strip_prefix("-=") {
            Ok(Position::Relative(-parse(rest)?))
        } else if let Some(rest) = s.strip_prefix("+=") {
            Ok(Position::Relative(parse(rest)?))
        } else {
            Ok(Position::At(parse(s)?))
        }
    }
}

/// Lays tweens out on a shared clock. Every returned tween carries its
/// absolute start in `delay`, so they can all be played at the same instant.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    end: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `count` copies of `tween`, each `stagger` seconds after the
    /// previous one. The tween's own delay is added on top of `position`.
    pub fn to(&mut self, tween: Tween, count: usize, stagger: f64, position: Position) -> Vec<Tween> {
        let start = position.resolve(self.end) + tween.delay;
        let placed: Vec<Tween> = (0..count)
            .map(|i| tween.delayed(start + i as f64 * stagger))
            .collect();
        if let Some(last) = placed.last() {
            self.end = self.end.max(last.total());
        }
        placed
    }

    pub fn duration(&self) -> f64 {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positions() {
        assert_eq!("-=1".parse::<Position>().unwrap(), Position::Relative(-1.0));
        assert_eq!("+=0.25".parse::<Position>().unwrap(), Position::Relative(0.25));
        assert_eq!("2".parse::<Position>().unwrap(), Position::At(2.0));
        assert_eq!("".parse::<Position>().unwrap(), Position::End);
        assert!("-=soon".parse::<Position>().is_err());
    }

    #[test]
    fn staggers_from_the_tween_delay() {
        let mut timeline = Timeline::new();
        let placed = timeline.to(Tween::new(100.0, 0.0, 1.5).delayed(0.5), 3, 0.1, Position::End);

        let starts: Vec<f64> = placed.iter().map(|t| t.delay).collect();
        assert_eq!(starts.len(), 3);
        assert!((starts[0] - 0.5).abs() < 1e-9);
        assert!((starts[2] - 0.7).abs() < 1e-9);
        assert!((timeline.duration() - 2.2).abs() < 1e-9);
    }

    #[test]
    fn relative_entries_overlap_the_previous_end() {
        let mut timeline = Timeline::new();
        timeline.to(Tween::new(0.0, 1.0, 2.0), 1, 0.0, Position::End);
        let overlap = timeline.to(Tween::new(0.0, 1.0, 1.0), 1, 0.0, Position::Relative(-1.0));

        assert_eq!(overlap[0].delay, 1.0);
        assert_eq!(timeline.duration(), 2.0);
    }

    #[test]
    fn empty_batches_do_not_move_the_end() {
        let mut timeline = Timeline::new();
        assert!(timeline.to(Tween::new(0.0, 1.0, 3.0), 0, 0.1, Position::End).is_empty());
        assert_eq!(timeline.duration(), 0.0);
    }
}

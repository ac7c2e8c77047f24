use serde::Deserialize;

/// Easing curves used across the site. The `PowerN` names follow the usual
/// web animation convention, where `power2` is a cubic and `power4` a quintic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    None,
    Power1Out,
    Power2Out,
    Power3Out,
    Power4Out,
    Power4InOut,
    /// Exponential settle used by the smooth-scroll driver.
    Expo,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::None => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::Power4InOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Ease::Expo => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

//! Easing functions applied to per-entity animation phase.

/// Easing applied to a normalized phase in [0, 1].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Symmetric cubic ease: slow start, fast middle, slow end.
    InOutCubic,
    /// Half-cosine ease, gentler than cubic.
    InOutSine,
}

impl Easing {
    /// Map `t` in [0, 1] to an eased value in [0, 1]. Fixed points at 0 and 1.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Easing::InOutSine => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}

//! Fourier spectrum generation and sampling.
//!
//! A spectrum is a fixed set of weighted frequency components. Sampling it
//! over one period traces a closed loop; the derivatives orient markers
//! travelling along that loop.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::params::{AmplitudeMode, SpectrumParams};

/// One weighted sinusoid of the series. Immutable once generated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrequencyComponent {
    /// Integer cycles per period. Signed; zero is the suppressed DC term.
    pub freq: i32,
    pub amplitude: f32,
    /// Phase offset in radians, in [0, 2π).
    pub phase: f32,
}

/// Position, velocity and acceleration at one phase value.
///
/// Velocity and acceleration are the per-turn derivatives (the 2π chain-rule
/// factor is left out); they feed `atan2` orientation, which is insensitive
/// to uniform scaling.
#[derive(Copy, Clone, Debug, Default)]
pub struct LoopSample {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// A truncated Fourier series with integer frequencies.
///
/// Frequencies run symmetrically from `-n/2` to `n/2 - 1` for a requested
/// even component count `n`. Integer frequencies make every sample periodic
/// with period 1 in the phase parameter.
#[derive(Clone, Debug)]
pub struct Spectrum {
    components: Vec<FrequencyComponent>,
}

impl Spectrum {
    /// Generate a spectrum from a decaying amplitude envelope and random phases.
    ///
    /// The envelope is `scale * decay^|freq|`, optionally normalized by
    /// `(1 - decay)` so total envelope mass is comparable across decay
    /// values. Amplitudes are drawn uniformly under the envelope or pinned
    /// to it, per `params.amplitude_mode`; phases are always uniform in
    /// [0, 2π). The DC component keeps amplitude zero so the loop has no
    /// net offset.
    ///
    /// Two calls with identical params and an identically seeded `rng`
    /// produce identical spectra.
    pub fn generate(params: &SpectrumParams, rng: &mut impl Rng) -> Self {
        let half = params.num_components as i32 / 2;
        let norm = if params.normalize_envelope {
            1.0 - params.decay
        } else {
            1.0
        };

        let mut components = Vec::with_capacity(params.num_components);
        for freq in -half..half {
            let max_amp = if freq == 0 {
                0.0
            } else {
                params.scale * norm * params.decay.powi(freq.abs())
            };
            let amplitude = match params.amplitude_mode {
                AmplitudeMode::Random => rng.gen_range(0.0..=max_amp),
                AmplitudeMode::Deterministic => max_amp,
            };
            components.push(FrequencyComponent {
                freq,
                amplitude,
                phase: rng.gen_range(0.0..TAU),
            });
        }

        Self { components }
    }

    pub fn components(&self) -> &[FrequencyComponent] {
        &self.components
    }

    /// Sample the loop position at phase `amt` (periodic, used modulo 1).
    pub fn position(&self, amt: f32) -> Vec2 {
        let mut p = Vec2::ZERO;
        for c in &self.components {
            let theta = TAU * c.freq as f32 * amt + c.phase;
            p += c.amplitude * Vec2::new(theta.cos(), theta.sin());
        }
        p
    }

    /// Sample position, velocity and acceleration in a single pass.
    ///
    /// The angle per component is computed once and shared by all three
    /// accumulators. Components reduce in storage order, so results are
    /// reproducible bit-for-bit.
    pub fn sample(&self, amt: f32) -> LoopSample {
        let mut out = LoopSample::default();
        for c in &self.components {
            let theta = TAU * c.freq as f32 * amt + c.phase;
            let (sin, cos) = theta.sin_cos();
            let f = c.freq as f32;
            out.position += c.amplitude * Vec2::new(cos, sin);
            out.velocity += c.amplitude * f * Vec2::new(-sin, cos);
            out.acceleration += c.amplitude * f * f * Vec2::new(-cos, -sin);
        }
        out
    }

    /// Discretize one full period into `num_samples` points.
    ///
    /// Points sit at `amt = i / num_samples`; the loop is implicitly closed
    /// (sampling at 0 and 1 coincide), so no duplicate closing point is
    /// emitted.
    pub fn path(&self, num_samples: usize) -> Vec<Vec2> {
        (0..num_samples)
            .map(|i| self.position(i as f32 / num_samples as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_params() -> SpectrumParams {
        SpectrumParams {
            num_components: 8,
            scale: 1.0,
            decay: 0.5,
            amplitude_mode: AmplitudeMode::Random,
            normalize_envelope: false,
        }
    }

    #[test]
    fn frequencies_run_symmetrically() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let spectrum = Spectrum::generate(&test_params(), &mut rng);

        let freqs: Vec<i32> = spectrum.components().iter().map(|c| c.freq).collect();
        assert_eq!(freqs, vec![-4, -3, -2, -1, 0, 1, 2, 3]);
    }

    #[test]
    fn dc_component_is_suppressed() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let spectrum = Spectrum::generate(&test_params(), &mut rng);

        let dc = spectrum.components().iter().find(|c| c.freq == 0).unwrap();
        assert_eq!(dc.amplitude, 0.0);
    }

    #[test]
    fn same_seed_gives_identical_spectra() {
        let params = test_params();
        let a = Spectrum::generate(&params, &mut ChaCha8Rng::seed_from_u64(99));
        let b = Spectrum::generate(&params, &mut ChaCha8Rng::seed_from_u64(99));

        assert_eq!(a.components(), b.components());
    }

    #[test]
    fn envelope_is_nonincreasing_in_abs_freq() {
        let mut params = test_params();
        params.amplitude_mode = AmplitudeMode::Deterministic;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let spectrum = Spectrum::generate(&params, &mut rng);

        for pair in spectrum
            .components()
            .iter()
            .filter(|c| c.freq > 0)
            .collect::<Vec<_>>()
            .windows(2)
        {
            assert!(pair[1].amplitude <= pair[0].amplitude);
        }
    }

    #[test]
    fn deterministic_amplitudes_follow_envelope() {
        // generate(4, scale=1, decay=0.5): the envelope decay^|freq| pins
        // amplitudes at 0.25, 0.5, 0, 0.5 for freqs -2, -1, 0, 1 when
        // unnormalized.
        let params = SpectrumParams {
            num_components: 4,
            scale: 1.0,
            decay: 0.5,
            amplitude_mode: AmplitudeMode::Deterministic,
            normalize_envelope: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let spectrum = Spectrum::generate(&params, &mut rng);

        let amps: Vec<f32> = spectrum.components().iter().map(|c| c.amplitude).collect();
        assert_eq!(amps, vec![0.25, 0.5, 0.0, 0.5]);
    }

    #[test]
    fn normalized_envelope_scales_by_one_minus_decay() {
        let mut params = test_params();
        params.amplitude_mode = AmplitudeMode::Deterministic;
        params.normalize_envelope = true;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let spectrum = Spectrum::generate(&params, &mut rng);

        // scale 1, decay 0.5: envelope at |freq| = 1 is (1 - 0.5) * 0.5.
        let c1 = spectrum.components().iter().find(|c| c.freq == 1).unwrap();
        assert!((c1.amplitude - 0.25).abs() < 1e-6);
    }

    #[test]
    fn position_is_periodic() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let spectrum = Spectrum::generate(&test_params(), &mut rng);

        for i in 0..10 {
            let t = i as f32 * 0.093;
            let a = spectrum.position(t);
            let b = spectrum.position(t + 1.0);
            assert!((a - b).length() < 1e-3, "not periodic at t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn numeric_derivative_matches_velocity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let spectrum = Spectrum::generate(&test_params(), &mut rng);

        let h = 1e-3;
        for i in 0..8 {
            let t = i as f32 * 0.121;
            let numeric = (spectrum.position(t + h) - spectrum.position(t - h)) / (2.0 * h);
            // Stored velocity is the per-turn derivative, off by the 2π
            // chain-rule factor from d/d(amt).
            let v = spectrum.sample(t).velocity * TAU;
            assert!(
                (numeric - v).length() < 0.05 * v.length().max(1.0),
                "at t={t}: numeric {numeric} vs analytic {v}"
            );
        }
    }

    #[test]
    fn numeric_derivative_matches_acceleration() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let spectrum = Spectrum::generate(&test_params(), &mut rng);

        let h = 1e-3;
        for i in 0..8 {
            let t = i as f32 * 0.137;
            let numeric =
                (spectrum.sample(t + h).velocity - spectrum.sample(t - h).velocity) / (2.0 * h);
            let a = spectrum.sample(t).acceleration * TAU;
            assert!(
                (numeric - a).length() < 0.05 * a.length().max(1.0),
                "at t={t}: numeric {numeric} vs analytic {a}"
            );
        }
    }

    #[test]
    fn degenerate_spectrum_samples_to_zero() {
        let empty = Spectrum { components: vec![] };
        let s = empty.sample(0.3);

        assert_eq!(s.position, Vec2::ZERO);
        assert_eq!(s.velocity, Vec2::ZERO);
        assert_eq!(s.acceleration, Vec2::ZERO);
        // atan2(0, 0) is the conventional fallback orientation.
        assert_eq!(s.velocity.y.atan2(s.velocity.x), 0.0);
    }

    #[test]
    fn path_has_requested_samples_and_closes() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let spectrum = Spectrum::generate(&test_params(), &mut rng);

        let n = 256;
        let path = spectrum.path(n);
        assert_eq!(path.len(), n);

        // The wrap-around gap must be no larger than the biggest step
        // between adjacent samples; periodicity guarantees no seam.
        let max_step = path
            .windows(2)
            .map(|w| (w[1] - w[0]).length())
            .fold(0.0f32, f32::max);
        let wrap_gap = (path[0] - path[n - 1]).length();
        assert!(wrap_gap <= max_step + 1e-4);
    }
}

//! Parameter definitions with documented semantics and fail-fast validation.
//!
//! Every knob the animation variants differ by lives here:
//! - spectrum shape (component count, envelope scale and decay, amplitude mode)
//! - animation timing (period, entity count, easing, orientation source)
//! - rendering style (marker shape, stroke, canvas, frame output)

use crate::easing::Easing;

/// RGBA color, straight alpha.
pub type Color = [u8; 4];

/// How component amplitudes relate to the decay envelope.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AmplitudeMode {
    /// Draw each amplitude uniformly from [0, envelope].
    #[default]
    Random,
    /// Pin each amplitude exactly to the envelope (no randomness beyond phase).
    Deterministic,
}

/// Spectrum generation parameters
#[derive(Debug, Clone)]
pub struct SpectrumParams {
    /// Number of frequency components (must be even and > 0)
    /// Frequencies run from -n/2 to n/2 - 1 inclusive.
    /// original sketch value: 1024
    pub num_components: usize,

    /// Amplitude envelope scale in canvas units (loop radius, roughly)
    /// original sketch value: 1000
    pub scale: f32,

    /// Geometric decay base for the envelope, in (0, 1); higher frequency
    /// components shrink by this factor per unit of |freq|.
    /// original sketch value: 0.4
    pub decay: f32,

    /// Random or envelope-pinned amplitudes (phases are always random)
    pub amplitude_mode: AmplitudeMode,

    /// Multiply the envelope by (1 - decay) so loops rendered with
    /// different decay values come out comparably sized
    pub normalize_envelope: bool,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            num_components: 64, // Plenty of wiggle without the original's 1024
            scale: 200.0,
            decay: 0.4,
            amplitude_mode: AmplitudeMode::Random,
            normalize_envelope: false,
        }
    }
}

impl SpectrumParams {
    /// Validate generation parameters (component count must be even, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if self.num_components == 0 || self.num_components % 2 != 0 {
            return Err(format!(
                "num_components must be even and > 0, got {}",
                self.num_components
            ));
        }
        if self.scale <= 0.0 {
            return Err(format!("scale must be > 0, got {}", self.scale));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(format!("decay must be in (0, 1), got {}", self.decay));
        }
        Ok(())
    }
}

/// Which derivative orients the moving marker.
///
/// One of the original variants pointed its markers along the acceleration
/// vector (under a velocity-ish name); that look is kept as a configuration,
/// not treated as a bug.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OrientationSource {
    #[default]
    Velocity,
    Acceleration,
}

/// Marker drawn at the sampled point, oriented along the chosen derivative.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkerShape {
    /// Filled triangle pointing along the orientation angle
    Triangle { radius: f32 },
    /// Filled disc (rotation invariant, orientation has no visible effect)
    Disc { radius: f32 },
}

impl Default for MarkerShape {
    fn default() -> Self {
        MarkerShape::Triangle { radius: 5.0 }
    }
}

/// Animation timing and arrangement parameters
#[derive(Debug, Clone)]
pub struct AnimationParams {
    /// Seconds per full traversal of the loop (must be > 0)
    /// original sketch value: 10
    pub period_s: f32,

    /// Number of independent spectrum/path entities (>= 1)
    pub num_entities: usize,

    /// Distance from canvas center to each entity's local origin, in canvas
    /// units; only meaningful when num_entities > 1
    pub arrangement_radius: f32,

    /// Easing applied to each entity's phase-offset animation value
    pub easing: Easing,

    /// Re-anchor each entity's path so its phase-0 sample sits at the local
    /// origin with its start direction pointing up (rotate by
    /// -atan2(grad.y, grad.x) + π/2, then translate by -start)
    pub reanchor_start: bool,

    /// Derivative used for marker orientation
    pub orientation: OrientationSource,

    /// Marker drawn at the sampled point
    pub marker: MarkerShape,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            period_s: 10.0,
            num_entities: 1,
            arrangement_radius: 0.0,
            easing: Easing::Linear,
            reanchor_start: false,
            orientation: OrientationSource::Velocity,
            marker: MarkerShape::default(),
        }
    }
}

impl AnimationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.period_s <= 0.0 {
            return Err(format!("period_s must be > 0, got {}", self.period_s));
        }
        if self.num_entities == 0 {
            return Err("num_entities must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Stroke and path discretization style
#[derive(Debug, Clone)]
pub struct StyleParams {
    /// Samples per discretized loop (>= 3)
    pub path_samples: usize,

    /// Outline stroke width in pixels
    pub stroke_width: f32,

    /// Outline stroke color
    pub stroke_color: Color,

    /// Marker fill color
    pub marker_color: Color,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            path_samples: 512,
            stroke_width: 1.5,
            stroke_color: [40, 40, 40, 255],
            marker_color: [0, 0, 0, 255],
        }
    }
}

impl StyleParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.path_samples < 3 {
            return Err(format!(
                "path_samples must be >= 3, got {}",
                self.path_samples
            ));
        }
        if self.stroke_width <= 0.0 {
            return Err(format!(
                "stroke_width must be > 0, got {}",
                self.stroke_width
            ));
        }
        Ok(())
    }
}

/// Full controller configuration (one per animation variant)
#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    pub spectrum: SpectrumParams,
    pub animation: AnimationParams,
    pub style: StyleParams,
}

impl ControllerConfig {
    /// Validate the whole configuration before construction
    pub fn validate(&self) -> Result<(), String> {
        self.spectrum.validate()?;
        self.animation.validate()?;
        self.style.validate()?;
        Ok(())
    }

    /// The original sketch: one big wobbly loop, random amplitudes, a black
    /// triangle riding the velocity direction.
    pub fn solo() -> Self {
        Self {
            spectrum: SpectrumParams {
                num_components: 64,
                scale: 200.0,
                decay: 0.4,
                amplitude_mode: AmplitudeMode::Random,
                normalize_envelope: false,
            },
            ..Self::default()
        }
    }

    /// Ring of smaller deterministic-amplitude loops arranged radially,
    /// each phase-offset and eased, with disc markers.
    pub fn ring() -> Self {
        Self {
            spectrum: SpectrumParams {
                num_components: 32,
                scale: 60.0,
                decay: 0.5,
                amplitude_mode: AmplitudeMode::Deterministic,
                normalize_envelope: true,
            },
            animation: AnimationParams {
                period_s: 8.0,
                num_entities: 7,
                arrangement_radius: 160.0,
                easing: Easing::InOutCubic,
                marker: MarkerShape::Disc { radius: 4.0 },
                ..AnimationParams::default()
            },
            ..Self::default()
        }
    }

    /// Ring variant with every loop re-anchored to start at its local origin
    /// pointing up, and markers oriented along acceleration.
    pub fn anchored() -> Self {
        let mut config = Self::ring();
        config.animation.reanchor_start = true;
        config.animation.orientation = OrientationSource::Acceleration;
        config.animation.easing = Easing::InOutSine;
        config.animation.marker = MarkerShape::Triangle { radius: 4.0 };
        config
    }
}

/// Canvas configuration for the raster backend
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Frame width (pixels)
    pub width: u32,

    /// Frame height (pixels)
    pub height: u32,

    /// Background fill color
    pub background: Color,

    /// Frames per second for the offline host loop
    pub fps: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: [245, 242, 235, 255],
            fps: 60,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("canvas dimensions must be nonzero".to_string());
        }
        if self.fps == 0 {
            return Err("fps must be > 0".to_string());
        }
        Ok(())
    }
}

/// Offline frame-recording configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: String,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32, output_dir: impl Into<String>) -> Self {
        Self {
            duration_secs,
            output_dir: output_dir.into(),
        }
    }

    /// Total number of frames to capture at the given rate
    pub fn total_frames(&self, fps: u32) -> usize {
        (self.duration_secs * fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Path of a single numbered frame
    pub fn frame_path(&self, index: usize) -> String {
        format!("{}/frame_{:05}.png", self.frames_dir(), index)
    }
}

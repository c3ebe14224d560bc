//! Command-line argument parsing.

use clap::Parser;

use crate::params::{CanvasConfig, ControllerConfig, RecordingConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Loopform")]
#[command(about = "Generative Fourier-loop animation renderer", long_about = None)]
pub struct Args {
    /// Animation variant: solo (default), ring, anchored
    #[arg(long, value_name = "VARIANT", default_value = "solo")]
    pub variant: String,

    /// Seed for spectrum generation (same seed, same shapes)
    #[arg(long, value_name = "SEED", default_value = "12345")]
    pub seed: u64,

    /// Duration to record in seconds; defaults to one full period
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f32>,

    /// Frames per second
    #[arg(long, value_name = "FPS", default_value = "60")]
    pub fps: u32,

    /// Square canvas size (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "800")]
    pub size: u32,

    /// Output directory for recorded frames
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub out: String,
}

impl Args {
    /// Resolve the variant preset from command-line arguments
    pub fn parse_variant(&self) -> ControllerConfig {
        match self.variant.to_lowercase().as_str() {
            "solo" => {
                println!("Variant: Solo (one loop, velocity-oriented triangle)");
                ControllerConfig::solo()
            }
            "ring" => {
                println!("Variant: Ring (radial loops, eased phases, discs)");
                ControllerConfig::ring()
            }
            "anchored" => {
                println!("Variant: Anchored (re-anchored ring, accel-oriented)");
                ControllerConfig::anchored()
            }
            other => {
                eprintln!("Warning: Unknown variant '{}', using solo", other);
                ControllerConfig::solo()
            }
        }
    }

    /// Canvas sized per the command-line arguments
    pub fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig {
            width: self.size,
            height: self.size,
            fps: self.fps,
            ..CanvasConfig::default()
        }
    }

    /// Create recording configuration and its output directories
    pub fn create_recording_config(&self, duration_secs: f32) -> RecordingConfig {
        let config = RecordingConfig::new(duration_secs, self.out.clone());
        std::fs::create_dir_all(config.frames_dir()).expect("Failed to create frames directory");
        config
    }
}

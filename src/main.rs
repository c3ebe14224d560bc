//! Loopform - generative shapes traced from truncated Fourier series
//!
//! A spectrum of randomized frequency components defines a closed loop;
//! markers ride the loop, oriented by its derivatives. Frames are rendered
//! offline and written as PNGs.

use clap::Parser;
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use loopform::cli::Args;
use loopform::controller::LoopController;
use loopform::raster::RasterSurface;
use loopform::surface::DrawSurface;

fn main() {
    println!("Loopform - Fourier loop animation recorder");

    let args = Args::parse();
    let config = args.parse_variant();
    let canvas = args.canvas_config();
    if let Err(e) = canvas.validate() {
        eprintln!("Invalid canvas configuration: {}", e);
        std::process::exit(1);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut controller = match LoopController::new(config, &mut rng) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid controller configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Default to exactly one traversal of the loop.
    let duration = args
        .duration
        .unwrap_or(controller.config().animation.period_s);
    let recording = args.create_recording_config(duration);
    let total_frames = recording.total_frames(canvas.fps);
    let dt = 1.0 / canvas.fps as f32;
    let center = Vec2::new(canvas.width as f32 / 2.0, canvas.height as f32 / 2.0);

    println!(
        "Recording {:.1}s at {} fps ({} frames, seed {})\n",
        duration, canvas.fps, total_frames, args.seed
    );

    let mut surface = RasterSurface::new(&canvas);
    for frame in 0..total_frames {
        controller.update(dt);

        surface.clear(canvas.background);
        surface.scoped(|s| {
            s.translate(center);
            controller.render(s);
        });

        surface
            .image()
            .save(recording.frame_path(frame))
            .expect("Failed to write frame");

        if (frame + 1) % canvas.fps as usize == 0 {
            println!(
                "  {}/{} frames ({:.0}%)",
                frame + 1,
                total_frames,
                100.0 * (frame + 1) as f32 / total_frames as f32
            );
        }
    }

    println!("\nWrote {} frames to {}/", total_frames, recording.frames_dir());
}

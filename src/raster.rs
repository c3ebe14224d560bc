//! Software raster backend painting into an `image` buffer.
//!
//! Good enough for offline frame recording: stamped-disc stroking, even-odd
//! scanline fill, and a rigid-transform stack (translate/rotate only, so
//! radii never need rescaling).

use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};

use crate::params::{CanvasConfig, Color};
use crate::surface::DrawSurface;

#[derive(Clone, Debug)]
struct Subpath {
    /// Points already in device coordinates (the transform applies at path
    /// construction time, canvas-style).
    points: Vec<Vec2>,
    closed: bool,
}

/// Pixel-painting implementation of [`DrawSurface`].
pub struct RasterSurface {
    image: RgbaImage,
    transform: Affine2,
    stack: Vec<Affine2>,
    subpaths: Vec<Subpath>,
}

impl RasterSurface {
    /// Create a canvas filled with the configured background color.
    pub fn new(config: &CanvasConfig) -> Self {
        let image = RgbaImage::from_pixel(config.width, config.height, Rgba(config.background));
        Self {
            image,
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            subpaths: Vec::new(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Repaint every pixel, keeping the transform stack and path state.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba(color);
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, Rgba(color));
        }
    }

    fn stamp_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.5);
        let r2 = r * r;
        let x0 = (center.x - r).floor() as i64;
        let x1 = (center.x + r).ceil() as i64;
        let y0 = (center.y - r).floor() as i64;
        let y1 = (center.y + r).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        let len = (b - a).length();
        let steps = (len / 0.5).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = a.lerp(b, i as f32 / steps as f32);
            self.stamp_disc(p, width / 2.0, color);
        }
    }

    /// Even-odd scanline fill over all subpaths (open ones close implicitly).
    fn fill_subpaths(&mut self, color: Color) {
        let mut edges: Vec<(Vec2, Vec2)> = Vec::new();
        for sub in &self.subpaths {
            for w in sub.points.windows(2) {
                edges.push((w[0], w[1]));
            }
            if sub.points.len() > 2 {
                edges.push((*sub.points.last().unwrap(), sub.points[0]));
            }
        }
        if edges.is_empty() {
            return;
        }

        let y_min = edges
            .iter()
            .map(|e| e.0.y.min(e.1.y))
            .fold(f32::INFINITY, f32::min)
            .floor()
            .max(0.0) as i64;
        let y_max = edges
            .iter()
            .map(|e| e.0.y.max(e.1.y))
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(self.image.height() as f32) as i64;

        for y in y_min..y_max {
            let scan = y as f32 + 0.5;
            let mut crossings: Vec<f32> = edges
                .iter()
                .filter(|(a, b)| (a.y <= scan) != (b.y <= scan))
                .map(|(a, b)| a.x + (scan - a.y) / (b.y - a.y) * (b.x - a.x))
                .collect();
            crossings.sort_by(|a, b| a.total_cmp(b));

            for pair in crossings.chunks_exact(2) {
                let x0 = pair[0].round() as i64;
                let x1 = pair[1].round() as i64;
                for x in x0..x1 {
                    self.put(x, y, color);
                }
            }
        }
    }
}

impl DrawSurface for RasterSurface {
    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: Vec2) {
        self.subpaths.push(Subpath {
            points: vec![self.transform.transform_point2(p)],
            closed: false,
        });
    }

    fn line_to(&mut self, p: Vec2) {
        let device = self.transform.transform_point2(p);
        match self.subpaths.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(device),
            _ => self.subpaths.push(Subpath {
                points: vec![device],
                closed: false,
            }),
        }
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.subpaths.last_mut() {
            sub.closed = true;
        }
    }

    fn stroke(&mut self, color: Color, width: f32) {
        let subpaths = self.subpaths.clone();
        for sub in &subpaths {
            for w in sub.points.windows(2) {
                self.stroke_segment(w[0], w[1], width, color);
            }
            if sub.closed && sub.points.len() > 2 {
                self.stroke_segment(*sub.points.last().unwrap(), sub.points[0], width, color);
            }
        }
    }

    fn fill(&mut self, color: Color) {
        self.fill_subpaths(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let device = self.transform.transform_point2(center);
        self.stamp_disc(device, radius, color);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        // A restore without a matching save is ignored, canvas-style.
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = [0, 0, 0, 255];
    const WHITE: Color = [255, 255, 255, 255];

    fn canvas(size: u32) -> RasterSurface {
        RasterSurface::new(&CanvasConfig {
            width: size,
            height: size,
            background: WHITE,
            fps: 60,
        })
    }

    #[test]
    fn stroke_paints_along_segment() {
        let mut surface = canvas(32);
        surface.begin_path();
        surface.move_to(Vec2::new(4.0, 16.0));
        surface.line_to(Vec2::new(28.0, 16.0));
        surface.stroke(BLACK, 2.0);

        assert_eq!(surface.image().get_pixel(16, 16).0, BLACK);
        assert_eq!(surface.image().get_pixel(16, 4).0, WHITE);
    }

    #[test]
    fn translate_shifts_drawing() {
        let mut surface = canvas(32);
        surface.translate(Vec2::new(10.0, 0.0));
        surface.begin_path();
        surface.move_to(Vec2::new(0.0, 16.0));
        surface.line_to(Vec2::new(5.0, 16.0));
        surface.stroke(BLACK, 2.0);

        assert_eq!(surface.image().get_pixel(12, 16).0, BLACK);
        assert_eq!(surface.image().get_pixel(2, 16).0, WHITE);
    }

    #[test]
    fn rotate_quarter_turn_maps_x_axis_to_y() {
        let mut surface = canvas(64);
        surface.translate(Vec2::new(32.0, 32.0));
        surface.rotate(std::f32::consts::FRAC_PI_2);
        surface.begin_path();
        surface.move_to(Vec2::ZERO);
        surface.line_to(Vec2::new(20.0, 0.0));
        surface.stroke(BLACK, 2.0);

        // Local +x now points down +y in device space.
        assert_eq!(surface.image().get_pixel(32, 42).0, BLACK);
        assert_eq!(surface.image().get_pixel(42, 32).0, WHITE);
    }

    #[test]
    fn save_restore_round_trips_transform() {
        let mut surface = canvas(32);
        surface.save();
        surface.translate(Vec2::new(100.0, 100.0));
        surface.restore();

        surface.begin_path();
        surface.move_to(Vec2::new(2.0, 2.0));
        surface.line_to(Vec2::new(6.0, 2.0));
        surface.stroke(BLACK, 2.0);

        assert_eq!(surface.image().get_pixel(4, 2).0, BLACK);
    }

    #[test]
    fn fill_covers_triangle_interior_only() {
        let mut surface = canvas(32);
        surface.begin_path();
        surface.move_to(Vec2::new(4.0, 4.0));
        surface.line_to(Vec2::new(28.0, 4.0));
        surface.line_to(Vec2::new(16.0, 28.0));
        surface.close_path();
        surface.fill(BLACK);

        assert_eq!(surface.image().get_pixel(16, 10).0, BLACK);
        assert_eq!(surface.image().get_pixel(2, 20).0, WHITE);
        assert_eq!(surface.image().get_pixel(30, 20).0, WHITE);
    }

    #[test]
    fn fill_circle_respects_transform() {
        let mut surface = canvas(32);
        surface.translate(Vec2::new(16.0, 16.0));
        surface.fill_circle(Vec2::ZERO, 3.0, BLACK);

        assert_eq!(surface.image().get_pixel(16, 16).0, BLACK);
        assert_eq!(surface.image().get_pixel(25, 16).0, WHITE);
    }
}

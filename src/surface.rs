//! Drawing surface abstraction.
//!
//! The controller only needs canvas-style primitives: build a path, stroke or
//! fill it, stamp a disc, and push rigid transforms. Backends implement this
//! trait; the raster backend paints pixels, the trace backend records the
//! operation stream for tests.

use glam::Vec2;

use crate::params::Color;

/// Canvas-style 2D drawing surface with an affine transform stack.
///
/// Transform state pushed with `save` must be popped with a matching
/// `restore`; `scoped` wraps a drawing block so the pair can never be
/// unbalanced.
pub trait DrawSurface {
    /// Start a fresh path, discarding any unpainted one.
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    /// Close the current subpath back to its first point.
    fn close_path(&mut self);
    /// Stroke the current path's outline.
    fn stroke(&mut self, color: Color, width: f32);
    /// Fill the current path (even-odd rule).
    fn fill(&mut self, color: Color);
    /// Fill a disc of radius `radius` centered at `center` (local coords).
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn translate(&mut self, offset: Vec2);
    /// Rotate the local frame counterclockwise by `angle` radians.
    fn rotate(&mut self, angle: f32);
    fn save(&mut self);
    fn restore(&mut self);

    /// Run `f` between a save/restore pair.
    fn scoped(&mut self, f: impl FnOnce(&mut Self))
    where
        Self: Sized,
    {
        self.save();
        f(self);
        self.restore();
    }
}

/// A recorded drawing operation, one per [`DrawSurface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceOp {
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    ClosePath,
    Stroke(Color, f32),
    Fill(Color),
    FillCircle(Vec2, f32, Color),
    Translate(Vec2),
    Rotate(f32),
    Save,
    Restore,
}

/// Headless surface that records every operation instead of painting.
#[derive(Default, Debug)]
pub struct TraceSurface {
    pub ops: Vec<TraceOp>,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of recorded ops matching `pred`.
    pub fn count(&self, pred: impl Fn(&TraceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// True if every `restore` has a preceding unmatched `save`.
    pub fn transform_stack_balanced(&self) -> bool {
        let mut depth = 0i32;
        for op in &self.ops {
            match op {
                TraceOp::Save => depth += 1,
                TraceOp::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl DrawSurface for TraceSurface {
    fn begin_path(&mut self) {
        self.ops.push(TraceOp::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.ops.push(TraceOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.ops.push(TraceOp::LineTo(p));
    }

    fn close_path(&mut self) {
        self.ops.push(TraceOp::ClosePath);
    }

    fn stroke(&mut self, color: Color, width: f32) {
        self.ops.push(TraceOp::Stroke(color, width));
    }

    fn fill(&mut self, color: Color) {
        self.ops.push(TraceOp::Fill(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ops.push(TraceOp::FillCircle(center, radius, color));
    }

    fn translate(&mut self, offset: Vec2) {
        self.ops.push(TraceOp::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.ops.push(TraceOp::Rotate(angle));
    }

    fn save(&mut self) {
        self.ops.push(TraceOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(TraceOp::Restore);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_records_ops_in_order() {
        let mut surface = TraceSurface::new();
        surface.begin_path();
        surface.move_to(Vec2::new(1.0, 2.0));
        surface.line_to(Vec2::new(3.0, 4.0));
        surface.close_path();
        surface.stroke([0, 0, 0, 255], 1.0);

        assert_eq!(
            surface.ops,
            vec![
                TraceOp::BeginPath,
                TraceOp::MoveTo(Vec2::new(1.0, 2.0)),
                TraceOp::LineTo(Vec2::new(3.0, 4.0)),
                TraceOp::ClosePath,
                TraceOp::Stroke([0, 0, 0, 255], 1.0),
            ]
        );
    }

    #[test]
    fn scoped_is_balanced() {
        let mut surface = TraceSurface::new();
        surface.scoped(|s| {
            s.translate(Vec2::ONE);
            s.scoped(|s| s.rotate(1.0));
        });

        assert!(surface.transform_stack_balanced());
        assert_eq!(surface.count(|op| matches!(op, TraceOp::Save)), 2);
        assert_eq!(surface.count(|op| matches!(op, TraceOp::Restore)), 2);
    }

    #[test]
    fn unmatched_restore_is_detected() {
        let mut surface = TraceSurface::new();
        surface.restore();
        assert!(!surface.transform_stack_balanced());
    }
}

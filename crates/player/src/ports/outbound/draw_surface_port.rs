//! Draw Surface Port - the subset of a 2D canvas the renderer needs
//!
//! Mirrors the browser's `CanvasRenderingContext2d` call shapes so the wasm adapter is a
//! thin pass-through, while tests and the desktop client can record or log the calls.

use chaos_protocol::PlayerColor;

/// A point in surface coordinates (after the current transform).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub trait DrawSurface {
    /// Wipe the whole surface.
    fn clear(&mut self);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`.
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);

    /// Rotate the current transform by `radians`.
    fn rotate(&mut self, radians: f64);

    /// Draw the sprite for `color` into the given box.
    ///
    /// Returns `false` when no sprite exists for the color; nothing is drawn then.
    fn draw_sprite(&mut self, color: &PlayerColor, x: f64, y: f64, width: f64, height: f64)
        -> bool;

    /// Fill an axis-aligned rectangle with a CSS color.
    fn fill_rect(&mut self, fill: &str, x: f64, y: f64, width: f64, height: f64);

    /// Stroke an open path through `points`.
    fn stroke_polyline(&mut self, points: &[Point]);

    /// Stroke a full circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64);
}

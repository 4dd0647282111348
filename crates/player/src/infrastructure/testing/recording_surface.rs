use chaos_protocol::PlayerColor;

use crate::ports::outbound::{DrawSurface, Point};

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Sprite {
        color: PlayerColor,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        drawn: bool,
    },
    FillRect(String, f64, f64, f64, f64),
    Polyline(Vec<Point>),
    Circle(Point, f64),
}

/// Surface that records every call; sprites exist for the known colors unless overridden.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    sprites: Vec<PlayerColor>,
    depth: i64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::with_sprites(PlayerColor::KNOWN.to_vec())
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sprites(sprites: Vec<PlayerColor>) -> Self {
        Self {
            calls: Vec::new(),
            sprites,
            depth: 0,
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls made since the most recent `clear`, i.e. what is currently visible.
    pub fn current_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Sprites that were actually drawn.
    pub fn sprites(&self) -> Vec<(PlayerColor, f64, f64, f64, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite {
                    color,
                    x,
                    y,
                    width,
                    height,
                    drawn: true,
                } => Some((color.clone(), *x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<Vec<Point>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Polyline(points) => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(Point, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle(center, radius) => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    /// Outstanding `save`s without a matching `restore`.
    pub fn transform_depth(&self) -> i64 {
        self.depth
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.depth -= 1;
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::Translate(x, y));
    }

    fn rotate(&mut self, radians: f64) {
        self.calls.push(DrawCall::Rotate(radians));
    }

    fn draw_sprite(
        &mut self,
        color: &PlayerColor,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> bool {
        let drawn = self.sprites.contains(color);
        self.calls.push(DrawCall::Sprite {
            color: color.clone(),
            x,
            y,
            width,
            height,
            drawn,
        });
        drawn
    }

    fn fill_rect(&mut self, fill: &str, x: f64, y: f64, width: f64, height: f64) {
        self.calls
            .push(DrawCall::FillRect(fill.to_string(), x, y, width, height));
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        self.calls.push(DrawCall::Polyline(points.to_vec()));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.calls.push(DrawCall::Circle(center, radius));
    }
}

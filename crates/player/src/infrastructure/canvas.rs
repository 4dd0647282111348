//! Browser canvas adapter for the [`DrawSurface`] port.

use std::collections::HashMap;
use std::f64::consts::TAU;

use chaos_protocol::PlayerColor;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::infrastructure::config::ClientConfig;
use crate::ports::outbound::{DrawSurface, Point};

/// Player sprites keyed by color.
pub struct SpriteSheet {
    sprites: HashMap<PlayerColor, HtmlImageElement>,
}

impl SpriteSheet {
    /// Start loading one sprite per known color; images fill in as the browser fetches them.
    pub fn load(config: &ClientConfig) -> Result<Self, JsValue> {
        let mut sprites = HashMap::new();
        for color in PlayerColor::KNOWN {
            let image = HtmlImageElement::new()?;
            image.set_src(&config.sprite_path(color.as_str()));
            sprites.insert(color, image);
        }
        Ok(Self { sprites })
    }

    pub fn get(&self, color: &PlayerColor) -> Option<&HtmlImageElement> {
        self.sprites.get(color)
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, sprites: SpriteSheet) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context is null"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2d context"))?;

        // pixel-art sprites
        ctx.set_image_smoothing_enabled(false);

        Ok(Self {
            canvas,
            ctx,
            sprites,
        })
    }

    /// Look up the canvas element by DOM id.
    pub fn from_document(canvas_id: &str, sprites: SpriteSheet) -> Result<Self, JsValue> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element {canvas_id:?} is not a canvas")))?;
        Self::new(canvas, sprites)
    }
}

fn log_failure(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!("canvas {} failed: {:?}", op, e);
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        log_failure("translate", self.ctx.translate(x, y));
    }

    fn rotate(&mut self, radians: f64) {
        log_failure("rotate", self.ctx.rotate(radians));
    }

    fn draw_sprite(
        &mut self,
        color: &PlayerColor,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> bool {
        let Some(image) = self.sprites.get(color) else {
            return false;
        };
        let result = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height);
        let drawn = result.is_ok();
        log_failure("drawImage", result);
        drawn
    }

    fn fill_rect(&mut self, fill: &str, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.ctx.begin_path();
        log_failure("arc", self.ctx.arc(center.x, center.y, radius, 0.0, TAU));
        self.ctx.stroke();
    }
}

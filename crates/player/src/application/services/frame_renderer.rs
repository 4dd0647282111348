//! Frame renderer: draws one decoded snapshot onto a [`DrawSurface`]
//!
//! The surface is always cleared first; nothing carries over between frames.

use chaos_protocol::{Frame, PlayerRecord, ProjectileRecord, WallRecord};

use crate::ports::outbound::{DrawSurface, Point};

/// Side length of the square player sprite.
pub const PLAYER_SIZE: f64 = 100.0;

pub const WALL_WIDTH: f64 = 40.0;
pub const WALL_HEIGHT: f64 = 200.0;
pub const WALL_FILL: &str = "blue";

/// How far each spike tip reaches past the wall's short edge.
pub const SPIKE_LENGTH: f64 = 35.0;

pub const PROJECTILE_RADIUS: f64 = 10.0;

/// Counts from drawing one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Player records processed, including ones with no sprite.
    pub players: usize,
    pub walls: usize,
    pub projectiles: usize,
    /// Players whose color had no sprite.
    pub missing_sprites: usize,
    /// Records dropped by the decoder before rendering.
    pub rejected: usize,
}

impl RenderStats {
    pub fn entities(&self) -> usize {
        self.players + self.walls + self.projectiles
    }

    /// Players that actually put pixels on the surface.
    pub fn visible_players(&self) -> usize {
        self.players - self.missing_sprites
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, frame: &Frame, surface: &mut S) -> RenderStats {
        surface.clear();

        let mut stats = RenderStats::default();
        for player in &frame.players {
            if !draw_player(player, surface) {
                tracing::trace!(color = %player.color, "no sprite for player color");
                stats.missing_sprites += 1;
            }
            stats.players += 1;
        }
        for wall in &frame.walls {
            draw_wall(wall, surface);
            stats.walls += 1;
        }
        for projectile in &frame.projectiles {
            draw_projectile(projectile, surface);
            stats.projectiles += 1;
        }
        stats
    }
}

fn draw_player<S: DrawSurface + ?Sized>(player: &PlayerRecord, surface: &mut S) -> bool {
    let half = PLAYER_SIZE / 2.0;
    surface.save();
    surface.translate(player.x, player.y);
    surface.rotate(player.rotation_radians());
    let drawn = surface.draw_sprite(&player.color, -half, -half, PLAYER_SIZE, PLAYER_SIZE);
    surface.restore();
    drawn
}

fn draw_wall<S: DrawSurface + ?Sized>(wall: &WallRecord, surface: &mut S) {
    let half_w = WALL_WIDTH / 2.0;
    let half_h = WALL_HEIGHT / 2.0;
    let tip = half_h + SPIKE_LENGTH;

    surface.save();
    surface.translate(wall.x, wall.y);
    surface.rotate(wall.rotation_radians());
    surface.fill_rect(WALL_FILL, -half_w, -half_h, WALL_WIDTH, WALL_HEIGHT);

    // spikes on both short edges
    surface.stroke_polyline(&[
        Point::new(-half_w, -half_h),
        Point::new(0.0, -tip),
        Point::new(half_w, -half_h),
    ]);
    surface.stroke_polyline(&[
        Point::new(-half_w, half_h),
        Point::new(0.0, tip),
        Point::new(half_w, half_h),
    ]);

    surface.restore();
}

fn draw_projectile<S: DrawSurface + ?Sized>(projectile: &ProjectileRecord, surface: &mut S) {
    surface.stroke_circle(Point::new(projectile.x, projectile.y), PROJECTILE_RADIUS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{DrawCall, RecordingSurface};
    use chaos_protocol::{decode_frame, PlayerColor};

    #[test]
    fn test_clear_comes_first() {
        let mut surface = RecordingSurface::new();
        let frame = decode_frame("blue,0,0,0/10,10,0/5,5").frame;
        FrameRenderer::new().render(&frame, &mut surface);

        assert_eq!(surface.calls().first(), Some(&DrawCall::Clear));
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Clear)), 1);
    }

    #[test]
    fn test_minimal_frame_draws_one_of_each() {
        let mut surface = RecordingSurface::new();
        let frame = decode_frame("blue,0,0,0/10,10,0/5,5").frame;
        let stats = FrameRenderer::new().render(&frame, &mut surface);

        assert_eq!(stats.entities(), 3);
        assert_eq!(stats.visible_players(), 1);
        assert_eq!(
            surface.sprites(),
            vec![(PlayerColor::Blue, -50.0, -50.0, 100.0, 100.0)]
        );
        assert!(surface
            .calls()
            .contains(&DrawCall::FillRect("blue".to_string(), -20.0, -100.0, 40.0, 200.0)));
        assert_eq!(
            surface.circles(),
            vec![(Point::new(5.0, 5.0), PROJECTILE_RADIUS)]
        );
    }

    #[test]
    fn test_player_transform_order() {
        let mut surface = RecordingSurface::new();
        let frame = decode_frame("green,300,150,90//").frame;
        FrameRenderer::new().render(&frame, &mut surface);

        let calls = surface.calls();
        assert_eq!(calls[1], DrawCall::Save);
        assert_eq!(calls[2], DrawCall::Translate(300.0, 150.0));
        match calls[3] {
            DrawCall::Rotate(r) => assert!((r - std::f64::consts::FRAC_PI_2).abs() < 1e-12),
            ref other => panic!("expected rotate, got {:?}", other),
        }
        assert!(matches!(calls[4], DrawCall::Sprite { .. }));
        assert_eq!(calls[5], DrawCall::Restore);
    }

    #[test]
    fn test_wall_spikes() {
        let mut surface = RecordingSurface::new();
        let frame = decode_frame("/50,50,45/").frame;
        FrameRenderer::new().render(&frame, &mut surface);

        let lines = surface.polylines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            vec![
                Point::new(-20.0, -100.0),
                Point::new(0.0, -135.0),
                Point::new(20.0, -100.0)
            ]
        );
        assert_eq!(
            lines[1],
            vec![
                Point::new(-20.0, 100.0),
                Point::new(0.0, 135.0),
                Point::new(20.0, 100.0)
            ]
        );
        assert_eq!(surface.transform_depth(), 0);
    }

    #[test]
    fn test_unknown_color_draws_nothing_but_keeps_going() {
        let mut surface = RecordingSurface::new();
        let frame = decode_frame("red,1,2,3/4,5,6/7,8").frame;
        let stats = FrameRenderer::new().render(&frame, &mut surface);

        assert_eq!(stats.players, 1);
        assert_eq!(stats.missing_sprites, 1);
        assert_eq!(stats.visible_players(), 0);
        assert!(surface.sprites().is_empty());
        assert_eq!(stats.walls, 1);
        assert_eq!(stats.projectiles, 1);
        assert_eq!(surface.transform_depth(), 0);
    }

    #[test]
    fn test_entity_count_matches_frame() {
        let text = "blue,1,1,0,green,2,2,0,purple,3,3,0/1,1,0,2,2,0/1,1,2,2,3,3,4,4";
        let frame = decode_frame(text).frame;
        let mut surface = RecordingSurface::new();
        let stats = FrameRenderer::new().render(&frame, &mut surface);

        assert_eq!(stats.entities(), frame.entity_count());
        assert_eq!(stats.entities(), 3 + 2 + 4);
        assert_eq!(surface.sprites().len(), 3);
        assert_eq!(surface.circles().len(), 4);
    }

    #[test]
    fn test_empty_frame_only_clears() {
        let mut surface = RecordingSurface::new();
        FrameRenderer::new().render(&Frame::default(), &mut surface);
        assert_eq!(surface.calls(), &[DrawCall::Clear]);
    }
}

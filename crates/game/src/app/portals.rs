use std::f32::consts::{PI, TAU};

use engine::{Camera, Canvas, Rect, Vec2};

use super::config::{
    PORTAL_BASE_COLOR, PORTAL_EDGE_COLOR, PORTAL_MAX_R, PORTAL_MIN_R, PORTAL_PULSE_RATE,
    PORTAL_RADIUS,
};
use super::worldgen::WorldRng;

const RING_THICKNESS: i32 = 6;
const EDGE_INSET: i32 = 4;
const EDGE_THICKNESS: i32 = 2;
const TINT_SHIFT_RANGE: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PortalKind {
    True,
    Trap,
}

/// Both kinds draw the same ring; only the small tint shift and pulse phase
/// differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Portal {
    pub pos: Vec2,
    pub kind: PortalKind,
    pub phase: f32,
    pub tint_shift: i32,
}

impl Portal {
    pub(crate) fn new(rng: &mut WorldRng, pos: Vec2, kind: PortalKind) -> Self {
        Self {
            pos,
            kind,
            phase: rng.unit() * PI,
            tint_shift: rng.gen_range(-TINT_SHIFT_RANGE..=TINT_SHIFT_RANGE),
        }
    }

    pub(crate) fn collides_with(&self, player_rect: Rect) -> bool {
        let reach = PORTAL_RADIUS + player_rect.w.max(player_rect.h) * 0.5;
        player_rect.center().distance_to(self.pos) <= reach
    }

    pub(crate) fn pulse_radius(&self, time_seconds: f32) -> f32 {
        PORTAL_RADIUS + 2.0 + 2.0 * (time_seconds * PORTAL_PULSE_RATE + self.phase).sin()
    }

    pub(crate) fn color(&self) -> [u8; 4] {
        let [r, g, b] = PORTAL_BASE_COLOR.map(|channel| {
            (channel as i32 + self.tint_shift).clamp(0, u8::MAX as i32) as u8
        });
        [r, g, b, 220]
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>, camera: &Camera, time_seconds: f32) {
        let center = camera.world_to_screen(self.pos);
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
        let radius = self.pulse_radius(time_seconds).round() as i32;
        canvas.draw_ring(cx, cy, radius, RING_THICKNESS, self.color());
        canvas.draw_ring(
            cx,
            cy,
            radius - EDGE_INSET,
            EDGE_THICKNESS,
            PORTAL_EDGE_COLOR,
        );
    }
}

/// Places the true and trap portals at independent random bearings and
/// distances from `spawn`.
pub(crate) fn place_portals(rng: &mut WorldRng, spawn: Vec2) -> (Portal, Portal) {
    let true_pos = sample_around(rng, spawn);
    let true_portal = Portal::new(rng, true_pos, PortalKind::True);
    let trap_pos = sample_around(rng, spawn);
    let trap_portal = Portal::new(rng, trap_pos, PortalKind::Trap);
    (true_portal, trap_portal)
}

fn sample_around(rng: &mut WorldRng, spawn: Vec2) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(PORTAL_MIN_R..=PORTAL_MAX_R) as f32;
    Vec2::new(
        spawn.x + distance * angle.cos(),
        spawn.y + distance * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::collision::body_rect;

    const SPAWN: Vec2 = Vec2::new(1200.0, 900.0);

    #[test]
    fn portals_land_inside_the_distance_band() {
        for seed in 0..50 {
            let mut rng = WorldRng::from_seed(seed);
            let (true_portal, trap) = place_portals(&mut rng, SPAWN);
            assert_eq!(true_portal.kind, PortalKind::True);
            assert_eq!(trap.kind, PortalKind::Trap);
            for portal in [true_portal, trap] {
                let distance = portal.pos.distance_to(SPAWN);
                assert!((119.9..=360.1).contains(&distance), "{distance}");
                assert!((0.0..PI).contains(&portal.phase));
                assert!((-8..=8).contains(&portal.tint_shift));
            }
        }
    }

    #[test]
    fn collision_uses_center_distance_plus_half_body() {
        let portal = Portal {
            pos: Vec2::new(100.0, 100.0),
            kind: PortalKind::True,
            phase: 0.0,
            tint_shift: 0,
        };
        assert!(portal.collides_with(body_rect(Vec2::new(134.0, 100.0))));
        assert!(!portal.collides_with(body_rect(Vec2::new(134.5, 100.0))));
    }

    #[test]
    fn pulse_stays_within_two_pixels_of_rest_radius() {
        let portal = Portal {
            pos: Vec2::ZERO,
            kind: PortalKind::Trap,
            phase: 1.0,
            tint_shift: -8,
        };
        for step in 0..100 {
            let radius = portal.pulse_radius(step as f32 * 0.05);
            assert!((24.0..=28.0).contains(&radius), "{radius}");
        }
    }

    #[test]
    fn tint_shift_is_clamped_per_channel() {
        let portal = Portal {
            pos: Vec2::ZERO,
            kind: PortalKind::True,
            phase: 0.0,
            tint_shift: 8,
        };
        let [r, g, b, _] = portal.color();
        assert_eq!([r, g, b], [128, 98, 218]);
    }
}

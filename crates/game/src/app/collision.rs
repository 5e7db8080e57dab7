use engine::{Rect, Vec2};

use super::config::PLAYER_SIZE;

/// Axis-aligned player body centered on `position`.
pub(crate) fn body_rect(position: Vec2) -> Rect {
    Rect::from_center(position, PLAYER_SIZE, PLAYER_SIZE)
}

/// Moves the player body by `velocity * dt`, resolving X before Y.
///
/// On each axis the body is pushed flush against every rock it overlaps, in
/// rock order, on the side it came from. An axis with zero velocity is never
/// pushed. The resulting center is clamped to `[0, w] x [0, h]`.
pub(crate) fn resolve_move(
    position: Vec2,
    velocity: Vec2,
    dt: f32,
    rocks: &[Rect],
    world_bounds: Vec2,
) -> Vec2 {
    let mut resolved = position;

    resolved.x += velocity.x * dt;
    if velocity.x != 0.0 {
        let mut body = body_rect(resolved);
        for rock in rocks {
            if body.overlaps(rock) {
                body.x = if velocity.x > 0.0 {
                    rock.left() - body.w
                } else {
                    rock.right()
                };
            }
        }
        resolved.x = body.center().x;
    }

    resolved.y += velocity.y * dt;
    if velocity.y != 0.0 {
        let mut body = body_rect(resolved);
        for rock in rocks {
            if body.overlaps(rock) {
                body.y = if velocity.y > 0.0 {
                    rock.top() - body.h
                } else {
                    rock.bottom()
                };
            }
        }
        resolved.y = body.center().y;
    }

    Vec2::new(
        resolved.x.clamp(0.0, world_bounds.x.max(0.0)),
        resolved.y.clamp(0.0, world_bounds.y.max(0.0)),
    )
}

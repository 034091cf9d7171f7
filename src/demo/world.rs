//! Demo world: a small test room with hand-rolled AABB collision.

use bevy::prelude::*;

use crate::character::{CharacterContext, Player};

/// Axis-aligned solid. Y grows downward, so `min.y` is the top edge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub(crate) const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    fn half(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }
}

/// Static geometry: a floor, two walls, and a ledge partway up the right
/// wall.
#[derive(Resource, Debug)]
pub(crate) struct DemoRoom {
    pub solids: Vec<Aabb>,
}

impl Default for DemoRoom {
    fn default() -> Self {
        Self {
            solids: vec![
                // floor
                Aabb::new(Vec2::new(-320.0, 0.0), Vec2::new(320.0, 32.0)),
                // left wall
                Aabb::new(Vec2::new(-352.0, -480.0), Vec2::new(-320.0, 32.0)),
                // right wall
                Aabb::new(Vec2::new(320.0, -480.0), Vec2::new(352.0, 32.0)),
                // ledge on the right wall
                Aabb::new(Vec2::new(224.0, -96.0), Vec2::new(320.0, -80.0)),
            ],
        }
    }
}

/// Physics-side body for the demo character: a simulation position advanced
/// at the fixed rate plus a render position smoothed between ticks.
#[derive(Component, Debug)]
pub(crate) struct DemoBody {
    pub position: Vec2,
    pub render_position: Vec2,
    pub half: Vec2,
}

/// Gives the spawned character a body hanging above the floor.
pub(crate) fn attach_demo_body(mut commands: Commands, query: Query<Entity, With<Player>>) {
    for entity in &query {
        let spawn = Vec2::new(-128.0, -128.0);
        commands.entity(entity).insert(DemoBody {
            position: spawn,
            render_position: spawn,
            half: Vec2::new(8.0, 16.0),
        });
        debug!("demo body attached at ({}, {})", spawn.x, spawn.y);
    }
}

/// Push `position` out of `solid` along the axis of least penetration,
/// returning the applied push, or `None` without an overlap.
pub(crate) fn resolve_overlap(position: &mut Vec2, half: Vec2, solid: &Aabb) -> Option<Vec2> {
    let delta = *position - solid.center();
    let overlap = half + solid.half() - delta.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }
    if overlap.x < overlap.y {
        let push = if delta.x >= 0.0 { overlap.x } else { -overlap.x };
        position.x += push;
        Some(Vec2::new(push, 0.0))
    } else {
        let push = if delta.y >= 0.0 { overlap.y } else { -overlap.y };
        position.y += push;
        Some(Vec2::new(0.0, push))
    }
}

/// Fixed-rate integration: move by the context velocity, resolve overlaps,
/// kill velocity components pointing into a touched surface, and hand the
/// resulting contact snapshot back to the context.
pub(crate) fn integrate_bodies(
    time: Res<Time>,
    room: Res<DemoRoom>,
    mut query: Query<(&mut DemoBody, &mut CharacterContext)>,
) {
    let dt = time.delta_secs();
    for (mut body, mut ctx) in &mut query {
        let half = body.half;
        let mut position = body.position + ctx.velocity * dt;

        let mut grounded = false;
        let mut on_wall = false;
        let mut on_ceiling = false;
        let mut normals = Vec::new();
        for solid in &room.solids {
            let Some(push) = resolve_overlap(&mut position, half, solid) else {
                continue;
            };
            if push.y < 0.0 {
                grounded = true;
            } else if push.y > 0.0 {
                on_ceiling = true;
            } else {
                on_wall = true;
                let direction = if push.x > 0.0 { 1.0 } else { -1.0 };
                normals.push(Vec2::new(direction, 0.0));
            }
        }
        body.position = position;

        if grounded && ctx.velocity.y > 0.0 {
            ctx.velocity.y = 0.0;
        }
        if on_ceiling && ctx.velocity.y < 0.0 {
            ctx.velocity.y = 0.0;
        }
        for normal in &normals {
            if ctx.velocity.x * normal.x < 0.0 {
                ctx.velocity.x = 0.0;
            }
        }
        ctx.set_contacts(grounded, on_wall, on_ceiling, &normals);
    }
}

/// Render-side smoothing between fixed ticks.
pub(crate) fn interpolate_bodies(fixed_time: Res<Time<Fixed>>, mut query: Query<&mut DemoBody>) {
    let alpha = fixed_time.overstep_fraction();
    for mut body in &mut query {
        let target = body.position;
        body.render_position = body.render_position.lerp(target, alpha);
    }
}

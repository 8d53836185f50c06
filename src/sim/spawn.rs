//! Procedural pipe and berry spawning
//!
//! Pipes spawn on a fixed cadence just past the right edge of the world;
//! each may carry at most one berry, placed near its leading edge with a
//! little jitter and a type drawn from the static weight table.

use rand::Rng;

use super::state::{BERRY_WEIGHTS, Berry, BerryKind, GameState, Pipe};

/// Weighted discrete draw over the berry table: sum the weights, take a
/// uniform sample in `[0, total)`, subtract until the remainder goes
/// non-positive. An all-zero table falls back to the plain Razz berry
/// instead of dividing by zero.
pub fn pick_berry_kind(weights: &[(BerryKind, u32)], sample: f32) -> BerryKind {
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return BerryKind::Razz;
    }
    let mut remainder = sample.clamp(0.0, 1.0) * total as f32;
    for (kind, weight) in weights {
        remainder -= *weight as f32;
        if remainder <= 0.0 {
            return *kind;
        }
    }
    // Float rounding can leave a sliver past the last bucket
    weights[weights.len() - 1].0
}

/// Spawn one pipe (and, with `berry_chance` probability, its berry).
/// The gap center is drawn uniformly from the valid band so the gap never
/// clips the ceiling or overlaps the ground.
pub fn spawn_pipe(state: &mut GameState) {
    let gap = state.tuning.gap_for(state.hard);
    let (lo, hi) = state.tuning.gap_center_range(gap);
    let gap_y = state.rng.random_range(lo..hi);
    let x = state.tuning.world_w + state.tuning.spawn_lead;

    let id = state.next_entity_id();
    state.pipes.push(Pipe {
        id,
        x,
        gap_y,
        gap,
        passed: false,
    });

    if state.rng.random_range(0.0..1.0) < state.tuning.berry_chance {
        spawn_berry(state, id, x, gap_y, gap);
    }
}

fn spawn_berry(state: &mut GameState, pipe_id: u32, pipe_x: f32, gap_y: f32, gap: f32) {
    let jitter_x = state.tuning.berry_x_jitter;
    let jitter_y = gap * state.tuning.berry_y_jitter_frac;
    let x = pipe_x + state.rng.random_range(-jitter_x..jitter_x);
    let y = gap_y + state.rng.random_range(-jitter_y..jitter_y);

    let sample = state.rng.random_range(0.0..1.0);
    let kind = pick_berry_kind(&BERRY_WEIGHTS, sample);

    let id = state.next_entity_id();
    let radius = state.tuning.berry_radius;
    state.berries.push(Berry {
        id,
        kind,
        pos: glam::Vec2::new(x, y),
        radius,
        taken: false,
        pipe_id,
    });
}

//! Per-frame simulation update
//!
//! One update handler per phase; only `Playing` runs the full pipeline:
//! physics, bounds, spawn cadence, scroll, culling, the deferred clear
//! queue, pass scoring, pipe collision, and berry pickup — in that order.
//! Pipes are always processed oldest (leftmost) first.

use super::collision::{circle_circle, circle_rect};
use super::effects::apply_berry;
use super::spawn::spawn_pipe;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::MAX_DT;

/// Input for a single update. `primary` is flap/confirm, `reset` forces a
/// return to the menu, `help` toggles the help screen from the menu.
/// `hard` mirrors the external difficulty toggle every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub primary: bool,
    pub reset: bool,
    pub help: bool,
    pub hard: bool,
}

/// Advance the game by one frame. `dt` is wall time in seconds; negative or
/// non-finite values are treated as zero and large stalls are clamped to
/// [`MAX_DT`] so a backgrounded tab cannot explode the physics.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = sanitize_dt(dt);
    state.hard = input.hard;
    state.hover_timer += dt;

    if input.reset && state.phase != GamePhase::Menu {
        state.begin_run();
        state.phase = GamePhase::Menu;
        return;
    }

    match state.phase {
        GamePhase::Menu => {
            idle_hover(state, dt);
            if input.help {
                state.phase = GamePhase::Help;
            } else if input.primary {
                start_run(state);
            }
        }
        GamePhase::Help => {
            idle_hover(state, dt);
            if input.help || input.primary {
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::Transitioning => {
            idle_hover(state, dt);
            state.phase_timer += dt;
            if state.phase_timer >= state.tuning.transition_secs {
                state.phase = GamePhase::Countdown;
                state.phase_timer = 0.0;
            }
        }
        GamePhase::Countdown => {
            idle_hover(state, dt);
            state.phase_timer += dt;
            if state.phase_timer >= countdown_total(state) {
                state.phase = GamePhase::Playing;
                state.phase_timer = 0.0;
            }
        }
        GamePhase::Playing => play_update(state, input, dt),
        GamePhase::GameOver => {
            // Simulation frozen; restart on confirm
            if input.primary {
                start_run(state);
            }
        }
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        0.0
    } else {
        dt.min(MAX_DT)
    }
}

/// Total length of the 3-2-1 steps plus the "go" flash.
pub fn countdown_total(state: &GameState) -> f32 {
    3.0 * state.tuning.countdown_step_secs + state.tuning.go_flash_secs
}

/// Countdown display value while in the countdown phase: 3, 2, 1, then 0
/// for the "go" flash.
pub fn countdown_step(state: &GameState) -> Option<u8> {
    if state.phase != GamePhase::Countdown {
        return None;
    }
    let idx = (state.phase_timer / state.tuning.countdown_step_secs) as u32;
    Some(3u8.saturating_sub(idx.min(3) as u8))
}

/// Idle bounce around the start height; used by every non-playing phase.
fn idle_hover(state: &mut GameState, dt: f32) {
    let hover = (state.hover_timer * state.tuning.hover_freq).sin() * state.tuning.hover_amp;
    state.bird.pos.y = state.tuning.bird_start_y() + hover;
    state.bird.vy = 0.0;
    state.bird.radius = state.tuning.bird_radius;
    state.bird.angle += (0.0 - state.bird.angle) * (dt * 10.0).min(1.0);
}

fn start_run(state: &mut GameState) {
    state.begin_run();
    state.phase = GamePhase::Transitioning;
    state.phase_timer = 0.0;
    log::info!("run started (hard={})", state.hard);
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::RunEnded { score: state.score });
    log::info!("run ended, score {}", state.score);
}

fn play_update(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time += dt;
    let now = state.time;

    // Flap input only has effect in this phase
    if input.primary {
        state.bird.vy = state.tuning.flap_velocity;
        state.push_event(GameEvent::Flap);
    }

    // Vertical physics; velocity always inside [rise_clamp, max_fall_speed]
    state.bird.vy += state.tuning.gravity * dt;
    state.bird.vy = state
        .bird
        .vy
        .clamp(state.tuning.rise_clamp, state.tuning.max_fall_speed);
    state.bird.pos.y += state.bird.vy * dt;

    // Render tilt eases toward a function of fall speed
    let target_angle = (state.bird.vy / state.tuning.max_fall_speed).clamp(-0.8, 1.05);
    state.bird.angle += (target_angle - state.bird.angle) * (dt * 10.0).min(1.0);

    // Collision radius follows the mega buff
    let mega = state.buffs.mega_active(now);
    state.bird.radius = if mega {
        state.tuning.bird_radius * state.tuning.mega_radius_scale
    } else {
        state.tuning.bird_radius
    };

    // Ceiling: clamp and kill velocity, no bounce
    if state.bird.pos.y - state.bird.radius < state.tuning.ceiling_y {
        state.bird.pos.y = state.tuning.ceiling_y + state.bird.radius;
        state.bird.vy = 0.0;
    }

    // Ground: fatal unless a shield is up, in which case ride along it
    let ground_y = state.tuning.ground_y();
    if state.bird.pos.y + state.bird.radius > ground_y {
        state.bird.pos.y = ground_y - state.bird.radius;
        if !state.buffs.invulnerable(now) {
            end_run(state);
            return;
        }
        state.bird.vy = 0.0;
    }

    // Spawn cadence: accumulator, remainder preserved across frames
    state.spawn_timer += dt;
    while state.spawn_timer >= state.tuning.spawn_every {
        state.spawn_timer -= state.tuning.spawn_every;
        spawn_pipe(state);
    }

    // Scroll left; speed is a step function of score, recomputed each frame
    let speed = state.tuning.scroll_speed(state.score);
    for pipe in &mut state.pipes {
        pipe.x -= speed * dt;
    }
    for berry in &mut state.berries {
        berry.pos.x -= speed * dt;
    }

    // Cull pipes fully off the left edge, then berries that are taken,
    // off-screen, or orphaned by their pipe's removal
    let cull_x = -state.tuning.cull_margin;
    let pipe_w = state.tuning.pipe_width;
    state.pipes.retain(|p| p.x + pipe_w > cull_x);
    let live_ids: Vec<u32> = state.pipes.iter().map(|p| p.id).collect();
    state
        .berries
        .retain(|b| !b.taken && b.pos.x + b.radius > 0.0 && live_ids.contains(&b.pipe_id));

    // Deferred clear queue: at most one pipe per frame, always the nearest,
    // once it has scrolled close enough
    if state.clear_queue > 0
        && let Some(first) = state.pipes.first()
        && first.x < state.tuning.world_w * state.tuning.clear_near_frac
    {
        let pipe = state.pipes.remove(0);
        if !pipe.passed {
            state.score += 1;
            state.push_event(GameEvent::PipePassed { pipe_id: pipe.id });
        }
        state.berries.retain(|b| b.pipe_id != pipe.id);
        state.clear_queue -= 1;
        state.push_event(GameEvent::PipeCleared { pipe_id: pipe.id });
    }

    // Pass scoring: exactly one point per pipe, when the trailing edge
    // crosses the bird's x
    let bird_x = state.bird.pos.x;
    for i in 0..state.pipes.len() {
        if !state.pipes[i].passed && state.pipes[i].trailing_edge(&state.tuning) < bird_x {
            state.pipes[i].passed = true;
            state.score += 1;
            let pipe_id = state.pipes[i].id;
            state.push_event(GameEvent::PipePassed { pipe_id });
        }
    }

    // Pipe collision, oldest first. Mega smashes through; plain
    // invincibility ignores the hit; otherwise the run ends on first contact.
    let invulnerable = state.buffs.invulnerable(now);
    let (bx, by, br) = (state.bird.pos.x, state.bird.pos.y, state.bird.radius);
    let mut smashed: Vec<u32> = Vec::new();
    for i in 0..state.pipes.len() {
        let (top, bot) = state.pipes[i].rects(&state.tuning);
        let hit = circle_rect(bx, by, br, top[0], top[1], top[2], top[3])
            || circle_rect(bx, by, br, bot[0], bot[1], bot[2], bot[3]);
        if !hit {
            continue;
        }
        if mega {
            if !state.pipes[i].passed {
                state.pipes[i].passed = true;
                state.score += 1;
                let pipe_id = state.pipes[i].id;
                state.push_event(GameEvent::PipePassed { pipe_id });
            }
            let pipe_id = state.pipes[i].id;
            smashed.push(pipe_id);
            state.push_event(GameEvent::PipeSmashed { pipe_id });
        } else if invulnerable {
            continue;
        } else {
            end_run(state);
            return;
        }
    }
    if !smashed.is_empty() {
        state.pipes.retain(|p| !smashed.contains(&p.id));
        state.berries.retain(|b| !smashed.contains(&b.pipe_id));
    }

    // Berry pickup against a slightly shrunk bird circle. Already-taken
    // berries are no-ops until the cull sweeps them.
    let pickup_r = state.bird.radius * state.tuning.pickup_radius_scale;
    for i in 0..state.berries.len() {
        if state.berries[i].taken {
            continue;
        }
        let (pos, radius) = (state.berries[i].pos, state.berries[i].radius);
        if circle_circle(state.bird.pos, pickup_r, pos, radius) {
            state.berries[i].taken = true;
            let kind = state.berries[i].kind;
            apply_berry(state, kind);
        }
    }
}

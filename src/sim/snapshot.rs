//! Read-only render snapshot
//!
//! Captured after each update and handed to the renderer; the core never
//! sees it again, so the renderer cannot mutate simulation state through it.

use serde::Serialize;

use super::state::{BerryKind, GamePhase, GameState};
use super::tick::countdown_step;

#[derive(Debug, Clone, Serialize)]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
    pub mega: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipeView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BerryView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub kind: BerryKind,
    /// Display title, or "+N" for plain score berries
    pub label: String,
    pub taken: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub best: u32,
    pub hard: bool,
    pub bird: BirdView,
    /// Oldest (leftmost) first
    pub pipes: Vec<PipeView>,
    pub berries: Vec<BerryView>,
    /// 3, 2, 1, or 0 for the "go" flash, while counting down
    pub countdown: Option<u8>,
    pub mega_banner: bool,
    pub invincible_secs_left: f32,
    pub mega_secs_left: f32,
    pub world_w: f32,
    pub world_h: f32,
    pub ground_h: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, best: u32) -> Self {
        let now = state.time;
        let (invincible_left, mega_left, _) = state.buff_remaining();

        let pipes = state
            .pipes
            .iter()
            .map(|p| PipeView {
                x: p.x,
                width: state.tuning.pipe_width,
                gap_top: p.gap_y - p.gap * 0.5,
                gap_bottom: p.gap_y + p.gap * 0.5,
                passed: p.passed,
            })
            .collect();

        let berries = state
            .berries
            .iter()
            .map(|b| {
                let label = if b.kind.grants_score_only() {
                    format!("+{}", b.kind.def().score)
                } else {
                    b.kind.def().title.to_string()
                };
                BerryView {
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                    kind: b.kind,
                    label,
                    taken: b.taken,
                }
            })
            .collect();

        Self {
            phase: state.phase,
            score: state.score,
            best,
            hard: state.hard,
            bird: BirdView {
                x: state.bird.pos.x,
                y: state.bird.pos.y,
                radius: state.bird.radius,
                angle: state.bird.angle,
                mega: state.buffs.mega_active(now),
            },
            pipes,
            berries,
            countdown: countdown_step(state),
            mega_banner: state.buffs.banner_active(now),
            invincible_secs_left: invincible_left,
            mega_secs_left: mega_left,
            world_w: state.tuning.world_w,
            world_h: state.tuning.world_h,
            ground_h: state.tuning.ground_h,
        }
    }
}

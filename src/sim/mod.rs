//! Deterministic game simulation
//!
//! All gameplay logic lives here. The module is pure and deterministic:
//! - Driven entirely by `tick(state, input, dt)`, no ambient timers
//! - Seeded RNG only
//! - Pipes processed in creation order (oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_circle, circle_rect};
pub use effects::apply_berry;
pub use snapshot::RenderSnapshot;
pub use spawn::{pick_berry_kind, spawn_pipe};
pub use state::{
    BERRY_WEIGHTS, Berry, BerryDef, BerryKind, Bird, Buffs, GameEvent, GamePhase, GameState, Pipe,
};
pub use tick::{TickInput, countdown_step, tick};

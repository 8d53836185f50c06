//! Pidgey Flap - a Flappy Bird style arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, berries, game phases)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Persisted best score ledger
//! - `settings`: Player preferences (difficulty toggle)
//!
//! Rendering and input wiring are external collaborators: the driver calls
//! [`sim::tick`] once per frame and hands [`sim::RenderSnapshot`] to the
//! renderer.

pub mod best_score;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use settings::Settings;
pub use tuning::{MAX_DT, Tuning};

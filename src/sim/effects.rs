//! Berry effect resolution
//!
//! Applies a collected berry to run state: immediate score, deferred pipe
//! clears, and timed buffs. Buffs stack by deadline extension — re-collecting
//! pushes the expiry to `now + duration`, it never adds durations together.

use super::state::{BerryKind, GameEvent, GameState};

/// Apply a collected berry's static effect record to the run state and
/// emit the pickup event. Returns the immediate score delta.
pub fn apply_berry(state: &mut GameState, kind: BerryKind) -> u32 {
    let def = kind.def();
    let now = state.time;

    state.score += def.score;
    state.clear_queue += def.clear_pipes;

    if let Some(secs) = def.invincible_secs {
        state.buffs.invincible_until = state.buffs.invincible_until.max(now + secs);
    }

    if let Some(secs) = def.mega_secs {
        state.buffs.mega_until = state.buffs.mega_until.max(now + secs);
        state.buffs.banner_until = now + state.tuning.banner_secs;
        // Burst effect on top of the stone's own clear count
        state.clear_queue += state.tuning.mega_clear_bonus;
        log::debug!("mega until {:.2}", state.buffs.mega_until);
    }

    state.push_event(GameEvent::BerryTaken {
        kind,
        score_award: def.score,
    });

    def.score
}

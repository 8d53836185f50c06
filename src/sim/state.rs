//! Game state and core simulation types
//!
//! All run state lives in [`GameState`]; there are no globals, so independent
//! engines (and tests) can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Idle bounce on the title screen, waiting for start input
    Menu,
    /// Static help screen, idle bounce continues
    Help,
    /// HUD slide/fade between menu and countdown, bird held at hover
    Transitioning,
    /// 3-2-1-go steps, bird held at hover
    Countdown,
    /// Active gameplay
    Playing,
    /// Run ended; simulation frozen until restart input
    GameOver,
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Bird {
    pub pos: Vec2,
    pub vy: f32,
    /// Collision radius; quadrupled while mega is active.
    pub radius: f32,
    /// Render tilt, smoothed toward a function of vy. Not authoritative.
    pub angle: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.bird_start_y()),
            vy: 0.0,
            radius: tuning.bird_radius,
            angle: 0.0,
        }
    }
}

/// An obstacle: a vertical pipe pair with a passable gap.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Strictly increasing, never reused, never zero.
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Gap center
    pub gap_y: f32,
    /// Gap size, fixed at spawn time from the difficulty flag
    pub gap: f32,
    /// Set once the bird has crossed the trailing edge and been scored
    pub passed: bool,
}

impl Pipe {
    pub fn trailing_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.pipe_width
    }

    /// The two solid rectangles above and below the gap, as (x, y, w, h).
    /// Heights are clamped to zero so a gap that reaches the ceiling or the
    /// ground yields a degenerate rect instead of a negative extent.
    pub fn rects(&self, tuning: &Tuning) -> ([f32; 4], [f32; 4]) {
        let gap_top = self.gap_y - self.gap * 0.5;
        let gap_bot = self.gap_y + self.gap * 0.5;
        let top = [self.x, 0.0, tuning.pipe_width, gap_top.max(0.0)];
        let bot = [
            self.x,
            gap_bot,
            tuning.pipe_width,
            (tuning.ground_y() - gap_bot).max(0.0),
        ];
        (top, bot)
    }
}

/// Collectible berry types (closed set; weights in [`BERRY_WEIGHTS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BerryKind {
    Razz,
    GoldenRazz,
    Oran,
    Pinap,
    Nanab,
    MegaStone,
}

/// Static effect record for a berry type. Configuration, not entity state.
#[derive(Debug, Clone, Copy)]
pub struct BerryDef {
    pub title: &'static str,
    /// Immediate score award (may be zero)
    pub score: u32,
    /// Pipes queued for deferred removal
    pub clear_pipes: u32,
    pub invincible_secs: Option<f32>,
    pub mega_secs: Option<f32>,
}

impl BerryKind {
    pub fn def(&self) -> &'static BerryDef {
        match self {
            BerryKind::Razz => &BerryDef {
                title: "Razz Berry",
                score: 2,
                clear_pipes: 0,
                invincible_secs: None,
                mega_secs: None,
            },
            BerryKind::GoldenRazz => &BerryDef {
                title: "Golden Razz",
                score: 10,
                clear_pipes: 0,
                invincible_secs: None,
                mega_secs: None,
            },
            BerryKind::Oran => &BerryDef {
                title: "Oran Berry",
                score: 1,
                clear_pipes: 1,
                invincible_secs: None,
                mega_secs: None,
            },
            BerryKind::Pinap => &BerryDef {
                title: "Pinap Berry",
                score: 0,
                clear_pipes: 2,
                invincible_secs: None,
                mega_secs: None,
            },
            BerryKind::Nanab => &BerryDef {
                title: "Nanab Shield",
                score: 0,
                clear_pipes: 0,
                invincible_secs: Some(6.0),
                mega_secs: None,
            },
            BerryKind::MegaStone => &BerryDef {
                title: "MEGA PIDGEY",
                score: 0,
                clear_pipes: 1,
                invincible_secs: None,
                mega_secs: Some(5.0),
            },
        }
    }

    /// True if the pickup cue should read "+N" rather than the buff title.
    pub fn grants_score_only(&self) -> bool {
        let def = self.def();
        def.score > 0 && def.invincible_secs.is_none() && def.mega_secs.is_none()
    }
}

/// Spawn weight table for the cumulative draw in `spawn::pick_berry_kind`.
pub const BERRY_WEIGHTS: [(BerryKind, u32); 6] = [
    (BerryKind::Razz, 34),
    (BerryKind::Oran, 22),
    (BerryKind::Pinap, 16),
    (BerryKind::GoldenRazz, 12),
    (BerryKind::Nanab, 10),
    (BerryKind::MegaStone, 6),
];

/// A collectible spawned alongside a pipe.
#[derive(Debug, Clone)]
pub struct Berry {
    pub id: u32,
    pub kind: BerryKind,
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
    /// Parent pipe; the berry is culled when the pipe goes away.
    pub pipe_id: u32,
}

/// Timed buff deadlines, compared against the run clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Buffs {
    pub invincible_until: f32,
    pub mega_until: f32,
    /// Display window for the mega banner (visual only, core just times it)
    pub banner_until: f32,
}

impl Buffs {
    pub fn mega_active(&self, now: f32) -> bool {
        now < self.mega_until
    }

    /// Mega implies invincibility; both timers are checked.
    pub fn invulnerable(&self, now: f32) -> bool {
        now < self.invincible_until || self.mega_active(now)
    }

    pub fn banner_active(&self, now: f32) -> bool {
        now < self.banner_until
    }
}

/// One-shot simulation events drained by the driver each frame. These are
/// the hooks for sound and particle cosmetics, and for the ledger commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flap,
    /// A pipe's trailing edge crossed the bird and scored one point
    PipePassed { pipe_id: u32 },
    BerryTaken { kind: BerryKind, score_award: u32 },
    /// Destroyed by a mega collision
    PipeSmashed { pipe_id: u32 },
    /// Removed by the deferred clear queue
    PipeCleared { pipe_id: u32 },
    RunEnded { score: u32 },
}

/// Complete game state for one engine instance.
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Difficulty flag; read at spawn time for the gap size
    pub hard: bool,

    /// Run clock in seconds; advances only while playing
    pub time: f32,
    /// Monotonic, non-negative; only increases during a run
    pub score: u32,
    pub bird: Bird,
    /// Creation order == left-to-right order (constant scroll speed)
    pub pipes: Vec<Pipe>,
    pub berries: Vec<Berry>,
    /// Upcoming pipes to forcibly remove, one per frame at most
    pub clear_queue: u32,
    pub buffs: Buffs,

    // Per-run accumulators (explicit, no ambient timers)
    pub spawn_timer: f32,
    pub hover_timer: f32,
    /// Progress through the Transitioning / Countdown phase
    pub phase_timer: f32,

    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let bird = Bird::new(&tuning);
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            hard: false,
            time: 0.0,
            score: 0,
            bird,
            pipes: Vec::new(),
            berries: Vec::new(),
            clear_queue: 0,
            buffs: Buffs::default(),
            spawn_timer: 0.0,
            hover_timer: 0.0,
            phase_timer: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (strictly increasing, starts at 1).
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset all per-run transient state. Pipe IDs keep counting up so
    /// identities are never reused across restarts of the same engine.
    pub fn begin_run(&mut self) {
        self.time = 0.0;
        self.score = 0;
        self.bird = Bird::new(&self.tuning);
        self.pipes.clear();
        self.berries.clear();
        self.clear_queue = 0;
        self.buffs = Buffs::default();
        self.spawn_timer = 0.0;
        self.phase_timer = 0.0;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain this frame's events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remaining invincibility, mega, and banner durations (clamped to 0).
    pub fn buff_remaining(&self) -> (f32, f32, f32) {
        (
            (self.buffs.invincible_until - self.time).max(0.0),
            (self.buffs.mega_until - self.time).max(0.0),
            (self.buffs.banner_until - self.time).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_start_at_one_and_increase() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_eq!(a, 1);
        assert!(b > a);
    }

    #[test]
    fn begin_run_preserves_id_counter() {
        let mut state = GameState::new(7);
        let before = state.next_entity_id();
        state.begin_run();
        assert!(state.next_entity_id() > before);
    }

    #[test]
    fn mega_implies_invulnerable() {
        let buffs = Buffs {
            mega_until: 5.0,
            ..Default::default()
        };
        assert!(buffs.invulnerable(4.9));
        assert!(!buffs.invulnerable(5.0));
    }

    #[test]
    fn berry_weights_cover_all_kinds_once() {
        let kinds: Vec<_> = BERRY_WEIGHTS.iter().map(|(k, _)| *k).collect();
        for kind in [
            BerryKind::Razz,
            BerryKind::GoldenRazz,
            BerryKind::Oran,
            BerryKind::Pinap,
            BerryKind::Nanab,
            BerryKind::MegaStone,
        ] {
            assert_eq!(kinds.iter().filter(|k| **k == kind).count(), 1);
        }
    }

    #[test]
    fn pipe_rects_meet_at_gap_edges() {
        let tuning = Tuning::default();
        let pipe = Pipe {
            id: 1,
            x: 100.0,
            gap_y: 300.0,
            gap: 168.0,
            passed: false,
        };
        let (top, bot) = pipe.rects(&tuning);
        assert_eq!(top[1] + top[3], 300.0 - 84.0);
        assert_eq!(bot[1], 300.0 + 84.0);
        // Bottom rect ends at the ground line
        assert_eq!(bot[1] + bot[3], tuning.ground_y());
    }

    #[test]
    fn out_of_band_gap_yields_degenerate_rects_not_negative_heights() {
        use crate::sim::collision::circle_rect;

        let tuning = Tuning::default();
        // Gap bottom well below the ground line
        let low = Pipe {
            id: 1,
            x: 100.0,
            gap_y: 520.0,
            gap: 168.0,
            passed: false,
        };
        let (_, bot) = low.rects(&tuning);
        assert_eq!(bot[3], 0.0);
        // A zero-height rect is still safe to test against
        assert!(!circle_rect(100.0, 700.0, 5.0, bot[0], bot[1], bot[2], bot[3]));

        // Gap top above the ceiling
        let high = Pipe {
            id: 2,
            x: 100.0,
            gap_y: 40.0,
            gap: 168.0,
            passed: false,
        };
        let (top, _) = high.rects(&tuning);
        assert_eq!(top[3], 0.0);
        assert!(!circle_rect(100.0, -50.0, 5.0, top[0], top[1], top[2], top[3]));
    }
}

//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so the whole balance surface
//! is one named value. The defaults are the shipped balance; tests construct
//! modified copies instead of poking globals.

/// Maximum delta time fed to the simulation in one update. A stalled frame
/// (backgrounded tab) is clamped to this instead of exploding the physics.
pub const MAX_DT: f32 = 1.0 / 30.0;

/// The complete gameplay configuration set.
#[derive(Debug, Clone)]
pub struct Tuning {
    // World geometry (logical pixels)
    pub world_w: f32,
    pub world_h: f32,
    pub ground_h: f32,
    pub ceiling_y: f32,

    // Bird physics
    pub gravity: f32,
    pub flap_velocity: f32,
    pub max_fall_speed: f32,
    /// Velocity floor; flap impulses can never push past this.
    pub rise_clamp: f32,
    pub bird_x: f32,
    pub bird_start_frac: f32,
    pub bird_radius: f32,

    // Pipes
    pub pipe_width: f32,
    pub gap: f32,
    pub gap_hard: f32,
    pub spawn_every: f32,
    pub spawn_lead: f32,
    pub cull_margin: f32,
    pub gap_top_margin: f32,
    pub gap_bottom_extra: f32,

    // Scrolling: speed(score) = base + min(bonus_max, (score/5) * step)
    pub base_speed: f32,
    pub speed_step: f32,
    pub speed_bonus_max: f32,

    // Berries (collectibles)
    pub berry_chance: f32,
    pub berry_radius: f32,
    pub berry_x_jitter: f32,
    /// Vertical jitter as a fraction of the gap size.
    pub berry_y_jitter_frac: f32,
    /// Pickup tests use a slightly shrunk bird circle.
    pub pickup_radius_scale: f32,

    // Buffs (durations live in the berry effect table in `sim::state`)
    pub mega_radius_scale: f32,
    /// Extra pipes queued for clearing when a mega stone is taken,
    /// on top of the stone's own clear count.
    pub mega_clear_bonus: u32,
    pub banner_secs: f32,
    /// A queued clear fires once the nearest pipe is within this fraction
    /// of the world width.
    pub clear_near_frac: f32,

    // Menu / countdown flow
    pub hover_amp: f32,
    pub hover_freq: f32,
    pub transition_secs: f32,
    pub countdown_step_secs: f32,
    pub go_flash_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_w: 480.0,
            world_h: 640.0,
            ground_h: 92.0,
            ceiling_y: 20.0,

            gravity: 1500.0,
            flap_velocity: -460.0,
            max_fall_speed: 900.0,
            rise_clamp: -2000.0,
            bird_x: 130.0,
            bird_start_frac: 0.45,
            bird_radius: 16.0,

            pipe_width: 78.0,
            gap: 168.0,
            gap_hard: 138.0,
            spawn_every: 1.35,
            spawn_lead: 30.0,
            cull_margin: 40.0,
            gap_top_margin: 80.0,
            gap_bottom_extra: 110.0,

            base_speed: 220.0,
            speed_step: 12.5,
            speed_bonus_max: 140.0,

            berry_chance: 0.35,
            berry_radius: 14.0,
            berry_x_jitter: 24.0,
            berry_y_jitter_frac: 0.3,
            pickup_radius_scale: 0.85,

            mega_radius_scale: 4.0,
            mega_clear_bonus: 2,
            banner_secs: 1.2,
            clear_near_frac: 0.8,

            hover_amp: 9.0,
            hover_freq: 2.4,
            transition_secs: 0.35,
            countdown_step_secs: 0.5,
            go_flash_secs: 0.4,
        }
    }
}

impl Tuning {
    /// Gap size for the current difficulty.
    pub fn gap_for(&self, hard: bool) -> f32 {
        if hard { self.gap_hard } else { self.gap }
    }

    /// Horizontal scroll speed as a step function of score, recomputed
    /// every frame rather than stored.
    pub fn scroll_speed(&self, score: u32) -> f32 {
        let bonus = ((score / 5) as f32 * self.speed_step).min(self.speed_bonus_max);
        self.base_speed + bonus
    }

    /// Y of the ground line (top of the ground band).
    pub fn ground_y(&self) -> f32 {
        self.world_h - self.ground_h
    }

    /// Resting height of the bird at run start and while hovering.
    pub fn bird_start_y(&self) -> f32 {
        self.world_h * self.bird_start_frac
    }

    /// Valid range for a gap center, given a gap size. The bottom margin
    /// accounts for the ground plus extra clearance so a gap never clips
    /// the ceiling or overlaps the ground.
    pub fn gap_center_range(&self, gap: f32) -> (f32, f32) {
        let lo = self.gap_top_margin + gap * 0.5;
        let hi = self.world_h - (self.ground_h + self.gap_bottom_extra) - gap * 0.5;
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_speed_steps_every_five_points() {
        let t = Tuning::default();
        assert_eq!(t.scroll_speed(0), t.base_speed);
        assert_eq!(t.scroll_speed(4), t.base_speed);
        assert_eq!(t.scroll_speed(5), t.base_speed + t.speed_step);
        assert_eq!(t.scroll_speed(14), t.base_speed + 2.0 * t.speed_step);
    }

    #[test]
    fn scroll_speed_bonus_is_capped() {
        let t = Tuning::default();
        assert_eq!(t.scroll_speed(100_000), t.base_speed + t.speed_bonus_max);
    }

    #[test]
    fn hard_gap_is_strictly_smaller() {
        let t = Tuning::default();
        assert!(t.gap_for(true) < t.gap_for(false));
    }

    #[test]
    fn gap_center_range_is_non_empty_for_both_difficulties() {
        let t = Tuning::default();
        for hard in [false, true] {
            let (lo, hi) = t.gap_center_range(t.gap_for(hard));
            assert!(lo < hi);
        }
    }
}

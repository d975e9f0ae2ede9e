/// Tunable constants and the rule presets built from them.

use std::time::Duration;

use crate::error::ConfigError;

// ── Rule presets ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ruleset {
    /// No start screen, faster enemies, harder hits.  Replay restarts at once.
    Quick,
    /// Start screen before every run; play until health runs out.
    Standard,
    /// Like `Standard`, but reaching the winning score ends the run as a win.
    Campaign,
}

/// Every recognized gameplay constant.  Speeds are logical pixels per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub soldier_speed: f32,
    pub enemy_speed: f32,
    pub bullet_speed: f32,
    pub spawn_interval: Duration,
    pub tick_interval: Duration,
    pub damage: i32,
    pub max_health: i32,
    /// `None` disables the win condition.
    pub winning_score: Option<u32>,
    /// Whether a run waits on a start action (and replay returns there).
    pub start_screen: bool,
    pub start_position: (f32, f32),
    /// Where replay puts the player.  Deliberately not the start position.
    pub replay_position: (f32, f32),
}

impl Tuning {
    pub fn for_ruleset(ruleset: Ruleset) -> Self {
        let base = Tuning {
            soldier_speed: 10.0,
            enemy_speed: 1.8,
            bullet_speed: 10.0,
            spawn_interval: Duration::from_millis(200),
            tick_interval: Duration::from_millis(30),
            damage: 8,
            max_health: 100,
            winning_score: None,
            start_screen: true,
            start_position: (350.0, 500.0),
            replay_position: (250.0, 400.0),
        };
        match ruleset {
            Ruleset::Quick => Tuning {
                enemy_speed: 2.0,
                damage: 10,
                start_screen: false,
                ..base
            },
            Ruleset::Standard => base,
            Ruleset::Campaign => Tuning {
                winning_score: Some(250),
                ..base
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [
            ("soldier speed", self.soldier_speed),
            ("enemy speed", self.enemy_speed),
            ("bullet speed", self.bullet_speed),
        ];
        for (name, value) in speeds {
            // `!(v > 0)` also catches NaN
            if !(value > 0.0) || value.is_infinite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.spawn_interval.as_millis() == 0 {
            return Err(ConfigError::ZeroInterval { name: "spawn" });
        }
        if self.tick_interval.as_millis() == 0 {
            return Err(ConfigError::ZeroInterval { name: "tick" });
        }
        if self.damage < 1 {
            return Err(ConfigError::ZeroDamage);
        }
        if self.winning_score == Some(0) {
            return Err(ConfigError::ZeroWinningScore);
        }
        if self.max_health < 1 {
            return Err(ConfigError::NonPositive {
                name: "max health",
                value: self.max_health as f32,
            });
        }
        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::for_ruleset(Ruleset::Standard)
    }
}


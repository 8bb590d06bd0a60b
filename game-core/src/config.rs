//! Match-affecting configuration. Loaded once at process start: unlike the
//! reference crate's hot-reloadable settings, these values must stay fixed
//! for the lifetime of a match, since the updater's determinism guarantee
//! only holds if the rules it is applying don't change mid-game.

use std::env;
use std::time::Duration;

/// Tunables for the planning/resolution cycle and the updater's rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub turn_preparation_time: Duration,
    pub default_action_points: i64,
    pub max_turns: u32,
    pub winning_core_control_turns: u32,
    pub march_action_points: u32,
    pub spawn_action_points: u32,
    pub random_seed: u64,
    /// Pacing between events broadcast during resolution, so clients can
    /// animate one at a time instead of receiving the whole turn at once.
    /// Not part of spec's enumerated env vars; tunable via
    /// `EVENT_BROADCAST_DELAY_MS` regardless.
    pub event_broadcast_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            turn_preparation_time: Duration::from_secs(30),
            default_action_points: 3,
            max_turns: 20,
            winning_core_control_turns: 3,
            march_action_points: 1,
            spawn_action_points: 2,
            random_seed: 0xDEAD_C0DE,
            event_broadcast_delay: Duration::from_secs(2),
        }
    }
}

impl GameConfig {
    /// Builds a config from the environment, falling back to defaults for
    /// unset or unparsable variables.
    pub fn from_env() -> Self {
        let default = GameConfig::default();
        GameConfig {
            turn_preparation_time: env_secs("TURN_PREPARATION_TIME", default.turn_preparation_time),
            default_action_points: env_var("DEFAULT_ACTION_POINTS", default.default_action_points),
            max_turns: env_var("MAX_TURNS", default.max_turns),
            winning_core_control_turns: env_var(
                "WINNING_CORE_CONTROL_TURNS",
                default.winning_core_control_turns,
            ),
            march_action_points: env_var("MARCH_ACTION_POINTS", default.march_action_points),
            spawn_action_points: env_var("SPAWN_ACTION_POINTS", default.spawn_action_points),
            random_seed: env_var("RANDOM_SEED", default.random_seed),
            event_broadcast_delay: Duration::from_millis(env_var(
                "EVENT_BROADCAST_DELAY_MS",
                default.event_broadcast_delay.as_millis() as u64,
            )),
        }
    }
}

fn env_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_secs(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = GameConfig::default();
        assert_eq!(config.default_action_points, 3);
        assert_eq!(config.max_turns, 20);
        assert_eq!(config.winning_core_control_turns, 3);
        assert_eq!(config.march_action_points, 1);
        assert_eq!(config.spawn_action_points, 2);
    }
}

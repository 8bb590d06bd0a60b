//! Process-wide configuration, loaded once at startup from the environment.
//! Unlike the reference crate's hot-reloadable `GameConfig.json`, none of
//! this is reloadable: a match's action-point budget and turn limits must
//! not shift while players are mid-game.

use std::env;

use game_core::config::GameConfig;
use protocol::ConnectBounds;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub level_directory: String,
    pub min_lobby: usize,
    pub max_lobby: usize,
    pub username_min_len: usize,
    pub username_max_len: usize,
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            level_directory: "./levels".to_string(),
            min_lobby: 3,
            max_lobby: 8,
            username_min_len: 3,
            username_max_len: 8,
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let default = ServerConfig::default();
        ServerConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            level_directory: env::var("LEVEL_DIRECTORY").unwrap_or(default.level_directory),
            min_lobby: env_var("MIN_LOBBY", default.min_lobby),
            max_lobby: env_var("MAX_LOBBY", default.max_lobby),
            username_min_len: env_var("PLAYER_MIN", default.username_min_len),
            username_max_len: env_var("PLAYER_MAX", default.username_max_len),
            game: GameConfig::from_env(),
        }
    }

    pub fn lobby_size_bounds(&self) -> std::ops::RangeInclusive<usize> {
        self.min_lobby..=self.max_lobby
    }

    pub fn username_len_bounds(&self) -> std::ops::RangeInclusive<usize> {
        self.username_min_len..=self.username_max_len
    }

    pub fn connect_bounds(&self) -> ConnectBounds {
        ConnectBounds {
            username_len: self.username_len_bounds(),
            lobby_size: self.lobby_size_bounds(),
        }
    }
}

fn env_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

use std::env;
use std::time::Duration;

use crate::config::{parse_opt_var, parse_var};
use crate::domain::rules::DEFAULT_COUNTDOWN_SECS;
use crate::error::AppError;

const COUNTDOWN_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
const DEFAULT_TICK_MILLIS: u64 = 1000;

/// Match timing and shuffling knobs shared by every room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// `SPEED_COUNTDOWN_SECS`: ticks between both-ready and the deal.
    pub countdown_secs: u32,
    /// `SPEED_TICK_MILLIS`: length of one countdown tick.
    pub tick: Duration,
    /// `SPEED_SEED`: fixed base seed for every room. Unset means OS entropy
    /// per room.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            tick: Duration::from_millis(DEFAULT_TICK_MILLIS),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let countdown_secs = parse_var(&lookup, "SPEED_COUNTDOWN_SECS", DEFAULT_COUNTDOWN_SECS)?;
        if !COUNTDOWN_RANGE.contains(&countdown_secs) {
            return Err(AppError::config(format!(
                "SPEED_COUNTDOWN_SECS must be within {}..={}, got {countdown_secs}",
                COUNTDOWN_RANGE.start(),
                COUNTDOWN_RANGE.end()
            )));
        }

        let tick_millis = parse_var(&lookup, "SPEED_TICK_MILLIS", DEFAULT_TICK_MILLIS)?;
        if tick_millis == 0 {
            return Err(AppError::config("SPEED_TICK_MILLIS must be positive"));
        }

        let seed = parse_opt_var(&lookup, "SPEED_SEED")?;

        Ok(Self {
            countdown_secs,
            tick: Duration::from_millis(tick_millis),
            seed,
        })
    }

    /// Base seed for a new room.
    pub fn room_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

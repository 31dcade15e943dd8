//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level (0-3).
    ///
    /// Levels above 3 behave like 3.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        if level >= 1 {
            config.info.delete = 1;
            config.info.chmod = 1;
            config.info.stats = 1;
        }
        if level >= 2 {
            config.info.listing = 1;
            config.info.transfer = 1;
            config.debug.remote = 1;
            config.debug.walk = 1;
            config.debug.dup = 1;
        }
        if level >= 3 {
            config.info.set_all(2);
            config.debug.set_all(1);
            config.debug.remote = 2;
            config.debug.walk = 2;
            config.debug.queue = 2;
        }

        config
    }

    /// Apply a single info flag token (e.g., "delete2", "listing", "all", "none").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        match name {
            "all" => {
                self.info.set_all(level);
                return Ok(());
            }
            "none" => {
                self.info.set_all(0);
                return Ok(());
            }
            _ => {}
        }

        let flag = InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown info flag: {name}"))?;
        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "walk2", "remote", "all", "none").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        match name {
            "all" => {
                self.debug.set_all(level);
                return Ok(());
            }
            "none" => {
                self.debug.set_all(0);
                return Ok(());
            }
            _ => {}
        }

        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }

    /// Apply a comma separated list of info tokens.
    pub fn apply_info_list(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_info_flag(token))
    }

    /// Apply a comma separated list of debug tokens.
    pub fn apply_debug_list(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_debug_flag(token))
    }
}

/// Parse a flag token like "walk2" into ("walk", 2) or "del" into ("del", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    let digit_start = token.find(|c: char| c.is_ascii_digit());

    match digit_start {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let name = &token[..pos];
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}

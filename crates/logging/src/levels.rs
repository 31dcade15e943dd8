//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Permission changes issued during a recursive chmod.
    Chmod,
    /// Removals issued during a recursive delete.
    Delete,
    /// Directory listings produced by either engine.
    Listing,
    /// Processed file and directory totals.
    Stats,
    /// Files handed to the transfer consumer.
    Transfer,
}

impl InfoFlag {
    /// All info flags in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Chmod,
        Self::Delete,
        Self::Listing,
        Self::Stats,
        Self::Transfer,
    ];

    /// Token used when parsing `--info`-style flag lists.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chmod => "chmod",
            Self::Delete => "delete",
            Self::Listing => "listing",
            Self::Stats => "stats",
            Self::Transfer => "transfer",
        }
    }
}

/// Debug flags for engine internals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Commands submitted to the remote command layer.
    Cmd,
    /// Deletion scheduling, including deferred directory removal.
    Del,
    /// Cycle-guard hits on already visited directories.
    Dup,
    /// Filter predicate decisions.
    Filter,
    /// Pending-visit queue mutations.
    Queue,
    /// Remote state machine transitions.
    Remote,
    /// Local directory scans and batch delivery.
    Walk,
}

impl DebugFlag {
    /// All debug flags in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Cmd,
        Self::Del,
        Self::Dup,
        Self::Filter,
        Self::Queue,
        Self::Remote,
        Self::Walk,
    ];

    /// Token used when parsing `--debug`-style flag lists.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Del => "del",
            Self::Dup => "dup",
            Self::Filter => "filter",
            Self::Queue => "queue",
            Self::Remote => "remote",
            Self::Walk => "walk",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Permission change level.
    pub chmod: u8,
    /// Removal level.
    pub delete: u8,
    /// Listing level.
    pub listing: u8,
    /// Statistics level.
    pub stats: u8,
    /// Transfer level.
    pub transfer: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Chmod => self.chmod,
            InfoFlag::Delete => self.delete,
            InfoFlag::Listing => self.listing,
            InfoFlag::Stats => self.stats,
            InfoFlag::Transfer => self.transfer,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Chmod => self.chmod = level,
            InfoFlag::Delete => self.delete = level,
            InfoFlag::Listing => self.listing = level,
            InfoFlag::Stats => self.stats = level,
            InfoFlag::Transfer => self.transfer = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in InfoFlag::ALL {
            self.set(flag, level);
        }
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Command submission level.
    pub cmd: u8,
    /// Deletion scheduling level.
    pub del: u8,
    /// Cycle-guard level.
    pub dup: u8,
    /// Filter decision level.
    pub filter: u8,
    /// Queue mutation level.
    pub queue: u8,
    /// Remote state machine level.
    pub remote: u8,
    /// Local scan level.
    pub walk: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Cmd => self.cmd,
            DebugFlag::Del => self.del,
            DebugFlag::Dup => self.dup,
            DebugFlag::Filter => self.filter,
            DebugFlag::Queue => self.queue,
            DebugFlag::Remote => self.remote,
            DebugFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Cmd => self.cmd = level,
            DebugFlag::Del => self.del = level,
            DebugFlag::Dup => self.dup = level,
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Queue => self.queue = level,
            DebugFlag::Remote => self.remote = level,
            DebugFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_levels_round_trip_every_flag() {
        let mut levels = InfoLevels::default();
        for (index, flag) in InfoFlag::ALL.into_iter().enumerate() {
            levels.set(flag, index as u8 + 1);
        }
        for (index, flag) in InfoFlag::ALL.into_iter().enumerate() {
            assert_eq!(levels.get(flag), index as u8 + 1, "{flag:?}");
        }
    }

    #[test]
    fn debug_set_all_touches_every_flag() {
        let mut levels = DebugLevels::default();
        levels.set_all(3);
        assert!(DebugFlag::ALL.iter().all(|flag| levels.get(*flag) == 3));
    }

    #[test]
    fn flag_names_are_unique() {
        let mut names: Vec<_> = DebugFlag::ALL.iter().map(|flag| flag.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DebugFlag::ALL.len());
    }
}

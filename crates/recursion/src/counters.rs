/// Progress of a running operation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OperationCounters {
    /// Non-directory entries processed.
    pub files: u64,
    /// Directories enumerated.
    pub directories: u64,
}

impl OperationCounters {
    /// Counts one processed file.
    pub fn add_file(&mut self) {
        self.files += 1;
    }

    /// Counts `count` processed files.
    pub fn add_files(&mut self, count: usize) {
        self.files = self.files.saturating_add(count as u64);
    }

    /// Counts one enumerated directory.
    pub fn add_directory(&mut self) {
        self.directories += 1;
    }

    /// Resets both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

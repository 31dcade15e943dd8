/// Default number of entries a [`ListingBatch`](crate::ListingBatch) holds
/// before it is handed to the consumer.
pub const DEFAULT_BATCH_CAPACITY: usize = 5000;

/// Tuning knobs of the local traversal engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocalTraversalConfig {
    /// Combined file and directory entries per delivered batch.
    pub batch_capacity: usize,
    /// Character substituted for invalid characters when extending local
    /// target paths.
    pub replacement_char: char,
}

impl Default for LocalTraversalConfig {
    fn default() -> Self {
        Self {
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            replacement_char: '_',
        }
    }
}

impl LocalTraversalConfig {
    /// Sets the batch capacity, clamped to at least one entry.
    #[must_use]
    pub fn with_batch_capacity(mut self, capacity: usize) -> Self {
        self.batch_capacity = capacity.max(1);
        self
    }

    /// Sets the replacement character for invalid name characters.
    #[must_use]
    pub const fn with_replacement_char(mut self, replacement: char) -> Self {
        self.replacement_char = replacement;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LocalTraversalConfig::default();
        assert_eq!(config.batch_capacity, 5000);
        assert_eq!(config.replacement_char, '_');
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let config = LocalTraversalConfig::default().with_batch_capacity(0);
        assert_eq!(config.batch_capacity, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_use_defaults() {
        let config: LocalTraversalConfig =
            serde_json::from_str(r#"{"batch_capacity": 10}"#).expect("deserialize");
        assert_eq!(config.batch_capacity, 10);
        assert_eq!(config.replacement_char, '_');
    }
}

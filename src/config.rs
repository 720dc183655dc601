//! Tuning knobs for the query engine.

/// Ranges smaller than this are scanned linearly instead of bisected.
///
/// Sixteen entries keep the scan within a couple of cache lines.
pub const DEFAULT_LINEAR_SCAN_THRESHOLD: usize = 16;

/// Query engine configuration.
///
/// # Example
/// ```
/// use kdbox::SearchConfig;
/// let config = SearchConfig::default().with_linear_scan_threshold(32);
/// assert_eq!(config.linear_scan_threshold, 32);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search ranges with fewer entries than this are compared entry by entry.
    ///
    /// `0` and `1` disable the linear scan, every range is then bisected at
    /// its median down to single entries.
    pub linear_scan_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            linear_scan_threshold: DEFAULT_LINEAR_SCAN_THRESHOLD,
        }
    }

    /// Sets the linear scan cutover.
    #[must_use]
    pub const fn with_linear_scan_threshold(mut self, threshold: usize) -> Self {
        self.linear_scan_threshold = threshold;
        self
    }

    /// Returns whether a search range of `len` entries is scanned linearly.
    #[inline]
    pub(crate) const fn scans_linearly(&self, len: usize) -> bool {
        len < self.linear_scan_threshold
    }
}

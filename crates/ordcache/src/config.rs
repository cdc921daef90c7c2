//! Cache configuration

/// Construction parameters shared by both cache variants
///
/// A `max_size` of 0 leaves the cache unbounded. `initial_capacity` only
/// pre-sizes the index and node storage; it never limits the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries, 0 for unbounded
    pub max_size: usize,

    /// Number of entries to allocate room for up front
    pub initial_capacity: usize,
}

impl CacheConfig {
    /// Unbounded configuration with no pre-allocation
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries (0 for unbounded)
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set how many entries to allocate room for up front
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Whether a maximum size is in effect
    pub fn is_bounded(&self) -> bool {
        self.max_size > 0
    }
}

//! Configuration for the basement
//!
//! Centralized configuration with sensible defaults.

use crate::error::{BasementError, Result};

/// Tallest tower the skip list will ever build
pub const MAX_SUPPORTED_HEIGHT: usize = 32;

/// Tuning knobs for one Basement instance
#[derive(Debug, Clone)]
pub struct BasementConfig {
    // -------------------------------------------------------------------------
    // Arena Configuration
    // -------------------------------------------------------------------------
    /// Bytes per arena chunk. Larger allocations get a dedicated chunk.
    pub arena_block_size: usize,

    /// Alignment of every arena grant (power of two), relative to the
    /// start of its chunk. Affects layout and accounting only.
    pub arena_alignment: usize,

    /// Hard cap on granted arena bytes; `put` past it fails with
    /// `ResourceExhausted`. None means unbounded.
    pub arena_capacity: Option<usize>,

    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Maximum skip list tower height
    pub max_height: usize,

    /// A node is promoted one level with probability 1/branching_factor
    pub branching_factor: u32,

    /// Fixed RNG seed for tower heights (reproducible layouts in tests)
    pub seed: Option<u64>,
}

impl Default for BasementConfig {
    fn default() -> Self {
        Self {
            arena_block_size: 4096,
            arena_alignment: std::mem::size_of::<usize>(),
            arena_capacity: None,
            max_height: 12,
            branching_factor: 4,
            seed: None,
        }
    }
}

impl BasementConfig {
    /// Create a new config builder
    pub fn builder() -> BasementConfigBuilder {
        BasementConfigBuilder::default()
    }

    /// Reject values the arena or skip list cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.arena_block_size == 0 {
            return Err(BasementError::Config(
                "arena_block_size must be non-zero".to_string(),
            ));
        }
        if !self.arena_alignment.is_power_of_two() {
            return Err(BasementError::Config(format!(
                "arena_alignment must be a power of two, got {}",
                self.arena_alignment
            )));
        }
        if self.max_height == 0 || self.max_height > MAX_SUPPORTED_HEIGHT {
            return Err(BasementError::Config(format!(
                "max_height must be in 1..={}, got {}",
                MAX_SUPPORTED_HEIGHT, self.max_height
            )));
        }
        if self.branching_factor < 2 {
            return Err(BasementError::Config(format!(
                "branching_factor must be at least 2, got {}",
                self.branching_factor
            )));
        }
        Ok(())
    }
}

/// Builder for BasementConfig
#[derive(Default)]
pub struct BasementConfigBuilder {
    config: BasementConfig,
}

impl BasementConfigBuilder {
    /// Set the arena chunk size (in bytes)
    pub fn arena_block_size(mut self, size: usize) -> Self {
        self.config.arena_block_size = size;
        self
    }

    /// Set the alignment of arena grants
    pub fn arena_alignment(mut self, align: usize) -> Self {
        self.config.arena_alignment = align;
        self
    }

    /// Cap the arena at `bytes` granted bytes
    pub fn arena_capacity(mut self, bytes: usize) -> Self {
        self.config.arena_capacity = Some(bytes);
        self
    }

    /// Set the maximum skip list height
    pub fn max_height(mut self, height: usize) -> Self {
        self.config.max_height = height;
        self
    }

    /// Set the skip list branching factor
    pub fn branching_factor(mut self, factor: u32) -> Self {
        self.config.branching_factor = factor;
        self
    }

    /// Seed tower height generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Finish building
    pub fn build(self) -> BasementConfig {
        self.config
    }
}

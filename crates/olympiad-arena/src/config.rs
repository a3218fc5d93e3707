//! Region and scratch configuration parameters.

use crate::error::ArenaError;

/// Configuration for a single [`Region`](crate::Region).
///
/// The block is allocated in full at construction; there is no growth.
#[derive(Clone, Debug)]
pub struct RegionConfig {
    /// Total size of the backing block in bytes, header included.
    ///
    /// Default: 1 MiB.
    pub block_size: usize,

    /// Bytes reserved at the start of the block. Offsets below this are
    /// never handed out and rewinding never goes below it.
    ///
    /// Default: 128.
    pub header_size: usize,
}

impl RegionConfig {
    /// Default block size: 1 MiB.
    pub const DEFAULT_BLOCK_SIZE: usize = 1 << 20;

    /// Default reserved header prefix.
    pub const DEFAULT_HEADER_SIZE: usize = 128;

    /// Create a config for a block of `block_size` bytes with the default header.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            header_size: Self::DEFAULT_HEADER_SIZE,
        }
    }

    /// Check that the header fits inside the block.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.header_size > self.block_size {
            return Err(ArenaError::InvalidBlockSize {
                block_size: self.block_size,
                header_size: self.header_size,
            });
        }
        Ok(())
    }

    /// Usable bytes after the header.
    pub fn usable_bytes(&self) -> usize {
        self.block_size.saturating_sub(self.header_size)
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_SIZE)
    }
}

/// Configuration for a [`ScratchSet`](crate::ScratchSet).
#[derive(Clone, Debug)]
pub struct ScratchConfig {
    /// Number of scratch regions. Two is enough for any call chain that
    /// alternates between "my scratch" and "my caller's scratch".
    pub count: usize,

    /// Per-region configuration.
    pub region: RegionConfig,
}

impl ScratchConfig {
    /// Default scratch region count.
    pub const DEFAULT_COUNT: usize = 2;

    /// Default scratch block size: 32 MiB.
    pub const DEFAULT_BLOCK_SIZE: usize = 32 << 20;

    /// Create a config with the default count and the given block size.
    pub fn new(block_size: usize) -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
            region: RegionConfig::new(block_size),
        }
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_SIZE)
    }
}

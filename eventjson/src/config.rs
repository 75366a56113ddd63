// SPDX-License-Identifier: Apache-2.0

/// Resource limits for a token cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorConfig {
    /// Maximum number of simultaneously open objects and arrays.
    pub max_depth: usize,
    /// Size of the refill buffer used by [`StreamCursor`](crate::StreamCursor).
    pub buffer_size: usize,
}

impl CursorConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    pub const DEFAULT_BUFFER_SIZE: usize = 4096;

    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Returns the config with zero limits raised to 1.
    pub(crate) fn clamped(self) -> Self {
        Self {
            max_depth: self.max_depth.max(1),
            buffer_size: self.buffer_size.max(1),
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self::new()
    }
}

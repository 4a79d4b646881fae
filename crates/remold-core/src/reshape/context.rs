//! Reshape context threading configuration and recursion depth
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::options::ReshapeOptions;

/// Per-invocation state carried through the recursive descent
///
/// Holds the immutable options for the whole invocation plus the current
/// nesting depth. Contexts are cheap to copy; each recursion level gets its
/// own via [`ReshapeContext::descend`].
#[derive(Debug, Clone, Copy)]
pub struct ReshapeContext<'a> {
    options: &'a ReshapeOptions,
    depth: usize,
}

impl<'a> ReshapeContext<'a> {
    pub fn new(options: &'a ReshapeOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// The active configuration
    pub fn options(&self) -> &'a ReshapeOptions {
        self.options
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one nesting level
    ///
    /// Fails with [`Error::DepthExceeded`] once the configured limit is
    /// passed; the source object graph is caller-supplied, so this is the
    /// bound that keeps pathologically deep input from overflowing the stack.
    pub fn descend(&self) -> Result<ReshapeContext<'a>> {
        if self.depth >= self.options.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
            });
        }

        Ok(Self {
            options: self.options,
            depth: self.depth + 1,
        })
    }
}

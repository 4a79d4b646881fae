//! Engine configuration
//!
//! Options are a plain immutable value passed to each reshape call. There is
//! no global or mutable engine state; a [`Reshaper`](crate::reshape::Reshaper)
//! owns one `ReshapeOptions` and needs `&mut self` to replace it.

use serde::{Deserialize, Serialize};

use crate::error::TagPolicy;

/// Configuration for a reshape invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReshapeOptions {
    /// Tag namespace used to resolve record field names
    pub tag: String,

    /// Policy for record fields with no tag under the active namespace
    pub tag_policy: TagPolicy,

    /// Maximum recursion depth before the transform fails with
    /// [`Error::DepthExceeded`](crate::error::Error::DepthExceeded)
    pub max_depth: usize,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            tag: "json".to_string(),
            tag_policy: TagPolicy::default(),
            max_depth: 128,
        }
    }
}

impl ReshapeOptions {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_tag_policy(mut self, tag_policy: TagPolicy) -> Self {
        self.tag_policy = tag_policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

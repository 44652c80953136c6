//! Idempotent destination builders (check + apply pattern).
//!
//! Every builder registers the entry it creates, verifies or keeps in the
//! [`IdentityRegistry`] handed to [`Applicable::apply`], including the
//! "already up to date" branches.
pub mod directory;
pub mod error;
pub mod helpers;
pub mod icon;
pub mod shortcut;

use anyhow::Result;

use crate::identity::IdentityRegistry;

/// Minimal interface for resources that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change and register the resulting entry.
    ///
    /// This method should:
    /// - Create or refresh the destination entry if it is missing or stale
    /// - Register the entry in `registry`, whether or not it changed
    /// - Return the appropriate `ResourceChange` result
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, a platform helper failing, or an entry of the wrong
    /// kind occupying the destination.
    fn apply(&self, registry: &mut IdentityRegistry) -> Result<ResourceChange>;
}

/// State of a destination entry relative to what the category tree wants.
///
/// # Examples
///
/// ```
/// use classifier::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let stale = ResourceState::Incorrect { current: "older than .categories.json".into() };
/// let skip = ResourceState::Invalid { reason: "a directory occupies the link path".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Entry does not exist.
    Missing,
    /// Entry exists and is up to date.
    Correct,
    /// Entry exists but is stale.
    Incorrect {
        /// Description of the current state.
        current: String,
    },
    /// Entry cannot be applied (e.g. a directory sits where a file belongs).
    Invalid {
        /// Reason why the entry cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use classifier::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Entry was created or replaced.
    Applied,
    /// Entry was already up to date and was only registered.
    AlreadyCorrect,
}

/// Resources that can inspect their own destination state.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O failures
    /// or permission issues.
    fn current_state(&self) -> Result<ResourceState>;
}

//! Gesture binding lifecycle - explicit states instead of scattered flags.
//!
//! ## State Transitions
//!
//! ```text
//! Unbound -> Bound     (init with the gesture active)
//! Bound   -> Unbound   (re-init with the gesture disabled)
//! Bound   -> Retired   (single-drop lock fires)
//! Retired -> Retired   (terminal: later resets re-run init but never
//!                       re-register the binding)
//! ```

/// Lifecycle of one draggable's gesture binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BindingState {
    /// No gesture registered (never initialized, or disabled)
    #[default]
    Unbound,

    /// Gesture registered and live
    Bound,

    /// Permanently deregistered by the single-drop lock
    Retired,
}

impl BindingState {
    /// Returns true if a gesture binding is currently registered
    pub fn is_bound(self) -> bool {
        matches!(self, Self::Bound)
    }

    /// Returns true if the single-drop lock has fired
    pub fn is_retired(self) -> bool {
        matches!(self, Self::Retired)
    }
}

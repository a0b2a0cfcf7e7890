// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot suppression of the deep-equality warning per subtree.
//!
//! When a component re-renders with deeply equal props, only the topmost one
//! in a subtree gets the warning; its descendants would just repeat it. The
//! reconciler brackets every component's work with [`CascadeState::push`] and
//! [`CascadeState::pop`], threading the returned [`CascadeScope`] itself, so
//! a flag set inside a subtree never leaks to that subtree's siblings.
//!
//! ```rust
//! use lanetrack_core::cascade::CascadeState;
//!
//! let mut state = CascadeState::default();
//! let scope = state.push();
//! state.suppress();
//! assert!(state.is_suppressed());
//! state.pop(scope);
//! assert!(!state.is_suppressed());
//! ```

/// Whether some ancestor already warned about deeply equal props.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeState {
    warned: bool,
}

/// Token returned by [`CascadeState::push`], capturing the flag on subtree
/// entry. Hand it back to [`CascadeState::pop`] on exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "a cascade scope must be handed back to `pop`"]
pub struct CascadeScope(bool);

impl CascadeScope {
    /// Whether the flag was already set when the subtree was entered.
    #[must_use]
    pub const fn was_suppressed(self) -> bool {
        self.0
    }
}

impl CascadeState {
    /// Enters a subtree. The flag is left as is: if an ancestor warned, its
    /// descendants stay quiet.
    pub fn push(&self) -> CascadeScope {
        CascadeScope(self.warned)
    }

    /// Leaves a subtree, restoring the flag captured by `push`.
    pub fn pop(&mut self, scope: CascadeScope) {
        self.warned = scope.0;
    }

    /// Returns `true` if a warning was already emitted in this subtree.
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        self.warned
    }

    /// Marks the current subtree as warned.
    pub fn suppress(&mut self) {
        self.warned = true;
    }
}

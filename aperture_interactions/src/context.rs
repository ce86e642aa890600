// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared interaction context: one authoritative open/closed boolean per
//! logical widget, plus the provenance of how it last changed.
//!
//! ## Overview
//!
//! Triggers never mutate the open state directly; every request goes through
//! [`InteractionsContext::set_open`], which applies a small arbitration
//! policy:
//!
//! - A request for a *different* value is always accepted.
//! - A request for the *same* value (which happens when several triggers
//!   independently re-assert the state, for example hover re-entering an
//!   already click-opened widget) is accepted only when
//!   [`ContextOptions::allow_override_interaction_info`] is set and the
//!   optional veto callback does not return `false`. Accepting a redundant
//!   request refreshes the provenance record without touching the state.
//!
//! Accepted calls rotate [`InteractionInfos::current`] into
//! [`InteractionInfos::prev`], so a consumer can always answer "why did this
//! change" (and "what did it change from") after the fact.
//!
//! ## Minimal example
//!
//! ```
//! use aperture_interactions::context::{ContextOptions, InteractionsContext};
//! use aperture_interactions::types::{ActionInfo, InteractionKind};
//!
//! let mut ctx: InteractionsContext<u32> = InteractionsContext::new(ContextOptions::default());
//! assert!(!ctx.open());
//!
//! ctx.set_open(true, Some(ActionInfo::new(InteractionKind::Click)));
//! assert!(ctx.open());
//! let current = ctx.interaction_infos().current.as_ref().unwrap();
//! assert_eq!(current.kind, InteractionKind::Click);
//! assert!(current.next_open);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::types::{ActionInfo, ElementModel, InteractionEvent, InteractionKind};

/// Veto callback consulted for redundant (same-value) `set_open` requests.
///
/// Returning `false` aborts the provenance override; any other result lets it
/// through.
pub type ChangeVeto<K> = Box<dyn FnMut(bool, Option<&ActionInfo<K>>) -> bool>;

/// A single accepted state-change record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InteractionInfo<K> {
    /// Which trigger requested the change.
    pub kind: InteractionKind,
    /// The open value that was set.
    pub next_open: bool,
    /// The originating low-level event, if any.
    pub event: Option<InteractionEvent<K>>,
}

/// The two most recent accepted state-change records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InteractionInfos<K> {
    /// Info of the last accepted `set_open` call.
    pub current: Option<InteractionInfo<K>>,
    /// Info of the accepted call before that.
    pub prev: Option<InteractionInfo<K>>,
}

// Manual impl: a derived one would demand `K: Default` even though no bare
// `K` is held.
impl<K> Default for InteractionInfos<K> {
    fn default() -> Self {
        Self {
            current: None,
            prev: None,
        }
    }
}

/// Configuration for an [`InteractionsContext`].
pub struct ContextOptions<K> {
    /// Initial open state.
    ///
    /// Defaults to `false`.
    pub default_open: bool,
    /// Whether a redundant `set_open` (same value as the current state) may
    /// override the recorded interaction info.
    ///
    /// Defaults to `true`, so the provenance record reflects the most recent
    /// genuine interaction rather than freezing on the first.
    pub allow_override_interaction_info: bool,
    /// Optional veto consulted before a redundant override is applied.
    pub handle_change: Option<ChangeVeto<K>>,
}

impl<K> Default for ContextOptions<K> {
    fn default() -> Self {
        Self {
            default_open: false,
            allow_override_interaction_info: true,
            handle_change: None,
        }
    }
}

impl<K> fmt::Debug for ContextOptions<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextOptions")
            .field("default_open", &self.default_open)
            .field(
                "allow_override_interaction_info",
                &self.allow_override_interaction_info,
            )
            .field("handle_change", &self.handle_change.is_some())
            .finish()
    }
}

/// Shared state cell for one logical disclosure widget.
///
/// Holds the interactor and target element keys (owner-assigned, possibly
/// absent before mount), the authoritative `open` boolean, and the two most
/// recent accepted state-change records. All mutation of `open` goes through
/// [`InteractionsContext::set_open`].
pub struct InteractionsContext<K> {
    interactor: Option<K>,
    targets: Vec<K>,
    open: bool,
    infos: InteractionInfos<K>,
    change_count: u64,
    options: ContextOptions<K>,
}

impl<K: Copy + Eq> InteractionsContext<K> {
    /// Create a context with the given options and no elements assigned yet.
    pub fn new(options: ContextOptions<K>) -> Self {
        Self {
            interactor: None,
            targets: Vec::new(),
            open: options.default_open,
            infos: InteractionInfos::default(),
            change_count: 0,
            options,
        }
    }

    /// The interactor element key, if one is assigned.
    pub fn interactor(&self) -> Option<K> {
        self.interactor
    }

    /// Assign (or clear) the interactor element.
    pub fn set_interactor(&mut self, interactor: Option<K>) {
        self.interactor = interactor;
    }

    /// The target element keys, in order.
    pub fn targets(&self) -> &[K] {
        &self.targets
    }

    /// Replace the target element list.
    pub fn set_targets(&mut self, targets: Vec<K>) {
        self.targets = targets;
    }

    /// The authoritative open state.
    pub fn open(&self) -> bool {
        self.open
    }

    /// The two most recent accepted state-change records.
    pub fn interaction_infos(&self) -> &InteractionInfos<K> {
        &self.infos
    }

    /// Count of accepted calls that actually flipped the open value.
    ///
    /// Triggers use this as a generation stamp to detect that the state
    /// changed out from under an in-flight gesture (see the click trigger's
    /// press guard).
    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    /// Request a state change; returns whether it was accepted.
    ///
    /// A differing value is always accepted. A redundant value is accepted
    /// only if overriding interaction info is allowed and the veto callback,
    /// when present, does not return `false`. Rejected requests leave the
    /// state and both info records untouched.
    pub fn set_open(&mut self, open: bool, info: Option<ActionInfo<K>>) -> bool {
        if open == self.open {
            if !self.options.allow_override_interaction_info {
                return false;
            }
            if let Some(veto) = self.options.handle_change.as_mut()
                && !veto(open, info.as_ref())
            {
                return false;
            }
        } else {
            self.change_count += 1;
        }

        let info = info.unwrap_or_default();
        self.infos.prev = self.infos.current.take();
        self.infos.current = Some(InteractionInfo {
            kind: info.kind,
            next_open: open,
            event: info.event,
        });
        self.open = open;
        true
    }

    /// Whether `node` lies inside the widget's containment set.
    ///
    /// The set is the interactor plus, when `include_targets` is set, every
    /// target element. A `None` node (for example a null `relatedTarget`) is
    /// never contained.
    pub fn in_containment(
        &self,
        model: &impl ElementModel<K>,
        node: Option<K>,
        include_targets: bool,
    ) -> bool {
        let Some(node) = node else {
            return false;
        };
        let interactor = self
            .interactor
            .is_some_and(|container| model.contains(container, node));
        if interactor {
            return true;
        }
        include_targets
            && self
                .targets
                .iter()
                .any(|&container| model.contains(container, node))
    }
}

impl<K: fmt::Debug> fmt::Debug for InteractionsContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionsContext")
            .field("interactor", &self.interactor)
            .field("targets", &self.targets)
            .field("open", &self.open)
            .field("infos", &self.infos)
            .field("change_count", &self.change_count)
            .field("options", &self.options)
            .finish()
    }
}

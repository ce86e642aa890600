// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-based scheduling of open/close transitions.
//!
//! ## Overview
//!
//! Hover interactions are speculative: the pointer may only be passing over.
//! The [`DelayController`] defers a requested transition by a configurable
//! per-direction delay and lets a newer request supersede it, so a quick
//! leave-and-re-enter never flickers the open state.
//!
//! The controller owns no timer. Requests record a deadline relative to the
//! host-supplied timestamp of the triggering event, and the host drives time
//! by calling [`DelayController::poll`] (directly or through the facade).
//! [`DelayController::deadline`] exposes the next wake-up so hosts can arm a
//! real timer instead of polling.
//!
//! At most one transition is pending per controller; a new request cancels
//! and replaces the old one, never queues behind it. [`DelayController::clear`]
//! guarantees no stale transition fires afterwards.
//!
//! ## Minimal example
//!
//! ```
//! use aperture_interactions::context::{ContextOptions, InteractionsContext};
//! use aperture_interactions::delay::{Delay, DelayController};
//! use aperture_interactions::types::{ActionInfo, InteractionKind};
//!
//! let mut ctx: InteractionsContext<u32> = InteractionsContext::new(ContextOptions::default());
//! let mut delay = DelayController::new(Some(Delay::Both(100)));
//!
//! delay.request_open(&ctx, ActionInfo::new(InteractionKind::Hover), 1_000, false);
//! assert!(!delay.poll(&mut ctx, 1_099));
//! assert!(delay.poll(&mut ctx, 1_100));
//! assert!(ctx.open());
//! ```

use crate::context::InteractionsContext;
use crate::types::ActionInfo;

/// Delay duration in milliseconds.
pub type DelayMs = u64;

/// Transition delay configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Delay {
    /// One duration applied to both directions.
    Both(DelayMs),
    /// Independent durations per direction; an unset direction defaults to 0.
    PerDirection {
        /// Delay before an open transition fires.
        open: Option<DelayMs>,
        /// Delay before a close transition fires.
        close: Option<DelayMs>,
    },
}

impl Delay {
    /// Resolve the delay for a transition toward `open`.
    pub fn resolve(&self, open: bool) -> DelayMs {
        match *self {
            Self::Both(ms) => ms,
            Self::PerDirection { open: o, close: c } => {
                if open {
                    o.unwrap_or(0)
                } else {
                    c.unwrap_or(0)
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Pending<K> {
    next_open: bool,
    info: ActionInfo<K>,
    deadline: u64,
}

/// Debounced transition scheduler; at most one pending transition at a time.
#[derive(Clone, Debug)]
pub struct DelayController<K> {
    delay: Option<Delay>,
    pending: Option<Pending<K>>,
}

impl<K: Copy + Eq> DelayController<K> {
    /// Create a controller with the given delay configuration.
    pub fn new(delay: Option<Delay>) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the delay configuration.
    ///
    /// An already-pending transition keeps its original deadline.
    pub fn set_delay(&mut self, delay: Option<Delay>) {
        self.delay = delay;
    }

    /// The delay that would apply to a transition toward `open`.
    pub fn get_delay(&self, open: bool) -> DelayMs {
        self.delay.map_or(0, |delay| delay.resolve(open))
    }

    /// Request a transition to `next_open` at `now + delay`.
    ///
    /// With nothing pending, a request for the context's current value is a
    /// no-op unless `force` is set, so redundant signals never arm a
    /// redundant timer. A pending transition is always cancelled and
    /// replaced, so requesting open then close before the open fires results
    /// in a single close.
    pub fn request(
        &mut self,
        ctx: &InteractionsContext<K>,
        next_open: bool,
        info: ActionInfo<K>,
        now: u64,
        force: bool,
    ) {
        if self.pending.is_none() && next_open == ctx.open() && !force {
            return;
        }
        self.pending = Some(Pending {
            next_open,
            info,
            deadline: now + self.get_delay(next_open),
        });
    }

    /// Request an open transition. See [`DelayController::request`].
    pub fn request_open(
        &mut self,
        ctx: &InteractionsContext<K>,
        info: ActionInfo<K>,
        now: u64,
        force: bool,
    ) {
        self.request(ctx, true, info, now, force);
    }

    /// Request a close transition. See [`DelayController::request`].
    pub fn request_close(
        &mut self,
        ctx: &InteractionsContext<K>,
        info: ActionInfo<K>,
        now: u64,
        force: bool,
    ) {
        self.request(ctx, false, info, now, force);
    }

    /// Cancel any pending transition without firing it.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending transition, if one is armed.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fire the pending transition if its deadline has passed.
    ///
    /// Returns whether a transition fired.
    pub fn poll(&mut self, ctx: &mut InteractionsContext<K>, now: u64) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return false;
        }
        if let Some(pending) = self.pending.take() {
            ctx.set_open(pending.next_open, Some(pending.info));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextOptions;
    use crate::types::InteractionKind;

    fn ctx() -> InteractionsContext<u32> {
        InteractionsContext::new(ContextOptions::default())
    }

    fn info() -> ActionInfo<u32> {
        ActionInfo::new(InteractionKind::Hover)
    }

    #[test]
    fn resolves_per_direction_delays_with_zero_default() {
        let delay = Delay::PerDirection {
            open: Some(150),
            close: None,
        };
        assert_eq!(delay.resolve(true), 150);
        assert_eq!(delay.resolve(false), 0);
        assert_eq!(Delay::Both(40).resolve(false), 40);
    }

    #[test]
    fn unset_delay_fires_at_request_time() {
        let mut ctx = ctx();
        let mut delay = DelayController::new(None);
        delay.request_open(&ctx, info(), 500, false);
        assert_eq!(delay.deadline(), Some(500));
        assert!(delay.poll(&mut ctx, 500));
        assert!(ctx.open());
    }

    #[test]
    fn redundant_request_is_a_no_op_without_force() {
        let ctx = ctx();
        let mut delay = DelayController::new(Some(Delay::Both(100)));
        // Context is already closed; requesting close arms nothing.
        delay.request_close(&ctx, info(), 0, false);
        assert_eq!(delay.deadline(), None);
        // With force, a timer is armed anyway.
        delay.request_close(&ctx, info(), 0, true);
        assert_eq!(delay.deadline(), Some(100));
    }

    #[test]
    fn newer_request_supersedes_pending_one() {
        let mut ctx = ctx();
        ctx.set_open(true, None);
        let mut delay = DelayController::new(Some(Delay::Both(100)));

        // Schedule close, then re-open before it fires; the re-open replaces
        // the pending close even though the context is still open.
        delay.request_close(&ctx, info(), 0, false);
        delay.request_open(&ctx, info(), 50, false);

        // Exactly one transition fires, the later one.
        assert!(!delay.poll(&mut ctx, 100));
        assert!(delay.poll(&mut ctx, 150));
        assert!(ctx.open());
        assert_eq!(ctx.change_count(), 1);
        assert!(!delay.poll(&mut ctx, 1_000));
    }

    #[test]
    fn open_then_close_results_in_a_single_close() {
        let mut ctx = ctx();
        let mut delay = DelayController::new(Some(Delay::Both(100)));

        // The close supersedes the pending open; only the close ever fires.
        delay.request_open(&ctx, info(), 0, false);
        delay.request_close(&ctx, info(), 10, false);
        assert_eq!(delay.deadline(), Some(110));

        assert!(delay.poll(&mut ctx, 110));
        assert!(!ctx.open());
        assert!(!delay.poll(&mut ctx, 10_000));
        // One accepted call total, and it set `false`.
        assert!(!ctx.interaction_infos().current.unwrap().next_open);
        assert!(ctx.interaction_infos().prev.is_none());
    }

    #[test]
    fn clear_prevents_a_stale_fire() {
        let mut ctx = ctx();
        let mut delay = DelayController::new(Some(Delay::Both(10)));
        delay.request_open(&ctx, info(), 0, false);
        delay.clear();
        assert!(!delay.poll(&mut ctx, 1_000));
        assert!(!ctx.open());
    }

    #[test]
    fn fired_transition_carries_its_info() {
        let mut ctx = ctx();
        let mut delay = DelayController::new(None);
        delay.request_open(&ctx, info(), 0, false);
        delay.poll(&mut ctx, 0);
        assert_eq!(
            ctx.interaction_infos().current.unwrap().kind,
            InteractionKind::Hover
        );
    }
}

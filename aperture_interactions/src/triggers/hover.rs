// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover trigger: pointer enter/leave containment with delayed transitions.
//!
//! ## Overview
//!
//! Entering the interactor (or, with
//! [`HoverProps::allow_pointer_enter_target`], a target) while closed
//! schedules an open transition through the trigger's [`DelayController`].
//! Leaving toward a node *outside* the containment set while open schedules a
//! close. Leaving toward a contained node is never an exit, which is what
//! keeps a popup open while the pointer travels from the trigger onto it.
//!
//! An optional close predicate ([`HoverProps::handle_close`]) replaces the
//! immediate close schedule: the predicate is invoked with the leave event
//! and then re-invoked on every document-wide pointer move until it signals
//! close-worthy (`false`) or the open state flips for another reason. While
//! the predicate is being evaluated the trigger wants the document
//! `pointermove` listener ([`HoverTrigger::wants_document_moves`]).
//!
//! The pointer-type allow-list applies to the enter path only; leave events
//! always run containment bookkeeping.

use alloc::boxed::Box;
use core::fmt;

use crate::context::InteractionsContext;
use crate::delay::{Delay, DelayController};
use crate::props::ElementProps;
use crate::triggers::Handler;
use crate::types::{ActionInfo, ElementModel, PointerEvent, PointerTypes};

/// Custom close predicate, run on the leave event and on subsequent
/// document-wide pointer moves.
///
/// Returning `false` means "close now" (a close transition is scheduled);
/// anything else keeps the widget open and the tracking alive.
pub type CloseHandler<K> = Box<dyn FnMut(&InteractionsContext<K>, &PointerEvent<K>) -> bool>;

/// Configuration for a [`HoverTrigger`].
pub struct HoverProps<K> {
    /// Whether the trigger is active.
    ///
    /// Defaults to `true`.
    pub enabled: bool,
    /// Pointer types that may drive open/close.
    ///
    /// Defaults to all classified types (mouse, touch, pen).
    pub pointer_types: PointerTypes,
    /// Transition delay; `None` means both directions fire immediately.
    pub delay: Option<Delay>,
    /// Whether entering a target keeps the widget active, extending the
    /// containment set to the targets.
    ///
    /// Defaults to `false`.
    pub allow_pointer_enter_target: bool,
    /// Optional predicate deferring the close decision past the leave event.
    pub handle_close: Option<CloseHandler<K>>,
}

impl<K> Default for HoverProps<K> {
    fn default() -> Self {
        Self {
            enabled: true,
            pointer_types: PointerTypes::default(),
            delay: None,
            allow_pointer_enter_target: false,
            handle_close: None,
        }
    }
}

impl<K> fmt::Debug for HoverProps<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverProps")
            .field("enabled", &self.enabled)
            .field("pointer_types", &self.pointer_types)
            .field("delay", &self.delay)
            .field("allow_pointer_enter_target", &self.allow_pointer_enter_target)
            .field("handle_close", &self.handle_close.is_some())
            .finish()
    }
}

/// Pointer enter/leave state machine with delayed open/close.
#[derive(Debug)]
pub struct HoverTrigger<K> {
    props: HoverProps<K>,
    delay: DelayController<K>,
    tracking_moves: bool,
}

impl<K: Copy + Eq> HoverTrigger<K> {
    /// Create the trigger with the given configuration.
    pub fn new(props: HoverProps<K>) -> Self {
        let delay = DelayController::new(props.delay);
        Self {
            props,
            delay,
            tracking_moves: false,
        }
    }

    /// Current configuration.
    pub fn props(&self) -> &HoverProps<K> {
        &self.props
    }

    /// Replace the configuration.
    ///
    /// Disabling the trigger cancels its pending transition and stops
    /// move-outside tracking, so nothing stale fires afterwards.
    pub fn set_props(&mut self, props: HoverProps<K>) {
        self.delay.set_delay(props.delay);
        self.props = props;
        if !self.props.enabled {
            self.invalidate();
        }
    }

    fn allows(&self, event: &PointerEvent<K>) -> bool {
        event
            .pointer_type
            .is_some_and(|pt| self.props.pointer_types.allows(pt))
    }

    fn in_container(
        &self,
        ctx: &InteractionsContext<K>,
        model: &impl ElementModel<K>,
        node: Option<K>,
    ) -> bool {
        ctx.in_containment(model, node, self.props.allow_pointer_enter_target)
    }

    /// Pointer entered the interactor (or a target, when configured).
    pub fn on_pointer_enter(&mut self, ctx: &InteractionsContext<K>, event: &PointerEvent<K>) {
        if !self.props.enabled || !self.allows(event) {
            return;
        }
        if !ctx.open() {
            self.tracking_moves = false;
            self.delay
                .request_open(ctx, ActionInfo::hover(event), event.time, false);
        } else {
            // Already open: the only transition that can be pending is a
            // close, and re-entering supersedes it.
            self.delay.clear();
        }
    }

    /// Pointer left the interactor (or a target, when configured).
    pub fn on_pointer_leave(
        &mut self,
        ctx: &InteractionsContext<K>,
        model: &impl ElementModel<K>,
        event: &PointerEvent<K>,
    ) {
        if !self.props.enabled {
            return;
        }
        // Leaving toward a contained node is not an exit.
        if self.in_container(ctx, model, event.related_target) {
            return;
        }
        if ctx.open() {
            if self.props.handle_close.is_some() {
                self.run_close_handler(ctx, event);
                self.tracking_moves = true;
            } else {
                self.delay
                    .request_close(ctx, ActionInfo::hover(event), event.time, false);
            }
        }
    }

    /// Document-wide pointer move, delivered while
    /// [`HoverTrigger::wants_document_moves`] is set.
    pub fn on_document_pointer_move(
        &mut self,
        ctx: &InteractionsContext<K>,
        event: &PointerEvent<K>,
    ) {
        if !self.tracking_moves {
            return;
        }
        self.run_close_handler(ctx, event);
    }

    fn run_close_handler(&mut self, ctx: &InteractionsContext<K>, event: &PointerEvent<K>) {
        let Some(handler) = self.props.handle_close.as_mut() else {
            self.tracking_moves = false;
            return;
        };
        if !ctx.open() {
            self.tracking_moves = false;
            return;
        }
        if !handler(ctx, event) {
            self.delay
                .request_close(ctx, ActionInfo::hover(event), event.time, false);
        }
    }

    /// Fire the pending delayed transition if due. Returns whether it fired.
    pub fn poll(&mut self, ctx: &mut InteractionsContext<K>, now: u64) -> bool {
        self.delay.poll(ctx, now)
    }

    /// Deadline of the pending delayed transition, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.delay.deadline()
    }

    /// Cancel the pending transition and stop move-outside tracking.
    ///
    /// Called when the open state changes out-of-band, when the trigger is
    /// disabled, and at teardown. Safe to call repeatedly.
    pub fn invalidate(&mut self) {
        self.delay.clear();
        self.tracking_moves = false;
    }

    /// Whether the trigger currently needs the document `pointermove`
    /// listener.
    pub fn wants_document_moves(&self) -> bool {
        self.props.enabled && self.tracking_moves
    }

    /// The listeners this trigger wants on the interactor and targets.
    pub fn element_props(&self) -> ElementProps<Handler> {
        let mut props = ElementProps::default();
        if !self.props.enabled {
            return props;
        }
        props
            .interactor
            .push_handler("onPointerenter", Handler::HoverPointerEnter);
        props
            .interactor
            .push_handler("onPointerleave", Handler::HoverPointerLeave);
        if self.props.allow_pointer_enter_target {
            props
                .target
                .push_handler("onPointerenter", Handler::HoverPointerEnter);
            props
                .target
                .push_handler("onPointerleave", Handler::HoverPointerLeave);
        }
        props
    }

    /// Release transient state. Idempotent.
    pub fn cleanup(&mut self) {
        self.invalidate();
    }
}

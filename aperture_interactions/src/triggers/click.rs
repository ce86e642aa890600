// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click trigger: toggle on activation, plus outside-click detection.
//!
//! ## Overview
//!
//! A primary-button click on the interactor toggles the open state — unless
//! the state already changed between the gesture's `pointerdown` and its
//! `click`. That guard covers a cross-modality ordering hazard: pressing a
//! hover-opened trigger would otherwise deliver a click that immediately
//! toggles the widget closed again. The guard is a generation check:
//! `pointerdown` snapshots the context's change count, and `click` is
//! suppressed when the count has moved since.
//!
//! While open and configured with [`ClickProps::handle_click_outside`], the
//! trigger wants a document-level `pointerdown` listener
//! ([`ClickTrigger::wants_document_pointer_down`]); a press landing outside
//! the interactor and targets closes the widget.
//!
//! Keyboard activation applies only to non-native-button interactors (native
//! buttons already synthesize clicks): Space suppresses the default on
//! keydown (to avoid page scroll) and toggles on keyup, Enter toggles on
//! keydown.

use alloc::boxed::Box;
use core::fmt;

use crate::context::InteractionsContext;
use crate::props::ElementProps;
use crate::triggers::Handler;
use crate::types::{
    ActionInfo, DefaultAction, ElementModel, Key, KeyEvent, PointerEvent, PointerTypes,
};

/// Outside-click handling policy.
pub enum OutsideClick<K> {
    /// Ignore presses outside the widget.
    Off,
    /// Close on any press outside the widget.
    Close,
    /// Close when the predicate returns `true` for the outside press.
    Filter(Box<dyn FnMut(&PointerEvent<K>) -> bool>),
}

impl<K> Default for OutsideClick<K> {
    fn default() -> Self {
        Self::Off
    }
}

impl<K> fmt::Debug for OutsideClick<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("Off"),
            Self::Close => f.write_str("Close"),
            Self::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

/// Configuration for a [`ClickTrigger`].
#[derive(Debug)]
pub struct ClickProps<K> {
    /// Whether the trigger is active.
    ///
    /// Defaults to `true`.
    pub enabled: bool,
    /// Pointer types that may drive the toggle.
    ///
    /// Defaults to all classified types (mouse, touch, pen).
    pub pointer_types: PointerTypes,
    /// Outside-click handling.
    ///
    /// Defaults to [`OutsideClick::Off`].
    pub handle_click_outside: OutsideClick<K>,
}

impl<K> Default for ClickProps<K> {
    fn default() -> Self {
        Self {
            enabled: true,
            pointer_types: PointerTypes::default(),
            handle_click_outside: OutsideClick::Off,
        }
    }
}

/// Toggle-on-activation state machine with outside-click detection.
#[derive(Debug)]
pub struct ClickTrigger<K> {
    props: ClickProps<K>,
    /// Context change count snapshotted at the gesture's `pointerdown`.
    press_change_count: u64,
}

impl<K: Copy + Eq> ClickTrigger<K> {
    /// Create the trigger with the given configuration.
    pub fn new(props: ClickProps<K>) -> Self {
        Self {
            props,
            press_change_count: 0,
        }
    }

    /// Current configuration.
    pub fn props(&self) -> &ClickProps<K> {
        &self.props
    }

    /// Replace the configuration.
    pub fn set_props(&mut self, props: ClickProps<K>) {
        self.props = props;
    }

    fn toggle(&self, ctx: &mut InteractionsContext<K>, info: ActionInfo<K>) {
        let next = !ctx.open();
        ctx.set_open(next, Some(info));
    }

    /// Pointer pressed on the interactor; starts a gesture.
    pub fn on_pointer_down(&mut self, ctx: &InteractionsContext<K>, _event: &PointerEvent<K>) {
        if !self.props.enabled {
            return;
        }
        self.press_change_count = ctx.change_count();
    }

    /// Click delivered to the interactor.
    ///
    /// Non-primary buttons are ignored. Pointer-driven clicks are also
    /// ignored when the pointer type is disallowed or the open state changed
    /// during the press; keyboard-synthesized clicks (no pointer type)
    /// always toggle.
    pub fn on_click(&mut self, ctx: &mut InteractionsContext<K>, event: &PointerEvent<K>) {
        if !self.props.enabled || event.button != 0 {
            return;
        }
        if let Some(pointer_type) = event.pointer_type {
            if self.press_change_count != ctx.change_count()
                || !self.props.pointer_types.allows(pointer_type)
            {
                return;
            }
        }
        self.toggle(ctx, ActionInfo::click_pointer(event));
    }

    /// Key pressed while the interactor has focus.
    ///
    /// Returns whether the host should suppress the event's default action.
    pub fn on_key_down(
        &mut self,
        ctx: &mut InteractionsContext<K>,
        model: &impl ElementModel<K>,
        event: &KeyEvent,
    ) -> DefaultAction {
        if !self.props.enabled || self.is_native_button(ctx, model) {
            return DefaultAction::Allow;
        }
        match event.key {
            // Keep Space from scrolling the page; the toggle happens on keyup.
            Key::Space => DefaultAction::Prevent,
            Key::Enter => {
                self.toggle(ctx, ActionInfo::click_key(event));
                DefaultAction::Allow
            }
            Key::Other => DefaultAction::Allow,
        }
    }

    /// Key released while the interactor has focus.
    pub fn on_key_up(
        &mut self,
        ctx: &mut InteractionsContext<K>,
        model: &impl ElementModel<K>,
        event: &KeyEvent,
    ) {
        if !self.props.enabled || self.is_native_button(ctx, model) {
            return;
        }
        if event.key == Key::Space {
            self.toggle(ctx, ActionInfo::click_key(event));
        }
    }

    fn is_native_button(
        &self,
        ctx: &InteractionsContext<K>,
        model: &impl ElementModel<K>,
    ) -> bool {
        ctx.interactor()
            .is_some_and(|node| model.is_native_button(node))
    }

    /// Document-wide pointer down, delivered while
    /// [`ClickTrigger::wants_document_pointer_down`] is set.
    pub fn on_document_pointer_down(
        &mut self,
        ctx: &mut InteractionsContext<K>,
        model: &impl ElementModel<K>,
        event: &PointerEvent<K>,
    ) {
        if !self.wants_document_pointer_down(ctx) {
            return;
        }
        // Presses inside the widget never count as outside.
        if ctx.in_containment(model, event.target, true) {
            return;
        }
        let close = match &mut self.props.handle_click_outside {
            OutsideClick::Off => false,
            OutsideClick::Close => true,
            OutsideClick::Filter(predicate) => predicate(event),
        };
        if close {
            ctx.set_open(false, Some(ActionInfo::click_pointer(event)));
        }
    }

    /// Whether the trigger currently needs the document `pointerdown`
    /// listener.
    pub fn wants_document_pointer_down(&self, ctx: &InteractionsContext<K>) -> bool {
        self.props.enabled
            && ctx.open()
            && !matches!(self.props.handle_click_outside, OutsideClick::Off)
    }

    /// The listeners this trigger wants on the interactor.
    pub fn element_props(&self) -> ElementProps<Handler> {
        let mut props = ElementProps::default();
        if !self.props.enabled {
            return props;
        }
        props
            .interactor
            .push_handler("onPointerdown", Handler::ClickPointerDown);
        props.interactor.push_handler("onClick", Handler::Click);
        props
            .interactor
            .push_handler("onKeydown", Handler::ClickKeyDown);
        props.interactor.push_handler("onKeyup", Handler::ClickKeyUp);
        props
    }
}

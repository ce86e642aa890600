// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Interactions`] facade: one context, the three built-in triggers,
//! and the routing between them.
//!
//! ## Overview
//!
//! The facade owns an [`InteractionsContext`] plus a hover, click, and focus
//! trigger, and is the recommended entry point for hosts:
//!
//! - [`Interactions::element_props`] merges the per-trigger bags (hover,
//!   click, focus order) into the one bag per role the host binds to the DOM.
//! - [`Interactions::dispatch`] routes a delivered DOM event to every handler
//!   descriptor merged under its prop key, in contribution order, and reports
//!   whether the default action should be suppressed.
//! - [`Interactions::document_listeners`] reports which document-level
//!   listeners are currently needed, so the host can attach them lazily.
//! - [`Interactions::poll`] / [`Interactions::next_deadline`] drive the hover
//!   trigger's delayed transitions from host time.
//!
//! After every mutation the facade re-evaluates cross-trigger invalidation:
//! when the open value changes for any reason, the hover trigger's pending
//! transition and move-outside tracking are cleared, exactly once, before the
//! next event is processed. This is the eager, acyclic dependency-graph
//! evaluation that replaces the reactive framework of a retained-mode UI.
//!
//! ## Minimal example
//!
//! ```
//! use aperture_interactions::context::ContextOptions;
//! use aperture_interactions::interactions::{Interactions, Role};
//! use aperture_interactions::types::{InteractionEvent, PointerEvent, PointerType};
//!
//! let mut ix: Interactions<u32> = Interactions::new(ContextOptions::default());
//! ix.set_interactor(Some(1));
//!
//! let model = |container: u32, node: u32| container == node;
//! let click = PointerEvent {
//!     pointer_type: Some(PointerType::Mouse),
//!     button: 0,
//!     target: Some(1),
//!     related_target: None,
//!     time: 0,
//! };
//! ix.dispatch(&model, Role::Interactor, "onClick", &InteractionEvent::Pointer(click));
//! assert!(ix.open());
//! ```

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::context::{ContextOptions, InteractionInfos, InteractionsContext};
use crate::props::{ElementProps, PropValue, merge_element_props};
use crate::triggers::Handler;
use crate::triggers::click::{ClickProps, ClickTrigger};
use crate::triggers::focus::{FocusProps, FocusTrigger};
use crate::triggers::hover::{HoverProps, HoverTrigger};
use crate::types::{
    ActionInfo, DefaultAction, DocListeners, ElementModel, FocusEvent, InteractionEvent,
    PointerEvent,
};

/// Which DOM role a dispatched event was delivered to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The interactor node.
    Interactor,
    /// A target node.
    Target,
}

/// Coordinated set of built-in triggers over one interaction context.
#[derive(Debug)]
pub struct Interactions<K> {
    context: InteractionsContext<K>,
    hover: HoverTrigger<K>,
    click: ClickTrigger<K>,
    focus: FocusTrigger,
    seen_change_count: u64,
}

impl<K: Copy + Eq> Interactions<K> {
    /// Create a facade with default trigger configuration.
    pub fn new(options: ContextOptions<K>) -> Self {
        Self {
            context: InteractionsContext::new(options),
            hover: HoverTrigger::new(HoverProps::default()),
            click: ClickTrigger::new(ClickProps::default()),
            focus: FocusTrigger::new(FocusProps::default()),
            seen_change_count: 0,
        }
    }

    /// The shared context.
    pub fn context(&self) -> &InteractionsContext<K> {
        &self.context
    }

    /// Assign (or clear) the interactor element.
    pub fn set_interactor(&mut self, interactor: Option<K>) {
        self.context.set_interactor(interactor);
    }

    /// Replace the target element list.
    pub fn set_targets(&mut self, targets: Vec<K>) {
        self.context.set_targets(targets);
    }

    /// The authoritative open state.
    pub fn open(&self) -> bool {
        self.context.open()
    }

    /// The two most recent accepted state-change records.
    pub fn interaction_infos(&self) -> &InteractionInfos<K> {
        self.context.interaction_infos()
    }

    /// Programmatic state change, subject to the usual arbitration.
    pub fn set_open(&mut self, open: bool, info: Option<ActionInfo<K>>) -> bool {
        let accepted = self.context.set_open(open, info);
        self.sync();
        accepted
    }

    /// Reconfigure the hover trigger.
    pub fn set_hover_props(&mut self, props: HoverProps<K>) {
        self.hover.set_props(props);
    }

    /// Reconfigure the click trigger.
    pub fn set_click_props(&mut self, props: ClickProps<K>) {
        self.click.set_props(props);
    }

    /// Reconfigure the focus trigger.
    pub fn set_focus_props(&mut self, props: FocusProps) {
        self.focus.set_props(props);
    }

    /// The merged element-prop bag for both roles.
    ///
    /// Bags merge in hover, click, focus order; disabled triggers contribute
    /// nothing.
    pub fn element_props(&self) -> ElementProps<Handler> {
        let hover = self.hover.element_props();
        let click = self.click.element_props();
        let focus = self.focus.element_props();
        merge_element_props([Some(&hover), Some(&click), Some(&focus)])
    }

    /// Route a delivered DOM event to every handler merged under `key` for
    /// `role`, in contribution order.
    ///
    /// Returns [`DefaultAction::Prevent`] when any handler asks for the
    /// event's default action to be suppressed. Unknown keys and payload
    /// mismatches are no-ops.
    pub fn dispatch(
        &mut self,
        model: &impl ElementModel<K>,
        role: Role,
        key: &str,
        event: &InteractionEvent<K>,
    ) -> DefaultAction {
        let merged = self.element_props();
        let map = match role {
            Role::Interactor => &merged.interactor,
            Role::Target => &merged.target,
        };
        let handlers: SmallVec<[Handler; 2]> = match map.get(key) {
            Some(PropValue::Handlers(handlers)) => handlers.clone(),
            _ => return DefaultAction::Allow,
        };

        let mut action = DefaultAction::Allow;
        for handler in handlers {
            if self.invoke(model, handler, event) == DefaultAction::Prevent {
                action = DefaultAction::Prevent;
            }
            self.sync();
        }
        action
    }

    fn invoke(
        &mut self,
        model: &impl ElementModel<K>,
        handler: Handler,
        event: &InteractionEvent<K>,
    ) -> DefaultAction {
        match (handler, event) {
            (Handler::HoverPointerEnter, InteractionEvent::Pointer(ev)) => {
                self.hover.on_pointer_enter(&self.context, ev);
            }
            (Handler::HoverPointerLeave, InteractionEvent::Pointer(ev)) => {
                self.hover.on_pointer_leave(&self.context, model, ev);
            }
            (Handler::ClickPointerDown, InteractionEvent::Pointer(ev)) => {
                self.click.on_pointer_down(&self.context, ev);
            }
            (Handler::Click, InteractionEvent::Pointer(ev)) => {
                self.click.on_click(&mut self.context, ev);
            }
            (Handler::ClickKeyDown, InteractionEvent::Key(ev)) => {
                return self.click.on_key_down(&mut self.context, model, ev);
            }
            (Handler::ClickKeyUp, InteractionEvent::Key(ev)) => {
                self.click.on_key_up(&mut self.context, model, ev);
            }
            (Handler::FocusFocus, InteractionEvent::Focus(ev)) => {
                self.focus.on_focus(&mut self.context, ev);
            }
            (Handler::FocusBlur, InteractionEvent::Focus(ev)) => {
                self.focus.on_blur(&mut self.context, model, ev);
            }
            // Payload does not match the handler; nothing to route.
            _ => {}
        }
        DefaultAction::Allow
    }

    /// Document-wide pointer move (deliver while
    /// [`DocListeners::POINTER_MOVE`] is wanted).
    pub fn on_document_pointer_move(&mut self, event: &PointerEvent<K>) {
        self.hover.on_document_pointer_move(&self.context, event);
        self.sync();
    }

    /// Document-wide pointer down (deliver while
    /// [`DocListeners::POINTER_DOWN`] is wanted).
    pub fn on_document_pointer_down(
        &mut self,
        model: &impl ElementModel<K>,
        event: &PointerEvent<K>,
    ) {
        self.click
            .on_document_pointer_down(&mut self.context, model, event);
        self.sync();
    }

    /// Window-level blur (deliver while [`DocListeners::BLUR`] is wanted).
    pub fn on_window_blur(
        &mut self,
        model: &impl ElementModel<K>,
        event: &FocusEvent<K>,
    ) {
        self.focus.on_blur(&mut self.context, model, event);
        self.sync();
    }

    /// Fire any due delayed transition. Returns whether one fired.
    pub fn poll(&mut self, now: u64) -> bool {
        let fired = self.hover.poll(&mut self.context, now);
        if fired {
            self.sync();
        }
        fired
    }

    /// Deadline of the next pending delayed transition, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.hover.next_deadline()
    }

    /// Which document-level listeners are currently needed.
    pub fn document_listeners(&self) -> DocListeners {
        let mut wants = DocListeners::empty();
        if self.hover.wants_document_moves() {
            wants |= DocListeners::POINTER_MOVE;
        }
        if self.click.wants_document_pointer_down(&self.context) {
            wants |= DocListeners::POINTER_DOWN;
        }
        if self.focus.wants_window_blur(&self.context) {
            wants |= DocListeners::BLUR;
        }
        wants
    }

    /// Release all transient trigger state. Idempotent; call at teardown.
    ///
    /// After cleanup the facade wants no hover-related document listeners and
    /// has no pending transitions. The host remains responsible for
    /// detaching whatever it attached for [`Interactions::document_listeners`].
    pub fn cleanup(&mut self) {
        self.hover.cleanup();
    }

    /// Re-evaluate cross-trigger invalidation after a possible state change.
    ///
    /// An open-value change invalidates the hover trigger's pending delay and
    /// move tracking, whichever trigger caused it.
    fn sync(&mut self) {
        let count = self.context.change_count();
        if count != self.seen_change_count {
            self.seen_change_count = count;
            self.hover.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::Delay;
    use crate::types::{InteractionKind, Key, KeyEvent, PointerType};
    use alloc::vec;

    const INTERACTOR: u32 = 1;
    const TARGET: u32 = 10;
    const OUTSIDE: u32 = 99;

    fn identity(container: u32, node: u32) -> bool {
        container == node
    }

    fn facade() -> Interactions<u32> {
        let mut ix = Interactions::new(ContextOptions::default());
        ix.set_interactor(Some(INTERACTOR));
        ix.set_targets(vec![TARGET]);
        ix
    }

    fn pointer(related: Option<u32>, time: u64) -> InteractionEvent<u32> {
        InteractionEvent::Pointer(PointerEvent {
            pointer_type: Some(PointerType::Mouse),
            button: 0,
            target: Some(INTERACTOR),
            related_target: related,
            time,
        })
    }

    #[test]
    fn merged_props_cover_all_three_triggers() {
        let ix = facade();
        let props = ix.element_props();
        for key in [
            "onPointerenter",
            "onPointerleave",
            "onPointerdown",
            "onClick",
            "onKeydown",
            "onKeyup",
            "onFocus",
            "onBlur",
        ] {
            assert!(props.interactor.get(key).is_some(), "missing {key}");
        }
        assert!(props.target.get("tabindex").is_some());
    }

    #[test]
    fn click_dispatch_toggles_open() {
        let mut ix = facade();
        ix.dispatch(&identity, Role::Interactor, "onPointerdown", &pointer(None, 0));
        ix.dispatch(&identity, Role::Interactor, "onClick", &pointer(None, 0));
        assert!(ix.open());
        ix.dispatch(&identity, Role::Interactor, "onPointerdown", &pointer(None, 10));
        ix.dispatch(&identity, Role::Interactor, "onClick", &pointer(None, 10));
        assert!(!ix.open());
    }

    #[test]
    fn hover_delay_scenario_end_to_end() {
        let mut ix = facade();
        ix.set_hover_props(HoverProps {
            delay: Some(Delay::PerDirection {
                open: Some(1_000),
                close: Some(2_000),
            }),
            ..HoverProps::default()
        });

        // Pointer enters at t=0; nothing until the open delay elapses.
        ix.dispatch(&identity, Role::Interactor, "onPointerenter", &pointer(None, 0));
        assert!(!ix.poll(999));
        assert!(!ix.open());
        assert!(ix.poll(1_000));
        assert!(ix.open());
        assert_eq!(
            ix.interaction_infos().current.unwrap().kind,
            InteractionKind::Hover
        );

        // Leave to outside at t=1100 schedules a close for t=3100.
        ix.dispatch(
            &identity,
            Role::Interactor,
            "onPointerleave",
            &pointer(Some(OUTSIDE), 1_100),
        );
        assert_eq!(ix.next_deadline(), Some(3_100));

        // Re-enter before it fires: the close is cancelled and the state
        // stays open throughout.
        ix.dispatch(
            &identity,
            Role::Interactor,
            "onPointerenter",
            &pointer(None, 2_000),
        );
        assert!(!ix.poll(10_000));
        assert!(ix.open());
    }

    #[test]
    fn click_open_cancels_pending_hover_close() {
        let mut ix = facade();
        ix.set_hover_props(HoverProps {
            delay: Some(Delay::Both(500)),
            ..HoverProps::default()
        });

        // Hover opens immediately-ish.
        ix.dispatch(&identity, Role::Interactor, "onPointerenter", &pointer(None, 0));
        ix.poll(500);
        assert!(ix.open());

        // Leave schedules a close; a click closes first.
        ix.dispatch(
            &identity,
            Role::Interactor,
            "onPointerleave",
            &pointer(Some(OUTSIDE), 600),
        );
        assert!(ix.next_deadline().is_some());
        ix.dispatch(&identity, Role::Interactor, "onPointerdown", &pointer(None, 650));
        ix.dispatch(&identity, Role::Interactor, "onClick", &pointer(None, 700));
        assert!(!ix.open());

        // The superseded hover close was invalidated with the state change.
        assert_eq!(ix.next_deadline(), None);
    }

    #[test]
    fn press_guard_crosses_triggers_through_dispatch() {
        let mut ix = facade();
        ix.set_hover_props(HoverProps {
            delay: Some(Delay::Both(0)),
            ..HoverProps::default()
        });

        // Gesture starts while closed.
        ix.dispatch(&identity, Role::Interactor, "onPointerdown", &pointer(None, 0));
        // Hover opens between pointerdown and click.
        ix.dispatch(&identity, Role::Interactor, "onPointerenter", &pointer(None, 1));
        ix.poll(1);
        assert!(ix.open());

        // The click of the same gesture must not toggle back.
        ix.dispatch(&identity, Role::Interactor, "onClick", &pointer(None, 2));
        assert!(ix.open());
    }

    #[test]
    fn document_listener_wants_follow_state() {
        let mut ix = facade();
        ix.set_click_props(ClickProps {
            handle_click_outside: crate::triggers::click::OutsideClick::Close,
            ..ClickProps::default()
        });
        assert_eq!(ix.document_listeners(), DocListeners::empty());

        ix.set_open(true, None);
        assert_eq!(
            ix.document_listeners(),
            DocListeners::POINTER_DOWN | DocListeners::BLUR
        );

        // An outside press closes and drops both wants.
        ix.on_document_pointer_down(
            &identity,
            &PointerEvent {
                pointer_type: Some(PointerType::Mouse),
                button: 0,
                target: Some(OUTSIDE),
                related_target: None,
                time: 0,
            },
        );
        assert!(!ix.open());
        assert_eq!(ix.document_listeners(), DocListeners::empty());
    }

    #[test]
    fn space_keydown_requests_prevent_default() {
        let mut ix = facade();
        let action = ix.dispatch(
            &identity,
            Role::Interactor,
            "onKeydown",
            &InteractionEvent::Key(KeyEvent {
                key: Key::Space,
                time: 0,
            }),
        );
        assert_eq!(action, DefaultAction::Prevent);
        assert!(!ix.open());

        ix.dispatch(
            &identity,
            Role::Interactor,
            "onKeyup",
            &InteractionEvent::Key(KeyEvent {
                key: Key::Space,
                time: 10,
            }),
        );
        assert!(ix.open());
    }

    #[test]
    fn focus_and_window_blur_round_trip() {
        let mut ix = facade();
        ix.dispatch(
            &identity,
            Role::Interactor,
            "onFocus",
            &InteractionEvent::Focus(FocusEvent {
                related_target: None,
                time: 0,
            }),
        );
        assert!(ix.open());
        assert!(ix.document_listeners().contains(DocListeners::BLUR));

        ix.on_window_blur(
            &identity,
            &FocusEvent {
                related_target: Some(OUTSIDE),
                time: 5,
            },
        );
        assert!(!ix.open());
        assert!(!ix.document_listeners().contains(DocListeners::BLUR));
    }

    #[test]
    fn unknown_keys_and_mismatched_payloads_are_no_ops() {
        let mut ix = facade();
        ix.dispatch(&identity, Role::Interactor, "onWheel", &pointer(None, 0));
        // A key event delivered under a pointer-handler key routes nowhere.
        ix.dispatch(
            &identity,
            Role::Interactor,
            "onClick",
            &InteractionEvent::Key(KeyEvent {
                key: Key::Enter,
                time: 0,
            }),
        );
        assert!(!ix.open());
    }

    #[test]
    fn target_role_hover_dispatch_requires_opt_in() {
        let mut ix = facade();

        // Without allow_pointer_enter_target the target role has no hover
        // handlers.
        ix.dispatch(&identity, Role::Target, "onPointerenter", &pointer(None, 0));
        assert!(!ix.poll(10_000));
        assert!(!ix.open());

        ix.set_hover_props(HoverProps {
            allow_pointer_enter_target: true,
            ..HoverProps::default()
        });
        ix.dispatch(&identity, Role::Target, "onPointerenter", &pointer(None, 0));
        assert!(ix.poll(0));
        assert!(ix.open());
    }

    #[test]
    fn facade_is_debug_formattable() {
        let ix = facade();
        let repr = alloc::format!("{ix:?}");
        assert!(repr.contains("Interactions"));
        assert!(repr.contains("open: false"));
    }

    #[test]
    fn cleanup_clears_pending_work() {
        let mut ix = facade();
        ix.set_hover_props(HoverProps {
            delay: Some(Delay::Both(1_000)),
            ..HoverProps::default()
        });
        ix.dispatch(&identity, Role::Interactor, "onPointerenter", &pointer(None, 0));
        assert!(ix.next_deadline().is_some());

        ix.cleanup();
        ix.cleanup();
        assert_eq!(ix.next_deadline(), None);
        assert!(!ix.poll(10_000));
    }
}

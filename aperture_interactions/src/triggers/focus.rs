// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus trigger: open on focus, close on blur-to-outside.
//!
//! Blur containment always includes the targets, regardless of any hover
//! configuration: keyboard focus naturally moves into popup content, and that
//! move must not close the widget. Targets are given `tabindex="-1"` so they
//! are programmatically focusable without joining the primary tab order.
//!
//! The window-level blur listener is wanted only while the widget is open and
//! the trigger enabled ([`FocusTrigger::wants_window_blur`]).

use crate::context::InteractionsContext;
use crate::props::{AttrValue, ElementProps};
use crate::triggers::Handler;
use crate::types::{ActionInfo, ElementModel, FocusEvent};

/// Configuration for a [`FocusTrigger`].
#[derive(Copy, Clone, Debug)]
pub struct FocusProps {
    /// Whether the trigger is active.
    ///
    /// Defaults to `true`.
    pub enabled: bool,
}

impl Default for FocusProps {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Focus/blur containment state machine.
#[derive(Copy, Clone, Debug)]
pub struct FocusTrigger {
    props: FocusProps,
}

impl FocusTrigger {
    /// Create the trigger with the given configuration.
    pub fn new(props: FocusProps) -> Self {
        Self { props }
    }

    /// Current configuration.
    pub fn props(&self) -> &FocusProps {
        &self.props
    }

    /// Replace the configuration.
    pub fn set_props(&mut self, props: FocusProps) {
        self.props = props;
    }

    /// Interactor gained focus.
    pub fn on_focus<K: Copy + Eq>(
        &mut self,
        ctx: &mut InteractionsContext<K>,
        event: &FocusEvent<K>,
    ) {
        if !self.props.enabled {
            return;
        }
        if !ctx.open() {
            ctx.set_open(true, Some(ActionInfo::focus(event)));
        }
    }

    /// Interactor (or window) lost focus.
    pub fn on_blur<K: Copy + Eq>(
        &mut self,
        ctx: &mut InteractionsContext<K>,
        model: &impl ElementModel<K>,
        event: &FocusEvent<K>,
    ) {
        if !self.props.enabled {
            return;
        }
        // Focus moving within the widget (targets included) is not an exit.
        if ctx.in_containment(model, event.related_target, true) {
            return;
        }
        if ctx.open() {
            ctx.set_open(false, Some(ActionInfo::focus(event)));
        }
    }

    /// Whether the trigger currently needs the window `blur` listener.
    pub fn wants_window_blur<K: Copy + Eq>(&self, ctx: &InteractionsContext<K>) -> bool {
        self.props.enabled && ctx.open()
    }

    /// The listeners and attributes this trigger wants.
    pub fn element_props(&self) -> ElementProps<Handler> {
        let mut props = ElementProps::default();
        if !self.props.enabled {
            return props;
        }
        props.interactor.push_handler("onFocus", Handler::FocusFocus);
        props.interactor.push_handler("onBlur", Handler::FocusBlur);
        // Programmatically focusable, outside the primary tab order.
        props.target.set_attr("tabindex", AttrValue::Number(-1));
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextOptions;
    use crate::props::PropValue;
    use crate::types::InteractionKind;
    use alloc::vec;

    const INTERACTOR: u32 = 1;
    const TARGET: u32 = 10;
    const OUTSIDE: u32 = 99;

    fn ctx() -> InteractionsContext<u32> {
        let mut ctx = InteractionsContext::new(ContextOptions::default());
        ctx.set_interactor(Some(INTERACTOR));
        ctx.set_targets(vec![TARGET]);
        ctx
    }

    fn identity(container: u32, node: u32) -> bool {
        container == node
    }

    fn blur_to(related: Option<u32>) -> FocusEvent<u32> {
        FocusEvent {
            related_target: related,
            time: 0,
        }
    }

    #[test]
    fn focus_opens_and_records_provenance() {
        let mut ctx = ctx();
        let mut focus = FocusTrigger::new(FocusProps::default());
        focus.on_focus(&mut ctx, &blur_to(None));
        assert!(ctx.open());
        assert_eq!(
            ctx.interaction_infos().current.unwrap().kind,
            InteractionKind::Focus
        );
    }

    #[test]
    fn blur_to_outside_closes() {
        let mut ctx = ctx();
        let mut focus = FocusTrigger::new(FocusProps::default());
        ctx.set_open(true, None);
        focus.on_blur(&mut ctx, &identity, &blur_to(Some(OUTSIDE)));
        assert!(!ctx.open());
    }

    #[test]
    fn blur_into_target_keeps_open() {
        let mut ctx = ctx();
        let mut focus = FocusTrigger::new(FocusProps::default());
        ctx.set_open(true, None);
        focus.on_blur(&mut ctx, &identity, &blur_to(Some(TARGET)));
        assert!(ctx.open());
        focus.on_blur(&mut ctx, &identity, &blur_to(Some(INTERACTOR)));
        assert!(ctx.open());
    }

    #[test]
    fn blur_with_no_related_target_closes() {
        let mut ctx = ctx();
        let mut focus = FocusTrigger::new(FocusProps::default());
        ctx.set_open(true, None);
        focus.on_blur(&mut ctx, &identity, &blur_to(None));
        assert!(!ctx.open());
    }

    #[test]
    fn window_blur_listener_wanted_only_while_open_and_enabled() {
        let mut ctx = ctx();
        let focus = FocusTrigger::new(FocusProps::default());
        assert!(!focus.wants_window_blur(&ctx));
        ctx.set_open(true, None);
        assert!(focus.wants_window_blur(&ctx));

        let disabled = FocusTrigger::new(FocusProps { enabled: false });
        assert!(!disabled.wants_window_blur(&ctx));
    }

    #[test]
    fn targets_get_a_negative_tab_index() {
        let focus = FocusTrigger::new(FocusProps::default());
        let props = focus.element_props();
        assert_eq!(
            props.target.get("tabindex"),
            Some(&PropValue::Attr(AttrValue::Number(-1)))
        );
        assert!(props.interactor.get("onFocus").is_some());
        assert!(props.interactor.get("onBlur").is_some());
    }

    #[test]
    fn disabled_trigger_is_inert() {
        let mut ctx = ctx();
        let mut focus = FocusTrigger::new(FocusProps { enabled: false });
        focus.on_focus(&mut ctx, &blur_to(None));
        assert!(!ctx.open());
        assert!(focus.element_props().is_empty());

        ctx.set_open(true, None);
        focus.on_blur(&mut ctx, &identity, &blur_to(Some(OUTSIDE)));
        assert!(ctx.open());
    }
}

// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in trigger strategies: hover, click, and focus.
//!
//! Each trigger is an independent state machine that reads the shared
//! [`crate::context::InteractionsContext`], requests transitions through
//! `set_open` (directly, or via the delay controller), and emits an
//! element-prop bag describing the listeners and attributes it wants on the
//! interactor and target nodes. Triggers are individually enabled and
//! configured; a disabled trigger emits an empty bag, attaches nothing, and
//! never requests a transition.

pub mod click;
pub mod focus;
pub mod hover;

/// Handler descriptor emitted by the built-in triggers.
///
/// Props bags carry these instead of closures; the host (typically the
/// [`crate::interactions::Interactions`] facade) maps a dispatched DOM event
/// back to the trigger method the descriptor names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Hover: pointer entered the interactor or a target.
    HoverPointerEnter,
    /// Hover: pointer left the interactor or a target.
    HoverPointerLeave,
    /// Click: pointer pressed on the interactor.
    ClickPointerDown,
    /// Click: click delivered to the interactor.
    Click,
    /// Click: key pressed while the interactor has focus.
    ClickKeyDown,
    /// Click: key released while the interactor has focus.
    ClickKeyUp,
    /// Focus: interactor gained focus.
    FocusFocus,
    /// Focus: interactor (or window) lost focus.
    FocusBlur,
}

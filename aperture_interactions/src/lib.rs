// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=aperture_interactions --heading-base-level=0

//! Aperture Interactions: a headless, `no_std` engine for open/closed UI widgets.
//!
//! ## Overview
//!
//! This crate coordinates the interactions that open and close a floating
//! widget — a tooltip, dropdown, or popover — without touching the DOM. A
//! widget is an *interactor* element (the trigger) plus zero or more *target*
//! elements (the popup content), both identified by an opaque host key `K`.
//! The crate decides *when* the widget should be open; the host decides what
//! that means visually.
//!
//! ## Architecture
//!
//! - [`context::InteractionsContext`] holds the authoritative open/closed
//!   value, the element roster, and the change-arbitration policy. Every
//!   state change flows through [`set_open`](context::InteractionsContext::set_open)
//!   and is stamped with provenance ([`types::InteractionKind`] plus the
//!   originating event).
//! - [`delay::DelayController`] defers transitions by per-direction
//!   millisecond delays. It never owns a timer: hosts poll it with their own
//!   clock ([`poll`](delay::DelayController::poll)) or schedule a wakeup from
//!   [`deadline`](delay::DelayController::deadline).
//! - [`triggers`] contains the built-in strategies: hover (enter/leave
//!   containment with delays), click (toggle with a cross-modality press
//!   guard and outside-click detection), and focus (open on focus, close on
//!   blur-to-outside).
//! - [`props`] is the element-prop layer: each trigger emits a bag of
//!   listener descriptors and attributes per role, and bags merge with
//!   handler concatenation so one DOM listener per event name serves every
//!   trigger.
//! - [`interactions::Interactions`] bundles all of the above: one context,
//!   the three triggers, merged props, event dispatch, and document-listener
//!   wants.
//!
//! ## Host model
//!
//! Events arrive as plain data ([`types::InteractionEvent`]) carrying a host
//! timestamp in milliseconds. DOM topology questions go through the
//! [`types::ElementModel`] capability trait, so containment ("is this node
//! inside the interactor?") is answered by the host, not by this crate.
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
//! // The host answers containment; here nodes only contain themselves.
//! let model = |container: u32, node: u32| container == node;
//!
//! let enter = PointerEvent {
//!     pointer_type: Some(PointerType::Mouse),
//!     button: 0,
//!     target: Some(1),
//!     related_target: None,
//!     time: 0,
//! };
//! ix.dispatch(&model, Role::Interactor, "onPointerenter", &InteractionEvent::Pointer(enter));
//! ix.poll(0);
//! assert!(ix.open());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod context;
pub mod delay;
pub mod interactions;
pub mod props;
pub mod triggers;
pub mod types;

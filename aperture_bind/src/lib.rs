// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=aperture_bind --heading-base-level=0

//! Aperture Bind: the DOM-side binding layer for Aperture Interactions.
//!
//! ## Overview
//!
//! [`aperture_interactions`] decides *what* should be attached to which
//! element — prop bags of handler descriptors and attributes, plus a set of
//! wanted document-level listeners. This crate turns those decisions into
//! balanced attach/detach calls against a host DOM:
//!
//! - [`parse`] splits handler prop keys (`"onPointerenterCapture"`) into DOM
//!   event names and [`parse::ListenerOptions`].
//! - [`bind`] reconciles prop bags onto nodes through the
//!   [`bind::DomBackend`] capability trait: [`bind::PropsBinding`] for the
//!   interactor, [`bind::TargetsBinding`] for the target list. Rebinding the
//!   same (node, bag) pair is a no-op; any change removes the old state
//!   before applying the new.
//! - [`doc`] reference-counts shared document listeners across widget
//!   instances: [`doc::DocListenerRegistry`] attaches on the 0→1 edge and
//!   detaches on 1→0, driven per widget by [`doc::DocBinding::sync`].
//!
//! ## Minimal example
//!
//! ```
//! use aperture_bind::parse::{parse_handler_key, ListenerOptions};
//!
//! let (event, options) = parse_handler_key("onPointerenterCapture").unwrap();
//! assert_eq!(event, "pointerenter");
//! assert_eq!(options, ListenerOptions::CAPTURE);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bind;
pub mod doc;
pub mod parse;

// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prop-bag reconciliation against a host DOM.
//!
//! ## Overview
//!
//! [`PropsBinding`] tracks what one node currently has attached and
//! reconciles it against a desired [`PropMap`]: on any change to the node or
//! the bag, everything previously attached is removed before the new bag is
//! applied, and binding an identical (node, bag) pair is a no-op. Applying
//! twice therefore nets the same DOM state as applying once.
//!
//! [`TargetsBinding`] spreads one bag across an ordered node list, growing
//! and shrinking per-node bindings as the list changes.
//!
//! All DOM mutation goes through the [`DomBackend`] capability trait; this
//! crate never touches a real document.

use alloc::vec::Vec;

use aperture_interactions::props::{AttrValue, PropMap, PropValue};

use crate::parse::{ListenerOptions, parse_handler_key};

/// Host-side DOM mutation capability.
///
/// `K` is the host's node key; `H` the handler descriptor carried in prop
/// bags. The binder guarantees removals mirror prior additions exactly (same
/// node, event, handler, and options), so backends may treat the pairs as
/// balanced.
pub trait DomBackend<K, H> {
    /// Attach `handler` for `event` on `node`.
    fn add_listener(&mut self, node: K, event: &str, handler: &H, options: ListenerOptions);
    /// Detach a previously added listener.
    fn remove_listener(&mut self, node: K, event: &str, handler: &H, options: ListenerOptions);
    /// Set attribute `name` on `node`.
    fn set_attribute(&mut self, node: K, name: &str, value: &AttrValue);
    /// Remove attribute `name` from `node`.
    fn remove_attribute(&mut self, node: K, name: &str);
}

/// Reconciled binding of one prop bag onto one (optional) node.
#[derive(Clone, Debug, Default)]
pub struct PropsBinding<K, H> {
    bound: Option<(K, PropMap<H>)>,
}

impl<K: Copy + Eq, H: Clone + PartialEq> PropsBinding<K, H> {
    /// An empty binding.
    pub fn new() -> Self {
        Self { bound: None }
    }

    /// The node currently bound, if any.
    pub fn node(&self) -> Option<K> {
        self.bound.as_ref().map(|(node, _)| *node)
    }

    /// Reconcile the binding against the desired (node, bag) pair.
    ///
    /// A missing node binds nothing and is not an error; the next apply with
    /// a live node attaches everything. Identical input is a no-op.
    pub fn apply(
        &mut self,
        backend: &mut impl DomBackend<K, H>,
        node: Option<K>,
        props: &PropMap<H>,
    ) {
        if let Some((bound_node, bound_props)) = &self.bound
            && node == Some(*bound_node)
            && props == bound_props
        {
            return;
        }
        self.clear(backend);
        let Some(node) = node else {
            return;
        };
        if props.is_empty() {
            return;
        }
        for (key, value) in props.iter() {
            Self::bind_entry(backend, node, key, value);
        }
        self.bound = Some((node, props.clone()));
    }

    /// Detach everything currently bound. Idempotent.
    pub fn clear(&mut self, backend: &mut impl DomBackend<K, H>) {
        let Some((node, props)) = self.bound.take() else {
            return;
        };
        for (key, value) in props.iter() {
            Self::unbind_entry(backend, node, key, value);
        }
    }

    fn bind_entry(backend: &mut impl DomBackend<K, H>, node: K, key: &str, value: &PropValue<H>) {
        match (parse_handler_key(key), value) {
            (Some((event, options)), PropValue::Handlers(handlers)) => {
                for handler in handlers {
                    backend.add_listener(node, &event, handler, options);
                }
            }
            (_, PropValue::Attr(value)) => backend.set_attribute(node, key, value),
            // A handler list under a non-handler key has no event to bind to.
            (None, PropValue::Handlers(_)) => {}
        }
    }

    fn unbind_entry(backend: &mut impl DomBackend<K, H>, node: K, key: &str, value: &PropValue<H>) {
        match (parse_handler_key(key), value) {
            (Some((event, options)), PropValue::Handlers(handlers)) => {
                for handler in handlers {
                    backend.remove_listener(node, &event, handler, options);
                }
            }
            (_, PropValue::Attr(_)) => backend.remove_attribute(node, key),
            (None, PropValue::Handlers(_)) => {}
        }
    }
}

/// One prop bag reconciled across an ordered node list.
#[derive(Clone, Debug, Default)]
pub struct TargetsBinding<K, H> {
    bindings: Vec<PropsBinding<K, H>>,
}

impl<K: Copy + Eq, H: Clone + PartialEq> TargetsBinding<K, H> {
    /// An empty binding set.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Number of nodes currently tracked.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no nodes are tracked.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Reconcile `props` onto every node in `nodes`.
    ///
    /// Nodes that left the list are unbound; nodes that joined are bound;
    /// unchanged (node, bag) pairs are untouched.
    pub fn apply(
        &mut self,
        backend: &mut impl DomBackend<K, H>,
        nodes: &[K],
        props: &PropMap<H>,
    ) {
        while self.bindings.len() > nodes.len() {
            if let Some(mut binding) = self.bindings.pop() {
                binding.clear(backend);
            }
        }
        while self.bindings.len() < nodes.len() {
            self.bindings.push(PropsBinding::new());
        }
        for (binding, &node) in self.bindings.iter_mut().zip(nodes) {
            binding.apply(backend, Some(node), props);
        }
    }

    /// Detach everything from every node. Idempotent.
    pub fn clear(&mut self, backend: &mut impl DomBackend<K, H>) {
        for binding in &mut self.bindings {
            binding.clear(backend);
        }
        self.bindings.clear();
    }
}

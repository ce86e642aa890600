// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element-prop bags and the merge semantics that combine them.
//!
//! ## Overview
//!
//! Each trigger emits an [`ElementProps`] bag: for the interactor role and
//! the target role, a mapping from prop key (`"onPointerenter"`,
//! `"tabindex"`, …) to either a list of handler descriptors or an attribute
//! value. Handlers are descriptors rather than closures; the host (or the
//! [`crate::interactions::Interactions`] facade) routes a dispatched DOM
//! event to the trigger method each descriptor names.
//!
//! [`merge_element_props`] folds an ordered sequence of bags into one bag per
//! role. When two bags contribute handlers under the same key, the lists are
//! concatenated so *all* handlers fire, in contribution order; attribute keys
//! are last-write-wins.
//!
//! ## Minimal example
//!
//! ```
//! use aperture_interactions::props::{merge_element_props, AttrValue, ElementProps, PropValue};
//!
//! let mut a: ElementProps<u8> = ElementProps::default();
//! a.interactor.push_handler("onClick", 1);
//! let mut b: ElementProps<u8> = ElementProps::default();
//! b.interactor.push_handler("onClick", 2);
//! b.target.set_attr("tabindex", AttrValue::Number(-1));
//!
//! let merged = merge_element_props([Some(&a), None, Some(&b)]);
//! match merged.interactor.get("onClick").unwrap() {
//!     PropValue::Handlers(handlers) => assert_eq!(handlers.as_slice(), &[1, 2]),
//!     PropValue::Attr(_) => unreachable!(),
//! }
//! ```

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use smallvec::{SmallVec, smallvec};

/// Prop key; `on*` keys denote event handlers, everything else attributes.
pub type PropKey = Cow<'static, str>;

/// An attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// Numeric attribute, serialized in decimal.
    Number(i64),
    /// Text attribute.
    Text(Cow<'static, str>),
}

/// Value bound under a prop key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropValue<H> {
    /// Event handlers, invoked in order on the real event.
    Handlers(SmallVec<[H; 2]>),
    /// A plain attribute.
    Attr(AttrValue),
}

/// Ordered prop map for one DOM role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropMap<H> {
    entries: BTreeMap<PropKey, PropValue<H>>,
}

impl<H> Default for PropMap<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<H: Clone + PartialEq> PropMap<H> {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the value bound under `key`.
    pub fn get(&self, key: &str) -> Option<&PropValue<H>> {
        self.entries.get(key)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<H>)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Append a handler under `key`, creating the list if needed.
    ///
    /// A non-handler value previously bound under the key is replaced.
    pub fn push_handler(&mut self, key: impl Into<PropKey>, handler: H) {
        match self.entries.entry(key.into()) {
            alloc::collections::btree_map::Entry::Occupied(mut entry) => match entry.get_mut() {
                PropValue::Handlers(handlers) => handlers.push(handler),
                value @ PropValue::Attr(_) => *value = PropValue::Handlers(smallvec![handler]),
            },
            alloc::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(PropValue::Handlers(smallvec![handler]));
            }
        }
    }

    /// Bind an attribute under `key`, replacing any previous value.
    pub fn set_attr(&mut self, key: impl Into<PropKey>, value: AttrValue) {
        self.entries.insert(key.into(), PropValue::Attr(value));
    }

    /// Merge another map into this one.
    ///
    /// Handler lists under the same key concatenate (this map's handlers
    /// first); any other collision is won by `other`.
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            match (self.entries.get_mut(key), value) {
                (Some(PropValue::Handlers(existing)), PropValue::Handlers(incoming)) => {
                    existing.extend(incoming.iter().cloned());
                }
                (_, value) => {
                    self.entries.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Per-role prop bags emitted by one trigger (or merged from several).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementProps<H> {
    /// Props for the interactor node.
    pub interactor: PropMap<H>,
    /// Props for each target node.
    pub target: PropMap<H>,
}

impl<H> Default for ElementProps<H> {
    fn default() -> Self {
        Self {
            interactor: PropMap::default(),
            target: PropMap::default(),
        }
    }
}

impl<H: Clone + PartialEq> ElementProps<H> {
    /// Whether both roles are empty.
    pub fn is_empty(&self) -> bool {
        self.interactor.is_empty() && self.target.is_empty()
    }

    /// Merge another bag into this one, role by role.
    pub fn merge_from(&mut self, other: &Self) {
        self.interactor.merge_from(&other.interactor);
        self.target.merge_from(&other.target);
    }
}

/// Fold an ordered sequence of bags into one merged bag.
///
/// `None` entries (disabled triggers) contribute nothing. Handler lists under
/// the same key concatenate in encounter order; attributes are last-write-wins.
pub fn merge_element_props<'a, H>(
    bags: impl IntoIterator<Item = Option<&'a ElementProps<H>>>,
) -> ElementProps<H>
where
    H: Clone + PartialEq + 'a,
{
    let mut merged = ElementProps::default();
    for bag in bags.into_iter().flatten() {
        merged.merge_from(bag);
    }
    merged
}

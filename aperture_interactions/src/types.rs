// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared identifier, event, and host-model types.
//!
//! The coordination core never touches a real DOM. Elements are opaque keys
//! (`K: Copy + Eq`), low-level events are small owned snapshots carrying a
//! host-supplied millisecond timestamp, and host capabilities such as
//! containment checks are expressed through the [`ElementModel`] trait.

use bitflags::bitflags;

/// Mouse button identifier, following the DOM convention: `0` is the primary
/// button.
pub type Button = u8;

/// The kind of pointer that produced a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse (or mouse-like) device.
    Mouse,
    /// A touch contact.
    Touch,
    /// A stylus.
    Pen,
    /// Any pointer type the host could not classify.
    ///
    /// `Other` never matches a [`PointerTypes`] allow-list, so triggers ignore
    /// these events rather than failing on them.
    Other,
}

bitflags! {
    /// Allow-list of pointer types a trigger responds to.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct PointerTypes: u8 {
        /// Mouse pointers.
        const MOUSE = 1;
        /// Touch contacts.
        const TOUCH = 1 << 1;
        /// Stylus pointers.
        const PEN = 1 << 2;
    }
}

impl PointerTypes {
    /// Whether the given pointer type is in this allow-list.
    pub fn allows(self, pointer_type: PointerType) -> bool {
        match pointer_type {
            PointerType::Mouse => self.contains(Self::MOUSE),
            PointerType::Touch => self.contains(Self::TOUCH),
            PointerType::Pen => self.contains(Self::PEN),
            PointerType::Other => false,
        }
    }
}

impl Default for PointerTypes {
    /// All classified pointer types: mouse, touch, and pen.
    fn default() -> Self {
        Self::all()
    }
}

bitflags! {
    /// Document-level listeners an interaction set currently needs.
    ///
    /// These are lazily attached and detached by the host (see the binding
    /// crate's document listener registry) so that idle widget instances do
    /// not accumulate global listeners.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DocListeners: u8 {
        /// Document-wide `pointermove`, used by the hover trigger while a
        /// custom close predicate is being evaluated.
        const POINTER_MOVE = 1;
        /// Document-wide `pointerdown`, used by the click trigger for
        /// outside-click detection.
        const POINTER_DOWN = 1 << 1;
        /// Window-level `blur`, used by the focus trigger while open.
        const BLUR = 1 << 2;
    }
}

/// Keyboard keys the click trigger reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Enter key.
    Enter,
    /// The Space key.
    Space,
    /// Any other key; ignored by the built-in triggers.
    Other,
}

/// Whether the host should run the event's default action.
///
/// Returned by handlers that may need to suppress a browser default, such as
/// Space-key scrolling during keyboard activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefaultAction {
    /// Let the default action run.
    Allow,
    /// Suppress the default action (`preventDefault`).
    Prevent,
}

/// Snapshot of a pointer event (`pointerenter`, `pointerleave`,
/// `pointerdown`, `click`).
///
/// `target` and `related_target` are host element keys; either may be absent
/// (for example, `relatedTarget` is null when the pointer leaves the window).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerEvent<K> {
    /// Pointer classification, or `None` for synthesized clicks (for example,
    /// the click a browser emits for keyboard activation of a native button).
    pub pointer_type: Option<PointerType>,
    /// Button involved, DOM-style (`0` = primary).
    pub button: Button,
    /// The element the event was delivered to.
    pub target: Option<K>,
    /// The element the pointer came from or moved to, where applicable.
    pub related_target: Option<K>,
    /// Host timestamp in milliseconds.
    pub time: u64,
}

/// Snapshot of a keyboard event (`keydown`, `keyup`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key involved.
    pub key: Key,
    /// Host timestamp in milliseconds.
    pub time: u64,
}

/// Snapshot of a focus event (`focus`, `blur`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusEvent<K> {
    /// The element gaining focus on blur, or losing it on focus, if any.
    pub related_target: Option<K>,
    /// Host timestamp in milliseconds.
    pub time: u64,
}

/// Any low-level event routed through the interaction set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent<K> {
    /// A pointer event.
    Pointer(PointerEvent<K>),
    /// A keyboard event.
    Key(KeyEvent),
    /// A focus event.
    Focus(FocusEvent<K>),
}

/// Symbol-like identifier for host-defined interaction kinds.
///
/// The host is responsible for the meaning and lifecycle of individual
/// symbols (for example via static constants or an interned table).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InteractionSymbol(pub u64);

/// Tag identifying which trigger (or host extension) requested a state
/// change.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// No kind was supplied with the request.
    ///
    /// The context stamps this on any accepted change whose info omitted a
    /// kind, so consumers always observe a concrete tag.
    #[default]
    Unknown,
    /// The hover trigger.
    Hover,
    /// The click trigger.
    Click,
    /// The focus trigger.
    Focus,
    /// A host-defined trigger.
    Custom(InteractionSymbol),
}

/// Provenance attached to a `set_open` request: which trigger asked, and the
/// originating low-level event if there was one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionInfo<K> {
    /// The requesting trigger kind.
    pub kind: InteractionKind,
    /// The low-level event that motivated the request, if any.
    pub event: Option<InteractionEvent<K>>,
}

// Manual impl: a derived one would demand `K: Default` even though no bare
// `K` is held.
impl<K> Default for ActionInfo<K> {
    fn default() -> Self {
        Self {
            kind: InteractionKind::Unknown,
            event: None,
        }
    }
}

impl<K: Copy> ActionInfo<K> {
    /// Info with the given kind and no originating event.
    pub fn new(kind: InteractionKind) -> Self {
        Self { kind, event: None }
    }

    /// Hover-tagged info carrying the pointer event.
    pub fn hover(event: &PointerEvent<K>) -> Self {
        Self {
            kind: InteractionKind::Hover,
            event: Some(InteractionEvent::Pointer(*event)),
        }
    }

    /// Click-tagged info carrying the pointer event.
    pub fn click_pointer(event: &PointerEvent<K>) -> Self {
        Self {
            kind: InteractionKind::Click,
            event: Some(InteractionEvent::Pointer(*event)),
        }
    }

    /// Click-tagged info carrying the keyboard event.
    pub fn click_key(event: &KeyEvent) -> Self {
        Self {
            kind: InteractionKind::Click,
            event: Some(InteractionEvent::Key(*event)),
        }
    }

    /// Focus-tagged info carrying the focus event.
    pub fn focus(event: &FocusEvent<K>) -> Self {
        Self {
            kind: InteractionKind::Focus,
            event: Some(InteractionEvent::Focus(*event)),
        }
    }
}

/// Host view of the element tree.
///
/// The core only ever asks two questions of the host: whether one element
/// contains another (DOM `Node.contains`, where every element contains
/// itself), and whether an element is a native button (which already has
/// default keyboard activation semantics).
pub trait ElementModel<K> {
    /// Whether `node` is `container` or a descendant of it.
    fn contains(&self, container: K, node: K) -> bool;

    /// Whether the element is a native `<button>`.
    fn is_native_button(&self, node: K) -> bool {
        let _ = node;
        false
    }
}

impl<K, F> ElementModel<K> for F
where
    F: Fn(K, K) -> bool,
{
    fn contains(&self, container: K, node: K) -> bool {
        self(container, node)
    }
}

// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared document-level listeners, reference-counted across widgets.
//!
//! Several widget instances may want the same document listener at once (two
//! open popovers both watching for outside presses). The
//! [`DocListenerRegistry`] counts those wants per event and asks the host to
//! attach on the 0→1 edge and detach on the 1→0 edge, so the document carries
//! at most one listener per event regardless of widget count.
//!
//! Each widget owns a [`DocBinding`] that diffs its current wants (an
//! [`Interactions::document_listeners`] snapshot) against what it last
//! registered.
//!
//! [`Interactions::document_listeners`]:
//!     aperture_interactions::interactions::Interactions::document_listeners

use aperture_interactions::types::DocListeners;

/// A document-level event the engine may need to observe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocEvent {
    /// Document-wide `pointermove`.
    PointerMove,
    /// Document-wide `pointerdown`.
    PointerDown,
    /// Window-level `blur`.
    Blur,
}

impl DocEvent {
    /// All document events, in flag order.
    pub const ALL: [Self; 3] = [Self::PointerMove, Self::PointerDown, Self::Blur];

    /// The want-flag corresponding to this event.
    pub fn flag(self) -> DocListeners {
        match self {
            Self::PointerMove => DocListeners::POINTER_MOVE,
            Self::PointerDown => DocListeners::POINTER_DOWN,
            Self::Blur => DocListeners::BLUR,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::PointerMove => 0,
            Self::PointerDown => 1,
            Self::Blur => 2,
        }
    }
}

/// Host capability for attaching document/window listeners.
pub trait DocumentHost {
    /// Attach the shared listener for `event`.
    fn attach(&mut self, event: DocEvent);
    /// Detach the shared listener for `event`.
    fn detach(&mut self, event: DocEvent);
}

/// Per-document reference counts for shared listeners.
#[derive(Clone, Debug, Default)]
pub struct DocListenerRegistry {
    counts: [u32; 3],
}

impl DocListenerRegistry {
    /// A registry with no listeners attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one want for `event`, attaching on the 0→1 edge.
    pub fn ensure(&mut self, host: &mut impl DocumentHost, event: DocEvent) {
        let count = &mut self.counts[event.index()];
        *count += 1;
        if *count == 1 {
            host.attach(event);
        }
    }

    /// Drop one want for `event`, detaching on the 1→0 edge.
    ///
    /// Releasing an event with no outstanding wants is a no-op.
    pub fn release(&mut self, host: &mut impl DocumentHost, event: DocEvent) {
        let count = &mut self.counts[event.index()];
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            host.detach(event);
        }
    }

    /// Whether the shared listener for `event` is currently attached.
    pub fn is_attached(&self, event: DocEvent) -> bool {
        self.counts[event.index()] > 0
    }
}

/// One widget's registered document-listener wants.
#[derive(Copy, Clone, Debug, Default)]
pub struct DocBinding {
    current: DocListeners,
}

impl DocBinding {
    /// A binding with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The wants currently registered with the registry.
    pub fn current(&self) -> DocListeners {
        self.current
    }

    /// Diff `wants` against the registered set, ensuring newly wanted events
    /// and releasing no-longer-wanted ones.
    pub fn sync(
        &mut self,
        registry: &mut DocListenerRegistry,
        host: &mut impl DocumentHost,
        wants: DocListeners,
    ) {
        for event in DocEvent::ALL {
            let flag = event.flag();
            let wanted = wants.contains(flag);
            let registered = self.current.contains(flag);
            if wanted && !registered {
                registry.ensure(host, event);
            } else if !wanted && registered {
                registry.release(host, event);
            }
        }
        self.current = wants;
    }

    /// Release everything this binding registered. Idempotent.
    pub fn clear(&mut self, registry: &mut DocListenerRegistry, host: &mut impl DocumentHost) {
        self.sync(registry, host, DocListeners::empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Host {
        attached: Vec<DocEvent>,
        detached: Vec<DocEvent>,
    }

    impl DocumentHost for Host {
        fn attach(&mut self, event: DocEvent) {
            self.attached.push(event);
        }

        fn detach(&mut self, event: DocEvent) {
            self.detached.push(event);
        }
    }

    #[test]
    fn registry_attaches_on_first_want_only() {
        let mut host = Host::default();
        let mut registry = DocListenerRegistry::new();

        registry.ensure(&mut host, DocEvent::PointerDown);
        registry.ensure(&mut host, DocEvent::PointerDown);
        assert_eq!(host.attached, [DocEvent::PointerDown]);
        assert!(registry.is_attached(DocEvent::PointerDown));
    }

    #[test]
    fn registry_detaches_on_last_release_only() {
        let mut host = Host::default();
        let mut registry = DocListenerRegistry::new();

        registry.ensure(&mut host, DocEvent::Blur);
        registry.ensure(&mut host, DocEvent::Blur);
        registry.release(&mut host, DocEvent::Blur);
        assert!(host.detached.is_empty());
        registry.release(&mut host, DocEvent::Blur);
        assert_eq!(host.detached, [DocEvent::Blur]);
        assert!(!registry.is_attached(DocEvent::Blur));
    }

    #[test]
    fn releasing_without_a_want_is_a_no_op() {
        let mut host = Host::default();
        let mut registry = DocListenerRegistry::new();
        registry.release(&mut host, DocEvent::PointerMove);
        assert!(host.detached.is_empty());
    }

    #[test]
    fn binding_syncs_diffs_only() {
        let mut host = Host::default();
        let mut registry = DocListenerRegistry::new();
        let mut binding = DocBinding::new();

        binding.sync(
            &mut registry,
            &mut host,
            DocListeners::POINTER_DOWN | DocListeners::BLUR,
        );
        assert_eq!(host.attached, [DocEvent::PointerDown, DocEvent::Blur]);

        // Re-syncing the same wants touches nothing.
        binding.sync(
            &mut registry,
            &mut host,
            DocListeners::POINTER_DOWN | DocListeners::BLUR,
        );
        assert_eq!(host.attached.len(), 2);
        assert!(host.detached.is_empty());

        binding.sync(&mut registry, &mut host, DocListeners::BLUR);
        assert_eq!(host.detached, [DocEvent::PointerDown]);
    }

    #[test]
    fn two_bindings_share_one_document_listener() {
        let mut host = Host::default();
        let mut registry = DocListenerRegistry::new();
        let mut a = DocBinding::new();
        let mut b = DocBinding::new();

        a.sync(&mut registry, &mut host, DocListeners::POINTER_DOWN);
        b.sync(&mut registry, &mut host, DocListeners::POINTER_DOWN);
        assert_eq!(host.attached, [DocEvent::PointerDown]);

        a.clear(&mut registry, &mut host);
        assert!(host.detached.is_empty());
        b.clear(&mut registry, &mut host);
        assert_eq!(host.detached, [DocEvent::PointerDown]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut host = Host::default();
        let mut registry = DocListenerRegistry::new();
        let mut binding = DocBinding::new();

        binding.sync(&mut registry, &mut host, DocListeners::POINTER_MOVE);
        binding.clear(&mut registry, &mut host);
        binding.clear(&mut registry, &mut host);
        assert_eq!(host.detached, [DocEvent::PointerMove]);
        assert_eq!(binding.current(), DocListeners::empty());
    }
}

//! Process-wide accessible-interface registry.
//!
//! The host platform addresses nodes by identity, so every adapter the view
//! hands out is registered here and must be unregistered when its backing
//! row or widget goes away. The registry is an explicit service with
//! register/unregister operations; it is initialized lazily when the first
//! adapter is registered.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use slotmap::SlotMap;
use thiserror::Error;

use super::node::AccessibleNode;

slotmap::new_key_type! {
    /// Identity of a registered accessible interface.
    pub struct AdapterId;
}

/// Errors from registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The ID was never registered, or was already unregistered.
    #[error("no accessible interface registered under {0:?}")]
    UnknownAdapter(AdapterId),
}

/// Registry of live accessible interfaces.
///
/// Holds a strong reference to each registered node, mirroring the platform
/// contract that a handed-out node stays addressable until explicitly
/// released.
pub struct InterfaceRegistry {
    adapters: RwLock<SlotMap<AdapterId, Arc<dyn AccessibleNode>>>,
}

impl InterfaceRegistry {
    fn new() -> Self {
        Self {
            adapters: RwLock::new(SlotMap::with_key()),
        }
    }

    /// Registers a node and returns its identity.
    pub fn register(&self, node: Arc<dyn AccessibleNode>) -> AdapterId {
        let id = self.adapters.write().insert(node);
        tracing::debug!(target: "pieview::accessibility", ?id, "registered accessible interface");
        id
    }

    /// Removes a node from the registry.
    pub fn unregister(&self, id: AdapterId) -> Result<(), RegistryError> {
        let removed = self.adapters.write().remove(id);
        match removed {
            Some(_) => {
                tracing::debug!(
                    target: "pieview::accessibility",
                    ?id,
                    remaining = self.len(),
                    "unregistered accessible interface"
                );
                Ok(())
            }
            None => Err(RegistryError::UnknownAdapter(id)),
        }
    }

    /// Looks up a registered node by identity.
    pub fn get(&self, id: AdapterId) -> Option<Arc<dyn AccessibleNode>> {
        self.adapters.read().get(id).cloned()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    /// Whether no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }
}

/// The process-wide registry, initialized on first use.
pub fn registry() -> &'static InterfaceRegistry {
    static REGISTRY: OnceLock<InterfaceRegistry> = OnceLock::new();
    REGISTRY.get_or_init(InterfaceRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::role::AccessibleRole;
    use crate::accessibility::state::AccessibleState;
    use crate::accessibility::TextKind;
    use crate::geometry::Rect;
    use std::any::Any;

    struct DummyNode;

    impl AccessibleNode for DummyNode {
        fn rect(&self) -> Rect {
            Rect::ZERO
        }
        fn role(&self) -> AccessibleRole {
            AccessibleRole::Unknown
        }
        fn state(&self) -> AccessibleState {
            AccessibleState::default()
        }
        fn text(&self, _kind: TextKind) -> String {
            String::new()
        }
        fn set_text(&self, _kind: TextKind, _text: &str) {}
        fn is_valid(&self) -> bool {
            true
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_register_get_unregister() {
        // A fresh instance rather than the process-wide one, so tests
        // running in parallel cannot observe each other's registrations.
        let registry = InterfaceRegistry::new();

        let id = registry.register(Arc::new(DummyNode));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(id).is_some());

        assert_eq!(registry.unregister(id), Ok(()));
        assert!(registry.is_empty());
        assert!(registry.get(id).is_none());
        assert_eq!(registry.unregister(id), Err(RegistryError::UnknownAdapter(id)));
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = registry();
        let b = registry();
        assert!(std::ptr::eq(a, b));
    }
}

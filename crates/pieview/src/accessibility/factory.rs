//! Entry point producing the accessible root adapter for a widget.

use std::any::Any;
use std::sync::{Arc, Weak};

use crate::view::PieView;

use super::item_adapter::PieItemAdapter;
use super::platform::PlatformPolicy;
use super::registry::registry;
use super::view_adapter::PieViewAdapter;

/// The class name the factory answers for.
pub const PIE_VIEW_CLASS: &str = "PieView";

/// Produces the accessible root adapter for a widget handle, if the handle
/// is a pie view.
///
/// The host platform hands every widget it encounters through its factory
/// chain; this factory claims only widgets tagged with
/// [`PIE_VIEW_CLASS`] whose handle actually is an `Arc<PieView>`, and
/// declines everything else. Repeated calls for the same widget return the
/// same adapter instance.
pub fn accessible_factory(
    class_name: &str,
    object: &dyn Any,
) -> Option<Arc<PieViewAdapter>> {
    if class_name != PIE_VIEW_CLASS {
        return None;
    }
    let view = object.downcast_ref::<Arc<PieView>>()?;
    Some(view_adapter_for(view))
}

/// The accessible root adapter of a pie view, created on first use with
/// the build target's platform policy.
pub fn view_adapter_for(view: &Arc<PieView>) -> Arc<PieViewAdapter> {
    view_adapter_with_policy(view, PlatformPolicy::current())
}

/// The accessible root adapter of a pie view, created on first use with an
/// explicit platform policy.
///
/// The policy only takes effect when the adapter is created; subsequent
/// calls return the cached instance regardless of the policy passed.
pub fn view_adapter_with_policy(
    view: &Arc<PieView>,
    policy: PlatformPolicy,
) -> Arc<PieViewAdapter> {
    if let Some(handle) = view.accessible_interface()
        && let Ok(existing) = handle.downcast::<PieViewAdapter>()
    {
        return existing;
    }

    let adapter = PieViewAdapter::new(view, policy);
    let id = registry().register(adapter.clone());
    adapter.set_adapter_id(id);
    tracing::debug!(target: "pieview::accessibility", ?id, "created accessible pie view");

    // Removed rows hand their cached item adapters back through this hook,
    // synchronously, so their registrations never outlive the row storage.
    view.model()
        .set_interface_release_hook(Box::new(|handle| {
            if let Ok(item) = handle.downcast::<PieItemAdapter>()
                && let Some(id) = item.adapter_id()
                && let Err(err) = registry().unregister(id)
            {
                tracing::warn!(
                    target: "pieview::accessibility",
                    %err,
                    "releasing an interface that was never registered"
                );
            }
        }));

    let weak: Weak<PieViewAdapter> = Arc::downgrade(&adapter);
    view.set_accessible_interface(weak);
    adapter
}

/// Releases the widget's accessible adapters.
///
/// Unregisters the cached item adapters and the widget's root adapter from
/// the process registry. Call when the widget is being destroyed.
pub fn release_view_adapter(view: &Arc<PieView>) {
    view.model().release_all_interfaces();
    if let Some(handle) = view.accessible_interface()
        && let Ok(adapter) = handle.downcast::<PieViewAdapter>()
        && let Some(id) = adapter.adapter_id()
    {
        let _ = registry().unregister(id);
    }
    view.set_accessible_interface(Weak::<PieViewAdapter>::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PieModel;

    #[test]
    fn test_factory_declines_other_classes() {
        let model = Arc::new(PieModel::new());
        let view = PieView::new(model);
        assert!(accessible_factory("BarView", &view).is_none());
        assert!(accessible_factory(PIE_VIEW_CLASS, &42usize).is_none());
    }

    #[test]
    fn test_factory_matches_pie_view() {
        let model = Arc::new(PieModel::new());
        let view = PieView::new(model);
        let adapter = accessible_factory(PIE_VIEW_CLASS, &view);
        assert!(adapter.is_some());
    }

    #[test]
    fn test_factory_returns_same_adapter() {
        let model = Arc::new(PieModel::new());
        let view = PieView::new(model);
        let first = view_adapter_for(&view);
        let second = view_adapter_for(&view);
        assert!(Arc::ptr_eq(&first, &second));
    }
}

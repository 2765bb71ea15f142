//! Accessible root node for the pie view widget.

use std::any::Any;
use std::sync::{Arc, OnceLock, Weak};

use crate::geometry::{Point, Rect};
use crate::model::{position_of, ItemModel, ModelIndex, RowKey, SelectionMode};
use crate::view::PieView;

use super::item_adapter::PieItemAdapter;
use super::node::{AccessibleNode, TextKind};
use super::platform::PlatformPolicy;
use super::registry::{registry, AdapterId};
use super::role::AccessibleRole;
use super::state::AccessibleState;

/// The accessible root node for one pie view widget.
///
/// Enumerates the grid cells as its children and produces a
/// [`PieItemAdapter`] per cell on demand. Child counts, hit tests and
/// state are all answered from the live model and selection state; the
/// adapter holds nothing but a non-owning reference to the widget.
pub struct PieViewAdapter {
    view: Weak<PieView>,
    policy: PlatformPolicy,
    this: Weak<PieViewAdapter>,
    id: OnceLock<AdapterId>,
}

impl PieViewAdapter {
    pub(crate) fn new(view: &Arc<PieView>, policy: PlatformPolicy) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            view: Arc::downgrade(view),
            policy,
            this: this.clone(),
            id: OnceLock::new(),
        })
    }

    /// The policy this adapter resolves platform quirks with.
    pub fn policy(&self) -> PlatformPolicy {
        self.policy
    }

    /// The registry identity of this node, once registered.
    pub fn adapter_id(&self) -> Option<AdapterId> {
        self.id.get().copied()
    }

    pub(crate) fn set_adapter_id(&self, id: AdapterId) {
        let _ = self.id.set(id);
    }

    pub(crate) fn self_weak(&self) -> Weak<PieViewAdapter> {
        self.this.clone()
    }

    fn view(&self) -> Option<Arc<PieView>> {
        self.view.upgrade()
    }

    /// Produces or retrieves the accessible node of one cell.
    ///
    /// The node's identity lives in the model, keyed by the cell: repeated
    /// queries for the same cell return the same instance until the cell's
    /// row is removed. Creation registers the instance with the process
    /// registry.
    fn cell_adapter(&self, index: &ModelIndex) -> Option<Arc<PieItemAdapter>> {
        let view = self.view()?;
        let model = view.model();
        if !model.contains(index) {
            return None;
        }
        let key = RowKey::from_raw(index.internal_id());

        if let Some(handle) = model.cached_interface(key, index.column())
            && let Ok(existing) = handle.downcast::<PieItemAdapter>()
        {
            return Some(existing);
        }

        let cell = model.persistent_index(index)?;
        let adapter = PieItemAdapter::new(&view, self.this.clone(), cell, self.policy);
        let id = registry().register(adapter.clone());
        adapter.set_adapter_id(id);
        model.cache_interface(key, index.column(), adapter.clone());
        tracing::debug!(
            target: "pieview::accessibility",
            row = index.row(),
            column = index.column(),
            ?id,
            "created accessible pie item"
        );
        Some(adapter)
    }
}

impl AccessibleNode for PieViewAdapter {
    fn child_count(&self) -> usize {
        match self.view() {
            Some(view) => {
                let model = view.model();
                model.row_count() * model.column_count()
            }
            None => 0,
        }
    }

    /// # Panics
    ///
    /// Panics when `index` is outside `[0, child_count)`.
    fn child(&self, index: usize) -> Option<Arc<dyn AccessibleNode>> {
        let count = self.child_count();
        assert!(index < count, "child index {index} out of range 0..{count}");
        let view = self.view()?;
        let (row, column) = position_of(index, view.model().column_count());
        let model_index = view.model().index(row, column);
        self.cell_adapter(&model_index)
            .map(|adapter| adapter as Arc<dyn AccessibleNode>)
    }

    fn child_at(&self, x: f32, y: f32) -> Option<Arc<dyn AccessibleNode>> {
        let view = self.view()?;
        let local = view.map_from_global(Point::new(x, y));
        let index = view.index_at(local);
        if !index.is_valid() {
            return None;
        }
        self.cell_adapter(&index)
            .map(|adapter| adapter as Arc<dyn AccessibleNode>)
    }

    fn focus_child(&self) -> Option<Arc<dyn AccessibleNode>> {
        let view = self.view()?;
        let current = view.current_index();
        if !current.is_valid() {
            return None;
        }
        self.cell_adapter(&current)
            .map(|adapter| adapter as Arc<dyn AccessibleNode>)
    }

    /// # Panics
    ///
    /// Panics unless the argument is a valid [`PieItemAdapter`] whose
    /// parent is this adapter.
    fn index_of_child(&self, child: &dyn AccessibleNode) -> usize {
        let item = child
            .as_any()
            .downcast_ref::<PieItemAdapter>()
            .unwrap_or_else(|| panic!("index_of_child requires a pie item adapter"));
        assert!(item.parent_is(self), "item belongs to a different view");
        assert!(item.is_valid(), "item adapter is no longer valid");
        item.linear_index()
            .expect("a valid item resolves to a grid position")
    }

    fn rect(&self) -> Rect {
        match self.view() {
            Some(view) => view.rect(),
            None => Rect::ZERO,
        }
    }

    fn role(&self) -> AccessibleRole {
        // List, rather than Table or Tree: the item announcements come out
        // right on every tested screen reader only with list semantics.
        AccessibleRole::List
    }

    fn state(&self) -> AccessibleState {
        let mut state = AccessibleState::default();
        let Some(view) = self.view() else {
            return state;
        };
        let mode = view.selection_mode();
        state.active = true;
        state.focusable = true;
        state.selectable = true;
        state.selected = true;
        state.multi_selectable = mode == SelectionMode::MultiSelection;
        state.ext_selectable = mode == SelectionMode::ExtendedSelection;
        state.pressed = true;
        state
    }

    fn text(&self, kind: TextKind) -> String {
        let Some(view) = self.view() else {
            return String::new();
        };
        match kind {
            TextKind::Name => view.accessible_name(),
            TextKind::Description => view.accessible_description(),
            TextKind::Help => "Navigate with the mouse or arrow keys".to_string(),
            TextKind::Value | TextKind::Accelerator => String::new(),
        }
    }

    /// # Panics
    ///
    /// Panics for every kind except `Name` and `Description`.
    fn set_text(&self, kind: TextKind, text: &str) {
        let Some(view) = self.view() else {
            return;
        };
        match kind {
            TextKind::Name => view.set_accessible_name(text),
            TextKind::Description => view.set_accessible_description(text),
            other => panic!("cannot store {other:?} text on a pie view"),
        }
    }

    fn is_valid(&self) -> bool {
        self.view.upgrade().is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//! Accessible leaf node for one grid cell.

use std::any::Any;
use std::sync::{Arc, OnceLock, Weak};

use crate::geometry::Rect;
use crate::locale::NumberFormatter;
use crate::model::{
    linear_index, ItemModel, ItemRole, ModelIndex, PersistentIndex, SelectionMode,
    CATEGORY_COLUMN, VALUE_COLUMN,
};
use crate::view::PieView;

use super::node::{AccessibleNode, Relation, RelationFilter, TextKind};
use super::platform::PlatformPolicy;
use super::registry::AdapterId;
use super::role::AccessibleRole;
use super::state::AccessibleState;
use super::view_adapter::PieViewAdapter;

/// The accessible node for a single cell of the pie view.
///
/// Wraps a durable cell reference plus non-owning back-references to the
/// widget and the widget's own accessible node. Cell data, selection state
/// and geometry are read live from the model and view on every query; the
/// only thing that persists is the node's identity, cached inside the model
/// keyed by cell so the platform sees one stable instance per cell.
pub struct PieItemAdapter {
    view: Weak<PieView>,
    parent: Weak<PieViewAdapter>,
    cell: PersistentIndex,
    policy: PlatformPolicy,
    formatter: NumberFormatter,
    this: Weak<PieItemAdapter>,
    id: OnceLock<AdapterId>,
}

impl PieItemAdapter {
    pub(crate) fn new(
        view: &Arc<PieView>,
        parent: Weak<PieViewAdapter>,
        cell: PersistentIndex,
        policy: PlatformPolicy,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            view: Arc::downgrade(view),
            parent,
            cell,
            policy,
            formatter: NumberFormatter::new(),
            this: this.clone(),
            id: OnceLock::new(),
        })
    }

    /// The registry identity of this node, once registered.
    pub fn adapter_id(&self) -> Option<AdapterId> {
        self.id.get().copied()
    }

    pub(crate) fn set_adapter_id(&self, id: AdapterId) {
        let _ = self.id.set(id);
    }

    pub(crate) fn parent_is(&self, other: &PieViewAdapter) -> bool {
        Weak::ptr_eq(&self.parent, &other.self_weak())
    }

    /// The cell's linear index from the current model dimensions, or `None`
    /// when the cell no longer resolves.
    pub(crate) fn linear_index(&self) -> Option<usize> {
        let view = self.view.upgrade()?;
        let index = view.model().resolve(&self.cell);
        if !index.is_valid() {
            return None;
        }
        Some(linear_index(
            index.row(),
            index.column(),
            view.model().column_count(),
        ))
    }

    fn view(&self) -> Option<Arc<PieView>> {
        self.view.upgrade()
    }

    /// The cell's live position, or the invalid index.
    fn resolved(&self) -> ModelIndex {
        match self.view() {
            Some(view) => view.model().resolve(&self.cell),
            None => ModelIndex::invalid(),
        }
    }

    /// Synthesizes the announcement text for this cell.
    ///
    /// The name always carries both the category and the slice's share of
    /// the pie, so the user is never given a bare number or a bare label
    /// without context: `"<category>, <pct>%"` for the category cell and
    /// `"<pct>% <category>"` for the value cell, with the percentage
    /// formatted to one decimal place in the user's locale.
    fn name(&self) -> String {
        let Some(view) = self.view() else {
            return String::new();
        };
        let model = view.model();
        let index = model.resolve(&self.cell);
        if !index.is_valid() {
            return String::new();
        }

        let category = model
            .data(&model.index(index.row(), CATEGORY_COLUMN), ItemRole::Display)
            .into_string()
            .unwrap_or_default();
        let value = model
            .data(&model.index(index.row(), VALUE_COLUMN), ItemRole::Display)
            .as_f64()
            .unwrap_or(0.0);

        let total = view.total();
        let percentage = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let percentage = self.formatter.format_with_precision(percentage, 1);

        let mut name = if index.column() == CATEGORY_COLUMN {
            format!("{category}, {percentage}%")
        } else {
            format!("{percentage}% {category}")
        };

        // Where the screen reader does not announce selection state on its
        // own, unselected items say so in their name.
        if !self.policy.announces_selection && !view.is_selected(&index) {
            name = format!("{name} not selected");
        }
        name
    }
}

impl AccessibleNode for PieItemAdapter {
    // child_count, child and child_at keep their leaf defaults: cells have
    // no descendants.

    fn focus_child(&self) -> Option<Arc<dyn AccessibleNode>> {
        let view = self.view()?;
        let index = self.resolved();
        if index.is_valid() && index == view.current_index() {
            return self.this.upgrade().map(|this| this as Arc<dyn AccessibleNode>);
        }
        None
    }

    fn parent(&self) -> Option<Arc<dyn AccessibleNode>> {
        self.parent
            .upgrade()
            .map(|parent| parent as Arc<dyn AccessibleNode>)
    }

    fn rect(&self) -> Rect {
        let Some(view) = self.view() else {
            return Rect::ZERO;
        };
        let local = view.visual_rect(&self.resolved());
        if local.is_empty() {
            return Rect::ZERO;
        }
        local.translated(view.origin())
    }

    fn role(&self) -> AccessibleRole {
        self.policy.item_role
    }

    fn state(&self) -> AccessibleState {
        let mut state = AccessibleState::default();
        let Some(view) = self.view() else {
            return state;
        };
        let index = self.resolved();
        if !index.is_valid() {
            return state;
        }
        let mode = view.selection_mode();
        state.active = true;
        state.focusable = true;
        state.focused = index == view.current_index();
        state.selectable = view.model().flags(&index).selectable;
        state.selected = view.is_selected(&index);
        state.multi_selectable = mode == SelectionMode::MultiSelection;
        state.ext_selectable = mode == SelectionMode::ExtendedSelection;
        state.pressed = true;
        state
    }

    fn text(&self, kind: TextKind) -> String {
        match kind {
            TextKind::Name => self.name(),
            TextKind::Description => match self.view() {
                Some(view) => view
                    .model()
                    .data(&self.resolved(), ItemRole::AccessibleDescription)
                    .into_string()
                    .unwrap_or_default(),
                None => String::new(),
            },
            TextKind::Value | TextKind::Help | TextKind::Accelerator => String::new(),
        }
    }

    /// # Panics
    ///
    /// Panics for every kind except `Description`; the name is computed,
    /// never stored.
    fn set_text(&self, kind: TextKind, text: &str) {
        match kind {
            TextKind::Description => {
                if let Some(view) = self.view() {
                    view.model().set_data(
                        &self.resolved(),
                        text.into(),
                        ItemRole::AccessibleDescription,
                    );
                }
            }
            other => panic!("cannot store {other:?} text on a pie item"),
        }
    }

    fn relations(&self, filter: RelationFilter) -> Vec<(Arc<dyn AccessibleNode>, Relation)> {
        let mut relations = Vec::new();
        let Some(parent) = self.parent.upgrade() else {
            return relations;
        };
        let Some(linear) = self.linear_index() else {
            return relations;
        };

        if self.cell.column() == CATEGORY_COLUMN {
            // The category is the label of the slice value to its right.
            if filter.labels
                && let Some(target) = parent.child(linear + 1)
            {
                relations.push((target, Relation::Labels));
            }
        } else if filter.labelled_by
            && let Some(target) = parent.child(linear - 1)
        {
            relations.push((target, Relation::LabelledBy));
        }
        relations
    }

    fn is_valid(&self) -> bool {
        let Some(view) = self.view() else {
            return false;
        };
        if !self.resolved().is_valid() {
            return false;
        }
        // Guard against stale identities: the model must still know this
        // exact instance as the cell's accessible interface.
        match view
            .model()
            .cached_interface(self.cell.key(), self.cell.column())
        {
            Some(handle) => match handle.downcast::<PieItemAdapter>() {
                Ok(cached) => std::ptr::eq(Arc::as_ptr(&cached), self),
                Err(_) => false,
            },
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//! Headless pie chart view.

use std::any::Any;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use pieview_core::ConnectionId;

use crate::geometry::{Point, Rect, Size};
use crate::model::{
    ItemModel, ModelIndex, PieModel, SelectionMode, SelectionModel, CATEGORY_COLUMN, VALUE_COLUMN,
};

/// Outer margin of the item list, in logical pixels.
const LIST_MARGIN: f32 = 8.0;
/// Height of one item row.
const ROW_HEIGHT: f32 = 20.0;
/// Share of the list width given to the category column.
const CATEGORY_SHARE: f32 = 0.6;

/// A model-backed pie chart view.
///
/// The widget shows the model's rows as a navigable two-column list (the
/// category text and its slice value) next to the pie itself. This type is
/// headless: it provides geometry, hit-testing, selection, and accessible
/// name/description storage, which is the entire surface the accessibility
/// adapters query.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pieview::model::{ItemModel, PieModel};
/// use pieview::view::PieView;
///
/// let model = Arc::new(PieModel::with_rows(&[("Research", 21.0), ("Development", 79.0)]));
/// let view = PieView::new(model.clone());
/// view.set_accessible_name("Budget by department");
///
/// let index = model.index(0, 0);
/// let rect = view.visual_rect(&index);
/// assert!(view.index_at(rect.origin) == index);
/// ```
pub struct PieView {
    model: Arc<PieModel>,
    selection: RwLock<SelectionModel>,

    /// Widget origin in screen coordinates.
    origin: RwLock<Point>,
    size: RwLock<Size>,

    accessible_name: RwLock<String>,
    accessible_description: RwLock<String>,

    /// The widget's accessible adapter, cached so repeated platform queries
    /// get the same instance. Type-erased; the adapter layer owns the type.
    accessible_interface: RwLock<Weak<dyn Any + Send + Sync>>,

    prune_connections: [ConnectionId; 2],
}

impl PieView {
    /// Creates a view over the given model.
    pub fn new(model: Arc<PieModel>) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<PieView>| {
            let prune = {
                let weak = weak.clone();
                model.signals().rows_removed.connect(move |_| {
                    if let Some(view) = weak.upgrade() {
                        view.prune_selection();
                    }
                })
            };
            let reset = {
                let weak = weak.clone();
                model.signals().model_reset.connect(move |_| {
                    if let Some(view) = weak.upgrade() {
                        view.prune_selection();
                    }
                })
            };
            Self {
                model,
                selection: RwLock::new(SelectionModel::new()),
                origin: RwLock::new(Point::ZERO),
                size: RwLock::new(Size::new(400.0, 300.0)),
                accessible_name: RwLock::new(String::new()),
                accessible_description: RwLock::new(String::new()),
                accessible_interface: RwLock::new(Weak::<()>::new()),
                prune_connections: [prune, reset],
            }
        })
    }

    /// The model shown by this view.
    pub fn model(&self) -> &Arc<PieModel> {
        &self.model
    }

    /// Sum of all slice values, the denominator for percentage announcements.
    pub fn total(&self) -> f64 {
        self.model.total()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The view's selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.read().selection_mode()
    }

    /// Sets the view's selection mode.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        self.selection.write().set_selection_mode(mode);
    }

    /// Returns `true` if the cell at `index` is selected.
    pub fn is_selected(&self, index: &ModelIndex) -> bool {
        self.selection.read().is_selected(index)
    }

    /// The current (keyboard focus) cell, or an invalid index if none.
    pub fn current_index(&self) -> ModelIndex {
        self.selection.read().current_index()
    }

    /// Makes the cell at `index` current.
    pub fn set_current(&self, index: ModelIndex) {
        self.selection.write().set_current(index);
    }

    /// Selects the cell at `index`.
    pub fn select(&self, index: ModelIndex) {
        self.selection.write().select(index);
    }

    /// Toggles selection of the cell at `index`.
    pub fn toggle_selection(&self, index: ModelIndex) {
        self.selection.write().toggle(index);
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        self.selection.write().clear_selection();
    }

    fn prune_selection(&self) {
        let model = self.model.clone();
        let mut selection = self.selection.write();
        selection.retain(|index| model.contains(index));

        // A surviving current index may carry a stale row number; re-derive
        // its position from the row's stable identity.
        let current = selection.current_index();
        if current.is_valid()
            && let Some(reference) = model.persistent_index(&current)
        {
            selection.set_current(model.resolve(&reference));
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// The widget's origin in screen coordinates.
    pub fn origin(&self) -> Point {
        *self.origin.read()
    }

    /// Moves the widget to the given screen position.
    pub fn set_origin(&self, origin: Point) {
        *self.origin.write() = origin;
    }

    /// The widget's size.
    pub fn size(&self) -> Size {
        *self.size.read()
    }

    /// Resizes the widget.
    pub fn set_size(&self, size: Size) {
        *self.size.write() = size;
    }

    /// The widget's rectangle in screen coordinates.
    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.origin(),
            size: self.size(),
        }
    }

    /// Maps a point from widget-local to screen coordinates.
    pub fn map_to_global(&self, point: Point) -> Point {
        let origin = self.origin();
        Point::new(point.x + origin.x, point.y + origin.y)
    }

    /// Maps a point from screen to widget-local coordinates.
    pub fn map_from_global(&self, point: Point) -> Point {
        let origin = self.origin();
        Point::new(point.x - origin.x, point.y - origin.y)
    }

    /// The widget-local rectangle of the cell at `index`.
    ///
    /// Returns an empty rectangle for invalid or stale indices. The item
    /// list occupies the left half of the widget; the pie itself is drawn
    /// in the right half and has no per-cell rectangle.
    pub fn visual_rect(&self, index: &ModelIndex) -> Rect {
        if !self.model.contains(index) {
            return Rect::ZERO;
        }
        let list_width = self.size().width / 2.0 - 2.0 * LIST_MARGIN;
        if list_width <= 0.0 {
            return Rect::ZERO;
        }
        let category_width = list_width * CATEGORY_SHARE;
        let y = LIST_MARGIN + index.row() as f32 * ROW_HEIGHT;
        match index.column() {
            CATEGORY_COLUMN => Rect::new(LIST_MARGIN, y, category_width, ROW_HEIGHT),
            VALUE_COLUMN => Rect::new(
                LIST_MARGIN + category_width,
                y,
                list_width - category_width,
                ROW_HEIGHT,
            ),
            _ => Rect::ZERO,
        }
    }

    /// The cell at the given widget-local point, or an invalid index when
    /// the point misses every cell.
    pub fn index_at(&self, point: Point) -> ModelIndex {
        let list_width = self.size().width / 2.0 - 2.0 * LIST_MARGIN;
        if list_width <= 0.0 {
            return ModelIndex::invalid();
        }
        if point.x < LIST_MARGIN
            || point.x >= LIST_MARGIN + list_width
            || point.y < LIST_MARGIN
        {
            return ModelIndex::invalid();
        }
        let row = ((point.y - LIST_MARGIN) / ROW_HEIGHT) as usize;
        if row >= self.model.row_count() {
            return ModelIndex::invalid();
        }
        let column = if point.x < LIST_MARGIN + list_width * CATEGORY_SHARE {
            CATEGORY_COLUMN
        } else {
            VALUE_COLUMN
        };
        self.model.index(row, column)
    }

    // -------------------------------------------------------------------------
    // Accessible properties
    // -------------------------------------------------------------------------

    /// The widget's assigned accessible name.
    pub fn accessible_name(&self) -> String {
        self.accessible_name.read().clone()
    }

    /// Assigns the widget's accessible name.
    pub fn set_accessible_name(&self, name: impl Into<String>) {
        *self.accessible_name.write() = name.into();
    }

    /// The widget's assigned accessible description.
    pub fn accessible_description(&self) -> String {
        self.accessible_description.read().clone()
    }

    /// Assigns the widget's accessible description.
    pub fn set_accessible_description(&self, description: impl Into<String>) {
        *self.accessible_description.write() = description.into();
    }

    /// The cached accessible adapter of this widget, if one is alive.
    pub(crate) fn accessible_interface(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.accessible_interface.read().upgrade()
    }

    /// Caches the accessible adapter of this widget.
    pub(crate) fn set_accessible_interface(&self, interface: Weak<dyn Any + Send + Sync>) {
        *self.accessible_interface.write() = interface;
    }
}

impl Drop for PieView {
    fn drop(&mut self) {
        let signals = self.model.signals();
        signals.rows_removed.disconnect(self.prune_connections[0]);
        signals.model_reset.disconnect(self.prune_connections[1]);
    }
}

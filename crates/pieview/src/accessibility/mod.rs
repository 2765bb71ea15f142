//! Accessibility adapters for the pie view.
//!
//! This module exposes the widget and its grid cells to assistive
//! technology as a two-level tree of accessible nodes:
//!
//! - [`PieViewAdapter`] is the root node for the whole widget. It answers
//!   tree-navigation queries and produces a [`PieItemAdapter`] per cell.
//! - [`PieItemAdapter`] is the leaf node for one cell. It answers identity,
//!   geometry, naming, role, state and relation queries against the live
//!   model and selection state.
//! - [`accessible_factory`] is the entry point the host platform calls to
//!   obtain the root adapter for a widget handle.
//!
//! Node identity is stable: asking for the same cell twice yields the same
//! instance, cached inside the model and registered with the process-wide
//! [`InterfaceRegistry`] until the cell's row is removed.
//!
//! Platform differences in announcement behavior are collected in a
//! [`PlatformPolicy`] resolved once and injected into every adapter.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pieview::accessibility::{view_adapter_for, AccessibleNode, TextKind};
//! use pieview::model::PieModel;
//! use pieview::view::PieView;
//!
//! let model = Arc::new(PieModel::with_rows(&[("Research", 21.0), ("Development", 79.0)]));
//! let view = PieView::new(model);
//! view.set_accessible_name("Budget");
//!
//! let root = view_adapter_for(&view);
//! assert_eq!(root.child_count(), 4);
//! assert_eq!(root.text(TextKind::Name), "Budget");
//! ```

mod factory;
mod item_adapter;
mod node;
mod platform;
mod registry;
mod role;
mod state;
mod view_adapter;

pub use factory::{
    accessible_factory, release_view_adapter, view_adapter_for, view_adapter_with_policy,
    PIE_VIEW_CLASS,
};
pub use item_adapter::PieItemAdapter;
pub use node::{AccessibleNode, Relation, RelationFilter, TextKind};
pub use platform::{Platform, PlatformPolicy};
pub use registry::{registry, AdapterId, InterfaceRegistry, RegistryError};
pub use role::AccessibleRole;
pub use state::AccessibleState;
pub use view_adapter::PieViewAdapter;

//! A model-backed pie-chart list view with screen-reader support.
//!
//! The crate is organized the way the data flows:
//!
//! - [`model`]: the generic item-model surface ([`model::ItemModel`]), the
//!   concrete two-column [`model::PieModel`] (category, slice value),
//!   durable cell references, and selection state.
//! - [`view`]: the headless [`view::PieView`] widget surface: geometry,
//!   hit-testing, selection, accessible name/description storage.
//! - [`accessibility`]: the adapter layer that exposes the view to
//!   assistive technology as a tree of accessible nodes, with per-platform
//!   role and announcement policy.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pieview::accessibility::{view_adapter_for, AccessibleNode, TextKind};
//! use pieview::model::{ItemModel, PieModel};
//! use pieview::view::PieView;
//!
//! let model = Arc::new(PieModel::with_rows(&[
//!     ("Scientific Research", 21.0),
//!     ("Engineering", 54.0),
//!     ("Arts", 25.0),
//! ]));
//! let view = PieView::new(model.clone());
//! view.set_accessible_name("Spending by category");
//!
//! let root = view_adapter_for(&view);
//! assert_eq!(root.child_count(), model.row_count() * model.column_count());
//!
//! // Every cell gets announcement text combining category and share.
//! let first = root.child(0).unwrap();
//! assert!(first.text(TextKind::Name).starts_with("Scientific Research, "));
//! ```

pub mod accessibility;
pub mod geometry;
pub mod locale;
pub mod model;
pub mod view;

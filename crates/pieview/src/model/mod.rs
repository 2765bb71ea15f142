//! Item model for the pie view.
//!
//! This module provides the generic query surface the view and the
//! accessibility adapters consume ([`ItemModel`], [`ModelIndex`],
//! [`ItemRole`]/[`ItemData`]), the durable cell references that survive row
//! mutations ([`PersistentIndex`]), the concrete two-column data model
//! ([`PieModel`]), and the selection state tracker ([`SelectionModel`]).

mod index;
mod persistent;
mod pie_model;
mod role;
mod selection;
mod traits;

pub use index::{linear_index, position_of, ModelIndex};
pub use persistent::{PersistentIndex, RowKey};
pub use pie_model::{
    InterfaceHandle, InterfaceReleaseHook, PieModel, CATEGORY_COLUMN, VALUE_COLUMN,
};
pub use role::{ItemData, ItemRole};
pub use selection::{SelectionMode, SelectionModel};
pub use traits::{ItemFlags, ItemModel, ModelSignals};

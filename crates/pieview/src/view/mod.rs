//! The pie view widget surface.
//!
//! [`PieView`] is the headless widget the accessibility adapters are built
//! on: it owns the selection state, answers geometry and hit-test queries,
//! and stores the widget-level accessible name and description. Rendering
//! is out of scope; the view exposes exactly the query surface the adapter
//! layer consumes.

mod pie_view;

pub use pie_view::PieView;

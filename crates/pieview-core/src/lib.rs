//! Core systems for the accessible pie view.
//!
//! This crate provides the signal/slot system used for change notification
//! between the item model, the view, and the accessibility adapter layer.
//!
//! # Signal/Slot Example
//!
//! ```
//! use pieview_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};

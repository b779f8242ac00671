//! # oklch-store
//!
//! Picker session state: the current value, the significant-change filter
//! and the listeners that repaint the UI.
//!
//! Every update goes through [`ValueStore::set_value`]:
//!
//! 1. drop it if it equals the current value after aggressive rounding
//! 2. store it rounded precisely
//! 3. call each listener whose components changed, passing the number of
//!    charts that need repainting
//!
//! # Example
//!
//! ```rust
//! use oklch_core::{Axis, PartialValue};
//! use oklch_store::{ListenerBundle, StaticSupport, ValueStore};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut store = ValueStore::new("#ff0000", StaticSupport::NONE).unwrap();
//! let calls = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&calls);
//! store.add_paint_callbacks("hue-slider", ListenerBundle::new().on_h(move |_, _| {
//!     seen.set(seen.get() + 1);
//! }));
//!
//! store.set_components(PartialValue::axis(Axis::H, 40.0));
//! store.set_components(PartialValue::axis(Axis::H, 40.000_01));
//! assert_eq!(calls.get(), 1);
//! ```
//!
//! # Configuration
//!
//! [`PickerConfig`] is read from RON; see the [`config`] module.
//!
//! # Dependencies
//!
//! - [`oklch-color`] - parsing, rounding and output formats
//! - [`oklch-core`] - value types
//! - `ron` / `serde` - configuration files

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
mod error;
mod listener;
mod store;
mod support;

pub use config::{PickerConfig, DEFAULT_BORDER, DEFAULT_COLOR};
pub use error::{StoreError, StoreResult};
pub use listener::{
    Changes, ComponentCallback, Interest, ListenerBundle, ListenerId, ValueCallback,
};
pub use store::{chart_listener_name, ValueStore};
pub use support::{StaticSupport, SupportProvider};

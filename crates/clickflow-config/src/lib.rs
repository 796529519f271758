//! Clickflow Config
//!
//! This crate contains the serializable workflow record for clickflow and the
//! declarative action schema. The record is what gets committed to durable
//! storage at a save point and loaded back verbatim before a run:
//!
//! ```json
//! {
//!   "buttonLabel": "Go",
//!   "actions": [
//!     { "id": "id_1", "type": "alert", "config": { "message": "hi" } },
//!     { "id": "id_2", "type": "refreshPage" }
//!   ]
//! }
//! ```
//!
//! The editing surface and the dispatcher both consult [`ActionKind::fields`]
//! to know which [`ActionParams`] entries matter for a given kind.

mod error;
mod kind;
mod params;
mod workflow;

pub use error::ConfigError;
pub use kind::{ActionKind, FieldSpec};
pub use params::{ActionParams, ParamField};
pub use workflow::{ActionDef, WorkflowDef};

//! Clickflow Workflow
//!
//! This crate provides the workflow document: an ordered list of actions plus
//! the label of the control that starts a run. Every mutation is a consuming
//! transform that hands back the next version of the document.
//!
//! Key differences from `clickflow-config`:
//! - Action ids are guaranteed unique within a document
//! - Each action exposes a typed, per-kind view of its parameters ([`Params`])
//! - The document round-trips through the persisted record (`WorkflowDef`)

mod action;
mod error;
mod workflow;

pub use action::{Action, ActionPatch, Params};
pub use error::WorkflowError;
pub use workflow::{DEFAULT_TRIGGER_LABEL, Workflow};

pub use clickflow_config::{ActionKind, ActionParams, FieldSpec, ParamField};

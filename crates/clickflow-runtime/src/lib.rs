//! Clickflow Runtime
//!
//! This crate replays a workflow against a live surface. The [`Dispatcher`]
//! maps one action to its side effect; the [`Executor`] walks the action list
//! in order, pacing between actions so each effect is observable before the
//! next one starts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Executor                            │
//! │  - run(workflow, ctx) → RunReport                           │
//! │  - drives a Run step by step, sleeps between actions        │
//! │  - answers suspended steps through the Surface              │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Dispatcher                           │
//! │  - dispatch(action, ctx) → Completed | Pending | Terminate  │
//! │  - writes output sinks, storage and control styling         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blocking effects (`alert`, `promptAndShow`, the manual-close notice) are
//! not performed inside dispatch. They come back as a [`Step::Suspended`]
//! carrying an [`Interaction`]; the host answers it and calls
//! [`Run::resume`]. [`Executor::run`] does this against a [`Surface`].

mod context;
mod dispatch;
mod events;
mod executor;
mod output;

pub use context::{ControlStyle, ExecutionContext, SCALE_FACTOR, Surface, TriggerControl};
pub use dispatch::{
  ALERT_FALLBACK, Dispatched, Dispatcher, Interaction, MANUAL_CLOSE_NOTICE, MISSING_VALUE,
  PROMPT_FALLBACK,
};
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use executor::{
  DEFAULT_ACTION_DELAY, Executor, ExecutorConfig, Run, RunOutcome, RunReport, RunState, Step,
};
pub use output::OutputState;

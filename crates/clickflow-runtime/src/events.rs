//! Execution events and notifiers for observability.
//!
//! Events are emitted while a run progresses so consumers can count
//! dispatches, stream progress to a UI, or record a run for later inspection.

use clickflow_workflow::ActionKind;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// The run left `Idle`.
  RunStarted {
    execution_id: String,
    action_count: usize,
  },

  /// An action was handed to the dispatcher.
  ActionDispatched {
    execution_id: String,
    index: usize,
    action_id: String,
    kind: ActionKind,
  },

  /// An action is waiting on the user.
  ActionSuspended {
    execution_id: String,
    action_id: String,
  },

  /// A `refreshPage` ended the run early.
  RunReloaded {
    execution_id: String,
    action_id: String,
  },

  /// Every action ran and the run is back to `Idle`.
  RunCompleted {
    execution_id: String,
    dispatched: usize,
  },
}

/// Trait for receiving execution events.
///
/// The executor calls `notify` for each event; implementations decide what
/// to do with them.
pub trait ExecutionNotifier: Send + Sync {
  /// Called when an execution event occurs.
  fn notify(&self, event: ExecutionEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

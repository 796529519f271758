//! Sequential executor.
//!
//! A [`Run`] is one pass over a workflow's actions, `Idle -> Running -> Idle`.
//! Each [`Run::step`] dispatches the next action and reports what happened;
//! a step that needs the user comes back [`Step::Suspended`] and must be
//! finished with [`Run::resume`] before the run can move on. This lets a host
//! treat modal input as a cooperative yield instead of a blocking call.
//!
//! [`Executor::run`] is the usual driver: it answers suspensions through the
//! context's [`Surface`](crate::Surface) and holds for the configured delay
//! after every action so effects land in issue order.

use std::sync::Arc;
use std::time::Duration;

use clickflow_workflow::{Action, Workflow};
use tracing::{debug, info, instrument};

use crate::context::ExecutionContext;
use crate::dispatch::{Dispatched, Dispatcher, Interaction};
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};

/// Pause after each action before the next one starts.
pub const DEFAULT_ACTION_DELAY: Duration = Duration::from_millis(200);

/// Configuration for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
  pub action_delay: Duration,
}

impl Default for ExecutorConfig {
  fn default() -> Self {
    Self {
      action_delay: DEFAULT_ACTION_DELAY,
    }
  }
}

/// Lifecycle of a run. There is no failed state; bad actions are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
  Idle,
  Running,
}

/// Result of advancing a run by one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  /// The action at `index` ran to completion.
  Dispatched { index: usize },
  /// The current action waits on the user. Call [`Run::resume`] next.
  Suspended(Interaction),
  /// A reload was dispatched; no further actions run.
  Terminated,
  /// Every action has run.
  Finished,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
  Completed,
  /// Cut short by `refreshPage`; the host is restarting.
  Reloaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
  pub execution_id: String,
  /// Number of actions handed to the dispatcher.
  pub dispatched: usize,
  pub outcome: RunOutcome,
}

/// Walks workflows in list order.
///
/// Overlapping runs are not prevented here; a host that must serialize them
/// should refuse to trigger while one is in flight.
pub struct Executor {
  config: ExecutorConfig,
  dispatcher: Dispatcher,
  notifier: Arc<dyn ExecutionNotifier>,
}

impl Default for Executor {
  fn default() -> Self {
    Self::new(ExecutorConfig::default())
  }
}

impl Executor {
  pub fn new(config: ExecutorConfig) -> Self {
    Self {
      config,
      dispatcher: Dispatcher::new(),
      notifier: Arc::new(NoopNotifier),
    }
  }

  pub fn with_notifier(mut self, notifier: Arc<dyn ExecutionNotifier>) -> Self {
    self.notifier = notifier;
    self
  }

  pub fn config(&self) -> &ExecutorConfig {
    &self.config
  }

  /// Prepare a run over `workflow` without dispatching anything yet.
  pub fn start<'w>(&self, workflow: &'w Workflow) -> Run<'w> {
    Run {
      execution_id: uuid::Uuid::new_v4().to_string(),
      actions: workflow.actions(),
      cursor: 0,
      dispatched: 0,
      suspended: None,
      terminated: false,
      finished: false,
      state: RunState::Idle,
      dispatcher: self.dispatcher,
      notifier: self.notifier.clone(),
    }
  }

  /// Run every action of `workflow` in order against `ctx`.
  #[instrument(name = "executor_run", skip_all, fields(actions = workflow.len()))]
  pub async fn run(&self, workflow: &Workflow, ctx: &mut ExecutionContext<'_>) -> RunReport {
    let mut run = self.start(workflow);
    let surface = ctx.surface;

    loop {
      match run.step(ctx).await {
        Step::Dispatched { .. } => self.pace().await,
        Step::Suspended(interaction) => {
          let response = match &interaction {
            Interaction::Notification { message } => {
              surface.notify(message).await;
              None
            }
            Interaction::Prompt { message } => surface.prompt(message).await,
          };
          run.resume(response, ctx).await;
          self.pace().await;
        }
        Step::Terminated => return run.report(RunOutcome::Reloaded),
        Step::Finished => return run.report(RunOutcome::Completed),
      }
    }
  }

  async fn pace(&self) {
    if !self.config.action_delay.is_zero() {
      tokio::time::sleep(self.config.action_delay).await;
    }
  }
}

/// One pass over a workflow's actions.
pub struct Run<'w> {
  execution_id: String,
  actions: &'w [Action],
  cursor: usize,
  dispatched: usize,
  suspended: Option<(usize, Interaction)>,
  terminated: bool,
  finished: bool,
  state: RunState,
  dispatcher: Dispatcher,
  notifier: Arc<dyn ExecutionNotifier>,
}

impl<'w> Run<'w> {
  pub fn execution_id(&self) -> &str {
    &self.execution_id
  }

  pub fn state(&self) -> RunState {
    self.state
  }

  /// Number of actions handed to the dispatcher so far.
  pub fn dispatched(&self) -> usize {
    self.dispatched
  }

  /// Dispatch the next action.
  ///
  /// While suspended this keeps returning the pending interaction without
  /// dispatching anything. After the run ends it keeps returning the same
  /// terminal step.
  pub async fn step(&mut self, ctx: &mut ExecutionContext<'_>) -> Step {
    if let Some((_, interaction)) = &self.suspended {
      return Step::Suspended(interaction.clone());
    }
    if self.terminated {
      return Step::Terminated;
    }
    if self.finished {
      return Step::Finished;
    }

    if self.state == RunState::Idle {
      self.state = RunState::Running;
      info!(
        execution_id = %self.execution_id,
        action_count = self.actions.len(),
        "run_started"
      );
      self.notifier.notify(ExecutionEvent::RunStarted {
        execution_id: self.execution_id.clone(),
        action_count: self.actions.len(),
      });
    }

    let actions = self.actions;
    let Some(action) = actions.get(self.cursor) else {
      self.finish();
      return Step::Finished;
    };
    let index = self.cursor;
    self.cursor += 1;
    self.dispatched += 1;

    debug!(
      execution_id = %self.execution_id,
      index,
      action_id = %action.id,
      kind = %action.kind,
      "action_dispatched"
    );
    self.notifier.notify(ExecutionEvent::ActionDispatched {
      execution_id: self.execution_id.clone(),
      index,
      action_id: action.id.clone(),
      kind: action.kind,
    });

    match self.dispatcher.dispatch(action, ctx).await {
      Dispatched::Completed => Step::Dispatched { index },
      Dispatched::Pending(interaction) => {
        self.notifier.notify(ExecutionEvent::ActionSuspended {
          execution_id: self.execution_id.clone(),
          action_id: action.id.clone(),
        });
        self.suspended = Some((index, interaction.clone()));
        Step::Suspended(interaction)
      }
      Dispatched::Terminate => {
        info!(
          execution_id = %self.execution_id,
          action_id = %action.id,
          "run_reloaded"
        );
        self.notifier.notify(ExecutionEvent::RunReloaded {
          execution_id: self.execution_id.clone(),
          action_id: action.id.clone(),
        });
        self.terminated = true;
        self.state = RunState::Idle;
        Step::Terminated
      }
    }
  }

  /// Finish the suspended action with the user's response.
  ///
  /// Returns the index of the resumed action, or `None` when nothing was
  /// suspended.
  pub async fn resume(
    &mut self,
    response: Option<String>,
    ctx: &mut ExecutionContext<'_>,
  ) -> Option<usize> {
    let (index, _) = self.suspended.take()?;
    let actions = self.actions;
    let action = &actions[index];
    self.dispatcher.resolve(action, response, ctx).await;
    Some(index)
  }

  fn finish(&mut self) {
    self.finished = true;
    self.state = RunState::Idle;
    info!(
      execution_id = %self.execution_id,
      dispatched = self.dispatched,
      "run_completed"
    );
    self.notifier.notify(ExecutionEvent::RunCompleted {
      execution_id: self.execution_id.clone(),
      dispatched: self.dispatched,
    });
  }

  fn report(self, outcome: RunOutcome) -> RunReport {
    RunReport {
      execution_id: self.execution_id,
      dispatched: self.dispatched,
      outcome,
    }
  }
}

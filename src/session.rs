//! A trigger session: the saved workflow, clicked up to N times.

use clickflow_host_kv::KvStore;
use clickflow_runtime::{ControlStyle, ExecutionContext, Executor, OutputState, RunOutcome, Surface};
use clickflow_store::WorkflowStore;
use tracing::info;

use crate::terminal;

pub const NO_WORKFLOW: &str = "No workflow configured yet. Please configure the workflow first.";

/// Window lifecycle a session reads back after each run.
pub trait SessionSurface: Surface {
  fn is_closed(&self) -> bool;

  /// Whether a reload was requested since the last call.
  fn take_reload(&self) -> bool;
}

/// Why a session stopped triggering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
  NoWorkflow,
  /// Every requested trigger ran.
  Exhausted,
  /// The control was disabled; later triggers were refused.
  Disabled,
  Closed,
}

#[derive(Debug)]
pub struct SessionReport {
  pub end: SessionEnd,
  pub triggers: u32,
  pub output: OutputState,
  pub style: ControlStyle,
}

pub async fn run_session<S: SessionSurface>(
  kv: &mut dyn KvStore,
  surface: &S,
  executor: &Executor,
  times: u32,
) -> SessionReport {
  let mut output = OutputState::restore(&*kv).await;
  let mut style = ControlStyle::default();

  let Some(workflow) = WorkflowStore::new(&mut *kv).load_workflow().await else {
    println!("{NO_WORKFLOW}");
    return SessionReport {
      end: SessionEnd::NoWorkflow,
      triggers: 0,
      output,
      style,
    };
  };

  terminal::render(workflow.display_label(), &output, &style);

  let mut end = SessionEnd::Exhausted;
  let mut triggers = 0;
  for _ in 0..times {
    if output.control_disabled {
      eprintln!("trigger is disabled");
      end = SessionEnd::Disabled;
      break;
    }

    let report = {
      let mut ctx = ExecutionContext::new(&mut *kv, &mut output, surface)
        .with_control(&mut style);
      executor.run(&workflow, &mut ctx).await
    };
    triggers += 1;

    let reloaded = surface.take_reload();
    if report.outcome == RunOutcome::Reloaded || reloaded {
      // A reload starts a fresh page: persisted sinks come back, the rest resets.
      output = OutputState::restore(&*kv).await;
      style = ControlStyle::default();
      info!(execution_id = %report.execution_id, "session_reloaded");
      eprintln!("reloaded");
    }

    terminal::render(workflow.display_label(), &output, &style);

    if surface.is_closed() {
      end = SessionEnd::Closed;
      break;
    }
  }

  SessionReport {
    end,
    triggers,
    output,
    style,
  }
}

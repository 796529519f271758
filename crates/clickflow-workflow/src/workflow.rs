use serde::{Deserialize, Serialize};

use clickflow_config::{ActionDef, ActionKind, WorkflowDef};

use crate::action::{Action, ActionPatch};
use crate::error::WorkflowError;

/// Label shown on the trigger control when none has been set.
pub const DEFAULT_TRIGGER_LABEL: &str = "Click Me";

/// An ordered list of actions plus the label of the control that runs them.
///
/// Order is execution order. Ids are unique within a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkflowDef", into = "WorkflowDef")]
pub struct Workflow {
  pub trigger_label: String,
  actions: Vec<Action>,
}

impl Workflow {
  /// Create an empty workflow.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn actions(&self) -> &[Action] {
    &self.actions
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  /// Get an action by id.
  pub fn get(&self, id: &str) -> Option<&Action> {
    self.actions.iter().find(|a| a.id == id)
  }

  pub fn position(&self, id: &str) -> Option<usize> {
    self.actions.iter().position(|a| a.id == id)
  }

  /// Label to render on the trigger control.
  pub fn display_label(&self) -> &str {
    if self.trigger_label.is_empty() {
      DEFAULT_TRIGGER_LABEL
    } else {
      &self.trigger_label
    }
  }

  /// Append a new action of `kind` with empty params.
  pub fn append(mut self, kind: ActionKind) -> Self {
    let id = self.fresh_id();
    self.actions.push(Action::new(id, kind));
    self
  }

  /// Drop the action with `id`. Absent ids leave the document unchanged.
  pub fn remove(mut self, id: &str) -> Self {
    self.actions.retain(|a| a.id != id);
    self
  }

  /// Apply `patch` to the action with `id`. Absent ids leave the document unchanged.
  pub fn update(mut self, id: &str, patch: ActionPatch) -> Self {
    if let Some(action) = self.actions.iter_mut().find(|a| a.id == id) {
      action.apply(patch);
    }
    self
  }

  /// Move the action at `from` so it ends up at `to`.
  ///
  /// Splice semantics: the action is taken out first, then inserted at `to`
  /// in the shortened list. A missing destination (a cancelled drag) is a
  /// no-op. A `from` past the end removes nothing; a `to` past the end appends.
  pub fn reorder(mut self, from: usize, to: Option<usize>) -> Self {
    let Some(to) = to else {
      return self;
    };
    if from >= self.actions.len() {
      return self;
    }

    let action = self.actions.remove(from);
    let to = to.min(self.actions.len());
    self.actions.insert(to, action);
    self
  }

  pub fn set_trigger_label(mut self, label: impl Into<String>) -> Self {
    self.trigger_label = label.into();
    self
  }

  fn fresh_id(&self) -> String {
    loop {
      let id = format!("id_{}", uuid::Uuid::new_v4().simple());
      if self.get(&id).is_none() {
        return id;
      }
    }
  }
}

impl TryFrom<WorkflowDef> for Workflow {
  type Error = WorkflowError;

  fn try_from(def: WorkflowDef) -> Result<Self, Self::Error> {
    let mut actions: Vec<Action> = Vec::with_capacity(def.actions.len());

    for action_def in def.actions {
      if action_def.id.is_empty() {
        return Err(WorkflowError::EmptyActionId);
      }
      if actions.iter().any(|a| a.id == action_def.id) {
        return Err(WorkflowError::DuplicateActionId(action_def.id));
      }
      actions.push(action_def.into());
    }

    Ok(Self {
      trigger_label: def.button_label,
      actions,
    })
  }
}

impl From<Workflow> for WorkflowDef {
  fn from(workflow: Workflow) -> Self {
    Self {
      button_label: workflow.trigger_label,
      actions: workflow.actions.into_iter().map(ActionDef::from).collect(),
    }
  }
}

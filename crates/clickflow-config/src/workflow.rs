use serde::{Deserialize, Serialize};

use crate::kind::ActionKind;
use crate::params::ActionParams;

/// One action as it appears in the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: ActionKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub config: Option<ActionParams>,
}

/// The persisted workflow record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDef {
  #[serde(default)]
  pub button_label: String,
  #[serde(default)]
  pub actions: Vec<ActionDef>,
}

//! Clickflow Store
//!
//! Commits the workflow document to durable storage at a save point and loads
//! it back verbatim before a run. The record lives under a fixed key next to
//! the persisted output sinks, all in the same [`KvStore`].

use clickflow_host_kv::KvStore;
use clickflow_workflow::Workflow;
use tracing::{debug, info, warn};

/// Key holding the serialized workflow record.
pub const CONFIGURATION_KEY: &str = "Configuration";
/// Key holding the last displayed text.
pub const OUTPUT_TEXT_KEY: &str = "OutputText";
/// Key holding the last displayed image URL.
pub const OUTPUT_IMAGE_KEY: &str = "OutputImage";

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("failed to serialize workflow: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Workflow persistence over a borrowed key-value store.
pub struct WorkflowStore<'a> {
  kv: &'a mut dyn KvStore,
}

impl<'a> WorkflowStore<'a> {
  pub fn new(kv: &'a mut dyn KvStore) -> Self {
    Self { kv }
  }

  /// Load the committed workflow.
  ///
  /// Returns `None` when nothing was saved or the record is malformed; a
  /// malformed record is treated as "no workflow configured".
  pub async fn load_workflow(&self) -> Option<Workflow> {
    let raw = self.kv.get(CONFIGURATION_KEY).await?;

    match serde_json::from_str::<Workflow>(&raw) {
      Ok(workflow) => {
        debug!(actions = workflow.len(), "workflow_loaded");
        Some(workflow)
      }
      Err(e) => {
        warn!(error = %e, "ignoring malformed workflow record");
        None
      }
    }
  }

  /// Commit `workflow`, replacing whatever was saved before.
  pub async fn save_workflow(&mut self, workflow: &Workflow) -> Result<(), StoreError> {
    let raw = serde_json::to_string(workflow)?;
    self.kv.set(CONFIGURATION_KEY, raw).await;
    info!(actions = workflow.len(), "workflow_saved");
    Ok(())
  }

  /// Wipe the whole store: workflow, output sinks and user keys alike.
  pub async fn clear_all(&mut self) {
    self.kv.clear().await;
    info!("storage_cleared");
  }
}

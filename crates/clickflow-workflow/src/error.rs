use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("duplicate action id: {0}")]
  DuplicateActionId(String),

  #[error("action id must not be empty")]
  EmptyActionId,
}

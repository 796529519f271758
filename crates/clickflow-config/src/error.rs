use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("unknown action kind: {0}")]
  UnknownActionKind(String),

  #[error("unknown parameter field: {0}")]
  UnknownParamField(String),
}

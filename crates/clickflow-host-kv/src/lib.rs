//! Clickflow Host KV
//!
//! Durable key-value storage used by actions (`setLocalStorage`,
//! `getLocalStorage`), by the output sinks that survive a reload, and by the
//! workflow store. Values are plain strings.

mod fs;
mod memory;

pub use fs::FsKvStore;
pub use memory::InMemoryKvStore;

use std::future::Future;
use std::pin::Pin;

/// Errors opening a durable store.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
  #[error("failed to read store file: {0}")]
  Io(#[from] std::io::Error),
}

/// Trait for string key-value storage.
///
/// Reads and writes are never locked; a single run owns the store while it
/// executes. The trait is async so file and networked backends fit.
pub trait KvStore: Send + Sync {
  /// Get a value by key.
  fn get(&self, key: &str) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>>;

  /// Set a value.
  fn set(&mut self, key: &str, value: String) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

  /// Delete a value.
  fn delete(&mut self, key: &str) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

  /// Remove every key.
  fn clear(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

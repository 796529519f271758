use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::KvStore;

/// In-memory KV store implementation.
///
/// Suitable for tests or a session that does not need to survive a restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKvStore {
  data: HashMap<String, String>,
}

impl InMemoryKvStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}

impl KvStore for InMemoryKvStore {
  fn get(&self, key: &str) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>> {
    let value = self.data.get(key).cloned();
    Box::pin(async move { value })
  }

  fn set(&mut self, key: &str, value: String) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    self.data.insert(key.to_string(), value);
    Box::pin(async {})
  }

  fn delete(&mut self, key: &str) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    self.data.remove(key);
    Box::pin(async {})
  }

  fn clear(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    self.data.clear();
    Box::pin(async {})
  }
}

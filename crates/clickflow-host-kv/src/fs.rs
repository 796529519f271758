use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::warn;

use crate::{KvError, KvStore};

/// KV store persisted as a single JSON object on disk.
///
/// The whole map is held in memory and written back after every change, so a
/// later process sees exactly what the previous one left behind. Writes go to
/// a sibling temp file that is renamed over the store, so an interrupted flush
/// never leaves a half-written map. Write failures are logged and the
/// in-memory value is kept.
#[derive(Debug)]
pub struct FsKvStore {
  path: PathBuf,
  data: BTreeMap<String, String>,
}

impl FsKvStore {
  /// Open the store at `path`. A missing file is an empty store.
  ///
  /// A file that is not a string map is moved aside to `<path>.corrupt` and
  /// the store starts empty.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
    let path = path.as_ref().to_path_buf();

    let data = match tokio::fs::read_to_string(&path).await {
      Ok(content) if content.trim().is_empty() => BTreeMap::new(),
      Ok(content) => match serde_json::from_str(&content) {
        Ok(data) => data,
        Err(e) => {
          let aside = sibling(&path, "corrupt");
          warn!(
            path = %path.display(),
            moved_to = %aside.display(),
            error = %e,
            "kv_store_corrupt"
          );
          tokio::fs::rename(&path, &aside).await?;
          BTreeMap::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => return Err(e.into()),
    };

    Ok(Self { path, data })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn flush(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    let contents = serde_json::to_string_pretty(&self.data);
    Box::pin(async move {
      let contents = match contents {
        Ok(contents) => contents,
        Err(e) => {
          warn!(path = %self.path.display(), error = %e, "kv_serialize_failed");
          return;
        }
      };

      if let Some(parent) = self.path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
          warn!(path = %self.path.display(), error = %e, "kv_flush_failed");
          return;
        }
      }

      let tmp = sibling(&self.path, "tmp");
      let written = match tokio::fs::write(&tmp, contents).await {
        Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
        Err(e) => Err(e),
      };
      if let Err(e) = written {
        warn!(path = %self.path.display(), error = %e, "kv_flush_failed");
      }
    })
  }
}

/// `storage.json` -> `storage.json.<suffix>`, in the same directory.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
  let mut name = path.file_name().unwrap_or_default().to_os_string();
  name.push(".");
  name.push(suffix);
  path.with_file_name(name)
}

impl KvStore for FsKvStore {
  fn get(&self, key: &str) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>> {
    let value = self.data.get(key).cloned();
    Box::pin(async move { value })
  }

  fn set(&mut self, key: &str, value: String) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    self.data.insert(key.to_string(), value);
    self.flush()
  }

  fn delete(&mut self, key: &str) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    self.data.remove(key);
    self.flush()
  }

  fn clear(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    self.data.clear();
    self.flush()
  }
}

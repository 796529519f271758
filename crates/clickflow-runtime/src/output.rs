use clickflow_host_kv::KvStore;
use clickflow_store::{OUTPUT_IMAGE_KEY, OUTPUT_TEXT_KEY};
use serde::{Deserialize, Serialize};

/// Output slots actions write into and the rendering surface reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputState {
  pub last_text: String,
  pub last_prompt_response: String,
  pub last_image_url: String,
  pub control_disabled: bool,
}

impl OutputState {
  /// Rebuild the persisted sinks at startup. The other fields start fresh.
  pub async fn restore(storage: &dyn KvStore) -> Self {
    Self {
      last_text: storage.get(OUTPUT_TEXT_KEY).await.unwrap_or_default(),
      last_image_url: storage.get(OUTPUT_IMAGE_KEY).await.unwrap_or_default(),
      ..Self::default()
    }
  }
}

//! Handles a dispatch needs to reach the outside world.

use async_trait::async_trait;
use clickflow_host_kv::KvStore;
use clickflow_store::{OUTPUT_IMAGE_KEY, OUTPUT_TEXT_KEY};

use crate::output::OutputState;

/// Scale applied by `increaseButtonSize`. Absolute, so repeats do not compound.
pub const SCALE_FACTOR: f32 = 1.2;

/// The control that starts a run, as seen by the two styling actions.
pub trait TriggerControl: Send + Sync {
  /// Set the visual scale transform.
  fn set_scale(&mut self, factor: f32);

  /// Set the background color (any CSS color string).
  fn set_background(&mut self, color: &str);
}

/// Plain record of the styling applied to a trigger control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlStyle {
  pub scale: f32,
  pub background: Option<String>,
}

impl Default for ControlStyle {
  fn default() -> Self {
    Self {
      scale: 1.0,
      background: None,
    }
  }
}

impl TriggerControl for ControlStyle {
  fn set_scale(&mut self, factor: f32) {
    self.scale = factor;
  }

  fn set_background(&mut self, color: &str) {
    self.background = Some(color.to_string());
  }
}

/// The hosting surface: modal interactions and window lifecycle.
#[async_trait]
pub trait Surface: Send + Sync {
  /// Show a blocking notification and return once it is dismissed.
  async fn notify(&self, message: &str);

  /// Ask for one line of input. `None` means the user cancelled.
  async fn prompt(&self, message: &str) -> Option<String>;

  /// Whether this surface was opened by another one and may close itself.
  fn opened_by_another(&self) -> bool;

  /// Close the surface.
  fn close(&self);

  /// Reload the surface. The current run does not continue afterwards.
  fn reload(&self);
}

/// Everything a single dispatch may touch.
pub struct ExecutionContext<'a> {
  /// Durable key-value storage, shared with the persisted sinks.
  pub storage: &'a mut dyn KvStore,
  pub output: &'a mut OutputState,
  /// Absent when the rendering surface has no live control; styling actions skip.
  pub control: Option<&'a mut dyn TriggerControl>,
  pub surface: &'a dyn Surface,
}

impl<'a> ExecutionContext<'a> {
  pub fn new(
    storage: &'a mut dyn KvStore,
    output: &'a mut OutputState,
    surface: &'a dyn Surface,
  ) -> Self {
    Self {
      storage,
      output,
      control: None,
      surface,
    }
  }

  pub fn with_control(mut self, control: &'a mut dyn TriggerControl) -> Self {
    self.control = Some(control);
    self
  }

  /// Text sink. Written back to storage so a reload shows it again.
  pub async fn write_text(&mut self, text: String) {
    self.output.last_text = text.clone();
    self.storage.set(OUTPUT_TEXT_KEY, text).await;
  }

  /// Image sink. Written back to storage so a reload shows it again.
  pub async fn write_image_url(&mut self, url: String) {
    self.output.last_image_url = url.clone();
    self.storage.set(OUTPUT_IMAGE_KEY, url).await;
  }

  pub fn write_prompt_response(&mut self, response: String) {
    self.output.last_prompt_response = response;
  }

  /// One-way: nothing in a run turns the control back on.
  pub fn disable_control(&mut self) {
    self.output.control_disabled = true;
  }
}

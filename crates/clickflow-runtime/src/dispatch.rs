//! Per-kind side effects.

use clickflow_workflow::{Action, Params};
use rand::Rng;
use tracing::debug;

use crate::context::{ExecutionContext, SCALE_FACTOR};

/// Shown by `alert` when no message is set.
pub const ALERT_FALLBACK: &str = "Alert!";
/// Prompt text used by `promptAndShow` when no message is set.
pub const PROMPT_FALLBACK: &str = "Enter your input:";
/// Shown by `closeWindow` when the surface cannot close itself.
pub const MANUAL_CLOSE_NOTICE: &str = "Please close it manually.";
/// Rendered by `getLocalStorage` for a key that holds nothing.
pub const MISSING_VALUE: &str = "null";

/// A blocking exchange with the user that a dispatch is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
  /// Show `message`; resumes once dismissed.
  Notification { message: String },
  /// Ask for a single line of input using `message` as the prompt.
  Prompt { message: String },
}

/// What happened when an action was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
  /// The effect is done.
  Completed,
  /// The effect needs the user first; finish it with [`Dispatcher::resolve`].
  Pending(Interaction),
  /// The host is restarting; nothing after this action may run.
  Terminate,
}

/// Maps an action to its effect on an [`ExecutionContext`].
///
/// Stateless: everything it touches comes in through the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
  pub fn new() -> Self {
    Self
  }

  /// Perform `action`'s effect.
  ///
  /// Missing required params and a missing control handle make the action a
  /// silent no-op; nothing here fails a run.
  pub async fn dispatch(&self, action: &Action, ctx: &mut ExecutionContext<'_>) -> Dispatched {
    match action.params() {
      Params::Alert { message } => Dispatched::Pending(Interaction::Notification {
        message: present(message).unwrap_or(ALERT_FALLBACK).to_string(),
      }),

      Params::ShowText { message } => {
        ctx
          .write_text(present(message).unwrap_or_default().to_string())
          .await;
        Dispatched::Completed
      }

      Params::ShowImage { image_url } => {
        ctx
          .write_image_url(present(image_url).unwrap_or_default().to_string())
          .await;
        Dispatched::Completed
      }

      Params::RefreshPage => {
        ctx.surface.reload();
        Dispatched::Terminate
      }

      Params::SetLocalStorage { key, value } => {
        match present(key) {
          Some(key) => {
            let value = present(value).unwrap_or_default().to_string();
            ctx.storage.set(key, value).await;
          }
          None => skipped(action, "missing key"),
        }
        Dispatched::Completed
      }

      Params::GetLocalStorage { key } => {
        match present(key) {
          Some(key) => {
            let value = ctx.storage.get(key).await;
            let value = value.as_deref().unwrap_or(MISSING_VALUE);
            ctx.write_text(format!("{key}: {value}")).await;
          }
          None => skipped(action, "missing key"),
        }
        Dispatched::Completed
      }

      Params::IncreaseButtonSize => {
        match ctx.control.as_deref_mut() {
          Some(control) => control.set_scale(SCALE_FACTOR),
          None => skipped(action, "no control handle"),
        }
        Dispatched::Completed
      }

      Params::CloseWindow => {
        if ctx.surface.opened_by_another() {
          ctx.surface.close();
          Dispatched::Completed
        } else {
          Dispatched::Pending(Interaction::Notification {
            message: MANUAL_CLOSE_NOTICE.to_string(),
          })
        }
      }

      Params::PromptAndShow { message } => Dispatched::Pending(Interaction::Prompt {
        message: present(message).unwrap_or(PROMPT_FALLBACK).to_string(),
      }),

      Params::ChangeButtonColor { color } => {
        match ctx.control.as_deref_mut() {
          Some(control) => {
            let color = present(color)
              .map(str::to_string)
              .unwrap_or_else(random_color);
            control.set_background(&color);
          }
          None => skipped(action, "no control handle"),
        }
        Dispatched::Completed
      }

      Params::DisableButton => {
        ctx.disable_control();
        Dispatched::Completed
      }
    }
  }

  /// Finish an action that returned [`Dispatched::Pending`].
  ///
  /// `response` is the user's input for a prompt, `None` when cancelled or
  /// when the interaction was a notification.
  pub async fn resolve(
    &self,
    action: &Action,
    response: Option<String>,
    ctx: &mut ExecutionContext<'_>,
  ) {
    if let Params::PromptAndShow { .. } = action.params() {
      match response.filter(|r| !r.is_empty()) {
        Some(response) => {
          ctx.write_text(format!("Response: {response}")).await;
          ctx.write_prompt_response(response);
        }
        None => skipped(action, "empty response"),
      }
    }
  }
}

/// Empty strings count as absent, the same as a missing field.
fn present(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}

fn random_color() -> String {
  let rgb: u32 = rand::rng().random_range(0..=0xFF_FFFF);
  format!("#{rgb:06x}")
}

fn skipped(action: &Action, reason: &str) {
  debug!(action_id = %action.id, kind = %action.kind, reason, "action_skipped");
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use async_trait::async_trait;
  use clickflow_host_kv::{InMemoryKvStore, KvStore};
  use clickflow_store::{OUTPUT_IMAGE_KEY, OUTPUT_TEXT_KEY};
  use clickflow_workflow::{ActionKind, ActionParams, ParamField};

  use super::*;
  use crate::context::{ControlStyle, Surface};
  use crate::output::OutputState;

  #[derive(Default)]
  struct StubSurface {
    opener: bool,
    closed: AtomicUsize,
    reloaded: AtomicUsize,
  }

  #[async_trait]
  impl Surface for StubSurface {
    async fn notify(&self, _message: &str) {}

    async fn prompt(&self, _message: &str) -> Option<String> {
      None
    }

    fn opened_by_another(&self) -> bool {
      self.opener
    }

    fn close(&self) {
      self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn reload(&self) {
      self.reloaded.fetch_add(1, Ordering::SeqCst);
    }
  }

  fn action(kind: ActionKind, params: ActionParams) -> Action {
    Action::new("a", kind).with_params(params)
  }

  fn msg(message: &str) -> ActionParams {
    ActionParams::new().with(ParamField::Message, message)
  }

  #[tokio::test]
  async fn test_alert_uses_fallback() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    let result = Dispatcher
      .dispatch(&action(ActionKind::Alert, msg("")), &mut ctx)
      .await;
    assert_eq!(
      result,
      Dispatched::Pending(Interaction::Notification {
        message: ALERT_FALLBACK.to_string()
      })
    );

    let result = Dispatcher
      .dispatch(&action(ActionKind::Alert, msg("hi")), &mut ctx)
      .await;
    assert_eq!(
      result,
      Dispatched::Pending(Interaction::Notification {
        message: "hi".to_string()
      })
    );
  }

  #[tokio::test]
  async fn test_show_text_and_image_persist() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    Dispatcher
      .dispatch(&action(ActionKind::ShowText, msg("done")), &mut ctx)
      .await;
    Dispatcher
      .dispatch(
        &action(
          ActionKind::ShowImage,
          ActionParams::new().with(ParamField::ImageUrl, "https://x/y.png"),
        ),
        &mut ctx,
      )
      .await;

    assert_eq!(output.last_text, "done");
    assert_eq!(output.last_image_url, "https://x/y.png");
    assert_eq!(kv.get(OUTPUT_TEXT_KEY).await.as_deref(), Some("done"));
    assert_eq!(kv.get(OUTPUT_IMAGE_KEY).await.as_deref(), Some("https://x/y.png"));
  }

  #[tokio::test]
  async fn test_show_text_without_message_clears() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState {
      last_text: "old".to_string(),
      ..OutputState::default()
    };
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    Dispatcher
      .dispatch(&action(ActionKind::ShowText, ActionParams::new()), &mut ctx)
      .await;
    assert_eq!(output.last_text, "");
  }

  #[tokio::test]
  async fn test_set_storage_requires_key() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    let result = Dispatcher
      .dispatch(
        &action(
          ActionKind::SetLocalStorage,
          ActionParams::new().with(ParamField::Value, "v"),
        ),
        &mut ctx,
      )
      .await;

    assert_eq!(result, Dispatched::Completed);
    assert!(kv.is_empty());
  }

  #[tokio::test]
  async fn test_set_storage_defaults_value() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    Dispatcher
      .dispatch(
        &action(
          ActionKind::SetLocalStorage,
          ActionParams::new().with(ParamField::Key, "k"),
        ),
        &mut ctx,
      )
      .await;

    assert_eq!(kv.get("k").await.as_deref(), Some(""));
  }

  #[tokio::test]
  async fn test_get_storage_missing_key_placeholder() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    Dispatcher
      .dispatch(
        &action(
          ActionKind::GetLocalStorage,
          ActionParams::new().with(ParamField::Key, "missing"),
        ),
        &mut ctx,
      )
      .await;

    assert_eq!(output.last_text, "missing: null");
  }

  #[tokio::test]
  async fn test_styling_without_control_is_noop() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    for kind in [ActionKind::IncreaseButtonSize, ActionKind::ChangeButtonColor] {
      let result = Dispatcher
        .dispatch(&action(kind, ActionParams::new()), &mut ctx)
        .await;
      assert_eq!(result, Dispatched::Completed);
    }
  }

  #[tokio::test]
  async fn test_styling_with_control() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut style = ControlStyle::default();

    {
      let mut ctx =
        ExecutionContext::new(&mut kv, &mut output, &surface).with_control(&mut style);
      let grow = action(ActionKind::IncreaseButtonSize, ActionParams::new());
      Dispatcher.dispatch(&grow, &mut ctx).await;
      Dispatcher.dispatch(&grow, &mut ctx).await;
      Dispatcher
        .dispatch(
          &action(
            ActionKind::ChangeButtonColor,
            ActionParams::new().with(ParamField::Color, "rebeccapurple"),
          ),
          &mut ctx,
        )
        .await;
    }

    assert_eq!(style.scale, SCALE_FACTOR);
    assert_eq!(style.background.as_deref(), Some("rebeccapurple"));
  }

  #[tokio::test]
  async fn test_random_color_format() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut style = ControlStyle::default();

    {
      let mut ctx =
        ExecutionContext::new(&mut kv, &mut output, &surface).with_control(&mut style);
      Dispatcher
        .dispatch(&action(ActionKind::ChangeButtonColor, ActionParams::new()), &mut ctx)
        .await;
    }

    let color = style.background.unwrap();
    assert_eq!(color.len(), 7);
    assert!(color.starts_with('#'));
    assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[tokio::test]
  async fn test_close_window() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let close = action(ActionKind::CloseWindow, ActionParams::new());

    let opened = StubSurface {
      opener: true,
      ..StubSurface::default()
    };
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &opened);
    assert_eq!(Dispatcher.dispatch(&close, &mut ctx).await, Dispatched::Completed);
    assert_eq!(opened.closed.load(Ordering::SeqCst), 1);

    let standalone = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &standalone);
    assert_eq!(
      Dispatcher.dispatch(&close, &mut ctx).await,
      Dispatched::Pending(Interaction::Notification {
        message: MANUAL_CLOSE_NOTICE.to_string()
      })
    );
    assert_eq!(standalone.closed.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_refresh_terminates() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    let result = Dispatcher
      .dispatch(&action(ActionKind::RefreshPage, ActionParams::new()), &mut ctx)
      .await;
    assert_eq!(result, Dispatched::Terminate);
    assert_eq!(surface.reloaded.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_prompt_resolution() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let prompt = action(ActionKind::PromptAndShow, ActionParams::new());

    {
      let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);
      assert_eq!(
        Dispatcher.dispatch(&prompt, &mut ctx).await,
        Dispatched::Pending(Interaction::Prompt {
          message: PROMPT_FALLBACK.to_string()
        })
      );

      Dispatcher.resolve(&prompt, None, &mut ctx).await;
      Dispatcher
        .resolve(&prompt, Some(String::new()), &mut ctx)
        .await;
    }
    assert_eq!(output, OutputState::default());

    {
      let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);
      Dispatcher
        .resolve(&prompt, Some("Ada".to_string()), &mut ctx)
        .await;
    }
    assert_eq!(output.last_text, "Response: Ada");
    assert_eq!(output.last_prompt_response, "Ada");
  }

  #[tokio::test]
  async fn test_disable_button() {
    let mut kv = InMemoryKvStore::new();
    let mut output = OutputState::default();
    let surface = StubSurface::default();
    let mut ctx = ExecutionContext::new(&mut kv, &mut output, &surface);

    Dispatcher
      .dispatch(&action(ActionKind::DisableButton, ActionParams::new()), &mut ctx)
      .await;
    assert!(output.control_disabled);
  }
}

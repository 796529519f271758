//! Terminal rendering surface.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use clickflow_runtime::{ControlStyle, OutputState, Surface};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

use crate::session::SessionSurface;

/// Renders notifications and prompts on stderr and reads answers from stdin.
pub struct TerminalSurface {
  input: Mutex<BufReader<Stdin>>,
  embedded: bool,
  closed: AtomicBool,
  reloaded: AtomicBool,
}

impl TerminalSurface {
  pub fn new(embedded: bool) -> Self {
    Self {
      input: Mutex::new(BufReader::new(tokio::io::stdin())),
      embedded,
      closed: AtomicBool::new(false),
      reloaded: AtomicBool::new(false),
    }
  }

  async fn read_line(&self) -> Option<String> {
    let mut line = String::new();
    let mut input = self.input.lock().await;
    match input.read_line(&mut line).await {
      Ok(0) => None,
      Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
      Err(e) => {
        warn!(error = %e, "failed to read from stdin");
        None
      }
    }
  }
}

async fn write_stderr(text: &str) {
  let mut stderr = tokio::io::stderr();
  let _ = stderr.write_all(text.as_bytes()).await;
  let _ = stderr.flush().await;
}

#[async_trait]
impl Surface for TerminalSurface {
  async fn notify(&self, message: &str) {
    write_stderr(&format!("[alert] {message} (press Enter) ")).await;
    self.read_line().await;
  }

  async fn prompt(&self, message: &str) -> Option<String> {
    write_stderr(&format!("[prompt] {message} ")).await;
    self.read_line().await.filter(|line| !line.is_empty())
  }

  fn opened_by_another(&self) -> bool {
    self.embedded
  }

  fn close(&self) {
    self.closed.store(true, Ordering::SeqCst);
  }

  fn reload(&self) {
    self.reloaded.store(true, Ordering::SeqCst);
  }
}

impl SessionSurface for TerminalSurface {
  fn is_closed(&self) -> bool {
    self.closed.load(Ordering::SeqCst)
  }

  fn take_reload(&self) -> bool {
    self.reloaded.swap(false, Ordering::SeqCst)
  }
}

/// Print what the rendering surface would show for the current session.
pub fn render(label: &str, output: &OutputState, style: &ControlStyle) {
  let mut control = format!("[ {label} ]");
  if output.control_disabled {
    control.push_str(" (disabled)");
  }
  if style.scale != 1.0 {
    control.push_str(&format!(" scale({})", style.scale));
  }
  if let Some(background) = &style.background {
    control.push_str(&format!(" background: {background}"));
  }
  println!("{control}");

  if !output.last_text.is_empty() {
    println!("{}", output.last_text);
  }
  if !output.last_image_url.is_empty() {
    println!("image: {}", output.last_image_url);
  }
}

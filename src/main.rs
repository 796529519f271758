use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use clickflow_config::{ActionKind, ActionParams, ParamField};
use clickflow_host_kv::FsKvStore;
use clickflow_runtime::{ControlStyle, Executor, ExecutorConfig, OutputState};
use clickflow_store::WorkflowStore;
use clickflow_workflow::{ActionPatch, Workflow};

mod session;
mod terminal;

use session::NO_WORKFLOW;
use terminal::TerminalSurface;

/// Clickflow - build a list of UI actions and replay it on a trigger
#[derive(Parser)]
#[command(name = "clickflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.clickflow)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Pause after each action, in milliseconds
  #[arg(long, global = true, default_value_t = 200)]
  delay_ms: u64,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the saved workflow and the persisted output
  Show,

  /// List action kinds and the params each one reads
  Kinds,

  /// Set the trigger label
  Label { label: String },

  /// Append an action
  Add { kind: ActionKind },

  /// Remove an action by id
  Remove { id: String },

  /// Change an action's kind and/or replace its params
  Update {
    id: String,
    #[arg(long)]
    kind: Option<ActionKind>,
    #[command(flatten)]
    params: ParamArgs,
  },

  /// Move the action at FROM to position TO
  Move { from: usize, to: usize },

  /// Trigger the saved workflow
  Run {
    /// How many times to trigger in this session
    #[arg(long, default_value_t = 1)]
    times: u32,

    /// Treat this session as opened by another program (closeWindow exits)
    #[arg(long)]
    embedded: bool,
  },

  /// Wipe all stored data
  Clear,
}

#[derive(clap::Args, Default)]
struct ParamArgs {
  #[arg(long)]
  message: Option<String>,
  #[arg(long)]
  text: Option<String>,
  #[arg(long)]
  image_url: Option<String>,
  #[arg(long)]
  key: Option<String>,
  #[arg(long)]
  value: Option<String>,
  #[arg(long)]
  color: Option<String>,
}

impl ParamArgs {
  /// `None` when no param flag was given, so the existing bag is kept.
  fn into_params(self) -> Option<ActionParams> {
    let mut params = ActionParams::new();
    params.set(ParamField::Message, self.message);
    params.set(ParamField::Text, self.text);
    params.set(ParamField::ImageUrl, self.image_url);
    params.set(ParamField::Key, self.key);
    params.set(ParamField::Value, self.value);
    params.set(ParamField::Color, self.color);
    (!params.is_empty()).then_some(params)
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
          "warn,clickflow=info,clickflow_runtime=info,clickflow_store=info".into()
        }),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".clickflow"),
  };
  let storage_path = data_dir.join("storage.json");
  let mut kv = FsKvStore::open(&storage_path)
    .await
    .with_context(|| format!("failed to open storage: {}", storage_path.display()))?;

  let Some(command) = cli.command else {
    println!("clickflow - use --help to see available commands");
    return Ok(());
  };

  match command {
    Commands::Show => show(&mut kv).await,
    Commands::Kinds => {
      list_kinds();
      Ok(())
    }
    Commands::Label { label } => edit(&mut kv, |w| Ok(w.set_trigger_label(label))).await,
    Commands::Add { kind } => {
      edit(&mut kv, |w| {
        let w = w.append(kind);
        if let Some(action) = w.actions().last() {
          println!("{}", action.id);
        }
        Ok(w)
      })
      .await
    }
    Commands::Remove { id } => {
      edit(&mut kv, |w| {
        if w.get(&id).is_none() {
          bail!("no action with id '{id}'");
        }
        Ok(w.remove(&id))
      })
      .await
    }
    Commands::Update { id, kind, params } => {
      let patch = ActionPatch {
        kind,
        params: params.into_params(),
      };
      edit(&mut kv, |w| {
        if w.get(&id).is_none() {
          bail!("no action with id '{id}'");
        }
        Ok(w.update(&id, patch))
      })
      .await
    }
    Commands::Move { from, to } => {
      edit(&mut kv, |w| {
        if from >= w.len() || to >= w.len() {
          bail!("positions must be below {}", w.len());
        }
        Ok(w.reorder(from, Some(to)))
      })
      .await
    }
    Commands::Run { times, embedded } => {
      let config = ExecutorConfig {
        action_delay: Duration::from_millis(cli.delay_ms),
      };
      let surface = TerminalSurface::new(embedded);
      let report = session::run_session(&mut kv, &surface, &Executor::new(config), times).await;
      tracing::info!(triggers = report.triggers, end = ?report.end, "session_finished");
      Ok(())
    }
    Commands::Clear => {
      WorkflowStore::new(&mut kv).clear_all().await;
      println!("Local storage cleared!");
      Ok(())
    }
  }
}

/// Load the saved workflow (or an empty one), apply `op`, and commit it.
async fn edit(kv: &mut FsKvStore, op: impl FnOnce(Workflow) -> Result<Workflow>) -> Result<()> {
  let mut store = WorkflowStore::new(kv);
  let workflow = store.load_workflow().await.unwrap_or_default();
  let workflow = op(workflow)?;
  store
    .save_workflow(&workflow)
    .await
    .context("failed to save workflow")?;
  Ok(())
}

async fn show(kv: &mut FsKvStore) -> Result<()> {
  let output = OutputState::restore(&*kv).await;
  let store = WorkflowStore::new(kv);

  match store.load_workflow().await {
    Some(workflow) => {
      println!("{}", serde_json::to_string_pretty(&workflow)?);
      terminal::render(workflow.display_label(), &output, &ControlStyle::default());
    }
    None => println!("{NO_WORKFLOW}"),
  }
  Ok(())
}

fn list_kinds() {
  for kind in ActionKind::ALL {
    let fields: Vec<String> = kind
      .fields()
      .iter()
      .map(|spec| {
        if spec.required {
          format!("{}*", spec.field)
        } else {
          spec.field.to_string()
        }
      })
      .collect();
    println!("{:<20} {:<22} {}", kind.as_str(), kind.label(), fields.join(", "));
  }
}

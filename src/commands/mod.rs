pub mod add;
pub mod delete;
pub mod init;
pub mod list;
pub mod shell;
pub mod toggle;

use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::controller::{ControllerSettings, TaskListController};
use crate::libs::messages::Message;
use crate::libs::persistence::PersistenceAdapter;
use crate::libs::storage::{FileStore, MemoryStore};
use crate::libs::view::{TaskView, TerminalView};
use crate::msg_warning;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Add a task", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "Mark a task complete or incomplete", arg_required_else_help = true)]
    Toggle(toggle::ToggleArgs),
    #[command(about = "Delete a task", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Show the task list")]
    List(list::ListArgs),
    #[command(about = "Start an interactive session")]
    Shell,
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Add(args) => add::cmd(args),
            Commands::Toggle(args) => toggle::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Shell => shell::cmd(),
            Commands::Init(args) => init::cmd(args),
        }
    }
}

/// Reads the configuration, falling back to defaults when it is unreadable.
fn load_config() -> Config {
    Config::read().unwrap_or_else(|e| {
        msg_warning!(Message::ConfigLoadFailed(e.to_string()));
        Config::default()
    })
}

/// Builds a controller over the configured durable store and a fresh session store.
pub fn open<V: TaskView>(config: &Config, view: V) -> TaskListController<V> {
    let persistence = PersistenceAdapter::new(
        Box::new(FileStore::new(config.storage.data_storage())),
        Box::new(MemoryStore::new()),
        &config.storage.key,
    );
    TaskListController::initialize(persistence, view, Box::new(SystemClock), ControllerSettings::from(&config.notices))
}

/// Controller for one-shot commands: the initial frame is not printed, only
/// the notice it left behind, so the command's own render is the only list shown.
fn open_for_action() -> TaskListController<TerminalView> {
    let config = load_config();
    let mut controller = open(&config, TerminalView::muted());
    controller.view_mut().set_muted(false);

    let pending = controller.notice().cloned();
    if let Some(notice) = pending {
        controller.view_mut().draw_notice(Some(&notice));
    }
    controller
}

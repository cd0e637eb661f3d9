use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sb", about = concat!("siteboard v", env!("CARGO_PKG_VERSION"), " - offline project and task board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the stored data
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Config file (default: $XDG_CONFIG_HOME/siteboard/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save your nickname
    Login(LoginArgs),
    /// Show the saved nickname
    Whoami,
    /// List projects
    Projects,
    /// Create a project
    Create(CreateArgs),
    /// Delete all projects
    Clear,
    /// Show a project and its pending tasks
    Show(ShowArgs),
    /// Add or edit tasks
    Task(TaskCmd),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Nickname to save
    pub nickname: String,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Project name
    pub name: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project ID
    pub id: String,
}

// ---------------------------------------------------------------------------
// Task subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a project
    Add(TaskAddArgs),
    /// Change an existing task's description and image
    Edit(TaskEditArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Project ID
    pub project: String,
    /// Task description
    pub description: String,
    /// Image reference
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct TaskEditArgs {
    /// Project ID
    pub project: String,
    /// Task ID
    pub task: String,
    /// New description
    pub description: String,
    /// Replace the image reference (omit to keep the current one)
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,
    /// Remove the image reference
    #[arg(long)]
    pub clear_image: bool,
}

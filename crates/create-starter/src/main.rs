//! create-starter - Project scaffolding for starter web apps

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use scaffolder_core::templates::CATALOG_FILE;
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::ProductConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Starter product configuration
#[derive(Clone)]
pub struct StarterConfig;

impl ProductConfig for StarterConfig {
    fn name(&self) -> &'static str {
        "create-starter"
    }

    fn display_name(&self) -> &'static str {
        "create-starter"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding starter web projects from local templates"
    }

    fn template_root_env(&self) -> &'static str {
        "CREATE_STARTER_TEMPLATES"
    }

    fn default_template_root(&self) -> PathBuf {
        // Installed layout: templates/ next to the binary
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
            .filter(|dir| dir.join(CATALOG_FILE).is_file());

        beside_exe.unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates"))
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-starter")]
#[command(about = "CLI for scaffolding starter web projects from local templates")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
    /// List the templates available in the template directory
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project directory to create
    pub directory: Option<String>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Remove existing files in a non-empty target directory without asking
    #[arg(long)]
    pub overwrite: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            directory: args.directory,
            overwrite: args.overwrite,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    tracing::debug!("Parsed CLI arguments: {:?}", args);

    let config = StarterConfig;

    match args.command {
        Some(Command::List(list_args)) => {
            scaffolder_core::tui::list_templates(&config, list_args.template_dir)
        }
        Some(Command::Create(create_args)) => {
            let result = scaffolder_core::run(&config, create_args.into());

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = scaffolder_core::run(&config, CreateArgs::default());
            let _ = console::Term::stderr().show_cursor();
            result
        }
    }
}

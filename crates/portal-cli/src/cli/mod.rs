use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{BrowseArgs, Commands, ItemArgs, SearchArgs};

/// Top-level CLI parser for the `portal` binary.
#[derive(Debug, Parser)]
#[command(name = "portal", version, about = "Portal - faceted search from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered over ~/.config/portal and .portal discovery
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Keep HTML markup in formatted values
    #[arg(long, global = true)]
    pub html: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
            html: self.html,
        }
    }
}

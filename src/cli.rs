//! CLI argument parsing module for lib-check

use clap::{Args, Parser, Subcommand};

/// Watch npm packages and see what changed since you last looked
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lib-check",
    version,
    about = "Watch npm packages for new releases"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    // Output options
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable quiet mode - no spinners
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show or change the user configuration
    Config(ConfigArgs),

    /// Add packages to the watch list
    Add {
        /// npm package names
        #[arg(required = true)]
        packages: Vec<String>,

        /// Do not check that the package exists on the registry
        #[arg(long)]
        skip_verify: bool,
    },

    /// Remove a package from the watch list
    Remove {
        package: String,
    },

    /// List the watch list
    List,

    /// Search the npm registry
    Search {
        /// Search text (at least 3 characters)
        text: String,
    },

    /// Check the latest versions of all watched packages
    Check {
        /// Show dependency details and a watch-list summary
        #[arg(short, long)]
        detailed: bool,
    },

    /// Record the current latest versions as the comparison baseline
    SaveVersions,

    /// List preset categories and their presets
    Preset {
        /// Only show this category, including package lists
        category: Option<String>,
    },

    /// Show information about the packages of a preset
    Preview {
        category: String,
        preset: String,

        /// Show dependency details and a preset summary
        #[arg(short, long)]
        detailed: bool,

        /// Add every package of the preset to the watch list
        #[arg(long)]
        add: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct ConfigArgs {
    /// Show the current configuration
    #[arg(long)]
    pub show: bool,

    /// Set or change the user ID; the watch list moves with it
    #[arg(long, value_name = "ID")]
    pub change: Option<String>,

    /// Delete all stored configuration
    #[arg(long)]
    pub reset: bool,
}

impl CliArgs {
    /// Whether spinners should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing filter directive for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

use crate::config::toml_config::StudioConfig;
use crate::domain::model::{Direction, Template};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "wiki-studio")]
#[command(about = "Draft encyclopedia-style articles section by section")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the draft slot (overrides the settings file)
    #[arg(long, global = true)]
    pub storage_dir: Option<String>,

    /// Article template (overrides the settings file)
    #[arg(short, long, value_enum, global = true)]
    pub template: Option<Template>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the form: subject and sections
    Show,
    /// Set the article subject
    Subject { name: String },
    /// Add an optional section from the catalog
    Add { name: String },
    /// Remove an optional section by id
    Remove { id: String },
    /// Move an optional section one place up or down
    Move {
        index: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Replace a section's content
    Edit {
        id: String,
        /// New content; read from --file when omitted
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<String>,
    },
    /// List catalog sections that can still be added
    Available,
    /// Print the article preview
    Preview,
    /// Save the current draft again
    Save,
    /// Replace the draft with an empty one and save it
    Reset,
    /// List the article templates
    Templates,
}

impl Command {
    /// Whether the command changes the draft and therefore ends with a save.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Subject { .. }
                | Command::Add { .. }
                | Command::Remove { .. }
                | Command::Move { .. }
                | Command::Edit { .. }
                | Command::Save
                | Command::Reset
        )
    }
}

impl CliConfig {
    /// Loads the settings file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<StudioConfig> {
        let mut config = match &self.config {
            Some(path) => StudioConfig::from_file(path)?,
            None => StudioConfig::default(),
        };

        if let Some(dir) = &self.storage_dir {
            config.storage.directory = dir.clone();
        }
        if let Some(template) = self.template {
            config.set_template(template);
        }

        Ok(config)
    }
}

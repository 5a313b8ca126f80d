pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};

#[cfg(feature = "cli")]
pub mod cli {
    use clap::{Parser, Subcommand, ValueEnum};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "person-admin")]
    #[command(about = "Display formatting and list queries for person records")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Mask a phone number as (DD) DDDDD-DDDD
        Phone { raw: String },

        /// Format a date as DD/MM/YYYY
        Date { value: String },

        /// Print a value, or the fallback when it is empty-like
        Display {
            value: String,
            #[arg(long, default_value = "-")]
            fallback: String,
        },

        /// Build the person list URL from validated query parameters
        Query {
            #[arg(long)]
            name: Option<String>,
            #[arg(long)]
            sort_by: Option<String>,
            #[arg(long, allow_hyphen_values = true)]
            page: Option<i64>,
            #[arg(long, allow_hyphen_values = true)]
            limit: Option<i64>,
        },

        /// Render a JSON list of persons (or a paginated response) as a table
        Render {
            #[arg(short, long)]
            input: PathBuf,
            #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
            format: OutputFormat,
        },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Table,
        Csv,
        Tsv,
    }

}

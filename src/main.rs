use anyhow::Context;
use clap::Parser;
use person_admin::core::{
    date::format_date,
    empty::display_or,
    phone::format_phone,
    query::ListQuery,
    table::{person_columns, ExportFormat, TableView},
};
use person_admin::utils::{
    logger::{self, LogFormat},
    validation::Validate,
};
use person_admin::{AppConfig, CliConfig, Command, OutputFormat, PaginatedResponse, Person};
use std::path::Path;

fn main() {
    let config = CliConfig::parse();

    let app_config = match load_app_config(config.config.as_deref()) {
        Ok(app_config) => app_config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(
        config.verbose,
        LogFormat::for_environment(app_config.app.production),
    );
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    tracing::debug!(
        "Environment '{}' (production: {})",
        app_config.app.environment_name,
        app_config.app.production
    );

    match run(config.command, &app_config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("Command failed: {:#}", e);
            eprintln!("❌ {}", app_config.api.error_message);
            eprintln!("   {:#}", e);
            std::process::exit(2);
        }
    }
}

fn load_app_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let app_config = AppConfig::load(path).context("failed to load configuration")?;
    app_config.validate().context("invalid configuration")?;
    Ok(app_config)
}

fn run(command: Command, app_config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Phone { raw } => Ok(format_phone(Some(raw.as_str()))),
        Command::Date { value } => Ok(format_date(value)),
        Command::Display { value, fallback } => Ok(display_or(value, &fallback)),
        Command::Query {
            name,
            sort_by,
            page,
            limit,
        } => {
            let query = ListQuery {
                name,
                sort_by,
                page,
                limit,
            };
            Ok(query.to_url(app_config.api_url())?.to_string())
        }
        Command::Render { input, format } => {
            let persons = read_persons(&input)?;
            tracing::info!("Rendering {} persons from {}", persons.len(), input.display());

            let table = TableView::new(person_columns());
            let output = match format {
                OutputFormat::Table => table.to_text(&persons),
                OutputFormat::Csv => table.export(&persons, ExportFormat::Csv)?,
                OutputFormat::Tsv => table.export(&persons, ExportFormat::Tsv)?,
            };
            Ok(output.trim_end().to_string())
        }
    }
}

/// Accepts either a bare array of persons or a paginated list response.
fn read_persons(path: &Path) -> anyhow::Result<Vec<Person>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let persons = if json.is_array() {
        serde_json::from_value(json)?
    } else {
        let page: PaginatedResponse<Person> = serde_json::from_value(json)?;
        tracing::debug!(
            "Page {} of a listing with {} persons ({} per page)",
            page.page,
            page.count,
            page.limit
        );
        page.results
    };
    Ok(persons)
}

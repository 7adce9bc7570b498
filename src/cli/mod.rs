//! CLI command implementations for scorecard.
//!
//! Provides subcommand handlers for:
//! - `scorecard predict ...` — submit the form from the terminal
//! - `scorecard stats` — render the statistics container
//! - `scorecard history` — list stored predictions
//! - `scorecard health` — check config, service reachability and the log
//! - `scorecard config show|init|set|reset` — configuration management

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::types::{PredictionRecord, ServiceInfo};
use crate::api::{HttpClient, PredictionService};
use crate::config;
use crate::controller::FormController;
use crate::form::FormValues;
use crate::logger::{self, Logger};
use crate::page::TerminalPage;
use crate::render::format_number;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

fn terminal_controller(out: Option<PathBuf>) -> FormController<HttpClient, TerminalPage> {
    let cfg = config::load();
    let client = HttpClient::from_config(&cfg.api);
    let page = TerminalPage::new(out, Logger::from_config(&cfg.logging));
    FormController::new(client, page)
}

// ---------------------------------------------------------------------------
// scorecard predict
// ---------------------------------------------------------------------------

/// Submit one set of form values.
///
/// Exits non-zero when no prediction was rendered; the reason has already
/// been shown as an alert.
pub fn run_predict(values: FormValues, out: Option<PathBuf>) -> Result<ExitCode> {
    let mut controller = terminal_controller(out);
    match controller.submit_prediction(&values) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

// ---------------------------------------------------------------------------
// scorecard stats
// ---------------------------------------------------------------------------

/// Render the statistics container once, as on page load.
pub fn run_stats(out: Option<PathBuf>) -> Result<ExitCode> {
    let mut controller = terminal_controller(out);
    match controller.refresh_statistics() {
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::FAILURE),
    }
}

// ---------------------------------------------------------------------------
// scorecard history
// ---------------------------------------------------------------------------

/// List every prediction the service has stored.
pub fn run_history(format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let client = HttpClient::from_config(&cfg.api);

    let response = client
        .predictions()
        .with_context(|| format!("could not fetch predictions from {}", client.base_url()))?;

    if !response.success {
        anyhow::bail!(
            "service error: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }

    if response.predictions.is_empty() {
        println!("{}", "No predictions recorded yet.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_history_json(&response.predictions)?,
        OutputFormat::Csv => print_history_csv(&response.predictions),
        OutputFormat::Table => print_history_table(&response.predictions),
    }

    Ok(())
}

fn print_history_table(records: &[PredictionRecord]) {
    println!("{}", "Prediction History".bold().cyan());
    println!("{}", "=".repeat(78));
    println!(
        "  {:<20} {:<12} {:>6} {:>5} {:>5} {:>5} {:>6} {:>6} Category",
        "Timestamp", "Student", "Att.", "T1", "T2", "Asg.", "Hours", "Score"
    );
    println!("  {}", "-".repeat(76));

    for (i, r) in records.iter().enumerate() {
        let line = format!(
            "  {:<20} {:<12} {:>6} {:>5} {:>5} {:>5} {:>6} {:>6} {}",
            truncate(r.timestamp.as_deref().unwrap_or("-"), 20),
            truncate(&r.student_label(), 12),
            opt_number(r.attendance),
            opt_number(r.test1),
            opt_number(r.test2),
            opt_number(r.assignment),
            opt_number(r.study_hours),
            opt_number(r.predicted_score),
            r.category.as_deref().unwrap_or("-"),
        );

        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!();
    println!("  {} {}", "Total:".bold(), records.len());
}

fn print_history_json(records: &[PredictionRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn print_history_csv(records: &[PredictionRecord]) {
    println!(
        "timestamp,student_id,attendance,test1,test2,assignment,study_hours,predicted_score,category"
    );
    for r in records {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            csv_field(r.timestamp.as_deref().unwrap_or("")),
            csv_field(&r.student_label()),
            opt_csv(r.attendance),
            opt_csv(r.test1),
            opt_csv(r.test2),
            opt_csv(r.assignment),
            opt_csv(r.study_hours),
            opt_csv(r.predicted_score),
            csv_field(r.category.as_deref().unwrap_or("")),
        );
    }
}

// ---------------------------------------------------------------------------
// scorecard health
// ---------------------------------------------------------------------------

/// Check config files, service reachability and the client log.
pub fn run_health() -> Result<ExitCode> {
    println!("{}", "scorecard Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.scorecard/config.toml found"
        } else {
            "not found (run `scorecard config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".scorecard.toml found"
        } else {
            "none (optional)"
        },
    );

    let cfg = config::load();
    let client = HttpClient::from_config(&cfg.api);
    let reachable = match client.service_info() {
        Ok(info) => {
            print_health_item(
                "Prediction service",
                true,
                &format!("reachable at {}", client.base_url()),
            );
            print_service_info(&info);
            true
        }
        Err(e) => {
            print_health_item("Prediction service", false, &e.to_string());
            false
        }
    };

    let logger = Logger::from_config(&cfg.logging);
    match logger.path() {
        Some(path) if path.exists() => {
            let entries = logger::read_entries(path);
            let errors = entries
                .iter()
                .filter(|e| e.level == logger::Level::Error)
                .count();
            print_health_item(
                "Client log",
                true,
                &format!("{} ({} entries, {} errors)", path.display(), entries.len(), errors),
            );
        }
        Some(path) => print_health_item(
            "Client log",
            true,
            &format!("{} (empty)", path.display()),
        ),
        None => print_health_item("Client log", true, "disabled"),
    }

    Ok(if reachable {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_service_info(info: &ServiceInfo) {
    if !info.model.is_empty() {
        print_health_item("Model", true, &info.model);
    }
    if !info.status.is_empty() {
        print_health_item("Status", info.status == "operational", &info.status);
    }
    for (route, description) in info.endpoints.iter() {
        println!("      {} {}", route.bold(), description.dimmed());
    }
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let mark = if ok { "✓".green() } else { "✗".red() };
    println!("  {mark} {:<20} {detail}", name.bold());
}

// ---------------------------------------------------------------------------
// scorecard config
// ---------------------------------------------------------------------------

/// Print the effective configuration.
pub fn run_config_show() -> Result<()> {
    println!("{}", "Effective configuration".bold().cyan());
    println!("{}", config::show_effective_config()?);
    Ok(())
}

/// Write the annotated default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Created".green(), path.display());
    Ok(())
}

/// Set one dotted key in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} {key} = {value}", "Set".green());
    Ok(())
}

/// Reset the global config file to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} {}", "Reset".green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn opt_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

fn opt_csv(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

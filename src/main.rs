use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use scorecard::form::FormValues;
use scorecard::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "scorecard")]
#[command(about = "Client for the student performance prediction service")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit student metrics and render the prediction and statistics
    Predict {
        /// Student identifier
        #[arg(long, default_value = "")]
        student_id: String,
        /// Attendance percentage
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        attendance: String,
        /// Internal Test 1 mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        test1: String,
        /// Internal Test 2 mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        test2: String,
        /// Assignment mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        assignment: String,
        /// Study hours per day
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        study_hours: String,
        /// Write container fragments to DIR/<container>.html instead of stdout
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Render the statistics container
    Stats {
        /// Write the fragment to DIR/statistics.html instead of stdout
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// List every stored prediction
    History {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check config, service reachability and the client log
    Health,
    /// Serve the prediction form page locally
    Serve {
        /// Bind address (default from config: 127.0.0.1:8088)
        #[arg(long)]
        addr: Option<String>,
        /// Open the page in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the default config file to ~/.scorecard/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.base_url http://host:5000`
    Set { key: String, value: String },
    /// Reset the global config file to defaults
    Reset,
}

fn main() -> Result<ExitCode> {
    let app = App::parse();

    match app.command {
        Commands::Predict {
            student_id,
            attendance,
            test1,
            test2,
            assignment,
            study_hours,
            out,
        } => {
            let values = FormValues {
                student_id,
                attendance,
                test1,
                test2,
                assignment,
                study_hours,
            };
            cli::run_predict(values, out)
        }
        Commands::Stats { out } => cli::run_stats(out),
        Commands::History { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(fmt).map(|()| ExitCode::SUCCESS)
        }
        Commands::Health => cli::run_health(),
        Commands::Serve { addr, open } => {
            let cfg = config::load();
            let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
            web::serve(&addr, &cfg, open).map(|()| ExitCode::SUCCESS)
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => cli::run_config_show(),
                ConfigAction::Init { force } => cli::run_config_init(force),
                ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
                ConfigAction::Reset => cli::run_config_reset(),
            }?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

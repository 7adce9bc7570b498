//! Local web host for the prediction form.
//!
//! Serves the form page over HTTP (sync, via `tiny_http`):
//! - `GET /` — page load: statistics are fetched and the page rendered
//! - `POST /predict` — form submission (`application/x-www-form-urlencoded`)
//!
//! Every request renders a fresh page. A submission fetches statistics
//! exactly once: after the prediction, or after the failure.
//!
//! Launched via `scorecard serve` (default: `http://127.0.0.1:8088`).

mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::{HttpClient, PredictionService};
use crate::config::ScorecardConfig;
use crate::controller::FormController;
use crate::form::FormValues;
use crate::logger::Logger;
use crate::page::MemoryPage;

pub use frontend::render_page;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web host on `addr`.
///
/// Blocks the current thread. Requests are handled sequentially, so
/// overlapping submissions from one browser are served one after another.
pub fn serve(addr: &str, config: &ScorecardConfig, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let client = HttpClient::from_config(&config.api);
    let logger = Logger::from_config(&config.logging);

    println!("scorecard form running at http://{addr}");
    println!("Prediction service: {}", client.base_url());
    println!("Press Ctrl+C to stop.\n");
    logger.info(&format!(
        "web host started on {addr} for {}",
        client.base_url()
    ));

    if open {
        let url = format!("http://{addr}");
        if let Err(e) = open_browser(&url) {
            logger.error(&format!("{e:#}"));
        }
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Post) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let reply = dispatch(&client, &logger, &method, &url, body.as_deref());
        let status = reply.status;
        let _ = request.respond(reply.into_response());

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// A rendered reply, before it is turned into a `tiny_http` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: "text/plain; charset=utf-8",
            body: "not found".to_string(),
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let response =
            Response::from_data(self.body.into_bytes()).with_status_code(StatusCode(self.status));
        match Header::from_bytes("Content-Type", self.content_type) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

/// Dispatch an incoming request to the matching page handler.
pub fn dispatch<S: PredictionService>(
    service: &S,
    logger: &Logger,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Reply {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") | (&Method::Get, "/predict") => {
            load_page(service, logger)
        }
        (&Method::Post, "/predict") => submit_page(service, logger, body.unwrap_or("")),
        _ => Reply::not_found(),
    }
}

/// Page load: refresh statistics and render an empty form.
fn load_page<S: PredictionService>(service: &S, logger: &Logger) -> Reply {
    let mut controller = FormController::new(service, MemoryPage::with_logger(logger.clone()));
    controller.on_load();

    let values = FormValues::default();
    Reply::html(render_page(&values, controller.page()))
}

/// Form submission: one prediction attempt.
///
/// A successful submission refreshes statistics itself; after a failure
/// they are fetched once so the page still shows them.
fn submit_page<S: PredictionService>(service: &S, logger: &Logger, body: &str) -> Reply {
    let values = FormValues::from_pairs(url::form_urlencoded::parse(body.as_bytes()));

    let mut controller = FormController::new(service, MemoryPage::with_logger(logger.clone()));
    // Outcome is already on the page as a render or an alert
    if controller.submit_prediction(&values).is_err() {
        controller.refresh_statistics();
    }

    Reply::html(render_page(&values, controller.page()))
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

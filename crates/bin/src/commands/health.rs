//! `turnstile health`: ask a running server whether its user store is reachable.

use std::time::Duration;

use serde::Deserialize;

use crate::cli::HealthArgs;

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
struct HealthReport {
    status: String,
    backend: String,
}

/// Accept either a server base URL or the health endpoint itself.
fn health_url(url: &str) -> String {
    let base = url.trim_end_matches('/');
    if base.ends_with("/health") {
        base.to_string()
    } else {
        format!("{base}/health")
    }
}

/// One-line verdict. `Err` means the probe should exit non-zero.
fn verdict(report: &HealthReport) -> Result<String, String> {
    match report.status.as_str() {
        "healthy" => Ok(format!("healthy: {} store reachable", report.backend)),
        "degraded" => Err(format!(
            "degraded: {} store unreachable, accounts cannot be read or written",
            report.backend
        )),
        other => Err(format!("unhealthy: unexpected status {other:?}")),
    }
}

pub async fn run(args: &HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(&args.url);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let outcome = match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<HealthReport>().await {
                Ok(report) => verdict(&report),
                Err(e) => Err(format!("unhealthy: unreadable health report: {e}")),
            }
        }
        Ok(response) => Err(format!("unhealthy: HTTP {}", response.status())),
        Err(e) => Err(format!("unhealthy: no answer from {url}: {e}")),
    };

    match outcome {
        Ok(line) => {
            println!("{line}");
            Ok(())
        }
        Err(line) => {
            eprintln!("{line}");
            std::process::exit(1);
        }
    }
}

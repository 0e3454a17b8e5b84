//! # Structured Logging Module
//!
//! Environment-aware structured logging for hydration diagnostics. Output goes
//! to the console, formatted as JSON when `HYDRATOR_LOG_FORMAT=json`.

use crate::constants::env::{ENVIRONMENT, FALLBACK_ENVIRONMENT, LOG_FORMAT};
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// `RUST_LOG` takes precedence over the environment-derived level. Calling
/// this more than once, or after another subscriber was installed, is a no-op.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let layer = if use_json_format() {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - keeping existing one");
            return;
        }

        tracing::info!(
            environment = %environment,
            json = use_json_format(),
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(ENVIRONMENT)
        .or_else(|_| std::env::var(FALLBACK_ENVIRONMENT))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        "test" | "development" => "debug".to_string(),
        _ => "debug".to_string(),
    }
}

fn use_json_format() -> bool {
    std::env::var(LOG_FORMAT).is_ok_and(|format| format.eq_ignore_ascii_case("json"))
}

/// Log structured data for one hydration call
pub fn log_hydration_operation(
    operation: &str,
    entity: &str,
    depth: Option<u32>,
    status: &str,
    duration_us: Option<u64>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        entity = %entity,
        depth = depth,
        status = %status,
        duration_us = duration_us,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "HYDRATION_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "HYDRATION_ERROR"
    );
}

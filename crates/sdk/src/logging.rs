// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging initialization for applications embedding the SDK
//!
//! The SDK itself only emits `tracing` events. Applications that do not set
//! up their own subscriber can call [`init_logging`] once at startup.
//!
//! # Configuration
//!
//! - `RUST_LOG`: log level filter (default: `info`), e.g. `RUST_LOG=yst_sdk=debug`
//! - `LOG_DIR`: root directory for log files (default: `{project_root}/logs`).
//!   Files are written under `{LOG_DIR}/yst-sdk/`.
//! - `LOG_TO_CONSOLE`: `true`, `1` or `yes` to also log to stderr (default: `false`)
//!
//! # Log File Format
//!
//! - One file per day (UTC): `yst-sdk.YYYY-MM-DD.log`
//! - UTC RFC 3339 timestamp, thread ID, level, target, message
//! - No ANSI colors in files
//!
//! Key material and signatures are never logged.

use std::{
	env,
	path::{Path, PathBuf},
	sync::OnceLock,
};

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::{
	non_blocking,
	rolling::{self, Rotation},
};
use tracing_subscriber::{
	EnvFilter, fmt, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

use crate::config::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_TO_CONSOLE, LOG_COMPONENT_NAME};

// Keeps the background writer alive until process exit
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Nearest ancestor of the working directory holding a workspace `Cargo.toml`,
/// else the nearest one holding any `Cargo.toml`, else the working directory.
fn find_project_root() -> PathBuf {
	let start = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

	let mut nearest_crate = None;
	for dir in start.ancestors() {
		let cargo_toml = dir.join("Cargo.toml");
		if !cargo_toml.exists() {
			continue;
		}
		if let Ok(content) = std::fs::read_to_string(&cargo_toml)
			&& content.contains("[workspace]")
		{
			return dir.to_path_buf();
		}
		nearest_crate.get_or_insert_with(|| dir.to_path_buf());
	}

	nearest_crate.unwrap_or(start)
}

/// Directory the log files are written to: `{LOG_DIR}/yst-sdk`
pub fn log_dir() -> PathBuf {
	let root = env::var("LOG_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|_| find_project_root().join("logs"));
	root.join(LOG_COMPONENT_NAME)
}

fn console_enabled(value: Option<&str>) -> bool {
	value
		.map(|v| matches!(v, "true" | "1" | "yes"))
		.unwrap_or(DEFAULT_LOG_TO_CONSOLE)
}

/// Daily-rolling file writer producing `yst-sdk.{date}.log`.
fn setup_file_logging(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	let file_appender = rolling::RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(LOG_COMPONENT_NAME)
		.filename_suffix("log")
		.build(log_dir)
		.with_context(|| {
			format!(
				"Failed to create rolling file appender in {}",
				log_dir.display()
			)
		})?;

	let (file_writer, guard) = non_blocking(file_appender);
	LOG_GUARD.set(guard).ok();

	Ok(file_writer)
}

/// Install a global subscriber writing to the log directory and, optionally,
/// to stderr.
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init_logging() -> Result<()> {
	dotenv::dotenv().ok();

	let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
	let log_dir = log_dir();
	std::fs::create_dir_all(&log_dir)
		.with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

	let file_writer = setup_file_logging(&log_dir)?;
	let log_to_console = console_enabled(env::var("LOG_TO_CONSOLE").ok().as_deref());
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

	let console_layer = log_to_console.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_thread_ids(true)
			.with_target(true)
			.with_ansi(true)
	});

	Registry::default()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(file_writer)
				.with_timer(fmt::time::UtcTime::rfc_3339())
				.with_thread_ids(true)
				.with_target(true)
				.with_ansi(false),
		)
		.with(console_layer)
		.try_init()
		.context("Failed to install tracing subscriber")?;

	info!("Log level: {}", log_level);
	info!("Log directory: {}", log_dir.display());
	if log_to_console {
		info!("Console output: enabled");
	}

	Ok(())
}

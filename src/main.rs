// SPDX-License-Identifier: MPL-2.0
use midi_notifier::app::{self, Flags};
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "midi_notifier=info";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        headless: args.contains("--headless"),
        write_config: args.contains("--write-config"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unknown arguments");
    }
    Ok(flags)
}

fn main() -> ExitCode {
    init_logging();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            tracing::error!(error = %err, "invalid arguments");
            return ExitCode::FAILURE;
        }
    };

    if flags.write_config {
        return match app::write_config(&flags) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(error = %err, "could not write the notifier config");
                ExitCode::FAILURE
            }
        };
    }

    if flags.headless {
        return match app::run_headless(&flags) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(error = %err, "headless session failed");
                ExitCode::FAILURE
            }
        };
    }

    match app::run(flags) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => {
            tracing::error!(error = %err, "window event loop failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "could not start the notifier");
            ExitCode::FAILURE
        }
    }
}

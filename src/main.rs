// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::create_dir_all;
use std::io::stdout;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, time::OffsetTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use sessgreet::constants::{APP_ID, CONFIG_PATH, LOG_PATH};
use sessgreet::gui::{Greeter, GreeterInit};
use sessgreet::i18n;

const MAX_LOG_FILES: usize = 3;
const MAX_LOG_SIZE: usize = 1024 * 1024;

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Off => Self::OFF,
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The path to the log file
    #[arg(short = 'l', long, value_name = "PATH", default_value = LOG_PATH)]
    logs: PathBuf,

    /// The verbosity level of the logs
    #[arg(short = 'L', long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,

    /// Output all logs to stdout
    #[arg(short, long)]
    verbose: bool,

    /// The path to the config file
    #[arg(short, long, value_name = "PATH", default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Show a fixed set of sessions and don't go fullscreen
    #[arg(long)]
    demo: bool,
}

fn main() {
    let args = Args::parse();
    // Keep the guard alive till the end of the function, since logging depends on this.
    let _guard = init_logging(&args.logs, args.log_level, args.verbose);

    i18n::init_from_desktop();

    // Don't let GTK parse the arguments meant for us.
    let app = relm4::RelmApp::new(APP_ID).with_args(Vec::new());
    app.run::<Greeter>(GreeterInit {
        config_path: args.config,
        demo: args.demo,
    });
}

/// Initialize logging with file rotation.
fn init_logging(path: &Path, log_level: LogLevel, stdout_too: bool) -> WorkerGuard {
    // The local offset must be read before any other thread is spawned.
    let timer = OffsetTime::local_rfc_3339().ok();

    if let Some(log_dir) = path.parent() {
        create_dir_all(log_dir).expect("Couldn't create missing log directory");
    }

    // Set up the log file rotation.
    let log = FileRotate::new(
        path,
        AppendCount::new(MAX_LOG_FILES),
        ContentLimit::Bytes(MAX_LOG_SIZE),
        Compression::OnRotate(0),
        None,
    );
    let (file_writer, guard) = non_blocking(log);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let file_layer = fmt::layer().with_writer(file_writer).with_ansi(false);
    layers.push(match timer.clone() {
        Some(timer) => file_layer.with_timer(timer).boxed(),
        // Ignore failure in getting the local time zone, and log in UTC.
        None => file_layer.boxed(),
    });

    if stdout_too {
        let stdout_layer = fmt::layer().with_writer(stdout);
        layers.push(match timer {
            Some(timer) => stdout_layer.with_timer(timer).boxed(),
            None => stdout_layer.boxed(),
        });
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(LevelFilter::from(log_level))
        .init();

    guard
}

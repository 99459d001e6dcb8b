use std::panic::PanicHookInfo;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use openapi_subset::cli::{self, output, Cli};
use openapi_subset::exitcode;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    install_panic_hook();

    if let Err(e) = cli::execute(&cli) {
        tracing::debug!("error detail: {:?}", e);
        output::error_chain(&e);
        std::process::exit(e.exit_code());
    }
    std::process::exit(exitcode::OK);
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Create a noisy module filter
    let noisy_modules = ["serde_yaml", "config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Logs go to stderr, stdout carries the document
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    if let Err(e) = tracing_subscriber::registry().with(filtered_layer).try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }

    match filter {
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::trace!("Debug mode: trace"),
        _ => {}
    }
}

/// Unexpected faults are logged with location and backtrace, then exit with FAILURE.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        report_panic(info);
        std::process::exit(exitcode::FAILURE);
    }));
}

fn report_panic(info: &PanicHookInfo<'_>) {
    let message = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown location".to_string());

    tracing::error!("unexpected internal error at {}: {}", location, message);
    tracing::debug!("backtrace:\n{}", std::backtrace::Backtrace::force_capture());
    output::error(&format!("unexpected internal error: {}", message));
}

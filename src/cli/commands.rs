//! Command execution

use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::application::OutputFormat;
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::ServiceContainer;

/// Entry point behind `main`: load settings, wire services, run.
pub fn execute(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let input = cli
        .openapi_spec
        .as_deref()
        .ok_or_else(|| CliError::InvalidArgs("missing OPENAPI_SPEC argument".into()))?;
    info!("Application started with OpenAPI spec file: {}", input.display());

    let settings = Settings::load(cli.config.as_deref())?
        .with_cli_flags(cli.remove_descriptions, cli.remove_extensions);
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);
    let stdout = io::stdout();
    run(&container, cli, input, BufWriter::new(stdout.lock()))?;

    info!("Application completed successfully");
    Ok(())
}

/// Process `input` with the container's settings.
///
/// The document goes to `--output` if given, otherwise to `stdout`.
#[instrument(level = "debug", skip(container, cli, stdout))]
pub fn run<W: Write>(
    container: &ServiceContainer,
    cli: &Cli,
    input: &Path,
    stdout: W,
) -> CliResult<()> {
    let settings = &container.settings;
    let output = cli.output.as_deref();
    let format = OutputFormat::resolve(cli.yaml, settings.format, output);
    debug!("run: format={}, filter={:?}", format, settings.filter());

    let document = container.subset.process(input, settings.filter())?;

    match output {
        Some(target) => {
            if container.subset.is_same_file(input, target) {
                return Err(CliError::InvalidArgs(format!(
                    "refusing to overwrite the input file '{}'",
                    target.display()
                )));
            }
            container.subset.write_file(&document, format, target)?;
            debug!("run: wrote {}", target.display());
        }
        None => container.subset.write_to(&document, format, stdout)?,
    }
    Ok(())
}

fn print_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

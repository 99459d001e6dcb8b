//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Process an OpenAPI specification file: strip descriptions and vendor extensions, emit JSON or YAML
#[derive(Parser, Debug)]
#[command(name = "openapi-subset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the OpenAPI specification file (JSON or YAML format)
    #[arg(
        value_name = "OPENAPI_SPEC",
        value_hint = ValueHint::FilePath,
        required_unless_present = "completions"
    )]
    pub openapi_spec: Option<PathBuf>,

    /// Remove description fields from the OpenAPI specification
    #[arg(long)]
    pub remove_descriptions: bool,

    /// Remove OpenAPI Extensions (properties starting with x-) from the specification
    #[arg(long)]
    pub remove_extensions: bool,

    /// Output the OpenAPI specification in YAML format instead of JSON
    #[arg(long)]
    pub yaml: bool,

    /// Write to FILE instead of stdout (format follows the extension unless --yaml is given)
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Settings file (TOML), applied over the global config
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum, exclusive = true)]
    pub completions: Option<clap_complete::Shell>,
}

//! fpw: parametric PCB footprint generator
//!
//! Reads a parameter file or a default library entry, checks it against the
//! design rules and writes the footprint file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use footprint_wizard::config::{self, Config};
use footprint_wizard::error::{FpwError, FpwResult};
use footprint_wizard::params::{file, ParameterModel};
use footprint_wizard::{catalog, drc, emitter, packages};

/// Parametric PCB footprint generator.
///
/// Generates a footprint from a parameter file (`-f`) or a default library
/// entry (`-d`) and writes `<name>.fp`.
#[derive(Parser, Debug)]
#[command(name = "fpw")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Parameter file to generate from
    #[arg(short = 'f', long = "file", value_name = "PARAM_FILE")]
    file: Option<PathBuf>,

    /// Default library entry to generate from
    #[arg(short = 'd', long = "default", value_name = "CATALOG_ID", conflicts_with = "file")]
    default: Option<String>,

    /// Footprint name; the file written is `<NAME>.fp`
    #[arg(short = 'o', long = "output", value_name = "NAME")]
    output: Option<String>,

    /// Run the design rule check only and exit non-zero on failure
    #[arg(long)]
    check: bool,

    /// List the default library entries
    #[arg(short = 'l', long, conflicts_with_all = ["file", "default"])]
    list: bool,

    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the parameters named on the command line.
fn load_params(args: &Args) -> FpwResult<Option<ParameterModel>> {
    if let Some(id) = &args.default {
        return catalog::lookup(id)
            .map(Some)
            .ok_or_else(|| FpwError::MissingDefaultValues {
                catalog_id: id.clone(),
            });
    }
    match &args.file {
        Some(path) => catalog::resolve(file::load(path)?).map(Some),
        None => Ok(None),
    }
}

/// File stem of the output name, used as the element name.
fn element_name(output: &str) -> String {
    Path::new(output)
        .file_stem()
        .map_or_else(|| output.to_string(), |stem| stem.to_string_lossy().into_owned())
}

fn run(args: &Args, cfg: &Config) -> FpwResult<ExitCode> {
    if args.list {
        for id in catalog::ids() {
            println!("{id}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(mut params) = load_params(args)? else {
        error!("No parameters given; use -f <PARAM_FILE> or -d <CATALOG_ID>");
        return Ok(ExitCode::FAILURE);
    };
    if let Some(output) = &args.output {
        if params.footprint_name.is_empty() {
            params.footprint_name = element_name(output);
        }
    }
    cfg.apply_attributes(&mut params);

    let result = drc::check(&params);
    for violation in &result.violations {
        warn!(code = %violation.code, severity = ?violation.severity, "{}", violation.message);
    }

    if args.check {
        for violation in &result.violations {
            println!("{violation}");
        }
        return Ok(if result.ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if !result.ok && cfg.drc.strict {
        error!(
            errors = result.errors().count(),
            "Design rule check failed, not writing footprint"
        );
        return Ok(ExitCode::FAILURE);
    }

    let geometry = packages::generate(&params)?;
    let name = args.output.as_deref().unwrap_or(geometry.name.as_str());
    let path = emitter::footprint_path(name);
    emitter::write_file(&path, &geometry)?;

    info!(
        path = %path.display(),
        family = %params.package_family,
        copper = geometry.copper_count(),
        "Footprint written"
    );
    Ok(ExitCode::SUCCESS)
}

/// Entry point for the fpw command.
fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    match run(&args, &cfg) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Footprint generation failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_levels() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "error"), Level::DEBUG);
        assert_eq!(get_log_level(5, false, "error"), Level::TRACE);
    }

    #[test]
    fn element_name_strips_extension() {
        assert_eq!(element_name("out/DIP8.fp"), "DIP8");
        assert_eq!(element_name("SO8"), "SO8");
    }

    #[test]
    fn default_and_file_conflict() {
        let parsed = Args::try_parse_from(["fpw", "-f", "a.json", "-d", "DIP8_300"]);
        assert!(parsed.is_err());
        let parsed = Args::try_parse_from(["fpw", "-d", "DIP8_300", "-o", "U1", "--check"]).unwrap();
        assert!(parsed.check);
        assert_eq!(parsed.output.as_deref(), Some("U1"));
    }
}

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fhir::{InternalRecord, MapperConfig, PatientMapper, WireFormat};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patient-bridge")]
#[command(about = "Map flat patient records to and from FHIR Patient resources")]
struct Cli {
    /// Wire format for Patient resources (default: from the resource file extension,
    /// then BRIDGE_WIRE_FORMAT)
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print JSON resources (overrides BRIDGE_PRETTY)
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a flat record (JSON object) to a Patient resource
    ToFhir {
        /// Record file, or `-` for stdin
        input: PathBuf,
        /// Write the resource here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Map a Patient resource back to a flat record (JSON object)
    FromFhir {
        /// Resource file, or `-` for stdin
        input: PathBuf,
        /// Write the record here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for WireFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => WireFormat::Json,
            FormatArg::Yaml => WireFormat::Yaml,
        }
    }
}

/// Entry point for the patient bridge CLI.
///
/// # Environment Variables
/// - `BRIDGE_WIRE_FORMAT`: `json` (default) or `yaml`
/// - `BRIDGE_PRETTY`: pretty-print JSON output (default: false)
/// - `BRIDGE_ID_NAMESPACE`: UUID namespace for derived resource ids
/// - `RUST_LOG`: log filter (logs go to stderr)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_bridge=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Some(command) => run(command, &PatientMapper::new(config)),
        None => {
            println!("Use 'patient-bridge --help' for commands");
            Ok(())
        }
    }
}

/// Resolve mapper settings once: environment first, then command-line overrides.
///
/// Without `--format`, a `.json`, `.yaml` or `.yml` resource path picks the wire format.
fn resolve_config(cli: &Cli) -> anyhow::Result<MapperConfig> {
    let mut config = MapperConfig::from_env_values(
        std::env::var("BRIDGE_WIRE_FORMAT").ok(),
        std::env::var("BRIDGE_PRETTY").ok(),
        std::env::var("BRIDGE_ID_NAMESPACE").ok(),
    )
    .context("invalid bridge configuration in environment")?;

    if let Some(format) = cli_wire_format(cli) {
        config = config.with_wire_format(format);
    }
    if cli.pretty {
        config = config.with_pretty(true);
    }

    tracing::debug!(
        format = %config.wire_format(),
        pretty = config.pretty(),
        "resolved mapper config"
    );
    Ok(config)
}

fn cli_wire_format(cli: &Cli) -> Option<WireFormat> {
    if let Some(format) = cli.format {
        return Some(format.into());
    }
    let resource_path = match cli.command.as_ref()? {
        Commands::ToFhir { out, .. } => out.as_deref()?,
        Commands::FromFhir { input, .. } => input.as_path(),
    };
    resource_path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

fn run<C: fhir::Clock>(command: Commands, mapper: &PatientMapper<C>) -> anyhow::Result<()> {
    match command {
        Commands::ToFhir { input, out } => {
            let text = read_input(&input)?;
            let record: InternalRecord = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a flat JSON record", input.display()))?;

            let resource = mapper.to_text(&record)?;
            tracing::info!(fields = record.len(), "mapped record to Patient resource");
            write_output(out.as_deref(), &resource)
        }
        Commands::FromFhir { input, out } => {
            let text = read_input(&input)?;
            let record = mapper
                .text_to_flatten(&text)
                .with_context(|| format!("cannot map {} to a record", input.display()))?;

            let mut json = serde_json::to_string_pretty(&record)?;
            json.push('\n');
            tracing::info!(fields = record.len(), "mapped Patient resource to record");
            write_output(out.as_deref(), &json)
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

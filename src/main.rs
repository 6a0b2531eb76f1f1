//! Command-line interface for ddms

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use ddms::{parse_component, Component, Document, OutputFormat, Settings, VersionContext};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "ddms")]
#[command(author, version, about = "DDMS component validation and rendering tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON settings file
    #[arg(long, global = true, value_name = "JSON")]
    settings: Option<PathBuf>,

    /// The verbosity level. Use -v for info, -vv for debug, -vvv for trace
    #[arg(short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a DDMS component and print its warnings
    Validate {
        /// Path to the XML file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// DDMS version to validate against (inferred from the namespace by default)
        #[arg(long, value_name = "VERSION")]
        ddms_version: Option<String>,
    },

    /// Render a DDMS component
    Render {
        /// Path to the XML file to render
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format: html, text or json
        #[arg(short, long, default_value = "html")]
        format: String,

        /// DDMS version to read the component as (inferred from the namespace by default)
        #[arg(long, value_name = "VERSION")]
        ddms_version: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { file, ddms_version } => cmd_validate(cli.settings, file, ddms_version),
        Commands::Render {
            file,
            format,
            ddms_version,
        } => cmd_render(cli.settings, file, format, ddms_version),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

#[cfg(feature = "cli")]
fn load_component(
    settings: Option<PathBuf>,
    file: &PathBuf,
    ddms_version: Option<String>,
) -> Result<Box<dyn Component>, Box<dyn std::error::Error>> {
    let settings = match settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let root = Document::from_file(file)?.into_root()?;
    let ctx = match ddms_version {
        Some(version) => VersionContext::parse(&version)?,
        None => VersionContext::for_element(&root)?,
    }
    .with_settings(settings);

    tracing::info!(file = %file.display(), version = %ctx.version(), "loading component");
    Ok(parse_component(&root, &ctx)?)
}

#[cfg(feature = "cli")]
fn cmd_validate(
    settings: Option<PathBuf>,
    file: PathBuf,
    ddms_version: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let component = load_component(settings, &file, ddms_version)?;

    println!(
        "{} is a valid {} (DDMS {})",
        file.display(),
        component.qualified_name(),
        component.version()
    );
    for warning in component.warnings() {
        println!("  {}", warning);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_render(
    settings: Option<PathBuf>,
    file: PathBuf,
    format: String,
    ddms_version: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from_name(&format)
        .ok_or_else(|| format!("Unknown output format '{}'. Use html, text or json.", format))?;
    let component = load_component(settings, &file, ddms_version)?;

    let rendered = component.render(format, "", "");
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    std::process::exit(1);
}

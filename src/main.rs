//! panelcam CLI - compile panel jobs to G-code

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panelcam::{init_logging, resolve_profile, Job, MachineDialect, MachineProfile};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "panelcam")]
#[command(version = panelcam::VERSION)]
#[command(about = "Compile panel machining jobs to G-code", long_about = None)]
struct Cli {
    /// Emit log records as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a G-code program from a job file
    Generate {
        /// Job file (.json or .toml)
        job: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Machine profile file (.json or .toml)
        #[arg(short, long)]
        profile: Option<PathBuf>,
        /// Override the profile's dialect (generic, biesse, homag, scm, grbl)
        #[arg(short, long)]
        dialect: Option<String>,
    },
    /// Check a job file without generating a program
    Validate {
        /// Job file (.json or .toml)
        job: PathBuf,
    },
    /// Write a default machine profile
    Profile {
        /// Output file (default: the user configuration directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Dialect of the written profile
        #[arg(short, long)]
        dialect: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;
    tracing::debug!("panelcam {} (built {})", panelcam::VERSION, panelcam::BUILD_DATE);

    match cli.command {
        Commands::Generate {
            job,
            output,
            profile,
            dialect,
        } => generate(&job, output.as_deref(), profile.as_deref(), dialect.as_deref()),
        Commands::Validate { job } => validate(&job),
        Commands::Profile { output, dialect } => write_profile(output, dialect.as_deref()),
    }
}

fn generate(
    job_path: &Path,
    output: Option<&Path>,
    profile_path: Option<&Path>,
    dialect: Option<&str>,
) -> Result<()> {
    let job = Job::load_from_file(job_path)?;
    let default_path = MachineProfile::default_path().ok();
    let mut profile = resolve_profile(profile_path, &job, default_path.as_deref())?;
    if let Some(name) = dialect {
        profile.dialect = MachineDialect::parse_lossy(name);
    }

    // Skipped operations are logged by the assembler.
    let program = job.assemble(&profile, None)?;

    match output {
        Some(path) => {
            std::fs::write(path, program.to_string())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} lines for panel '{}' to {}",
                program.line_count(),
                job.panel.name,
                path.display()
            );
        }
        None => print!("{}", program),
    }
    Ok(())
}

fn validate(job_path: &Path) -> Result<()> {
    let job = Job::load_from_file(job_path)?;
    let missing = job.missing_tools();
    for (index, tool_id) in &missing {
        tracing::warn!(
            "Operation {} references unknown tool '{}'",
            index + 1,
            tool_id
        );
    }
    println!(
        "{}: panel '{}', {} operations, {} unresolved tool references",
        job_path.display(),
        job.panel.name,
        job.operations.len(),
        missing.len()
    );
    Ok(())
}

fn write_profile(output: Option<PathBuf>, dialect: Option<&str>) -> Result<()> {
    let path = match output {
        Some(path) => path,
        None => MachineProfile::default_path()?,
    };
    let profile = match dialect {
        Some(name) => MachineProfile::for_dialect(MachineDialect::parse_lossy(name)),
        None => MachineProfile::default(),
    };
    profile
        .save_to_file(&path)
        .with_context(|| format!("Failed to write machine profile {}", path.display()))?;
    println!("Wrote machine profile to {}", path.display());
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bcs-pipeline", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the engine command line for a config.
    Generate(GenerateArgs),
    /// Generate and execute a pipeline.
    Run(RunArgs),
    /// Convert a media-node config file into pipeline JSON.
    NodeConfig(InputArgs),
    /// Translate the appParams section of a pipeline definition into engine flags.
    AppParams(InputArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat the input as a media-node config file.
    #[arg(long)]
    node: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat the input as a media-node config file.
    #[arg(long)]
    node: bool,

    /// Print the command instead of running it.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Engine binary.
    #[arg(long, env = "BCS_FFMPEG", default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input JSON file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Run(args) => cmd_run(args),
        Command::NodeConfig(args) => cmd_node_config(args),
        Command::AppParams(args) => cmd_app_params(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path, node: bool) -> anyhow::Result<bcs_pipeline::Config> {
    let cfg = if node {
        bcs_pipeline::load_node_config(path)
    } else {
        bcs_pipeline::Config::from_path(path)
    };
    cfg.with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.in_path, args.node)?;
    let pipeline = bcs_pipeline::generate_pipeline(&cfg)?;
    println!("ffmpeg{pipeline}");
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.in_path, args.node)?;
    if args.dry_run {
        let pipeline = bcs_pipeline::generate_pipeline(&cfg)?;
        println!("{}{pipeline}", args.ffmpeg.display());
        return Ok(());
    }

    let service = bcs_pipeline::CommandService::new(bcs_pipeline::FfmpegRunner::new(&args.ffmpeg));
    let resp = service.submit(&cfg);
    if !resp.output.is_empty() {
        eprint!("{}", resp.output);
    }
    println!("status={} {}", resp.status.code(), resp.message);
    if resp.status != bcs_pipeline::ExecStatus::Ok {
        anyhow::bail!("pipeline failed with status {}", resp.status.code());
    }
    Ok(())
}

fn cmd_node_config(args: InputArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.in_path, true)?;
    let json = serde_json::to_string_pretty(&cfg).with_context(|| "serialize config JSON")?;
    println!("{json}");
    Ok(())
}

fn cmd_app_params(args: InputArgs) -> anyhow::Result<()> {
    let flags = bcs_pipeline::process_config_file(&args.in_path)?;
    println!("{}", flags.join(" "));
    Ok(())
}

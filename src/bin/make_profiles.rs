//! make-profiles - emit one OSCAL profile stub per classification tier

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ism_oscal::{Baselines, Config, build_profiles, to_xml_string};

#[derive(Parser)]
#[command(name = "make-profiles")]
#[command(about = "Make basic profiles from baselines.json", long_about = None)]
struct Cli {
    /// Path to the baselines file [default: baselines.json]
    #[arg(short, long, value_name = "FILE")]
    baselines: Option<PathBuf>,

    /// Pretty print the output
    #[arg(short, long)]
    pretty: bool,

    /// Output path prefix; profiles go to stdout when omitted
    #[arg(short, long, value_name = "PREFIX")]
    output: Option<String>,

    /// Profile version [default: ism-oscal1.0.0]
    #[arg(short, long)]
    version: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let baselines_path = cli.baselines.unwrap_or(config.profiles.baselines);
    let version = cli.version.unwrap_or(config.profiles.version);

    if !baselines_path.is_file() {
        println!("{} is not a file", baselines_path.display());
        std::process::exit(1);
    }

    let baselines = Baselines::load(&baselines_path)?;
    for profile in build_profiles(&baselines, &version) {
        let xml = to_xml_string(&profile.tree, cli.pretty)?;
        match &cli.output {
            Some(prefix) => {
                let path = PathBuf::from(format!("{prefix}_{}.xml", profile.tier.key()));
                fs::write(&path, xml)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("wrote {}", path.display());
            }
            None => println!("{xml}"),
        }
    }

    Ok(())
}

//! ismparse - convert an ISM .docx into an XML tree and a baseline catalog

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ism_oscal::{
    Config, ConvertError, ConvertOptions, LinkStyle, convert, load_document, to_xml_string,
};

#[derive(Parser)]
#[command(name = "ismparse")]
#[command(version)]
#[command(about = "Convert an ISM .docx into OSCAL-flavoured XML and a baseline catalog", long_about = None)]
struct Cli {
    /// Path to the ISM docx file
    #[arg(short = 'i', long = "ism", value_name = "FILE")]
    ism: PathBuf,

    /// Path to the XML output file [default: output.xml]
    #[arg(short = 'o', long = "xmlout", value_name = "FILE")]
    xmlout: Option<PathBuf>,

    /// Path to the JSON catalog file [default: output.json]
    #[arg(short = 'c', long = "catalog", value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Write out links as back-matter
    #[arg(short = 'b', long = "oscal")]
    oscal: bool,

    /// Pretty print the XML output
    #[arg(short, long)]
    pretty: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        match err.downcast_ref::<ConvertError>() {
            Some(
                input_err @ (ConvertError::InputNotFound(_) | ConvertError::InvalidDocument { .. }),
            ) => println!("{input_err}"),
            _ => eprintln!("Error: {err:?}"),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let xml_out = cli.xmlout.clone().unwrap_or(config.parser.xml_out);
    let catalog_out = cli.catalog.clone().unwrap_or(config.parser.catalog_out);

    let document = load_document(&cli.ism)?;
    let options = ConvertOptions {
        link_style: if cli.oscal {
            LinkStyle::Oscal
        } else {
            LinkStyle::Plain
        },
        utc_offset: config.parser.utc_offset,
    };
    let conversion = convert(&document, &options)?;

    // Nothing touches the disk until both outputs are complete
    let xml = to_xml_string(&conversion.tree, cli.pretty)?;
    let catalog = conversion.baselines.to_json()?;

    fs::write(&xml_out, xml)
        .with_context(|| format!("failed to write {}", xml_out.display()))?;
    fs::write(&catalog_out, catalog)
        .with_context(|| format!("failed to write {}", catalog_out.display()))?;

    log::info!(
        "wrote {} and {}",
        xml_out.display(),
        catalog_out.display()
    );
    Ok(())
}

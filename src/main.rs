use clap::Parser;
use miette::{IntoDiagnostic, Result};
use shipping_rates::application::rate_set::RateSet;
use shipping_rates::domain::selector::{DEFAULT_CARRIERS, SelectorResolver};
use shipping_rates::interfaces::json::cart_reader::CartReader;
use shipping_rates::interfaces::json::operation_reader::OperationReader;
use shipping_rates::interfaces::json::response_writer::ResponseWriter;
use shipping_rates::logging;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cart JSON payload from the calculated-shipping callback
    cart: PathBuf,

    /// Operations to apply, one JSON object per line
    #[arg(long)]
    operations: Option<PathBuf>,

    /// Carrier recognised at the start of text selectors (repeatable)
    #[arg(long = "carrier", value_name = "NAME")]
    carriers: Vec<String>,

    /// Indent the JSON response
    #[arg(long)]
    pretty: bool,

    /// Log selector resolution and rate changes
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let resolver = if cli.carriers.is_empty() {
        SelectorResolver::new(DEFAULT_CARRIERS)
    } else {
        SelectorResolver::new(&cli.carriers)
    };

    let cart = CartReader::new(File::open(&cli.cart).into_diagnostic()?)
        .read()
        .into_diagnostic()?;
    let mut rate_set = RateSet::with_resolver(cart, resolver);

    if let Some(path) = cli.operations {
        let reader = OperationReader::new(File::open(path).into_diagnostic()?);
        for op_result in reader.operations() {
            match op_result {
                Ok(op) => {
                    if let Err(e) = rate_set.apply(op) {
                        tracing::warn!("Error applying operation: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Error reading operation: {}", e);
                }
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock()).pretty(cli.pretty);
    writer
        .write_response(&rate_set.response())
        .into_diagnostic()?;

    Ok(())
}

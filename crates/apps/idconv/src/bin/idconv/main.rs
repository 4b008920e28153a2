mod commands;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "idconv",
    version,
    about = "Convert Storj identifiers between encodings",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// -v for debug logs, -vv for trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    /// The encoded bytes to be decoded.
    #[arg(required = true)]
    source: Option<String>,

    /// Decode the source with this format only.
    #[arg(long)]
    from: Option<String>,

    /// Print only this destination format.
    #[arg(long)]
    to: Option<String>,

    /// With --to, end the output with a newline.
    #[arg(long, default_value_t = false)]
    nl: bool,

    /// Print results as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// host:port used by the nodeurl encoder. Defaults to the source when it
    /// contains a colon.
    #[arg(long)]
    address: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the conversion tool over stdio (JSON-RPC, one message per line).
    Serve,
    /// List the registered decoders and encoders.
    Formats,
    /// List the well-known satellite node IDs.
    Satellites,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = commands::run(cli) {
        eprintln!("idconv: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let filter = idconv_cli::default_log_filter(verbosity);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

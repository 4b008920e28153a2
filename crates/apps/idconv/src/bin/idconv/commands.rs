use anyhow::{bail, Context, Result};
use log::debug;
use std::io;

use idconv_cli::config::IdconvConfig;
use idconv_cli::output::Output;
use idconv_cli::tool::ToolServer;
use storj_idconv::engine::{FormatEngine, ResolveRequest};
use storj_idconv::satellites::SATELLITES;

use crate::{Cli, Command, ConvertArgs};

pub fn run(cli: Cli) -> Result<()> {
    let config = IdconvConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("failed to load config {}", path.display()),
        None => "failed to load config".to_string(),
    })?;
    debug!("config: {config:?}");

    match cli.command {
        Some(Command::Serve) => serve(&config),
        Some(Command::Formats) => {
            formats(&config);
            Ok(())
        }
        Some(Command::Satellites) => {
            satellites();
            Ok(())
        }
        None => convert(cli.convert, &config),
    }
}

fn convert(args: ConvertArgs, config: &IdconvConfig) -> Result<()> {
    let source = args.source.context("missing source string")?;
    let engine = FormatEngine::standard(config.resolver_config());
    let address = idconv_cli::address_context(&source, args.address.as_deref());
    let request = ResolveRequest::new(&source)
        .from_format(args.from.as_deref())
        .to_format(args.to.as_deref())
        .with_address(address);

    let groups = engine.resolve_grouped(&request)?;
    if groups.is_empty() {
        match args.from.as_deref() {
            Some(format) => bail!("couldn't read {source} as {format}"),
            None => bail!(
                "couldn't read {source} with any of the known encodings: {}",
                engine.decoders().names().join(",")
            ),
        }
    }

    let output = Output {
        json: args.json,
        headers: args.from.is_none(),
        values_only: args.to.is_some(),
        newline: args.nl,
    };
    output.emit(&source, &groups)
}

fn serve(config: &IdconvConfig) -> Result<()> {
    let server = ToolServer::from_config(config);
    debug!(
        "serving {} decoder(s) and {} encoder(s) on stdio",
        server.engine().decoders().len(),
        server.engine().encoders().len()
    );
    server.serve(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn formats(config: &IdconvConfig) {
    let engine = FormatEngine::standard(config.resolver_config());
    println!("decoders: {}", engine.decoders().names().join(", "));
    println!("encoders: {}", engine.encoders().names().join(", "));
}

fn satellites() {
    for satellite in SATELLITES {
        println!("{:<9} {} {}", satellite.name, satellite.node_id, satellite.address);
    }
}

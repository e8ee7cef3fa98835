use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Args;

use crate::{config::RulesArgs, server, textsource::PdfText};

/// Runs an HTTP server converting uploaded schedule PDFs into CSV.
#[derive(Args, Debug)]
pub struct Command {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Largest accepted request body, in bytes.
    #[arg(long, default_value_t = 20 * 1024 * 1024)]
    max_upload_bytes: usize,

    /// Options relating to the rule configuration.
    #[command(flatten)]
    rules: RulesArgs,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let extractor = cmd.rules.build_extractor()?;
    let app = server::router(extractor, Box::new(PdfText), cmd.max_upload_bytes);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(server::serve(cmd.addr, app))
}

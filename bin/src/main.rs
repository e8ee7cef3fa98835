use anyhow::Result;

mod cli;
mod config;
mod output;
mod server;
mod textsource;

fn main() -> Result<()> {
    cli::run()
}

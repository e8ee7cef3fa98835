use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::RulesArgs;

/// Prints the effective rule configuration as YAML.
#[derive(Args, Debug)]
pub struct Command {
    /// Options relating to the rule configuration.
    #[command(flatten)]
    rules: RulesArgs,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = cmd.rules.load_rules()?;
    let yaml = serde_yaml_ng::to_string(&cfg).context("encoding rules as YAML")?;
    std::io::stdout()
        .lock()
        .write_all(yaml.as_bytes())
        .context("writing rules to stdout")
}

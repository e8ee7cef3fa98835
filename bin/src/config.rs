use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use extraction::{Extractor, RuleConfig};

/// CLI arguments relating to the [RuleConfig].
#[derive(Args, Clone, Debug, Default)]
pub struct RulesArgs {
    /// Path to a YAML rule configuration. Without it, the built-in event
    /// schedule rules are used.
    #[arg(long)]
    rules: Option<PathBuf>,
}

impl RulesArgs {
    /// Loads and validates the rule configuration.
    pub fn load_rules(&self) -> Result<RuleConfig> {
        let cfg = match &self.rules {
            Some(path) => load_rules_file(path)?,
            None => RuleConfig::default(),
        };
        cfg.validate()
            .with_context(|| format!("validating rules from {}", self.source_name()))?;
        Ok(cfg)
    }

    /// Loads the rule configuration and compiles it into an [Extractor].
    pub fn build_extractor(&self) -> Result<Extractor> {
        let cfg = self.load_rules()?;
        Extractor::new(&cfg)
            .with_context(|| format!("compiling rules from {}", self.source_name()))
    }

    fn source_name(&self) -> String {
        match &self.rules {
            Some(path) => format!("{:?}", path),
            None => "built-in defaults".to_string(),
        }
    }
}

fn load_rules_file(path: &Path) -> Result<RuleConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules file {:?}", path))?;
    serde_yaml_ng::from_str(&text).with_context(|| format!("parsing rules file {:?}", path))
}

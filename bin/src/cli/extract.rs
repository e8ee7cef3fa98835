use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::{
    config::RulesArgs,
    output::{Document, OutputFormat},
    textsource::InputType,
};

/// Extracts the schedule table from a single document.
#[derive(Args, Debug)]
pub struct Command {
    /// Path to the input document, or "-" to read text from stdin.
    input: PathBuf,

    /// Path to write the output to. Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// How to read the input. By default, this is guessed from the file
    /// extension.
    #[arg(long, value_enum, default_value_t)]
    input_type: InputType,

    /// Fail if no table rows were found, rather than writing empty output.
    #[arg(long)]
    fail_on_empty: bool,

    /// Options relating to the rule configuration.
    #[command(flatten)]
    rules: RulesArgs,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let extractor = cmd.rules.build_extractor()?;

    let (data, input_type) = read_input(&cmd.input, cmd.input_type)?;
    let text = input_type
        .source()
        .read_text(&data)
        .with_context(|| format!("reading text from {:?}", cmd.input))?;

    let lines: Vec<&str> = text.lines().collect();
    let doc = Document {
        table: extractor.extract(&lines),
        title: extractor.find_title(&lines),
    };

    if doc.table.is_empty() {
        if cmd.fail_on_empty {
            bail!("no table data found in {:?}", cmd.input);
        }
        log::warn!("No table data found in {:?}", cmd.input);
    } else {
        log::info!("Extracted {} rows from {:?}", doc.table.len(), cmd.input);
    }

    match &cmd.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating output {:?}", path))?;
            cmd.format
                .write(&doc, BufWriter::new(file))
                .with_context(|| format!("writing output {:?}", path))
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            cmd.format
                .write(&doc, &mut lock)
                .context("writing output to stdout")?;
            lock.flush().context("flushing stdout")
        }
    }
}

fn read_input(path: &Path, requested: InputType) -> Result<(Vec<u8>, InputType)> {
    let mut data = Vec::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_end(&mut data)
            .context("reading stdin")?;
        let input_type = match requested {
            InputType::Auto => InputType::Text,
            other => other,
        };
        return Ok((data, input_type));
    }

    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut data))
        .with_context(|| format!("reading input {:?}", path))?;
    Ok((data, requested.resolve(path)))
}

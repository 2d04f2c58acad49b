//! Command-line interface.
//!
//! ```text
//! dyeline [-v...] [--catalog FILE] [--color auto|always|never] <COMMAND>
//!
//!   parse   Parse an instruction and print the assignments
//!   apply   Parse and apply an instruction to a fresh color store
//!   shell   Apply instructions line by line against one store
//!   models  List models with their parts and aliases
//!   colors  List named colors
//! ```
//!
//! [`run`] takes its input and output streams as arguments so the whole
//! command surface can be driven from tests.

use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use dyeline_parse::{Catalog, ModelSpec, StyleParser};

use crate::render::{
    render_colors, render_models, render_parse, render_report, render_table, ApplyReport,
    OutputFormat, Palette,
};
use crate::status::status_message;
use crate::store::ColorStore;

#[derive(Debug, Parser)]
#[command(
    name = "dyeline",
    version,
    about = "Turn free-text color instructions into part colors"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Load extra models or a replacement color table from a YAML/JSON file
    #[arg(long, value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// When to style text output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn palette(&self) -> Palette {
        match self {
            ColorChoice::Auto => Palette::new(console::colors_enabled()),
            ColorChoice::Always => Palette::new(true),
            ColorChoice::Never => Palette::plain(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an instruction and print the assignments
    Parse(InstructionArgs),
    /// Parse an instruction and apply it to a fresh color store
    Apply(InstructionArgs),
    /// Read instructions from stdin, one per line, against one color store
    Shell {
        /// Model to start with
        #[arg(short, long, default_value = "Shoe")]
        model: String,
    },
    /// List models with their parts and aliases
    Models(FormatArgs),
    /// List named colors
    Colors(FormatArgs),
}

#[derive(Debug, Args)]
pub struct InstructionArgs {
    /// Product model the instruction refers to
    #[arg(short, long, default_value = "Shoe")]
    pub model: String,

    #[command(flatten)]
    pub output: FormatArgs,

    /// Instruction text (read from stdin when omitted)
    pub text: Vec<String>,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Initializes `env_logger`. `-v` flags override `RUST_LOG`.
pub fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let level = match verbose {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).init();
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_file(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn find_model<'c>(catalog: &'c Catalog, name: &str) -> Result<&'c ModelSpec> {
    match catalog.models.get(name) {
        Some(model) => Ok(model),
        None => {
            let names: Vec<&str> = catalog.models.names().collect();
            bail!("unknown model '{}' (available: {})", name, names.join(", "))
        }
    }
}

fn instruction_text(args: &InstructionArgs, input: &mut dyn BufRead) -> Result<String> {
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read instruction from stdin")?;
    Ok(text)
}

/// Runs a parsed command line.
pub fn run(cli: &Cli, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    let catalog = load_catalog(cli.catalog.as_ref())?;
    let palette = cli.color.palette();

    match &cli.command {
        Command::Parse(args) => {
            let model = find_model(&catalog, &args.model)?;
            let text = instruction_text(args, input)?;
            let result = StyleParser::new(&model.parts, &catalog.colors).parse(&text);
            writeln!(out, "{}", render_parse(&result, args.output.format, &palette)?)?;
        }
        Command::Apply(args) => {
            let model = find_model(&catalog, &args.model)?;
            let text = instruction_text(args, input)?;
            let mut store = ColorStore::new(&catalog.models, &model.name)?;
            let result = StyleParser::new(&model.parts, &catalog.colors).parse(&text);
            let applied = store.apply(&result);
            let report = ApplyReport::new(&result, applied, &store);
            writeln!(out, "{}", render_report(&report, args.output.format, &palette)?)?;
        }
        Command::Shell { model } => {
            let mut store = ColorStore::new(&catalog.models, model)?;
            Shell::new(&catalog, &mut store, &palette).run(input, out)?;
        }
        Command::Models(args) => {
            writeln!(out, "{}", render_models(catalog.models.iter(), args.format, &palette)?)?;
        }
        Command::Colors(args) => {
            writeln!(out, "{}", render_colors(&catalog.colors, args.format, &palette)?)?;
        }
    }
    Ok(())
}

/// Line-oriented session against one [`ColorStore`].
///
/// Lines starting with `:` are commands; everything else is an instruction
/// for the active model.
struct Shell<'a> {
    catalog: &'a Catalog,
    store: &'a mut ColorStore,
    palette: &'a Palette,
}

impl<'a> Shell<'a> {
    fn new(catalog: &'a Catalog, store: &'a mut ColorStore, palette: &'a Palette) -> Self {
        Self {
            catalog,
            store,
            palette,
        }
    }

    fn run(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read from stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.strip_prefix(':') {
                Some(command) => {
                    if !self.command(command.trim(), out)? {
                        break;
                    }
                }
                None => self.instruction(line, out)?,
            }
        }
        Ok(())
    }

    /// Handles a `:command`. Returns `false` when the session should end.
    fn command(&mut self, command: &str, out: &mut dyn Write) -> Result<bool> {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match name {
            "quit" | "q" => return Ok(false),
            "model" if arg.is_empty() => {
                writeln!(out, "{}", self.store.active_model().name)?;
            }
            "model" => match self.store.select_model(arg) {
                Ok(model) => writeln!(out, "Model: {}", model.name)?,
                Err(err) => writeln!(out, "{}", err)?,
            },
            "reset" => {
                let name = self.store.active_model().name.clone();
                self.store.reset(&name)?;
                writeln!(out, "Reset {}", name)?;
            }
            "show" => {
                writeln!(
                    out,
                    "{}",
                    render_table(self.store.table(), self.store.selected_part(), self.palette)
                )?;
            }
            other => writeln!(
                out,
                "unknown command ':{}' (try :model, :reset, :show, :quit)",
                other
            )?,
        }
        Ok(true)
    }

    fn instruction(&mut self, text: &str, out: &mut dyn Write) -> Result<()> {
        let result =
            StyleParser::new(&self.store.active_model().parts, &self.catalog.colors).parse(text);
        self.store.apply(&result);
        writeln!(out, "{}", status_message(&result))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "dyeline", "-vv", "parse", "-m", "rocket", "-f", "json", "hull", "red",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.model, "rocket");
                assert_eq!(args.output.format, OutputFormat::Json);
                assert_eq!(args.text, vec!["hull", "red"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let cli = Cli::try_parse_from(["dyeline", "parse", "-m", "chair", "x"]).unwrap();
        let mut out = Vec::new();
        let err = run(&cli, &mut std::io::empty(), &mut out).unwrap_err();
        assert!(err.to_string().contains("unknown model 'chair'"));
    }
}

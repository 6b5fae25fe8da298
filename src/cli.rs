//! Command-line arguments

use anyhow::{anyhow, bail, Context};
use std::path::PathBuf;
use zerowaste_pattern::BaseVariant;

pub const USAGE: &str = r#"zerowaste - zero-waste T-shirt pattern generator

USAGE:
  zerowaste <command> [options]

COMMANDS:
  generate       Print the welded pattern mesh as JSON (or write it to --out)
  measure        Print the key measurements of the pattern
  export-svg     Write the dimensioned drawing
  save-params    Write the current parameters as a flat JSON file
  init-config    Write a settings file with every default

OPTIONS:
  --config <file>       Settings file (.json or .toml)
  --params <file>       Parameter file applied on top of the settings
  --out <path>          Output file
  --variant <name>      Base outline: v3 or classic
  -V, --version         Show version
  -h, --help            Show this help
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Generate,
    Measure,
    ExportSvg,
    SaveParams,
    InitConfig,
    Help,
    Version,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "generate" => Some(Command::Generate),
            "measure" => Some(Command::Measure),
            "export-svg" => Some(Command::ExportSvg),
            "save-params" => Some(Command::SaveParams),
            "init-config" => Some(Command::InitConfig),
            "help" | "-h" | "--help" => Some(Command::Help),
            "-V" | "--version" => Some(Command::Version),
            _ => None,
        }
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub command: Command,
    pub config: Option<PathBuf>,
    pub params: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub variant: Option<BaseVariant>,
}

impl Cli {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let Some(first) = args.next() else {
            return Ok(Self::with_command(Command::Help));
        };
        let command = Command::from_name(&first)
            .ok_or_else(|| anyhow!("unknown command `{}`\n\n{}", first, USAGE))?;
        let mut cli = Self::with_command(command);

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match arg.as_str() {
                "--config" => cli.config = Some(PathBuf::from(value("--config")?)),
                "--params" => cli.params = Some(PathBuf::from(value("--params")?)),
                "--out" => cli.out = Some(PathBuf::from(value("--out")?)),
                "--variant" => {
                    let name = value("--variant")?;
                    let variant = name
                        .parse::<BaseVariant>()
                        .map_err(|e| anyhow!(e))
                        .context("invalid --variant")?;
                    cli.variant = Some(variant);
                }
                "-h" | "--help" => cli.command = Command::Help,
                "-V" | "--version" => cli.command = Command::Version,
                other => bail!("unknown option `{}`\n\n{}", other, USAGE),
            }
        }
        Ok(cli)
    }

    fn with_command(command: Command) -> Self {
        Self {
            command,
            config: None,
            params: None,
            out: None,
            variant: None,
        }
    }
}

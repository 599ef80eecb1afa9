//! Command-line front end
//!
//! Commands write their results to the given writer so they can be run
//! against a buffer in tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::config::{Config, DEFAULTS_FILE_NAME, config_dir};
use crate::defaults::{DEFAULT_KEYS, Defaults, KEY_PROJECT};
use crate::template::parameters::{option_descriptors, resolve_template_parameters};
use crate::template::sources::source_for;
use crate::template::{LATEST, Template, TemplateError, select_parameters};
use crate::version::latest_version;

#[derive(Parser, Debug)]
#[command(name = "vtemplate")]
#[command(version, about = "Resolve template versions and manage CLI defaults")]
pub struct Cli {
    /// Directory holding defaults.json and config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read or write persisted defaults
    #[command(subcommand)]
    Defaults(DefaultsCommand),
    /// Inspect templates in a catalog
    #[command(subcommand)]
    Template(TemplateCommand),
}

#[derive(Subcommand, Debug)]
pub enum DefaultsCommand {
    /// Print a default value
    Get { key: String },
    /// Persist a default value
    Set { key: String, value: String },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Print the latest version of a template
    Latest(TemplateArgs),
    /// Resolve parameter values for a template version and print them as YAML
    Resolve(ResolveArgs),
    /// Print the parameters of a template version as JSON option descriptors
    Parameters(ParametersArgs),
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template name
    pub name: String,

    /// Project to look the template up in (defaults to the saved project)
    #[arg(long, short)]
    pub project: Option<String>,

    /// Catalog file path or http(s) URL (defaults to `catalog` in config.json)
    #[arg(long)]
    pub catalog: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Version pattern such as 1.2.x, or "latest"
    #[arg(long = "template-version", default_value = LATEST)]
    pub template_version: String,

    /// Set a parameter, e.g. --set myParameter=myValue
    #[arg(long, value_name = "KV")]
    pub set: Vec<String>,

    /// YAML file with parameter values
    #[arg(long, value_name = "PATH")]
    pub parameters: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParametersArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Version pattern such as 1.2.x, or "latest"
    #[arg(long = "template-version", default_value = LATEST)]
    pub template_version: String,
}

/// Run a parsed command line, writing output to `out`.
pub async fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config_dir = cli.config_dir.unwrap_or_else(config_dir);

    match cli.command {
        Command::Defaults(command) => run_defaults(command, &config_dir, out),
        Command::Template(command) => run_template(command, &config_dir, out).await,
    }
}

fn open_defaults(config_dir: &Path) -> Defaults {
    let (defaults, err) =
        Defaults::open(config_dir, DEFAULTS_FILE_NAME, DEFAULT_KEYS.iter().copied());
    if let Some(e) = err {
        warn!("Using empty defaults: {}", e);
    }
    defaults
}

fn run_defaults(
    command: DefaultsCommand,
    config_dir: &Path,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut defaults = open_defaults(config_dir);

    match command {
        DefaultsCommand::Get { key } => {
            let value = defaults.get(&key, "")?;
            writeln!(out, "{value}")?;
        }
        DefaultsCommand::Set { key, value } => {
            defaults.set(&key, &value)?;
            info!("Set default {} to {:?}", key, value);
        }
    }

    Ok(())
}

async fn run_template(
    command: TemplateCommand,
    config_dir: &Path,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let config = Config::load(config_dir)?;

    match command {
        TemplateCommand::Latest(args) => {
            let template = fetch_template(&args, config_dir, &config).await?;
            let latest = latest_version(&template.versions).ok_or_else(|| {
                TemplateError::NoVersions {
                    name: template.name.clone(),
                }
            })?;
            writeln!(out, "{}", latest.version)?;
        }
        TemplateCommand::Resolve(args) => {
            let template = fetch_template(&args.template, config_dir, &config).await?;
            let parameters = select_parameters(&template, &args.template_version)?;
            let resolved = resolve_template_parameters(
                &args.set,
                parameters,
                args.parameters.as_deref(),
            )?;
            write!(out, "{resolved}")?;
        }
        TemplateCommand::Parameters(args) => {
            let template = fetch_template(&args.template, config_dir, &config).await?;
            let parameters = select_parameters(&template, &args.template_version)?;
            let descriptors = serde_json::to_string(&option_descriptors(parameters))?;
            writeln!(out, "{descriptors}")?;
        }
    }

    Ok(())
}

async fn fetch_template(
    args: &TemplateArgs,
    config_dir: &Path,
    config: &Config,
) -> anyhow::Result<Template> {
    let project = match &args.project {
        Some(project) => project.clone(),
        None => open_defaults(config_dir).get_or(KEY_PROJECT, ""),
    };
    if project.is_empty() {
        bail!("no project given: pass --project or run `vtemplate defaults set project <name>`");
    }

    let Some(catalog) = args.catalog.as_ref().or(config.catalog.as_ref()) else {
        bail!("no catalog given: pass --catalog or set `catalog` in config.json");
    };

    let source = source_for(catalog, &config.http)?;
    source
        .fetch_template(&project, &args.name)
        .await
        .with_context(|| format!("fetch template {} from {}", args.name, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_parses_repeated_set_and_version() {
        let cli = Cli::try_parse_from([
            "vtemplate",
            "template",
            "resolve",
            "isolated",
            "--template-version",
            "1.2.x",
            "--set",
            "a=1",
            "--set",
            "b=2",
        ])
        .unwrap();

        let Command::Template(TemplateCommand::Resolve(args)) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(args.template.name, "isolated");
        assert_eq!(args.template_version, "1.2.x");
        assert_eq!(args.set, vec!["a=1".to_string(), "b=2".to_string()]);
    }

    #[test]
    fn template_version_defaults_to_latest() {
        let cli = Cli::try_parse_from(["vtemplate", "template", "parameters", "isolated"]).unwrap();

        let Command::Template(TemplateCommand::Parameters(args)) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(args.template_version, LATEST);
        assert_eq!(args.template.project, None);
    }

    #[test]
    fn config_dir_is_global() {
        let cli = Cli::try_parse_from([
            "vtemplate",
            "defaults",
            "get",
            "project",
            "--config-dir",
            "/tmp/x",
        ])
        .unwrap();

        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/x")));
    }
}

//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::render::{course_detail, normalize_query};
use crate::cli::{output, CliError, CliResult, Shell};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{expand_env_vars, Catalog, PrerequisiteTree};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(InfraError::WorkingDirectory)?,
    };
    let settings = Settings::load(Some(&config_dir))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::List { file }) => cmd_list(&container, file.as_deref()),
        Some(Commands::Show { file, courses }) => cmd_show(&container, file.as_deref(), courses),
        Some(Commands::Check { file }) => cmd_check(&container, file.as_deref()),
        Some(Commands::Tree { file, course }) => cmd_tree(&container, file.as_deref(), course),
        Some(Commands::Shell { file }) => cmd_shell(&container, file.as_deref()),
        Some(Commands::Config { command }) => cmd_config(&container, command, &config_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => cmd_shell(&container, None),
    }
}

/// Explicit file argument, else the configured `data_file`.
fn resolve_file(container: &ServiceContainer, file: Option<&Path>) -> CliResult<PathBuf> {
    match (file, &container.settings.data_file) {
        (Some(file), _) => Ok(PathBuf::from(expand_env_vars(&file.to_string_lossy()))),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(CliError::Usage(
            "no course file given and no data_file configured".to_string(),
        )),
    }
}

fn load_catalog(container: &ServiceContainer, file: Option<&Path>) -> CliResult<Catalog> {
    let path = resolve_file(container, file)?;
    Ok(container.catalog_service().load(&path)?)
}

fn query(container: &ServiceContainer, raw: &str) -> CliResult<String> {
    normalize_query(raw, container.settings.normalize_case)
        .ok_or_else(|| CliError::InvalidArgs(format!("not a course number: {raw:?}")))
}

#[instrument(level = "debug", skip(container))]
fn cmd_list(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let catalog = load_catalog(container, file)?;
    output::schedule_header();
    for entry in catalog.entries() {
        output::course_line(entry);
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_show(container: &ServiceContainer, file: Option<&Path>, courses: &[String]) -> CliResult<()> {
    let catalog = load_catalog(container, file)?;

    let mut missing = Vec::new();
    for raw in courses {
        let identifier = query(container, raw)?;
        match catalog.find(&identifier) {
            Some(entry) => output::plain(&course_detail(entry)),
            None => {
                output::missing_course(&identifier);
                missing.push(identifier);
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::CourseNotFound(missing.join(", ")))
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_check(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = resolve_file(container, file)?;
    let batch = container.catalog_service().check(&path)?;
    output::success(&format!("{}: {} courses, all prerequisites resolved", path.display(), batch.len()));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>, course: &str) -> CliResult<()> {
    let catalog = load_catalog(container, file)?;
    let identifier = query(container, course)?;
    let tree = catalog
        .prerequisite_tree(&identifier)
        .map_err(ApplicationError::from)?
        .ok_or(CliError::CourseNotFound(identifier))?;
    output::plain(&tree);
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_shell(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(container.session(), stdin.lock(), stdout.lock())
        .normalize_case(container.settings.normalize_case)
        .default_file(container.settings.data_file.clone());

    if let Some(file) = file {
        let path = resolve_file(container, Some(file))?;
        shell
            .load_file(&path)
            .map_err(|e| InfraError::terminal("output", e))?;
    }
    shell.run().map_err(|e| InfraError::terminal("session", e))?;
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, config_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::plain(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::setting("global", &path.display()),
                None => output::setting("global", "(no home directory)"),
            }
            output::setting("local", &local_config_path(config_dir).display());
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine global config directory".to_string()))?
            } else {
                local_config_path(config_dir)
            };
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .with_path_context("create config directory", &path)?;
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}

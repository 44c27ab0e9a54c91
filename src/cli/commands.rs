//! Command dispatch: one function per subcommand

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::instrument;

use crate::application::{ApplicationError, DocumentService, DropPayload};
use crate::cli::args::{Cli, Commands, ConfigCommands, MoveDirection};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::node::Props;
use crate::domain::ops;
use crate::infrastructure::{InfraError, JsonFileStore};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = cli
        .project_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(&project_dir)?;
    let catalog = settings.catalog()?;
    let store = Arc::new(JsonFileStore::new(settings.pretty_json));
    let service = DocumentService::new(store, catalog);

    match &cli.command {
        Some(Commands::New { file, force }) => _new(&service, file, *force),
        Some(Commands::Types) => _types(&service),
        Some(Commands::Add {
            file,
            block_type,
            parent,
        }) => _add(&service, file, block_type, parent.as_deref()),
        Some(Commands::Insert {
            file,
            block_type,
            parent,
            at,
        }) => _insert(&service, file, block_type, parent.as_deref(), *at),
        Some(Commands::Set { file, id, props }) => _set(&service, file, id, props),
        Some(Commands::Remove { file, id }) => _remove(&service, file, id),
        Some(Commands::Move {
            file,
            id,
            direction,
        }) => _move(&service, file, id, *direction),
        Some(Commands::MoveTo {
            file,
            id,
            parent,
            at,
        }) => _move_to(&service, file, id, parent.as_deref(), *at),
        Some(Commands::Drop {
            file,
            payload,
            parent,
            at,
        }) => _drop(&service, file, payload.as_deref(), parent.as_deref(), *at),
        Some(Commands::Show { file }) => _show(&service, file),
        Some(Commands::Find { file, id }) => _find(&service, file, id),
        Some(Commands::Config { command }) => _config(&settings, &project_dir, command),
        Some(Commands::Completion { shell }) => {
            _completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument(skip(service))]
fn _new(service: &DocumentService, file: &Path, force: bool) -> CliResult<()> {
    service.create_document(file, force)?;
    output::success(&format!("created {}", file.display()));
    Ok(())
}

#[instrument(skip(service))]
fn _types(service: &DocumentService) -> CliResult<()> {
    output::header("Block types");
    for spec in service.catalog().iter() {
        let kind = if spec.accepts_children {
            "container"
        } else {
            "leaf"
        };
        output::detail(&format!("{:<10} {} ({})", spec.name, spec.label, kind));
    }
    Ok(())
}

#[instrument(skip(service))]
fn _add(
    service: &DocumentService,
    file: &Path,
    block_type: &str,
    parent: Option<&str>,
) -> CliResult<()> {
    let tree = service.load(file)?;
    let (tree, created) = service.add_block(&tree, block_type, parent)?;
    service.save(file, &tree)?;
    output::success(&format!("added {}", created));
    Ok(())
}

#[instrument(skip(service))]
fn _insert(
    service: &DocumentService,
    file: &Path,
    block_type: &str,
    parent: Option<&str>,
    at: usize,
) -> CliResult<()> {
    let tree = service.load(file)?;
    let (tree, created) = service.insert_block(&tree, block_type, parent, at)?;
    service.save(file, &tree)?;
    output::success(&format!("inserted {}", created));
    Ok(())
}

#[instrument(skip(service))]
fn _set(service: &DocumentService, file: &Path, id: &str, props: &str) -> CliResult<()> {
    let props: Props = serde_json::from_str::<serde_json::Value>(props)
        .ok()
        .and_then(|v| match v {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        })
        .ok_or_else(|| CliError::InvalidArgs("props must be a JSON object".to_string()))?;

    let tree = service.load(file)?;
    if ops::find(&tree, id).is_none() {
        output::warning(&format!("block not found: {}", id));
        return Ok(());
    }
    let tree = service.replace_props(&tree, id, props);
    service.save(file, &tree)?;
    output::success(&format!("updated props of {}", id));
    Ok(())
}

#[instrument(skip(service))]
fn _remove(service: &DocumentService, file: &Path, id: &str) -> CliResult<()> {
    let tree = service.load(file)?;
    if ops::find(&tree, id).is_none() {
        output::warning(&format!("block not found: {}", id));
        return Ok(());
    }
    let tree = service.remove_block(&tree, id);
    service.save(file, &tree)?;
    output::success(&format!("removed {}", id));
    Ok(())
}

#[instrument(skip(service))]
fn _move(
    service: &DocumentService,
    file: &Path,
    id: &str,
    direction: MoveDirection,
) -> CliResult<()> {
    let tree = service.load(file)?;
    let moved = service.move_block(&tree, id, direction.into());
    if moved == tree {
        output::warning("no change (boundary reached or block not found)");
        return Ok(());
    }
    service.save(file, &moved)?;
    output::success(&format!("moved {}", id));
    Ok(())
}

#[instrument(skip(service))]
fn _move_to(
    service: &DocumentService,
    file: &Path,
    id: &str,
    parent: Option<&str>,
    at: usize,
) -> CliResult<()> {
    let tree = service.load(file)?;
    let moved = service.move_block_to(&tree, id, parent, at);
    if moved == tree {
        output::warning("no change (invalid target or block not found)");
        return Ok(());
    }
    service.save(file, &moved)?;
    output::success(&format!("moved {}", id));
    Ok(())
}

#[instrument(skip(service))]
fn _drop(
    service: &DocumentService,
    file: &Path,
    payload: Option<&str>,
    parent: Option<&str>,
    at: usize,
) -> CliResult<()> {
    let payload: Option<DropPayload> = match payload {
        None => None,
        Some(raw) => Some(
            serde_json::from_str(raw)
                .map_err(|e| CliError::InvalidArgs(format!("invalid drop payload: {}", e)))?,
        ),
    };

    let tree = service.load(file)?;
    let dropped = service.handle_drop(&tree, payload, parent, at)?;
    if dropped == tree {
        output::warning("nothing dropped");
        return Ok(());
    }
    service.save(file, &dropped)?;
    output::success("drop applied");
    Ok(())
}

#[instrument(skip(service))]
fn _show(service: &DocumentService, file: &Path) -> CliResult<()> {
    let tree = service.load(file)?;
    let label = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());
    output::info(&output::document_tree(&label, &tree));
    Ok(())
}

#[instrument(skip(service))]
fn _find(service: &DocumentService, file: &Path, id: &str) -> CliResult<()> {
    let tree = service.load(file)?;
    match ops::find(&tree, id) {
        Some(node) => {
            let rendered = serde_json::to_string_pretty(node).map_err(|e| {
                CliError::from(ApplicationError::OperationFailed {
                    context: format!("render block {}", id),
                    source: Box::new(e),
                })
            })?;
            output::info(&rendered);
        }
        None => output::warning(&format!("block not found: {}", id)),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, project_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(settings).map_err(|e| {
                CliError::from(ApplicationError::Config {
                    message: e.to_string(),
                })
            })?;
            output::info(&rendered);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                Settings::global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                Settings::local_config_path(project_dir)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| InfraError::io(parent, e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(&path, e))?;
            output::success(&format!("created {}", path.display()));
        }
        ConfigCommands::Path => {
            if let Some(global) = Settings::global_config_path() {
                output::detail(&format!("global: {}", global.display()));
            }
            output::detail(&format!(
                "local:  {}",
                Settings::local_config_path(project_dir).display()
            ));
        }
    }
    Ok(())
}

fn _completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use super::{
    ExitStatus,
    args::{Arguments, Command, CommonArgs, FilesCommand, ListCommand},
    report::{print_discovery, print_listing},
};
use crate::{
    core::TypeLister,
    fs::{FileSystem, PhysicalFileSystem},
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Files(cmd)) => files(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn build_lister(common: &CommonArgs) -> Result<TypeLister> {
    let fs: Arc<dyn FileSystem> = Arc::new(PhysicalFileSystem::new());
    let lister = TypeLister::builder()
        .file_system(fs.clone())
        .project_dir(&common.project_dir)
        .build()?;

    if !fs.directory_exists(lister.project_dir()) {
        anyhow::bail!(
            "project directory '{}' does not exist",
            lister.project_dir().display()
        );
    }
    debug!(project_dir = %lister.project_dir().display(), "resolved project directory");
    Ok(lister)
}

fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let lister = build_lister(&cmd.common)?;
    let listing = lister
        .list()
        .with_context(|| format!("failed to list types in '{}'", lister.project_dir().display()))?;

    print_listing(&listing, cmd.format)?;

    Ok(if listing.types.is_empty() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn files(cmd: FilesCommand) -> Result<ExitStatus> {
    let lister = build_lister(&cmd.common)?;
    let discovery = lister.discover().with_context(|| {
        format!(
            "failed to discover files in '{}'",
            lister.project_dir().display()
        )
    })?;

    print_discovery(&discovery, lister.project_dir())?;

    Ok(if discovery.files.is_empty() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

use crate::domain::Group;
use crate::extensions::path_ext::FileName;
use crate::group_loader::factory::{GroupFactoryError, from_json};
use futures::future::join_all;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;
use tracing::{info, instrument, warn};

/// Loads every group file in `directory`. Files that fail to load are logged and skipped.
///
/// Files are taken in file name order, so when two files declare the same group id the first one wins.
#[instrument]
pub async fn load_groups_from(directory: &str, extension: &str) -> Result<Vec<Group>, LoaderError> {
    info!("📁 Loading groups from '{}'...", directory);
    let files = group_files(Path::new(directory), extension)
        .await
        .map_err(|e| LoaderError::Io { source: e, path: None })?;

    let mut origins: HashMap<String, PathBuf> = HashMap::new();
    let mut groups = Vec::with_capacity(files.len());
    let mut failed = 0;

    for (path, result) in join_all(files.into_iter().map(read_group)).await {
        let result = result.and_then(|group| match origins.get(&group.id) {
            Some(first) => Err(LoaderError::DuplicateGroup {
                id: group.id,
                path: path.clone(),
                first: first.clone(),
            }),
            None => Ok(group),
        });

        match result {
            Ok(group) => {
                info!(group_id = group.id, "📁 Loaded '{}' from '{}'", group.name, path.string_file_name());
                origins.insert(group.id.clone(), path);
                groups.push(group);
            }
            Err(e) => {
                warn!("⚠️ Skipping '{}': {}", path.string_file_name(), e);
                failed += 1;
            }
        }
    }

    info!("📁 Loading groups... OK, {} loaded, {} failed", groups.len(), failed);
    Ok(groups)
}

async fn group_files(directory: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut entries = ReadDirStream::new(fs::read_dir(directory).await?);
    let mut files = Vec::new();

    while let Some(entry) = entries.next().await {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("⚠️ Unable to read an entry of '{}': {}", directory.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|file_type| file_type.is_file());
        if is_file && path.extension().is_some_and(|e| e == extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

async fn read_group(path: PathBuf) -> (PathBuf, Result<Group, LoaderError>) {
    let result = match fs::read_to_string(&path).await {
        Ok(content) => from_json(&content).map_err(LoaderError::from),
        Err(e) => Err(LoaderError::Io {
            source: e,
            path: Some(path.clone()),
        }),
    };
    (path, result)
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(transparent)]
    GroupFactory(#[from] GroupFactoryError),
    #[error("{}", source)]
    Io { source: io::Error, path: Option<PathBuf> },
    #[error("group id '{id}' is already used by '{}'", first.string_file_name())]
    DuplicateGroup { id: String, path: PathBuf, first: PathBuf },
}

//! Media file checks shared by the vendor clients.

use std::path::Path;

use crate::error::{ClientError, ClientResult};

/// Validate a media file before upload: it must exist, be a regular file,
/// and be non-empty.
pub(crate) async fn validate_media_file(path: &Path) -> ClientResult<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClientError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(ClientError::Io(e)),
    };

    if !metadata.is_file() {
        return Err(ClientError::NotAFile(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(ClientError::EmptyFile(path.to_path_buf()));
    }

    Ok(())
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name(path))
}

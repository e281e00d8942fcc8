//! Result persistence

use crate::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Write `items` as one JSON array to `path`.
///
/// The document is written to a sibling temp file and renamed into place, so
/// an interrupted write never leaves a truncated result behind.
pub async fn write_json<T: Serialize>(path: impl AsRef<Path>, items: &[T]) -> Result<()> {
    let path = path.as_ref();
    let body = serde_json::to_vec(items)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tokio::fs::write(&tmp, &body).await?;
    tokio::fs::rename(&tmp, path).await?;

    info!("Wrote {} records ({} bytes) to {}", items.len(), body.len(), path.display());
    Ok(())
}

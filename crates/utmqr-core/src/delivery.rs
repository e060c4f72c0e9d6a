//! File delivery: write an artifact under its export name.
//!
//! Bytes go to `<name>.part` first and are renamed into place, so a reader
//! never sees a half-written export. An existing file with the same name is
//! replaced.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::export::Artifact;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `artifact` into `dir` and returns the final path. Creates `dir` if missing.
pub fn save(dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let final_path = dir.join(&artifact.filename);
    let tmp = temp_path(&final_path);

    let mut file = fs::File::create(&tmp).with_context(|| format!("create {}", tmp.display()))?;
    fill_temp(&tmp, &mut file, &artifact.bytes, |f| f.sync_all())?;
    drop(file);

    if let Err(e) = fs::rename(&tmp, &final_path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("rename to {}", final_path.display()));
    }

    tracing::info!("saved {} ({} bytes)", final_path.display(), artifact.bytes.len());
    Ok(final_path)
}

/// Writes `bytes` to the open temp file and syncs it. The temp file is
/// removed if either step fails.
fn fill_temp<F: Write>(
    tmp: &Path,
    file: &mut F,
    bytes: &[u8],
    sync: impl FnOnce(&mut F) -> io::Result<()>,
) -> Result<()> {
    let res = file
        .write_all(bytes)
        .with_context(|| format!("write {}", tmp.display()))
        .and_then(|()| sync(file).with_context(|| format!("sync {}", tmp.display())));
    if res.is_err() {
        let _ = fs::remove_file(tmp);
    }
    res
}

/// `data:` URI carrying the artifact, e.g. `data:image/png;base64,iVBOR...`.
pub fn data_uri(artifact: &Artifact) -> String {
    format!("data:{};base64,{}", artifact.mime, STANDARD.encode(&artifact.bytes))
}

/// Asset files looked up as given, then under `resources/`
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory tried when a path does not open as given.
pub const RESOURCE_DIR: &str = "resources";

/// Read the whole file at `path`, falling back to `resources/<path>` when it is missing.
///
/// Returns the bytes and the path that was read. On failure the error comes
/// with the path whose read failed.
pub fn read_with_fallback(path: &Path) -> Result<(Vec<u8>, PathBuf), (PathBuf, io::Error)> {
    match fs::read(path) {
        Ok(bytes) => Ok((bytes, path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let fallback = Path::new(RESOURCE_DIR).join(path);
            fs::read(&fallback)
                .map(|bytes| (bytes, fallback.clone()))
                .map_err(|e| (fallback, e))
        }
        Err(e) => Err((path.to_path_buf(), e)),
    }
}

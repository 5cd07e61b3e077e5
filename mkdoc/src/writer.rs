use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::ModuleDocument;

/// Write `<dir>/<module>.md`, replacing any previous file. `dir` must exist.
pub fn write_markdown(dir: &Path, document: &ModuleDocument) -> Result<PathBuf, Error> {
    let path = dir.join(format!("{}.md", document.module.name));
    fs::write(&path, document.markdown()).map_err(Error::write(&path))?;
    Ok(path)
}

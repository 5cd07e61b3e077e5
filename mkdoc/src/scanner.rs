use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// One source file, named by its dotted path below the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
}

/// Find every file under `root`. Each directory contributes its own files
/// (sorted by name) before descending into its subdirectories.
pub fn scan(root: &Path, extension: &str) -> Result<Vec<Module>, Error> {
    let mut modules = Vec::new();
    collect_modules(root, root, extension, &mut modules)?;
    Ok(modules)
}

fn collect_modules(
    dir: &Path,
    root: &Path,
    extension: &str,
    out: &mut Vec<Module>,
) -> Result<(), Error> {
    let mut entries = fs::read_dir(dir)
        .map_err(Error::scan(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::scan(dir))?;
    entries.sort_by_key(|e| e.path());

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        // Symlinked directories are listed but never descended into.
        let kind = entry.file_type().map_err(Error::scan(&path))?;
        let is_file = if kind.is_symlink() {
            path.is_file()
        } else {
            kind.is_file()
        };

        if kind.is_dir() {
            subdirs.push(path);
        } else if is_file {
            out.push(Module {
                name: module_name(root, &path, extension),
                path,
            });
        }
    }

    for sub in subdirs {
        collect_modules(&sub, root, extension, out)?;
    }
    Ok(())
}

/// `src/foo/bar.js` under root `src` with extension `.js` is `foo.bar`.
///
/// The extension is removed wherever it appears in a path component, so
/// `src/x.js/y.js` is `x.y` and `src/a.js.orig` is `a.orig`. Files without
/// it keep their name: `src/README.md` is `README.md`.
pub fn module_name(root: &Path, path: &Path, extension: &str) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .map(|part| {
            let stripped = if extension.is_empty() {
                part.to_string()
            } else {
                part.replace(extension, "")
            };
            if stripped.is_empty() {
                part.into_owned()
            } else {
                stripped
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

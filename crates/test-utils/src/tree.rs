use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;

/// Hash a directory tree: relative paths, entry kinds and file contents.
///
/// Two trees with the same layout and bytes produce the same digest no
/// matter where they live.
pub fn tree_digest(root: &Path) -> Result<String> {
    let mut entries = Vec::new();
    collect(root, root, &mut entries)?;
    entries.sort();

    let mut hasher = Hasher::new();
    for rel in entries {
        let full = root.join(&rel);
        hasher.update(rel.to_string_lossy().as_bytes());
        if full.is_dir() {
            hasher.update(b"/dir");
        } else {
            hasher.update(b"/file");
            hasher.update(file_hash(&full)?.as_bytes());
        }
    }
    Ok(hasher.finalize().to_hex().to_string())
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))? {
        let path = entry?.path();
        out.push(path.strip_prefix(root)?.to_path_buf());
        if path.is_dir() {
            collect(root, &path, out)?;
        }
    }
    Ok(())
}

fn file_hash(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file = File::open(path).with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

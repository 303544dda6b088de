use std::fs;
use std::path::{Path, PathBuf};

// Expands one command-line path argument into the concrete files it
// names. A directory given without `recursive` and a path that is
// neither a file nor a directory are both reported to stderr and
// skipped; they do not abort the run.
pub fn collect_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if root.is_file() {
        vec![root.to_path_buf()]
    } else if root.is_dir() {
        if recursive {
            let mut out = Vec::new();
            collect_recursive(root, &mut out);
            out
        } else {
            eprintln!("{}: is a directory", root.display());
            Vec::new()
        }
    } else {
        eprintln!("{}: no such file or directory", root.display());
        Vec::new()
    }
}

fn collect_recursive(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}

// Orchestration: parse args, compile the pattern, dispatch to stdin or
// to the expanded path list, fold per-input results into an exit code.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use crate::cli;
use crate::errors::AppError;
use crate::fs_walk::collect_files;
use crate::regex::Regex;
use crate::search::process_lines;

pub fn run(args: &[String]) -> i32 {
    match run_inner(args) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("{err}");
            2
        }
    }
}

fn run_inner(args: &[String]) -> Result<bool, AppError> {
    let cfg = cli::parse_args(args)?;
    let regex = Regex::compile(&cfg.pattern)?;

    if cfg.paths.is_empty() {
        let stdin = io::stdin();
        let lines = stdin.lock().lines().map_while(Result::ok);
        return Ok(process_lines(lines, &regex, None));
    }

    let mut files = Vec::new();
    for path in &cfg.paths {
        files.extend(collect_files(Path::new(path), cfg.recursive));
    }
    let show_filename = cfg.recursive || files.len() > 1;

    let mut matched_any = false;
    for path in &files {
        // Unreadable files are skipped silently.
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };
        let name = path.to_string_lossy();
        let filename = show_filename.then_some(name.as_ref());
        if process_lines(content.lines().map(str::to_string), &regex, filename) {
            matched_any = true;
        }
    }
    Ok(matched_any)
}

// Each line is matched independently against the whole pattern and, on
// a match, the unmodified line is printed (optionally prefixed with
// `<path>:`).

use crate::regex::Regex;

// Runs `regex` over every line of `lines`, printing each matching line
// (prefixed with `filename:` when given). Returns whether any line in
// this input matched, which the caller folds into the global exit
// status.
pub fn process_lines<I>(lines: I, regex: &Regex, filename: Option<&str>) -> bool
where
    I: IntoIterator<Item = String>,
{
    let mut matched_any = false;
    for line in lines {
        let line = line.trim_end_matches(['\n', '\r']);
        if regex.is_match(line) {
            matched_any = true;
            match filename {
                Some(name) => println!("{name}:{line}"),
                None => println!("{line}"),
            }
        }
    }
    matched_any
}

// program [-r] -E <pattern> [path ...], plus stdin mode when no paths
// are given, plus a legacy convenience: a positional pattern when -E is
// absent.

use crate::errors::UsageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pattern: String,
    pub recursive: bool,
    pub paths: Vec<String>,
}

pub fn parse_args(args: &[String]) -> Result<Config, UsageError> {
    let mut recursive = false;
    let mut pattern: Option<String> = None;
    let mut paths = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" => recursive = true,
            "-E" => {
                let value = iter.next().ok_or(UsageError::MissingArgument("-E"))?;
                pattern = Some(value.clone());
            }
            other if pattern.is_none() => pattern = Some(other.to_string()),
            other => paths.push(other.to_string()),
        }
    }

    let pattern = pattern.ok_or(UsageError::MissingPattern)?;
    Ok(Config {
        pattern,
        recursive,
        paths,
    })
}

mod app;
mod cli;
mod errors;
mod fs_walk;
mod regex;
mod search;

use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    process::exit(app::run(&args));
}

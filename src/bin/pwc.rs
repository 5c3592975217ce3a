use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};

use pwc::count::{self, CountMode};

#[derive(Parser)]
#[command(
    name = "pwc",
    about = "Count words, lines, or unique words in a file with parallel workers",
    group(ArgGroup::new("mode").required(true).args(["words", "lines", "unique"]))
)]
struct Cli {
    /// Count words (whitespace-delimited tokens)
    #[arg(short = 'w', long = "words")]
    words: bool,

    /// Count newline characters
    #[arg(short = 'l', long = "lines")]
    lines: bool,

    /// Count distinct words
    #[arg(short = 'u', long = "unique")]
    unique: bool,

    /// File to count
    file: PathBuf,
}

fn main() {
    pwc::common::reset_sigpipe();
    let cli = Cli::parse();

    let mode = if cli.words {
        CountMode::Words
    } else if cli.lines {
        CountMode::Lines
    } else {
        CountMode::UniqueWords
    };

    match count::count_file(&cli.file, mode, count::DEFAULT_WORKERS) {
        Ok(total) => println!("{}", total),
        Err(e) => {
            eprintln!("pwc: {}", e);
            process::exit(1);
        }
    }
}

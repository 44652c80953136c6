use std::path::PathBuf;

use clap::Parser;

/// Version banner, from `git describe` at build time when available.
pub const VERSION: &str = match option_env!("CLASSIFIER_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the classifier.
#[derive(Parser, Debug)]
#[command(
    name = "classifier",
    about = "Mirror category files onto a tree of directories and shortcuts",
    long_about = "Reads every category file under the source directory, builds the \
                  destination tree of directories, shortcuts and icons it describes, \
                  then offers to delete destination entries no category file mentions.",
    version = VERSION,
    disable_version_flag = true
)]
pub struct Cli {
    /// Directory searched for category files
    #[arg(short, long, env = "CLASSIFIER_SOURCE")]
    pub source: PathBuf,

    /// Directory receiving the category tree
    #[arg(short, long, env = "CLASSIFIER_DESTINATION")]
    pub destination: PathBuf,

    /// File name of category files
    #[arg(
        short,
        long,
        env = "CLASSIFIER_CATEGORIES_FILE",
        default_value = crate::config::DEFAULT_CATEGORIES_FILE
    )]
    pub categories_file: String,

    /// Delete extra entries without asking
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

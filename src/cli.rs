use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::t64::Selection;

#[derive(Parser, Debug)]
#[command(name = "t64dump")]
#[command(version)]
#[command(about = "List and extract programs stored in C64 T64 tape images", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "extract"])))]
#[command(after_help = "Examples:\n  \
  t64dump games.t64 -l                  list the programs in games.t64\n  \
  t64dump games.zip -x                  extract every program of every image in games.zip\n  \
  t64dump games.t64 -d out -x \"pac man\" extract only PAC MAN into out/")]
pub struct Cli {
    /// T64 image, zip container or HTTP URL of either
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// List the programs in each image
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Extract programs; name the ones to extract or leave empty for all
    #[arg(short = 'x', long, value_name = "NAME", num_args = 0..)]
    pub extract: Option<Vec<String>>,

    /// Destination directory for extracted programs
    #[arg(short = 'd', long, value_name = "DIR", default_value = "./")]
    pub dest: PathBuf,

    /// Only report failures
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Programs to extract, or `None` in list mode.
    pub fn selection(&self) -> Option<Selection> {
        self.extract.as_ref().map(Selection::from_names)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

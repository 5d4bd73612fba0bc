use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "domaincheck-cli")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// format: human|report|json|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// write output to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// check whether one domain can receive email
    Validate { domain: String },
    /// validate every domain in a file (one per line)
    Batch {
        file: String,

        /// concurrent workers (1..=200)
        #[arg(long, default_value_t = 50)]
        workers: usize,

        /// per-domain deadline (ms)
        #[arg(long = "timeout", default_value_t = 25_000)]
        timeout_ms: u64,

        /// disable the live progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

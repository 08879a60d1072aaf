use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "lexline")]
#[clap(about = "AI-assisted redlining for legal drafts", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

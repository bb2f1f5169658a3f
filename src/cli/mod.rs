pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "promsource")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query per-node average CPU and memory usage from Prometheus", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Fetch average usage of a node")]
    Query {
        #[arg(short, long, help = "Prometheus address, e.g. http://prometheus:9090")]
        address: String,

        #[arg(short, long, help = "Node name, matched against the instance label")]
        node: String,

        #[arg(short, long, default_value = "5m", help = "Averaging period label")]
        period: String,

        #[arg(long, help = "Skip TLS certificate verification")]
        insecure_skip_verify: bool,

        #[arg(long, help = "Per-request timeout in seconds")]
        timeout: Option<u64>,

        #[arg(long, help = "Print fetcher counters after the result")]
        stats: bool,
    },
    #[command(about = "Print the query expressions for a node")]
    Expr {
        #[arg(short, long, help = "Node name, matched against the instance label")]
        node: String,

        #[arg(short, long, default_value = "5m", help = "Averaging period label")]
        period: String,
    },
}

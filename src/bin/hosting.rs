//! Arena host binary.
//!
//! Runs the HTTP server hosting one live table over websockets.

use botarena::Chips;
use botarena::gameplay::TableConfig;
use botarena::hosting::Server;
use clap::Parser;

/// No-Limit Hold'em match host for autonomous bot clients.
#[derive(Parser)]
#[command(name = "hosting")]
struct Args {
    /// Bind host.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Bind port.
    #[arg(long, default_value_t = 8765)]
    port: u16,
    /// Seats at the table.
    #[arg(long, default_value_t = 6)]
    seats: usize,
    /// Starting stack in chips.
    #[arg(long, default_value_t = 10_000)]
    starting_stack: Chips,
    /// Small blind.
    #[arg(long, default_value_t = 50)]
    sb: Chips,
    /// Big blind.
    #[arg(long, default_value_t = 100)]
    bb: Chips,
    /// Per-decision clock in milliseconds; 0 disables the timer.
    #[arg(long, default_value_t = 15_000)]
    move_time_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    botarena::log();
    let args = Args::parse();
    let config = TableConfig {
        variant: "NLHE".to_string(),
        seats: args.seats,
        starting_stack: args.starting_stack,
        sb: args.sb,
        bb: args.bb,
        move_time_ms: args.move_time_ms,
    };
    Server::run((args.host, args.port), config).await?;
    Ok(())
}

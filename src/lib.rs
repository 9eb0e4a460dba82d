//! Live No-Limit Texas Hold'em matches between autonomous bot clients.
//!
//! Two subsystems compose the crate:
//!
//! - [`gameplay`] — the pure rules engine: deck, dealing, betting legality,
//!   phase progression, side pots, showdown. No I/O.
//! - [`gameroom`] — the session coordinator: one per table, mapping seats to
//!   websocket clients, prompting the actor whose turn it is, running the
//!   per-decision clock, and surviving disconnects.
//!
//! [`cards`] is the shared leaf (card model and hand evaluator) and
//! [`hosting`] is the actix shell that upgrades HTTP connections into
//! bidirectional message streams.

pub mod cards;
pub mod gameplay;
pub mod gameroom;
pub mod hosting;

/// Stack sizes, bet amounts, and pot totals in chips.
pub type Chips = u32;
/// Seat index around the table.
pub type Position = usize;

/// Deadline for the opening `hello` frame on a fresh connection.
pub const HELLO_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

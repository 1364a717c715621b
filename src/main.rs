use log::LevelFilter;

use magic_chess::uci::uci_top::run_stdio_loop;
use magic_chess::utils::logger::{self, DEFAULT_LOG_FILE};

fn main() -> std::io::Result<()> {
    // Diagnostics go to a file; stdout belongs to the protocol.
    let _ = logger::init(DEFAULT_LOG_FILE, LevelFilter::Info);
    run_stdio_loop()
}

//! gridstar: run the visualiser in the terminal.
//!
//!   cargo run -- --rows 30 --density 0.25
//!
//! Debug logging goes to stderr:
//!   RUST_LOG=debug cargo run 2> gridstar.log

use clap::Parser;
use gridstar_demo::{App, Args};
use gridstar_term::CrosstermDriver;

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("starting with {args:?}");

    let mut app = App::new(&args, CrosstermDriver::new());
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

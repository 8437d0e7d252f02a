//! Command-line wrapper around the engine: trades JSON in, accounting
//! report JSON out.
//!
//! Reads a trade list from the file given as the first argument, or
//! from stdin when no argument is given. Logging is controlled via
//! `RUST_LOG`.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};

use taxlots::engine::Engine;
use taxlots::trade::Trade;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let input = match env::args().nth(1) {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let trades: Vec<Trade> = serde_json::from_str(&input)?;
    let engine = Engine::with_defaults();
    let report = engine.run(&trades);
    println!("{}", report.to_json()?);
    Ok(())
}

//! `meadow` binary: opens a window and orbits a generated grass field.
//!
//! Usage: `meadow [preset.toml]`. Without an argument the built-in defaults
//! are used. `RUST_LOG` controls log output.

use std::path::Path;

use meadow::options::Options;
use meadow::viewer::Viewer;

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

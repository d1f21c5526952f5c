//! Converts an OSM XML dump into `<output_dir>/<input file name>.ttl`.
//!
//! Usage: `osmrdf [config.json]` (defaults to `config/osmrdf.json`).
//!
//! An existing output file is reused as is. Set `"refresh": true` in the
//! config after changing rules, filters or caster settings.

use std::env;
use std::fs::create_dir_all;
use std::io;
use std::path::Path;

use structured_logger::json::new_writer;
use structured_logger::Builder;

use osmrdf::config::load_user_config;
use osmrdf::errors::Result;
use osmrdf::etl::{DumpToTurtleEtl, Etl};

const DEFAULT_CONFIG_PATH: &str = "config/osmrdf.json";

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}

fn main() -> Result<()> {
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let user_config = load_user_config(Path::new(&config_path))?;
    setup_logging(&user_config.log_level);

    let converter = user_config.converter()?;
    let output_dir = Path::new(&user_config.output_dir);
    create_dir_all(output_dir)?;

    let mut etl = DumpToTurtleEtl::new(&user_config.input_path, &converter);
    etl.process(output_dir, user_config.refresh)
}

pub mod dump_to_ttl;
pub mod parse_osm;

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::errors::Result;

pub use self::dump_to_ttl::DumpToTurtleEtl;
pub use self::parse_osm::{parse_single, ElementStream};

fn log_failure(etl_name: &str, phase: &str, err: &crate::errors::Error) {
    let message = err.to_string();
    error!(etl_name = etl_name, phase = phase, err = message.as_str(); "ETL phase failed");
}

/// A conversion that reads its input, renders it and writes one output file
/// into a directory. The output file doubles as the cache: a run whose file
/// already exists is skipped unless it is refreshed.
pub trait Etl {
    type Input;
    type Output;

    fn etl_name(&self) -> &str;

    fn output_path(&self, dir: &Path) -> Result<PathBuf>;

    fn is_cached(&self, dir: &Path) -> Result<bool> {
        Ok(self.output_path(dir)?.try_exists()?)
    }

    fn clean(&self, dir: &Path) -> Result<()> {
        if self.is_cached(dir)? {
            fs::remove_file(self.output_path(dir)?)?;
        }
        Ok(())
    }

    fn extract(&mut self, dir: &Path) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Output>;
    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()>;

    /// Runs all phases. With `refresh` an existing output is deleted first,
    /// otherwise it is kept as is. Rules, filters and caster settings are
    /// not compared against it.
    fn process(&mut self, dir: &Path, refresh: bool) -> Result<()> {
        let output_path = self.output_path(dir)?;
        let output = output_path.display().to_string();
        info!(etl_name = self.etl_name(), output = output.as_str(); "Starting ETL process");

        if refresh && self.is_cached(dir)? {
            info!(
                etl_name = self.etl_name(), output = output.as_str();
                "Discarding existing output"
            );
            self.clean(dir)?;
        }
        if self.is_cached(dir)? {
            warn!(
                etl_name = self.etl_name(), output = output.as_str();
                "Reusing existing output, enable refresh to rebuild it"
            );
            return Ok(());
        }

        info!(etl_name = self.etl_name(); "Extracting");
        let input = self
            .extract(dir)
            .inspect_err(|err| log_failure(self.etl_name(), "extract", err))?;

        info!(etl_name = self.etl_name(); "Transforming");
        let rendered = self
            .transform(input)
            .inspect_err(|err| log_failure(self.etl_name(), "transform", err))?;

        info!(etl_name = self.etl_name(); "Loading");
        self.load(dir, rendered)
            .inspect_err(|err| log_failure(self.etl_name(), "load", err))?;

        info!(etl_name = self.etl_name(), output = output.as_str(); "Process finished");
        Ok(())
    }
}

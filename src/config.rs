use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::data::osm::ElementKind;
use crate::errors::{Error, Result};
use crate::rdf::TagValueCaster;
use crate::transform::{Converter, ElementFilter, Retagger};

fn default_cast_tag_values() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserConfig {
    pub input_path: String,
    pub output_dir: String,
    /// Tab separated retag rules, see [`crate::transform::retag`].
    #[serde(default)]
    pub rules_path: Option<String>,
    #[serde(default)]
    pub allow_elements: Vec<ElementKind>,
    #[serde(default)]
    pub deny_elements: Vec<ElementKind>,
    #[serde(default = "default_cast_tag_values")]
    pub cast_tag_values: bool,
    #[serde(default)]
    pub source_comment: bool,
    /// Rebuild the output even if it already exists. Without it an existing
    /// `.ttl` is kept whatever the rules or filters now say.
    #[serde(default)]
    pub refresh: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl UserConfig {
    /// Builds the run's converter. Rules are read and parsed here so a bad
    /// rule file stops the run before any element is touched.
    pub fn converter(&self) -> Result<Converter> {
        let retagger = match &self.rules_path {
            Some(path) => {
                let rules = fs::read_to_string(path)
                    .map_err(|err| Error::Config(format!("could not read rules {path}: {err}")))?;
                Retagger::parse(&rules)?
            }
            None => Retagger::default(),
        };
        info!(rules = retagger.rules().len(); "Retag rules ready");

        let filter = ElementFilter::new()
            .with_allowed(self.allow_elements.iter().copied())
            .with_denied(self.deny_elements.iter().copied());
        let caster = self.cast_tag_values.then(TagValueCaster::new);

        Ok(Converter::new(retagger, filter, caster).with_source_comment(self.source_comment))
    }
}

pub fn load_user_config(path: &Path) -> Result<UserConfig> {
    let file = File::open(path)
        .map_err(|err| Error::Config(format!("could not open {}: {err}", path.display())))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

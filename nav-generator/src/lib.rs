pub mod codegen;
pub mod config;
pub mod dom;
pub mod error;
pub mod export;
pub mod lexer;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod stylesheet;
pub mod template;
pub mod token;
pub mod update;
#[cfg(feature = "wasm")]
pub mod wasm;

use codegen::NavOutput;
use config::NavConfig;
use error::Result;
use template::{BaseTemplate, TemplateSource};

/// Fetch the base template from `source` and merge `config` into it.
///
/// Each call fetches afresh, so no state from a previous run can leak into
/// the output.
pub fn regenerate(source: &dyn TemplateSource, config: &NavConfig) -> Result<NavOutput> {
    let template = source.fetch()?;
    codegen::generate(&template, config)
}

/// Like [`regenerate`], but template warnings are errors.
pub fn regenerate_strict(source: &dyn TemplateSource, config: &NavConfig) -> Result<NavOutput> {
    let template = source.fetch()?;
    codegen::generate_strict(&template, config)
}

/// Generate from in-memory markup and a JSON configuration.
pub fn generate_from_json(html: &str, css: &str, config_json: &str) -> Result<NavOutput> {
    let config = NavConfig::from_json(config_json)?;
    codegen::generate(&BaseTemplate::new(html, css), &config)
}

//! Template rendering for addon-generated files

mod embedded;
mod jinja;

pub use embedded::embedded_templates;
pub use jinja::MiniJinjaEngine;

use crate::error::Result;
use crate::model::VariantSet;
use std::collections::BTreeMap;
use std::path::Path;

/// Suffix template sources carry; it is stripped from the rendered file name
pub const TEMPLATE_SUFFIX: &str = ".jinja";

/// Renders one named template into a directory.
///
/// The output file is named after the template. Blocks inside a template are
/// kept or dropped depending on which alternatives are active.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    fn render(
        &self,
        target_dir: &Path,
        template_name: &str,
        alternatives: &VariantSet,
        variables: &BTreeMap<String, String>,
    ) -> Result<()>;
}

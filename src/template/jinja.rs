use super::{embedded_templates, TemplateEngine, TEMPLATE_SUFFIX};
use crate::error::{GenerationError, Result};
use crate::fs::FileSystem;
use crate::model::{SupportedServer, VariantSet};
use minijinja::Environment;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// [`TemplateEngine`] backed by minijinja.
///
/// Variables are exposed to templates as top-level names and the active
/// alternatives as the sorted list `alternatives`, so a template gates a
/// block with `{% if "mp_metrics" in alternatives %}`.
pub struct MiniJinjaEngine {
    fs: Arc<dyn FileSystem>,
    templates: BTreeMap<String, String>,
}

impl MiniJinjaEngine {
    /// Engine serving the templates embedded for `server`
    pub fn new(fs: Arc<dyn FileSystem>, server: SupportedServer) -> Self {
        let templates = embedded_templates(server)
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Self { fs, templates }
    }

    /// Engine without any template; populate it with [`Self::add_template`]
    pub fn empty(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            templates: BTreeMap::new(),
        }
    }

    pub fn add_template(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }

    /// Replaces embedded templates with every `*.jinja` file found in `dir`
    pub fn with_template_dir(mut self, dir: &Path) -> Result<Self> {
        for entry in self.fs.read_dir(dir)? {
            if !entry.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().strip_suffix(TEMPLATE_SUFFIX) else {
                continue;
            };
            let source = self.fs.read_to_string(entry.path())?;
            debug!(template = name, dir = %dir.display(), "Template override loaded");
            self.templates.insert(name.to_string(), source);
        }
        Ok(self)
    }

    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Renders a template to a string without touching the filesystem
    pub fn render_to_string(
        &self,
        template_name: &str,
        alternatives: &VariantSet,
        variables: &BTreeMap<String, String>,
    ) -> Result<String> {
        let source =
            self.templates
                .get(template_name)
                .ok_or_else(|| GenerationError::TemplateNotFound {
                    name: template_name.to_string(),
                })?;

        let render_error = |e: minijinja::Error| GenerationError::Render {
            name: template_name.to_string(),
            message: e.to_string(),
        };

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_template(template_name, source)
            .map_err(render_error)?;
        let template = env.get_template(template_name).map_err(render_error)?;
        template
            .render(context(alternatives, variables))
            .map_err(render_error)
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(
        &self,
        target_dir: &Path,
        template_name: &str,
        alternatives: &VariantSet,
        variables: &BTreeMap<String, String>,
    ) -> Result<()> {
        let rendered = self.render_to_string(template_name, alternatives, variables)?;

        self.fs.create_dir_all(target_dir)?;
        let target = target_dir.join(template_name);
        self.fs.write(&target, &rendered)?;

        info!(file = %target.display(), "Rendered {}", template_name);
        Ok(())
    }
}

fn context(alternatives: &VariantSet, variables: &BTreeMap<String, String>) -> Value {
    let mut ctx: Map<String, Value> = variables
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    ctx.insert(
        "alternatives".to_string(),
        Value::Array(alternatives.iter().map(Value::from).collect()),
    );
    Value::Object(ctx)
}

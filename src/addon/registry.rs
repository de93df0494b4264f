//! Addon lookup by server

use super::{Addon, QuarkusAddon};
use crate::descriptor::MavenHelper;
use crate::error::{GenerationError, Result};
use crate::fs::FileSystem;
use crate::model::SupportedServer;
use crate::template::MiniJinjaEngine;
use std::path::Path;
use std::sync::Arc;

/// Registry of the available server addons
pub struct AddonRegistry {
    addons: Vec<Box<dyn Addon>>,
}

impl AddonRegistry {
    /// Registry without any addon
    pub fn new() -> Self {
        Self { addons: Vec::new() }
    }

    /// Registry holding every built-in addon, rendering the embedded
    /// templates or, when `template_dir` is set, the templates found there
    pub fn with_defaults(fs: Arc<dyn FileSystem>, template_dir: Option<&Path>) -> Result<Self> {
        let mut engine = MiniJinjaEngine::new(fs.clone(), SupportedServer::Quarkus);
        if let Some(dir) = template_dir {
            engine = engine.with_template_dir(dir)?;
        }

        let mut registry = Self::new();
        registry.register(Box::new(QuarkusAddon::new(
            Arc::new(engine),
            fs,
            Arc::new(MavenHelper),
        )));
        Ok(registry)
    }

    /// Adds an addon; a later registration for the same name wins
    pub fn register(&mut self, addon: Box<dyn Addon>) {
        self.addons.retain(|a| a.addon_name() != addon.addon_name());
        self.addons.push(addon);
    }

    pub fn get(&self, server: SupportedServer) -> Result<&dyn Addon> {
        self.get_by_name(server.code())
            .ok_or_else(|| GenerationError::UnsupportedServer(server.code().to_string()))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&dyn Addon> {
        self.addons
            .iter()
            .find(|a| a.addon_name().eq_ignore_ascii_case(name))
            .map(|a| a.as_ref())
    }

    /// Servers with a registered addon, in registration order
    pub fn servers(&self) -> Vec<SupportedServer> {
        self.addons
            .iter()
            .filter_map(|a| SupportedServer::from_code(a.addon_name()))
            .collect()
    }
}

impl Default for AddonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use hashbrown::HashMap;
use smol_str::SmolStr;

use super::builtin::{HeadingMode, MarkdownMode, PlainMode};
use super::error::ModeError;
use super::overlay::OverlayMode;
use super::{Mode, ModeSpec};

/// Named modes available to documents.
#[derive(Default)]
pub struct ModeRegistry {
    modes: HashMap<SmolStr, Arc<dyn Mode>>,
}

impl std::fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.modes.keys()).finish()
    }
}

impl ModeRegistry {
    pub fn new() -> ModeRegistry {
        ModeRegistry::default()
    }

    /// A registry holding [`PlainMode`], [`MarkdownMode`] and [`HeadingMode`].
    pub fn with_builtin() -> ModeRegistry {
        let mut registry = ModeRegistry::new();
        registry.register(Arc::new(PlainMode));
        registry.register(Arc::new(MarkdownMode::new()));
        registry.register(Arc::new(HeadingMode));
        registry
    }

    /// Registers `mode` under its own name, replacing any previous mode of
    /// that name.
    pub fn register(&mut self, mode: Arc<dyn Mode>) -> ModeSpec {
        let name = SmolStr::new(mode.name());
        if self.modes.insert(name.clone(), mode).is_some() {
            log::debug!("Replaced mode '{}'", name);
        }
        ModeSpec(name)
    }

    pub fn get(&self, spec: &ModeSpec) -> Option<Arc<dyn Mode>> {
        self.modes.get(spec.as_str()).cloned()
    }

    pub fn contains(&self, spec: &ModeSpec) -> bool {
        self.modes.contains_key(spec.as_str())
    }

    /// Looks up `spec`, falling back to plain text for unknown modes.
    pub fn resolve(&self, spec: &ModeSpec) -> Arc<dyn Mode> {
        match self.get(spec) {
            Some(mode) => mode,
            None => {
                log::debug!("Unknown mode '{}', using {}", spec, PlainMode::NAME);
                Arc::new(PlainMode)
            }
        }
    }

    /// Registers `overlay` layered over the registered mode `base` as a new
    /// mode called `name`.
    pub fn define_overlay(
        &mut self,
        name: &str,
        base: &ModeSpec,
        overlay: Arc<dyn Mode>,
    ) -> Result<ModeSpec, ModeError> {
        let base_mode = self
            .get(base)
            .ok_or_else(|| ModeError::ComposedModeUnavailable {
                name: name.into(),
                base: base.0.clone(),
            })?;

        Ok(self.register(Arc::new(OverlayMode::new(name, base_mode, overlay))))
    }
}

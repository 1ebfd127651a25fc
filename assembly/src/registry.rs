use std::collections::BTreeMap;

use three_d::CpuMesh;

/// The name under which the switch prototype mesh is registered.
pub const SWITCH_TEMPLATE: &str = "switch";

/// A registry of template meshes keyed by row name.
///
/// The registry is populated once by the asset-loading side after all
/// templates are resident and is passed by reference into [`resolve`].
///
/// [`resolve`]: crate::resolve
#[derive(Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, CpuMesh>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template mesh under the given name.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if a template is already registered under
    /// that name.
    pub fn insert(&mut self, name: &str, mesh: CpuMesh) -> Result<(), RegistryError> {
        if self.templates.contains_key(name) {
            return Err(RegistryError::DuplicateTemplate(name.to_owned()));
        }
        self.templates.insert(name.to_owned(), mesh);

        Ok(())
    }

    /// Returns the template mesh registered under the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CpuMesh> {
        self.templates.get(name)
    }

    /// Returns the switch prototype mesh.
    #[must_use]
    pub fn switch(&self) -> Option<&CpuMesh> {
        self.get(SWITCH_TEMPLATE)
    }
}

/// The error type for errors regarding template registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A template is already registered under this name.
    #[error("a template named `{0}` is already registered")]
    DuplicateTemplate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = TemplateRegistry::new();
        registry
            .insert("r1", CpuMesh::cube())
            .expect("first registration should succeed");

        assert!(matches!(
            registry.insert("r1", CpuMesh::cube()),
            Err(RegistryError::DuplicateTemplate(name)) if name == "r1"
        ));
    }

    #[test]
    fn switch_uses_the_sentinel_name() {
        let mut registry = TemplateRegistry::new();
        assert!(registry.switch().is_none());

        registry
            .insert(SWITCH_TEMPLATE, CpuMesh::cube())
            .expect("registration should succeed");
        assert!(registry.switch().is_some());
    }
}

//! Named solution modules (3D, 2D, assembly, ...) and their workspaces.
//!
//! A [`SolutionRegistry`] is an ordinary value: create it with
//! [`SolutionRegistry::with_defaults`], pass it to whatever needs it, and
//! release it with [`SolutionRegistry::shutdown`].

use std::fmt;

use crate::error::RegistryError;
use crate::scene::SceneGraph;

/// Name of the module that hosts the 3D scene.
pub const PRIMARY_3D: &str = "3D-Solution";

/// What a module works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    ThreeD,
    TwoD,
    Assembly,
    Custom,
}

impl ModuleKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreeD => "3d",
            Self::TwoD => "2d",
            Self::Assembly => "assembly",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    Active,
    Inactive,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        })
    }
}

/// A registered module and the scene it owns.
#[derive(Debug)]
pub struct SolutionModule {
    pub name: String,
    pub description: String,
    pub kind: ModuleKind,
    status: ModuleStatus,
    pub scene: SceneGraph,
}

impl SolutionModule {
    #[must_use]
    pub fn status(&self) -> ModuleStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ModuleStatus::Active
    }

    #[must_use]
    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            status: self.status,
            sub_solutions_count: self.scene.len(),
        }
    }
}

/// Read-only summary of a module, for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInfo {
    pub name: String,
    pub description: String,
    pub kind: ModuleKind,
    pub status: ModuleStatus,
    pub sub_solutions_count: usize,
}

/// What [`SolutionRegistry::shutdown`] released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownSummary {
    pub modules: usize,
    pub solutions: usize,
}

/// Registry of solution modules, in registration order.
#[derive(Debug, Default)]
pub struct SolutionRegistry {
    modules: Vec<SolutionModule>,
}

impl SolutionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the standard modules. Only the 3D module
    /// starts active.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults = [
            (PRIMARY_3D, "3D modeling of solid objects", ModuleKind::ThreeD),
            ("2D-Solution", "2D drafting and sketches", ModuleKind::TwoD),
            ("Assembly-Solution", "Assemblies of parts", ModuleKind::Assembly),
        ];
        for (name, description, kind) in defaults {
            registry.modules.push(SolutionModule {
                name: name.into(),
                description: description.into(),
                kind,
                status: ModuleStatus::Inactive,
                scene: SceneGraph::new(),
            });
        }
        if let Some(primary) = registry.modules.first_mut() {
            primary.status = ModuleStatus::Active;
        }
        tracing::info!(modules = registry.modules.len(), "solution registry initialized");
        registry
    }

    /// Registers a new, inactive module.
    ///
    /// # Errors
    ///
    /// Returns an error if a module with the same name exists.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ModuleKind,
    ) -> Result<&mut SolutionModule, RegistryError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(RegistryError::Duplicate(name));
        }
        tracing::debug!(%name, kind = kind.as_str(), "registering module");
        self.modules.push(SolutionModule {
            name,
            description: description.into(),
            kind,
            status: ModuleStatus::Inactive,
            scene: SceneGraph::new(),
        });
        let index = self.modules.len() - 1;
        Ok(&mut self.modules[index])
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SolutionModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SolutionModule> {
        self.modules.iter_mut().find(|m| m.name == name)
    }

    /// Returns the module hosting the 3D scene, if registered.
    #[must_use]
    pub fn primary_3d(&self) -> Option<&SolutionModule> {
        self.get(PRIMARY_3D)
    }

    pub fn primary_3d_mut(&mut self) -> Option<&mut SolutionModule> {
        self.get_mut(PRIMARY_3D)
    }

    /// Marks a module active. Returns whether its status changed.
    ///
    /// # Errors
    ///
    /// Returns an error if no module has that name.
    pub fn activate(&mut self, name: &str) -> Result<bool, RegistryError> {
        self.set_status(name, ModuleStatus::Active)
    }

    /// Marks a module inactive. Returns whether its status changed.
    ///
    /// # Errors
    ///
    /// Returns an error if no module has that name.
    pub fn deactivate(&mut self, name: &str) -> Result<bool, RegistryError> {
        self.set_status(name, ModuleStatus::Inactive)
    }

    fn set_status(&mut self, name: &str, status: ModuleStatus) -> Result<bool, RegistryError> {
        let module = self
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownModule(name.into()))?;
        if module.status == status {
            return Ok(false);
        }
        module.status = status;
        tracing::info!(module = name, %status, "module status changed");
        Ok(true)
    }

    pub fn modules(&self) -> impl Iterator<Item = &SolutionModule> {
        self.modules.iter()
    }

    #[must_use]
    pub fn active_modules(&self) -> Vec<&SolutionModule> {
        self.modules.iter().filter(|m| m.is_active()).collect()
    }

    #[must_use]
    pub fn modules_info(&self) -> Vec<ModuleInfo> {
        self.modules.iter().map(SolutionModule::info).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Deactivates every module and drops the registry with its scenes.
    pub fn shutdown(mut self) -> ShutdownSummary {
        let mut solutions = 0;
        for module in &mut self.modules {
            module.status = ModuleStatus::Inactive;
            solutions += module.scene.len();
        }
        let summary = ShutdownSummary {
            modules: self.modules.len(),
            solutions,
        };
        tracing::info!(
            modules = summary.modules,
            solutions = summary.solutions,
            "solution registry shut down"
        );
        summary
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::SolutionCoordinate;
    use crate::operations::creation::MakeBox;

    #[test]
    fn defaults_have_active_3d_module() {
        let registry = SolutionRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        let primary = registry.primary_3d().unwrap();
        assert!(primary.is_active());
        assert_eq!(primary.kind, ModuleKind::ThreeD);
        assert_eq!(registry.active_modules().len(), 1);
    }

    #[test]
    fn activate_and_deactivate() {
        let mut registry = SolutionRegistry::with_defaults();
        assert!(registry.activate("2D-Solution").unwrap());
        assert!(registry.activate("Assembly-Solution").unwrap());
        assert!(!registry.activate("2D-Solution").unwrap());
        assert_eq!(registry.active_modules().len(), 3);

        assert!(registry.deactivate(PRIMARY_3D).unwrap());
        assert_eq!(registry.active_modules().len(), 2);
    }

    #[test]
    fn unknown_module_is_an_error() {
        let mut registry = SolutionRegistry::with_defaults();
        assert!(matches!(
            registry.activate("CAM-Solution"),
            Err(RegistryError::UnknownModule(_))
        ));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = SolutionRegistry::new();
        registry.register("CAM-Solution", "toolpaths", ModuleKind::Custom).unwrap();
        assert!(matches!(
            registry.register("CAM-Solution", "again", ModuleKind::Custom),
            Err(RegistryError::Duplicate(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn info_counts_scene_nodes() {
        let mut registry = SolutionRegistry::with_defaults();
        let scene = &mut registry.primary_3d_mut().unwrap().scene;
        MakeBox::new(SolutionCoordinate::default(), 1.0, 1.0, 1.0)
            .execute(scene)
            .unwrap();

        let info = registry.modules_info();
        assert_eq!(info[0].name, PRIMARY_3D);
        assert_eq!(info[0].status, ModuleStatus::Active);
        assert_eq!(info[0].sub_solutions_count, 1);
        assert_eq!(info[1].sub_solutions_count, 0);
    }

    #[test]
    fn shutdown_reports_released_state() {
        let mut registry = SolutionRegistry::with_defaults();
        let scene = &mut registry.get_mut("Assembly-Solution").unwrap().scene;
        MakeBox::new(SolutionCoordinate::default(), 1.0, 1.0, 1.0)
            .execute(scene)
            .unwrap();
        let summary = registry.shutdown();
        assert_eq!(summary, ShutdownSummary { modules: 3, solutions: 1 });
    }

    #[test]
    fn registries_are_independent() {
        let mut first = SolutionRegistry::with_defaults();
        let second = SolutionRegistry::with_defaults();
        first.deactivate(PRIMARY_3D).unwrap();
        assert!(second.primary_3d().unwrap().is_active());
    }
}

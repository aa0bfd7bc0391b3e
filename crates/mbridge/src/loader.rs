use crate::context::ModContext;
use crate::error::LoaderError;
use fxhash::FxHashSet;
use mbridge_dispatch::DispatchRegistry;
use mbridge_domain::ModId;
use mbridge_domain::config::LoaderConfig;
use mbridge_kernel::config::load_config;
use mbridge_resolver::{
    BuildLayout, BuildPlan, DependencyResolver, InstalledPackage, InstalledPackages, ModManifest,
    PackageIndex, ResolveOptions, ResolvedDependency,
};
use std::path::Path;
use tracing::{debug, info};

/// A mod whose dependencies are resolved and planned, ready to build.
#[derive(Debug, Clone)]
pub struct PreparedMod {
    id: ModId,
    resolved: Vec<ResolvedDependency>,
    plan: BuildPlan,
}

impl PreparedMod {
    #[must_use]
    pub const fn id(&self) -> &ModId {
        &self.id
    }

    #[must_use]
    pub fn resolved(&self) -> &[ResolvedDependency] {
        &self.resolved
    }

    #[must_use]
    pub const fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    /// Resolution result for dependency `id`.
    #[must_use]
    pub fn dependency(&self, id: &str) -> Option<&ResolvedDependency> {
        self.resolved.iter().find(|dependency| dependency.id().as_str() == id)
    }
}

/// Process-wide loader state: configuration, installed packages, the shared
/// dispatch registry and the set of loaded mods.
///
/// Created explicitly with [`Loader::init`] and torn down with
/// [`Loader::shutdown`].
#[derive(Debug)]
pub struct Loader {
    config: LoaderConfig,
    dispatch: DispatchRegistry,
    installed: InstalledPackages,
    loaded: FxHashSet<ModId>,
}

impl Loader {
    #[must_use]
    pub fn init(config: LoaderConfig) -> Self {
        info!(
            auto_fetch = config.auto_fetch,
            platform = %config.platform,
            deps = %config.dependencies_dir.display(),
            "Loader initialized"
        );
        Self {
            config,
            dispatch: DispatchRegistry::new(),
            installed: InstalledPackages::new(),
            loaded: FxHashSet::default(),
        }
    }

    /// Loads [`LoaderConfig`] from `path` and `MBRIDGE__*` variables, then
    /// initializes the loader.
    pub fn from_config_file(path: Option<impl AsRef<Path>>) -> Result<Self, LoaderError> {
        let config: LoaderConfig = load_config(path)?;
        Ok(Self::init(config))
    }

    /// Registers packages already present on this machine.
    #[must_use]
    pub fn with_installed(mut self, packages: impl IntoIterator<Item = InstalledPackage>) -> Self {
        self.installed.extend(packages);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Handle to the shared registry.
    #[must_use]
    pub fn dispatch(&self) -> DispatchRegistry {
        self.dispatch.clone()
    }

    #[must_use]
    pub const fn installed(&self) -> &InstalledPackages {
        &self.installed
    }

    #[must_use]
    pub fn layout(&self) -> BuildLayout {
        BuildLayout::from_config(&self.config)
    }

    /// Validates the manifest, resolves its dependencies and plans the build.
    ///
    /// Packages fetched through `index` are remembered as installed even when
    /// a later dependency fails.
    pub fn prepare_mod(
        &mut self,
        manifest: &ModManifest,
        index: impl PackageIndex,
    ) -> Result<PreparedMod, LoaderError> {
        let descriptors = manifest.descriptors()?;

        let options = ResolveOptions { auto_fetch: self.config.auto_fetch };
        let mut resolver =
            DependencyResolver::new(std::mem::take(&mut self.installed), index, options);
        let outcome = resolver.resolve(&descriptors);
        self.installed = resolver.into_installed();
        let resolved = outcome?;

        let plan = BuildPlan::from_resolved(&self.layout(), &resolved);
        info!(
            mod_id = %manifest.id(),
            linked = plan.link().len(),
            soft = plan.soft().len(),
            "Mod prepared"
        );

        Ok(PreparedMod { id: manifest.id().clone(), resolved, plan })
    }

    /// Copies the linked dependencies of `prepared` into the dependencies directory.
    pub fn materialize(&self, prepared: &PreparedMod) -> Result<usize, LoaderError> {
        Ok(BuildPlan::materialize(&self.layout(), &prepared.resolved)?)
    }

    /// Marks the mod loaded and hands out its dispatch context.
    pub fn load_mod(&mut self, manifest: &ModManifest) -> Result<ModContext, LoaderError> {
        let id = manifest.id().clone();
        if !self.loaded.insert(id.clone()) {
            return Err(LoaderError::AlreadyLoaded { id: id.to_string(), context: None });
        }

        info!(mod_id = %id, version = %manifest.version(), "Mod loaded");
        Ok(ModContext::new(id, self.dispatch.clone()))
    }

    /// Removes every listener the mod registered; returns how many.
    pub fn unload_mod(&mut self, id: &str) -> usize {
        let was_loaded = self.loaded.remove(id);
        let removed = self.dispatch.unregister_owner(id);
        if was_loaded {
            info!(mod_id = id, listeners = removed, "Mod unloaded");
        } else {
            debug!(mod_id = id, listeners = removed, "Unload requested for a mod that is not loaded");
        }
        removed
    }

    #[must_use]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains(id)
    }

    pub fn loaded_mods(&self) -> impl Iterator<Item = &ModId> {
        self.loaded.iter()
    }

    /// Unloads everything and drops every listener; returns how many were removed.
    pub fn shutdown(&mut self) -> usize {
        self.loaded.clear();
        let removed = self.dispatch.shutdown();
        info!(listeners = removed, "Loader shut down");
        removed
    }
}

//! Component library built from manifest files.
//!
//! Scans a styles directory, parses manifest files, and folds every
//! definition into a styled component, bases first.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use tailor_core::{styled, IdRegistry, StyledComponent, StyledConfig, Target};
use walkdir::WalkDir;

use crate::manifest::{parse_manifest, ComponentDef, Format, ManifestError};

/// A library of named styled components.
#[derive(Debug)]
pub struct Library {
    /// Loaded components by name (lowercase)
    components: HashMap<String, LoadedComponent>,

    registry: Arc<IdRegistry>,
}

/// A component with the definition it was built from.
#[derive(Debug, Clone)]
pub struct LoadedComponent {
    /// Original component name
    pub name: String,

    /// Manifest file the definition came from
    pub source_path: Option<PathBuf>,

    pub def: ComponentDef,

    pub component: StyledComponent,
}

/// A definition waiting to be built.
struct Pending {
    def: ComponentDef,
    source_path: Option<PathBuf>,
}

impl Default for Library {
    fn default() -> Self {
        Self::with_registry(IdRegistry::global())
    }
}

impl Library {
    /// Create a new empty library using the global id registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty library generating ids from `registry`.
    pub fn with_registry(registry: Arc<IdRegistry>) -> Self {
        Self {
            components: HashMap::new(),
            registry,
        }
    }

    /// Build a library from in-memory definitions.
    pub fn from_defs(defs: Vec<ComponentDef>) -> Result<Self, ManifestError> {
        let mut library = Self::new();
        library.add_defs(defs)?;
        Ok(library)
    }

    /// Scan a directory for manifest files and populate the library.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    pub fn scan(&mut self, styles_dir: &Path) -> Result<usize, ManifestError> {
        if !styles_dir.exists() {
            return Err(ManifestError::DirectoryNotFound(
                styles_dir.display().to_string(),
            ));
        }

        let mut pending = Vec::new();

        for entry in WalkDir::new(styles_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            let Some(format) = Format::from_path(path) else {
                continue;
            };

            // Skip drafts
            let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if filename.contains(".draft.") {
                continue;
            }

            match read_manifest(path, format) {
                Ok(defs) => pending.extend(defs.into_iter().map(|def| Pending {
                    def,
                    source_path: Some(path.to_path_buf()),
                })),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        let count = self.resolve(pending)?;
        tracing::info!("Loaded {} components from {}", count, styles_dir.display());

        Ok(count)
    }

    /// Load a single manifest file.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, ManifestError> {
        let format = Format::from_path(path).unwrap_or(Format::Toml);
        let defs = read_manifest(path, format)?;

        self.resolve(
            defs.into_iter()
                .map(|def| Pending {
                    def,
                    source_path: Some(path.to_path_buf()),
                })
                .collect(),
        )
    }

    /// Add in-memory definitions.
    pub fn add_defs(&mut self, defs: Vec<ComponentDef>) -> Result<usize, ManifestError> {
        self.resolve(
            defs.into_iter()
                .map(|def| Pending {
                    def,
                    source_path: None,
                })
                .collect(),
        )
    }

    /// Look up a component by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&LoadedComponent> {
        self.components.get(&name.to_lowercase())
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(&name.to_lowercase())
    }

    /// All component names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.values().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Validate a batch and build every definition in dependency order.
    fn resolve(&mut self, batch: Vec<Pending>) -> Result<usize, ManifestError> {
        let mut pending: IndexMap<String, Pending> = IndexMap::with_capacity(batch.len());

        for item in batch {
            item.def.validate()?;

            let key = item.def.name.to_lowercase();
            if self.components.contains_key(&key) || pending.contains_key(&key) {
                return Err(ManifestError::Duplicate(item.def.name));
            }
            pending.insert(key, item);
        }

        let keys: Vec<String> = pending.keys().cloned().collect();
        let mut chain = Vec::new();
        for key in &keys {
            if let Err(e) = self.build(key, &mut pending, &mut chain) {
                // Every key in the batch is new; drop the ones already built
                for key in &keys {
                    self.components.remove(key);
                }
                return Err(e);
            }
        }

        Ok(keys.len())
    }

    /// Build `key`, building its base first if needed.
    fn build(
        &mut self,
        key: &str,
        pending: &mut IndexMap<String, Pending>,
        chain: &mut Vec<String>,
    ) -> Result<StyledComponent, ManifestError> {
        if let Some(loaded) = self.components.get(key) {
            return Ok(loaded.component.clone());
        }

        let Some(item) = pending.get(key) else {
            return Err(ManifestError::UnknownBase {
                name: chain.last().cloned().unwrap_or_default(),
                base: key.to_string(),
            });
        };

        let name = item.def.name.clone();
        let (tag, extends) = (item.def.tag.clone(), item.def.extends.clone());

        if chain.iter().any(|k| k.to_lowercase() == key) {
            chain.push(name);
            return Err(ManifestError::Cycle(chain.join(" -> ")));
        }

        let target = match (tag, extends) {
            (Some(tag), _) => Target::Tag(tag),
            (None, Some(base)) => {
                let base_key = base.to_lowercase();
                if !self.components.contains_key(&base_key) && !pending.contains_key(&base_key) {
                    return Err(ManifestError::UnknownBase { name, base });
                }

                chain.push(name);
                let base_component = self.build(&base_key, pending, chain)?;
                chain.pop();
                Target::Styled(base_component)
            }
            (None, None) => return Err(ManifestError::MissingTarget(name)),
        };

        let Some(Pending { def, source_path }) = pending.shift_remove(key) else {
            return Err(ManifestError::UnknownBase {
                name: chain.last().cloned().unwrap_or_default(),
                base: key.to_string(),
            });
        };

        let component = build_component(&def, target, &self.registry)?;
        tracing::debug!("Built {} as {}", def.name, component);

        self.components.insert(
            key.to_string(),
            LoadedComponent {
                name: def.name.clone(),
                source_path,
                def,
                component: component.clone(),
            },
        );

        Ok(component)
    }
}

fn read_manifest(path: &Path, format: Format) -> Result<Vec<ComponentDef>, ManifestError> {
    let source = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_manifest(&source, format, &path.display().to_string())
}

/// Fold one definition onto `target` through the styled builder.
pub fn build_component(
    def: &ComponentDef,
    target: Target,
    registry: &Arc<IdRegistry>,
) -> Result<StyledComponent, ManifestError> {
    let mut builder = styled(target)
        .map_err(|source| ManifestError::Styled {
            name: def.name.clone(),
            source,
        })?
        .registry(Arc::clone(registry));

    if !def.attrs.is_empty() {
        builder = builder.attrs(def.attrs.clone());
    }
    if !def.variants.is_empty() {
        builder = builder.variants(def.variants.clone());
    }

    let mut config = StyledConfig::new().display_name(def.name.as_str());
    if let Some(id) = &def.component_id {
        config = config.component_id(id.as_str());
    }
    config.should_forward_prop = def.forward.as_ref().map(|rule| rule.to_forward_prop());

    let component = builder
        .with_config(config)
        .build_with_class(def.class.as_deref().unwrap_or(""));

    if !def.defaults.is_empty() {
        component.set_default_props(def.defaults.clone());
    }

    Ok(component)
}

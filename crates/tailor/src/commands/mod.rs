//! CLI subcommands.

pub mod inspect;
pub mod list;
pub mod render;

use anyhow::Result;
use tailor_manifest::{Library, LoadedComponent};

use crate::config::ConfigFile;

/// Scan the configured library directory.
pub fn load_library(config: &ConfigFile) -> Result<Library> {
    let mut library = Library::new();
    library
        .scan(&config.library.dir)
        .map_err(|e| anyhow::anyhow!("Failed to load component library: {}", e))?;
    Ok(library)
}

/// Look up a component or fail with the available names.
pub fn find<'a>(library: &'a Library, name: &str) -> Result<&'a LoadedComponent> {
    library.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Component not found: {} (available: {})",
            name,
            library.names().join(", ")
        )
    })
}

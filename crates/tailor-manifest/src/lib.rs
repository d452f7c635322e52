//! Declarative component definitions.
//!
//! This crate reads component definitions from TOML and YAML manifest files
//! and folds them into a [`Library`] of styled components, resolving
//! `extends` chains so every base is built before the components that
//! wrap it.

pub mod library;
pub mod manifest;

pub use library::{build_component, Library, LoadedComponent};
pub use manifest::{parse_manifest, ComponentDef, Format, ForwardRule, ManifestError};

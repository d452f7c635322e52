//! Styled component definitions and their render pipeline.
//!
//! This crate builds styled component descriptors from a target (a tag name,
//! a host component, or another styled component), folds configuration
//! through wrapping, and at render time resolves attrs, selects variant
//! classes, filters props and hands a finished element to a [`Host`].

pub mod attrs;
pub mod builder;
pub mod component;
pub mod config;
pub mod emit;
pub mod host;
pub mod id;
pub mod markup;
pub mod project;
pub mod tags;
pub mod target;
pub mod value;
pub mod variants;

pub use attrs::resolve_attrs;
pub use builder::{styled, Styled};
pub use component::StyledComponent;
pub use config::{
    compose, generate_display_name, merge_variants, AttrsEntry, ComponentConfig, ForwardProp,
    StyledConfig, StyledError, StyledOptions, VariantTable,
};
pub use emit::{class_attribute, compose_class_names, emit, resolve_element_type};
pub use host::{hoist_statics, Host, RESERVED_STATICS};
pub use id::{escape, generate_component_id, IdRegistry};
pub use markup::{Element, TreeHost};
pub use project::{project, TRANSIENT_PREFIX};
pub use target::{HostComponent, NodeRef, RenderFn, Target};
pub use value::{deep_merge, Props, StyleMap, Value};
pub use variants::resolve_variants;

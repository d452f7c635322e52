//! List components in the library.

use anyhow::Result;
use tailor_manifest::Library;

use crate::config::ConfigFile;

/// Run the list command.
pub fn run(config: &ConfigFile) -> Result<()> {
    let library = super::load_library(config)?;

    for line in list_lines(&library) {
        println!("{line}");
    }

    Ok(())
}

/// One line per component: name, selector and what it renders.
fn list_lines(library: &Library) -> Vec<String> {
    library
        .names()
        .into_iter()
        .filter_map(|name| library.get(name))
        .map(|loaded| {
            let component = &loaded.component;
            let base = match &loaded.def.extends {
                Some(base) => format!("extends {base}"),
                None => format!("<{}>", component.target()),
            };
            format!("{}\t{}\t{}", loaded.name, component, base)
        })
        .collect()
}

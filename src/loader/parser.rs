//! YAML parser for source definitions

use crate::error::{Error, Result};
use crate::loader::types::SourceDefinition;
use std::fs;
use std::path::Path;

/// Load a source definition from a YAML file
pub fn load_source(path: impl AsRef<Path>) -> Result<SourceDefinition> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read source file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_source_from_str(&content)
}

/// Load a source definition from a YAML string
pub fn load_source_from_str(yaml: &str) -> Result<SourceDefinition> {
    let def: SourceDefinition = serde_yaml::from_str(yaml)?;

    validate_source(&def)?;
    Ok(def)
}

fn validate_source(def: &SourceDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(Error::config("Source name cannot be empty"));
    }

    if def.database.trim().is_empty() {
        return Err(Error::missing_field("database"));
    }

    match (&def.table, &def.query) {
        (Some(_), Some(_)) => Err(Error::config(format!(
            "Source '{}' defines both 'table' and 'query'",
            def.name
        ))),
        (None, None) => Err(Error::config(format!(
            "Source '{}' must define either 'table' or 'query'",
            def.name
        ))),
        _ => Ok(()),
    }
}

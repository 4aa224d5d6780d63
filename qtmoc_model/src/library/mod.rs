//! Library modules: class models of the Qt types applications derive from.
//!
//! Modules are plain JSON documents. Two ship with the crate; more can be
//! supplied at run time and are keyed by their lower-cased name.

use serde::{Deserialize, Serialize};

use crate::class::ClassRecord;
use crate::error::ModelError;

const CORE: &str = include_str!("core.json");
const WIDGETS: &str = include_str!("widgets.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryModule {
    /// Taken from the file stem when loaded from a directory.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
}

impl LibraryModule {
    /// Parses a module; `module` names it in errors.
    pub fn from_json(module: &str, text: &str) -> Result<Self, ModelError> {
        serde_json::from_str(text).map_err(|source| ModelError::Library {
            module: module.to_string(),
            source,
        })
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self).map_err(|source| ModelError::Library {
            module: self.name.clone(),
            source,
        })
    }
}

/// The built-in `core` and `widgets` modules.
pub fn builtin_modules() -> Result<Vec<LibraryModule>, ModelError> {
    Ok(vec![
        LibraryModule::from_json("core", CORE)?,
        LibraryModule::from_json("widgets", WIDGETS)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_parse() {
        let modules = builtin_modules().unwrap();
        assert_eq!(modules[0].name, "Core");
        assert!(modules[0].classes.iter().any(|c| c.name == "QObject"));
        assert_eq!(modules[1].name, "Widgets");
    }
}

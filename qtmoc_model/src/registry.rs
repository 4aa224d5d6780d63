//! Name → class table for one generation run.
//!
//! The registry is owned by the run and handed to each stage by reference.
//! Iteration follows insertion order, which keeps generated output stable.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::class::ClassRecord;
use crate::library::LibraryModule;

/// Module name of every class discovered in the target directory.
pub const MAIN_MODULE: &str = "main";

/// The root of Qt's reflective object hierarchy.
pub const ROOT_OBJECT: &str = "QObject";

#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: IndexMap<String, ClassRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with library modules, in order.
    pub fn with_libraries(modules: impl IntoIterator<Item = LibraryModule>) -> Self {
        let mut registry = Self::new();
        for module in modules {
            registry.load_library(module);
        }
        registry
    }

    /// Adds every class of a library module under its lower-cased name.
    pub fn load_library(&mut self, module: LibraryModule) {
        let key = module.name.to_lowercase();
        tracing::event!(
            tracing::Level::DEBUG,
            "Loading library module {} ({} classes)",
            key,
            module.classes.len()
        );
        for mut class in module.classes {
            class.module = key.clone();
            class.normalize();
            self.insert(class);
        }
    }

    /// Inserts or replaces a class, returning the one it replaced.
    pub fn insert(&mut self, class: ClassRecord) -> Option<ClassRecord> {
        self.classes.insert(class.name.clone(), class)
    }

    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassRecord> {
        self.classes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Removes a class, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<ClassRecord> {
        self.classes.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassRecord> {
        self.classes.values()
    }

    pub fn classes_in_module<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a ClassRecord> {
        self.classes.values().filter(move |c| c.module == module)
    }

    pub fn names_in_module(&self, module: &str) -> Vec<String> {
        self.classes_in_module(module).map(|c| c.name.clone()).collect()
    }

    /// Whether `name` is [`ROOT_OBJECT`] or derives from it through bases
    /// known to the registry. A cyclic base chain is not a subclass.
    pub fn is_object_subclass(&self, name: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = name;
        loop {
            if current == ROOT_OBJECT {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            match self.get(current).and_then(|c| c.base.as_deref()) {
                Some(base) if self.contains(base) || base == ROOT_OBJECT => current = base,
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_bases_terminate() {
        let mut registry = Registry::new();
        registry.insert(ClassRecord::new("A", MAIN_MODULE).with_base("B"));
        registry.insert(ClassRecord::new("B", MAIN_MODULE).with_base("A"));
        assert!(!registry.is_object_subclass("A"));
    }

    #[test]
    fn removal_keeps_order() {
        let mut registry = Registry::new();
        for name in ["A", "B", "C"] {
            registry.insert(ClassRecord::new(name, MAIN_MODULE));
        }
        registry.remove("B");
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}

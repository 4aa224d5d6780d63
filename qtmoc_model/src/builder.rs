//! Builds class records from scanned Go files.

use qtmoc_scan::{FieldDecl, SourceFile};

use crate::class::ClassRecord;
use crate::error::ModelError;
use crate::registry::{MAIN_MODULE, Registry};
use crate::tag::parse_field_member;
use crate::types::map_type;

/// Adds the struct types of the target directory to a registry.
///
/// Class shells are registered for all files before any member is
/// attached, so signature parsing can tell discovered type names from
/// parameter names regardless of file order.
pub struct ClassModelBuilder<'r> {
    registry: &'r mut Registry,
    discovered: Vec<String>,
}

impl<'r> ClassModelBuilder<'r> {
    pub fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            discovered: Vec::new(),
        }
    }

    /// Registers every struct and its base, then attaches the tagged members.
    pub fn build(mut self, files: &[SourceFile]) -> Result<Vec<String>, ModelError> {
        for file in files {
            self.register_classes(file)?;
        }
        for file in files {
            self.attach_members(file);
        }
        tracing::event!(
            tracing::Level::INFO,
            "Discovered {} classes",
            self.discovered.len()
        );
        Ok(self.discovered)
    }

    fn register_classes(&mut self, file: &SourceFile) -> Result<(), ModelError> {
        for (decl, fields) in file.structs() {
            if let Some(existing) = self.registry.get(&decl.name) {
                if existing.module == MAIN_MODULE {
                    return Err(ModelError::DuplicateClass {
                        name: decl.name.clone(),
                    });
                }
                tracing::event!(
                    tracing::Level::DEBUG,
                    "{} shadows library class from module {}",
                    decl.name,
                    existing.module
                );
            }

            let mut class = ClassRecord::new(&decl.name, MAIN_MODULE);
            class.base = base_class(&decl.name, fields);
            self.registry.insert(class);
            self.discovered.push(decl.name.clone());
        }
        Ok(())
    }

    fn attach_members(&mut self, file: &SourceFile) {
        for (decl, fields) in file.structs() {
            let registry = &*self.registry;
            let members: Vec<_> = fields
                .iter()
                .filter(|f| !f.is_embedded())
                .filter_map(|f| {
                    let tag = f.tag_text()?;
                    parse_field_member(&decl.name, &tag, &f.type_text, registry)
                })
                .collect();

            if let Some(class) = self.registry.get_mut(&decl.name) {
                class.members.extend(members);
            }
        }
    }
}

/// Base named by the embedded fields of a struct; the last one wins.
fn base_class(class: &str, fields: &[FieldDecl]) -> Option<String> {
    let mut base = None;
    for field in fields.iter().filter(|f| f.is_embedded()) {
        let name = embedded_type_name(&field.type_text);
        if let Some(previous) = &base {
            tracing::event!(
                tracing::Level::DEBUG,
                "{}: embedded {} replaces {} as base",
                class,
                name,
                previous
            );
        }
        base = Some(name);
    }
    base
}

/// `pkg.T` and `*pkg.T` give `T`; `*T` gives `T`.
fn embedded_type_name(type_text: &str) -> String {
    let text = type_text.trim();
    let text = text.strip_prefix('*').unwrap_or(text).trim_start();
    text.rsplit('.').next().unwrap_or(text).to_string()
}

/// Maps the Go parameter and result types of every discovered member.
///
/// Unmapped types degrade to `void` with a warning. Returns how many types
/// could not be mapped.
pub fn map_member_types(registry: &mut Registry) -> usize {
    let mut unmapped = 0;

    for name in registry.names_in_module(MAIN_MODULE) {
        let Some(mut class) = registry.get(&name).cloned() else {
            continue;
        };

        for member in &mut class.members {
            for param in &mut member.params {
                let native = map_type(registry, &param.host_type);
                if !native.is_known() {
                    unmapped += 1;
                    tracing::warn!(
                        "{}: parameter {} has unmapped type {:?}, using void",
                        member.fullname,
                        param.name,
                        param.host_type
                    );
                }
                param.native_type = native.as_str().to_string();
            }

            if let Some(result) = &member.host_return {
                let native = map_type(registry, result);
                if !native.is_known() {
                    unmapped += 1;
                    tracing::warn!(
                        "{}: unmapped return type {:?}, using void",
                        member.fullname,
                        result
                    );
                }
                member.return_type = native.as_str().to_string();
            }
        }

        if let Some(slot) = registry.get_mut(&name) {
            *slot = class;
        }
    }

    unmapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_names() {
        assert_eq!(embedded_type_name("*core.QObject"), "QObject");
        assert_eq!(embedded_type_name("core.QObject"), "QObject");
        assert_eq!(embedded_type_name("*Base"), "Base");
        assert_eq!(embedded_type_name("Base"), "Base");
    }
}

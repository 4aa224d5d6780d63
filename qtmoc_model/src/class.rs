//! Class, member and parameter records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Meta category of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberCategory {
    Signal,
    Slot,
    Constructor,
    Destructor,
}

impl MemberCategory {
    /// Constructors and destructors, the members passed down to subclasses.
    pub fn is_inherited(self) -> bool {
        matches!(self, MemberCategory::Constructor | MemberCategory::Destructor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemberCategory::Signal => "signal",
            MemberCategory::Slot => "slot",
            MemberCategory::Constructor => "constructor",
            MemberCategory::Destructor => "destructor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Virtuality {
    #[default]
    NonVirtual,
    Virtual,
    PureVirtual,
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
    /// Go spelling of the type; empty for library members.
    #[serde(default)]
    pub host_type: String,
    /// Qt spelling of the type, filled in by the mapping pass.
    #[serde(default)]
    pub native_type: String,
}

impl ParameterRecord {
    pub fn new(name: impl Into<String>, host_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host_type: host_type.into(),
            native_type: String::new(),
        }
    }

    pub fn native(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host_type: String::new(),
            native_type: native_type.into(),
        }
    }
}

/// A signal, slot, constructor or destructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    /// `Class::name`; derived from the owning class when omitted in a
    /// library file.
    #[serde(default)]
    pub fullname: String,
    pub category: MemberCategory,
    #[serde(default = "void")]
    pub return_type: String,
    /// Go spelling of a slot's result, if it has one.
    #[serde(default)]
    pub host_return: Option<String>,
    #[serde(default)]
    pub params: Vec<ParameterRecord>,
    #[serde(default)]
    pub virtuality: Virtuality,
}

fn void() -> String {
    "void".to_string()
}

impl MemberRecord {
    #[contracts::debug_requires(!class.is_empty() && !name.is_empty())]
    pub fn new(class: &str, name: &str, category: MemberCategory) -> Self {
        Self {
            name: name.to_string(),
            fullname: format!("{class}::{name}"),
            category,
            return_type: void(),
            host_return: None,
            params: Vec::new(),
            virtuality: Virtuality::NonVirtual,
        }
    }

    /// Owning class, taken from the qualified name.
    pub fn class_name(&self) -> &str {
        self.fullname
            .split_once("::")
            .map_or(self.fullname.as_str(), |(class, _)| class)
    }

    /// Copy of an inherited constructor or destructor re-homed on `derived`.
    ///
    /// `Base` becomes `Derived` and `~Base` becomes `~Derived`; any other
    /// name is kept.
    pub fn renamed_for(&self, derived: &str) -> Self {
        let base = self.class_name();
        let name = if self.name == base {
            derived.to_string()
        } else if self.name.strip_prefix('~') == Some(base) {
            format!("~{derived}")
        } else {
            self.name.clone()
        };

        Self {
            fullname: format!("{derived}::{name}"),
            name,
            ..self.clone()
        }
    }
}

/// A discovered or library-provided class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}

impl ClassRecord {
    #[contracts::debug_requires(!name.is_empty())]
    pub fn new(name: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::Public,
            module: module.to_string(),
            base: None,
            members: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn with_member(mut self, member: MemberRecord) -> Self {
        self.members.push(member);
        self
    }

    pub fn has_member(&self, fullname: &str) -> bool {
        self.members.iter().any(|m| m.fullname == fullname)
    }

    pub fn members_of(&self, category: MemberCategory) -> impl Iterator<Item = &MemberRecord> {
        self.members.iter().filter(move |m| m.category == category)
    }

    /// Fills in qualified names missing from hand-written library entries.
    pub(crate) fn normalize(&mut self) {
        for member in &mut self.members {
            if member.fullname.is_empty() {
                member.fullname = format!("{}::{}", self.name, member.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renaming_constructor_and_destructor() {
        let ctor = MemberRecord::new("Base", "Base", MemberCategory::Constructor);
        let dtor = MemberRecord::new("Base", "~Base", MemberCategory::Destructor);

        let ctor = ctor.renamed_for("Derived");
        assert_eq!(ctor.name, "Derived");
        assert_eq!(ctor.fullname, "Derived::Derived");

        let dtor = dtor.renamed_for("Derived");
        assert_eq!(dtor.name, "~Derived");
        assert_eq!(dtor.fullname, "Derived::~Derived");
    }

    #[test]
    fn renaming_leaves_other_names() {
        let init = MemberRecord::new("Base", "init", MemberCategory::Constructor);
        assert_eq!(init.renamed_for("Derived").fullname, "Derived::init");
    }

    #[test]
    fn class_name_from_fullname() {
        let m = MemberRecord::new("QObject", "destroyed", MemberCategory::Signal);
        assert_eq!(m.class_name(), "QObject");
    }
}

//! Rendering of the class model into the three generated artifacts.
//!
//! The driver only knows the [`Emitter`] seam; [`TemplateEmitter`] is the
//! default renderer. Every emitter must be deterministic: the same model
//! yields byte-identical artifacts.

mod boundary;
mod cpp;
mod glue;

use std::collections::BTreeSet;

use qtmoc_model::{ClassRecord, MAIN_MODULE, MemberCategory, MemberRecord, Registry};
use thiserror::Error;

use boundary::Boundary;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("Cannot emit {class}: {reason}")]
    Unsupported { class: String, reason: String },
}

/// Everything an emitter may read.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Fully resolved registry; only `main` classes are emitted.
    pub registry: &'a Registry,
    /// Go package the glue file belongs to.
    pub package: &'a str,
    /// pkg-config packages for the cgo preamble.
    pub pkg_config: &'a [String],
}

impl<'a> EmitContext<'a> {
    #[contracts::debug_requires(!package.is_empty())]
    pub fn new(registry: &'a Registry, package: &'a str, pkg_config: &'a [String]) -> Self {
        Self {
            registry,
            package,
            pkg_config,
        }
    }

    /// Discovered classes, every base ahead of its subclasses.
    pub fn classes(&self) -> Vec<&'a ClassRecord> {
        ordered_classes(self.registry)
    }
}

/// Contents of `moc.cpp`, `moc.h` and `moc.go`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Artifacts {
    pub cpp: String,
    pub header: String,
    pub glue: String,
}

pub trait Emitter {
    fn emit(&self, ctx: &EmitContext<'_>) -> Result<Artifacts, EmitError>;
}

/// Renders the artifacts from fixed text templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEmitter;

impl TemplateEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Emitter for TemplateEmitter {
    fn emit(&self, ctx: &EmitContext<'_>) -> Result<Artifacts, EmitError> {
        let classes = ctx.classes();
        for class in &classes {
            if class.base.is_none() {
                return Err(EmitError::Unsupported {
                    class: class.name.clone(),
                    reason: "class has no base to derive from".to_string(),
                });
            }
        }

        let artifacts = Artifacts {
            cpp: cpp::render_source(ctx.registry, &classes)?,
            header: cpp::render_header(ctx.registry, &classes)?,
            glue: glue::render_glue(ctx, &classes)?,
        };
        tracing::event!(
            tracing::Level::DEBUG,
            "Rendered {} classes: {} bytes of C++, {} bytes of header, {} bytes of Go",
            classes.len(),
            artifacts.cpp.len(),
            artifacts.header.len(),
            artifacts.glue.len()
        );
        Ok(artifacts)
    }
}

fn ordered_classes(registry: &Registry) -> Vec<&ClassRecord> {
    let mut pending: Vec<&ClassRecord> = registry.classes_in_module(MAIN_MODULE).collect();
    let mut done: BTreeSet<&str> = BTreeSet::new();
    let mut ordered = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|&class| {
            let ready = match class.base.as_deref() {
                Some(base) => {
                    done.contains(base)
                        || registry.get(base).is_none_or(|b| b.module != MAIN_MODULE)
                        || base == class.name
                }
                None => true,
            };
            if ready {
                done.insert(class.name.as_str());
                ordered.push(class);
            }
            !ready
        });
        if pending.len() == before {
            // Cyclic bases; keep declaration order for the rest.
            ordered.append(&mut pending);
        }
    }
    ordered
}

/// One member with its C-level names worked out.
#[derive(Debug, Clone)]
pub(crate) struct Binding<'a> {
    pub member: &'a MemberRecord,
    /// Suffix of the wrapper names, e.g. `Clicked` or `NewWindow2`.
    pub suffix: String,
    pub params: Vec<BoundParam>,
    pub result: Boundary,
}

#[derive(Debug, Clone)]
pub(crate) struct BoundParam {
    pub name: String,
    pub boundary: Boundary,
}

impl Binding<'_> {
    pub fn returns_value(&self) -> bool {
        self.member.category == MemberCategory::Slot && self.member.return_type != "void"
    }

    /// `Window_Clicked`, the name of the C wrapper.
    pub fn wrapper(&self, class: &str) -> String {
        format!("{class}_{}", self.suffix)
    }

    /// `callbackWindow_Clicked`, the Go function C++ calls back into.
    pub fn callback(&self, class: &str) -> String {
        format!("callback{class}_{}", self.suffix)
    }

    /// Receiver pointer first, except for constructors.
    pub fn c_params(&self) -> String {
        let mut out = Vec::with_capacity(self.params.len() + 1);
        if self.member.category != MemberCategory::Constructor {
            out.push("void* ptr".to_string());
        }
        out.extend(
            self.params
                .iter()
                .map(|p| format!("{} {}", p.boundary.c_type(), p.name)),
        );
        out.join(", ")
    }

    pub fn cpp_params(&self) -> String {
        self.params
            .iter()
            .map(|p| format!("{} {}", p.boundary.cpp_type(), p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn c_result(&self) -> &'static str {
        if self.returns_value() {
            self.result.c_type()
        } else {
            "void"
        }
    }

    pub fn cpp_result(&self) -> String {
        if self.returns_value() {
            self.result.cpp_type()
        } else {
            "void".to_string()
        }
    }
}

/// Bindings for the members of `class` in declaration order.
pub(crate) fn bindings<'a>(registry: &Registry, class: &'a ClassRecord) -> Vec<Binding<'a>> {
    let constructors = class.members_of(MemberCategory::Constructor).count();
    let mut seen_constructors = 0;

    class
        .members
        .iter()
        .map(|member| {
            let suffix = match member.category {
                MemberCategory::Constructor => {
                    seen_constructors += 1;
                    if constructors > 1 && seen_constructors > 1 {
                        format!("New{}{}", class.name, seen_constructors)
                    } else {
                        format!("New{}", class.name)
                    }
                }
                MemberCategory::Destructor => format!("Destroy{}", class.name),
                MemberCategory::Signal | MemberCategory::Slot => upper_first(&member.name),
            };
            let params = member
                .params
                .iter()
                .enumerate()
                .map(|(i, p)| BoundParam {
                    name: param_name(&p.name, i),
                    boundary: Boundary::of(registry, &p.native_type),
                })
                .collect();
            Binding {
                member,
                suffix,
                params,
                result: Boundary::of(registry, &member.return_type),
            }
        })
        .collect()
}

/// Library classes the generated source refers to, for `#include` lines.
pub(crate) fn referenced_library_classes(registry: &Registry, classes: &[&ClassRecord]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut note = |name: &str| {
        let name = name.trim_end_matches('*');
        if let Some(class) = registry.get(name) {
            if class.module != MAIN_MODULE {
                names.insert(class.name.clone());
            }
        }
    };

    for class in classes {
        if let Some(base) = &class.base {
            note(base);
        }
        for member in &class.members {
            note(&member.return_type);
            for param in &member.params {
                note(&param.native_type);
            }
        }
    }
    names
}

pub(crate) fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parameter names usable in C, C++ and Go alike.
fn param_name(name: &str, index: usize) -> String {
    const RESERVED: &[&str] = &[
        "C", "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool",
        "catch", "char", "char16_t", "char32_t", "char8_t", "class", "co_await", "co_return",
        "co_yield", "compl", "concept", "const_cast", "consteval", "constexpr", "constinit",
        "decltype", "delete", "do", "double", "dynamic_cast", "emit", "enum", "explicit",
        "export", "extern", "f", "float", "friend", "inline", "int", "long", "mocResult",
        "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "ok", "operator",
        "or", "or_eq", "private", "protected", "ptr", "public", "register", "reinterpret_cast",
        "requires", "short", "signals", "signed", "sizeof", "slots", "static", "static_assert",
        "static_cast", "template", "this", "thread_local", "throw", "try", "typedef", "typeid",
        "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t",
        "while", "xor", "xor_eq", "zero",
    ];

    if name.is_empty() || name == "_" {
        format!("v{index}")
    } else if RESERVED.contains(&name) {
        format!("{name}{index}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use qtmoc_model::{ParameterRecord, ROOT_OBJECT};

    use super::*;

    #[test]
    fn bases_come_first() {
        let mut registry = Registry::new();
        registry.insert(ClassRecord::new(ROOT_OBJECT, "core"));
        registry.insert(ClassRecord::new("Leaf", MAIN_MODULE).with_base("Mid"));
        registry.insert(ClassRecord::new("Mid", MAIN_MODULE).with_base("Root"));
        registry.insert(ClassRecord::new("Root", MAIN_MODULE).with_base(ROOT_OBJECT));

        let names: Vec<_> = ordered_classes(&registry)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Root", "Mid", "Leaf"]);
    }

    #[test]
    fn reserved_parameter_names_are_renamed() {
        assert_eq!(param_name("new", 1), "new1");
        assert_eq!(param_name("C", 0), "C0");
        for keyword in ["asm", "export", "typeid", "nullptr", "constexpr", "decltype", "noexcept", "bitand"] {
            assert_eq!(param_name(keyword, 3), format!("{keyword}3"));
        }
        assert_eq!(param_name("_", 0), "v0");
        assert_eq!(param_name("label", 2), "label");
    }

    #[test]
    fn overloaded_constructors_get_distinct_wrappers() {
        let registry = Registry::new();
        let mut first = MemberRecord::new("W", "W", MemberCategory::Constructor);
        first.params = vec![ParameterRecord::native("parent", "QObject*")];
        let second = MemberRecord::new("W", "W", MemberCategory::Constructor);
        let class = ClassRecord::new("W", MAIN_MODULE)
            .with_member(first)
            .with_member(second);

        let suffixes: Vec<_> = bindings(&registry, &class)
            .into_iter()
            .map(|b| b.suffix)
            .collect();
        assert_eq!(suffixes, vec!["NewW", "NewW2"]);
    }
}

//! Go → Qt type mapping.

use std::fmt;

use crate::registry::Registry;

/// Result of mapping a Go type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Known(String),
    /// No Qt equivalent; rendered as `void`.
    Unmapped,
}

impl NativeType {
    pub fn as_str(&self) -> &str {
        match self {
            NativeType::Known(t) => t,
            NativeType::Unmapped => "void",
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, NativeType::Known(_))
    }

    /// Object types are passed by pointer.
    pub fn is_pointer(&self) -> bool {
        self.as_str().ends_with('*')
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn primitive(go_type: &str) -> Option<&'static str> {
    match go_type {
        "string" => Some("QString"),
        "[]string" => Some("QStringList"),
        "unsafe.Pointer" | "uintptr" => Some("void*"),
        "bool" => Some("bool"),
        "int" => Some("int"),
        "float64" => Some("qreal"),
        "int64" => Some("qint64"),
        _ => None,
    }
}

/// Maps a Go type expression to its Qt spelling.
///
/// Rules apply in order: one leading `*` is dropped, primitives come from a
/// fixed table, a package qualifier is cut to its last component, `__`
/// becomes `::`, and anything else is looked up in the registry. Known
/// `QObject` subclasses map to a pointer, other known classes map by value.
pub fn map_type(registry: &Registry, go_type: &str) -> NativeType {
    let go_type = go_type.trim();
    let go_type = go_type.strip_prefix('*').unwrap_or(go_type);

    if let Some(native) = primitive(go_type) {
        return NativeType::Known(native.to_string());
    }

    let local = go_type.rsplit('.').next().unwrap_or(go_type);

    if local.contains("__") {
        return NativeType::Known(local.replace("__", "::"));
    }

    match registry.get(local) {
        Some(_) if registry.is_object_subclass(local) => NativeType::Known(format!("{local}*")),
        Some(_) => NativeType::Known(local.to_string()),
        None => NativeType::Unmapped,
    }
}

/// Whether a lone parameter token names a type rather than a parameter.
pub(crate) fn is_type_name(registry: &Registry, token: &str) -> bool {
    map_type(registry, token).is_known()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifier_then_nested_name() {
        let registry = Registry::new();
        assert_eq!(
            map_type(&registry, "*widgets.QAbstractItemView__EditTrigger"),
            NativeType::Known("QAbstractItemView::EditTrigger".to_string())
        );
    }

    #[test]
    fn empty_type_is_unmapped() {
        assert_eq!(map_type(&Registry::new(), ""), NativeType::Unmapped);
        assert_eq!(NativeType::Unmapped.to_string(), "void");
    }
}

//! How each Qt type crosses the C boundary between the C++ and Go halves.

use qtmoc_model::{MAIN_MODULE, Registry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Boundary {
    Text,
    TextList,
    Bool,
    Int,
    Real,
    Int64,
    RawPointer,
    /// A `QObject` subclass, passed as a pointer.
    Object(String),
    /// A known value class, passed as a pointer to a copy.
    Value(String),
    /// A nested name such as an enum, passed as an integer.
    Scoped(String),
    /// Unmapped; an untyped pointer placeholder.
    Opaque,
}

impl Boundary {
    pub(crate) fn of(registry: &Registry, native: &str) -> Self {
        match native {
            "QString" => Boundary::Text,
            "QStringList" => Boundary::TextList,
            "bool" => Boundary::Bool,
            "int" => Boundary::Int,
            "qreal" => Boundary::Real,
            "qint64" => Boundary::Int64,
            "void*" => Boundary::RawPointer,
            "void" | "" => Boundary::Opaque,
            _ if native.contains("::") => Boundary::Scoped(native.to_string()),
            _ => match native.strip_suffix('*') {
                Some(class) if registry.contains(class) => Boundary::Object(class.to_string()),
                None if registry.get(native).is_some_and(|c| c.module != MAIN_MODULE) => {
                    Boundary::Value(native.to_string())
                }
                _ => Boundary::Opaque,
            },
        }
    }

    /// Type in C++ declarations.
    pub(crate) fn cpp_type(&self) -> String {
        match self {
            Boundary::Text => "QString".to_string(),
            Boundary::TextList => "QStringList".to_string(),
            Boundary::Bool => "bool".to_string(),
            Boundary::Int => "int".to_string(),
            Boundary::Real => "qreal".to_string(),
            Boundary::Int64 => "qint64".to_string(),
            Boundary::RawPointer | Boundary::Opaque => "void*".to_string(),
            Boundary::Object(class) => format!("{class}*"),
            Boundary::Value(class) | Boundary::Scoped(class) => class.clone(),
        }
    }

    /// Type in the `extern "C"` prototypes.
    pub(crate) fn c_type(&self) -> &'static str {
        match self {
            Boundary::Text | Boundary::TextList => "char*",
            Boundary::Bool => "char",
            Boundary::Int => "int",
            Boundary::Real => "double",
            Boundary::Int64 | Boundary::Scoped(_) => "long long",
            Boundary::RawPointer | Boundary::Object(_) | Boundary::Value(_) | Boundary::Opaque => {
                "void*"
            }
        }
    }

    /// Type cgo gives the C prototype type.
    pub(crate) fn cgo_type(&self) -> &'static str {
        match self {
            Boundary::Text | Boundary::TextList => "*C.char",
            Boundary::Bool => "C.char",
            Boundary::Int => "C.int",
            Boundary::Real => "C.double",
            Boundary::Int64 | Boundary::Scoped(_) => "C.longlong",
            Boundary::RawPointer | Boundary::Object(_) | Boundary::Value(_) | Boundary::Opaque => {
                "unsafe.Pointer"
            }
        }
    }

    /// Type exposed to Go callers.
    pub(crate) fn go_type(&self) -> &'static str {
        match self {
            Boundary::Text => "string",
            Boundary::TextList => "[]string",
            Boundary::Bool => "bool",
            Boundary::Int => "int",
            Boundary::Real => "float64",
            Boundary::Int64 | Boundary::Scoped(_) => "int64",
            Boundary::RawPointer | Boundary::Object(_) | Boundary::Value(_) | Boundary::Opaque => {
                "unsafe.Pointer"
            }
        }
    }

    /// Whether the Go side needs the length-prefixed list codec.
    pub(crate) fn needs_list_codec(&self) -> bool {
        matches!(self, Boundary::TextList)
    }

    /// C++: C value → Qt value. An `owned` C string is freed once read.
    pub(crate) fn cpp_from_c(&self, expr: &str, owned: bool) -> String {
        match self {
            Boundary::Text if owned => format!("moc_take_string({expr})"),
            Boundary::Text => format!("QString::fromUtf8({expr})"),
            Boundary::TextList if owned => format!("moc_take_list({expr})"),
            Boundary::TextList => format!("moc_split_list({expr})"),
            Boundary::Bool => format!("{expr} != 0"),
            Boundary::Object(class) => format!("static_cast<{class}*>({expr})"),
            Boundary::Value(class) => format!("*static_cast<{class}*>({expr})"),
            Boundary::Scoped(name) => format!("static_cast<{name}>({expr})"),
            Boundary::Int | Boundary::Real | Boundary::Int64 | Boundary::RawPointer | Boundary::Opaque => {
                expr.to_string()
            }
        }
    }

    /// C++: Qt value → C value. `owned` results are `malloc`ed for the receiver to free.
    pub(crate) fn cpp_to_c(&self, expr: &str, owned: bool) -> String {
        match self {
            Boundary::Text if owned => format!("moc_strdup({expr}.toUtf8())"),
            Boundary::Text => format!("const_cast<char*>({expr}.toUtf8().constData())"),
            Boundary::TextList if owned => format!("moc_strdup(moc_join_list({expr}))"),
            Boundary::TextList => format!("const_cast<char*>(moc_join_list({expr}).constData())"),
            Boundary::Value(class) => format!("new {class}({expr})"),
            Boundary::Scoped(_) => format!("static_cast<long long>({expr})"),
            Boundary::Bool
            | Boundary::Int
            | Boundary::Real
            | Boundary::Int64
            | Boundary::RawPointer
            | Boundary::Object(_)
            | Boundary::Opaque => expr.to_string(),
        }
    }

    /// Go: cgo value → Go value.
    pub(crate) fn go_from_c(&self, expr: &str) -> String {
        match self {
            Boundary::Text => format!("C.GoString({expr})"),
            Boundary::TextList => format!("mocSplitList(C.GoString({expr}))"),
            Boundary::Bool => format!("{expr} != 0"),
            Boundary::Int => format!("int({expr})"),
            Boundary::Real => format!("float64({expr})"),
            Boundary::Int64 | Boundary::Scoped(_) => format!("int64({expr})"),
            Boundary::RawPointer | Boundary::Object(_) | Boundary::Value(_) | Boundary::Opaque => {
                expr.to_string()
            }
        }
    }

    /// Go: Go value → cgo value. Text is handled through temporaries.
    pub(crate) fn go_to_c(&self, expr: &str) -> String {
        match self {
            Boundary::Text => format!("C.CString({expr})"),
            Boundary::TextList => format!("C.CString(mocJoinList({expr}))"),
            Boundary::Bool => format!("mocBool({expr})"),
            Boundary::Int => format!("C.int({expr})"),
            Boundary::Real => format!("C.double({expr})"),
            Boundary::Int64 | Boundary::Scoped(_) => format!("C.longlong({expr})"),
            Boundary::RawPointer | Boundary::Object(_) | Boundary::Value(_) | Boundary::Opaque => {
                expr.to_string()
            }
        }
    }

    /// Whether the cgo value must be freed after the call.
    pub(crate) fn is_c_string(&self) -> bool {
        matches!(self, Boundary::Text | Boundary::TextList)
    }
}

#[cfg(test)]
mod tests {
    use qtmoc_model::{ClassRecord, ROOT_OBJECT};

    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.insert(ClassRecord::new(ROOT_OBJECT, "core"));
        registry.insert(ClassRecord::new("QPoint", "core"));
        registry.insert(ClassRecord::new("Settings", MAIN_MODULE));
        registry
    }

    #[test]
    fn classifies_native_types() {
        let registry = registry();
        assert_eq!(Boundary::of(&registry, "QString"), Boundary::Text);
        assert_eq!(
            Boundary::of(&registry, "QObject*"),
            Boundary::Object("QObject".to_string())
        );
        assert_eq!(
            Boundary::of(&registry, "QPoint"),
            Boundary::Value("QPoint".to_string())
        );
        assert_eq!(
            Boundary::of(&registry, "Qt::AlignmentFlag"),
            Boundary::Scoped("Qt::AlignmentFlag".to_string())
        );
        assert_eq!(Boundary::of(&registry, "void"), Boundary::Opaque);
        assert_eq!(Boundary::of(&registry, "Settings"), Boundary::Opaque);
    }

    #[test]
    fn placeholder_is_a_pointer() {
        assert_eq!(Boundary::Opaque.cpp_type(), "void*");
        assert_eq!(Boundary::Opaque.c_type(), "void*");
    }

    #[test]
    fn owned_strings_are_freed_by_the_receiver() {
        assert_eq!(Boundary::Text.cpp_from_c("raw", true), "moc_take_string(raw)");
        assert_eq!(Boundary::Text.cpp_from_c("raw", false), "QString::fromUtf8(raw)");
        assert_eq!(Boundary::Text.cpp_to_c("s", true), "moc_strdup(s.toUtf8())");
        assert!(!Boundary::Text.cpp_to_c("s", false).contains("moc_strdup"));
    }

    #[test]
    fn lists_use_the_length_prefixed_codec() {
        let list = Boundary::TextList;
        assert!(list.needs_list_codec());
        assert_eq!(list.cpp_from_c("raw", false), "moc_split_list(raw)");
        assert_eq!(list.cpp_to_c("l", true), "moc_strdup(moc_join_list(l))");
        assert_eq!(list.go_from_c("x"), "mocSplitList(C.GoString(x))");
        assert_eq!(list.go_to_c("x"), "C.CString(mocJoinList(x))");
        for encoded in [list.cpp_to_c("l", false), list.go_to_c("x")] {
            assert!(!encoded.contains('|'), "{encoded}");
        }
    }
}

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use qtmoc_model::{ClassRecord, MAIN_MODULE, NativeType, ROOT_OBJECT, Registry, map_type};
use rstest::rstest;

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.insert(ClassRecord::new(ROOT_OBJECT, "core"));
    registry.insert(ClassRecord::new("QWidget", "widgets").with_base(ROOT_OBJECT));
    registry.insert(ClassRecord::new("QPoint", "core"));
    registry.insert(ClassRecord::new("Window", MAIN_MODULE).with_base("QWidget"));
    registry.insert(ClassRecord::new("Settings", MAIN_MODULE));
    registry
}

#[rstest]
#[case("string", "QString")]
#[case("[]string", "QStringList")]
#[case("unsafe.Pointer", "void*")]
#[case("uintptr", "void*")]
#[case("bool", "bool")]
#[case("int", "int")]
#[case("float64", "qreal")]
#[case("int64", "qint64")]
fn test_primitive_table(#[case] go_type: &str, #[case] native: &str) {
    let registry = Registry::new();
    assert_eq!(map_type(&registry, go_type), NativeType::Known(native.to_string()));
    assert_eq!(
        map_type(&registry, &format!("*{go_type}")),
        NativeType::Known(native.to_string())
    );
}

#[rstest]
#[case("QObject", "QObject*")]
#[case("*QObject", "QObject*")]
#[case("widgets.QWidget", "QWidget*")]
#[case("*widgets.QWidget", "QWidget*")]
#[case("Window", "Window*")]
fn test_object_types_become_pointers(#[case] go_type: &str, #[case] native: &str) {
    assert_eq!(map_type(&registry(), go_type).as_str(), native);
}

#[rstest]
#[case("QPoint", "QPoint")]
#[case("*core.QPoint", "QPoint")]
#[case("Settings", "Settings")]
fn test_value_types_stay_bare(#[case] go_type: &str, #[case] native: &str) {
    let mapped = map_type(&registry(), go_type);
    assert_eq!(mapped.as_str(), native);
    assert!(!mapped.is_pointer());
}

#[rstest]
#[case("Qt__AlignmentFlag", "Qt::AlignmentFlag")]
#[case("core.QEvent__Type", "QEvent::Type")]
fn test_nested_names(#[case] go_type: &str, #[case] native: &str) {
    assert_eq!(map_type(&Registry::new(), go_type).as_str(), native);
}

#[rstest]
#[case("Unknown")]
#[case("map[string]int")]
#[case("float32")]
fn test_unknown_types_are_unmapped(#[case] go_type: &str) {
    assert_eq!(map_type(&registry(), go_type), NativeType::Unmapped);
}

mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    const PRIMITIVES: [&str; 8] = [
        "string",
        "[]string",
        "unsafe.Pointer",
        "uintptr",
        "bool",
        "int",
        "float64",
        "int64",
    ];

    #[derive(Clone, Debug)]
    struct Primitive(&'static str);

    impl Arbitrary for Primitive {
        fn arbitrary(g: &mut Gen) -> Self {
            Self(g.choose(&PRIMITIVES).copied().unwrap())
        }
    }

    #[derive(Clone, Debug)]
    struct ClassName(String);

    impl Arbitrary for ClassName {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 10 + 1;
            let tail: String = (0..len)
                .map(|_| char::from_u32(97 + (usize::arbitrary(g) % 26) as u32).unwrap())
                .collect();
            Self(format!("K{tail}"))
        }
    }

    quickcheck! {
        fn prop_primitive_ignores_pointer(p: Primitive) -> bool {
            let registry = Registry::new();
            map_type(&registry, p.0) == map_type(&registry, &format!("*{}", p.0))
        }

        fn prop_object_pointer_appended_once(c: ClassName) -> bool {
            let mut registry = Registry::new();
            registry.insert(ClassRecord::new(&c.0, MAIN_MODULE).with_base(ROOT_OBJECT));
            let mapped = map_type(&registry, &format!("*{}", c.0));
            mapped.as_str() == format!("{}*", c.0) && !mapped.as_str().ends_with("**")
        }

        fn prop_value_type_unchanged(c: ClassName) -> bool {
            let mut registry = Registry::new();
            registry.insert(ClassRecord::new(&c.0, MAIN_MODULE));
            map_type(&registry, &c.0).as_str() == c.0
        }
    }
}

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use qtmoc_model::builder::map_member_types;
use qtmoc_model::library::builtin_modules;
use qtmoc_model::{ClassModelBuilder, MAIN_MODULE, MemberCategory, ModelError, Registry};
use qtmoc_scan::{SourceFile, scan_source};

fn scan(sources: &[&str]) -> Vec<SourceFile> {
    sources.iter().map(|s| scan_source(s).unwrap()).collect()
}

fn registry() -> Registry {
    Registry::with_libraries(builtin_modules().unwrap())
}

const WINDOW: &str = r#"package main

import "github.com/therecipe/qt/widgets"

type Window struct {
	*widgets.QMainWindow

	title string
	_     func(name string, count int) `signal:"renamed"`
	_     func(x, y int) bool          `slot:"moveTo"`
	items []string                     `json:"items"`
}
"#;

#[test]
fn test_builds_class_with_base_and_members() {
    let mut registry = registry();
    let discovered = ClassModelBuilder::new(&mut registry)
        .build(&scan(&[WINDOW]))
        .unwrap();
    assert_eq!(discovered, vec!["Window".to_string()]);

    let window = registry.get("Window").unwrap();
    assert_eq!(window.module, MAIN_MODULE);
    assert_eq!(window.base.as_deref(), Some("QMainWindow"));

    let names: Vec<_> = window.members.iter().map(|m| m.fullname.as_str()).collect();
    assert_eq!(names, vec!["Window::renamed", "Window::moveTo"]);
    assert_eq!(window.members[0].category, MemberCategory::Signal);
    assert_eq!(window.members[1].category, MemberCategory::Slot);
}

#[test]
fn test_type_mapping_pass() {
    let mut registry = registry();
    ClassModelBuilder::new(&mut registry)
        .build(&scan(&[WINDOW]))
        .unwrap();
    let unmapped = map_member_types(&mut registry);
    assert_eq!(unmapped, 0);

    let window = registry.get("Window").unwrap();
    let renamed = &window.members[0];
    let types: Vec<_> = renamed.params.iter().map(|p| p.native_type.as_str()).collect();
    assert_eq!(types, vec!["QString", "int"]);

    let move_to = &window.members[1];
    assert_eq!(move_to.return_type, "bool");
    assert_eq!(move_to.params[0].host_type, "int");
}

#[test]
fn test_unmapped_types_degrade_to_void() {
    let source = "package main\ntype A struct {\n\tQObject\n\t_ func(m map[string]int) `slot:\"take\"`\n}\n";
    let mut registry = registry();
    ClassModelBuilder::new(&mut registry)
        .build(&scan(&[source]))
        .unwrap();
    assert_eq!(map_member_types(&mut registry), 1);

    let take = &registry.get("A").unwrap().members[0];
    assert_eq!(take.params[0].native_type, "void");
    assert_eq!(take.return_type, "void");
}

#[test]
fn test_forward_reference_across_files() {
    let first = "package main\ntype Scene struct {\n\tQObject\n\t_ func(Node) `signal:\"added\"`\n}\n";
    let second = "package main\ntype Node struct {\n\tQObject\n}\n";

    let mut registry = registry();
    ClassModelBuilder::new(&mut registry)
        .build(&scan(&[first, second]))
        .unwrap();
    map_member_types(&mut registry);

    let added = &registry.get("Scene").unwrap().members[0];
    assert_eq!(added.params[0].name, "v0");
    assert_eq!(added.params[0].native_type, "Node*");
}

#[test]
fn test_last_embedded_field_wins() {
    let source = "package main\ntype Multi struct {\n\tcore.QTimer\n\t*Other\n}\n";
    let mut registry = registry();
    ClassModelBuilder::new(&mut registry)
        .build(&scan(&[source]))
        .unwrap();
    assert_eq!(registry.get("Multi").unwrap().base.as_deref(), Some("Other"));
}

#[test]
fn test_non_struct_types_are_skipped() {
    let source = "package main\ntype (\n\tID int\n\tHandler func(int)\n\tBox struct{ QObject }\n)\n";
    let mut registry = Registry::new();
    let discovered = ClassModelBuilder::new(&mut registry)
        .build(&scan(&[source]))
        .unwrap();
    assert_eq!(discovered, vec!["Box".to_string()]);
}

#[test]
fn test_duplicate_class_is_an_error() {
    let source = "package main\ntype A struct{}\n";
    let mut registry = Registry::new();
    let result = ClassModelBuilder::new(&mut registry).build(&scan(&[source, source]));
    assert!(matches!(result, Err(ModelError::DuplicateClass { name }) if name == "A"));
}

#[test]
fn test_discovered_class_shadows_library() {
    let source = "package main\ntype QLabel struct {\n\tQWidget\n}\n";
    let mut registry = registry();
    ClassModelBuilder::new(&mut registry)
        .build(&scan(&[source]))
        .unwrap();
    assert_eq!(registry.get("QLabel").unwrap().module, MAIN_MODULE);
}

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use qtmoc_model::signature::{RawParam, parse_signature, resolve_parameters};
use qtmoc_model::tag::{parse_field_member, parse_marker};
use qtmoc_model::{ClassRecord, MAIN_MODULE, MemberCategory, ParameterRecord, ROOT_OBJECT, Registry, Virtuality};
use rstest::rstest;

fn params(list: &[(&str, &str)]) -> Vec<ParameterRecord> {
    list.iter()
        .map(|(name, ty)| ParameterRecord::new(*name, *ty))
        .collect()
}

#[rstest]
#[case("")]
#[case("json:name")]
#[case("json:name,omitempty xml:value")]
#[case("signal")]
#[case("slots")]
fn test_tags_without_markers(#[case] tag: &str) {
    assert!(parse_marker(tag).is_none());
    assert!(parse_field_member("Window", tag, "func(a int)", &Registry::new()).is_none());
}

#[rstest]
#[case("signal:clicked", MemberCategory::Signal, "clicked")]
#[case("slot:refresh", MemberCategory::Slot, "refresh")]
#[case("signal:changed:extra", MemberCategory::Signal, "changed")]
#[case("doc:x slot:load", MemberCategory::Slot, "load")]
fn test_markers(#[case] tag: &str, #[case] category: MemberCategory, #[case] name: &str) {
    let marker = parse_marker(tag).unwrap();
    assert_eq!(marker.category, category);
    assert_eq!(marker.name, name);
}

#[rstest]
#[case("signal:on-click")]
#[case("slot:1st")]
#[case("signal:a.b")]
#[case("slot:name,omitempty")]
fn test_non_identifier_names_are_ignored(#[case] tag: &str) {
    assert!(parse_marker(tag).is_some());
    assert!(parse_field_member("Window", tag, "func()", &Registry::new()).is_none());
}

#[rstest]
#[case("slot:ok_2", "ok_2")]
#[case("signal:_changed", "_changed")]
fn test_identifier_names_are_kept(#[case] tag: &str, #[case] name: &str) {
    let member = parse_field_member("Window", tag, "func()", &Registry::new()).unwrap();
    assert_eq!(member.name, name);
}

#[test]
fn test_carry_back_with_trailing_primitive() {
    let sig = parse_signature("(a int, b int, string) int").unwrap();
    assert_eq!(sig.params, vec![
        RawParam::Named { name: "a".into(), ty: "int".into() },
        RawParam::Named { name: "b".into(), ty: "int".into() },
        RawParam::Single("string".into()),
    ]);

    let resolved = resolve_parameters(&sig.params, &Registry::new());
    assert_eq!(resolved, params(&[("a", "int"), ("b", "int"), ("v2", "string")]));
}

#[test]
fn test_carry_back_shares_following_type() {
    let sig = parse_signature("func(x, y int, label string)").unwrap();
    let resolved = resolve_parameters(&sig.params, &Registry::new());
    assert_eq!(
        resolved,
        params(&[("x", "int"), ("y", "int"), ("label", "string")])
    );
}

#[test]
fn test_carry_back_unnamed_types() {
    let sig = parse_signature("func(int, string)").unwrap();
    let resolved = resolve_parameters(&sig.params, &Registry::new());
    assert_eq!(resolved, params(&[("v0", "int"), ("v1", "string")]));
}

#[test]
fn test_carry_back_sees_discovered_classes() {
    let mut registry = Registry::new();
    registry.insert(ClassRecord::new("Item", MAIN_MODULE).with_base(ROOT_OBJECT));

    let sig = parse_signature("func(Item, count int)").unwrap();
    let resolved = resolve_parameters(&sig.params, &registry);
    assert_eq!(resolved, params(&[("v0", "Item"), ("count", "int")]));

    let sig = parse_signature("func(first, second *Item)").unwrap();
    let resolved = resolve_parameters(&sig.params, &registry);
    assert_eq!(resolved, params(&[("first", "*Item"), ("second", "*Item")]));
}

#[test]
fn test_signal_member() {
    let member = parse_field_member(
        "Window",
        "signal:resized",
        "func(width, height int)",
        &Registry::new(),
    )
    .unwrap();

    assert_eq!(member.fullname, "Window::resized");
    assert_eq!(member.category, MemberCategory::Signal);
    assert_eq!(member.return_type, "void");
    assert_eq!(member.host_return, None);
    assert_eq!(member.virtuality, Virtuality::NonVirtual);
    assert_eq!(member.params, params(&[("width", "int"), ("height", "int")]));
}

#[test]
fn test_signal_ignores_result() {
    let member =
        parse_field_member("Window", "signal:done", "func() bool", &Registry::new()).unwrap();
    assert_eq!(member.host_return, None);
    assert_eq!(member.return_type, "void");
}

#[test]
fn test_slot_member_keeps_host_return() {
    let member = parse_field_member(
        "Window",
        "slot:title",
        "func(index int) string",
        &Registry::new(),
    )
    .unwrap();

    assert_eq!(member.category, MemberCategory::Slot);
    assert_eq!(member.host_return.as_deref(), Some("string"));
    assert_eq!(member.params, params(&[("index", "int")]));
}

#[test]
fn test_member_without_parameter_list() {
    let member = parse_field_member("Window", "slot:tick", "int", &Registry::new()).unwrap();
    assert!(member.params.is_empty());
    assert_eq!(member.host_return, None);
}

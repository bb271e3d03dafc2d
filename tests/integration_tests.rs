use anydoc::{any, from_str, to_string, to_string_with_options, Any, Error, FormatOptions, Kind};

#[test]
fn test_parse_material_spec() {
    let text = r#"
# brushed steel
Material{
    diffuse = Texture{ path = "steel_d.tex", filter = True }
    normal = Texture{ path = "steel_n.tex" }
    tint = (0.8, 0.8, 0.85, 1)
    roughness = 0.35
    two_sided = False
}
"#;
    let material = from_str(text).unwrap();
    assert_eq!(material.name(), Some("Material"));
    assert_eq!(material.comment(), Some(" brushed steel"));
    assert_eq!(material.get("roughness").unwrap().number().unwrap(), 0.35);

    let diffuse = material.get("diffuse").unwrap();
    assert_eq!(diffuse.name(), Some("Texture"));
    assert!(diffuse.get("filter").unwrap().boolean().unwrap());

    let tint = material.get("tint").unwrap();
    assert_eq!(tint.len().unwrap(), 4);
    assert_eq!(tint.at(3).unwrap().number().unwrap(), 1.0);
}

#[test]
fn test_round_trip_value_tree() {
    let value = any!({
        window: { width: 640, height: 480, title: "main" },
        layers: [[1, 2], [3], []],
        verbose: false,
        extra: none,
    });
    assert_eq!(from_str(&to_string(&value)).unwrap(), value);
}

#[test]
fn test_round_trip_is_stable() {
    // serialize(parse(serialize(v))) must reproduce the text exactly
    let value = any!({ b: [1, 2], a: "x" });
    let first = to_string(&value);
    let second = to_string(&from_str(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_table_keys_sorted_on_output() {
    let value = from_str("{ b = 1, a = 2 }").unwrap();
    let text = to_string(&value);
    assert!(text.find("a = 2").unwrap() < text.find("b = 1").unwrap());
}

#[test]
fn test_comment_attachment() {
    let doc = from_str("# note\nx = 3").unwrap();
    assert!(doc.is_table());
    let x = doc.get("x").unwrap();
    assert_eq!(x.number().unwrap(), 3.0);
    assert_eq!(x.comment(), Some(" note"));
}

#[test]
fn test_comment_survives_save() {
    let doc = from_str("{ # keep me\nx = 3 }").unwrap();
    let text = to_string(&doc);
    assert!(text.contains("# keep me"));
    let back = from_str(&text).unwrap();
    assert_eq!(back.get("x").unwrap().comment(), Some(" keep me"));
}

#[test]
fn test_named_container_round_trip() {
    let value = from_str("Foo(1, 2, 3)").unwrap();
    assert_eq!(value.kind(), Kind::Array);
    assert_eq!(value.name(), Some("Foo"));
    assert_eq!(value.len().unwrap(), 3);
    assert_eq!(to_string(&value), "Foo(1, 2, 3)");
}

#[test]
fn test_bracket_synonym_canonicalized() {
    let value = from_str("[1, 2]").unwrap();
    assert_eq!(value, from_str("(1, 2)").unwrap());
    // output always uses parentheses
    assert_eq!(to_string(&value), "(1, 2)");
}

#[test]
fn test_wrong_type_failures() {
    assert_eq!(
        Any::from(3.0).string(),
        Err(Error::WrongType {
            expected: Kind::String,
            actual: Kind::Number,
        })
    );
    assert_eq!(
        Any::table().get("missing"),
        Err(Error::KeyNotFound {
            key: "missing".to_string(),
        })
    );

    let two = any!([1, 2]);
    assert_eq!(two.at(5), Err(Error::IndexOutOfBounds { index: 5, len: 2 }));
}

#[test]
fn test_defaulted_accessors_swallow_errors() {
    let table = from_str("{ present = 7 }").unwrap();
    assert_eq!(table.get("present").unwrap().number_or(0.0), 7.0);
    assert_eq!(table.get_or("absent", Any::from(42)).number().unwrap(), 42.0);
    // the defaulted lookup must not create the entry
    assert_eq!(table.len().unwrap(), 1);
}

#[test]
fn test_malformed_table() {
    let err = from_str("{ a = 1 ").unwrap_err();
    match err {
        Error::CorruptText { message, .. } => {
            assert!(message.contains("table ended unexpectedly"))
        }
        other => panic!("expected CorruptText, got {other:?}"),
    }
}

#[test]
fn test_malformed_inputs_report_positions() {
    let err = from_str("{\n  a = 1\n  b ! 2\n}").unwrap_err();
    match err {
        Error::CorruptText { token, .. } => {
            assert_eq!(token.line, 3);
        }
        other => panic!("expected CorruptText, got {other:?}"),
    }
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = from_str("(1, 2").unwrap_err();
    assert!(err.to_string().contains("array ended unexpectedly"));

    let err = from_str("{ 3 = 1 }").unwrap_err();
    assert!(err.to_string().contains("expected a table key"));
}

#[test]
fn test_case_insensitive_keywords_on_input() {
    let value = from_str("(true, FALSE, none)").unwrap();
    assert!(value.at(0).unwrap().boolean().unwrap());
    assert!(!value.at(1).unwrap().boolean().unwrap());
    assert!(value.at(2).unwrap().is_none());
    // output is canonical
    assert_eq!(to_string(&value), "(True, False, None)");
}

#[test]
fn test_string_escapes_round_trip() {
    let value = Any::from("line one\nline \"two\"\t\\end");
    let text = to_string(&value);
    assert_eq!(from_str(&text).unwrap(), value);
}

#[test]
fn test_width_budget_reflow() {
    let value = any!([
        "a long string element",
        "another long string element",
        "and one more to overflow"
    ]);
    let narrow = FormatOptions::new().with_width(40);
    let text = to_string_with_options(&value, &narrow);
    assert!(text.lines().count() > 1);
    // 4-space indentation per level
    assert!(text.lines().nth(1).unwrap().starts_with("    "));
    assert_eq!(from_str(&text).unwrap(), value);
}

#[test]
fn test_deeply_nested_round_trip() {
    let text = "Scene{ nodes = (Node{ mesh = \"a\" }, Node{ mesh = \"b\", children = (Node{ mesh = \"c\" }) }) }";
    let scene = from_str(text).unwrap();
    let nodes = scene.get("nodes").unwrap();
    let second = nodes.at(1).unwrap();
    assert_eq!(second.name(), Some("Node"));
    assert_eq!(
        second
            .get("children")
            .unwrap()
            .at(0)
            .unwrap()
            .get("mesh")
            .unwrap()
            .string()
            .unwrap(),
        "c"
    );
    assert_eq!(from_str(&to_string(&scene)).unwrap(), scene);
}

#[test]
fn test_document_pairs_without_braces() {
    let doc = from_str("width = 640\nheight = 480\n").unwrap();
    assert!(doc.is_table());
    assert_eq!(doc.len().unwrap(), 2);
    assert_eq!(doc.get("height").unwrap().number().unwrap(), 480.0);
}

#[test]
fn test_empty_containers() {
    assert_eq!(to_string(&from_str("()").unwrap()), "()");
    assert_eq!(to_string(&from_str("{}").unwrap()), "{}");
    assert_eq!(to_string(&from_str("Foo()").unwrap()), "Foo()");
    assert_eq!(to_string(&from_str("Foo{}").unwrap()), "Foo{}");
}

#[test]
fn test_empty_document_is_none() {
    assert!(from_str("").unwrap().is_none());
    assert!(from_str("\n\n").unwrap().is_none());
}

#[test]
fn test_mutating_parsed_tree() {
    let mut doc = from_str("{ counts = (1, 2, 3) }").unwrap();
    let snapshot = doc.clone();

    doc.entry("counts").unwrap().push(Any::from(4)).unwrap();
    *doc.entry("label").unwrap() = Any::from("edited");

    assert_eq!(doc.get("counts").unwrap().len().unwrap(), 4);
    assert_eq!(snapshot.get("counts").unwrap().len().unwrap(), 3);
    assert!(snapshot.get("label").is_err());
}

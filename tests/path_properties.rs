//! Behavioural properties of paths applied to value trees

use pretty_assertions::assert_eq;
use rstest::rstest;
use treepath::{EvaluationError, NotFoundError, SyntaxError, Value, parse};

fn value(text: &str) -> Value {
    text.parse().unwrap()
}

#[rstest]
#[case("foo")]
#[case("foo.bar.baz")]
#[case(r#""with space".x"#)]
#[case("'single'.x")]
#[case("items[]")]
#[case("items[-1]")]
#[case("items[+2]")]
#[case(r#"items[{id:"a"}].count"#)]
#[case("items[{ id = a }]")]
#[case(r#"{kind:"root"}.name"#)]
#[case("item{n:1}.tags[0]")]
#[case("[0][1]")]
#[case("foo.[0]")]
fn round_trip_preserves_text(#[case] text: &str) {
    let path = parse(text).unwrap();
    assert_eq!(path.to_text(), text);
    assert_eq!(path.to_string(), text);
}

#[rstest]
#[case("{a:1}", "a", "2")]
#[case("{}", "a.b.c", "\"deep\"")]
#[case("{items:[{id:a},{id:b}]}", "items[{id:a}].n", "5")]
#[case("{items:[1,2,3]}", "items[-1]", "{x:[1]}")]
#[case("{items:[1,2,3]}", "items[]", "0")]
#[case("{}", "list[]", "[true]")]
fn set_is_idempotent(#[case] root: &str, #[case] path: &str, #[case] new_value: &str) {
    let mut root = value(root);
    let path = parse(path).unwrap();
    let new_value = value(new_value);

    let first = path.set_value(&mut root, &new_value).unwrap();
    assert!(first > 0);
    assert_eq!(path.set_value(&mut root, &new_value).unwrap(), 0);

    let found = path.get(&root).unwrap();
    assert!(!found.is_empty());
    assert!(found.iter().all(|v| v.deep_equals(&new_value)));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn negative_index_matches_positive(#[case] offset: usize) {
    let root = value("[a,b,c]");
    let n = 3;
    let negative = parse(&format!("[-{}]", offset + 1)).unwrap();
    let positive = parse(&format!("[{}]", n - 1 - offset)).unwrap();
    assert_eq!(negative.get(&root).unwrap(), positive.get(&root).unwrap());
}

#[test]
fn all_elements_rewrite_law() {
    let mut root = value("{l:[1,2,3]}");
    let path = parse("l[]").unwrap();

    assert_eq!(path.set(&mut root, || Value::int(4)).unwrap(), 3);
    assert_eq!(root, value("{l:[4,4,4]}"));
    assert_eq!(path.set(&mut root, || Value::int(4)).unwrap(), 0);
}

#[test]
fn all_elements_on_root_list() {
    let mut root = value("[1,2,3]");
    let path = parse("[]").unwrap();

    assert_eq!(path.set(&mut root, || Value::int(4)).unwrap(), 3);
    assert_eq!(root, value("[4,4,4]"));
}

#[test]
fn match_element_deletion() {
    let mut root = value(r#"[{"id":"a"},{"id":"b"}]"#);
    let path = parse(r#"[{id="a"}]"#).unwrap();

    assert_eq!(path.remove(&mut root), 1);
    assert_eq!(root, value(r#"[{id:"b"}]"#));
}

#[test]
fn creation_scenario() {
    let mut root = Value::compound();
    let path = parse("foo.bar").unwrap();

    let created = path.get_or_create(&mut root, || Value::int(0)).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(*created[0], Value::int(0));
    assert_eq!(root, value("{foo:{bar:0}}"));
}

#[test]
fn creation_uses_preferred_parent_shapes() {
    let mut root = Value::compound();
    let path = parse(r#"a[{id:"k"}].tags[]"#).unwrap();
    assert_eq!(path.set(&mut root, || Value::string("t")).unwrap(), 1);
    assert_eq!(root, value(r#"{a:[{id:"k",tags:["t"]}]}"#));
}

#[test]
fn created_copies_are_independent() {
    let mut root = value("{items:[{},{}]}");
    let path = parse("items[].meta").unwrap();

    assert_eq!(path.set(&mut root, Value::compound).unwrap(), 2);
    let first = parse("items[0].meta.x").unwrap();
    first.set(&mut root, || Value::int(1)).unwrap();
    assert_eq!(root, value("{items:[{meta:{x:1}},{meta:{}}]}"));
}

#[test]
fn failure_reports_first_empty_prefix() {
    let root = Value::compound();
    let err = parse("foo.bar").unwrap().get(&root).unwrap_err();
    assert_eq!(
        err,
        NotFoundError {
            prefix: "foo".to_string()
        }
    );
    assert_eq!(err.to_string(), "Found no elements matching foo");
}

#[test]
fn failure_prefix_includes_filters() {
    let root = value("{items:[{id:a}]}");
    let err = parse(r#"items[{id:"z"}].n"#).unwrap().get(&root).unwrap_err();
    assert_eq!(err.prefix, r#"items[{id:"z"}]"#);
}

#[test]
fn malformed_input_is_rejected() {
    let err = parse("foo[").unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedEnd { position: 4, .. }));
}

#[rstest]
#[case("{}", "foo.bar")]
#[case("{foo:1}", "foo.bar")]
#[case("{l:[]}", "l[0]")]
#[case("{l:[{id:a}]}", "l[{id:b}]")]
#[case("[1]", "{x:1}")]
fn count_matching_never_fails(#[case] root: &str, #[case] path: &str) {
    let root = value(root);
    let path = parse(path).unwrap();
    assert!(path.get(&root).is_err());
    assert_eq!(path.count_matching(&root), 0);
}

#[test]
fn remove_never_creates() {
    let mut root = value("{a:{}}");
    assert_eq!(parse("a.b.c").unwrap().remove(&mut root), 0);
    assert_eq!(parse("x[0]").unwrap().remove(&mut root), 0);
    assert_eq!(root, value("{a:{}}"));
}

#[test]
fn one_path_many_trees() {
    let path = parse("n").unwrap();
    let mut first = value("{n:1}");
    let mut second = value("{}");

    assert_eq!(path.set(&mut first, || Value::int(2)).unwrap(), 1);
    assert_eq!(path.set(&mut second, || Value::int(2)).unwrap(), 1);
    assert_eq!(first, second);
    assert_eq!(path.to_text(), "n");
}

#[rstest]
#[case(0, "[9,1,2]")]
#[case(2, "[1,2,9]")]
#[case(-1, "[1,2,9]")]
#[case(-2, "[1,9,2]")]
#[case(-3, "[9,1,2]")]
fn insert_positions(#[case] index: i64, #[case] expected: &str) {
    let mut root = value("{l:[1,2]}");
    let changed = parse("l")
        .unwrap()
        .insert(index, &mut root, &[Value::int(9)])
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(root.as_compound().unwrap()["l"], value(expected));
}

#[rstest]
#[case(3, 3)]
#[case(-4, -1)]
fn insert_rejects_positions_outside_list(#[case] index: i64, #[case] resolved: i64) {
    let mut root = value("{l:[1,2]}");
    let err = parse("l")
        .unwrap()
        .insert(index, &mut root, &[Value::int(9)])
        .unwrap_err();

    assert_eq!(err, EvaluationError::InvalidIndex { index: resolved });
    assert_eq!(root, value("{l:[1,2]}"));
}

#[test]
fn insert_into_every_target() {
    let mut root = value("{groups:[{m:[1]},{m:[]},{}]}");
    let changed = parse("groups[].m")
        .unwrap()
        .insert(0, &mut root, &[value("{x:1}")])
        .unwrap();

    assert_eq!(changed, 3);
    assert_eq!(
        root,
        value("{groups:[{m:[{x:1},1]},{m:[{x:1}]},{m:[{x:1}]}]}")
    );
}

#[rstest]
#[case("{}", "item{id:a}")]
#[case("{item:{id:b}}", "item{id:a}")]
#[case("{item:1}", "item{id:a}")]
fn match_object_never_writes_missing_or_mismatched(#[case] root: &str, #[case] path: &str) {
    let original = value(root);
    let mut root = original.clone();
    let path = parse(path).unwrap();

    assert_eq!(path.set(&mut root, || value("{id:a,n:1}")).unwrap(), 0);
    assert_eq!(path.remove(&mut root), 0);
    assert_eq!(root, original);
}

#[rstest]
#[case("{}", "foo{a:1}.bar", "{foo:{a:1,bar:0}}", 1)]
#[case("{foo:{a:1,c:2}}", "foo{a:1}.bar", "{foo:{a:1,c:2,bar:0}}", 1)]
#[case("{}", "l[{id:x}].n", "{l:[{id:x,n:0}]}", 1)]
#[case("{}", "l[0]", "{l:[]}", 0)]
#[case("{l:[5]}", "l[3]", "{l:[5]}", 0)]
fn get_or_create_edge_cases(
    #[case] root: &str,
    #[case] path: &str,
    #[case] expected: &str,
    #[case] created: usize,
) {
    let mut root = value(root);
    let found = parse(path)
        .unwrap()
        .get_or_create(&mut root, || Value::int(0))
        .unwrap()
        .len();

    assert_eq!(found, created);
    assert_eq!(root, value(expected));
}

use je::{parse_assignment, parse_assignments, path_tokens, segments, Assignment, Error, Operator, PathToken};
use yare::parameterized;

#[parameterized(
    string_assignment = { "name=john", "name", Operator::AssignString, "john" },
    nested_path = { "user.name=john", "user.name", Operator::AssignString, "john" },
    json_assignment = { "age:=30", "age", Operator::AssignJson, "30" },
    json_bool = { "active:=true", "active", Operator::AssignJson, "true" },
    json_float = { "balance:=99.50", "balance", Operator::AssignJson, "99.50" },
    json_nested_path = { "config.server.port:=3000", "config.server.port", Operator::AssignJson, "3000" },
    file_assignment = { "cert@cert.pem", "cert", Operator::AssignFile, "cert.pem" },
    json_file_assignment = { "config:@config.json", "config", Operator::AssignJsonFile, "config.json" },
    array_append = { "tags[]=new", "tags[]", Operator::AppendArray, "new" },
    array_append_json = { "ports[]:=8080", "ports[]", Operator::AppendArrayJson, "8080" },
    array_map = { "items.[].state=on", "items.[].state", Operator::ArrayMap, "on" },
    array_map_json = { "items.[].active:=true", "items.[].active", Operator::ArrayMapJson, "true" },
    array_map_undotted_base = { "users[].active=on", "users[].active", Operator::ArrayMap, "on" },
    empty_string_value = { "empty=", "empty", Operator::AssignString, "" },
    empty_json_value = { "delete:=", "delete", Operator::AssignJson, "" },
    value_keeps_second_equals = { "greeting=a=b", "greeting", Operator::AssignString, "a=b" },
    escaped_dot_in_path = { r"a\.b=c", r"a\.b", Operator::AssignString, "c" },
)]
fn parses_operator(input: &str, path: &str, operator: Operator, value: &str) {
    let assignment = parse_assignment(input).expect("failed to parse input");

    assert_eq!(
        assignment,
        Assignment {
            path: path.to_string(),
            operator,
            value: value.to_string(),
        }
    );
}

// The markers overlap, so detection order is observable. These pin the
// priority of the cascade and its fall-through behavior.
#[parameterized(
    json_beats_string = { "a=b:=c", "a=b", Operator::AssignJson, "c" },
    email_in_value_is_a_string = { "mail=sam@example.org", "mail", Operator::AssignString, "sam@example.org" },
    file_without_equals_prefix = { "mail@example.org=x", "mail", Operator::AssignFile, "example.org=x" },
    map_marker_at_start_ignored = { "[].a=b", "[].a", Operator::AssignString, "b" },
    map_without_property_falls_through = { "x[].=5", "x[].", Operator::AssignString, "5" },
    append_json_beats_append = { "a[]=b[]:=c", "a[]=b[]", Operator::AppendArrayJson, "c" },
    json_marker_at_start_ignored = { ":=x", ":", Operator::AssignString, "x" },
    map_json_property_spans_equals = { "a.[].b=c:=d", "a.[].b=c", Operator::ArrayMapJson, "d" },
)]
fn cascade_priority(input: &str, path: &str, operator: Operator, value: &str) {
    let assignment = parse_assignment(input).expect("failed to parse input");

    assert_eq!(
        assignment,
        Assignment {
            path: path.to_string(),
            operator,
            value: value.to_string(),
        }
    );
}

#[parameterized(
    no_operator = { "invalid" },
    empty_token = { "" },
    empty_path = { "=value" },
    file_at_start = { "@file.txt" },
)]
fn rejects_malformed(input: &str) {
    let result = parse_assignment(input);

    match result {
        Err(Error::MalformedAssignment { token }) => assert_eq!(token, input),
        other => panic!("expected MalformedAssignment, got {other:?}"),
    }
}

#[test]
fn parses_tokens_in_order() {
    let assignments = parse_assignments(["name=john", "city=NYC", "age:=30"]).unwrap();

    assert_eq!(
        assignments,
        vec![
            Assignment {
                path: "name".to_string(),
                operator: Operator::AssignString,
                value: "john".to_string(),
            },
            Assignment {
                path: "city".to_string(),
                operator: Operator::AssignString,
                value: "NYC".to_string(),
            },
            Assignment {
                path: "age".to_string(),
                operator: Operator::AssignJson,
                value: "30".to_string(),
            },
        ]
    );
}

#[test]
fn first_malformed_token_fails_the_batch() {
    let result = parse_assignments(["name=john", "invalid", "age:=30"]);

    assert!(matches!(
        result,
        Err(Error::MalformedAssignment { token }) if token == "invalid"
    ));
}

#[test]
fn assignment_implements_from_str() {
    let assignment: Assignment = "tags[]=ci".parse().unwrap();

    assert_eq!(assignment.operator, Operator::AppendArray);
    assert_eq!(assignment.path, "tags[]");
}

#[parameterized(
    simple = { "user.name", vec!["user", "name"] },
    nested = { "config.server.port", vec!["config", "server", "port"] },
    numeric = { "users.0.name", vec!["users", "0", "name"] },
    escaped_dot = { r"user\.name.value", vec!["user.name", "value"] },
    single_segment = { "value", vec!["value"] },
    trailing_delimiter = { "a.", vec!["a", ""] },
    backslash_before_key = { r"a\b.c", vec![r"a\b", "c"] },
    escaped_backslash_dot = { r"a\\.b", vec![r"a\.b"] },
)]
fn splits_path_segments(path: &str, expected: Vec<&str>) {
    assert_eq!(segments(path), expected);
}

#[test]
fn digit_segments_become_indices() {
    assert_eq!(
        path_tokens("users.0.name"),
        vec![
            PathToken::Key("users".to_string()),
            PathToken::Index(0),
            PathToken::Key("name".to_string()),
        ]
    );
}

#[test]
fn signed_segments_stay_keys() {
    assert_eq!(
        path_tokens("a.-1.+2"),
        vec![
            PathToken::Key("a".to_string()),
            PathToken::Key("-1".to_string()),
            PathToken::Key("+2".to_string()),
        ]
    );
}

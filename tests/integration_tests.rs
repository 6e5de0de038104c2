//! Integration tests for parsing and the apply combinator

use flowscript::{
    apply, compact, increment, parse, render_edges, ApplyError, CompactEdge, Config,
    Interpreter, OutputFormat, ParseError, Script,
};
use pretty_assertions::assert_eq;

const PIPELINE: &str = r#"
flowchart LR
fetch0 --request--> parse0:response
parse0 --"ok: 200"--> store1:row
store1 -- retry later --> fetch2:backoff
"#;

const CLEANUP: &str = "flowchart\nstore1 --done--> report3:summary\n";

#[test]
fn test_concrete_scenario() {
    let edges = apply(
        "flowchart\na0 --x--> b0:y\n",
        "flowchart\nc0 --p--> d0:q\n",
        2,
    )
    .expect("Should apply");

    assert_eq!(
        edges,
        vec![
            CompactEdge::from((("a", 0), ("b", 0))),
            CompactEdge::from((("c", 0), ("d", 0))),
            CompactEdge::from((("a", 1), ("b", 1))),
            CompactEdge::from((("c", 1), ("d", 1))),
        ]
    );
}

#[test]
fn test_parse_is_idempotent() {
    let a = parse(PIPELINE).expect("Should parse");
    let b = parse(PIPELINE).expect("Should parse");
    assert_eq!(a, b);
}

#[test]
fn test_parse_pipeline() {
    let chart = parse(PIPELINE).expect("Should parse");
    assert_eq!(chart.flow_type.node, "flowchart LR");
    assert_eq!(chart.flow_statements.len(), 3);

    let labels: Vec<_> = chart
        .flow_statements
        .iter()
        .map(|s| (s.slabel.as_str(), s.dlabel.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("request", "response"),
            ("ok: 200", "row"),
            ("retry later", "backoff"),
        ]
    );
}

#[test]
fn test_apply_length_law() {
    let first = compact(&parse(PIPELINE).unwrap()).len();
    let then = compact(&parse(CLEANUP).unwrap()).len();
    for times in 0..6 {
        let edges = apply(PIPELINE, CLEANUP, times).unwrap();
        assert_eq!(edges.len(), times * (first + then));
    }
}

#[test]
fn test_apply_zero_times_is_empty() {
    assert_eq!(apply(PIPELINE, CLEANUP, 0).unwrap(), Vec::<CompactEdge>::new());
}

#[test]
fn test_apply_shift_law_and_round_major_order() {
    let first = compact(&parse(PIPELINE).unwrap());
    let then = compact(&parse(CLEANUP).unwrap());
    let round_len = first.len() + then.len();

    let edges = apply(PIPELINE, CLEANUP, 4).unwrap();
    for (k, round) in edges.chunks(round_len).enumerate() {
        let (got_first, got_then) = round.split_at(first.len());
        for (got, original) in got_first.iter().zip(&first).chain(got_then.iter().zip(&then)) {
            assert_eq!(got.src.name, original.src.name);
            assert_eq!(got.dst.name, original.dst.name);
            assert_eq!(got.src.num, original.src.num + k as u64);
            assert_eq!(got.dst.num, original.dst.num + k as u64);
        }
    }
}

#[test]
fn test_apply_matches_manual_increment() {
    let first = compact(&parse(PIPELINE).unwrap());
    let then = compact(&parse(CLEANUP).unwrap());

    let mut expected = first.clone();
    expected.extend(then.clone());
    expected.extend(increment(&first));
    expected.extend(increment(&then));

    assert_eq!(apply(PIPELINE, CLEANUP, 2).unwrap(), expected);
}

#[test]
fn test_apply_with_empty_scripts() {
    let edges = apply("flowchart", CLEANUP, 3).unwrap();
    let text: Vec<_> = edges.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        text,
        vec!["store1 -> report3", "store2 -> report4", "store3 -> report5"]
    );

    assert!(apply("flowchart", "graph", 10).unwrap().is_empty());
}

#[test]
fn test_missing_destination_label_fails_everywhere() {
    let bad = "flowchart\na0 --x--> b0\n";
    assert!(parse(bad).is_err());

    let err = apply(bad, CLEANUP, 1).unwrap_err();
    assert!(matches!(
        err,
        ApplyError::Parse {
            script: Script::First,
            ..
        }
    ));
}

#[test]
fn test_non_integer_index_fails_everywhere() {
    let bad = "flowchart\na0 --x--> b:y\n";
    let parse_errors = parse(bad).unwrap_err();

    match apply(CLEANUP, bad, 5).unwrap_err() {
        ApplyError::Parse { script, errors } => {
            assert_eq!(script, Script::Then);
            assert_eq!(errors, parse_errors);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_reports_position_and_expectation() {
    let errors = parse("flowchart\na0 --x--> b0:y\nc0 -- --> d0:q\n").unwrap_err();
    match &errors[0] {
        ParseError::Syntax {
            position, found, ..
        } => {
            assert_eq!(position.line, 3);
            assert_eq!(position.column, 7);
            assert_eq!(found.as_deref(), Some("'-->'"));
        }
    }
}

#[test]
fn test_interpreter_with_config_and_rendering() {
    let config = Config::from_str("times = 2\nformat = \"text\"").unwrap();
    let interpreter = Interpreter::with_config(config);
    let edges = interpreter.apply(PIPELINE, CLEANUP).unwrap();
    let text = render_edges(&edges, interpreter.config().format).unwrap();

    insta::assert_snapshot!(text, @"fetch0 -> parse0\nparse0 -> store1\nstore1 -> fetch2\nstore1 -> report3\nfetch1 -> parse1\nparse1 -> store2\nstore2 -> fetch3\nstore2 -> report4");
}

#[test]
fn test_json_rendering() {
    let edges = apply(CLEANUP, CLEANUP, 1).unwrap();
    let json = render_edges(&edges, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().map(|a| a.len()), Some(2));
    assert_eq!(value[1]["dst"]["name"], "report");
    assert_eq!(value[1]["dst"]["num"], 3);
}

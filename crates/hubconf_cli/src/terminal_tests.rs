use super::*;
use hubconf_core::changes::ValueChange;
use serde_json::json;
use std::io::Cursor;

fn sink(answer: &str) -> TerminalSink<Cursor<Vec<u8>>, Vec<u8>> {
    TerminalSink::new(Cursor::new(answer.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_confirm_accepts_yes() {
    for answer in ["y\n", "Y\n", "yes\n", " YES \n"] {
        assert!(sink(answer).confirm("Apply these changes?", false), "{:?}", answer);
    }
}

#[test]
fn test_confirm_defaults_to_no() {
    for answer in ["\n", "n\n", "nope\n", ""] {
        assert!(!sink(answer).confirm("Apply these changes?", false), "{:?}", answer);
    }
}

#[test]
fn test_confirm_empty_answer_takes_default_yes() {
    assert!(sink("\n").confirm("Continue anyway?", true));
    assert!(!sink("n\n").confirm("Continue anyway?", true));
    assert!(!sink("").confirm("Continue anyway?", true));
}

#[test]
fn test_confirm_prints_question() {
    let mut sink = sink("y\n");

    sink.confirm("Apply these changes?", false);

    let output = String::from_utf8(sink.into_output()).unwrap();
    assert!(output.contains("Apply these changes?"));
    assert!(output.contains("[y/N]"));
}

#[test]
fn test_confirm_prints_default_yes_choices() {
    let mut sink = sink("\n");

    sink.confirm("Continue anyway?", true);

    let output = String::from_utf8(sink.into_output()).unwrap();
    assert!(output.contains("[Y/n]"));
}

#[test]
fn test_present_prints_every_change() {
    let mut changes = ConfigChanges::default();
    changes.added.insert("labels.docs".to_string());
    changes.removed.insert("labels.wontfix".to_string());
    changes.changed.insert(
        "options.description".to_string(),
        ValueChange {
            old_value: json!("Old"),
            new_value: json!("New"),
        },
    );
    let mut sink = sink("");

    sink.present(&changes);

    let output = String::from_utf8(sink.into_output()).unwrap();
    assert!(output.contains("+ labels.docs"));
    assert!(output.contains("- labels.wontfix"));
    assert!(output.contains("options.description"));
}

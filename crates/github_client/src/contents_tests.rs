use super::*;

fn encoded(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text)
}

#[test]
fn test_decode_base64_file() {
    let file = FileContent {
        entry_type: "file".to_string(),
        encoding: "base64".to_string(),
        content: encoded("labels:\n  bug:\n    color: fc2929\n"),
    };

    assert_eq!(
        file.decode().unwrap(),
        "labels:\n  bug:\n    color: fc2929\n"
    );
}

#[test]
fn test_decode_ignores_line_wrapping() {
    let raw = encoded("options:\n  has_wiki: false\n  has_issues: true\n");
    let (head, tail) = raw.split_at(12);
    let file = FileContent {
        entry_type: "file".to_string(),
        encoding: "base64".to_string(),
        content: format!("{}\n{}\n", head, tail),
    };

    assert_eq!(
        file.decode().unwrap(),
        "options:\n  has_wiki: false\n  has_issues: true\n"
    );
}

#[test]
fn test_decode_rejects_directories() {
    let file = FileContent {
        entry_type: "dir".to_string(),
        encoding: "base64".to_string(),
        content: String::new(),
    };

    assert!(matches!(file.decode(), Err(Error::Decoding(_))));
}

#[test]
fn test_decode_rejects_unknown_encoding() {
    let file = FileContent {
        entry_type: "file".to_string(),
        encoding: "none".to_string(),
        content: "plain".to_string(),
    };

    assert!(matches!(file.decode(), Err(Error::Decoding(_))));
}

#[test]
fn test_decode_rejects_invalid_base64() {
    let file = FileContent {
        entry_type: "file".to_string(),
        encoding: "base64".to_string(),
        content: "!!!not base64!!!".to_string(),
    };

    assert!(matches!(file.decode(), Err(Error::Decoding(_))));
}

#[test]
fn test_file_content_deserializes_from_api_shape() {
    let value = serde_json::json!({
        "type": "file",
        "encoding": "base64",
        "content": encoded("hello")
    });

    let file: FileContent = serde_json::from_value(value).unwrap();

    assert_eq!(file.entry_type, "file");
    assert_eq!(file.decode().unwrap(), "hello");
}

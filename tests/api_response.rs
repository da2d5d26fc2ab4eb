use saarthi::api::response::{parse_reply, parse_session_id, parse_transcript};
use saarthi::models::{Turn, TurnStatus};

#[test]
fn test_parse_session_id() {
    let id = parse_session_id(r#"{"session_id": "abc-123"}"#).unwrap();
    assert_eq!(id, "abc-123");
}

#[test]
fn test_parse_session_id_missing_field() {
    assert!(parse_session_id("{}").is_err());
}

#[test]
fn test_parse_session_id_empty() {
    assert!(parse_session_id(r#"{"session_id": ""}"#).is_err());
}

#[test]
fn test_parse_transcript_with_turns() {
    let turns = parse_transcript(
        r#"{"chat_history": [
            {"query": "Hi", "response": "Hello!"},
            {"query": "List two things", "response": "- one\n- two"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(
        turns,
        vec![
            Turn::committed("Hi", "Hello!"),
            Turn::committed("List two things", "- one\n- two"),
        ]
    );
    assert!(turns.iter().all(|t| t.status == TurnStatus::Committed));
}

#[test]
fn test_parse_transcript_missing_history_is_empty() {
    assert!(parse_transcript("{}").unwrap().is_empty());
}

#[test]
fn test_parse_transcript_null_history_is_empty() {
    assert!(parse_transcript(r#"{"chat_history": null}"#).unwrap().is_empty());
}

#[test]
fn test_parse_transcript_malformed_json() {
    assert!(parse_transcript("<html>oops</html>").is_err());
}

#[test]
fn test_parse_reply() {
    assert_eq!(parse_reply(r#"{"response": "**Sure**"}"#).unwrap(), "**Sure**");
}

#[test]
fn test_parse_reply_missing_field() {
    assert!(parse_reply(r#"{"error": "boom"}"#).is_err());
}

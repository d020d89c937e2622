use super::*;
use crate::core::message::TranscriptRole;
use crate::utils::test_utils::{create_test_engine, write_fixture, StubCompletion, SALES_CSV};
use tempfile::TempDir;

#[tokio::test]
async fn ask_without_dataset_sends_placeholder_context() {
    let stub = StubCompletion::new();
    let mut engine = create_test_engine(&stub);

    assert_eq!(engine.state(), EngineState::NoDataset);
    engine.ask("what is in the data?").await.expect("ask succeeds");

    let system = stub.last_system_prompt();
    assert!(system.contains("Current data context: No data loaded yet."));
}

#[tokio::test]
async fn loaded_dataset_shape_reaches_the_request() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_fixture(&temp_dir, "sales.csv", SALES_CSV);
    let stub = StubCompletion::new().reply_with("There are two columns: id and amount.");
    let mut engine = create_test_engine(&stub);

    let message = engine.load_dataset(&path);
    assert!(message.starts_with("Dataset loaded successfully: "));
    assert!(message.contains("3 rows, 2 columns"));
    assert_eq!(engine.state(), EngineState::DatasetLoaded);
    assert!(engine
        .dataset_description()
        .expect("description set")
        .contains("3 rows, 2 columns"));

    let reply = engine
        .ask("what columns are there?")
        .await
        .expect("ask succeeds");
    assert_eq!(reply, "There are two columns: id and amount.");

    let system = stub.last_system_prompt();
    assert!(system.contains("3 rows, 2 columns"));
    assert!(system.contains("Columns: id, amount"));
    assert!(!system.contains(NO_DATA_CONTEXT));
}

#[tokio::test]
async fn missing_file_reports_error_and_keeps_placeholder() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let stub = StubCompletion::new();
    let mut engine = create_test_engine(&stub);

    let message = engine.load_dataset(temp_dir.path().join("missing.csv"));
    assert!(message.starts_with("Error loading dataset: "));
    assert!(message.contains("File not found"));
    assert_eq!(engine.dataset_description(), None);

    engine.ask("anything loaded?").await.expect("ask succeeds");
    assert!(stub.last_system_prompt().contains("No data loaded yet."));
}

#[tokio::test]
async fn failed_reload_retains_previous_dataset() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sales = write_fixture(&temp_dir, "sales.csv", SALES_CSV);
    let bogus = write_fixture(&temp_dir, "model.parquet", "PAR1");
    let stub = StubCompletion::new();
    let mut engine = create_test_engine(&stub);

    engine.load_dataset(&sales);
    let before = engine.dataset_description().map(str::to_string);

    let message = engine.load_dataset(&bogus);
    assert_eq!(message, "Error loading dataset: Unsupported file format: parquet");
    assert_eq!(engine.state(), EngineState::DatasetLoaded);
    assert_eq!(engine.dataset_description().map(str::to_string), before);
    assert_eq!(engine.dataset().map(|d| d.path.clone()), Some(sales));
}

#[tokio::test]
async fn successful_reload_replaces_description() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sales = write_fixture(&temp_dir, "sales.csv", SALES_CSV);
    let regions = write_fixture(
        &temp_dir,
        "regions.json",
        r#"[{"region":"north","units":4,"active":true}]"#,
    );
    let mut engine = create_test_engine(&StubCompletion::new());

    engine.load_dataset(&sales);
    engine.load_dataset(&regions);

    let description = engine.dataset_description().expect("description set");
    assert!(description.contains("1 rows, 3 columns"));
    assert!(description.contains("Columns: region, units, active"));
    assert!(!description.contains("sales.csv"));
}

#[tokio::test]
async fn text_files_get_a_generic_description() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let notes = write_fixture(&temp_dir, "notes.txt", "free-form notes");
    let mut engine = create_test_engine(&StubCompletion::new());

    let message = engine.load_dataset(&notes);
    assert_eq!(
        message,
        format!("Dataset loaded successfully: Text data loaded from: {}", notes.display())
    );
}

#[tokio::test]
async fn transcript_grows_by_two_entries_per_ask_in_order() {
    let stub = StubCompletion::new();
    let mut engine = create_test_engine(&stub);

    for question in ["first", "second", "third"] {
        engine.ask(question).await.expect("ask succeeds");
    }

    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 6);
    let entries: Vec<_> = transcript
        .messages()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            (TranscriptRole::User, "first"),
            (TranscriptRole::Assistant, "reply 1"),
            (TranscriptRole::User, "second"),
            (TranscriptRole::Assistant, "reply 2"),
            (TranscriptRole::User, "third"),
            (TranscriptRole::Assistant, "reply 3"),
        ]
    );
}

#[tokio::test]
async fn request_carries_history_then_question() {
    let stub = StubCompletion::new();
    let mut engine = create_test_engine(&stub);

    engine.ask("hello").await.expect("ask succeeds");
    engine.ask("and now?").await.expect("ask succeeds");

    let request = stub.last_request();
    assert_eq!(request.model, DEFAULT_MODEL);
    assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
    let roles: Vec<_> = request.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    assert_eq!(request.messages[1].content, "hello");
    assert_eq!(request.messages[2].content, "reply 1");
    assert_eq!(request.messages[3].content, "and now?");
}

#[tokio::test]
async fn service_failure_leaves_transcript_untouched() {
    let stub = StubCompletion::new().fail_with(429, "Rate limit reached");
    let mut engine = create_test_engine(&stub);

    let err = engine.ask("are you there?").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 429: Rate limit reached");
    assert!(engine.transcript().is_empty());

    engine.ask("retry").await.expect("second ask succeeds");
    assert_eq!(engine.transcript().len(), 2);
}

#[tokio::test]
async fn history_is_bounded_by_max_turns() {
    let stub = StubCompletion::new();
    let settings = EngineSettings {
        max_turns: Some(2),
        ..Default::default()
    };
    let mut engine = ConversationEngine::new(settings, Box::new(stub.clone()));

    for index in 0..4 {
        engine.ask(&format!("q{index}")).await.expect("ask succeeds");
    }

    assert_eq!(engine.transcript().len(), 4);
    let request = engine.build_request("next");
    let contents: Vec<_> = request
        .messages
        .iter()
        .skip(1)
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, vec!["q2", "reply 3", "q3", "reply 4", "next"]);
}

#[tokio::test]
async fn custom_settings_flow_into_request() {
    let stub = StubCompletion::new();
    let settings = EngineSettings {
        model: "gpt-4o-mini".to_string(),
        temperature: 0.0,
        system_prompt: "Be brief. Context: {data_context}".to_string(),
        max_turns: None,
    };
    let mut engine = ConversationEngine::new(settings, Box::new(stub.clone()));

    engine.ask("hi").await.expect("ask succeeds");
    let request = stub.last_request();
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.temperature, 0.0);
    assert_eq!(request.messages[0].content, "Be brief. Context: No data loaded yet.");
}

#[test]
fn connect_requires_a_credential() {
    let result = ConversationEngine::connect(
        EngineSettings::default(),
        None,
        "https://api.openai.com/v1",
        None,
    );
    assert!(matches!(result, Err(EngineError::MissingCredential(_))));

    let blank = ConversationEngine::connect(
        EngineSettings::default(),
        Some("   ".to_string()),
        "https://api.openai.com/v1",
        None,
    );
    assert!(matches!(blank, Err(EngineError::MissingCredential(_))));
}

#[test]
fn missing_credential_error_text_has_no_status_marker() {
    let err = match ConversationEngine::connect(
        EngineSettings::default(),
        None,
        "https://api.openai.com/v1",
        None,
    ) {
        Err(err) => err,
        Ok(_) => panic!("connect without a key should fail"),
    };
    let message = format!("❌ {err}");
    assert_eq!(message.matches('❌').count(), 1);
    assert!(message.starts_with("❌ OpenAI API key is required"));
}

#[test]
fn connect_with_key_starts_without_dataset() {
    let engine = ConversationEngine::connect(
        EngineSettings::default(),
        Some("sk-test".to_string()),
        "https://api.openai.com/v1",
        Some(Duration::from_secs(30)),
    )
    .expect("engine connects");
    assert_eq!(engine.state(), EngineState::NoDataset);
    assert!(engine.transcript().is_empty());
}

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::core::completion::{ChatCompletion, CompletionRequest, ServiceError};
use crate::core::conversation::{ConversationEngine, EngineSettings};

enum ScriptedReply {
    Text(String),
    Failure { status: u16, message: String },
}

/// Deterministic completion backend that records every request it receives.
///
/// Scripted replies are used first; after that it answers `reply <n>`.
#[derive(Clone, Default)]
pub struct StubCompletion {
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
}

impl StubCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_with(self, text: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(text.to_string()));
        self
    }

    pub fn fail_with(self, status: u16, message: &str) -> Self {
        self.script.lock().unwrap().push_back(ScriptedReply::Failure {
            status,
            message: message.to_string(),
        });
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// System message content of the most recent request.
    pub fn last_system_prompt(&self) -> String {
        self.last_request()
            .messages
            .first()
            .map(|message| {
                assert_eq!(message.role, "system");
                message.content.clone()
            })
            .expect("request has no messages")
    }
}

#[async_trait]
impl ChatCompletion for StubCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure { status, message }) => {
                Err(ServiceError::Api { status, message })
            }
            None => Ok(format!("reply {count}")),
        }
    }
}

pub fn create_test_engine(stub: &StubCompletion) -> ConversationEngine {
    ConversationEngine::new(EngineSettings::default(), Box::new(stub.clone()))
}

pub fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

pub const SALES_CSV: &str = "id,amount\n1,19.99\n2,5.00\n3,42.50\n";

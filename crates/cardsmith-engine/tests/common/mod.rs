//! Common test utilities for cardsmith-engine workflow tests.

#![allow(dead_code)] // Not all test files use every helper

use std::path::Path;
use std::sync::Mutex;

use cardsmith_engine::{Backend, BackendError, StructuredRequest};
use serde_json::{Value, json};

type Responder = Box<dyn Fn(&StructuredRequest) -> Result<Value, BackendError> + Send + Sync>;

/// A backend answering every request with a closure, recording requests.
pub struct StubBackend {
    responder: Responder,
    requests: Mutex<Vec<StructuredRequest>>,
}

impl StubBackend {
    /// Answer with `responder`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&StructuredRequest) -> Result<Value, BackendError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always return `value`.
    pub fn returning(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    /// Always fail with `message`.
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| Err(BackendError::other(message.clone())))
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Copies of the requests received.
    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Backend for StubBackend {
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

/// Backend output for a deck with `count` generated cards.
pub fn deck_json(deck_name: &str, count: usize) -> Value {
    let cards: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "question": format!("Question {} about {}?", i, deck_name),
                "answer": format!("Answer {}", i),
                "tags": ["essay", format!("card-{}", i)]
            })
        })
        .collect();
    json!({"deck_name": deck_name, "cards": cards})
}

/// Pull the deck name back out of a request's system instruction.
pub fn requested_deck_name(request: &StructuredRequest) -> String {
    request
        .system_instruction
        .rsplit("with the name \"")
        .next()
        .and_then(|rest| rest.strip_suffix("\"."))
        .unwrap_or_default()
        .to_string()
}

/// Write a markdown file.
pub fn write_markdown(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

/// Parse a CSV file into rows, header included.
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

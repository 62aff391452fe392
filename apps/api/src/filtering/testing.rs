//! Test doubles for the completion seam.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::llm_client::{ClientProvider, CompletionClient, LlmError, SamplingParams};
use crate::models::job::JobRecord;

type Script = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;
type DelayScript = dyn Fn(&str) -> Duration + Send + Sync;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub params: SamplingParams,
    pub started_at: Instant,
}

/// Completion client answering from a closure over the prompt text.
pub struct ScriptedClient {
    script: Box<Script>,
    delay: Box<DelayScript>,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(script: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            delay: Box::new(|_| Duration::ZERO),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Simulated latency per prompt.
    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str, params: SamplingParams) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            params,
            started_at: Instant::now(),
        });

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = (self.delay)(prompt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.script)(prompt)
    }
}

/// Hands out one shared `ScriptedClient` and records the credentials asked for.
pub struct ScriptedProvider {
    pub client: Arc<ScriptedClient>,
    keys: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(client: ScriptedClient) -> Self {
        Self {
            client: Arc::new(client),
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl ClientProvider for ScriptedProvider {
    fn client_for(&self, api_key: &str) -> Arc<dyn CompletionClient> {
        self.keys.lock().unwrap().push(api_key.to_string());
        self.client.clone()
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

pub fn job(title: &str, company: &str) -> JobRecord {
    JobRecord {
        title: Some(title.into()),
        company: Some(company.into()),
        ..Default::default()
    }
}

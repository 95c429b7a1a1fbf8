#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bistro_picks::{
    error::{AppError, AppResult},
    models::Restaurant,
    services::RecommendationProvider,
};
use tokio::sync::{oneshot, Mutex};

pub fn restaurant(name: &str) -> Restaurant {
    Restaurant {
        id: format!("id-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        cuisine: "Mediterranean".to_string(),
        description: "Mezze and grilled fish".to_string(),
        address: "12 Harbour Rd".to_string(),
        price_range: "$$".to_string(),
        image_prompt: "a table of mezze in the sun".to_string(),
    }
}

/// Canned outcome for a stub call
#[derive(Clone)]
pub enum Outcome {
    Ok(Vec<Restaurant>),
    Fail(String),
    FailSilently,
}

impl Outcome {
    fn into_result(self) -> AppResult<Vec<Restaurant>> {
        match self {
            Outcome::Ok(list) => Ok(list),
            Outcome::Fail(msg) => Err(AppError::ExternalApi(msg)),
            Outcome::FailSilently => Err(AppError::Unknown),
        }
    }
}

/// Returns queued outcomes in order, repeating the last one when exhausted
pub struct ScriptedProvider {
    calls: AtomicUsize,
    keys: std::sync::Mutex<Vec<String>>,
    script: std::sync::Mutex<VecDeque<Outcome>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            keys: std::sync::Mutex::new(Vec::new()),
            script: std::sync::Mutex::new(script.into()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn keys_seen(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for ScriptedProvider {
    async fn fetch_recommendations(&self, api_key: &str) -> AppResult<Vec<Restaurant>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(api_key.to_string());

        let outcome = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };

        outcome
            .unwrap_or(Outcome::Ok(Vec::new()))
            .into_result()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Each call parks until the test releases it through the matching sender
pub struct GatedProvider {
    calls: AtomicUsize,
    gates: Mutex<VecDeque<oneshot::Receiver<Outcome>>>,
}

impl GatedProvider {
    pub fn new(count: usize) -> (Arc<Self>, Vec<oneshot::Sender<Outcome>>) {
        let mut senders = Vec::new();
        let mut receivers = VecDeque::new();
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }

        let provider = Arc::new(Self {
            calls: AtomicUsize::new(0),
            gates: Mutex::new(receivers),
        });
        (provider, senders)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Waits until at least `n` calls have reached the gate
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for GatedProvider {
    async fn fetch_recommendations(&self, _api_key: &str) -> AppResult<Vec<Restaurant>> {
        let gate = self.gates.lock().await.pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);

        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| AppError::Internal("gate dropped".to_string()))?
                .into_result(),
            None => Err(AppError::Internal("no gate left".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

//! Shared test fixtures: offline orchestrator builders and scripted
//! provider doubles for exercising fallback behavior per tier.
#![allow(dead_code)]

use async_trait::async_trait;
use hush_common::api::StoryGenerationRequest;
use hush_common::events::EventBus;
use hush_common::PerformanceBudget;
use hush_sg::assets::AssetStore;
use hush_sg::generate::GenerationOrchestrator;
use hush_sg::providers::ProviderRegistry;
use hush_sg::providers::{ImageProvider, NativeTts, SpeechProvider, TextProvider};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Build a minimal story request
pub fn request(prompt: &str, theme: &str, num_scenes: u32) -> StoryGenerationRequest {
    serde_json::from_value(serde_json::json!({
        "prompt": prompt,
        "theme": theme,
        "num_scenes": num_scenes,
    }))
    .unwrap()
}

/// Orchestrator with no providers and no backend: every stage must fall
/// through to its deterministic terminal tier
pub fn offline_orchestrator() -> (Arc<GenerationOrchestrator>, TempDir, EventBus) {
    orchestrator_with(ProviderRegistry::empty())
}

/// Orchestrator over the given registry, backed by a temp asset root
pub fn orchestrator_with(
    registry: ProviderRegistry,
) -> (Arc<GenerationOrchestrator>, TempDir, EventBus) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(AssetStore::new(dir.path()).unwrap());
    let events = EventBus::new(512);
    let orchestrator = Arc::new(GenerationOrchestrator::new(
        Arc::new(registry),
        None,
        store,
        PerformanceBudget::default(),
        events.clone(),
        None,
    ));
    (orchestrator, dir, events)
}

/// Budget with millisecond-scale tier timeouts so hanging doubles resolve
/// quickly in tests
pub fn fast_budget() -> PerformanceBudget {
    let snappy = hush_common::StageBudget::new(Duration::from_millis(50), Duration::from_millis(100));
    PerformanceBudget {
        text: snappy,
        image_per_unit: snappy,
        audio: snappy,
        total: hush_common::StageBudget::new(Duration::from_secs(30), Duration::from_secs(60)),
    }
}

/// Scripted behavior for a provider double
#[derive(Clone, Copy)]
pub enum Script {
    Succeed,
    Empty,
    Fail,
    Hang,
}

pub struct TextDouble {
    pub script: Script,
    pub text: String,
}

#[async_trait]
impl TextProvider for TextDouble {
    async fn generate(
        &self,
        _prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> hush_sg::Result<String> {
        match self.script {
            Script::Succeed => Ok(self.text.clone()),
            Script::Empty => Ok(String::new()),
            Script::Fail => Err(hush_sg::Error::Provider("model not loaded".to_string())),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(self.text.clone())
            }
        }
    }
}

/// Returns `count` images regardless of how many were requested, so tests
/// can exercise the partial-batch policy
pub struct ImageDouble {
    pub script: Script,
    pub count: usize,
}

#[async_trait]
impl ImageProvider for ImageDouble {
    async fn generate(
        &self,
        _prompt: &str,
        _num_images: u32,
        _width: u32,
        _height: u32,
        _steps: u32,
    ) -> hush_sg::Result<Vec<Vec<u8>>> {
        match self.script {
            Script::Succeed => Ok(vec![vec![0xAA, 0xBB, 0xCC]; self.count]),
            Script::Empty => Ok(Vec::new()),
            Script::Fail => Err(hush_sg::Error::Provider("diffusion not loaded".to_string())),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(Vec::new())
            }
        }
    }
}

pub struct SpeechDouble {
    pub script: Script,
    pub bytes: Vec<u8>,
}

#[async_trait]
impl SpeechProvider for SpeechDouble {
    async fn synthesize(&self, _text: &str, _voice: &str, _rate: f32) -> hush_sg::Result<Vec<u8>> {
        match self.script {
            Script::Succeed => Ok(self.bytes.clone()),
            Script::Empty => Ok(Vec::new()),
            Script::Fail => Err(hush_sg::Error::Provider("speech model not loaded".to_string())),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(self.bytes.clone())
            }
        }
    }
}

pub struct NativeTtsDouble {
    pub init_ok: bool,
    pub script: Script,
    pub bytes: Vec<u8>,
}

#[async_trait]
impl NativeTts for NativeTtsDouble {
    async fn initialize(&self) -> hush_sg::Result<()> {
        if self.init_ok {
            Ok(())
        } else {
            Err(hush_sg::Error::Provider("engine unavailable".to_string()))
        }
    }

    async fn synthesize_to_file(
        &self,
        _text: &str,
        _voice: &str,
        _rate: f32,
        _volume: f32,
        _pitch: f32,
    ) -> hush_sg::Result<Vec<u8>> {
        match self.script {
            Script::Succeed => Ok(self.bytes.clone()),
            Script::Empty => Ok(Vec::new()),
            Script::Fail => Err(hush_sg::Error::Provider("synthesis failed".to_string())),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(self.bytes.clone())
            }
        }
    }
}

//! tenang-advice
//!
//! The advice-text collaborator layer. Builds a counselor prompt from a
//! screening result, invokes an external generative text model behind a
//! bounded timeout, caches generated advice per session, and falls back
//! to deterministic threshold-derived text whenever the model fails.
//!
//! The model itself (Gemini, Bedrock, anything with a text-in/text-out
//! call) stays behind the [`AdviceModel`] seam; this crate never errors
//! toward the respondent.

pub mod error;
pub mod fallback;
pub mod prompt;

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use tracing::{error, info};
use uuid::Uuid;

use tenang_core::models::answer::Answer;
use tenang_core::models::screening::ScreeningSession;
use tenang_engine::catalog::SymptomCatalog;
use tenang_engine::thresholds::ThresholdTable;

use error::AdviceError;

/// Call contract for the external text model.
pub trait AdviceModel: Send + Sync {
    fn generate_text(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, AdviceError>> + Send;
}

#[derive(Debug, Clone)]
struct CachedAdvice {
    text: String,
    expires_at: Timestamp,
}

/// Generates advice text for screening sessions.
///
/// The cache is an optimization, not a correctness dependency: a cold or
/// poisoned cache only costs another model call, and a failed model call
/// only costs the personalization.
pub struct AdviceGenerator<M> {
    model: M,
    timeout: Duration,
    max_tokens: u32,
    ttl: SignedDuration,
    cache: Mutex<HashMap<Uuid, CachedAdvice>>,
}

impl<M: AdviceModel> AdviceGenerator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            timeout: Duration::from_secs(15),
            max_tokens: 800,
            ttl: SignedDuration::from_hours(24),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ttl(mut self, ttl: SignedDuration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Produce advice text for one session. Infallible by design: any
    /// model failure or timeout degrades to [`fallback::fallback_advice`].
    pub async fn generate(
        &self,
        session: &ScreeningSession,
        answers: &[Answer],
        catalog: &SymptomCatalog,
        table: &ThresholdTable,
    ) -> String {
        if let Some(text) = self.cached(session.id) {
            return text;
        }

        let context = prompt::build_context(answers, catalog);
        let prompt_text =
            prompt::build_prompt(&session.result, &context, catalog.max_possible_score());

        let call = self.model.generate_text(&prompt_text, self.max_tokens);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                info!(session_id = %session.id, "advice generated");
                self.store(session.id, text.clone());
                text
            }
            Ok(Ok(_)) => {
                error!(
                    session_id = %session.id,
                    error = %AdviceError::EmptyResponse,
                    "advice generation failed, using fallback"
                );
                fallback::fallback_advice(&session.result, table)
            }
            Ok(Err(err)) => {
                error!(
                    session_id = %session.id,
                    error = %err,
                    "advice generation failed, using fallback"
                );
                fallback::fallback_advice(&session.result, table)
            }
            Err(_) => {
                error!(
                    session_id = %session.id,
                    error = %AdviceError::Timeout(self.timeout),
                    "advice generation timed out, using fallback"
                );
                fallback::fallback_advice(&session.result, table)
            }
        }
    }

    fn cached(&self, session_id: Uuid) -> Option<String> {
        let mut cache = self.cache.lock().ok()?;
        match cache.get(&session_id) {
            Some(entry) if entry.expires_at > Timestamp::now() => Some(entry.text.clone()),
            Some(_) => {
                cache.remove(&session_id);
                None
            }
            None => None,
        }
    }

    fn store(&self, session_id: Uuid, text: String) {
        if let Ok(mut cache) = self.cache.lock() {
            // Session ids are fresh UUIDs and stale entries are rarely
            // looked up again, so sweep them here or the map grows for
            // the process lifetime.
            let now = Timestamp::now();
            cache.retain(|_, entry| entry.expires_at > now);
            cache.insert(
                session_id,
                CachedAdvice {
                    text,
                    expires_at: now + self.ttl,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tenang_engine::ScreeningEngine;

    struct CountingModel {
        calls: AtomicUsize,
    }

    impl CountingModel {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AdviceModel for CountingModel {
        async fn generate_text(
            &self,
            _prompt: &str,
            _max_tokens: u32,
        ) -> Result<String, AdviceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("personalized advice #{n}"))
        }
    }

    struct FailingModel;

    impl AdviceModel for FailingModel {
        async fn generate_text(
            &self,
            _prompt: &str,
            _max_tokens: u32,
        ) -> Result<String, AdviceError> {
            Err(AdviceError::Invocation("upstream unavailable".into()))
        }
    }

    struct HangingModel;

    impl AdviceModel for HangingModel {
        fn generate_text(
            &self,
            _prompt: &str,
            _max_tokens: u32,
        ) -> impl Future<Output = Result<String, AdviceError>> + Send {
            std::future::pending()
        }
    }

    fn screen(values: &[(&str, u8)]) -> (ScreeningSession, Vec<Answer>, ScreeningEngine) {
        let engine = ScreeningEngine::default_inventory();
        let answers: Vec<Answer> = engine
            .catalog()
            .iter()
            .map(|s| {
                let value = values
                    .iter()
                    .find(|(code, _)| *code == s.code)
                    .map(|(_, v)| *v)
                    .unwrap_or(0);
                Answer::new(s.id, value)
            })
            .collect();
        let outcome = engine.screen(&answers).unwrap();
        (ScreeningSession::new(outcome.result), answers, engine)
    }

    #[tokio::test]
    async fn generated_advice_is_cached_per_session() {
        let (session, answers, engine) = screen(&[("G3", 1)]);
        let generator = AdviceGenerator::new(CountingModel::new());

        let first = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;
        let second = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;

        assert_eq!(first, "personalized advice #1");
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn expired_cache_entries_are_regenerated() {
        let (session, answers, engine) = screen(&[("G3", 1)]);
        let generator =
            AdviceGenerator::new(CountingModel::new()).with_ttl(SignedDuration::from_secs(0));

        let first = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;
        let second = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;

        assert_eq!(first, "personalized advice #1");
        assert_eq!(second, "personalized advice #2");
    }

    #[tokio::test]
    async fn expired_entries_do_not_accumulate_across_sessions() {
        let engine = ScreeningEngine::default_inventory();
        let answers: Vec<Answer> = engine
            .catalog()
            .iter()
            .map(|s| Answer::new(s.id, 0))
            .collect();
        let generator =
            AdviceGenerator::new(CountingModel::new()).with_ttl(SignedDuration::from_secs(0));

        for _ in 0..50 {
            let outcome = engine.screen(&answers).unwrap();
            let session = ScreeningSession::new(outcome.result);
            generator
                .generate(&session, &answers, engine.catalog(), engine.thresholds())
                .await;
        }

        // Each store sweeps stale entries; at most the newest survives.
        assert!(generator.cache.lock().unwrap().len() <= 1);
    }

    #[tokio::test]
    async fn model_failure_falls_back_to_threshold_advice() {
        let (session, answers, engine) = screen(&[("G3", 2), ("G4", 2), ("G5", 2)]);
        let generator = AdviceGenerator::new(FailingModel);

        let advice = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;
        assert_eq!(
            advice,
            fallback::fallback_advice(&session.result, engine.thresholds())
        );
    }

    #[tokio::test]
    async fn crisis_fallback_overrides_level_advice() {
        let (session, answers, engine) = screen(&[("G9", 1)]);
        let generator = AdviceGenerator::new(FailingModel);

        let advice = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;
        assert_eq!(advice, fallback::CRISIS_ADVICE);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_model_fails_closed_within_the_timeout() {
        let (session, answers, engine) = screen(&[("G1", 1)]);
        let generator =
            AdviceGenerator::new(HangingModel).with_timeout(Duration::from_millis(50));

        let advice = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;
        assert_eq!(
            advice,
            fallback::fallback_advice(&session.result, engine.thresholds())
        );
    }

    #[tokio::test]
    async fn empty_model_output_is_treated_as_failure() {
        struct EmptyModel;
        impl AdviceModel for EmptyModel {
            async fn generate_text(
                &self,
                _prompt: &str,
                _max_tokens: u32,
            ) -> Result<String, AdviceError> {
                Ok("   ".into())
            }
        }

        let (session, answers, engine) = screen(&[("G3", 1)]);
        let generator = AdviceGenerator::new(EmptyModel);
        let advice = generator
            .generate(&session, &answers, engine.catalog(), engine.thresholds())
            .await;
        assert_eq!(
            advice,
            fallback::fallback_advice(&session.result, engine.thresholds())
        );
    }
}

//! Synthesize Handler - 合成流程编排
//!
//! 校验 → audio_query → 覆盖 speedScale/pitchScale → synthesis → 返回音频。
//! 两次上游调用严格串行，任一步失败即整体失败，不返回部分结果。

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::application::commands::synthesize_commands::*;
use crate::application::error::SynthesisError;
use crate::application::ports::VoiceEnginePort;
use crate::domain::synthesis::{RequestLimits, SynthesisRequest};

pub struct SynthesizeHandler {
    voice_engine: Arc<dyn VoiceEnginePort>,
    limits: RequestLimits,
}

impl SynthesizeHandler {
    pub fn new(voice_engine: Arc<dyn VoiceEnginePort>, limits: RequestLimits) -> Self {
        Self {
            voice_engine,
            limits,
        }
    }

    pub async fn handle(&self, cmd: SynthesizeCommand) -> Result<SynthesizeResponse, SynthesisError> {
        let span = tracing::info_span!("synthesize", request_id = %Uuid::new_v4());

        async {
            let mut stage = SynthesisStage::Validating;
            let result = self.run(cmd, &mut stage).await;
            if let Err(e) = &result {
                tracing::warn!(stage = %stage, error = %e, "Synthesis failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        cmd: SynthesizeCommand,
        stage: &mut SynthesisStage,
    ) -> Result<SynthesizeResponse, SynthesisError> {
        let request = SynthesisRequest::from_body(cmd.body, &self.limits)?;

        tracing::info!(
            text_len = request.text().chars().count(),
            speaker = %request.speaker(),
            speed = request.speed(),
            pitch = request.pitch(),
            "Synthesis request accepted"
        );

        advance(stage, SynthesisStage::QueryPending);
        let mut query = self
            .voice_engine
            .audio_query(request.text(), request.speaker())
            .await?;

        advance(stage, SynthesisStage::QueryReceived);
        query.apply_overrides(request.speed(), request.pitch());

        advance(stage, SynthesisStage::SynthesisPending);
        let audio = self
            .voice_engine
            .synthesis(&query, request.speaker())
            .await?;

        advance(stage, SynthesisStage::Done);
        tracing::info!(audio_size = audio.len(), "Synthesis completed");

        Ok(SynthesizeResponse { audio })
    }
}

fn advance(stage: &mut SynthesisStage, next: SynthesisStage) {
    tracing::debug!(from = %stage, to = %next, "Synthesis stage transition");
    *stage = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{UpstreamStep, VoiceEngineError};
    use crate::domain::synthesis::{
        AudioArtifact, QueryDocument, RawBody, RequestError, SpeakerId,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// 记录调用的上游替身
    #[derive(Default)]
    struct RecordingEngine {
        query_calls: Mutex<Vec<(String, SpeakerId)>>,
        synthesis_calls: Mutex<Vec<(QueryDocument, SpeakerId)>>,
        fail_query: Option<VoiceEngineError>,
        fail_synthesis: Option<VoiceEngineError>,
    }

    #[async_trait]
    impl VoiceEnginePort for RecordingEngine {
        async fn audio_query(
            &self,
            text: &str,
            speaker: SpeakerId,
        ) -> Result<QueryDocument, VoiceEngineError> {
            self.query_calls
                .lock()
                .unwrap()
                .push((text.to_string(), speaker));
            if let Some(e) = &self.fail_query {
                return Err(e.clone());
            }
            Ok(QueryDocument::from_value(json!({
                "speedScale": 1.0,
                "pitchScale": 0.0,
                "other": "x"
            }))
            .unwrap())
        }

        async fn synthesis(
            &self,
            query: &QueryDocument,
            speaker: SpeakerId,
        ) -> Result<AudioArtifact, VoiceEngineError> {
            self.synthesis_calls
                .lock()
                .unwrap()
                .push((query.clone(), speaker));
            if let Some(e) = &self.fail_synthesis {
                return Err(e.clone());
            }
            Ok(AudioArtifact::new(vec![0x52, 0x49, 0x46, 0x46]))
        }
    }

    fn handler(engine: Arc<RecordingEngine>) -> SynthesizeHandler {
        SynthesizeHandler::new(engine, RequestLimits::default())
    }

    fn command(body: serde_json::Value) -> SynthesizeCommand {
        SynthesizeCommand {
            body: RawBody::Text(body.to_string()),
        }
    }

    #[tokio::test]
    async fn test_overrides_reach_synthesis_call() {
        let engine = Arc::new(RecordingEngine::default());
        let response = handler(engine.clone())
            .handle(command(json!({"text": "こんにちは", "speed": 1.2, "pitch": 0.1, "speaker": 2})))
            .await
            .unwrap();

        assert_eq!(response.audio.as_bytes(), &[0x52, 0x49, 0x46, 0x46]);

        let queries = engine.query_calls.lock().unwrap();
        assert_eq!(queries.as_slice(), &[("こんにちは".to_string(), SpeakerId::new(2))]);

        let synths = engine.synthesis_calls.lock().unwrap();
        assert_eq!(synths.len(), 1);
        let (doc, speaker) = &synths[0];
        assert_eq!(*speaker, SpeakerId::new(2));
        assert_eq!(doc.speed_scale(), Some(1.2));
        assert_eq!(doc.pitch_scale(), Some(0.1));
        assert_eq!(doc.get("other"), Some(&json!("x")));
    }

    #[tokio::test]
    async fn test_defaults_override_upstream_values() {
        let engine = Arc::new(RecordingEngine::default());
        handler(engine.clone())
            .handle(command(json!({"text": "hi"})))
            .await
            .unwrap();

        let synths = engine.synthesis_calls.lock().unwrap();
        assert_eq!(synths[0].0.speed_scale(), Some(1.0));
        assert_eq!(synths[0].0.pitch_scale(), Some(0.0));
    }

    #[tokio::test]
    async fn test_invalid_request_never_calls_upstream() {
        let engine = Arc::new(RecordingEngine::default());
        let handler = handler(engine.clone());

        for body in [json!({}), json!({"text": ""}), json!({"text": 1}), json!({"text": "あ".repeat(301)})] {
            let err = handler.handle(command(body)).await.unwrap_err();
            assert!(matches!(err, SynthesisError::InvalidRequest(_)));
        }

        let err = handler
            .handle(SynthesizeCommand {
                body: RawBody::Text("{".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::InvalidRequest(RequestError::InvalidBody(_))
        ));

        assert!(engine.query_calls.lock().unwrap().is_empty());
        assert!(engine.synthesis_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_skips_synthesis() {
        let engine = Arc::new(RecordingEngine {
            fail_query: Some(VoiceEngineError::Status {
                step: UpstreamStep::AudioQuery,
                status: 400,
                status_text: "Bad Request".to_string(),
                body: "bad speaker".to_string(),
            }),
            ..Default::default()
        });

        let err = handler(engine.clone())
            .handle(command(json!({"text": "hi"})))
            .await
            .unwrap_err();

        match err {
            SynthesisError::Upstream(e) => assert_eq!(e.step(), UpstreamStep::AudioQuery),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(engine.synthesis_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_reported() {
        let engine = Arc::new(RecordingEngine {
            fail_synthesis: Some(VoiceEngineError::Transport {
                step: UpstreamStep::Synthesis,
                message: "connection reset".to_string(),
            }),
            ..Default::default()
        });

        let err = handler(engine)
            .handle(command(json!({"text": "hi"})))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SynthesisError::Upstream(VoiceEngineError::Transport {
                step: UpstreamStep::Synthesis,
                ..
            })
        ));
    }
}

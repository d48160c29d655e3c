//! 编排器集成测试：脚本化后端驱动完整任务路径

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use mentor::core::poll_until_terminal;
    use mentor::core::JobRequest;
    use mentor::core::Orchestrator;
    use mentor::jobs::{JobRegistry, JobStatus, GENERATION_ERROR_CODE};
    use mentor::llm::{GenerationClient, GenerationOptions, ScriptedBackend};
    use mentor::schedule::{ContentCategory, MaterialDescriptor, StudyGoals, StudyPreferences};

    fn orchestrator(backend: Arc<ScriptedBackend>) -> Orchestrator {
        let client = Arc::new(GenerationClient::new(backend, "gpt-4o-mini"));
        Orchestrator::new(
            Arc::new(JobRegistry::new()),
            client,
            GenerationOptions::default().with_model("gpt-4o"),
        )
    }

    fn material() -> MaterialDescriptor {
        MaterialDescriptor::new(
            "m1",
            "所有权与借用",
            "Rust 的所有权系统……".repeat(100),
            ContentCategory::Document,
        )
    }

    fn schedule_request() -> JobRequest {
        JobRequest::Schedule {
            materials: vec![material()],
            preferences: StudyPreferences::default(),
            goals: StudyGoals::default(),
            feedback_ratings: vec![],
        }
    }

    async fn wait(orch: &Orchestrator, id: &str) -> mentor::jobs::Job {
        poll_until_terminal(orch.registry(), id, Duration::from_millis(10), 200)
            .await
            .expect("job should reach a terminal state")
    }

    #[tokio::test]
    async fn test_schedule_job_completes_with_metrics() {
        let body = json!({
            "schedule": [
                {"materialId": "m1", "title": "精读", "duration": 60,
                 "sessionType": "study", "scheduledDate": "2026-09-01"},
                {"materialId": "m1", "title": "复习", "duration": 30,
                 "sessionType": "review", "scheduledDate": "2026-09-03"}
            ],
            "suggestions": ["保持固定的学习时段"]
        });
        let backend = Arc::new(
            ScriptedBackend::new().with_response(format!("```json\n{}\n```", body)),
        );
        let orch = orchestrator(backend);

        let id = orch.submit(schedule_request()).await.unwrap();
        let job = wait(&orch, &id).await;

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        let result = job.result.unwrap();
        assert_eq!(result["degraded"], json!(false));
        assert_eq!(result["schedule"].as_array().unwrap().len(), 2);

        let distribution = result["metrics"]["materialDistribution"].as_object().unwrap();
        let sum: u64 = distribution.values().map(|v| v.as_u64().unwrap()).sum();
        assert!((99..=101).contains(&sum));
        let confidence = result["metrics"]["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[tokio::test]
    async fn test_unparseable_output_completes_degraded() {
        // 生成端只给了闲聊文本：任务仍 completed，结果降级且带建议
        let backend = Arc::new(ScriptedBackend::new().with_response("抱歉，我排不出来。"));
        let orch = orchestrator(backend);

        let id = orch.submit(schedule_request()).await.unwrap();
        let job = wait(&orch, &id).await;

        assert_eq!(job.status, JobStatus::Completed);
        let result = job.result.unwrap();
        assert_eq!(result["degraded"], json!(true));
        assert!(result["schedule"].as_array().unwrap().is_empty());
        assert!(!result["suggestions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_model_rescues_job() {
        let body = json!({"schedule": [], "suggestions": ["rescued"]});
        let backend = Arc::new(
            ScriptedBackend::new()
                .with_failure("primary model down")
                .with_response(format!("```json\n{}\n```", body)),
        );
        let orch = orchestrator(backend.clone());

        let id = orch.submit(schedule_request()).await.unwrap();
        let job = wait(&orch, &id).await;

        assert_eq!(job.status, JobStatus::Completed);
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_exhausted_fallback_fails_job() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .with_failure("primary down")
                .with_failure("fallback down"),
        );
        let orch = orchestrator(backend);

        let id = orch.submit(schedule_request()).await.unwrap();
        let job = wait(&orch, &id).await;

        assert_eq!(job.status, JobStatus::Failed);
        let err = job.error.unwrap();
        assert_eq!(err.code, GENERATION_ERROR_CODE);
        assert!(err.message.contains("fallback down"));
        assert!(job.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_invalid_request_creates_no_job() {
        let orch = orchestrator(Arc::new(ScriptedBackend::new()));

        let request = JobRequest::Flashcards {
            material: material(),
            count: 0,
        };
        assert!(orch.submit(request).await.is_err());
        assert!(orch.registry().list_active().await.is_empty());
    }

    #[tokio::test]
    async fn test_summary_job_strict_path() {
        let body = json!({
            "title": "所有权与借用",
            "summary": "Rust 通过所有权在编译期管理内存。",
            "keyPoints": ["移动语义", "借用检查器"]
        });
        let backend = Arc::new(
            ScriptedBackend::new().with_response(format!("```json\n{}\n```", body)),
        );
        let orch = orchestrator(backend);

        let id = orch
            .submit(JobRequest::Summarize { material: material() })
            .await
            .unwrap();
        let job = wait(&orch, &id).await;

        assert_eq!(job.status, JobStatus::Completed);
        let result = job.result.unwrap();
        assert_eq!(result["degraded"], json!(false));
        assert_eq!(result["summary"]["title"], json!("所有权与借用"));
        assert_eq!(result["summary"]["keyPoints"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_jobs_do_not_interfere() {
        let backend = Arc::new(ScriptedBackend::new());
        let orch = orchestrator(backend);

        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(
                orch.submit(JobRequest::Notes { material: material() })
                    .await
                    .unwrap(),
            );
        }

        for id in &ids {
            let job = wait(&orch, id).await;
            assert_eq!(job.status, JobStatus::Completed);
        }
    }
}

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use strategist_aggregation::AggregationConfig;
use strategist_core::{AggregationOutcome, Language, PartKey};
use strategist_server::{
    run_plan, serve_on, AppState, ContentModel, ModelError, PartPrompt, PlanOptions, PlanProfile,
    GENERATE_PATH,
};
use strategist_test_utils::sample_body;
use strategist_wizard::NullRenderer;
use tokio::net::TcpListener;

struct CannedModel {
    failing: Vec<PartKey>,
}

#[async_trait]
impl ContentModel for CannedModel {
    async fn generate(&self, prompt: &PartPrompt) -> Result<String, ModelError> {
        if self.failing.contains(&prompt.part) {
            return Err(ModelError::Empty);
        }
        Ok(sample_body(prompt.part))
    }
}

async fn start(failing: Vec<PartKey>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(Arc::new(CannedModel { failing }));
    tokio::spawn(serve_on(listener, state));
    addr
}

fn profile() -> PlanProfile {
    PlanProfile::from_toml(
        r#"
name = "Ada Lovelace"
email = "ada@example.com"
industry = "tech"
sub_industry = "saas"
company_size = "startup"
goals = ["leads", "awareness", "sales"]
platforms = ["google", "linkedin"]
challenges = ["budget", "competition", "talent"]
"#,
        "inline",
    )
    .unwrap()
}

fn options(addr: SocketAddr, out_dir: Option<std::path::PathBuf>) -> PlanOptions {
    PlanOptions {
        language: Language::En,
        aggregation: AggregationConfig::new()
            .with_endpoint(format!("http://{addr}{GENERATE_PATH}"))
            .with_part_timeout_secs(10),
        out_dir,
    }
}

#[tokio::test]
async fn complete_plan_writes_the_document() {
    let addr = start(Vec::new()).await;
    let dir = tempfile::tempdir().unwrap();

    let summary = run_plan(
        &profile(),
        &options(addr, Some(dir.path().to_path_buf())),
        Box::new(NullRenderer),
    )
    .await
    .unwrap();

    assert_eq!(summary.outcome, AggregationOutcome::Complete);
    assert_eq!(summary.arrived.len(), PartKey::COUNT);
    assert_eq!(summary.title, "Pipeline Pilot");
    let path = summary.document.unwrap();
    assert_eq!(path, dir.path().join("Strategic-Plan-Ada Lovelace.md"));
    assert!(std::fs::read_to_string(path).unwrap().contains("Ada Lovelace"));
}

#[tokio::test]
async fn partial_plan_writes_nothing() {
    let addr = start(vec![PartKey::SwotAnalysis, PartKey::Timeline]).await;
    let dir = tempfile::tempdir().unwrap();

    let summary = run_plan(
        &profile(),
        &options(addr, Some(dir.path().to_path_buf())),
        Box::new(NullRenderer),
    )
    .await
    .unwrap();

    assert_eq!(summary.outcome, AggregationOutcome::Partial);
    assert_eq!(summary.arrived.len(), 6);
    assert!(summary.document.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn every_part_failing_is_reported_once() {
    let addr = start(PartKey::ALL.to_vec()).await;

    let summary = run_plan(&profile(), &options(addr, None), Box::new(NullRenderer))
        .await
        .unwrap();

    match summary.outcome {
        AggregationOutcome::AllFailed(failure) => {
            assert_eq!(failure.failures.len(), PartKey::COUNT);
            assert!(failure.failures[0]
                .reason
                .contains("Failed to generate plan part 'executiveSummary'"));
        }
        other => panic!("expected total failure, got {other:?}"),
    }
}

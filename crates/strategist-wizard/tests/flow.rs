use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strategist_aggregation::{AggregationConfig, Aggregator, CycleId};
use strategist_core::{AggregateFailure, Badge, PartContent, PartKey};
use strategist_i18n::Catalog;
use strategist_test_utils::{sample_basic_info, ScriptedGenerator};
use strategist_wizard::{
    DashboardRenderer, MarkdownExporter, WizardConfig, WizardError, WizardSession, WizardStep,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    CycleStarted,
    Region(PartKey),
    ActionsEnabled,
    AllFailed,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }
}

impl DashboardRenderer for Recorder {
    fn cycle_started(&mut self) {
        self.0.lock().unwrap().push(Call::CycleStarted);
    }

    fn region_ready(&mut self, part: PartKey, _content: &PartContent) {
        self.0.lock().unwrap().push(Call::Region(part));
    }

    fn actions_enabled(&mut self) {
        self.0.lock().unwrap().push(Call::ActionsEnabled);
    }

    fn all_failed(&mut self, _failure: &AggregateFailure) {
        self.0.lock().unwrap().push(Call::AllFailed);
    }
}

fn session(generator: ScriptedGenerator) -> (WizardSession, Recorder) {
    let recorder = Recorder::default();
    let session = WizardSession::new(
        WizardConfig::new(),
        Arc::new(Catalog::bundled().unwrap()),
        Aggregator::new(Arc::new(generator), AggregationConfig::new()),
        Box::new(recorder.clone()),
    );
    (session, recorder)
}

fn keys(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn walk_to_challenges(session: &mut WizardSession, goals: &[&str]) {
    assert_eq!(session.start().unwrap(), WizardStep::BasicInfo);
    assert_eq!(
        session.submit_basic_info(sample_basic_info()).unwrap(),
        WizardStep::Goals
    );
    assert_eq!(session.submit_goals(keys(goals)).unwrap(), WizardStep::Platforms);
    assert_eq!(
        session.submit_platforms(keys(&["google", "linkedin"])).unwrap(),
        WizardStep::Challenges
    );
}

#[tokio::test]
async fn four_goals_one_challenge_is_not_master() {
    let (mut session, _) = session(ScriptedGenerator::new());
    walk_to_challenges(&mut session, &["awareness", "leads", "conversion", "engagement"]);
    let before = session.ledger().points();

    assert_eq!(
        session.submit_challenges(keys(&["budget"])).unwrap(),
        WizardStep::Dashboard
    );

    assert_eq!(session.ledger().points() - before, 200);
    assert!(session.ledger().has(Badge::ChallengeTackler));
    assert!(!session.ledger().has(Badge::MasterStrategist));
    session.settle().await.unwrap();
}

#[tokio::test]
async fn points_accumulate_per_submission_and_badges_do_not_repeat() {
    let (mut session, _) = session(ScriptedGenerator::new());
    walk_to_challenges(&mut session, &["awareness", "leads", "sales"]);
    session
        .submit_challenges(keys(&["budget", "competition", "talent"]))
        .unwrap();
    assert_eq!(session.ledger().points(), 50 + 100 + 150 + 150 + 200 + 250);
    session.settle().await.unwrap();

    assert_eq!(session.previous(), WizardStep::Challenges);
    session
        .submit_challenges(keys(&["budget", "competition", "talent"]))
        .unwrap();
    session.settle().await.unwrap();

    let badges: Vec<Badge> = session.ledger().badges().iter().copied().collect();
    assert_eq!(
        badges,
        vec![
            Badge::JourneyStarter,
            Badge::InsightfulInformant,
            Badge::GoalSetter,
            Badge::DigitalArchitect,
            Badge::ChallengeTackler,
            Badge::MasterStrategist,
        ]
    );
    assert_eq!(session.ledger().points(), 900 + 200 + 250);
}

#[tokio::test]
async fn export_enabled_only_after_eighth_part() {
    let (mut session, recorder) = session(ScriptedGenerator::new());
    let exporter = MarkdownExporter::new(Arc::new(Catalog::bundled().unwrap()));
    walk_to_challenges(&mut session, &["leads"]);
    session.submit_challenges(keys(&["tech"])).unwrap();

    assert!(matches!(
        session.export(&exporter),
        Err(WizardError::ReportIncomplete { missing: 8 })
    ));

    session.settle().await.unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.first(), Some(&Call::CycleStarted));
    assert_eq!(calls.last(), Some(&Call::ActionsEnabled));
    assert_eq!(
        calls.iter().filter(|c| matches!(c, Call::Region(_))).count(),
        8
    );

    let document = session.export(&exporter).unwrap();
    assert_eq!(document.file_name, "Strategic-Plan-Ada Lovelace.md");

    let links = session.booking().unwrap();
    assert!(links.mailto.starts_with("mailto:consulting@example.com?subject="));
    assert!(links.whatsapp.starts_with("https://wa.me/15550100?text="));
    assert!(links.request.body.contains("Lead Generation"));
}

#[tokio::test(start_paused = true)]
async fn reentry_discards_the_abandoned_cycle() {
    let generator = PartKey::ALL
        .into_iter()
        .fold(ScriptedGenerator::new(), |g, p| {
            g.respond_after(p, Duration::from_secs(10))
        });
    let (mut session, recorder) = session(generator);
    walk_to_challenges(&mut session, &["leads"]);
    session.submit_challenges(keys(&["budget"])).unwrap();
    assert_eq!(session.assembly().unwrap().cycle(), CycleId::new(1));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(session.previous(), WizardStep::Challenges);
    assert!(session.assembly().is_none());

    session.submit_challenges(keys(&["budget", "talent"])).unwrap();
    let assembly = session.assembly().unwrap();
    assert_eq!(assembly.cycle(), CycleId::new(2));
    assert!(assembly.report().is_empty());

    let report = session.settle().await.unwrap();
    assert_eq!(report.cycle, CycleId::new(2));
    assert!(session.actions_enabled());

    let calls = recorder.calls();
    assert_eq!(
        calls.iter().filter(|c| **c == Call::CycleStarted).count(),
        2
    );
    // cycle 1 finished first, but none of its parts reached the dashboard
    assert_eq!(
        calls.iter().filter(|c| matches!(c, Call::Region(_))).count(),
        8
    );
}

#[tokio::test]
async fn previous_is_clamped_and_keeps_answers() {
    let (mut session, _) = session(ScriptedGenerator::new());
    assert_eq!(session.previous(), WizardStep::Welcome);

    session.start().unwrap();
    assert_eq!(session.previous(), WizardStep::BasicInfo);

    session.submit_basic_info(sample_basic_info()).unwrap();
    assert_eq!(session.previous(), WizardStep::BasicInfo);
    assert_eq!(session.draft().basic.name, "Ada Lovelace");
}

#[tokio::test]
async fn settle_without_cycle_is_an_error() {
    let (mut session, _) = session(ScriptedGenerator::new());
    assert!(matches!(
        session.settle().await,
        Err(WizardError::NoActiveCycle)
    ));
}

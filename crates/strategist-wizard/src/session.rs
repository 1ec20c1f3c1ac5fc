//! Wizard session
//!
//! Owns everything the wizard mutates: the profile draft, the gamification
//! ledger, the active language and the report assembly of the current cycle.
//!
//! Reaching the dashboard launches exactly one aggregation cycle. Going back
//! discards the cycle's report; its requests keep running but their events
//! are tagged with a cycle that is no longer current and get dropped.

use crate::assembly::{Applied, ReportAssembly};
use crate::booking::ConsultationRequest;
use crate::config::WizardConfig;
use crate::error::WizardError;
use crate::export::{DocumentExporter, ExportContext, ExportedDocument};
use crate::render::DashboardRenderer;
use crate::step::WizardStep;
use std::sync::Arc;
use strategist_aggregation::{
    AggregationEvent, Aggregator, ChannelObserver, CycleId, CycleReport, GenerationRequest,
};
use strategist_core::{
    AggregationOutcome, Badge, BasicInfo, GamificationLedger, Language, PartContent, Profile,
    ProfileDraft,
};
use strategist_i18n::{localize_profile, Translator};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Links offered by the booking action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingLinks {
    pub request: ConsultationRequest,
    pub mailto: String,
    pub whatsapp: String,
}

enum Next {
    Event(AggregationEvent),
    Settled(Result<CycleReport, tokio::task::JoinError>),
}

/// One user's pass through the wizard
pub struct WizardSession {
    config: WizardConfig,
    step: WizardStep,
    draft: ProfileDraft,
    profile: Option<Profile>,
    ledger: GamificationLedger,
    language: Language,
    translator: Arc<dyn Translator>,
    aggregator: Aggregator,
    renderer: Box<dyn DashboardRenderer>,
    assembly: Option<ReportAssembly>,
    last_cycle: CycleId,
    running: Option<JoinHandle<CycleReport>>,
    events_tx: mpsc::UnboundedSender<AggregationEvent>,
    events_rx: mpsc::UnboundedReceiver<AggregationEvent>,
}

impl std::fmt::Debug for WizardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardSession")
            .field("step", &self.step)
            .field("language", &self.language)
            .field("ledger", &self.ledger)
            .field("cycle", &self.assembly.as_ref().map(ReportAssembly::cycle))
            .finish_non_exhaustive()
    }
}

impl WizardSession {
    /// Create a session at the welcome step
    #[must_use]
    pub fn new(
        config: WizardConfig,
        translator: Arc<dyn Translator>,
        aggregator: Aggregator,
        renderer: Box<dyn DashboardRenderer>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            language: config.language,
            config,
            step: WizardStep::Welcome,
            draft: ProfileDraft::new(),
            profile: None,
            ledger: GamificationLedger::new(),
            translator,
            aggregator,
            renderer,
            assembly: None,
            last_cycle: CycleId::default(),
            running: None,
            events_tx,
            events_rx,
        }
    }

    /// Session posting part requests over HTTP as configured
    #[must_use]
    pub fn with_http(
        config: WizardConfig,
        translator: Arc<dyn Translator>,
        renderer: Box<dyn DashboardRenderer>,
    ) -> Self {
        let aggregator = Aggregator::http(config.aggregation.clone());
        Self::new(config, translator, aggregator, renderer)
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[inline]
    #[must_use]
    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Profile frozen at the last challenges submission
    #[inline]
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &GamificationLedger {
        &self.ledger
    }

    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Language for text and for the next cycle's generated content
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Report assembly of the current cycle, if on the dashboard
    #[inline]
    #[must_use]
    pub fn assembly(&self) -> Option<&ReportAssembly> {
        self.assembly.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<AggregationOutcome> {
        self.assembly.as_ref().map(ReportAssembly::outcome)
    }

    /// Export and booking are available
    #[must_use]
    pub fn actions_enabled(&self) -> bool {
        self.assembly
            .as_ref()
            .is_some_and(|a| a.snapshot().is_some())
    }

    /// Leave the welcome screen
    ///
    /// # Errors
    /// `WizardError::WrongStep` unless at the welcome step.
    pub fn start(&mut self) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::Welcome)?;
        Ok(self.complete_step())
    }

    /// Submit name, email, industry, sub-industry and company size
    ///
    /// # Errors
    /// Wrong step, or the answers fail validation (the draft is unchanged).
    pub fn submit_basic_info(&mut self, info: BasicInfo) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::BasicInfo)?;
        self.draft.apply_basic_info(info)?;
        Ok(self.complete_step())
    }

    /// # Errors
    /// Wrong step, empty selection or unknown goal key.
    pub fn submit_goals(&mut self, goals: Vec<String>) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::Goals)?;
        self.draft.apply_goals(goals)?;
        Ok(self.complete_step())
    }

    /// # Errors
    /// Wrong step, empty selection or unknown platform key.
    pub fn submit_platforms(&mut self, platforms: Vec<String>) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::Platforms)?;
        self.draft.apply_platforms(platforms)?;
        Ok(self.complete_step())
    }

    /// Submit challenges, finalize the profile and launch a cycle
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    /// Wrong step, or the draft does not finalize.
    pub fn submit_challenges(
        &mut self,
        challenges: Vec<String>,
    ) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::Challenges)?;
        self.draft.apply_challenges(challenges)?;
        let profile = self.draft.finalize()?;

        let master = profile.is_master_strategist();
        self.profile = Some(profile);
        let step = self.complete_step();
        if master {
            self.award(Badge::MasterStrategist);
        }

        self.launch_cycle();
        Ok(step)
    }

    /// Go back one step
    ///
    /// Leaving the dashboard discards the current report.
    pub fn previous(&mut self) -> WizardStep {
        let target = self.step.previous();
        if self.step == WizardStep::Dashboard && target != self.step {
            if let Some(assembly) = self.assembly.take() {
                tracing::info!("Abandoning cycle {}", assembly.cycle());
            }
            self.running = None;
        }
        self.step = target;
        target
    }

    /// Apply one aggregation event and render its effect
    pub fn apply(&mut self, event: AggregationEvent) -> Applied {
        let Some(assembly) = self.assembly.as_mut() else {
            return Applied::Stale {
                event_cycle: event.cycle,
            };
        };

        let applied = assembly.apply(event);
        match &applied {
            Applied::Merged {
                part,
                content,
                completed,
            } => {
                if let PartContent::Gamification(title) = content {
                    self.ledger.set_title(title.title.clone());
                }
                self.renderer.region_ready(*part, content);
                if *completed {
                    tracing::info!("Report complete");
                    self.renderer.actions_enabled();
                }
            }
            Applied::AllFailed(failure) => self.renderer.all_failed(failure),
            Applied::Duplicate(part) => tracing::debug!("Ignoring duplicate {}", part),
            Applied::Stale { .. } => {}
        }
        applied
    }

    /// Apply every event already delivered
    pub fn pump(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            applied.push(self.apply(event));
        }
        applied
    }

    /// Apply events as they arrive until the current cycle settles
    ///
    /// # Errors
    /// - `WizardError::NoActiveCycle` if no cycle is running
    /// - `WizardError::CycleAborted` if the cycle task did not finish
    pub async fn settle(&mut self) -> Result<CycleReport, WizardError> {
        let mut handle = self.running.take().ok_or(WizardError::NoActiveCycle)?;

        let joined = loop {
            let next = tokio::select! {
                biased;
                Some(event) = self.events_rx.recv() => Next::Event(event),
                joined = &mut handle => Next::Settled(joined),
            };
            match next {
                Next::Event(event) => {
                    self.apply(event);
                }
                Next::Settled(joined) => break joined,
            }
        };

        self.pump();
        joined.map_err(|e| WizardError::CycleAborted(e.to_string()))
    }

    /// Render the completed report
    ///
    /// # Errors
    /// `WizardError::ReportIncomplete` until all eight parts have arrived.
    pub fn export(
        &self,
        exporter: &dyn DocumentExporter,
    ) -> Result<ExportedDocument, WizardError> {
        let (profile, assembly) = self.dashboard()?;
        let snapshot = assembly.snapshot().ok_or(WizardError::ReportIncomplete {
            missing: assembly.report().missing().len(),
        })?;

        let document = exporter.export(&ExportContext {
            profile,
            ledger: &self.ledger,
            snapshot,
            language: self.language,
        })?;
        tracing::info!("Exported {}", document.file_name);
        Ok(document)
    }

    /// Consultation message and links for the completed report
    ///
    /// # Errors
    /// `WizardError::ReportIncomplete` until all eight parts have arrived.
    pub fn booking(&self) -> Result<BookingLinks, WizardError> {
        let (profile, assembly) = self.dashboard()?;
        let snapshot = assembly.snapshot().ok_or(WizardError::ReportIncomplete {
            missing: assembly.report().missing().len(),
        })?;

        let user = localize_profile(self.translator.as_ref(), self.language, profile);
        let summary = snapshot.report.executive_summary().unwrap_or_default();
        let request =
            ConsultationRequest::build(self.translator.as_ref(), self.language, &user, summary);

        Ok(BookingLinks {
            mailto: request.mailto(&self.config.booking.contact_email),
            whatsapp: request.whatsapp(&self.config.booking.whatsapp_number),
            request,
        })
    }

    fn dashboard(&self) -> Result<(&Profile, &ReportAssembly), WizardError> {
        match (&self.profile, &self.assembly) {
            (Some(profile), Some(assembly)) => Ok((profile, assembly)),
            _ => Err(WizardError::NoActiveCycle),
        }
    }

    fn expect_step(&self, submitted: WizardStep) -> Result<(), WizardError> {
        if self.step == submitted {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                submitted,
                current: self.step,
            })
        }
    }

    fn award(&mut self, badge: Badge) {
        if self.ledger.award(badge) {
            tracing::info!("Badge earned: {}", badge);
        }
    }

    /// Credit the current step's badge and move forward
    fn complete_step(&mut self) -> WizardStep {
        if let Some(badge) = self.step.completion_badge() {
            self.award(badge);
        }
        self.step = self.step.next();
        tracing::debug!("Advanced to {}", self.step);
        self.step
    }

    fn launch_cycle(&mut self) {
        let Some(profile) = self.profile.as_ref() else {
            return;
        };

        let cycle = self.last_cycle.next();
        self.last_cycle = cycle;
        self.assembly = Some(ReportAssembly::new(cycle));
        self.renderer.cycle_started();

        let user_data = localize_profile(self.translator.as_ref(), self.language, profile);
        let request = GenerationRequest::new(user_data, self.language);
        let observer = Arc::new(ChannelObserver::from_sender(self.events_tx.clone()));

        tracing::info!("Launching cycle {} in {}", cycle, self.language);
        self.running = Some(self.aggregator.launch(cycle, request, observer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MockDashboardRenderer;
    use strategist_aggregation::AggregationConfig;
    use strategist_core::PartKey;
    use strategist_i18n::Catalog;
    use strategist_test_utils::{sample_basic_info, ScriptedGenerator};

    fn session(generator: ScriptedGenerator, renderer: MockDashboardRenderer) -> WizardSession {
        WizardSession::new(
            WizardConfig::new(),
            Arc::new(Catalog::bundled().unwrap()),
            Aggregator::new(Arc::new(generator), AggregationConfig::new()),
            Box::new(renderer),
        )
    }

    fn to_challenges(session: &mut WizardSession) {
        session.start().unwrap();
        session.submit_basic_info(sample_basic_info()).unwrap();
        session
            .submit_goals(vec!["awareness".into(), "leads".into(), "sales".into()])
            .unwrap();
        session.submit_platforms(vec!["linkedin".into()]).unwrap();
    }

    #[test]
    fn submission_at_wrong_step_is_rejected() {
        let mut session = session(ScriptedGenerator::new(), MockDashboardRenderer::new());
        let err = session.submit_goals(vec!["leads".into()]).unwrap_err();
        assert!(matches!(
            err,
            WizardError::WrongStep {
                submitted: WizardStep::Goals,
                current: WizardStep::Welcome
            }
        ));
        assert_eq!(session.ledger().points(), 0);
    }

    #[test]
    fn invalid_basic_info_keeps_step_and_points() {
        let mut session = session(ScriptedGenerator::new(), MockDashboardRenderer::new());
        session.start().unwrap();
        let mut info = sample_basic_info();
        info.email = "not-an-email".into();

        assert!(session.submit_basic_info(info).is_err());
        assert_eq!(session.step(), WizardStep::BasicInfo);
        assert_eq!(session.ledger().points(), 50);
    }

    #[tokio::test]
    async fn gamification_part_sets_title_and_regions_render() {
        let mut renderer = MockDashboardRenderer::new();
        renderer.expect_cycle_started().times(1).return_const(());
        renderer.expect_region_ready().times(8).return_const(());
        renderer.expect_actions_enabled().times(1).return_const(());
        renderer.expect_all_failed().never();

        let mut session = session(ScriptedGenerator::new(), renderer);
        to_challenges(&mut session);
        session
            .submit_challenges(vec!["budget".into(), "competition".into(), "talent".into()])
            .unwrap();

        let report = session.settle().await.unwrap();
        assert!(report.is_complete());
        assert_eq!(session.ledger().title(), "Pipeline Pilot");
        assert!(session.ledger().has(Badge::MasterStrategist));
        assert!(session.actions_enabled());
    }

    #[tokio::test]
    async fn total_failure_reaches_the_banner() {
        let mut renderer = MockDashboardRenderer::new();
        renderer.expect_cycle_started().return_const(());
        renderer.expect_region_ready().never();
        renderer
            .expect_all_failed()
            .withf(|f| f.failures.len() == 8)
            .times(1)
            .return_const(());

        let mut session = session(ScriptedGenerator::all_failing(), renderer);
        to_challenges(&mut session);
        session.submit_challenges(vec!["budget".into()]).unwrap();
        session.settle().await.unwrap();

        assert!(matches!(
            session.outcome(),
            Some(AggregationOutcome::AllFailed(_))
        ));
        assert!(!session.actions_enabled());
    }

    #[tokio::test]
    async fn missing_part_keeps_actions_disabled() {
        let mut renderer = MockDashboardRenderer::new();
        renderer.expect_cycle_started().return_const(());
        renderer
            .expect_region_ready()
            .withf(|part, _| *part != PartKey::SwotAnalysis)
            .times(7)
            .return_const(());
        renderer.expect_actions_enabled().never();

        let generator = ScriptedGenerator::new().fail_status(PartKey::SwotAnalysis, 500);
        let mut session = session(generator, renderer);
        to_challenges(&mut session);
        session.submit_challenges(vec!["budget".into()]).unwrap();
        session.settle().await.unwrap();

        assert!(matches!(
            session.booking(),
            Err(WizardError::ReportIncomplete { missing: 1 })
        ));
    }
}

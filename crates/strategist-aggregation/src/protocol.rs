//! Fan-out aggregation protocol
//!
//! One cycle issues all eight part requests before awaiting any of them and
//! reacts to each settlement in completion order:
//! - success: decode, validate, hand the content to the observer
//! - failure: log and count; the part stays absent for this cycle
//!
//! When every part has settled and none succeeded, the observer receives a
//! single [`AggregateFailure`] carrying every reason in request order.
//!
//! There is no cancellation and no retry within a cycle. Re-running means a
//! new [`CycleId`]; consumers discard events tagged with an older one.

use crate::config::AggregationConfig;
use crate::error::GenerateError;
use crate::generator::{GenerationRequest, PartGenerator};
use crate::http::HttpPartGenerator;
use crate::observer::AggregationObserver;
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt::{self, Display};
use std::sync::Arc;
use strategist_core::{AggregateFailure, PartContent, PartFailure, PartKey};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Generation token of an aggregation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CycleId(u64);

impl CycleId {
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Token of the cycle launched after this one
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a finished cycle produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: CycleId,
    /// Parts handed to the observer, in arrival order
    pub arrived: Vec<PartKey>,
    /// Parts that failed, in request order
    pub failures: Vec<PartFailure>,
}

impl CycleReport {
    /// True iff no part arrived
    #[inline]
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.arrived.is_empty()
    }

    /// True iff every part arrived
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.arrived.len() == PartKey::COUNT
    }
}

/// Runs aggregation cycles against a [`PartGenerator`]
#[derive(Clone)]
pub struct Aggregator {
    generator: Arc<dyn PartGenerator>,
    config: AggregationConfig,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Create an aggregator over any generator
    #[inline]
    #[must_use]
    pub fn new(generator: Arc<dyn PartGenerator>, config: AggregationConfig) -> Self {
        Self { generator, config }
    }

    /// Aggregator posting to `config.endpoint_url`
    #[must_use]
    pub fn http(config: AggregationConfig) -> Self {
        let generator = HttpPartGenerator::new(config.endpoint_url.clone());
        Self::new(Arc::new(generator), config)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Start a cycle in the background
    ///
    /// Returns immediately. The handle resolves once every part has settled;
    /// dropping it does not stop the cycle.
    pub fn launch(
        &self,
        cycle: CycleId,
        request: GenerationRequest,
        observer: Arc<dyn AggregationObserver>,
    ) -> JoinHandle<CycleReport> {
        let aggregator = self.clone();
        tokio::spawn(async move {
            aggregator
                .run_cycle(cycle, &request, observer.as_ref())
                .await
        })
    }

    /// Run one cycle to settlement
    pub async fn run_cycle(
        &self,
        cycle: CycleId,
        request: &GenerationRequest,
        observer: &dyn AggregationObserver,
    ) -> CycleReport {
        let span = tracing::info_span!("aggregation_cycle", cycle = cycle.get());
        self.settle_all(cycle, request, observer)
            .instrument(span)
            .await
    }

    async fn settle_all(
        &self,
        cycle: CycleId,
        request: &GenerationRequest,
        observer: &dyn AggregationObserver,
    ) -> CycleReport {
        tracing::info!(
            "Launching {} part requests in {}",
            PartKey::COUNT,
            request.language
        );

        let mut pending: FuturesUnordered<_> = PartKey::ALL
            .into_iter()
            .map(|part| {
                let span =
                    tracing::info_span!("part", cycle = cycle.get(), part = part.slug());
                async move { (part, self.fetch_part(request, part).await) }.instrument(span)
            })
            .collect();

        let mut arrived = Vec::with_capacity(PartKey::COUNT);
        let mut failures = Vec::new();

        while let Some((part, outcome)) = pending.next().await {
            match outcome {
                Ok(content) => {
                    tracing::debug!(part = part.slug(), "Part arrived");
                    metrics::counter!("strategist_part_success_total", "part" => part.slug())
                        .increment(1);
                    arrived.push(part);
                    observer.on_part_arrived(cycle, content);
                }
                Err(err) => {
                    tracing::warn!(part = part.slug(), "Part failed: {}", err);
                    metrics::counter!("strategist_part_failure_total", "part" => part.slug())
                        .increment(1);
                    failures.push(PartFailure {
                        part,
                        reason: err.to_string(),
                    });
                }
            }
        }

        failures.sort_by_key(|f| f.part);

        if arrived.is_empty() {
            let failure = AggregateFailure {
                failures: failures.clone(),
            };
            tracing::error!("All parts failed: {}", failure);
            observer.on_all_failed(cycle, failure);
        } else {
            tracing::info!(
                "Cycle settled: {} arrived, {} failed",
                arrived.len(),
                failures.len()
            );
        }

        CycleReport {
            cycle,
            arrived,
            failures,
        }
    }

    async fn fetch_part(
        &self,
        request: &GenerationRequest,
        part: PartKey,
    ) -> Result<PartContent, GenerateError> {
        let call = self.generator.generate(request, part);
        let body = match self.config.part_timeout() {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .map_err(|_| GenerateError::Timeout { part, after })??,
            None => call.await?,
        };
        Ok(PartContent::decode(part, &body)?)
    }
}

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use strategist_aggregation::{
    AggregationConfig, AggregationEvent, Aggregator, ChannelObserver, CycleId, EventKind,
};
use strategist_core::{PartKey, PartialReport};
use strategist_test_utils::{sample_content, sample_request, ScriptedGenerator};
use tokio::sync::mpsc::UnboundedReceiver;

fn aggregator(generator: ScriptedGenerator) -> (Aggregator, Arc<ScriptedGenerator>) {
    let generator = Arc::new(generator);
    let aggregator = Aggregator::new(generator.clone(), AggregationConfig::new());
    (aggregator, generator)
}

fn drain(events: &mut UnboundedReceiver<AggregationEvent>) -> Vec<AggregationEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test]
async fn all_success_fills_every_part() {
    let (aggregator, generator) = aggregator(ScriptedGenerator::new());
    let (observer, mut events) = ChannelObserver::new();

    let report = aggregator
        .launch(CycleId::new(1), sample_request(), Arc::new(observer))
        .await
        .unwrap();

    assert!(report.is_complete());
    assert!(report.failures.is_empty());
    assert_eq!(generator.calls().len(), 8);

    let mut partial = PartialReport::new();
    for event in drain(&mut events) {
        assert_eq!(event.cycle, CycleId::new(1));
        match event.kind {
            EventKind::PartArrived(content) => assert!(partial.merge(content).is_inserted()),
            EventKind::AllFailed(_) => panic!("unexpected total failure"),
        }
    }
    assert!(partial.is_complete());
}

#[tokio::test]
async fn total_failure_fires_once_with_every_reason() {
    let (aggregator, _) = aggregator(ScriptedGenerator::all_failing());
    let (observer, mut events) = ChannelObserver::new();

    let report = aggregator
        .launch(CycleId::new(2), sample_request(), Arc::new(observer))
        .await
        .unwrap();
    assert!(report.all_failed());

    let events = drain(&mut events);
    assert_eq!(events.len(), 1);
    let EventKind::AllFailed(failure) = &events[0].kind else {
        panic!("expected total failure, got {:?}", events[0].kind);
    };
    assert_eq!(failure.failures.len(), 8);
    let reasons = failure.combined_reasons();
    for part in PartKey::ALL {
        assert!(reasons.contains(&format!("[{part}] HTTP error 500")));
    }
    assert!(reasons.starts_with("[executiveSummary]"));
}

#[tokio::test]
async fn one_success_suppresses_total_failure() {
    let generator = PartKey::ALL
        .into_iter()
        .filter(|p| *p != PartKey::Timeline)
        .fold(ScriptedGenerator::new(), |g, p| g.fail_status(p, 500));
    let (aggregator, _) = aggregator(generator);
    let (observer, mut events) = ChannelObserver::new();

    let report = aggregator
        .launch(CycleId::new(3), sample_request(), Arc::new(observer))
        .await
        .unwrap();

    assert_eq!(report.arrived, vec![PartKey::Timeline]);
    assert_eq!(report.failures.len(), 7);

    let events = drain(&mut events);
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].kind,
        EventKind::PartArrived(sample_content(PartKey::Timeline))
    );
}

#[tokio::test]
async fn swot_failure_leaves_report_incomplete() {
    let (aggregator, _) = aggregator(ScriptedGenerator::new().fail_status(PartKey::SwotAnalysis, 500));
    let (observer, mut events) = ChannelObserver::new();

    aggregator
        .launch(CycleId::new(4), sample_request(), Arc::new(observer))
        .await
        .unwrap();

    let mut partial = PartialReport::new();
    for event in drain(&mut events) {
        if let EventKind::PartArrived(content) = event.kind {
            partial.merge(content);
        }
    }
    assert_eq!(partial.len(), 7);
    assert!(!partial.is_complete());
    assert_eq!(partial.missing(), vec![PartKey::SwotAnalysis]);
}

#[tokio::test]
async fn wrong_part_field_is_rejected() {
    let generator = ScriptedGenerator::new().body(
        PartKey::Gamification,
        r#"{"executiveSummary": "misrouted"}"#,
    );
    let (aggregator, _) = aggregator(generator);
    let (observer, _events) = ChannelObserver::new();

    let report = aggregator
        .launch(CycleId::new(5), sample_request(), Arc::new(observer))
        .await
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].part, PartKey::Gamification);
    assert!(!report.arrived.contains(&PartKey::Gamification));
}

#[tokio::test(start_paused = true)]
async fn hanging_part_times_out_as_failure() {
    let generator = Arc::new(ScriptedGenerator::new().hang(PartKey::KpiProjections));
    let aggregator = Aggregator::new(
        generator,
        AggregationConfig::new().with_part_timeout_secs(60),
    );
    let (observer, mut events) = ChannelObserver::new();

    let report = aggregator
        .launch(CycleId::new(6), sample_request(), Arc::new(observer))
        .await
        .unwrap();

    assert_eq!(report.arrived.len(), 7);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].reason,
        "[kpiProjections] no response after 60s"
    );
    assert_eq!(drain(&mut events).len(), 7);
}

#[tokio::test(start_paused = true)]
async fn parts_arrive_in_completion_order() {
    let generator = ScriptedGenerator::new()
        .respond_after(PartKey::ExecutiveSummary, Duration::from_secs(5))
        .respond_after(PartKey::Gamification, Duration::from_secs(1));
    let (aggregator, _) = aggregator(generator);
    let (observer, _events) = ChannelObserver::new();

    let report = aggregator
        .launch(CycleId::new(7), sample_request(), Arc::new(observer))
        .await
        .unwrap();

    let n = report.arrived.len();
    assert_eq!(n, 8);
    assert_eq!(report.arrived[n - 2], PartKey::Gamification);
    assert_eq!(report.arrived[n - 1], PartKey::ExecutiveSummary);
}

#[tokio::test(start_paused = true)]
async fn all_requests_issued_before_any_settles() {
    let generator = PartKey::ALL
        .into_iter()
        .fold(ScriptedGenerator::new(), |g, p| {
            g.respond_after(p, Duration::from_secs(10))
        });
    let (aggregator, generator) = aggregator(generator);
    let (observer, mut events) = ChannelObserver::new();

    let start = tokio::time::Instant::now();
    let handle = aggregator.launch(CycleId::new(8), sample_request(), Arc::new(observer));
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(generator.calls().len(), 8);
    assert!(drain(&mut events).is_empty());

    let report = handle.await.unwrap();
    assert!(report.is_complete());
    assert!(start.elapsed() < Duration::from_secs(11));
}

fn delays() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..50, PartKey::COUNT)
}

fn outcomes() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), PartKey::COUNT)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_interleaving_yields_the_same_report(delays in delays(), succeed in outcomes()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let (arrived, all_failed) = runtime.block_on(async {
            let generator = PartKey::ALL.into_iter().enumerate().fold(
                ScriptedGenerator::new(),
                |g, (i, p)| {
                    if succeed[i] {
                        g.respond_after(p, Duration::from_millis(delays[i]))
                    } else {
                        g.fail_status(p, 502)
                    }
                },
            );
            let (aggregator, _) = aggregator(generator);
            let (observer, mut events) = ChannelObserver::new();
            aggregator
                .launch(CycleId::new(1), sample_request(), Arc::new(observer))
                .await
                .unwrap();

            let mut partial = PartialReport::new();
            let mut all_failed = 0;
            for event in drain(&mut events) {
                match event.kind {
                    EventKind::PartArrived(content) => {
                        partial.merge(content);
                    }
                    EventKind::AllFailed(_) => all_failed += 1,
                }
            }
            (partial, all_failed)
        });

        let expected: Vec<PartKey> = PartKey::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| succeed[*i])
            .map(|(_, p)| p)
            .collect();
        let got: Vec<PartKey> = arrived.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(got, expected.clone());
        prop_assert_eq!(all_failed, usize::from(expected.is_empty()));
        for (key, content) in arrived.iter() {
            prop_assert_eq!(content, &sample_content(key));
        }
    }
}

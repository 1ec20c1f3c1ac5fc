//! Strategist Aggregation Protocol
//!
//! Decomposes one "generate my strategy" request into eight independent part
//! requests, issues them concurrently and reacts to each settlement as soon as
//! it happens:
//! - a valid part is handed to [`AggregationObserver::on_part_arrived`]
//! - a failed or malformed part is logged and otherwise ignored
//! - if every part failed, [`AggregationObserver::on_all_failed`] fires once
//!
//! # Example
//!
//! ```rust,ignore
//! use strategist_aggregation::{Aggregator, AggregationConfig, ChannelObserver, CycleId};
//!
//! let aggregator = Aggregator::http(AggregationConfig::new());
//! let (observer, mut events) = ChannelObserver::new();
//! aggregator.launch(CycleId::new(1), request, observer);
//!
//! while let Some(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod observer;
pub mod protocol;

pub use config::AggregationConfig;
pub use error::GenerateError;
pub use generator::{GenerationRequest, PartGenerator};
pub use http::HttpPartGenerator;
pub use observer::{AggregationEvent, AggregationObserver, ChannelObserver, EventKind};
pub use protocol::{Aggregator, CycleId, CycleReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

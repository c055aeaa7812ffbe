//! A [`pbs_metrics::MetricsEngine`] that forwards every event to the [`metrics`] facade.
//!
//! # Usage
//!
//! Install any `metrics`-compatible exporter first, then build the engine and hand it to the
//! serving pipeline:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use pbs_metrics::{KnownBidders, MetricsEngine};
//! # use pbs_metrics_exporter::FacadeEngineBuilder;
//! // Install an exporter here, e.g. `metrics_exporter_prometheus::PrometheusBuilder::new().install()`.
//!
//! let engine = FacadeEngineBuilder::new()
//!     .with_namespace("pbs")
//!     .with_known_bidders(KnownBidders::new(["appnexus", "rubicon"]))
//!     .build()
//!     .expect("failed to build metrics engine");
//!
//! let engine: Arc<dyn MetricsEngine> = Arc::new(engine);
//! ```
//!
//! # Series
//!
//! | Event | Series | Labels |
//! |---|---|---|
//! | connection accepted / closed | `connections_opened`, `connections_closed` | |
//! | connection error | `connections_error` | `connection_error` |
//! | request | `requests`, `request_time_seconds` | `source`, `request_type`, `browser`, `cookie`, `request_status` |
//! | impression | `imps_requested` | `banner`, `video`, `audio`, `native` |
//! | legacy impressions | `legacy_imps_requested` | as for requests |
//! | adapter call | `adapter_requests` | `adapter`, `source`, `request_type`, `browser`, `cookie`, `adapter_bids` |
//! | adapter error | `adapter_errors` | `adapter`, `adapter_error` |
//! | adapter panic | `adapter_panics` | `adapter` |
//! | bid received | `adapter_bids_received` | `adapter`, `bid_type`, `markup` |
//! | bid price | `adapter_prices` | `adapter` |
//! | adapter time | `adapter_request_time_seconds` | `adapter` |
//! | cookie sync | `cookie_sync_requests` | |
//! | adapter cookie sync | `adapter_cookie_syncs` | `adapter`, `gdpr_blocked` |
//! | setuid | `setuid_requests` | `action`, `adapter` |
//! | stored request / impression cache | `stored_request_cache_performance`, `stored_imp_cache_performance` | `cache_result` |
//! | Prebid Cache request | `prebid_cache_request_time_seconds` | `success` |
//!
//! With account labels enabled, request and adapter call series also carry `account`.
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_self)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod builder;
pub use self::builder::{BuildError, FacadeEngineBuilder};

mod engine;
pub use self::engine::FacadeEngine;

mod registration;
mod series;

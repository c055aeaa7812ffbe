//! Metrics taxonomy and recording contract for a bid-request-serving pipeline.
//!
//! A naive approach to instrumenting an auction server records a metric per publisher, per adapter,
//! per error string, and the number of distinct series a metrics backend has to track grows without
//! bound. This crate pins that number down instead: every label dimension is a closed enum whose
//! values are all known up front, and every measurable event in the pipeline goes through one trait.
//!
//! # Overview
//!
//! ## Taxonomy
//!
//! Each dimension ([`DemandSource`], [`RequestType`], [`Browser`], [`CookieFlag`],
//! [`RequestStatus`], [`AdapterBid`], [`AdapterError`], [`CacheResult`], [`RequestAction`] and
//! [`ImpMediaType`]) implements [`LabelValue`], which exposes the label key, the wire value of each
//! variant, and the full list of variants. Backends use the list to pre-register a zero-valued series
//! for every value, so a missing series never has to be interpreted as "zero events".
//!
//! The publisher ID is the one deliberate escape from the closed-domain rule. It is carried as a
//! plain string and defaults to [`PUBLISHER_UNKNOWN`]. Backends should leave it off their series
//! unless per-account breakdowns have been asked for.
//!
//! Bidders are identified by [`BidderName`]. The set of bidders comes from configuration rather than
//! from this crate, and is represented by [`KnownBidders`].
//!
//! ## Label bundles
//!
//! Events carry one of [`Labels`], [`AdapterLabels`], [`ImpLabels`], [`RequestLabels`] or
//! [`UserLabels`]. They are plain values, built fresh for each event.
//!
//! ## Recording
//!
//! [`MetricsEngine`] has one method per event. The serving pipeline calls it; a backend implements
//! it. Recording is infallible from the caller's point of view.
//!
//! ```
//! use std::time::Duration;
//! use pbs_metrics::{
//!     Browser, CookieFlag, DemandSource, Labels, MetricsEngine, NoopEngine, RequestStatus,
//!     RequestType,
//! };
//!
//! fn serve(engine: &dyn MetricsEngine) {
//!     let labels = Labels::new(DemandSource::Web, RequestType::OpenRtb2Web)
//!         .with_browser(Browser::Other)
//!         .with_cookie_flag(CookieFlag::Exists)
//!         .with_request_status(RequestStatus::Ok);
//!
//!     engine.record_request(&labels);
//!     engine.record_request_time(&labels, Duration::from_millis(120));
//! }
//!
//! serve(&NoopEngine);
//! ```
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod bidder;
pub use self::bidder::{BidderName, KnownBidders};

mod engine;
pub use self::engine::{MetricsEngine, NoopEngine};

mod error;
pub use self::error::ParseLabelError;

mod labels;
pub use self::labels::{AdapterLabels, ImpLabels, Labels, RequestLabels, UserLabels};

mod taxonomy;
pub use self::taxonomy::{
    AdapterBid, AdapterError, Browser, CacheResult, CookieFlag, DemandSource, ImpMediaType,
    LabelValue, RequestAction, RequestStatus, RequestType, PUBLISHER_UNKNOWN,
};

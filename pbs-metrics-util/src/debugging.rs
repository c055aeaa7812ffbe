//! In-memory engine for tests and local debugging.
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use parking_lot::{Mutex, RwLock};
use pbs_metrics::{
    AdapterLabels, BidderName, CacheResult, ImpLabels, ImpMediaType, KnownBidders, LabelValue,
    Labels, MetricsEngine, UserLabels,
};
use tracing::debug;

/// Kind of series recorded by [`DebuggingEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// Accepted connections.
    ConnectionsOpened,
    /// Closed connections.
    ConnectionsClosed,
    /// Failures to accept or close a connection.
    ConnectionErrors,
    /// Inbound requests.
    Requests,
    /// Inbound request durations, in seconds.
    RequestTime,
    /// Impressions by media type.
    ImpsRequested,
    /// Impressions on the legacy endpoint.
    LegacyImpsRequested,
    /// Adapter calls.
    AdapterRequests,
    /// Adapter errors, one per distinct error per call.
    AdapterErrors,
    /// Recovered adapter panics.
    AdapterPanics,
    /// Bids received from adapters.
    AdapterBidsReceived,
    /// Bid prices, in CPM.
    AdapterPrices,
    /// Adapter call durations, in seconds.
    AdapterRequestTime,
    /// `/cookie_sync` requests.
    CookieSyncRequests,
    /// Cookie syncs handed out per adapter.
    AdapterCookieSyncs,
    /// `/setuid` requests.
    SetUidRequests,
    /// Stored request cache lookups.
    StoredRequestCache,
    /// Stored impression cache lookups.
    StoredImpCache,
    /// Prebid Cache request durations, in seconds.
    PrebidCacheRequestTime,
}

impl EventKind {
    /// Name of the series.
    pub const fn name(&self) -> &'static str {
        match self {
            EventKind::ConnectionsOpened => "connections_opened",
            EventKind::ConnectionsClosed => "connections_closed",
            EventKind::ConnectionErrors => "connections_error",
            EventKind::Requests => "requests",
            EventKind::RequestTime => "request_time_seconds",
            EventKind::ImpsRequested => "imps_requested",
            EventKind::LegacyImpsRequested => "legacy_imps_requested",
            EventKind::AdapterRequests => "adapter_requests",
            EventKind::AdapterErrors => "adapter_errors",
            EventKind::AdapterPanics => "adapter_panics",
            EventKind::AdapterBidsReceived => "adapter_bids_received",
            EventKind::AdapterPrices => "adapter_prices",
            EventKind::AdapterRequestTime => "adapter_request_time_seconds",
            EventKind::CookieSyncRequests => "cookie_sync_requests",
            EventKind::AdapterCookieSyncs => "adapter_cookie_syncs",
            EventKind::SetUidRequests => "setuid_requests",
            EventKind::StoredRequestCache => "stored_request_cache_performance",
            EventKind::StoredImpCache => "stored_imp_cache_performance",
            EventKind::PrebidCacheRequestTime => "prebid_cache_request_time_seconds",
        }
    }
}

type LabelSet = Vec<(&'static str, String)>;

/// A recorded series: its kind plus the labels it was recorded with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    kind: EventKind,
    labels: LabelSet,
}

impl SeriesKey {
    /// Kind of the series.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Labels of the series, in the order they were recorded.
    pub fn labels(&self) -> &[(&'static str, String)] {
        &self.labels
    }

    /// Value of the label named `key`, if present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    fn matches(&self, kind: EventKind, labels: &[(&str, &str)]) -> bool {
        self.kind == kind && labels.iter().all(|(key, value)| self.label(key) == Some(*value))
    }
}

#[derive(Default)]
struct Storage {
    counters: RwLock<HashMap<SeriesKey, Arc<AtomicU64>>>,
    samples: RwLock<HashMap<SeriesKey, Arc<Mutex<Vec<f64>>>>>,
}

impl Storage {
    fn counter(&self, key: SeriesKey) -> Arc<AtomicU64> {
        if let Some(counter) = self.counters.read().get(&key) {
            return Arc::clone(counter);
        }

        let mut counters = self.counters.write();
        Arc::clone(counters.entry(key).or_default())
    }

    fn samples(&self, key: SeriesKey) -> Arc<Mutex<Vec<f64>>> {
        if let Some(samples) = self.samples.read().get(&key) {
            return Arc::clone(samples);
        }

        let mut samples = self.samples.write();
        Arc::clone(samples.entry(key).or_default())
    }

    fn increment(&self, kind: EventKind, labels: LabelSet, value: u64) {
        self.counter(SeriesKey { kind, labels }).fetch_add(value, Ordering::Relaxed);
    }

    fn record(&self, kind: EventKind, labels: LabelSet, value: f64) {
        self.samples(SeriesKey { kind, labels }).lock().push(value);
    }
}

/// A point-in-time value of a series.
#[derive(Clone, Debug, PartialEq)]
pub enum DebugValue {
    /// Counter.
    Counter(u64),
    /// Every recorded sample, in recording order.
    Samples(Vec<f64>),
}

/// A point-in-time copy of everything a [`DebuggingEngine`] has recorded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    counters: BTreeMap<SeriesKey, u64>,
    samples: BTreeMap<SeriesKey, Vec<f64>>,
}

impl Snapshot {
    /// Sum of every counter of `kind` whose labels include all of `labels`.
    ///
    /// A series that was never recorded counts as zero, and an empty `labels` gives the total for
    /// the kind.
    pub fn counter(&self, kind: EventKind, labels: &[(&str, &str)]) -> u64 {
        self.counters
            .iter()
            .filter(|(key, _)| key.matches(kind, labels))
            .map(|(_, value)| *value)
            .sum()
    }

    /// Every sample of `kind` whose labels include all of `labels`, grouped by series.
    pub fn samples(&self, kind: EventKind, labels: &[(&str, &str)]) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|(key, _)| key.matches(kind, labels))
            .flat_map(|(_, values)| values.iter().copied())
            .collect()
    }

    /// Sum of every counter of `kind`, across all label sets.
    pub fn total(&self, kind: EventKind) -> u64 {
        self.counter(kind, &[])
    }

    /// Iterates the counters, ordered by series.
    pub fn counters(&self) -> impl Iterator<Item = (&SeriesKey, u64)> {
        self.counters.iter().map(|(key, value)| (key, *value))
    }

    /// Number of distinct series, counters and samples together.
    pub fn len(&self) -> usize {
        self.counters.len() + self.samples.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts this snapshot to a list of series and their values.
    ///
    /// Counters come first, then sampled series, each ordered by series.
    pub fn into_vec(self) -> Vec<(SeriesKey, DebugValue)> {
        let counters =
            self.counters.into_iter().map(|(key, value)| (key, DebugValue::Counter(value)));
        let samples =
            self.samples.into_iter().map(|(key, values)| (key, DebugValue::Samples(values)));
        counters.chain(samples).collect()
    }
}

/// Captures point-in-time snapshots of a [`DebuggingEngine`].
#[derive(Clone)]
pub struct Snapshotter {
    storage: Arc<Storage>,
}

impl Snapshotter {
    /// Takes a snapshot of the engine.
    pub fn snapshot(&self) -> Snapshot {
        let counters = self
            .storage
            .counters
            .read()
            .iter()
            .map(|(key, counter)| (key.clone(), counter.load(Ordering::Relaxed)))
            .collect();
        let samples = self
            .storage
            .samples
            .read()
            .iter()
            .map(|(key, samples)| (key.clone(), samples.lock().clone()))
            .collect();

        Snapshot { counters, samples }
    }
}

/// A simplistic engine that keeps every series in memory.
///
/// Callers take snapshots through a [`Snapshotter`] to get at the raw values. Unlike an exporting
/// backend, every series carries the publisher ID as an `account` label.
#[derive(Clone, Default)]
pub struct DebuggingEngine {
    storage: Arc<Storage>,
    known_bidders: KnownBidders,
}

impl DebuggingEngine {
    /// Creates a new `DebuggingEngine` with no known bidders.
    pub fn new() -> DebuggingEngine {
        DebuggingEngine::default()
    }

    /// Creates a new `DebuggingEngine` that verifies `/setuid` bidders against `known_bidders`.
    pub fn with_known_bidders(known_bidders: KnownBidders) -> DebuggingEngine {
        DebuggingEngine { storage: Arc::default(), known_bidders }
    }

    /// Gets a `Snapshotter` attached to this engine.
    pub fn snapshotter(&self) -> Snapshotter {
        Snapshotter { storage: Arc::clone(&self.storage) }
    }

    fn request_labels(labels: &Labels) -> LabelSet {
        vec![
            (pbs_metrics::DemandSource::LABEL, labels.source.as_str().to_owned()),
            (pbs_metrics::RequestType::LABEL, labels.request_type.as_str().to_owned()),
            ("account", labels.publisher_id().to_owned()),
            (pbs_metrics::Browser::LABEL, labels.browser.as_str().to_owned()),
            (pbs_metrics::CookieFlag::LABEL, labels.cookie_flag.as_str().to_owned()),
            (pbs_metrics::RequestStatus::LABEL, labels.request_status.as_str().to_owned()),
        ]
    }

    fn adapter_labels(labels: &AdapterLabels) -> LabelSet {
        vec![("adapter", labels.adapter.as_str().to_owned())]
    }
}

fn flag(value: bool) -> String {
    value.to_string()
}

impl MetricsEngine for DebuggingEngine {
    fn record_connection_accept(&self, success: bool) {
        if success {
            self.storage.increment(EventKind::ConnectionsOpened, Vec::new(), 1);
        } else {
            self.storage.increment(
                EventKind::ConnectionErrors,
                vec![("connection_error", "accept".to_owned())],
                1,
            );
        }
    }

    fn record_connection_close(&self, success: bool) {
        if success {
            self.storage.increment(EventKind::ConnectionsClosed, Vec::new(), 1);
        } else {
            self.storage.increment(
                EventKind::ConnectionErrors,
                vec![("connection_error", "close".to_owned())],
                1,
            );
        }
    }

    fn record_request(&self, labels: &Labels) {
        self.storage.increment(EventKind::Requests, Self::request_labels(labels), 1);
    }

    fn record_request_time(&self, labels: &Labels, length: Duration) {
        let seconds = length.as_secs_f64();
        self.storage.record(EventKind::RequestTime, Self::request_labels(labels), seconds);
    }

    fn record_imps(&self, labels: ImpLabels) {
        let labels = vec![
            ("banner", flag(labels.banner_imps)),
            ("video", flag(labels.video_imps)),
            ("audio", flag(labels.audio_imps)),
            ("native", flag(labels.native_imps)),
        ];
        self.storage.increment(EventKind::ImpsRequested, labels, 1);
    }

    fn record_legacy_imps(&self, labels: &Labels, num_imps: u64) {
        let series = Self::request_labels(labels);
        self.storage.increment(EventKind::LegacyImpsRequested, series, num_imps);
    }

    fn record_adapter_request(&self, labels: &AdapterLabels) {
        let series = vec![
            ("adapter", labels.adapter.as_str().to_owned()),
            (pbs_metrics::DemandSource::LABEL, labels.source.as_str().to_owned()),
            (pbs_metrics::RequestType::LABEL, labels.request_type.as_str().to_owned()),
            ("account", labels.publisher_id().to_owned()),
            (pbs_metrics::Browser::LABEL, labels.browser.as_str().to_owned()),
            (pbs_metrics::CookieFlag::LABEL, labels.cookie_flag.as_str().to_owned()),
            (pbs_metrics::AdapterBid::LABEL, labels.adapter_bids.as_str().to_owned()),
        ];
        self.storage.increment(EventKind::AdapterRequests, series, 1);

        for error in &labels.adapter_errors {
            let mut series = Self::adapter_labels(labels);
            series.push((pbs_metrics::AdapterError::LABEL, error.as_str().to_owned()));
            self.storage.increment(EventKind::AdapterErrors, series, 1);
        }
    }

    fn record_adapter_panic(&self, labels: &AdapterLabels) {
        self.storage.increment(EventKind::AdapterPanics, Self::adapter_labels(labels), 1);
    }

    fn record_adapter_bid_received(
        &self,
        labels: &AdapterLabels,
        bid_type: ImpMediaType,
        has_adm: bool,
    ) {
        let mut series = Self::adapter_labels(labels);
        series.push(("bid_type", bid_type.as_str().to_owned()));
        series.push(("markup", if has_adm { "adm" } else { "nurl" }.to_owned()));
        self.storage.increment(EventKind::AdapterBidsReceived, series, 1);
    }

    fn record_adapter_price(&self, labels: &AdapterLabels, cpm: f64) {
        self.storage.record(EventKind::AdapterPrices, Self::adapter_labels(labels), cpm);
    }

    fn record_adapter_time(&self, labels: &AdapterLabels, length: Duration) {
        self.storage.record(
            EventKind::AdapterRequestTime,
            Self::adapter_labels(labels),
            length.as_secs_f64(),
        );
    }

    fn record_cookie_sync(&self) {
        self.storage.increment(EventKind::CookieSyncRequests, Vec::new(), 1);
    }

    fn record_adapter_cookie_sync(&self, adapter: &BidderName, gdpr_blocked: bool) {
        let series =
            vec![("adapter", adapter.as_str().to_owned()), ("gdpr_blocked", flag(gdpr_blocked))];
        self.storage.increment(EventKind::AdapterCookieSyncs, series, 1);
    }

    fn record_user_id_set(&self, labels: &UserLabels) {
        let bidder = self.known_bidders.resolve(&labels.bidder);
        if bidder.is_unknown() && !labels.bidder.is_unknown() {
            debug!(bidder = labels.bidder.as_str(), "Unrecognized bidder in setuid request.");
        }

        let series = vec![
            (pbs_metrics::RequestAction::LABEL, labels.action.as_str().to_owned()),
            ("adapter", bidder.as_str().to_owned()),
        ];
        self.storage.increment(EventKind::SetUidRequests, series, 1);
    }

    fn record_stored_req_cache_result(&self, result: CacheResult, inc: u64) {
        let series = vec![(CacheResult::LABEL, result.as_str().to_owned())];
        self.storage.increment(EventKind::StoredRequestCache, series, inc);
    }

    fn record_stored_imp_cache_result(&self, result: CacheResult, inc: u64) {
        let series = vec![(CacheResult::LABEL, result.as_str().to_owned())];
        self.storage.increment(EventKind::StoredImpCache, series, inc);
    }

    fn record_prebid_cache_request_time(&self, success: bool, length: Duration) {
        self.storage.record(
            EventKind::PrebidCacheRequestTime,
            vec![("success", flag(success))],
            length.as_secs_f64(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use pbs_metrics::{
        AdapterBid, AdapterError, AdapterLabels, BidderName, Browser, CacheResult, CookieFlag,
        DemandSource, ImpLabels, ImpMediaType, KnownBidders, Labels, MetricsEngine, RequestAction,
        RequestStatus, RequestType, UserLabels,
    };
    use proptest::{collection::vec, prelude::*, sample::select};

    use super::{DebugValue, DebuggingEngine, EventKind};

    #[test]
    fn empty_snapshot_reads_as_zero() {
        let engine = DebuggingEngine::new();
        let snapshot = engine.snapshotter().snapshot();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.counter(EventKind::Requests, &[]), 0);
        assert!(snapshot.samples(EventKind::RequestTime, &[]).is_empty());
    }

    #[test]
    fn request_and_timing_share_labels() {
        let engine = DebuggingEngine::new();
        let snapshotter = engine.snapshotter();

        let labels = Labels::new(DemandSource::Web, RequestType::OpenRtb2Web)
            .with_browser(Browser::Other)
            .with_cookie_flag(CookieFlag::Exists)
            .with_request_status(RequestStatus::Ok);
        engine.record_request(&labels);
        engine.record_request_time(&labels, Duration::from_millis(120));

        let tags = [
            ("source", "web"),
            ("request_type", "openrtb2-web"),
            ("account", "unknown"),
            ("browser", "other"),
            ("cookie", "exists"),
            ("request_status", "ok"),
        ];
        let snapshot = snapshotter.snapshot();
        assert_eq!(snapshot.counter(EventKind::Requests, &tags), 1);
        assert_eq!(snapshot.samples(EventKind::RequestTime, &tags), vec![0.12]);
        assert_eq!(snapshot.counter(EventKind::Requests, &[("browser", "safari")]), 0);

        let series = snapshot.into_vec();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0.kind(), EventKind::Requests);
        assert_eq!(series[0].1, DebugValue::Counter(1));
        assert_eq!(series[1].0.kind(), EventKind::RequestTime);
        assert_eq!(series[1].0.label("account"), Some("unknown"));
        assert_eq!(series[1].1, DebugValue::Samples(vec![0.12]));
    }

    #[test]
    fn connection_outcomes() {
        let engine = DebuggingEngine::new();
        engine.record_connection_accept(true);
        engine.record_connection_accept(true);
        engine.record_connection_accept(false);
        engine.record_connection_close(true);
        engine.record_connection_close(false);

        let snapshot = engine.snapshotter().snapshot();
        assert_eq!(snapshot.counter(EventKind::ConnectionsOpened, &[]), 2);
        assert_eq!(snapshot.counter(EventKind::ConnectionsClosed, &[]), 1);
        for action in ["accept", "close"] {
            let labels = [("connection_error", action)];
            assert_eq!(snapshot.counter(EventKind::ConnectionErrors, &labels), 1);
        }
    }

    #[test]
    fn one_error_increment_per_distinct_error() {
        let engine = DebuggingEngine::new();
        let labels = AdapterLabels::new("appnexus")
            .with_adapter_bids(AdapterBid::Absent)
            .with_errors([AdapterError::BadInput, AdapterError::BadServerResponse]);
        engine.record_adapter_request(&labels);

        let snapshot = engine.snapshotter().snapshot();
        assert_eq!(snapshot.counter(EventKind::AdapterRequests, &[("adapter", "appnexus")]), 1);
        assert_eq!(snapshot.counter(EventKind::AdapterErrors, &[("adapter", "appnexus")]), 2);
        assert_eq!(snapshot.counter(EventKind::AdapterErrors, &[("adapter_error", "badinput")]), 1);
        assert_eq!(
            snapshot.counter(EventKind::AdapterErrors, &[("adapter_error", "badserverresponse")]),
            1
        );
    }

    #[test]
    fn setuid_with_unrecognized_bidder_lands_in_unknown() {
        let engine = DebuggingEngine::with_known_bidders(KnownBidders::new(["appnexus"]));
        engine.record_user_id_set(&UserLabels::new(RequestAction::Set, "appnexus"));
        engine.record_user_id_set(&UserLabels::new(RequestAction::Set, String::from("evil")));

        let snapshot = engine.snapshotter().snapshot();
        assert_eq!(snapshot.counter(EventKind::SetUidRequests, &[("adapter", "appnexus")]), 1);
        assert_eq!(snapshot.counter(EventKind::SetUidRequests, &[("adapter", "unknown")]), 1);
        assert_eq!(snapshot.counter(EventKind::SetUidRequests, &[("adapter", "evil")]), 0);
    }

    #[test]
    fn imps_bids_and_cookie_syncs() {
        let engine = DebuggingEngine::new();
        let adapter = AdapterLabels::new("rubicon").with_adapter_bids(AdapterBid::Present);

        let media_types = [ImpMediaType::Banner, ImpMediaType::Video];
        engine.record_imps(ImpLabels::from_media_types(media_types));
        engine.record_legacy_imps(&Labels::default(), 3);
        engine.record_adapter_bid_received(&adapter, ImpMediaType::Banner, true);
        engine.record_adapter_bid_received(&adapter, ImpMediaType::Video, false);
        engine.record_adapter_price(&adapter, 1.25);
        engine.record_adapter_time(&adapter, Duration::from_millis(40));
        engine.record_adapter_panic(&adapter);
        engine.record_cookie_sync();
        engine.record_adapter_cookie_sync(&BidderName::from_static("rubicon"), true);
        engine.record_prebid_cache_request_time(false, Duration::from_secs(1));

        let snapshot = engine.snapshotter().snapshot();
        let imps = [("banner", "true"), ("video", "true"), ("audio", "false")];
        assert_eq!(snapshot.counter(EventKind::ImpsRequested, &imps), 1);
        assert_eq!(snapshot.counter(EventKind::LegacyImpsRequested, &[]), 3);
        assert_eq!(snapshot.counter(EventKind::AdapterBidsReceived, &[("markup", "adm")]), 1);
        let nurl_video = [("markup", "nurl"), ("bid_type", "video")];
        assert_eq!(snapshot.counter(EventKind::AdapterBidsReceived, &nurl_video), 1);
        let rubicon = [("adapter", "rubicon")];
        assert_eq!(snapshot.samples(EventKind::AdapterPrices, &rubicon), vec![1.25]);
        assert_eq!(snapshot.samples(EventKind::AdapterRequestTime, &[]), vec![0.04]);
        assert_eq!(snapshot.counter(EventKind::AdapterPanics, &[("adapter", "rubicon")]), 1);
        assert_eq!(snapshot.counter(EventKind::CookieSyncRequests, &[]), 1);
        assert_eq!(snapshot.counter(EventKind::AdapterCookieSyncs, &[("gdpr_blocked", "true")]), 1);
        let failed = [("success", "false")];
        assert_eq!(snapshot.samples(EventKind::PrebidCacheRequestTime, &failed), vec![1.0]);
    }

    #[test]
    fn per_request_and_per_adapter_totals_differ_by_adapter_count() {
        const REQUESTS: u64 = 40;
        const ADAPTERS: [&str; 3] = ["appnexus", "rubicon", "pubmatic"];

        let engine = Arc::new(DebuggingEngine::new());
        std::thread::scope(|s| {
            for _ in 0..4 {
                let engine = Arc::clone(&engine);
                s.spawn(move || {
                    for _ in 0..REQUESTS {
                        let labels = Labels::default();
                        engine.record_request(&labels);
                        for adapter in ADAPTERS {
                            let labels = AdapterLabels::from_request(&labels, adapter);
                            engine.record_adapter_request(&labels);
                        }
                    }
                });
            }
        });

        let snapshot = engine.snapshotter().snapshot();
        let requests = snapshot.total(EventKind::Requests);
        let adapter_requests = snapshot.total(EventKind::AdapterRequests);
        assert_eq!(requests, 4 * REQUESTS);
        assert_eq!(adapter_requests, requests * ADAPTERS.len() as u64);
    }

    #[test]
    fn cache_results_are_batched() {
        let engine = DebuggingEngine::new();
        engine.record_stored_req_cache_result(CacheResult::Hit, 5);
        engine.record_stored_req_cache_result(CacheResult::Miss, 2);
        engine.record_stored_imp_cache_result(CacheResult::Miss, 7);

        let snapshot = engine.snapshotter().snapshot();
        assert_eq!(snapshot.counter(EventKind::StoredRequestCache, &[("cache_result", "hit")]), 5);
        assert_eq!(snapshot.counter(EventKind::StoredRequestCache, &[("cache_result", "miss")]), 2);
        assert_eq!(snapshot.counter(EventKind::StoredImpCache, &[("cache_result", "miss")]), 7);
        assert_eq!(snapshot.counter(EventKind::StoredImpCache, &[("cache_result", "hit")]), 0);
    }

    proptest! {
        #[test]
        fn cache_results_are_order_independent(
            batches in vec((select(CacheResult::all()), 0u64..100), 0..32)
        ) {
            let forward = DebuggingEngine::new();
            for (result, inc) in &batches {
                forward.record_stored_req_cache_result(*result, *inc);
            }

            let backward = DebuggingEngine::new();
            for (result, inc) in batches.iter().rev() {
                backward.record_stored_req_cache_result(*result, *inc);
            }

            let forward = forward.snapshotter().snapshot();
            let backward = backward.snapshotter().snapshot();
            for result in CacheResult::all() {
                let labels = [("cache_result", result.as_str())];
                let expected = batches
                    .iter()
                    .filter(|(r, _)| r == result)
                    .map(|(_, inc)| inc)
                    .sum::<u64>();
                prop_assert_eq!(forward.counter(EventKind::StoredRequestCache, &labels), expected);
                prop_assert_eq!(backward.counter(EventKind::StoredRequestCache, &labels), expected);
            }
        }

        #[test]
        fn error_increments_match_error_set_size(
            errors in vec(select(AdapterError::all()), 0..10)
        ) {
            let engine = DebuggingEngine::new();
            let labels = AdapterLabels::new("appnexus").with_errors(errors.iter().copied());
            engine.record_adapter_request(&labels);

            let snapshot = engine.snapshotter().snapshot();
            prop_assert_eq!(
                snapshot.counter(EventKind::AdapterErrors, &[]),
                labels.adapter_errors.len() as u64
            );
        }
    }
}

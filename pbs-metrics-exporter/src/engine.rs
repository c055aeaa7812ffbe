use std::time::Duration;

use metrics::{Key, Label, Level, Metadata};
use pbs_metrics::{
    AdapterLabels, BidderName, CacheResult, ImpLabels, ImpMediaType, KnownBidders, LabelValue,
    Labels, MetricsEngine, UserLabels, PUBLISHER_UNKNOWN,
};
use tracing::debug;

use crate::series::{Series, SeriesSet};

static METADATA: Metadata<'static> =
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

pub(crate) const ACCOUNT_LABEL: &str = "account";
pub(crate) const ADAPTER_LABEL: &str = "adapter";

pub(crate) fn dimension<T: LabelValue>(value: T) -> Label {
    Label::from_static_parts(T::LABEL, value.as_str())
}

pub(crate) fn flag(key: &'static str, value: bool) -> Label {
    Label::from_static_parts(key, if value { "true" } else { "false" })
}

pub(crate) fn bidder(name: &BidderName) -> Label {
    match name.as_static() {
        Some(name) => Label::from_static_parts(ADAPTER_LABEL, name),
        None => Label::new(ADAPTER_LABEL, name.as_str().to_owned()),
    }
}

fn account(pub_id: &str) -> Label {
    if pub_id == PUBLISHER_UNKNOWN {
        Label::from_static_parts(ACCOUNT_LABEL, PUBLISHER_UNKNOWN)
    } else {
        Label::new(ACCOUNT_LABEL, pub_id.to_owned())
    }
}

/// A [`MetricsEngine`] that forwards every event to the [`metrics`] facade.
///
/// Events are recorded through whichever [`metrics::Recorder`] is current when the event fires, so
/// the engine works with any `metrics`-compatible exporter. Counters are recorded with a unit of
/// [`Count`](metrics::Unit::Count) and timings in seconds.
///
/// Only [`Labels::pub_id`] can grow the number of series without bound. It is left off every series
/// unless account labels are enabled on the
/// [`FacadeEngineBuilder`](crate::FacadeEngineBuilder::with_account_labels).
#[derive(Clone, Debug)]
pub struct FacadeEngine {
    pub(crate) series: SeriesSet,
    pub(crate) known_bidders: KnownBidders,
    pub(crate) account_labels: bool,
}

impl FacadeEngine {
    /// Bidders that `/setuid` requests are verified against.
    pub fn known_bidders(&self) -> &KnownBidders {
        &self.known_bidders
    }

    pub(crate) fn register_counter(&self, series: &Series, labels: Vec<Label>) {
        let key = Key::from_parts(series.name.clone(), labels);
        metrics::with_recorder(|recorder| {
            let _ = recorder.register_counter(&key, &METADATA);
        });
    }

    fn increment(&self, series: &Series, labels: Vec<Label>, value: u64) {
        let key = Key::from_parts(series.name.clone(), labels);
        metrics::with_recorder(|recorder| {
            recorder.register_counter(&key, &METADATA).increment(value);
        });
    }

    fn record(&self, series: &Series, labels: Vec<Label>, value: f64) {
        let key = Key::from_parts(series.name.clone(), labels);
        metrics::with_recorder(|recorder| {
            recorder.register_histogram(&key, &METADATA).record(value);
        });
    }

    pub(crate) fn request_labels(&self, labels: &Labels) -> Vec<Label> {
        let mut out = vec![
            dimension(labels.source),
            dimension(labels.request_type),
            dimension(labels.browser),
            dimension(labels.cookie_flag),
            dimension(labels.request_status),
        ];
        if self.account_labels {
            out.push(account(labels.publisher_id()));
        }
        out
    }

    pub(crate) fn adapter_request_labels(&self, labels: &AdapterLabels) -> Vec<Label> {
        let mut out = vec![
            bidder(&labels.adapter),
            dimension(labels.source),
            dimension(labels.request_type),
            dimension(labels.browser),
            dimension(labels.cookie_flag),
            dimension(labels.adapter_bids),
        ];
        if self.account_labels {
            out.push(account(labels.publisher_id()));
        }
        out
    }
}

impl MetricsEngine for FacadeEngine {
    fn record_connection_accept(&self, success: bool) {
        if success {
            self.increment(&self.series.connections_opened, Vec::new(), 1);
        } else {
            let labels = vec![Label::from_static_parts("connection_error", "accept")];
            self.increment(&self.series.connections_error, labels, 1);
        }
    }

    fn record_connection_close(&self, success: bool) {
        if success {
            self.increment(&self.series.connections_closed, Vec::new(), 1);
        } else {
            let labels = vec![Label::from_static_parts("connection_error", "close")];
            self.increment(&self.series.connections_error, labels, 1);
        }
    }

    fn record_request(&self, labels: &Labels) {
        self.increment(&self.series.requests, self.request_labels(labels), 1);
    }

    fn record_request_time(&self, labels: &Labels, length: Duration) {
        self.record(&self.series.request_time, self.request_labels(labels), length.as_secs_f64());
    }

    fn record_imps(&self, labels: ImpLabels) {
        let labels = vec![
            flag("banner", labels.banner_imps),
            flag("video", labels.video_imps),
            flag("audio", labels.audio_imps),
            flag("native", labels.native_imps),
        ];
        self.increment(&self.series.imps_requested, labels, 1);
    }

    fn record_legacy_imps(&self, labels: &Labels, num_imps: u64) {
        self.increment(&self.series.legacy_imps_requested, self.request_labels(labels), num_imps);
    }

    fn record_adapter_request(&self, labels: &AdapterLabels) {
        self.increment(&self.series.adapter_requests, self.adapter_request_labels(labels), 1);

        for error in &labels.adapter_errors {
            let series = vec![bidder(&labels.adapter), dimension(*error)];
            self.increment(&self.series.adapter_errors, series, 1);
        }
    }

    fn record_adapter_panic(&self, labels: &AdapterLabels) {
        self.increment(&self.series.adapter_panics, vec![bidder(&labels.adapter)], 1);
    }

    fn record_adapter_bid_received(
        &self,
        labels: &AdapterLabels,
        bid_type: ImpMediaType,
        has_adm: bool,
    ) {
        let series = vec![
            bidder(&labels.adapter),
            Label::from_static_parts("bid_type", bid_type.as_str()),
            Label::from_static_parts("markup", if has_adm { "adm" } else { "nurl" }),
        ];
        self.increment(&self.series.adapter_bids_received, series, 1);
    }

    fn record_adapter_price(&self, labels: &AdapterLabels, cpm: f64) {
        self.record(&self.series.adapter_prices, vec![bidder(&labels.adapter)], cpm);
    }

    fn record_adapter_time(&self, labels: &AdapterLabels, length: Duration) {
        self.record(
            &self.series.adapter_request_time,
            vec![bidder(&labels.adapter)],
            length.as_secs_f64(),
        );
    }

    fn record_cookie_sync(&self) {
        self.increment(&self.series.cookie_sync_requests, Vec::new(), 1);
    }

    fn record_adapter_cookie_sync(&self, adapter: &BidderName, gdpr_blocked: bool) {
        let series = vec![bidder(adapter), flag("gdpr_blocked", gdpr_blocked)];
        self.increment(&self.series.adapter_cookie_syncs, series, 1);
    }

    fn record_user_id_set(&self, labels: &UserLabels) {
        let verified = self.known_bidders.resolve(&labels.bidder);
        if verified.is_unknown() && !labels.bidder.is_unknown() {
            debug!(bidder = labels.bidder.as_str(), "Unrecognized bidder in setuid request.");
        }

        let series = vec![dimension(labels.action), bidder(&verified)];
        self.increment(&self.series.setuid_requests, series, 1);
    }

    fn record_stored_req_cache_result(&self, result: CacheResult, inc: u64) {
        self.increment(&self.series.stored_request_cache, vec![dimension(result)], inc);
    }

    fn record_stored_imp_cache_result(&self, result: CacheResult, inc: u64) {
        self.increment(&self.series.stored_imp_cache, vec![dimension(result)], inc);
    }

    fn record_prebid_cache_request_time(&self, success: bool, length: Duration) {
        self.record(
            &self.series.prebid_cache_request_time,
            vec![flag("success", success)],
            length.as_secs_f64(),
        );
    }
}

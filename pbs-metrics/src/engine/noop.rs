use std::time::Duration;

use crate::{
    AdapterLabels, BidderName, CacheResult, ImpLabels, ImpMediaType, Labels, MetricsEngine,
    UserLabels,
};

/// A no-op engine.
///
/// Used when metrics are disabled. Useful as the base engine when testing pipeline code that only
/// needs something to call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEngine;

impl MetricsEngine for NoopEngine {
    fn record_connection_accept(&self, _success: bool) {}
    fn record_connection_close(&self, _success: bool) {}
    fn record_request(&self, _labels: &Labels) {}
    fn record_request_time(&self, _labels: &Labels, _length: Duration) {}
    fn record_imps(&self, _labels: ImpLabels) {}
    fn record_legacy_imps(&self, _labels: &Labels, _num_imps: u64) {}
    fn record_adapter_request(&self, _labels: &AdapterLabels) {}
    fn record_adapter_panic(&self, _labels: &AdapterLabels) {}
    fn record_adapter_bid_received(
        &self,
        _labels: &AdapterLabels,
        _bid_type: ImpMediaType,
        _has_adm: bool,
    ) {
    }
    fn record_adapter_price(&self, _labels: &AdapterLabels, _cpm: f64) {}
    fn record_adapter_time(&self, _labels: &AdapterLabels, _length: Duration) {}
    fn record_cookie_sync(&self) {}
    fn record_adapter_cookie_sync(&self, _adapter: &BidderName, _gdpr_blocked: bool) {}
    fn record_user_id_set(&self, _labels: &UserLabels) {}
    fn record_stored_req_cache_result(&self, _result: CacheResult, _inc: u64) {}
    fn record_stored_imp_cache_result(&self, _result: CacheResult, _inc: u64) {}
    fn record_prebid_cache_request_time(&self, _success: bool, _length: Duration) {}
}

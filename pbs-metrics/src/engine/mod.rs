use std::time::Duration;

mod noop;
pub use self::noop::NoopEngine;

use crate::{AdapterLabels, BidderName, CacheResult, ImpLabels, ImpMediaType, Labels, UserLabels};

/// A trait for recording serving pipeline metrics into a backend.
///
/// This is the only surface shared by the serving pipeline and a metrics backend. Every method is
/// fire-and-forget: nothing is returned, and an implementation must absorb its own failures (log or
/// drop) rather than panic into the caller, since a metrics outage must never take bid serving down
/// with it. Methods are called concurrently from many threads, so implementations should keep them
/// to cheap in-process updates such as atomic increments and do any flushing elsewhere.
///
/// # Comparing series
///
/// The connection, request and impression methods fire once per incoming request, so their totals
/// equal the number of incoming requests. The adapter methods fire once per outgoing call to a bidder
/// adapter and so record many hits per incoming request. Each group is consistent with itself, but
/// their totals differ by the number of adapters called per request: comparing numbers *between* the
/// two groups is generally not meaningful.
///
/// No ordering is implied between calls. Backends should aggregate with commutative operations.
pub trait MetricsEngine: Send + Sync {
    /// Records an accepted inbound connection, or a failure to accept one.
    fn record_connection_accept(&self, success: bool);

    /// Records a closed inbound connection, or a failure while closing one.
    fn record_connection_close(&self, success: bool);

    /// Records an inbound request.
    fn record_request(&self, labels: &Labels);

    /// Records the time taken to serve an inbound request.
    fn record_request_time(&self, labels: &Labels, length: Duration);

    /// Records the media types of an impression, for endpoints that classify impressions.
    fn record_imps(&self, labels: ImpLabels);

    /// Records the number of impressions in a request served by the legacy endpoint.
    fn record_legacy_imps(&self, labels: &Labels, num_imps: u64);

    /// Records a call to a bidder adapter.
    ///
    /// Every error in [`AdapterLabels::adapter_errors`] must be counted individually.
    fn record_adapter_request(&self, labels: &AdapterLabels);

    /// Records a panic recovered from a bidder adapter.
    fn record_adapter_panic(&self, labels: &AdapterLabels);

    /// Records a bid received from an adapter, and whether it carried its creative inline (`adm`) or
    /// only a notice URL (`nurl`).
    ///
    /// The legacy endpoint has no bid type, so only OpenRTB and AMP bids are counted here.
    fn record_adapter_bid_received(
        &self,
        labels: &AdapterLabels,
        bid_type: ImpMediaType,
        has_adm: bool,
    );

    /// Records the price of a bid received from an adapter, in CPM.
    fn record_adapter_price(&self, labels: &AdapterLabels, cpm: f64);

    /// Records the time taken by a call to a bidder adapter.
    fn record_adapter_time(&self, labels: &AdapterLabels, length: Duration);

    /// Records a `/cookie_sync` request.
    fn record_cookie_sync(&self);

    /// Records a cookie sync handed out for an adapter, and whether GDPR blocked it.
    fn record_adapter_cookie_sync(&self, adapter: &BidderName, gdpr_blocked: bool);

    /// Records a `/setuid` request.
    ///
    /// The bidder in `labels` comes from client input. Implementations must check it against the
    /// bidders they know about and attribute anything else to [`BidderName::unknown`].
    fn record_user_id_set(&self, labels: &UserLabels);

    /// Records `inc` stored request cache lookups with the given result.
    fn record_stored_req_cache_result(&self, result: CacheResult, inc: u64);

    /// Records `inc` stored impression cache lookups with the given result.
    fn record_stored_imp_cache_result(&self, result: CacheResult, inc: u64);

    /// Records the time taken by a request to Prebid Cache.
    fn record_prebid_cache_request_time(&self, success: bool, length: Duration);
}

// Blanket implementations.
macro_rules! impl_engine {
    ($inner_ty:ident, $ptr_ty:ty) => {
        impl<$inner_ty> $crate::MetricsEngine for $ptr_ty
        where
            $inner_ty: $crate::MetricsEngine + ?Sized,
        {
            fn record_connection_accept(&self, success: bool) {
                std::ops::Deref::deref(self).record_connection_accept(success)
            }

            fn record_connection_close(&self, success: bool) {
                std::ops::Deref::deref(self).record_connection_close(success)
            }

            fn record_request(&self, labels: &$crate::Labels) {
                std::ops::Deref::deref(self).record_request(labels)
            }

            fn record_request_time(&self, labels: &$crate::Labels, length: std::time::Duration) {
                std::ops::Deref::deref(self).record_request_time(labels, length)
            }

            fn record_imps(&self, labels: $crate::ImpLabels) {
                std::ops::Deref::deref(self).record_imps(labels)
            }

            fn record_legacy_imps(&self, labels: &$crate::Labels, num_imps: u64) {
                std::ops::Deref::deref(self).record_legacy_imps(labels, num_imps)
            }

            fn record_adapter_request(&self, labels: &$crate::AdapterLabels) {
                std::ops::Deref::deref(self).record_adapter_request(labels)
            }

            fn record_adapter_panic(&self, labels: &$crate::AdapterLabels) {
                std::ops::Deref::deref(self).record_adapter_panic(labels)
            }

            fn record_adapter_bid_received(
                &self,
                labels: &$crate::AdapterLabels,
                bid_type: $crate::ImpMediaType,
                has_adm: bool,
            ) {
                std::ops::Deref::deref(self).record_adapter_bid_received(labels, bid_type, has_adm)
            }

            fn record_adapter_price(&self, labels: &$crate::AdapterLabels, cpm: f64) {
                std::ops::Deref::deref(self).record_adapter_price(labels, cpm)
            }

            fn record_adapter_time(
                &self,
                labels: &$crate::AdapterLabels,
                length: std::time::Duration,
            ) {
                std::ops::Deref::deref(self).record_adapter_time(labels, length)
            }

            fn record_cookie_sync(&self) {
                std::ops::Deref::deref(self).record_cookie_sync()
            }

            fn record_adapter_cookie_sync(&self, adapter: &$crate::BidderName, gdpr_blocked: bool) {
                std::ops::Deref::deref(self).record_adapter_cookie_sync(adapter, gdpr_blocked)
            }

            fn record_user_id_set(&self, labels: &$crate::UserLabels) {
                std::ops::Deref::deref(self).record_user_id_set(labels)
            }

            fn record_stored_req_cache_result(&self, result: $crate::CacheResult, inc: u64) {
                std::ops::Deref::deref(self).record_stored_req_cache_result(result, inc)
            }

            fn record_stored_imp_cache_result(&self, result: $crate::CacheResult, inc: u64) {
                std::ops::Deref::deref(self).record_stored_imp_cache_result(result, inc)
            }

            fn record_prebid_cache_request_time(&self, success: bool, length: std::time::Duration) {
                std::ops::Deref::deref(self).record_prebid_cache_request_time(success, length)
            }
        }
    };
}

impl_engine!(T, &T);
impl_engine!(T, std::boxed::Box<T>);
impl_engine!(T, std::sync::Arc<T>);

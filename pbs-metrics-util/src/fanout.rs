use std::time::Duration;

use pbs_metrics::{
    AdapterLabels, BidderName, CacheResult, ImpLabels, ImpMediaType, Labels, MetricsEngine,
    UserLabels,
};

/// Fans out every event to multiple engines.
///
/// Engines are called in the order they were added. With no engines, every event is dropped.
pub struct MultiEngine {
    engines: Vec<Box<dyn MetricsEngine>>,
}

impl MultiEngine {
    /// Number of engines events are fanned out to.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns `true` if there are no engines to fan out to.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    fn each(&self, f: impl Fn(&dyn MetricsEngine)) {
        for engine in &self.engines {
            f(engine.as_ref());
        }
    }
}

impl MetricsEngine for MultiEngine {
    fn record_connection_accept(&self, success: bool) {
        self.each(|engine| engine.record_connection_accept(success));
    }

    fn record_connection_close(&self, success: bool) {
        self.each(|engine| engine.record_connection_close(success));
    }

    fn record_request(&self, labels: &Labels) {
        self.each(|engine| engine.record_request(labels));
    }

    fn record_request_time(&self, labels: &Labels, length: Duration) {
        self.each(|engine| engine.record_request_time(labels, length));
    }

    fn record_imps(&self, labels: ImpLabels) {
        self.each(|engine| engine.record_imps(labels));
    }

    fn record_legacy_imps(&self, labels: &Labels, num_imps: u64) {
        self.each(|engine| engine.record_legacy_imps(labels, num_imps));
    }

    fn record_adapter_request(&self, labels: &AdapterLabels) {
        self.each(|engine| engine.record_adapter_request(labels));
    }

    fn record_adapter_panic(&self, labels: &AdapterLabels) {
        self.each(|engine| engine.record_adapter_panic(labels));
    }

    fn record_adapter_bid_received(
        &self,
        labels: &AdapterLabels,
        bid_type: ImpMediaType,
        has_adm: bool,
    ) {
        self.each(|engine| engine.record_adapter_bid_received(labels, bid_type, has_adm));
    }

    fn record_adapter_price(&self, labels: &AdapterLabels, cpm: f64) {
        self.each(|engine| engine.record_adapter_price(labels, cpm));
    }

    fn record_adapter_time(&self, labels: &AdapterLabels, length: Duration) {
        self.each(|engine| engine.record_adapter_time(labels, length));
    }

    #[allow(clippy::redundant_closure_for_method_calls)]
    fn record_cookie_sync(&self) {
        self.each(|engine| engine.record_cookie_sync());
    }

    fn record_adapter_cookie_sync(&self, adapter: &BidderName, gdpr_blocked: bool) {
        self.each(|engine| engine.record_adapter_cookie_sync(adapter, gdpr_blocked));
    }

    fn record_user_id_set(&self, labels: &UserLabels) {
        self.each(|engine| engine.record_user_id_set(labels));
    }

    fn record_stored_req_cache_result(&self, result: CacheResult, inc: u64) {
        self.each(|engine| engine.record_stored_req_cache_result(result, inc));
    }

    fn record_stored_imp_cache_result(&self, result: CacheResult, inc: u64) {
        self.each(|engine| engine.record_stored_imp_cache_result(result, inc));
    }

    fn record_prebid_cache_request_time(&self, success: bool, length: Duration) {
        self.each(|engine| engine.record_prebid_cache_request_time(success, length));
    }
}

/// Builder for a [`MultiEngine`].
#[derive(Default)]
pub struct MultiEngineBuilder {
    engines: Vec<Box<dyn MetricsEngine>>,
}

impl MultiEngineBuilder {
    /// Adds an engine to the fanout list.
    #[must_use]
    pub fn add_engine<E>(mut self, engine: E) -> MultiEngineBuilder
    where
        E: MetricsEngine + 'static,
    {
        self.engines.push(Box::new(engine));
        self
    }

    /// Builds the `MultiEngine`.
    pub fn build(self) -> MultiEngine {
        MultiEngine { engines: self.engines }
    }
}

use metrics::{KeyName, SharedString, Unit};

/// Kind of metric a series is recorded as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SeriesKind {
    Counter,
    Histogram,
}

/// A named series and how it is described to the recorder.
#[derive(Clone, Debug)]
pub(crate) struct Series {
    pub name: KeyName,
    pub kind: SeriesKind,
    pub unit: Option<Unit>,
    pub description: &'static str,
}

impl Series {
    fn new(
        namespace: Option<&str>,
        base: &'static str,
        kind: SeriesKind,
        unit: Option<Unit>,
        description: &'static str,
    ) -> Self {
        let name = match namespace {
            Some(namespace) => KeyName::from(format!("{namespace}_{base}")),
            None => KeyName::from(base),
        };
        Series { name, kind, unit, description }
    }

    fn counter(namespace: Option<&str>, base: &'static str, description: &'static str) -> Self {
        Series::new(namespace, base, SeriesKind::Counter, Some(Unit::Count), description)
    }

    fn timer(namespace: Option<&str>, base: &'static str, description: &'static str) -> Self {
        Series::new(namespace, base, SeriesKind::Histogram, Some(Unit::Seconds), description)
    }

    #[allow(clippy::clone_on_copy)]
    pub fn describe(&self, recorder: &dyn metrics::Recorder) {
        let description = SharedString::const_str(self.description);
        match self.kind {
            SeriesKind::Counter => {
                recorder.describe_counter(self.name.clone(), self.unit.clone(), description);
            }
            SeriesKind::Histogram => {
                recorder.describe_histogram(self.name.clone(), self.unit.clone(), description);
            }
        }
    }
}

/// Every series emitted by [`FacadeEngine`](crate::FacadeEngine).
#[derive(Clone, Debug)]
pub(crate) struct SeriesSet {
    pub connections_opened: Series,
    pub connections_closed: Series,
    pub connections_error: Series,
    pub requests: Series,
    pub request_time: Series,
    pub imps_requested: Series,
    pub legacy_imps_requested: Series,
    pub adapter_requests: Series,
    pub adapter_errors: Series,
    pub adapter_panics: Series,
    pub adapter_bids_received: Series,
    pub adapter_prices: Series,
    pub adapter_request_time: Series,
    pub cookie_sync_requests: Series,
    pub adapter_cookie_syncs: Series,
    pub setuid_requests: Series,
    pub stored_request_cache: Series,
    pub stored_imp_cache: Series,
    pub prebid_cache_request_time: Series,
}

impl SeriesSet {
    pub fn new(namespace: Option<&str>) -> Self {
        let ns = namespace;
        SeriesSet {
            connections_opened: Series::counter(ns, "connections_opened", "Connections accepted."),
            connections_closed: Series::counter(ns, "connections_closed", "Connections closed."),
            connections_error: Series::counter(
                ns,
                "connections_error",
                "Errors while accepting or closing connections.",
            ),
            requests: Series::counter(ns, "requests", "Inbound requests."),
            request_time: Series::timer(
                ns,
                "request_time_seconds",
                "Time taken to serve a request.",
            ),
            imps_requested: Series::counter(
                ns,
                "imps_requested",
                "Impressions requested, by accepted media types.",
            ),
            legacy_imps_requested: Series::counter(
                ns,
                "legacy_imps_requested",
                "Impressions requested on the legacy endpoint.",
            ),
            adapter_requests: Series::counter(ns, "adapter_requests", "Calls to bidder adapters."),
            adapter_errors: Series::counter(
                ns,
                "adapter_errors",
                "Errors returned by bidder adapters, one per distinct error per call.",
            ),
            adapter_panics: Series::counter(
                ns,
                "adapter_panics",
                "Panics recovered from bidder adapters.",
            ),
            adapter_bids_received: Series::counter(
                ns,
                "adapter_bids_received",
                "Bids received from bidder adapters, by bid type and markup delivery.",
            ),
            adapter_prices: Series::new(
                ns,
                "adapter_prices",
                SeriesKind::Histogram,
                None,
                "CPM of bids received from bidder adapters.",
            ),
            adapter_request_time: Series::timer(
                ns,
                "adapter_request_time_seconds",
                "Time taken by calls to bidder adapters.",
            ),
            cookie_sync_requests: Series::counter(
                ns,
                "cookie_sync_requests",
                "Requests to the /cookie_sync endpoint.",
            ),
            adapter_cookie_syncs: Series::counter(
                ns,
                "adapter_cookie_syncs",
                "Cookie syncs handed out per adapter.",
            ),
            setuid_requests: Series::counter(
                ns,
                "setuid_requests",
                "Requests to the /setuid endpoint.",
            ),
            stored_request_cache: Series::counter(
                ns,
                "stored_request_cache_performance",
                "Stored request cache lookups, by result.",
            ),
            stored_imp_cache: Series::counter(
                ns,
                "stored_imp_cache_performance",
                "Stored impression cache lookups, by result.",
            ),
            prebid_cache_request_time: Series::timer(
                ns,
                "prebid_cache_request_time_seconds",
                "Time taken by requests to Prebid Cache.",
            ),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        [
            &self.connections_opened,
            &self.connections_closed,
            &self.connections_error,
            &self.requests,
            &self.request_time,
            &self.imps_requested,
            &self.legacy_imps_requested,
            &self.adapter_requests,
            &self.adapter_errors,
            &self.adapter_panics,
            &self.adapter_bids_received,
            &self.adapter_prices,
            &self.adapter_request_time,
            &self.cookie_sync_requests,
            &self.adapter_cookie_syncs,
            &self.setuid_requests,
            &self.stored_request_cache,
            &self.stored_imp_cache,
            &self.prebid_cache_request_time,
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::SeriesSet;

    #[test]
    fn names_are_unique() {
        let set = SeriesSet::new(None);
        let names = set.iter().map(|series| series.name.as_str()).collect::<HashSet<_>>();
        assert_eq!(names.len(), set.iter().count());
    }

    #[test]
    fn namespace_prefixes_every_name() {
        let set = SeriesSet::new(Some("pbs"));
        assert!(set.iter().all(|series| series.name.as_str().starts_with("pbs_")));
        assert_eq!(set.requests.name.as_str(), "pbs_requests");
    }
}

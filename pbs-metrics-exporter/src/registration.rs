//! Up-front registration of bounded series.
//!
//! Every series whose labels are drawn only from closed dimensions and configured bidders is
//! registered at zero when the engine is built. Dashboards then see every combination from the
//! start, and a series that stays at zero is unambiguous.
use metrics::Label;
use pbs_metrics::{
    AdapterBid, AdapterError, BidderName, Browser, CacheResult, CookieFlag, DemandSource,
    ImpMediaType, RequestAction, RequestStatus, RequestType, PUBLISHER_UNKNOWN,
};

use crate::engine::{bidder, dimension, flag, FacadeEngine, ACCOUNT_LABEL};

/// Describes every series to the current recorder.
pub(crate) fn describe(engine: &FacadeEngine) {
    metrics::with_recorder(|recorder| {
        for series in engine.series.iter() {
            series.describe(recorder);
        }
    });
}

/// Registers every bounded series at zero, returning how many were registered.
pub(crate) fn preregister(engine: &FacadeEngine) -> usize {
    let series = &engine.series;
    let account = || {
        engine
            .account_labels
            .then(|| Label::from_static_parts(ACCOUNT_LABEL, PUBLISHER_UNKNOWN))
    };
    let mut registered = 0;
    let mut register = |target: &crate::series::Series, labels: Vec<Label>| {
        engine.register_counter(target, labels);
        registered += 1;
    };

    register(&series.connections_opened, Vec::new());
    register(&series.connections_closed, Vec::new());
    for action in ["accept", "close"] {
        register(
            &series.connections_error,
            vec![Label::from_static_parts("connection_error", action)],
        );
    }
    register(&series.cookie_sync_requests, Vec::new());

    for source in DemandSource::all() {
        for request_type in RequestType::all() {
            for browser in Browser::all() {
                for cookie in CookieFlag::all() {
                    for status in RequestStatus::all() {
                        let mut labels = vec![
                            dimension(*source),
                            dimension(*request_type),
                            dimension(*browser),
                            dimension(*cookie),
                            dimension(*status),
                        ];
                        labels.extend(account());
                        register(&series.requests, labels.clone());
                        register(&series.legacy_imps_requested, labels);
                    }
                }
            }
        }
    }

    for flags in 0..16u8 {
        let labels = ImpMediaType::all()
            .iter()
            .enumerate()
            .map(|(bit, media_type)| flag(media_type.as_str(), flags & (1 << bit) != 0))
            .collect();
        register(&series.imps_requested, labels);
    }

    for result in CacheResult::all() {
        register(&series.stored_request_cache, vec![dimension(*result)]);
        register(&series.stored_imp_cache, vec![dimension(*result)]);
    }

    for action in RequestAction::all() {
        register(&series.setuid_requests, vec![dimension(*action), bidder(&BidderName::unknown())]);
    }

    for adapter in engine.known_bidders.iter() {
        for source in DemandSource::all() {
            for request_type in RequestType::all() {
                for browser in Browser::all() {
                    for cookie in CookieFlag::all() {
                        for bids in AdapterBid::all() {
                            let mut labels = vec![
                                bidder(adapter),
                                dimension(*source),
                                dimension(*request_type),
                                dimension(*browser),
                                dimension(*cookie),
                                dimension(*bids),
                            ];
                            labels.extend(account());
                            register(&series.adapter_requests, labels);
                        }
                    }
                }
            }
        }

        for error in AdapterError::all() {
            register(&series.adapter_errors, vec![bidder(adapter), dimension(*error)]);
        }

        register(&series.adapter_panics, vec![bidder(adapter)]);

        for bid_type in ImpMediaType::all() {
            for markup in ["adm", "nurl"] {
                register(
                    &series.adapter_bids_received,
                    vec![
                        bidder(adapter),
                        Label::from_static_parts("bid_type", bid_type.as_str()),
                        Label::from_static_parts("markup", markup),
                    ],
                );
            }
        }

        for gdpr_blocked in [false, true] {
            register(
                &series.adapter_cookie_syncs,
                vec![bidder(adapter), flag("gdpr_blocked", gdpr_blocked)],
            );
        }

        for action in RequestAction::all() {
            register(&series.setuid_requests, vec![dimension(*action), bidder(adapter)]);
        }
    }

    registered
}

/// Number of series [`preregister`] registers for `bidders` configured bidders.
#[cfg(test)]
pub(crate) fn expected_series(bidders: usize) -> usize {
    let requests = DemandSource::all().len()
        * RequestType::all().len()
        * Browser::all().len()
        * CookieFlag::all().len()
        * RequestStatus::all().len();
    let adapter_requests = DemandSource::all().len()
        * RequestType::all().len()
        * Browser::all().len()
        * CookieFlag::all().len()
        * AdapterBid::all().len();
    let per_bidder = adapter_requests
        + AdapterError::all().len()
        + 1
        + ImpMediaType::all().len() * 2
        + 2
        + RequestAction::all().len();
    let global =
        5 + requests * 2 + 16 + CacheResult::all().len() * 2 + RequestAction::all().len();

    global + per_bidder * bidders
}

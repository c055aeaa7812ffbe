//! Label bundles attached to a single recorded event.
//!
//! Bundles are plain values: built by the serving pipeline from resolved request context, handed
//! to exactly one [`MetricsEngine`](crate::MetricsEngine) call, then dropped.
use std::collections::BTreeSet;

use crate::{
    bidder::BidderName,
    taxonomy::{
        AdapterBid, AdapterError, Browser, CookieFlag, DemandSource, ImpMediaType, RequestAction,
        RequestStatus, RequestType, PUBLISHER_UNKNOWN,
    },
};

fn publisher_or_unknown(pub_id: &str) -> &str {
    if pub_id.is_empty() {
        PUBLISHER_UNKNOWN
    } else {
        pub_id
    }
}

/// Labels attached to metrics about an inbound request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Labels {
    /// Demand source.
    pub source: DemandSource,
    /// Endpoint the request arrived on.
    pub request_type: RequestType,
    /// Exchange specific publisher ID.
    ///
    /// This is the only unbounded dimension in the taxonomy. Backends should only attach it as a label
    /// when they have opted in to per-account series.
    pub pub_id: String,
    /// Browser class.
    pub browser: Browser,
    /// Whether the user ID cookie was present.
    pub cookie_flag: CookieFlag,
    /// Outcome of the request.
    pub request_status: RequestStatus,
}

impl Labels {
    /// Creates `Labels` for the given source and request type, with every other dimension at its default.
    pub fn new(source: DemandSource, request_type: RequestType) -> Self {
        Labels { source, request_type, ..Default::default() }
    }

    /// Sets the publisher ID.
    #[must_use]
    pub fn with_pub_id(mut self, pub_id: impl Into<String>) -> Self {
        self.pub_id = pub_id.into();
        self
    }

    /// Sets the browser class.
    #[must_use]
    pub fn with_browser(mut self, browser: Browser) -> Self {
        self.browser = browser;
        self
    }

    /// Sets the cookie flag.
    #[must_use]
    pub fn with_cookie_flag(mut self, cookie_flag: CookieFlag) -> Self {
        self.cookie_flag = cookie_flag;
        self
    }

    /// Sets the request status.
    #[must_use]
    pub fn with_request_status(mut self, request_status: RequestStatus) -> Self {
        self.request_status = request_status;
        self
    }

    /// The publisher ID, or [`PUBLISHER_UNKNOWN`] if none was resolved.
    pub fn publisher_id(&self) -> &str {
        publisher_or_unknown(&self.pub_id)
    }
}

impl Default for Labels {
    /// Unknown source, `openrtb2-web`, unknown publisher, other browser, unknown cookie, `ok`.
    fn default() -> Self {
        Labels {
            source: DemandSource::Unknown,
            request_type: RequestType::OpenRtb2Web,
            pub_id: PUBLISHER_UNKNOWN.to_owned(),
            browser: Browser::Other,
            cookie_flag: CookieFlag::Unknown,
            request_status: RequestStatus::Ok,
        }
    }
}

/// Labels attached to metrics about a single call to a bidder adapter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AdapterLabels {
    /// Demand source.
    pub source: DemandSource,
    /// Endpoint the originating request arrived on.
    pub request_type: RequestType,
    /// The adapter that was called.
    pub adapter: BidderName,
    /// Exchange specific publisher ID. See [`Labels::pub_id`].
    pub pub_id: String,
    /// Browser class.
    pub browser: Browser,
    /// Whether the user ID cookie was present.
    pub cookie_flag: CookieFlag,
    /// Whether the adapter returned any bid.
    pub adapter_bids: AdapterBid,
    /// Every distinct error the call ran into.
    ///
    /// Backends record one error increment per element.
    pub adapter_errors: BTreeSet<AdapterError>,
}

impl AdapterLabels {
    /// Creates `AdapterLabels` for the given adapter with every other dimension at its default.
    pub fn new(adapter: impl Into<BidderName>) -> Self {
        Self::from_request(&Labels::default(), adapter)
    }

    /// Creates `AdapterLabels` for a call made while serving the request described by `labels`.
    pub fn from_request(labels: &Labels, adapter: impl Into<BidderName>) -> Self {
        AdapterLabels {
            source: labels.source,
            request_type: labels.request_type,
            adapter: adapter.into(),
            pub_id: labels.pub_id.clone(),
            browser: labels.browser,
            cookie_flag: labels.cookie_flag,
            adapter_bids: AdapterBid::Absent,
            adapter_errors: BTreeSet::new(),
        }
    }

    /// Sets the demand source.
    #[must_use]
    pub fn with_source(mut self, source: DemandSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the request type.
    #[must_use]
    pub fn with_request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = request_type;
        self
    }

    /// Sets the publisher ID.
    #[must_use]
    pub fn with_pub_id(mut self, pub_id: impl Into<String>) -> Self {
        self.pub_id = pub_id.into();
        self
    }

    /// Sets the browser class.
    #[must_use]
    pub fn with_browser(mut self, browser: Browser) -> Self {
        self.browser = browser;
        self
    }

    /// Sets the cookie flag.
    #[must_use]
    pub fn with_cookie_flag(mut self, cookie_flag: CookieFlag) -> Self {
        self.cookie_flag = cookie_flag;
        self
    }

    /// Sets whether the adapter returned any bid.
    #[must_use]
    pub fn with_adapter_bids(mut self, adapter_bids: AdapterBid) -> Self {
        self.adapter_bids = adapter_bids;
        self
    }

    /// Adds an error to the error set. Adding the same error twice has no further effect.
    #[must_use]
    pub fn with_error(mut self, error: AdapterError) -> Self {
        self.adapter_errors.insert(error);
        self
    }

    /// Adds several errors to the error set.
    #[must_use]
    pub fn with_errors<I>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = AdapterError>,
    {
        self.adapter_errors.extend(errors);
        self
    }

    /// The publisher ID, or [`PUBLISHER_UNKNOWN`] if none was resolved.
    pub fn publisher_id(&self) -> &str {
        publisher_or_unknown(&self.pub_id)
    }
}

/// Media types present in an impression.
///
/// An impression can accept several media types at once, so this is a set of flags rather than a
/// single [`ImpMediaType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct ImpLabels {
    /// The impression accepts banners.
    pub banner_imps: bool,
    /// The impression accepts video.
    pub video_imps: bool,
    /// The impression accepts audio.
    pub audio_imps: bool,
    /// The impression accepts native.
    pub native_imps: bool,
}

impl ImpLabels {
    /// Creates `ImpLabels` with a flag set for every media type in `media_types`.
    pub fn from_media_types<I>(media_types: I) -> Self
    where
        I: IntoIterator<Item = ImpMediaType>,
    {
        media_types.into_iter().fold(ImpLabels::default(), |mut labels, media_type| {
            *labels.flag_mut(media_type) = true;
            labels
        })
    }

    /// Returns `true` if the impression accepts `media_type`.
    pub fn contains(&self, media_type: ImpMediaType) -> bool {
        match media_type {
            ImpMediaType::Banner => self.banner_imps,
            ImpMediaType::Video => self.video_imps,
            ImpMediaType::Audio => self.audio_imps,
            ImpMediaType::Native => self.native_imps,
        }
    }

    fn flag_mut(&mut self, media_type: ImpMediaType) -> &mut bool {
        match media_type {
            ImpMediaType::Banner => &mut self.banner_imps,
            ImpMediaType::Video => &mut self.video_imps,
            ImpMediaType::Audio => &mut self.audio_imps,
            ImpMediaType::Native => &mut self.native_imps,
        }
    }
}

/// Labels describing the result of an outbound network request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestLabels {
    /// Outcome of the network request.
    pub request_status: RequestStatus,
}

/// Labels for the `/setuid` endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserLabels {
    /// Result of the request.
    pub action: RequestAction,
    /// Bidder named by the request. Comes from client input and is unverified.
    pub bidder: BidderName,
}

impl UserLabels {
    /// Creates `UserLabels`.
    pub fn new(action: RequestAction, bidder: impl Into<BidderName>) -> Self {
        UserLabels { action, bidder: bidder.into() }
    }
}

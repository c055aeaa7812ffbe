//! Restricted-domain label dimensions.
//!
//! Every dimension is a closed enum: the variants are the complete set of legal values, and
//! [`LabelValue::all`] lists them in a stable order so that backends can pre-register one series per
//! value. Nothing here validates anything at recording time. A value that cannot be expressed as a
//! variant simply cannot be recorded.
use std::{fmt, hash::Hash, str::FromStr};

use crate::error::ParseLabelError;

/// Default value for the publisher ID when it cannot be resolved from the request.
pub const PUBLISHER_UNKNOWN: &str = "unknown";

/// A label dimension with a fixed, enumerable set of values.
pub trait LabelValue: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Label key used by backends when attaching this dimension to a series.
    const LABEL: &'static str;

    /// Every legal value of this dimension, in declaration order.
    fn all() -> &'static [Self];

    /// The value as it appears on the wire.
    fn as_str(&self) -> &'static str;
}

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident, label = $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            const ALL: &'static [$name] = &[$($name::$variant),+];

            #[doc = concat!("Returns every legal `", stringify!($name), "`, in declaration order.")]
            pub const fn all() -> &'static [$name] {
                Self::ALL
            }

            #[doc = concat!("Returns the wire value of this `", stringify!($name), "`.")]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )+
                }
            }
        }

        impl LabelValue for $name {
            const LABEL: &'static str = $label;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($name::as_str(self))
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, ParseLabelError> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    _ => Err(ParseLabelError::new(stringify!($name), s)),
                }
            }
        }
    };
}

label_enum! {
    /// Where the demand for a request originates.
    DemandSource, label = "source" {
        /// Request from a website.
        Web => "web",
        /// Request from a mobile application.
        App => "app",
        /// Origin could not be determined.
        Unknown => "unknown",
    }
}

label_enum! {
    /// The endpoint a request arrived on.
    RequestType, label = "request_type" {
        /// Legacy `/auction` endpoint.
        Legacy => "legacy",
        /// OpenRTB 2 auction for web inventory.
        OpenRtb2Web => "openrtb2-web",
        /// OpenRTB 2 auction for app inventory.
        OpenRtb2App => "openrtb2-app",
        /// Accelerated Mobile Pages endpoint.
        Amp => "amp",
        /// Long-form video endpoint.
        Video => "video",
    }
}

label_enum! {
    /// Media type described in an `imp` object, and the type of a returned bid.
    ImpMediaType, label = "media_type" {
        /// Display banner.
        Banner => "banner",
        /// Video.
        Video => "video",
        /// Audio.
        Audio => "audio",
        /// Native.
        Native => "native",
    }
}

label_enum! {
    /// Browser class. Only Safari is singled out.
    Browser, label = "browser" {
        /// Safari.
        Safari => "safari",
        /// Anything else.
        Other => "other",
    }
}

label_enum! {
    /// Whether the user ID cookie was present on the request.
    CookieFlag, label = "cookie" {
        /// The cookie exists.
        Exists => "exists",
        /// The cookie is absent.
        No => "no",
        /// Presence of the cookie could not be determined.
        Unknown => "unknown",
    }
}

label_enum! {
    /// Outcome of a request, either inbound or outbound.
    RequestStatus, label = "request_status" {
        /// Served successfully.
        Ok => "ok",
        /// Rejected because of malformed input.
        BadInput => "badinput",
        /// Failed for an internal reason.
        Err => "err",
        /// Failed on the network.
        NetworkErr => "networkerr",
        /// Rejected because the account or app is blacklisted.
        Blacklisted => "blacklisted-account-or-app",
    }
}

label_enum! {
    /// Whether an adapter returned any bid.
    AdapterBid, label = "adapter_bids" {
        /// At least one bid was returned.
        Present => "bid",
        /// No bid was returned.
        Absent => "nobid",
    }
}

label_enum! {
    /// Errors which may occur while an adapter executes.
    AdapterError, label = "adapter_error" {
        /// The adapter rejected the request as invalid.
        BadInput => "badinput",
        /// The bidder server returned a response that could not be used.
        BadServerResponse => "badserverresponse",
        /// The bidder did not answer in time.
        Timeout => "timeout",
        /// The request to the bidder could not be made.
        FailedToRequestBids => "failedtorequestbid",
        /// Any other failure.
        Unknown => "unknown",
    }
}

label_enum! {
    /// Outcome of a stored request or stored impression cache lookup.
    CacheResult, label = "cache_result" {
        /// The key was found in the cache.
        Hit => "hit",
        /// The key was not in the cache and had to be fetched from the backend.
        Miss => "miss",
    }
}

label_enum! {
    /// Result of a `/setuid` request.
    RequestAction, label = "action" {
        /// The user ID was set.
        Set => "set",
        /// The user has opted out.
        OptOut => "opt_out",
        /// The sync was blocked by GDPR.
        Gdpr => "gdpr",
        /// The request failed.
        Err => "err",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    // Each helper matches without a wildcard arm; a new variant fails to compile here until it is
    // given an index, and the assertions below then require it to appear in `all()`.
    fn demand_source_index(v: DemandSource) -> usize {
        match v {
            DemandSource::Web => 0,
            DemandSource::App => 1,
            DemandSource::Unknown => 2,
        }
    }

    fn request_type_index(v: RequestType) -> usize {
        match v {
            RequestType::Legacy => 0,
            RequestType::OpenRtb2Web => 1,
            RequestType::OpenRtb2App => 2,
            RequestType::Amp => 3,
            RequestType::Video => 4,
        }
    }

    fn imp_media_type_index(v: ImpMediaType) -> usize {
        match v {
            ImpMediaType::Banner => 0,
            ImpMediaType::Video => 1,
            ImpMediaType::Audio => 2,
            ImpMediaType::Native => 3,
        }
    }

    fn browser_index(v: Browser) -> usize {
        match v {
            Browser::Safari => 0,
            Browser::Other => 1,
        }
    }

    fn cookie_flag_index(v: CookieFlag) -> usize {
        match v {
            CookieFlag::Exists => 0,
            CookieFlag::No => 1,
            CookieFlag::Unknown => 2,
        }
    }

    fn request_status_index(v: RequestStatus) -> usize {
        match v {
            RequestStatus::Ok => 0,
            RequestStatus::BadInput => 1,
            RequestStatus::Err => 2,
            RequestStatus::NetworkErr => 3,
            RequestStatus::Blacklisted => 4,
        }
    }

    fn adapter_bid_index(v: AdapterBid) -> usize {
        match v {
            AdapterBid::Present => 0,
            AdapterBid::Absent => 1,
        }
    }

    fn adapter_error_index(v: AdapterError) -> usize {
        match v {
            AdapterError::BadInput => 0,
            AdapterError::BadServerResponse => 1,
            AdapterError::Timeout => 2,
            AdapterError::FailedToRequestBids => 3,
            AdapterError::Unknown => 4,
        }
    }

    fn cache_result_index(v: CacheResult) -> usize {
        match v {
            CacheResult::Hit => 0,
            CacheResult::Miss => 1,
        }
    }

    fn request_action_index(v: RequestAction) -> usize {
        match v {
            RequestAction::Set => 0,
            RequestAction::OptOut => 1,
            RequestAction::Gdpr => 2,
            RequestAction::Err => 3,
        }
    }

    fn assert_exhaustive<T: LabelValue>(variant_count: usize, index: fn(T) -> usize) {
        let all = T::all();
        assert_eq!(all.len(), variant_count, "{} list has the wrong length", T::LABEL);

        let indices = all.iter().map(|v| index(*v)).collect::<Vec<_>>();
        let expected = (0..variant_count).collect::<Vec<_>>();
        assert_eq!(indices, expected, "{} list out of order", T::LABEL);
    }

    fn assert_wire_values<T>(expected: &[&str])
    where
        T: LabelValue + FromStr<Err = ParseLabelError>,
    {
        let values = T::all().iter().map(LabelValue::as_str).collect::<Vec<_>>();
        assert_eq!(values, expected);

        let unique = values.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), values.len(), "{} has duplicate wire values", T::LABEL);

        for value in T::all() {
            assert_eq!(value.to_string(), value.as_str());
            assert_eq!(value.as_str().parse::<T>().ok(), Some(*value));
        }
    }

    #[test]
    fn enumerations_cover_every_variant() {
        assert_exhaustive::<DemandSource>(3, demand_source_index);
        assert_exhaustive::<RequestType>(5, request_type_index);
        assert_exhaustive::<ImpMediaType>(4, imp_media_type_index);
        assert_exhaustive::<Browser>(2, browser_index);
        assert_exhaustive::<CookieFlag>(3, cookie_flag_index);
        assert_exhaustive::<RequestStatus>(5, request_status_index);
        assert_exhaustive::<AdapterBid>(2, adapter_bid_index);
        assert_exhaustive::<AdapterError>(5, adapter_error_index);
        assert_exhaustive::<CacheResult>(2, cache_result_index);
        assert_exhaustive::<RequestAction>(4, request_action_index);
    }

    #[test]
    fn wire_values() {
        assert_wire_values::<DemandSource>(&["web", "app", "unknown"]);
        assert_wire_values::<RequestType>(&[
            "legacy",
            "openrtb2-web",
            "openrtb2-app",
            "amp",
            "video",
        ]);
        assert_wire_values::<ImpMediaType>(&["banner", "video", "audio", "native"]);
        assert_wire_values::<Browser>(&["safari", "other"]);
        assert_wire_values::<CookieFlag>(&["exists", "no", "unknown"]);
        assert_wire_values::<RequestStatus>(&[
            "ok",
            "badinput",
            "err",
            "networkerr",
            "blacklisted-account-or-app",
        ]);
        assert_wire_values::<AdapterBid>(&["bid", "nobid"]);
        assert_wire_values::<AdapterError>(&[
            "badinput",
            "badserverresponse",
            "timeout",
            "failedtorequestbid",
            "unknown",
        ]);
        assert_wire_values::<CacheResult>(&["hit", "miss"]);
        assert_wire_values::<RequestAction>(&["set", "opt_out", "gdpr", "err"]);
    }

    #[test]
    fn label_keys_are_unique() {
        let keys = [
            DemandSource::LABEL,
            RequestType::LABEL,
            ImpMediaType::LABEL,
            Browser::LABEL,
            CookieFlag::LABEL,
            RequestStatus::LABEL,
            AdapterBid::LABEL,
            AdapterError::LABEL,
            CacheResult::LABEL,
            RequestAction::LABEL,
        ];
        let unique = keys.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn parse_rejects_values_outside_the_domain() {
        let err = "bogus".parse::<DemandSource>().unwrap_err();
        assert_eq!(err.kind(), "DemandSource");
        assert_eq!(err.value(), "bogus");

        // Wire values are case sensitive.
        assert!("Web".parse::<DemandSource>().is_err());
        assert!("unknown_error".parse::<AdapterError>().is_err());
    }

    #[test]
    fn err_variants_parse() {
        assert_eq!("err".parse::<RequestStatus>().ok(), Some(RequestStatus::Err));
        assert_eq!("err".parse::<RequestAction>().ok(), Some(RequestAction::Err));
        assert_eq!("error".parse::<RequestAction>().unwrap_err().kind(), "RequestAction");
    }

    #[test]
    fn enumerations_are_shareable_across_threads() {
        let handles = (0..4)
            .map(|_| std::thread::spawn(|| RequestStatus::all().len()))
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5);
        }
    }
}

use std::{borrow::Cow, collections::BTreeSet, fmt, sync::Arc};

const UNKNOWN_BIDDER: &str = "unknown";

/// Identity of a bidder adapter.
///
/// Bidder names come from configuration rather than from a compile-time list, so this is a string
/// newtype rather than an enum. The set of names is still bounded in practice: see [`KnownBidders`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BidderName(Cow<'static, str>);

impl BidderName {
    /// Creates a `BidderName` from a static string without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        BidderName(Cow::Borrowed(name))
    }

    /// The bucket that unverified bidder names are attributed to.
    pub const fn unknown() -> Self {
        BidderName::from_static(UNKNOWN_BIDDER)
    }

    /// Returns `true` if this is the [`unknown`](BidderName::unknown) bucket.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_BIDDER
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name as a static string, if it was created from one.
    pub fn as_static(&self) -> Option<&'static str> {
        match self.0 {
            Cow::Borrowed(name) => Some(name),
            Cow::Owned(_) => None,
        }
    }
}

impl fmt::Display for BidderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for BidderName {
    fn from(name: &'static str) -> Self {
        BidderName::from_static(name)
    }
}

impl From<String> for BidderName {
    fn from(name: String) -> Self {
        BidderName(Cow::Owned(name))
    }
}

impl AsRef<str> for BidderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The set of bidders configured for this process.
///
/// Values that reach the metrics layer from unauthenticated input, such as the bidder named in a
/// `/setuid` request, must be passed through [`KnownBidders::resolve`] before being used as a label.
/// Cloning is cheap; the set is shared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownBidders {
    bidders: Arc<BTreeSet<BidderName>>,
}

impl KnownBidders {
    /// Creates a `KnownBidders` from the given names.
    pub fn new<I, B>(bidders: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<BidderName>,
    {
        KnownBidders { bidders: Arc::new(bidders.into_iter().map(Into::into).collect()) }
    }

    /// Returns `true` if `bidder` is configured.
    pub fn contains(&self, bidder: &BidderName) -> bool {
        self.bidders.contains(bidder)
    }

    /// Returns `bidder` if it is configured, and the unknown bucket otherwise.
    ///
    /// The unknown bucket is never treated as a configured bidder, even if it was given to
    /// [`KnownBidders::new`].
    pub fn resolve(&self, bidder: &BidderName) -> BidderName {
        if !bidder.is_unknown() && self.contains(bidder) {
            bidder.clone()
        } else {
            BidderName::unknown()
        }
    }

    /// Iterates the configured bidders in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &BidderName> {
        self.bidders.iter()
    }

    /// Number of configured bidders.
    pub fn len(&self) -> usize {
        self.bidders.len()
    }

    /// Returns `true` if no bidders are configured.
    pub fn is_empty(&self) -> bool {
        self.bidders.is_empty()
    }
}

impl<B: Into<BidderName>> FromIterator<B> for KnownBidders {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        KnownBidders::new(iter)
    }
}

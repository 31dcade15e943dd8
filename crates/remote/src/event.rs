use crate::{DirectoryListing, ListingFailure, Site};

/// Outcome of a list command, reported by the protocol layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RemoteEvent {
    /// The directory was listed.
    Listing(DirectoryListing),
    /// Listing failed.
    ListingFailed(ListingFailure),
    /// The entry listed as a link is not a directory.
    LinkIsNotDir(Option<Site>),
}

//! Protocol constants for NIP-72 communities.
//!
//! These values are shared with every other client and relay on the network
//! and must not change.

/// Community definition (addressable, NIP-72)
pub const COMMUNITY_DEFINITION_KIND: u16 = 34550;

/// Comment (NIP-22), used for posts inside a community
pub const COMMENT_KIND: u16 = 1111;

/// Moderator approval of a community post (NIP-72)
pub const POST_APPROVAL_KIND: u16 = 4550;

/// Marker at position 3 of a `p` tag naming a community moderator
pub const MODERATOR_MARKER: &str = "moderator";

/// Prefix of an `a` tag value that points at a community definition
pub const COMMUNITY_COORDINATE_PREFIX: &str = "34550:";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_prefix_matches_kind() {
        assert_eq!(
            COMMUNITY_COORDINATE_PREFIX,
            format!("{}:", COMMUNITY_DEFINITION_KIND)
        );
    }
}

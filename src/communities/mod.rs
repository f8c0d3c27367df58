//! NIP-72 moderated communities
//!
//! This module parses generic Nostr events into community records and builds
//! unsigned events from them. Three record types are supported:
//! community definitions (kind 34550), posts scoped to a community (NIP-22
//! comments, kind 1111) and moderator approvals (kind 4550).
//!
//! Parsing and building are pure and synchronous. Signing, publishing and
//! fetching referenced events are left to the caller.

mod approval;
mod constants;
mod coordinate;
mod definition;
mod post;
mod types;


pub use approval::Approval;
pub use constants::*;
pub use coordinate::{CommunityCoordinate, is_community_post};
pub use definition::{Community, CommunityBuilder};
pub use post::{CommunityPost, PostParent};
pub use types::{ParseWarning, Parsed};

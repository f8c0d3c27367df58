use std::fmt;

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::{COMMUNITY_COORDINATE_PREFIX, COMMUNITY_DEFINITION_KIND};
use super::definition::Community;
use crate::error::{CommunityError, Result};
use crate::tags;

/// Address of a community definition: `34550:<author-hex>:<d-identifier>`.
///
/// The author is kept as the raw hex string found on the wire. Parsing only
/// checks the shape of the value; use [`CommunityCoordinate::public_key`] to
/// decode the author when it matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunityCoordinate {
    pub author: String,
    pub identifier: String,
}

impl CommunityCoordinate {
    pub fn new(author: &PublicKey, identifier: impl Into<String>) -> Self {
        Self {
            author: author.to_hex(),
            identifier: identifier.into(),
        }
    }

    pub fn from_community(community: &Community) -> Self {
        Self::new(&community.author, community.d_identifier.clone())
    }

    /// Parses a coordinate string.
    ///
    /// # Errors
    ///
    /// Returns [`CommunityError::MalformedCoordinate`] if the value does not
    /// start with `34550:` or does not split on `:` into exactly three parts.
    pub fn parse(value: &str) -> Result<Self> {
        if !value.starts_with(COMMUNITY_COORDINATE_PREFIX) {
            return Err(CommunityError::MalformedCoordinate(value.to_string()));
        }
        let parts: Vec<&str> = value.split(':').collect();
        match parts.as_slice() {
            [_, author, identifier] => Ok(Self {
                author: author.to_string(),
                identifier: identifier.to_string(),
            }),
            _ => Err(CommunityError::MalformedCoordinate(value.to_string())),
        }
    }

    /// First `a` tag value that points at a community definition.
    pub fn extract(tags: &Tags) -> Option<&str> {
        tags::find_all(tags, "a")
            .filter_map(|tag| tags::field(tag, 1))
            .find(|value| value.starts_with(COMMUNITY_COORDINATE_PREFIX))
    }

    /// Decodes the author part into a public key.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_hex(&self.author)
            .map_err(|e| CommunityError::MalformedPubKey(format!("{}: {}", self.author, e)))
    }

    /// Whether this coordinate addresses `community`.
    pub fn matches(&self, community: &Community) -> bool {
        self.identifier == community.d_identifier && self.author == community.author.to_hex()
    }
}

impl fmt::Display for CommunityCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            COMMUNITY_DEFINITION_KIND, self.author, self.identifier
        )
    }
}

/// Whether `event` carries an `a` tag pointing at a community.
pub fn is_community_post(event: &Event) -> bool {
    CommunityCoordinate::extract(&event.tags).is_some()
}

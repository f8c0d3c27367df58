//! Moderator approvals (kind 4550).

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::POST_APPROVAL_KIND;
use super::coordinate::CommunityCoordinate;
use super::definition::Community;
use super::types::{ParseWarning, Parsed};
use crate::config::{ParseConfig, Tolerance};
use crate::error::{CommunityError, Result};
use crate::tags;

/// A moderator's attestation that a post belongs in a community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub event: Event,

    /// Community named by the approval's `a` tag
    pub coordinate: CommunityCoordinate,

    /// Id of the approved post (first `e` tag)
    pub post_id: Option<String>,

    /// Kind of the approved post (first `k` tag)
    pub post_kind: Option<Kind>,

    /// Full copy of the approved post, decoded from the content
    pub post_event: Option<Event>,
}

impl Approval {
    /// Parses an approval event with the default (lenient) policy.
    ///
    /// # Errors
    ///
    /// - [`CommunityError::WrongKind`] if the event is not a kind 4550 event.
    /// - [`CommunityError::MissingRequiredTag`] if no `a` tag starts with `34550:`.
    /// - [`CommunityError::MalformedCoordinate`] if that tag is not
    ///   `34550:<author>:<identifier>`.
    pub fn parse(event: &Event) -> Result<Self> {
        Self::parse_with(event, &ParseConfig::default()).map(Parsed::into_record)
    }

    /// Parses an approval event, recording a warning when the embedded post
    /// cannot be decoded.
    ///
    /// The embedded post is only deserialized, its signature is not checked.
    pub fn parse_with(event: &Event, config: &ParseConfig) -> Result<Parsed<Self>> {
        CommunityError::ensure_kind(POST_APPROVAL_KIND, event.kind.as_u16())?;

        let coordinate_value = CommunityCoordinate::extract(&event.tags)
            .ok_or(CommunityError::MissingRequiredTag("a"))?;
        let coordinate = CommunityCoordinate::parse(coordinate_value)?;

        let mut warnings = Vec::new();
        let post_event = if event.content.is_empty() {
            None
        } else {
            match serde_json::from_str::<Event>(&event.content) {
                Ok(post) => Some(post),
                Err(e) => match config.embedded_event {
                    Tolerance::Strict => {
                        return Err(CommunityError::MalformedEmbeddedEvent(e.to_string()));
                    }
                    Tolerance::Lenient => {
                        tracing::warn!(
                            target: "nostr_communities::communities::approval::parse_with",
                            "Ignoring undecodable post in approval {}: {}",
                            event.id,
                            e
                        );
                        warnings.push(ParseWarning::MalformedEmbeddedEvent {
                            reason: e.to_string(),
                        });
                        None
                    }
                },
            }
        };

        let approval = Self {
            event: event.clone(),
            coordinate,
            post_id: tags::first_value(&event.tags, "e").map(str::to_string),
            post_kind: tags::first_kind(&event.tags, "k"),
            post_event,
        };

        if config.enable_debug_logging {
            tracing::debug!(
                target: "nostr_communities::communities::approval::parse_with",
                "Parsed approval {} for community {} (post {:?})",
                event.id,
                approval.coordinate,
                approval.post_id
            );
        }

        Ok(Parsed::new(approval, warnings))
    }

    /// Builds an approval of `post_event`. The content embeds the full signed
    /// post so it can be checked without fetching it again.
    pub fn event_builder(community: &Community, post_event: &Event) -> EventBuilder {
        let approval_tags = vec![
            tags::tag("a", [community.coordinate().to_string()]),
            tags::tag("e", [post_event.id.to_hex()]),
            tags::tag("p", [post_event.pubkey.to_hex()]),
            tags::tag("k", [post_event.kind.as_u16().to_string()]),
        ];
        EventBuilder::new(Kind::from(POST_APPROVAL_KIND), post_event.as_json())
            .tags(approval_tags)
            .allow_self_tagging()
    }

    pub fn build(moderator: PublicKey, community: &Community, post_event: &Event) -> UnsignedEvent {
        Self::event_builder(community, post_event).build(moderator)
    }

    /// Whether this approval names `post` by id.
    pub fn approves(&self, post: &Event) -> bool {
        self.post_id.as_deref() == Some(post.id.to_hex().as_str())
    }

    /// Whether the approval targets `community` and was issued by one of its
    /// moderators.
    pub fn is_issued_by_moderator(&self, community: &Community) -> bool {
        self.coordinate.matches(community) && community.is_moderator(&self.event.pubkey)
    }
}

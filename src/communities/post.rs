//! Community posts (NIP-22 comments scoped to a community).
//!
//! Every post carries two scopes of tags. Uppercase `A`/`P`/`K` always point at
//! the community root. Lowercase tags point at the immediate parent: the
//! community itself for a top-level post (`a`/`p`/`k`), or the replied-to post
//! for a nested reply (`e`/`p`/`k`).

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::{COMMENT_KIND, COMMUNITY_DEFINITION_KIND};
use super::definition::Community;
use crate::error::{CommunityError, Result};
use crate::tags;

/// The post a nested reply answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostParent {
    pub id: String,
    pub kind: Kind,
}

impl PostParent {
    pub fn new(id: impl Into<String>, kind: Kind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Self::new(event.id.to_hex(), event.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub event: Event,

    /// The community supplied by the caller at parse time
    pub community: Community,

    /// First `e` tag, only present on nested replies
    pub parent_id: Option<String>,

    /// First `k` tag as a kind, `None` if absent or not an integer
    pub parent_kind: Option<Kind>,
}

impl CommunityPost {
    /// Parses a kind 1111 event as a post in `community`.
    ///
    /// The community is taken as given: the event's own `A` tag is not compared
    /// against it. Use [`CommunityPost::references_community`] for that check.
    pub fn parse(event: &Event, community: &Community) -> Result<Self> {
        CommunityError::ensure_kind(COMMENT_KIND, event.kind.as_u16())?;

        Ok(Self {
            event: event.clone(),
            community: community.clone(),
            parent_id: tags::first_value(&event.tags, "e").map(str::to_string),
            parent_kind: tags::first_kind(&event.tags, "k"),
        })
    }

    /// Builds a post event. A `None` parent, or one with an empty id, makes a
    /// top-level post.
    pub fn event_builder(
        author: PublicKey,
        community: &Community,
        content: &str,
        parent: Option<&PostParent>,
    ) -> EventBuilder {
        let coordinate = community.coordinate().to_string();
        let community_author = community.author.to_hex();
        let definition_kind = COMMUNITY_DEFINITION_KIND.to_string();

        let mut post_tags = vec![
            tags::tag("A", [coordinate.as_str()]),
            tags::tag("P", [community_author.as_str()]),
            tags::tag("K", [definition_kind.as_str()]),
        ];

        match parent.filter(|parent| !parent.id.is_empty()) {
            None => {
                post_tags.push(tags::tag("a", [coordinate.as_str()]));
                post_tags.push(tags::tag("p", [community_author.as_str()]));
                post_tags.push(tags::tag("k", [definition_kind.as_str()]));
            }
            Some(parent) => {
                // The parent's author is not known here, so `p` names the poster
                post_tags.push(tags::tag("e", [parent.id.as_str()]));
                post_tags.push(tags::tag("p", [author.to_hex()]));
                post_tags.push(tags::tag("k", [parent.kind.as_u16().to_string()]));
            }
        }

        // Both scopes may name the poster in `p`, which must survive building
        EventBuilder::new(Kind::from(COMMENT_KIND), content)
            .tags(post_tags)
            .allow_self_tagging()
    }

    pub fn build(
        author: PublicKey,
        community: &Community,
        content: &str,
        parent: Option<&PostParent>,
    ) -> UnsignedEvent {
        Self::event_builder(author, community, content, parent).build(author)
    }

    /// Value of the root-scope `A` tag.
    pub fn root_coordinate(&self) -> Option<&str> {
        tags::first_value(&self.event.tags, "A")
    }

    /// Whether the event's `A` tag addresses the community it was parsed with.
    pub fn references_community(&self) -> bool {
        self.root_coordinate() == Some(self.community.coordinate().to_string().as_str())
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

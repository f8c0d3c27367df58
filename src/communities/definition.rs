//! Community definitions (kind 34550).

use std::collections::BTreeMap;

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::{COMMUNITY_DEFINITION_KIND, MODERATOR_MARKER};
use super::coordinate::CommunityCoordinate;
use super::types::{ParseWarning, Parsed};
use crate::config::{ParseConfig, Tolerance};
use crate::error::{CommunityError, Result};
use crate::tags;

/// A moderated topical community as defined by NIP-72.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Key of the identity controlling the community
    pub author: PublicKey,

    /// Identifier unique per author, never empty
    pub d_identifier: String,

    /// Display name (empty if not set)
    pub name: String,

    /// Description (empty if not set)
    pub description: String,

    /// Image URL (empty if not set)
    pub image: String,

    /// Image dimensions such as `200x200`, only set together with `image`
    pub image_size: String,

    /// Moderators listed with the `moderator` marker
    pub moderators: Vec<PublicKey>,

    /// Relay URLs grouped by marker. Unmarked relays live under `""`
    pub relays: BTreeMap<String, Vec<String>>,

    /// Every tag of the source event, verbatim
    pub raw_tags: Tags,
}

impl Community {
    /// Parses a community definition event with the default (lenient) policy.
    ///
    /// # Errors
    ///
    /// - [`CommunityError::WrongKind`] if the event is not a kind 34550 event.
    /// - [`CommunityError::MissingRequiredTag`] if there is no non-empty `d` tag.
    pub fn parse(event: &Event) -> Result<Self> {
        Self::parse_with(event, &ParseConfig::default()).map(Parsed::into_record)
    }

    /// Parses a community definition event, collecting a warning for every
    /// moderator tag that had to be dropped.
    ///
    /// With [`Tolerance::Strict`] moderator keys, an undecodable key fails the
    /// parse with [`CommunityError::MalformedPubKey`] instead.
    pub fn parse_with(event: &Event, config: &ParseConfig) -> Result<Parsed<Self>> {
        CommunityError::ensure_kind(COMMUNITY_DEFINITION_KIND, event.kind.as_u16())?;

        let d_identifier = match tags::first_value(&event.tags, "d") {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => return Err(CommunityError::MissingRequiredTag("d")),
        };

        let mut warnings = Vec::new();
        let mut moderators = Vec::new();
        for tag in tags::find_all(&event.tags, "p") {
            if tags::field(tag, 3) != Some(MODERATOR_MARKER) {
                continue;
            }
            let value = tags::field(tag, 1).unwrap_or_default();
            match PublicKey::from_hex(value) {
                Ok(pubkey) => moderators.push(pubkey),
                Err(e) => match config.moderator_keys {
                    Tolerance::Strict => {
                        return Err(CommunityError::MalformedPubKey(format!("{}: {}", value, e)));
                    }
                    Tolerance::Lenient => {
                        tracing::warn!(
                            target: "nostr_communities::communities::definition::parse_with",
                            "Skipping moderator tag with invalid key {:?} in community {}: {}",
                            value,
                            d_identifier,
                            e
                        );
                        warnings.push(ParseWarning::MalformedModeratorKey {
                            value: value.to_string(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        let mut relays: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for tag in tags::find_all(&event.tags, "relay") {
            if let Some(url) = tags::field(tag, 1) {
                let marker = tags::field(tag, 2).unwrap_or_default();
                relays
                    .entry(marker.to_string())
                    .or_default()
                    .push(url.to_string());
            }
        }

        let (image, image_size) = tags::find_all(&event.tags, "image")
            .find_map(|tag| {
                tags::field(tag, 1).map(|url| {
                    (
                        url.to_string(),
                        tags::field(tag, 2).unwrap_or_default().to_string(),
                    )
                })
            })
            .unwrap_or_default();

        let community = Self {
            author: event.pubkey,
            name: tags::first_value(&event.tags, "name")
                .unwrap_or_default()
                .to_string(),
            description: tags::first_value(&event.tags, "description")
                .unwrap_or_default()
                .to_string(),
            d_identifier,
            image,
            image_size,
            moderators,
            relays,
            raw_tags: event.tags.clone(),
        };

        if config.enable_debug_logging {
            tracing::debug!(
                target: "nostr_communities::communities::definition::parse_with",
                "Parsed community {} with {} moderator(s) and {} warning(s)",
                community.coordinate(),
                community.moderators.len(),
                warnings.len()
            );
        }

        Ok(Parsed::new(community, warnings))
    }

    pub fn coordinate(&self) -> CommunityCoordinate {
        CommunityCoordinate::from_community(self)
    }

    pub fn is_moderator(&self, pubkey: &PublicKey) -> bool {
        self.moderators.contains(pubkey)
    }

    /// Relay URLs for a marker such as `author`, `requests` or `approvals`.
    pub fn relays_for(&self, marker: &str) -> &[String] {
        self.relays.get(marker).map(Vec::as_slice).unwrap_or_default()
    }

    /// A builder holding this record's fields.
    pub fn to_builder(&self) -> CommunityBuilder {
        CommunityBuilder {
            d_identifier: self.d_identifier.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            image_size: self.image_size.clone(),
            moderators: self.moderators.clone(),
            relays: self.relays.clone(),
            custom_created_at: None,
        }
    }

    /// Rebuilds the definition event from this record.
    ///
    /// Tags the record does not model (anything other than `d`, `name`,
    /// `description`, `image`, `relay` and moderator `p` tags) are copied from
    /// `raw_tags` after the generated ones, in their original order.
    pub fn to_event_builder(&self) -> EventBuilder {
        let extensions: Vec<Tag> = self
            .raw_tags
            .iter()
            .filter(|tag| !is_modeled_tag(tag))
            .cloned()
            .collect();
        let mut tags = self.to_builder().tags();
        tags.extend(extensions);
        EventBuilder::new(Kind::from(COMMUNITY_DEFINITION_KIND), "")
            .tags(tags)
            .allow_self_tagging()
    }
}

fn is_modeled_tag(tag: &Tag) -> bool {
    match tags::field(tag, 0) {
        Some("d" | "name" | "description" | "image" | "relay") => true,
        Some("p") => tags::field(tag, 3) == Some(MODERATOR_MARKER),
        _ => false,
    }
}

/// Builds an unsigned community definition event.
///
/// ```rust,ignore
/// let unsigned = CommunityBuilder::new("photography")
///     .name("Photo Club")
///     .moderator(moderator_pubkey)
///     .relay("wss://r1.example", "author")
///     .build(author_pubkey);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityBuilder {
    d_identifier: String,
    name: String,
    description: String,
    image: String,
    image_size: String,
    moderators: Vec<PublicKey>,
    relays: BTreeMap<String, Vec<String>>,
    custom_created_at: Option<Timestamp>,
}

impl CommunityBuilder {
    pub fn new(d_identifier: impl Into<String>) -> Self {
        Self {
            d_identifier: d_identifier.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image. An empty `size` leaves the dimensions out.
    pub fn image(mut self, url: impl Into<String>, size: impl Into<String>) -> Self {
        self.image = url.into();
        self.image_size = size.into();
        self
    }

    pub fn moderator(mut self, pubkey: PublicKey) -> Self {
        self.moderators.push(pubkey);
        self
    }

    pub fn moderators<I>(mut self, pubkeys: I) -> Self
    where
        I: IntoIterator<Item = PublicKey>,
    {
        self.moderators.extend(pubkeys);
        self
    }

    /// Adds a relay under `marker`. Use an empty marker for an unmarked relay.
    pub fn relay(mut self, url: impl Into<String>, marker: impl Into<String>) -> Self {
        self.relays.entry(marker.into()).or_default().push(url.into());
        self
    }

    pub fn relays(mut self, relays: BTreeMap<String, Vec<String>>) -> Self {
        for (marker, urls) in relays {
            self.relays.entry(marker).or_default().extend(urls);
        }
        self
    }

    /// Overrides the creation time, which defaults to now.
    pub fn custom_created_at(mut self, created_at: Timestamp) -> Self {
        self.custom_created_at = Some(created_at);
        self
    }

    /// The definition tags in wire order.
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags = vec![tags::tag("d", [self.d_identifier.as_str()])];
        if !self.name.is_empty() {
            tags.push(tags::tag("name", [self.name.as_str()]));
        }
        if !self.description.is_empty() {
            tags.push(tags::tag("description", [self.description.as_str()]));
        }
        if !self.image.is_empty() {
            if self.image_size.is_empty() {
                tags.push(tags::tag("image", [self.image.as_str()]));
            } else {
                tags.push(tags::tag(
                    "image",
                    [self.image.as_str(), self.image_size.as_str()],
                ));
            }
        }
        for moderator in &self.moderators {
            tags.push(tags::tag(
                "p",
                [moderator.to_hex(), String::new(), MODERATOR_MARKER.to_string()],
            ));
        }
        for (marker, urls) in &self.relays {
            for url in urls {
                if marker.is_empty() {
                    tags.push(tags::tag("relay", [url.as_str()]));
                } else {
                    tags.push(tags::tag("relay", [url.as_str(), marker.as_str()]));
                }
            }
        }
        tags
    }

    /// Owners commonly moderate their own community, so `p` tags naming the
    /// author are kept.
    pub fn event_builder(&self) -> EventBuilder {
        let builder = EventBuilder::new(Kind::from(COMMUNITY_DEFINITION_KIND), "")
            .tags(self.tags())
            .allow_self_tagging();
        match self.custom_created_at {
            Some(created_at) => builder.custom_created_at(created_at),
            None => builder,
        }
    }

    /// Produces the unsigned event for `author` to sign.
    pub fn build(&self, author: PublicKey) -> UnsignedEvent {
        self.event_builder().build(author)
    }
}

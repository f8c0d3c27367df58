//! Helpers for scanning an event's tag list.
//!
//! Tags are variable-length string arrays whose first element is the tag name.
//! Every lookup here is first-match by list order, and a tag that is too short
//! for the requested field is treated as not matching instead of failing.

use nostr_sdk::prelude::*;

/// Returns the first tag named `name`.
pub fn find<'a>(tags: &'a Tags, name: &str) -> Option<&'a Tag> {
    tags.iter().find(|tag| is_named(tag, name))
}

/// Returns every tag named `name`, in list order.
pub fn find_all<'a>(tags: &'a Tags, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
    tags.iter().filter(move |tag| is_named(tag, name))
}

/// Positional field of a tag. Index 0 is the tag name.
pub fn field(tag: &Tag, index: usize) -> Option<&str> {
    tag.as_slice().get(index).map(String::as_str)
}

/// Value of the first `name` tag that carries a value at position 1.
pub fn first_value<'a>(tags: &'a Tags, name: &'a str) -> Option<&'a str> {
    find_all(tags, name).find_map(|tag| field(tag, 1))
}

/// First value of a `name` tag parsed as an event kind.
///
/// Returns `None` when there is no such tag or its value is not an integer.
/// Kinds are 16-bit on the wire, so values outside `0..=65535` (for example
/// `"70000"`) also yield `None`.
pub fn first_kind(tags: &Tags, name: &str) -> Option<Kind> {
    first_value(tags, name)
        .and_then(|value| value.parse::<u16>().ok())
        .map(Kind::from)
}

/// Builds a tag from a name and its positional values.
pub fn tag<I, S>(name: &str, values: I) -> Tag
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Tag::custom(TagKind::Custom(name.to_string().into()), values)
}

fn is_named(tag: &Tag, name: &str) -> bool {
    field(tag, 0) == Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tags() -> Tags {
        let mut tags = Tags::new();
        tags.push(Tag::parse(vec!["name", "First"]).unwrap());
        tags.push(Tag::parse(vec!["relay", "wss://a.example"]).unwrap());
        tags.push(Tag::parse(vec!["name", "Second"]).unwrap());
        tags.push(Tag::parse(vec!["relay", "wss://b.example", "author"]).unwrap());
        tags.push(Tag::parse(vec!["k"]).unwrap());
        tags.push(Tag::parse(vec!["k", "1111"]).unwrap());
        tags
    }

    #[test]
    fn test_find_first_wins() {
        let tags = sample_tags();
        let tag = find(&tags, "name").unwrap();
        assert_eq!(field(tag, 1), Some("First"));
        assert!(find(&tags, "missing").is_none());
    }

    #[test]
    fn test_find_all_preserves_order() {
        let tags = sample_tags();
        let relays: Vec<&str> = find_all(&tags, "relay")
            .filter_map(|tag| field(tag, 1))
            .collect();
        assert_eq!(relays, vec!["wss://a.example", "wss://b.example"]);
    }

    #[test]
    fn test_field_out_of_range() {
        let tag = Tag::parse(vec!["image", "https://img.example/a.png"]).unwrap();
        assert_eq!(field(&tag, 0), Some("image"));
        assert_eq!(field(&tag, 2), None);
        assert_eq!(field(&tag, 10), None);
    }

    #[test]
    fn test_first_value_skips_short_tags() {
        let tags = sample_tags();
        // The bare `["k"]` tag comes first but has no value
        assert_eq!(first_value(&tags, "k"), Some("1111"));
        assert_eq!(first_kind(&tags, "k"), Some(Kind::from(1111)));
    }

    #[test]
    fn test_first_kind_unparsable() {
        let mut tags = Tags::new();
        tags.push(Tag::parse(vec!["k", "not-a-number"]).unwrap());
        assert_eq!(first_kind(&tags, "k"), None);
        assert_eq!(first_kind(&Tags::new(), "k"), None);
    }

    #[test]
    fn test_first_kind_out_of_range() {
        let mut tags = Tags::new();
        tags.push(Tag::parse(vec!["k", "70000"]).unwrap());
        assert_eq!(first_kind(&tags, "k"), None);

        let mut tags = Tags::new();
        tags.push(Tag::parse(vec!["k", "65535"]).unwrap());
        assert_eq!(first_kind(&tags, "k"), Some(Kind::from(u16::MAX)));
    }

    #[test]
    fn test_tag_builder() {
        let built = tag("p", ["abcd", "", "moderator"]);
        assert_eq!(built.as_slice(), &["p", "abcd", "", "moderator"]);

        let upper = tag("A", ["34550:abcd:news"]);
        assert_eq!(field(&upper, 0), Some("A"));
        assert_eq!(field(&upper, 1), Some("34550:abcd:news"));
    }
}

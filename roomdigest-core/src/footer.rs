use crate::error::{DigestError, Result};
use crate::phrase::{Segment, lookup_locale, parse_segments, render_segments, supported_tags};

pub const DEFAULT_LOCALE: &str = "en";

const LOCALE_FOOTERS: &[(&str, &str)] = &[
    ("en", "See {room_title} at {link}"),
    ("fr", "Voir {room_title} à {link}"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RoomTitle,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterTemplate {
    pattern: String,
    segments: Vec<Segment<Field>>,
}

impl FooterTemplate {
    pub fn parse(pattern: &str) -> Result<Self> {
        let segments = parse_segments(pattern, |name| match name {
            "room_title" => Some(Field::RoomTitle),
            "link" => Some(Field::Link),
            _ => None,
        })
        .map_err(|name| {
            DigestError::InvalidFooterTemplate(format!(
                "unknown placeholder {{{name}}} in {pattern:?}"
            ))
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    pub fn for_locale(locale: &str) -> Result<Self> {
        let pattern =
            lookup_locale(LOCALE_FOOTERS, locale).ok_or_else(|| DigestError::UnknownLocale {
                locale: locale.to_string(),
                supported: supported_tags(LOCALE_FOOTERS),
            })?;
        Self::parse(pattern)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn render(&self, room_title: &str, link: &str) -> String {
        render_segments(&self.segments, |field| match field {
            Field::RoomTitle => room_title,
            Field::Link => link,
        })
    }
}

impl Default for FooterTemplate {
    fn default() -> Self {
        Self {
            pattern: "See {room_title} at {link}".to_string(),
            segments: vec![
                Segment::Literal("See ".to_string()),
                Segment::Placeholder(Field::RoomTitle),
                Segment::Literal(" at ".to_string()),
                Segment::Placeholder(Field::Link),
            ],
        }
    }
}

use crate::error::{DigestError, Result};
use crate::model::Message;
use crate::phrase::{Segment, lookup_locale, parse_segments, render_segments, supported_tags};

pub const DEFAULT_APP_NAME: &str = "Matrix";

struct SubjectPhrases {
    message_from_person_in_room: &'static str,
    message_from_person: &'static str,
    messages_from_person: &'static str,
    messages_in_room: &'static str,
    and_word: &'static str,
    others_word: &'static str,
}

const LOCALE_SUBJECTS: &[(&str, SubjectPhrases)] = &[
    (
        "en",
        SubjectPhrases {
            message_from_person_in_room: "[{app}] You have a message on {app} from {person} in the {room} room...",
            message_from_person: "[{app}] You have a message on {app} from {person}...",
            messages_from_person: "[{app}] You have messages on {app} from {person}...",
            messages_in_room: "[{app}] You have messages on {app} in the {room} room...",
            and_word: "and",
            others_word: "others",
        },
    ),
    (
        "fr",
        SubjectPhrases {
            message_from_person_in_room: "[{app}] Vous avez un message sur {app} de {person} dans le salon {room}...",
            message_from_person: "[{app}] Vous avez un message sur {app} de {person}...",
            messages_from_person: "[{app}] Vous avez des messages sur {app} de {person}...",
            messages_in_room: "[{app}] Vous avez des messages sur {app} dans le salon {room}...",
            and_word: "et",
            others_word: "autres",
        },
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    App,
    Person,
    Room,
}

type Phrase = Vec<Segment<Field>>;

// Notification title for one room's batch. Rooms without a title are
// described by who wrote, never as "the Bob room".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTemplates {
    message_from_person_in_room: Phrase,
    message_from_person: Phrase,
    messages_from_person: Phrase,
    messages_in_room: Phrase,
    and_word: String,
    others_word: String,
}

impl SubjectTemplates {
    pub fn for_locale(locale: &str) -> Result<Self> {
        let phrases =
            lookup_locale(LOCALE_SUBJECTS, locale).ok_or_else(|| DigestError::UnknownLocale {
                locale: locale.to_string(),
                supported: supported_tags(LOCALE_SUBJECTS),
            })?;

        Ok(Self {
            message_from_person_in_room: parse_phrase(phrases.message_from_person_in_room)?,
            message_from_person: parse_phrase(phrases.message_from_person)?,
            messages_from_person: parse_phrase(phrases.messages_from_person)?,
            messages_in_room: parse_phrase(phrases.messages_in_room)?,
            and_word: phrases.and_word.to_string(),
            others_word: phrases.others_word.to_string(),
        })
    }

    pub fn subject(&self, app_name: &str, room_title: &str, messages: &[Message]) -> Option<String> {
        let room = room_title.trim();
        let phrase = match (messages, room.is_empty()) {
            ([], _) => return None,
            ([_], false) => &self.message_from_person_in_room,
            ([_], true) => &self.message_from_person,
            (_, false) => &self.messages_in_room,
            (_, true) => &self.messages_from_person,
        };
        let person = self.describe_senders(messages);

        Some(render_segments(phrase, |field| match field {
            Field::App => app_name,
            Field::Person => person.as_str(),
            Field::Room => room,
        }))
    }

    // "Ann", "Ann and Bo", "Ann and 2 others"; distinct senders in order of
    // first appearance.
    fn describe_senders(&self, messages: &[Message]) -> String {
        let mut senders: Vec<&str> = Vec::new();
        for message in messages {
            if !senders.contains(&message.sender_name.as_str()) {
                senders.push(&message.sender_name);
            }
        }

        match senders.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [first, second] => format!("{first} {} {second}", self.and_word),
            [first, rest @ ..] => {
                format!("{first} {} {} {}", self.and_word, rest.len(), self.others_word)
            }
        }
    }
}

impl Default for SubjectTemplates {
    fn default() -> Self {
        let phrases = &LOCALE_SUBJECTS[0].1;
        let phrase = |pattern: &str| parse_phrase(pattern).unwrap_or_default();
        Self {
            message_from_person_in_room: phrase(phrases.message_from_person_in_room),
            message_from_person: phrase(phrases.message_from_person),
            messages_from_person: phrase(phrases.messages_from_person),
            messages_in_room: phrase(phrases.messages_in_room),
            and_word: phrases.and_word.to_string(),
            others_word: phrases.others_word.to_string(),
        }
    }
}

fn parse_phrase(pattern: &str) -> Result<Phrase> {
    parse_segments(pattern, |name| match name {
        "app" => Some(Field::App),
        "person" => Some(Field::Person),
        "room" => Some(Field::Room),
        _ => None,
    })
    .map_err(|name| {
        DigestError::InvalidSubjectTemplate(format!("unknown placeholder {{{name}}} in {pattern:?}"))
    })
}

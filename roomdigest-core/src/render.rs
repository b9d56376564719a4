use log::debug;

use crate::model::{Message, MessageKind, RenderedFragment};
use crate::time::{DEFAULT_TIME_PATTERN, TimeFormatter};

const EMOTE_MARKER: &str = "* ";

#[derive(Debug, Clone)]
pub struct MessageRenderer<F> {
    formatter: F,
    time_pattern: String,
}

impl<F: TimeFormatter> MessageRenderer<F> {
    pub fn new(formatter: F) -> Self {
        Self {
            formatter,
            time_pattern: DEFAULT_TIME_PATTERN.to_string(),
        }
    }

    #[must_use]
    pub fn with_time_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.time_pattern = pattern.into();
        self
    }

    pub fn render(&self, message: &Message) -> RenderedFragment {
        RenderedFragment {
            header: self.render_header(message),
            body: render_body(message),
        }
    }

    fn render_header(&self, message: &Message) -> String {
        let time = self
            .formatter
            .format_ts(message.timestamp, &self.time_pattern);
        let marker = if message.kind == MessageKind::Emote {
            EMOTE_MARKER
        } else {
            ""
        };
        format!("{marker}{} ({time})", message.sender_name)
    }
}

fn render_body(message: &Message) -> Option<String> {
    match &message.kind {
        MessageKind::Text => Some(render_text_body(message)),
        MessageKind::Emote => Some(render_emote_body(message)),
        MessageKind::Notice => Some(render_notice_body(message)),
        MessageKind::Image => Some(render_image_body(message)),
        MessageKind::File => Some(render_file_body(message)),
        MessageKind::Unknown(tag) => {
            debug!("no body rule for message kind {tag:?}; rendering header only");
            None
        }
    }
}

fn render_text_body(message: &Message) -> String {
    message.body_text_plain.clone()
}

fn render_emote_body(message: &Message) -> String {
    message.body_text_plain.clone()
}

fn render_notice_body(message: &Message) -> String {
    message.body_text_plain.clone()
}

// Caption, or the filename the sending client put in the body.
fn render_image_body(message: &Message) -> String {
    message.body_text_plain.clone()
}

fn render_file_body(message: &Message) -> String {
    message.body_text_plain.clone()
}

use log::debug;

use crate::error::{DigestError, Result};
use crate::footer::FooterTemplate;
use crate::model::{DigestView, Message, NotificationPayload, RenderedFragment};
use crate::render::MessageRenderer;
use crate::subject::{DEFAULT_APP_NAME, SubjectTemplates};
use crate::time::TimeFormatter;

#[derive(Debug, Clone)]
pub struct DigestComposer<F> {
    renderer: MessageRenderer<F>,
    footer: FooterTemplate,
    subjects: SubjectTemplates,
    app_name: String,
}

impl<F: TimeFormatter> DigestComposer<F> {
    pub fn new(renderer: MessageRenderer<F>, footer: FooterTemplate) -> Self {
        Self {
            renderer,
            footer,
            subjects: SubjectTemplates::default(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_subjects(mut self, subjects: SubjectTemplates, app_name: impl Into<String>) -> Self {
        self.subjects = subjects;
        self.app_name = app_name.into();
        self
    }

    // Message lines in payload order, a blank line, then the footer. A batch
    // with no messages yields the footer line alone.
    pub fn compose(&self, payload: &NotificationPayload) -> Result<String> {
        let messages = require_messages(payload)?;
        debug!(
            "composing digest for room {:?} with {} message(s)",
            payload.room.title,
            messages.len()
        );

        let fragments = messages.iter().map(|message| self.renderer.render(message));
        Ok(assemble(fragments, &self.footer_line(payload)))
    }

    // None for an empty batch.
    pub fn subject(&self, payload: &NotificationPayload) -> Result<Option<String>> {
        let messages = require_messages(payload)?;
        Ok(self
            .subjects
            .subject(&self.app_name, &payload.room.title, messages))
    }

    pub fn view(&self, payload: &NotificationPayload) -> Result<DigestView> {
        let messages = require_messages(payload)?;
        let fragments = messages
            .iter()
            .map(|message| self.renderer.render(message))
            .collect::<Vec<_>>();
        let footer = self.footer_line(payload);
        let digest = assemble(fragments.iter().cloned(), &footer);

        Ok(DigestView {
            room_title: payload.room.title.clone(),
            link: payload.link.clone(),
            subject: self
                .subjects
                .subject(&self.app_name, &payload.room.title, messages),
            fragments,
            footer,
            digest,
        })
    }

    fn footer_line(&self, payload: &NotificationPayload) -> String {
        self.footer.render(&payload.room.title, &payload.link)
    }
}

fn require_messages(payload: &NotificationPayload) -> Result<&[Message]> {
    payload.messages.as_deref().ok_or_else(|| {
        DigestError::InvalidPayload(format!(
            "messages missing for room {:?}",
            payload.room.title
        ))
    })
}

fn assemble(fragments: impl Iterator<Item = RenderedFragment>, footer: &str) -> String {
    let mut output = String::new();
    for fragment in fragments {
        for line in fragment.lines() {
            output.push_str(line);
            output.push('\n');
        }
    }

    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(footer);
    output
}

pub fn digest_view_to_raw_json(view: &DigestView) -> Result<String> {
    serde_json::to_string_pretty(view)
        .map(|json| format!("{json}\n"))
        .map_err(|err| DigestError::Serialization(err.to_string()))
}

use crate::error::{DigestError, Result};
use crate::model::NotificationPayload;

const MATRIX_TO_BASE: &str = "https://matrix.to/#";
const VECTOR_ROOM_BASE: &str = "https://vector.im/beta/#/room";
const VECTOR_APP_NAME: &str = "Vector";

// A configured web client wins; otherwise the `Vector` app gets its own
// universal-link host and everyone else gets `matrix.to`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomLinks {
    pub web_client_base_url: Option<String>,
    pub app_name: Option<String>,
}

impl RoomLinks {
    pub fn room_link(&self, room_id: &str) -> String {
        format!("{}/{room_id}", self.room_base())
    }

    pub fn fill_payload_link(&self, payload: &mut NotificationPayload) -> Result<()> {
        if !payload.link.is_empty() {
            return Ok(());
        }

        let room_id = payload
            .room_id
            .as_deref()
            .filter(|room_id| !room_id.is_empty())
            .ok_or_else(|| {
                DigestError::InvalidPayload(format!(
                    "room {:?} has neither link nor room_id",
                    payload.room.title
                ))
            })?;
        payload.link = self.room_link(room_id);
        Ok(())
    }

    fn room_base(&self) -> String {
        if let Some(base_url) = self
            .web_client_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
        {
            return format!("{}/#/room", base_url.trim_end_matches('/'));
        }
        if self.app_name.as_deref() == Some(VECTOR_APP_NAME) {
            return VECTOR_ROOM_BASE.to_string();
        }
        MATRIX_TO_BASE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::RoomLinks;
    use crate::error::DigestError;
    use crate::model::{NotificationPayload, RoomInfo};

    const ROOM_ID: &str = "!abc:example.org";

    fn payload(link: &str, room_id: Option<&str>) -> NotificationPayload {
        NotificationPayload {
            room: RoomInfo {
                title: "Ops".to_string(),
            },
            link: link.to_string(),
            room_id: room_id.map(str::to_string),
            messages: Some(Vec::new()),
        }
    }

    #[test]
    fn defaults_to_matrix_to() {
        let links = RoomLinks::default();
        assert_eq!(links.room_link(ROOM_ID), "https://matrix.to/#/!abc:example.org");
    }

    #[test]
    fn vector_app_uses_beta_host() {
        let links = RoomLinks {
            web_client_base_url: None,
            app_name: Some("Vector".to_string()),
        };
        assert_eq!(
            links.room_link(ROOM_ID),
            "https://vector.im/beta/#/room/!abc:example.org"
        );
    }

    #[test]
    fn web_client_overrides_app_name() {
        let links = RoomLinks {
            web_client_base_url: Some("https://chat.example.org/".to_string()),
            app_name: Some("Vector".to_string()),
        };
        assert_eq!(
            links.room_link(ROOM_ID),
            "https://chat.example.org/#/room/!abc:example.org"
        );
    }

    #[test]
    fn fills_missing_link_from_room_id() {
        let mut derived = payload("", Some(ROOM_ID));
        RoomLinks::default()
            .fill_payload_link(&mut derived)
            .expect("fill");
        assert_eq!(derived.link, "https://matrix.to/#/!abc:example.org");

        let mut explicit = payload("https://x/r/1", Some(ROOM_ID));
        RoomLinks::default()
            .fill_payload_link(&mut explicit)
            .expect("fill");
        assert_eq!(explicit.link, "https://x/r/1");
    }

    #[test]
    fn missing_link_and_room_id_is_invalid() {
        let mut bare = payload("", None);
        let err = RoomLinks::default()
            .fill_payload_link(&mut bare)
            .expect_err("must fail");
        assert!(matches!(err, DigestError::InvalidPayload(_)));
    }
}

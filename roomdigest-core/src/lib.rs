pub mod config;
pub mod digest;
pub mod error;
pub mod footer;
pub mod link;
pub mod model;
mod phrase;
pub mod render;
pub mod subject;
pub mod time;

pub use config::DigestConfig;
pub use digest::{DigestComposer, digest_view_to_raw_json};
pub use error::{DigestError, Result};
pub use footer::FooterTemplate;
pub use link::RoomLinks;
pub use model::{DigestView, Message, MessageKind, NotificationPayload, RenderedFragment, RoomInfo};
pub use render::MessageRenderer;
pub use subject::SubjectTemplates;
pub use time::{FixedOffsetClock, LocalClock, TimeFormatter, validate_time_pattern};

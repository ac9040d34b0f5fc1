//! Attachments: an uploaded file or a link, chosen once when the record is
//! created.
//!
//! Internally the two modes are separate variants of `AttachmentPayload`, so a
//! file attachment has no `url` to read and a link has no file bytes. On the
//! wire both share one flat shape (`category`, `fileName`, `fileData`, `url`)
//! with the unused mode's fields sent as empty strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::editor::fields::{flag, lenient_code_or_default, text};
use crate::editor::{FieldSet, RecordFactory};
use crate::models::{section_record, visible_by_default};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentCategory {
    #[default]
    File,
    Url,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentPayload {
    File {
        file_name: String,
        /// Base64 of the file's raw bytes.
        file_data: String,
    },
    Url {
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AttachmentWire", into = "AttachmentWire")]
pub struct Attachment {
    pub id: Option<i64>,
    pub priority: i32,
    pub is_visible: bool,
    payload: AttachmentPayload,
}

impl Attachment {
    pub fn file_record(priority: i32) -> Self {
        Self::create(priority, AttachmentCategory::File)
    }

    pub fn url_record(priority: i32) -> Self {
        Self::create(priority, AttachmentCategory::Url)
    }

    pub fn category(&self) -> AttachmentCategory {
        match self.payload {
            AttachmentPayload::File { .. } => AttachmentCategory::File,
            AttachmentPayload::Url { .. } => AttachmentCategory::Url,
        }
    }

    pub fn payload(&self) -> &AttachmentPayload {
        &self.payload
    }

    pub fn file_name(&self) -> Option<&str> {
        match &self.payload {
            AttachmentPayload::File { file_name, .. } => Some(file_name),
            AttachmentPayload::Url { .. } => None,
        }
    }

    pub fn file_data(&self) -> Option<&str> {
        match &self.payload {
            AttachmentPayload::File { file_data, .. } => Some(file_data),
            AttachmentPayload::Url { .. } => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            AttachmentPayload::Url { url } => Some(url),
            AttachmentPayload::File { .. } => None,
        }
    }

    /// Replaces the file payload. Returns `None` for URL attachments, whose
    /// mode cannot change.
    pub fn with_file(&self, file_name: String, file_data: String) -> Option<Self> {
        match self.payload {
            AttachmentPayload::File { .. } => Some(Self {
                payload: AttachmentPayload::File {
                    file_name,
                    file_data,
                },
                ..self.clone()
            }),
            AttachmentPayload::Url { .. } => None,
        }
    }
}

impl RecordFactory for Attachment {
    type Mode = AttachmentCategory;

    fn create(priority: i32, mode: AttachmentCategory) -> Self {
        let payload = match mode {
            AttachmentCategory::File => AttachmentPayload::File {
                file_name: String::new(),
                file_data: String::new(),
            },
            AttachmentCategory::Url => AttachmentPayload::Url { url: String::new() },
        };
        Self {
            id: None,
            priority,
            is_visible: true,
            payload,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttachmentField {
    IsVisible,
    FileName,
    FileData,
    Url,
}

impl FieldSet for Attachment {
    type Field = AttachmentField;

    fn set_field(&mut self, field: AttachmentField, value: &Value) {
        let category = self.category();
        match (field, &mut self.payload) {
            (AttachmentField::IsVisible, _) => self.is_visible = flag(value),
            (AttachmentField::FileName, AttachmentPayload::File { file_name, .. }) => {
                *file_name = text(value)
            }
            (AttachmentField::FileData, AttachmentPayload::File { file_data, .. }) => {
                *file_data = text(value)
            }
            (AttachmentField::Url, AttachmentPayload::Url { url }) => *url = text(value),
            (field, _) => {
                debug!(?field, ?category, "field does not apply to attachment mode; ignored");
            }
        }
    }
}

section_record!(Attachment);

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AttachmentWire {
    id: Option<i64>,
    priority: i32,
    #[serde(default = "visible_by_default")]
    is_visible: bool,
    #[serde(deserialize_with = "lenient_code_or_default")]
    category: AttachmentCategory,
    file_name: String,
    file_data: String,
    url: String,
}

impl From<AttachmentWire> for Attachment {
    fn from(wire: AttachmentWire) -> Self {
        let payload = match wire.category {
            AttachmentCategory::File => AttachmentPayload::File {
                file_name: wire.file_name,
                file_data: wire.file_data,
            },
            AttachmentCategory::Url => AttachmentPayload::Url { url: wire.url },
        };
        Self {
            id: wire.id,
            priority: wire.priority,
            is_visible: wire.is_visible,
            payload,
        }
    }
}

impl From<Attachment> for AttachmentWire {
    fn from(attachment: Attachment) -> Self {
        let category = attachment.category();
        let (file_name, file_data, url) = match attachment.payload {
            AttachmentPayload::File {
                file_name,
                file_data,
            } => (file_name, file_data, String::new()),
            AttachmentPayload::Url { url } => (String::new(), String::new(), url),
        };
        Self {
            id: attachment.id,
            priority: attachment.priority,
            is_visible: attachment.is_visible,
            category,
            file_name,
            file_data,
            url,
        }
    }
}

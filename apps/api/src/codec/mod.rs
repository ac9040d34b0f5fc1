//! File attachment codec: raw file bytes to the base64 text carried in an
//! attachment's `fileData`, and back.
//!
//! No size limit or MIME check happens here; the request body limit and the
//! backend own those.

pub mod handlers;

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::editor::SectionEditor;
use crate::models::attachment::Attachment;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid base64 file data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Attachment is a link and cannot hold file data")]
    NotFileAttachment,
}

/// A file picked by the user: its base name and raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn read(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| CodecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes))
    }
}

/// Encoded form of a file, shaped like the attachment's file fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedFile {
    pub file_name: String,
    pub file_data: String,
}

pub struct FileAttachmentCodec;

impl FileAttachmentCodec {
    pub fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    pub fn decode(data: &str) -> Result<Vec<u8>, CodecError> {
        Ok(STANDARD.decode(data.trim())?)
    }

    pub fn encode_file(file: &SelectedFile) -> EncodedFile {
        EncodedFile {
            file_name: file.name.clone(),
            file_data: Self::encode(&file.bytes),
        }
    }

    /// Stores `file` in a file-mode attachment. An existing file name is kept;
    /// an empty one is filled from the selected file.
    pub fn attach(record: &Attachment, file: &SelectedFile) -> Result<Attachment, CodecError> {
        let file_name = match record.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => file.name.clone(),
        };
        record
            .with_file(file_name, Self::encode(&file.bytes))
            .ok_or(CodecError::NotFileAttachment)
    }

    /// Reads `path` and attaches it. On any failure the record is untouched.
    pub async fn attach_path(
        record: &Attachment,
        path: impl AsRef<Path>,
    ) -> Result<Attachment, CodecError> {
        let file = SelectedFile::read(path).await?;
        Self::attach(record, &file)
    }

    /// Attaches `file` to the record at `index`. An out-of-range index
    /// leaves the section as it was.
    pub fn attach_in_section(
        section: &SectionEditor<Attachment>,
        index: usize,
        file: &SelectedFile,
    ) -> Result<SectionEditor<Attachment>, CodecError> {
        let Some(record) = section.records().get(index) else {
            debug!(index, "attach to missing attachment ignored");
            return Ok(section.clone());
        };
        let attached = Self::attach(record, file)?;
        let records = section
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| if i == index { attached.clone() } else { r.clone() })
            .collect::<Vec<_>>();
        Ok(SectionEditor::new(records))
    }

    /// Recovers the stored file from a file-mode attachment.
    pub fn extract(record: &Attachment) -> Result<SelectedFile, CodecError> {
        match (record.file_name(), record.file_data()) {
            (Some(name), Some(data)) => Ok(SelectedFile::new(name, Self::decode(data)?)),
            _ => Err(CodecError::NotFileAttachment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{FieldSet, RecordFactory};
    use crate::models::attachment::AttachmentField;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_encode_is_standard_base64() {
        assert_eq!(FileAttachmentCodec::encode(b"hello"), "aGVsbG8=");
        assert_eq!(FileAttachmentCodec::decode("aGVsbG8=").unwrap(), b"hello");
        assert!(FileAttachmentCodec::decode("not base64!").is_err());
    }

    #[test]
    fn test_attach_back_fills_empty_name() {
        let file = SelectedFile::new("cv.pdf", &b"%PDF"[..]);
        let attached = FileAttachmentCodec::attach(&Attachment::blank(0), &file).unwrap();
        assert_eq!(attached.file_name(), Some("cv.pdf"));
        assert_eq!(attached.file_data(), Some("JVBERg=="));
    }

    #[test]
    fn test_attach_keeps_existing_name() {
        let mut record = Attachment::file_record(0);
        record.set_field(AttachmentField::FileName, &json!("Resume 2025.pdf"));
        let file = SelectedFile::new("upload.pdf", &b"x"[..]);
        let attached = FileAttachmentCodec::attach(&record, &file).unwrap();
        assert_eq!(attached.file_name(), Some("Resume 2025.pdf"));
    }

    #[test]
    fn test_attach_refuses_url_attachment() {
        let file = SelectedFile::new("cv.pdf", &b"x"[..]);
        let err = FileAttachmentCodec::attach(&Attachment::url_record(0), &file).unwrap_err();
        assert!(matches!(err, CodecError::NotFileAttachment));
    }

    #[tokio::test]
    async fn test_attach_path_reads_file() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        tmp.write_all(b"portfolio").unwrap();
        let attached = FileAttachmentCodec::attach_path(&Attachment::blank(1), tmp.path())
            .await
            .unwrap();
        let expected_name = tmp.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(attached.file_name(), Some(expected_name.as_str()));
        assert_eq!(attached.priority, 1);

        let file = FileAttachmentCodec::extract(&attached).unwrap();
        assert_eq!(&file.bytes[..], b"portfolio");
    }

    #[tokio::test]
    async fn test_read_failure_leaves_record_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let record = Attachment::file_record(0);
        let err = FileAttachmentCodec::attach_path(&record, dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CodecError::Read { .. }));
        assert_eq!(record, Attachment::file_record(0));
    }

    #[test]
    fn test_attach_in_section_targets_one_record() {
        let section = SectionEditor::<Attachment>::default()
            .add_record()
            .add_record();
        let file = SelectedFile::new("a.png", &b"\x89PNG"[..]);
        let next = FileAttachmentCodec::attach_in_section(&section, 1, &file).unwrap();
        assert_eq!(next.records().get(0).unwrap().file_name(), Some(""));
        assert_eq!(next.records().get(1).unwrap().file_name(), Some("a.png"));
        assert_eq!(section.records().get(1).unwrap().file_name(), Some(""));

        let untouched = FileAttachmentCodec::attach_in_section(&section, 5, &file).unwrap();
        assert_eq!(untouched, section);
    }
}

use crate::domain::FieldError;

/// 5 MiB.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// A file as it arrived with the form, before any checks.
#[derive(Clone)]
pub struct AttachmentUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AttachmentUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Jpeg,
    Png,
}

impl AttachmentKind {
    fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            AttachmentKind::Jpeg => "image/jpeg",
            AttachmentKind::Png => "image/png",
        }
    }

    fn default_extension(self) -> &'static str {
        match self {
            AttachmentKind::Jpeg => "jpg",
            AttachmentKind::Png => "png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentRejection {
    #[error("attachments must be JPEG or PNG images, got '{0}'")]
    UnsupportedType(String),
    #[error("attachments may not exceed 5 MiB, got {0} bytes")]
    TooLarge(usize),
}

/// A screenshot that passed type and size checks and may be stored.
#[derive(Clone)]
pub struct Attachment {
    kind: AttachmentKind,
    extension: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("kind", &self.kind)
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    pub fn parse(upload: AttachmentUpload) -> Result<Attachment, FieldError> {
        let content_type = upload.content_type.unwrap_or_default();
        let kind = AttachmentKind::from_content_type(&content_type).ok_or_else(|| {
            FieldError::InvalidAttachment(AttachmentRejection::UnsupportedType(content_type))
        })?;
        if upload.bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(FieldError::InvalidAttachment(
                AttachmentRejection::TooLarge(upload.bytes.len()),
            ));
        }
        let extension = upload
            .file_name
            .as_deref()
            .and_then(extension_of)
            .unwrap_or_else(|| kind.default_extension().to_string());
        Ok(Self {
            kind,
            extension,
            bytes: upload.bytes,
        })
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    /// Extension of the original file name, lower-cased.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    let valid = !stem.is_empty()
        && (1..=5).contains(&extension.len())
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| extension.to_ascii_lowercase())
}

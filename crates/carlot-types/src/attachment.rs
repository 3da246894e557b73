use bytes::Bytes;

/// An uploaded file part, exactly as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Original filename sent by the client.
    pub filename: String,
    /// Declared MIME type (may carry parameters, e.g. `image/png; q=1`).
    pub content_type: String,
    pub bytes: Bytes,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased text after the last `.` of the filename, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.filename.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Lower-cased MIME subtype with parameters stripped
    /// (`"IMAGE/PNG; charset=x"` → `"png"`).
    pub fn mime_subtype(&self) -> Option<String> {
        let essence = self.content_type.split(';').next()?.trim();
        let (_, subtype) = essence.split_once('/')?;
        let subtype = subtype.trim();
        if subtype.is_empty() {
            return None;
        }
        Some(subtype.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        let a = Attachment::new("Civic.JPG", "image/jpeg", vec![1, 2, 3]);
        assert_eq!(a.extension().as_deref(), Some("jpg"));
        assert_eq!(a.size(), 3);
    }

    #[test]
    fn extension_missing() {
        assert_eq!(Attachment::new("civic", "image/jpeg", vec![]).extension(), None);
        assert_eq!(Attachment::new(".png", "image/png", vec![]).extension(), None);
        assert_eq!(Attachment::new("civic.", "image/png", vec![]).extension(), None);
    }

    #[test]
    fn extension_uses_last_dot() {
        let a = Attachment::new("archive.png.pdf", "application/pdf", vec![]);
        assert_eq!(a.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn mime_subtype_strips_parameters() {
        let a = Attachment::new("a.png", "IMAGE/PNG; charset=binary", vec![]);
        assert_eq!(a.mime_subtype().as_deref(), Some("png"));
        let b = Attachment::new("a.png", "png", vec![]);
        assert_eq!(b.mime_subtype(), None);
    }
}

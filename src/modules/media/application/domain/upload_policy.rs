use crate::modules::media::application::domain::entities::MediaKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTypeError {
    NotAllowedForKind(MediaKind),
}

/// Content-type allowlist and object-key derivation for the two media kinds
/// this registry accepts. Mirrors the shape of the teacher's `UploadPolicy`
/// (bucket name + allowed MIME list, `from_env`/`new` pair) but keyed per
/// `MediaKind` rather than a single flat list, since audio and image carry
/// disjoint allowlists.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub bucket_name: String,
}

impl UploadPolicy {
    pub const AUDIO_CONTENT_TYPES: &'static [(&'static str, &'static str)] = &[
        ("audio/m4a", "m4a"),
        ("audio/mp4", "mp4"),
        ("audio/mpeg", "mp3"),
        ("audio/mp3", "mp3"),
        ("audio/wav", "wav"),
        ("audio/x-wav", "wav"),
        ("audio/webm", "webm"),
        ("audio/ogg", "ogg"),
        ("audio/aac", "aac"),
    ];

    pub const IMAGE_CONTENT_TYPES: &'static [(&'static str, &'static str)] = &[
        ("image/jpeg", "jpeg"),
        ("image/png", "png"),
        ("image/webp", "webp"),
        ("image/heic", "heic"),
        ("image/heif", "heif"),
    ];

    pub fn from_env(bucket_name: String) -> Self {
        Self { bucket_name }
    }

    pub fn new(bucket_name: String) -> Self {
        Self { bucket_name }
    }

    /// Validates `content_type` against the allowlist for `kind` and returns
    /// the file extension to use when minting the object key.
    pub fn extension_for(
        &self,
        kind: MediaKind,
        content_type: &str,
    ) -> Result<&'static str, ContentTypeError> {
        let table = match kind {
            MediaKind::Audio => Self::AUDIO_CONTENT_TYPES,
            MediaKind::Image => Self::IMAGE_CONTENT_TYPES,
        };

        table
            .iter()
            .find(|(mime, _)| *mime == content_type)
            .map(|(_, ext)| *ext)
            .ok_or(ContentTypeError::NotAllowedForKind(kind))
    }

    /// Mints `sessions/{session_id}/{kind}/{uuid}.{ext}` per the presign
    /// protocol's key convention.
    pub fn derive_object_key(
        &self,
        session_id: uuid::Uuid,
        kind: MediaKind,
        extension: &str,
    ) -> String {
        format!(
            "sessions/{}/{}/{}.{}",
            session_id,
            kind.as_db_str(),
            uuid::Uuid::new_v4(),
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_audio_mime() {
        let policy = UploadPolicy::new("bucket".to_string());
        assert_eq!(policy.extension_for(MediaKind::Audio, "audio/wav"), Ok("wav"));
    }

    #[test]
    fn rejects_unknown_image_mime() {
        let policy = UploadPolicy::new("bucket".to_string());
        assert_eq!(
            policy.extension_for(MediaKind::Image, "image/gif"),
            Err(ContentTypeError::NotAllowedForKind(MediaKind::Image))
        );
    }

    #[test]
    fn derives_key_with_kind_segment() {
        let policy = UploadPolicy::new("bucket".to_string());
        let session_id = uuid::Uuid::new_v4();
        let key = policy.derive_object_key(session_id, MediaKind::Image, "jpeg");
        assert!(key.starts_with(&format!("sessions/{session_id}/image/")));
        assert!(key.ends_with(".jpeg"));
    }
}

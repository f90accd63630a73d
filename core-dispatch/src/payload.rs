//! Media payloads attached to multipart requests.
//!
//! Each kind (image, video, audio) carries an ordered list of byte entries
//! paired positionally with form field names.

use bytes::Bytes;
use std::fmt;

use crate::error::{DispatchError, Result};

/// Media category of a payload entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Kinds in the order their parts are appended to a multipart body
    pub const ALL: [MediaKind; 3] = [MediaKind::Image, MediaKind::Video, MediaKind::Audio];

    /// File name reported for every part of this kind
    pub fn file_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "file.jpeg",
            MediaKind::Video => "file.mp4",
            MediaKind::Audio => "file.m4a",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
            MediaKind::Audio => "audio/m4a",
        }
    }

    /// Field name used when the caller supplies none
    pub fn default_field(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_field())
    }
}

/// Byte entries of one media kind with their field names.
///
/// There are always at least as many field names as byte entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    kind: MediaKind,
    data: Vec<Bytes>,
    fields: Vec<String>,
}

impl MediaPayload {
    /// Build a payload, rejecting byte entries that have no field name.
    pub fn new<F, S>(kind: MediaKind, data: Vec<Bytes>, fields: F) -> Result<Self>
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        if fields.len() < data.len() {
            return Err(DispatchError::PayloadFieldMismatch {
                kind,
                data: data.len(),
                fields: fields.len(),
            });
        }

        Ok(Self { kind, data, fields })
    }

    /// No data, default field name
    pub fn empty(kind: MediaKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
            fields: vec![kind.default_field().to_string()],
        }
    }

    /// One entry under the kind's default field name
    pub fn single(kind: MediaKind, data: impl Into<Bytes>) -> Self {
        Self {
            kind,
            data: vec![data.into()],
            fields: vec![kind.default_field().to_string()],
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn data(&self) -> &[Bytes] {
        &self.data
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// True when at least one entry exists, even a zero-length one
    pub fn has_entries(&self) -> bool {
        !self.data.is_empty()
    }

    /// `(field, bytes)` for every non-empty entry, in order
    pub fn attachments(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.data
            .iter()
            .zip(self.fields.iter())
            .filter(|(data, _)| !data.is_empty())
            .map(|(data, field)| (field.as_str(), data))
    }
}

/// One file part to be appended to a multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment<'a> {
    pub kind: MediaKind,
    pub field: &'a str,
    pub data: &'a Bytes,
}

/// The image, video and audio payloads of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSet {
    image: MediaPayload,
    video: MediaPayload,
    audio: MediaPayload,
}

impl Default for PayloadSet {
    fn default() -> Self {
        Self {
            image: MediaPayload::empty(MediaKind::Image),
            video: MediaPayload::empty(MediaKind::Video),
            audio: MediaPayload::empty(MediaKind::Audio),
        }
    }
}

impl PayloadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the payload for `payload.kind()`
    pub fn with(mut self, payload: MediaPayload) -> Self {
        self.set(payload);
        self
    }

    pub fn set(&mut self, payload: MediaPayload) {
        match payload.kind {
            MediaKind::Image => self.image = payload,
            MediaKind::Video => self.video = payload,
            MediaKind::Audio => self.audio = payload,
        }
    }

    pub fn get(&self, kind: MediaKind) -> &MediaPayload {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }

    /// Whether the request must go out as multipart.
    ///
    /// Any entry counts, including zero-length ones that will not be attached.
    pub fn is_multipart(&self) -> bool {
        MediaKind::ALL
            .iter()
            .any(|kind| self.get(*kind).has_entries())
    }

    /// Non-empty entries of every kind: images first, then videos, then audio
    pub fn attachments(&self) -> impl Iterator<Item = Attachment<'_>> {
        MediaKind::ALL.into_iter().flat_map(move |kind| {
            self.get(kind)
                .attachments()
                .map(move |(field, data)| Attachment { kind, field, data })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_constants() {
        assert_eq!(MediaKind::Image.file_name(), "file.jpeg");
        assert_eq!(MediaKind::Video.mime_type(), "video/mp4");
        assert_eq!(MediaKind::Audio.mime_type(), "audio/m4a");
        assert_eq!(MediaKind::Audio.to_string(), "audio");
    }

    #[test]
    fn test_new_rejects_missing_field_names() {
        let err = MediaPayload::new(
            MediaKind::Image,
            vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")],
            ["avatar"],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::PayloadFieldMismatch {
                kind: MediaKind::Image,
                data: 2,
                fields: 1
            }
        ));
    }

    #[test]
    fn test_extra_field_names_are_allowed() {
        let payload = MediaPayload::new(
            MediaKind::Image,
            vec![Bytes::from_static(b"a")],
            ["front", "back"],
        )
        .unwrap();

        let attached: Vec<_> = payload.attachments().collect();
        assert_eq!(attached, vec![("front", &Bytes::from_static(b"a"))]);
    }

    #[test]
    fn test_zero_length_entries_are_skipped() {
        let payload = MediaPayload::new(
            MediaKind::Video,
            vec![Bytes::new(), Bytes::from_static(b"mp4")],
            ["intro", "clip"],
        )
        .unwrap();

        let fields: Vec<_> = payload.attachments().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["clip"]);
    }

    #[test]
    fn test_default_set_is_simple() {
        let set = PayloadSet::new();
        assert!(!set.is_multipart());
        assert_eq!(set.attachments().count(), 0);
        assert_eq!(set.get(MediaKind::Image).fields(), ["image"]);
    }

    #[test]
    fn test_empty_entry_still_selects_multipart() {
        let set = PayloadSet::new().with(MediaPayload::single(MediaKind::Audio, Bytes::new()));

        assert!(set.is_multipart());
        assert_eq!(set.attachments().count(), 0);
    }

    #[test]
    fn test_attachment_order_follows_kinds() {
        let set = PayloadSet::new()
            .with(MediaPayload::single(MediaKind::Audio, &b"m4a"[..]))
            .with(MediaPayload::single(MediaKind::Image, &b"jpg"[..]));

        let kinds: Vec<_> = set.attachments().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![MediaKind::Image, MediaKind::Audio]);
    }
}

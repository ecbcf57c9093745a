//! Snapshot object (blob)
//!
//! A blob records one file's bytes at the moment it was captured, together
//! with the file name. Its identifier covers both, so the same bytes under two
//! names are two different snapshots.
//!
//! When the source file is absent at capture time the blob is a tombstone: it
//! has no content and its identifier is derived from the name alone. Tombstone
//! ids never collide with a real snapshot of the same file.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<name>\0+<content>` or `blob <size>\0<name>\0-`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::BufRead;

const CONTENT_MARKER: u8 = b'+';
const TOMBSTONE_MARKER: u8 = b'-';

/// Immutable snapshot of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    oid: ObjectId,
    name: String,
    content: Option<Bytes>,
}

impl Blob {
    pub fn new(name: impl Into<String>, content: Option<Bytes>) -> Self {
        let name = name.into();
        let oid = match &content {
            Some(content) => ObjectId::hash_fields(&[b"blob", name.as_bytes(), content]),
            None => ObjectId::hash_fields(&[b"blob", name.as_bytes()]),
        };

        Blob { oid, name, content }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File content, `None` for a tombstone
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    pub fn is_tombstone(&self) -> bool {
        self.content.is_none()
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::new();
        payload.extend_from_slice(self.name.as_bytes());
        payload.push(b'\0');

        match &self.content {
            Some(content) => {
                payload.push(CONTENT_MARKER);
                payload.extend_from_slice(content);
            }
            None => payload.push(TOMBSTONE_MARKER),
        }

        frame(self.object_type(), &payload)
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut name = Vec::new();
        reader.read_until(b'\0', &mut name)?;
        if name.pop() != Some(b'\0') {
            anyhow::bail!("Invalid blob object: missing file name terminator");
        }
        let name = String::from_utf8(name).context("Invalid blob object: file name")?;

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest)?;

        match rest.split_first() {
            Some((&CONTENT_MARKER, content)) => {
                Ok(Self::new(name, Some(Bytes::copy_from_slice(content))))
            }
            Some((&TOMBSTONE_MARKER, _)) => Ok(Self::new(name, None)),
            _ => anyhow::bail!("Invalid blob object: unknown content marker"),
        }
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }

    fn display(&self) -> String {
        match &self.content {
            Some(content) => String::from_utf8_lossy(content).to_string(),
            None => String::new(),
        }
    }
}

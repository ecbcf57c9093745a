//! Index entry representation
//!
//! An entry is either a staged addition (file name plus the snapshot ID that
//! will enter the next commit) or a staged removal (file name only).

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use std::io::{Read, Write};

/// Size of a binary snapshot ID
const OID_SIZE: usize = 20;

/// Size of the name length prefix
const NAME_LENGTH_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    /// Staged snapshot, `None` for a staged removal
    pub oid: Option<ObjectId>,
}

impl IndexEntry {
    pub fn added(name: impl Into<String>, oid: ObjectId) -> Self {
        IndexEntry {
            name: name.into(),
            oid: Some(oid),
        }
    }

    pub fn removed(name: impl Into<String>) -> Self {
        IndexEntry {
            name: name.into(),
            oid: None,
        }
    }

    pub(crate) fn read_added(reader: &mut Checksum<impl Read>) -> anyhow::Result<Self> {
        let oid_bytes = reader.read(OID_SIZE)?;
        let oid = ObjectId::read_h40_from(&mut std::io::Cursor::new(oid_bytes))?;
        let name = Self::read_name(reader)?;

        Ok(Self::added(name, oid))
    }

    pub(crate) fn read_removed(reader: &mut Checksum<impl Read>) -> anyhow::Result<Self> {
        Ok(Self::removed(Self::read_name(reader)?))
    }

    fn read_name(reader: &mut Checksum<impl Read>) -> anyhow::Result<String> {
        let length = byteorder::NetworkEndian::read_u16(&reader.read(NAME_LENGTH_SIZE)?);
        let name = reader.read(length as usize)?;

        String::from_utf8(name.to_vec()).map_err(|_| anyhow!("Invalid UTF-8 in entry name"))
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let length = u16::try_from(self.name.len())
            .map_err(|_| anyhow!("File name too long for the index: {}", self.name))?;

        let mut entry_bytes = Vec::with_capacity(OID_SIZE + NAME_LENGTH_SIZE + self.name.len());
        if let Some(oid) = &self.oid {
            oid.write_h40_to(&mut entry_bytes)?;
        }
        entry_bytes.write_u16::<byteorder::NetworkEndian>(length)?;
        entry_bytes.write_all(self.name.as_bytes())?;

        Ok(Bytes::from(entry_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn added_entry_layout() {
        let oid = ObjectId::hash_fields(&[b"blob", b"a.txt", b"1"]);
        let bytes = IndexEntry::added("a.txt", oid).serialize().unwrap();

        pretty_assertions::assert_eq!(bytes.len(), OID_SIZE + NAME_LENGTH_SIZE + 5);
        pretty_assertions::assert_eq!(&bytes[OID_SIZE..OID_SIZE + 2], &[0u8, 5]);
        pretty_assertions::assert_eq!(&bytes[OID_SIZE + 2..], b"a.txt");
    }

    #[rstest]
    #[case("x")]
    #[case("name with spaces.txt")]
    fn removed_entry_layout(#[case] name: &str) {
        let bytes = IndexEntry::removed(name).serialize().unwrap();

        pretty_assertions::assert_eq!(bytes.len(), NAME_LENGTH_SIZE + name.len());
        pretty_assertions::assert_eq!(&bytes[NAME_LENGTH_SIZE..], name.as_bytes());
    }

    #[test]
    fn oversized_names_are_rejected() {
        let name = "n".repeat(u16::MAX as usize + 1);

        assert!(IndexEntry::removed(name).serialize().is_err());
    }
}

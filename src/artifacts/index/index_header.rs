use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) added_count: u32,
    pub(crate) removed_count: u32,
}

impl IndexHeader {
    pub(crate) fn empty() -> Self {
        IndexHeader::new(String::from(SIGNATURE), VERSION, 0, 0)
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.added_count)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.removed_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        reader.read_to_end(&mut bytes)?;

        if bytes.len() < HEADER_SIZE {
            return Err(anyhow!("Invalid header size"));
        }

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| anyhow!("Invalid marker in index header"))?;
        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        let added_count = byteorder::NetworkEndian::read_u32(&bytes[8..12]);
        let removed_count = byteorder::NetworkEndian::read_u32(&bytes[12..16]);

        Ok(IndexHeader {
            marker,
            version,
            added_count,
            removed_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_is_sixteen_big_endian_bytes() {
        let header = IndexHeader::new(String::from(SIGNATURE), VERSION, 2, 1);
        let bytes = header.serialize().unwrap();

        pretty_assertions::assert_eq!(
            bytes.as_ref(),
            b"STAG\0\0\0\x01\0\0\0\x02\0\0\0\x01".as_slice()
        );
        pretty_assertions::assert_eq!(IndexHeader::deserialize(Cursor::new(bytes)).unwrap(), header);
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert!(IndexHeader::deserialize(Cursor::new(b"STAG\0\0".to_vec())).is_err());
    }
}

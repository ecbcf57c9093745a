//! Trailing digest of the staging index
//!
//! Everything read or written through [`Checksum`] feeds a running SHA-1.
//! The file ends with that digest and nothing after it.

use crate::artifacts::index::{CHECKSUM_SIZE, SIGNATURE};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Hashing wrapper around the stream of an index file
pub struct Checksum<S> {
    stream: S,
    digest: Sha1,
}

impl<S> Checksum<S> {
    pub(crate) fn new(stream: S) -> Self {
        Checksum {
            stream,
            digest: Sha1::new(),
        }
    }

    fn current(&self) -> [u8; CHECKSUM_SIZE] {
        let mut digest = [0u8; CHECKSUM_SIZE];
        digest.copy_from_slice(&self.digest.clone().finalize());
        digest
    }
}

impl<S: Read> Checksum<S> {
    /// Read exactly `size` bytes of index content
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.stream.read_exact(&mut buffer).map_err(|_| {
            anyhow::anyhow!("{SIGNATURE} index is truncated: expected {size} more bytes")
        })?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Check the trailing digest against everything read so far
    pub(crate) fn verify(mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.stream
            .read_exact(&mut stored)
            .map_err(|_| anyhow::anyhow!("{SIGNATURE} index has no trailing checksum"))?;

        let computed = self.current();
        if stored != computed {
            anyhow::bail!(
                "{SIGNATURE} index is corrupt: stored checksum {} but content hashes to {}",
                hex(&stored),
                hex(&computed)
            );
        }

        let mut trailing = Vec::new();
        self.stream.read_to_end(&mut trailing)?;
        if !trailing.is_empty() {
            anyhow::bail!(
                "{SIGNATURE} index has {} unexpected bytes after its checksum",
                trailing.len()
            );
        }

        Ok(())
    }
}

impl<S: Write> Checksum<S> {
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the digest of everything written and flush
    pub(crate) fn finish(mut self) -> anyhow::Result<()> {
        let digest = self.current();
        self.stream.write_all(&digest)?;
        self.stream.flush()?;

        Ok(())
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sealed(content: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut writer = Checksum::new(&mut bytes);
        writer.write(content).unwrap();
        writer.finish().unwrap();

        bytes
    }

    #[test]
    fn sealed_content_verifies() {
        let bytes = sealed(b"STAG payload");
        pretty_assertions::assert_eq!(bytes.len(), 12 + CHECKSUM_SIZE);

        let mut reader = Checksum::new(Cursor::new(bytes));
        pretty_assertions::assert_eq!(reader.read(12).unwrap().as_ref(), b"STAG payload");
        reader.verify().unwrap();
    }

    #[test]
    fn flipped_content_byte_is_reported() {
        let mut bytes = sealed(b"STAG payload");
        bytes[5] ^= 0x01;

        let mut reader = Checksum::new(Cursor::new(bytes));
        reader.read(12).unwrap();
        let err = reader.verify().unwrap_err();

        assert!(err.to_string().contains("index is corrupt"));
    }

    #[test]
    fn bytes_after_the_checksum_are_rejected() {
        let mut bytes = sealed(b"STAG");
        bytes.push(0);

        let mut reader = Checksum::new(Cursor::new(bytes));
        reader.read(4).unwrap();

        assert!(reader.verify().is_err());
    }

    #[test]
    fn short_reads_fail() {
        let mut reader = Checksum::new(Cursor::new(b"ST".to_vec()));

        assert!(reader.read(4).is_err());
    }
}

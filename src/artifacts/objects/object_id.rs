//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes.
//! They uniquely identify every stored record (snapshots and commits).
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")
//!
//! ## Storage
//!
//! Objects are stored in `.gitlet/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
///
/// A 40-character hexadecimal string derived from the content of a record.
/// Two records with identical content always share the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Derive an identifier from an ordered list of fields
    ///
    /// Every field is framed by its big-endian length before being fed to the
    /// digest, so `["ab", "c"]` and `["a", "bc"]` never alias. Identical field
    /// sequences always produce identical identifiers.
    pub fn hash_fields(fields: &[&[u8]]) -> Self {
        let mut hasher = Sha1::new();

        for field in fields {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        }

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Converts the 40-char hex string to 20 bytes and writes to the given writer.
    /// Used when serializing the staging index.
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from binary format (20 bytes)
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        let mut buffer = [0; 1];

        for _ in 0..(OBJECT_ID_LENGTH / 2) {
            reader.read_exact(&mut buffer)?;
            hex40.push_str(&format!("{:02x}", u8::from_be_bytes(buffer)));
        }

        Self::try_parse(hex40)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identical_fields_hash_identically(
            name in "[a-z]{1,12}\\.txt",
            content in proptest::collection::vec(any::<u8>(), 0..256)
        ) {
            let first = ObjectId::hash_fields(&[name.as_bytes(), &content]);
            let second = ObjectId::hash_fields(&[name.as_bytes(), &content]);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn differing_content_changes_the_hash(
            name in "[a-z]{1,12}\\.txt",
            content in "[a-z]{0,32}",
            suffix in "[a-z]{1,4}"
        ) {
            let original = ObjectId::hash_fields(&[name.as_bytes(), content.as_bytes()]);
            let changed = format!("{content}{suffix}");
            let changed = ObjectId::hash_fields(&[name.as_bytes(), changed.as_bytes()]);
            prop_assert_ne!(original, changed);
        }

        #[test]
        fn differing_names_change_the_hash(
            name in "[a-z]{1,12}",
            content in "[a-z]{0,32}"
        ) {
            let original = ObjectId::hash_fields(&[name.as_bytes(), content.as_bytes()]);
            let renamed = format!("{name}.bak");
            let renamed = ObjectId::hash_fields(&[renamed.as_bytes(), content.as_bytes()]);
            prop_assert_ne!(original, renamed);
        }

        #[test]
        fn binary_form_round_trips(bytes in proptest::array::uniform20(any::<u8>())) {
            let hex = bytes.iter().map(|b| format!("{b:02x}")).collect::<String>();
            let oid = ObjectId::try_parse(hex).unwrap();

            let mut buffer = Vec::new();
            oid.write_h40_to(&mut buffer).unwrap();
            prop_assert_eq!(buffer.len(), 20);

            let decoded = ObjectId::read_h40_from(&mut buffer.as_slice()).unwrap();
            prop_assert_eq!(decoded, oid);
        }
    }

    #[test]
    fn field_order_and_framing_matter() {
        let ab_c = ObjectId::hash_fields(&[b"ab", b"c"]);
        let a_bc = ObjectId::hash_fields(&[b"a", b"bc"]);
        let c_ab = ObjectId::hash_fields(&[b"c", b"ab"]);

        assert_ne!(ab_c, a_bc);
        assert_ne!(ab_c, c_ab);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
        assert!(ObjectId::try_parse("a".repeat(40)).is_ok());
    }

    #[test]
    fn splits_into_fan_out_path() {
        let oid = ObjectId::try_parse(format!("ab{}", "c".repeat(38))).unwrap();

        assert_eq!(oid.to_path(), PathBuf::from("ab").join("c".repeat(38)));
        assert_eq!(oid.to_short_oid(), "abccccc");
    }
}

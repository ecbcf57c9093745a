//! Commit object
//!
//! Commits represent complete snapshots of the tracked files at a point in time.
//! They contain:
//! - Parent commit ID(s) (none for the root, two for merges: ours then theirs)
//! - A creation timestamp
//! - A mapping from every tracked file name to its snapshot ID (never a diff)
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <file name>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the root commit shared by every repository
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

/// Tracked file name to snapshot ID
pub type FileMapping = BTreeMap<String, ObjectId>;

/// Immutable commit record
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    /// Complete tracked-file set at this commit
    files: FileMapping,
    message: String,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parents: Vec<ObjectId>,
        files: FileMapping,
    ) -> Self {
        let oid = Self::derive_id(&message, &timestamp, &parents, &files);

        Commit {
            oid,
            parents,
            timestamp,
            files,
            message,
        }
    }

    /// The sentinel every history starts from
    ///
    /// Its identity is fixed: constant message, Unix epoch, no parents, no files.
    pub fn root() -> Self {
        Self::new(
            ROOT_COMMIT_MESSAGE.to_string(),
            DateTime::UNIX_EPOCH.fixed_offset(),
            Vec::new(),
            FileMapping::new(),
        )
    }

    fn derive_id(
        message: &str,
        timestamp: &DateTime<FixedOffset>,
        parents: &[ObjectId],
        files: &FileMapping,
    ) -> ObjectId {
        let timestamp = Self::render_timestamp(timestamp);
        let parents = parents
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        let files = files
            .iter()
            .map(|(name, oid)| format!("{name}\0{oid}\n"))
            .collect::<String>();

        ObjectId::hash_fields(&[
            b"commit",
            message.as_bytes(),
            timestamp.as_bytes(),
            parents.as_bytes(),
            files.as_bytes(),
        ])
    }

    fn render_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
        format!("{} {}", timestamp.timestamp(), timestamp.format("%z"))
    }

    /// Timestamp for a new commit
    ///
    /// Reads `GITLET_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and
    /// falls back to the current local time.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent ("ours" for merge commits)
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn files(&self) -> &FileMapping {
        &self.files
    }

    /// Snapshot ID tracked for `name`, if any
    pub fn blob_for(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Nov 9 20:00:05 2017 -0800"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn payload(&self) -> String {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!(
            "timestamp {}",
            Self::render_timestamp(&self.timestamp)
        ));
        for (name, oid) in &self.files {
            lines.push(format!("file {} {}", oid, name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        frame(self.object_type(), self.payload().as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut files = FileMapping::new();

        for line in headers.lines() {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(value) = line.strip_prefix("timestamp ") {
                timestamp = Some(
                    DateTime::parse_from_str(value, "%s %z")
                        .with_context(|| format!("Invalid commit timestamp {value:?}"))?,
                );
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                files.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected header {line:?}");
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp")?;

        Ok(Self::new(message.to_string(), timestamp, parents, files))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }

    fn display(&self) -> String {
        self.payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    #[fixture]
    fn timestamp() -> DateTime<FixedOffset> {
        DateTime::parse_from_str("2023-01-01 12:00:00 +0200", "%Y-%m-%d %H:%M:%S %z").unwrap()
    }

    fn decode(commit: &Commit) -> Commit {
        let mut reader = Cursor::new(commit.serialize().unwrap());
        assert_eq!(
            ObjectType::parse_object_type(&mut reader).unwrap(),
            ObjectType::Commit
        );
        Commit::deserialize(reader).unwrap()
    }

    #[test]
    fn root_commit_has_a_fixed_identity() {
        let first = Commit::root();
        let second = Commit::root();

        assert_eq!(first.oid(), second.oid());
        assert!(first.parents().is_empty());
        assert!(first.files().is_empty());
        assert_eq!(first.message(), ROOT_COMMIT_MESSAGE);
        assert_eq!(first.timestamp().timestamp(), 0);
    }

    #[rstest]
    fn rederiving_the_id_from_stored_fields_reproduces_it(timestamp: DateTime<FixedOffset>) {
        let files = FileMapping::from([
            ("a.txt".to_string(), ObjectId::hash_fields(&[b"a"])),
            ("b c.txt".to_string(), ObjectId::hash_fields(&[b"b"])),
        ]);
        let commit = Commit::new(
            "two\nlines".to_string(),
            timestamp,
            vec![Commit::root().oid().clone()],
            files,
        );

        let decoded = decode(&commit);

        assert_eq!(decoded, commit);
        assert_eq!(decoded.oid(), commit.oid());
    }

    #[rstest]
    fn parent_order_changes_the_identity(timestamp: DateTime<FixedOffset>) {
        let ours = ObjectId::hash_fields(&[b"ours"]);
        let theirs = ObjectId::hash_fields(&[b"theirs"]);

        let merge = Commit::new(
            "merge".to_string(),
            timestamp,
            vec![ours.clone(), theirs.clone()],
            FileMapping::new(),
        );
        let swapped = Commit::new(
            "merge".to_string(),
            timestamp,
            vec![theirs, ours.clone()],
            FileMapping::new(),
        );

        assert_ne!(merge.oid(), swapped.oid());
        assert_eq!(merge.parent(), Some(&ours));
        assert!(merge.is_merge());
    }

    #[rstest]
    fn readable_timestamp_keeps_the_offset(timestamp: DateTime<FixedOffset>) {
        let commit = Commit::new(
            "message".to_string(),
            timestamp,
            vec![],
            FileMapping::new(),
        );

        assert_eq!(commit.readable_timestamp(), "Sun Jan 1 12:00:00 2023 +0200");
    }
}

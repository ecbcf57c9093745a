use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// A content-addressed record
///
/// The identifier is derived from the record's fields when it is built and
/// kept alongside them, so it never has to be recomputed from the encoding.
pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> &ObjectId;

    fn display(&self) -> String;

    fn object_path(&self) -> PathBuf {
        self.object_id().to_path()
    }
}

/// Prefix `payload` with the `<type> <size>\0` header
pub(crate) fn frame(object_type: ObjectType, payload: &[u8]) -> Result<Bytes> {
    let mut object_bytes = Vec::with_capacity(payload.len() + 16);
    let header = format!("{} {}\0", object_type.as_str(), payload.len());
    object_bytes.write_all(header.as_bytes())?;
    object_bytes.write_all(payload)?;

    Ok(Bytes::from(object_bytes))
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Commit(Box<Commit>),
}

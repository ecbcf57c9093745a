use anyhow::Context;
use std::io::BufRead;

/// Kind tag written at the front of every stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header, leaving the reader at the payload
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let object_type = Self::read_field(data_reader, b' ')?;
        let object_type = ObjectType::try_from(object_type.as_str())?;

        let size = Self::read_field(data_reader, b'\0')?;
        size.parse::<usize>()
            .with_context(|| format!("Invalid {object_type} size {size:?}"))?;

        Ok(object_type)
    }

    fn read_field(data_reader: &mut impl BufRead, terminator: u8) -> anyhow::Result<String> {
        let mut field = Vec::new();
        data_reader.read_until(terminator, &mut field)?;

        if field.pop() != Some(terminator) {
            anyhow::bail!("Truncated object header");
        }

        Ok(String::from_utf8(field)?)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type {value:?}")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Remote registry
//!
//! Remotes are other repositories on the same filesystem, recorded in
//! `.gitlet/config` as one block per remote:
//!
//! ```text
//! [remote "origin"]
//! 	path = ../other/.gitlet
//! ```

use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

const REMOTE_HEADER_REGEX: &str = r#"^\[remote "([^"]+)"\]$"#;
const REMOTE_PATH_REGEX: &str = r"^\s+path = (.+)$";

#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the config file (typically `.gitlet/config`)
    path: Box<Path>,
}

impl Remotes {
    /// Registered remotes mapped to their metadata directory
    pub fn list(&self) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read config at {:?}", self.path))?;
        let header_re = regex::Regex::new(REMOTE_HEADER_REGEX)?;
        let path_re = regex::Regex::new(REMOTE_PATH_REGEX)?;

        let mut remotes = BTreeMap::new();
        let mut current = None;

        for line in content.lines() {
            if let Some(captures) = header_re.captures(line) {
                current = Some(captures[1].to_string());
            } else if let Some(captures) = path_re.captures(line)
                && let Some(name) = current.take()
            {
                remotes.insert(name, PathBuf::from(&captures[1]));
            }
        }

        Ok(remotes)
    }

    pub fn get(&self, name: &str) -> anyhow::Result<PathBuf> {
        self.list()?
            .remove(name)
            .ok_or_else(|| RepositoryError::NoSuchRemote.into())
    }

    /// Register a remote; `/` in the path becomes the platform separator
    pub fn add(&self, name: &str, remote_path: &str) -> anyhow::Result<()> {
        if name.is_empty() || name.contains(['/', '"', '\n']) {
            return Err(RepositoryError::InvalidRemoteName(name.to_string()).into());
        }

        let mut remotes = self.list()?;
        if remotes.contains_key(name) {
            return Err(RepositoryError::RemoteExists.into());
        }

        let remote_path = remote_path.replace('/', &MAIN_SEPARATOR.to_string());
        remotes.insert(name.to_string(), PathBuf::from(remote_path));

        self.write(&remotes)
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let mut remotes = self.list()?;
        if remotes.remove(name).is_none() {
            return Err(RepositoryError::NoSuchRemote.into());
        }

        self.write(&remotes)
    }

    fn write(&self, remotes: &BTreeMap<String, PathBuf>) -> anyhow::Result<()> {
        let content = remotes
            .iter()
            .map(|(name, path)| format!("[remote \"{}\"]\n\tpath = {}\n", name, path.display()))
            .collect::<String>();

        let mut config_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("failed to open config at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut config_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(content.as_bytes())?;

        Ok(())
    }
}

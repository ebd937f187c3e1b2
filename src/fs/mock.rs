// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // List of child names
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    /// Every directory actually created through `create_dir_all`, in order.
    created_dirs: Vec<PathBuf>,
    /// Writes under any of these prefixes fail.
    read_only: Vec<PathBuf>,
}

/// In-memory filesystem for tests.
///
/// Paths are normalised so that `./a/b`, `a/b` and `a//b` refer to the same
/// entry; the root is `"."`.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

fn parent_of(path: &Path) -> Option<PathBuf> {
    if path == Path::new(".") {
        return None;
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Some(parent.to_path_buf()),
        Some(_) => Some(PathBuf::from(".")),
        None => None,
    }
}

fn child_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|n| n.to_str()).map(str::to_string)
}

impl MockState {
    fn link_child(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (parent_of(path), child_name(path)) else {
            return;
        };
        if let Some(MockEntry::Dir(children)) = self.entries.get_mut(&parent) {
            if !children.contains(&name) {
                children.push(name);
            }
        }
    }

    fn unlink_child(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (parent_of(path), child_name(path)) else {
            return;
        };
        if let Some(MockEntry::Dir(children)) = self.entries.get_mut(&parent) {
            children.retain(|c| c != &name);
        }
    }

    /// Create `path` and its parents. Returns the directories that were new.
    fn ensure_dir_entry(&mut self, path: &Path) -> Result<Vec<PathBuf>> {
        match self.entries.get(path) {
            Some(MockEntry::Dir(_)) => return Ok(Vec::new()),
            Some(MockEntry::File(_)) => bail!("Not a directory: {:?}", path),
            None => {}
        }

        let mut created = match parent_of(path) {
            Some(parent) => self.ensure_dir_entry(&parent)?,
            None => Vec::new(),
        };
        self.entries
            .insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        self.link_child(path);
        created.push(path.to_path_buf());
        Ok(created)
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut state = MockState::default();
        // Ensure root exists
        state
            .entries
            .insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Seed a file, creating parent directories implicitly.
    ///
    /// Seeding does not count towards [`MockFileSystem::created_dirs`].
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = parent_of(&path) {
            state
                .ensure_dir_entry(&parent)
                .expect("mock parent path is a file");
        }
        state
            .entries
            .insert(path.clone(), MockEntry::File(content.into()));
        state.link_child(&path);
    }

    /// Seed an empty directory (and its parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        state
            .ensure_dir_entry(&path)
            .expect("mock dir path is a file");
    }

    /// Make every write below `prefix` fail, as a read-only mount would.
    pub fn deny_writes(&self, prefix: impl AsRef<Path>) {
        let prefix = normalize(prefix.as_ref());
        self.state.lock().unwrap().read_only.push(prefix);
    }

    /// Contents of a file as UTF-8, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = normalize(path.as_ref());
        let state = self.state.lock().unwrap();
        match state.entries.get(&path) {
            Some(MockEntry::File(bytes)) => String::from_utf8(bytes.clone()).ok(),
            _ => None,
        }
    }

    /// Directories created through [`FileSystem::create_dir_all`], in order.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().created_dirs.clone()
    }

    /// All file paths currently stored, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        let state = self.state.lock().unwrap();
        let mut files: Vec<PathBuf> = state
            .entries
            .iter()
            .filter(|(_, e)| matches!(e, MockEntry::File(_)))
            .map(|(p, _)| p.clone())
            .collect();
        files.sort();
        files
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = normalize(path);
        let state = self.state.lock().unwrap();
        match state.entries.get(&path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let path = normalize(path);
        let mut state = self.state.lock().unwrap();
        if state.read_only.iter().any(|p| path.starts_with(p)) {
            bail!("Permission denied: {:?}", path);
        }
        let parent = parent_of(&path).ok_or_else(|| anyhow!("Cannot write to root"))?;
        if !matches!(state.entries.get(&parent), Some(MockEntry::Dir(_))) {
            bail!("No such directory: {:?}", parent);
        }
        if matches!(state.entries.get(&path), Some(MockEntry::Dir(_))) {
            bail!("Is a directory: {:?}", path);
        }
        state
            .entries
            .insert(path.clone(), MockEntry::File(contents.to_vec()));
        state.link_child(&path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut state = self.state.lock().unwrap();
        if state.read_only.iter().any(|p| path.starts_with(p)) && !state.entries.contains_key(&path) {
            bail!("Permission denied: {:?}", path);
        }
        let created = state.ensure_dir_entry(&path)?;
        state.created_dirs.extend(created);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut state = self.state.lock().unwrap();
        match state.entries.get(&path) {
            Some(MockEntry::File(_)) => {
                state.entries.remove(&path);
                state.unlink_child(&path);
                Ok(())
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.entries.contains_key(&normalize(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        matches!(state.entries.get(&normalize(path)), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        matches!(state.entries.get(&normalize(path)), Some(MockEntry::Dir(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        match state.entries.get(&normalize(path)) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}

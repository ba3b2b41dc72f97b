//! Filesystem collaborator.
//!
//! The reader never holds more than one [`ImageFile`] at a time. Handles are
//! closed by dropping them, so every exit path of an operation closes its file.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

/// An open file with a read cursor.
pub trait ImageFile {
    /// Read up to `buf.len()` bytes at the cursor, returning how many were
    /// read. A short count means end of file or a storage failure.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Move the cursor to an absolute offset. Returns `false` on failure.
    fn seek(&mut self, offset: u64) -> bool;

    /// Fill `buf` completely or report `false`.
    fn read_exact(&mut self, buf: &mut [u8]) -> bool {
        self.read(buf) == buf.len()
    }
}

/// A named-file store, such as a FAT volume on a memory card.
pub trait Storage {
    type File: ImageFile;

    /// Open `name` for reading. `None` if it cannot be opened.
    fn open(&mut self, name: &str) -> Option<Self::File>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    type File = S::File;

    fn open(&mut self, name: &str) -> Option<Self::File> {
        (**self).open(name)
    }
}

// ── In-memory storage ───────────────────────────────────────────────

/// In-memory file store, for tests and for images baked into flash.
#[derive(Debug, Default)]
pub struct MemStorage {
    files: BTreeMap<String, Rc<[u8]>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let data: Vec<u8> = data.into();
        self.files.insert(name.into(), Rc::from(data));
    }

    /// Remove a file, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    /// Number of handles currently open across all files.
    pub fn open_handles(&self) -> usize {
        self.files.values().map(|f| Rc::strong_count(f) - 1).sum()
    }
}

impl Storage for MemStorage {
    type File = MemFile;

    fn open(&mut self, name: &str) -> Option<MemFile> {
        self.files.get(name).map(|data| MemFile {
            data: Rc::clone(data),
            pos: 0,
        })
    }
}

/// Handle to a [`MemStorage`] file.
#[derive(Debug)]
pub struct MemFile {
    data: Rc<[u8]>,
    pos: usize,
}

impl ImageFile for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let available = self.data.len().saturating_sub(self.pos);
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    fn seek(&mut self, offset: u64) -> bool {
        match usize::try_from(offset) {
            Ok(pos) if pos <= self.data.len() => {
                self.pos = pos;
                true
            }
            _ => false,
        }
    }
}

// ── std::fs storage ─────────────────────────────────────────────────

/// Files resolved relative to a root directory.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct FsStorage {
    root: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl FsStorage {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(feature = "std")]
impl Storage for FsStorage {
    type File = std::fs::File;

    fn open(&mut self, name: &str) -> Option<std::fs::File> {
        std::fs::File::open(self.root.join(name)).ok()
    }
}

#[cfg(feature = "std")]
impl ImageFile for std::fs::File {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        use std::io::Read;
        let mut filled = 0;
        while filled < buf.len() {
            match Read::read(self, &mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(_) => break,
            }
        }
        filled
    }

    fn seek(&mut self, offset: u64) -> bool {
        use std::io::{Seek, SeekFrom};
        Seek::seek(self, SeekFrom::Start(offset)).is_ok()
    }
}

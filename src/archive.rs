use ignore::WalkBuilder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ArchiveOpenError;

/// Read-only container of named entries (directory markers and files).
pub trait SourceArchive {
    fn label(&self) -> &str;

    fn has_entry(&mut self, path: &str) -> bool;

    /// `Ok(None)` when the entry does not exist.
    fn read_entry(&mut self, path: &str) -> io::Result<Option<Vec<u8>>>;
}

/// A jar or zip file, memory-mapped for the lifetime of the handle.
pub struct JarArchive {
    label: String,
    archive: ZipArchive<Cursor<Mmap>>,
}

impl JarArchive {
    pub fn open(path: &Path) -> Result<Self, ArchiveOpenError> {
        if !path.is_file() {
            return Err(ArchiveOpenError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let io_err = |source| ArchiveOpenError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        // SAFETY: The file is opened read-only and the map is owned by the archive,
        // so it is unmapped when the handle is dropped.
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
        let archive =
            ZipArchive::new(Cursor::new(mmap)).map_err(|source| ArchiveOpenError::NotAnArchive {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            label: path.display().to_string(),
            archive,
        })
    }
}

impl SourceArchive for JarArchive {
    fn label(&self) -> &str {
        &self.label
    }

    fn has_entry(&mut self, path: &str) -> bool {
        self.archive.by_name(path).is_ok()
    }

    fn read_entry(&mut self, path: &str) -> io::Result<Option<Vec<u8>>> {
        let mut entry = match self.archive.by_name(path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(ZipError::Io(e)) => return Err(e),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };
        let mut content = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut content)?;
        Ok(Some(content))
    }
}

/// Archives in the order they were given. Dropping the set closes every archive.
#[derive(Default)]
pub struct ArchiveSet {
    archives: Vec<Box<dyn SourceArchive>>,
}

impl ArchiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, archive: Box<dyn SourceArchive>) {
        self.archives.push(archive);
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.archives.iter().map(|a| a.label()).collect()
    }

    /// True when any archive has the `package_path/` directory marker.
    /// Every archive is probed, even after a hit.
    pub fn find_package(&mut self, package_path: &str) -> bool {
        let marker = format!("{package_path}/");
        let mut found = false;
        for archive in self.archives.iter_mut() {
            if archive.has_entry(&marker) {
                found = true;
            }
        }
        found
    }

    /// Content of `entry_path` from the first archive that has it. An entry
    /// that cannot be read counts as absent from that archive.
    pub fn find_class_file(&mut self, entry_path: &str) -> Option<Vec<u8>> {
        for archive in self.archives.iter_mut() {
            match archive.read_entry(entry_path) {
                Ok(Some(content)) => return Some(content),
                Ok(None) => {}
                Err(e) => {
                    eprintln!(
                        "[jdlink-check] failed to read {entry_path} from {}: {e}",
                        archive.label()
                    );
                }
            }
        }
        None
    }
}

/// Opens every archive argument in order. Directories are expanded to the
/// jars and zips beneath them. Failures are returned, not fatal.
pub fn open_archives(paths: &[PathBuf]) -> (ArchiveSet, Vec<ArchiveOpenError>) {
    let mut set = ArchiveSet::new();
    let mut errors = Vec::new();

    for path in paths {
        let candidates = if path.is_dir() {
            let found = scan_archives(path);
            if found.is_empty() {
                eprintln!(
                    "[jdlink-check] no jar or zip archives under {}",
                    path.display()
                );
            }
            found
        } else {
            vec![path.clone()]
        };

        for candidate in candidates {
            match JarArchive::open(&candidate) {
                Ok(archive) => set.push(Box::new(archive)),
                Err(e) => errors.push(e),
            }
        }
    }

    (set, errors)
}

/// Every `*.jar` / `*.zip` under `base_path`, sorted by path.
pub fn scan_archives(base_path: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(base_path)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    let mut found: Vec<PathBuf> = walker
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|e| e == "jar" || e == "zip")
        })
        .collect();
    found.sort();
    found
}

use super::{DirEntry, FileSystem, FileType};
use crate::error::{GenerationError, Result};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory filesystem; relative paths resolve against `root`
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(BTreeMap::new()),
            root,
        };
        let root = fs.root.clone();
        fs.add_dir(root);
        fs
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_lock();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_lock();
        Self::ensure_parents(&mut files, &path);
    }

    /// Paths of every file currently stored, in sorted order
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.read_lock()
            .iter()
            .filter(|(_, e)| e.file_type == FileType::File)
            .map(|(p, _)| p.clone())
            .collect()
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, BTreeMap<PathBuf, MockEntry>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, BTreeMap<PathBuf, MockEntry>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn not_found(path: &Path, what: &str) -> GenerationError {
        GenerationError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", what)),
        )
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read_lock().contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read_lock()
            .get(&path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read_lock()
            .get(&path)
            .map(|e| e.file_type == FileType::File)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.read_lock();
        files
            .get(&path)
            .and_then(|e| e.content.clone())
            .ok_or_else(|| Self::not_found(&path, "File"))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);
        let mut files = self.write_lock();

        let parent_is_dir = path
            .parent()
            .and_then(|p| files.get(p))
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false);
        if !parent_is_dir {
            return Err(Self::not_found(&path, "Parent directory"));
        }
        if files
            .get(&path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
        {
            return Err(GenerationError::io(
                &path,
                io::Error::new(io::ErrorKind::Other, "path is a directory"),
            ));
        }

        files.insert(
            path,
            MockEntry {
                content: Some(contents.to_string()),
                file_type: FileType::File,
            },
        );
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let files = self.read_lock();

        if !files.contains_key(&path) {
            return Err(Self::not_found(&path, "Directory"));
        }

        let entries = files
            .iter()
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .map(|(p, e)| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                file_type: e.file_type,
            })
            .collect();

        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        let mut files = self.write_lock();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if let Some(entry) = files.get(&current) {
                if entry.file_type == FileType::File {
                    return Err(GenerationError::io(
                        &current,
                        io::Error::new(io::ErrorKind::AlreadyExists, "a file is in the way"),
                    ));
                }
            }
        }
        Self::ensure_parents(&mut files, &path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        self.write_lock().retain(|p, _| !p.starts_with(&path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello");

        assert!(fs.exists(Path::new("/mock/test.txt")));
        assert!(fs.is_file(Path::new("/mock/test.txt")));
    }

    #[test]
    fn test_parent_directories_created() {
        let fs = MockFileSystem::new();
        fs.add_file("a/b/c/file.txt", "content");

        assert!(fs.is_dir(Path::new("/mock/a")));
        assert!(fs.is_dir(Path::new("/mock/a/b")));
        assert!(fs.is_dir(Path::new("/mock/a/b/c")));
        assert!(fs.is_file(Path::new("/mock/a/b/c/file.txt")));
    }

    #[test]
    fn test_write_requires_parent() {
        let fs = MockFileSystem::new();

        assert!(fs.write(Path::new("/mock/missing/out.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/mock/missing")).unwrap();
        fs.write(Path::new("/mock/missing/out.txt"), "x").unwrap();
        assert_eq!(
            fs.read_to_string(Path::new("/mock/missing/out.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_create_dir_all_blocked_by_file() {
        let fs = MockFileSystem::new();
        fs.add_file("blocker", "x");

        assert!(fs.create_dir_all(Path::new("/mock/blocker/sub")).is_err());
    }

    #[test]
    fn test_remove_dir_all() {
        let fs = MockFileSystem::new();
        fs.add_file("webapp/WEB-INF/web.xml", "<web-app/>");
        fs.add_file("webapp-other/keep.txt", "keep");

        fs.remove_dir_all(Path::new("/mock/webapp")).unwrap();

        assert!(!fs.exists(Path::new("/mock/webapp")));
        assert!(!fs.exists(Path::new("/mock/webapp/WEB-INF/web.xml")));
        assert!(fs.exists(Path::new("/mock/webapp-other/keep.txt")));

        // absent directory
        fs.remove_dir_all(Path::new("/mock/webapp")).unwrap();
    }

    #[test]
    fn test_read_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("subdir");
        fs.add_file("test.txt", "content");
        fs.add_file("subdir/nested.txt", "nested");

        let entries = fs.read_dir(Path::new("/mock")).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert_eq!(names, vec!["subdir", "test.txt"]);
    }

    #[test]
    fn test_with_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/repo"));
        fs.add_file("src/main.rs", "fn main() {}");

        assert!(fs.exists(Path::new("/repo/src/main.rs")));
        assert_eq!(fs.file_paths(), vec![PathBuf::from("/repo/src/main.rs")]);
    }
}

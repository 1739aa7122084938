//! File persistence for the secret cache.

use anyhow::{Context, Result};
use getrandom::fill;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single file on disk, written atomically.
///
/// Crash-safety: data goes to a randomly-named temporary file first, is
/// fsynced, and then atomically replaces the target. After a crash either
/// the old or the new contents are present, never a partial write.
#[derive(Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns `true` if the file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the whole file into memory.
    pub fn load(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }

    /// Writes the file atomically, creating parent directories as needed.
    pub fn save(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.tmp_path()?;

        // create exclusively so a concurrent writer cannot share the temp file
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        tmp_file.write_all(data)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = self.atomic_replace(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        // persist the rename itself
        if let Some(parent) = self.path.parent() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }

        Ok(())
    }

    /// Deletes the file. Idempotent: a missing file is not an error.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("failed to remove cache file"),
        }
    }

    /// Picks a collision-free temporary name next to the target file.
    fn tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8];
        fill(&mut buf)?;

        let suffix = buf.iter().map(|b| format!("{:02x}", b)).collect::<String>();

        let file_name = self.path.file_name().unwrap().to_string_lossy();

        Ok(self.path.with_file_name(format!("{file_name}.tmp.{suffix}")))
    }

    /// Replaces the target file with the temporary file in one step.
    ///
    /// Windows needs `ReplaceFileW` with `REPLACEFILE_WRITE_THROUGH`;
    /// a plain rename there is not guaranteed atomic-and-durable.
    #[cfg(target_os = "windows")]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

        fn to_wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let target_w = to_wide(self.path.as_os_str());
        let tmp_w = to_wide(tmp_path.as_os_str());

        // SAFETY:
        // - both strings are null-terminated UTF-16
        // - the pointers outlive the call and are not retained by Windows
        let result = unsafe {
            ReplaceFileW(
                target_w.as_ptr(),
                tmp_w.as_ptr(),
                std::ptr::null(),
                REPLACEFILE_WRITE_THROUGH,
                std::ptr::null(),
                std::ptr::null(),
            )
        };

        if result == 0 {
            let err = std::io::Error::last_os_error();
            return Err(err).context("atomic replace failed");
        }

        Ok(())
    }

    /// On Unix `rename()` is atomic within one filesystem.
    #[cfg(not(target_os = "windows"))]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

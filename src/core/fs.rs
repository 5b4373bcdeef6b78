//! Owner-only filesystem helpers.
//!
//! Every artifact the vault writes (key file, credentials file, registry)
//! goes through [`write_private`]. On non-unix targets the mode handling is
//! skipped and the platform defaults apply.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::core::constants::{INSECURE_MODE_MASK, SECURE_FILE_MODE};

/// Write `contents` to `path` with mode 0600, replacing any existing file.
///
/// An existing file keeps its inode, so its mode is reset explicitly after
/// the write.
pub fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SECURE_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;

    set_private(path)
}

/// Write to a sibling temp file, then rename over `path`.
pub fn replace_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    if let Err(e) = write_private(tmp, contents) {
        let _ = fs::remove_file(tmp);
        return Err(e);
    }
    fs::rename(tmp, path).map_err(|e| {
        let _ = fs::remove_file(tmp);
        e
    })
}

/// Reset a file to mode 0600.
pub fn set_private(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(SECURE_FILE_MODE))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Permission bits of a file (`mode & 0o777`), if the platform has them.
pub fn mode_of(metadata: &fs::Metadata) -> Option<u32> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(metadata.permissions().mode() & 0o777)
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        None
    }
}

/// True when no group/other bits are set. Platforms without modes pass.
pub fn is_owner_only(metadata: &fs::Metadata) -> bool {
    mode_of(metadata).map_or(true, |mode| mode & INSECURE_MODE_MASK == 0)
}

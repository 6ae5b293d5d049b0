use super::types::{reconcile, Session};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::Duration;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Primary session file (~/.config/facdash/session.json)
pub fn get_session_path() -> PathBuf {
    crate::config::get_config_dir().join("session.json")
}

/// Mirror session file, kept so a lost primary can be restored
/// (~/.config/facdash/session.bak.json)
pub fn get_session_mirror_path() -> PathBuf {
    crate::config::get_config_dir().join("session.bak.json")
}

fn load_one(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open session file at {}", path.display()))?;

    let session: Session = serde_json::from_reader(file).context("Failed to load session")?;

    if session.version != 1 {
        anyhow::bail!("Unsupported session version: {}", session.version);
    }

    Ok(Some(session))
}

fn save_one(path: &Path, session: &Session) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, session).context("Failed to serialize session")?;

    file.commit().context("Failed to save session")?;

    Ok(())
}

/// Load the current session from explicit locations.
///
/// The two locations are reconciled presence-first (primary wins); a session
/// restored from the mirror is written back to the primary. An expired
/// session is treated as absent. A session that fails to parse is also
/// treated as absent rather than blocking every command.
pub fn load_session_from(primary: &Path, mirror: &Path, ttl: Duration) -> Result<Option<Session>> {
    let from_primary = load_one(primary).unwrap_or(None);
    let from_mirror = load_one(mirror).unwrap_or(None);

    match reconcile(from_primary, from_mirror) {
        None => Ok(None),
        Some((session, _)) if !session.is_live(ttl) => Ok(None),
        Some((session, restored)) => {
            if restored {
                save_one(primary, &session)?;
            }
            Ok(Some(session))
        }
    }
}

/// Load the current session from the default locations.
pub fn load_session(ttl: Duration) -> Result<Option<Session>> {
    load_session_from(&get_session_path(), &get_session_mirror_path(), ttl)
}

/// Save a session to explicit locations, both written atomically.
pub fn save_session_to(primary: &Path, mirror: &Path, session: &Session) -> Result<()> {
    save_one(primary, session)?;
    save_one(mirror, session)?;
    Ok(())
}

/// Save a session to the default locations.
pub fn save_session(session: &Session) -> Result<()> {
    crate::config::ensure_config_dir()?;
    save_session_to(&get_session_path(), &get_session_mirror_path(), session)
}

/// Remove both session files. Returns true if a session existed.
pub fn clear_session_at(primary: &Path, mirror: &Path) -> bool {
    let had_primary = std::fs::remove_file(primary).is_ok();
    let had_mirror = std::fs::remove_file(mirror).is_ok();
    had_primary || had_mirror
}

/// Remove both default session files.
pub fn clear_session() -> bool {
    clear_session_at(&get_session_path(), &get_session_mirror_path())
}

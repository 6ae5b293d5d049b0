use anyhow::{Context, Result};
use std::fmt;

use crate::faculty::TARGET_ID;
use crate::session::Session;
use crate::store::FacultyStore;

#[derive(Debug)]
pub enum AuthError {
    UnknownId(String),
    NameMismatch(String),
    TargetRow,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UnknownId(id) => write!(f, "No faculty record with id '{}'", id),
            AuthError::NameMismatch(id) => {
                write!(f, "Name does not match the record for id '{}'", id)
            }
            AuthError::TargetRow => write!(f, "The target row is not a login identity"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Verify name+id against the record store and start a session.
///
/// Name comparison is case-insensitive (the table mixes "Dr. " prefixes and
/// casings); the id must match exactly. The target row can never log in.
pub async fn login<S: FacultyStore>(store: &S, name: &str, id: &str) -> Result<Session> {
    if id == TARGET_ID {
        return Err(AuthError::TargetRow.into());
    }

    let record = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AuthError::UnknownId(id.to_string()))?;

    if !record.name.eq_ignore_ascii_case(name.trim()) {
        return Err(AuthError::NameMismatch(id.to_string()).into());
    }

    Ok(Session::new(record.id, record.name))
}

/// Prompt for the faculty name on stdin.
pub fn prompt_for_name() -> Result<String> {
    use std::io::{BufRead, Write};

    print!("Faculty name: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut name = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut name)
        .context("Failed to read faculty name")?;

    let name = name.trim();

    if name.is_empty() {
        anyhow::bail!("Faculty name cannot be empty");
    }

    Ok(name.to_string())
}

/// Prompt for the faculty id without echoing it to the terminal.
pub fn prompt_for_id() -> Result<String> {
    let id = rpassword::prompt_password("Faculty id: ").context("Failed to read faculty id")?;

    let id = id.trim();

    if id.is_empty() {
        anyhow::bail!("Faculty id cannot be empty");
    }

    Ok(id.to_string())
}

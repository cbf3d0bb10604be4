// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Enumeration of the sessions that can be picked
//!
//! Widgets read sessions through the row-indexed [`SessionSource`] trait, so any enumeration can be
//! plugged in. The stock implementation is [`SessionList`], which is either scanned from
//! X11/Wayland desktop files or built in memory.

use std::collections::HashSet;
use std::env;
use std::fmt::Debug;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::glob;
use regex::Regex;

use crate::constants::SESSION_DIRS;

/// XDG data directory variable name (parent directory for X11/Wayland sessions)
const XDG_DIR_ENV_VAR: &str = "XDG_DATA_DIRS";

// `(?m)` anchors to line starts, so that `GenericName=` or `Name[de]=` don't match.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Name=(.*)$").expect("Invalid regex for session name"));
static HIDDEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Hidden=(.*)$").expect("Invalid regex for hidden"));
static NO_DISPLAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^NoDisplay=(.*)$").expect("Invalid regex for no display")
});

/// A read-only, row-indexed enumeration of sessions.
///
/// The row count may change between reads; readers are expected to re-read every row when they
/// refresh.
pub trait SessionSource: Debug + Send + Sync {
    /// The number of rows currently available.
    fn row_count(&self) -> usize;

    /// The human readable name of the session in the given row.
    fn display_name(&self, row: usize) -> Option<String>;

    /// The stable key of the session in the given row.
    fn key(&self, row: usize) -> Option<String>;

    /// Find the display name of the session with the given key.
    fn name_of(&self, key: &str) -> Option<String> {
        (0..self.row_count())
            .find(|&row| self.key(row).as_deref() == Some(key))
            .and_then(|row| self.display_name(row))
    }
}

/// A single row of a [`SessionList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Name shown to the user
    pub name: String,
    /// Identifier reported back when the session is chosen
    pub key: String,
}

impl SessionRecord {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// An in-memory session enumeration, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct SessionList {
    records: Vec<SessionRecord>,
}

impl FromIterator<SessionRecord> for SessionList {
    fn from_iter<I: IntoIterator<Item = SessionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl SessionSource for SessionList {
    fn row_count(&self) -> usize {
        self.records.len()
    }

    fn display_name(&self, row: usize) -> Option<String> {
        self.records.get(row).map(|record| record.name.clone())
    }

    fn key(&self, row: usize) -> Option<String> {
        self.records.get(row).map(|record| record.key.clone())
    }
}

impl SessionList {
    /// Sessions shown when running without access to the system's desktop files.
    pub fn demo() -> Self {
        [
            SessionRecord::new("GNOME", "gnome"),
            SessionRecord::new("KDE Plasma", "plasma"),
            SessionRecord::new("Sway", "sway"),
            SessionRecord::new("Xfce", "xfce"),
        ]
        .into_iter()
        .collect()
    }

    /// Scan the X11/Wayland session directories, followed by the given extra directories.
    pub fn from_system(extra_dirs: &[PathBuf]) -> Self {
        let mut dirs = system_session_dirs();
        dirs.extend(extra_dirs.iter().cloned());
        Self::scan(&dirs)
    }

    /// Scan the given directories for session desktop files.
    ///
    /// If the same session key is found in multiple directories, then the first one wins.
    pub fn scan(dirs: &[PathBuf]) -> Self {
        let mut found_keys = HashSet::new();
        let mut records = Vec::new();

        for dir in dirs {
            debug!("Checking session directory: {}", dir.display());
            let pattern = format!("{}/*.desktop", dir.display());
            let paths = match glob(&pattern) {
                Ok(paths) => paths,
                Err(err) => {
                    warn!("Invalid glob pattern '{pattern}': {err}");
                    continue;
                }
            };

            for glob_path in paths {
                let path = match glob_path {
                    Ok(path) => path,
                    Err(err) => {
                        warn!("Error when globbing: {err}");
                        continue;
                    }
                };
                info!("Now scanning session file: {}", path.display());

                let Some(key) = session_key(&path) else {
                    warn!("Non-UTF-8 file stem in session file: {}", path.display());
                    continue;
                };
                if found_keys.contains(&key) {
                    debug!(
                        "Session '{key}' was already found elsewhere, skipping {}",
                        path.display()
                    );
                    continue;
                }

                let text = match read_to_string(&path) {
                    Ok(text) => text,
                    Err(err) => {
                        warn!("Couldn't read session file '{}': {err}", path.display());
                        continue;
                    }
                };

                // Hidden sessions still shadow later ones with the same key.
                found_keys.insert(key.clone());
                if let Some(record) = parse_desktop_entry(&text, &key) {
                    debug!("Found session '{}' with key '{}'", record.name, record.key);
                    records.push(record);
                }
            }
        }

        Self { records }
    }
}

/// Get the session directories, using `XDG_DATA_DIRS` if available, else the compiled ones.
///
/// The XDG env var can change after compilation in some distros like NixOS.
fn system_session_dirs() -> Vec<PathBuf> {
    match env::var(XDG_DIR_ENV_VAR) {
        Ok(parent_dirs) if !parent_dirs.is_empty() => {
            debug!("Found XDG env var {XDG_DIR_ENV_VAR}: {parent_dirs}");
            xdg_session_dirs(&parent_dirs)
        }
        _ => SESSION_DIRS.split(':').map(PathBuf::from).collect(),
    }
}

/// Expand `XDG_DATA_DIRS`-style parent directories into session directories.
fn xdg_session_dirs(parent_dirs: &str) -> Vec<PathBuf> {
    parent_dirs
        .split(':')
        .filter(|parent| !parent.is_empty())
        .flat_map(|parent| {
            let parent = Path::new(parent);
            [parent.join("xsessions"), parent.join("wayland-sessions")]
        })
        .collect()
}

/// The stable key of a session is the stem of its desktop file.
fn session_key(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
}

/// Parse the contents of a session desktop file.
///
/// Returns [`None`] if the session is hidden. The key is used as the name if the file has none.
fn parse_desktop_entry(text: &str, key: &str) -> Option<SessionRecord> {
    let flag = |regex: &Regex| {
        regex
            .captures(text)
            .and_then(|capture| capture.get(1))
            .is_some_and(|value| value.as_str().trim() == "true")
    };
    if flag(&HIDDEN_REGEX) || flag(&NO_DISPLAY_REGEX) {
        debug!("Skipping hidden session: {key}");
        return None;
    }

    let name = match NAME_REGEX.captures(text).and_then(|capture| capture.get(1)) {
        Some(name) if !name.as_str().trim().is_empty() => name.as_str().trim().to_string(),
        _ => {
            debug!("Using key '{key}' as the name, since no name was found");
            key.to_string()
        }
    };

    Some(SessionRecord::new(name, key))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn list_rows_follow_insertion_order() {
        let list: SessionList = [
            SessionRecord::new("GNOME", "gnome"),
            SessionRecord::new("KDE Plasma", "kde"),
        ]
        .into_iter()
        .collect();

        assert_eq!(list.row_count(), 2);
        assert_eq!(list.display_name(1).as_deref(), Some("KDE Plasma"));
        assert_eq!(list.key(0).as_deref(), Some("gnome"));
        assert_eq!(list.key(2), None);
    }

    #[test]
    fn name_is_looked_up_by_key() {
        let list = SessionList::demo();
        assert_eq!(list.name_of("plasma").as_deref(), Some("KDE Plasma"));
        assert_eq!(list.name_of("KDE Plasma"), None);
    }

    #[test]
    fn name_is_read_from_the_name_line() {
        let text = concat!(
            "[Desktop Entry]\n",
            "GenericName=Desktop\n",
            "Name[de]=Plasma (Wayland)\n",
            "Name=Plasma\n",
            "Exec=startplasma-wayland\n",
        );
        assert_eq!(
            parse_desktop_entry(text, "plasma"),
            Some(SessionRecord::new("Plasma", "plasma"))
        );
    }

    #[test]
    fn key_is_used_when_name_is_missing() {
        let text = "[Desktop Entry]\nExec=sway\n";
        assert_eq!(
            parse_desktop_entry(text, "sway"),
            Some(SessionRecord::new("sway", "sway"))
        );
    }

    #[test_case("Hidden=true" ; "hidden")]
    #[test_case("NoDisplay=true" ; "no display")]
    fn hidden_sessions_are_skipped(flag: &str) {
        let text = format!("[Desktop Entry]\nName=Fallback\n{flag}\n");
        assert_eq!(parse_desktop_entry(&text, "fallback"), None);
    }

    #[test]
    fn false_flags_keep_the_session() {
        let text = "[Desktop Entry]\nName=Xfce\nHidden=false\nNoDisplay=false\n";
        assert!(parse_desktop_entry(text, "xfce").is_some());
    }

    #[test]
    fn xdg_dirs_expand_to_both_session_kinds() {
        assert_eq!(
            xdg_session_dirs("/usr/share::/usr/local/share"),
            [
                PathBuf::from("/usr/share/xsessions"),
                PathBuf::from("/usr/share/wayland-sessions"),
                PathBuf::from("/usr/local/share/xsessions"),
                PathBuf::from("/usr/local/share/wayland-sessions"),
            ]
        );
    }

    #[test]
    fn scan_skips_missing_directories() {
        let list = SessionList::scan(&[PathBuf::from("/nonexistent/sessgreet/sessions")]);
        assert_eq!(list.row_count(), 0);
    }
}

// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Convenient TOML loading utilities

use std::fs::read_to_string;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Contains possible errors when loading TOML from disk
#[derive(thiserror::Error, Debug)]
pub enum TomlFileError {
    #[error("I/O error")]
    IO(#[from] std::io::Error),
    #[error("Error decoding TOML file contents")]
    TomlDecode(#[from] toml::de::Error),
}

pub type TomlFileResult<T> = Result<T, TomlFileError>;

/// Load the TOML file from disk without any checks.
fn load_raw_toml<T: DeserializeOwned>(path: &Path) -> TomlFileResult<T> {
    Ok(toml::from_str(&read_to_string(path)?)?)
}

/// Load the TOML file from disk.
///
/// If loading fails, then this returns the default value of the struct.
pub fn load_toml<P, R>(path: P) -> R
where
    P: AsRef<Path>,
    R: DeserializeOwned + Default,
{
    let path = path.as_ref();
    if !path.exists() {
        warn!("Missing TOML file: {}", path.display());
        return R::default();
    }

    match load_raw_toml(path) {
        Ok(item) => {
            info!("Loaded TOML file: {}", path.display());
            item
        }
        Err(err) => {
            warn!("Error loading TOML file '{}': {err}", path.display());
            R::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env::temp_dir;
    use std::fs::{remove_file, write};

    use serde::Deserialize;

    use super::*;

    #[derive(Default, Deserialize, Debug, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn missing_file_gives_default() {
        let item: Sample = load_toml("/nonexistent/sessgreet/sample.toml");
        assert_eq!(item, Sample::default());
    }

    #[test]
    fn malformed_file_gives_default() {
        let path = temp_dir().join(format!("sessgreet-malformed-{}.toml", std::process::id()));
        write(&path, "name = [unterminated").expect("Couldn't write temporary TOML file");

        let item: Sample = load_toml(&path);
        remove_file(&path).ok();
        assert_eq!(item, Sample::default());
    }

    #[test]
    fn valid_file_is_decoded() {
        let path = temp_dir().join(format!("sessgreet-valid-{}.toml", std::process::id()));
        write(&path, "name = \"gnome\"\ncount = 2\n").expect("Couldn't write temporary TOML file");

        let item: Sample = load_toml(&path);
        remove_file(&path).ok();
        assert_eq!(
            item,
            Sample {
                name: "gnome".into(),
                count: 2
            }
        );
    }
}

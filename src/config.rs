// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for the greeter

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::IMAGE_DIR;
use crate::tomlutils::load_toml;

/// Struct holding all supported GTK settings
#[derive(Default, Deserialize)]
pub struct GtkSettings {
    #[serde(default)]
    pub application_prefer_dark_theme: bool,
    #[serde(default)]
    pub cursor_theme_name: Option<String>,
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub icon_theme_name: Option<String>,
    #[serde(default)]
    pub theme_name: Option<String>,
}

/// The configuration struct
#[derive(Default, Deserialize)]
pub struct Config {
    /// Key of the session that is marked as the default one
    #[serde(default)]
    default_session: Option<String>,
    /// Directory holding the session badges
    #[serde(default)]
    image_dir: Option<PathBuf>,
    /// Extra directories that are searched for session desktop files
    #[serde(default)]
    session_dirs: Vec<PathBuf>,
    #[serde(default, rename = "GTK")]
    gtk: Option<GtkSettings>,
}

impl Config {
    pub fn new(path: &Path) -> Self {
        load_toml(path)
    }

    pub fn get_default_session(&self) -> Option<&str> {
        self.default_session.as_deref()
    }

    pub fn get_image_dir(&self) -> &Path {
        self.image_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(IMAGE_DIR))
    }

    pub fn get_session_dirs(&self) -> &[PathBuf] {
        &self.session_dirs
    }

    pub fn get_gtk_settings(&self) -> &Option<GtkSettings> {
        &self.gtk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_compiled_defaults() {
        let config: Config = toml::from_str("").expect("Empty config should parse");
        assert_eq!(config.get_default_session(), None);
        assert_eq!(config.get_image_dir(), Path::new(IMAGE_DIR));
        assert!(config.get_session_dirs().is_empty());
        assert!(config.get_gtk_settings().is_none());
    }

    #[test]
    fn full_config_is_read() {
        let config: Config = toml::from_str(
            r#"
            default_session = "gnome"
            image_dir = "/opt/greeter/images"
            session_dirs = ["/opt/sessions"]

            [GTK]
            application_prefer_dark_theme = true
            icon_theme_name = "Adwaita"
            "#,
        )
        .expect("Config should parse");

        assert_eq!(config.get_default_session(), Some("gnome"));
        assert_eq!(config.get_image_dir(), Path::new("/opt/greeter/images"));
        assert_eq!(config.get_session_dirs(), [PathBuf::from("/opt/sessions")]);

        let gtk = config.get_gtk_settings().as_ref().expect("GTK settings missing");
        assert!(gtk.application_prefer_dark_theme);
        assert_eq!(gtk.icon_theme_name.as_deref(), Some("Adwaita"));
        assert_eq!(gtk.theme_name, None);
    }
}

// SPDX-FileCopyrightText: 2025 max-ishere <47008271+max-ishere@users.noreply.github.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Icon names and icon path resolution

use std::path::{Path, PathBuf};

use relm4::gtk;

macro_rules! icons {
    ($($name:ident = $value:expr),+$(,)?) => {
        $(pub const $name: &str = $value;)+
    };
}

icons![
    BACK = "go-previous-symbolic",
    BACK_PRESSED = "go-previous",
    CAPS_LOCK = "dialog-warning-symbolic",
    SHOW_TEXT = "view-reveal-symbolic",
    HIDE_TEXT = "view-conceal-symbolic",
    SUBMIT = "go-next-symbolic",
    SESSION = "preferences-desktop-display-symbolic",
];

/// Resolve the badge of a session from its display name.
///
/// No fallback exists; if the file is missing, the badge simply shows nothing.
pub fn session_icon(image_dir: &Path, name: &str) -> PathBuf {
    image_dir
        .join("badges")
        .join(format!("{}_badge-symbolic.svg", name.to_lowercase()))
}

/// Something that can be drawn as an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    /// An icon from the icon theme
    Named(String),
    /// An image file
    File(PathBuf),
}

impl From<&str> for Glyph {
    /// Anything that looks like a path is a file, everything else is a themed icon.
    fn from(value: &str) -> Self {
        if value.contains('/') {
            Self::File(value.into())
        } else {
            Self::Named(value.into())
        }
    }
}

pub trait ImageGlyphExt {
    /// Show the glyph, or nothing if there is none.
    fn set_glyph(&self, glyph: Option<&Glyph>);
}

impl ImageGlyphExt for gtk::Image {
    fn set_glyph(&self, glyph: Option<&Glyph>) {
        match glyph {
            Some(Glyph::Named(name)) => self.set_icon_name(Some(name.as_str())),
            Some(Glyph::File(path)) => self.set_from_file(Some(path)),
            None => self.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("GNOME", "gnome_badge-symbolic.svg" ; "uppercase")]
    #[test_case("KDE Plasma", "kde plasma_badge-symbolic.svg" ; "with space")]
    #[test_case("sway", "sway_badge-symbolic.svg" ; "lowercase")]
    fn badge_path_uses_lowercased_name(name: &str, expected: &str) {
        assert_eq!(
            session_icon(Path::new("/usr/share/greeter/images"), name),
            Path::new("/usr/share/greeter/images/badges").join(expected)
        );
    }

    #[test_case("go-next-symbolic", Glyph::Named("go-next-symbolic".into()) ; "icon name")]
    #[test_case("/opt/login.svg", Glyph::File("/opt/login.svg".into()) ; "absolute path")]
    #[test_case("images/login.svg", Glyph::File("images/login.svg".into()) ; "relative path")]
    fn glyph_kind_is_guessed(value: &str, expected: Glyph) {
        assert_eq!(Glyph::from(value), expected);
    }
}

// SPDX-FileCopyrightText: 2025 max-ishere <47008271+max-ishere@users.noreply.github.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Internationalization
//!
//! Firstly select the languages with [`init`]. Then use the [`fl`] macro to request a string by id.
//! Until [`init`] is called, strings come from the embedded `en-US` fallback.

use std::sync::LazyLock;

use i18n_embed::{
    fluent::{fluent_language_loader, FluentLanguageLoader},
    DefaultLocalizer, DesktopLanguageRequester, LanguageLoader as _, Localizer,
};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localizations;

/// Applies the languages requested by the desktop environment (`LANG`, `LC_ALL`, ...).
pub fn init_from_desktop() {
    init(&DesktopLanguageRequester::requested_languages());
}

/// Applies the requested language(s) to be used when calling the `fl!()` macro.
pub fn init(requested_languages: &[LanguageIdentifier]) {
    match localizer().select(requested_languages) {
        Ok(selected) => debug!("Selected languages: {selected:?}"),
        Err(err) => error!("Error while loading fluent localizations: {err}"),
    }
}

/// Get the `Localizer` to be used for localizing this crate.
#[must_use]
fn localizer() -> Box<dyn Localizer> {
    Box::from(DefaultLocalizer::new(&*LANGUAGE_LOADER, &Localizations))
}

pub static LANGUAGE_LOADER: LazyLock<FluentLanguageLoader> = LazyLock::new(|| {
    let loader: FluentLanguageLoader = fluent_language_loader!();

    loader
        .load_fallback_language(&Localizations)
        .expect("Error while loading fallback language");

    // Keep the Unicode isolation marks out of labels that embed session names.
    loader.set_use_isolating(false);

    loader
});

/// Request a localized string by ID.
#[macro_export]
macro_rules! fl {
    ($message_id:literal) => {{
        i18n_embed_fl::fl!($crate::i18n::LANGUAGE_LOADER, $message_id)
    }};

    ($message_id:literal, $($args:expr),*) => {{
        i18n_embed_fl::fl!($crate::i18n::LANGUAGE_LOADER, $message_id, $($args), *)
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn fallback_strings_are_embedded() {
        assert_eq!(fl!("session-default-marker"), "(Default)");
        assert_eq!(
            fl!("submitted-message", session = "GNOME"),
            "Credentials submitted for GNOME"
        );
    }
}

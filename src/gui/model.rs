// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! The main logic for the greeter window

use std::sync::Arc;

use relm4::{gtk::prelude::*, ComponentController, Controller};

use crate::config::Config;
use crate::fl;
use crate::gui::widget::{
    credential_field::{CredentialField, CredentialFieldMsg},
    session_picker::{SessionPicker, SessionPickerMsg},
};
use crate::sessions::SessionSource;

/// The pages of the greeter window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Page {
    Login,
    Sessions,
}

impl Page {
    pub(super) const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Sessions => "sessions",
        }
    }
}

// Fields only set by the model, that are meant to be read only by the widgets
#[tracker::track]
pub(super) struct Updates {
    /// The message to be shown to the user
    pub(super) message: String,
    /// The visible page
    pub(super) page: Page,
    /// Key of the chosen session
    pub(super) session_key: Option<String>,
    /// Name of the chosen session, as shown on the session button
    pub(super) session_name: String,
}

/// Greeter model that holds its state
pub struct Greeter {
    /// The sessions offered by the session picker
    pub(super) sessions: Arc<dyn SessionSource>,
    pub(super) credential: Controller<CredentialField>,
    pub(super) picker: Controller<SessionPicker>,
    /// The updates from the model that are read by the view
    pub(super) updates: Updates,
}

/// Choose the session shown initially: the default one if it exists, else the first one.
pub(super) fn initial_session(
    sessions: &dyn SessionSource,
    default_key: Option<&str>,
) -> Option<String> {
    default_key
        .filter(|key| sessions.name_of(key).is_some())
        .map(String::from)
        .or_else(|| (0..sessions.row_count()).find_map(|row| sessions.key(row)))
}

impl Greeter {
    pub(super) fn new(
        config: &Config,
        sessions: Arc<dyn SessionSource>,
        credential: Controller<CredentialField>,
        picker: Controller<SessionPicker>,
    ) -> Self {
        let session_key = initial_session(sessions.as_ref(), config.get_default_session());
        let session_name = session_display_name(sessions.as_ref(), session_key.as_deref());
        if let Some(key) = &session_key {
            picker.emit(SessionPickerMsg::SelectByKey(key.clone()));
        } else {
            warn!("No sessions found");
        }

        Self {
            sessions,
            credential,
            picker,
            updates: Updates {
                message: fl!("welcome-message"),
                page: Page::Login,
                session_key,
                session_name,
                tracker: 0,
            },
        }
    }

    /// Event handler for submitting the credential field
    ///
    /// No authentication happens here; the field is cleared for the next attempt.
    pub(super) fn submit_handler(&mut self, credential: &str) {
        let session = self.updates.session_name.clone();
        info!(
            "Credentials of length {} submitted for session '{}'",
            credential.chars().count(),
            self.updates.session_key.as_deref().unwrap_or_default()
        );
        // Hold off further edits while the attempt is being handled.
        self.credential.emit(CredentialFieldMsg::SetWaiting(true));
        self.updates
            .set_message(fl!("submitted-message", session = session));
        self.credential.emit(CredentialFieldMsg::Clear);
        self.credential.emit(CredentialFieldMsg::SetWaiting(false));
    }

    /// Event handler for opening the session picker
    pub(super) fn show_sessions_handler(&mut self) {
        // Re-read the sessions, since the source may have changed since the last time.
        self.picker
            .emit(SessionPickerMsg::Initialize(Some(Arc::clone(&self.sessions))));
        if let Some(key) = &self.updates.session_key {
            self.picker.emit(SessionPickerMsg::SelectByKey(key.clone()));
        }
        self.updates.set_page(Page::Sessions);
    }

    /// Event handler for choosing a session in the session picker
    pub(super) fn session_selected_handler(&mut self, key: String) {
        debug!("Switching to session: {key}");
        let name = session_display_name(self.sessions.as_ref(), Some(&key));
        self.updates.set_session_name(name);
        self.updates.set_session_key(Some(key));
    }

    /// Event handler for leaving the session picker
    pub(super) fn hide_sessions_handler(&mut self) {
        self.updates.set_page(Page::Login);
        self.credential.widget().grab_focus();
    }
}

/// The name of a session, or a placeholder if there is none.
fn session_display_name(sessions: &dyn SessionSource, key: Option<&str>) -> String {
    key.and_then(|key| sessions.name_of(key).or_else(|| Some(key.to_string())))
        .unwrap_or_else(|| fl!("no-session-selected"))
}

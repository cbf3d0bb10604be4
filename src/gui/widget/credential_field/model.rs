// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! State and behaviour of the credential field

use educe::Educe;

use crate::gui::icons::Glyph;

/// How the content of the field is displayed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EchoMode {
    /// Every character is replaced by a bullet.
    #[default]
    Masked,
    Plain,
}

impl EchoMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Masked => Self::Plain,
            Self::Plain => Self::Masked,
        }
    }
}

/// Events sent to the owner of the field
#[derive(Educe, PartialEq)]
#[educe(Debug)]
pub enum CredentialFieldOutput {
    /// The primary action was triggered, carrying the current content.
    Clicked(#[educe(Debug(ignore))] String),
    /// The entry lost the keyboard focus.
    FocusOut,
}

// Fields only set by the model, that are meant to be read only by the view
#[tracker::track]
#[derive(Debug)]
pub(super) struct FieldState {
    /// The label shown above the entry
    pub(super) prompt: String,
    /// The content of the entry
    pub(super) text: String,
    pub(super) mode: EchoMode,
    /// Whether the caps-lock warning is shown
    pub(super) caps_lock: bool,
    /// Whether input is blocked while the owner is busy
    pub(super) waiting: bool,
    /// Whether the owner asked for the icon button
    pub(super) icon_button: bool,
    /// The glyph of the icon button
    pub(super) icon_glyph: Option<Glyph>,
}

/// A labelled text field with a masked mode, a caps-lock warning and an optional icon button
#[derive(Debug)]
pub struct CredentialField {
    pub(super) state: FieldState,
}

impl CredentialField {
    pub fn new(prompt: String, mode: EchoMode, icon: Option<Glyph>) -> Self {
        Self {
            state: FieldState {
                prompt,
                text: String::new(),
                mode,
                caps_lock: false,
                waiting: false,
                icon_button: icon.is_some(),
                icon_glyph: icon,
                tracker: 0,
            },
        }
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.state.set_prompt(prompt);
    }

    /// Switch the display mode, keeping the content.
    pub fn set_type(&mut self, mode: EchoMode) {
        self.state.set_mode(mode);
    }

    pub fn toggle_type(&mut self) {
        let mode = self.state.mode.toggled();
        self.state.set_mode(mode);
    }

    pub fn mode(&self) -> EchoMode {
        self.state.mode
    }

    pub fn set_text(&mut self, text: String) {
        self.state.set_text(text);
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn clear(&mut self) {
        self.state.set_text(String::new());
    }

    /// Accept text typed into the entry.
    ///
    /// Returns whether the text was accepted. While waiting, the entry is asked to show the stored
    /// content again.
    pub fn type_text(&mut self, text: String) -> bool {
        if self.state.waiting {
            if text != self.state.text {
                self.state.update_text(|_| ());
            }
            return false;
        }
        // The entry already shows this text, so it is not tracked.
        self.state.text = text;
        true
    }

    pub fn set_waiting(&mut self, waiting: bool) {
        self.state.set_waiting(waiting);
    }

    pub fn is_waiting(&self) -> bool {
        self.state.waiting
    }

    /// Show or hide the icon button, replacing its glyph if one is given.
    pub fn show_icon_button(&mut self, visible: bool, glyph: Option<Glyph>) {
        self.state.set_icon_button(visible);
        if glyph.is_some() {
            self.state.set_icon_glyph(glyph);
        }
    }

    /// Whether the icon button is currently usable.
    pub fn icon_button_visible(&self) -> bool {
        self.state.icon_button && !self.state.waiting
    }

    pub fn on_caps_state_changed(&mut self, caps_lock: bool) {
        self.state.set_caps_lock(caps_lock);
    }

    pub fn caps_lock_shown(&self) -> bool {
        self.state.caps_lock
    }

    /// Trigger the primary action.
    ///
    /// Nothing is emitted while waiting.
    pub fn activate(&self) -> Option<CredentialFieldOutput> {
        if self.state.waiting {
            debug!("Ignoring activation while waiting");
            return None;
        }
        Some(CredentialFieldOutput::Clicked(self.state.text.clone()))
    }

    pub fn focus_out(&self) -> CredentialFieldOutput {
        CredentialFieldOutput::FocusOut
    }

    /// Forget which state fields changed since the last view update.
    pub(super) fn reset_tracking(&mut self) {
        self.state.reset();
    }
}

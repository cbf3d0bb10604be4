// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! A text field for passwords and other credentials.
//!
//! The owner drives the field with [`CredentialFieldMsg`] and receives [`CredentialFieldOutput`]s.
//! The field never validates its content.

mod model;

use educe::Educe;
use relm4::{
    gtk::{self, prelude::*},
    prelude::*,
};

pub use self::model::{CredentialField, CredentialFieldOutput, EchoMode};
use self::model::FieldState;
use crate::{
    fl,
    gui::{
        icons::{self, Glyph, ImageGlyphExt},
        GAP,
    },
};

/// Initial look of the credential field
#[derive(Debug, Default)]
pub struct CredentialFieldInit {
    pub prompt: String,
    pub mode: EchoMode,
    /// The glyph of the icon button; the button is hidden if this is [`None`].
    pub icon: Option<Glyph>,
}

#[derive(Educe)]
#[educe(Debug)]
pub enum CredentialFieldMsg {
    SetPrompt(String),
    SetType(EchoMode),
    /// Flip between the masked and plain display.
    ToggleType,
    SetText(#[educe(Debug(ignore))] String),
    Clear,
    /// Block input while the owner is busy with the content.
    SetWaiting(bool),
    ShowIconButton {
        visible: bool,
        glyph: Option<Glyph>,
    },
    CapsStateChanged(bool),
    /// The user edited the entry.
    Edited(#[educe(Debug(ignore))] String),
    /// The user pressed Return or the icon button.
    Activate,
    FocusOut,
}

fn mode_icon(mode: EchoMode) -> &'static str {
    match mode {
        EchoMode::Masked => icons::SHOW_TEXT,
        EchoMode::Plain => icons::HIDE_TEXT,
    }
}

fn mode_tooltip(mode: EchoMode) -> String {
    match mode {
        EchoMode::Masked => fl!("show-password-tooltip"),
        EchoMode::Plain => fl!("hide-password-tooltip"),
    }
}

/// Follow the caps-lock state of the default keyboard, if there is one.
fn watch_caps_lock(root: &gtk::Box, sender: &ComponentSender<CredentialField>) {
    let Some(keyboard) = root.display().default_seat().and_then(|seat| seat.keyboard()) else {
        info!("No keyboard found; caps-lock warnings depend on the owner");
        return;
    };

    sender.input(CredentialFieldMsg::CapsStateChanged(
        keyboard.is_caps_locked(),
    ));
    let sender = sender.clone();
    keyboard.connect_caps_lock_state_notify(move |keyboard| {
        sender.input(CredentialFieldMsg::CapsStateChanged(
            keyboard.is_caps_locked(),
        ));
    });
}

#[relm4::component(pub)]
impl Component for CredentialField {
    type Init = CredentialFieldInit;
    type Input = CredentialFieldMsg;
    type Output = CredentialFieldOutput;
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: GAP / 3,

            gtk::Label {
                set_xalign: 0.0,
                #[track(model.state.changed(FieldState::prompt()))]
                set_label: &model.state.prompt,
            },

            gtk::Box {
                set_spacing: GAP / 3,

                gtk::Entry {
                    set_hexpand: true,
                    #[track(model.state.changed(FieldState::mode()))]
                    set_visibility: model.state.mode == EchoMode::Plain,
                    #[track(model.state.changed(FieldState::waiting()))]
                    set_sensitive: !model.state.waiting,
                    #[track(model.state.changed(FieldState::text()))]
                    set_text: &model.state.text,

                    connect_changed[sender] => move |entry| {
                        sender.input(CredentialFieldMsg::Edited(entry.text().to_string()));
                    },
                    connect_activate[sender] => move |_| {
                        sender.input(CredentialFieldMsg::Activate);
                    },

                    add_controller = gtk::EventControllerFocus {
                        connect_leave[sender] => move |_| {
                            sender.input(CredentialFieldMsg::FocusOut);
                        },
                    },
                },

                gtk::Image {
                    set_icon_name: Some(icons::CAPS_LOCK),
                    set_tooltip_text: Some(&fl!("caps-lock-warning")),
                    #[track(model.state.changed(FieldState::caps_lock()))]
                    set_visible: model.state.caps_lock,
                },

                gtk::Button {
                    set_focusable: false,
                    #[track(model.state.changed(FieldState::mode()))]
                    set_icon_name: mode_icon(model.state.mode),
                    #[track(model.state.changed(FieldState::mode()))]
                    set_tooltip_text: Some(&mode_tooltip(model.state.mode)),
                    connect_clicked => CredentialFieldMsg::ToggleType,
                },

                gtk::Button {
                    set_tooltip_text: Some(&fl!("submit-tooltip")),
                    #[track(
                        model.state.changed(FieldState::icon_button())
                        || model.state.changed(FieldState::waiting())
                    )]
                    set_visible: model.icon_button_visible(),
                    connect_clicked => CredentialFieldMsg::Activate,

                    #[wrap(Some)]
                    set_child = &gtk::Image {
                        #[track(model.state.changed(FieldState::icon_glyph()))]
                        set_glyph: model.state.icon_glyph.as_ref(),
                    },
                },
            },
        }
    }

    fn init(
        CredentialFieldInit { prompt, mode, icon }: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        watch_caps_lock(&root, &sender);

        let model = Self::new(prompt, mode, icon);
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _: &Self::Root) {
        // Reset the tracker for update changes.
        self.reset_tracking();

        use CredentialFieldMsg as M;
        let output = match msg {
            M::SetPrompt(prompt) => {
                self.set_prompt(prompt);
                None
            }
            M::SetType(mode) => {
                self.set_type(mode);
                None
            }
            M::ToggleType => {
                self.toggle_type();
                None
            }
            M::SetText(text) => {
                self.set_text(text);
                None
            }
            M::Clear => {
                self.clear();
                None
            }
            M::SetWaiting(waiting) => {
                debug!("Credential field waiting: {waiting}");
                self.set_waiting(waiting);
                None
            }
            M::ShowIconButton { visible, glyph } => {
                self.show_icon_button(visible, glyph);
                None
            }
            M::CapsStateChanged(caps_lock) => {
                self.on_caps_state_changed(caps_lock);
                None
            }
            M::Edited(text) => {
                if !self.type_text(text) {
                    debug!("Ignoring edit while waiting");
                }
                None
            }
            M::Activate => self.activate(),
            M::FocusOut => Some(self.focus_out()),
        };

        if let Some(output) = output {
            if sender.output(output).is_err() {
                debug!("Credential field output dropped: nobody is listening");
            }
        }
    }
}

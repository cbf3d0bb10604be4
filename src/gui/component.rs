// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Setup for using the greeter as a Relm4 component

use std::path::PathBuf;
use std::sync::Arc;

use gtk::prelude::*;
use relm4::{gtk, prelude::*};

use super::icons::{self, Glyph};
use super::messages::InputMsg;
use super::model::{Greeter, Page, Updates};
use super::widget::{
    credential_field::{CredentialField, CredentialFieldInit, CredentialFieldOutput, EchoMode},
    session_picker::{SessionPicker, SessionPickerInit, SessionPickerOutput},
};
use super::GAP;
use crate::config::Config;
use crate::fl;
use crate::sessions::{SessionList, SessionSource};

/// Initial configuration of the greeter window
pub struct GreeterInit {
    pub config_path: PathBuf,
    /// Use fixed sessions and stay windowed.
    pub demo: bool,
}

/// Load GTK settings from the greeter config.
fn setup_settings(config: &Config, root: &gtk::ApplicationWindow) {
    let settings = root.settings();
    let Some(config) = config.get_gtk_settings() else {
        return;
    };

    debug!(
        "Setting dark theme: {}",
        config.application_prefer_dark_theme
    );
    settings.set_gtk_application_prefer_dark_theme(config.application_prefer_dark_theme);

    if let Some(cursor_theme) = &config.cursor_theme_name {
        debug!("Setting cursor theme: {cursor_theme}");
        settings.set_gtk_cursor_theme_name(config.cursor_theme_name.as_deref());
    };

    if let Some(font) = &config.font_name {
        debug!("Setting font: {font}");
        settings.set_gtk_font_name(config.font_name.as_deref());
    };

    if let Some(icon_theme) = &config.icon_theme_name {
        debug!("Setting icon theme: {icon_theme}");
        settings.set_gtk_icon_theme_name(config.icon_theme_name.as_deref());
    };

    if let Some(theme) = &config.theme_name {
        debug!("Setting theme: {theme}");
        settings.set_gtk_theme_name(config.theme_name.as_deref());
    };
}

#[relm4::component(pub)]
impl Component for Greeter {
    type Input = InputMsg;
    type Output = ();
    type Init = GreeterInit;
    type CommandOutput = ();

    view! {
        gtk::ApplicationWindow {
            set_default_size: (1024, 768),
            set_visible: true,

            gtk::Stack {
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,
                set_transition_type: gtk::StackTransitionType::Crossfade,

                add_named[Some(Page::Login.name())] = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: GAP,
                    set_width_request: 400,

                    gtk::Label {
                        set_xalign: 0.0,
                        #[track(model.updates.changed(Updates::message()))]
                        set_label: &model.updates.message,
                    },

                    append: model.credential.widget(),

                    gtk::Button {
                        set_halign: gtk::Align::Start,
                        set_tooltip_text: Some(&fl!("session-button-tooltip")),
                        connect_clicked => InputMsg::ShowSessions,

                        #[wrap(Some)]
                        set_child = &gtk::Box {
                            set_spacing: GAP / 3,

                            gtk::Image {
                                set_icon_name: Some(icons::SESSION),
                            },
                            gtk::Label {
                                #[track(model.updates.changed(Updates::session_name()))]
                                set_label: &model.updates.session_name,
                            },
                        },
                    },
                },

                add_named: (model.picker.widget(), Some(Page::Sessions.name())),

                #[track(model.updates.changed(Updates::page()))]
                set_visible_child_name: model.updates.page.name(),
            },
        }
    }

    /// Initialize the greeter.
    fn init(
        GreeterInit { config_path, demo }: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let config = Config::new(&config_path);

        let sessions: Arc<dyn SessionSource> = if demo {
            info!("Demo mode: using fixed sessions");
            Arc::new(SessionList::demo())
        } else {
            Arc::new(SessionList::from_system(config.get_session_dirs()))
        };

        let credential = CredentialField::builder()
            .launch(CredentialFieldInit {
                prompt: fl!("password-prompt"),
                mode: EchoMode::Masked,
                icon: Some(Glyph::Named(icons::SUBMIT.into())),
            })
            .forward(sender.input_sender(), |output| match output {
                CredentialFieldOutput::Clicked(text) => InputMsg::Submit(text),
                CredentialFieldOutput::FocusOut => InputMsg::CredentialFocusLost,
            });

        let picker = SessionPicker::builder()
            .launch(SessionPickerInit {
                source: Some(Arc::clone(&sessions)),
                default_key: config.get_default_session().map(String::from),
                image_dir: config.get_image_dir().to_path_buf(),
            })
            .forward(sender.input_sender(), |output| match output {
                SessionPickerOutput::SessionSelected(key) => InputMsg::SessionSelected(key),
                SessionPickerOutput::Back => InputMsg::HideSessions,
            });

        setup_settings(&config, &root);
        if !demo {
            root.fullscreen();
        }

        let model = Greeter::new(&config, sessions, credential, picker);
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _: ComponentSender<Self>, _: &Self::Root) {
        debug!("Got input message: {msg:?}");

        // Reset the tracker for update changes.
        self.updates.reset();

        match msg {
            InputMsg::Submit(credential) => self.submit_handler(&credential),
            InputMsg::CredentialFocusLost => debug!("Credential field lost focus"),
            InputMsg::ShowSessions => self.show_sessions_handler(),
            InputMsg::SessionSelected(key) => self.session_selected_handler(key),
            InputMsg::HideSessions => self.hide_sessions_handler(),
        }
    }
}

// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! A panel for choosing the session to log into.
//!
//! The sessions come from an injected [`SessionSource`]. Tab/Down and Up/Shift+Tab move through the
//! list, wrapping around at both ends. Return, Escape, a click on a row or on the back button
//! report the highlighted session with [`SessionPickerOutput::SessionSelected`], immediately
//! followed by [`SessionPickerOutput::Back`].

mod model;
mod rows;

use std::path::PathBuf;
use std::sync::Arc;

use relm4::{
    gtk::{self, gdk, glib, glib::markup_escape_text, prelude::*},
    prelude::*,
};

pub use self::model::{
    Navigation, SessionEntry, SessionPicker, SessionPickerOutput, SessionRow,
};
use self::model::{PickerState, PANEL_WIDTH, ROW_SPACING};
use self::rows::SessionRowsExt;
use crate::{
    fl,
    gui::{icons, GAP},
    sessions::SessionSource,
};

pub struct SessionPickerInit {
    /// Where the sessions are read from; nothing is shown if this is [`None`].
    pub source: Option<Arc<dyn SessionSource>>,
    /// Key of the session that is marked as the default one
    pub default_key: Option<String>,
    /// Directory holding the session badges
    pub image_dir: PathBuf,
}

#[derive(Debug)]
pub enum SessionPickerMsg {
    /// Re-read all sessions from the source. An absent source keeps the current sessions.
    Initialize(Option<Arc<dyn SessionSource>>),
    /// Highlight the session with this key, if it exists.
    SelectByKey(String),
    SetDefaultKey(Option<String>),
    Navigate(Navigation),
    /// A row was clicked.
    RowActivated(usize),
    BackPressed,
    BackReleased,
    /// The press on the back button ended without a release.
    BackCancelled,
}

#[relm4::component(pub)]
impl Component for SessionPicker {
    type Init = SessionPickerInit;
    type Input = SessionPickerMsg;
    type Output = SessionPickerOutput;
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_width_request: PANEL_WIDTH,
            #[track(model.state.changed(PickerState::entries()))]
            set_height_request: model.panel_height(),

            add_controller = gtk::EventControllerKey {
                set_propagation_phase: gtk::PropagationPhase::Capture,
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match Navigation::from_key(key) {
                        Some(navigation) => {
                            sender.input(SessionPickerMsg::Navigate(navigation));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                },
            },

            gtk::Box {
                set_spacing: GAP,
                set_margin_bottom: ROW_SPACING,

                gtk::Image {
                    set_pixel_size: 32,
                    set_valign: gtk::Align::Start,
                    set_tooltip_text: Some(&fl!("session-picker-back-tooltip")),
                    #[track(model.state.changed(PickerState::back_pressed()))]
                    set_icon_name: Some(if model.state.back_pressed {
                        icons::BACK_PRESSED
                    } else {
                        icons::BACK
                    }),

                    add_controller = gtk::GestureClick {
                        set_button: gdk::BUTTON_PRIMARY,
                        connect_pressed[sender] => move |_, _, _, _| {
                            sender.input(SessionPickerMsg::BackPressed);
                        },
                        connect_released[sender] => move |_, _, _, _| {
                            sender.input(SessionPickerMsg::BackReleased);
                        },
                        connect_stopped[sender] => move |_| {
                            sender.input(SessionPickerMsg::BackCancelled);
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(SessionPickerMsg::BackCancelled);
                        },
                    },
                },

                gtk::Label {
                    set_hexpand: true,
                    set_xalign: 1.0,
                    set_markup: &format!(
                        "<big>{}</big>",
                        markup_escape_text(&fl!("session-picker-prompt"))
                    ),
                },
            },

            gtk::ListBox {
                set_selection_mode: gtk::SelectionMode::Single,
                set_halign: gtk::Align::End,
                set_width_request: PANEL_WIDTH - 250,
                add_css_class: "navigation-sidebar",

                #[track(
                    model.state.changed(PickerState::entries())
                    || model.state.changed(PickerState::default_key())
                )]
                replace_rows: &model.rows(),
                #[track(
                    model.state.changed(PickerState::entries())
                    || model.state.changed(PickerState::default_key())
                    || model.state.changed(PickerState::highlighted())
                )]
                select_index: model.highlighted(),

                connect_row_activated[sender] => move |_, row| {
                    match usize::try_from(row.index()) {
                        Ok(index) => sender.input(SessionPickerMsg::RowActivated(index)),
                        Err(_) => warn!("Activated a row that isn't in the list"),
                    }
                },
            },
        }
    }

    fn init(
        SessionPickerInit {
            source,
            default_key,
            image_dir,
        }: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let mut model = Self::new(image_dir, default_key);
        model.initialize(source.as_deref());

        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _: &Self::Root) {
        // Reset the tracker for update changes.
        self.reset_tracking();

        use SessionPickerMsg as M;
        let outputs = match msg {
            M::Initialize(source) => {
                self.initialize(source.as_deref());
                Vec::new()
            }
            M::SelectByKey(key) => {
                self.select_by_key(&key);
                Vec::new()
            }
            M::SetDefaultKey(key) => {
                self.set_default_key(key);
                Vec::new()
            }
            M::Navigate(navigation) => self.navigate(navigation),
            M::RowActivated(index) => self.activate_row(index),
            M::BackPressed => {
                self.press_back();
                Vec::new()
            }
            M::BackReleased => self.release_back(),
            M::BackCancelled => {
                self.cancel_back();
                Vec::new()
            }
        };

        for output in outputs {
            if sender.output(output).is_err() {
                debug!("Session picker output dropped: nobody is listening");
                break;
            }
        }
    }
}

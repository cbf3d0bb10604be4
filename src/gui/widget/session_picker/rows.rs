// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rows of the session list

use relm4::gtk::{self, prelude::*};

use super::model::{SessionRow, ROW_HEIGHT, ROW_SPACING};
use crate::gui::icons::{Glyph, ImageGlyphExt};

/// Size of a session badge
const BADGE_SIZE: i32 = 22;

/// Build the widget of a single row: the badge followed by the label.
fn row_widget(row: &SessionRow) -> gtk::ListBoxRow {
    let badge = gtk::Image::new();
    badge.set_pixel_size(BADGE_SIZE);
    badge.set_glyph(Some(&Glyph::File(row.icon.clone())));

    let label = gtk::Label::new(Some(&row.label));
    label.set_xalign(0.0);
    label.set_hexpand(true);

    let container = gtk::Box::new(gtk::Orientation::Horizontal, ROW_SPACING / 2);
    container.set_height_request(ROW_HEIGHT);
    container.append(&badge);
    container.append(&label);

    let list_row = gtk::ListBoxRow::new();
    list_row.set_child(Some(&container));
    list_row
}

pub(super) trait SessionRowsExt {
    /// Throw away all rows and build new ones.
    fn replace_rows(&self, rows: &[SessionRow]);

    /// Select the row at the given index, or nothing.
    fn select_index(&self, index: Option<usize>);
}

impl SessionRowsExt for gtk::ListBox {
    fn replace_rows(&self, rows: &[SessionRow]) {
        while let Some(child) = self.first_child() {
            self.remove(&child);
        }
        for row in rows {
            self.append(&row_widget(row));
        }
    }

    fn select_index(&self, index: Option<usize>) {
        let row = index
            .and_then(|index| i32::try_from(index).ok())
            .and_then(|index| self.row_at_index(index));
        match row {
            Some(row) => {
                self.select_row(Some(&row));
                row.grab_focus();
            }
            None => self.unselect_all(),
        }
    }
}

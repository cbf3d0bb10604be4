// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! The GUI of the greeter: a host window and the widgets it embeds

mod component;
mod messages;
mod model;

pub mod icons;
pub mod widget;

pub use component::GreeterInit;
pub use model::Greeter;

/// Spacing between widgets
const GAP: i32 = 15;

// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Greeter widgets for entering a credential and picking a login session
//!
//! The [`gui::widget`] components can be embedded into any relm4 window, with their sessions
//! coming from any [`sessions::SessionSource`]. The `sessgreet` binary hosts them in a
//! fullscreen greeter window.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod constants;
pub mod gui;
pub mod i18n;
pub mod sessions;
mod tomlutils;

// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Message definitions for communication between the view and the model

use educe::Educe;

/// The messages sent by the view and the embedded widgets to the model
#[derive(Educe)]
#[educe(Debug)]
pub enum InputMsg {
    /// The credential field was submitted.
    Submit(#[educe(Debug(ignore))] String),
    /// The credential field lost the focus.
    CredentialFocusLost,
    /// Open the session picker.
    ShowSessions,
    /// A session was chosen in the session picker.
    SessionSelected(String),
    /// Leave the session picker.
    HideSessions,
}

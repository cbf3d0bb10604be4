// SPDX-FileCopyrightText: 2024 max-ishere <47008271+max-ishere@users.noreply.github.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Self-contained widgets that can be embedded into any greeter window

pub mod credential_field;
pub mod session_picker;

// SPDX-FileCopyrightText: 2022 Harish Rajagopal <harish.rajagopals@gmail.com>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! State and behaviour of the session picker

use std::path::{Path, PathBuf};

use relm4::gtk::gdk;

use crate::{fl, gui::icons::session_icon, sessions::SessionSource};

/// Width of the picker panel
pub(super) const PANEL_WIDTH: i32 = 550;
/// Height of the header above the list
const HEADER_HEIGHT: i32 = 55;
/// Height of a single row
pub(super) const ROW_HEIGHT: i32 = 40;
/// Vertical space between two rows
pub(super) const ROW_SPACING: i32 = 20;

/// A session as rendered by the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub name: String,
    pub key: String,
    /// Badge drawn next to the name
    pub icon: PathBuf,
}

/// What a row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub label: String,
    pub icon: PathBuf,
}

/// Events sent to the owner of the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPickerOutput {
    /// The stable key of the chosen session
    SessionSelected(String),
    /// The picker is done and can be dismissed.
    Back,
}

/// A step through the list, or the end of the interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Forward,
    Backward,
    Commit,
}

impl Navigation {
    /// Map a key press to a navigation step.
    ///
    /// Escape commits just like Return: the picker has no separate cancel path.
    pub fn from_key(key: gdk::Key) -> Option<Self> {
        match key {
            gdk::Key::Tab | gdk::Key::Down | gdk::Key::KP_Down => Some(Self::Forward),
            gdk::Key::ISO_Left_Tab | gdk::Key::Up | gdk::Key::KP_Up => Some(Self::Backward),
            gdk::Key::Return | gdk::Key::KP_Enter | gdk::Key::Escape => Some(Self::Commit),
            _ => None,
        }
    }
}

/// Move `index` one step through a cyclic list of `count` items.
pub(super) fn cycle(index: usize, count: usize, forward: bool) -> usize {
    debug_assert!(count > 0);
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

/// Height of the whole panel for the given number of rows.
pub(super) fn panel_height(rows: usize) -> i32 {
    // The most rows whose height still fits into an `i32`
    const MAX_ROWS: i32 = (i32::MAX - HEADER_HEIGHT) / (ROW_HEIGHT + ROW_SPACING);
    let rows = i32::try_from(rows).map_or(MAX_ROWS, |rows| rows.min(MAX_ROWS));
    if rows == 0 {
        return HEADER_HEIGHT;
    }
    HEADER_HEIGHT + ROW_HEIGHT * rows + ROW_SPACING * (rows - 1)
}

// Fields only set by the model, that are meant to be read only by the view
#[tracker::track]
#[derive(Debug)]
pub(super) struct PickerState {
    /// Sessions in enumeration order
    pub(super) entries: Vec<SessionEntry>,
    /// Index of the highlighted entry; only [`None`] if there are no entries
    pub(super) highlighted: Option<usize>,
    /// Key of the session marked as the default one
    pub(super) default_key: Option<String>,
    /// Whether the back button is held down
    pub(super) back_pressed: bool,
}

/// A cyclically navigable list of sessions
#[derive(Debug)]
pub struct SessionPicker {
    pub(super) state: PickerState,
    /// Directory holding the session badges
    image_dir: PathBuf,
}

impl SessionPicker {
    pub fn new(image_dir: PathBuf, default_key: Option<String>) -> Self {
        Self {
            state: PickerState {
                entries: Vec::new(),
                highlighted: None,
                default_key,
                back_pressed: false,
                tracker: 0,
            },
            image_dir,
        }
    }

    /// Re-read every session from the source and rebuild the list.
    ///
    /// If the previously highlighted session is still present, it stays highlighted; otherwise the
    /// first one is. An absent source leaves everything as it is.
    pub fn initialize(&mut self, source: Option<&dyn SessionSource>) {
        let Some(source) = source else {
            warn!("No session source given; keeping the current sessions");
            return;
        };

        let entries = read_entries(source, &self.image_dir);
        info!("Loaded {} session(s)", entries.len());

        let previous_key = self.highlighted_key().map(String::from);
        let highlighted = match previous_key {
            Some(key) => entries.iter().position(|entry| entry.key == key),
            None => None,
        }
        .or_else(|| (!entries.is_empty()).then_some(0));

        // Always mark the entries, since the rows are rebuilt even if nothing changed.
        *self.state.get_mut_entries() = entries;
        self.state.set_highlighted(highlighted);
    }

    pub fn set_default_key(&mut self, key: Option<String>) {
        self.state.set_default_key(key);
    }

    /// Highlight the session with the given key.
    ///
    /// Unknown keys leave the highlight where it is, since the key might legitimately be absent.
    pub fn select_by_key(&mut self, key: &str) {
        match self.state.entries.iter().position(|entry| entry.key == key) {
            Some(index) => self.state.set_highlighted(Some(index)),
            None => debug!("Session '{key}' not found; keeping the current highlight"),
        }
    }

    pub fn step_forward(&mut self) {
        self.step(true);
    }

    pub fn step_backward(&mut self) {
        self.step(false);
    }

    fn step(&mut self, forward: bool) {
        let count = self.state.entries.len();
        if count == 0 {
            return;
        }
        let index = self.state.highlighted.unwrap_or(0);
        self.state.set_highlighted(Some(cycle(index, count, forward)));
    }

    /// Apply a navigation step, returning the outputs to emit in order.
    pub fn navigate(&mut self, navigation: Navigation) -> Vec<SessionPickerOutput> {
        match navigation {
            Navigation::Forward => self.step_forward(),
            Navigation::Backward => self.step_backward(),
            Navigation::Commit => return self.commit(),
        }
        Vec::new()
    }

    /// Finish the interaction with the highlighted session.
    ///
    /// Emits the selection followed by [`SessionPickerOutput::Back`]. With no sessions, only the
    /// latter is emitted.
    pub fn commit(&mut self) -> Vec<SessionPickerOutput> {
        let mut outputs = Vec::with_capacity(2);
        match self.highlighted_key() {
            Some(key) => {
                info!("Session selected: {key}");
                outputs.push(SessionPickerOutput::SessionSelected(key.to_string()));
            }
            None => warn!("No session to select"),
        }
        outputs.push(SessionPickerOutput::Back);
        outputs
    }

    /// Highlight the row the user clicked on and commit it.
    pub fn activate_row(&mut self, index: usize) -> Vec<SessionPickerOutput> {
        if index < self.state.entries.len() {
            self.state.set_highlighted(Some(index));
        } else {
            warn!("Activated row {index} is out of range");
        }
        self.commit()
    }

    /// The pointer went down on the back button.
    pub fn press_back(&mut self) {
        self.state.set_back_pressed(true);
    }

    /// The pointer was released on the back button, which commits.
    pub fn release_back(&mut self) -> Vec<SessionPickerOutput> {
        self.state.set_back_pressed(false);
        self.commit()
    }

    /// The press on the back button ended without a release, e.g. by dragging away.
    pub fn cancel_back(&mut self) {
        self.state.set_back_pressed(false);
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.state.entries
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.state.highlighted
    }

    pub fn highlighted_key(&self) -> Option<&str> {
        self.state
            .highlighted
            .and_then(|index| self.state.entries.get(index))
            .map(|entry| entry.key.as_str())
    }

    pub fn is_back_pressed(&self) -> bool {
        self.state.back_pressed
    }

    /// The label of an entry, marking the default session.
    fn label(&self, entry: &SessionEntry) -> String {
        if self.state.default_key.as_deref() == Some(entry.key.as_str()) {
            format!("{} {}", entry.name, fl!("session-default-marker"))
        } else {
            entry.name.clone()
        }
    }

    /// What each row shows, in order.
    pub fn rows(&self) -> Vec<SessionRow> {
        self.state
            .entries
            .iter()
            .map(|entry| SessionRow {
                label: self.label(entry),
                icon: entry.icon.clone(),
            })
            .collect()
    }

    pub(super) fn panel_height(&self) -> i32 {
        panel_height(self.state.entries.len())
    }

    /// Forget which state fields changed since the last view update.
    pub(super) fn reset_tracking(&mut self) {
        self.state.reset();
    }
}

/// Read all rows of the source, skipping unreadable ones.
fn read_entries(source: &dyn SessionSource, image_dir: &Path) -> Vec<SessionEntry> {
    (0..source.row_count())
        .filter_map(|row| match (source.display_name(row), source.key(row)) {
            (Some(name), Some(key)) => Some(SessionEntry {
                icon: session_icon(image_dir, &name),
                name,
                key,
            }),
            _ => {
                warn!("Skipping unreadable session row {row}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::sessions::{SessionList, SessionRecord};

    const IMAGE_DIR: &str = "/usr/share/greeter/images";

    fn sessions(records: &[(&str, &str)]) -> SessionList {
        records
            .iter()
            .map(|(name, key)| SessionRecord::new(*name, *key))
            .collect()
    }

    fn picker(records: &[(&str, &str)], default_key: Option<&str>) -> SessionPicker {
        let mut picker = SessionPicker::new(IMAGE_DIR.into(), default_key.map(String::from));
        picker.initialize(Some(&sessions(records)));
        picker
    }

    fn labels(picker: &SessionPicker) -> Vec<String> {
        picker.rows().into_iter().map(|row| row.label).collect()
    }

    /// A source whose second row can't be read
    #[derive(Debug)]
    struct BrokenSource;

    impl SessionSource for BrokenSource {
        fn row_count(&self) -> usize {
            3
        }

        fn display_name(&self, row: usize) -> Option<String> {
            (row != 1).then(|| format!("Session {row}"))
        }

        fn key(&self, row: usize) -> Option<String> {
            Some(format!("session{row}"))
        }
    }

    #[test]
    fn gnome_and_kde_walkthrough() {
        let mut picker = picker(&[("GNOME", "gnome"), ("KDE Plasma", "kde")], Some("gnome"));
        assert_eq!(labels(&picker), ["GNOME (Default)", "KDE Plasma"]);
        assert_eq!(picker.highlighted(), Some(0));

        assert!(picker.navigate(Navigation::Forward).is_empty());
        assert_eq!(picker.highlighted(), Some(1));
        assert!(picker.navigate(Navigation::Forward).is_empty());
        assert_eq!(picker.highlighted(), Some(0));

        picker.step_forward();
        assert_eq!(
            picker.navigate(Navigation::Commit),
            [
                SessionPickerOutput::SessionSelected("kde".into()),
                SessionPickerOutput::Back
            ]
        );
    }

    #[test_case(1 ; "single")]
    #[test_case(2 ; "pair")]
    #[test_case(7 ; "many")]
    fn forward_steps_cycle_back_to_the_start(count: usize) {
        for start in 0..count {
            let end = (0..count).fold(start, |index, _| cycle(index, count, true));
            assert_eq!(end, start);
        }
    }

    #[test]
    fn picker_returns_to_its_start_after_a_full_lap() {
        let mut picker = picker(&[("A", "a"), ("B", "b"), ("C", "c"), ("D", "d")], None);
        for start in ["a", "b", "c", "d"] {
            picker.select_by_key(start);
            for _ in 0..picker.entries().len() {
                picker.step_forward();
            }
            assert_eq!(picker.highlighted_key(), Some(start));
        }
    }

    #[test_case(0, 3, true, 1 ; "forward")]
    #[test_case(2, 3, true, 0 ; "forward wraps")]
    #[test_case(1, 3, false, 0 ; "backward")]
    #[test_case(0, 3, false, 2 ; "backward wraps")]
    #[test_case(0, 1, false, 0 ; "single entry")]
    fn cycle_steps(index: usize, count: usize, forward: bool, expected: usize) {
        assert_eq!(cycle(index, count, forward), expected);
    }

    #[test]
    fn backward_from_first_wraps_to_last() {
        let mut picker = picker(&[("A", "a"), ("B", "b"), ("C", "c")], None);
        picker.step_backward();
        assert_eq!(picker.highlighted_key(), Some("c"));
        picker.step_backward();
        assert_eq!(picker.highlighted_key(), Some("b"));
    }

    #[test]
    fn select_by_key_moves_the_highlight() {
        let mut picker = picker(&[("A", "a"), ("B", "b"), ("C", "c")], None);
        picker.select_by_key("c");
        assert_eq!(picker.highlighted(), Some(2));
    }

    #[test]
    fn select_by_unknown_key_keeps_the_highlight() {
        let mut picker = picker(&[("A", "a"), ("B", "b"), ("C", "c")], None);
        picker.select_by_key("b");
        picker.select_by_key("missing");
        assert_eq!(picker.highlighted(), Some(1));
    }

    #[test]
    fn only_the_default_session_is_marked() {
        let picker = picker(&[("A", "a"), ("B", "b"), ("C", "c")], Some("b"));
        let marked: Vec<_> = labels(&picker)
            .into_iter()
            .filter(|label| label.ends_with("(Default)"))
            .collect();
        assert_eq!(marked, ["B (Default)"]);
        // The marking is cosmetic.
        assert_eq!(picker.entries()[1].name, "B");
        assert_eq!(picker.entries()[1].key, "b");
    }

    #[test_case(None ; "no default")]
    #[test_case(Some("missing") ; "absent default")]
    fn nothing_is_marked_without_a_matching_default(default_key: Option<&str>) {
        let picker = picker(&[("A", "a"), ("B", "b")], default_key);
        assert_eq!(labels(&picker), ["A", "B"]);
    }

    #[test]
    fn changing_the_default_relabels() {
        let mut picker = picker(&[("A", "a"), ("B", "b")], Some("a"));
        picker.set_default_key(Some("b".into()));
        assert_eq!(labels(&picker), ["A", "B (Default)"]);
    }

    #[test]
    fn rows_use_the_session_badges() {
        let picker = picker(&[("GNOME", "gnome")], None);
        assert_eq!(
            picker.rows()[0].icon,
            PathBuf::from("/usr/share/greeter/images/badges/gnome_badge-symbolic.svg")
        );
    }

    #[test]
    fn every_commit_trigger_emits_the_same_sequence() {
        let expected = [
            SessionPickerOutput::SessionSelected("b".into()),
            SessionPickerOutput::Back,
        ];

        let mut picker = picker(&[("A", "a"), ("B", "b")], None);
        picker.select_by_key("b");
        assert_eq!(picker.navigate(Navigation::Commit), expected);

        let key_commit = Navigation::from_key(gdk::Key::Escape).expect("Escape is a commit");
        assert_eq!(picker.navigate(key_commit), expected);

        picker.press_back();
        assert!(picker.is_back_pressed());
        assert_eq!(picker.release_back(), expected);
        assert!(!picker.is_back_pressed());
    }

    #[test]
    fn commit_without_a_change_reports_the_initial_highlight() {
        let mut picker = picker(&[("A", "a"), ("B", "b")], None);
        assert_eq!(
            picker.commit(),
            [
                SessionPickerOutput::SessionSelected("a".into()),
                SessionPickerOutput::Back
            ]
        );
    }

    #[test]
    fn commit_on_an_empty_list_only_goes_back() {
        let mut picker = picker(&[], None);
        assert_eq!(picker.highlighted(), None);
        assert_eq!(picker.commit(), [SessionPickerOutput::Back]);
    }

    #[test]
    fn clicking_a_row_commits_it() {
        let mut picker = picker(&[("A", "a"), ("B", "b"), ("C", "c")], None);
        assert_eq!(
            picker.activate_row(2),
            [
                SessionPickerOutput::SessionSelected("c".into()),
                SessionPickerOutput::Back
            ]
        );
        assert_eq!(picker.highlighted(), Some(2));
    }

    #[test]
    fn navigation_on_an_empty_list_does_nothing() {
        let mut picker = picker(&[], None);
        picker.step_forward();
        picker.step_backward();
        assert_eq!(picker.highlighted(), None);
    }

    #[test]
    fn missing_source_keeps_the_current_sessions() {
        let mut picker = picker(&[("A", "a"), ("B", "b")], None);
        picker.select_by_key("b");
        picker.initialize(None);
        assert_eq!(picker.entries().len(), 2);
        assert_eq!(picker.highlighted(), Some(1));
    }

    #[test]
    fn reinitializing_rebuilds_and_keeps_the_highlighted_session() {
        let mut picker = picker(&[("A", "a"), ("B", "b")], None);
        picker.select_by_key("b");

        picker.initialize(Some(&sessions(&[("C", "c"), ("B", "b"), ("A", "a")])));
        assert_eq!(labels(&picker), ["C", "B", "A"]);
        assert_eq!(picker.highlighted_key(), Some("b"));

        picker.initialize(Some(&sessions(&[("D", "d")])));
        assert_eq!(picker.highlighted_key(), Some("d"));

        picker.initialize(Some(&sessions(&[])));
        assert_eq!(picker.highlighted(), None);
    }

    #[test]
    fn reinitializing_marks_the_rows_for_rebuilding() {
        let mut picker = picker(&[("A", "a")], None);
        picker.reset_tracking();
        picker.initialize(Some(&sessions(&[("A", "a")])));
        assert!(picker.state.changed(PickerState::entries()));
    }

    #[test]
    fn unreadable_rows_are_skipped() {
        let mut picker = SessionPicker::new(IMAGE_DIR.into(), None);
        picker.initialize(Some(&BrokenSource));
        let keys: Vec<_> = picker.entries().iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(keys, ["session0", "session2"]);
    }

    #[test_case(0, 55 ; "empty")]
    #[test_case(1, 95 ; "single")]
    #[test_case(2, 155 ; "pair")]
    #[test_case(8, 515 ; "eight")]
    fn panel_grows_with_the_rows(rows: usize, expected: i32) {
        assert_eq!(panel_height(rows), expected);
    }

    #[test_case(40_000_000 ; "beyond the clamp")]
    #[test_case(usize::MAX ; "largest count")]
    fn panel_height_never_overflows(rows: usize) {
        let height = panel_height(rows);
        assert!(height > panel_height(1));
        assert_eq!(height, panel_height(35_791_393));
    }

    #[test]
    fn cancelled_back_press_restores_the_button() {
        let mut picker = picker(&[("A", "a"), ("B", "b")], None);
        picker.reset_tracking();
        picker.press_back();
        assert!(picker.is_back_pressed());

        picker.cancel_back();
        assert!(!picker.is_back_pressed());
        assert!(picker.state.changed(PickerState::back_pressed()));
        assert_eq!(picker.highlighted_key(), Some("a"));
    }

    #[test_case(gdk::Key::Tab, Some(Navigation::Forward) ; "tab")]
    #[test_case(gdk::Key::Down, Some(Navigation::Forward) ; "down")]
    #[test_case(gdk::Key::ISO_Left_Tab, Some(Navigation::Backward) ; "shift tab")]
    #[test_case(gdk::Key::Up, Some(Navigation::Backward) ; "up")]
    #[test_case(gdk::Key::Return, Some(Navigation::Commit) ; "return")]
    #[test_case(gdk::Key::Escape, Some(Navigation::Commit) ; "escape")]
    #[test_case(gdk::Key::a, None ; "letter")]
    fn keys_map_to_navigation(key: gdk::Key, expected: Option<Navigation>) {
        assert_eq!(Navigation::from_key(key), expected);
    }
}

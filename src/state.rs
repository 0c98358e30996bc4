use crate::color::ColorMap;
use crate::data::batch::SieveTest;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Every file analysed so far, successful or not, in load order.
    pub tests: Vec<SieveTest>,

    /// Index into `tests` of the test shown in the central panel.
    pub selected: Option<usize>,

    /// Draw every successful curve on one chart instead of only the selected one.
    pub overlay: bool,

    /// One curve colour per test.
    pub color_map: ColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Append newly analysed tests and select the first of them.
    ///
    /// A test loaded again from the same path replaces the earlier one.
    pub fn add_tests(&mut self, tests: Vec<SieveTest>) {
        let mut first_new = None;
        for test in tests {
            let idx = match self.tests.iter().position(|t| t.path == test.path) {
                Some(existing) => {
                    self.tests[existing] = test;
                    existing
                }
                None => {
                    self.tests.push(test);
                    self.tests.len() - 1
                }
            };
            first_new.get_or_insert(idx);
        }
        if first_new.is_some() {
            self.selected = first_new;
        }

        let failed = self.tests.len() - self.successful_count();
        self.status_message = (failed > 0).then(|| format!("{failed} file(s) could not be analysed"));
        self.rebuild_color_map();
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.tests.len() {
            self.selected = Some(idx);
        }
    }

    /// Drop one test, keeping the selection on a neighbour.
    pub fn remove(&mut self, idx: usize) {
        if idx >= self.tests.len() {
            return;
        }
        let removed = self.tests.remove(idx);
        log::info!("Removed {}", removed.name);

        self.selected = match self.selected {
            _ if self.tests.is_empty() => None,
            Some(sel) if sel > idx => Some(sel - 1),
            Some(sel) if sel == idx => Some(idx.min(self.tests.len() - 1)),
            other => other,
        };
        self.rebuild_color_map();
    }

    pub fn clear(&mut self) {
        self.tests.clear();
        self.selected = None;
        self.status_message = None;
        self.rebuild_color_map();
    }

    pub fn selected_test(&self) -> Option<&SieveTest> {
        self.selected.and_then(|i| self.tests.get(i))
    }

    pub fn successful_count(&self) -> usize {
        self.tests.iter().filter(|t| t.is_ok()).count()
    }

    /// Reassign curve colours after the set of tests changed.
    pub fn rebuild_color_map(&mut self) {
        self.color_map = ColorMap::new(self.tests.iter().map(|t| t.path.as_path()));
    }

    /// Legend label for a test: its file name, or the full path when another
    /// loaded test has the same file name.
    pub fn curve_label(&self, test: &SieveTest) -> String {
        let clashes = self
            .tests
            .iter()
            .any(|t| t.name == test.name && t.path != test.path);
        if clashes {
            test.path.display().to_string()
        } else {
            test.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn failed(name: &str) -> SieveTest {
        failed_at(name, name)
    }

    fn failed_at(dir: &str, name: &str) -> SieveTest {
        SieveTest {
            name: name.into(),
            path: PathBuf::from(dir).join(name),
            outcome: Err("bad".into()),
        }
    }

    #[test]
    fn add_selects_first_new_and_reports_failures() {
        let mut state = AppState::default();
        state.add_tests(vec![failed("a.csv"), failed("b.csv")]);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.status_message.as_deref(), Some("2 file(s) could not be analysed"));

        state.add_tests(vec![failed("c.csv")]);
        assert_eq!(state.selected, Some(2));
        assert_eq!(state.selected_test().map(|t| t.name.as_str()), Some("c.csv"));
    }

    #[test]
    fn reloading_replaces_same_path() {
        let mut state = AppState::default();
        state.add_tests(vec![failed("a.csv"), failed("b.csv")]);
        state.add_tests(vec![failed("a.csv")]);
        assert_eq!(state.tests.len(), 2);
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn remove_keeps_selection_valid() {
        let mut state = AppState::default();
        state.add_tests(vec![failed("a.csv"), failed("b.csv"), failed("c.csv")]);
        state.select(2);
        state.remove(2);
        assert_eq!(state.selected, Some(1));
        state.remove(0);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.tests[0].name, "b.csv");
        state.remove(0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = AppState::default();
        state.add_tests(vec![failed("a.csv")]);
        state.clear();
        assert!(state.tests.is_empty());
        assert!(state.selected_test().is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn same_file_name_gets_own_colour_and_label() {
        let mut state = AppState::default();
        state.add_tests(vec![failed_at("site_a", "data.csv"), failed_at("site_b", "data.csv")]);
        assert_eq!(state.tests.len(), 2);

        let (a, b) = (&state.tests[0], &state.tests[1]);
        assert_ne!(state.color_map.color_for(&a.path), state.color_map.color_for(&b.path));
        assert_ne!(state.curve_label(a), state.curve_label(b));
        assert!(state.curve_label(a).contains("site_a"));
    }

    #[test]
    fn unique_file_name_is_its_own_label() {
        let mut state = AppState::default();
        state.add_tests(vec![failed_at("site_a", "data.csv"), failed("other.csv")]);
        assert_eq!(state.curve_label(&state.tests[0]), "data.csv");
    }
}

//! In-memory simulation of the e-learning admin UI
//!
//! Implements [`PageDriver`] over a flat node list so the workflows can run
//! end to end without a browser. The simulation reproduces the rendering
//! quirks the harness is built around: opening a dialog pushes a fresh
//! subtree while the previous one lingers hidden with its selectors still
//! matching, the search box only reacts to a dispatched input event, and
//! expansion panels keep their fields hidden until expanded.

use std::time::Duration;

use tracing::debug;

use elearn_harness::{HarnessError, HarnessResult, PageDriver, WaitState};

use crate::locators;

#[derive(Default)]
struct Node {
    keys: Vec<String>,
    attrs: Vec<(String, String)>,
    value: String,
    text: String,
    visible: bool,
}

struct StudentRow {
    cells: [String; 8],
    node_ids: Vec<usize>,
}

#[derive(Clone, Copy)]
enum DialogKind {
    Add,
    Edit(usize),
    Delete(usize),
}

struct Dialog {
    kind: DialogKind,
    node_ids: Vec<usize>,
}

struct Panel {
    header: usize,
    title_field: usize,
    expanded: bool,
}

pub struct SimUi {
    nodes: Vec<Node>,
    logged_in: bool,
    search: String,
    students: Vec<StudentRow>,
    dialog: Option<Dialog>,
    panels: Vec<Panel>,
    lesson_count: usize,
    courses: Vec<String>,
    course_links_built: bool,
    // fixed chrome
    email_input: usize,
    password_input: usize,
    nav_link: usize,
    heading: usize,
    add_button: usize,
    search_box: usize,
    dialog_container: usize,
    swal: usize,
    ok_button: usize,
    content_tab: Option<usize>,
    quit_calls: usize,
}

impl SimUi {
    pub fn new() -> Self {
        let mut sim = Self {
            nodes: Vec::new(),
            logged_in: false,
            search: String::new(),
            students: Vec::new(),
            dialog: None,
            panels: Vec::new(),
            lesson_count: 0,
            courses: vec![
                "Lập trình Java cơ bản".to_string(),
                "Kiểm thử phần mềm".to_string(),
            ],
            course_links_built: false,
            email_input: 0,
            password_input: 0,
            nav_link: 0,
            heading: 0,
            add_button: 0,
            search_box: 0,
            dialog_container: 0,
            swal: 0,
            ok_button: 0,
            content_tab: None,
            quit_calls: 0,
        };

        sim.email_input = sim.push(&[locators::LOGIN_EMAIL], true);
        sim.password_input = sim.push(&[locators::LOGIN_PASSWORD], true);
        sim.push(&[locators::LOGIN_SUBMIT], true);
        sim.nav_link = sim.push(&[locators::NAV_STUDENTS], false);
        sim.heading = sim.push(&[locators::STUDENTS_HEADING], false);
        sim.add_button = sim.push(&[locators::ADD_BUTTON], false);
        sim.search_box = sim.push(&[locators::SEARCH_BOX], false);
        sim.dialog_container = sim.push(&[locators::DIALOG], false);
        sim.swal = sim.push(&[locators::SWAL_CONFIRM], false);
        sim.ok_button = sim.push(&[locators::OK_BUTTON], false);
        sim
    }

    /// Number of students currently in the table model, ignoring search.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn quit_calls(&self) -> usize {
        self.quit_calls
    }

    fn push(&mut self, keys: &[&str], visible: bool) -> usize {
        self.nodes.push(Node {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            visible,
            ..Node::default()
        });
        self.nodes.len() - 1
    }

    fn matching(&self, selector: &str) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.keys.iter().any(|k| k == selector))
            .map(|(i, _)| i)
            .collect()
    }

    /// Last visible node matching the selector, mirroring how a freshly
    /// rendered subtree shadows a stale one.
    fn last_visible_value(&self, selector: &str) -> String {
        self.matching(selector)
            .into_iter()
            .rev()
            .find(|&i| self.nodes[i].visible)
            .map(|i| self.nodes[i].value.clone())
            .unwrap_or_default()
    }

    fn dialog_value(&self, field: &str) -> String {
        self.last_visible_value(&locators::dialog_input(field))
    }

    fn open_dialog(&mut self, kind: DialogKind) {
        // A re-render leaves the previous dialog subtree in the DOM,
        // hidden but still matching the same selectors.
        if let Some(old) = self.dialog.take() {
            for id in old.node_ids {
                self.nodes[id].visible = false;
            }
        }
        self.nodes[self.dialog_container].visible = true;

        let mut node_ids = Vec::new();
        match kind {
            DialogKind::Add | DialogKind::Edit(_) => {
                let prefill: Option<[String; 6]> = match kind {
                    DialogKind::Edit(idx) => {
                        let c = &self.students[idx].cells;
                        Some([
                            format!("{} {}", c[1], c[2]),
                            c[0].clone(),
                            c[4].clone(),
                            c[3].clone(),
                            c[5].clone(),
                            c[7].clone(),
                        ])
                    }
                    _ => None,
                };
                let fields = [
                    locators::FIELD_FULL_NAME,
                    locators::FIELD_STUDENT_CODE,
                    locators::FIELD_EMAIL,
                    locators::FIELD_PHONE,
                    locators::FIELD_DOB,
                    locators::FIELD_ADDRESS,
                ];
                for (i, field) in fields.iter().enumerate() {
                    let key = locators::dialog_input(field);
                    let id = self.push(&[key.as_str()], true);
                    self.nodes[id]
                        .attrs
                        .push(("name".to_string(), field.to_string()));
                    if let Some(ref values) = prefill {
                        self.nodes[id].value = values[i].clone();
                    }
                    node_ids.push(id);
                }
                for gender in elearn_harness::Gender::ALL {
                    let key = locators::gender_label(gender);
                    let id = self.push(&[key.as_str()], true);
                    self.nodes[id].text = gender.label().to_string();
                    node_ids.push(id);
                }
                let button = match kind {
                    DialogKind::Add => locators::SUBMIT_BUTTON,
                    _ => locators::EDIT_SAVE_BUTTON,
                };
                node_ids.push(self.push(&[button], true));
            }
            DialogKind::Delete(_) => {
                node_ids.push(self.push(&[locators::DELETE_CONFIRM_BUTTON], true));
            }
        }
        self.dialog = Some(Dialog { kind, node_ids });
    }

    fn close_dialog(&mut self) {
        self.nodes[self.dialog_container].visible = false;
        if let Some(dialog) = self.dialog.take() {
            for id in dialog.node_ids {
                self.nodes[id].visible = false;
            }
        }
        self.rebuild_table();
    }

    fn cells_from_dialog(&self) -> [String; 8] {
        let full_name = self.dialog_value(locators::FIELD_FULL_NAME);
        let (last, given) = full_name
            .rsplit_once(' ')
            .map(|(l, g)| (l.to_string(), g.to_string()))
            .unwrap_or_else(|| (String::new(), full_name.clone()));
        [
            self.dialog_value(locators::FIELD_STUDENT_CODE),
            last,
            given,
            self.dialog_value(locators::FIELD_PHONE),
            self.dialog_value(locators::FIELD_EMAIL),
            self.dialog_value(locators::FIELD_DOB),
            String::new(),
            self.dialog_value(locators::FIELD_ADDRESS),
        ]
    }

    fn commit_dialog(&mut self) {
        let kind = match &self.dialog {
            Some(dialog) => dialog.kind,
            None => return,
        };
        match kind {
            DialogKind::Add => {
                let cells = self.cells_from_dialog();
                debug!(code = %cells[0], "sim: student created");
                self.students.push(StudentRow {
                    cells,
                    node_ids: Vec::new(),
                });
            }
            DialogKind::Edit(idx) => {
                let cells = self.cells_from_dialog();
                self.students[idx].cells = cells;
            }
            DialogKind::Delete(idx) => {
                let removed = self.students.remove(idx);
                debug!(code = %removed.cells[0], "sim: student removed");
                for id in removed.node_ids {
                    self.nodes[id].keys.clear();
                    self.nodes[id].visible = false;
                }
            }
        }
        self.nodes[self.swal].visible = true;
    }

    fn rebuild_table(&mut self) {
        for i in 0..self.students.len() {
            for id in std::mem::take(&mut self.students[i].node_ids) {
                self.nodes[id].keys.clear();
                self.nodes[id].visible = false;
            }
        }
        for i in 0..self.students.len() {
            let code = self.students[i].cells[0].clone();
            if !self.search.is_empty() && !code.contains(&self.search) {
                continue;
            }
            let mut ids = Vec::new();
            let row_key = locators::student_row(&code);
            let row = self.push(&[row_key.as_str()], true);
            self.nodes[row].text = self.students[i].cells.join(" ");
            ids.push(row);

            let cell_key = locators::student_row_cells(&code);
            for c in 0..8 {
                let cell = self.push(&[cell_key.as_str()], true);
                self.nodes[cell].text = self.students[i].cells[c].clone();
                ids.push(cell);
            }
            ids.push(self.push(&[locators::row_edit_button(&code).as_str()], true));
            ids.push(self.push(&[locators::row_delete_button(&code).as_str()], true));
            self.students[i].node_ids = ids;
        }
    }

    fn build_course_links(&mut self) {
        if self.course_links_built {
            return;
        }
        for name in self.courses.clone() {
            let id = self.push(&[locators::COURSE_LINKS], true);
            self.nodes[id].text = name;
        }
        self.course_links_built = true;
    }

    fn open_course_detail(&mut self) {
        if self.content_tab.is_none() {
            self.content_tab = Some(self.push(&[locators::CONTENT_TAB], true));
        }
        if let Some(id) = self.content_tab {
            self.nodes[id].visible = true;
        }
    }

    fn open_content_editor(&mut self) {
        self.push(&[locators::ADD_CHAPTER_BUTTON], true);
        self.push(&[locators::ADD_LESSON_BUTTON], true);
        self.push(&[locators::SAVE_BUTTON], true);
    }

    fn add_panel(&mut self, ordinal: Option<usize>) {
        let mut header_keys: Vec<String> = vec![locators::PANEL_HEADER.to_string()];
        if let Some(n) = ordinal {
            header_keys.push(locators::lesson_panel_header(n));
        }
        let header = {
            let keys: Vec<&str> = header_keys.iter().map(String::as_str).collect();
            self.push(&keys, true)
        };
        self.nodes[header]
            .attrs
            .push(("aria-expanded".to_string(), "false".to_string()));
        if let Some(n) = ordinal {
            self.nodes[header].text = format!("Bài số {n}");
        }

        let title_field = self.push(&[locators::TITLE_FIELD], false);
        self.nodes[title_field]
            .attrs
            .push(("name".to_string(), "title_course_item".to_string()));
        let desc_field = self.push(&[locators::DESCRIPTION_FIELD], false);
        self.nodes[desc_field]
            .attrs
            .push(("name".to_string(), "description_course_item".to_string()));

        self.panels.push(Panel {
            header,
            title_field,
            expanded: false,
        });
        // Field visibility is tied to the panel being expanded; the
        // description field tracks the title field's node index + 1.
    }

    fn toggle_panel(&mut self, header: usize) {
        let Some(pos) = self.panels.iter().position(|p| p.header == header) else {
            return;
        };
        let expanded = !self.panels[pos].expanded;
        self.panels[pos].expanded = expanded;

        let state = if expanded { "true" } else { "false" };
        if let Some(attr) = self.nodes[header]
            .attrs
            .iter_mut()
            .find(|(k, _)| k == "aria-expanded")
        {
            attr.1 = state.to_string();
        }
        let expanded_key = locators::EXPANDED_PANEL_HEADER.to_string();
        if expanded {
            self.nodes[header].keys.push(expanded_key);
        } else {
            self.nodes[header].keys.retain(|k| *k != expanded_key);
        }

        let title_field = self.panels[pos].title_field;
        self.nodes[title_field].visible = expanded;
        self.nodes[title_field + 1].visible = expanded;
    }

    fn save_content(&mut self) {
        for i in 0..self.panels.len() {
            let title = self.nodes[self.panels[i].title_field].value.clone();
            if title.is_empty() {
                continue;
            }
            let key = locators::content_title(&title);
            let id = self.push(&[key.as_str()], true);
            self.nodes[id].text = title;
        }
        self.nodes[self.ok_button].visible = true;
    }

    fn node(&self, handle: &usize) -> HarnessResult<&Node> {
        self.nodes
            .get(*handle)
            .ok_or_else(|| HarnessError::Driver(format!("stale handle {handle}")))
    }
}

impl Default for SimUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDriver for SimUi {
    type Handle = usize;

    fn goto(&mut self, url: &str) -> HarnessResult<()> {
        debug!(url, "sim: navigate");
        if url.contains("khoa-hoc") {
            if !self.logged_in {
                return Err(HarnessError::Driver(
                    "navigation to an authenticated page while logged out".to_string(),
                ));
            }
            self.build_course_links();
        }
        Ok(())
    }

    fn find_all(&self, selector: &str) -> HarnessResult<Vec<usize>> {
        Ok(self.matching(selector))
    }

    fn is_visible(&self, handle: &usize) -> HarnessResult<bool> {
        Ok(self.node(handle)?.visible)
    }

    fn attr(&self, handle: &usize, name: &str) -> HarnessResult<Option<String>> {
        Ok(self
            .node(handle)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone()))
    }

    fn value_of(&self, handle: &usize) -> HarnessResult<String> {
        Ok(self.node(handle)?.value.clone())
    }

    fn text_of(&self, handle: &usize) -> HarnessResult<String> {
        Ok(self.node(handle)?.text.clone())
    }

    fn clear(&mut self, handle: &usize) -> HarnessResult<()> {
        self.node(handle)?;
        self.nodes[*handle].value.clear();
        Ok(())
    }

    fn set_value(&mut self, handle: &usize, value: &str) -> HarnessResult<()> {
        self.node(handle)?;
        self.nodes[*handle].value = value.to_string();
        Ok(())
    }

    fn dispatch_input(&mut self, handle: &usize) -> HarnessResult<()> {
        self.node(handle)?;
        // Only the search box reacts to input events; dialog fields are
        // read when the dialog is committed.
        if *handle == self.search_box {
            self.search = self.nodes[*handle].value.clone();
            self.rebuild_table();
        }
        Ok(())
    }

    fn click(&mut self, handle: &usize) -> HarnessResult<()> {
        let keys = self.node(handle)?.keys.clone();
        let has = |k: &str| keys.iter().any(|key| key == k);

        if has(locators::LOGIN_SUBMIT) {
            let email = &self.nodes[self.email_input].value;
            let password = &self.nodes[self.password_input].value;
            if !email.is_empty() && !password.is_empty() {
                self.logged_in = true;
                self.nodes[self.nav_link].visible = true;
            }
        } else if has(locators::NAV_STUDENTS) {
            self.nodes[self.heading].visible = true;
            self.nodes[self.add_button].visible = true;
            self.nodes[self.search_box].visible = true;
            self.rebuild_table();
        } else if has(locators::ADD_BUTTON) {
            self.open_dialog(DialogKind::Add);
        } else if has(locators::SUBMIT_BUTTON)
            || has(locators::EDIT_SAVE_BUTTON)
            || has(locators::DELETE_CONFIRM_BUTTON)
        {
            self.commit_dialog();
        } else if has(locators::SWAL_CONFIRM) {
            self.nodes[self.swal].visible = false;
            self.close_dialog();
        } else if has(locators::OK_BUTTON) {
            self.nodes[self.ok_button].visible = false;
        } else if has(locators::COURSE_LINKS) {
            self.open_course_detail();
        } else if has(locators::CONTENT_TAB) {
            self.open_content_editor();
        } else if has(locators::ADD_CHAPTER_BUTTON) {
            self.add_panel(None);
        } else if has(locators::ADD_LESSON_BUTTON) {
            self.lesson_count += 1;
            self.add_panel(Some(self.lesson_count));
        } else if has(locators::SAVE_BUTTON) {
            self.save_content();
        } else if has(locators::PANEL_HEADER) {
            self.toggle_panel(*handle);
        } else if let Some(idx) = self.students.iter().position(|s| {
            keys.iter()
                .any(|k| *k == locators::row_edit_button(&s.cells[0]))
        }) {
            self.open_dialog(DialogKind::Edit(idx));
        } else if let Some(idx) = self.students.iter().position(|s| {
            keys.iter()
                .any(|k| *k == locators::row_delete_button(&s.cells[0]))
        }) {
            self.open_dialog(DialogKind::Delete(idx));
        }
        Ok(())
    }

    fn wait_for(
        &mut self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> HarnessResult<()> {
        // The simulation settles synchronously, so a wait either already
        // holds or never will.
        let matches = self.matching(selector);
        let any_visible = matches.iter().any(|&i| self.nodes[i].visible);
        let satisfied = match state {
            WaitState::Visible => any_visible,
            WaitState::Hidden => !any_visible,
            WaitState::Present => !matches.is_empty(),
            WaitState::Absent => matches.is_empty(),
        };
        if satisfied {
            Ok(())
        } else {
            Err(HarnessError::Timeout {
                condition: format!("{selector} to be {state:?}"),
                ms: timeout.as_millis() as u64,
            })
        }
    }

    fn quit(&mut self) -> HarnessResult<()> {
        self.quit_calls += 1;
        Ok(())
    }
}

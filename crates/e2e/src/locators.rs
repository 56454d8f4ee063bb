//! Selectors for the e-learning admin UI
//!
//! The UI contract the workflows rely on: a two-field login form, a
//! student table with fields at fixed column offsets, Vuetify dialogs
//! identified by an active-state class, and a SweetAlert confirmation
//! after every mutating action.

use elearn_harness::Gender;

// Login page
pub const LOGIN_EMAIL: &str = "input#input-10";
pub const LOGIN_PASSWORD: &str = "input#input-13";
pub const LOGIN_SUBMIT: &str = "button:has-text('Đăng nhập')";
pub const NAV_STUDENTS: &str = "nav a:has-text('Quản lý học viên')";
pub const STUDENTS_HEADING: &str = ":has-text('Danh sách học viên')";

// Student management
pub const DIALOG: &str = "div.v-dialog__content.active";
pub const SEARCH_BOX: &str = "input#input-41";
pub const ADD_BUTTON: &str = "button:has-text('Thêm mới')";
pub const SUBMIT_BUTTON: &str = "div.v-dialog__content.active button:has-text('Thêm')";
pub const EDIT_SAVE_BUTTON: &str = "div.v-dialog__content.active button:has-text('Sửa')";
pub const DELETE_CONFIRM_BUTTON: &str = "div.v-dialog__content.active button:has-text('Xoá')";
pub const SWAL_CONFIRM: &str = "button.swal2-confirm";

// Input names inside the add/edit dialog
pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_STUDENT_CODE: &str = "student_code";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_DOB: &str = "dob";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_ADDRESS: &str = "address";

pub fn dialog_input(name: &str) -> String {
    format!("{DIALOG} input[name='{name}']")
}

pub fn gender_label(gender: Gender) -> String {
    format!("{DIALOG} label:has-text('{}')", gender.label())
}

pub fn student_row(code: &str) -> String {
    format!("table tr:has(td:has-text('{code}'))")
}

pub fn student_row_cells(code: &str) -> String {
    format!("{} td", student_row(code))
}

pub fn row_edit_button(code: &str) -> String {
    format!("{} button:has(i.mdi-pencil)", student_row(code))
}

pub fn row_delete_button(code: &str) -> String {
    format!("{} button.red--text:has(i.mdi-close)", student_row(code))
}

// Course content authoring
pub const COURSE_LINKS: &str = "tbody tr a[href*='/quan-tri-vien/khoa-hoc/quan-ly/']";
pub const CONTENT_TAB: &str = "div[role='tab']:has-text('Nội dung môn học')";
pub const ADD_CHAPTER_BUTTON: &str = "button:has-text('Thêm chương học')";
pub const ADD_LESSON_BUTTON: &str = "button:has-text('Thêm bài học')";
pub const SAVE_BUTTON: &str = "button:has-text('Lưu')";
pub const OK_BUTTON: &str = "button:has-text('OK')";
pub const PANEL_HEADER: &str = "button.v-expansion-panel-header";
pub const EXPANDED_PANEL_HEADER: &str = "button.v-expansion-panel-header[aria-expanded='true']";
pub const TITLE_FIELD: &str = "input[name='title_course_item']";
pub const DESCRIPTION_FIELD: &str = "input[name='description_course_item']";

pub fn lesson_panel_header(ordinal: usize) -> String {
    format!("{PANEL_HEADER}:has(strong:has-text('Bài số {ordinal}'))")
}

pub fn content_title(title: &str) -> String {
    format!("div.v-expansion-panel div:has-text('{title}')")
}

//! Student record CRUD workflow
//!
//! One full pass over the record-management screen:
//! login → create → verify → edit address → verify → delete → verify
//! absent. Each transition is gated by a UI action and a bounded wait;
//! a failure at any transition aborts the remaining sequence. There is no
//! compensating rollback; an aborted run can leave the generated record
//! behind, and the identifier carries a time-based suffix so later runs do
//! not collide with it.

use rand::Rng;
use tracing::{info, warn};

use elearn_harness::generate::{self, PersonRecord};
use elearn_harness::{form, verify, HarnessError, HarnessResult, PageDriver, Vocabulary, WaitState};

use crate::locators;
use crate::session::{self, WorkflowConfig};

/// Stages of the CRUD state machine, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    LoggedOut,
    LoggedIn,
    Created,
    CreateVerified,
    Edited,
    EditVerified,
    Deleted,
    DeleteVerified,
}

pub struct StudentWorkflow<'a, D: PageDriver> {
    driver: &'a mut D,
    config: &'a WorkflowConfig,
    stage: Stage,
}

impl<'a, D: PageDriver> StudentWorkflow<'a, D> {
    pub fn new(driver: &'a mut D, config: &'a WorkflowConfig) -> Self {
        Self {
            driver,
            config,
            stage: Stage::LoggedOut,
        }
    }

    /// Stage reached so far; on error this names the last completed
    /// transition.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, stage: Stage) {
        info!(?stage, "workflow transition");
        self.stage = stage;
    }

    /// Run the whole sequence with a freshly generated student.
    ///
    /// Returns the record as it stood at the end (with the edited
    /// address) so callers can report what was exercised.
    pub fn run<R: Rng>(&mut self, vocab: &Vocabulary, rng: &mut R) -> HarnessResult<PersonRecord> {
        let person = generate::generate_person(vocab, rng)?;

        self.login()?;
        self.create(&person)?;
        self.verify_created(&person)?;

        let new_address = generate::generate_address(vocab, rng)?;
        self.edit_address(&person, &new_address)?;
        self.verify_address(&person, &new_address)?;

        self.delete(&person)?;
        self.verify_deleted(&person)?;

        Ok(PersonRecord {
            address: new_address,
            ..person
        })
    }

    fn login(&mut self) -> HarnessResult<()> {
        session::login(self.driver, self.config)?;
        form::click(self.driver, locators::NAV_STUDENTS)?;
        self.wait(locators::STUDENTS_HEADING, WaitState::Visible)?;
        self.advance(Stage::LoggedIn);
        Ok(())
    }

    fn create(&mut self, person: &PersonRecord) -> HarnessResult<()> {
        info!(code = %person.code, "adding student");
        form::click(self.driver, locators::ADD_BUTTON)?;
        self.wait(locators::DIALOG, WaitState::Visible)?;

        self.fill_dialog_field(locators::FIELD_FULL_NAME, &person.full_name)?;
        self.fill_dialog_field(locators::FIELD_STUDENT_CODE, &person.code)?;
        self.fill_dialog_field(locators::FIELD_EMAIL, &person.email)?;
        self.fill_dialog_field(locators::FIELD_PHONE, &person.phone)?;
        self.fill_dialog_field(locators::FIELD_DOB, &person.dob)?;
        self.fill_dialog_field(locators::FIELD_ADDRESS, &person.address)?;
        form::click(self.driver, &locators::gender_label(person.gender))?;

        form::click(self.driver, locators::SUBMIT_BUTTON)?;
        self.confirm_if_present()?;
        self.wait(locators::DIALOG, WaitState::Hidden)?;
        self.advance(Stage::Created);
        Ok(())
    }

    fn verify_created(&mut self, person: &PersonRecord) -> HarnessResult<()> {
        self.search(&person.code)?;
        self.wait(&locators::student_row(&person.code), WaitState::Visible)?;
        let cells = form::texts_of(self.driver, &locators::student_row_cells(&person.code))?;
        verify::verify_person(&cells, person)?;
        self.advance(Stage::CreateVerified);
        Ok(())
    }

    fn edit_address(&mut self, person: &PersonRecord, new_address: &str) -> HarnessResult<()> {
        info!(code = %person.code, address = new_address, "editing student");
        form::click(self.driver, &locators::row_edit_button(&person.code))?;
        self.wait(locators::DIALOG, WaitState::Visible)?;

        self.fill_dialog_field(locators::FIELD_ADDRESS, new_address)?;
        form::click(self.driver, locators::EDIT_SAVE_BUTTON)?;
        self.confirm_if_present()?;
        self.wait(locators::DIALOG, WaitState::Hidden)?;
        self.advance(Stage::Edited);
        Ok(())
    }

    fn verify_address(&mut self, person: &PersonRecord, expected: &str) -> HarnessResult<()> {
        self.search(&person.code)?;
        self.wait(&locators::student_row(&person.code), WaitState::Visible)?;
        let cells = form::texts_of(self.driver, &locators::student_row_cells(&person.code))?;
        verify::verify_cell(&cells, verify::columns::ADDRESS, "address", expected)?;
        self.advance(Stage::EditVerified);
        Ok(())
    }

    fn delete(&mut self, person: &PersonRecord) -> HarnessResult<()> {
        info!(code = %person.code, "deleting student");
        form::click(self.driver, &locators::row_delete_button(&person.code))?;
        self.wait(locators::DIALOG, WaitState::Visible)?;
        form::click(self.driver, locators::DELETE_CONFIRM_BUTTON)?;
        self.confirm_if_present()?;
        self.advance(Stage::Deleted);
        Ok(())
    }

    fn verify_deleted(&mut self, person: &PersonRecord) -> HarnessResult<()> {
        self.search(&person.code)?;
        let rows = self.driver.find_all(&locators::student_row(&person.code))?;
        if !rows.is_empty() {
            return Err(HarnessError::AssertionMismatch {
                field: "row count".to_string(),
                expected: "0 rows".to_string(),
                actual: format!("{} rows", rows.len()),
            });
        }
        self.advance(Stage::DeleteVerified);
        Ok(())
    }

    fn fill_dialog_field(&mut self, name: &str, value: &str) -> HarnessResult<()> {
        form::set_field(self.driver, &locators::dialog_input(name), value)
    }

    fn search(&mut self, code: &str) -> HarnessResult<()> {
        form::set_field(self.driver, locators::SEARCH_BOX, code)
    }

    /// Click the confirmation control if one is showing. Some mutations
    /// close their own dialog without it.
    fn confirm_if_present(&mut self) -> HarnessResult<()> {
        match form::click(self.driver, locators::SWAL_CONFIRM) {
            Ok(()) => Ok(()),
            Err(HarnessError::FieldNotFound { .. })
            | Err(HarnessError::NoVisibleCandidate { .. }) => {
                warn!("no confirmation control found");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn wait(&mut self, selector: &str, state: WaitState) -> HarnessResult<()> {
        self.driver
            .wait_for(selector, state, self.config.wait_timeout)
    }
}

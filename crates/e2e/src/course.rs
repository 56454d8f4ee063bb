//! Course chapter/lesson authoring workflow
//!
//! Picks one chapter and two lessons from the content catalogs, drives
//! the expansion-panel editor on a randomly chosen course, saves, and
//! verifies the titles are present afterwards. The panel editor renders a
//! new form subtree per added panel, so every fill goes through the
//! last-visible resolution policy.

use rand::Rng;
use tracing::info;

use elearn_harness::generate::select_content_items;
use elearn_harness::{
    form, ContentCatalog, ContentItem, HarnessError, HarnessResult, PageDriver, WaitState,
};

use crate::locators;
use crate::session::{self, WorkflowConfig};

/// Lessons added per run, 1-based ordinals.
const LESSON_COUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct CourseOutcome {
    pub course: String,
    pub chapter: ContentItem,
    pub lessons: Vec<ContentItem>,
}

pub struct CourseWorkflow<'a, D: PageDriver> {
    driver: &'a mut D,
    config: &'a WorkflowConfig,
}

impl<'a, D: PageDriver> CourseWorkflow<'a, D> {
    pub fn new(driver: &'a mut D, config: &'a WorkflowConfig) -> Self {
        Self { driver, config }
    }

    pub fn run<R: Rng>(
        &mut self,
        chapters: &ContentCatalog,
        lessons: &ContentCatalog,
        rng: &mut R,
    ) -> HarnessResult<CourseOutcome> {
        let chapter = select_content_items(chapters, rng, 1)?.remove(0);
        let picked_lessons = select_content_items(lessons, rng, LESSON_COUNT)?;
        info!(chapter = %chapter.title, lessons = picked_lessons.len(), "content selected");

        session::login(self.driver, self.config)?;
        let course = self.open_random_course(rng)?;

        self.add_chapter(&chapter)?;
        for (i, lesson) in picked_lessons.iter().enumerate() {
            self.add_lesson(lesson, i + 1)?;
        }

        self.collapse_all()?;
        self.save()?;

        self.verify_present("chapter", &chapter.title)?;
        for lesson in &picked_lessons {
            self.verify_present("lesson", &lesson.title)?;
        }

        Ok(CourseOutcome {
            course,
            chapter,
            lessons: picked_lessons,
        })
    }

    fn open_random_course<R: Rng>(&mut self, rng: &mut R) -> HarnessResult<String> {
        self.driver.goto(&self.config.course_url)?;
        self.wait(locators::COURSE_LINKS, WaitState::Present)?;

        let links = self.driver.find_all(locators::COURSE_LINKS)?;
        if links.is_empty() {
            return Err(HarnessError::FieldNotFound {
                selector: locators::COURSE_LINKS.to_string(),
            });
        }
        let link = &links[rng.gen_range(0..links.len())];
        let name = self.driver.text_of(link)?.trim().to_string();
        info!(course = %name, "selected course");
        self.driver.click(link)?;

        self.wait(locators::CONTENT_TAB, WaitState::Visible)?;
        form::click(self.driver, locators::CONTENT_TAB)?;
        Ok(name)
    }

    fn add_chapter(&mut self, chapter: &ContentItem) -> HarnessResult<()> {
        info!(title = %chapter.title, "adding chapter");
        form::click(self.driver, locators::ADD_CHAPTER_BUTTON)?;
        self.expand_last_panel()?;
        form::set_field(self.driver, locators::TITLE_FIELD, &chapter.title)?;
        form::set_field(self.driver, locators::DESCRIPTION_FIELD, &chapter.description)?;
        Ok(())
    }

    fn add_lesson(&mut self, lesson: &ContentItem, ordinal: usize) -> HarnessResult<()> {
        info!(title = %lesson.title, ordinal, "adding lesson");
        form::click(self.driver, locators::ADD_LESSON_BUTTON)?;

        let header = locators::lesson_panel_header(ordinal);
        self.wait(&header, WaitState::Present)?;
        self.expand_panel(&header)?;
        form::set_field(self.driver, locators::TITLE_FIELD, &lesson.title)?;
        form::set_field(self.driver, locators::DESCRIPTION_FIELD, &lesson.description)?;

        // Collapse so the next panel's fields are the last visible match.
        form::click(self.driver, &header)?;
        Ok(())
    }

    /// Expand the most recently added panel if it is not already open.
    fn expand_last_panel(&mut self) -> HarnessResult<()> {
        let headers = self.driver.find_all(locators::PANEL_HEADER)?;
        let Some(header) = headers.last() else {
            return Err(HarnessError::FieldNotFound {
                selector: locators::PANEL_HEADER.to_string(),
            });
        };
        if self.driver.attr(header, "aria-expanded")?.as_deref() != Some("true") {
            self.driver.click(header)?;
        }
        Ok(())
    }

    fn expand_panel(&mut self, selector: &str) -> HarnessResult<()> {
        let headers = self.driver.find_all(selector)?;
        let Some(header) = headers.first() else {
            return Err(HarnessError::FieldNotFound {
                selector: selector.to_string(),
            });
        };
        if self.driver.attr(header, "aria-expanded")?.as_deref() != Some("true") {
            self.driver.click(header)?;
        }
        Ok(())
    }

    fn collapse_all(&mut self) -> HarnessResult<()> {
        let expanded = self.driver.find_all(locators::EXPANDED_PANEL_HEADER)?;
        for header in expanded.iter().rev() {
            self.driver.click(header)?;
        }
        Ok(())
    }

    fn save(&mut self) -> HarnessResult<()> {
        info!("saving course content");
        form::click(self.driver, locators::SAVE_BUTTON)?;
        match form::click(self.driver, locators::OK_BUTTON) {
            Ok(()) => {}
            Err(HarnessError::FieldNotFound { .. })
            | Err(HarnessError::NoVisibleCandidate { .. }) => {}
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn verify_present(&mut self, what: &str, title: &str) -> HarnessResult<()> {
        let matches = self.driver.find_all(&locators::content_title(title))?;
        if matches.is_empty() {
            return Err(HarnessError::AssertionMismatch {
                field: what.to_string(),
                expected: title.to_string(),
                actual: "absent".to_string(),
            });
        }
        info!(what, title, "verified");
        Ok(())
    }

    fn wait(&mut self, selector: &str, state: WaitState) -> HarnessResult<()> {
        self.driver
            .wait_for(selector, state, self.config.wait_timeout)
    }
}

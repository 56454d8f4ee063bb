//! Browser session configuration and scoped teardown

use std::time::Duration;

use tracing::{info, warn};

use elearn_harness::{form, HarnessResult, PageDriver, WaitState};

use crate::locators;

/// Options for the underlying browser session, suitable for containerized
/// execution.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub headless: bool,
    pub no_sandbox: bool,
    pub disable_dev_shm: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            no_sandbox: true,
            disable_dev_shm: true,
        }
    }
}

impl SessionConfig {
    /// Chrome argument list for this configuration.
    pub fn browser_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless");
        }
        if self.no_sandbox {
            args.push("--no-sandbox");
        }
        if self.disable_dev_shm {
            args.push("--disable-dev-shm-usage");
        }
        args
    }
}

/// Workflow-level settings: where to log in, as whom, and how long each
/// bounded wait may block.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub login_url: String,
    pub course_url: String,
    pub username: String,
    pub password: String,
    pub wait_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            login_url: "/dang-nhap?redirect=%2Ftrang-chu".to_string(),
            course_url: "/quan-tri-vien/khoa-hoc".to_string(),
            username: "qa.admin@example.com".to_string(),
            password: "changeme".to_string(),
            wait_timeout: Duration::from_secs(10),
        }
    }
}

/// Owns a driver for the duration of one test and guarantees teardown on
/// every exit path, including panics and early returns.
pub struct Session<D: PageDriver> {
    driver: D,
}

impl<D: PageDriver> Session<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: PageDriver> Drop for Session<D> {
    fn drop(&mut self) {
        if let Err(e) = self.driver.quit() {
            warn!(error = %e, "session teardown failed");
        }
    }
}

/// Log in as the configured account and wait for the home navigation.
pub fn login<D: PageDriver>(driver: &mut D, config: &WorkflowConfig) -> HarnessResult<()> {
    info!("logging in as {}", config.username);
    driver.goto(&config.login_url)?;
    form::set_field(driver, locators::LOGIN_EMAIL, &config.username)?;
    form::set_field(driver, locators::LOGIN_PASSWORD, &config.password)?;
    form::click(driver, locators::LOGIN_SUBMIT)?;
    driver.wait_for(
        locators::NAV_STUDENTS,
        WaitState::Visible,
        config.wait_timeout,
    )?;
    Ok(())
}

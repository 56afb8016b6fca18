//! User settings: theme and login state

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{Config, ThemeMode};
use crate::models::Session;

/// Settings backed by [`Config`]; every change is written to the attached file
#[derive(Debug, Clone)]
pub struct SettingsScreen {
    config: Config,
    path: Option<PathBuf>,
}

impl SettingsScreen {
    pub fn new(config: Config, path: Option<PathBuf>) -> Self {
        Self { config, path }
    }

    /// In-memory settings that are never persisted
    pub fn detached(config: Config) -> Self {
        Self::new(config, None)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> ThemeMode {
        self.config.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<()> {
        self.config.theme = theme;
        self.persist()
    }

    pub fn cycle_theme(&mut self) -> Result<ThemeMode> {
        let next = self.config.theme.next();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn login_state(&self) -> Option<&Session> {
        self.config.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.config.session.is_some()
    }

    pub fn store_session(&mut self, session: Session) -> Result<()> {
        self.config.session = Some(session);
        self.persist()
    }

    /// Forget the stored session, returning it
    pub fn logout(&mut self) -> Result<Option<Session>> {
        let session = self.config.session.take();
        self.persist()?;
        Ok(session)
    }

    fn persist(&self) -> Result<()> {
        match self.path {
            Some(ref path) => self.config.save_to(path),
            None => Ok(()),
        }
    }
}

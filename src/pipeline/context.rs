//! Per-request state filled in by request interceptors.

use crate::error::{Result, SkillError};
use crate::localization::Localizer;

/// Created fresh for every request and dropped with it.
#[derive(Debug, Default)]
pub struct RequestContext {
    localizer: Option<Localizer>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_localizer(&mut self, localizer: Localizer) {
        self.localizer = Some(localizer);
    }

    /// The bound localizer; an error if no interceptor bound one.
    pub fn localizer(&self) -> Result<&Localizer> {
        self.localizer.as_ref().ok_or(SkillError::LocalizationUnbound)
    }
}

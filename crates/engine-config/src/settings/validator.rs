use crate::settings::{CompilerSettings, error::SettingsError};
use model::pagination::limits::CompileLimits;
use tracing::{debug, warn};

/// Page sizes above this are allowed but usually a mistake.
const LARGE_PAGE_SIZE: u32 = 10_000;

/// Filter depths above this are allowed but weaken the recursion guard.
const LARGE_FILTER_DEPTH: usize = 64;

/// Checks settings for consistency and turns them into compile limits.
pub struct SettingsValidator<'a> {
    settings: &'a CompilerSettings,
}

impl<'a> SettingsValidator<'a> {
    pub fn new(settings: &'a CompilerSettings) -> Self {
        Self { settings }
    }

    pub fn validate(&self) -> Result<CompileLimits, SettingsError> {
        let mut errors: Vec<String> = Vec::new();

        self.validate_page_sizes(&mut errors);
        self.validate_filter_depth(&mut errors);

        if !errors.is_empty() {
            return Err(SettingsError::ValidationFailed(errors));
        }

        let limits = CompileLimits {
            default_page_size: self.settings.default_page_size,
            max_page_size: self.settings.max_page_size,
            max_filter_depth: self.settings.max_filter_depth,
        };
        debug!("Validated compile limits: {limits:?}");
        Ok(limits)
    }

    fn validate_page_sizes(&self, errors: &mut Vec<String>) {
        let s = self.settings;
        if s.default_page_size == 0 {
            errors.push("defaultPageSize must be at least 1".to_string());
        }
        if s.max_page_size == 0 {
            errors.push("maxPageSize must be at least 1".to_string());
        }
        if s.default_page_size > s.max_page_size {
            errors.push(format!(
                "defaultPageSize ({}) must not exceed maxPageSize ({})",
                s.default_page_size, s.max_page_size
            ));
        }
        if s.max_page_size > LARGE_PAGE_SIZE {
            warn!(
                "maxPageSize {} is very large, pages may be slow to fetch",
                s.max_page_size
            );
        }
    }

    fn validate_filter_depth(&self, errors: &mut Vec<String>) {
        let depth = self.settings.max_filter_depth;
        if depth == 0 {
            errors.push("maxFilterDepth must be at least 1".to_string());
        } else if depth > LARGE_FILTER_DEPTH {
            warn!("maxFilterDepth {depth} is very large, deep filters are expensive to compile");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let limits = SettingsValidator::new(&CompilerSettings::default())
            .validate()
            .unwrap();
        assert_eq!(limits, CompileLimits::default());
    }

    #[test]
    fn test_collects_all_errors() {
        let settings = CompilerSettings {
            default_page_size: 0,
            max_page_size: 0,
            max_filter_depth: 0,
        };

        match SettingsValidator::new(&settings).validate() {
            Err(SettingsError::ValidationFailed(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_default_page_size_above_max() {
        let settings = CompilerSettings {
            default_page_size: 50,
            max_page_size: 10,
            max_filter_depth: 5,
        };

        let err = SettingsValidator::new(&settings).validate().unwrap_err();
        assert!(err.to_string().contains("must not exceed maxPageSize (10)"));
    }
}

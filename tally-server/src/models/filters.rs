//! List filter parameters shared by the list endpoints

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::ValidationError;

/// Query parameters accepted by list endpoints.
///
/// Each endpoint reads the keys it understands and ignores the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Owner key
    pub profile: Option<String>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
    pub habit_id: Option<Uuid>,
    pub platform: Option<String>,
}

impl ListParams {
    /// Owner key, required by per-profile collections.
    pub fn require_profile(&self) -> Result<&str, ValidationError> {
        match self.profile.as_deref() {
            Some(profile) if !profile.trim().is_empty() => Ok(profile),
            _ => Err(ValidationError::Missing { field: "profile" }),
        }
    }

    /// Date range with `from <= to` checked.
    pub fn range(&self) -> Result<DateRange, ValidationError> {
        DateRange::new(self.from, self.to)
    }
}

/// Inclusive, optionally open-ended date range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, ValidationError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ValidationError::InvalidFormat {
                    field: "from",
                    reason: "must not be after 'to'",
                });
            }
        }
        Ok(Self { from, to })
    }

    /// Unbounded on both ends
    pub fn all() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn profile_is_required_and_not_blank() {
        let params = ListParams::default();
        assert_eq!(
            params.require_profile(),
            Err(ValidationError::Missing { field: "profile" })
        );

        let params = ListParams {
            profile: Some("  ".into()),
            ..Default::default()
        };
        assert!(params.require_profile().is_err());

        let params = ListParams {
            profile: Some("a".into()),
            ..Default::default()
        };
        assert_eq!(params.require_profile(), Ok("a"));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(DateRange::new(Some(date("2024-03-02")), Some(date("2024-03-01"))).is_err());
        assert!(DateRange::new(Some(date("2024-03-01")), Some(date("2024-03-01"))).is_ok());
        assert!(DateRange::new(None, Some(date("2024-03-01"))).is_ok());
    }

    #[test]
    fn open_range_has_no_bounds() {
        let range = DateRange::all();
        assert_eq!(range.from, None);
        assert_eq!(range.to, None);
    }
}

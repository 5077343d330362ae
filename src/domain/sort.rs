//! Student list ordering and column-header toggles.

use std::cmp::Ordering;

use super::student::Student;

/// Ordering applied to the student list.
///
/// Each variant corresponds to a `sortOrder` query key. Ties on the primary
/// column are broken by ID in the same direction, so a descending order is
/// always the exact reverse of its ascending counterpart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NameAscending,
    NameDescending,
    DateAscending,
    DateDescending,
}

/// Key for the name column header.
///
/// Flips to descending only from an absent or empty key. Any other key,
/// recognized or not, links back to the default.
#[must_use]
pub fn name_toggle(key: Option<&str>) -> &'static str {
    if key.map_or(true, str::is_empty) {
        SortOrder::NameDescending.key()
    } else {
        SortOrder::NameAscending.key()
    }
}

/// Key for the date column header.
#[must_use]
pub fn date_toggle(key: Option<&str>) -> &'static str {
    if key == Some(SortOrder::DateAscending.key()) {
        SortOrder::DateDescending.key()
    } else {
        SortOrder::DateAscending.key()
    }
}

impl SortOrder {
    /// Parse a query key. Absent, empty and unrecognized keys fall back to
    /// ascending by last name.
    #[must_use]
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("name_desc") => Self::NameDescending,
            Some("Date") => Self::DateAscending,
            Some("date_desc") => Self::DateDescending,
            _ => Self::NameAscending,
        }
    }

    /// The query key that selects this order.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::NameAscending => "",
            Self::NameDescending => "name_desc",
            Self::DateAscending => "Date",
            Self::DateDescending => "date_desc",
        }
    }

    #[must_use]
    pub fn is_descending(self) -> bool {
        matches!(self, Self::NameDescending | Self::DateDescending)
    }

    /// Compare two students under this ordering.
    #[must_use]
    pub fn compare(self, a: &Student, b: &Student) -> Ordering {
        let ascending = match self {
            Self::NameAscending | Self::NameDescending => a
                .last_name
                .cmp(&b.last_name)
                .then_with(|| a.id.cmp(&b.id)),
            Self::DateAscending | Self::DateDescending => a
                .enrollment_date
                .cmp(&b.enrollment_date)
                .then_with(|| a.id.cmp(&b.id)),
        };
        if self.is_descending() {
            ascending.reverse()
        } else {
            ascending
        }
    }

    pub fn sort(self, students: &mut [Student]) {
        students.sort_by(|a, b| self.compare(a, b));
    }
}

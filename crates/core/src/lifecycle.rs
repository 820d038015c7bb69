//! Lifecycle status axes shared by every content entity.
//!
//! Three independent axes, persisted as SMALLINT columns with the wire
//! values the original schema used (`deleted=1/active=2`, `visible=1/
//! hidden=2`, `featured=1/not=2`). Keeping each axis its own enum makes
//! deleted-but-visible style query mistakes unrepresentable: a query is
//! either active-scoped or public-scoped, never a raw flag comparison.

use serde::{Deserialize, Serialize};

/// Soft-deletion axis. One-way in practice: the public contract never
/// resurrects a `Deleted` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteStatus {
    Deleted = 1,
    Active = 2,
}

/// Visibility axis, independent of deletion. Governs whether an active
/// record appears in customer-facing listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    Visible = 1,
    Hidden = 2,
}

/// Homepage promotion axis (Blog and Service only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HomeStatus {
    Featured = 1,
    NotFeatured = 2,
}

impl Default for DeleteStatus {
    fn default() -> Self {
        DeleteStatus::Active
    }
}

impl Default for DisplayStatus {
    fn default() -> Self {
        DisplayStatus::Visible
    }
}

impl Default for HomeStatus {
    fn default() -> Self {
        HomeStatus::NotFeatured
    }
}

impl DisplayStatus {
    /// Caller-supplied visibility on create/update. Anything other than an
    /// explicit `Hidden` (including an omitted value) means `Visible`.
    pub fn from_input(value: Option<DisplayStatus>) -> Self {
        value.unwrap_or(DisplayStatus::Visible)
    }
}

impl HomeStatus {
    /// Homepage promotion defaults to off unless the caller asks for it.
    pub fn from_input(value: Option<HomeStatus>) -> Self {
        value.unwrap_or(HomeStatus::NotFeatured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults() {
        assert_eq!(DeleteStatus::default(), DeleteStatus::Active);
        assert_eq!(DisplayStatus::from_input(None), DisplayStatus::Visible);
        assert_eq!(HomeStatus::from_input(None), HomeStatus::NotFeatured);
    }

    #[test]
    fn explicit_inputs_win() {
        assert_eq!(
            DisplayStatus::from_input(Some(DisplayStatus::Hidden)),
            DisplayStatus::Hidden
        );
        assert_eq!(
            HomeStatus::from_input(Some(HomeStatus::Featured)),
            HomeStatus::Featured
        );
    }

    #[test]
    fn wire_values_match_original_schema() {
        assert_eq!(DeleteStatus::Deleted as i16, 1);
        assert_eq!(DeleteStatus::Active as i16, 2);
        assert_eq!(DisplayStatus::Visible as i16, 1);
        assert_eq!(HomeStatus::Featured as i16, 1);
    }
}

//! Shared validation component.
//!
//! Every content aggregate runs the same checks: required/normalized
//! inputs, case-insensitive uniqueness, acting-user resolution, and the
//! category/subcategory/service referential checks. The uniqueness check
//! takes the aggregate's own storage lookup as a future so one function
//! serves every entity type.

use std::future::Future;

use crate::error::{CoreError, CoreResult};
use crate::model::{Category, Service, Subcategory, UserRef};
use crate::store::{CategoryStore, ServiceStore, SubcategoryStore, UserDirectory};

/// Trim a required text field; blank or missing is an error.
pub fn required_text(value: Option<&str>, label: &str) -> CoreResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::invalid(format!("{label} is required"))),
    }
}

/// Trim and lowercase a required slug.
pub fn normalized_slug(value: Option<&str>, label: &str) -> CoreResult<String> {
    required_text(value, label).map(|v| v.to_lowercase())
}

/// Trim an optional text field; blank collapses to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Run a uniqueness lookup and surface a hit as `Conflict`.
///
/// The application-level check exists for the friendly error message; the
/// storage layer's unique index on the normalized column is the backstop
/// under concurrent writes.
pub async fn check_unique<F>(taken: F, label: &str) -> CoreResult<()>
where
    F: Future<Output = CoreResult<bool>>,
{
    if taken.await? {
        return Err(CoreError::conflict(format!("{label} already exists")));
    }
    Ok(())
}

/// Resolve the acting user; unknown or inactive users fail every mutation
/// before any other validation runs.
pub async fn acting_user<D>(directory: &D, user_id: i64) -> CoreResult<UserRef>
where
    D: UserDirectory + ?Sized,
{
    if user_id <= 0 {
        return Err(CoreError::invalid("User ID is required"));
    }
    directory
        .find_active_user(user_id)
        .await?
        .ok_or_else(|| CoreError::invalid("User not found or inactive"))
}

/// Resolve the category and optional subcategory, enforcing that the
/// subcategory belongs to the chosen category.
pub async fn resolve_hierarchy<S>(
    store: &S,
    category_id: Option<i64>,
    subcategory_id: Option<i64>,
) -> CoreResult<(Category, Option<Subcategory>)>
where
    S: CategoryStore + SubcategoryStore,
{
    let category_id = match category_id {
        Some(id) if id > 0 => id,
        _ => return Err(CoreError::invalid("Valid category is required")),
    };
    let category = store
        .find_active_category(category_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category"))?;

    let subcategory = match subcategory_id {
        Some(id) if id > 0 => {
            let sub = store
                .find_active_subcategory(id)
                .await?
                .ok_or_else(|| CoreError::not_found("Subcategory"))?;
            if sub.category_id != category.id {
                return Err(CoreError::invalid(
                    "Subcategory does not belong to selected category",
                ));
            }
            Some(sub)
        }
        _ => None,
    };

    Ok((category, subcategory))
}

/// Load the referenced services filtered to active. A count mismatch means
/// some ids do not exist or are inactive; the caller does not learn which.
pub async fn resolve_services<S>(store: &S, ids: &[i64]) -> CoreResult<Vec<Service>>
where
    S: ServiceStore + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let services = store.load_active_services(ids).await?;
    if services.len() != ids.len() {
        return Err(CoreError::invalid("One or more services not found or deleted"));
    }
    Ok(services)
}

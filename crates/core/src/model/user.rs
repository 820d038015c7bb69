use serde::Serialize;

/// What the user directory hands back for an acting user.
///
/// Content records keep only `public_id` as a weak back reference.
/// Resolving a display name is an optional projection-time lookup, never
/// required for the mutation itself.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRef {
    pub id: i64,
    pub public_id: String,
    pub full_name: Option<String>,
}

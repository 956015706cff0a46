use super::role::Role;

/// Stable identity attributes of a verified account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: i64,
    pub email: String,
    pub role: Role,
    /// Company the account belongs to (employers only).
    pub organization_ref: Option<i64>,
}

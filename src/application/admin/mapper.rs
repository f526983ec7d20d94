//! User record -> admin view projection

use super::dto::UserAdminView;
use crate::domain::UserRecord;
use crate::shared::time::format_timestamp;

pub fn to_admin_view(record: UserRecord) -> UserAdminView {
    UserAdminView {
        id: record.id,
        name: record.name,
        email: record.email,
        username: record.username,
        github_username: record.github.map(|g| g.username).unwrap_or_default(),
        role: record.role,
        status: record.status,
        created_at: format_timestamp(&record.created_at),
        updated_at: format_timestamp(&record.updated_at),
    }
}

/// Project every record, keeping input order. An empty input yields an
/// empty list.
pub fn to_admin_views<I>(records: I) -> Vec<UserAdminView>
where
    I: IntoIterator<Item = UserRecord>,
{
    records.into_iter().map(to_admin_view).collect()
}

/// An institute login. `id` keys its event log and filters its roster.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Institute {
    pub id: String,
    pub name: String,
    pub password_hash: String,
}

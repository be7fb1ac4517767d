use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::RoleRight;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Roles aggregated per user as a JSON array; users without assignments get `[]`.
const ROLES_AGGREGATE: &str = r#"
    COALESCE(
        json_agg(json_build_object('role_id', r.id, 'role_name', r.name) ORDER BY r.id)
            FILTER (WHERE r.id IS NOT NULL),
        '[]'
    )::text AS roles
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_roles(raw: &str) -> Result<Vec<Role>, UserError> {
        serde_json::from_str(raw)
            .map_err(|e| UserError::Repository(format!("Failed to parse roles: {}", e)))
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let roles: String = row.try_get("roles").map_err(database_error)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(database_error)?),
            email: row.try_get("email").map_err(database_error)?,
            password_hash: row.try_get("password_hash").map_err(database_error)?,
            roles: Self::parse_roles(&roles)?,
            last_access: row.try_get("last_access").map_err(database_error)?,
        })
    }

    fn row_to_summary(row: &PgRow) -> Result<UserSummary, UserError> {
        let roles: String = row.try_get("roles").map_err(database_error)?;

        Ok(UserSummary {
            id: UserId(row.try_get("id").map_err(database_error)?),
            email: row.try_get("email").map_err(database_error)?,
            last_access: row.try_get("last_access").map_err(database_error)?,
            roles: Self::parse_roles(&roles)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::Repository(e.to_string())
}

/// Map a failed user write, recognising the email uniqueness constraint.
fn user_write_error(e: sqlx::Error, email: &str) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return UserError::EmailAlreadyExists(email.to_string());
        }
    }
    database_error(e)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let query = format!(
            r#"
            SELECT u.id, u.email, u.password_hash, u.last_access, {ROLES_AGGREGATE}
            FROM users u
            LEFT JOIN user_roles ur ON u.id = ur.user_id
            LEFT JOIN roles r ON ur.role_id = r.id
            WHERE u.email = $1
            GROUP BY u.id, u.email, u.password_hash, u.last_access
            "#
        );

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<UserSummary>, UserError> {
        let query = format!(
            r#"
            SELECT u.id, u.email, u.last_access, {ROLES_AGGREGATE}
            FROM users u
            LEFT JOIN user_roles ur ON u.id = ur.user_id
            LEFT JOIN roles r ON ur.role_id = r.id
            GROUP BY u.id, u.email, u.last_access
            ORDER BY u.id
            "#
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(Self::row_to_summary).collect()
    }

    async fn find_role_right(&self, role_id: RoleId) -> Result<Option<RoleRight>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT role_id, section, route, r_create, r_read, r_update, r_delete
            FROM role_rights
            WHERE role_id = $1
            ORDER BY section, route
            LIMIT 1
            "#,
        )
        .bind(role_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => Ok(Some(RoleRight {
                role_id: RoleId(r.try_get("role_id").map_err(database_error)?),
                section: r.try_get("section").map_err(database_error)?,
                route: r.try_get("route").map_err(database_error)?,
                can_create: r.try_get("r_create").map_err(database_error)?,
                can_read: r.try_get("r_read").map_err(database_error)?,
                can_update: r.try_get("r_update").map_err(database_error)?,
                can_delete: r.try_get("r_delete").map_err(database_error)?,
            })),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        command: &CreateUserCommand,
        password_hash: &str,
    ) -> Result<UserId, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let user_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&command.name)
        .bind(command.email.as_str())
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| user_write_error(e, command.email.as_str()))?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(command.role_id.0)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(UserId(user_id))
    }

    async fn update(
        &self,
        command: &UpdateUserCommand,
        password_hash: &str,
    ) -> Result<(), UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, password_hash = $3
            WHERE id = $4
            "#,
        )
        .bind(&command.name)
        .bind(command.email.as_str())
        .bind(password_hash)
        .bind(command.user_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| user_write_error(e, command.email.as_str()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(command.user_id));
        }

        // One assignment per user: replace rather than add
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(command.user_id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(command.user_id.0)
            .bind(command.role_id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> Result<(), UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Assignments reference the user row, so they go first
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user_id));
        }

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        let roles = PostgresUserRepository::parse_roles(
            r#"[{"role_id": 1, "role_name": "admin"}, {"role_id": 3, "role_name": "auditor"}]"#,
        )
        .unwrap();

        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].id, RoleId(1));
        assert_eq!(roles[1].name, "auditor");
    }

    #[test]
    fn test_parse_empty_roles() {
        let roles = PostgresUserRepository::parse_roles("[]").unwrap();
        assert!(roles.is_empty());
    }

    #[test]
    fn test_parse_malformed_roles() {
        let result = PostgresUserRepository::parse_roles(r#"[{"role_id": "x"}]"#);
        assert!(matches!(result, Err(UserError::Repository(_))));
    }
}

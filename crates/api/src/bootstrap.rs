//! First-run setup.

use vitrin_core::roles::Role;
use vitrin_db::models::user::CreateUser;
use vitrin_db::repositories::UserRepo;
use vitrin_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::BootstrapAdmin;

/// Create a `SUPER_ADMIN` from `BOOTSTRAP_ADMIN_*` when no users exist yet.
///
/// Returns `true` if an account was created. A populated users table is
/// left alone, so the variables can stay set after the first start.
pub async fn ensure_bootstrap_admin(
    pool: &DbPool,
    admin: Option<&BootstrapAdmin>,
) -> anyhow::Result<bool> {
    let Some(admin) = admin else {
        return Ok(false);
    };
    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users exist, skipping bootstrap admin");
        return Ok(false);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| anyhow::anyhow!("BOOTSTRAP_ADMIN_PASSWORD: {msg}"))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap password: {e}"))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: admin.email.trim().to_lowercase(),
            name: "Administrator".to_string(),
            password_hash,
            role: Role::SuperAdmin.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap super admin created");
    Ok(true)
}

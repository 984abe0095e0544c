//! Create user command handler

use crate::models::User;
use crate::services::{NewUser, UserProvisioner};

pub async fn cmd_create_user(
    provisioner: &dyn UserProvisioner,
    request: NewUser,
) -> anyhow::Result<()> {
    let user = provisioner.create_user(request).await?;

    print!("{}", render_created(&user));
    println!();
    println!(
        "💡 User can now login with username '{}' and the provided password",
        user.username
    );

    Ok(())
}

fn render_created(user: &User) -> String {
    let shift = user
        .shift_id
        .map_or_else(|| "None".to_string(), |id| id.to_string());

    format!(
        "✅ User created successfully:\n   ID: {}\n   Username: {}\n   Full Name: {}\n   Role: {}\n   Shift ID: {}\n",
        user.id, user.username, user.full_name, user.role, shift
    )
}

//! List users command handler

use crate::models::User;
use crate::services::UserProvisioner;

pub async fn cmd_list_users(provisioner: &dyn UserProvisioner) -> anyhow::Result<()> {
    let users = provisioner.list_users().await?;
    print!("{}", render_users(&users));
    Ok(())
}

fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found in database\n".to_string();
    }

    let mut out = String::from("\nExisting users:\n");
    for user in users {
        let shift = user
            .shift_id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        out.push_str(&format!(
            "  ID {}: {} ({}) - Role: {}, Shift: {}\n",
            user.id, user.username, user.full_name, user.role, shift
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_users() {
        let users = vec![User {
            id: 1,
            username: "admin".to_string(),
            full_name: "Administrator".to_string(),
            role: "admin".to_string(),
            shift_id: Some(1),
            created_at: chrono::NaiveDateTime::default(),
        }];

        assert_eq!(
            render_users(&users),
            "\nExisting users:\n  ID 1: admin (Administrator) - Role: admin, Shift: 1\n"
        );
        assert_eq!(render_users(&[]), "No users found in database\n");
    }
}

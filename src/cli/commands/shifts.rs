//! List shifts command handler

use crate::models::Shift;
use crate::services::UserProvisioner;

const NO_SHIFTS_MESSAGE: &str = "No shifts found in database";

pub async fn cmd_list_shifts(provisioner: &dyn UserProvisioner) -> anyhow::Result<()> {
    let shifts = provisioner.list_shifts().await?;
    print!("{}", render_shifts(&shifts));
    Ok(())
}

fn render_shifts(shifts: &[Shift]) -> String {
    if shifts.is_empty() {
        return format!("{NO_SHIFTS_MESSAGE}\n");
    }

    let mut out = String::from("\nAvailable shifts:\n");
    for shift in shifts {
        out.push_str(&format!("  {shift}\n"));
    }
    out
}

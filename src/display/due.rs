//! Due status display formatting

use crate::config::Settings;
use crate::display::member::describe_days;
use crate::engine::DueStatus;
use crate::services::MemberDue;

/// Format due summaries as a table, one row per member
pub fn format_due_table(dues: &[MemberDue], settings: &Settings) -> String {
    if dues.is_empty() {
        return "No active members.".to_string();
    }

    let name_width = dues
        .iter()
        .map(|d| d.member.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:<10}  {:<10}  {:<9}  {}\n",
        "Name",
        "Dues",
        "Last paid",
        "Next due",
        "Status",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<10}  {:-<10}  {:-<9}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for due in dues {
        let last_paid = due
            .summary
            .last_paid
            .map(|d| settings.format_date(d.date_naive()))
            .unwrap_or_else(|| "never".to_string());

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:<10}  {:<10}  {:<9}  {}\n",
            due.member.name,
            settings.format_money(due.member.payment_amount),
            last_paid,
            settings.format_date(due.summary.next_due),
            status_marker(due.status()),
            describe_days(due.summary.days_until_due),
            name_width = name_width,
        ));
    }

    let overdue = dues.iter().filter(|d| d.status() == DueStatus::Overdue).count();
    let due_soon = dues.iter().filter(|d| d.status() == DueStatus::DueSoon).count();
    output.push_str(&format!(
        "\n{} overdue, {} due soon, {} current\n",
        overdue,
        due_soon,
        dues.len() - overdue - due_soon
    ));

    output
}

fn status_marker(status: DueStatus) -> String {
    match status {
        DueStatus::Overdue => "! Overdue".to_string(),
        other => other.to_string(),
    }
}

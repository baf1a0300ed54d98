//! Member display formatting
//!
//! Formats members for terminal output in table and detail views.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::engine::{self, DueSummary};
use crate::models::{Member, Payment};

/// Format a list of members as a table
pub fn format_member_list(members: &[Member], settings: &Settings) -> String {
    if members.is_empty() {
        return "No members found.".to_string();
    }

    let name_width = members
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>12}  {:<12}  {:<10}  {}\n",
        "ID",
        "Name",
        "Dues",
        "Frequency",
        "Since",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->12}  {:-<12}  {:-<10}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for member in members {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>12}  {:<12}  {:<10}  {}\n",
            member.id.to_string(),
            member.name,
            settings.format_money(member.payment_amount),
            member.payment_frequency,
            settings.format_date(member.payment_start_date),
            if member.active { "Active" } else { "Inactive" },
            name_width = name_width,
        ));
    }

    let expected = engine::monthly_expected_income(members);
    output.push_str(&format!(
        "\n{} member(s), expected monthly income {}\n",
        members.len(),
        settings.format_money(expected.rounded())
    ));

    output
}

/// Format a single member's details, with their due summary and payments
pub fn format_member_details(
    member: &Member,
    summary: &DueSummary,
    payments: &[Payment],
    settings: &Settings,
    today: NaiveDate,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Member: {}\n", member.name));
    output.push_str(&format!("  ID:             {}\n", member.id));
    if let Some(email) = &member.email {
        output.push_str(&format!("  Email:          {}\n", email));
    }
    if let Some(phone) = &member.phone {
        output.push_str(&format!("  Phone:          {}\n", phone));
    }
    output.push_str(&format!(
        "  Dues:           {} {}\n",
        settings.format_money(member.payment_amount),
        member.payment_frequency
    ));
    output.push_str(&format!(
        "  Monthly share:  {}\n",
        settings.format_money(engine::monthly_share(member).rounded())
    ));
    output.push_str(&format!(
        "  Start date:     {}\n",
        settings.format_date(member.payment_start_date)
    ));
    output.push_str(&format!(
        "  Active:         {}\n",
        if member.active { "Yes" } else { "No" }
    ));
    if !member.notes.is_empty() {
        output.push_str(&format!("  Notes:          {}\n", member.notes));
    }

    output.push('\n');
    let last_paid = summary
        .last_paid
        .map(|d| settings.format_date(d.date_naive()))
        .unwrap_or_else(|| "never".to_string());
    output.push_str(&format!("  Last paid:      {}\n", last_paid));
    output.push_str(&format!(
        "  Next due:       {} ({})\n",
        settings.format_date(summary.next_due),
        describe_days(summary.days_until_due)
    ));
    if member.active {
        output.push_str(&format!("  Status:         {}\n", summary.status));
    } else {
        output.push_str("  Status:         Inactive\n");
    }

    if !payments.is_empty() {
        output.push_str(&format!("\nPayments (as of {}):\n", settings.format_date(today)));
        for payment in payments {
            output.push_str(&format!(
                "  {}  {:>12}  {:<8}  {}\n",
                settings.format_date(payment.paid_on()),
                settings.format_money(payment.amount),
                payment.status,
                payment.memo
            ));
        }
    }

    output
}

/// Human phrasing for a signed day count relative to today
pub fn describe_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("in {} days", d),
    }
}

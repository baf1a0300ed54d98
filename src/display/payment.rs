//! Payment display formatting

use std::collections::HashMap;

use crate::config::Settings;
use crate::models::{MemberId, Money, Payment};

/// Format payments as a register, resolving member names from `names`
pub fn format_payment_list(
    payments: &[Payment],
    names: &HashMap<MemberId, String>,
    settings: &Settings,
) -> String {
    if payments.is_empty() {
        return "No payments found.".to_string();
    }

    let member_name = |p: &Payment| {
        names
            .get(&p.member_id)
            .map(String::as_str)
            .unwrap_or("Unknown")
    };

    let name_width = payments
        .iter()
        .map(|p| member_name(p).len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<name_width$}  {:>12}  {:<8}  {}\n",
        "ID",
        "Date",
        "Member",
        "Amount",
        "Status",
        "Memo",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<name_width$}  {:->12}  {:-<8}  {:-<4}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for payment in payments {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<name_width$}  {:>12}  {:<8}  {}\n",
            payment.id.to_string(),
            settings.format_date(payment.paid_on()),
            member_name(payment),
            settings.format_money(payment.amount),
            payment.status,
            payment.memo,
            name_width = name_width,
        ));
    }

    let paid_total: Money = payments
        .iter()
        .filter(|p| p.status.is_paid())
        .map(|p| p.amount)
        .sum();
    output.push_str(&format!(
        "\n{} payment(s), {} paid\n",
        payments.len(),
        settings.format_money(paid_total)
    ));

    output
}

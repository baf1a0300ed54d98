//! Reminder service
//!
//! Turns the due list into reminders and renders message bodies from the
//! configured template. Delivery is left to the caller.

use std::io::Write;

use chrono::NaiveDate;

use super::due::MemberDue;
use crate::config::Settings;
use crate::engine::DueStatus;
use crate::error::DuesResult;
use crate::models::{MemberId, Money};

/// One recipient on the reminder list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub member_id: MemberId,
    pub name: String,
    pub contact: Option<String>,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub status: DueStatus,
}

impl From<&MemberDue> for Reminder {
    fn from(due: &MemberDue) -> Self {
        Self {
            member_id: due.member.id,
            name: due.member.name.clone(),
            contact: due.member.contact().map(str::to_string),
            amount: due.member.payment_amount,
            due_date: due.summary.next_due,
            days_until_due: due.summary.days_until_due,
            status: due.summary.status,
        }
    }
}

/// Renders reminder messages
pub struct ReminderService<'a> {
    settings: &'a Settings,
    template: String,
}

impl<'a> ReminderService<'a> {
    /// Use the template from settings
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            template: settings.reminder_template.clone(),
        }
    }

    /// Override the message template
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Build reminders from a due list, skipping anyone not due
    pub fn build(&self, due: &[MemberDue]) -> Vec<Reminder> {
        due.iter()
            .filter(|d| d.status().needs_reminder())
            .map(Reminder::from)
            .collect()
    }

    /// Render the message body for one reminder
    pub fn render(&self, reminder: &Reminder) -> String {
        let status = match reminder.status {
            DueStatus::Overdue => "overdue",
            DueStatus::DueSoon => "due soon",
            DueStatus::Current => "current",
        };

        let amount = self.settings.format_money(reminder.amount);
        let due_date = self.settings.format_date(reminder.due_date);
        let placeholders: [(&str, &str); 4] = [
            ("{name}", &reminder.name),
            ("{amount}", &amount),
            ("{due_date}", &due_date),
            ("{status}", status),
        ];

        // Single pass, so substituted text is never scanned again
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            rest = &rest[start..];
            match placeholders.iter().find(|(key, _)| rest.starts_with(key)) {
                Some((key, value)) => {
                    out.push_str(value);
                    rest = &rest[key.len()..];
                }
                None => {
                    out.push('{');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Write each rendered reminder to `writer`, returning how many were sent
    pub fn dispatch<W: Write>(&self, reminders: &[Reminder], writer: &mut W) -> DuesResult<usize> {
        for reminder in reminders {
            let recipient = reminder.contact.as_deref().unwrap_or("(no contact)");
            writeln!(writer, "To: {} <{}>", reminder.name, recipient)?;
            writeln!(writer, "{}", self.render(reminder))?;
            writeln!(writer)?;

            tracing::info!(member = %reminder.member_id, status = %reminder.status, "reminder sent");
        }
        Ok(reminders.len())
    }
}

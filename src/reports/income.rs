//! Income Report
//!
//! Expected monthly income from active members compared with what was
//! actually collected in a month, plus a breakdown of members by due status.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::engine::{self, DueStatus};
use crate::error::{DuesError, DuesResult};
use crate::models::{Money, MonthlyAmount, PaymentFrequency, YearMonth};
use crate::services::DueService;
use crate::storage::Storage;

/// Expected income contributed by one payment frequency
#[derive(Debug, Clone)]
pub struct FrequencyBreakdown {
    pub frequency: PaymentFrequency,
    pub member_count: usize,
    pub monthly_equivalent: MonthlyAmount,
}

/// Number of active members in each due status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub current: usize,
    pub due_soon: usize,
    pub overdue: usize,
}

impl StatusCounts {
    fn record(&mut self, status: DueStatus) {
        match status {
            DueStatus::Current => self.current += 1,
            DueStatus::DueSoon => self.due_soon += 1,
            DueStatus::Overdue => self.overdue += 1,
        }
    }
}

/// Income Report
#[derive(Debug, Clone)]
pub struct IncomeReport {
    pub month: YearMonth,
    /// Exact monthly-equivalent expected income
    pub expected: MonthlyAmount,
    /// Paid payments dated within `month`
    pub collected: Money,
    pub payment_count: usize,
    pub breakdown: Vec<FrequencyBreakdown>,
    pub status_counts: StatusCounts,
    pub active_members: usize,
    pub inactive_members: usize,
}

impl IncomeReport {
    /// Generate the report for `month`, classifying members at `today`
    pub fn generate(
        storage: &Storage,
        month: YearMonth,
        today: NaiveDate,
        reminder_window_days: u32,
    ) -> DuesResult<Self> {
        let members = storage.members.get_all()?;
        let payments = storage.payments.get_all()?;

        let expected = engine::monthly_expected_income(&members);
        let collected = engine::monthly_collected_income(&payments, month);
        let payment_count = payments
            .iter()
            .filter(|p| p.status.is_paid() && month.contains(p.paid_on()))
            .count();

        let breakdown = PaymentFrequency::ALL
            .iter()
            .filter_map(|&frequency| {
                let group: Vec<_> = members
                    .iter()
                    .filter(|m| m.active && m.payment_frequency == frequency)
                    .collect();
                if group.is_empty() {
                    return None;
                }
                Some(FrequencyBreakdown {
                    frequency,
                    member_count: group.len(),
                    monthly_equivalent: engine::monthly_expected_income(group),
                })
            })
            .collect();

        let mut status_counts = StatusCounts::default();
        for due in DueService::new(storage, reminder_window_days).summaries(today)? {
            status_counts.record(due.status());
        }

        let active_members = members.iter().filter(|m| m.active).count();

        Ok(Self {
            month,
            expected,
            collected,
            payment_count,
            breakdown,
            status_counts,
            active_members,
            inactive_members: members.len() - active_members,
        })
    }

    /// Expected income rounded to whole cents for display
    pub fn expected_rounded(&self) -> Money {
        self.expected.rounded()
    }

    /// Collected as a percentage of expected, if anything is expected
    pub fn collection_rate(&self) -> Option<f64> {
        let expected = self.expected.as_cents_f64();
        if expected <= 0.0 {
            return None;
        }
        Some(self.collected.cents() as f64 / expected * 100.0)
    }

    /// Collected minus expected (rounded)
    pub fn variance(&self) -> Money {
        self.collected - self.expected_rounded()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |amount: Money| settings.format_money(amount);
        let mut output = String::new();

        output.push_str(&format!("Income Report: {}\n", self.month.friendly()));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!(
            "Expected (monthly): {:>15}\n",
            money(self.expected_rounded())
        ));
        output.push_str(&format!("Collected:          {:>15}\n", money(self.collected)));
        output.push_str(&format!("Variance:           {:>15}\n", money(self.variance())));
        let rate = match self.collection_rate() {
            Some(rate) => format!("{:.1}%", rate),
            None => "n/a".to_string(),
        };
        output.push_str(&format!("Collection rate:    {:>15}\n", rate));
        output.push_str(&format!("Paid payments:      {:>15}\n", self.payment_count));
        output.push('\n');

        if !self.breakdown.is_empty() {
            output.push_str(&format!(
                "{:<14} {:>8} {:>15}\n",
                "Frequency", "Members", "Monthly"
            ));
            output.push_str(&"-".repeat(39));
            output.push('\n');
            for row in &self.breakdown {
                output.push_str(&format!(
                    "{:<14} {:>8} {:>15}\n",
                    row.frequency,
                    row.member_count,
                    money(row.monthly_equivalent.rounded())
                ));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "Members: {} active, {} inactive\n",
            self.active_members, self.inactive_members
        ));
        output.push_str(&format!(
            "Status:  {} current, {} due soon, {} overdue\n",
            self.status_counts.current, self.status_counts.due_soon, self.status_counts.overdue
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> DuesResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Section", "Item", "Value"])?;
        csv.write_record(["summary", "month", self.month.to_string().as_str()])?;
        csv.write_record([
            "summary",
            "expected",
            self.expected_rounded().to_decimal_string().as_str(),
        ])?;
        csv.write_record(["summary", "collected", self.collected.to_decimal_string().as_str()])?;
        csv.write_record([
            "summary",
            "collection_rate",
            self.collection_rate()
                .map(|r| format!("{:.1}", r))
                .unwrap_or_default()
                .as_str(),
        ])?;

        for row in &self.breakdown {
            csv.write_record([
                "frequency",
                row.frequency.as_str(),
                row.monthly_equivalent.rounded().to_decimal_string().as_str(),
            ])?;
        }

        csv.write_record(["status", "current", self.status_counts.current.to_string().as_str()])?;
        csv.write_record(["status", "due-soon", self.status_counts.due_soon.to_string().as_str()])?;
        csv.write_record(["status", "overdue", self.status_counts.overdue.to_string().as_str()])?;

        csv.flush()
            .map_err(|e| DuesError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuesPaths;
    use crate::models::{Member, Payment, PaymentStatus};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn populate(storage: &Storage) -> Member {
        let yearly = Member::new(
            "Yearly",
            Money::from_units(600),
            PaymentFrequency::Yearly,
            date(2025, 1, 1),
        );
        let monthly = Member::new(
            "Monthly",
            Money::from_units(1200),
            PaymentFrequency::Monthly,
            date(2025, 2, 20),
        );
        let mut inactive = Member::new(
            "Inactive",
            Money::from_units(999),
            PaymentFrequency::Monthly,
            date(2025, 1, 1),
        );
        inactive.deactivate();

        storage.members.upsert(yearly).unwrap();
        storage.members.upsert(monthly.clone()).unwrap();
        storage.members.upsert(inactive).unwrap();
        monthly
    }

    #[test]
    fn test_generate_income_report() {
        let (_temp, storage) = create_test_storage();
        let monthly = populate(&storage);

        let paid = |m: u32, d: u32, status| {
            Payment::new(
                monthly.id,
                Money::from_units(1200),
                Utc.with_ymd_and_hms(2025, m, d, 0, 0, 0).unwrap(),
                status,
            )
        };
        storage.payments.upsert(paid(3, 1, PaymentStatus::Paid)).unwrap();
        storage.payments.upsert(paid(3, 15, PaymentStatus::Unpaid)).unwrap();
        storage.payments.upsert(paid(2, 28, PaymentStatus::Paid)).unwrap();

        let report =
            IncomeReport::generate(&storage, YearMonth::new(2025, 3).unwrap(), date(2025, 3, 10), 3)
                .unwrap();

        assert_eq!(report.expected_rounded(), Money::from_units(1250));
        assert_eq!(report.collected, Money::from_units(1200));
        assert_eq!(report.payment_count, 1);
        assert_eq!(report.active_members, 2);
        assert_eq!(report.inactive_members, 1);
        assert_eq!(report.breakdown.len(), 2);
        assert_eq!(report.collection_rate().map(|r| r.round()), Some(96.0));

        // Yearly member: due 2026-01-01 (current). Monthly: paid 03-01, due 04-01 (current).
        assert_eq!(report.status_counts.current, 2);
        assert_eq!(report.status_counts.overdue, 0);
    }

    #[test]
    fn test_empty_report_has_no_rate() {
        let (_temp, storage) = create_test_storage();
        let report =
            IncomeReport::generate(&storage, YearMonth::new(2025, 3).unwrap(), date(2025, 3, 10), 3)
                .unwrap();

        assert!(report.collection_rate().is_none());
        assert!(report.format_terminal(&Settings::default()).contains("n/a"));
    }

    #[test]
    fn test_terminal_uses_currency_symbol() {
        let (_temp, storage) = create_test_storage();
        populate(&storage);
        let report =
            IncomeReport::generate(&storage, YearMonth::new(2025, 3).unwrap(), date(2025, 3, 10), 3)
                .unwrap();
        let settings = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };

        let text = report.format_terminal(&settings);
        assert!(text.contains("€1250.00"));
        assert!(text.contains("€1200.00"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_csv_export() {
        let (_temp, storage) = create_test_storage();
        populate(&storage);
        let report =
            IncomeReport::generate(&storage, YearMonth::new(2025, 3).unwrap(), date(2025, 3, 10), 3)
                .unwrap();

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Section,Item,Value"));
        assert!(text.contains("summary,expected,1250.00"));
        assert!(text.contains("frequency,yearly,50.00"));
    }
}

use std::{collections::BTreeMap, fmt::Display};

use chrono::NaiveDate;

use crate::amount::Amount;
use crate::record::{Category, Record};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub net: Amount,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "Total income: ${}", self.total_income.to_cents_string())?;
        writeln!(f, "Total expense: ${}", self.total_expense.to_cents_string())?;
        write!(f, "Net savings: ${}", self.net.to_cents_string())
    }
}

pub fn summarize(records: &[Record]) -> Summary {
    let total = |category: Category| -> Amount {
        records
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.amount)
            .sum()
    };
    let total_income = total(Category::Income);
    let total_expense = total(Category::Expense);
    Summary {
        total_income,
        total_expense,
        net: total_income - total_expense,
    }
}

/// One point per calendar day from the earliest to the latest record date,
/// zero on days with nothing matching. `None` sums every record.
pub fn daily_series(records: &[Record], category: Option<Category>) -> Vec<(NaiveDate, Amount)> {
    let (first, last) = match (
        records.iter().map(|r| r.date).min(),
        records.iter().map(|r| r.date).max(),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut by_day: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
    for record in records {
        if category.map_or(true, |c| c == record.category) {
            *by_day.entry(record.date).or_default() += record.amount;
        }
    }

    let mut series = Vec::new();
    let mut day = Some(first);
    while let Some(d) = day.filter(|d| *d <= last) {
        series.push((d, by_day.get(&d).copied().unwrap_or_default()));
        day = d.succ_opt();
    }
    series
}

/// Income, expense and income-minus-expense, day by day over the same span.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DailyTotals {
    pub days: Vec<NaiveDate>,
    pub income: Vec<Amount>,
    pub expense: Vec<Amount>,
    pub net: Vec<Amount>,
}

impl DailyTotals {
    pub fn from_records(records: &[Record]) -> Self {
        let income = daily_series(records, Some(Category::Income));
        let expense = daily_series(records, Some(Category::Expense));
        Self {
            days: income.iter().map(|(d, _)| *d).collect(),
            net: income
                .iter()
                .zip(&expense)
                .map(|((_, i), (_, e))| *i - *e)
                .collect(),
            income: income.into_iter().map(|(_, a)| a).collect(),
            expense: expense.into_iter().map(|(_, a)| a).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category::*;
    use chrono::Datelike;

    fn record(day: u32, amount: &str, category: Category) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            amount.parse().unwrap(),
            category,
            "",
        )
    }

    fn amount(text: &str) -> Amount {
        text.parse().unwrap()
    }

    mod summarize {
        use super::*;

        #[test]
        fn empty_is_all_zero() {
            assert_eq!(summarize(&[]), Summary::default());
        }

        #[test]
        fn income_minus_expense() {
            let records = [record(1, "100.00", Income), record(5, "40.00", Expense)];
            assert_eq!(
                summarize(&records),
                Summary {
                    total_income: amount("100"),
                    total_expense: amount("40"),
                    net: amount("60"),
                }
            );
        }

        #[test]
        fn net_can_be_negative() {
            let records = [record(1, "10", Income), record(2, "25.5", Expense)];
            assert_eq!(summarize(&records).net, Amount::ZERO - amount("15.5"));
        }

        #[test]
        fn order_does_not_matter() {
            let mut records = vec![
                record(3, "0.1", Income),
                record(1, "7.25", Expense),
                record(2, "0.2", Income),
                record(2, "1.0001", Expense),
            ];
            let forward = summarize(&records);
            records.reverse();
            assert_eq!(summarize(&records), forward);
            records.swap(0, 2);
            assert_eq!(summarize(&records), forward);
        }

        #[test]
        fn largest_amounts_add_up() {
            let records = [
                record(1, "900000000000000", Income),
                record(2, "900000000000000", Income),
                record(3, "999999999999999.99", Expense),
            ];
            let summary = summarize(&records);
            assert_eq!(
                summary.total_income,
                amount("900000000000000") + amount("900000000000000")
            );
            assert_eq!(summary.net, amount("800000000000000.01"));
            assert!(summary.to_string().contains("Total income: $1800000000000000.00"));
        }

        #[test]
        fn display_rounds_to_cents() {
            let records = [record(1, "100.005", Income), record(5, "40", Expense)];
            assert_eq!(
                summarize(&records).to_string(),
                "Summary:\nTotal income: $100.01\nTotal expense: $40.00\nNet savings: $60.01"
            );
        }
    }

    mod daily_series {
        use super::*;

        #[test]
        fn empty_is_empty() {
            assert!(daily_series(&[], None).is_empty());
        }

        #[test]
        fn fills_gaps_with_zero() {
            let records = [
                record(1, "100", Income),
                record(4, "40", Expense),
                record(4, "5", Income),
            ];
            let series = daily_series(&records, Some(Income));
            let days: Vec<u32> = series.iter().map(|(d, _)| d.day()).collect();
            assert_eq!(days, vec![1, 2, 3, 4]);
            let values: Vec<Amount> = series.iter().map(|(_, a)| *a).collect();
            assert_eq!(
                values,
                vec![amount("100"), Amount::ZERO, Amount::ZERO, amount("5")]
            );
        }

        #[test]
        fn span_covers_non_matching_records_too() {
            let records = [record(2, "3", Expense), record(3, "1", Income)];
            let series = daily_series(&records, Some(Income));
            assert_eq!(series.len(), 2);
            assert_eq!(series[0].1, Amount::ZERO);
        }

        #[test]
        fn same_day_amounts_are_summed() {
            let records = [record(7, "1.5", Expense), record(7, "2.5", Expense)];
            assert_eq!(
                daily_series(&records, None),
                vec![(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(), amount("4"))]
            );
        }

        #[test]
        fn large_same_day_amounts_are_summed() {
            let records = [
                record(7, "922337203685477.58", Income),
                record(7, "922337203685477.58", Income),
            ];
            let totals = DailyTotals::from_records(&records);
            assert_eq!(totals.income[0].to_cents_string(), "1844674407370955.16");
        }

        #[test]
        fn daily_totals_net() {
            let records = [record(1, "10", Income), record(2, "4", Expense)];
            let totals = DailyTotals::from_records(&records);
            assert_eq!(totals.days.len(), 2);
            assert_eq!(totals.net, vec![amount("10"), Amount::ZERO - amount("4")]);
        }
    }
}

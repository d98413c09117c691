use std::{
    fmt::Display,
    io::{BufRead, Write},
    path::PathBuf,
};

use log::error;

use crate::chart;
use crate::error::StoreError;
use crate::prompt::Prompter;
use crate::record::{Field, FieldValue, Record};
use crate::report::{summarize, DailyTotals};
use crate::store::RecordStore;
use crate::validate::{
    parse_amount, parse_category, parse_date, parse_description, parse_field_selector,
    parse_position,
};

const MENU: &str = "\n1. Add a new transaction.\n\
                    2. View transactions and summary within a date range.\n\
                    3. Update a transaction.\n\
                    4. Delete a transaction.\n\
                    5. Exit.";

/// Records with their positions, one per line, aligned.
struct RecordTable<'a> {
    records: &'a [Record],
    date_format: &'a str,
    with_positions: bool,
}

impl Display for RecordTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.with_positions {
            write!(f, "{:>4}  ", "#")?;
        }
        writeln!(f, "{:<12}{:>12}  {:<9}{}", "date", "amount", "category", "description")?;
        for (position, record) in self.records.iter().enumerate() {
            if self.with_positions {
                write!(f, "{:>4}  ", position)?;
            }
            writeln!(
                f,
                "{:<12}{:>12}  {:<9}{}",
                record.date.format(self.date_format).to_string(),
                record.amount.to_string(),
                record.category.label(),
                record.description
            )?;
        }
        Ok(())
    }
}

pub struct App<R, W> {
    store: RecordStore,
    prompter: Prompter<R, W>,
    chart_path: PathBuf,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(store: RecordStore, prompter: Prompter<R, W>, chart_path: PathBuf) -> Self {
        Self {
            store,
            prompter,
            chart_path,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.store.initialize()?;
        loop {
            self.prompter.say(MENU)?;
            let choice = match self.prompter.read_line("Enter your choice (1-5): ")? {
                Some(choice) => choice,
                None => break,
            };
            let outcome = match choice.trim() {
                "1" => self.add(),
                "2" => self.view(),
                "3" => self.update(),
                "4" => self.delete(),
                "5" => {
                    self.prompter.say("Exiting...")?;
                    break;
                }
                _ => {
                    self.prompter.say("Invalid choice. Enter 1-5.")?;
                    continue;
                }
            };
            if let Err(e) = outcome {
                match e.downcast_ref::<StoreError>() {
                    Some(StoreError::OutOfRange { .. }) => self.prompter.say(&e)?,
                    _ => {
                        error!("{:#}", e);
                        self.prompter.say(format!("Error: {:#}", e))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn date_format(&self) -> String {
        self.store.config().date_format.clone()
    }

    fn cancelled(&mut self) -> anyhow::Result<()> {
        self.prompter.say("Cancelled.")?;
        Ok(())
    }

    fn add(&mut self) -> anyhow::Result<()> {
        self.store.initialize()?;
        let format = self.date_format();
        let record = match self.ask_record(&format)? {
            Some(record) => record,
            None => return self.cancelled(),
        };
        self.store.append(&record)?;
        self.prompter.say("Entry added successfully")?;
        Ok(())
    }

    fn ask_record(&mut self, format: &str) -> anyhow::Result<Option<Record>> {
        let p = &mut self.prompter;
        let date = match p.ask(
            "Enter the date of the transaction (dd-mm-yyyy) or enter for today's date: ",
            |s| parse_date(s, true, format),
        )? {
            Some(date) => date,
            None => return Ok(None),
        };
        let amount = match p.ask("Enter the amount: ", parse_amount)? {
            Some(amount) => amount,
            None => return Ok(None),
        };
        let category = match p.ask(
            "Enter the category ('I' for income or 'E' for expense): ",
            parse_category,
        )? {
            Some(category) => category,
            None => return Ok(None),
        };
        let description = match p.read_line("Enter the description (optional): ")? {
            Some(text) => parse_description(&text),
            None => return Ok(None),
        };
        Ok(Some(Record::new(date, amount, category, description)))
    }

    fn view(&mut self) -> anyhow::Result<()> {
        let format = self.date_format();
        let start = match self
            .prompter
            .ask("Enter the start date (dd-mm-yyyy): ", |s| parse_date(s, false, &format))?
        {
            Some(date) => date,
            None => return self.cancelled(),
        };
        let end = match self
            .prompter
            .ask("Enter the end date (dd-mm-yyyy): ", |s| parse_date(s, false, &format))?
        {
            Some(date) => date,
            None => return self.cancelled(),
        };

        let records = self.store.query_range(start, end)?;
        if records.is_empty() {
            self.prompter.say("No transaction found in the given date range.")?;
            return Ok(());
        }

        self.prompter.say(format!(
            "Transactions from {} to {}",
            start.format(&format),
            end.format(&format)
        ))?;
        self.prompter.say(RecordTable {
            records: &records,
            date_format: &format,
            with_positions: false,
        })?;
        self.prompter.say(summarize(&records))?;

        let answer = self.prompter.read_line("Do you want to see the plot? (y/n) ")?;
        if answer.map_or(false, |a| a.trim().eq_ignore_ascii_case("y")) {
            let totals = DailyTotals::from_records(&records);
            if chart::render(&totals, &self.chart_path)? {
                self.prompter
                    .say(format!("Chart written to {}", self.chart_path.display()))?;
            }
        }
        Ok(())
    }

    /// Shows every record with its position and returns how many there are.
    fn list_positions(&mut self) -> anyhow::Result<usize> {
        let records = self.store.load_all()?;
        if records.is_empty() {
            self.prompter.say("The ledger is empty.")?;
            return Ok(0);
        }
        let format = self.date_format();
        self.prompter.say(RecordTable {
            records: &records,
            date_format: &format,
            with_positions: true,
        })?;
        Ok(records.len())
    }

    fn update(&mut self) -> anyhow::Result<()> {
        let len = self.list_positions()?;
        if len == 0 {
            return Ok(());
        }
        let format = self.date_format();
        let p = &mut self.prompter;
        let position = match p.ask("Enter the position of the transaction to update: ", |s| {
            parse_position(s, len)
        })? {
            Some(position) => position,
            None => return self.cancelled(),
        };
        let field = match p.ask(
            "Enter the field to update (date, amount, category, description): ",
            parse_field_selector,
        )? {
            Some(field) => field,
            None => return self.cancelled(),
        };
        let value = match field {
            Field::Date => p
                .ask("Enter the new date (dd-mm-yyyy): ", |s| parse_date(s, false, &format))?
                .map(FieldValue::Date),
            Field::Amount => p.ask("Enter the new amount: ", parse_amount)?.map(FieldValue::Amount),
            Field::Category => p
                .ask(
                    "Enter the new category ('I' for income or 'E' for expense): ",
                    parse_category,
                )?
                .map(FieldValue::Category),
            Field::Description => p
                .read_line("Enter the new description: ")?
                .map(|s| FieldValue::Description(parse_description(&s))),
        };
        let value = match value {
            Some(value) => value,
            None => return self.cancelled(),
        };
        self.store.update_field(position, value)?;
        self.prompter.say("Entry updated successfully")?;
        Ok(())
    }

    fn delete(&mut self) -> anyhow::Result<()> {
        let len = self.list_positions()?;
        if len == 0 {
            return Ok(());
        }
        let position = match self
            .prompter
            .ask("Enter the position of the transaction to delete: ", |s| {
                parse_position(s, len)
            })?
        {
            Some(position) => position,
            None => return self.cancelled(),
        };
        self.store.delete(position)?;
        self.prompter.say("Entry deleted successfully")?;
        Ok(())
    }
}

#[cfg(test)]
impl<R: BufRead> App<R, Vec<u8>> {
    fn into_output(self) -> String {
        String::from_utf8(self.prompter.into_output()).unwrap()
    }
}

/**
 * Turns raw user text into typed field values. Every function here is pure;
 * re-asking on failure is the prompt loop's job.
 */
use chrono::{Local, NaiveDate};

use crate::amount::Amount;
use crate::error::{AmountReason, ValidationError};
use crate::record::{Category, Field};

/// Empty `text` means today when `allow_default` is set.
pub fn parse_date(
    text: &str,
    allow_default: bool,
    date_format: &str,
) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    if allow_default && text.is_empty() {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(text, date_format).map_err(|_| ValidationError::InvalidFormat)
}

pub fn parse_amount(text: &str) -> Result<Amount, ValidationError> {
    let amount = text
        .parse::<Amount>()
        .map_err(|e| ValidationError::InvalidAmount(AmountReason::Malformed(e)))?;
    if !amount.is_positive() {
        return Err(ValidationError::InvalidAmount(AmountReason::NotPositive));
    }
    Ok(amount)
}

pub fn parse_category(text: &str) -> Result<Category, ValidationError> {
    match text.trim().to_uppercase().as_str() {
        "I" => Ok(Category::Income),
        "E" => Ok(Category::Expense),
        _ => Err(ValidationError::InvalidCategory),
    }
}

pub fn parse_description(text: &str) -> String {
    text.to_string()
}

/// Column names are matched exactly, case included.
pub fn parse_field_selector(text: &str) -> Result<Field, ValidationError> {
    match text.trim() {
        "date" => Ok(Field::Date),
        "amount" => Ok(Field::Amount),
        "category" => Ok(Field::Category),
        "description" => Ok(Field::Description),
        _ => Err(ValidationError::InvalidField),
    }
}

/// A row index below `len`, the number of records just listed to the user.
/// The store still checks bounds against the file when it writes.
pub fn parse_position(text: &str, len: usize) -> Result<usize, ValidationError> {
    match text.trim().parse() {
        Ok(position) if position < len => Ok(position),
        _ => Err(ValidationError::InvalidPosition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::AmountError;
    use crate::config::DEFAULT_DATE_FORMAT;

    mod parse_date {
        use super::*;

        #[test]
        fn fixed_format() {
            assert_eq!(
                parse_date("05-01-2024", false, DEFAULT_DATE_FORMAT),
                Ok(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
            );
        }
        #[test]
        fn empty_defaults_to_today() {
            let today = Local::now().date_naive();
            let parsed = parse_date("", true, DEFAULT_DATE_FORMAT).unwrap();
            // Tolerate the test straddling midnight.
            assert!(parsed == today || parsed == today.succ_opt().unwrap());
        }
        #[test]
        fn empty_without_default_is_invalid() {
            assert_eq!(
                parse_date("", false, DEFAULT_DATE_FORMAT),
                Err(ValidationError::InvalidFormat)
            );
        }
        #[test]
        fn iso_format_is_invalid() {
            assert_eq!(
                parse_date("2024-01-05", true, DEFAULT_DATE_FORMAT),
                Err(ValidationError::InvalidFormat)
            );
        }
        #[test]
        fn impossible_date_is_invalid() {
            assert_eq!(
                parse_date("30-02-2024", false, DEFAULT_DATE_FORMAT),
                Err(ValidationError::InvalidFormat)
            );
        }
        #[test]
        fn trailing_garbage_is_invalid() {
            assert_eq!(
                parse_date("05-01-2024x", false, DEFAULT_DATE_FORMAT),
                Err(ValidationError::InvalidFormat)
            );
        }
    }

    mod parse_amount {
        use super::*;

        #[test]
        fn decimal() {
            assert_eq!(parse_amount("12.50"), Ok("12.5".parse().unwrap()));
        }
        #[test]
        fn negative_is_invalid() {
            assert_eq!(
                parse_amount("-5"),
                Err(ValidationError::InvalidAmount(AmountReason::Malformed(
                    AmountError::Negative
                )))
            );
        }
        #[test]
        fn zero_is_invalid() {
            assert_eq!(
                parse_amount("0"),
                Err(ValidationError::InvalidAmount(AmountReason::NotPositive))
            );
            assert_eq!(
                parse_amount("0.0000"),
                Err(ValidationError::InvalidAmount(AmountReason::NotPositive))
            );
        }
        #[test]
        fn fine_precision_is_valid() {
            assert_eq!(parse_amount("12.123456"), Ok("12.123456".parse().unwrap()));
            assert_eq!(parse_amount("0.00001"), Ok("0.00001".parse().unwrap()));
        }
        #[test]
        fn too_large_is_invalid() {
            assert_eq!(
                parse_amount("1000000000000000"),
                Err(ValidationError::InvalidAmount(AmountReason::Malformed(
                    AmountError::Overflow
                )))
            );
        }
        #[test]
        fn text_is_invalid() {
            assert!(matches!(
                parse_amount("twelve"),
                Err(ValidationError::InvalidAmount(_))
            ));
        }
    }

    mod parse_category {
        use super::*;

        #[test]
        fn single_letters_any_case() {
            assert_eq!(parse_category("i"), Ok(Category::Income));
            assert_eq!(parse_category("I"), Ok(Category::Income));
            assert_eq!(parse_category("e"), Ok(Category::Expense));
            assert_eq!(parse_category("E"), Ok(Category::Expense));
        }
        #[test]
        fn anything_else_is_invalid() {
            for text in ["x", "", "Income", "IE"] {
                assert_eq!(parse_category(text), Err(ValidationError::InvalidCategory));
            }
        }
    }

    #[test]
    fn description_is_kept_verbatim() {
        assert_eq!(parse_description(""), "");
        assert_eq!(parse_description("rent, june"), "rent, june");
    }

    mod parse_field_selector {
        use super::*;

        #[test]
        fn known_columns() {
            assert_eq!(parse_field_selector("date"), Ok(Field::Date));
            assert_eq!(parse_field_selector("amount"), Ok(Field::Amount));
            assert_eq!(parse_field_selector("category"), Ok(Field::Category));
            assert_eq!(parse_field_selector("description"), Ok(Field::Description));
        }
        #[test]
        fn case_sensitive() {
            assert_eq!(parse_field_selector("Amount"), Err(ValidationError::InvalidField));
        }
        #[test]
        fn unknown_column() {
            assert_eq!(parse_field_selector("memo"), Err(ValidationError::InvalidField));
        }
    }

    mod parse_position {
        use super::*;

        #[test]
        fn index_below_len() {
            assert_eq!(parse_position(" 3 ", 4), Ok(3));
            assert_eq!(parse_position("0", 1), Ok(0));
        }
        #[test]
        fn not_an_index() {
            assert_eq!(parse_position("-1", 4), Err(ValidationError::InvalidPosition));
            assert_eq!(parse_position("first", 4), Err(ValidationError::InvalidPosition));
        }
        #[test]
        fn at_or_beyond_len() {
            assert_eq!(parse_position("4", 4), Err(ValidationError::InvalidPosition));
            assert_eq!(parse_position("0", 0), Err(ValidationError::InvalidPosition));
        }
    }
}

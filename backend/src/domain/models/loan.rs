//! Domain model for a loan.
use chrono::NaiveDate;

/// Calendar date format used on the wire and in storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: i64,
    pub customer_id: i64,
    pub book_id: i64,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// A loan is active until a return date is recorded
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanDraft {
    pub customer_id: i64,
    pub book_id: i64,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_is_iso_calendar() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }

    #[test]
    fn test_loan_without_return_date_is_active() {
        let mut loan = Loan {
            id: 1,
            customer_id: 1,
            book_id: 1,
            loan_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            return_date: None,
        };
        assert!(loan.is_active());

        loan.return_date = NaiveDate::from_ymd_opt(2024, 1, 20);
        assert!(!loan.is_active());
    }
}

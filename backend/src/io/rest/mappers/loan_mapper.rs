use crate::domain::commands::loan::LoanFieldsCommand;
use crate::domain::models::loan::{format_date, Loan as DomainLoan};
use shared::{Loan as SharedLoan, LoanRequest};

/// Mapper between shared loan DTOs and the domain model.
///
/// Dates leave the domain as `YYYY-MM-DD` strings; an unset return date stays null.
pub struct LoanMapper;

impl LoanMapper {
    pub fn to_dto(domain: DomainLoan) -> SharedLoan {
        SharedLoan {
            id: domain.id,
            customer_id: domain.customer_id,
            book_id: domain.book_id,
            loan_date: format_date(domain.loan_date),
            return_date: domain.return_date.map(format_date),
        }
    }

    pub fn to_dto_list(domain_loans: Vec<DomainLoan>) -> Vec<SharedLoan> {
        domain_loans.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: LoanRequest) -> LoanFieldsCommand {
        LoanFieldsCommand {
            customer_id: request.customer_id,
            book_id: request.book_id,
            loan_date: request.loan_date,
            return_date: request.return_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_dto_formats_dates() {
        let dto = LoanMapper::to_dto(DomainLoan {
            id: 1,
            customer_id: 2,
            book_id: 3,
            loan_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            return_date: None,
        });

        assert_eq!(dto.loan_date, "2024-05-01");
        assert_eq!(dto.return_date, None);
    }
}

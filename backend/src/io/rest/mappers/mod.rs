pub mod book_mapper;
pub mod customer_mapper;
pub mod loan_mapper;

pub use book_mapper::BookMapper;
pub use customer_mapper::CustomerMapper;
pub use loan_mapper::LoanMapper;

//! Domain-level command types.
//!
//! Commands carry the raw, possibly incomplete field values of a request. The
//! services validate them into drafts before touching storage. The REST layer
//! maps the public DTOs from the `shared` crate into these types.

pub mod book {
    #[derive(Debug, Clone, Default)]
    pub struct BookFieldsCommand {
        pub name: Option<String>,
        pub author: Option<String>,
        pub year_published: Option<i32>,
        pub book_type: Option<i64>,
    }
}

pub mod customer {
    #[derive(Debug, Clone, Default)]
    pub struct CustomerFieldsCommand {
        pub name: Option<String>,
        pub city: Option<String>,
        pub age: Option<i32>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct SearchCustomersCommand {
        pub name: Option<String>,
    }
}

pub mod loan {
    #[derive(Debug, Clone, Default)]
    pub struct LoanFieldsCommand {
        pub customer_id: Option<i64>,
        pub book_id: Option<i64>,
        pub loan_date: Option<String>,
        pub return_date: Option<String>,
    }
}

//! Domain model for a customer.

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub city: String,
    pub age: i32,
}

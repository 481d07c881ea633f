//! Customer manager: validation, name search and loan-history queries.
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    commands::customer::{CustomerFieldsCommand, SearchCustomersCommand},
    errors::{LibraryError, LibraryResult},
    models::customer::{Customer, CustomerDraft},
    validation::{required_number, required_text},
};
use crate::storage::{Connection, CustomerStorage, LoanStorage};

#[derive(Clone)]
pub struct CustomerService<C: Connection> {
    customer_repository: C::CustomerRepository,
    loan_repository: C::LoanRepository,
}

impl<C: Connection> CustomerService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            customer_repository: connection.create_customer_repository(),
            loan_repository: connection.create_loan_repository(),
        }
    }

    pub async fn create_customer(&self, command: CustomerFieldsCommand) -> LibraryResult<Customer> {
        let draft = Self::validate(command)?;
        let customer = self.customer_repository.store_customer(&draft).await?;
        info!("Created customer {} with ID: {}", customer.name, customer.id);
        Ok(customer)
    }

    pub async fn list_customers(&self) -> LibraryResult<Vec<Customer>> {
        let customers = self.customer_repository.list_customers().await?;
        info!("Found {} customers", customers.len());
        Ok(customers)
    }

    pub async fn get_customer(&self, customer_id: i64) -> LibraryResult<Customer> {
        match self.customer_repository.get_customer(customer_id).await? {
            Some(customer) => Ok(customer),
            None => {
                warn!("Customer not found: {}", customer_id);
                Err(LibraryError::not_found("Customer"))
            }
        }
    }

    /// A missing customer is reported before any error carried by `command`
    pub async fn update_customer(
        &self,
        customer_id: i64,
        command: LibraryResult<CustomerFieldsCommand>,
    ) -> LibraryResult<Customer> {
        self.get_customer(customer_id).await?;
        let draft = Self::validate(command?)?;

        if !self.customer_repository.update_customer(customer_id, &draft).await? {
            return Err(LibraryError::not_found("Customer"));
        }

        info!("Updated customer {} with ID: {}", draft.name, customer_id);
        Ok(Customer {
            id: customer_id,
            name: draft.name,
            city: draft.city,
            age: draft.age,
        })
    }

    pub async fn delete_customer(&self, customer_id: i64) -> LibraryResult<()> {
        if !self.customer_repository.delete_customer(customer_id).await? {
            warn!("Customer not found for deletion: {}", customer_id);
            return Err(LibraryError::not_found("Customer"));
        }
        info!("Deleted customer with ID: {}", customer_id);
        Ok(())
    }

    /// Case-insensitive substring search over customer names
    pub async fn search_customers(&self, command: SearchCustomersCommand) -> LibraryResult<Vec<Customer>> {
        // The fragment is matched as given, surrounding spaces included
        let fragment = match command.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(LibraryError::invalid_data()),
        };

        let customers = self.customer_repository.search_customers_by_name(&fragment).await?;
        info!("Search for '{}' matched {} customers", fragment, customers.len());
        Ok(customers)
    }

    /// Customers referenced by at least one loan.
    ///
    /// NOTE: only loans that carry a return date are considered, so this
    /// selects customers with *returned* loans rather than outstanding ones.
    /// The rule is kept as-is until the intended meaning is confirmed.
    pub async fn list_customers_with_active_loans(&self) -> LibraryResult<Vec<Customer>> {
        Ok(self.customer_repository.list_customers_with_returned_loans().await?)
    }

    /// Same loan rule as [`Self::list_customers_with_active_loans`], scoped to one customer
    pub async fn has_active_loans(&self, customer_id: i64) -> LibraryResult<bool> {
        self.get_customer(customer_id).await?;
        let count = self
            .loan_repository
            .count_returned_loans_for_customer(customer_id)
            .await?;
        Ok(count > 0)
    }

    fn validate(command: CustomerFieldsCommand) -> LibraryResult<CustomerDraft> {
        Ok(CustomerDraft {
            name: required_text(command.name)?,
            city: required_text(command.city)?,
            age: required_number(command.age)?,
        })
    }
}

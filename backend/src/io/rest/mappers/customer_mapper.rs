use crate::domain::commands::customer::{CustomerFieldsCommand, SearchCustomersCommand};
use crate::domain::models::customer::Customer as DomainCustomer;
use shared::{Customer as SharedCustomer, CustomerRequest, CustomerSearchQuery};

/// Mapper between shared customer DTOs and the domain model
pub struct CustomerMapper;

impl CustomerMapper {
    pub fn to_dto(domain: DomainCustomer) -> SharedCustomer {
        SharedCustomer {
            id: domain.id,
            name: domain.name,
            city: domain.city,
            age: domain.age,
        }
    }

    pub fn to_dto_list(domain_customers: Vec<DomainCustomer>) -> Vec<SharedCustomer> {
        domain_customers.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: CustomerRequest) -> CustomerFieldsCommand {
        CustomerFieldsCommand {
            name: request.name,
            city: request.city,
            age: request.age,
        }
    }

    pub fn to_search_command(query: CustomerSearchQuery) -> SearchCustomersCommand {
        SearchCustomersCommand { name: query.name }
    }
}

use crate::domain::commands::book::BookFieldsCommand;
use crate::domain::models::book::Book as DomainBook;
use shared::{Book as SharedBook, BookRequest};

/// Mapper between shared book DTOs and the domain model
pub struct BookMapper;

impl BookMapper {
    pub fn to_dto(domain: DomainBook) -> SharedBook {
        SharedBook {
            id: domain.id,
            name: domain.name,
            author: domain.author,
            year_published: domain.year_published,
            book_type: domain.book_type,
            is_loaned: domain.is_loaned,
        }
    }

    pub fn to_dto_list(domain_books: Vec<DomainBook>) -> Vec<SharedBook> {
        domain_books.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: BookRequest) -> BookFieldsCommand {
        BookFieldsCommand {
            name: request.name,
            author: request.author,
            year_published: request.year_published,
            book_type: request.book_type,
        }
    }
}

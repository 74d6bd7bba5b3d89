use crate::models::{Book, BookResponse, CreateBookRequest, UpdateBookRequest};

impl From<CreateBookRequest> for Book {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            id: 0,
            title: req.title.unwrap_or_default(),
            year: req.year.unwrap_or_default(),
            isbn: req.isbn.unwrap_or_default(),
            summary: req.summary,
            image: req.image,
            author_ids: req.author_ids.unwrap_or_default(),
        }
    }
}

impl From<UpdateBookRequest> for Book {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            id: req.id,
            title: req.title.unwrap_or_default(),
            year: req.year.unwrap_or_default(),
            isbn: req.isbn.unwrap_or_default(),
            summary: req.summary,
            image: req.image,
            author_ids: req.author_ids.unwrap_or_default(),
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            year: book.year,
            isbn: book.isbn,
            summary: book.summary,
            image: book.image,
            author_ids: book.author_ids,
        }
    }
}

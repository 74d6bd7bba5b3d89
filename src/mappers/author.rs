use crate::models::{Author, AuthorResponse, CreateAuthorRequest, UpdateAuthorRequest};

impl From<CreateAuthorRequest> for Author {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            id: 0,
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            book_ids: Vec::new(),
        }
    }
}

impl From<UpdateAuthorRequest> for Author {
    fn from(req: UpdateAuthorRequest) -> Self {
        Self {
            id: req.id,
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            book_ids: Vec::new(),
        }
    }
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            book_ids: author.book_ids,
        }
    }
}

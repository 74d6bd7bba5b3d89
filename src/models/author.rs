use super::Entity;

/// Author row as owned by the repository layer.
///
/// `book_ids` is derived from the book side of the relation and is never
/// written through an author.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub book_ids: Vec<i64>,
}

impl Entity for Author {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

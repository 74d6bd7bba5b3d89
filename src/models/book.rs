use super::Entity;

/// Book row as owned by the repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub isbn: String,
    pub summary: Option<String>,
    /// Reference to the cover image, usually a URL or a storage key.
    pub image: Option<String>,
    pub author_ids: Vec<i64>,
}

impl Entity for Book {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

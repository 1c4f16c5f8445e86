//! Named fixtures read from configuration, and random ones built on demand.

use std::fmt::Display;

use crate::{
    config::Settings,
    error::Result,
    random::Generator,
    traits::Resource,
    types::{author::Author, book::Book, field::Field},
};

/// Well-known fixture groups. Combined with a resource name they form the
/// configuration prefix, e.g. `Existing` + `Author` = `ExistingAuthor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureName {
    /// Assumed to exist on the server before the run.
    Existing,
    /// Assumed to exist; overwritten by the update scenario.
    Update,
    /// Assumed to exist; removed by the delete scenario.
    Delete,
    New,
    NewInvalid,
    Updated,
}

impl FixtureName {
    pub fn prefix<R: Resource>(self) -> String {
        format!("{self}{}", R::NAME)
    }
}

impl Display for FixtureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Existing => "Existing",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::New => "New",
            Self::NewInvalid => "NewInvalid",
            Self::Updated => "Updated",
        };
        write!(f, "{s}")
    }
}

pub struct Fixtures<'a> {
    settings: &'a Settings,
}

impl<'a> Fixtures<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn get<R: Resource>(&self, name: FixtureName) -> R {
        R::from_settings(self.settings, &name.prefix::<R>())
    }

    pub fn author(&self, prefix: &str) -> Author {
        Author::from_settings(self.settings, prefix)
    }

    pub fn book(&self, prefix: &str) -> Book {
        Book::from_settings(self.settings, prefix)
    }

    pub fn existing_author(&self) -> Author {
        self.get(FixtureName::Existing)
    }

    pub fn update_author(&self) -> Author {
        self.get(FixtureName::Update)
    }

    pub fn delete_author(&self) -> Author {
        self.get(FixtureName::Delete)
    }

    pub fn existing_book(&self) -> Book {
        self.get(FixtureName::Existing)
    }

    pub fn update_book(&self) -> Book {
        self.get(FixtureName::Update)
    }

    pub fn delete_book(&self) -> Book {
        self.get(FixtureName::Delete)
    }
}

pub fn random_author(gen: &mut Generator) -> Result<Author> {
    Ok(Author {
        id:         Some(Field::from(gen.number(1000, 3999)?)),
        id_book:    Some(Field::from(gen.number(4000, 7999)?)),
        first_name: Some(gen.string(15)?),
        last_name:  Some(gen.string(15)?),
    })
}

pub fn random_book(gen: &mut Generator) -> Result<Book> {
    Ok(Book {
        id:           Some(Field::from(gen.number(1000, 3999)?)),
        title:        Some(gen.string(15)?),
        description:  Some(gen.string(100)?),
        page_count:   Some(Field::from(gen.number(100, 10000)?)),
        excerpt:      Some(gen.string(50)?),
        publish_date: Some(Field::from(gen.utc_timestamp())),
    })
}

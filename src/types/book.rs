use serde::{Deserialize, Serialize};

use crate::{
    config::{ApiConfig, Settings},
    data::{self, InvalidPayload},
    error::Result,
    fixtures,
    random::Generator,
    traits::Resource,
    types::{field::Field, timestamp::Timestamp},
    verify::{mismatch, Mismatch},
};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id:           Option<Field<i64>>,
    pub title:        Option<String>,
    pub description:  Option<String>,
    pub page_count:   Option<Field<i64>>,
    pub excerpt:      Option<String>,
    pub publish_date: Option<Field<Timestamp>>,
}

impl Resource for Book {
    const NAME: &'static str = "Book";
    const PLURAL: &'static str = "Books";

    fn endpoint(api: &ApiConfig) -> &str {
        &api.books_endpoint
    }

    fn id(&self) -> Option<String> {
        self.id.as_ref().map(ToString::to_string)
    }

    fn with_id(self, id: &str) -> Self {
        Self {
            id: Some(Field::parse(id)),
            ..self
        }
    }

    fn from_settings(settings: &Settings, prefix: &str) -> Self {
        let key = |name: &str| settings.get(&format!("{prefix}:{name}"));
        Self {
            id:           key("Id").map(|v| Field::parse(&v)),
            title:        key("Title"),
            description:  key("Description"),
            page_count:   key("PageCount").map(|v| Field::parse(&v)),
            excerpt:      key("Excerpt"),
            publish_date: key("PublishDate").map(|v| Field::parse(&v)),
        }
    }

    fn random(gen: &mut Generator) -> Result<Self> {
        fixtures::random_book(gen)
    }

    fn invalid_payloads(gen: &mut Generator) -> Result<Vec<InvalidPayload<Self>>> {
        data::invalid_books(gen)
    }

    fn first_mismatch(&self, actual: &Self) -> Option<Mismatch> {
        mismatch("id", &self.id, &actual.id)
            .or_else(|| mismatch("title", &self.title, &actual.title))
            .or_else(|| mismatch("description", &self.description, &actual.description))
            .or_else(|| mismatch("pageCount", &self.page_count, &actual.page_count))
            .or_else(|| mismatch("excerpt", &self.excerpt, &actual.excerpt))
            .or_else(|| mismatch("publishDate", &self.publish_date, &actual.publish_date))
    }
}

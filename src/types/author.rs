use serde::{Deserialize, Serialize};

use crate::{
    config::{ApiConfig, Settings},
    data::{self, InvalidPayload},
    error::Result,
    fixtures,
    random::Generator,
    traits::Resource,
    types::field::Field,
    verify::{mismatch, Mismatch},
};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub id:         Option<Field<i64>>,
    pub id_book:    Option<Field<i64>>,
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
}

impl Resource for Author {
    const NAME: &'static str = "Author";
    const PLURAL: &'static str = "Authors";

    fn endpoint(api: &ApiConfig) -> &str {
        &api.authors_endpoint
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
            id:         key("Id").map(|v| Field::parse(&v)),
            id_book:    key("IdBook").or_else(|| key("BookId")).map(|v| Field::parse(&v)),
            first_name: key("FirstName"),
            last_name:  key("LastName"),
        }
    }

    fn random(gen: &mut Generator) -> Result<Self> {
        fixtures::random_author(gen)
    }

    fn invalid_payloads(gen: &mut Generator) -> Result<Vec<InvalidPayload<Self>>> {
        data::invalid_authors(gen)
    }

    fn first_mismatch(&self, actual: &Self) -> Option<Mismatch> {
        mismatch("id", &self.id, &actual.id)
            .or_else(|| mismatch("idBook", &self.id_book, &actual.id_book))
            .or_else(|| mismatch("firstName", &self.first_name, &actual.first_name))
            .or_else(|| mismatch("lastName", &self.last_name, &actual.last_name))
    }
}

//! Data providers for the parameterized negative scenarios.

use std::fmt::Display;

use reqwest::StatusCode;

use crate::{
    error::Result,
    random::Generator,
    traits::Resource,
    types::{author::Author, book::Book, field::Field, timestamp::Timestamp},
    verify::{ExpectedStatus, Expectation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Delete,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "Get"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdCase {
    pub id:          String,
    pub expectation: Expectation,
    pub label:       &'static str,
    pub name:        String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidPayload<R> {
    pub record: R,
    pub label:  &'static str,
    pub name:   String,
}

impl<R: Resource> InvalidPayload<R> {
    fn new(record: R, label: &'static str) -> Self {
        Self {
            record,
            label,
            name: format!("Create {} with {label}", R::NAME),
        }
    }

    /// Creating an invalid payload must always be refused.
    pub fn expectation(&self) -> Expectation {
        Expectation::status(StatusCode::BAD_REQUEST)
    }
}

/// Out-of-range, alphabetic and negative ids for `operation` on `R`.
pub fn invalid_ids<R: Resource>(operation: Operation, gen: &mut Generator) -> Result<Vec<InvalidIdCase>> {
    let case = |id: String, expectation: Expectation, label: &'static str| InvalidIdCase {
        id,
        expectation,
        label,
        name: format!("{operation} {} with {label}", R::NAME),
    };
    Ok(vec![
        case(
            gen.number(1_000_000, 5_000_000)?.to_string(),
            Expectation::status(StatusCode::NOT_FOUND),
            "Non-existing ID",
        ),
        case(
            gen.string(3)?,
            Expectation::TransportOrStatus(StatusCode::BAD_REQUEST.into()),
            "Alphabetical ID",
        ),
        case(
            gen.number(-1000, -1)?.to_string(),
            Expectation::Status(ExpectedStatus::any_of(&[
                StatusCode::NOT_FOUND,
                StatusCode::BAD_REQUEST,
            ])),
            "Negative ID",
        ),
    ])
}

pub fn invalid_authors(gen: &mut Generator) -> Result<Vec<InvalidPayload<Author>>> {
    Ok(vec![
        InvalidPayload::new(
            Author {
                id:         Some(Field::raw(gen.string(15)?)),
                id_book:    Some(Field::from(gen.number(4000, 7999)?)),
                first_name: Some(gen.string(15)?),
                last_name:  Some(gen.string(15)?),
            },
            "Invalid ID",
        ),
        InvalidPayload::new(
            Author {
                id:         Some(Field::from(gen.number(1000, 3999)?)),
                id_book:    Some(Field::raw(gen.string(15)?)),
                first_name: Some(gen.string(15)?),
                last_name:  Some(gen.string(15)?),
            },
            "Invalid IdBook",
        ),
    ])
}

fn book(
    gen: &mut Generator,
    id: Field<i64>,
    page_count: Field<i64>,
    publish_date: Field<Timestamp>,
) -> Result<Book> {
    Ok(Book {
        id:           Some(id),
        title:        Some(gen.string(15)?),
        description:  Some(gen.string(100)?),
        page_count:   Some(page_count),
        excerpt:      Some(gen.string(50)?),
        publish_date: Some(publish_date),
    })
}

pub fn invalid_books(gen: &mut Generator) -> Result<Vec<InvalidPayload<Book>>> {
    let invalid_id = Field::raw(gen.string(15)?);
    let pages = Field::from(gen.number(100, 10000)?);
    let now = Field::from(gen.utc_timestamp());
    let first = book(gen, invalid_id, pages, now)?;

    let id = Field::from(gen.number(1000, 9999)?);
    let invalid_pages = Field::raw(gen.string(15)?);
    let now = Field::from(gen.utc_timestamp());
    let second = book(gen, id, invalid_pages, now)?;

    let id = Field::from(gen.number(1000, 9999)?);
    let pages = Field::from(gen.number(100, 10000)?);
    let invalid_date = Field::raw(gen.string(15)?);
    let third = book(gen, id, pages, invalid_date)?;

    Ok(vec![
        InvalidPayload::new(first, "Invalid ID"),
        InvalidPayload::new(second, "Invalid PageCount"),
        InvalidPayload::new(third, "Invalid PublishDate"),
    ])
}

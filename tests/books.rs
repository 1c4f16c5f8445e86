mod common;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;

use bookstore_probe::{
    data,
    fixtures::{random_book, FixtureName},
    scenarios::{Outcome, ResourceScenario, Step},
    types::{book::Book, field::Field},
    verify::{verify_and_print_response, verify_record_data, verify_status_code, Expectation},
};

#[tokio::test]
async fn list_contains_seeded_books() {
    let fake = common::spawn().await;
    let ctx = fake.context(1);

    let response = ctx.client.books().list().await.unwrap();
    let books: Vec<Book> = verify_and_print_response(&response, StatusCode::OK, "list").unwrap();
    assert_eq!(books.len(), 3);
    assert!(books.iter().all(|b| b.publish_date.as_ref().is_some_and(Field::is_valid)));
}

#[tokio::test]
async fn existing_book_matches_fixture() {
    let fake = common::spawn().await;
    let ctx = fake.context(2);
    let expected: Book = ctx.fixtures().existing_book();

    let response = ctx.client.books().get_by_id("1").await.unwrap();
    let actual: Book = verify_and_print_response(&response, StatusCode::OK, "get").unwrap();
    verify_record_data(&expected, &actual, "Book retrieval mismatch").unwrap();
}

#[tokio::test]
async fn book_round_trip_keeps_publish_date() {
    let fake = common::spawn().await;
    let mut ctx = fake.context(3);
    let books = ctx.client.books();

    let book = random_book(&mut ctx.gen).unwrap();
    let created: Book =
        verify_and_print_response(&books.create(&book).await.unwrap(), StatusCode::OK, "create")
            .unwrap();
    verify_record_data(&book, &created, "Created Book mismatch").unwrap();

    let id = book.id.as_ref().unwrap().to_string();
    let stored: Book =
        verify_and_print_response(&books.get_by_id(&id).await.unwrap(), StatusCode::OK, "get")
            .unwrap();
    assert_eq!(stored.publish_date, book.publish_date);
}

#[tokio::test]
async fn alphabetic_page_count_is_rejected() {
    let fake = common::spawn().await;
    let mut ctx = fake.context(4);

    let mut book = random_book(&mut ctx.gen).unwrap();
    book.page_count = Some(Field::raw(ctx.gen.string(15).unwrap()));
    let response = ctx.client.books().create_invalid(&book).await.unwrap();
    verify_status_code(&response, StatusCode::BAD_REQUEST, "invalid page count").unwrap();

    let id = book.id.as_ref().unwrap().to_string();
    assert!(!fake.books.contains(id.parse().unwrap()));
}

#[tokio::test]
async fn every_invalid_book_payload_is_refused() {
    let fake = common::spawn().await;
    let mut ctx = fake.context(5);

    let payloads = data::invalid_books(&mut ctx.gen).unwrap();
    assert_eq!(payloads.len(), 3);
    for payload in payloads {
        assert_eq!(payload.expectation(), Expectation::status(StatusCode::BAD_REQUEST));
        let name = payload.name.clone();
        let scenario = ResourceScenario {
            name: name.clone(),
            step: Step::CreateInvalid(payload),
        };
        let outcome = scenario.run(&mut ctx).await;
        assert!(matches!(outcome, Ok(Outcome::Passed)), "{name}: {outcome:?}");
    }
    assert_eq!(fake.books.len(), 3);
}

#[tokio::test]
async fn update_existing_book_overwrites_fields() {
    let fake = common::spawn().await;
    let mut ctx = fake.context(6);
    let before: Book = ctx.fixtures().get(FixtureName::Update);

    let scenario = ResourceScenario::<Book> {
        name: "Update existing Book by ID".into(),
        step: Step::UpdateExisting,
    };
    assert_eq!(scenario.run(&mut ctx).await.unwrap(), Outcome::Passed);

    let response = ctx.client.books().get_by_id("2").await.unwrap();
    let after: Book = verify_and_print_response(&response, StatusCode::OK, "get").unwrap();
    assert_eq!(after.id, before.id);
    assert_ne!(after.title, before.title);
    assert_eq!(fake.books.len(), 3);
}

#[tokio::test]
async fn deleting_a_missing_book_is_not_found() {
    let fake = common::spawn().await;
    let mut ctx = fake.context(7);
    let scenario = ResourceScenario::<Book> {
        name: "Delete Book with non-existing ID".into(),
        step: Step::DeleteMissing,
    };
    assert_eq!(scenario.run(&mut ctx).await.unwrap(), Outcome::Passed);
    assert_eq!(fake.books.len(), 3);
}

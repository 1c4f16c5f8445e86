//! In-process fake bookstore served with axum, seeded from the sample fixture files.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use figment::{
    providers::{Format, Json as JsonProvider},
    Figment,
};
use serde_json::{Map, Value};

use bookstore_probe::{config::Settings, random::Generator, scenarios::Context};

pub const AUTHORS_DATA: &str = include_str!("../../resources/data/authorsTestData.json");
pub const BOOKS_DATA: &str = include_str!("../../resources/data/booksTestData.json");

const AUTHORS_PATH: &str = "/api/v1/Authors";
const BOOKS_PATH: &str = "/api/v1/Books";

#[derive(Clone)]
pub struct Collection {
    records:       Arc<Mutex<BTreeMap<i64, Value>>>,
    validate:      fn(&Map<String, Value>) -> bool,
    /// Stores invalid payloads that carry an integer id, then still answers 400.
    keep_rejected: bool,
}

impl Collection {
    fn seeded(data: &str, validate: fn(&Map<String, Value>) -> bool, keep_rejected: bool) -> Self {
        let groups: Map<String, Value> = serde_json::from_str(data).unwrap();
        let mut records = BTreeMap::new();
        for (_, fixture) in groups {
            let record: Map<String, Value> = fixture
                .as_object()
                .unwrap()
                .iter()
                .map(|(key, value)| (camel_case(key), value.clone()))
                .collect();
            let id = record["id"].as_i64().unwrap();
            records.insert(id, Value::Object(record));
        }
        Self {
            records: Arc::new(Mutex::new(records)),
            validate,
            keep_rejected,
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.records.lock().unwrap().contains_key(&id)
    }

    pub fn insert(&self, id: i64, record: Value) {
        self.records.lock().unwrap().insert(id, record);
    }

    pub fn get(&self, id: i64) -> Option<Value> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

fn camel_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn integer_or_absent(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).map_or(true, |v| v.is_null() || v.is_i64())
}

fn valid_author(record: &Map<String, Value>) -> bool {
    integer_or_absent(record, "id") && integer_or_absent(record, "idBook")
}

fn valid_book(record: &Map<String, Value>) -> bool {
    let date_ok = match record.get("publishDate") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => chrono::DateTime::parse_from_rfc3339(s).is_ok(),
        Some(_) => false,
    };
    integer_or_absent(record, "id") && integer_or_absent(record, "pageCount") && date_ok
}

fn checked(collection: &Collection, body: Value) -> Result<Map<String, Value>, StatusCode> {
    match body {
        Value::Object(record) if (collection.validate)(&record) => Ok(record),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn list(State(collection): State<Collection>) -> Json<Vec<Value>> {
    Json(collection.records.lock().unwrap().values().cloned().collect())
}

async fn fetch(
    State(collection): State<Collection>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    match collection.records.lock().unwrap().get(&id) {
        Some(record) => Ok(Json(record.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn create(
    State(collection): State<Collection>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let Value::Object(record) = body else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let id = record.get("id").and_then(Value::as_i64);
    if !(collection.validate)(&record) {
        if let (true, Some(id)) = (collection.keep_rejected, id) {
            collection.insert(id, Value::Object(record));
        }
        return Err(StatusCode::BAD_REQUEST);
    }
    let id = id.ok_or(StatusCode::BAD_REQUEST)?;
    let record = Value::Object(record);
    collection.records.lock().unwrap().insert(id, record.clone());
    Ok(Json(record))
}

async fn update(
    State(collection): State<Collection>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut record = checked(&collection, body)?;
    record.insert("id".into(), id.into());
    let record = Value::Object(record);
    collection.records.lock().unwrap().insert(id, record.clone());
    Ok(Json(record))
}

async fn remove(State(collection): State<Collection>, Path(id): Path<i64>) -> StatusCode {
    match collection.records.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

fn routes(path: &str, collection: Collection) -> Router {
    Router::new()
        .route(path, get(list).post(create))
        .route(&format!("{path}/:id"), get(fetch).put(update).delete(remove))
        .with_state(collection)
}

pub struct FakeBookstore {
    pub addr:    SocketAddr,
    pub authors: Collection,
    pub books:   Collection,
}

impl FakeBookstore {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn settings(&self) -> Settings {
        settings_for(&self.base_url())
    }

    pub fn context(&self, seed: u64) -> Context {
        Context::new(self.settings(), Generator::seeded(seed)).unwrap()
    }
}

/// Binds an ephemeral port and serves a freshly seeded store on it.
pub async fn spawn() -> FakeBookstore {
    spawn_with(false).await
}

/// Like [`spawn`], but invalid creates are stored despite the 400.
pub async fn spawn_keeping_rejected() -> FakeBookstore {
    spawn_with(true).await
}

async fn spawn_with(keep_rejected: bool) -> FakeBookstore {
    let authors = Collection::seeded(AUTHORS_DATA, valid_author, keep_rejected);
    let books = Collection::seeded(BOOKS_DATA, valid_book, keep_rejected);
    let app = routes(AUTHORS_PATH, authors.clone()).merge(routes(BOOKS_PATH, books.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);

    FakeBookstore {
        addr,
        authors,
        books,
    }
}

/// Configuration pointing at `base_url`, with the sample fixtures loaded.
pub fn settings_for(base_url: &str) -> Settings {
    let api = format!(
        r#"{{"API": {{"BaseUrl": "{base_url}", "AuthorsEndpoint": "api/v1/Authors", "BooksEndpoint": "api/v1/Books"}}}}"#
    );
    Settings::from_figment(
        Figment::new()
            .merge(JsonProvider::string(&api))
            .merge(JsonProvider::string(AUTHORS_DATA))
            .merge(JsonProvider::string(BOOKS_DATA)),
    )
    .unwrap()
}

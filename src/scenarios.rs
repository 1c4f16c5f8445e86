//! Named test scenarios for both resources.
//!
//! Each scenario is independent: it builds its own fixtures, issues its
//! calls one after the other and checks them with the helpers in
//! [`crate::verify`]. Update and delete scenarios assume the matching
//! `Update*` / `Delete*` fixture already exists on the server.

use std::{fmt::Display, str::FromStr};

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::{
    config::Settings,
    data::{self, InvalidIdCase, InvalidPayload, Operation},
    error::{Error, Result},
    fixtures::{FixtureName, Fixtures},
    random::Generator,
    requests::{RequestClient, ResourceRequests},
    traits::Resource,
    types::{author::Author, book::Book},
    verify::{verify_and_print_response, verify_record_data, verify_status_code, ExpectedStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Authors,
    Books,
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "authors" | "author" => Ok(Self::Authors),
            "books" | "book" => Ok(Self::Books),
            other => Err(Error::invalid_argument(format!("unknown resource `{other}`"))),
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authors => write!(f, "authors"),
            Self::Books => write!(f, "books"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Skipped(String),
}

/// Everything a scenario needs: the client, the fixture source and the random source.
pub struct Context {
    pub client:   RequestClient,
    pub settings: Settings,
    pub gen:      Generator,
}

impl Context {
    pub fn new(settings: Settings, gen: Generator) -> Result<Self> {
        Ok(Self {
            client: RequestClient::from_settings(&settings)?,
            settings,
            gen,
        })
    }

    pub fn fixtures(&self) -> Fixtures<'_> {
        Fixtures::new(&self.settings)
    }
}

#[derive(Debug, Clone)]
pub enum Step<R> {
    ListAll,
    GetExisting,
    GetTwice,
    GetInvalid(InvalidIdCase),
    Create,
    CreateInvalid(InvalidPayload<R>),
    UpdateExisting,
    UpdateMissing,
    DeleteExisting,
    DeleteMissing,
    DeleteInvalid(InvalidIdCase),
}

#[derive(Debug, Clone)]
pub struct ResourceScenario<R> {
    pub name: String,
    pub step: Step<R>,
}

#[derive(Debug, Clone)]
pub enum Scenario {
    Authors(ResourceScenario<Author>),
    Books(ResourceScenario<Book>),
}

impl Scenario {
    pub fn name(&self) -> &str {
        match self {
            Self::Authors(s) => &s.name,
            Self::Books(s) => &s.name,
        }
    }

    pub fn resource(&self) -> ResourceKind {
        match self {
            Self::Authors(_) => ResourceKind::Authors,
            Self::Books(_) => ResourceKind::Books,
        }
    }

    pub async fn run(&self, ctx: &mut Context) -> Result<Outcome> {
        info!(scenario = self.name(), "running");
        match self {
            Self::Authors(s) => s.run(ctx).await,
            Self::Books(s) => s.run(ctx).await,
        }
    }
}

/// Every scenario for both resources. Parameterized cases are drawn from `gen`.
pub fn catalog(gen: &mut Generator) -> Result<Vec<Scenario>> {
    let mut scenarios: Vec<Scenario> = resource_catalog::<Author>(gen)?
        .into_iter()
        .map(Scenario::Authors)
        .collect();
    scenarios.extend(
        resource_catalog::<Book>(gen)?
            .into_iter()
            .map(Scenario::Books),
    );
    Ok(scenarios)
}

pub fn resource_catalog<R: Resource>(gen: &mut Generator) -> Result<Vec<ResourceScenario<R>>> {
    let (name, plural) = (R::NAME, R::PLURAL);
    let named = |name: String, step: Step<R>| ResourceScenario { name, step };

    let mut scenarios = vec![
        named(format!("Get all {plural}"), Step::ListAll),
        named(format!("Get {name} by existing ID"), Step::GetExisting),
        named(format!("Get {name} twice without changes"), Step::GetTwice),
    ];
    for case in data::invalid_ids::<R>(Operation::Get, gen)? {
        scenarios.push(named(case.name.clone(), Step::GetInvalid(case)));
    }
    scenarios.push(named(format!("Create a new {name}"), Step::Create));
    for payload in R::invalid_payloads(gen)? {
        scenarios.push(named(payload.name.clone(), Step::CreateInvalid(payload)));
    }
    scenarios.extend([
        named(format!("Update existing {name} by ID"), Step::UpdateExisting),
        named(format!("Update (create) {name} with non-existing ID"), Step::UpdateMissing),
        named(format!("Delete {name} by existing ID"), Step::DeleteExisting),
        named(format!("Delete {name} with non-existing ID"), Step::DeleteMissing),
    ]);
    for case in data::invalid_ids::<R>(Operation::Delete, gen)? {
        scenarios.push(named(case.name.clone(), Step::DeleteInvalid(case)));
    }
    Ok(scenarios)
}

fn put_statuses() -> ExpectedStatus {
    ExpectedStatus::any_of(&[StatusCode::OK, StatusCode::CREATED])
}

fn fixture_id<R: Resource>(record: &R, name: FixtureName) -> Result<String> {
    record
        .id()
        .ok_or_else(|| Error::missing_config(format!("{}:Id", name.prefix::<R>())))
}

fn generated_id<R: Resource>(record: &R) -> Result<String> {
    record
        .id()
        .ok_or_else(|| Error::invalid_argument(format!("generated {} has no id", R::NAME)))
}

impl<R: Resource> ResourceScenario<R> {
    pub async fn run(&self, ctx: &mut Context) -> Result<Outcome> {
        let requests = ctx.client.resource::<R>();
        match &self.step {
            Step::ListAll => list_all(&requests).await,
            Step::GetExisting => get_existing(ctx, &requests).await,
            Step::GetTwice => get_twice(ctx, &requests).await,
            Step::GetInvalid(case) => {
                let result = requests.get_by_id(&case.id).await;
                case.expectation.check(
                    result,
                    &format!("Get {} with {} {}", R::NAME, case.label, case.id),
                )?;
                Ok(Outcome::Passed)
            }
            Step::Create => create(ctx, &requests).await,
            Step::CreateInvalid(payload) => create_invalid(&requests, payload).await,
            Step::UpdateExisting => update_existing(ctx, &requests).await,
            Step::UpdateMissing => update_missing(ctx, &requests).await,
            Step::DeleteExisting => delete_existing(ctx, &requests).await,
            Step::DeleteMissing => delete_missing(ctx, &requests).await,
            Step::DeleteInvalid(case) => {
                let result = requests.delete_by_id(&case.id).await;
                case.expectation.check(
                    result,
                    &format!("Tried to delete {} with {} {}", R::NAME, case.label, case.id),
                )?;
                Ok(Outcome::Passed)
            }
        }
    }
}

async fn list_all<R: Resource>(requests: &ResourceRequests<R>) -> Result<Outcome> {
    let response = requests.list().await?;
    let records: Vec<R> = verify_and_print_response(
        &response,
        StatusCode::OK,
        &format!("Failed to retrieve {}", R::PLURAL.to_lowercase()),
    )?;
    info!(count = records.len(), "listed {}", R::PLURAL);
    Ok(Outcome::Passed)
}

async fn fetch<R: Resource>(requests: &ResourceRequests<R>, id: &str, message: &str) -> Result<R> {
    let response = requests.get_by_id(id).await?;
    verify_and_print_response(&response, StatusCode::OK, message)
}

async fn get_existing<R: Resource>(ctx: &Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let expected: R = ctx.fixtures().get(FixtureName::Existing);
    let id = fixture_id(&expected, FixtureName::Existing)?;
    let actual = fetch(requests, &id, &format!("Failed to retrieve {} {id}", R::NAME)).await?;
    verify_record_data(&expected, &actual, &format!("{} retrieval mismatch", R::NAME))?;
    Ok(Outcome::Passed)
}

async fn get_twice<R: Resource>(ctx: &Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let fixture: R = ctx.fixtures().get(FixtureName::Existing);
    let id = fixture_id(&fixture, FixtureName::Existing)?;
    let message = format!("Failed to retrieve {} {id}", R::NAME);
    let first = fetch(requests, &id, &message).await?;
    let second = fetch(requests, &id, &message).await?;
    verify_record_data(&first, &second, &format!("{} changed between reads", R::NAME))?;
    Ok(Outcome::Passed)
}

async fn create<R: Resource>(ctx: &mut Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let record = R::random(&mut ctx.gen)?;
    let response = requests.create(&record).await?;
    let created: R = verify_and_print_response(
        &response,
        StatusCode::OK,
        &format!("Failed to create a new {}", R::NAME),
    )?;
    verify_record_data(&record, &created, &format!("Created {} mismatch", R::NAME))?;

    let id = generated_id(&record)?;
    let stored = fetch(
        requests,
        &id,
        &format!("Created {} {id} is not saved", R::NAME),
    )
    .await?;
    verify_record_data(&created, &stored, &format!("Stored {} mismatch", R::NAME))?;
    Ok(Outcome::Passed)
}

async fn create_invalid<R: Resource>(
    requests: &ResourceRequests<R>,
    payload: &InvalidPayload<R>,
) -> Result<Outcome> {
    let result = requests.create_invalid(&payload.record).await;
    payload.expectation().check(
        result,
        &format!("Unexpectedly succeeded in creating a {} with {}", R::NAME, payload.label),
    )?;

    // Nothing may be retrievable under the rejected payload's id.
    if let Some(id) = payload.record.id() {
        match requests.get_by_id(&id).await {
            Ok(response) if response.status.is_success() => {
                return Err(Error::UnexpectedSuccess {
                    message: format!("Rejected {} is retrievable under ID {id}", R::NAME),
                    actual:  response.status,
                });
            }
            Ok(_) => {}
            Err(error) if error.is_transport() => {}
            Err(error) => return Err(error),
        }
    }
    Ok(Outcome::Passed)
}

async fn overwrite<R: Resource>(ctx: &mut Context, requests: &ResourceRequests<R>, id: &str) -> Result<()> {
    let record = R::random(&mut ctx.gen)?.with_id(id);
    let response = requests.update_by_id(id, &record).await?;
    let updated: R = verify_and_print_response(
        &response,
        put_statuses(),
        &format!("Failed to update {} {id}", R::NAME),
    )?;
    verify_record_data(&record, &updated, &format!("Updated {} mismatch", R::NAME))?;

    let stored = fetch(requests, id, &format!("Updated {} {id} is not saved", R::NAME)).await?;
    verify_record_data(&updated, &stored, &format!("Stored {} mismatch", R::NAME))
}

async fn update_existing<R: Resource>(ctx: &mut Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let fixture: R = ctx.fixtures().get(FixtureName::Update);
    let id = fixture_id(&fixture, FixtureName::Update)?;
    fetch(requests, &id, &format!("{} {id} not found", R::NAME)).await?;
    overwrite(ctx, requests, &id).await?;
    Ok(Outcome::Passed)
}

async fn update_missing<R: Resource>(ctx: &mut Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let id = ctx.gen.number(1_000_000, 5_000_000)?.to_string();
    let probe = requests.get_by_id(&id).await?;
    if probe.status != StatusCode::NOT_FOUND {
        let reason = format!("{} with ID {id} answered {}", R::NAME, probe.status);
        warn!(%reason, "skipping update of a non-existing record");
        return Ok(Outcome::Skipped(reason));
    }
    overwrite(ctx, requests, &id).await?;
    Ok(Outcome::Passed)
}

async fn delete_existing<R: Resource>(ctx: &Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let fixture: R = ctx.fixtures().get(FixtureName::Delete);
    let id = fixture_id(&fixture, FixtureName::Delete)?;
    fetch(requests, &id, &format!("{} {id} not found", R::NAME)).await?;

    let deleted = requests.delete_by_id(&id).await?;
    verify_status_code(&deleted, StatusCode::OK, &format!("Failed to delete {} {id}", R::NAME))?;

    let gone = requests.get_by_id(&id).await?;
    verify_status_code(
        &gone,
        StatusCode::NOT_FOUND,
        &format!("{} {id} was not deleted", R::NAME),
    )?;
    Ok(Outcome::Passed)
}

async fn delete_missing<R: Resource>(ctx: &mut Context, requests: &ResourceRequests<R>) -> Result<Outcome> {
    let id = ctx.gen.number(1_000_000, 5_000_000)?.to_string();
    let probe = requests.get_by_id(&id).await?;
    verify_status_code(
        &probe,
        StatusCode::NOT_FOUND,
        &format!("Found a {} with ID {id}", R::NAME),
    )?;
    let deleted = requests.delete_by_id(&id).await?;
    verify_status_code(
        &deleted,
        StatusCode::NOT_FOUND,
        &format!("Deleted non-existing {} {id}", R::NAME),
    )?;
    Ok(Outcome::Passed)
}

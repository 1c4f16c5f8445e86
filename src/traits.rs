use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::{ApiConfig, Settings},
    data::InvalidPayload,
    error::Result,
    random::Generator,
    verify::Mismatch,
};

/// A record type served by one REST resource of the bookstore.
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync {
    /// Singular name, also the suffix of fixture prefixes (`ExistingAuthor`).
    const NAME: &'static str;
    const PLURAL: &'static str;

    fn endpoint(api: &ApiConfig) -> &str;

    fn id(&self) -> Option<String>;

    fn with_id(self, id: &str) -> Self;

    /// Reads the record stored under `prefix` (`ExistingAuthor:Id`, ...).
    fn from_settings(settings: &Settings, prefix: &str) -> Self;

    fn random(gen: &mut Generator) -> Result<Self>;

    /// Payloads with exactly one field corrupted.
    fn invalid_payloads(gen: &mut Generator) -> Result<Vec<InvalidPayload<Self>>>;

    /// The first field, in declaration order, where `actual` differs from `self`.
    fn first_mismatch(&self, actual: &Self) -> Option<Mismatch>;
}

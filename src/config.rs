use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const APP_SETTINGS_FILE: &str = "appSettings.json";
pub const AUTHORS_DATA_FILE: &str = "resources/data/authorsTestData.json";
pub const BOOKS_DATA_FILE: &str = "resources/data/booksTestData.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "BOOKSTORE_";

pub const BASE_URL_KEY: &str = "API:BaseUrl";
pub const FALLBACK_BASE_URL_KEY: &str = "ApiSettings:BaseUrl";
pub const AUTHORS_ENDPOINT_KEY: &str = "API:AuthorsEndpoint";
pub const BOOKS_ENDPOINT_KEY: &str = "API:BooksEndpoint";

#[derive(Debug, Serialize, Deserialize)]
struct Defaults {
    #[serde(rename = "API")]
    api: ApiDefaults,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiDefaults {
    authors_endpoint: String,
    books_endpoint:   String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            api: ApiDefaults {
                authors_endpoint: "api/v1/Authors".into(),
                books_endpoint:   "api/v1/Books".into(),
            },
        }
    }
}

/// Resolved endpoint configuration used to build a request client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    pub base_url:         String,
    pub authors_endpoint: String,
    pub books_endpoint:   String,
}

/// Hierarchical key-value configuration.
///
/// Keys are addressed as `Section:Key` (`ExistingAuthor:Id`) and looked up
/// case-insensitively, so `BOOKSTORE_API__BASEURL` overrides `API:BaseUrl`.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    /// The layered sources, lowest precedence first, resolved against `dir`.
    ///
    /// Each layer is extracted on its own so keys that differ only in case
    /// still resolve by layer order.
    pub fn layers(dir: &Path) -> Vec<Figment> {
        vec![
            Figment::from(Serialized::defaults(Defaults::default())),
            Figment::from(Json::file(dir.join(APP_SETTINGS_FILE))),
            Figment::from(Json::file(dir.join(AUTHORS_DATA_FILE))),
            Figment::from(Json::file(dir.join(BOOKS_DATA_FILE))),
            Figment::from(Toml::file(dir.join(CONFIG_FILE))),
            Figment::from(Env::prefixed(ENV_PREFIX).split("__")),
        ]
    }

    pub fn read_config() -> Result<Self> {
        Self::read_from(Path::new("."))
    }

    pub fn read_from(dir: &Path) -> Result<Self> {
        let path = dir.join(".env");
        match dotenvy::from_path(&path) {
            Ok(()) => {}
            Err(e) if e.not_found() => {}
            Err(source) => return Err(Error::DotEnv { path, source }),
        }
        Self::from_layers(Self::layers(dir))
    }

    /// Folds `layers` in order; later layers override earlier ones.
    pub fn from_layers(layers: impl IntoIterator<Item = Figment>) -> Result<Self> {
        let mut values = Map::new();
        for layer in layers {
            if let Value::Object(map) = layer.extract::<Value>()? {
                merge_lowercased(&mut values, map);
            }
        }
        Ok(Self { values })
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Self::from_layers([figment])
    }

    pub fn default_as_string() -> Result<String> {
        toml::to_string(&Defaults::default()).map_err(|e| Error::invalid_argument(e.to_string()))
    }

    /// Looks up a `Section:Key` path. Numbers and booleans are rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut segments = key.split([':', '.']).map(str::to_lowercase);
        let first = segments.next()?;
        let mut current = self.values.get(&first)?;
        for segment in segments {
            current = current.as_object()?.get(&segment)?;
        }
        match current {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::missing_config(key))
    }

    pub fn api(&self) -> Result<ApiConfig> {
        let base_url = self
            .require(BASE_URL_KEY)
            .or_else(|_| self.require(FALLBACK_BASE_URL_KEY))
            .map_err(|_| Error::missing_config(BASE_URL_KEY))?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Ok(ApiConfig {
            base_url,
            authors_endpoint: self.require(AUTHORS_ENDPOINT_KEY)?,
            books_endpoint: self.require(BOOKS_ENDPOINT_KEY)?,
        })
    }
}

// Keys from `from` win on collision; nested tables merge key by key.
fn merge_lowercased(into: &mut Map<String, Value>, from: Map<String, Value>) {
    for (key, value) in from {
        let key = key.to_lowercase();
        match (into.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_lowercased(existing, nested);
            }
            (_, Value::Object(nested)) => {
                let mut fresh = Map::new();
                merge_lowercased(&mut fresh, nested);
                into.insert(key, Value::Object(fresh));
            }
            (_, value) => {
                into.insert(key, value);
            }
        }
    }
}

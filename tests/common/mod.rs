// Shared test doubles for the integration tests.
//
// Each test binary only uses some of these.
#![allow(dead_code)]

use alfred_gala::embedding::{EmbeddingError, EmbeddingProvider};
use alfred_gala::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use alfred_gala::weather::{
    CurrentConditions, ForecastSource, Geocoder, Place, WeatherLookup, WeatherSourceError,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const DIMENSIONS: usize = 512;

/// Bag-of-words embedder: each lowercase word bumps one hashed dimension.
pub struct WordBagEmbedder;

pub fn word_bag(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0; DIMENSIONS];
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let hash = word
            .to_lowercase()
            .bytes()
            .fold(2166136261u32, |acc, b| (acc ^ b as u32).wrapping_mul(16777619));
        vector[hash as usize % DIMENSIONS] += 1.0;
    }
    vector
}

#[async_trait]
impl EmbeddingProvider for WordBagEmbedder {
    fn id(&self) -> &str {
        "word-bag"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(word_bag(text))
    }
}

/// Embedder whose service is always down.
pub struct BrokenEmbedder;

#[async_trait]
impl EmbeddingProvider for BrokenEmbedder {
    fn id(&self) -> &str {
        "broken"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::invalid_response("broken", "service unavailable"))
    }
}

/// Indexes like [`WordBagEmbedder`] but misbehaves on single queries:
/// `Unreachable` fails, `Narrow` answers with too few dimensions.
pub enum QueryFailingEmbedder {
    Unreachable,
    Narrow,
}

#[async_trait]
impl EmbeddingProvider for QueryFailingEmbedder {
    fn id(&self) -> &str {
        "query-failing"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self {
            Self::Unreachable => Err(EmbeddingError::invalid_response(
                "query-failing",
                "connection reset",
            )),
            Self::Narrow => Ok(vec![1.0; 8]),
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| word_bag(text)).collect())
    }
}

/// Replays canned completions and records every request.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.iter().map(|r| r.to_string()).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedModel {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.requests.lock().await.push(request);
        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "Final Answer: I have nothing more to add.".to_string());
        Ok(ModelResponse::new(reply))
    }
}

pub struct FixedGeocoder(pub Option<Place>);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _city: &str) -> Result<Option<Place>, WeatherSourceError> {
        Ok(self.0.clone())
    }
}

pub struct FixedForecast(pub Option<CurrentConditions>);

#[async_trait]
impl ForecastSource for FixedForecast {
    async fn current(
        &self,
        _place: &Place,
    ) -> Result<Option<CurrentConditions>, WeatherSourceError> {
        Ok(self.0)
    }
}

pub fn paris() -> Place {
    Place {
        display_name: "Paris, Île-de-France, France".to_string(),
        latitude: "48.8588897".to_string(),
        longitude: "2.3200410".to_string(),
    }
}

/// Clear sky over Paris, 21.5°C with a light breeze.
pub fn sunny_lookup() -> WeatherLookup {
    WeatherLookup::new(
        Arc::new(FixedGeocoder(Some(paris()))),
        Arc::new(FixedForecast(Some(CurrentConditions {
            temperature: 21.5,
            windspeed: 3.2,
            weathercode: 0,
        }))),
    )
}

pub const GUESTS_JSON: &str = r#"[
  {
    "name": "Dr. Eleanor Vance",
    "interests": ["astrophysics", "chess"],
    "background": "Director of the Hollowmere Observatory.",
    "gossip": "Rumoured to have declined a knighthood for a meteor shower.",
    "fun_fact": "Won eleven of twelve blindfold games in one night."
  },
  {
    "name": "Professor Aris Thorne",
    "interests": ["ancient languages", "sailing"],
    "background": "Philologist working on Linear A.",
    "gossip": "Feuding with the museum curator.",
    "fun_fact": "Keeps bees on the faculty roof."
  }
]"#;

pub const MENU_MD: &str = "# Menu\n\nDessert: dark chocolate fondant with salted caramel ice cream.\n";

pub const SCHEDULE_MD: &str = "# Schedule\n\n22:30 Fireworks display over the lake.\n";

/// Write the three knowledge sources into `dir`.
pub fn write_knowledge(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let guests = dir.join("guests.json");
    let menu = dir.join("menu.md");
    let schedule = dir.join("schedule.md");
    fs::write(&guests, GUESTS_JSON).expect("write guests");
    fs::write(&menu, MENU_MD).expect("write menu");
    fs::write(&schedule, SCHEDULE_MD).expect("write schedule");
    (guests, menu, schedule)
}

/// Minimal valid configuration pointing at the files from [`write_knowledge`].
pub fn config_toml(dir: &Path) -> String {
    let (guests, menu, schedule) = write_knowledge(dir);
    format!(
        r#"
default_provider = "scripted"
model = "test-model"

[[providers]]
id = "scripted"
type = "ollama"
endpoint = "http://127.0.0.1:9"

[knowledge]
guests = '{}'
menu = '{}'
schedule = '{}'
top_k = 1
"#,
        guests.display(),
        menu.display(),
        schedule.display()
    )
}

use std::sync::Arc;

use super::error::ToolInvokeError;
use super::registry::ToolSpec;
use crate::application::knowledge::{KnowledgeBase, KnowledgeError};
use crate::application::weather::WeatherLookup;

pub const KNOWLEDGE_TOOL: &str = "Gala_Information_Retriever";
pub const WEATHER_TOOL: &str = "get_current_weather";

/// Retrieval over the gala knowledge base, `top_k` chunks per query.
pub fn knowledge_tool(knowledge: Arc<KnowledgeBase>, top_k: usize) -> ToolSpec {
    ToolSpec::new(
        KNOWLEDGE_TOOL,
        "Useful for answering questions about the gala, including guest details (interests, background, gossip, fun facts), menu items, and the event schedule.",
        "a specific question or keyword related to the gala information",
        move |query: String| {
            let knowledge = knowledge.clone();
            async move {
                knowledge
                    .query_text(&query, top_k)
                    .await
                    .map_err(|err| match err {
                        KnowledgeError::NotInitialized => ToolInvokeError::NotInitialized,
                        other => ToolInvokeError::Failed(other.to_string()),
                    })
            }
        },
    )
}

/// Current weather for a city. Never fails; problems come back as text.
pub fn weather_tool(lookup: WeatherLookup) -> ToolSpec {
    ToolSpec::new(
        WEATHER_TOOL,
        "Fetches the current weather conditions for a specified city using Open-Meteo. Useful for knowing if it's a good time for outdoor activities like fireworks. Returns temperature in Celsius, weather description, and wind speed.",
        "a city name",
        move |city: String| {
            let lookup = lookup.clone();
            async move { Ok(lookup.get_weather(&city).await) }
        },
    )
}

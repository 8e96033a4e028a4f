mod common;

use alfred_gala::config::KnowledgeConfig;
use alfred_gala::knowledge::{
    Document, FixedSizeChunker, KnowledgeBase, KnowledgeError, load_documents, sources,
};
use alfred_gala::tooling::{ToolError, ToolInvokeError, ToolRegistry, knowledge_tool};
use common::{BrokenEmbedder, QueryFailingEmbedder, WordBagEmbedder, write_knowledge};
use std::sync::Arc;
use tempfile::tempdir;

fn knowledge_base() -> KnowledgeBase {
    let chunker = FixedSizeChunker::new(1000, 200).expect("chunker");
    KnowledgeBase::new(Arc::new(WordBagEmbedder), chunker)
}

fn gala_documents() -> Vec<Document> {
    let dir = tempdir().expect("tempdir");
    let (guests, menu, schedule) = write_knowledge(dir.path());
    load_documents(&KnowledgeConfig {
        guests: Some(guests),
        menu: Some(menu),
        schedule: Some(schedule),
        ..KnowledgeConfig::default()
    })
    .expect("documents")
}

#[test]
fn loads_one_document_per_guest_plus_menu_and_schedule() {
    let documents = gala_documents();

    assert_eq!(documents.len(), 4);
    assert_eq!(documents[0].id, "guests.json#0");
    assert!(documents[0].content.starts_with("Guest Name: Dr. Eleanor Vance"));
    assert_eq!(documents[2].id, "menu.md");
    assert_eq!(documents[3].id, "schedule.md");
    assert_eq!(
        documents[3].metadata.get("kind").map(ToString::to_string),
        Some("schedule".to_string())
    );
}

#[test]
fn unconfigured_sources_are_skipped() {
    let documents = load_documents(&KnowledgeConfig::default()).expect("documents");
    assert!(documents.is_empty());
}

#[test]
fn missing_source_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let result = sources::load_text(&dir.path().join("absent.md"), "menu");
    assert!(matches!(result, Err(KnowledgeError::Source { .. })));
}

#[test]
fn malformed_guest_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("guests.json");
    std::fs::write(&path, "{ not json").expect("write");

    let result = sources::load_guests(&path);
    assert!(matches!(result, Err(KnowledgeError::Parse { .. })));
}

#[tokio::test]
async fn retrieves_the_matching_guest() {
    let knowledge = knowledge_base();
    let count = knowledge.build(&gala_documents()).await.expect("build");
    assert_eq!(count, 4);

    let text = knowledge
        .query_text("What are Dr. Eleanor Vance's interests?", 1)
        .await
        .expect("query");

    assert!(text.contains("Dr. Eleanor Vance"));
    assert!(text.contains("astrophysics"));
    assert!(text.contains("chess"));
}

#[tokio::test]
async fn results_are_ordered_by_similarity() {
    let knowledge = knowledge_base();
    knowledge.build(&gala_documents()).await.expect("build");

    let results = knowledge
        .query("Fireworks display over the lake", 3)
        .await
        .expect("query");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].chunk.document_id, "schedule.md");
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn query_before_build_is_not_initialized() {
    let knowledge = knowledge_base();

    let result = knowledge.query("dessert", 2).await;
    assert!(matches!(result, Err(KnowledgeError::NotInitialized)));
    assert!(!knowledge.is_ready());
}

#[tokio::test]
async fn second_build_is_rejected() {
    let knowledge = knowledge_base();
    let documents = gala_documents();
    knowledge.build(&documents).await.expect("build");

    let result = knowledge.build(&documents).await;
    assert!(matches!(result, Err(KnowledgeError::AlreadyBuilt)));
    assert_eq!(knowledge.len(), 4);
}

#[tokio::test]
async fn empty_index_answers_nothing_found() {
    let knowledge = knowledge_base();
    knowledge.build(&[]).await.expect("build");

    let text = knowledge.query_text("dessert", 2).await.expect("query");
    assert_eq!(text, alfred_gala::knowledge::index::NOTHING_FOUND);
}

#[tokio::test]
async fn embedding_failure_during_build_is_an_error() {
    let chunker = FixedSizeChunker::new(1000, 200).expect("chunker");
    let knowledge = KnowledgeBase::new(Arc::new(BrokenEmbedder), chunker);

    let result = knowledge.build(&gala_documents()).await;
    assert!(matches!(result, Err(KnowledgeError::Embedding(_))));
    assert!(!knowledge.is_ready());
}

#[tokio::test]
async fn knowledge_tool_reports_not_initialized_before_build() {
    let knowledge = Arc::new(knowledge_base());
    let registry = ToolRegistry::builder()
        .register(knowledge_tool(knowledge, 2))
        .expect("register")
        .build();

    let result = registry
        .invoke("Gala_Information_Retriever", "dessert".to_string())
        .await;

    match result {
        Err(ToolError::Execution { source, .. }) => {
            assert_eq!(source, ToolInvokeError::NotInitialized)
        }
        other => panic!("expected NotInitialized, got {other:?}"),
    }
}

#[tokio::test]
async fn knowledge_tool_returns_retrieved_text() {
    let knowledge = Arc::new(knowledge_base());
    knowledge.build(&gala_documents()).await.expect("build");
    let registry = ToolRegistry::builder()
        .register(knowledge_tool(knowledge, 1))
        .expect("register")
        .build();

    let text = registry
        .invoke("Gala_Information_Retriever", "chocolate dessert".to_string())
        .await
        .expect("invoke");

    assert!(text.contains("chocolate fondant"));
}

#[tokio::test]
async fn query_embedding_failure_is_retrieval_unavailable() {
    let chunker = FixedSizeChunker::new(1000, 200).expect("chunker");
    let knowledge = KnowledgeBase::new(Arc::new(QueryFailingEmbedder::Unreachable), chunker);
    knowledge.build(&gala_documents()).await.expect("build");

    let result = knowledge.query("dessert", 2).await;

    match result {
        Err(KnowledgeError::RetrievalUnavailable { reason }) => {
            assert!(reason.contains("connection reset"), "{reason}")
        }
        other => panic!("expected RetrievalUnavailable, got {other:?}"),
    }
    assert!(knowledge.is_ready());
}

#[tokio::test]
async fn query_dimension_mismatch_is_retrieval_unavailable() {
    let chunker = FixedSizeChunker::new(1000, 200).expect("chunker");
    let knowledge = KnowledgeBase::new(Arc::new(QueryFailingEmbedder::Narrow), chunker);
    knowledge.build(&gala_documents()).await.expect("build");

    let result = knowledge.query("dessert", 2).await;

    match result {
        Err(KnowledgeError::RetrievalUnavailable { reason }) => {
            assert!(reason.contains("8 dimensions"), "{reason}")
        }
        other => panic!("expected RetrievalUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn knowledge_tool_reports_failed_retrieval() {
    let chunker = FixedSizeChunker::new(1000, 200).expect("chunker");
    let knowledge = Arc::new(KnowledgeBase::new(
        Arc::new(QueryFailingEmbedder::Unreachable),
        chunker,
    ));
    knowledge.build(&gala_documents()).await.expect("build");
    let registry = ToolRegistry::builder()
        .register(knowledge_tool(knowledge, 2))
        .expect("register")
        .build();

    let result = registry
        .invoke("Gala_Information_Retriever", "dessert".to_string())
        .await;

    assert!(
        matches!(
            result,
            Err(ToolError::Execution {
                source: ToolInvokeError::Failed(_),
                ..
            })
        ),
        "{result:?}"
    );
}

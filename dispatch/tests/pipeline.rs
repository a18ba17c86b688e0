use std::sync::Arc;

use cartvoice_core::{ActionKind, AssistantConfig, Transcript, TranscriptEvent};
use cartvoice_dispatch::{JsonFileListStore, ListStore, ShoppingAssistant};
use tempfile::tempdir;

fn config(suggestions: bool) -> AssistantConfig {
    AssistantConfig {
        enable_suggestions: Some(suggestions),
        ..AssistantConfig::default()
    }
}

#[tokio::test]
async fn test_spoken_session_against_json_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.json");
    let store = Arc::new(JsonFileListStore::new(&path));
    let assistant = ShoppingAssistant::from_config(&config(false), store.clone()).unwrap();

    let spoken = [
        "Add milk to my list.",
        "put 2 bottles of orange juice on my shopping list",
        "I need a banana",
        "add milk",
        "remove bread from my list",
        "cross banana off my list",
    ];
    let mut outcomes = Vec::new();
    for text in spoken {
        outcomes.push(
            assistant
                .handle_event(TranscriptEvent::Recognized(Transcript::new(text, 0.8)))
                .await,
        );
    }

    assert!(outcomes[0].success);
    assert_eq!(outcomes[3].message, "Updated milk quantity to 2");
    assert!(!outcomes[4].success);
    assert_eq!(outcomes[4].action, Some(ActionKind::Remove));
    assert_eq!(outcomes[4].message, "Item \"bread\" not found in your list");
    assert!(outcomes[5].success);

    let stored = store.list().await.unwrap();
    let summary: Vec<_> = stored
        .iter()
        .map(|item| (item.name.as_str(), item.quantity, item.category.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("milk", 2, "Dairy"), ("orange juice", 2, "Beverages")]
    );
    assert_eq!(assistant.history(usize::MAX).await.len(), spoken.len());
}

#[tokio::test]
async fn test_list_reloads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.json");

    {
        let assistant =
            ShoppingAssistant::from_config(&config(false), Arc::new(JsonFileListStore::new(&path)))
                .unwrap();
        assistant
            .handle_transcript(Transcript::typed("buy 3 apples"))
            .await;
    }

    let assistant =
        ShoppingAssistant::from_config(&config(false), Arc::new(JsonFileListStore::new(&path)))
            .unwrap();
    assert_eq!(assistant.dispatcher().load().await.unwrap(), 1);

    let outcome = assistant.handle_transcript(Transcript::typed("find apple")).await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Found 1 matching items in your list");
    assert_eq!(outcome.results, vec!["apples x3 (Produce)"]);
}

#[tokio::test]
async fn test_search_with_suggestions_enabled() {
    let dir = tempdir().unwrap();
    let assistant = ShoppingAssistant::from_config(
        &config(true),
        Arc::new(JsonFileListStore::new(dir.path().join("list.json"))),
    )
    .unwrap();

    let outcome = assistant
        .handle_transcript(Transcript::typed("search for paper"))
        .await;
    assert!(outcome.success);
    assert_eq!(outcome.action, Some(ActionKind::Search));
    assert_eq!(
        outcome.results,
        vec!["toilet paper (Household)", "paper towels (Household)"]
    );
}

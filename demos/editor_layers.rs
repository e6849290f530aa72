//! Independent Histories
//!
//! This example keeps two histories on one store: one for document text,
//! one for view settings. Undoing one never touches the other.
//!
//! Key concepts:
//! - Partial histories over chosen paths
//! - Keys derived from paths or set explicitly
//! - A capped history that forgets its oldest checkpoints
//!
//! Run with: cargo run --example editor_layers

use serde_json::json;
use undoable::store::{Registry, StoreBuilder, Update};
use undoable::{create_history, paths, HistoryConfig};

fn editor(registry: &mut Registry) {
    registry.on_init(|_| {
        Update::patch([("text", json!("")), ("zoom", json!(100)), ("cursor", json!(0))])
    });
    registry.on("editor/type", |state, payload| {
        let mut text = state["text"].as_str().unwrap_or_default().to_string();
        text.push_str(payload.as_str().unwrap_or_default());
        let cursor = json!(text.len());
        Update::patch([("text", json!(text)), ("cursor", cursor)])
    });
    registry.on("view/zoom", |_, payload| Update::patch([("zoom", payload.clone())]));
}

fn main() {
    println!("=== Independent Histories Example ===\n");

    let text = create_history(paths!["text"], HistoryConfig::default()).unwrap();
    let view = create_history(paths!["zoom"], HistoryConfig::new().key("view").limit(2)).unwrap();
    println!("Text history key: {}", text.key());
    println!("View history key: {}\n", view.key());

    let mut store = StoreBuilder::new()
        .module(editor)
        .module(text.module())
        .module(view.module())
        .build()
        .unwrap();

    store.dispatch_with("editor/type", json!("Hello"));
    store.dispatch_with("view/zoom", json!(125));
    store.dispatch_with("editor/type", json!(", world"));
    store.dispatch_with("view/zoom", json!(150));
    store.dispatch_with("view/zoom", json!(200));

    let state = store.get();
    println!("Text: {}, zoom: {}", state["text"], state["zoom"]);

    store.dispatch(text.undo());
    let state = store.get();
    println!("Undo text -> text: {}, zoom: {}", state["text"], state["zoom"]);

    store.dispatch(view.undo());
    store.dispatch(view.undo());
    store.dispatch(view.undo());
    let state = store.get();
    println!("Undo view x3 -> text: {}, zoom: {}", state["text"], state["zoom"]);

    if let Some(record) = view.record(&state) {
        println!("View history holds {} checkpoints (limit 2 past)", record.len());
    }

    println!("\n=== Example Complete ===");
}

//! Counter With Undo
//!
//! This example tracks the whole state of a small counter store.
//!
//! Key concepts:
//! - A default history over every key, stored under "undoable"
//! - Undo and redo dispatched like any other action
//! - Undo/redo at the boundaries is a harmless no-op
//!
//! Run with: cargo run --example counter

use serde_json::json;
use undoable::store::{Registry, StoreBuilder, Update};
use undoable::History;

fn counter(registry: &mut Registry) {
    registry.on_init(|_| Update::patch([("count", json!(0))]));
    registry.on("counter/add", |state, payload| {
        let count = state["count"].as_i64().unwrap_or(0);
        let step = payload.as_i64().unwrap_or(1);
        Update::patch([("count", json!(count + step))])
    });
}

fn main() {
    println!("=== Counter With Undo Example ===\n");

    let history = History::full();
    let mut store = StoreBuilder::new()
        .module(counter)
        .module(history.module())
        .build()
        .unwrap();

    store.dispatch("counter/add");
    store.dispatch_with("counter/add", json!(10));
    println!("After two adds:  {}", store.to_value());

    store.dispatch(history.undo());
    println!("After undo:      {}", store.to_value());

    store.dispatch(history.undo());
    store.dispatch(history.undo());
    println!("Undo past start: {}", store.to_value());

    store.dispatch(history.redo());
    println!("After redo:      {}", store.to_value());

    store.dispatch_with("counter/add", json!(100));
    println!("New change:      {}", store.to_value());

    println!("\n=== Example Complete ===");
}

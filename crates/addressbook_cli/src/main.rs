//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `addressbook_core` linkage.
//! - Exercise one store instance end to end with deterministic output.

use addressbook_core::{Contact, ContactStore, LogConfig};
use log::info;

fn main() {
    println!("addressbook_core ping={}", addressbook_core::ping());
    println!("addressbook_core version={}", addressbook_core::core_version());

    if let Err(err) = LogConfig::from_env().init() {
        eprintln!("logging disabled: {err}");
    }

    let store = ContactStore::new();
    run_smoke(&store);
}

fn run_smoke(store: &ContactStore) {
    let subscription = store.subscribe(|contacts| {
        println!("contacts changed count={}", contacts.len());
    });

    store.set(vec![demo_contact(1, "Ada Lovelace", "ada@example.com")]);
    store.update(|current| {
        let mut next = current.to_vec();
        next.push(demo_contact(2, "Grace Hopper", "grace@example.com"));
        next
    });

    let invalid = store
        .snapshot()
        .iter()
        .filter(|contact| contact.validate().is_err())
        .count();
    store.unsubscribe(subscription);

    info!(
        "event=cli_smoke module=cli status=ok contacts={} invalid={}",
        store.len(),
        invalid
    );
    println!("final count={} invalid={}", store.len(), invalid);
}

fn demo_contact(id: i64, name: &str, email: &str) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        company: String::new(),
        tags: vec!["demo".to_string()],
        notes: String::new(),
    }
}

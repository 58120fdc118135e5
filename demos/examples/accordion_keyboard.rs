// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard-driven accordion plus a dropdown dismissed from the document.
//!
//! This example shows how a host:
//! - mounts composite parts through their scoped contexts,
//! - forwards key presses and moves focus where `KeyOutcome` says,
//! - routes document-level Escape and pointer-downs through a `DismissStack`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p unfold_demos --example accordion_keyboard`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use unfold_disclosure::OpenIds;
use unfold_roving::Key;
use unfold_widgets::dismiss::DismissStack;
use unfold_widgets::{KeyOutcome, accordion, dropdown};

fn print_attrs(label: &str, attrs: &unfold_widgets::AriaAttrs) {
    let rendered: Vec<String> = attrs.iter().map(|(n, v)| format!("{n}=\"{v}\"")).collect();
    println!("  {label}: {}", rendered.join(" "));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("== accordion ==");
    let scope = accordion::scope();
    let root: accordion::Root<&str> =
        accordion::Root::new(accordion::AccordionConfig::single(true), None, OpenIds::new());
    root.on_value_change(|open| println!("  open set -> {open:?}"));
    let _root = root.provide(&scope);

    // Each section keeps its item, trigger and content alive together.
    let mut sections = Vec::new();
    for (id, disabled) in [("shipping", false), ("returns", true), ("warranty", false)] {
        let item = accordion::Item::mount(&scope, id, disabled).expect("inside accordion root");
        let item_scope = accordion::item_scope();
        let _item = item.provide(&item_scope);
        let trigger = accordion::Trigger::mount(&item_scope).expect("inside accordion item");
        let content = accordion::Content::mount(&item_scope).expect("inside accordion item");
        sections.push((item, trigger, content));
    }

    let mut focus = 0;
    for key in [Key::Enter, Key::ArrowDown, Key::Space, Key::ArrowDown, Key::End, Key::Home] {
        let (item, trigger, _) = &sections[focus];
        let outcome = trigger.key_down(key);
        println!("{key:?} on {} -> {outcome:?}", item.id());
        if let KeyOutcome::Focus(next) = outcome {
            focus = sections
                .iter()
                .position(|(item, _, _)| *item.id() == next)
                .expect("focus target is a mounted section");
        }
    }
    for (item, trigger, content) in &sections {
        println!("{}:", item.id());
        print_attrs("trigger", &trigger.attrs());
        print_attrs("content", &content.attrs());
    }

    println!("== dropdown ==");
    let document = DismissStack::new();
    let menu_scope = dropdown::scope();
    let menu: dropdown::Root<&str> =
        dropdown::Root::new(dropdown::DropdownConfig::default(), None, false);
    menu.attach_dismiss(&document);
    menu.set_bounds(vec![Rect::new(0.0, 0.0, 90.0, 24.0), Rect::new(0.0, 24.0, 180.0, 120.0)]);
    menu.on_open_change(|open| println!("  open -> {open}"));
    menu.on_select(|id| println!("  selected {id}"));
    let _menu = menu.provide(&menu_scope);
    let trigger = dropdown::Trigger::mount(&menu_scope).expect("inside dropdown root");
    let content = dropdown::Content::mount(&menu_scope).expect("inside dropdown root");
    let _items: Vec<_> = ["cut", "copy", "paste"]
        .into_iter()
        .map(|id| {
            dropdown::Item::mount(&menu_scope, id, id == "cut").expect("inside dropdown root")
        })
        .collect();

    trigger.key_down(Key::ArrowDown);
    println!("initial focus: {:?}", content.take_initial_focus());
    println!("ArrowDown -> {:?}", content.key_down(Key::ArrowDown));
    println!("outside click dismissed: {}", document.pointer_down(Point::new(400.0, 10.0)));
    println!("layers left: {}", document.len());

    trigger.click();
    println!("Escape dismissed: {}", document.key_down(Key::Escape));
    print_attrs("trigger", &trigger.attrs());
}

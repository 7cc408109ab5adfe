use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::Config;
use wikitoc::toc::{TocBuilder, TocOptions, TocTemplate, TocTree};
use wikitoc::{InjectOptions, TocInjector};

fn events() -> impl Strategy<Value = Vec<(usize, String)>> {
    // A tiny title alphabet forces plenty of duplicate slugs.
    prop::collection::vec((1_usize..=6, "[ab -]{0,3}"), 0..40)
}

fn build(events: &[(usize, String)]) -> TocTree {
    TocBuilder::build(&TocOptions::default(), events.iter().map(|(l, t)| (*l, t.as_str())))
        .expect("levels 1..=6 are accepted")
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn ids_are_unique_within_a_build(events in events()) {
        let tree = build(&events);
        let mut seen = HashSet::new();
        for id in tree.iter() {
            prop_assert!(seen.insert(tree.get(id).id.clone()), "duplicate id {}", tree.get(id).id);
        }
    }

    #[test]
    fn stored_levels_are_contiguous(events in events()) {
        let tree = build(&events);
        for id in tree.iter() {
            let parent = tree.parent(id).expect("non-root nodes have a parent");
            prop_assert_eq!(tree.get(id).level, tree.get(parent).level + 1);
        }
    }

    #[test]
    fn headings_keep_document_order(events in events()) {
        let tree = build(&events);
        let titles: Vec<&str> = tree
            .iter()
            .filter(|id| !tree.get(*id).placeholder)
            .map(|id| tree.get(id).title.as_str())
            .collect();
        let expected: Vec<&str> = events.iter().map(|(_, t)| t.as_str()).collect();
        prop_assert_eq!(titles, expected);
    }

    #[test]
    fn attached_level_matches_requested_level(events in events()) {
        let mut builder = TocBuilder::new(&TocOptions::default());
        let top_level = builder.tree().root_level() + 1;
        for (level, title) in &events {
            let node = builder.push(*level, title).unwrap();
            prop_assert_eq!(builder.tree().get(node).level, (*level).max(top_level));
            prop_assert_eq!(builder.current_level(), (*level).max(top_level));
        }
    }

    #[test]
    fn rendering_is_idempotent(events in events()) {
        let tree = build(&events);
        let template = TocTemplate::default();
        let first = template.render(&tree);
        prop_assert_eq!(first.matches("<li>").count(), tree.len());
        prop_assert_eq!(first, template.render(&tree));
    }

    #[test]
    fn every_heading_gets_an_anchor(events in events()) {
        let mut html = String::from("{TOC}");
        for (level, title) in &events {
            html.push_str(&format!("<h{level}>x{title}</h{level}>"));
        }
        let injector = TocInjector::new(InjectOptions::default()).unwrap();
        let page = injector.process(&html).unwrap();
        prop_assert_eq!(page.html.matches("<a name=").count(), events.len());
        prop_assert_eq!(page.html.contains("{TOC}"), false);
    }
}

#[test]
fn skipped_levels_get_two_placeholders() {
    let tree = build(&[(2, "A".to_string()), (5, "B".to_string())]);
    let placeholders: Vec<usize> = tree
        .iter()
        .filter(|id| tree.get(*id).placeholder)
        .map(|id| tree.get(id).level)
        .collect();
    assert_eq!(placeholders, [3, 4]);

    let b = tree.iter().find(|id| tree.get(*id).title == "B").unwrap();
    assert_eq!(tree.get(b).level, 5);
}

#[test]
fn empty_input_renders_nothing() {
    let tree = build(&[]);
    assert_eq!(TocTemplate::default().render(&tree), "");
}

//! The final tree does not depend on the order files are discovered in.

mod common;

use camino::{Utf8Path, Utf8PathBuf};
use common::generated_file;
use prefixer_domain::{MemorySourceStore, NoopObserver, RenameOptions, RenameTable, Scheduler};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Acyclic dependency graph: file `i` may only depend on files `< i`.
fn dag() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..7).prop_flat_map(|n| {
        (0..n)
            .map(|i| proptest::sample::subsequence((0..i).collect::<Vec<_>>(), 0..=i))
            .collect::<Vec<_>>()
    })
}

type Snapshot = (BTreeMap<String, String>, BTreeMap<String, String>, u64);

fn run(graph: &[Vec<usize>], order: &[usize]) -> Snapshot {
    let store = MemorySourceStore::new();
    for (i, deps) in graph.iter().enumerate() {
        let deps: Vec<String> = deps.iter().map(|d| format!("api/f{d}.proto")).collect();
        let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
        store.insert(format!("gen/f{i}.pb.go"), generated_file(&format!("api/f{i}.proto"), &deps));
    }

    let files = order
        .iter()
        .map(|i| Utf8PathBuf::from(format!("gen/f{i}.pb.go")))
        .collect();
    let opts = RenameOptions {
        prefix: "acme/".to_string(),
        ..RenameOptions::default()
    };
    let mut table = RenameTable::new();
    let outcome = Scheduler::new(&store, &NoopObserver, opts).run(files, &mut table);
    assert!(outcome.check().is_ok());
    assert!(!outcome.has_failures());

    let texts = (0..graph.len())
        .map(|i| {
            let path = format!("gen/f{i}.pb.go");
            let text = store.get(Utf8Path::new(&path)).expect("present");
            (path, text)
        })
        .collect();
    (table.to_map(), texts, outcome.sweeps)
}

proptest! {
    #[test]
    fn result_is_independent_of_input_order(
        (graph, order) in dag().prop_flat_map(|g| {
            let order: Vec<usize> = (0..g.len()).collect();
            (Just(g), Just(order).prop_shuffle())
        })
    ) {
        let sorted: Vec<usize> = (0..graph.len()).collect();
        let (table_a, texts_a, _) = run(&graph, &sorted);
        let (table_b, texts_b, sweeps) = run(&graph, &order);

        prop_assert_eq!(table_a, table_b);
        prop_assert_eq!(texts_a, texts_b);
        prop_assert!(sweeps as usize <= graph.len());
    }

    #[test]
    fn topological_order_needs_one_sweep(graph in dag()) {
        let sorted: Vec<usize> = (0..graph.len()).collect();
        let (table, _, sweeps) = run(&graph, &sorted);
        prop_assert_eq!(table.len(), graph.len());
        prop_assert_eq!(sweeps, 1);
    }
}

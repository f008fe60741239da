use criterion::{Criterion, criterion_group, criterion_main};
use graphdiagram::GraphModel;
use graphdiagram::render::{
    CachingTextMeasurer, DeterministicTextMeasurer, LayoutOptions, layout_graph,
};
use std::hint::black_box;
use std::sync::Arc;

/// A ring of captioned nodes with properties, every neighbour pair joined in both directions
/// so each pair produces curved arrows.
fn ring(nodes: usize) -> GraphModel {
    let mut graph = GraphModel::new();
    let ids: Vec<_> = (0..nodes)
        .map(|i| {
            let angle = i as f64 / nodes as f64 * std::f64::consts::TAU;
            let node = graph.create_node();
            node.set_position(angle.cos() * 2000.0, angle.sin() * 2000.0)
                .set_caption(format!("node number {i} in the ring"));
            node.properties.set("index", i.to_string()).set("kind", "ring");
            node.id
        })
        .collect();
    for (i, &id) in ids.iter().enumerate() {
        let next = ids[(i + 1) % ids.len()];
        if let Ok(rel) = graph.create_relationship(id, next) {
            rel.set_type("NEXT");
        }
        if let Ok(rel) = graph.create_relationship(next, id) {
            rel.properties.set("weight", "1");
        }
    }
    graph
}

fn bench_layout_stress(c: &mut Criterion) {
    let graph = ring(200);
    let plain = LayoutOptions::default();
    let cached = LayoutOptions::default().with_text_measurer(Arc::new(CachingTextMeasurer::new(
        DeterministicTextMeasurer::default(),
    )));

    let mut group = c.benchmark_group("layout_stress");
    group.sample_size(30);

    group.bench_function("ring_200_layout", |b| {
        b.iter(|| {
            let out = layout_graph(black_box(&graph), &plain).expect("layout");
            black_box(out.relationships.len());
        });
    });

    group.bench_function("ring_200_layout_cached_measurer", |b| {
        b.iter(|| {
            let out = layout_graph(black_box(&graph), &cached).expect("layout");
            black_box(out.relationships.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_layout_stress);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flowroute_core::{DiagonalMovement, Vec2};
use flowroute_edge::{ArrowOptions, EdgeRouter, Endpoint, NodeRect, Position, RouteConfig, arrow};
use flowroute_paths::{Algorithm, FinderOptions};
use std::hint::black_box;

/// A `cols` x `rows` lattice of 80x40 nodes, 60 apart.
fn lattice(cols: usize, rows: usize) -> Vec<NodeRect> {
    let mut nodes = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            nodes.push(NodeRect::new(
                format!("n{r}_{c}"),
                c as f64 * 140.0,
                r as f64 * 100.0,
                80.0,
                40.0,
            ));
        }
    }
    nodes
}

/// Source on the right of the top-left node, target on the left of the
/// bottom-right node.
fn corner_ports(cols: usize, rows: usize) -> (Endpoint, Endpoint) {
    let source = Endpoint::new(80.0, 20.0, Position::Right);
    let target = Endpoint::new(
        (cols - 1) as f64 * 140.0,
        (rows - 1) as f64 * 100.0 + 20.0,
        Position::Left,
    );
    (source, target)
}

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for &(cols, rows) in &[(3, 2), (6, 4), (10, 8)] {
        let nodes = lattice(cols, rows);
        let (source, target) = corner_ports(cols, rows);
        for algo in [Algorithm::AStar, Algorithm::JumpPoint, Algorithm::BiAStar] {
            let config = RouteConfig {
                finder: FinderOptions::new(algo, DiagonalMovement::Always),
                ..RouteConfig::default()
            };
            let Ok(router) = EdgeRouter::new(config) else {
                continue;
            };
            group.bench_with_input(
                BenchmarkId::new(algo.to_string(), format!("{cols}x{rows}")),
                &nodes,
                |b, nodes| b.iter(|| router.route(black_box(nodes), &source, &target)),
            );
        }
    }
    group.finish();
}

fn bench_arrow(c: &mut Criterion) {
    let opts = ArrowOptions::edge();
    c.bench_function("arrow", |b| {
        b.iter(|| {
            arrow(
                black_box(Vec2::new(12.0, 40.0)),
                black_box(Vec2::new(310.0, 155.0)),
                &opts,
            )
            .to_path()
        })
    });
}

criterion_group!(benches, bench_route, bench_arrow);
criterion_main!(benches);

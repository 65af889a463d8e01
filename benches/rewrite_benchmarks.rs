//! Performance benchmarks for IR traversal and rewriting.
//!
//! - Identity traversal: a visitor that replaces nothing
//! - Single-leaf rewrite: one identifier deep in the tree is replaced
//! - Catch body replacement: every catch clause gets a new body
//! - Pipeline: check plus constant folding
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- pipeline
//! ```

use bumpalo::Bump;
use corvid::corvid_ir::{BinaryOp, CatchNode, IrArena, IrOptions, run_pipeline, traverse};
use corvid::{Block, IdentNode, IrBuilder, Node, Source, Visitor};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

struct Identity;

impl<'ir> Visitor<'ir> for Identity {}

struct Substitute<'ir> {
    target: &'static str,
    replacement: Node<'ir>,
}

impl<'ir> Visitor<'ir> for Substitute<'ir> {
    fn leave_ident(&mut self, node: &'ir IdentNode<'ir>) -> Node<'ir> {
        if node.name() == self.target {
            self.replacement
        } else {
            Node::Ident(node)
        }
    }
}

struct ReplaceBodies<'ir> {
    arena: IrArena<'ir>,
    body: &'ir Block<'ir>,
}

impl<'ir> Visitor<'ir> for ReplaceBodies<'ir> {
    fn leave_catch(&mut self, node: &'ir CatchNode<'ir>) -> Node<'ir> {
        Node::Catch(node.with_body(self.arena, self.body))
    }
}

/// Nested try statements `depth` deep, each with a guarded catch and a
/// sibling statement; the innermost body mentions `target`.
fn build<'ir>(b: &IrBuilder<'ir>, depth: usize) -> Node<'ir> {
    let stmt = |name: &str| Node::ExpressionStatement(b.expr_stmt(Node::Ident(b.ident(name))));
    let mut inner = b.block(&[stmt("target")]);
    for level in 0..depth {
        let guard = Node::Binary(b.binary(
            BinaryOp::InstanceOf,
            Node::Ident(b.ident("e")),
            Node::Ident(b.ident("Error")),
        ));
        let clause = b.catch(
            b.ident("e"),
            Some(guard),
            b.block(&[Node::Throw(b.throw(Node::Ident(b.ident("e"))))]),
        );
        let sibling = stmt(&format!("s{level}"));
        inner = b.block(&[sibling, Node::Try(b.try_(inner, &[clause], None))]);
    }
    Node::Block(inner)
}

fn traversal_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("ir/traversal");

    for depth in [16usize, 128, 1024] {
        group.bench_with_input(BenchmarkId::new("identity", depth), &depth, |bench, &depth| {
            let bump = Bump::new();
            let source = Source::new("bench.js", "");
            let arena = IrArena::new(&bump);
            let b = IrBuilder::new(arena, &source);
            let root = build(&b, depth);

            bench.iter(|| black_box(traverse(black_box(root), arena, &mut Identity).unwrap()));
        });

        let id = BenchmarkId::new("single_leaf_rewrite", depth);
        group.bench_with_input(id, &depth, |bench, &depth| {
            let source = Source::new("bench.js", "");
            let setup = Bump::new();
            let b = IrBuilder::new(IrArena::new(&setup), &source);
            let root = build(&b, depth);
            let replacement = Node::Literal(b.number(0.0));

            bench.iter_batched_ref(
                Bump::new,
                |scratch| {
                    let mut visitor = Substitute {
                        target: "target",
                        replacement,
                    };
                    black_box(traverse(root, IrArena::new(scratch), &mut visitor).unwrap());
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn rewrite_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ir/rewrite");

    let source = Source::new("bench.js", "");
    let setup = Bump::new();
    let b = IrBuilder::new(IrArena::new(&setup), &source);
    let root = build(&b, 256);
    let body = b.block(&[]);

    group.bench_function("replace_all_catch_bodies", |bench| {
        bench.iter_batched_ref(
            Bump::new,
            |scratch| {
                let mut visitor = ReplaceBodies {
                    arena: IrArena::new(scratch),
                    body,
                };
                black_box(traverse(root, IrArena::new(scratch), &mut visitor).unwrap());
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("pipeline", |bench| {
        let options = IrOptions::default().with_conditional_catch(true);
        bench.iter_batched_ref(
            Bump::new,
            |scratch| {
                let folded = run_pipeline(IrArena::new(scratch), root, options).unwrap().folded;
                end_profiling_frame();
                black_box(folded)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, traversal_benchmarks, rewrite_benchmarks);
criterion_main!(benches);

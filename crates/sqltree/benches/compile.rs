use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqltree::{
    Compiler, CompilerConfig, Condition, DeclaredField, Join, Order, PlaceholderStyle,
    QueryComponent, Select,
};

/// SELECT with `n` columns and an AND filter of `n` comparisons:
/// SELECT t.col0 , t.col1 ... FROM t LEFT JOIN u ON ... WHERE ( t.col0 = ? AND ... )
fn build_select(n: usize) -> QueryComponent {
    let fields: Vec<DeclaredField> = (0..n)
        .map(|i| DeclaredField::qualified("t", format!("col{i}")))
        .collect();
    let filter = Condition::and(
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| f.equals(i as i64))
            .collect(),
    );
    Select::new(
        fields.iter().map(|f| f.column(true)).collect(),
        QueryComponent::table("t"),
    )
    .with_join(Join::left(
        QueryComponent::table("u"),
        &DeclaredField::qualified("t", "id"),
        &DeclaredField::qualified("u", "t_id"),
    ))
    .with_filter(filter)
    .with_order(Order::asc(&fields[0]))
    .with_limit(100)
    .into()
}

/// Nested OR/AND groups `depth` levels deep.
fn build_nested(depth: usize) -> Condition {
    let a = DeclaredField::new("a");
    let mut cond = a.equals(0);
    for i in 0..depth {
        cond = if i % 2 == 0 {
            Condition::or(vec![cond, a.equals(i as i64)])
        } else {
            Condition::and(vec![cond, a.greater_than(i as i64)])
        };
    }
    cond
}

fn bench_compile_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/select");
    let compiler = Compiler::default();

    for n in [1, 5, 10, 50, 100] {
        let tree = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| black_box(compiler.compile(tree).map(|q| q.to_sql())));
        });
    }

    group.finish();
}

fn bench_compile_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/nested_condition");
    let compiler =
        Compiler::new(CompilerConfig::new().with_placeholder(PlaceholderStyle::Numbered));

    for depth in [4, 16, 64] {
        let cond = build_nested(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &cond, |b, cond| {
            b.iter(|| black_box(compiler.compile_condition(cond)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile_select, bench_compile_nested);
criterion_main!(benches);

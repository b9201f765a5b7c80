//! End-to-end compilation of SELECT trees through the public API.

use sqltree::prelude::*;

struct Users;

impl Table for Users {
    const NAME: &'static str = "users";
    const PRIMARY_KEY: &'static str = "id";
}

struct Orders;

impl Table for Orders {
    const NAME: &'static str = "orders";
    const PRIMARY_KEY: &'static str = "id";
}

fn base_select() -> Select {
    let fields = [Users::primary_key_field(), Users::field("name")];
    Select::new(select_list(&fields, true, false), Users::table_component(None))
}

fn placeholder_count(compiled: &CompiledQuery) -> usize {
    compiled.tokens().iter().filter(|t| t.as_str() == "?").count()
}

#[test]
fn simple_select() {
    let compiled = compile(&base_select().into()).unwrap();
    assert_eq!(compiled.to_sql(), "SELECT users.id , users.name FROM users");
    assert!(compiled.params().is_empty());
}

#[test]
fn filtered_select() {
    let select = base_select().with_filter(Users::primary_key_field().equals(5));
    let compiled = compile(&select.into()).unwrap();
    assert!(compiled.to_sql().ends_with("FROM users WHERE users.id = ?"));
    assert_eq!(compiled.params(), &[SqlValue::Int(5)]);
}

#[test]
fn compound_filter_keeps_grouping_and_value_order() {
    let a = DeclaredField::new("a");
    let b = DeclaredField::new("b");
    let cond = Condition::and(vec![
        a.equals(1),
        Condition::or(vec![b.equals(2), b.equals(3)]),
    ]);
    let compiled = compile_condition(&cond).unwrap();
    assert_eq!(compiled.to_sql(), "( a = ? AND ( b = ? OR b = ? ) )");
    assert_eq!(
        compiled.params(),
        &[SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
    );
}

#[test]
fn left_join() {
    let join = Join::left(
        Orders::table_component(None),
        &Users::primary_key_field(),
        &Orders::field("user_id"),
    );
    let compiled = compile(&join.into()).unwrap();
    assert_eq!(
        compiled.to_sql(),
        "LEFT JOIN orders ON users.id = orders.user_id"
    );
}

#[test]
fn limit_precedes_offset_whatever_the_call_order() {
    let a = compile(&base_select().with_limit(10).with_offset(20).into()).unwrap();
    let b = compile(&base_select().with_offset(20).with_limit(10).into()).unwrap();
    assert_eq!(a, b);
    assert!(a.to_sql().ends_with("LIMIT 10 OFFSET 20"));
}

#[test]
fn optional_clauses_are_omitted() {
    let compiled = compile(&base_select().with_offset(5).into()).unwrap();
    let sql = compiled.to_sql();
    for keyword in ["WHERE", "GROUP BY", "HAVING", "ORDER BY", "LIMIT"] {
        assert!(!sql.contains(keyword), "{keyword} leaked into {sql}");
    }
    assert!(sql.ends_with("OFFSET 5"));
}

#[test]
fn full_select_keyword_order() {
    let id = Users::primary_key_field();
    let total = Orders::field("total");
    let select = Select::new(
        vec![id.column(true), QueryComponent::sql("SUM(orders.total)")],
        Users::table_component(Some("u")),
    )
    .with_join(Join::inner(
        Orders::table_component(None),
        &id,
        &Orders::field("user_id"),
    ))
    .with_filter(total.greater_than(0))
    .with_group_by(vec![id.column(false)])
    .with_having(QueryComponent::sql("SUM(orders.total) > 100"))
    .with_order(Order::desc(&id))
    .with_limit(5)
    .with_offset(10);

    let compiled = compile(&select.into()).unwrap();
    let tokens = compiled.tokens();
    let position = |kw: &str| tokens.iter().position(|t| t == kw).unwrap();
    let order = [
        "SELECT", "FROM", "JOIN", "WHERE", "GROUP BY", "HAVING", "ORDER BY", "LIMIT 5",
        "OFFSET 10",
    ];
    let positions: Vec<usize> = order.iter().map(|kw| position(*kw)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert_eq!(
        compiled.to_sql(),
        "SELECT users.id AS users__id , SUM(orders.total) FROM users AS u \
         INNER JOIN orders ON users.id = orders.user_id WHERE orders.total > ? \
         GROUP BY users.id HAVING SUM(orders.total) > 100 ORDER BY users.id DESC \
         LIMIT 5 OFFSET 10"
    );
}

#[test]
fn subquery_in_from_threads_params_in_order() {
    let id = Users::primary_key_field();
    let inner = Select::new(vec![id.column(false)], Users::table_component(None))
        .with_filter(id.greater_than(10));
    let outer = Select::new(
        vec![QueryComponent::sql("t.id")],
        QueryComponent::subquery(inner, Some("t")),
    )
    .with_filter(DeclaredField::qualified("t", "id").contained_in([11, 12]));

    let compiled = compile(&outer.into()).unwrap();
    assert_eq!(
        compiled.to_sql(),
        "SELECT t.id FROM ( SELECT users.id FROM users WHERE users.id > ? ) AS t \
         WHERE t.id IN ( ? , ? )"
    );
    assert_eq!(
        compiled.params(),
        &[SqlValue::Int(10), SqlValue::Int(11), SqlValue::Int(12)]
    );
    assert_eq!(placeholder_count(&compiled), compiled.params().len());
}

#[test]
fn compilation_is_deterministic() {
    let select = base_select()
        .with_filter(Condition::or(vec![
            Users::field("name").like("a%"),
            !Users::field("name").is_null(),
        ]))
        .with_limit(3);
    let tree: QueryComponent = select.into();
    let first = compile(&tree).unwrap();
    let second = compile(&tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shared_compiler_across_threads() {
    let compiler = Compiler::new(CompilerConfig::new().with_placeholder(PlaceholderStyle::Numbered));
    let tree: QueryComponent = base_select()
        .with_filter(Users::primary_key_field().equals(1))
        .into();
    let expected = compiler.compile(&tree).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| compiler.compile(&tree).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert!(expected.to_sql().ends_with("WHERE users.id = $1"));
}

#[test]
fn misplaced_limit_fails_instead_of_dropping_the_filter() {
    let select = base_select().with_filter(QueryComponent::limit(1));
    let err = compile(&select.into()).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(
        err.to_string(),
        "Malformed query tree: limit fragment is not allowed as a WHERE filter"
    );
}

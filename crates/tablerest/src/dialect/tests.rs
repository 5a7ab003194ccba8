//! Cross-dialect rendering tests.

use super::*;
use crate::finder::DynamicFinder;

fn users() -> Table {
    Table::new("users").unwrap()
}

fn demo_users() -> Table {
    users().with_schema("demo").unwrap()
}

fn render(kind: DialectKind, select: &Select) -> Statement {
    dialect_for(kind).render_select(select).unwrap()
}

// ==================== SELECT ====================

#[test]
fn generic_select_all() {
    let stmt = render(DialectKind::Generic, &Select::new(demo_users()));
    assert_eq!(stmt.sql, "SELECT t.* FROM demo.users t");
    assert!(stmt.params.is_empty());
}

#[test]
fn generic_paginates_with_window_defaulting_to_primary_key() {
    let select = Select::new(demo_users()).limit(LimitParam::default());
    assert_eq!(
        render(DialectKind::Generic, &select).sql,
        "SELECT * FROM ( SELECT ROW_NUMBER() OVER ( ORDER BY t.id ASC ) AS ROW_NUMBER, t.* \
         FROM demo.users t ) WHERE ROW_NUMBER BETWEEN 1 AND 25"
    );
}

#[test]
fn window_uses_custom_primary_key() {
    let table = Table::new("cars").unwrap().with_primary_key("cid").unwrap();
    let select = Select::new(table).limit(LimitParam::new(5, 0));
    assert!(
        render(DialectKind::Oracle, &select)
            .sql
            .contains("ORDER BY cars.cid ASC")
    );
}

#[test]
fn mssql_window_has_derived_alias() {
    let select = Select::new(demo_users())
        .and(SelectCondition::eq("name", "bob").unwrap())
        .order(OrderParam::desc("name").unwrap())
        .limit(LimitParam::new(10, 10));
    let stmt = render(DialectKind::MsSql, &select);
    assert_eq!(
        stmt.sql,
        "SELECT * FROM ( SELECT ROW_NUMBER() OVER ( ORDER BY t.name DESC ) AS ROW_NUMBER, t.* \
         FROM demo.users t WHERE t.name = ? ) AS paged WHERE ROW_NUMBER BETWEEN 11 AND 20"
    );
    assert_eq!(stmt.params, ["bob"]);
}

#[test]
fn oracle_qualifies_with_table_name() {
    let select = Select::new(demo_users())
        .columns(["id", "name"])
        .unwrap()
        .limit(LimitParam::new(10, 0));
    assert_eq!(
        render(DialectKind::Oracle, &select).sql,
        "SELECT * FROM ( SELECT ROW_NUMBER() OVER ( ORDER BY users.id ASC ) AS ROW_NUMBER, \
         users.id,users.name FROM demo.users ) WHERE ROW_NUMBER BETWEEN 1 AND 10"
    );
}

#[test]
fn postgres_limit_offset_with_order() {
    let select = Select::new(demo_users())
        .and(SelectCondition::new("age", Operator::GreaterThan, vec!["30".into()]).unwrap())
        .order(OrderParam::desc("age").unwrap())
        .limit(LimitParam::new(10, 20));
    let stmt = render(DialectKind::PostgreSql, &select);
    assert_eq!(
        stmt.sql,
        "SELECT t.* FROM demo.users t WHERE t.age > ? ORDER BY t.age DESC LIMIT 10 OFFSET 20"
    );
    assert_eq!(stmt.params, ["30"]);
}

#[test]
fn offset_families_do_not_invent_an_order() {
    let select = Select::new(demo_users()).limit(LimitParam::new(10, 20));
    assert_eq!(
        render(DialectKind::MySql, &select).sql,
        "SELECT t.* FROM demo.users t LIMIT 20,10"
    );
    assert_eq!(
        render(DialectKind::Derby, &select).sql,
        "SELECT t.* FROM demo.users t OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
    assert_eq!(
        render(DialectKind::PostgreSql, &select).sql,
        "SELECT t.* FROM demo.users t LIMIT 10 OFFSET 20"
    );
}

#[test]
fn hsql_and_h2_use_bare_names() {
    let select = Select::new(demo_users())
        .columns(["id", "name"])
        .unwrap()
        .and(SelectCondition::is_null("email").unwrap())
        .limit(LimitParam::new(10, 20));
    for kind in [DialectKind::Hsql, DialectKind::H2] {
        let stmt = render(kind, &select);
        assert_eq!(
            stmt.sql,
            "SELECT id,name FROM users WHERE email IS NULL LIMIT 10 OFFSET 20",
            "{kind}"
        );
        assert!(stmt.params.is_empty());
    }
}

#[test]
fn between_binds_two_values() {
    let select = Select::new(users()).and(SelectCondition::between("age", "18", "65").unwrap());
    let stmt = render(DialectKind::Generic, &select);
    assert_eq!(stmt.sql, "SELECT t.* FROM users t WHERE t.age BETWEEN ? AND ?");
    assert_eq!(stmt.params, ["18", "65"]);
}

#[test]
fn ilike_is_native_or_lowered() {
    let select = Select::new(users())
        .and(SelectCondition::new("name", Operator::ILike, vec!["%al%".into()]).unwrap());

    assert_eq!(
        render(DialectKind::PostgreSql, &select).sql,
        "SELECT t.* FROM users t WHERE t.name ILIKE ?"
    );
    assert_eq!(
        render(DialectKind::H2, &select).sql,
        "SELECT * FROM users WHERE name ILIKE ?"
    );
    let stmt = render(DialectKind::MySql, &select);
    assert_eq!(
        stmt.sql,
        "SELECT t.* FROM users t WHERE LOWER(t.name) LIKE LOWER(?)"
    );
    assert_eq!(stmt.params, ["%al%"]);
}

#[test]
fn not_negates_equality() {
    let select = Select::new(users())
        .and(SelectCondition::new("name", Operator::Not, vec!["bob".into()]).unwrap())
        .and(SelectCondition::eq("age", "30").unwrap());

    let stmt = render(DialectKind::PostgreSql, &select);
    assert_eq!(
        stmt.sql,
        "SELECT t.* FROM users t WHERE NOT (t.name = ?) AND t.age = ?"
    );
    assert_eq!(stmt.params, ["bob", "30"]);
    assert_eq!(
        render(DialectKind::Hsql, &select).sql,
        "SELECT * FROM users WHERE NOT (name = ?) AND age = ?"
    );
}

#[test]
fn count_ignores_order_and_paging() {
    let select = Select::new(demo_users())
        .and(SelectCondition::eq("name", "bob").unwrap())
        .order(OrderParam::asc("name").unwrap())
        .limit(LimitParam::new(10, 20));
    let stmt = dialect_for(DialectKind::PostgreSql)
        .render_count(&select)
        .unwrap();
    assert_eq!(stmt.sql, "SELECT COUNT(*) FROM demo.users t WHERE t.name = ?");
    assert_eq!(stmt.params, ["bob"]);
}

#[test]
fn window_always_orders() {
    let select = Select::new(users()).limit(LimitParam::default());
    for kind in DialectKind::ALL {
        let dialect = dialect_for(kind);
        if matches!(dialect.paging(), Paging::RowNumber { .. }) {
            assert!(render(kind, &select).sql.contains(" ORDER BY "), "{kind}");
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let select = Select::new(demo_users())
        .columns(["id", "name"])
        .unwrap()
        .and(SelectCondition::eq("name", "x").unwrap())
        .order(OrderParam::desc("id").unwrap())
        .limit(LimitParam::new(5, 5));
    for kind in DialectKind::ALL {
        assert_eq!(render(kind, &select), render(kind, &select), "{kind}");
    }
}

// ==================== Finder ====================

#[test]
fn finder_joins_clauses_in_order() {
    let finder =
        DynamicFinder::parse(users(), "findAllByNameAndAgeGreaterThan", &["bar", "30"]).unwrap();
    let stmt = dialect_for(DialectKind::PostgreSql)
        .render_finder(&finder, &LimitParam::default(), &OrderParam::asc("id").unwrap())
        .unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT t.* FROM users t WHERE t.name = ? AND t.age > ? ORDER BY t.id ASC LIMIT 25 OFFSET 0"
    );
    assert_eq!(stmt.params, ["bar", "30"]);
}

#[test]
fn finder_where_lands_inside_window() {
    let finder = DynamicFinder::parse(users(), "findByAgeBetween", &["1", "9"]).unwrap();
    let stmt = dialect_for(DialectKind::Generic)
        .render_finder(
            &finder,
            &LimitParam::new(10, 0),
            &OrderParam::desc("age").unwrap(),
        )
        .unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT * FROM ( SELECT ROW_NUMBER() OVER ( ORDER BY t.age DESC ) AS ROW_NUMBER, t.* \
         FROM users t WHERE t.age BETWEEN ? AND ? ) WHERE ROW_NUMBER BETWEEN 1 AND 10"
    );
    assert_eq!(stmt.params, ["1", "9"]);
}

// ==================== Mutations ====================

#[test]
fn insert_target_per_family() {
    let insert = Insert::from_pairs(demo_users(), [("name", "alice"), ("age", "30")]).unwrap();

    let generic = dialect_for(DialectKind::Generic)
        .render_insert(&insert)
        .unwrap();
    assert_eq!(generic.sql, "INSERT INTO users (name,age) VALUES (?,?)");
    assert_eq!(generic.params, ["alice", "30"]);

    let pg = dialect_for(DialectKind::PostgreSql)
        .render_insert(&insert)
        .unwrap();
    assert_eq!(pg.sql, "INSERT INTO demo.users (name,age) VALUES (?,?)");
}

#[test]
fn h2_update_qualifies_columns() {
    let update = Update::from_pairs(demo_users(), "7", [("name", "a"), ("age", "3")]).unwrap();
    let stmt = dialect_for(DialectKind::H2).render_update(&update).unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE demo.users SET users.name=?,users.age=? WHERE users.id=?"
    );
    assert_eq!(stmt.params, ["a", "3", "7"]);
}

#[test]
fn update_binds_primary_key_last() {
    let table = Table::new("cars").unwrap().with_primary_key("cid").unwrap();
    let update = Update::new(table, "42").set("model", "T").unwrap();
    let stmt = dialect_for(DialectKind::MsSql).render_update(&update).unwrap();
    assert_eq!(stmt.sql, "UPDATE cars SET model=? WHERE cid=?");
    assert_eq!(stmt.params, ["T", "42"]);
}

#[test]
fn delete_per_family() {
    let delete = Delete::new(demo_users(), "7");
    assert_eq!(
        dialect_for(DialectKind::Oracle)
            .render_delete(&delete)
            .unwrap()
            .sql,
        "DELETE FROM demo.users WHERE users.id=?"
    );
    let stmt = dialect_for(DialectKind::MsSql)
        .render_delete(&delete)
        .unwrap();
    assert_eq!(stmt.sql, "DELETE FROM users WHERE id=?");
    assert_eq!(stmt.params, ["7"]);
}

#[test]
fn mutations_reject_incomplete_statements() {
    for kind in DialectKind::ALL {
        let d = dialect_for(kind);

        let err = d.render_insert(&Insert::new(users())).unwrap_err();
        assert!(err.is_invalid_request(), "{kind}");

        let no_id = Update::without_id(users()).set("name", "x").unwrap();
        assert!(d.render_update(&no_id).unwrap_err().is_invalid_request());

        let no_columns = Update::new(users(), "1");
        assert!(d.render_update(&no_columns).unwrap_err().is_invalid_request());

        let blank = Delete::new(users(), " ");
        assert!(d.render_delete(&blank).unwrap_err().is_invalid_request());
        assert!(
            d.render_delete(&Delete::without_id(users()))
                .unwrap_err()
                .is_invalid_request()
        );
    }
}

#[test]
fn mutation_errors_name_the_resource() {
    let err = dialect_for(DialectKind::Generic)
        .render_delete(&Delete::without_id(users()))
        .unwrap_err();
    assert_eq!(
        err,
        RestError::invalid_request_on("users", "Missing value for primary key id")
    );
}

// ==================== Stored procedures ====================

#[test]
fn call_binds_arguments_in_order() {
    let call = Call::new("refresh_totals", ["2024", "eu"]).unwrap();
    for kind in DialectKind::ALL {
        let stmt = dialect_for(kind).render_call(&call).unwrap();
        assert_eq!(stmt.sql, "{CALL refresh_totals(?,?)}", "{kind}");
        assert_eq!(stmt.params, ["2024", "eu"], "{kind}");
    }
}

#[test]
fn call_without_arguments() {
    let call = Call::new("nightly", Vec::<String>::new()).unwrap();
    let stmt = dialect_for(DialectKind::Oracle).render_call(&call).unwrap();
    assert_eq!(stmt.sql, "{CALL nightly()}");
    assert!(stmt.params.is_empty());
}

// ==================== Registry ====================

#[test]
fn driver_tags_resolve() {
    let cases = [
        ("postgresql", DialectKind::PostgreSql),
        ("Postgres", DialectKind::PostgreSql),
        ("mariadb", DialectKind::MySql),
        ("MSSQL_JTDS", DialectKind::MsSql),
        ("hsqldb_mem", DialectKind::Hsql),
        ("h2_remote", DialectKind::H2),
        ("derby_mem", DialectKind::Derby),
        ("oracle", DialectKind::Oracle),
        ("ansi", DialectKind::Generic),
    ];
    for (tag, kind) in cases {
        assert_eq!(DialectKind::from_driver_tag(tag).unwrap(), kind, "{tag}");
    }
    assert!(matches!(
        "sqlite".parse::<DialectKind>(),
        Err(RestError::InvalidConfiguration(_))
    ));
}

#[test]
fn registry_returns_matching_kind() {
    for kind in DialectKind::ALL {
        let d = dialect_for(kind);
        assert_eq!(d.kind(), kind);
        assert!(!d.list_tables_statement().is_empty());
        assert_eq!(DialectKind::from_driver_tag(kind.name()).unwrap(), kind);
    }
}

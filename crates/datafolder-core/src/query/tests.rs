use arrow::datatypes::DataType;
use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{schema, table::Column};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn users() -> Result<Table, Box<dyn std::error::Error>> {
    Ok(Table::new(
        "users",
        vec![
            Column::new("id", DataType::Int64),
            Column::new("name", DataType::Utf8),
        ],
        vec![
            vec![Value::Int(1), Value::from("a")],
            vec![Value::Int(2), Value::from("b")],
            vec![Value::Int(3), Value::from("c")],
        ],
    )?)
}

/// `id, team, score, active` with repeated teams and scores for stability
/// checks; one null score.
fn players() -> Result<Table, Box<dyn std::error::Error>> {
    let rows = [
        (1, "red", Some(5.0), true),
        (2, "blue", Some(7.5), false),
        (3, "red", None, true),
        (4, "blue", Some(5.0), true),
        (5, "green", Some(7.5), false),
        (6, "red", Some(1.0), false),
    ];
    Ok(Table::new(
        "players",
        vec![
            Column::new("id", DataType::Int64),
            Column::new("team", DataType::Utf8),
            Column::new("score", DataType::Float64),
            Column::new("active", DataType::Boolean),
        ],
        rows.iter()
            .map(|(id, team, score, active)| {
                vec![
                    Value::Int(*id),
                    Value::from(*team),
                    Value::from(*score),
                    Value::Bool(*active),
                ]
            })
            .collect(),
    )?)
}

fn ids(rows: &[&Row]) -> Vec<i64> {
    rows.iter()
        .filter_map(|r| match r.get(0) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        })
        .collect()
}

#[test]
fn users_scenario() -> TestResult {
    let table = users()?;
    let schema = schema::infer(&table);

    let rows = list(&table, &schema, &QuerySpec::default().with_filter("name", "b"));
    assert_eq!(ids(&rows), vec![2]);

    let row = get_by_id(&table, "2")?;
    assert_eq!(row.values(), &[Value::Int(2), Value::from("b")]);

    let err = get_by_id(&table, "9").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::NotFound);

    let spec = QuerySpec::from_params([("_sort", "-id"), ("_limit", "1")]);
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![3]);
    Ok(())
}

#[test]
fn empty_table_scenario() -> TestResult {
    let table = Table::empty("nothing");
    let schema = schema::infer(&table);

    let err = get_by_id(&table, "1").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::BadRequest);
    assert_eq!(err.to_string(), "no id column found");

    assert!(list(&table, &schema, &QuerySpec::default()).is_empty());
    assert!(schema.is_empty());
    Ok(())
}

#[test]
fn boolean_filter_accepts_truthy_words() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    for word in ["true", "yes", "YES", "1"] {
        let rows = list(&table, &schema, &QuerySpec::default().with_filter("active", word));
        assert_eq!(ids(&rows), vec![1, 3, 4], "filter active={word}");
    }

    let rows = list(&table, &schema, &QuerySpec::default().with_filter("active", "nope"));
    assert_eq!(ids(&rows), vec![2, 5, 6]);
    Ok(())
}

#[test]
fn filters_compose_with_and() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default()
        .with_filter("team", "red")
        .with_filter("active", "true");
    let rows = list(&table, &schema, &spec);
    assert_eq!(ids(&rows), vec![1, 3]);

    for row in &rows {
        assert_eq!(row.get(1), Some(&Value::from("red")));
        assert_eq!(row.get(3), Some(&Value::Bool(true)));
    }
    Ok(())
}

#[test]
fn number_filter_coerces_text() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let rows = list(&table, &schema, &QuerySpec::default().with_filter("score", "7.5"));
    assert_eq!(ids(&rows), vec![2, 5]);

    let rows = list(&table, &schema, &QuerySpec::default().with_filter("score", "5"));
    assert_eq!(ids(&rows), vec![1, 4]);
    Ok(())
}

#[test]
fn uncoercible_filter_matches_nothing() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let rows = list(&table, &schema, &QuerySpec::default().with_filter("id", "abc"));
    assert!(rows.is_empty());

    let rows = list(&table, &schema, &QuerySpec::default().with_filter("score", "high"));
    assert!(rows.is_empty());
    Ok(())
}

#[test]
fn unknown_filter_columns_are_ignored() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default()
        .with_filter("nickname", "zed")
        .with_filter("team", "blue");
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![2, 4]);
    Ok(())
}

#[test]
fn string_filter_is_exact() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    assert!(list(&table, &schema, &QuerySpec::default().with_filter("team", "re")).is_empty());
    assert!(list(&table, &schema, &QuerySpec::default().with_filter("team", "RED")).is_empty());
    Ok(())
}

#[test]
fn no_filter_full_page_returns_table_order() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default().with_offset(0).with_limit(table.len());
    let rows = list(&table, &schema, &spec);
    assert_eq!(rows.len(), table.len());
    assert!(rows.iter().zip(table.rows()).all(|(a, b)| std::ptr::eq(*a, b)));
    Ok(())
}

#[test]
fn sort_ascending_is_stable_with_nulls_last() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default().with_sort(SortSpec::ascending("score"));
    // 1.0, 5.0 (1 then 4), 7.5 (2 then 5), null
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![6, 1, 4, 2, 5, 3]);
    Ok(())
}

#[test]
fn sort_descending_is_stable_with_nulls_last() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default().with_sort(SortSpec::descending("score"));
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![2, 5, 1, 4, 6, 3]);

    let spec = QuerySpec::default().with_sort(SortSpec::descending("team"));
    // red (1, 3, 6), green (5), blue (2, 4)
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![1, 3, 6, 5, 2, 4]);
    Ok(())
}

#[test]
fn sort_on_unknown_column_is_noop() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default().with_sort(SortSpec::descending("height"));
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![1, 2, 3, 4, 5, 6]);
    Ok(())
}

#[test]
fn pagination_applies_after_filter_and_sort() -> TestResult {
    let table = players()?;
    let schema = schema::infer(&table);

    let spec = QuerySpec::default()
        .with_filter("active", "false")
        .with_sort(SortSpec::descending("id"))
        .with_offset(1)
        .with_limit(1);
    assert_eq!(ids(&list(&table, &schema, &spec)), vec![5]);

    let spec = QuerySpec::default().with_offset(100);
    assert!(list(&table, &schema, &spec).is_empty());

    let spec = QuerySpec::default().with_limit(0);
    assert!(list(&table, &schema, &spec).is_empty());
    Ok(())
}

#[test]
fn get_by_id_round_trips_every_row() -> TestResult {
    let table = players()?;
    for row in table.rows() {
        let Some(Value::Int(id)) = row.get(0) else {
            return Err("id column is not integral".into());
        };
        assert!(std::ptr::eq(get_by_id(&table, &id.to_string())?, row));
    }
    Ok(())
}

#[test]
fn get_by_id_text_key_never_matches_integer_ids() -> TestResult {
    let table = users()?;
    for id in ["abc", "2.0", "", "b"] {
        let err = get_by_id(&table, id).unwrap_err();
        assert_eq!(err.kind(), QueryErrorKind::NotFound, "id={id:?}");
    }
    Ok(())
}

#[test]
fn get_by_id_falls_back_to_first_column() -> TestResult {
    let table = Table::new(
        "codes",
        vec![
            Column::new("code", DataType::Utf8),
            Column::new("label", DataType::Utf8),
        ],
        vec![
            vec![Value::from("A1"), Value::from("first")],
            vec![Value::from("B2"), Value::from("second")],
        ],
    )?;

    assert_eq!(id_column(&table), Some(0));
    let row = get_by_id(&table, "B2")?;
    assert_eq!(row.get(1), Some(&Value::from("second")));

    let err = get_by_id(&table, "b2").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::NotFound);
    Ok(())
}

#[test]
fn get_by_id_prefers_id_column_over_position() -> TestResult {
    let table = Table::new(
        "t",
        vec![
            Column::new("rank", DataType::Int64),
            Column::new("id", DataType::Int64),
        ],
        vec![
            vec![Value::Int(7), Value::Int(1)],
            vec![Value::Int(1), Value::Int(7)],
        ],
    )?;

    let row = get_by_id(&table, "7")?;
    assert_eq!(row.values(), &[Value::Int(1), Value::Int(7)]);
    Ok(())
}

#[test]
fn numeric_looking_string_ids_do_not_match() -> TestResult {
    let table = Table::new(
        "agents",
        vec![Column::new("id", DataType::Utf8)],
        vec![vec![Value::from("007")], vec![Value::from("7")]],
    )?;

    // "007" parses as 7 and is compared numerically against text cells.
    let err = get_by_id(&table, "007").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::NotFound);
    Ok(())
}

#[test]
fn get_by_id_matches_float_ids_numerically() -> TestResult {
    let table = Table::new(
        "f",
        vec![Column::new("id", DataType::Float64)],
        vec![vec![Value::Float(1.0)], vec![Value::Float(2.0)]],
    )?;

    let row = get_by_id(&table, "2")?;
    assert_eq!(row.get(0), Some(&Value::Float(2.0)));
    Ok(())
}

#[test]
fn get_by_id_returns_first_duplicate() -> TestResult {
    let table = Table::new(
        "dups",
        vec![
            Column::new("id", DataType::Int64),
            Column::new("v", DataType::Utf8),
        ],
        vec![
            vec![Value::Int(1), Value::from("first")],
            vec![Value::Int(1), Value::from("second")],
        ],
    )?;

    assert_eq!(get_by_id(&table, "1")?.get(1), Some(&Value::from("first")));
    Ok(())
}

#[test]
fn sample_larger_than_table_returns_every_row_once() -> TestResult {
    let table = players()?;
    let mut rng = StdRng::seed_from_u64(7);

    let rows = sample(&table, 50, &mut rng);
    assert_eq!(rows.len(), table.len());

    let mut seen = ids(&rows);
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    Ok(())
}

#[test]
fn sample_draws_distinct_rows() -> TestResult {
    let table = players()?;
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let mut drawn = ids(&sample(&table, 3, &mut rng));
        assert_eq!(drawn.len(), 3);
        drawn.sort_unstable();
        drawn.dedup();
        assert_eq!(drawn.len(), 3);
    }
    Ok(())
}

#[test]
fn sample_is_reproducible_with_a_seeded_source() -> TestResult {
    let table = players()?;
    let a = ids(&sample(&table, 4, &mut StdRng::seed_from_u64(9)));
    let b = ids(&sample(&table, 4, &mut StdRng::seed_from_u64(9)));
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn sample_non_positive_is_empty() -> TestResult {
    let table = players()?;
    let mut rng = StdRng::seed_from_u64(1);
    assert!(sample(&table, 0, &mut rng).is_empty());
    assert!(sample(&table, -3, &mut rng).is_empty());
    assert!(sample(&Table::empty("e"), 10, &mut rng).is_empty());
    Ok(())
}

#[test]
fn schema_returns_cached_inference() -> TestResult {
    let resource = Resource::new(players()?);
    let cached = schema(&resource);
    assert!(std::ptr::eq(cached, resource.schema()));
    assert_eq!(cached.get("score"), Some(crate::schema::ColumnType::Number));
    Ok(())
}

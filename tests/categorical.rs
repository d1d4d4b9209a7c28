mod common;

use common::{TestWorkspace, numbers, texts};
use csv_cleanse::{
    CleanError, Column, ColumnKind, Table,
    categorical::{apply_rules, clean_categorical},
    rules::{CleaningRules, ColumnRule, NumericCoercion},
};

fn owned(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

#[test]
fn gender_variants_collapse_to_single_letters() {
    let table = Table::new(vec![Column::text(
        "gender",
        &[Some("Female"), Some("male"), Some("Femal"), Some("X")],
    )])
    .expect("table");
    let cleaned = clean_categorical(table).expect("clean");
    assert_eq!(
        texts(&cleaned, "gender"),
        owned(&[Some("F"), Some("M"), Some("F"), Some("X")])
    );
}

#[test]
fn education_state_and_vehicle_class_tables_apply() {
    let table = Table::new(vec![
        Column::text("education", &[Some("Bachelors"), Some("Master"), None]),
        Column::text("state", &[Some("AZ"), Some("Cali"), Some("WA")]),
        Column::text(
            "vehicle_class",
            &[Some("Sports Car"), Some("Luxury SUV"), Some("SUV")],
        ),
    ])
    .expect("table");
    let cleaned = clean_categorical(table).expect("clean");
    assert_eq!(
        texts(&cleaned, "education"),
        owned(&[Some("Bachelor"), Some("Master"), None])
    );
    assert_eq!(
        texts(&cleaned, "state"),
        owned(&[Some("Arizona"), Some("California"), Some("Washington")])
    );
    assert_eq!(
        texts(&cleaned, "vehicle_class"),
        owned(&[Some("Luxury"), Some("Luxury"), Some("SUV")])
    );
}

#[test]
fn substitution_is_case_and_whitespace_sensitive() {
    let table = Table::new(vec![Column::text(
        "gender",
        &[Some("FEMALE"), Some(" Male"), Some("Femal ")],
    )])
    .expect("table");
    let cleaned = clean_categorical(table).expect("clean");
    assert_eq!(
        texts(&cleaned, "gender"),
        owned(&[Some("FEMALE"), Some(" Male"), Some("Femal ")])
    );
}

#[test]
fn absent_target_columns_are_skipped() {
    let table = Table::new(vec![Column::text("city", &[Some("AZ")])]).expect("table");
    let cleaned = clean_categorical(table.clone()).expect("clean");
    assert_eq!(cleaned, table);
}

#[test]
fn lifetime_value_percent_is_stripped() {
    let table = Table::new(vec![Column::text(
        "customer_lifetime_value",
        &[Some("897.2%"), None, Some("1000")],
    )])
    .expect("table");
    let cleaned = clean_categorical(table).expect("clean");
    let column = cleaned.column("customer_lifetime_value").expect("column");
    assert_eq!(column.kind, ColumnKind::Numeric);
    assert_eq!(
        numbers(&cleaned, "customer_lifetime_value"),
        vec![Some(897.2), None, Some(1000.0)]
    );
}

#[test]
fn lifetime_value_garbage_is_coercion_error() {
    let table = Table::new(vec![Column::text(
        "customer_lifetime_value",
        &[Some("12%"), Some("lots%")],
    )])
    .expect("table");
    let err = clean_categorical(table).unwrap_err();
    match err {
        CleanError::ValueCoercion { column, row, value } => {
            assert_eq!(column, "customer_lifetime_value");
            assert_eq!(row, 1);
            assert_eq!(value, "lots%");
        }
        other => panic!("expected coercion error, got {other:?}"),
    }
}

#[test]
fn numeric_lifetime_value_passes_through() {
    let table = Table::new(vec![Column::numeric(
        "customer_lifetime_value",
        &[Some(5.5), None],
    )])
    .expect("table");
    let cleaned = clean_categorical(table).expect("clean");
    assert_eq!(
        numbers(&cleaned, "customer_lifetime_value"),
        vec![Some(5.5), None]
    );
}

#[test]
fn custom_rules_load_from_yaml() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "rules.yml",
        "replacements:\n  - column: tier\n    replace:\n      - from: gold\n        to: Gold\ncoercions:\n  - column: discount\n    strip: \"%$\"\n",
    );
    let rules = CleaningRules::load(&path).expect("load rules");
    assert_eq!(
        rules.replacements,
        vec![ColumnRule::new("tier", &[("gold", "Gold")])]
    );
    assert_eq!(
        rules.coercions,
        vec![NumericCoercion {
            column: "discount".to_string(),
            strip: "%$".to_string(),
        }]
    );

    let table = Table::new(vec![
        Column::text("tier", &[Some("gold"), Some("silver")]),
        Column::text("discount", &[Some("$5%"), Some("10")]),
    ])
    .expect("table");
    let cleaned = apply_rules(table, &rules).expect("apply");
    assert_eq!(texts(&cleaned, "tier"), owned(&[Some("Gold"), Some("silver")]));
    assert_eq!(numbers(&cleaned, "discount"), vec![Some(5.0), Some(10.0)]);
}

#[test]
fn malformed_rules_file_is_configuration_error() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("rules.yml", "replacements: [oops\n");
    let err = CleaningRules::load(&path).unwrap_err();
    assert_eq!(err.kind(), "ConfigurationError");
}

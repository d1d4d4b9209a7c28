use csv_cleanse::{
    Column, Table,
    columns::{clean_column_names, normalize_column_name},
};
use proptest::prelude::*;

fn table_with_headers(names: &[&str]) -> Table {
    Table::new(
        names
            .iter()
            .map(|name| Column::numeric(name, &[Some(1.0)]))
            .collect(),
    )
    .expect("table")
}

#[test]
fn first_name_maps_to_firstate_name() {
    assert_eq!(normalize_column_name("First Name"), "firstate_name");
}

#[test]
fn clean_column_names_preserves_order() {
    let table = table_with_headers(&["Customer", "ST", "GENDER", "Vehicle Class", "Income"]);
    let cleaned = clean_column_names(table);
    assert_eq!(
        cleaned.headers(),
        vec!["custateomer", "state", "gender", "vehicle_class", "income"]
    );
}

#[test]
fn every_space_becomes_an_underscore() {
    assert_eq!(
        normalize_column_name("Number of Open Complaints"),
        "number_of_open_complaints"
    );
    assert_eq!(normalize_column_name(" lead  space"), "_lead__space");
}

#[test]
fn empty_table_stays_empty() {
    let cleaned = clean_column_names(Table::default());
    assert!(cleaned.headers().is_empty());
}

proptest! {
    #[test]
    fn normalization_is_idempotent(names in proptest::collection::vec("[A-Za-z _]{0,12}", 0..6)) {
        let refs = names.iter().map(String::as_str).collect::<Vec<_>>();
        let once = clean_column_names(table_with_headers(&refs));
        let once_headers = once.headers();
        let twice = clean_column_names(once);
        prop_assert_eq!(twice.headers(), once_headers);
    }

    #[test]
    fn normalized_names_have_no_spaces_or_uppercase(name in "[A-Za-z0-9 ]{0,16}") {
        let normalized = normalize_column_name(&name);
        prop_assert!(!normalized.contains(' '));
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_uppercase()));
    }
}

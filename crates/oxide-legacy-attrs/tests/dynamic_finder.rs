//! Dynamic finders and persistence against an in-memory SQLite database.

mod common;

use oxide_legacy_attrs::{
    LegacyError, Manager, ModelClass, Q, Record, Settings, TableSchema, ToValue, Transform, Value,
};
use std::sync::Arc;

use common::{bill, create_fixtures, create_test_pool, people_schema, person};

#[tokio::test]
async fn test_find_by_alias() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let bills = Manager::new(&bill());
    let found = bills
        .dynamic_find(&pool, "find_by_is_late", &[true.to_value()])
        .await
        .unwrap()
        .into_first()
        .expect("a late bill");

    assert_eq!(found.get("is_late").unwrap(), Value::Bool(true));
    assert_eq!(found.before_type_cast("is_late").unwrap(), Value::Int(1));
    assert_eq!(found.get("from").unwrap(), "Adelitas".to_value());
    assert!(!found.is_new_record());
}

#[tokio::test]
async fn test_find_by_alias_and_skipped_real_name() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let people = Manager::new(&person());
    let found = people
        .dynamic_find(
            &pool,
            "find_by_first_name_and_last_name_and_SSN",
            &["G.".to_value(), "Code".to_value(), 123_123_i64.to_value()],
        )
        .await
        .unwrap()
        .into_first()
        .expect("person G. Code");

    assert_eq!(found.get("last_name").unwrap(), "Code".to_value());
    assert_eq!(found.get("first_name").unwrap(), "G.".to_value());
    assert_eq!(found.get("SSN").unwrap(), Value::Int(123_123));
}

#[tokio::test]
async fn test_find_all_and_last() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let people = Manager::new(&person());
    let all = people
        .dynamic_find(&pool, "find_all_by_first_name", &["G.".to_value()])
        .await
        .unwrap()
        .into_vec();
    assert_eq!(all.len(), 2);

    let last = people
        .dynamic_find(&pool, "find_last_by_first_name", &["G.".to_value()])
        .await
        .unwrap()
        .into_first()
        .unwrap();
    assert_eq!(last.get("last_name").unwrap(), "Mercer".to_value());
}

#[tokio::test]
async fn test_find_by_returns_none_without_match() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let found = Manager::new(&person())
        .dynamic_find(&pool, "find_by_last_name", &["Nobody".to_value()])
        .await
        .unwrap();
    assert!(found.into_first().is_none());
}

#[tokio::test]
async fn test_find_by_null_argument() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let people = Manager::new(&person());
    people
        .create(&pool, [("SSN", 789_789_i64.to_value()), ("first_name", "Solo".to_value())])
        .await
        .unwrap();

    let found = people
        .dynamic_find(&pool, "find_by_last_name", &[Value::Null])
        .await
        .unwrap()
        .into_first()
        .unwrap();
    assert_eq!(found.get("first_name").unwrap(), "Solo".to_value());
}

#[tokio::test]
async fn test_unknown_finder_attribute() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let people = Manager::new(&person());
    let err = people
        .dynamic_find(&pool, "find_by_dob", &["1970-1-1".to_value()])
        .await
        .unwrap_err();
    assert!(matches!(err, LegacyError::UnknownMethod { ref method, .. } if method == "find_by_dob"));

    let err = people
        .dynamic_find(&pool, "lookup_first_name", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, LegacyError::InvalidFinder(_)));
}

#[tokio::test]
async fn test_find_or_initialize_and_create() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let bills = Manager::new(&bill());
    let initialized = bills
        .dynamic_find(&pool, "find_or_initialize_by_from", &["Honda".to_value()])
        .await
        .unwrap()
        .into_first()
        .unwrap();
    assert!(initialized.is_new_record());
    assert_eq!(initialized.get("from").unwrap(), "Honda".to_value());
    assert_eq!(bills.all(&pool).await.unwrap().len(), 3);

    let created = bills
        .dynamic_find(&pool, "find_or_create_by_from", &["Honda".to_value()])
        .await
        .unwrap()
        .into_first()
        .unwrap();
    assert!(!created.is_new_record());
    assert_eq!(created.get("id").unwrap(), Value::Int(4));
    assert_eq!(bills.all(&pool).await.unwrap().len(), 4);

    let existing = bills
        .dynamic_find(&pool, "find_or_create_by_from", &["Honda".to_value()])
        .await
        .unwrap()
        .into_first()
        .unwrap();
    assert_eq!(existing.get("id").unwrap(), Value::Int(4));
    assert_eq!(bills.all(&pool).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_with_aliases_round_trips() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let bills = Manager::new(&bill());
    let created = bills
        .create(
            &pool,
            [
                ("from", "Shiesty Home Owners Association".to_value()),
                ("amount_due", "310.75".to_value()),
                ("person_id", 123_123_i64.to_value()),
            ],
        )
        .await
        .unwrap();
    let id = created.get("id").unwrap();

    let loaded = bills
        .filter(&pool, Q::eq("id", id))
        .await
        .unwrap()
        .pop()
        .unwrap();
    assert_eq!(
        loaded.get("from").unwrap(),
        "Shiesty Home Owners Association".to_value()
    );
    assert_eq!(loaded.get("amount_due").unwrap(), Value::Float(310.75));
    assert_eq!(loaded.get("is_late").unwrap(), Value::Bool(false));
}

#[tokio::test]
async fn test_introspected_model() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let schema = TableSchema::introspect(&pool, "people").await.unwrap();
    let person = Arc::new(
        ModelClass::new("Person", schema)
            .transform_legacy_attribute_methods_with(
                Transform::new().skip(["SSN", "DOB"]),
                &Settings::new(),
            )
            .unwrap(),
    );

    let found = Manager::new(&person)
        .dynamic_find(&pool, "find_by_last_name", &["Mercer".to_value()])
        .await
        .unwrap()
        .into_first()
        .unwrap();
    assert_eq!(found.get("SSN").unwrap(), Value::Int(456_456));
    assert_eq!(found.read("first_name").unwrap(), "G.".to_value());

    let mut fresh = Record::new(&person);
    fresh.set("first_name", "New").unwrap();
    assert!(fresh.get("dob").is_err());
}

#[tokio::test]
async fn test_finder_on_aggregate_is_rejected() {
    let pool = create_test_pool().await;
    create_fixtures(&pool).await;

    let schema = people_schema().aggregate("full_name", ["FirstName", "LastName"]);
    let person = Arc::new(
        ModelClass::new("Person", schema)
            .transform_legacy_attribute_methods_with(
                Transform::new().skip(["SSN", "DOB"]),
                &Settings::new(),
            )
            .unwrap(),
    );
    assert!(person.all_attributes_exists(&["full_name"]));

    let people = Manager::new(&person);
    for method in [
        "find_by_full_name",
        "find_all_by_full_name",
        "find_or_initialize_by_full_name",
        "find_or_create_by_full_name",
    ] {
        let err = people
            .dynamic_find(&pool, method, &["full_name".to_value()])
            .await
            .unwrap_err();
        assert!(
            matches!(err, LegacyError::UnknownMethod { method: ref m, .. } if m == method),
            "{method}: {err:?}"
        );
    }

    let err = people
        .dynamic_find(
            &pool,
            "find_all_by_first_name_and_full_name",
            &["G.".to_value(), "G. Code".to_value()],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LegacyError::UnknownMethod { .. }));
    assert_eq!(people.all(&pool).await.unwrap().len(), 2);
}

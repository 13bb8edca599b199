//! Property tests for parsing and formatting.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::error::IdError;
use crate::formatter::format;
use crate::parser::parse;
use crate::schema::IdSchema;
use crate::types::{MongodbDatabaseId, ScopedRoleAssignmentId};

fn mongodb() -> IdSchema {
    IdSchema::from_template(
        "MongodbDatabaseId",
        "Mongodb Database",
        "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.DocumentDB/databaseAccounts/{databaseAccountName}/mongodbDatabases/{name}",
    )
    .unwrap()
}

fn role_assignment() -> IdSchema {
    IdSchema::from_template(
        "ScopedRoleAssignmentId",
        "Scoped Role Assignment",
        "/{*scope}/providers/Microsoft.Authorization/roleAssignments/{roleAssignmentName}",
    )
    .unwrap()
}

/// Any single path component.
fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9._-]{0,15}"
}

/// A path component that carries at least one lowercase letter.
fn cased_value() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9-]{0,12}"
}

fn mongodb_values(value: BoxedStrategy<String>) -> impl Strategy<Value = BTreeMap<String, String>> {
    (value.clone(), value.clone(), value.clone(), value).prop_map(|(sub, rg, account, name)| {
        BTreeMap::from([
            ("subscriptionId".to_string(), sub),
            ("resourceGroupName".to_string(), rg),
            ("databaseAccountName".to_string(), account),
            ("name".to_string(), name),
        ])
    })
}

proptest! {
    #[test]
    fn roundtrip_preserves_values(values in mongodb_values(value().boxed())) {
        let schema = mongodb();
        let built = schema.build(&values).unwrap();
        let formatted = format(&schema, &built);
        let parsed = parse(&schema, &formatted).unwrap();

        prop_assert_eq!(&parsed, &built);
        for (name, expected) in &values {
            prop_assert_eq!(parsed.get(name), Some(expected.as_str()));
        }
    }

    #[test]
    fn roundtrip_scoped(
        scope in prop::collection::vec(value(), 1..5),
        name in value(),
    ) {
        let schema = role_assignment();
        let values = BTreeMap::from([
            ("scope".to_string(), scope.join("/")),
            ("roleAssignmentName".to_string(), name.clone()),
        ]);
        let built = schema.build(&values).unwrap();
        let parsed = parse(&schema, &format(&schema, &built)).unwrap();

        prop_assert_eq!(parsed.get("scope").unwrap(), format!("/{}", scope.join("/")));
        prop_assert_eq!(parsed.get("roleAssignmentName"), Some(name.as_str()));
    }

    #[test]
    fn upper_cased_keys_parse_identically(values in mongodb_values(cased_value().boxed())) {
        let schema = mongodb();
        let built = schema.build(&values).unwrap();
        let shouted: Vec<String> = schema
            .segments()
            .iter()
            .map(|segment| match segment.fixed_value() {
                Some(literal) => literal.to_uppercase(),
                None => built.get(segment.name()).unwrap().to_string(),
            })
            .collect();
        let input = format!("/{}", shouted.join("/"));

        prop_assert_eq!(parse(&schema, &input).unwrap(), built);
    }

    #[test]
    fn fully_upper_cased_input_is_rejected(values in mongodb_values(cased_value().boxed())) {
        let schema = mongodb();
        let formatted = format(&schema, &schema.build(&values).unwrap());
        let err = parse(&schema, &formatted.to_uppercase()).unwrap_err();
        let is_case_folded = matches!(err, IdError::CaseFoldedValue { .. });
        prop_assert!(is_case_folded);
    }

    #[test]
    fn truncation_names_first_omitted_segment(
        values in mongodb_values(value().boxed()),
        keep in 0usize..10,
        trailing_slash in any::<bool>(),
    ) {
        let schema = mongodb();
        let formatted = format(&schema, &schema.build(&values).unwrap());
        let components: Vec<&str> = formatted.trim_start_matches('/').split('/').collect();

        let mut truncated = format!("/{}", components[..keep].join("/"));
        if trailing_slash && keep > 0 {
            truncated.push('/');
        }

        let expected = schema.segments()[keep..]
            .iter()
            .find(|segment| segment.is_value())
            .unwrap()
            .name();
        prop_assert_eq!(parse(&schema, &truncated).unwrap_err(), IdError::missing(expected));
    }

    #[test]
    fn typed_scope_without_leading_slash_roundtrips(
        scope in prop::collection::vec(value(), 1..5),
        trailing_slash in any::<bool>(),
        name in value(),
    ) {
        let mut raw = scope.join("/");
        if trailing_slash {
            raw.push('/');
        }
        let id = ScopedRoleAssignmentId::try_new(raw, name.clone()).unwrap();

        prop_assert_eq!(&id.scope, &format!("/{}", scope.join("/")));
        prop_assert_eq!(&id.role_assignment_name, &name);
        prop_assert_eq!(ScopedRoleAssignmentId::parse(&id.id()).unwrap(), id);
    }

    #[test]
    fn typed_constructor_roundtrips(values in mongodb_values(value().boxed())) {
        let id = MongodbDatabaseId::try_new(
            values["subscriptionId"].clone(),
            values["resourceGroupName"].clone(),
            values["databaseAccountName"].clone(),
            values["name"].clone(),
        )
        .unwrap();

        prop_assert_eq!(&id, &MongodbDatabaseId::new(
            values["subscriptionId"].clone(),
            values["resourceGroupName"].clone(),
            values["databaseAccountName"].clone(),
            values["name"].clone(),
        ));
        prop_assert_eq!(MongodbDatabaseId::parse(&id.id()).unwrap(), id);
    }
}

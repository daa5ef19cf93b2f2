//! Properties of the form model that hold for any attribute name.

use std::sync::Arc;

use formwork_core::FormError;
use formwork_forms::prelude::*;
use formwork_forms::value::value_map;
use proptest::prelude::*;

fn login_schema() -> Arc<FormSchema> {
    FormSchema::builder("Login")
        .nullable("login", [TypeTag::String])
        .nullable("password", [TypeTag::String])
        .build()
}

fn profile_schema() -> Arc<FormSchema> {
    FormSchema::builder("Profile")
        .attribute("age", [TypeTag::Int])
        .attribute("score", [TypeTag::Float])
        .attribute("active", [TypeTag::Bool])
        .nested("user", &login_schema())
        .label("user.login", "Your login")
        .build()
}

fn snapshot(form: &FormModel) -> Vec<(String, Value)> {
    form.attribute_names()
        .into_iter()
        .map(|name| (name.to_string(), form.attribute_value(name).cloned().unwrap_or_default()))
        .collect()
}

proptest! {
    #[test]
    fn set_undeclared_attribute_is_noop(name in "[a-zA-Z_][a-zA-Z0-9_]{0,16}", value in ".*") {
        let mut form = FormModel::new(&profile_schema());
        prop_assume!(!form.has_attribute(&name));

        let before = snapshot(&form);
        form.set_attribute(&name, value.as_str()).unwrap();
        prop_assert_eq!(snapshot(&form), before);
        prop_assert!(!form.has_attribute(&name));
    }

    #[test]
    fn read_undeclared_attribute_fails(name in "[a-z]{1,12}") {
        let form = FormModel::new(&profile_schema());
        prop_assume!(!form.has_attribute(&name));
        let is_undefined = matches!(
            form.attribute_value(&name),
            Err(FormError::UndefinedAttribute { .. })
        );
        prop_assert!(is_undefined);
    }

    #[test]
    fn integer_strings_become_ints(n in any::<i64>()) {
        let mut form = FormModel::new(&profile_schema());
        form.set_attribute("age", n.to_string()).unwrap();
        prop_assert_eq!(form.attribute_value("age").unwrap(), &Value::Int(n));
    }
}

#[test]
fn test_string_to_int_round_trip() {
    let mut form = FormModel::new(&profile_schema());
    form.set_attribute("age", "42").unwrap();
    assert_eq!(form.attribute_value("age").unwrap(), &Value::Int(42));
}

#[test]
fn test_failed_coercion_keeps_value() {
    let mut form = FormModel::new(&profile_schema());
    form.set_attribute("age", "forty").unwrap();
    assert_eq!(form.attribute_value("age").unwrap(), &Value::from("forty"));
}

#[test]
fn test_nested_addressing() {
    let mut form = FormModel::new(&profile_schema());
    form.set_attribute("user.login", "admin").unwrap();
    assert_eq!(form.attribute_value("user.login").unwrap(), &Value::from("admin"));
    assert_eq!(
        form.attribute_value_at(&["user", "login"]).unwrap(),
        &Value::from("admin")
    );
    assert!(form.has_attribute("user.login"));
    assert!(!form.has_attribute("user.missing"));
    assert!(!form.has_attribute("age.login"));
    assert_eq!(form.attribute_label("user.login"), "Your login");
    assert_eq!(form.attribute_label_at(&["user", "password"]), "Password");
}

#[test]
fn test_not_nested_attribute_read() {
    let form = FormModel::new(&profile_schema());
    assert!(matches!(
        form.attribute_value("age.value"),
        Err(FormError::NotNestedAttribute(_))
    ));
}

#[test]
fn test_load_submitted_data() {
    let mut form = FormModel::new(&profile_schema());
    let data = value_map(serde_json::json!({
        "Profile": {
            "age": "31",
            "score": "7.5",
            "active": "on",
            "user": {"login": "admin", "password": "secret"},
            "unknown": "ignored"
        }
    }));
    assert!(form.load(&data, None).unwrap());
    assert_eq!(form.attribute_value("age").unwrap(), &Value::Int(31));
    assert_eq!(form.attribute_value("score").unwrap(), &Value::Float(7.5));
    assert_eq!(form.attribute_value("active").unwrap(), &Value::Bool(true));
    assert_eq!(form.attribute_value("user.password").unwrap(), &Value::from("secret"));
    assert!(!form.has_attribute("unknown"));
}

#[test]
fn test_validation_with_closure() {
    let mut form = FormModel::new(&profile_schema());
    let valid = form.validate_with(&|model: &FormModel| {
        let mut results = ResultSet::new();
        let age = model.attribute_value("age").cloned().unwrap_or_default();
        let result = if age == Value::Int(0) {
            ValidationResult::new().with_error("Age is required.")
        } else {
            ValidationResult::new()
        };
        results.add("age", result);
        results
    });
    assert!(!valid);
    assert!(form.is_validated());
    assert_eq!(form.first_error("age"), Some("Age is required."));
    assert_eq!(form.error_summary(false), ["Age is required."]);
}

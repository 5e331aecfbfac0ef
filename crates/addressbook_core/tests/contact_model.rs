use addressbook_core::{Contact, ContactValidationError};

fn grace() -> Contact {
    Contact {
        id: 42,
        name: "Grace Hopper".to_string(),
        email: "grace@navy.example".to_string(),
        phone: "+1 202 555 0100".to_string(),
        company: "US Navy".to_string(),
        tags: vec!["cobol".to_string(), "admiral".to_string(), "cobol".to_string()],
        notes: "Found the first actual bug.".to_string(),
    }
}

#[test]
fn contact_serialization_uses_expected_wire_fields() {
    let contact = grace();

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["name"], "Grace Hopper");
    assert_eq!(json["email"], "grace@navy.example");
    assert_eq!(json["phone"], "+1 202 555 0100");
    assert_eq!(json["company"], "US Navy");
    assert_eq!(
        json["tags"],
        serde_json::json!(["cobol", "admiral", "cobol"])
    );
    assert_eq!(json["notes"], "Found the first actual bug.");
    assert_eq!(json.as_object().unwrap().len(), 7);

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}

#[test]
fn deserialize_rejects_payload_missing_any_field() {
    let full = serde_json::to_value(grace()).unwrap();

    for field in ["id", "name", "email", "phone", "company", "tags", "notes"] {
        let mut partial = full.clone();
        partial.as_object_mut().unwrap().remove(field);

        let err = serde_json::from_value::<Contact>(partial).unwrap_err();
        assert!(
            err.to_string().contains(&format!("missing field `{field}`")),
            "unexpected error for `{field}`: {err}"
        );
    }
}

#[test]
fn deserialize_rejects_wrong_field_types() {
    let value = serde_json::json!({
        "id": "forty-two",
        "name": "Grace Hopper",
        "email": "",
        "phone": "",
        "company": "",
        "tags": [],
        "notes": ""
    });

    assert!(serde_json::from_value::<Contact>(value).is_err());
}

#[test]
fn structural_shape_accepts_unvalidated_values() {
    let value = serde_json::json!({
        "id": -1,
        "name": "",
        "email": "not an email",
        "phone": "call me",
        "company": "",
        "tags": ["", "dup", "dup"],
        "notes": ""
    });

    let contact: Contact = serde_json::from_value(value).unwrap();
    assert_eq!(contact.id, -1);
    assert_eq!(contact.tags, vec!["", "dup", "dup"]);
    assert_eq!(contact.validate(), Err(ContactValidationError::EmptyName));
}

#[test]
fn validate_reports_first_violation_in_field_order() {
    let mut contact = grace();
    contact.email = "grace at navy".to_string();
    contact.phone = "invalid".to_string();

    let err = contact.validate().unwrap_err();
    assert_eq!(
        err,
        ContactValidationError::InvalidEmail("grace at navy".to_string())
    );
    assert_eq!(err.to_string(), "contact email is invalid: grace at navy");
}

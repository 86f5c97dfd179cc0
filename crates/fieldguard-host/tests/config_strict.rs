#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fieldguard_core::policy::{FieldList, ReadOnlySettings};
use fieldguard_host::config;
use fieldguard_host::model::RelationKind;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
models:
  - name: Order
    mixins:
      ReadOnly:
        fields: [total]
        raise_error: true # camelCase only
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn unknown_mixin_is_rejected() {
    let bad = r#"
version: 1
models:
  - name: Order
    mixins:
      TimeStamp: true
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
models:
  - name: Order
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert_eq!(cfg.models[0].name, "Order");
    assert!(cfg.models[0].mixins.read_only_settings().is_none());
}

#[test]
fn read_only_forms() {
    let ok = r#"
version: 1
models:
  - name: Order
    mixins:
      ReadOnly:
        fields: total
  - name: Account
    mixins:
      ReadOnly: { raiseError: true }
  - name: Audit
    mixins:
      ReadOnly: true
  - name: Note
    mixins:
      ReadOnly: false
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(
        cfg.models[0].mixins.read_only_settings(),
        Some(ReadOnlySettings {
            fields: Some(FieldList::One("total".into())),
            raise_error: None,
        })
    );
    assert_eq!(
        cfg.models[1].mixins.read_only_settings(),
        Some(ReadOnlySettings::whole_model())
    );
    assert_eq!(
        cfg.models[2].mixins.read_only_settings(),
        Some(ReadOnlySettings::default())
    );
    assert_eq!(cfg.models[3].mixins.read_only_settings(), None);
}

#[test]
fn relations_parse_kind_and_target() {
    let ok = r#"
version: 1
models:
  - name: Order
    relations:
      items: { type: hasMany, model: OrderItem, foreignKey: orderId }
      customer: { type: belongsTo, model: Customer }
  - name: OrderItem
  - name: Customer
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let rels = &cfg.models[0].relations;
    assert_eq!(rels["items"].kind, RelationKind::HasMany);
    assert_eq!(rels["items"].foreign_key.as_deref(), Some("orderId"));
    assert_eq!(rels["customer"].kind, RelationKind::BelongsTo);
}

#[test]
fn relation_to_undeclared_model_fails() {
    let bad = r#"
version: 1
models:
  - name: Order
    relations:
      items: { type: hasMany, model: Missing }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("Missing"));
}

#[test]
fn unknown_relation_kind_fails() {
    let bad = r#"
version: 1
models:
  - name: Order
    relations:
      items: { type: ownsMany, model: Order }
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn duplicate_models_and_bad_version_fail() {
    let dup = r#"
version: 1
models:
  - name: Order
  - name: Order
"#;
    assert!(config::load_from_str(dup).is_err());

    let v2 = r#"
version: 2
models:
  - name: Order
"#;
    let err = config::load_from_str(v2).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");

    let empty = "version: 1\n";
    assert!(config::load_from_str(empty).is_err());
}

#[test]
fn bad_listen_address_fails() {
    let bad = r#"
version: 1
server:
  listen: "not-an-address"
models:
  - name: Order
"#;
    assert!(config::load_from_str(bad).is_err());
}

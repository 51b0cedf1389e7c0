//! Import tests over inline documents.

use gncledger_shared::types::{Amount, Guid};
use rstest::rstest;

use super::*;
use crate::ledger::AccountType;

const OPEN: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<gnc-v2
     xmlns:gnc="http://www.gnucash.org/XML/gnc"
     xmlns:act="http://www.gnucash.org/XML/act"
     xmlns:book="http://www.gnucash.org/XML/book"
     xmlns:cmdty="http://www.gnucash.org/XML/cmdty"
     xmlns:slot="http://www.gnucash.org/XML/slot"
     xmlns:split="http://www.gnucash.org/XML/split"
     xmlns:trn="http://www.gnucash.org/XML/trn"
     xmlns:ts="http://www.gnucash.org/XML/ts">
<gnc:count-data cd:type="book" xmlns:cd="http://www.gnucash.org/XML/cd">1</gnc:count-data>
<gnc:book version="2.0.0">
<book:id type="guid">ffffffffffffffffffffffffffffffff</book:id>
<gnc:commodity version="2.0.0">
  <cmdty:space>ISO4217</cmdty:space>
  <cmdty:id>EUR</cmdty:id>
</gnc:commodity>
"#;

const CLOSE: &str = "</gnc:book>\n</gnc-v2>\n";

fn gid(n: u8) -> String {
    format!("{n:032x}")
}

fn guid(n: u8) -> Guid {
    Guid::parse(&gid(n)).unwrap()
}

fn document(body: &[String]) -> String {
    format!("{OPEN}{}{CLOSE}", body.concat())
}

fn account(id: u8, name: &str, kind: &str, parent: Option<u8>) -> String {
    account_with(id, name, kind, parent, "")
}

fn account_with(id: u8, name: &str, kind: &str, parent: Option<u8>, extra: &str) -> String {
    let parent = parent
        .map(|p| format!("<act:parent type=\"guid\">{}</act:parent>", gid(p)))
        .unwrap_or_default();
    format!(
        r#"<gnc:account version="2.0.0">
  <act:name>{name}</act:name>
  <act:id type="guid">{id}</act:id>
  <act:type>{kind}</act:type>
  <act:commodity><cmdty:space>ISO4217</cmdty:space><cmdty:id>EUR</cmdty:id></act:commodity>
  <act:commodity-scu>100</act:commodity-scu>
  {extra}
  {parent}
</gnc:account>
"#,
        id = gid(id),
    )
}

fn split(id: u8, account: u8, value: &str, state: &str, extra: &str) -> String {
    format!(
        r#"<trn:split>
    <split:id type="guid">{id}</split:id>
    <split:reconciled-state>{state}</split:reconciled-state>
    {extra}
    <split:value>{value}</split:value>
    <split:quantity>{value}</split:quantity>
    <split:account type="guid">{account}</split:account>
  </trn:split>
"#,
        id = gid(id),
        account = gid(account),
    )
}

fn transaction(id: u8, date: &str, description: &str, splits: &[String]) -> String {
    format!(
        r#"<gnc:transaction version="2.0.0">
  <trn:id type="guid">{id}</trn:id>
  <trn:currency><cmdty:space>ISO4217</cmdty:space><cmdty:id>EUR</cmdty:id></trn:currency>
  <trn:num>7</trn:num>
  <trn:date-posted><ts:date>{date} 00:00:00 +0100</ts:date></trn:date-posted>
  <trn:date-entered><ts:date>{date} 12:00:00 +0100</ts:date><ts:ns>250</ts:ns></trn:date-entered>
  <trn:description>{description}</trn:description>
  <trn:splits>
  {splits}
  </trn:splits>
</gnc:transaction>
"#,
        id = gid(id),
        splits = splits.concat(),
    )
}

/// Root(1) > Bank(2) > Checking(3), Root(1) > Income(4).
fn tree() -> Vec<String> {
    vec![
        account(1, "Root Account", "ROOT", None),
        account(2, "Bank", "BANK", Some(1)),
        account(3, "Checking", "BANK", Some(2)),
        account(4, "Income", "INCOME", Some(1)),
    ]
}

fn with(mut body: Vec<String>, more: impl IntoIterator<Item = String>) -> Vec<String> {
    body.extend(more);
    body
}

#[test]
fn test_hierarchy_paths() {
    let book = import_from_str(&document(&tree())).unwrap();

    let names: Vec<&str> = book.accounts().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["/", "/Bank", "/Bank/Checking", "/Income"]);

    let checking = book.account_by_name("/Bank/Checking").unwrap();
    assert_eq!(checking.id, guid(3));
    assert_eq!(checking.parent, Some(guid(2)));
    assert_eq!(checking.leaf_name(), "Checking");
    assert_eq!(checking.unit, "EUR");
    assert_eq!(checking.denom, Some(100));
    assert_eq!(checking.account_type, AccountType::Bank);

    let root_children: Vec<&str> = book
        .children(&guid(1))
        .into_iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(root_children, ["/Bank", "/Income"]);
    assert!(book.account(&guid(1)).unwrap().is_root());
}

#[test]
fn test_children_listed_before_parents() {
    let body = vec![
        account(3, "Checking", "BANK", Some(2)),
        account(2, "Bank", "BANK", Some(1)),
        account(1, "Root Account", "ROOT", None),
    ];
    let book = import_from_str(&document(&body)).unwrap();

    assert_eq!(book.account(&guid(3)).unwrap().name, "/Bank/Checking");
    assert_eq!(book.children(&guid(2))[0].id, guid(3));
}

#[test]
fn test_parentless_account_is_top_level() {
    let body = vec![account(5, "Orphan", "ASSET", None)];
    let book = import_from_str(&document(&body)).unwrap();
    assert_eq!(book.account(&guid(5)).unwrap().name, "/Orphan");
}

#[test]
fn test_commodities_are_kept() {
    let book = import_from_str(&document(&tree())).unwrap();
    assert_eq!(book.commodities().len(), 1);
    assert_eq!(book.commodities()[0].space, "ISO4217");
    assert_eq!(book.commodities()[0].id, "EUR");
}

#[test]
fn test_parent_cycle_is_structural_error() {
    let body = vec![
        account(1, "Root Account", "ROOT", None),
        account(2, "A", "ASSET", Some(3)),
        account(3, "B", "ASSET", Some(2)),
    ];
    let err = import_from_str(&document(&body)).unwrap_err();
    assert_eq!(err.error_code(), "STRUCTURAL_ERROR");
}

#[test]
fn test_self_parent_is_structural_error() {
    let body = vec![account(2, "Loop", "ASSET", Some(2))];
    let err = import_from_str(&document(&body)).unwrap_err();
    assert!(matches!(err, ImportError::Structural { .. }));
}

#[test]
fn test_duplicate_path_is_structural_error() {
    let body = with(tree(), [account(5, "Bank", "BANK", Some(1))]);
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Structural { account, message } => {
            assert_eq!(account, gid(5));
            assert!(message.contains("/Bank"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_several_roots_share_slash() {
    let body = with(tree(), [account(9, "Template Root", "ROOT", None)]);
    let book = import_from_str(&document(&body)).unwrap();
    assert_eq!(book.account(&guid(9)).unwrap().name, "/");
}

#[test]
fn test_missing_parent_is_reference_error() {
    let body = vec![account(2, "Bank", "BANK", Some(8))];
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Reference { account, referrer } => {
            assert_eq!(account, gid(8));
            assert_eq!(referrer, format!("account {}", gid(2)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_account_type_is_kept() {
    let body = vec![account(2, "Jar", "PIGGYBANK", None)];
    let book = import_from_str(&document(&body)).unwrap();

    let jar = book.account(&guid(2)).unwrap();
    assert_eq!(jar.account_type, AccountType::Other("PIGGYBANK".to_string()));
    assert_eq!(jar.account_type.as_str(), "PIGGYBANK");
    assert_eq!(jar.name, "/Jar");
}

#[test]
fn test_non_root_cannot_take_root_path() {
    let body = vec![
        account(1, "Root Account", "ROOT", None),
        account(5, "", "BANK", Some(1)),
    ];
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Structural { account, message } => {
            assert_eq!(account, gid(5));
            assert!(message.contains(&gid(1)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_root_after_slash_account_is_structural_error() {
    let body = vec![
        account(5, "", "BANK", None),
        account(1, "Root Account", "ROOT", None),
    ];
    let err = import_from_str(&document(&body)).unwrap_err();
    assert_eq!(err.error_code(), "STRUCTURAL_ERROR");
}

#[test]
fn test_duplicate_account_id_is_schema_error() {
    let body = vec![
        account(2, "Bank", "BANK", None),
        account(2, "Cash", "CASH", None),
    ];
    let err = import_from_str(&document(&body)).unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
}

#[test]
fn test_notes_slot_becomes_description() {
    let notes = r#"<act:description>Plain</act:description>
  <act:slots>
    <slot><slot:key>notes</slot:key><slot:value type="string">Joint with Sam</slot:value></slot>
    <slot><slot:key>placeholder</slot:key><slot:value type="string">false</slot:value></slot>
  </act:slots>"#;
    let body = vec![
        account_with(2, "Bank", "BANK", None, notes),
        account_with(3, "Cash", "CASH", None, "<act:description>Wallet</act:description>"),
        account(4, "Other", "ASSET", None),
    ];
    let book = import_from_str(&document(&body)).unwrap();

    let description = |n| book.account(&guid(n)).unwrap().description.clone();
    assert_eq!(description(2).as_deref(), Some("Joint with Sam"));
    assert_eq!(description(3).as_deref(), Some("Wallet"));
    assert_eq!(description(4), None);
}

#[test]
fn test_non_string_notes_is_type_error() {
    let notes = r#"<act:slots>
    <slot><slot:key>notes</slot:key><slot:value type="integer">12</slot:value></slot>
  </act:slots>"#;
    let body = vec![account_with(2, "Bank", "BANK", None, notes)];
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Type { entity, field } => {
            assert_eq!(entity, format!("account {}", gid(2)));
            assert_eq!(field, "notes");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_slot_type_is_schema_error() {
    let slots = r#"<act:slots>
    <slot><slot:key>ratio</slot:key><slot:value type="double">0.5</slot:value></slot>
  </act:slots>"#;
    let body = vec![account_with(2, "Bank", "BANK", None, slots)];
    let err = import_from_str(&document(&body)).unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
}

#[test]
fn test_transactions_and_flows() {
    let body = with(
        tree(),
        [transaction(
            20,
            "2021-01-15",
            "Salary",
            &[
                split(21, 3, "250000/100", "y", ""),
                split(22, 4, "-250000/100", "n", ""),
            ],
        )],
    );
    let book = import_from_str(&document(&body)).unwrap();

    let trn = book.transaction(&guid(20)).unwrap();
    assert_eq!(trn.description, "Salary");
    assert_eq!(trn.number, "7");
    assert_eq!(trn.currency, "EUR");
    assert_eq!(trn.notes, None);
    assert_eq!(trn.date.to_rfc3339(), "2021-01-15T00:00:00+01:00");
    assert_eq!(trn.stamp.to_rfc3339(), "2021-01-15T12:00:00.000000250+01:00");
    assert!(trn.is_balanced());

    let flow = &trn.flows[0];
    assert_eq!(flow.account, guid(3));
    assert_eq!(flow.transaction, guid(20));
    assert!(flow.reconciled);
    assert_eq!(flow.reconciled_at, None);
    assert_eq!(book.parent_of(flow).unwrap().id, guid(20));

    assert_eq!(book.balance(&guid(3)), Some(&Amount::from_integer(2500)));
    assert_eq!(book.balance(&guid(4)), Some(&Amount::from_integer(-2500)));
    assert_eq!(book.balance(&guid(2)), Some(&Amount::zero()));
    assert!(book.total_balance().is_zero());
}

#[test]
fn test_transaction_notes_slot() {
    let mut trn = transaction(20, "2021-01-15", "Gift", &[split(21, 3, "0", "n", "")]);
    trn = trn.replace(
        "<trn:splits>",
        r#"<trn:slots>
    <slot><slot:key>notes</slot:key><slot:value type="string">birthday</slot:value></slot>
    <slot><slot:key>date-posted</slot:key><slot:value type="gdate"><gdate>2021-01-15</gdate></slot:value></slot>
  </trn:slots>
  <trn:splits>"#,
    );
    let book = import_from_str(&document(&with(tree(), [trn]))).unwrap();
    assert_eq!(
        book.transaction(&guid(20)).unwrap().notes.as_deref(),
        Some("birthday")
    );
}

#[test]
fn test_reconcile_date() {
    let date = r#"<split:reconcile-date><ts:date>2021-02-01 08:00:00 +0000</ts:date></split:reconcile-date>"#;
    let body = with(
        tree(),
        [transaction(
            20,
            "2021-01-15",
            "Rent",
            &[split(21, 3, "-500", "y", date), split(22, 4, "500", "n", "")],
        )],
    );
    let book = import_from_str(&document(&body)).unwrap();

    let flow = &book.transaction(&guid(20)).unwrap().flows[0];
    assert!(flow.reconciled);
    assert_eq!(
        flow.reconciled_at.map(|t| t.to_rfc3339()).as_deref(),
        Some("2021-02-01T08:00:00+00:00")
    );
}

#[rstest]
#[case::unknown("x")]
#[case::cleared("c")]
#[case::empty("")]
fn test_bad_reconciled_state(#[case] state: &str) {
    let body = with(
        tree(),
        [transaction(20, "2021-01-15", "Rent", &[split(21, 3, "1", state, "")])],
    );
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::State { split, state: code } => {
            assert!(split.starts_with(&format!("split {}", gid(21))));
            assert_eq!(code, state);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_split_account_is_reference_error() {
    let body = with(
        tree(),
        [transaction(20, "2021-01-15", "Lost", &[split(21, 99, "1", "n", "")])],
    );
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Reference { account, referrer } => {
            assert_eq!(account, gid(99));
            assert_eq!(referrer, format!("split {} of transaction {}", gid(21), gid(20)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case::decimal("12.50")]
#[case::zero_denominator("1/0")]
#[case::empty("")]
fn test_bad_value_is_format_error(#[case] value: &str) {
    let body = with(
        tree(),
        [transaction(20, "2021-01-15", "Odd", &[split(21, 3, value, "n", "")])],
    );
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Format { entity, field, text, .. } => {
            assert!(entity.starts_with(&format!("split {}", gid(21))));
            assert_eq!(field, "value");
            assert_eq!(text, value);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case::account_id(r#"<act:id type="guid">00000000000000000000000000000002</act:id>"#, "<act:id>zz</act:id>", "account zz", "id")]
#[case::parent(r#"<act:parent type="guid">00000000000000000000000000000001</act:parent>"#, "<act:parent>not-a-guid</act:parent>", "account 00000000000000000000000000000002", "parent")]
#[case::transaction_id(r#"<trn:id type="guid">00000000000000000000000000000014</trn:id>"#, "<trn:id>zz</trn:id>", "transaction zz", "id")]
#[case::split_id(r#"<split:id type="guid">00000000000000000000000000000015</split:id>"#, "<split:id>zz</split:id>", "split zz of transaction 00000000000000000000000000000014", "id")]
#[case::split_account(r#"<split:account type="guid">00000000000000000000000000000003</split:account>"#, "<split:account>ABC</split:account>", "split 00000000000000000000000000000015 of transaction 00000000000000000000000000000014", "account")]
#[case::reconcile_date("<split:reconcile-date><ts:date>2021-02-01 08:00:00 +0000</ts:date>", "<split:reconcile-date><ts:date>yesterday</ts:date>", "split 00000000000000000000000000000015 of transaction 00000000000000000000000000000014", "reconcile-date")]
fn test_malformed_field_is_format_error(
    #[case] good: &str,
    #[case] bad: &str,
    #[case] expected_entity: &str,
    #[case] expected_field: &str,
) {
    let date = r#"<split:reconcile-date><ts:date>2021-02-01 08:00:00 +0000</ts:date></split:reconcile-date>"#;
    let text = document(&with(
        tree(),
        [transaction(0x14, "2021-01-15", "Rent", &[split(0x15, 3, "-500", "y", date)])],
    ));
    assert!(text.contains(good));
    let text = text.replacen(good, bad, 1);

    let err = import_from_str(&text).unwrap_err();
    match err {
        ImportError::Format { entity, field, .. } => {
            assert_eq!(entity, expected_entity);
            assert_eq!(field, expected_field);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_posted_date_is_format_error() {
    let body = with(
        tree(),
        [transaction(20, "15/01/2021", "Odd", &[split(21, 3, "0", "n", "")])],
    );
    let err = import_from_str(&document(&body)).unwrap_err();
    match err {
        ImportError::Format { entity, field, .. } => {
            assert_eq!(entity, format!("transaction {}", gid(20)));
            assert_eq!(field, "date-posted");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_quantity_mismatch_still_imports() {
    let mut body = tree();
    body.push(
        transaction(
            20,
            "2021-01-15",
            "Shares",
            &[split(21, 3, "-100", "n", ""), split(22, 4, "100", "n", "")],
        )
        .replacen("<split:quantity>-100</split:quantity>", "<split:quantity>-3</split:quantity>", 1),
    );
    let book = import_from_str(&document(&body)).unwrap();
    assert_eq!(book.balance(&guid(3)), Some(&Amount::from_integer(-100)));
}

#[test]
fn test_flows_ordered_by_posted_date() {
    let body = with(
        tree(),
        [
            transaction(30, "2021-03-01", "March", &[split(31, 3, "3", "n", "")]),
            transaction(10, "2021-01-01", "January", &[split(11, 3, "1", "n", "")]),
            transaction(20, "2021-02-01", "February", &[split(21, 3, "2", "n", "")]),
            transaction(40, "2021-02-01", "February again", &[split(41, 3, "4", "n", "")]),
        ],
    );
    let book = import_from_str(&document(&body)).unwrap();

    let order: Vec<Guid> = book.flows(&guid(3)).iter().map(|f| f.id.clone()).collect();
    assert_eq!(order, [guid(11), guid(21), guid(41), guid(31)]);
    assert_eq!(book.balance(&guid(3)), Some(&Amount::from_integer(10)));

    // Input order is kept in the transaction list.
    let listed: Vec<Guid> = book.transactions().map(|t| t.id.clone()).collect();
    assert_eq!(listed, [guid(30), guid(10), guid(20), guid(40)]);
}

#[test]
fn test_duplicate_transaction_id_is_schema_error() {
    let body = with(
        tree(),
        [
            transaction(20, "2021-01-01", "One", &[]),
            transaction(20, "2021-01-02", "Two", &[]),
        ],
    );
    let err = import_from_str(&document(&body)).unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
}

#[test]
fn test_bare_book_root() {
    let text = format!(
        r#"<gnc:book version="2.0.0"
     xmlns:gnc="http://www.gnucash.org/XML/gnc"
     xmlns:act="http://www.gnucash.org/XML/act"
     xmlns:cmdty="http://www.gnucash.org/XML/cmdty">{}</gnc:book>"#,
        tree().concat()
    );
    assert_eq!(import_from_str(&text).unwrap().accounts().len(), 4);
}

#[test]
fn test_wrong_namespace_finds_no_book() {
    let text = document(&tree()).replace(
        "xmlns:gnc=\"http://www.gnucash.org/XML/gnc\"",
        "xmlns:gnc=\"http://example.com/gnc\"",
    );
    let err = import_from_str(&text).unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
}

#[test]
fn test_malformed_xml() {
    let err = import_from_str("<gnc-v2><gnc:book>").unwrap_err();
    assert_eq!(err.error_code(), "XML_ERROR");
}

#[test]
fn test_import_from_reader() {
    let text = document(&tree());
    let book = import_from_reader(text.as_bytes()).unwrap();
    assert_eq!(book.accounts().len(), 4);
}

#[test]
fn test_import_from_missing_path() {
    let err = import_from_path("/nonexistent/book.gnucash").unwrap_err();
    match err {
        ImportError::Io { path, .. } => assert_eq!(path, "/nonexistent/book.gnucash"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_book() {
    let book = import_from_str(&document(&[])).unwrap();
    assert_eq!(book.accounts().len(), 0);
    assert_eq!(book.transactions().len(), 0);
    assert!(book.total_balance().is_zero());
}

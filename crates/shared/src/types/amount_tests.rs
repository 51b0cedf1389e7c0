use super::*;
use proptest::prelude::*;
use rstest::rstest;

fn amount(text: &str) -> Amount {
    Amount::parse(text).unwrap()
}

#[test]
fn test_amount_zero() {
    let zero = Amount::zero();
    assert!(zero.is_zero());
    assert!(!zero.is_negative());
    assert_eq!(zero, Amount::default());
    assert_eq!(zero.to_display_string(), "0.00");
}

#[rstest]
#[case::integer("42", "42/1")]
#[case::negative_integer("-7", "-7/1")]
#[case::fraction("367/100", "367/100")]
#[case::reducible("1250/100", "25/2")]
#[case::negative_fraction("-1250/100", "-25/2")]
#[case::zero_numerator("0/100", "0/1")]
fn test_amount_parse(#[case] text: &str, #[case] ratio: &str) {
    assert_eq!(amount(text).to_ratio_string(), ratio);
}

#[rstest]
#[case::empty("")]
#[case::minus_only("-")]
#[case::zero_denominator("1/0")]
#[case::negative_denominator("1/-2")]
#[case::missing_numerator("/100")]
#[case::missing_denominator("100/")]
#[case::decimal_point("12.50")]
#[case::underscore("1_000/100")]
#[case::plus_sign("+5")]
#[case::nested("1/2/3")]
#[case::whitespace(" 5")]
fn test_amount_parse_rejects(#[case] text: &str) {
    let err = Amount::parse(text).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_AMOUNT");
    assert_eq!(err.text(), text);
}

#[rstest]
#[case("367/100", "3.67")]
#[case("-367/100", "-3.67")]
#[case("1/3", "0.33")]
#[case("2/3", "0.67")]
#[case("1/200", "0.01")]
#[case("-1/200", "-0.01")]
#[case("1/400", "0.00")]
#[case("-1/400", "0.00")]
#[case("199999/200", "1000.00")]
#[case("123456789012345678901234567890/1", "123456789012345678901234567890.00")]
fn test_amount_display(#[case] text: &str, #[case] display: &str) {
    assert_eq!(amount(text).to_display_string(), display);
    assert_eq!(format!("{}", amount(text)), display);
}

#[test]
fn test_amount_arithmetic_is_exact() {
    let third = amount("1/3");
    let total: Amount = [third.clone(), third.clone(), third].iter().sum();
    assert_eq!(total, Amount::from_integer(1));

    let diff = &amount("10") - &amount("1/10");
    assert_eq!(diff.to_ratio_string(), "99/10");
    assert_eq!(-diff.clone(), amount("-99/10"));
    assert_eq!(&diff + &(-&diff), Amount::zero());
}

#[test]
fn test_amount_running_totals() {
    let flows = vec![amount("100"), amount("-2550/100"), amount("1/4")];
    let totals = Amount::running_totals(&flows);
    let rendered: Vec<String> = totals.iter().map(Amount::to_ratio_string).collect();
    assert_eq!(rendered, vec!["100/1", "149/2", "299/4"]);

    assert!(Amount::running_totals(&Vec::<Amount>::new()).is_empty());
}

#[test]
fn test_amount_json() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Item {
        price: Amount,
    }

    let item = Item {
        price: amount("367/100"),
    };
    let json = serde_json::to_string(&item).unwrap();
    assert_eq!(json, r#"{"price":"367/100"}"#);

    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back.price.to_display_string(), "3.67");

    let whole: Item = serde_json::from_str(r#"{"price":"12"}"#).unwrap();
    assert_eq!(whole.price, Amount::from_integer(12));

    assert!(serde_json::from_str::<Item>(r#"{"price":"1/0"}"#).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Serializing and re-parsing preserves the value, whatever the input form.
    #[test]
    fn prop_ratio_string_round_trip(numer in any::<i64>(), denom in 1u64..=1_000_000_000u64) {
        let text = format!("{numer}/{denom}");
        let parsed = Amount::parse(&text).unwrap();
        let reparsed = Amount::parse(&parsed.to_ratio_string()).unwrap();
        prop_assert_eq!(reparsed, parsed);
    }

    /// The last running total equals the plain sum.
    #[test]
    fn prop_running_totals_end_at_sum(values in prop::collection::vec(-1_000_000i64..1_000_000, 0..30)) {
        let amounts: Vec<Amount> = values.iter().copied().map(Amount::from_integer).collect();
        let totals = Amount::running_totals(&amounts);
        prop_assert_eq!(totals.len(), amounts.len());
        let sum: Amount = amounts.iter().sum();
        prop_assert_eq!(totals.last().cloned().unwrap_or_default(), sum);
    }
}

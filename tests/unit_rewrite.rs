use sheet_relay::formula::Delta;
use sheet_relay::formula::rewrite::{
    contains_volatile_indirection, rewrite_formula_body, rewrite_value,
};

#[test]
fn non_formula_values_pass_through() {
    let delta = Delta::new(12, 0);
    assert_eq!(rewrite_value("hello B5", delta), "hello B5");
    assert_eq!(rewrite_value("42", delta), "42");
    assert_eq!(rewrite_value("", delta), "");
}

#[test]
fn simple_relative_reference_shifts() {
    assert_eq!(rewrite_value("=B11", Delta::new(12, 0)), "=B23");
    assert_eq!(rewrite_formula_body("B11+C2", Delta::new(1, 1)), "C12+D3");
}

#[test]
fn range_endpoints_shift_independently_with_the_same_delta() {
    assert_eq!(
        rewrite_formula_body("SUM(B10:C20)", Delta::new(2, 1)),
        "SUM(C12:D22)"
    );
    assert_eq!(
        rewrite_formula_body("SUM($B$10:C20)", Delta::new(2, 1)),
        "SUM($B$10:D22)"
    );
}

#[test]
fn absolute_markers_pin_their_axis() {
    assert_eq!(
        rewrite_formula_body("$B$10+$B11+B$10", Delta::new(5, 5)),
        "$B$10+$B16+G$10"
    );
}

#[test]
fn references_inside_string_literals_are_never_rewritten() {
    let delta = Delta::new(10, 10);
    assert_eq!(rewrite_value("=\"text B5 here\"", delta), "=\"text B5 here\"");
    assert_eq!(
        rewrite_formula_body("IF(A1>0,\"use B2\",C3)", Delta::new(1, 1)),
        "IF(B2>0,\"use B2\",D4)"
    );
}

#[test]
fn escaped_quotes_stay_inside_the_literal() {
    assert_eq!(
        rewrite_formula_body("\"say \"\"B5\"\" now\"&B5", Delta::new(1, 0)),
        "\"say \"\"B5\"\" now\"&B6"
    );
}

#[test]
fn volatile_indirection_formulas_are_returned_unmodified() {
    let delta = Delta::new(50, 50);
    for body in [
        "INDIRECT(\"B\"&ROW())",
        "ADDRESS(1,2)",
        "indirect(A1)",
        "SUM(B1:B9)+INDIRECT(\"C1\")",
    ] {
        assert_eq!(rewrite_formula_body(body, delta), body);
        assert!(contains_volatile_indirection(body));
    }
    assert!(!contains_volatile_indirection("SUM(B1:B9)"));
}

#[test]
fn function_names_with_trailing_digits_are_not_mangled() {
    assert_eq!(rewrite_formula_body("LOG10(B5)", Delta::new(1, 0)), "LOG10(B6)");
    assert_eq!(
        rewrite_formula_body("ATAN2(A1,B2)", Delta::new(1, 1)),
        "ATAN2(B2,C3)"
    );
}

#[test]
fn defined_names_longer_than_references_are_left_alone() {
    assert_eq!(
        rewrite_formula_body("ABCD5+B1", Delta::new(1, 1)),
        "ABCD5+C2"
    );
}

#[test]
fn sheet_qualified_references_shift_but_keep_the_qualifier() {
    assert_eq!(
        rewrite_formula_body("'Other Sheet'!B5+Sheet2!C6", Delta::new(1, 1)),
        "'Other Sheet'!C6+Sheet2!D7"
    );
}

#[test]
fn translation_clamps_at_the_sheet_origin() {
    assert_eq!(rewrite_value("=A1", Delta::new(-3, -3)), "=A1");
}

#[test]
fn numeric_literals_are_not_references() {
    assert_eq!(
        rewrite_formula_body("1.5E3+B2*2", Delta::new(1, 1)),
        "1.5E3+C3*2"
    );
}

//! Pattern matching through the test-case surface

use chrono::NaiveDate;
use fuzzy_testcase::{
    assert_almost_equal, check_raises, FuzzyTestCase, MatchOptions, Problem, Record, Table,
    Value,
};
use serde::Serialize;
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn almost(test: Value, expected: Value) -> Result<(), fuzzy_testcase::MatchError> {
    assert_almost_equal(&test, &expected, &MatchOptions::new())
}

fn almost_with(
    test: f64,
    expected: f64,
    options: MatchOptions,
) -> Result<(), fuzzy_testcase::MatchError> {
    assert_almost_equal(&Value::from(test), &Value::from(expected), &options)
}

/// Stands for "nothing" without being a sequence
#[derive(Debug)]
struct EmptyList;

impl Record for EmptyList {
    fn type_name(&self) -> &str {
        "EmptyList"
    }

    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }

    fn is_missing(&self) -> bool {
        true
    }

    fn to_json(&self) -> serde_json::Value {
        json!([])
    }
}

/// Iterates as `["hello"]`, answers every key with `["world"]`
#[derive(Debug)]
struct ListAndData;

impl Record for ListAndData {
    fn type_name(&self) -> &str {
        "ListAndData"
    }

    fn attribute(&self, _name: &str) -> Option<Value> {
        Some(Value::sequence(["world"]))
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(vec![Value::from("hello")])
    }

    fn is_mapping_like(&self) -> bool {
        true
    }

    fn to_json(&self) -> serde_json::Value {
        json!(["hello"])
    }
}

#[derive(Serialize)]
struct Temp {
    a: i32,
    b: f64,
}

#[derive(Serialize)]
struct OnlyA {
    a: i32,
}

#[test]
fn test_digits() {
    assert!(almost_with(1.000001, 1.0000011, MatchOptions::new().digits(6)).is_ok());
    assert!(almost_with(1.000002, 1.0000025, MatchOptions::new().digits(6)).is_ok());
    assert!(almost_with(1.000001, 1.000002, MatchOptions::new().digits(6)).is_err());
    assert!(almost_with(1.000001, 1.0000016, MatchOptions::new().digits(6)).is_err());
    assert!(almost_with(1.000001, 1.0000015, MatchOptions::new().digits(6)).is_err());
    assert!(almost_with(5.0, 5.1, MatchOptions::new().digits(2)).is_err());
}

#[test]
fn test_places() {
    assert!(almost_with(1.0, 0.1, MatchOptions::new().places(6)).is_err());
    assert!(almost_with(1.0001, 1.0002, MatchOptions::new().places(5)).is_err());
    assert!(almost_with(1.0001, 1.00016, MatchOptions::new().places(5)).is_err());
    assert!(almost_with(100.01, 100.016, MatchOptions::new().places(5)).is_err());
    assert!(almost_with(0.0010001, 0.00100016, MatchOptions::new().places(5)).is_err());
    assert!(almost_with(1.0001, 1.00015, MatchOptions::new().places(5)).is_ok());
    assert!(almost_with(100.01, 100.015, MatchOptions::new().places(5)).is_ok());
    assert!(almost_with(0.0010001, 0.00100015, MatchOptions::new().places(5)).is_ok());
    assert!(almost_with(0.0010001, 0.00100016, MatchOptions::new().places(4)).is_ok());
}

#[test]
fn test_delta() {
    assert!(almost_with(5.0, 5.01, MatchOptions::new().delta(0.1)).is_ok());
    assert!(almost_with(5.0, 5.1, MatchOptions::new().delta(0.01)).is_err());
}

#[test]
fn test_bad_call() {
    let err = almost_with(5.0, 5.1, MatchOptions::new().places(0).delta(0.1)).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_report_property_name() {
    let result = check_raises("asdfasdf=", || almost(v(json!({})), v(json!({"asdfasdf": 0}))));
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_missing() {
    assert!(almost(Value::Null, v(json!([]))).is_ok());
    assert!(almost(Value::from(""), v(json!([]))).is_ok());
    assert!(almost(v(json!([])), v(json!([]))).is_ok());
    assert!(almost(v(json!([])), Value::from("")).is_ok());
    assert!(almost(Value::from(0), v(json!([]))).is_err());
    assert!(almost(Value::from(false), v(json!([]))).is_err());
}

#[test]
fn test_absent_marker() {
    let pattern = Value::mapping([("a", Value::absent())]);
    assert!(almost(v(json!({})), pattern.clone()).is_ok());
    assert!(almost(v(json!({"a": 0})), pattern).is_err());
}

#[test]
fn test_records_against_mappings() {
    let temp = Value::from_serialize(&Temp { a: 1, b: 3.14 }).unwrap();
    assert!(almost(temp, v(json!({"a": 1, "b": 3.14}))).is_ok());

    let temp = Value::from_serialize(&Temp { a: 1, b: 5.14 }).unwrap();
    assert!(almost(temp, v(json!({"a": 1, "b": 3.14}))).is_err());

    let only_a = Value::from_serialize(&OnlyA { a: 1 }).unwrap();
    let result = check_raises("asdfasdf=", || {
        almost(only_a, v(json!({"a": 1, "asdfasdf": 3.14})))
    });
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_singletons() {
    assert!(almost(v(json!([{"a": 1, "b": 3.14}])), v(json!({"a": 1, "b": 3.14}))).is_ok());
    assert!(almost(v(json!({"a": 1, "b": 3.14})), v(json!([{"a": 1, "b": 3.14}]))).is_ok());
    assert!(almost(Value::from("test"), v(json!(["test"]))).is_ok());
    assert!(almost(v(json!(["test"])), Value::from("test")).is_ok());
    assert!(almost(v(json!([{"a": 1, "b": 3.14}, {}])), v(json!({"a": 1, "b": 3.14}))).is_err());
    assert!(almost(v(json!({"a": 1, "b": 3.14})), v(json!([{"a": 1, "b": 3.14}, {}]))).is_err());
}

#[test]
fn test_ordering() {
    assert!(almost(v(json!([1, 2, 3])), v(json!([1, 2, 3]))).is_ok());
    assert!(almost(v(json!([1, 2, 3])), Value::set([3, 2, 1])).is_ok());
    assert!(almost(v(json!([1, 2, 3])), Value::set([2, 1])).is_err());
    assert!(almost(v(json!([1, 2, 3])), Value::set([2, 1, 4])).is_err());
}

#[test]
fn test_dates() {
    let date = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
    assert!(almost(Value::from("2024-04-19"), Value::from(date)).is_ok());
    assert!(almost(Value::from(date), Value::from("2024-04-19")).is_ok());
}

#[test]
fn test_numeric_text() {
    assert!(almost(Value::from(5), Value::from("5")).is_ok());
    assert!(almost(Value::from("5"), Value::from(5)).is_ok());
    assert!(almost(Value::from(6), Value::from("test")).is_err());
}

#[test]
fn test_lists_in_lists() {
    let case = FuzzyTestCase::new();
    case.assert_equal(&v(json!([[[2, 3]]])), &v(json!([2, 3])));
    case.assert_equal(&v(json!([[[2, 3]]])), &v(json!([[2, 3]])));
    case.assert_equal(&v(json!([2, 3])), &v(json!([[[2, 3]]])));
}

#[test]
fn test_empty_list_record() {
    assert!(almost(Value::record(EmptyList), v(json!([]))).is_ok());
    assert!(almost(v(json!([])), Value::record(EmptyList)).is_ok());
    assert!(almost(Value::record(EmptyList), v(json!([1]))).is_err());
    assert!(almost(v(json!([1])), Value::record(EmptyList)).is_err());
}

#[test]
fn test_list_and_data_record() {
    assert!(almost(Value::record(ListAndData), v(json!({"name": "world"}))).is_ok());
    assert!(almost(Value::record(ListAndData), v(json!(["hello"]))).is_ok());
}

#[test]
fn test_null_against_empty_text_in_lists() {
    assert!(almost(v(json!(["a", "b", null])), v(json!(["a", "b", ""]))).is_ok());
}

#[test]
fn test_problem_kind_on_mismatch() {
    let result = check_raises(Problem::kind::<fuzzy_testcase::MatchError>(), || {
        almost(Value::from(1), Value::from(2))
    });
    assert!(result.is_ok());
}

#[test]
fn test_table_columns_and_rows() {
    let table = Table::new(["name", "age"])
        .with_row(["alice", "30"])
        .unwrap()
        .with_row(["bob", "40"])
        .unwrap();
    let table = Value::record(table);

    assert!(almost(table.clone(), v(json!({"age": [30, 40]}))).is_ok());
    assert!(almost(table.clone(), Value::set(["bob", "alice"])).is_ok());
    assert!(almost(table, v(json!({"age": [30, 41]}))).is_err());
}

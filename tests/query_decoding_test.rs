use querycrate::filtering::{coerce_filter_value, decode_fields, decode_filters, decode_sorts};
use querycrate::{
    Column, Delimiters, FilterValue, ParameterBag, ParameterMap, QueryConfig, QueryRequest, RawValue,
};

fn raw(value: &str) -> RawValue {
    RawValue::from(value)
}

fn text(value: &str) -> FilterValue {
    FilterValue::String(value.to_string())
}

#[test]
fn test_strings_without_delimiter_are_unchanged_unless_boolean() {
    for value in ["john", "0", "1", "True", "FALSE", " true", "a;b", "null"] {
        assert_eq!(coerce_filter_value(&raw(value), ","), text(value), "value {value:?}");
    }
    assert_eq!(coerce_filter_value(&raw("true"), ","), FilterValue::Bool(true));
    assert_eq!(coerce_filter_value(&raw("false"), ","), FilterValue::Bool(false));
}

#[test]
fn test_delimited_string_becomes_string_list() {
    assert_eq!(
        coerce_filter_value(&raw("a,b,c"), ","),
        FilterValue::Sequence(vec![text("a"), text("b"), text("c")])
    );
}

#[test]
fn test_empty_values_are_returned_unchanged() {
    assert_eq!(coerce_filter_value(&raw(""), ","), text(""));
    assert_eq!(coerce_filter_value(&RawValue::Null, ","), FilterValue::Null);
    assert_eq!(
        coerce_filter_value(&RawValue::Sequence(Vec::new()), ","),
        FilterValue::Sequence(Vec::new())
    );
    assert_eq!(
        coerce_filter_value(&RawValue::Mapping(ParameterMap::new()), ","),
        FilterValue::Mapping(ParameterMap::new())
    );
}

#[test]
fn test_nested_lists_coerce_element_wise() {
    let value = RawValue::Sequence(vec![
        raw("true"),
        RawValue::Sequence(vec![raw("false"), raw("x,y")]),
    ]);

    assert_eq!(
        coerce_filter_value(&value, ","),
        FilterValue::Sequence(vec![
            FilterValue::Bool(true),
            FilterValue::Sequence(vec![
                FilterValue::Bool(false),
                FilterValue::Sequence(vec![text("x"), text("y")]),
            ]),
        ])
    );
}

#[test]
fn test_sort_string_and_list() {
    let bag = ParameterBag::new().with("sort", "-name,email");
    assert_eq!(decode_sorts(&bag, "sort", ","), vec!["-name", "email"]);

    let bag = ParameterBag::new().with(
        "sort",
        RawValue::Sequence(vec![raw("a"), raw(""), raw("b")]),
    );
    assert_eq!(decode_sorts(&bag, "sort", ","), vec!["a", "b"]);
}

#[test]
fn test_fields_on_empty_input() {
    for value in [
        RawValue::Null,
        raw(""),
        RawValue::Sequence(Vec::new()),
        RawValue::Mapping(ParameterMap::new()),
        RawValue::Bool(false),
    ] {
        let bag = ParameterBag::new().with("fields", value);
        assert!(decode_fields(&bag, "fields", ",").is_empty());
    }
    assert!(decode_fields(&ParameterBag::new(), "fields", ",").is_empty());
}

#[test]
fn test_set_all_then_reset() {
    let mut delimiters = Delimiters::default();
    delimiters.set_all(";");
    delimiters.reset();

    assert_eq!(delimiters, Delimiters::default());
    for delimiter in [
        delimiters.include(),
        delimiters.append(),
        delimiters.fields(),
        delimiters.sort(),
        delimiters.filter(),
    ] {
        assert_eq!(delimiter, ",");
    }
}

#[test]
fn test_string_filter_parameter_yields_no_filters() {
    let bag = ParameterBag::new().with("filter", "status=active");
    assert!(decode_filters(&bag, "filter", ",", 64).is_empty());
}

#[test]
fn test_sort_delimiter_is_isolated() {
    let query = "include=a;b,c&append=a;b,c&fields=a;b,c&sort=a;b,c&filter[x]=a;b,c";

    let mut delimiters = Delimiters::default();
    delimiters.set_sort(";");
    let changed = QueryRequest::with_config(
        ParameterBag::from_query_str(query),
        QueryConfig::default().with_delimiters(delimiters),
    );
    let baseline = QueryRequest::from_query_str(query);

    assert_eq!(changed.sorts(), vec!["a", "b,c"]);
    assert_eq!(baseline.sorts(), vec!["a;b", "c"]);

    assert_eq!(changed.includes(), baseline.includes());
    assert_eq!(changed.appends(), baseline.appends());
    assert_eq!(changed.fields(), baseline.fields());
    assert_eq!(changed.filters(), baseline.filters());
    assert_eq!(changed.fields(), vec![Column::new("a;b"), Column::new("c")]);
}

#[test]
fn test_zero_is_a_value_everywhere() {
    let request = QueryRequest::from_query_str("include=0&sort=0&fields=0&filter[n]=0");

    assert_eq!(request.includes(), vec!["0"]);
    assert_eq!(request.sorts(), vec!["0"]);
    assert_eq!(request.fields(), vec![Column::new("0")]);
    assert_eq!(request.filters().get("n"), Some(&text("0")));
}

#[test]
fn test_delimiter_inside_literal_value_still_splits() {
    let request = QueryRequest::from_query_str("filter[name]=Doe%2C%20John");
    assert_eq!(
        request.filters().get("name"),
        Some(&FilterValue::Sequence(vec![text("Doe"), text(" John")]))
    );
}

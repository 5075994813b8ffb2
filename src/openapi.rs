//! OpenAPI descriptions of the query parameters.
//!
//! Parameter names are configurable, so they cannot be derived with
//! `#[derive(IntoParams)]`. [`query_parameters`] builds them from a
//! [`QueryConfig`] instead; add the result to an operation when assembling the
//! spec:
//!
//! ```rust,ignore
//! let mut operation = OperationBuilder::new()
//!     .parameters(Some(querycrate::openapi::query_parameters(&config)))
//!     .build();
//! ```

use utoipa::openapi::{
    RefOr, Required,
    path::{Parameter, ParameterBuilder, ParameterIn, ParameterStyle},
    schema::{ObjectBuilder, Schema, Type},
};

use crate::config::QueryConfig;

fn string_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(Type::String).build()))
}

fn list_parameter(name: &str, delimiter: &str, what: &str, example: &str) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(format!(
            "{what}, separated by `{delimiter}`. Example: `{name}={example}`"
        )))
        .schema(Some(string_schema()))
        .build()
}

/// Query parameters understood by [`QueryRequest`](crate::QueryRequest).
#[must_use]
pub fn query_parameters(config: &QueryConfig) -> Vec<Parameter> {
    let names = &config.parameters;
    let delimiters = &config.delimiters;
    let example = |items: &[&str], delimiter: &str| items.join(delimiter);

    let filter = ParameterBuilder::new()
        .name(&names.filter)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(format!(
            "Filters keyed by name, e.g. `{0}[status]=active{1}pending&{0}[verified]=true`. \
             Values containing `{1}` become lists; `true` and `false` become booleans.",
            names.filter,
            delimiters.filter()
        )))
        .style(Some(ParameterStyle::DeepObject))
        .explode(Some(true))
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new().schema_type(Type::Object).build(),
        ))))
        .build();

    vec![
        list_parameter(
            &names.include,
            delimiters.include(),
            "Relations to include",
            &example(&["posts", "comments"], delimiters.include()),
        ),
        list_parameter(
            &names.append,
            delimiters.append(),
            "Attributes to append",
            &example(&["full_name"], delimiters.append()),
        ),
        list_parameter(
            &names.fields,
            delimiters.fields(),
            "Columns to select, optionally `table.column`",
            &example(&["id", "name"], delimiters.fields()),
        ),
        list_parameter(
            &names.sort,
            delimiters.sort(),
            "Sort columns, prefix with `-` for descending",
            &example(&["-created_at", "name"], delimiters.sort()),
        ),
        filter,
    ]
}

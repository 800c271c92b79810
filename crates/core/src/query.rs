//! Parsing of query parameters.
//!
//! Each helper looks up a single parameter in the decoded query pairs. A missing
//! parameter yields `Ok(None)`; a repeated or malformed one is an error.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

fn single<'a>(query: &'a [(String, String)], name: &str) -> Result<Option<&'a str>> {
    let values: Vec<&str> = query
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .collect();
    match values.as_slice() {
        [] => Ok(None),
        [value] => Ok(Some(value)),
        _ => Err(Error::invalid_parameter(format!(
            "expected at most one value for parameter '{name}' but got {}",
            values.len()
        ))),
    }
}

fn invalid(value: &str, name: &str, what: &str, cause: impl core::fmt::Display) -> Error {
    Error::invalid_parameter(format!(
        "value '{value}' isn't valid for the '{name}' parameter because it isn't {what}: {cause}"
    ))
}

pub fn parse_string(query: &[(String, String)], name: &str) -> Result<Option<String>> {
    Ok(single(query, name)?.map(str::to_string))
}

pub fn parse_integer(query: &[(String, String)], name: &str) -> Result<Option<i32>> {
    single(query, name)?
        .map(|value| {
            value
                .parse::<i32>()
                .map_err(|e| invalid(value, name, "an integer", e))
        })
        .transpose()
}

pub fn parse_float(query: &[(String, String)], name: &str) -> Result<Option<f64>> {
    single(query, name)?
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|e| invalid(value, name, "a float", e))
        })
        .transpose()
}

pub fn parse_boolean(query: &[(String, String)], name: &str) -> Result<Option<bool>> {
    single(query, name)?
        .map(|value| match value {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(invalid(value, name, "a boolean", "unrecognized literal")),
        })
        .transpose()
}

pub fn parse_date(query: &[(String, String)], name: &str) -> Result<Option<DateTime<Utc>>> {
    single(query, name)?
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|e| invalid(value, name, "a date", e))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_parameters_are_none() {
        let q = query(&[("search", "name like 'my%'")]);
        assert_eq!(parse_integer(&q, "page").unwrap(), None);
        assert_eq!(parse_string(&q, "order").unwrap(), None);
    }

    #[test]
    fn parses_typed_values() {
        let q = query(&[
            ("page", "3"),
            ("ratio", "0.5"),
            ("managed", "true"),
            ("since", "2020-01-02T03:04:05Z"),
            ("search", "name = 'a'"),
        ]);
        assert_eq!(parse_integer(&q, "page").unwrap(), Some(3));
        assert_eq!(parse_float(&q, "ratio").unwrap(), Some(0.5));
        assert_eq!(parse_boolean(&q, "managed").unwrap(), Some(true));
        assert_eq!(
            parse_date(&q, "since").unwrap().unwrap().to_rfc3339(),
            "2020-01-02T03:04:05+00:00"
        );
        assert_eq!(parse_string(&q, "search").unwrap().as_deref(), Some("name = 'a'"));
    }

    #[test]
    fn repeated_parameter_is_rejected() {
        let q = query(&[("size", "1"), ("size", "2")]);
        let err = parse_integer(&q, "size").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected at most one value for parameter 'size' but got 2"
        );
    }

    #[test]
    fn malformed_integer_is_rejected() {
        let q = query(&[("page", "first")]);
        let err = parse_integer(&q, "page").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("value 'first' isn't valid for the 'page' parameter because it isn't an integer")
        );
    }
}

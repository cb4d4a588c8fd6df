use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use std::fmt::Display;

/// A non-null scalar cell value. Nulls are modelled as `Option::None` around it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean values (true/false)
    Bool(bool),
    /// Every numeric cell, integral or not
    Number(f64),
    /// Text, including error literals such as `#DIV/0!`
    Text(String),
    /// Date and time
    DateTime(NaiveDateTime),
    /// Date without time component
    Date(NaiveDate),
    /// Time without date component
    Time(NaiveTime),
}

impl Value {
    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number` value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{}", value),
            Value::Number(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{}", value),
            Value::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            Value::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            Value::Time(value) => write!(f, "{}", value.format("%H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_spreadsheet_rendering() {
        assert_eq!(Value::Number(40.0).to_string(), "40");
        assert_eq!(Value::Number(12.5).to_string(), "12.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-03-01");
        let datetime = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(Value::DateTime(datetime).to_string(), "2024-03-01 08:30:00");
    }

    #[test]
    fn accessors_only_match_their_variant() {
        assert_eq!(Value::from("MSKU1234567").as_text(), Some("MSKU1234567"));
        assert_eq!(Value::from(3.0).as_text(), None);
        assert_eq!(Value::from(3.0).as_number(), Some(3.0));
        assert_eq!(Value::from(false).as_number(), None);
    }
}

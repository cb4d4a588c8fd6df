use crate::spreadsheet::reference::index_to_reference;
use crate::table::Value;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// Types of cell data in xlsx worksheets.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Analyzes format codes for date/time patterns.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' if !is_escaped => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_literal && !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_color && !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }

    fn is_1904(&self) -> bool {
        matches!(self, Self::NumberDateTime1904 | Self::NumberDate1904 | Self::NumberTime1904)
    }
}

/// Represents a single cell in a worksheet with position, type, and raw value.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    /// Cell data type
    pub(crate) kind: CellType,
    /// Cell value as stored in the XML
    pub(crate) value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Converts cell value to boolean (1 = true, other = false).
    pub(crate) fn to_boolean(&self) -> bool {
        self.value == "1"
    }

    /// Converts cell value to double-precision floating point.
    pub(crate) fn to_double(&self) -> Result<f64, String> {
        self.value.parse::<f64>().map_err(|_| format!("parse '{}' to double failed", self.value))
    }

    /// Converts a serial number cell to a date-time in its date system.
    pub(crate) fn to_datetime(&self) -> Result<NaiveDateTime, String> {
        serial_to_datetime(self.to_double()?, self.kind.is_1904())
            .ok_or_else(|| format!("parse '{}' to datetime failed", self.value))
    }

    /// Converts an ISO 8601 date or date-time string (`t="d"` cells).
    pub(crate) fn to_iso_value(&self) -> Result<Value, String> {
        if self.value.contains('T') {
            NaiveDateTime::parse_from_str(&self.value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(Value::DateTime)
                .map_err(|_| format!("parse '{}' to NaiveDateTime failed", self.value))
        } else {
            NaiveDate::parse_from_str(&self.value, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| format!("parse '{}' to NaiveDate failed", self.value))
        }
    }

    /// Resolves the raw cell into a table value. Shared string cells are looked
    /// up in `shared_strings`.
    pub(crate) fn to_value(&self, shared_strings: &[String]) -> Result<Option<Value>, String> {
        let value = match self.kind {
            CellType::Empty => return Ok(None),
            CellType::Boolean => Value::Bool(self.to_boolean()),
            CellType::Number => Value::Number(self.to_double()?),
            CellType::NumberDateTime1900 | CellType::NumberDateTime1904 => Value::DateTime(self.to_datetime()?),
            CellType::NumberDate1900 | CellType::NumberDate1904 => Value::Date(self.to_datetime()?.date()),
            CellType::NumberTime1900 | CellType::NumberTime1904 => Value::Time(self.to_datetime()?.time()),
            CellType::IsoDateTime => self.to_iso_value()?,
            CellType::InlineString | CellType::Error => Value::Text(self.value.to_owned()),
            CellType::SharedString => {
                let index = self.value.parse::<usize>()
                    .map_err(|_| format!("parse '{}' to shared string index failed", self.value))?;
                let text = shared_strings.get(index)
                    .ok_or_else(|| format!("shared string index {} out of range", index))?;
                Value::Text(text.to_owned())
            }
        };
        Ok(Some(value))
    }
}

/// Largest serial magnitude handed to chrono, in days. Anything larger lies
/// past chrono's last representable year.
const MAX_SERIAL_DAYS: f64 = 1e11;

/// 1899-12-30, day zero of the 1900 date system once the Lotus 1-2-3 leap year bug is accounted for.
fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("NaiveDate Literal")
}

/// Converts an Excel serial number to a date-time.
/// Handles the Lotus 1-2-3 leap year bug for the 1900 epoch.
pub(crate) fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let days = serial.trunc() as i64;
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let milliseconds = (serial.fract() * 86_400_000f64).round() as i64;
    epoch()
        .checked_add_signed(Duration::try_days(days.checked_add(offset)?)?)?
        .checked_add_signed(Duration::try_milliseconds(milliseconds)?)
}

/// Converts a date-time to a serial number in the 1900 date system.
pub(crate) fn datetime_to_serial(datetime: NaiveDateTime) -> f64 {
    let elapsed = datetime - epoch();
    let mut days = elapsed.num_days();
    let milliseconds = (elapsed - Duration::days(days)).num_milliseconds();
    if days < 61 {
        days -= 1;
    }
    days as f64 + milliseconds as f64 / 86_400_000f64
}

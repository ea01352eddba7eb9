//! Locale-aware number, currency and date formatting.
//!
//! The defaults match the site this engine was built for: pt-BR
//! grouping (`1.234,56`), the real (`R$`), and `dd/mm/yyyy` dates.
//! Engines for other audiences inject a different [`Locale`].
use crate::error::Error;
use crate::lexer::Value;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub currency_symbol: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl Locale {
    pub fn pt_br() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
            currency_symbol: "R$".into(),
        }
    }

    pub fn en_us() -> Self {
        Self {
            thousands_separator: ',',
            decimal_separator: '.',
            currency_symbol: "$".into(),
        }
    }
}

// Insert the grouping separator every three digits, counting from
// the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }

    grouped
}

/// Locale-grouped number, up to three fraction digits, trailing
/// zeros dropped. `1234.5` formats as `1.234,5` under pt-BR.
pub fn format_number(locale: &Locale, value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').expect("fixed-point format");
    let frac = frac_part.trim_end_matches('0');

    let mut output = String::new();
    if value.is_sign_negative() && value != 0.0 {
        output.push('-');
    }

    output.push_str(&group_digits(int_part, locale.thousands_separator));

    if !frac.is_empty() {
        output.push(locale.decimal_separator);
        output.push_str(frac);
    }

    output
}

/// Currency with the locale symbol and exactly two fraction digits,
/// e.g. `R$ 1.234,56`.
pub fn format_currency(locale: &Locale, value: f64) -> String {
    if !value.is_finite() {
        return format!("{} {}", locale.currency_symbol, value);
    }

    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').expect("fixed-point format");

    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };

    format!(
        "{}{} {}{}{}",
        sign,
        locale.currency_symbol,
        group_digits(int_part, locale.thousands_separator),
        locale.decimal_separator,
        frac_part
    )
}

/// Format a date value as `dd/mm/yyyy`.
///
/// Accepts an RFC 3339 timestamp, a `yyyy-mm-dd` date, a
/// `yyyy-mm-dd hh:mm:ss` timestamp, or an integer of milliseconds
/// since the epoch. Anything else is a helper error, which the render
/// boundary turns into the visible error fragment.
pub fn format_date(value: &Value) -> Result<String, Error> {
    let output = format_description!("[day]/[month]/[year]");

    match value {
        Value::String(s) => {
            let s = s.trim();

            if let Ok(datetime) = OffsetDateTime::parse(s, &Rfc3339) {
                return Ok(datetime.format(&output)?);
            }

            if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
                return Ok(date.format(&output)?);
            }

            if let Ok(datetime) = PrimitiveDateTime::parse(
                s,
                format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            ) {
                return Ok(datetime.format(&output)?);
            }

            Err(Error::helper(
                "formatDate",
                format!("\"{}\" is not a recognizable date", s),
            ))
        }

        Value::Integer(millis) => {
            let datetime = OffsetDateTime::from_unix_timestamp_nanos(*millis as i128 * 1_000_000)
                .map_err(|err| Error::helper("formatDate", err))?;

            Ok(datetime.format(&output)?)
        }

        value => Err(Error::helper(
            "formatDate",
            format!("cannot format {:?} as a date", value),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_number_pt_br() {
        let locale = Locale::pt_br();
        assert_eq!(format_number(&locale, 1234.0), "1.234");
        assert_eq!(format_number(&locale, 1234567.0), "1.234.567");
        assert_eq!(format_number(&locale, 1234.5), "1.234,5");
        assert_eq!(format_number(&locale, -42.0), "-42");
        assert_eq!(format_number(&locale, 0.0), "0");
    }

    #[test]
    fn test_format_number_en_us() {
        let locale = Locale::en_us();
        assert_eq!(format_number(&locale, 1234.0), "1,234");
    }

    #[test]
    fn test_format_currency() {
        let locale = Locale::pt_br();
        assert_eq!(format_currency(&locale, 1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(&locale, 50000.0), "R$ 50.000,00");
        assert_eq!(format_currency(&locale, -5.0), "-R$ 5,00");
    }

    #[test]
    fn test_format_date() -> Result<(), Error> {
        assert_eq!(
            format_date(&Value::String("2024-03-09".into()))?,
            "09/03/2024"
        );
        assert_eq!(
            format_date(&Value::String("2024-03-09T15:30:00Z".into()))?,
            "09/03/2024"
        );
        Ok(())
    }

    #[test]
    fn test_format_date_unparsable() {
        assert!(format_date(&Value::String("not a date".into())).is_err());
        assert!(format_date(&Value::Null).is_err());
    }
}

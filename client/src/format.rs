//! Locale-aware rendering of amounts, percentages and timestamps.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::TransactionType;

const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locale {
  pub group_separator: char,
  pub decimal_separator: char,
  pub currency_symbol: &'static str,
  pub months_short: [&'static str; 12],
  /// Month names as used inside a full date ("16 октября").
  pub months_long: [&'static str; 12],
  pub long_date_suffix: &'static str,
  pub day_first: bool,
}

impl Locale {
  pub fn ru() -> Self {
    Self {
      group_separator: NBSP,
      decimal_separator: ',',
      currency_symbol: "₽",
      months_short: ["янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.", "дек."],
      months_long: [
        "января", "февраля", "марта", "апреля", "мая", "июня",
        "июля", "августа", "сентября", "октября", "ноября", "декабря",
      ],
      long_date_suffix: " г.",
      day_first: true,
    }
  }

  pub fn en() -> Self {
    Self {
      group_separator: ',',
      decimal_separator: '.',
      currency_symbol: "₽",
      months_short: ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
      months_long: [
        "January", "February", "March", "April", "May", "June",
        "July", "August", "September", "October", "November", "December",
      ],
      long_date_suffix: "",
      day_first: false,
    }
  }
}

impl Default for Locale {
  fn default() -> Self {
    Self::ru()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Formatter {
  locale: Locale,
}

impl Formatter {
  pub fn new(locale: Locale) -> Self {
    Self { locale }
  }

  pub fn locale(&self) -> &Locale {
    &self.locale
  }

  fn group_digits(&self, digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
      if idx > 0 && (digits.len() - idx) % 3 == 0 {
        grouped.push(self.locale.group_separator);
      }
      grouped.push(ch);
    }
    grouped
  }

  /// Two fraction digits, grouped thousands, no currency symbol.
  pub fn format_number(&self, value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
      "{}{}{}{}",
      if negative { "-" } else { "" },
      self.group_digits(int_part),
      self.locale.decimal_separator,
      frac_part
    )
  }

  pub fn format_currency(&self, value: Decimal) -> String {
    format!("{}{}{}", self.format_number(value), NBSP, self.locale.currency_symbol)
  }

  /// Projects a stored magnitude with the sign of its transaction type.
  pub fn format_signed(&self, amount: Decimal, kind: TransactionType) -> String {
    format!("{}{}", kind.sign(), self.format_currency(amount.abs()))
  }

  pub fn format_percent(&self, percent: f64) -> String {
    let text = format!("{:.1}", percent);
    format!("{}%", text.replace('.', &self.locale.decimal_separator.to_string()))
  }

  /// "05 янв." / "Jan 05". Unparseable timestamps render as an em dash.
  pub fn format_short_date(&self, timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
      Some(ts) => {
        let month = self.locale.months_short[ts.month0() as usize];
        if self.locale.day_first {
          format!("{:02} {}", ts.day(), month)
        } else {
          format!("{} {:02}", month, ts.day())
        }
      }
      None => "—".to_string(),
    }
  }

  pub fn format_long_date(&self, date: NaiveDate) -> String {
    let month = self.locale.months_long[date.month0() as usize];
    if self.locale.day_first {
      format!("{:02} {} {}{}", date.day(), month, date.year(), self.locale.long_date_suffix)
    } else {
      format!("{} {:02}, {}{}", month, date.day(), date.year(), self.locale.long_date_suffix)
    }
  }

  pub fn format_clock(&self, now: NaiveDateTime) -> String {
    format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
  }
}

/// Parses server timestamps, with or without an offset.
/// Offset-carrying values are converted to local time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
    return Some(ts.with_timezone(&Local).naive_local());
  }
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

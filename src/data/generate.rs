//! Generated test data: unique names, emails and the date strings the
//! application's inputs and date pickers expect.

use chrono::{Days, Local, NaiveDate, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_PROJECT_PREFIX: &str = "Automa_Test";
pub const DEFAULT_DESCRIPTION: &str = "Auto_Description";

/// Random uppercase alphanumeric suffix.
pub fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// `YYMMDD` of the current UTC date.
fn date_stamp() -> String {
    Utc::now().format("%y%m%d").to_string()
}

/// `prefix_YYMMDD_XXXXXX`
pub fn project_name(prefix: &str) -> String {
    format!("{}_{}_{}", prefix, date_stamp(), random_suffix(6))
}

/// `prefix_YYMMDD_XXXXXX@gmail.com`
pub fn email(prefix: &str) -> String {
    format!("{}_{}_{}@gmail.com", prefix, date_stamp(), random_suffix(6))
}

/// `prefix_<epoch millis>@domain`, unique per invocation within a run.
pub fn timestamped_email(prefix: &str, domain: &str) -> String {
    format!("{}@{}", timestamped(prefix), domain)
}

/// `prefix_<epoch millis>`
pub fn timestamped(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}

/// `base_XXXX`, with a default base when none is given.
pub fn description(base: Option<&str>) -> String {
    let base = base.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_DESCRIPTION);
    format!("{}_{}", base, random_suffix(4))
}

/// `dd-mm-yyyy`, the format the project date inputs accept when typed.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn start_date() -> String {
    format_dmy(today())
}

/// Thirty days after today.
pub fn end_date() -> String {
    format_dmy(days_after(today(), 30))
}

pub fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

/// Accessible label of a date-picker day button, e.g. `5 March 2026`.
pub fn picker_label(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Filter checkbox value for a display name: `Garden Style` -> `garden_style`.
pub fn normalize_filter_value(display: &str) -> String {
    display
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn random_three_digits() -> u32 {
    rand::thread_rng().gen_range(100..1000)
}

/// Value written into cell `index` of the first bid row.
pub fn bid_cell_value(index: usize) -> String {
    match index {
        0 => "Appliance".to_string(),
        1..=3 => format!("UpdatedValue_{}", random_three_digits()),
        4 => "110".to_string(),
        _ => format!("Updated_{}", index + 1),
    }
}

/// Pick one of `options`, preferring `preferred` when it is offered.
pub fn choose_option<'a>(options: &'a [String], preferred: Option<&str>) -> Option<&'a String> {
    preferred
        .and_then(|wanted| options.iter().find(|o| o.as_str() == wanted))
        .or_else(|| options.choose(&mut rand::thread_rng()))
}

pub fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    rand::thread_rng().gen_range(0..len)
}

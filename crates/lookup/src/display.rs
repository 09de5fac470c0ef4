//! Display adapter: turns a [`LookupState`] into terminal text.
//!
//! Nothing here feeds back into the controller; it only reads state.

use crate::state::{AirdropRecord, LookupState};

const MIN_FRACTION_DIGITS: usize = 2;
const MAX_FRACTION_DIGITS: usize = 4;

/// Separators used when rendering amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group: char,
    pub decimal: char,
}

impl NumberLocale {
    pub const EN_US: Self = Self {
        group: ',',
        decimal: '.',
    };

    pub const DE_DE: Self = Self {
        group: '.',
        decimal: ',',
    };

    /// Separators for a BCP 47 language tag; unknown tags fall back to `en-US`.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => Self::DE_DE,
            _ => Self::EN_US,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Which card the presentation layer shows for a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    NotEligible,
}

impl Eligibility {
    pub fn of(record: &AirdropRecord) -> Self {
        if record.is_eligible() {
            Eligibility::Eligible
        } else {
            Eligibility::NotEligible
        }
    }
}

/// Format a token amount in the default locale.
///
/// `0` and a missing value both render as `"0"`.
pub fn format_amount(value: Option<f64>) -> String {
    format_amount_in(value, NumberLocale::default())
}

pub fn format_amount_in(value: Option<f64>, locale: NumberLocale) -> String {
    let value = match value {
        None => return "0".to_string(),
        Some(v) if v == 0.0 => return "0".to_string(),
        Some(v) => v,
    };
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < MIN_FRACTION_DIGITS {
        fraction.push('0');
    }

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(locale.group);
        }
        out.push(digit);
    }
    out.push(locale.decimal);
    out.push_str(&fraction);
    out
}

/// Render the full view for a state.
pub fn render(state: &LookupState, locale: NumberLocale) -> String {
    match state {
        LookupState::Idle => "Enter a wallet address (0x...) and press Enter.".to_string(),
        LookupState::Loading => "Loading airdrop data...".to_string(),
        LookupState::Failed(err) => format!("Error: {err}"),
        LookupState::Success(record) => render_record(record, locale),
    }
}

fn render_record(record: &AirdropRecord, locale: NumberLocale) -> String {
    if Eligibility::of(record) == Eligibility::NotEligible {
        return "This wallet is not eligible for the airdrop.".to_string();
    }

    let claim_status = if record.is_claimed {
        "Claimed"
    } else {
        "Not claimed"
    };
    let pre_claim = if record.pre_claim_status { "Yes" } else { "No" };

    [
        format!(
            "Total allocation:  {}",
            format_amount_in(Some(record.total_allocation), locale)
        ),
        format!(
            "Claimed amount:    {}",
            format_amount_in(Some(record.claimed_amount), locale)
        ),
        format!("Claim status:      {claim_status}"),
        format!("Pre-claim status:  {pre_claim}"),
        format!("Vesting days left: {}", record.days_left_vesting),
    ]
    .join("\n")
}

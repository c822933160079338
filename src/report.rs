//! Plain-text rendering of metrics for terminals and logs.
use crate::stats::{Metrics, RegionSummary};
use num_format::{Locale, ToFormattedString};
use std::fmt::Write;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// `1234567` -> `1,234,567` (en) / `1.234.567` (de).
pub fn format_count(n: u128, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    n.to_formatted_string(locale)
}

/// Like [`format_count`] but keeps the sign of a negative residual.
pub fn format_signed(n: i128, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    n.to_formatted_string(locale)
}

/// Two decimals with the locale's separator; `N/A` when undefined.
pub fn format_pct(v: Option<f64>, locale_tag: &str) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let (_, sep) = map_locale(locale_tag);
            let s = format!("{:.2}%", x);
            if sep == '.' { s } else { s.replace('.', &sep.to_string()) }
        }
        _ => "N/A".to_string(),
    }
}

pub fn render_summary(m: &Metrics, locale_tag: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Confirmed  {}", format_count(m.total_confirmed, locale_tag));
    let _ = writeln!(
        out,
        "Deaths     {}  ({})",
        format_count(m.total_deaths, locale_tag),
        format_pct(m.pct_deaths(), locale_tag)
    );
    let _ = writeln!(
        out,
        "Recovered  {}  ({})",
        format_count(m.total_recovered, locale_tag),
        format_pct(m.pct_recovered(), locale_tag)
    );
    let _ = writeln!(
        out,
        "Unknown    {}  ({})",
        format_signed(m.total_unknown, locale_tag),
        format_pct(m.pct_unknown(), locale_tag)
    );
    out
}

pub fn render_regions(groups: &[RegionSummary], locale_tag: &str) -> String {
    let mut out = String::new();
    for g in groups {
        let m = &g.metrics;
        let _ = writeln!(
            out,
            "{} • countries={}  confirmed={}  deaths={} ({})  recovered={} ({})  unknown={} ({})",
            g.region,
            g.countries,
            format_count(m.total_confirmed, locale_tag),
            format_count(m.total_deaths, locale_tag),
            format_pct(m.pct_deaths(), locale_tag),
            format_count(m.total_recovered, locale_tag),
            format_pct(m.pct_recovered(), locale_tag),
            format_signed(m.total_unknown, locale_tag),
            format_pct(m.pct_unknown(), locale_tag),
        );
    }
    out
}

//! Locale-aware number formatting.
//!
//! Announcement text for pie slices includes a percentage formatted with the
//! decimal separator of the user's locale, so that a German screen-reader
//! user hears "21,0" where an English user hears "21.0".

/// Formats numbers with a locale-appropriate decimal separator.
///
/// # Example
///
/// ```
/// use pieview::locale::NumberFormatter;
///
/// let formatter = NumberFormatter::with_locale("de-DE");
/// assert_eq!(formatter.format_with_precision(21.0, 1), "21,0");
///
/// let formatter = NumberFormatter::with_locale("en-US");
/// assert_eq!(formatter.format_with_precision(21.0, 1), "21.0");
/// ```
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    decimal_sep: char,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberFormatter {
    /// Create a formatter for the system locale.
    ///
    /// Falls back to `en-US` conventions when the locale cannot be detected.
    pub fn new() -> Self {
        let locale = sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string());
        Self::with_locale(&locale)
    }

    /// Create a formatter for an explicit locale tag such as `"fr-FR"`.
    pub fn with_locale(locale: &str) -> Self {
        Self {
            decimal_sep: Self::decimal_separator_for(locale),
        }
    }

    /// The decimal separator this formatter uses.
    pub fn decimal_separator(&self) -> char {
        self.decimal_sep
    }

    /// Format a floating-point number with the given number of decimal places.
    pub fn format_with_precision(&self, value: f64, decimal_places: usize) -> String {
        let formatted = format!("{:.prec$}", value, prec = decimal_places);
        if self.decimal_sep == '.' {
            return formatted;
        }
        formatted.replace('.', &self.decimal_sep.to_string())
    }

    fn decimal_separator_for(locale: &str) -> char {
        // Locales writing decimals with a comma. The language subtag is
        // enough; regional variants follow their language's convention.
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or(locale)
            .to_ascii_lowercase();
        let comma_decimal = matches!(
            language.as_str(),
            "de" | "fr" | "es" | "it" | "pt" | "nl" | "pl" | "ru" | "sv" | "da" | "fi" | "no"
                | "nb" | "nn" | "cs" | "sk" | "hu" | "el" | "tr" | "uk" | "ro" | "bg" | "hr"
                | "sl" | "sr" | "lt" | "lv" | "et" | "is" | "id" | "vi"
        );
        if comma_decimal { ',' } else { '.' }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_locales() {
        let f = NumberFormatter::with_locale("en-US");
        assert_eq!(f.decimal_separator(), '.');
        assert_eq!(f.format_with_precision(12.345, 1), "12.3");
        assert_eq!(f.format_with_precision(21.0, 1), "21.0");
    }

    #[test]
    fn test_comma_locales() {
        for tag in ["de-DE", "fr_FR", "pt-BR", "ru"] {
            let f = NumberFormatter::with_locale(tag);
            assert_eq!(f.decimal_separator(), ',', "locale {tag}");
        }
        let f = NumberFormatter::with_locale("de-DE");
        assert_eq!(f.format_with_precision(21.0, 1), "21,0");
    }

    #[test]
    fn test_rounding() {
        let f = NumberFormatter::with_locale("en-US");
        assert_eq!(f.format_with_precision(33.333333, 1), "33.3");
        assert_eq!(f.format_with_precision(66.666666, 1), "66.7");
        assert_eq!(f.format_with_precision(100.0, 1), "100.0");
    }

    #[test]
    fn test_zero_precision() {
        let f = NumberFormatter::with_locale("de-DE");
        assert_eq!(f.format_with_precision(42.6, 0), "43");
    }
}

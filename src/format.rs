//! Distance formatting for the zone panel.
//!
//! Values are whole light-seconds. Large values may be abbreviated to `k`
//! or `M`, in which case the exact value is returned alongside for hover
//! text.

/// Label placed before the exact value in hover text.
pub const EXACT_LABEL: &str = "Exact distance";

const ABBREVIATE_FROM: u64 = 10_000;
const MILLIONS_FROM: u64 = 1_000_000;

/// A formatted distance plus, when abbreviated, the exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDistance {
    pub display: String,
    pub exact: Option<String>,
}

/// Thousands grouping for integer display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub group_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ',',
        }
    }
}

impl NumberFormat {
    /// `1234567` → `1,234,567`.
    pub fn group(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        out
    }

    pub fn format_distance(&self, value: u64, abbreviate: bool) -> FormattedDistance {
        if !abbreviate || value < ABBREVIATE_FROM {
            return FormattedDistance {
                display: self.group(value),
                exact: None,
            };
        }

        let display = if value >= MILLIONS_FROM {
            format!("{:.2}M", value as f64 / 1_000_000.0)
        } else {
            format!("{:.1}k", value as f64 / 1_000.0)
        };

        FormattedDistance {
            display,
            exact: Some(format!("{}: {} ls", EXACT_LABEL, self.group(value))),
        }
    }
}

/// Format with the default `,` grouping.
pub fn format_distance(value: u64, abbreviate: bool) -> FormattedDistance {
    NumberFormat::default().format_distance(value, abbreviate)
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Placeholder convention expected by the target SQL engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindStyle {
    /// `?` (MySQL, SQLite)
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL)
    Dollar,
    /// `:_1_field` (Oracle, SQLite named)
    Colon,
    /// `@_1_field` (SQL Server)
    At,
}

impl BindStyle {
    pub const ALL: [BindStyle; 4] = [
        BindStyle::Question,
        BindStyle::Dollar,
        BindStyle::Colon,
        BindStyle::At,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BindStyle::Question => "question",
            BindStyle::Dollar => "dollar",
            BindStyle::Colon => "colon",
            BindStyle::At => "at",
        }
    }
}

impl fmt::Display for BindStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "question" | "?" => Ok(BindStyle::Question),
            "dollar" | "$" => Ok(BindStyle::Dollar),
            "colon" | ":" => Ok(BindStyle::Colon),
            "at" | "@" => Ok(BindStyle::At),
            other => Err(format!(
                "Unknown bind style '{other}', expected one of: question, dollar, colon, at"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for style in BindStyle::ALL {
            assert_eq!(style.as_str().parse::<BindStyle>().unwrap(), style);
        }
        assert_eq!("$".parse::<BindStyle>().unwrap(), BindStyle::Dollar);
        assert!("percent".parse::<BindStyle>().is_err());
    }

    #[test]
    fn test_default_is_question() {
        assert_eq!(BindStyle::default(), BindStyle::Question);
    }
}

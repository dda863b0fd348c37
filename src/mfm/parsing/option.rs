//! Per-family parser switches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A markup family that can be switched on or off as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxFamily {
    Quote,
    Center,
    Big,
    Bold,
    Small,
    Italic,
    Strike,
    Function,
    InlineCode,
    Emoji,
    Mention,
    Url,
}

impl SyntaxFamily {
    pub const ALL: [SyntaxFamily; 12] = [
        SyntaxFamily::Quote,
        SyntaxFamily::Center,
        SyntaxFamily::Big,
        SyntaxFamily::Bold,
        SyntaxFamily::Small,
        SyntaxFamily::Italic,
        SyntaxFamily::Strike,
        SyntaxFamily::Function,
        SyntaxFamily::InlineCode,
        SyntaxFamily::Emoji,
        SyntaxFamily::Mention,
        SyntaxFamily::Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SyntaxFamily::Quote => "quote",
            SyntaxFamily::Center => "center",
            SyntaxFamily::Big => "big",
            SyntaxFamily::Bold => "bold",
            SyntaxFamily::Small => "small",
            SyntaxFamily::Italic => "italic",
            SyntaxFamily::Strike => "strike",
            SyntaxFamily::Function => "function",
            SyntaxFamily::InlineCode => "inline-code",
            SyntaxFamily::Emoji => "emoji",
            SyntaxFamily::Mention => "mention",
            SyntaxFamily::Url => "url",
        }
    }

    /// Key of this family in the `[syntax]` config table.
    pub fn config_key(self) -> String {
        self.name().replace('-', "_")
    }
}

impl fmt::Display for SyntaxFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SyntaxFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SyntaxFamily::ALL
            .into_iter()
            .find(|family| family.name() == wanted)
            .ok_or_else(|| format!("unknown syntax family '{}'", s))
    }
}

/// Parser configuration: one switch per [`SyntaxFamily`], all on by default.
///
/// Tokens of a disabled family are echoed back as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOption {
    pub quote: bool,
    pub center: bool,
    pub big: bool,
    pub bold: bool,
    pub small: bool,
    pub italic: bool,
    pub strike: bool,
    pub function: bool,
    pub inline_code: bool,
    pub emoji: bool,
    pub mention: bool,
    pub url: bool,
}

impl ParseOption {
    pub fn all_enabled() -> Self {
        Self::uniform(true)
    }

    pub fn all_disabled() -> Self {
        Self::uniform(false)
    }

    fn uniform(enabled: bool) -> Self {
        Self {
            quote: enabled,
            center: enabled,
            big: enabled,
            bold: enabled,
            small: enabled,
            italic: enabled,
            strike: enabled,
            function: enabled,
            inline_code: enabled,
            emoji: enabled,
            mention: enabled,
            url: enabled,
        }
    }

    pub fn with(mut self, family: SyntaxFamily, enabled: bool) -> Self {
        *self.flag_mut(family) = enabled;
        self
    }

    pub fn is_enabled(&self, family: SyntaxFamily) -> bool {
        match family {
            SyntaxFamily::Quote => self.quote,
            SyntaxFamily::Center => self.center,
            SyntaxFamily::Big => self.big,
            SyntaxFamily::Bold => self.bold,
            SyntaxFamily::Small => self.small,
            SyntaxFamily::Italic => self.italic,
            SyntaxFamily::Strike => self.strike,
            SyntaxFamily::Function => self.function,
            SyntaxFamily::InlineCode => self.inline_code,
            SyntaxFamily::Emoji => self.emoji,
            SyntaxFamily::Mention => self.mention,
            SyntaxFamily::Url => self.url,
        }
    }

    fn flag_mut(&mut self, family: SyntaxFamily) -> &mut bool {
        match family {
            SyntaxFamily::Quote => &mut self.quote,
            SyntaxFamily::Center => &mut self.center,
            SyntaxFamily::Big => &mut self.big,
            SyntaxFamily::Bold => &mut self.bold,
            SyntaxFamily::Small => &mut self.small,
            SyntaxFamily::Italic => &mut self.italic,
            SyntaxFamily::Strike => &mut self.strike,
            SyntaxFamily::Function => &mut self.function,
            SyntaxFamily::InlineCode => &mut self.inline_code,
            SyntaxFamily::Emoji => &mut self.emoji,
            SyntaxFamily::Mention => &mut self.mention,
            SyntaxFamily::Url => &mut self.url,
        }
    }
}

impl Default for ParseOption {
    fn default() -> Self {
        Self::all_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let option = ParseOption::default();
        assert!(SyntaxFamily::ALL.iter().all(|f| option.is_enabled(*f)));
    }

    #[test]
    fn test_with_toggles_one_family() {
        let option = ParseOption::default().with(SyntaxFamily::InlineCode, false);
        assert!(!option.inline_code);
        assert!(option.emoji);
    }

    #[test]
    fn test_family_names_round_trip() {
        for family in SyntaxFamily::ALL {
            assert_eq!(family.name().parse::<SyntaxFamily>(), Ok(family));
        }
        assert_eq!("inline_code".parse::<SyntaxFamily>(), Ok(SyntaxFamily::InlineCode));
        assert!("blink".parse::<SyntaxFamily>().is_err());
    }

    #[test]
    fn test_missing_fields_default_to_enabled() {
        let option: ParseOption = serde_json::from_str(r#"{"bold": false}"#).unwrap();
        assert!(!option.bold);
        assert!(option.italic);
    }
}

//! Numbered menu commands.

/// A menu entry with an explicit discriminant that the player types.
pub trait MenuCommand: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn code(self) -> u8;

    fn label(self) -> &'static str;

    /// Parse a trimmed run of ASCII digits matching one of the declared codes.
    /// Signs and leading zeros are not codes.
    fn parse(line: &str) -> Option<Self> {
        let code: u8 = menu_number(line)?.parse().ok()?;
        Self::ALL.iter().copied().find(|command| command.code() == code)
    }

    #[must_use]
    fn menu() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|command| format!("  {}. {}", command.code(), command.label()))
            .collect()
    }
}

/// Declare a `#[repr(u8)]` menu enum with its labels.
macro_rules! menu_command {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $($variant = $code,)+
        }

        impl $crate::mode::MenuCommand for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn code(self) -> u8 {
                self as u8
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

pub(crate) use menu_command;

/// The trimmed line if it is a plain number: ASCII digits, no leading zero.
fn menu_number(line: &str) -> Option<&str> {
    let line = line.trim();
    let plain = !line.is_empty()
        && !line.starts_with('0')
        && line.bytes().all(|b| b.is_ascii_digit());
    plain.then_some(line)
}

/// Render dynamic choices as numbered lines starting at 1.
#[must_use]
pub fn menu_lines<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| format!("  {}. {}", idx + 1, label.as_ref()))
        .collect()
}

/// Parse a 1-based choice among `count` dynamic options into a 0-based index.
#[must_use]
pub fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let choice: usize = menu_number(line)?.parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

#[must_use]
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    menu_command! {
        enum Sample {
            ReturnToMainMenu = 1 => "Return to the main menu",
            ExitSimulation = 2 => "Exit",
            Skip = 5 => "Skip ahead",
        }
    }

    #[test]
    fn parses_only_declared_codes() {
        assert_eq!(Sample::parse(" 1 "), Some(Sample::ReturnToMainMenu));
        assert_eq!(Sample::parse("5"), Some(Sample::Skip));
        assert_eq!(Sample::parse("3"), None);
        assert_eq!(Sample::parse("0"), None);
        assert_eq!(Sample::parse("-1"), None);
        assert_eq!(Sample::parse("+1"), None);
        assert_eq!(Sample::parse("01"), None);
        assert_eq!(Sample::parse("1 5"), None);
        assert_eq!(Sample::parse("exit"), None);
        assert_eq!(Sample::ExitSimulation.code(), 2);
    }

    #[test]
    fn menu_lists_codes_and_labels() {
        assert_eq!(
            Sample::menu(),
            vec![
                "  1. Return to the main menu".to_string(),
                "  2. Exit".to_string(),
                "  5. Skip ahead".to_string(),
            ]
        );
    }

    #[test]
    fn dynamic_choices_are_one_based() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("+2", 3), None);
        assert_eq!(parse_choice("02", 3), None);
        assert_eq!(menu_lines(&["Ford", "Ferry"])[1], "  2. Ferry");
        assert_eq!(parse_yes_no(" Y "), Some(true));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}

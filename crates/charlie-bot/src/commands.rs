//! Command table: the ordered list of patterns a message is matched against.
//!
//! Matching is ASCII case-insensitive on the trimmed message. Exact commands
//! must equal the whole text; prefix commands only match at position zero and
//! take everything after the keyword, trimmed, as their argument. Prefixes are
//! literal, so `weatherboston` is a weather lookup for `boston`.
//!
//! Entries are evaluated top to bottom and the first match wins. When adding
//! a command, place it so that no earlier prefix swallows it.

/// Recognized commands, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    UtcTime,
    LocalTime,
    Base64Encode,
    Base64Decode,
    Guid,
    Weather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    Exact,
    Prefix,
}

struct CommandEntry {
    keyword: &'static str,
    matcher: Matcher,
    command: Command,
}

const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        keyword: "utc",
        matcher: Matcher::Exact,
        command: Command::UtcTime,
    },
    CommandEntry {
        keyword: "time",
        matcher: Matcher::Exact,
        command: Command::LocalTime,
    },
    CommandEntry {
        keyword: "base64encode",
        matcher: Matcher::Prefix,
        command: Command::Base64Encode,
    },
    CommandEntry {
        keyword: "base64decode",
        matcher: Matcher::Prefix,
        command: Command::Base64Decode,
    },
    CommandEntry {
        keyword: "guid",
        matcher: Matcher::Exact,
        command: Command::Guid,
    },
    CommandEntry {
        keyword: "weather",
        matcher: Matcher::Prefix,
        command: Command::Weather,
    },
];

impl CommandEntry {
    /// Return the argument if `text` (already trimmed) matches this entry.
    fn matches<'a>(&self, text: &'a str) -> Option<&'a str> {
        match self.matcher {
            Matcher::Exact => text.eq_ignore_ascii_case(self.keyword).then_some(""),
            Matcher::Prefix => {
                // `get` returns None when the keyword length splits a multi-byte char.
                let head = text.get(..self.keyword.len())?;
                if !head.eq_ignore_ascii_case(self.keyword) {
                    return None;
                }
                text.get(self.keyword.len()..).map(str::trim)
            }
        }
    }
}

/// A message that matched the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub command: Command,
    /// Trimmed remainder after the keyword, original casing. Empty for exact commands.
    pub argument: &'a str,
}

/// Classify message text. `None` means no command matched.
pub fn classify(text: &str) -> Option<Classified<'_>> {
    let trimmed = text.trim();
    COMMANDS.iter().find_map(|entry| {
        entry.matches(trimmed).map(|argument| Classified {
            command: entry.command,
            argument,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str) -> Option<Command> {
        classify(text).map(|c| c.command)
    }

    #[test]
    fn exact_commands_ignore_case_and_surrounding_space() {
        assert_eq!(command("utc"), Some(Command::UtcTime));
        assert_eq!(command("UTC"), Some(Command::UtcTime));
        assert_eq!(command(" UTC "), Some(Command::UtcTime));
        assert_eq!(command("Time"), Some(Command::LocalTime));
        assert_eq!(command("GUID"), Some(Command::Guid));
    }

    #[test]
    fn exact_commands_reject_extra_text() {
        assert_eq!(command("utc now"), None);
        assert_eq!(command("what time"), None);
        assert_eq!(command("guids"), None);
    }

    #[test]
    fn prefix_commands_keep_argument_casing() {
        let c = classify("Base64Encode  Hello World ").unwrap();
        assert_eq!(c.command, Command::Base64Encode);
        assert_eq!(c.argument, "Hello World");

        let c = classify("WEATHER New York").unwrap();
        assert_eq!(c.command, Command::Weather);
        assert_eq!(c.argument, "New York");
    }

    #[test]
    fn prefix_must_be_at_position_zero() {
        assert_eq!(command("what is the weather"), None);
        assert_eq!(command("please base64encode x"), None);
    }

    #[test]
    fn prefix_is_literal_not_a_token() {
        let c = classify("weatherboston").unwrap();
        assert_eq!(c.command, Command::Weather);
        assert_eq!(c.argument, "boston");
    }

    #[test]
    fn prefix_argument_may_be_empty() {
        let c = classify("base64decode").unwrap();
        assert_eq!(c.command, Command::Base64Decode);
        assert_eq!(c.argument, "");
        assert_eq!(classify("weather   ").unwrap().argument, "");
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        assert_eq!(command("wéather paris"), None);
        assert_eq!(command("日本語のテキスト"), None);
        assert_eq!(command(""), None);
    }

    #[test]
    fn unmatched_text_is_none() {
        assert_eq!(command("banana"), None);
    }
}

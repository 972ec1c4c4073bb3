//! Bot command parsing.

use std::sync::LazyLock;

use regex::Regex;

/// `/name`, optionally addressed as `/name@bot`, followed by arguments.
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^/([A-Za-z0-9_]+)(?:@([A-Za-z0-9_]+))?(?:\s+(.*))?$").unwrap_or_else(|e| {
        panic!("command pattern is a compile-time constant and must parse: {e}")
    })
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    /// `/rom` with an optional device code
    Rom(Option<String>),
    SysInfo,
    Clean,
    Init,
    SetTopic,
    /// A well-formed command this bot does not handle
    Unknown(String),
}

/// True if `text` is a bot command at all (starts with `/name`).
pub fn is_command(text: &str) -> bool {
    COMMAND_RE.is_match(text.trim())
}

/// Parses `text` as a command for the bot named `bot_username`.
///
/// Returns `None` for plain text and for commands addressed to another bot.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let captures = COMMAND_RE.captures(text.trim())?;
    if let Some(target) = captures.get(2) {
        if !target.as_str().eq_ignore_ascii_case(bot_username) {
            return None;
        }
    }
    let name = captures.get(1)?.as_str().to_ascii_lowercase();
    let first_arg = captures
        .get(3)
        .and_then(|args| args.as_str().split_whitespace().next())
        .map(str::to_string);

    Some(match name.as_str() {
        "start" => Command::Start,
        "rom" => Command::Rom(first_arg),
        "sysinfo" => Command::SysInfo,
        "clean" => Command::Clean,
        "init" => Command::Init,
        "set_topic" => Command::SetTopic,
        _ => Command::Unknown(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("/start", "craft_bot"), Some(Command::Start));
        assert_eq!(parse_command("/sysinfo", "craft_bot"), Some(Command::SysInfo));
        assert_eq!(parse_command("/clean", "craft_bot"), Some(Command::Clean));
        assert_eq!(parse_command("/init", "craft_bot"), Some(Command::Init));
        assert_eq!(parse_command("/set_topic", "craft_bot"), Some(Command::SetTopic));
    }

    #[test]
    fn test_parse_rom_arguments() {
        assert_eq!(parse_command("/rom", "craft_bot"), Some(Command::Rom(None)));
        assert_eq!(
            parse_command("/rom onclite", "craft_bot"),
            Some(Command::Rom(Some("onclite".to_string())))
        );
        // Only the first argument is used
        assert_eq!(
            parse_command("/rom   onclite extra", "craft_bot"),
            Some(Command::Rom(Some("onclite".to_string())))
        );
    }

    #[test]
    fn test_parse_addressed_commands() {
        assert_eq!(
            parse_command("/rom@craft_bot lavender", "craft_bot"),
            Some(Command::Rom(Some("lavender".to_string())))
        );
        assert_eq!(parse_command("/start@Craft_Bot", "craft_bot"), Some(Command::Start));
        assert_eq!(parse_command("/start@other_bot", "craft_bot"), None);
    }

    #[test]
    fn test_parse_non_commands() {
        assert_eq!(parse_command("hello /rom", "craft_bot"), None);
        assert_eq!(parse_command("", "craft_bot"), None);
        assert!(!is_command("just text"));
        assert!(is_command("/whatever"));
        assert_eq!(
            parse_command("/help", "craft_bot"),
            Some(Command::Unknown("help".to_string()))
        );
    }
}

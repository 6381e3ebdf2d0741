//! REPL command grammar.

use std::str::FromStr;

use aura_core::SceneType;

/// Command names offered for completion.
pub const COMMAND_NAMES: &[&str] = &[
    "/scene", "/list", "/select", "/hover", "/back", "/add", "/cart", "/close", "/inc", "/dec",
    "/remove", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scene(SceneType),
    List,
    Select(String),
    /// `None` moves the pointer off every proxy.
    Hover(Option<String>),
    Back,
    Add,
    Cart,
    Close,
    Inc(String),
    Dec(String),
    Remove(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let input = input.strip_prefix('/').unwrap_or(input);
        let mut words = input.split_whitespace();
        let name = words.next().ok_or_else(|| "empty command".to_string())?;
        let arg = words.next().map(str::to_string);
        if words.next().is_some() {
            return Err(format!("too many arguments for '{name}'"));
        }

        let required = |arg: Option<String>| arg.ok_or_else(|| format!("'{name}' needs a product id"));

        match name.to_ascii_lowercase().as_str() {
            "scene" | "room" => {
                let scene = arg.ok_or_else(|| "'scene' needs one of home, office, studio".to_string())?;
                scene
                    .parse::<SceneType>()
                    .map(Command::Scene)
                    .map_err(|_| format!("unknown scene '{scene}'"))
            }
            "list" | "ls" => Ok(Command::List),
            "select" | "click" => required(arg).map(Command::Select),
            "hover" => Ok(Command::Hover(arg)),
            "back" => Ok(Command::Back),
            "add" => Ok(Command::Add),
            "cart" => Ok(Command::Cart),
            "close" => Ok(Command::Close),
            "inc" | "+" => required(arg).map(Command::Inc),
            "dec" | "-" => required(arg).map(Command::Dec),
            "remove" | "rm" => required(arg).map(Command::Remove),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{other}' (try /help)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_slash() {
        assert_eq!("/list".parse::<Command>(), Ok(Command::List));
        assert_eq!("list".parse::<Command>(), Ok(Command::List));
        assert_eq!(
            "  /select h1 ".parse::<Command>(),
            Ok(Command::Select("h1".to_string()))
        );
    }

    #[test]
    fn test_parse_scene_is_case_insensitive() {
        assert_eq!(
            "/scene Office".parse::<Command>(),
            Ok(Command::Scene(SceneType::Office))
        );
        assert!("/scene garage".parse::<Command>().is_err());
        assert!("/scene".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_hover_optional_target() {
        assert_eq!("/hover".parse::<Command>(), Ok(Command::Hover(None)));
        assert_eq!(
            "/hover h3".parse::<Command>(),
            Ok(Command::Hover(Some("h3".to_string())))
        );
    }

    #[test]
    fn test_parse_rejects_missing_and_extra_args() {
        assert!("/inc".parse::<Command>().is_err());
        assert!("/remove a b".parse::<Command>().is_err());
        assert!("/dance".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_every_completion_parses_or_needs_argument() {
        for name in COMMAND_NAMES {
            let parsed = name.parse::<Command>();
            let with_arg = format!("{name} home").parse::<Command>();
            assert!(parsed.is_ok() || with_arg.is_ok(), "{name} is not a command");
        }
    }
}

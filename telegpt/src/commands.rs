//! Command token parsing: `/name`, `/name@bot`, with optional arguments.

/// Commands this bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Tom,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "tom" => Some(Command::Tom),
            _ => None,
        }
    }
}

/// A command token at the head of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    /// `bot` in `/name@bot`.
    pub target: Option<&'a str>,
    pub args: &'a str,
}

impl<'a> ParsedCommand<'a> {
    /// True unless the command names another bot. Without a known username every target is accepted.
    pub fn is_for(&self, bot_username: Option<&str>) -> bool {
        match (self.target, bot_username) {
            (Some(target), Some(me)) => target.eq_ignore_ascii_case(me),
            _ => true,
        }
    }

    pub fn command(&self) -> Option<Command> {
        Command::from_name(self.name)
    }
}

/// Parses the command token at the head of `text`; `None` if the text does not start with `/name`.
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    let rest = text.strip_prefix('/')?;
    let (token, args) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], rest[idx..].trim()),
        None => (rest, ""),
    };
    let (name, target) = match token.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (token, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(ParsedCommand { name, target, args })
}

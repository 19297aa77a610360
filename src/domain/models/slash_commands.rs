#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let prefix = text.split_whitespace().next().unwrap_or_default();
        let cmd = SlashCommand {
            command: prefix.to_string(),
        };
        if cmd.is_quit()
            || cmd.is_generate()
            || cmd.is_yes()
            || cmd.is_no()
            || cmd.is_reset()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_generate(&self) -> bool {
        return ["/g", "/generate"].contains(&self.command.as_str());
    }

    pub fn is_yes(&self) -> bool {
        return ["/y", "/yes"].contains(&self.command.as_str());
    }

    pub fn is_no(&self) -> bool {
        return ["/n", "/no"].contains(&self.command.as_str());
    }

    pub fn is_reset(&self) -> bool {
        return ["/new", "/reset"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}

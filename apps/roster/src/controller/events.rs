//! UI/backend events and error modeling for the roster controller.

use std::str::FromStr;

use roster_core::LoadOutcome;
use shared::{
    domain::UserId,
    error::{ApiError, ErrorCode},
};

pub enum UiEvent {
    Loaded(LoadOutcome),
    Action(UserAction),
    InvalidInput(String),
    InputClosed,
}

/// A user action typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Edit(UserId),
    Set(String),
    Apply,
    Cancel,
    Reload,
    Show,
    Help,
    Quit,
}

impl FromStr for UserAction {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "edit" | "e" => rest
                .parse::<i64>()
                .map(|id| Self::Edit(UserId(id)))
                .map_err(|_| format!("invalid user id '{rest}'; usage: edit <id>")),
            "set" | "s" => Ok(Self::Set(rest.to_string())),
            "apply" | "a" => Ok(Self::Apply),
            "cancel" | "x" => Ok(Self::Cancel),
            "reload" => Ok(Self::Reload),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{other}'; type 'help'")),
        }
    }
}

pub const HELP: &str = "commands: edit <id> | set <birth date> | apply | cancel | reload | show | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    InvalidState,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadUsers,
    Edit,
    Input,
}

impl UiErrorContext {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BackendStartup => "startup",
            Self::LoadUsers => "load",
            Self::Edit => "edit",
            Self::Input => "input",
        }
    }
}

pub fn classify_load_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") || lower.contains("failed to build backend runtime")
    {
        "Backend worker startup failure; verify local environment and restart.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "User directory unreachable; check URL/network and reload.".to_string()
    } else {
        format!("Load error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("unknown command")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connect")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("status")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_api(context: UiErrorContext, error: ApiError) -> Self {
        let category = match error.code {
            ErrorCode::InvalidState => UiErrorCategory::InvalidState,
            ErrorCode::NotFound | ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Transport => UiErrorCategory::Transport,
            ErrorCode::Internal => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: error.message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

//! Screen routing: LoggedOut → Dashboard ⇄ Scope(troop_id), logout from either.

use scope_model::{operator_for_username, Operator};

use crate::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    LoggedOut,
    Dashboard,
    /// Scope view for one troop id. The id is not validated here; an unknown
    /// id renders a "not found" view.
    Scope(String),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::LoggedOut => "login",
            Screen::Dashboard => "dashboard",
            Screen::Scope(_) => "scope",
        }
    }
}

/// Current screen plus the signed-in operator.
#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    operator: Option<Operator>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::LoggedOut,
            operator: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    fn reject(&self, action: &'static str) -> ConsoleError {
        ConsoleError::InvalidTransition {
            action,
            screen: self.screen.name(),
        }
    }

    /// Accepts any non-empty username.
    pub fn login(&mut self, username: &str) -> Result<&Operator, ConsoleError> {
        if self.screen != Screen::LoggedOut {
            return Err(self.reject("log in"));
        }
        let operator = operator_for_username(username)?;
        tracing::info!(operator = %operator.username, id = %operator.id, "Operator logged in");
        self.screen = Screen::Dashboard;
        Ok(self.operator.insert(operator))
    }

    pub fn open_scope(&mut self, troop_id: &str) -> Result<(), ConsoleError> {
        if self.screen != Screen::Dashboard {
            return Err(self.reject("open a scope view"));
        }
        tracing::info!(troop = %troop_id, "Opening scope view");
        self.screen = Screen::Scope(troop_id.to_string());
        Ok(())
    }

    pub fn back_to_dashboard(&mut self) -> Result<(), ConsoleError> {
        if !matches!(self.screen, Screen::Scope(_)) {
            return Err(self.reject("return to the dashboard"));
        }
        tracing::debug!("Back to dashboard");
        self.screen = Screen::Dashboard;
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ConsoleError> {
        if self.screen == Screen::LoggedOut {
            return Err(self.reject("log out"));
        }
        if let Some(op) = self.operator.take() {
            tracing::info!(operator = %op.username, "Operator logged out");
        }
        self.screen = Screen::LoggedOut;
        Ok(())
    }
}

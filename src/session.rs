use crate::error::{PortalError, Result};
use crate::models::account::{Account, SessionIdentity};
use crate::models::grievance::Department;
use log::info;

/// Login state for one portal instance. Never persisted: a new instance always
/// starts anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionIdentity),
}

impl Session {
    pub fn login(&mut self, account: &Account) -> SessionIdentity {
        let identity = SessionIdentity::from(account);
        info!("{} logged in to {}", identity.username, identity.department);
        *self = Session::Authenticated(identity.clone());
        identity
    }

    pub fn logout(&mut self) {
        if let Session::Authenticated(identity) = self {
            info!("{} logged out", identity.username);
        }
        *self = Session::Anonymous;
    }

    pub fn current(&self) -> Option<&SessionIdentity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn require(&self) -> Result<&SessionIdentity> {
        self.current().ok_or(PortalError::Unauthorized)
    }

    pub fn department(&self) -> Result<Department> {
        Ok(self.require()?.department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn account() -> Account {
        Account {
            username: "ravi".to_string(),
            password: "secret123".to_string(),
            department: Department::Transport,
            email: "ravi@transport.gov.in".to_string(),
            full_name: "Ravi Menon".to_string(),
            employee_id: "TRN007".to_string(),
            registered_date: "01/10/2026".to_string(),
        }
    }

    #[test]
    fn starts_anonymous_and_gates_access() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.require().unwrap_err().kind(), ErrorKind::Authorization);
    }

    #[test]
    fn login_then_logout_returns_to_anonymous() {
        let mut session = Session::default();
        let identity = session.login(&account());
        assert_eq!(identity.department, Department::Transport);
        assert_eq!(session.department().unwrap(), Department::Transport);

        session.logout();
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn second_login_replaces_identity() {
        let mut session = Session::default();
        session.login(&account());

        let mut other = account();
        other.username = "meera".to_string();
        other.department = Department::Health;
        session.login(&other);

        let current = session.require().unwrap();
        assert_eq!(current.username, "meera");
        assert_eq!(current.department, Department::Health);
    }
}

use crate::error::{PortalError, Result};
use crate::grievances::report_date;
use crate::models::account::{Account, Registration};
use crate::models::grievance::Department;
use crate::store::{load_collection, save_collection, Storage, ACCOUNTS_KEY};
use chrono::Local;
use log::{info, warn};
use std::sync::Arc;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

// Well-known credentials that authenticate for every department. Kept for
// parity with the deployed portal; disable with `bootstrapAccountEnabled`.
pub const BOOTSTRAP_USERNAME: &str = "admin";
pub const BOOTSTRAP_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy)]
pub struct DirectoryPolicy {
    pub min_password_length: usize,
    pub bootstrap_enabled: bool,
}

impl Default for DirectoryPolicy {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            bootstrap_enabled: true,
        }
    }
}

pub struct AccountDirectory {
    store: Arc<dyn Storage>,
    policy: DirectoryPolicy,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn Storage>, policy: DirectoryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn all(&self) -> Result<Vec<Account>> {
        load_collection(self.store.as_ref(), ACCOUNTS_KEY)
    }

    pub fn find(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.all()?.into_iter().find(|a| a.username == username))
    }

    pub fn register(&self, candidate: Registration) -> Result<Account> {
        let username = candidate.username.trim();
        let email = candidate.email.trim();
        let full_name = candidate.full_name.trim();

        if username.is_empty() {
            return Err(PortalError::MissingField { field: "Username" });
        }
        if email.is_empty() {
            return Err(PortalError::MissingField { field: "Email" });
        }
        if full_name.is_empty() {
            return Err(PortalError::MissingField { field: "Full name" });
        }
        if candidate.password != candidate.confirm_password {
            return Err(PortalError::PasswordMismatch);
        }
        if candidate.password.chars().count() < self.policy.min_password_length {
            return Err(PortalError::WeakPassword {
                min: self.policy.min_password_length,
            });
        }

        let mut accounts = self.all()?;
        if accounts.iter().any(|a| a.username == username) {
            warn!("registration rejected: username {username} taken");
            return Err(PortalError::DuplicateUsername(username.to_string()));
        }
        if accounts.iter().any(|a| a.email == email) {
            warn!("registration rejected: email already registered");
            return Err(PortalError::DuplicateEmail(email.to_string()));
        }

        let account = Account {
            username: username.to_string(),
            password: candidate.password,
            department: candidate.department,
            email: email.to_string(),
            full_name: full_name.to_string(),
            employee_id: candidate.employee_id.trim().to_string(),
            registered_date: report_date(&Local::now()),
        };

        accounts.push(account.clone());
        save_collection(self.store.as_ref(), ACCOUNTS_KEY, &accounts)?;
        info!("registered {} for {}", account.username, account.department);
        Ok(account)
    }

    pub fn authenticate(&self, username: &str, password: &str, department: Department) -> Result<Account> {
        if self.policy.bootstrap_enabled && username == BOOTSTRAP_USERNAME && password == BOOTSTRAP_PASSWORD {
            warn!("bootstrap account used for {department}");
            return Ok(bootstrap_account(department));
        }

        self.all()?
            .into_iter()
            .find(|a| a.username == username && a.password == password && a.department == department)
            .ok_or(PortalError::InvalidCredentials)
    }

    pub fn replace_all(&self, accounts: &[Account]) -> Result<()> {
        save_collection(self.store.as_ref(), ACCOUNTS_KEY, accounts)
    }

    /// Installs the demo officer account when no accounts exist.
    pub fn seed_default(&self) -> Result<bool> {
        if !self.all()?.is_empty() {
            return Ok(false);
        }
        let officer = Account {
            username: "municipal_admin".to_string(),
            password: "admin123".to_string(),
            department: Department::MunicipalCorporation,
            email: "officer@municipal.gov.in".to_string(),
            full_name: "Municipal Officer".to_string(),
            employee_id: "MUN001".to_string(),
            registered_date: report_date(&Local::now()),
        };
        self.replace_all(&[officer])?;
        info!("seeded default department account");
        Ok(true)
    }
}

fn bootstrap_account(department: Department) -> Account {
    Account {
        username: BOOTSTRAP_USERNAME.to_string(),
        password: BOOTSTRAP_PASSWORD.to_string(),
        department,
        email: "admin@dept.gov.in".to_string(),
        full_name: "Department Administrator".to_string(),
        employee_id: "ADMIN001".to_string(),
        registered_date: String::new(),
    }
}

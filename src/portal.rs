use crate::accounts::AccountDirectory;
use crate::analysis::{export, performance, stats, trending};
use crate::commands::settings::PortalSettings;
use crate::error::Result;
use crate::grievances::{local_stamp, sort_for_department_view, sort_for_public_view, GrievanceRepository};
use crate::models::account::{Account, Registration, SessionIdentity};
use crate::models::grievance::{Department, Grievance, GrievanceFilter, NewGrievance, Status};
use crate::models::report::{Analytics, GrievanceReport, RestoreSummary, StatusCounts, TrendingIssue};
use crate::session::Session;
use crate::store::{encode_collection, MemoryStorage, Storage, ACCOUNTS_KEY, GRIEVANCES_KEY};
use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::Arc;

/// One portal session over a shared store: citizen submissions, department
/// triage, and reporting.
pub struct Portal {
    store: Arc<dyn Storage>,
    settings: PortalSettings,
    grievances: GrievanceRepository,
    accounts: AccountDirectory,
    session: Session,
}

impl Portal {
    pub fn open(store: Arc<dyn Storage>, settings: PortalSettings) -> Result<Self> {
        let portal = Self {
            grievances: GrievanceRepository::new(Arc::clone(&store)),
            accounts: AccountDirectory::new(Arc::clone(&store), settings.directory_policy()),
            store,
            settings,
            session: Session::default(),
        };

        if settings.seed_demo_data {
            portal.grievances.seed_demo()?;
            portal.accounts.seed_default()?;
        }

        Ok(portal)
    }

    pub fn in_memory(settings: PortalSettings) -> Result<Self> {
        Self::open(Arc::new(MemoryStorage::new()), settings)
    }

    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    pub fn grievances(&self) -> &GrievanceRepository {
        &self.grievances
    }

    pub fn accounts(&self) -> &AccountDirectory {
        &self.accounts
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // Citizen side.

    pub fn submit_grievance(&self, input: NewGrievance) -> Result<Grievance> {
        self.grievances.create(input)
    }

    pub fn public_grievances(&self, filter: GrievanceFilter) -> Result<Vec<Grievance>> {
        let mut items = self.grievances.list(filter)?;
        sort_for_public_view(&mut items);
        Ok(items)
    }

    pub fn upvote(&self, id: i64) -> Result<Grievance> {
        self.grievances.increment_vote(id)
    }

    // Department side.

    pub fn register(&self, candidate: Registration) -> Result<Account> {
        self.accounts.register(candidate)
    }

    pub fn login(&mut self, username: &str, password: &str, department: Department) -> Result<SessionIdentity> {
        match self.accounts.authenticate(username, password, department) {
            Ok(account) => Ok(self.session.login(&account)),
            Err(err) => {
                warn!("login failed for {username} ({department})");
                Err(err)
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Grievances of the logged-in department, pending and popular first.
    pub fn dashboard(&self, status: Option<Status>) -> Result<Vec<Grievance>> {
        let department = self.session.department()?;
        let mut items = self.grievances.list(GrievanceFilter {
            status,
            department: Some(department),
        })?;
        sort_for_department_view(&mut items);
        Ok(items)
    }

    pub fn dashboard_counts(&self) -> Result<StatusCounts> {
        let department = self.session.department()?;
        Ok(stats::department_counts(&self.grievances.all()?, department))
    }

    pub fn update_status(&self, id: i64, status: Status) -> Result<Grievance> {
        let actor = self.session.department()?;
        self.grievances.set_status(id, status, actor.as_str())
    }

    pub fn add_note(&self, id: i64, text: &str) -> Result<Grievance> {
        let actor = self.session.department()?;
        self.grievances.add_note(id, text, actor.as_str())
    }

    // Reporting.

    pub fn counts(&self) -> Result<StatusCounts> {
        Ok(stats::aggregate_counts(&self.grievances.all()?))
    }

    pub fn report(&self) -> Result<GrievanceReport> {
        Ok(stats::generate_report(
            &self.grievances.all()?,
            local_stamp(&Local::now()),
        ))
    }

    pub fn trending(&self, limit: Option<usize>) -> Result<Vec<TrendingIssue>> {
        let limit = limit.unwrap_or(self.settings.trending_limit);
        Ok(trending::trending(&self.grievances.all()?, limit))
    }

    pub fn analytics(&self) -> Result<Analytics> {
        let grievances = self.grievances.all()?;
        Ok(Analytics {
            most_active_reporter: performance::most_active_reporter(&grievances),
            department_performance: performance::department_performance(&grievances),
            trending_issues: trending::trending(&grievances, self.settings.trending_limit),
        })
    }

    pub fn export_json(&self) -> Result<String> {
        export::export_json(&self.grievances.all()?, Utc::now())
    }

    pub fn export_csv(&self) -> Result<String> {
        Ok(export::export_csv(&self.grievances.all()?))
    }

    pub fn backup(&self) -> Result<String> {
        export::backup_json(&self.grievances.all()?, &self.accounts.all()?, Utc::now())
    }

    /// Replaces both collections with the backup contents. A blob that fails to
    /// decode leaves storage untouched.
    pub fn restore(&self, blob: &str) -> Result<RestoreSummary> {
        let (grievances, accounts) = export::parse_backup(blob)?;
        self.store.set_many(&[
            (GRIEVANCES_KEY, encode_collection(&grievances)?),
            (ACCOUNTS_KEY, encode_collection(&accounts)?),
        ])?;

        let summary = RestoreSummary {
            grievances: grievances.len(),
            accounts: accounts.len(),
        };
        info!(
            "restored {} grievances and {} accounts",
            summary.grievances, summary.accounts
        );
        Ok(summary)
    }

    /// Drops every grievance and account and ends the session.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove_many(&[GRIEVANCES_KEY, ACCOUNTS_KEY])?;
        self.session.logout();
        if self.settings.seed_demo_data {
            self.accounts.seed_default()?;
        }
        warn!("all portal data cleared");
        Ok(())
    }
}

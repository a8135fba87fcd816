use crate::error::{PortalError, Result};
use crate::models::grievance::{Department, Grievance, GrievanceFilter, NewGrievance, Note, Status};
use crate::store::{load_collection, save_collection, Storage, GRIEVANCES_KEY};
use chrono::{DateTime, Local};
use log::{debug, info};
use std::cmp::Reverse;
use std::sync::Arc;

const ANONYMOUS_REPORTER: &str = "Anonymous";
const CONTACT_NOT_PROVIDED: &str = "Not provided";

pub(crate) fn report_date(at: &DateTime<Local>) -> String {
    at.format("%d/%m/%Y").to_string()
}

pub(crate) fn report_time(at: &DateTime<Local>) -> String {
    at.format("%I:%M:%S %p").to_string()
}

pub(crate) fn local_stamp(at: &DateTime<Local>) -> String {
    at.format("%d/%m/%Y, %I:%M:%S %p").to_string()
}

/// Grievance collection over the shared key-value store. Each call reads and
/// writes the whole collection.
pub struct GrievanceRepository {
    store: Arc<dyn Storage>,
}

impl GrievanceRepository {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<Vec<Grievance>> {
        load_collection(self.store.as_ref(), GRIEVANCES_KEY)
    }

    fn save(&self, grievances: &[Grievance]) -> Result<()> {
        save_collection(self.store.as_ref(), GRIEVANCES_KEY, grievances)
    }

    pub fn get(&self, id: i64) -> Result<Grievance> {
        self.all()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or(PortalError::GrievanceNotFound(id))
    }

    pub fn create(&self, input: NewGrievance) -> Result<Grievance> {
        let title = required(&input.title, "Title")?;
        let description = required(&input.description, "Description")?;
        let location = required(&input.location, "Location")?;

        let mut grievances = self.all()?;
        let now = Local::now();
        let id = next_id(&grievances, now.timestamp_millis())?;

        let grievance = Grievance {
            id,
            title,
            description,
            location,
            department: input.department,
            status: Status::Pending,
            reporter_name: or_default(&input.reporter_name, ANONYMOUS_REPORTER),
            reporter_contact: or_default(&input.reporter_contact, CONTACT_NOT_PROVIDED),
            photo_ref: input.photo_ref.trim().to_string(),
            votes: 0,
            date_reported: report_date(&now),
            time_reported: report_time(&now),
            notes: Vec::new(),
        };

        grievances.push(grievance.clone());
        self.save(&grievances)?;
        info!("grievance {id} submitted to {}", grievance.department);
        Ok(grievance)
    }

    pub fn list(&self, filter: GrievanceFilter) -> Result<Vec<Grievance>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|g| filter.matches(g))
            .collect())
    }

    pub fn set_status(&self, id: i64, status: Status, actor: &str) -> Result<Grievance> {
        let updated = self.mutate(id, |grievance| {
            grievance.status = status;
            grievance.notes.push(Note {
                text: format!("Status changed to: {status}"),
                author: actor.to_string(),
                date: local_stamp(&Local::now()),
            });
        })?;
        info!("grievance {id} marked {status} by {actor}");
        Ok(updated)
    }

    pub fn add_note(&self, id: i64, text: &str, actor: &str) -> Result<Grievance> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PortalError::EmptyNote);
        }

        let updated = self.mutate(id, |grievance| {
            grievance.notes.push(Note {
                text: text.to_string(),
                author: actor.to_string(),
                date: local_stamp(&Local::now()),
            });
        })?;
        debug!("note added to grievance {id} by {actor}");
        Ok(updated)
    }

    /// Any caller may vote any number of times.
    pub fn increment_vote(&self, id: i64) -> Result<Grievance> {
        self.mutate(id, |grievance| {
            grievance.votes = grievance.votes.saturating_add(1);
        })
    }

    pub fn replace_all(&self, grievances: &[Grievance]) -> Result<()> {
        self.save(grievances)
    }

    /// Installs the demo grievances when the collection is empty.
    pub fn seed_demo(&self) -> Result<bool> {
        if !self.all()?.is_empty() {
            return Ok(false);
        }
        let demo = demo_grievances(Local::now());
        self.save(&demo)?;
        info!("seeded {} demo grievances", demo.len());
        Ok(true)
    }

    fn mutate<F>(&self, id: i64, apply: F) -> Result<Grievance>
    where
        F: FnOnce(&mut Grievance),
    {
        let mut grievances = self.all()?;
        let grievance = grievances
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(PortalError::GrievanceNotFound(id))?;
        apply(grievance);
        let updated = grievance.clone();
        self.save(&grievances)?;
        Ok(updated)
    }
}

/// Most supported first, newest first among equals.
pub fn sort_for_public_view(grievances: &mut [Grievance]) {
    grievances.sort_by_key(|g| (Reverse(g.votes), Reverse(g.id)));
}

/// Pending items first, then by support, then newest.
pub fn sort_for_department_view(grievances: &mut [Grievance]) {
    grievances.sort_by_key(|g| (g.status != Status::Pending, Reverse(g.votes), Reverse(g.id)));
}

fn next_id(existing: &[Grievance], now_millis: i64) -> Result<i64> {
    match existing.iter().map(|g| g.id).max() {
        Some(max) if max >= now_millis => max
            .checked_add(1)
            .ok_or(PortalError::IdSpaceExhausted(max)),
        _ => Ok(now_millis),
    }
}

fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PortalError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn demo_grievances(now: DateTime<Local>) -> Vec<Grievance> {
    let base = now.timestamp_millis();
    let days_ago = |days: i64| report_date(&(now - chrono::Duration::days(days)));
    let today = report_date(&now);

    vec![
        Grievance {
            id: base - 1000,
            title: "Street lighting failure on MG Road".to_string(),
            description: "Multiple streetlights have been non-functional for the past two weeks on MG Road near the commercial district. This has created safety concerns for pedestrians and vehicular traffic during night hours.".to_string(),
            location: "MG Road, Commercial District".to_string(),
            department: Department::MunicipalCorporation,
            status: Status::Pending,
            reporter_name: "Rajesh Kumar".to_string(),
            reporter_contact: "+91 9876543210".to_string(),
            photo_ref: String::new(),
            votes: 12,
            date_reported: days_ago(1),
            time_reported: "10:30 AM".to_string(),
            notes: Vec::new(),
        },
        Grievance {
            id: base - 2000,
            title: "Water supply disruption in Residential Area".to_string(),
            description: "Residents of Layout Phase-2 have been experiencing irregular water supply for the past week. The issue appears to be related to pipeline maintenance work that has extended beyond the scheduled timeframe.".to_string(),
            location: "Layout Phase-2, Sector 15".to_string(),
            department: Department::Water,
            status: Status::InProgress,
            reporter_name: "Priya Singh".to_string(),
            reporter_contact: "priya.singh@email.com".to_string(),
            photo_ref: String::new(),
            votes: 28,
            date_reported: days_ago(2),
            time_reported: "2:15 PM".to_string(),
            notes: vec![Note {
                text: "Pipeline repair work is 75% complete. Water supply will be restored within 48 hours. Alternative water tanker service arranged for affected areas.".to_string(),
                author: "Water Department Engineer".to_string(),
                date: today.clone(),
            }],
        },
        Grievance {
            id: base - 3000,
            title: "Traffic signal malfunction at Main Junction".to_string(),
            description: "The traffic signal system at the busy intersection near the railway station has been malfunctioning, causing significant traffic congestion during peak hours. The signal timing appears to be incorrect.".to_string(),
            location: "Railway Station Main Junction".to_string(),
            department: Department::Transport,
            status: Status::Resolved,
            reporter_name: "Citizens Committee".to_string(),
            reporter_contact: "committee@residents.org".to_string(),
            photo_ref: String::new(),
            votes: 15,
            date_reported: days_ago(3),
            time_reported: "9:45 AM".to_string(),
            notes: vec![Note {
                text: "Signal timing has been recalibrated and tested. System is now functioning normally with optimized traffic flow patterns.".to_string(),
                author: "Transport Department Technical Team".to_string(),
                date: today,
            }],
        },
        Grievance {
            id: base - 4000,
            title: "Garbage collection irregular in Ward 12".to_string(),
            description: "Garbage collection has been irregular in Ward 12 for the past month. Accumulated waste is causing health and sanitation concerns for residents, especially during monsoon season.".to_string(),
            location: "Ward 12, Green Valley Colony".to_string(),
            department: Department::Health,
            status: Status::Pending,
            reporter_name: "Ward Residents Association".to_string(),
            reporter_contact: "+91 9876543220".to_string(),
            photo_ref: String::new(),
            votes: 35,
            date_reported: days_ago(4),
            time_reported: "11:20 AM".to_string(),
            notes: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryStorage;

    fn repository() -> GrievanceRepository {
        GrievanceRepository::new(Arc::new(MemoryStorage::new()))
    }

    fn submission(title: &str, department: Department) -> NewGrievance {
        NewGrievance {
            title: title.to_string(),
            description: format!("{title} needs attention"),
            location: "Sector 9".to_string(),
            department,
            reporter_name: String::new(),
            reporter_contact: String::new(),
            photo_ref: String::new(),
        }
    }

    #[test]
    fn created_items_are_listed_with_unique_ids() {
        let repo = repository();
        let created: Vec<Grievance> = (0..5)
            .map(|i| repo.create(submission(&format!("Issue {i}"), Department::Water)).expect("create"))
            .collect();

        let listed = repo.list(GrievanceFilter::all()).expect("list");
        assert_eq!(listed, created);

        let mut ids: Vec<i64> = listed.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn create_applies_defaults() {
        let repo = repository();
        let grievance = repo
            .create(submission("Pothole", Department::Transport))
            .expect("create");

        assert_eq!(grievance.status, Status::Pending);
        assert_eq!(grievance.votes, 0);
        assert!(grievance.notes.is_empty());
        assert_eq!(grievance.reporter_name, "Anonymous");
        assert_eq!(grievance.reporter_contact, "Not provided");
        assert!(!grievance.date_reported.is_empty());
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let repo = repository();
        let mut input = submission("Pothole", Department::Transport);
        input.location = "   ".to_string();

        let err = repo.create(input).unwrap_err();
        assert!(matches!(err, PortalError::MissingField { field: "Location" }));
        assert!(repo.all().expect("all").is_empty());
    }

    #[test]
    fn votes_increase_by_exactly_the_number_of_calls() {
        let repo = repository();
        let grievance = repo.create(submission("Broken bench", Department::MunicipalCorporation)).unwrap();

        for _ in 0..7 {
            repo.increment_vote(grievance.id).expect("vote");
        }

        assert_eq!(repo.get(grievance.id).unwrap().votes, 7);
    }

    #[test]
    fn status_change_appends_one_automatic_note() {
        let repo = repository();
        let grievance = repo.create(submission("Leaking main", Department::Water)).unwrap();

        repo.set_status(grievance.id, Status::InProgress, "Water Department")
            .expect("set status");

        let stored = repo.get(grievance.id).unwrap();
        assert_eq!(stored.status, Status::InProgress);
        assert_eq!(stored.notes.len(), 1);
        assert_eq!(stored.notes[0].text, "Status changed to: In Progress");
        assert_eq!(stored.notes[0].author, "Water Department");
    }

    #[test]
    fn blank_notes_are_rejected_and_notes_are_trimmed() {
        let repo = repository();
        let grievance = repo.create(submission("Open drain", Department::Health)).unwrap();

        let err = repo.add_note(grievance.id, "   \n", "Health Department").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let updated = repo
            .add_note(grievance.id, "  Crew dispatched  ", "Health Department")
            .expect("add note");
        assert_eq!(updated.notes.last().unwrap().text, "Crew dispatched");
    }

    #[test]
    fn mutations_on_missing_ids_surface_not_found() {
        let repo = repository();
        repo.create(submission("Fallen tree", Department::MunicipalCorporation)).unwrap();

        for err in [
            repo.increment_vote(42).unwrap_err(),
            repo.set_status(42, Status::Resolved, "x").unwrap_err(),
            repo.add_note(42, "note", "x").unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }

    #[test]
    fn list_filters_on_both_predicates() {
        let repo = repository();
        let water = repo.create(submission("Low pressure", Department::Water)).unwrap();
        repo.create(submission("Signal out", Department::Transport)).unwrap();
        repo.set_status(water.id, Status::Resolved, "Water Department").unwrap();
        repo.create(submission("Pipe burst", Department::Water)).unwrap();

        let resolved_water = repo
            .list(GrievanceFilter {
                status: Some(Status::Resolved),
                department: Some(Department::Water),
            })
            .unwrap();
        assert_eq!(resolved_water.len(), 1);
        assert_eq!(resolved_water[0].id, water.id);

        let all_water = repo
            .list(GrievanceFilter {
                status: None,
                department: Some(Department::Water),
            })
            .unwrap();
        assert_eq!(all_water.len(), 2);
    }

    fn fixture(id: i64, votes: u32, status: Status) -> Grievance {
        Grievance {
            id,
            title: format!("#{id}"),
            description: String::new(),
            location: String::new(),
            department: Department::MunicipalCorporation,
            status,
            reporter_name: String::new(),
            reporter_contact: String::new(),
            photo_ref: String::new(),
            votes,
            date_reported: String::new(),
            time_reported: String::new(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn public_view_orders_by_votes_then_newest() {
        let mut items = vec![
            fixture(1, 3, Status::Pending),
            fixture(2, 9, Status::Resolved),
            fixture(3, 3, Status::Pending),
        ];
        sort_for_public_view(&mut items);
        let ids: Vec<i64> = items.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn department_view_surfaces_pending_first() {
        let mut items = vec![
            fixture(1, 50, Status::Resolved),
            fixture(2, 1, Status::Pending),
            fixture(3, 20, Status::InProgress),
            fixture(4, 5, Status::Pending),
        ];
        sort_for_department_view(&mut items);
        let ids: Vec<i64> = items.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }

    #[test]
    fn ids_stay_unique_when_clock_does_not_advance() {
        let existing = vec![fixture(1_000, 0, Status::Pending)];
        assert_eq!(next_id(&existing, 1_000).unwrap(), 1_001);
        assert_eq!(next_id(&existing, 999).unwrap(), 1_001);
        assert_eq!(next_id(&existing, 5_000).unwrap(), 5_000);
        assert_eq!(next_id(&[], 7).unwrap(), 7);
    }

    #[test]
    fn largest_stored_id_blocks_creation_instead_of_wrapping() {
        let existing = vec![fixture(i64::MAX, 0, Status::Pending)];
        let err = next_id(&existing, 1_000).unwrap_err();
        assert!(matches!(err, PortalError::IdSpaceExhausted(i64::MAX)));

        let repo = repository();
        repo.replace_all(&existing).unwrap();
        let err = repo.create(submission("Pothole", Department::Transport)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(repo.all().unwrap(), existing);
    }

    #[test]
    fn demo_seed_only_fills_an_empty_collection() {
        let repo = repository();
        assert!(repo.seed_demo().unwrap());
        assert_eq!(repo.all().unwrap().len(), 4);
        assert!(!repo.seed_demo().unwrap());
    }
}

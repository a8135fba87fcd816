use crate::models::grievance::{Department, Grievance, Status};
use crate::models::report::{DepartmentBreakdown, GrievanceReport, StatusCounts};

/// Status counts over any slice: the full collection or one department's share.
pub fn aggregate_counts(grievances: &[Grievance]) -> StatusCounts {
    grievances.iter().fold(StatusCounts::default(), |mut counts, g| {
        counts.total += 1;
        match g.status {
            Status::Pending => counts.pending += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Resolved => counts.resolved += 1,
        }
        counts
    })
}

pub fn department_counts(grievances: &[Grievance], department: Department) -> StatusCounts {
    let scoped: Vec<Grievance> = grievances
        .iter()
        .filter(|g| g.department == department)
        .cloned()
        .collect();
    aggregate_counts(&scoped)
}

/// Per-department counts in order of first appearance.
pub fn department_breakdown(grievances: &[Grievance]) -> Vec<DepartmentBreakdown> {
    let mut order: Vec<Department> = Vec::new();
    for g in grievances {
        if !order.contains(&g.department) {
            order.push(g.department);
        }
    }

    order
        .into_iter()
        .map(|department| DepartmentBreakdown {
            department,
            counts: department_counts(grievances, department),
        })
        .collect()
}

pub fn generate_report(grievances: &[Grievance], generated_on: String) -> GrievanceReport {
    GrievanceReport {
        generated_on,
        counts: aggregate_counts(grievances),
        by_department: department_breakdown(grievances),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::grievance;

    #[test]
    fn counts_each_status() {
        let items = vec![
            grievance(1, Department::Water, Status::Pending, 0),
            grievance(2, Department::Water, Status::Resolved, 0),
            grievance(3, Department::Health, Status::InProgress, 0),
            grievance(4, Department::Health, Status::Pending, 0),
        ];

        let counts = aggregate_counts(&items);
        assert_eq!(
            counts,
            StatusCounts {
                total: 4,
                pending: 2,
                in_progress: 1,
                resolved: 1
            }
        );
    }

    #[test]
    fn empty_collection_has_zero_counts() {
        assert_eq!(aggregate_counts(&[]), StatusCounts::default());
    }

    #[test]
    fn breakdown_lists_only_present_departments_in_first_seen_order() {
        let items = vec![
            grievance(1, Department::Transport, Status::Pending, 0),
            grievance(2, Department::Water, Status::Resolved, 0),
            grievance(3, Department::Transport, Status::Resolved, 0),
        ];

        let breakdown = department_breakdown(&items);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].department, Department::Transport);
        assert_eq!(breakdown[0].counts.total, 2);
        assert_eq!(breakdown[0].counts.resolved, 1);
        assert_eq!(breakdown[1].department, Department::Water);
    }
}

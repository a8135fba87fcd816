use crate::analysis::stats::department_breakdown;
use crate::models::grievance::Grievance;
use crate::models::report::{DepartmentPerformance, ReporterActivity};

/// Resolution rate per department that has at least one grievance.
/// Percentages round half up, as the portal dashboards display them.
pub fn department_performance(grievances: &[Grievance]) -> Vec<DepartmentPerformance> {
    department_breakdown(grievances)
        .into_iter()
        .map(|entry| DepartmentPerformance {
            department: entry.department,
            total: entry.counts.total,
            resolved: entry.counts.resolved,
            resolved_percent: resolved_percent(entry.counts.resolved, entry.counts.total),
        })
        .collect()
}

fn resolved_percent(resolved: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((resolved * 200 + total) / (2 * total)) as u32
}

/// Reporter with the most grievances; the earliest such reporter wins ties.
pub fn most_active_reporter(grievances: &[Grievance]) -> Option<ReporterActivity> {
    let mut tallies: Vec<(&str, usize)> = Vec::new();
    for g in grievances {
        match tallies.iter_mut().find(|(name, _)| *name == g.reporter_name) {
            Some((_, count)) => *count += 1,
            None => tallies.push((g.reporter_name.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in tallies {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }

    best.map(|(name, count)| ReporterActivity {
        reporter_name: name.to_string(),
        grievance_count: count,
    })
}

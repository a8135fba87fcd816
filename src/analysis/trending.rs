use crate::models::grievance::Grievance;
use crate::models::report::TrendingIssue;
use std::cmp::Reverse;

pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Top `limit` grievances by votes. Equal vote counts keep collection order.
pub fn trending(grievances: &[Grievance], limit: usize) -> Vec<TrendingIssue> {
    let mut ranked: Vec<&Grievance> = grievances.iter().collect();
    ranked.sort_by_key(|g| Reverse(g.votes));

    ranked
        .into_iter()
        .take(limit)
        .map(|g| TrendingIssue {
            id: g.id,
            title: g.title.clone(),
            votes: g.votes,
            department: g.department,
        })
        .collect()
}

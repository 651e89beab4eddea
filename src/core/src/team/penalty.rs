use chrono::{DateTime, Utc};

/// Catalog entry in a team's fine list ("late to practice", ...).
/// Amounts are integer euro-cents.
#[derive(Debug, Clone)]
pub struct Penalty {
    pub id: u32,
    pub team_id: u32,
    pub title: String,
    pub amount_cents: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A catalog fine assigned to a member. Payment is a one-way transition.
#[derive(Debug, Clone)]
pub struct AssignedPenalty {
    pub id: u32,
    pub team_id: u32,
    pub user_id: u32,
    pub penalty_id: u32,
    pub assigned_at: DateTime<Utc>,
    pub note: String,
    pub paid: bool,
    pub assigned_by: Option<u32>,
}

impl AssignedPenalty {
    /// Marks the assignment as paid. Already-paid rows stay paid; there
    /// is no way back to unpaid.
    pub fn mark_paid(&mut self) {
        self.paid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_paid_is_one_way() {
        let mut assigned = AssignedPenalty {
            id: 1,
            team_id: 1,
            user_id: 2,
            penalty_id: 3,
            assigned_at: Utc::now(),
            note: String::new(),
            paid: false,
            assigned_by: None,
        };

        assigned.mark_paid();
        assert!(assigned.paid);

        // second call is a no-op, not a toggle
        assigned.mark_paid();
        assert!(assigned.paid);
    }
}

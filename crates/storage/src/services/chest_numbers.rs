use sqlx::PgConnection;

use crate::error::Result;
use crate::repository::participant;

/// First chest number handed out when none exist yet.
pub const CHEST_NUMBER_SEED: i32 = 1001;

/// Advisory lock key serializing concurrent allocations. The lock is
/// transaction-scoped, so it is released (or rolled back) with the approval
/// write it protects.
const ALLOCATOR_LOCK_KEY: i64 = 0x43_48_45_53_54;

pub fn next_chest_number(current_max: Option<i32>) -> i32 {
    match current_max {
        Some(max) => max + 1,
        None => CHEST_NUMBER_SEED,
    }
}

/// Hand out a globally unique chest number inside the approving transaction.
///
/// Re-approval is idempotent: a participant that already holds a number keeps
/// it. Otherwise the current maximum is read under the allocation lock and
/// incremented; numbers freed by rejection sit below the maximum and are
/// never reissued.
pub async fn allocate(conn: &mut PgConnection, existing: Option<i32>) -> Result<i32> {
    if let Some(number) = existing {
        return Ok(number);
    }

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(ALLOCATOR_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    let max = participant::max_chest_number(conn).await?;
    Ok(next_chest_number(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_allocation_starts_at_the_seed() {
        assert_eq!(next_chest_number(None), 1001);
    }

    #[test]
    fn allocation_increments_the_current_max() {
        assert_eq!(next_chest_number(Some(1001)), 1002);
        assert_eq!(next_chest_number(Some(1499)), 1500);
    }

    #[test]
    fn freed_numbers_below_the_max_are_never_revisited() {
        // 1002 was freed by a rejection, but the max is taken over currently
        // assigned numbers, so the next allocation skips past the gap.
        assert_eq!(next_chest_number(Some(1005)), 1006);
    }

    #[test]
    fn sequential_allocations_are_distinct_and_consecutive() {
        let mut max = None;
        let mut issued = Vec::new();
        for _ in 0..5 {
            let number = next_chest_number(max);
            issued.push(number);
            max = Some(number);
        }
        assert_eq!(issued, vec![1001, 1002, 1003, 1004, 1005]);
    }
}

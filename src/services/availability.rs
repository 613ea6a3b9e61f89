use chrono::NaiveDate;

use crate::error::ApiError;
use crate::store::Store;

/// Inclusive four-condition overlap test between two stays. Both boundary
/// dates count, so a stay ending on the day another begins conflicts —
/// no back-to-back turnover on the same day. The SQL guard in
/// `Store::try_insert_booking` encodes the same predicate.
pub fn ranges_conflict(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    let within = |d: NaiveDate, lo: NaiveDate, hi: NaiveDate| lo <= d && d <= hi;

    within(b_in, a_in, a_out)
        || within(b_out, a_in, a_out)
        || within(a_in, b_in, b_out)
        || within(a_out, b_in, b_out)
}

/// A room is available iff no confirmed booking conflicts with the window.
/// Cancelled bookings never count. Read-only.
pub async fn is_room_available(
    store: &Store,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool, ApiError> {
    let confirmed = store.confirmed_bookings_for_room(room_id).await?;
    Ok(!confirmed
        .iter()
        .any(|b| ranges_conflict(check_in, check_out, b.check_in_date, b.check_out_date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{date, memory_store, seed_hotel, seed_room, seed_user};
    use crate::models::user::Role;

    #[test]
    fn disjoint_ranges_do_not_conflict() {
        assert!(!ranges_conflict(
            date(2025, 6, 6),
            date(2025, 6, 8),
            date(2025, 6, 1),
            date(2025, 6, 5),
        ));
    }

    #[test]
    fn midpoint_overlap_conflicts() {
        assert!(ranges_conflict(
            date(2025, 6, 3),
            date(2025, 6, 7),
            date(2025, 6, 1),
            date(2025, 6, 5),
        ));
    }

    #[test]
    fn shared_boundary_date_conflicts() {
        // Checkout day equals the other stay's check-in day.
        assert!(ranges_conflict(
            date(2025, 6, 5),
            date(2025, 6, 8),
            date(2025, 6, 1),
            date(2025, 6, 5),
        ));
    }

    #[test]
    fn containment_conflicts_both_ways() {
        assert!(ranges_conflict(
            date(2025, 6, 2),
            date(2025, 6, 3),
            date(2025, 6, 1),
            date(2025, 6, 10),
        ));
        assert!(ranges_conflict(
            date(2025, 6, 1),
            date(2025, 6, 10),
            date(2025, 6, 2),
            date(2025, 6, 3),
        ));
    }

    #[test]
    fn predicate_is_symmetric() {
        let cases = [
            (date(2025, 6, 1), date(2025, 6, 5), date(2025, 6, 5), date(2025, 6, 8)),
            (date(2025, 6, 1), date(2025, 6, 5), date(2025, 6, 6), date(2025, 6, 8)),
            (date(2025, 6, 1), date(2025, 6, 10), date(2025, 6, 4), date(2025, 6, 6)),
        ];
        for (a_in, a_out, b_in, b_out) in cases {
            assert_eq!(
                ranges_conflict(a_in, a_out, b_in, b_out),
                ranges_conflict(b_in, b_out, a_in, a_out),
            );
        }
    }

    #[tokio::test]
    async fn cancelled_bookings_do_not_block() {
        let store = memory_store().await;
        let admin = seed_user(&store, "Admin", "admin@example.com", Role::Admin).await;
        let guest = seed_user(&store, "Guest", "guest@example.com", Role::User).await;
        let hotel = seed_hotel(&store, admin.id, "Seaside", "Lisbon").await;
        let room = seed_room(&store, hotel.id, "101", 90.0).await;

        let booking = store
            .try_insert_booking(guest.id, room.id, date(2025, 6, 1), date(2025, 6, 5))
            .await
            .unwrap()
            .unwrap();

        assert!(
            !is_room_available(&store, room.id, date(2025, 6, 3), date(2025, 6, 7))
                .await
                .unwrap()
        );

        store.cancel_booking(booking.id).await.unwrap();

        assert!(
            is_room_available(&store, room.id, date(2025, 6, 3), date(2025, 6, 7))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn repeated_checks_agree_when_state_is_unchanged() {
        let store = memory_store().await;
        let admin = seed_user(&store, "Admin", "admin@example.com", Role::Admin).await;
        let guest = seed_user(&store, "Guest", "guest@example.com", Role::User).await;
        let hotel = seed_hotel(&store, admin.id, "Seaside", "Lisbon").await;
        let room = seed_room(&store, hotel.id, "101", 90.0).await;

        store
            .try_insert_booking(guest.id, room.id, date(2025, 6, 1), date(2025, 6, 5))
            .await
            .unwrap()
            .unwrap();

        let first = is_room_available(&store, room.id, date(2025, 6, 4), date(2025, 6, 6))
            .await
            .unwrap();
        let second = is_room_available(&store, room.id, date(2025, 6, 4), date(2025, 6, 6))
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}

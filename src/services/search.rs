use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::hotel::Hotel;
use crate::models::room::Room;
use crate::services::availability;
use crate::store::Store;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HotelSearchResult {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

/// Hotels matching the location filter that keep at least one room after
/// price and availability filtering; each result carries only its
/// qualifying rooms. The price band applies only when both bounds are
/// given; likewise the date window.
pub async fn search_hotels(
    store: &Store,
    query: &SearchQuery,
) -> Result<Vec<HotelSearchResult>, ApiError> {
    let band = match (query.min_price, query.max_price) {
        (Some(min), Some(max)) => Some((min, max)),
        _ => None,
    };
    let window = match (query.check_in, query.check_out) {
        (Some(check_in), Some(check_out)) => Some((check_in, check_out)),
        _ => None,
    };

    let hotels = store.hotels_by_location(query.location.as_deref()).await?;

    let mut results = Vec::new();
    for hotel in hotels {
        let rooms = store.rooms_for_hotel(hotel.id, band).await?;

        let mut qualifying = Vec::new();
        for room in rooms {
            if let Some((check_in, check_out)) = window {
                if !availability::is_room_available(store, room.id, check_in, check_out).await? {
                    continue;
                }
            }
            qualifying.push(room);
        }

        if qualifying.is_empty() {
            continue;
        }
        results.push(HotelSearchResult {
            hotel,
            rooms: qualifying,
        });
    }

    Ok(results)
}

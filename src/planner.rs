use crate::app_config::AppConfig;
use crate::domain::events::Event;
use crate::domain::{GeoPoint, Group, Member, MemberLocation, TravelTimeSample, Venue};
use crate::maps::{MapsError, MapsService};
use crate::meetup::{Fairness, compute_fairness_with};
use crate::store::MeetupStore;
use futures::future::join_all;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetupPlan {
    pub group_id: String,
    pub midpoint: GeoPoint,
    pub locations: Vec<MemberLocation>,
    pub travel_times: Vec<TravelTimeSample>,
    pub fairness: Option<Fairness>,
    pub venues: Vec<Venue>,
}

#[instrument(skip_all, fields(group_id = %group.id))]
pub async fn plan_meetup(group: &Group, maps: &dyn MapsService, config: &AppConfig) -> Result<MeetupPlan, PlannerError> {
    info!("🧭 Planning '{}' for {} member(s)...", group.name, group.members.len());

    let locations = resolve_locations(&group.members, maps).await;
    let midpoint = midpoint_of(&locations, config).await?.ok_or_else(|| PlannerError::NoResolvedMembers {
        group: group.name.clone(),
    })?;

    let travel_times = travel_times_to(midpoint, &locations, group, maps).await;
    let minutes = travel_times.iter().map(|sample| sample.minutes).collect::<Vec<_>>();
    let fairness = if minutes.is_empty() {
        warn!("⚠️ No travel times available, skipping fairness");
        None
    } else {
        compute_fairness_with(&minutes, config.fairness())
            .inspect_err(|e| warn!("⚠️ Fairness not available: {}", e))
            .ok()
    };

    let venue_type = group.venue_type.as_deref().unwrap_or(config.venues().default_type());
    let venues = maps.nearby(midpoint, config.venues().search_radius_m(), venue_type).await?;
    let venues = rank_venues(venues, midpoint, config.venues().max_venues());

    info!(
        "🧭 Planning '{}'... OK, midpoint {}, fairness {}, {} venue(s)",
        group.name,
        midpoint,
        fairness.map_or("n/a".to_string(), |f| format!("{}%", f.percentage())),
        venues.len()
    );

    Ok(MeetupPlan {
        group_id: group.id.clone(),
        midpoint,
        locations,
        travel_times,
        fairness,
        venues,
    })
}

/// A stored location wins over geocoding the address. Members that cannot be resolved are skipped.
async fn resolve_locations(members: &[Member], maps: &dyn MapsService) -> Vec<MemberLocation> {
    let resolved = join_all(members.iter().map(|member| async move {
        let point = match (member.location, &member.address) {
            (Some(point), _) => point,
            (None, Some(address)) => match maps.geocode(address).await {
                Ok(point) => point,
                Err(e) => {
                    warn!(member_id = member.id, "⚠️ Could not resolve the location of '{}': {}", member.name, e);
                    return None;
                }
            },
            (None, None) => {
                warn!(member_id = member.id, "⚠️ '{}' has no location", member.name);
                return None;
            }
        };

        Some(MemberLocation {
            member_id: member.id.clone(),
            point,
            address: member.address.clone(),
            travel_mode: member.travel_mode,
        })
    }))
    .await;

    resolved.into_iter().flatten().collect()
}

async fn midpoint_of(locations: &[MemberLocation], config: &AppConfig) -> Result<Option<GeoPoint>, PlannerError> {
    let (tx, rx) = mpsc::channel::<Event>(config.core().store_buffer_size());
    let mut store = MeetupStore::new(rx);
    let notifier = store.notifier();

    let feed = async move {
        for location in locations {
            tx.send(Event::LocationResolved(location.clone())).await?;
        }
        Ok::<_, mpsc::error::SendError<Event>>(())
    };

    let ((), fed) = tokio::join!(store.listen(), feed);
    fed.map_err(|_| PlannerError::StoreClosed)?;

    let midpoint = notifier.borrow().midpoint;
    Ok(midpoint)
}

async fn travel_times_to(midpoint: GeoPoint, locations: &[MemberLocation], group: &Group, maps: &dyn MapsService) -> Vec<TravelTimeSample> {
    let samples = join_all(locations.iter().map(|location| async move {
        maps.travel_time(&location.member_id, location.point, midpoint, location.travel_mode, group.meet_at)
            .await
            .inspect_err(|e| warn!(member_id = location.member_id, "⚠️ No travel time for member '{}': {}", location.member_id, e))
            .ok()
    }))
    .await;

    samples.into_iter().flatten().collect()
}

/// Closest to the midpoint first, better rated first on equal distance.
fn rank_venues(mut venues: Vec<Venue>, midpoint: GeoPoint, max_venues: usize) -> Vec<Venue> {
    venues.sort_by_cached_key(|venue| {
        (
            OrderedFloat(venue.location.distance_to(&midpoint)),
            Reverse(OrderedFloat(venue.rating.unwrap_or(0.0))),
        )
    });
    venues.truncate(max_venues);
    venues
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("none of the members of group '{group}' could be located")]
    NoResolvedMembers { group: String },
    #[error(transparent)]
    Maps(#[from] MapsError),
    #[error("the meet-up store stopped before all locations were added")]
    StoreClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::TravelMode;
    use crate::maps::domain::ApiStatus;
    use crate::meetup::FairnessTier;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use test_log::test;

    #[derive(Default)]
    struct FakeMaps {
        addresses: HashMap<String, GeoPoint>,
        minutes: HashMap<String, f64>,
        venues: Vec<Venue>,
        nearby_calls: Mutex<Vec<(GeoPoint, u32, String)>>,
        departures: Mutex<Vec<Option<DateTime<Utc>>>>,
    }

    #[async_trait]
    impl MapsService for FakeMaps {
        async fn geocode(&self, address: &str) -> Result<GeoPoint, MapsError> {
            self.addresses.get(address).copied().ok_or_else(|| MapsError::NotFound(address.to_string()))
        }

        async fn travel_time(
            &self,
            member_id: &str,
            _origin: GeoPoint,
            _destination: GeoPoint,
            _mode: TravelMode,
            departure: Option<DateTime<Utc>>,
        ) -> Result<TravelTimeSample, MapsError> {
            self.departures.lock().unwrap().push(departure);
            let minutes = self.minutes.get(member_id).copied().ok_or_else(|| MapsError::NoRoute {
                member_id: member_id.to_string(),
                status: ApiStatus::ZeroResults,
            })?;

            Ok(TravelTimeSample {
                member_id: member_id.to_string(),
                minutes,
            })
        }

        async fn nearby(&self, center: GeoPoint, radius_m: u32, venue_type: &str) -> Result<Vec<Venue>, MapsError> {
            self.nearby_calls.lock().unwrap().push((center, radius_m, venue_type.to_string()));
            Ok(self.venues.clone())
        }
    }

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint { latitude, longitude }
    }

    fn member(id: &str, address: Option<&str>, location: Option<GeoPoint>) -> Member {
        Member {
            id: id.to_string(),
            name: id.to_uppercase(),
            address: address.map(str::to_string),
            location,
            travel_mode: TravelMode::Transit,
        }
    }

    fn venue(place_id: &str, location: GeoPoint, rating: Option<f64>) -> Venue {
        Venue {
            place_id: place_id.to_string(),
            name: place_id.to_uppercase(),
            vicinity: None,
            location,
            rating,
        }
    }

    fn group(members: Vec<Member>) -> Group {
        Group {
            id: "g1".to_string(),
            name: "Friday dinner".to_string(),
            venue_type: None,
            meet_at: None,
            members,
        }
    }

    fn fake_maps() -> FakeMaps {
        FakeMaps {
            addresses: HashMap::from([("Bugis Junction".to_string(), point(1.40, 103.90))]),
            minutes: HashMap::from([("alice".to_string(), 20.0), ("bob".to_string(), 20.0)]),
            venues: vec![
                venue("far", point(1.38, 103.88), Some(5.0)),
                venue("near", point(1.351, 103.851), None),
                venue("middle", point(1.36, 103.86), Some(4.0)),
            ],
            ..Default::default()
        }
    }

    #[test(tokio::test)]
    async fn plans_a_meetup_around_the_midpoint() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().build();
        let group = group(vec![
            member("alice", None, Some(point(1.30, 103.80))),
            member("bob", Some("Bugis Junction"), None),
        ]);

        let plan = plan_meetup(&group, &maps, &config).await?;

        assert_eq!(plan.group_id, "g1");
        assert!((plan.midpoint.latitude - 1.35).abs() < 1e-9);
        assert!((plan.midpoint.longitude - 103.85).abs() < 1e-9);
        assert_eq!(plan.locations.len(), 2);
        assert_eq!(plan.locations[1].point, point(1.40, 103.90));
        assert_eq!(plan.locations[1].address.as_deref(), Some("Bugis Junction"));
        assert_eq!(plan.travel_times.len(), 2);
        assert_eq!(
            plan.fairness,
            Some(Fairness {
                score: 1.0,
                tier: FairnessTier::Good
            })
        );
        assert_eq!(
            plan.venues.iter().map(|v| v.place_id.as_str()).collect::<Vec<_>>(),
            vec!["near", "middle", "far"]
        );

        Ok(())
    }

    #[test(tokio::test)]
    async fn a_stored_location_wins_over_the_address() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().build();
        let group = group(vec![member("alice", Some("Bugis Junction"), Some(point(1.30, 103.80)))]);

        let plan = plan_meetup(&group, &maps, &config).await?;

        assert_eq!(plan.midpoint, point(1.30, 103.80));

        Ok(())
    }

    #[test(tokio::test)]
    async fn skips_members_that_cannot_be_located() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().build();
        let group = group(vec![
            member("alice", None, Some(point(1.30, 103.80))),
            member("carol", Some("Atlantis"), None),
        ]);

        let plan = plan_meetup(&group, &maps, &config).await?;

        assert_eq!(plan.locations.len(), 1);
        assert_eq!(plan.locations[0].member_id, "alice");
        assert_eq!(plan.midpoint, point(1.30, 103.80));

        Ok(())
    }

    #[test(tokio::test)]
    async fn fails_when_no_member_can_be_located() {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().build();
        let group = group(vec![member("carol", Some("Atlantis"), None)]);

        let result = plan_meetup(&group, &maps, &config).await;

        assert!(matches!(result, Err(PlannerError::NoResolvedMembers { group }) if group == "Friday dinner"));
    }

    #[test(tokio::test)]
    async fn fairness_is_unavailable_without_travel_times() -> Result<(), PlannerError> {
        let maps = FakeMaps {
            minutes: HashMap::new(),
            ..fake_maps()
        };
        let config = AppConfigBuilder::new().build();
        let group = group(vec![member("alice", None, Some(point(1.30, 103.80)))]);

        let plan = plan_meetup(&group, &maps, &config).await?;

        assert!(plan.travel_times.is_empty());
        assert_eq!(plan.fairness, None);

        Ok(())
    }

    #[test(tokio::test)]
    async fn fairness_covers_only_members_with_a_route() -> Result<(), PlannerError> {
        let maps = FakeMaps {
            minutes: HashMap::from([("alice".to_string(), 5.0), ("bob".to_string(), 15.0)]),
            ..fake_maps()
        };
        let config = AppConfigBuilder::new().build();
        let group = group(vec![
            member("alice", None, Some(point(1.30, 103.80))),
            member("bob", Some("Bugis Junction"), None),
            member("dave", None, Some(point(1.35, 103.85))),
        ]);

        let plan = plan_meetup(&group, &maps, &config).await?;
        let fairness = plan.fairness.unwrap();

        assert_eq!(plan.travel_times.len(), 2);
        assert!((fairness.score - 0.6065).abs() < 1e-4);
        assert_eq!(fairness.tier, FairnessTier::Poor);

        Ok(())
    }

    #[test(tokio::test)]
    async fn uses_the_configured_fairness_thresholds() -> Result<(), PlannerError> {
        let maps = FakeMaps {
            minutes: HashMap::from([("alice".to_string(), 5.0), ("bob".to_string(), 15.0)]),
            ..fake_maps()
        };
        let config = AppConfigBuilder::new().fairness(0.5, 0.3).build();
        let group = group(vec![
            member("alice", None, Some(point(1.30, 103.80))),
            member("bob", Some("Bugis Junction"), None),
        ]);

        let plan = plan_meetup(&group, &maps, &config).await?;

        assert_eq!(plan.fairness.map(|f| f.tier), Some(FairnessTier::Good));

        Ok(())
    }

    #[test(tokio::test)]
    async fn searches_the_default_venue_type_within_the_configured_radius() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().build();
        let group = group(vec![member("alice", None, Some(point(1.30, 103.80)))]);

        plan_meetup(&group, &maps, &config).await?;

        let calls = maps.nearby_calls.lock().unwrap();
        assert_eq!(*calls, vec![(point(1.30, 103.80), 1000, "restaurant".to_string())]);

        Ok(())
    }

    #[test(tokio::test)]
    async fn passes_the_group_venue_type_and_meeting_time() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().build();
        let meet_at = "2025-06-06T11:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let group = Group {
            venue_type: Some("cafe".to_string()),
            meet_at: Some(meet_at),
            ..group(vec![member("alice", None, Some(point(1.30, 103.80)))])
        };

        plan_meetup(&group, &maps, &config).await?;

        assert_eq!(maps.nearby_calls.lock().unwrap()[0].2, "cafe");
        assert_eq!(*maps.departures.lock().unwrap(), vec![Some(meet_at)]);

        Ok(())
    }

    #[test]
    fn rank_venues_orders_by_distance_then_rating() {
        let midpoint = point(1.35, 103.85);
        let venues = vec![
            venue("far", point(1.40, 103.90), Some(5.0)),
            venue("unrated", point(1.36, 103.86), None),
            venue("rated", point(1.36, 103.86), Some(4.1)),
            venue("closest", point(1.35, 103.85), Some(2.0)),
        ];

        let ranked = rank_venues(venues, midpoint, 3);

        assert_eq!(
            ranked.iter().map(|v| v.place_id.as_str()).collect::<Vec<_>>(),
            vec!["closest", "rated", "unrated"]
        );
    }

    #[test(tokio::test)]
    async fn truncates_the_venues_to_the_configured_maximum() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().max_venues(1).build();
        let group = group(vec![member("alice", None, Some(point(1.35, 103.85)))]);

        let plan = plan_meetup(&group, &maps, &config).await?;

        assert_eq!(plan.venues.len(), 1);
        assert_eq!(plan.venues[0].place_id, "near");

        Ok(())
    }

    #[test(tokio::test)]
    async fn serializes_the_plan_as_json() -> Result<(), PlannerError> {
        let maps = fake_maps();
        let config = AppConfigBuilder::new().max_venues(1).build();
        let group = group(vec![member("alice", None, Some(point(1.35, 103.85)))]);

        let plan = plan_meetup(&group, &maps, &config).await?;
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["groupId"], json!("g1"));
        assert_eq!(json["midpoint"]["latitude"], json!(1.35));
        assert_eq!(json["locations"][0]["travelMode"], json!("TRANSIT"));
        assert_eq!(json["fairness"]["tier"], json!("good"));
        assert_eq!(json["venues"][0]["placeId"], json!("near"));

        Ok(())
    }
}

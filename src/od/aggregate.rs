use indexmap::IndexMap;
use tracing::{debug, info};

use super::utility::most_common;
use crate::endpoints::{Endpoints, TripEndpoints};
use crate::feed::TripIndex;

/// Grouping key. An absent `direction_id` and an explicit empty one fall
/// into the same group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub route_id: String,
    pub direction_id: String,
}

/// Counts collected for one (route, direction) over its trips.
#[derive(Debug, Default)]
pub struct RouteDirectionGroup {
    pub pairs: IndexMap<Endpoints, usize>,
    pub headsigns: IndexMap<String, usize>,
}

impl RouteDirectionGroup {
    /// Records one trip. Empty headsigns are not counted.
    pub fn observe(&mut self, endpoints: &Endpoints, headsign: &str) {
        *self.pairs.entry(endpoints.clone()).or_insert(0) += 1;
        if !headsign.is_empty() {
            *self.headsigns.entry(headsign.to_string()).or_insert(0) += 1;
        }
    }

    /// The most frequent (first, last) pair and how many trips share it.
    pub fn dominant_pair(&self) -> Option<(&Endpoints, usize)> {
        most_common(&self.pairs)
    }

    pub fn dominant_headsign(&self) -> Option<&str> {
        most_common(&self.headsigns).map(|(headsign, _)| headsign.as_str())
    }
}

/// Groups in the order each (route, direction) was first seen.
pub type Groups = IndexMap<GroupKey, RouteDirectionGroup>;

/// Dominant choices for one group that had at least one counted trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub endpoints: Endpoints,
    pub trip_count: usize,
    pub headsign: Option<String>,
}

/// Folds every trip with known endpoints into its (route, direction) group.
///
/// Trips missing from the index, or indexed without a route, are dropped.
pub fn aggregate(endpoints: &TripEndpoints, trips: &TripIndex) -> Groups {
    let mut groups = Groups::new();
    let mut dropped = 0usize;

    for (trip_id, pair) in endpoints {
        let Some(trip) = trips.get(trip_id) else {
            debug!(trip_id = %trip_id, "Trip not in trips table");
            dropped += 1;
            continue;
        };
        if trip.route_id.is_empty() {
            debug!(trip_id = %trip_id, "Trip without route_id");
            dropped += 1;
            continue;
        }

        let key = GroupKey {
            route_id: trip.route_id.clone(),
            direction_id: trip.direction_id.clone(),
        };
        groups.entry(key).or_default().observe(pair, &trip.headsign);
    }

    info!(
        groups = groups.len(),
        trips = endpoints.len() - dropped,
        dropped,
        "Trips aggregated by route and direction"
    );
    groups
}

/// Picks the dominant pair and headsign of every group. Groups without any
/// counted pair produce nothing.
pub fn summarize(groups: &Groups) -> Vec<GroupSummary> {
    groups
        .iter()
        .filter_map(|(key, group)| {
            let (endpoints, trip_count) = group.dominant_pair()?;
            Some(GroupSummary {
                key: key.clone(),
                endpoints: endpoints.clone(),
                trip_count,
                headsign: group.dominant_headsign().map(str::to_string),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::TripInfo;

    fn ends(first: &str, last: &str) -> Endpoints {
        Endpoints {
            first: first.to_string(),
            last: last.to_string(),
        }
    }

    fn trip(route_id: &str, direction_id: &str, headsign: &str) -> TripInfo {
        TripInfo {
            route_id: route_id.to_string(),
            direction_id: direction_id.to_string(),
            headsign: headsign.to_string(),
        }
    }

    fn key(route_id: &str, direction_id: &str) -> GroupKey {
        GroupKey {
            route_id: route_id.to_string(),
            direction_id: direction_id.to_string(),
        }
    }

    #[test]
    fn test_majority_pair_wins() {
        let endpoints: TripEndpoints = [
            ("t1".to_string(), ends("A", "Z")),
            ("t2".to_string(), ends("B", "Z")),
            ("t3".to_string(), ends("B", "Z")),
        ]
        .into_iter()
        .collect();
        let trips: TripIndex = [
            ("t1".to_string(), trip("r1", "0", "Centro")),
            ("t2".to_string(), trip("r1", "0", "Savassi")),
            ("t3".to_string(), trip("r1", "0", "Savassi")),
        ]
        .into_iter()
        .collect();

        let summaries = summarize(&aggregate(&endpoints, &trips));
        assert_eq!(
            summaries,
            vec![GroupSummary {
                key: key("r1", "0"),
                endpoints: ends("B", "Z"),
                trip_count: 2,
                headsign: Some("Savassi".to_string()),
            }]
        );
    }

    #[test]
    fn test_unknown_trips_and_routeless_trips_are_dropped() {
        let endpoints: TripEndpoints = [
            ("ghost".to_string(), ends("A", "B")),
            ("t1".to_string(), ends("A", "B")),
            ("t2".to_string(), ends("C", "D")),
        ]
        .into_iter()
        .collect();
        let trips: TripIndex = [
            ("t1".to_string(), trip("", "0", "Nowhere")),
            ("t2".to_string(), trip("r2", "1", "")),
        ]
        .into_iter()
        .collect();

        let groups = aggregate(&endpoints, &trips);
        assert_eq!(groups.len(), 1);
        let group = &groups[&key("r2", "1")];
        assert_eq!(group.pairs.values().sum::<usize>(), 1);
        assert!(group.headsigns.is_empty());
        assert_eq!(group.dominant_headsign(), None);
    }

    #[test]
    fn test_directions_are_separate_groups() {
        let endpoints: TripEndpoints = [
            ("t1".to_string(), ends("A", "B")),
            ("t2".to_string(), ends("B", "A")),
            ("t3".to_string(), ends("A", "C")),
        ]
        .into_iter()
        .collect();
        let trips: TripIndex = [
            ("t1".to_string(), trip("r1", "0", "")),
            ("t2".to_string(), trip("r1", "1", "")),
            ("t3".to_string(), trip("r1", "", "")),
        ]
        .into_iter()
        .collect();

        let groups = aggregate(&endpoints, &trips);
        let keys: Vec<&GroupKey> = groups.keys().collect();
        assert_eq!(keys, vec![&key("r1", "0"), &key("r1", "1"), &key("r1", "")]);
    }

    #[test]
    fn test_tie_keeps_first_seen_pair() {
        let endpoints: TripEndpoints = [
            ("t1".to_string(), ends("X", "Y")),
            ("t2".to_string(), ends("A", "B")),
            ("t3".to_string(), ends("A", "B")),
            ("t4".to_string(), ends("X", "Y")),
        ]
        .into_iter()
        .collect();
        let trips: TripIndex = ["t1", "t2", "t3", "t4"]
            .into_iter()
            .map(|t| (t.to_string(), trip("r1", "0", "")))
            .collect();

        for _ in 0..3 {
            let summaries = summarize(&aggregate(&endpoints, &trips));
            assert_eq!(summaries[0].endpoints, ends("X", "Y"));
            assert_eq!(summaries[0].trip_count, 2);
        }
    }

    #[test]
    fn test_empty_group_produces_no_summary() {
        let mut groups = Groups::new();
        groups.insert(key("r1", "0"), RouteDirectionGroup::default());
        assert!(summarize(&groups).is_empty());
    }
}

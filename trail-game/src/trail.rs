//! The trail graph: locations, the routes between them and the party's
//! progress along them.

use serde::{Deserialize, Serialize};

use crate::climate::ClimateKind;
use crate::entity::{Entity, EntityCategory};
use crate::river::RiverKind;

/// Location the journey starts from.
pub const START_LOCATION: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Landmark,
    Settlement { price_stage: u8 },
    RiverCrossing { river: RiverKind },
    ForkInRoad,
    TollRoad { toll_cents: u32 },
    Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub id: u8,
    pub name: &'static str,
    pub kind: LocationKind,
    pub climate: ClimateKind,
    pub description: &'static str,
}

impl Location {
    #[must_use]
    pub const fn has_store(&self) -> bool {
        matches!(self.kind, LocationKind::Settlement { .. })
    }

    #[must_use]
    pub const fn price_stage(&self) -> Option<u8> {
        match self.kind {
            LocationKind::Settlement { price_stage } => Some(price_stage),
            _ => None,
        }
    }

    #[must_use]
    pub const fn river(&self) -> Option<RiverKind> {
        match self.kind {
            LocationKind::RiverCrossing { river } => Some(river),
            _ => None,
        }
    }
}

impl Entity for Location {
    fn name(&self) -> &str {
        self.name
    }

    fn category(&self) -> EntityCategory {
        EntityCategory::Location
    }
}

/// A one-way leg between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub from: u8,
    pub to: u8,
    pub miles: u16,
}

const LOCATIONS: [Location; 20] = [
    Location {
        id: 0,
        name: "Independence, Missouri",
        kind: LocationKind::Settlement { price_stage: 0 },
        climate: ClimateKind::Moderate,
        description: "Wagons gather here each spring before setting out for Oregon.",
    },
    Location {
        id: 1,
        name: "Kansas River crossing",
        kind: LocationKind::RiverCrossing {
            river: RiverKind::Kansas,
        },
        climate: ClimateKind::Moderate,
        description: "The Kansas River runs wide and muddy across the trail.",
    },
    Location {
        id: 2,
        name: "Big Blue River crossing",
        kind: LocationKind::RiverCrossing {
            river: RiverKind::BigBlue,
        },
        climate: ClimateKind::Moderate,
        description: "A smaller river, but no ferry operates here.",
    },
    Location {
        id: 3,
        name: "Fort Kearney",
        kind: LocationKind::Settlement { price_stage: 1 },
        climate: ClimateKind::Continental,
        description: "An army post on the Platte, built to guard the emigrants.",
    },
    Location {
        id: 4,
        name: "Chimney Rock",
        kind: LocationKind::Landmark,
        climate: ClimateKind::Continental,
        description: "A spire of clay and sandstone visible for days across the plain.",
    },
    Location {
        id: 5,
        name: "Fort Laramie",
        kind: LocationKind::Settlement { price_stage: 2 },
        climate: ClimateKind::Continental,
        description: "A trading post at the edge of the high country.",
    },
    Location {
        id: 6,
        name: "Independence Rock",
        kind: LocationKind::Landmark,
        climate: ClimateKind::Dry,
        description: "Travelers carve their names here, hoping to arrive by the Fourth of July.",
    },
    Location {
        id: 7,
        name: "South Pass",
        kind: LocationKind::ForkInRoad,
        climate: ClimateKind::Polar,
        description: "The gentle crossing of the Continental Divide. The trail divides here.",
    },
    Location {
        id: 8,
        name: "Green River crossing",
        kind: LocationKind::RiverCrossing {
            river: RiverKind::Green,
        },
        climate: ClimateKind::Dry,
        description: "The Green River is deep and swift, but a ferry runs in season.",
    },
    Location {
        id: 9,
        name: "Fort Bridger",
        kind: LocationKind::Settlement { price_stage: 3 },
        climate: ClimateKind::Dry,
        description: "Jim Bridger's trading post on Blacks Fork.",
    },
    Location {
        id: 10,
        name: "Soda Springs",
        kind: LocationKind::Landmark,
        climate: ClimateKind::Dry,
        description: "Bubbling springs said to taste like beer.",
    },
    Location {
        id: 11,
        name: "Fort Hall",
        kind: LocationKind::Settlement { price_stage: 4 },
        climate: ClimateKind::Dry,
        description: "A Hudson's Bay Company post on the Snake River plain.",
    },
    Location {
        id: 12,
        name: "Snake River crossing",
        kind: LocationKind::RiverCrossing {
            river: RiverKind::Snake,
        },
        climate: ClimateKind::Dry,
        description: "Local guides offer to lead wagons across for a price.",
    },
    Location {
        id: 13,
        name: "Fort Boise",
        kind: LocationKind::Settlement { price_stage: 5 },
        climate: ClimateKind::Dry,
        description: "A small post where the Boise River meets the Snake.",
    },
    Location {
        id: 14,
        name: "Blue Mountains",
        kind: LocationKind::ForkInRoad,
        climate: ClimateKind::Polar,
        description: "Steep forested ridges. One road leads north to Fort Walla Walla.",
    },
    Location {
        id: 15,
        name: "Fort Walla Walla",
        kind: LocationKind::Settlement { price_stage: 6 },
        climate: ClimateKind::Continental,
        description: "The last fort before the Columbia.",
    },
    Location {
        id: 16,
        name: "The Dalles",
        kind: LocationKind::ForkInRoad,
        climate: ClimateKind::Continental,
        description: "The road ends at the Columbia. Take the toll road or float the river.",
    },
    Location {
        id: 17,
        name: "Barlow Toll Road",
        kind: LocationKind::TollRoad { toll_cents: 1_000 },
        climate: ClimateKind::Polar,
        description: "A rough road around the south flank of Mount Hood.",
    },
    Location {
        id: 18,
        name: "Columbia River",
        kind: LocationKind::RiverCrossing {
            river: RiverKind::Columbia,
        },
        climate: ClimateKind::Moderate,
        description: "Rafts carry wagons down the gorge toward the valley.",
    },
    Location {
        id: 19,
        name: "Willamette Valley, Oregon",
        kind: LocationKind::Destination,
        climate: ClimateKind::Moderate,
        description: "The end of the trail.",
    },
];

const ROUTES: [Route; 22] = [
    route(0, 1, 102),
    route(1, 2, 83),
    route(2, 3, 119),
    route(3, 4, 250),
    route(4, 5, 86),
    route(5, 6, 190),
    route(6, 7, 102),
    route(7, 8, 57),
    route(7, 9, 125),
    route(8, 10, 144),
    route(9, 10, 162),
    route(10, 11, 57),
    route(11, 12, 182),
    route(12, 13, 114),
    route(13, 14, 160),
    route(14, 15, 55),
    route(14, 16, 125),
    route(15, 16, 120),
    route(16, 17, 100),
    route(16, 18, 100),
    route(17, 19, 100),
    route(18, 19, 100),
];

const fn route(from: u8, to: u8, miles: u16) -> Route {
    Route { from, to, miles }
}

#[must_use]
pub fn location(id: u8) -> Option<&'static Location> {
    LOCATIONS.get(usize::from(id))
}

#[must_use]
pub fn locations() -> &'static [Location] {
    &LOCATIONS
}

/// Routes leaving a location, in table order.
#[must_use]
pub fn routes_from(id: u8) -> Vec<Route> {
    ROUTES.iter().copied().filter(|r| r.from == id).collect()
}

#[must_use]
pub fn route_between(from: u8, to: u8) -> Option<Route> {
    ROUTES.iter().copied().find(|r| r.from == from && r.to == to)
}

/// Result of moving along the current leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advance {
    pub miles: u32,
    pub arrived: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailProgress {
    pub current: u8,
    /// Location being travelled toward; `None` at forks until a branch is chosen
    /// and at the destination.
    pub next: Option<u8>,
    pub miles_to_next: u16,
    pub visited: Vec<u8>,
}

impl Default for TrailProgress {
    fn default() -> Self {
        Self::start()
    }
}

impl TrailProgress {
    #[must_use]
    pub fn start() -> Self {
        let mut progress = Self {
            current: START_LOCATION,
            next: None,
            miles_to_next: 0,
            visited: vec![START_LOCATION],
        };
        progress.select_single_route();
        progress
    }

    #[must_use]
    pub fn current_location(&self) -> Option<&'static Location> {
        location(self.current)
    }

    #[must_use]
    pub fn next_location(&self) -> Option<&'static Location> {
        self.next.and_then(location)
    }

    /// Branches the party must pick between, empty unless stopped at a fork.
    #[must_use]
    pub fn pending_branches(&self) -> Vec<Route> {
        if self.next.is_some() {
            return Vec::new();
        }
        let routes = routes_from(self.current);
        if routes.len() > 1 { routes } else { Vec::new() }
    }

    #[must_use]
    pub fn needs_branch_choice(&self) -> bool {
        !self.pending_branches().is_empty()
    }

    /// Commit to one of the current location's outgoing routes.
    pub fn choose_branch(&mut self, to: u8) -> bool {
        let Some(route) = route_between(self.current, to) else {
            return false;
        };
        self.next = Some(route.to);
        self.miles_to_next = route.miles;
        true
    }

    #[must_use]
    pub fn has_arrived(&self) -> bool {
        self.current_location()
            .is_some_and(|loc| matches!(loc.kind, LocationKind::Destination))
    }

    /// Move up to `miles` toward the next location, stopping on arrival.
    pub fn advance(&mut self, miles: u32) -> Advance {
        let Some(next) = self.next else {
            return Advance::default();
        };
        let travelled = miles.min(u32::from(self.miles_to_next));
        self.miles_to_next = self
            .miles_to_next
            .saturating_sub(u16::try_from(travelled).unwrap_or(u16::MAX));
        if self.miles_to_next > 0 {
            return Advance {
                miles: travelled,
                arrived: None,
            };
        }
        self.current = next;
        self.next = None;
        if !self.visited.contains(&next) {
            self.visited.push(next);
        }
        self.select_single_route();
        Advance {
            miles: travelled,
            arrived: Some(next),
        }
    }

    fn select_single_route(&mut self) {
        let routes = routes_from(self.current);
        if let [only] = routes.as_slice() {
            self.next = Some(only.to);
            self.miles_to_next = only.miles;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_ids_match_table_positions() {
        for (idx, loc) in locations().iter().enumerate() {
            assert_eq!(usize::from(loc.id), idx);
        }
        for route in ROUTES {
            assert!(location(route.from).is_some());
            assert!(location(route.to).is_some());
            assert!(route.from < route.to);
        }
    }

    #[test]
    fn every_location_reaches_the_destination() {
        for loc in locations() {
            if matches!(loc.kind, LocationKind::Destination) {
                assert!(routes_from(loc.id).is_empty());
            } else {
                assert!(!routes_from(loc.id).is_empty(), "{} is a dead end", loc.name);
            }
        }
    }

    #[test]
    fn advance_stops_at_each_location() {
        let mut progress = TrailProgress::start();
        assert_eq!(progress.next, Some(1));
        let step = progress.advance(60);
        assert_eq!(step.miles, 60);
        assert_eq!(step.arrived, None);
        let step = progress.advance(60);
        assert_eq!(step.miles, 42);
        assert_eq!(step.arrived, Some(1));
        assert_eq!(progress.next, Some(2));
        assert_eq!(progress.miles_to_next, 83);
    }

    #[test]
    fn forks_wait_for_a_branch_choice() {
        let mut progress = TrailProgress {
            current: 6,
            next: Some(7),
            miles_to_next: 5,
            visited: vec![0, 6],
        };
        assert_eq!(progress.advance(20).arrived, Some(7));
        assert!(progress.needs_branch_choice());
        assert_eq!(progress.advance(20), Advance::default());
        assert!(!progress.choose_branch(12));
        assert!(progress.choose_branch(9));
        assert_eq!(progress.miles_to_next, 125);
        assert!(!progress.needs_branch_choice());
    }

    #[test]
    fn destination_is_terminal() {
        let mut progress = TrailProgress {
            current: 18,
            next: Some(19),
            miles_to_next: 10,
            visited: vec![18],
        };
        progress.advance(10);
        assert!(progress.has_arrived());
        assert_eq!(progress.next, None);
        assert!(!progress.needs_branch_choice());
    }
}

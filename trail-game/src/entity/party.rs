use rand::Rng;
use serde::{Deserialize, Serialize};

use super::person::{HealthStatus, Person, Profession};
use crate::numbers::clamp_usize_to_u16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Party {
    pub members: Vec<Person>,
}

impl Party {
    /// Build a party with the leader first, followed by companions.
    #[must_use]
    pub fn from_names<I, S>(
        leader: impl Into<String>,
        profession: Profession,
        companions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members = vec![Person::leader(leader, profession)];
        members.extend(companions.into_iter().map(|name| Person::new(name)));
        Self { members }
    }

    #[must_use]
    pub fn leader(&self) -> Option<&Person> {
        self.members
            .iter()
            .find(|member| member.leader)
            .or_else(|| self.members.first())
    }

    #[must_use]
    pub fn profession(&self) -> Option<Profession> {
        self.leader().and_then(|leader| leader.profession)
    }

    #[must_use]
    pub fn alive_count(&self) -> u16 {
        clamp_usize_to_u16(self.members.iter().filter(|m| m.is_alive()).count())
    }

    #[must_use]
    pub fn afflicted_count(&self) -> u16 {
        clamp_usize_to_u16(self.members.iter().filter(|m| m.is_afflicted()).count())
    }

    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.members.iter().all(|member| !member.is_alive())
    }

    pub fn living(&self) -> impl Iterator<Item = &Person> {
        self.members.iter().filter(|member| member.is_alive())
    }

    pub fn living_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.members.iter_mut().filter(|member| member.is_alive())
    }

    /// Mean health of the living members, 0 when everyone is dead.
    #[must_use]
    pub fn average_health(&self) -> u16 {
        let alive = u32::from(self.alive_count());
        if alive == 0 {
            return 0;
        }
        let total: u32 = self.living().map(|member| u32::from(member.health)).sum();
        u16::try_from(total / alive).unwrap_or(u16::MAX)
    }

    #[must_use]
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::from_value(self.average_health())
    }

    /// Pick a random living member, optionally restricted to unafflicted ones.
    pub fn random_living_index(&self, rng: &mut impl Rng, healthy_only: bool) -> Option<usize> {
        let candidates: Vec<usize> = self
            .members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive() && (!healthy_only || !member.is_afflicted()))
            .map(|(idx, _)| idx)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.gen_range(0..candidates.len())])
    }

    pub fn adjust_all(&mut self, delta: i32) {
        for member in self.living_mut() {
            member.adjust(delta);
        }
    }
}

//! Deterministic RNG streams segregated by simulation domain.
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Simulation domains that draw from their own stream, so that a hunt taken on
/// one run does not perturb the weather on the next day of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RngDomain {
    Climate,
    Travel,
    Events,
    Hunt,
    River,
    Trade,
}

impl RngDomain {
    const fn tag(self) -> &'static [u8] {
        match self {
            Self::Climate => b"climate",
            Self::Travel => b"travel",
            Self::Events => b"events",
            Self::Hunt => b"hunt",
            Self::River => b"river",
            Self::Trade => b"trade",
        }
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Bundle of per-domain streams derived from one user-visible seed.
#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    climate: CountingRng<ChaCha20Rng>,
    travel: CountingRng<ChaCha20Rng>,
    events: CountingRng<ChaCha20Rng>,
    hunt: CountingRng<ChaCha20Rng>,
    river: CountingRng<ChaCha20Rng>,
    trade: CountingRng<ChaCha20Rng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let stream = |domain: RngDomain| CountingRng::new(derive_stream_seed(seed, domain.tag()));
        Self {
            seed,
            climate: stream(RngDomain::Climate),
            travel: stream(RngDomain::Travel),
            events: stream(RngDomain::Events),
            hunt: stream(RngDomain::Hunt),
            river: stream(RngDomain::River),
            trade: stream(RngDomain::Trade),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Borrow the stream for a simulation domain.
    pub const fn stream(&mut self, domain: RngDomain) -> &mut CountingRng<ChaCha20Rng> {
        match domain {
            RngDomain::Climate => &mut self.climate,
            RngDomain::Travel => &mut self.travel,
            RngDomain::Events => &mut self.events,
            RngDomain::Hunt => &mut self.hunt,
            RngDomain::River => &mut self.river,
            RngDomain::Trade => &mut self.trade,
        }
    }

    /// Total draws across every stream.
    #[must_use]
    pub const fn total_draws(&self) -> u64 {
        self.climate.draws()
            + self.travel.draws()
            + self.events.draws()
            + self.hunt.draws()
            + self.river.draws()
            + self.trade.draws()
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so keying with the seed bytes cannot fail.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

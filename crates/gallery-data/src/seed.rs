use anyhow::{Result, ensure};
use gallery_types::{Album, Photo, User};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::MemoryStore;

const ADJECTIVES: &[&str] = &[
    "Sunny", "Misty", "Quiet", "Golden", "Frozen", "Wild", "Lazy", "Hidden", "Faded", "Bright",
];

const SUBJECTS: &[&str] = &[
    "beach", "mountains", "city lights", "garden", "harbour", "forest", "birthday", "road trip",
    "wedding", "market",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Size and seed of the generated dataset.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub users: usize,
    pub albums: usize,
    pub photos: usize,
    /// Fixed seed for a reproducible dataset. `None` draws a fresh one.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            albums: 50,
            photos: 500,
            seed: None,
        }
    }
}

impl MemoryStore {
    /// Generate a fake dataset with dense ids and every foreign key pointing at
    /// an existing parent.
    pub fn seeded(config: &SeedConfig) -> Result<Self> {
        ensure!(
            config.albums == 0 || config.users > 0,
            "cannot generate albums without users"
        );
        ensure!(
            config.photos == 0 || config.albums > 0,
            "cannot generate photos without albums"
        );

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        info!("Generating dataset with seed {}", seed);

        let users = (0..config.users as i64).map(|id| fake_user(&mut rng, id)).collect();

        let albums = (0..config.albums as i64)
            .map(|id| Album {
                id,
                userid: rng.random_range(0..config.users as i64),
                description: fake_description(&mut rng),
            })
            .collect();

        let photos = (0..config.photos as i64)
            .map(|id| Photo {
                id,
                albumid: rng.random_range(0..config.albums as i64),
                description: fake_description(&mut rng),
            })
            .collect();

        Ok(Self::from_records(users, albums, photos)?)
    }
}

fn fake_user(rng: &mut StdRng, id: i64) -> User {
    let domain = DOMAINS[rng.random_range(0..DOMAINS.len())];
    User {
        id,
        name: format!("User {id}"),
        username: format!("User{id}"),
        email: format!("user{id}@{domain}"),
        password_hash: fake_password_hash(rng),
    }
}

/// Salted SHA-256 of a throwaway password, hex encoded.
fn fake_password_hash(rng: &mut StdRng) -> String {
    let salt: [u8; 16] = rng.random();
    let password: String = rng
        .sample_iter(Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn fake_description(rng: &mut StdRng) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let subject = SUBJECTS[rng.random_range(0..SUBJECTS.len())];
    format!("{adjective} {subject}")
}

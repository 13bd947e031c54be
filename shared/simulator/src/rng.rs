pub use rand_chacha::ChaCha8Rng as SeededRng;

pub fn new_rng(seed: u64) -> SeededRng {
    rand_seeder::Seeder::from(seed).make_rng()
}

/// Picks a seed for runs that did not ask for one.
pub fn random_seed() -> u64 {
    use rand::Rng;
    rand::thread_rng().gen()
}

//! Default stack names

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "swift", "eager", "bright", "curious", "diligent", "fluent", "golden", "humble", "keen",
    "lively", "nimble", "patient", "quick", "steady", "trusty", "vivid", "wise",
];

const NOUNS: &[&str] = &[
    "archive", "atlas", "beacon", "catalog", "compass", "finder", "index", "ledger", "librarian",
    "lookup", "oracle", "scout", "seeker", "shelf", "tracker",
];

/// Generate a default name like "nimble-librarian-2847"
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let number: u16 = rng.gen_range(1000..10000);
    format!("{}-{}-{}", adjective, noun, number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kendra_sync_config::validate_stack_name;

    #[test]
    fn test_generate_name_format() {
        let name = generate();
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
        let number: u16 = parts[2].parse().unwrap();
        assert!((1000..10000).contains(&number));
    }

    #[test]
    fn generated_names_are_valid_stack_names() {
        for _ in 0..50 {
            assert!(validate_stack_name(&generate()).is_ok());
        }
    }
}

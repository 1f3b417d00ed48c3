use crate::error::{EasyToolsError, Result};
use crate::types::{PasswordOptions, PasswordStrength};
use rand::seq::SliceRandom;
use rand::Rng;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 32;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

fn char_pool(options: &PasswordOptions) -> Vec<char> {
    let mut pool: Vec<char> = LOWER.chars().collect();
    if options.uppercase {
        pool.extend(UPPER.chars());
    }
    if options.numbers {
        pool.extend(NUMBERS.chars());
    }
    if options.symbols {
        pool.extend(SYMBOLS.chars());
    }
    pool
}

pub fn generate_password<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> Result<String> {
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&options.length) {
        return Err(EasyToolsError::InvalidInput {
            reason: format!(
                "password length must be between {} and {}",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            ),
        });
    }

    let pool = char_pool(options);
    Ok((0..options.length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect())
}

pub fn password_strength(options: &PasswordOptions) -> PasswordStrength {
    let score = [
        options.length >= 8,
        options.length >= 12,
        options.length >= 16,
        options.uppercase,
        options.numbers,
        options.symbols,
    ]
    .iter()
    .filter(|&&hit| hit)
    .count();

    match score {
        s if s > 4 => PasswordStrength::VeryStrong,
        s if s > 2 => PasswordStrength::Strong,
        _ => PasswordStrength::Weak,
    }
}

/// One non-blank, trimmed line of `names`, chosen at random.
pub fn pick_name<R: Rng + ?Sized>(names: &str, rng: &mut R) -> Result<String> {
    let candidates: Vec<&str> = names
        .lines()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    if candidates.len() < 2 {
        return Err(EasyToolsError::InvalidInput {
            reason: "Enter at least two names, one per line.".to_string(),
        });
    }

    candidates
        .choose(rng)
        .map(|n| n.to_string())
        .ok_or_else(|| EasyToolsError::InvalidInput {
            reason: "no names to pick from".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_password_uses_only_enabled_classes() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = PasswordOptions {
            length: 32,
            uppercase: false,
            numbers: true,
            symbols: false,
        };
        let password = generate_password(&options, &mut rng).unwrap();
        assert_eq!(password.chars().count(), 32);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_password_default_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let password = generate_password(&PasswordOptions::default(), &mut rng).unwrap();
        assert_eq!(password.len(), 16);
    }

    #[test]
    fn test_password_length_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for length in [0, 7, 33] {
            let options = PasswordOptions {
                length,
                ..PasswordOptions::default()
            };
            assert!(generate_password(&options, &mut rng).is_err());
        }
    }

    #[test]
    fn test_strength_scoring() {
        let weak = PasswordOptions {
            length: 6,
            uppercase: false,
            numbers: true,
            symbols: false,
        };
        assert_eq!(password_strength(&weak), PasswordStrength::Weak);

        let strong = PasswordOptions {
            length: 12,
            uppercase: true,
            numbers: false,
            symbols: false,
        };
        assert_eq!(password_strength(&strong), PasswordStrength::Strong);

        assert_eq!(
            password_strength(&PasswordOptions::default()),
            PasswordStrength::VeryStrong
        );
        assert_eq!(PasswordStrength::VeryStrong.to_string(), "Very Strong");
    }

    #[test]
    fn test_pick_name() {
        let mut rng = StdRng::seed_from_u64(3);
        let names = "  Ada \n\nGrace\n  \nLinus\n";
        for _ in 0..20 {
            let winner = pick_name(names, &mut rng).unwrap();
            assert!(["Ada", "Grace", "Linus"].contains(&winner.as_str()));
        }
        assert!(pick_name("Solo\n\n", &mut rng).is_err());
    }
}

//! Input cleanup and random text generation for the command-line tool.

use rand::seq::SliceRandom;
use rand::Rng;

const ACCENTED: &str = "áéíóúÁÉÍÓÚ";

/// Keep ASCII letters, ASCII digits and the accented vowels `áéíóú` (either
/// case); drop everything else. Unless `case_sensitive`, the result is
/// lowercased.
pub fn normalize(text: &str, case_sensitive: bool) -> String {
    let kept = text
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || ACCENTED.contains(*ch));
    if case_sensitive {
        kept.collect()
    } else {
        kept.flat_map(char::to_lowercase).collect()
    }
}

/// Character set used by [`random_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Alphabet {
    /// `a` to `z`.
    #[default]
    Letters,
    /// `0` to `9`.
    Digits,
    /// Letters followed by digits.
    Alphanumeric,
}

impl Alphabet {
    fn symbols(self) -> &'static [u8] {
        const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        match self {
            Self::Letters => &ALPHANUMERIC[..26],
            Self::Digits => &ALPHANUMERIC[26..],
            Self::Alphanumeric => ALPHANUMERIC,
        }
    }
}

/// `len` characters drawn uniformly from `alphabet`.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, len: usize, alphabet: Alphabet) -> String {
    let symbols = alphabet.symbols();
    (0..len)
        .filter_map(|_| symbols.choose(rng))
        .map(|&byte| char::from(byte))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(normalize("Hello, World! 42", false), "helloworld42");
        assert_eq!(normalize("Hello, World! 42", true), "HelloWorld42");
    }

    #[test]
    fn keeps_accented_vowels_only() {
        assert_eq!(normalize("Canción ÁRBOL niño", false), "canciónárbolnio");
        assert_eq!(normalize("Ñandú", true), "andú");
    }

    #[test]
    fn empty_after_cleanup() {
        assert_eq!(normalize("  ¿?¡! ", false), "");
    }

    #[test]
    fn random_text_stays_in_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let letters = random_text(&mut rng, 200, Alphabet::Letters);
        assert_eq!(letters.len(), 200);
        assert!(letters.chars().all(|ch| ch.is_ascii_lowercase()));

        let digits = random_text(&mut rng, 50, Alphabet::Digits);
        assert!(digits.chars().all(|ch| ch.is_ascii_digit()));

        let mixed = random_text(&mut rng, 50, Alphabet::Alphanumeric);
        assert!(mixed
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
    }

    #[test]
    fn random_text_is_reproducible_from_a_seed() {
        let first = random_text(&mut StdRng::seed_from_u64(7), 32, Alphabet::Alphanumeric);
        let second = random_text(&mut StdRng::seed_from_u64(7), 32, Alphabet::Alphanumeric);
        assert_eq!(first, second);
        assert!(random_text(&mut StdRng::seed_from_u64(7), 0, Alphabet::Letters).is_empty());
    }
}

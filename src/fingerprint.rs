//! Order-independent identity for a set of asset names.
//!
//! Version 1 of the scheme: deduplicate and sort the names by their UTF-8
//! bytes, terminate each one with a NUL byte, and hash the concatenation with
//! 64-bit FNV-1a. Any implementation following these steps produces the same
//! value for the same set of names.
//!
//! Fingerprints are a cheap pre-check, not proof of identity. Two different
//! sets can collide; compare the sets themselves when that matters.

/// Bumped whenever the bytes fed to the hash change.
pub const FINGERPRINT_VERSION: u32 = 1;

const NAME_TERMINATOR: u8 = 0;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a64 {
    state: u64,
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Fnv1a64 {
    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn finish(&self) -> u64 {
        self.state
    }
}

/// Computes the fingerprint of a set of names. Order and repeats don't matter.
pub fn fingerprint<I, S>(names: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<S> = names.into_iter().collect();

    let mut sorted: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut hasher = Fnv1a64::default();
    for name in sorted {
        hasher.write(name.as_bytes());
        hasher.write(&[NAME_TERMINATOR]);
    }

    hasher.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    fn fnv(bytes: &[u8]) -> u64 {
        let mut hasher = Fnv1a64::default();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn fnv_reference_vectors() {
        assert_eq!(fnv(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn hashes_sorted_terminated_names() {
        assert_eq!(fingerprint(&["b", "a"]), fnv(b"a\0b\0"));
        assert_eq!(fingerprint(Vec::<String>::new()), fnv(b""));
    }

    #[test]
    fn order_independent() {
        assert_eq!(fingerprint(&["A", "B"]), fingerprint(&["B", "A"]));
        assert_eq!(
            fingerprint(vec!["icons/x.png", "a", "zebra"]),
            fingerprint(vec!["zebra", "icons/x.png", "a"])
        );
    }

    #[test]
    fn set_semantics() {
        assert_eq!(fingerprint(&["A", "B", "A"]), fingerprint(&["A", "B"]));
    }

    #[test]
    fn concatenation_is_unambiguous() {
        assert_ne!(fingerprint(&["A", "BC"]), fingerprint(&["AB", "C"]));
        assert_ne!(fingerprint(&["AB"]), fingerprint(&["A", "B"]));
        assert_ne!(fingerprint(&[""]), fingerprint(Vec::<&str>::new()));
    }

    #[test]
    fn disjoint_sets_differ() {
        let sets: &[&[&str]] = &[
            &["A"],
            &["B"],
            &["A", "B"],
            &["C", "D"],
            &["red", "blue"],
            &["green"],
            &["icons/close.png", "icons/open.png"],
        ];

        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                assert_ne!(fingerprint(*a), fingerprint(*b), "{:?} vs {:?}", a, b);
            }
        }
    }
}

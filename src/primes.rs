//! Prime table sizing for the chained hash table.
//!
//! Bucket counts are kept prime so that `hash % size` spreads clustered hash
//! values across the table. Sizes come from a curated ascending table; past
//! its end we fall back to trial-division search over odd candidates.

/// Table size requested by the first insertion into an empty pile.
pub(crate) const DEFAULT_CAPACITY: usize = 7;

/// Curated table sizes, each roughly 1.2x the previous.
const PRIMES: [usize; 72] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293,
    353, 431, 521, 631, 761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371,
    4049, 4861, 5839, 7013, 8419, 10103, 12143, 14591, 17519, 21023, 25229,
    30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631, 130363, 156437,
    187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899,
    4166287, 4999559, 5999471, 7199369,
];

/// Returns the smallest suitable table size that is at least `min`.
///
/// Prefers the curated table; beyond its largest entry, searches odd
/// candidates upward for the next prime.
pub(crate) fn next_prime(min: usize) -> usize {
    for &prime in &PRIMES {
        if prime >= min {
            return prime;
        }
    }
    let mut candidate = min | 1;
    while candidate < usize::MAX {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 2;
    }
    min
}

/// Returns the table size to grow to from `old_size`: the next prime at
/// least double, saturating rather than overflowing.
pub(crate) fn expand_prime(old_size: usize) -> usize {
    match old_size.checked_mul(2) {
        Some(doubled) => next_prime(doubled),
        None => usize::MAX,
    }
}

fn is_prime(candidate: usize) -> bool {
    if candidate & 1 == 0 {
        return candidate == 2;
    }
    let limit = candidate.isqrt();
    let mut divisor = 3;
    while divisor <= limit {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ascending() {
        for window in PRIMES.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn test_table_entries_are_prime() {
        for &prime in &PRIMES {
            assert!(is_prime(prime), "{prime} is not prime");
        }
    }

    #[test]
    fn test_next_prime_from_table() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(3), 3);
        assert_eq!(next_prime(4), 7);
        assert_eq!(next_prime(7), 7);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(1000), 1103);
        assert_eq!(next_prime(7_199_369), 7_199_369);
    }

    #[test]
    fn test_next_prime_past_table() {
        let beyond = next_prime(7_199_370);
        assert!(beyond > 7_199_369);
        assert!(is_prime(beyond));
    }

    #[test]
    fn test_expand_prime_doubles() {
        assert_eq!(expand_prime(7), next_prime(14));
        assert_eq!(expand_prime(1103), next_prime(2206));
        assert!(expand_prime(7) >= 14);
    }

    #[test]
    fn test_is_prime_basics() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(9));
        assert!(!is_prime(1_000_000));
        assert!(is_prime(1_000_003));
    }
}

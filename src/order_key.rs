//! # Fractional-Index Order Keys
//!
//! Opaque base-62 strings that sort lexicographically. Inserting an element
//! between two existing ones only requires generating one new key — the
//! neighbors never get renumbered. This is what makes drag-and-drop cheap:
//! a move touches exactly one key, no matter how large the layout is.
//!
//! Keys are fraction digit strings over `0-9A-Za-z` (so `'A' < 'a'` per byte
//! order). Two rules keep every key usable as a future bound:
//!
//! 1. A key never ends with the zero digit (`'0'`). A key like `"10"` would
//!    leave no room for a key between `"1"` and itself.
//! 2. `key_between` splits the gap at the midpoint, so repeated insertion
//!    between the same two neighbors grows the key by roughly one character
//!    per insertion. There is no in-session rebalancing; callers that reload
//!    a layout regenerate all keys with [`n_keys_between`], which resets the
//!    depth.

const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: usize = 62;

fn digit_value(c: u8) -> usize {
    match c {
        b'0'..=b'9' => (c - b'0') as usize,
        b'A'..=b'Z' => (c - b'A') as usize + 10,
        b'a'..=b'z' => (c - b'a') as usize + 36,
        _ => 0,
    }
}

/// A key strictly between `lo` and `up`, where `None` stands for the
/// corresponding end of the key space.
///
/// Preconditions (not validated in release builds): `lo < up` when both are
/// given, and neither bound ends with the zero digit.
pub fn key_between(lo: Option<&str>, up: Option<&str>) -> String {
    if let (Some(lo), Some(up)) = (lo, up) {
        debug_assert!(lo < up, "key_between: bounds out of order: {lo:?} >= {up:?}");
    }
    debug_assert!(!lo.is_some_and(|k| k.ends_with('0')));
    debug_assert!(!up.is_some_and(|k| k.ends_with('0')));
    midpoint(lo.unwrap_or(""), up)
}

/// `n` strictly increasing keys between the bounds, generated by balanced
/// bisection so the keys stay short and evenly spread. With no bounds this is
/// the seed generator for a freshly normalized layout.
pub fn n_keys_between(lo: Option<&str>, up: Option<&str>, n: usize) -> Vec<String> {
    match n {
        0 => Vec::new(),
        1 => vec![key_between(lo, up)],
        _ => {
            let mid = key_between(lo, up);
            let mut keys = n_keys_between(lo, Some(&mid), n / 2);
            let upper = n_keys_between(Some(&mid), up, n - n / 2 - 1);
            keys.push(mid);
            keys.extend(upper);
            keys
        }
    }
}

/// Core midpoint recursion. `lo` is a digit string (empty = lower end of the
/// key space); `up` is a digit string or `None` (= upper end).
fn midpoint(lo: &str, up: Option<&str>) -> String {
    if let Some(up) = up {
        // A shared prefix is carried over verbatim; the interesting digits
        // are the first ones that differ.
        let (lo_b, up_b) = (lo.as_bytes(), up.as_bytes());
        let mut n = 0;
        while n < lo_b.len() && n < up_b.len() && lo_b[n] == up_b[n] {
            n += 1;
        }
        if n > 0 {
            return format!("{}{}", &up[..n], midpoint(&lo[n..], Some(&up[n..])));
        }
    }

    let lo_digit = lo.as_bytes().first().map(|&c| digit_value(c)).unwrap_or(0);
    let up_digit = up
        .and_then(|u| u.as_bytes().first())
        .map(|&c| digit_value(c))
        .unwrap_or(BASE);

    if up_digit - lo_digit > 1 {
        // Room for a whole digit between the two: take the middle one. The
        // result is a single nonzero digit, so rule 1 holds.
        let mid = (lo_digit + up_digit + 1) / 2;
        return (DIGITS[mid] as char).to_string();
    }

    if up_digit == lo_digit {
        // Only reachable when `lo` is exhausted and `up` begins with the zero
        // digit: descend into `up`'s remaining digits.
        let rest = &up.unwrap_or("")[1..];
        return format!("0{}", midpoint("", Some(rest)));
    }

    // Consecutive digits: keep the lower one and find a key between the rest
    // of `lo` and the top of the key space. `lo` may already be exhausted
    // (e.g. between the lower end and "1"), in which case the rest is empty.
    let rest = lo.get(1..).unwrap_or("");
    format!("{}{}", DIGITS[lo_digit] as char, midpoint(rest, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_nothing_is_midpoint() {
        assert_eq!(key_between(None, None), "V");
    }

    #[test]
    fn test_between_bounds() {
        let k = key_between(Some("A"), Some("C"));
        assert!("A" < k.as_str() && k.as_str() < "C");
        assert_eq!(k, "B");

        let k = key_between(None, Some("V"));
        assert!(k.as_str() < "V");

        let k = key_between(Some("V"), None);
        assert!(k.as_str() > "V");
    }

    #[test]
    fn test_between_consecutive_digits() {
        let k = key_between(Some("V"), Some("W"));
        assert!("V" < k.as_str() && k.as_str() < "W");
    }

    #[test]
    fn test_between_prefixed_bounds() {
        let k = key_between(Some("V"), Some("V5"));
        assert!("V" < k.as_str() && k.as_str() < "V5");

        let k = key_between(Some("V2z"), Some("V3"));
        assert!("V2z" < k.as_str() && k.as_str() < "V3");
    }

    #[test]
    fn test_between_lower_end_and_small_digit() {
        // The lower bound exhausts immediately while the upper bound's first
        // digit is one above it: the result descends below the digit.
        let k = key_between(None, Some("1"));
        assert_eq!(k, "0V");

        let k = key_between(None, Some("01"));
        assert!(k.as_str() < "01");
        assert!(!k.ends_with('0'));
    }

    #[test]
    fn test_wide_seed_reaches_small_upper_bounds() {
        // Bisecting a large unbounded seed walks the upper bound all the way
        // down to single small digits.
        let keys = n_keys_between(None, None, 64);
        assert_eq!(keys.len(), 64);
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_n_keys_sorted_and_unique() {
        let keys = n_keys_between(None, None, 40);
        assert_eq!(keys.len(), 40);
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_n_keys_respect_bounds() {
        let keys = n_keys_between(Some("G"), Some("H"), 10);
        for k in &keys {
            assert!("G" < k.as_str() && k.as_str() < "H");
        }
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_keys_never_end_in_zero() {
        let mut keys = n_keys_between(None, None, 200);
        keys.push(key_between(None, Some("1")));
        keys.push(key_between(None, Some("0V")));
        for k in &keys {
            assert!(!k.ends_with('0'), "key {k:?} ends with the zero digit");
        }
    }

    #[test]
    fn test_repeated_insertion_grows_slowly() {
        // Keep inserting between "V" and the previously inserted key. Depth
        // grows by about one character per insertion, never more.
        let mut upper = key_between(Some("V"), None);
        for i in 0..32 {
            let k = key_between(Some("V"), Some(&upper));
            assert!("V" < k.as_str() && k.as_str() < upper.as_str());
            assert!(k.len() <= i + 2);
            upper = k;
        }
    }
}

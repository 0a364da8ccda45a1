//! Nearest-brightness lookup over the atlas key sequence.

/// Closest key in the ascending `keys` to `target`.
///
/// When `target` sits exactly between two keys the larger one is returned.
/// Targets at or above the last key resolve to the last key. An empty slice
/// resolves to 0, the blank tile's brightness.
pub fn nearest_key(keys: &[u8], target: u8) -> u8 {
    let Some(&first) = keys.first() else {
        return 0;
    };
    let target = target as i16;
    let mut last = first;

    for &key in keys {
        if key as i16 > target {
            let above = (key as i16 - target).abs();
            let below = (last as i16 - target).abs();
            return if above > below { last } else { key };
        }
        last = key;
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [u8; 3] = [0, 30, 200];

    #[test]
    fn tie_prefers_larger_key() {
        assert_eq!(nearest_key(&KEYS, 15), 30);
        assert_eq!(nearest_key(&KEYS, 115), 200);
    }

    #[test]
    fn above_maximum_clamps() {
        assert_eq!(nearest_key(&KEYS, 250), 200);
        assert_eq!(nearest_key(&KEYS, 200), 200);
        assert_eq!(nearest_key(&KEYS, 255), 200);
    }

    #[test]
    fn picks_closer_neighbour() {
        assert_eq!(nearest_key(&KEYS, 5), 0);
        assert_eq!(nearest_key(&KEYS, 16), 30);
        assert_eq!(nearest_key(&KEYS, 114), 30);
        assert_eq!(nearest_key(&KEYS, 0), 0);
    }

    #[test]
    fn single_key() {
        for y in 0..=255 {
            assert_eq!(nearest_key(&[0], y), 0);
        }
    }

    #[test]
    fn below_first_nonzero_key() {
        assert_eq!(nearest_key(&[40, 90], 10), 40);
        assert_eq!(nearest_key(&[40, 90], 0), 40);
    }

    #[test]
    fn never_strictly_farther_than_any_key() {
        let key_sets: [&[u8]; 5] =
            [&[0], &[0, 255], &[12, 99], &[0, 1, 2, 100, 101, 254], &[0, 7, 64, 65, 128, 190]];
        for keys in key_sets {
            for y in 0..=255u8 {
                let got = nearest_key(keys, y);
                assert!(keys.contains(&got));
                let dist = (got as i16 - y as i16).abs();
                for &k in keys {
                    let other = (k as i16 - y as i16).abs();
                    assert!(other >= dist, "y={y} got={got} but {k} is closer");
                    if other == dist {
                        assert!(got >= k, "y={y} tie should prefer {k} over {got}");
                    }
                }
            }
        }
    }
}

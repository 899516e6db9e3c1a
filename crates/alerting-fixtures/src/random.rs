//! Random value helpers shared by every generator.
//!
//! Generators draw from a [`FixtureRng`], a seeded source that is safe to
//! share across threads. The free functions use thread-local randomness and
//! are meant for one-off values that do not need to be reproducible.

use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use alerting_model::uid::short_uid_from;
use alerting_model::{AlertQuery, RelativeTimeRange, short_uid};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};
use uuid::{Builder, Uuid};

/// A seeded random source shared by a generator and everything derived from it.
#[derive(Debug)]
pub struct FixtureRng {
    seed: u64,
    inner: Mutex<StdRng>,
}

impl FixtureRng {
    /// Creates a source seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns the seed this source started from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs `f` with exclusive access to the underlying generator.
    ///
    /// `f` must not call back into this source.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock();
        f(&mut rng)
    }

    /// Returns a value in `[0, n)`. `n` must be positive.
    pub fn int_n(&self, n: i64) -> i64 {
        self.with(|rng| rng.gen_range(0..n))
    }

    /// Returns a value in `range`. The range must not be empty.
    pub fn range(&self, range: Range<i64>) -> i64 {
        self.with(|rng| rng.gen_range(range))
    }

    /// Returns a non-negative value over the full `i64` range.
    pub fn int63(&self) -> i64 {
        self.range(0..i64::MAX)
    }

    /// Flips a fair coin.
    pub fn coin(&self) -> bool {
        self.with(|rng| rng.gen_bool(0.5))
    }

    /// Picks one of `items` uniformly. `items` must not be empty.
    pub fn pick<T: Copy>(&self, items: &[T]) -> T {
        let idx = self.with(|rng| rng.gen_range(0..items.len()));
        items[idx]
    }

    /// Returns a v4 UUID drawn from this source.
    pub fn uuid(&self) -> Uuid {
        self.with(random_uuid)
    }

    /// Returns a short UID drawn from this source.
    pub fn short_uid(&self) -> String {
        self.with(|rng| {
            let uuid = random_uuid(rng);
            short_uid_from(rng, uuid)
        })
    }

    /// Returns `count` random labels whose keys and values start with `prefix`.
    pub fn labels(&self, count: usize, prefix: &str) -> HashMap<String, String> {
        self.with(|rng| {
            labels_with(count, prefix, || {
                let uuid = random_uuid(rng);
                short_uid_from(rng, uuid)
            })
        })
    }

    /// Returns a random query step.
    pub fn alert_query(&self) -> AlertQuery {
        self.with(|rng| {
            let mut uid = || {
                let uuid = random_uuid(rng);
                short_uid_from(rng, uuid)
            };
            let (ds, k1, v1, k2, ref_id, query_type) = (uid(), uid(), uid(), uid(), uid(), uid());
            let from = rng.gen_range(5..15);
            let to = rng.gen_range(0..from);
            let number = rng.gen_range(0..i64::MAX);
            build_query(ds, ref_id, query_type, (k1, v1), (k2, number), from, to)
        })
    }
}

/// Returns `count` labels with keys `{prefix}key-{uid}` and values `{prefix}value-{uid}`.
#[must_use]
pub fn generate_alert_labels(count: usize, prefix: &str) -> HashMap<String, String> {
    labels_with(count, prefix, short_uid)
}

/// Returns a query step with random datasource, ref id, query type and
/// payload, covering a range 5 to 14 minutes back.
#[must_use]
pub fn generate_alert_query() -> AlertQuery {
    let mut rng = rand::thread_rng();
    let from = rng.gen_range(5..15);
    let to = rng.gen_range(0..from);
    build_query(
        short_uid(),
        short_uid(),
        short_uid(),
        (short_uid(), short_uid()),
        (short_uid(), rng.gen_range(0..i64::MAX)),
        from,
        to,
    )
}

/// Returns a value in `range` from thread-local randomness.
#[must_use]
pub fn random_in(range: Range<i64>) -> i64 {
    rand::thread_rng().gen_range(range)
}

fn labels_with(
    count: usize,
    prefix: &str,
    mut uid: impl FnMut() -> String,
) -> HashMap<String, String> {
    let mut labels = HashMap::with_capacity(count);
    // Keys carry a random UID; a repeat is practically impossible but keep
    // drawing so the map always holds exactly `count` entries.
    while labels.len() < count {
        labels.insert(format!("{prefix}key-{}", uid()), format!("{prefix}value-{}", uid()));
    }
    labels
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

fn build_query(
    datasource_uid: String,
    ref_id: String,
    query_type: String,
    text: (String, String),
    number: (String, i64),
    from_minutes: u64,
    to_minutes: u64,
) -> AlertQuery {
    let mut model = Map::new();
    model.insert(text.0, Value::String(text.1));
    model.insert(number.0, Value::String(number.1.to_string()));

    AlertQuery {
        ref_id,
        query_type,
        relative_time_range: RelativeTimeRange::new(
            Duration::from_secs(from_minutes * 60),
            Duration::from_secs(to_minutes * 60),
        ),
        datasource_uid,
        model: Value::Object(model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rng_tests {
        use super::*;

        #[test]
        fn same_seed_same_sequence() {
            let a = FixtureRng::seeded(7);
            let b = FixtureRng::seeded(7);
            for _ in 0..50 {
                assert_eq!(a.int_n(1000), b.int_n(1000));
            }
            assert_eq!(a.short_uid(), b.short_uid());
            assert_eq!(a.uuid(), b.uuid());
        }

        #[test]
        fn seed_is_kept() {
            assert_eq!(FixtureRng::seeded(123).seed(), 123);
        }

        #[test]
        fn int_n_stays_in_bounds() {
            let rng = FixtureRng::seeded(1);
            for _ in 0..1000 {
                let v = rng.int_n(6);
                assert!((0..6).contains(&v));
            }
        }

        #[test]
        fn range_stays_in_bounds() {
            let rng = FixtureRng::seeded(2);
            for _ in 0..1000 {
                let v = rng.range(10..20);
                assert!((10..20).contains(&v));
            }
        }

        #[test]
        fn int63_is_non_negative() {
            let rng = FixtureRng::seeded(3);
            for _ in 0..1000 {
                assert!(rng.int63() >= 0);
            }
        }

        #[test]
        fn pick_returns_member() {
            let rng = FixtureRng::seeded(4);
            let items = ["a", "b", "c"];
            for _ in 0..100 {
                assert!(items.contains(&rng.pick(&items)));
            }
        }

        #[test]
        fn coin_lands_both_ways() {
            let rng = FixtureRng::seeded(5);
            let heads = (0..1000).filter(|_| rng.coin()).count();
            assert!(heads > 0 && heads < 1000);
        }

        #[test]
        fn uuid_is_v4() {
            let rng = FixtureRng::seeded(6);
            assert_eq!(rng.uuid().get_version_num(), 4);
        }

        #[test]
        fn seeded_labels_reproducible() {
            let a = FixtureRng::seeded(8).labels(3, "p-");
            let b = FixtureRng::seeded(8).labels(3, "p-");
            assert_eq!(a, b);
            assert_eq!(a.len(), 3);
        }

        #[test]
        fn seeded_query_shape() {
            let q = FixtureRng::seeded(9).alert_query();
            assert!(q.relative_time_range.is_valid());
            assert_eq!(q.model.as_object().map(Map::len), Some(2));
        }
    }

    #[test]
    fn labels_have_prefix_and_count() {
        let labels = generate_alert_labels(4, "test-lbl-");
        assert_eq!(labels.len(), 4);
        for (k, v) in &labels {
            assert!(k.starts_with("test-lbl-key-"), "{k}");
            assert!(v.starts_with("test-lbl-value-"), "{v}");
        }
    }

    #[test]
    fn zero_labels_is_empty_map() {
        assert!(generate_alert_labels(0, "x-").is_empty());
    }

    #[test]
    fn alert_query_time_range() {
        for _ in 0..100 {
            let q = generate_alert_query();
            let from = q.relative_time_range.from.as_secs() / 60;
            let to = q.relative_time_range.to.as_secs() / 60;
            assert!((5..15).contains(&from), "from={from}");
            assert!(to < from, "to={to} from={from}");
        }
    }

    #[test]
    fn alert_query_fields_populated() {
        let q = generate_alert_query();
        assert!(!q.ref_id.is_empty());
        assert!(!q.query_type.is_empty());
        assert!(!q.datasource_uid.is_empty());
        assert!(q.model.is_object());
    }
}

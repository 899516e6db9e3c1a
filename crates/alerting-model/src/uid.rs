//! Short random identifiers used for rule, dashboard and datasource UIDs.

use rand::Rng;
use uuid::Uuid;

/// Length of every identifier produced by [`short_uid`].
pub const SHORT_UID_LENGTH: usize = 14;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns a new short UID: one ASCII letter followed by 13 hex digits of a v4 UUID.
#[must_use]
pub fn short_uid() -> String {
    let mut rng = rand::thread_rng();
    short_uid_from(&mut rng, Uuid::new_v4())
}

/// Builds a short UID from a caller-provided random source and UUID.
///
/// Seeded generators use this so their identifiers are reproducible.
pub fn short_uid_from<R: Rng + ?Sized>(rng: &mut R, uuid: Uuid) -> String {
    let first = char::from(LETTERS[rng.gen_range(0..LETTERS.len())]);
    let hex = uuid.simple().to_string();

    let mut uid = String::with_capacity(SHORT_UID_LENGTH);
    uid.push(first);
    uid.push_str(&hex[..SHORT_UID_LENGTH - 1]);
    uid
}

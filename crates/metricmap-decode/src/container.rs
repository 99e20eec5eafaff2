//! Cardinality-bounded map and array walkers.
//!
//! Both walkers check the declared entry count against the cursor's
//! [`DecodeLimits`](crate::DecodeLimits) before touching any entry, so a
//! hostile header cannot force unbounded work. Entries are handed to
//! caller-supplied handlers together with a caller-owned context; each
//! handler invocation is its own unit of effect, and the first failure
//! stops the walk.
//!
//! ```text
//! map   { "name": <v>, "value": <v> }  ── key lookup ──► handler(cursor, i, ctx)
//! array [ <v>, <v>, <v> ]              ───────────────► handler(cursor, i, ctx)
//! ```

use tracing::debug;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::scalar::consume_str;

/// Handler invoked with the cursor positioned at an entry's value.
pub type EntryHandler<C> = fn(&mut Cursor<'_>, usize, &mut C) -> DecodeResult<()>;

/// One `identifier → handler` row of a map dispatch table.
pub struct MapEntryHandler<C> {
    pub identifier: &'static str,
    pub handler: EntryHandler<C>,
}

impl<C> MapEntryHandler<C> {
    pub const fn new(identifier: &'static str, handler: EntryHandler<C>) -> Self {
        Self {
            identifier,
            handler,
        }
    }
}

impl<C> std::fmt::Debug for MapEntryHandler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapEntryHandler")
            .field("identifier", &self.identifier)
            .finish()
    }
}

/// Walk a map, dispatching each key to the matching handler in `handlers`.
///
/// Keys must match an identifier exactly; a key with no handler fails with
/// [`DecodeError::UnexpectedKey`]. A declared count above the map limit
/// fails with [`DecodeError::PendingMapEntries`] before any handler runs.
pub fn consume_bounded_map<C>(
    cursor: &mut Cursor<'_>,
    handlers: &[MapEntryHandler<C>],
    context: &mut C,
) -> DecodeResult<()> {
    debug_assert!(
        identifiers_distinct(handlers),
        "map handler identifiers must be distinct"
    );

    let declared = cursor.read_map_len()?;
    let limit = cursor.limits().max_map_entries;
    if declared > limit {
        debug!(declared, limit, "map entry count exceeds limit");
        return Err(cursor.fail(DecodeError::PendingMapEntries { declared, limit }));
    }

    for index in 0..declared as usize {
        let key = consume_str(cursor)?;
        let Some(entry) = handlers.iter().find(|h| h.identifier == key) else {
            return Err(cursor.fail(DecodeError::UnexpectedKey(key.to_string())));
        };
        (entry.handler)(cursor, index, context)?;
    }

    Ok(())
}

/// Walk an array, calling `handler(cursor, index, context)` once per entry
/// in increasing index order.
///
/// A declared count above the array limit fails with
/// [`DecodeError::PendingArrayEntries`] before any handler runs.
pub fn consume_bounded_array<C, F>(
    cursor: &mut Cursor<'_>,
    mut handler: F,
    context: &mut C,
) -> DecodeResult<()>
where
    F: FnMut(&mut Cursor<'_>, usize, &mut C) -> DecodeResult<()>,
{
    let declared = cursor.read_array_len()?;
    let limit = cursor.limits().max_array_entries;
    if declared > limit {
        debug!(declared, limit, "array entry count exceeds limit");
        return Err(cursor.fail(DecodeError::PendingArrayEntries { declared, limit }));
    }

    for index in 0..declared as usize {
        handler(cursor, index, context)?;
    }

    Ok(())
}

fn identifiers_distinct<C>(handlers: &[MapEntryHandler<C>]) -> bool {
    handlers.iter().enumerate().all(|(i, a)| {
        handlers[i + 1..]
            .iter()
            .all(|b| a.identifier != b.identifier)
    })
}

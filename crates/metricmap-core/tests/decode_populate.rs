//! Rebuilds a metric store from an encoded snapshot.
//!
//! The snapshot layout mirrors what an exporter would write for one metric
//! definition:
//!
//! ```text
//! { "fqname": str, "help": str, "keys": [str], "series": [{ "labels": [str], "value": f64, "ts": uint }] }
//! ```

use metricmap_core::*;
use metricmap_decode::{
    Cursor, DecodeError, DecodeResult, MapEntryHandler, consume_bounded_array,
    consume_bounded_map, consume_double, consume_string, consume_uint,
};
use rmp::encode;

#[derive(Debug, Default)]
struct SeriesRecord {
    labels: Vec<String>,
    value: f64,
    timestamp: u64,
}

#[derive(Debug, Default)]
struct Snapshot {
    fqname: String,
    help: String,
    keys: Vec<String>,
    series: Vec<SeriesRecord>,
}

fn push_strings(cursor: &mut Cursor<'_>, out: &mut Vec<String>) -> DecodeResult<()> {
    consume_bounded_array(
        cursor,
        |c, _, out: &mut Vec<String>| {
            out.push(consume_string(c)?);
            Ok(())
        },
        out,
    )
}

fn on_series_labels(cursor: &mut Cursor<'_>, _: usize, s: &mut SeriesRecord) -> DecodeResult<()> {
    push_strings(cursor, &mut s.labels)
}

fn on_series_value(cursor: &mut Cursor<'_>, _: usize, s: &mut SeriesRecord) -> DecodeResult<()> {
    s.value = consume_double(cursor)?;
    Ok(())
}

fn on_series_ts(cursor: &mut Cursor<'_>, _: usize, s: &mut SeriesRecord) -> DecodeResult<()> {
    s.timestamp = consume_uint(cursor)?;
    Ok(())
}

const SERIES_HANDLERS: &[MapEntryHandler<SeriesRecord>] = &[
    MapEntryHandler::new("labels", on_series_labels),
    MapEntryHandler::new("value", on_series_value),
    MapEntryHandler::new("ts", on_series_ts),
];

fn on_fqname(cursor: &mut Cursor<'_>, _: usize, s: &mut Snapshot) -> DecodeResult<()> {
    s.fqname = consume_string(cursor)?;
    Ok(())
}

fn on_help(cursor: &mut Cursor<'_>, _: usize, s: &mut Snapshot) -> DecodeResult<()> {
    s.help = consume_string(cursor)?;
    Ok(())
}

fn on_keys(cursor: &mut Cursor<'_>, _: usize, s: &mut Snapshot) -> DecodeResult<()> {
    push_strings(cursor, &mut s.keys)
}

fn on_series(cursor: &mut Cursor<'_>, _: usize, s: &mut Snapshot) -> DecodeResult<()> {
    consume_bounded_array(
        cursor,
        |c, _, s: &mut Snapshot| {
            let mut record = SeriesRecord::default();
            consume_bounded_map(c, SERIES_HANDLERS, &mut record)?;
            s.series.push(record);
            Ok(())
        },
        s,
    )
}

const SNAPSHOT_HANDLERS: &[MapEntryHandler<Snapshot>] = &[
    MapEntryHandler::new("fqname", on_fqname),
    MapEntryHandler::new("help", on_help),
    MapEntryHandler::new("keys", on_keys),
    MapEntryHandler::new("series", on_series),
];

fn encode_snapshot(keys: &[&str], series: &[(Vec<&str>, f64, u64)]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode::write_map_len(&mut buf, 4).unwrap();
    encode::write_str(&mut buf, "fqname").unwrap();
    encode::write_str(&mut buf, "app_requests").unwrap();
    encode::write_str(&mut buf, "help").unwrap();
    encode::write_str(&mut buf, "Requests served").unwrap();
    encode::write_str(&mut buf, "keys").unwrap();
    encode::write_array_len(&mut buf, keys.len() as u32).unwrap();
    for key in keys {
        encode::write_str(&mut buf, key).unwrap();
    }
    encode::write_str(&mut buf, "series").unwrap();
    encode::write_array_len(&mut buf, series.len() as u32).unwrap();
    for (labels, value, ts) in series {
        encode::write_map_len(&mut buf, 3).unwrap();
        encode::write_str(&mut buf, "labels").unwrap();
        encode::write_array_len(&mut buf, labels.len() as u32).unwrap();
        for label in labels.iter() {
            encode::write_str(&mut buf, label).unwrap();
        }
        encode::write_str(&mut buf, "value").unwrap();
        encode::write_f64(&mut buf, *value).unwrap();
        encode::write_str(&mut buf, "ts").unwrap();
        encode::write_uint(&mut buf, *ts).unwrap();
    }
    buf
}

fn decode_snapshot(buf: &[u8]) -> DecodeResult<Snapshot> {
    let mut snapshot = Snapshot::default();
    let mut cursor = Cursor::new(buf);
    consume_bounded_map(&mut cursor, SNAPSHOT_HANDLERS, &mut snapshot)?;
    Ok(snapshot)
}

fn rebuild(snapshot: &Snapshot) -> MapResult<MetricMap> {
    let opts = Opts::with_fqname("", "", &snapshot.fqname, &snapshot.help, &snapshot.fqname)?;
    let mut map = MetricMap::new(MetricType::Counter, opts, &snapshot.keys)?;
    for record in &snapshot.series {
        map.set(record.timestamp, record.value, &record.labels)?;
    }
    Ok(map)
}

#[test]
fn snapshot_round_trips_into_store() {
    let buf = encode_snapshot(
        &["host", "pid"],
        &[
            (vec!["a", "1"], 3.0, 10),
            (vec!["a", "2"], 4.0, 11),
            (vec!["b", "1"], 5.0, 12),
        ],
    );

    let snapshot = decode_snapshot(&buf).unwrap();
    let map = rebuild(&snapshot).unwrap();

    assert_eq!(map.label_keys().iter().collect::<Vec<_>>(), vec!["host", "pid"]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get_value(&["a", "2"]).unwrap(), 4.0);
    assert_eq!(map.metrics()[2].labels(), &["b".to_string(), "1".to_string()]);
    assert_eq!(map.metrics()[2].timestamp(), 12);
}

#[test]
fn repeated_series_collapse_to_one_slot() {
    let buf = encode_snapshot(
        &["host", "pid"],
        &[(vec!["a", "1"], 3.0, 10), (vec!["a", "1"], 8.0, 20)],
    );

    let snapshot = decode_snapshot(&buf).unwrap();
    let map = rebuild(&snapshot).unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get_value(&["a", "1"]).unwrap(), 8.0);
}

#[test]
fn series_with_wrong_arity_rejected_by_store() {
    let buf = encode_snapshot(&["host", "pid"], &[(vec!["a"], 1.0, 1)]);

    let snapshot = decode_snapshot(&buf).unwrap();
    let err = rebuild(&snapshot).unwrap_err();
    assert!(matches!(err, MapError::InvalidArgument(_)));
}

#[test]
fn series_map_over_limit_stops_decode() {
    let mut buf = Vec::new();
    encode::write_map_len(&mut buf, 1).unwrap();
    encode::write_str(&mut buf, "series").unwrap();
    encode::write_array_len(&mut buf, 1).unwrap();
    encode::write_map_len(&mut buf, 64).unwrap();

    let err = decode_snapshot(&buf).unwrap_err();
    assert_eq!(err, DecodeError::PendingMapEntries { declared: 64, limit: 10 });
}

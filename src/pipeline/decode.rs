//! NDJSON stream decoding (Bytes -> JSON records -> typed events).
//!
//! Transport chunks may carry zero, one, or many newline-delimited records,
//! and a record may span chunk boundaries; partial records are buffered until
//! complete. The produced sequence is lazy, finite, and non-restartable.

use bytes::Bytes;
use futures::{stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::BoxStream;

/// Terminal predicate for chat/generate streams: the record's `done` flag.
pub fn done_flag(record: &Value) -> bool {
    record.get("done").and_then(Value::as_bool).unwrap_or(false)
}

/// Terminal predicate for pull streams: the registry reports `success`
/// (older servers also set a `done` flag).
pub fn pull_complete(record: &Value) -> bool {
    record
        .get("status")
        .and_then(Value::as_str)
        .map(|s| s == "success")
        .unwrap_or(false)
        || done_flag(record)
}

enum DecodeState {
    Active {
        input: BoxStream<'static, Bytes>,
        buf: String,
    },
    Finished,
}

enum Parsed {
    Event(Value),
    Terminal(Value),
    Failed(Error),
}

fn parse_record(line: &str, terminal: fn(&Value) -> bool) -> Parsed {
    let record: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            return Parsed::Failed(Error::streaming(format!(
                "failed to parse stream record: {}",
                e
            )))
        }
    };
    if let Some(message) = record.get("error").and_then(Value::as_str) {
        return Parsed::Failed(Error::from_stream_payload(message));
    }
    if terminal(&record) {
        Parsed::Terminal(record)
    } else {
        Parsed::Event(record)
    }
}

/// Decode an incrementally-arriving byte source into JSON records.
///
/// Policy:
/// - a record that fails to parse yields one terminal decode error;
/// - a record carrying an application-level `error` payload yields one
///   terminal typed error;
/// - the record matching `terminal` is yielded as the final event and the
///   sequence ends immediately, discarding any trailing bytes.
pub fn decode_ndjson(
    input: BoxStream<'static, Bytes>,
    terminal: fn(&Value) -> bool,
) -> BoxStream<'static, Value> {
    let stream = stream::unfold(
        DecodeState::Active {
            input,
            buf: String::new(),
        },
        move |state| async move {
            let (mut input, mut buf) = match state {
                DecodeState::Active { input, buf } => (input, buf),
                DecodeState::Finished => return None,
            };

            loop {
                // Emit every complete record already buffered.
                if let Some(idx) = buf.find('\n') {
                    let line = buf[..idx].trim().to_string();
                    buf = buf[idx + 1..].to_string();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(match parse_record(&line, terminal) {
                        Parsed::Event(v) => (Ok(v), DecodeState::Active { input, buf }),
                        Parsed::Terminal(v) => (Ok(v), DecodeState::Finished),
                        Parsed::Failed(e) => (Err(e), DecodeState::Finished),
                    });
                }

                // Need more data.
                match input.next().await {
                    Some(Ok(bytes)) => {
                        buf.push_str(&String::from_utf8_lossy(&bytes));
                    }
                    Some(Err(e)) => return Some((Err(e), DecodeState::Finished)),
                    None => {
                        // EOF: a leftover partial record is a truncated stream.
                        let line = buf.trim().to_string();
                        if line.is_empty() {
                            return None;
                        }
                        return Some(match parse_record(&line, terminal) {
                            Parsed::Event(v) | Parsed::Terminal(v) => {
                                (Ok(v), DecodeState::Finished)
                            }
                            Parsed::Failed(e) => (Err(e), DecodeState::Finished),
                        });
                    }
                }
            }
        },
    );
    Box::pin(stream)
}

/// Map decoded JSON records into a typed event stream.
///
/// A record that does not fit `T` terminates the sequence with a decode
/// error, mirroring the raw-decode policy.
pub fn into_typed<T>(input: BoxStream<'static, Value>) -> BoxStream<'static, T>
where
    T: DeserializeOwned + Send + 'static,
{
    let stream = stream::unfold(Some(input), |state| async move {
        let mut input = state?;
        match input.next().await {
            Some(Ok(record)) => match serde_json::from_value::<T>(record) {
                Ok(event) => Some((Ok(event), Some(input))),
                Err(e) => Some((
                    Err(Error::streaming(format!(
                        "stream record has unexpected shape: {}",
                        e
                    ))),
                    None,
                )),
            },
            Some(Err(e)) => Some((Err(e), None)),
            None => None,
        }
    });
    Box::pin(stream)
}

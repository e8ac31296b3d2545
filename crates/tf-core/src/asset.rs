//! Binary state asset: four tagged chunks (`line`, `tran`, `cond`, `strn`).
//!
//! Every chunk is a 4-byte ASCII tag, a little-endian `u32` element count (byte
//! count for `strn`) and the fixed-width records back to back. Offsets are
//! stored as `u64` regardless of host pointer width.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::arena::{Span, StringArena};
use crate::error::TimeforkError;
use crate::types::{Condition, ConditionRange, Line, State, Transition};

pub const LINE_TAG: [u8; 4] = *b"line";
pub const TRANSITION_TAG: [u8; 4] = *b"tran";
pub const CONDITION_TAG: [u8; 4] = *b"cond";
pub const STRING_TAG: [u8; 4] = *b"strn";

pub const LINE_RECORD_SIZE: usize = 40;
pub const TRANSITION_RECORD_SIZE: usize = 48;
pub const CONDITION_RECORD_SIZE: usize = 24;

const FLAG_PADDING: [u8; 7] = [0; 7];

pub fn encode_state_asset(state: &State) -> Result<Vec<u8>, TimeforkError> {
    let mut bytes = Vec::with_capacity(
        16 + state.lines.len() * LINE_RECORD_SIZE
            + state.transitions.len() * TRANSITION_RECORD_SIZE
            + state.conditions.len() * CONDITION_RECORD_SIZE
            + state.arena.len(),
    );
    write_state_asset(state, &mut bytes)?;
    Ok(bytes)
}

pub fn write_state_asset<W: Write>(state: &State, writer: &mut W) -> Result<(), TimeforkError> {
    write_chunk(writer, LINE_TAG, &state.lines, write_line)?;
    write_chunk(writer, TRANSITION_TAG, &state.transitions, write_transition)?;
    write_chunk(writer, CONDITION_TAG, &state.conditions, write_condition)?;

    let strings = state.arena.as_bytes();
    writer.write_all(&STRING_TAG).map_err(map_asset_write)?;
    writer
        .write_u32::<LittleEndian>(chunk_len(STRING_TAG, strings.len())?)
        .map_err(map_asset_write)?;
    writer.write_all(strings).map_err(map_asset_write)
}

pub fn decode_state_asset(name: &str, bytes: &[u8]) -> Result<State, TimeforkError> {
    let mut cursor = io::Cursor::new(bytes);
    read_state_asset(name, &mut cursor)
}

pub fn read_state_asset<R: Read>(name: &str, reader: &mut R) -> Result<State, TimeforkError> {
    let lines = read_chunk(reader, LINE_TAG, read_line)?;
    let transitions = read_chunk(reader, TRANSITION_TAG, read_transition)?;
    let conditions = read_chunk(reader, CONDITION_TAG, read_condition)?;

    let byte_len = read_chunk_header(reader, STRING_TAG)?;
    let mut strings = Vec::new();
    reader
        .by_ref()
        .take(byte_len as u64)
        .read_to_end(&mut strings)
        .map_err(|error| map_asset_read(STRING_TAG, error))?;
    if strings.len() != byte_len {
        return Err(truncated(STRING_TAG));
    }

    let state = State {
        name: name.to_string(),
        lines,
        transitions,
        conditions,
        arena: StringArena::from_bytes(strings),
    };
    state.validate()?;
    Ok(state)
}

fn write_chunk<W: Write, T>(
    writer: &mut W,
    tag: [u8; 4],
    items: &[T],
    write_item: fn(&mut W, &T) -> io::Result<()>,
) -> Result<(), TimeforkError> {
    writer.write_all(&tag).map_err(map_asset_write)?;
    writer
        .write_u32::<LittleEndian>(chunk_len(tag, items.len())?)
        .map_err(map_asset_write)?;
    for item in items {
        write_item(writer, item).map_err(map_asset_write)?;
    }
    Ok(())
}

fn read_chunk<R: Read, T>(
    reader: &mut R,
    tag: [u8; 4],
    read_item: fn(&mut R) -> Result<T, ReadError>,
) -> Result<Vec<T>, TimeforkError> {
    let count = read_chunk_header(reader, tag)?;
    let mut items = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        let item = read_item(reader).map_err(|error| match error {
            ReadError::Io(error) => map_asset_read(tag, error),
            ReadError::Invalid(message) => TimeforkError::new(
                "ASSET_RECORD_INVALID",
                format!("Chunk \"{}\": {}", tag_text(tag), message),
            ),
        })?;
        items.push(item);
    }
    Ok(items)
}

fn read_chunk_header<R: Read>(reader: &mut R, tag: [u8; 4]) -> Result<usize, TimeforkError> {
    let mut found = [0u8; 4];
    reader
        .read_exact(&mut found)
        .map_err(|error| map_asset_read(tag, error))?;
    if found != tag {
        return Err(TimeforkError::new(
            "ASSET_CHUNK_TAG",
            format!(
                "Expected chunk \"{}\", found \"{}\".",
                tag_text(tag),
                tag_text(found)
            ),
        ));
    }
    let count = reader
        .read_u32::<LittleEndian>()
        .map_err(|error| map_asset_read(tag, error))?;
    usize::try_from(count).map_err(|_| {
        TimeforkError::new(
            "ASSET_RECORD_INVALID",
            format!("Chunk \"{}\" count {} does not fit in memory.", tag_text(tag), count),
        )
    })
}

enum ReadError {
    Io(io::Error),
    Invalid(String),
}

impl From<io::Error> for ReadError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

fn write_line<W: Write>(writer: &mut W, line: &Line) -> io::Result<()> {
    write_offset(writer, line.text.start)?;
    write_offset(writer, line.text.end)?;
    write_offset(writer, line.speaker.start)?;
    write_offset(writer, line.speaker.end)?;
    write_flag(writer, line.spoken)
}

fn read_line<R: Read>(reader: &mut R) -> Result<Line, ReadError> {
    let text = Span::new(read_offset(reader)?, read_offset(reader)?);
    let speaker = Span::new(read_offset(reader)?, read_offset(reader)?);
    let spoken = read_flag(reader)?;
    Ok(Line {
        text,
        spoken,
        speaker,
    })
}

fn write_transition<W: Write>(writer: &mut W, transition: &Transition) -> io::Result<()> {
    write_offset(writer, transition.trigger.start)?;
    write_offset(writer, transition.trigger.end)?;
    write_offset(writer, transition.preconditions.start)?;
    write_offset(writer, transition.preconditions.end)?;
    write_offset(writer, transition.postconditions.start)?;
    write_offset(writer, transition.postconditions.end)
}

fn read_transition<R: Read>(reader: &mut R) -> Result<Transition, ReadError> {
    Ok(Transition {
        trigger: Span::new(read_offset(reader)?, read_offset(reader)?),
        preconditions: ConditionRange::new(read_offset(reader)?, read_offset(reader)?),
        postconditions: ConditionRange::new(read_offset(reader)?, read_offset(reader)?),
    })
}

fn write_condition<W: Write>(writer: &mut W, condition: &Condition) -> io::Result<()> {
    write_offset(writer, condition.name.start)?;
    write_offset(writer, condition.name.end)?;
    write_flag(writer, condition.negated)
}

fn read_condition<R: Read>(reader: &mut R) -> Result<Condition, ReadError> {
    let name = Span::new(read_offset(reader)?, read_offset(reader)?);
    let negated = read_flag(reader)?;
    Ok(Condition { name, negated })
}

fn write_offset<W: Write>(writer: &mut W, value: usize) -> io::Result<()> {
    writer.write_u64::<LittleEndian>(value as u64)
}

fn read_offset<R: Read>(reader: &mut R) -> Result<usize, ReadError> {
    let value = reader.read_u64::<LittleEndian>()?;
    usize::try_from(value)
        .map_err(|_| ReadError::Invalid(format!("offset {} does not fit in usize", value)))
}

fn write_flag<W: Write>(writer: &mut W, flag: bool) -> io::Result<()> {
    writer.write_u8(u8::from(flag))?;
    writer.write_all(&FLAG_PADDING)
}

fn read_flag<R: Read>(reader: &mut R) -> Result<bool, ReadError> {
    let flag = reader.read_u8()?;
    let mut padding = [0u8; 7];
    reader.read_exact(&mut padding)?;
    match flag {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ReadError::Invalid(format!("flag byte {} is not 0 or 1", other))),
    }
}

fn chunk_len(tag: [u8; 4], len: usize) -> Result<u32, TimeforkError> {
    u32::try_from(len).map_err(|_| {
        TimeforkError::new(
            "ASSET_TOO_LARGE",
            format!("Chunk \"{}\" holds {} elements.", tag_text(tag), len),
        )
    })
}

fn tag_text(tag: [u8; 4]) -> String {
    String::from_utf8_lossy(&tag).into_owned()
}

fn truncated(tag: [u8; 4]) -> TimeforkError {
    TimeforkError::new(
        "ASSET_TRUNCATED",
        format!("Chunk \"{}\" ended early.", tag_text(tag)),
    )
}

fn map_asset_read(tag: [u8; 4], error: io::Error) -> TimeforkError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        return truncated(tag);
    }
    TimeforkError::new("ASSET_READ", error.to_string())
}

fn map_asset_write(error: io::Error) -> TimeforkError {
    TimeforkError::new("ASSET_WRITE", error.to_string())
}

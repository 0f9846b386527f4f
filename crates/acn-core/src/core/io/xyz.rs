use crate::core::io::traits::{FrameRecord, SnapshotFile};
use crate::core::models::snapshot::{Snapshot, SnapshotError};
use nalgebra::{Matrix3, Point3};
use phf::{Map, phf_map};
use std::io::{self, BufRead, Write};
use thiserror::Error;

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1,
    "C" => 6,
    "N" => 7,
    "O" => 8,
    // United-atom methyl, labelled as carbon.
    "Me" => 6,
    "CH3" => 6,
};

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Inconsistent frame ending on line {line}: {source}")]
    Snapshot {
        line: usize,
        #[source]
        source: SnapshotError,
    },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidAtomCount(String),
    #[error("Missing comment line")]
    MissingCommentLine,
    #[error("File ended after {found} of {expected} atom lines")]
    UnexpectedEof { expected: usize, found: usize },
    #[error("Unknown element symbol '{0}'")]
    UnknownSymbol(String),
    #[error("Invalid float '{0}'")]
    InvalidFloat(String),
    #[error("Atom line needs a symbol and three coordinates")]
    TooFewColumns,
    #[error("Lattice must hold nine numbers, got '{0}'")]
    InvalidLattice(String),
    #[error("pbc must hold three of T/F, got '{0}'")]
    InvalidPbc(String),
}

/// Extended XYZ frames.
///
/// The comment line may carry `Lattice="ax ay az bx by bz cx cy cz"` (rows are cell vectors)
/// and `pbc="T T T"`; a lattice without `pbc` is taken as periodic along every axis. Atom lines
/// are `symbol x y z [charge ...]`; a fifth column is read as the partial charge.
pub struct XyzFile;

impl SnapshotFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Snapshot>, Self::Error> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|content| (i + 1, content)));
        let mut frames = Vec::new();

        while let Some(next) = lines.next() {
            let (count_line, content) = next?;
            let count_str = content.trim();
            if count_str.is_empty() {
                continue;
            }
            let count: usize = count_str.parse().map_err(|_| XyzError::Parse {
                line: count_line,
                kind: XyzParseErrorKind::InvalidAtomCount(count_str.to_string()),
            })?;

            let (comment_line, comment) = lines.next().transpose()?.ok_or(XyzError::Parse {
                line: count_line + 1,
                kind: XyzParseErrorKind::MissingCommentLine,
            })?;
            let header = parse_comment(&comment, comment_line)?;

            let mut positions = Vec::with_capacity(count);
            let mut numbers = Vec::with_capacity(count);
            let mut charges = Vec::with_capacity(count);
            let mut last_line = comment_line;
            for found in 0..count {
                let (line_num, content) =
                    lines.next().transpose()?.ok_or(XyzError::Parse {
                        line: last_line + 1,
                        kind: XyzParseErrorKind::UnexpectedEof {
                            expected: count,
                            found,
                        },
                    })?;
                let (number, position, charge) = parse_atom_line(&content, line_num)?;
                numbers.push(number);
                positions.push(position);
                charges.push(charge);
                last_line = line_num;
            }

            let snapshot = Snapshot::new(positions, numbers)
                .and_then(|s| s.with_charges(charges))
                .map_err(|source| XyzError::Snapshot {
                    line: last_line,
                    source,
                })?;
            let snapshot = match header.cell {
                Some(cell) => snapshot
                    .with_cell(cell)
                    .with_pbc(header.pbc.unwrap_or([true; 3])),
                None => snapshot.with_pbc(header.pbc.unwrap_or([false; 3])),
            };
            frames.push(snapshot);
        }

        Ok(frames)
    }

    fn write_frame(record: &FrameRecord<'_>, writer: &mut impl Write) -> Result<(), Self::Error> {
        let snapshot = record.snapshot;
        writeln!(writer, "{}", snapshot.len())?;

        let cell = snapshot.cell();
        let lattice: Vec<String> = (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .map(|(row, col)| format!("{:.8}", cell[(row, col)]))
            .collect();
        let pbc: Vec<&str> = snapshot
            .pbc()
            .iter()
            .map(|&p| if p { "T" } else { "F" })
            .collect();
        write!(
            writer,
            "Lattice=\"{}\" pbc=\"{}\"",
            lattice.join(" "),
            pbc.join(" ")
        )?;
        if let Some(energy) = record.energy {
            write!(writer, " energy={energy:.10}")?;
        }
        write!(
            writer,
            " Properties=species:S:1:pos:R:3:initial_charges:R:1"
        )?;
        if record.forces.is_some() {
            write!(writer, ":forces:R:3")?;
        }
        writeln!(writer)?;

        for (i, (position, &number)) in snapshot
            .positions()
            .iter()
            .zip(snapshot.numbers())
            .enumerate()
        {
            write!(
                writer,
                "{:<3} {:>16.8} {:>16.8} {:>16.8} {:>12.6}",
                symbol_for(number),
                position.x,
                position.y,
                position.z,
                snapshot.charges()[i]
            )?;
            if let Some(force) = record.forces.and_then(|forces| forces.get(i)) {
                write!(
                    writer,
                    " {:>16.8} {:>16.8} {:>16.8}",
                    force.x, force.y, force.z
                )?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CommentHeader {
    cell: Option<Matrix3<f64>>,
    pbc: Option<[bool; 3]>,
}

fn parse_comment(comment: &str, line: usize) -> Result<CommentHeader, XyzError> {
    let mut header = CommentHeader::default();
    for (key, value) in key_value_pairs(comment) {
        match key.to_ascii_lowercase().as_str() {
            "lattice" => {
                let values: Vec<f64> = value
                    .split_whitespace()
                    .map(str::parse::<f64>)
                    .collect::<Result<_, _>>()
                    .map_err(|_| lattice_error(line, &value))?;
                if values.len() != 9 {
                    return Err(lattice_error(line, &value));
                }
                header.cell = Some(Matrix3::from_row_slice(&values));
            }
            "pbc" => {
                let flags: Vec<bool> = value
                    .split_whitespace()
                    .map(|flag| match flag {
                        "T" | "t" | "True" | "true" | "1" => Some(true),
                        "F" | "f" | "False" | "false" | "0" => Some(false),
                        _ => None,
                    })
                    .collect::<Option<_>>()
                    .ok_or_else(|| pbc_error(line, &value))?;
                let flags: [bool; 3] = flags.try_into().map_err(|_| pbc_error(line, &value))?;
                header.pbc = Some(flags);
            }
            _ => {}
        }
    }
    Ok(header)
}

fn lattice_error(line: usize, value: &str) -> XyzError {
    XyzError::Parse {
        line,
        kind: XyzParseErrorKind::InvalidLattice(value.to_string()),
    }
}

fn pbc_error(line: usize, value: &str) -> XyzError {
    XyzError::Parse {
        line,
        kind: XyzParseErrorKind::InvalidPbc(value.to_string()),
    }
}

/// Splits `key=value key2="quoted value"` into pairs; bare words are skipped.
fn key_value_pairs(comment: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = comment.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            key.push(c);
        }
        if chars.next_if_eq(&'=').is_none() {
            continue;
        }

        let mut value = String::new();
        if chars.next_if_eq(&'"').is_some() {
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }
        pairs.push((key, value));
    }
    pairs
}

fn parse_atom_line(content: &str, line: usize) -> Result<(u8, Point3<f64>, f64), XyzError> {
    let columns: Vec<&str> = content.split_whitespace().collect();
    if columns.len() < 4 {
        return Err(XyzError::Parse {
            line,
            kind: XyzParseErrorKind::TooFewColumns,
        });
    }

    let number = atomic_number(columns[0]).ok_or_else(|| XyzError::Parse {
        line,
        kind: XyzParseErrorKind::UnknownSymbol(columns[0].to_string()),
    })?;
    let float = |s: &str| -> Result<f64, XyzError> {
        s.parse().map_err(|_| XyzError::Parse {
            line,
            kind: XyzParseErrorKind::InvalidFloat(s.to_string()),
        })
    };
    let position = Point3::new(float(columns[1])?, float(columns[2])?, float(columns[3])?);
    let charge = columns.get(4).map(|s| float(s)).transpose()?.unwrap_or(0.0);
    Ok((number, position, charge))
}

fn atomic_number(symbol: &str) -> Option<u8> {
    ATOMIC_NUMBERS
        .get(symbol)
        .copied()
        .or_else(|| symbol.parse().ok())
}

fn symbol_for(number: u8) -> String {
    ATOMIC_NUMBERS
        .entries()
        .find(|(symbol, z)| **z == number && symbol.len() <= 2 && **symbol != "Me")
        .map(|(symbol, _)| symbol.to_string())
        .unwrap_or_else(|| number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use std::io::{BufReader, Cursor};

    const TWO_FRAMES: &str = "\
3
Lattice=\"20.0 0.0 0.0 0.0 21.0 0.0 0.0 0.0 22.0\" pbc=\"T T F\" Properties=species:S:1:pos:R:3
N 0.0 0.0 0.0 -0.453
C 1.157 0.0 0.0 0.247
Me 2.615 0.0 0.0 0.206

3
plain comment
C 0.0 1.0 0.0
C 1.458 1.0 0.0
N 2.615 1.0 0.0
";

    fn read(content: &str) -> Result<Vec<Snapshot>, XyzError> {
        XyzFile::read_from(&mut BufReader::new(Cursor::new(content)))
    }

    #[test]
    fn read_parses_multiple_frames() {
        let frames = read(TWO_FRAMES).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].numbers(), &[7, 6, 6]);
        assert_eq!(frames[1].numbers(), &[6, 6, 7]);
        assert_eq!(frames[1].positions()[2], Point3::new(2.615, 1.0, 0.0));
    }

    #[test]
    fn read_parses_lattice_pbc_and_charges() {
        let frames = read(TWO_FRAMES).unwrap();
        let first = &frames[0];
        assert_eq!(first.pbc(), [true, true, false]);
        assert_eq!(
            first.orthorhombic_lengths().unwrap(),
            Vector3::new(20.0, 21.0, 22.0)
        );
        assert_eq!(first.charges(), &[-0.453, 0.247, 0.206]);
    }

    #[test]
    fn read_defaults_to_open_boundaries_and_zero_charges() {
        let frames = read(TWO_FRAMES).unwrap();
        assert_eq!(frames[1].pbc(), [false; 3]);
        assert_eq!(frames[1].charges(), &[0.0; 3]);
    }

    #[test]
    fn lattice_without_pbc_is_fully_periodic() {
        let content = "1\nLattice=\"5 0 0 0 5 0 0 0 5\"\nN 0 0 0\n";
        let frames = read(content).unwrap();
        assert_eq!(frames[0].pbc(), [true; 3]);
    }

    #[test]
    fn read_rejects_truncated_frames() {
        let content = "3\ncomment\nN 0 0 0\nC 1 0 0\n";
        assert!(matches!(
            read(content),
            Err(XyzError::Parse {
                line: 5,
                kind: XyzParseErrorKind::UnexpectedEof {
                    expected: 3,
                    found: 2
                }
            })
        ));
    }

    #[test]
    fn read_rejects_unknown_symbols() {
        let content = "1\n\nXx 0 0 0\n";
        assert!(matches!(
            read(content),
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::UnknownSymbol(_)
            })
        ));
    }

    #[test]
    fn read_rejects_bad_coordinates() {
        let content = "1\n\nN 0 zero 0\n";
        assert!(matches!(
            read(content),
            Err(XyzError::Parse {
                kind: XyzParseErrorKind::InvalidFloat(_),
                ..
            })
        ));
    }

    #[test]
    fn read_rejects_short_lattice() {
        let content = "1\nLattice=\"5 0 0\"\nN 0 0 0\n";
        assert!(matches!(
            read(content),
            Err(XyzError::Parse {
                line: 2,
                kind: XyzParseErrorKind::InvalidLattice(_)
            })
        ));
    }

    #[test]
    fn read_accepts_atomic_numbers_as_symbols() {
        let frames = read("1\n\n7 0 0 0\n").unwrap();
        assert_eq!(frames[0].numbers(), &[7]);
    }

    #[test]
    fn key_value_pairs_handles_quotes_and_bare_words() {
        let pairs = key_value_pairs("note a=1 b=\"x y z\"  c=T");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x y z".to_string()),
                ("c".to_string(), "T".to_string()),
            ]
        );
    }

    #[test]
    fn written_frame_can_be_read_back_with_forces_ignored() {
        let frames = read(TWO_FRAMES).unwrap();
        let forces = vec![Vector3::new(0.1, -0.2, 0.3); 3];
        let record = FrameRecord::new(&frames[0])
            .with_energy(-0.125)
            .with_forces(&forces);

        let mut buffer = Vec::new();
        XyzFile::write_frame(&record, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("energy=-0.1250000000"));
        assert!(text.contains(":forces:R:3"));

        let reread = read(&text).unwrap();
        assert_eq!(reread.len(), 1);
        assert_eq!(reread[0].numbers(), frames[0].numbers());
        assert_eq!(reread[0].pbc(), frames[0].pbc());
        assert_eq!(reread[0].charges(), frames[0].charges());
    }
}

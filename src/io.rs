//! Reading grids from CSV and binary files, writing paths and traces as `row,col` CSV lines.
//!
//! The binary layout is a header of two little-endian `u64` values (rows, cols) followed by
//! `rows * cols` little-endian `f64` cell codes in row-major order.
use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use grid_util::Point;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{PathfindingError, Result};
use crate::grid::{CellLabel, GridModel};
use crate::trace::Trace;

const WORD: usize = std::mem::size_of::<u64>();

/// Parses comma-separated integer cell codes, one grid row per line, without a header.
pub fn read_grid_csv<R: Read>(reader: R) -> Result<GridModel> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut rows: Vec<Vec<i64>> = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    GridModel::from_codes(&rows)
}

pub fn load_grid_csv<P: AsRef<Path>>(path: P) -> Result<GridModel> {
    let file = File::open(path.as_ref())?;
    let grid = read_grid_csv(BufReader::new(file))?;
    info!(
        "Loaded {}x{} grid from {}",
        grid.rows(),
        grid.cols(),
        path.as_ref().display()
    );
    Ok(grid)
}

fn invalid(msg: impl Into<String>) -> PathfindingError {
    PathfindingError::InvalidBinaryGrid(msg.into())
}

fn label_from_float(value: f64) -> Result<CellLabel> {
    if value.is_finite() && value.fract() == 0.0 {
        CellLabel::from_code(value as i64)
            .map_err(|_| PathfindingError::UnknownCellValue(value))
    } else {
        Err(PathfindingError::UnknownCellValue(value))
    }
}

/// Parses a binary grid: `u64` rows, `u64` cols, then one `f64` code per cell.
pub fn read_grid_binary<R: Read>(mut reader: R) -> Result<GridModel> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() < 2 * WORD {
        return Err(invalid("missing rows/cols header"));
    }
    if bytes.len() % WORD != 0 {
        return Err(invalid(format!(
            "payload of {} bytes is not a whole number of 8-byte words",
            bytes.len()
        )));
    }
    let mut words = bytes.chunks_exact(WORD).map(|chunk| {
        let mut word = [0u8; WORD];
        word.copy_from_slice(chunk);
        word
    });
    let mut header = || -> Result<usize> {
        let word = words.next().ok_or_else(|| invalid("missing header word"))?;
        usize::try_from(u64::from_le_bytes(word)).map_err(|_| invalid("dimension too large"))
    };
    let (rows, cols) = (header()?, header()?);
    if rows == 0 || cols == 0 {
        return Err(PathfindingError::EmptyGrid);
    }
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid("rows * cols overflows"))?;
    if words.len() != expected {
        return Err(invalid(format!(
            "header announces {} cells, payload holds {}",
            expected,
            words.len()
        )));
    }
    let labels = words
        .map(|word| label_from_float(f64::from_le_bytes(word)))
        .collect::<Result<Vec<_>>>()?;
    GridModel::from_rows(labels.chunks(cols).map(<[CellLabel]>::to_vec).collect())
}

pub fn load_grid_binary<P: AsRef<Path>>(path: P) -> Result<GridModel> {
    let file = File::open(path.as_ref())?;
    let grid = read_grid_binary(BufReader::new(file))?;
    info!(
        "Loaded {}x{} binary grid from {}",
        grid.rows(),
        grid.cols(),
        path.as_ref().display()
    );
    Ok(grid)
}

/// Writes a grid in the binary layout read by [read_grid_binary].
pub fn write_grid_binary<W: Write>(mut writer: W, grid: &GridModel) -> Result<()> {
    writer.write_all(&(grid.rows() as u64).to_le_bytes())?;
    writer.write_all(&(grid.cols() as u64).to_le_bytes())?;
    for code in grid.to_codes().into_iter().flatten() {
        writer.write_all(&(code as f64).to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Writes the grid codes, one comma-separated row per line.
pub fn write_grid_csv<W: Write>(writer: W, grid: &GridModel) -> Result<()> {
    let mut w = csv_writer(writer);
    for row in grid.to_codes() {
        w.write_record(row.iter().map(i64::to_string))?;
    }
    w.flush()?;
    Ok(())
}

fn row_col(point: &Point) -> [String; 2] {
    [point.y.to_string(), point.x.to_string()]
}

/// Writes one `row,col` line per point, in traversal order.
pub fn write_path<W: Write>(writer: W, path: &[Point]) -> Result<()> {
    let mut w = csv_writer(writer);
    for p in path {
        w.write_record(row_col(p))?;
    }
    w.flush()?;
    Ok(())
}

/// Writes one line per snapshot: the popped `row,col` followed by the `row,col` of every
/// remaining frontier entry in snapshot order.
pub fn write_trace<W: Write>(writer: W, trace: &Trace) -> Result<()> {
    let mut w = csv_writer(writer);
    for snapshot in trace {
        let fields = std::iter::once(snapshot.popped)
            .chain(snapshot.frontier_points())
            .flat_map(|p| row_col(&p));
        w.write_record(fields)?;
    }
    w.flush()?;
    Ok(())
}

pub fn save_path<P: AsRef<Path>>(filename: P, path: &[Point]) -> Result<()> {
    let f = File::create(filename.as_ref())?;
    write_path(BufWriter::new(f), path)?;
    info!(
        "Saved path of {} points to {}",
        path.len(),
        filename.as_ref().display()
    );
    Ok(())
}

pub fn save_trace<P: AsRef<Path>>(filename: P, trace: &Trace) -> Result<()> {
    let f = File::create(filename.as_ref())?;
    write_trace(BufWriter::new(f), trace)?;
    info!(
        "Saved {} trace records to {}",
        trace.len(),
        filename.as_ref().display()
    );
    Ok(())
}

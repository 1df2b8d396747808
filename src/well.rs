//! Borehole model: identity metadata plus an ordered set of stratigraphic intervals
//!
//! Intervals are kept sorted ascending by top depth after every mutation and
//! exact duplicate records collapse to one. Overlapping or inverted intervals
//! are accepted as given; `Well::overlaps` reports overlaps for callers that
//! want to check.

use crate::types::{Interval, IntervalId, Overlap, WellInfo};
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by interval mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WellError {
    #[error("must specify a layer number or lithology")]
    MissingSelector,

    #[error("layer {layer} out of range: well has {len} intervals")]
    LayerOutOfRange { layer: usize, len: usize },

    #[error("no interval with id {0}")]
    UnknownInterval(IntervalId),
}

/// A borehole log.
#[derive(Debug, Clone, Default)]
pub struct Well {
    pub info: WellInfo,
    intervals: Vec<Interval>,
    next_id: u64,
}

impl Well {
    /// Create a well with no intervals.
    pub fn new(info: WellInfo) -> Self {
        Self {
            info,
            intervals: Vec::new(),
            next_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Intervals in ascending order of top depth.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Add an interval and return its id.
    ///
    /// If an identical record (lithology, top, bottom, description) is already
    /// stored, nothing is added and the existing id is returned. Depth order is
    /// not checked: a base above its top is stored as given.
    pub fn add_interval(
        &mut self,
        top: f64,
        bottom: f64,
        lithology: impl Into<String>,
        description: impl Into<String>,
    ) -> IntervalId {
        let candidate = Interval {
            id: IntervalId(self.next_id),
            lithology: lithology.into(),
            top,
            bottom,
            description: description.into(),
        };

        if let Some(existing) = self.intervals.iter().find(|i| i.same_record(&candidate)) {
            debug!(
                well = %self.info.name,
                lithology = %candidate.lithology,
                top,
                bottom,
                "Duplicate interval ignored"
            );
            return existing.id;
        }

        if bottom < top {
            warn!(
                well = %self.info.name,
                lithology = %candidate.lithology,
                top,
                bottom,
                "Interval base is above its top"
            );
        }

        let id = candidate.id;
        self.next_id += 1;
        self.intervals.push(candidate);
        self.intervals.sort_by(|a, b| a.top.total_cmp(&b.top));
        debug!(well = %self.info.name, id = id.get(), count = self.intervals.len(), "Interval added");
        id
    }

    /// Remove intervals by ordinal position, by lithology, or both.
    ///
    /// `layer` is the position in the current sorted order. When both selectors
    /// are given the positional removal happens first, then every remaining
    /// interval of `lithology` is removed. Returns the number of intervals removed.
    pub fn remove_interval(
        &mut self,
        layer: Option<usize>,
        lithology: Option<&str>,
    ) -> Result<usize, WellError> {
        if layer.is_none() && lithology.is_none() {
            return Err(WellError::MissingSelector);
        }

        let mut removed = 0;

        if let Some(layer) = layer {
            if layer >= self.intervals.len() {
                return Err(WellError::LayerOutOfRange {
                    layer,
                    len: self.intervals.len(),
                });
            }
            self.intervals.remove(layer);
            removed += 1;
        }

        if let Some(lithology) = lithology {
            let before = self.intervals.len();
            self.intervals.retain(|i| i.lithology != lithology);
            removed += before - self.intervals.len();
        }

        debug!(well = %self.info.name, removed, remaining = self.intervals.len(), "Intervals removed");
        Ok(removed)
    }

    /// Remove the interval with the given id, returning it.
    pub fn remove_interval_by_id(&mut self, id: IntervalId) -> Result<Interval, WellError> {
        let pos = self
            .intervals
            .iter()
            .position(|i| i.id == id)
            .ok_or(WellError::UnknownInterval(id))?;
        Ok(self.intervals.remove(pos))
    }

    pub fn interval(&self, id: IntervalId) -> Option<&Interval> {
        self.intervals.iter().find(|i| i.id == id)
    }

    /// The interval containing `depth`, if any.
    pub fn interval_at_depth(&self, depth: f64) -> Option<&Interval> {
        self.intervals.iter().find(|i| i.contains_depth(depth))
    }

    /// `(top of first interval, bottom of last interval)`.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => Some((first.top, last.bottom)),
            _ => None,
        }
    }

    /// Neighbouring interval pairs whose depth ranges overlap.
    pub fn overlaps(&self) -> Vec<Overlap> {
        let overlaps: Vec<Overlap> = self
            .intervals
            .windows(2)
            .filter(|w| w[1].top < w[0].bottom)
            .map(|w| Overlap {
                upper: w[0].id,
                lower: w[1].id,
            })
            .collect();
        if !overlaps.is_empty() {
            warn!(well = %self.info.name, count = overlaps.len(), "Overlapping intervals");
        }
        overlaps
    }

    /// Print metadata and the interval table to stdout.
    pub fn summary(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_summary(&mut handle)
    }

    /// Write metadata and the interval table to `out`.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.info;
        writeln!(f, "Well Name:  {}", info.name)?;
        writeln!(f, "Date Drilled:  {}", info.date)?;
        writeln!(f, "Project:  {}", info.project)?;
        writeln!(f, "Logged By:  {}", info.logged_by)?;
        writeln!(f, "Elevation:  {:?}", info.elevation)?;
        writeln!(f, "X and Y Coordinates:  {:?} {:?}", info.xcoord, info.ycoord)?;

        if self.intervals.is_empty() {
            return writeln!(f, "No intervals");
        }

        let rows: Vec<[String; 5]> = self
            .intervals
            .iter()
            .enumerate()
            .map(|(n, i)| {
                [
                    n.to_string(),
                    i.lithology.clone(),
                    format!("{:?}", i.top),
                    format!("{:?}", i.bottom),
                    i.description.clone(),
                ]
            })
            .collect();

        let header = ["", "Lithology", "Top", "Bottom", "Description"];
        let mut widths = header.map(str::len);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        writeln!(
            f,
            "{:>w0$}  {:>w1$}  {:>w2$}  {:>w3$}  {}",
            header[0],
            header[1],
            header[2],
            header[3],
            header[4],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        )?;
        for row in &rows {
            writeln!(
                f,
                "{:>w0$}  {:>w1$}  {:>w2$}  {:>w3$}  {}",
                row[0],
                row[1],
                row[2],
                row[3],
                row[4],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
                w3 = widths[3],
            )?;
        }
        Ok(())
    }
}

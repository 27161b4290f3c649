// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! NumericRange: multidimensional sub-range selectors.
//!
//! Textual form: comma-separated dimensions, each `min:max` or a single
//! index `idx` (meaning `min == max`), e.g. `"1:2,0:3,5"`.
//!
//! Applied to an array with a row-major shape, a range yields the linear
//! offsets of the selected elements in storage order.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Inclusive index interval in one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericRangeDimension {
    pub min: u32,
    pub max: u32,
}

impl NumericRangeDimension {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidRange(format!("min {} > max {}", min, max)));
        }
        Ok(Self { min, max })
    }

    /// Single index.
    pub fn index(idx: u32) -> Self {
        Self { min: idx, max: idx }
    }

    /// Number of selected indices.
    pub fn count(&self) -> usize {
        (self.max - self.min) as usize + 1
    }
}

/// One `(min, max)` pair per dimension.
///
/// # Example
///
/// ```rust
/// use uatypes::{NumericRange, NumericRangeDimension};
///
/// let range: NumericRange = "1:2,0:3,5".parse().unwrap();
/// assert_eq!(range.dimensions()[2], NumericRangeDimension::index(5));
/// assert_eq!(range.to_string(), "1:2,0:3,5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericRange {
    dimensions: Vec<NumericRangeDimension>,
}

impl NumericRange {
    /// Range from explicit dimensions; at least one is required.
    pub fn new(dimensions: Vec<NumericRangeDimension>) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(Error::InvalidRange("no dimensions".into()));
        }
        if let Some(d) = dimensions.iter().find(|d| d.min > d.max) {
            return Err(Error::InvalidRange(format!("min {} > max {}", d.min, d.max)));
        }
        Ok(Self { dimensions })
    }

    /// Flat `min..=max` range.
    pub fn flat(min: u32, max: u32) -> Result<Self> {
        Ok(Self {
            dimensions: vec![NumericRangeDimension::new(min, max)?],
        })
    }

    pub fn dimensions(&self) -> &[NumericRangeDimension] {
        &self.dimensions
    }

    /// Number of selected elements.
    pub fn element_count(&self) -> usize {
        self.dimensions
            .iter()
            .fold(1usize, |acc, d| acc.saturating_mul(d.count()))
    }

    /// Per-dimension extent of the selection.
    pub fn selected_shape(&self) -> Vec<u32> {
        self.dimensions.iter().map(|d| d.max - d.min + 1).collect()
    }

    /// Linear offsets of the selected elements in an array of the given
    /// row-major `shape`, in storage order.
    ///
    /// Fails when the dimension counts differ or an upper bound lies outside
    /// its dimension.
    pub fn select(&self, shape: &[usize]) -> Result<Vec<usize>> {
        if self.dimensions.len() != shape.len() {
            return Err(Error::InvalidRange(format!(
                "range has {} dimension(s), array has {}",
                self.dimensions.len(),
                shape.len()
            )));
        }
        for (i, (d, &extent)) in self.dimensions.iter().zip(shape).enumerate() {
            if d.max as usize >= extent {
                log::debug!(
                    "[range] dimension {} ({}:{}) outside extent {}",
                    i,
                    d.min,
                    d.max,
                    extent
                );
                return Err(Error::InvalidRange(format!(
                    "dimension {} upper bound {} >= {}",
                    i, d.max, extent
                )));
            }
        }

        // Row-major strides
        let mut strides = vec![1usize; shape.len()];
        for i in (0..shape.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }

        let count = self.element_count();
        let mut offsets = Vec::with_capacity(count);
        let mut cursor: Vec<u32> = self.dimensions.iter().map(|d| d.min).collect();
        for _ in 0..count {
            let offset = cursor
                .iter()
                .zip(&strides)
                .map(|(&idx, &stride)| idx as usize * stride)
                .sum::<usize>();
            offsets.push(offset);

            // Advance the innermost dimension first
            for dim in (0..cursor.len()).rev() {
                if cursor[dim] < self.dimensions[dim].max {
                    cursor[dim] += 1;
                    break;
                }
                cursor[dim] = self.dimensions[dim].min;
            }
        }
        Ok(offsets)
    }
}

fn parse_index(token: &str, input: &str) -> Result<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidRange(format!("malformed range {:?}", input)));
    }
    token
        .parse()
        .map_err(|_| Error::InvalidRange(format!("index {} out of bounds in {:?}", token, input)))
}

impl FromStr for NumericRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidRange("empty range".into()));
        }
        let mut dimensions = Vec::new();
        for part in s.split(',') {
            let dim = match part.split_once(':') {
                Some((min, max)) => {
                    NumericRangeDimension::new(parse_index(min, s)?, parse_index(max, s)?)?
                }
                None => NumericRangeDimension::index(parse_index(part, s)?),
            };
            dimensions.push(dim);
        }
        log::trace!("[range] parsed {:?} into {} dimension(s)", s, dimensions.len());
        Ok(Self { dimensions })
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.dimensions.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if d.min == d.max {
                write!(f, "{}", d.min)?;
            } else {
                write!(f, "{}:{}", d.min, d.max)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(r: &NumericRange) -> Vec<(u32, u32)> {
        r.dimensions().iter().map(|d| (d.min, d.max)).collect()
    }

    #[test]
    fn test_parse_examples() {
        let r: NumericRange = "1:2,0:3,5".parse().expect("parse");
        assert_eq!(dims(&r), vec![(1, 2), (0, 3), (5, 5)]);
        let r: NumericRange = "2".parse().expect("parse");
        assert_eq!(dims(&r), vec![(2, 2)]);
        assert_eq!(r.element_count(), 1);
    }

    #[test]
    fn test_parse_failures() {
        for bad in [
            "", "3:1", "a", "1:b", "1,", ",1", "1,,2", "1:", ":2", "1:2:3", " 1", "+1", "-1",
            "4294967296",
        ] {
            assert!(
                matches!(bad.parse::<NumericRange>(), Err(Error::InvalidRange(_))),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["0", "2:4", "1:2,0:3,5", "7,7:9"] {
            let r: NumericRange = text.parse().expect("parse");
            assert_eq!(r.to_string(), text);
        }
    }

    #[test]
    fn test_select_flat() {
        let r: NumericRange = "2:4".parse().expect("parse");
        assert_eq!(r.select(&[10]).expect("select"), vec![2, 3, 4]);
        assert!(r.select(&[4]).is_err());
        assert!(r.select(&[5]).is_ok());
    }

    #[test]
    fn test_select_row_major() {
        // 3 x 4 matrix, rows 1..=2, columns 1..=2
        let r: NumericRange = "1:2,1:2".parse().expect("parse");
        assert_eq!(r.select(&[3, 4]).expect("select"), vec![5, 6, 9, 10]);
        assert_eq!(r.selected_shape(), vec![2, 2]);
    }

    #[test]
    fn test_select_dimension_mismatch() {
        let r: NumericRange = "0,0".parse().expect("parse");
        assert!(matches!(r.select(&[4]), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_new_validates() {
        assert!(NumericRange::new(Vec::new()).is_err());
        assert!(NumericRange::flat(3, 1).is_err());
        assert_eq!(NumericRange::flat(0, 9).expect("flat").element_count(), 10);
    }
}

//! Square linear equation systems over GF(2^q).
//!
//! Each row of the augmented matrix is stored as a polynomial: coefficient 0
//! holds the right-hand side and coefficient `v - i` holds the factor of the
//! unknown x_i, where v is the number of unknowns. Sorting rows by degree
//! then moves the rows with a nonzero x_0 factor to the top.
//!
//! Gaussian elimination brings the matrix to reduced row-echelon form. A
//! singular system is reported as [`Error::NotSolvable`], which the PGZ
//! decoder reads as "try fewer errors".

use crate::error::{Error, Result};
use crate::math::galois::{Element, Field};
use crate::math::polynomial::Polynomial;
use log::trace;

/// A system of v equations in v unknowns
#[derive(Debug, Clone)]
pub struct LinearSystem {
    field: Field,
    rows: Vec<Polynomial>,
}

impl LinearSystem {
    pub fn new(field: &Field) -> Self {
        LinearSystem {
            field: field.clone(),
            rows: Vec::new(),
        }
    }

    /// Create a system from augmented rows in polynomial form
    pub fn from_rows(field: &Field, rows: Vec<Polynomial>) -> Result<Self> {
        if rows.iter().any(|row| row.field() != field) {
            return Err(Error::FieldMismatch);
        }
        Ok(LinearSystem {
            field: field.clone(),
            rows,
        })
    }

    /// Append a row in polynomial form
    pub fn push_row(&mut self, row: Polynomial) {
        self.rows.push(row);
    }

    /// Append the equation `coefficients[0]·x_0 + ... + coefficients[v-1]·x_(v-1) = rhs`
    pub fn push_equation(&mut self, coefficients: &[Element], rhs: Element) {
        let mut row = Vec::with_capacity(coefficients.len() + 1);
        row.push(rhs);
        row.extend(coefficients.iter().rev().cloned());
        self.rows.push(Polynomial::new(&self.field, row));
    }

    /// Number of unknowns, equal to the number of equations
    pub fn unknowns(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Polynomial] {
        &self.rows
    }

    /// Reduced row-echelon form of the augmented matrix
    ///
    /// # Returns
    ///
    /// Rows where row r has a single one in the column of x_r, or
    /// [`Error::NotSolvable`] if the system is singular
    pub fn reduced_echelon_form(&self) -> Result<Vec<Polynomial>> {
        let v = self.rows.len();
        if v == 0 {
            return Err(Error::InvalidInput(
                "Linear system has no equations".to_string(),
            ));
        }
        if let Some(row) = self.rows.iter().find(|row| row.degree() > Some(v)) {
            return Err(Error::InvalidInput(format!(
                "Row {} has more than {} unknowns",
                row, v
            )));
        }

        let mut rows = self.rows.clone();
        for row in rows.iter_mut() {
            row.resize(v + 1);
        }
        rows.sort_by(|a, b| b.degree().cmp(&a.degree()));

        // forward elimination
        for r in 0..v {
            let column = v - r;
            let pivot = (r..v)
                .find(|&i| !rows[i][column].is_zero())
                .ok_or(Error::NotSolvable)?;
            rows.swap(r, pivot);

            let inverse = rows[r][column].inverse()?;
            rows[r] = rows[r].scale(&inverse);

            for i in r + 1..v {
                let factor = rows[i][column].clone();
                if !factor.is_zero() {
                    let reduction = rows[r].scale(&factor);
                    rows[i] -= &reduction;
                }
            }
        }

        // backward elimination
        for r in (0..v).rev() {
            let column = v - r;
            for i in 0..r {
                let factor = rows[i][column].clone();
                if !factor.is_zero() {
                    let reduction = rows[r].scale(&factor);
                    rows[i] -= &reduction;
                }
            }
        }

        if !rows[v - 1][1].is_one() {
            trace!("last pivot is {} after reduction", rows[v - 1][1]);
            return Err(Error::NotSolvable);
        }

        Ok(rows)
    }

    /// Solve the system
    ///
    /// # Returns
    ///
    /// A polynomial whose coefficient i is the value of x_i
    pub fn solution(&self) -> Result<Polynomial> {
        let rows = self.reduced_echelon_form()?;
        let values = rows.iter().map(|row| row[0].clone()).collect();
        Ok(Polynomial::new(&self.field, values))
    }
}

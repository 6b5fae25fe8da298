//! Editing session
//!
//! A [`PatternSession`] owns the engine, the current parameters and the last
//! transformed outline. Parameter changes are staged through a [`BatchEdit`]
//! and recomputed once when the edit is committed.

use crate::base_polygon::BasePolygon;
use crate::measure::{KeyMeasurements, LateralEdge, Measurement, MeasurementProbe};
use crate::params::TransformParameters;
use crate::polygon::TransformedPolygon;
use crate::serialization::ParameterDocument;
use crate::transform::TransformEngine;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use zerowaste_core::Result;

#[derive(Debug, Clone)]
pub struct PatternSession {
    engine: TransformEngine,
    params: TransformParameters,
    current: TransformedPolygon,
    revision: u64,
}

impl PatternSession {
    /// Create a session and run the first transform.
    pub fn new(base: BasePolygon, params: TransformParameters) -> Result<Self> {
        let engine = TransformEngine::new(base);
        let current = engine.transform(&params)?;
        Ok(Self {
            engine,
            params,
            current,
            revision: 0,
        })
    }

    pub fn params(&self) -> &TransformParameters {
        &self.params
    }

    /// Outline for the current parameters
    pub fn polygon(&self) -> &TransformedPolygon {
        &self.current
    }

    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    pub fn base(&self) -> &BasePolygon {
        self.engine.base()
    }

    /// Number of recomputes since the session was created
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace all parameters and recompute.
    pub fn set_params(&mut self, params: TransformParameters) -> Result<&TransformedPolygon> {
        let mut edit = self.edit();
        *edit = params;
        edit.commit()
    }

    /// Stage parameter changes against a copy of the current record.
    pub fn edit(&mut self) -> BatchEdit<'_> {
        let staged = self.params.clone();
        BatchEdit {
            session: self,
            staged,
        }
    }

    fn apply(&mut self, params: TransformParameters) -> Result<&TransformedPolygon> {
        let polygon = self.engine.transform(&params)?;
        self.params = params;
        self.current = polygon;
        self.revision += 1;
        tracing::debug!("pattern recomputed (revision {})", self.revision);
        Ok(&self.current)
    }

    /// Overlay a saved parameter file onto the current parameters.
    ///
    /// Returns the number of keys applied. Nothing changes when the file
    /// cannot be read or the result fails to transform.
    pub fn load_parameters(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let (merged, applied) = ParameterDocument::load_from_file(&self.params, path.as_ref())?;
        let mut edit = self.edit();
        *edit = merged;
        edit.commit()?;
        tracing::info!(
            "applied {} parameter keys from {}",
            applied,
            path.as_ref().display()
        );
        Ok(applied)
    }

    pub fn save_parameters(&self, path: impl AsRef<Path>) -> Result<()> {
        ParameterDocument::save_to_file(&self.params, path)
    }

    pub fn measure(&self, index: usize, edge: LateralEdge) -> Result<Measurement> {
        Ok(MeasurementProbe::default().measure(&self.current, index, edge)?)
    }

    pub fn key_measurements(&self) -> Result<KeyMeasurements> {
        Ok(KeyMeasurements::read(
            &self.current,
            self.engine.base(),
            &MeasurementProbe::default(),
        )?)
    }
}

/// Staged parameter changes
///
/// Dereferences to the staged [`TransformParameters`]. Dropping the edit
/// without committing discards the changes.
pub struct BatchEdit<'a> {
    session: &'a mut PatternSession,
    staged: TransformParameters,
}

impl<'a> BatchEdit<'a> {
    /// Recompute once with the staged parameters.
    ///
    /// On error the session keeps its previous parameters and outline.
    pub fn commit(self) -> Result<&'a TransformedPolygon> {
        let BatchEdit { session, staged } = self;
        session.apply(staged)
    }

    pub fn cancel(self) {}
}

impl Deref for BatchEdit<'_> {
    type Target = TransformParameters;

    fn deref(&self) -> &Self::Target {
        &self.staged
    }
}

impl DerefMut for BatchEdit<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.staged
    }
}

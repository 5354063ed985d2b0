//! A single decoded parameter grid of a scan.

use std::sync::Arc;

use radar_common::{CellValue, RadarError, RadarResult, ScanGeo};

use crate::encoding::Encoding;

/// Physical values of one parameter (e.g. "DBZH") on a polar grid.
///
/// Cells are stored with the range bin innermost:
/// `cells[(azim_bin - 1) * nbins + (range_bin - 1)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarParam {
    name: String,
    geo: Arc<ScanGeo>,
    nbins: usize,
    nrays: usize,
    cells: Vec<CellValue>,
}

impl PolarParam {
    /// Decode raw samples with `encoding`.
    pub fn decode(
        name: impl Into<String>,
        geo: Arc<ScanGeo>,
        nbins: usize,
        nrays: usize,
        raw: &[f64],
        encoding: &Encoding,
    ) -> RadarResult<Self> {
        encoding.validate()?;
        let cells = raw.iter().map(|&v| encoding.decode(v)).collect();
        Self::from_cells(name, geo, nbins, nrays, cells)
    }

    /// Build from already decoded cells.
    pub fn from_cells(
        name: impl Into<String>,
        geo: Arc<ScanGeo>,
        nbins: usize,
        nrays: usize,
        cells: Vec<CellValue>,
    ) -> RadarResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(RadarError::invalid_argument("parameter name must not be empty"));
        }
        if nbins == 0 || nrays == 0 {
            return Err(RadarError::invalid_argument(format!(
                "parameter {} has empty dimensions {} x {}",
                name, nbins, nrays
            )));
        }
        if cells.len() != nbins * nrays {
            return Err(RadarError::invalid_argument(format!(
                "parameter {} has {} cells, expected {} bins x {} rays",
                name,
                cells.len(),
                nbins,
                nrays
            )));
        }
        let expected_ascale = 360.0 / nrays as f64;
        if (geo.ascale - expected_ascale).abs() > 1e-9 {
            return Err(RadarError::invalid_argument(format!(
                "parameter {} has {} rays but scan azimuth bin size is {}",
                name, nrays, geo.ascale
            )));
        }
        Ok(Self {
            name,
            geo,
            nbins,
            nrays,
            cells,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geo(&self) -> &ScanGeo {
        &self.geo
    }

    /// Shared handle to the scan geometry.
    pub fn geo_arc(&self) -> &Arc<ScanGeo> {
        &self.geo
    }

    /// Number of range bins.
    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Number of azimuth bins.
    pub fn nrays(&self) -> usize {
        self.nrays
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Value at a 1-based `(range_bin, azim_bin)`; `None` outside the grid.
    #[inline]
    pub fn get(&self, range_bin: usize, azim_bin: usize) -> Option<CellValue> {
        if range_bin == 0 || azim_bin == 0 || range_bin > self.nbins || azim_bin > self.nrays {
            return None;
        }
        self.cells
            .get((azim_bin - 1) * self.nbins + (range_bin - 1))
            .copied()
    }

    /// Number of cells matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&CellValue) -> bool) -> usize {
        self.cells.iter().filter(|c| predicate(c)).count()
    }

    /// Same values relocated to different scan geometry.
    pub(crate) fn with_geo(&self, geo: Arc<ScanGeo>) -> Self {
        Self {
            geo,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_common::RadarSite;

    fn geo(nrays: usize) -> Arc<ScanGeo> {
        let site = RadarSite::new(52.0, 5.0, 10.0).unwrap();
        Arc::new(ScanGeo::new(site, 0.5, 1000.0, nrays).unwrap())
    }

    #[test]
    fn test_indexing_range_innermost() {
        // 3 bins x 4 rays, value = 10 * ray + bin
        let raw: Vec<f64> = (0..4)
            .flat_map(|ray| (0..3).map(move |bin| (10 * ray + bin) as f64))
            .collect();
        let param =
            PolarParam::decode("VRADH", geo(4), 3, 4, &raw, &Encoding::identity()).unwrap();

        assert_eq!(param.get(1, 1), Some(CellValue::Present(0.0)));
        assert_eq!(param.get(3, 1), Some(CellValue::Present(2.0)));
        assert_eq!(param.get(1, 2), Some(CellValue::Present(10.0)));
        assert_eq!(param.get(3, 4), Some(CellValue::Present(32.0)));
    }

    #[test]
    fn test_get_out_of_grid() {
        let param = PolarParam::from_cells("DBZH", geo(4), 3, 4, vec![CellValue::Undetect; 12])
            .unwrap();
        assert_eq!(param.get(0, 1), None);
        assert_eq!(param.get(4, 1), None);
        assert_eq!(param.get(1, 5), None);
        assert_eq!(param.get(3, 4), Some(CellValue::Undetect));
    }

    #[test]
    fn test_decode_sentinels_survive() {
        let enc = Encoding::new(0.5, -32.0, 255.0, 0.0).unwrap();
        let raw = [255.0, 0.0, 100.0, 64.0];
        let param = PolarParam::decode("DBZH", geo(4), 1, 4, &raw, &enc).unwrap();

        assert_eq!(param.get(1, 1), Some(CellValue::NoData));
        assert_eq!(param.get(1, 2), Some(CellValue::Undetect));
        assert_eq!(param.get(1, 3), Some(CellValue::Present(18.0)));
        assert_eq!(param.count(CellValue::is_absent), 1);
        assert_eq!(param.count(CellValue::is_present), 2);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = PolarParam::from_cells("DBZH", geo(4), 3, 4, vec![CellValue::NoData; 11])
            .unwrap_err();
        assert_eq!(err.error_code(), "InvalidArgument");

        // ascale of the geometry disagrees with the ray count
        assert!(PolarParam::from_cells("DBZH", geo(360), 3, 4, vec![CellValue::NoData; 12]).is_err());
        assert!(PolarParam::from_cells("", geo(4), 3, 4, vec![CellValue::NoData; 12]).is_err());
    }
}

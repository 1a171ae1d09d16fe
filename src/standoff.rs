use crate::error::WellmeshError;

pub const RATIO_MIN: f64 = 0.01;
pub const RATIO_MAX: f64 = 1.0;

/// Casing eccentricity inside the annulus.
///
/// A ratio of 1.0 means the casing is perfectly centered; a ratio near zero
/// means it is touching the borehole wall. The rigid variant derives the
/// offset from centralizer geometry; the flexible variant from a balance of
/// lateral and restoring forces.
#[derive(Debug, Clone, Copy)]
pub enum Standoff {
    Rigid {
        casing_external_diameter: f64,
        well_diameter: f64,
        /// Centralizer outer diameter
        dc: f64,
        /// Allowed centralizer deformation
        gamma_max: f64,
    },
    Flexible {
        casing_external_diameter: f64,
        well_diameter: f64,
        lateral_forces: f64,
        restoring_force: f64,
        gamma_max: f64,
    },
}

impl Standoff {
    pub fn rigid(
        casing_external_diameter: f64,
        well_diameter: f64,
        dc: f64,
        gamma_max: f64,
    ) -> Standoff {
        Standoff::Rigid {
            casing_external_diameter,
            well_diameter,
            dc,
            gamma_max,
        }
    }

    pub fn flexible(
        casing_external_diameter: f64,
        well_diameter: f64,
        lateral_forces: f64,
        restoring_force: f64,
        gamma_max: f64,
    ) -> Standoff {
        Standoff::Flexible {
            casing_external_diameter,
            well_diameter,
            lateral_forces,
            restoring_force,
            gamma_max,
        }
    }

    /// Annular clearance on one side of a centered casing.
    pub fn la(&self) -> f64 {
        let (casing, well) = match self {
            Standoff::Rigid {
                casing_external_diameter,
                well_diameter,
                ..
            }
            | Standoff::Flexible {
                casing_external_diameter,
                well_diameter,
                ..
            } => (*casing_external_diameter, *well_diameter),
        };
        (well - casing) * 0.5
    }

    /// Casing offset from the borehole wall before deformation.
    pub fn sc(&self) -> f64 {
        match self {
            Standoff::Rigid {
                casing_external_diameter,
                dc,
                ..
            } => (dc - casing_external_diameter) * 0.5,
            Standoff::Flexible {
                lateral_forces,
                restoring_force,
                ..
            } => (1.0 - lateral_forces / (3.0 * restoring_force)) * self.la(),
        }
    }

    /// Fraction of the annular clearance consumed by casing offset, net of
    /// allowed deformation.
    pub fn ratio(&self) -> f64 {
        let gamma_max = match self {
            Standoff::Rigid { gamma_max, .. } | Standoff::Flexible { gamma_max, .. } => *gamma_max,
        };
        (self.sc() - gamma_max) / self.la()
    }

    /// Checks rigid-centralizer feasibility and the ratio range. Must pass
    /// before the standoff is used to build a mesh.
    pub fn validate(&self) -> Result<(), WellmeshError> {
        if let Standoff::Rigid {
            casing_external_diameter,
            well_diameter,
            dc,
            gamma_max,
        } = self
        {
            if !(casing_external_diameter <= dc && dc <= well_diameter) {
                return Err(WellmeshError::StandoffInfosInvalid(format!(
                    "centralizer diameter {} must lie between casing {} and well {}",
                    dc, casing_external_diameter, well_diameter
                )));
            }

            let deformed = dc - 2.0 * gamma_max;
            if !(*casing_external_diameter <= deformed && deformed <= *well_diameter) {
                return Err(WellmeshError::StandoffInfosInvalid(format!(
                    "deformed centralizer diameter {} must lie between casing {} and well {}",
                    deformed, casing_external_diameter, well_diameter
                )));
            }
        }

        let ratio = self.ratio();
        if !(RATIO_MIN..=RATIO_MAX).contains(&ratio) {
            return Err(WellmeshError::StandoffRatioInvalid(ratio));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rigid_sc_and_la() {
        let standoff = Standoff::rigid(1.0, 2.0, 1.5, 0.0);
        assert_relative_eq!(standoff.sc(), 0.25);
        assert_relative_eq!(standoff.la(), 0.5);
    }

    #[test]
    fn test_rigid_ratio() {
        let cases = [
            (1.0, 2.0, 1.5, 0.0, 0.5),
            (0.01, 0.1, 0.05, 0.0, 0.4444444444444444),
            (1.0, 3.0, 3.0, 0.2, 0.8),
        ];
        for (casing, well, dc, gamma_max, expected) in cases {
            let standoff = Standoff::rigid(casing, well, dc, gamma_max);
            assert_relative_eq!(standoff.ratio(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flexible_ratio() {
        let standoff = Standoff::flexible(1.0, 2.0, 1.0, 2.0, 0.1);
        assert_relative_eq!(standoff.ratio(), 0.6333333333333333, epsilon = 1e-12);

        let standoff = Standoff::flexible(1.0, 3.0, 2.0, 2.0, 0.2);
        assert_relative_eq!(standoff.ratio(), 0.4666666666666667, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_accepts_centered_casing() {
        // dc equal to the well diameter gives the boundary ratio of 1.0
        let standoff = Standoff::rigid(1.0, 3.0, 3.0, 0.0);
        assert!(standoff.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_low_ratio() {
        // centralizer same size as the casing: zero offset
        let standoff = Standoff::rigid(1.0, 3.0, 1.0, 0.0);
        match standoff.validate() {
            Err(WellmeshError::StandoffRatioInvalid(r)) => assert_relative_eq!(r, 0.0),
            other => panic!("expected StandoffRatioInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_high_ratio() {
        // negative lateral force pushes sc beyond the clearance
        let standoff = Standoff::flexible(1.0, 2.0, -3.0, 2.0, 0.0);
        match standoff.validate() {
            Err(WellmeshError::StandoffRatioInvalid(r)) => {
                assert_relative_eq!(r, 1.5, epsilon = 1e-12)
            }
            other => panic!("expected StandoffRatioInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_oversized_centralizer() {
        let standoff = Standoff::rigid(1.0, 2.0, 2.5, 0.0);
        assert!(matches!(
            standoff.validate(),
            Err(WellmeshError::StandoffInfosInvalid(_))
        ));
    }

    #[test]
    fn test_validate_rejects_undersized_centralizer() {
        let standoff = Standoff::rigid(1.0, 2.0, 0.5, 0.0);
        assert!(matches!(
            standoff.validate(),
            Err(WellmeshError::StandoffInfosInvalid(_))
        ));
    }

    #[test]
    fn test_validate_rejects_excess_deformation() {
        // dc fits, but dc - 2*gamma_max collapses below the casing diameter
        let standoff = Standoff::rigid(1.0, 2.0, 1.5, 0.4);
        assert!(matches!(
            standoff.validate(),
            Err(WellmeshError::StandoffInfosInvalid(_))
        ));
    }
}

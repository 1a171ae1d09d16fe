use std::fmt::Display;

#[derive(Debug)]
pub enum WellmeshError {
    /// Config file missing, unreadable, or malformed
    Input(String),
    /// Radii violate internal < pipe < effective well < formation
    MeshDiameterInvalid(String),
    /// Eccentricity ratio outside [0.01, 1.0]
    StandoffRatioInvalid(f64),
    /// Rigid centralizer parameters geometrically infeasible
    StandoffInfosInvalid(String),
    /// Formation element-size queried outside its valid index range
    InvalidElementIndex(usize),
    /// Mesh file could not be created or written
    Output(String),
}

impl Display for WellmeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WellmeshError::Input(v) => write!(f, "Input error: {}", v),
            WellmeshError::MeshDiameterInvalid(v) => write!(f, "Mesh error: {}", v),
            WellmeshError::StandoffRatioInvalid(r) => write!(
                f,
                "Standoff error: ratio {} is outside the valid range [0.01, 1.0]",
                r
            ),
            WellmeshError::StandoffInfosInvalid(v) => write!(f, "Standoff error: {}", v),
            WellmeshError::InvalidElementIndex(i) => write!(
                f,
                "Mesh error: formation element index {} is out of range",
                i
            ),
            WellmeshError::Output(v) => write!(f, "Output error: {}", v),
        }
    }
}

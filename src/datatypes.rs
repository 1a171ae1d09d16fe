/// Material tags in the downstream solver's legend. Both interfaces share
/// tag 2: they are thin bonding elements, not bulk sheath or formation.
pub const MATERIAL_CASING: usize = 1;
pub const MATERIAL_INTERFACE: usize = 2;
pub const MATERIAL_SHEATH: usize = 3;
pub const MATERIAL_FORMATION: usize = 4;

/// Two-node bar element. Node indices are zero-based; the writer shifts
/// them to the one-based numbering the solver expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub nodes: [usize; 2],
    pub material: usize,
}

/// Which side of an eccentric annulus a mesh variant describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThicknessSide {
    Thick,
    Thin,
}

/// Well geometry and output settings parsed from the input json.
#[derive(Debug)]
pub struct MeshConfig {
    pub internal_diameter: f64,
    pub pipe_diameter: f64,
    pub well_diameter: f64,
    pub formation_diameter: f64,
    pub decimal_places: usize,
}

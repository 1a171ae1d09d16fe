use std::path::Path;

use json::JsonValue;

use crate::{
    datatypes::{
        Element, MeshConfig, ThicknessSide, MATERIAL_CASING, MATERIAL_FORMATION,
        MATERIAL_INTERFACE, MATERIAL_SHEATH,
    },
    error::WellmeshError,
    standoff::Standoff,
    writer,
};

pub const CASING_ELEMENTS: usize = 20;
pub const SHEATH_ELEMENTS: usize = 20;
pub const FORMATION_ELEMENTS: usize = 40;

/// Growth factor of the geometric progression in the formation
pub const FORMATION_RATIO: f64 = 1.1;

pub const DEFAULT_FORMATION_DIAMETER: f64 = 60.0;
pub const DEFAULT_DECIMAL_PLACES: usize = 5;

/// One radial discretization of the well cross-section.
///
/// Node order runs casing, casing-sheath interface, sheath,
/// sheath-formation interface, formation. Interface nodes duplicate the
/// boundary radius so the solver gets a zero-thickness bonding element at
/// each material boundary.
#[derive(Debug)]
pub struct Mesh {
    internal_radius: f64,
    pipe_radius: f64,
    well_radius: f64,
    formation_radius: f64,
    effective_well_radius: f64,
    pub coordinates: Vec<f64>,
    pub connectivity: Vec<Element>,
}

impl Mesh {
    /// Builds a concentric mesh with the default formation boundary.
    pub fn new(
        internal_diameter: f64,
        pipe_diameter: f64,
        well_diameter: f64,
    ) -> Result<Mesh, WellmeshError> {
        Mesh::with_formation(
            internal_diameter,
            pipe_diameter,
            well_diameter,
            DEFAULT_FORMATION_DIAMETER,
        )
    }

    /// Builds a concentric mesh with an explicit formation boundary.
    pub fn with_formation(
        internal_diameter: f64,
        pipe_diameter: f64,
        well_diameter: f64,
        formation_diameter: f64,
    ) -> Result<Mesh, WellmeshError> {
        let well_radius = 0.5 * well_diameter;
        Mesh::build(
            0.5 * internal_diameter,
            0.5 * pipe_diameter,
            well_radius,
            0.5 * formation_diameter,
            well_radius,
        )
    }

    /// Builds one side of an eccentric mesh.
    ///
    /// The standoff is validated first, then the sheath boundary is shifted
    /// by `sheath_thickness * (1 - ratio)` away from the casing for the
    /// thick side and towards it for the thin side. Both sides start from
    /// the same nominal well radius.
    pub fn with_standoff(
        internal_diameter: f64,
        pipe_diameter: f64,
        well_diameter: f64,
        formation_diameter: f64,
        standoff: &Standoff,
        side: ThicknessSide,
    ) -> Result<Mesh, WellmeshError> {
        standoff.validate()?;

        let pipe_radius = 0.5 * pipe_diameter;
        let well_radius = 0.5 * well_diameter;

        let nominal_sheath = well_radius - pipe_radius;
        let offset = nominal_sheath * (1.0 - standoff.ratio());
        let effective_well_radius = match side {
            ThicknessSide::Thick => well_radius + offset,
            ThicknessSide::Thin => well_radius - offset,
        };

        Mesh::build(
            0.5 * internal_diameter,
            pipe_radius,
            well_radius,
            0.5 * formation_diameter,
            effective_well_radius,
        )
    }

    fn build(
        internal_radius: f64,
        pipe_radius: f64,
        well_radius: f64,
        formation_radius: f64,
        effective_well_radius: f64,
    ) -> Result<Mesh, WellmeshError> {
        if internal_radius >= pipe_radius {
            return Err(WellmeshError::MeshDiameterInvalid(format!(
                "internal radius {} must be smaller than pipe radius {}",
                internal_radius, pipe_radius
            )));
        }
        if pipe_radius >= effective_well_radius {
            return Err(WellmeshError::MeshDiameterInvalid(format!(
                "pipe radius {} must be smaller than well radius {}",
                pipe_radius, effective_well_radius
            )));
        }
        if effective_well_radius >= formation_radius {
            return Err(WellmeshError::MeshDiameterInvalid(format!(
                "well radius {} must be smaller than formation radius {}",
                effective_well_radius, formation_radius
            )));
        }

        Ok(Mesh {
            internal_radius,
            pipe_radius,
            well_radius,
            formation_radius,
            effective_well_radius,
            coordinates: Vec::new(),
            connectivity: Vec::new(),
        })
    }

    pub fn internal_radius(&self) -> f64 {
        self.internal_radius
    }

    pub fn pipe_radius(&self) -> f64 {
        self.pipe_radius
    }

    pub fn well_radius(&self) -> f64 {
        self.well_radius
    }

    pub fn effective_well_radius(&self) -> f64 {
        self.effective_well_radius
    }

    pub fn formation_radius(&self) -> f64 {
        self.formation_radius
    }

    pub fn casing_thickness(&self) -> f64 {
        self.pipe_radius - self.internal_radius
    }

    pub fn sheath_thickness(&self) -> f64 {
        self.effective_well_radius - self.pipe_radius
    }

    pub fn formation_thickness(&self) -> f64 {
        self.formation_radius - self.effective_well_radius
    }

    pub fn element_size_casing(&self) -> f64 {
        self.casing_thickness() / CASING_ELEMENTS as f64
    }

    pub fn element_size_sheath(&self) -> f64 {
        self.sheath_thickness() / SHEATH_ELEMENTS as f64
    }

    /// First term of the formation progression: the closed-form solution to
    /// a geometric series of FORMATION_ELEMENTS terms summing to the
    /// formation thickness.
    pub fn initial_element_size_formation(&self) -> f64 {
        self.formation_thickness() * (FORMATION_RATIO - 1.0)
            / (FORMATION_RATIO.powi(FORMATION_ELEMENTS as i32) - 1.0)
    }

    /// Size of the k-th formation element, valid for 0 < k < FORMATION_ELEMENTS.
    pub fn element_size_formation(&self, element_number: usize) -> Result<f64, WellmeshError> {
        if element_number == 0 || element_number >= FORMATION_ELEMENTS {
            return Err(WellmeshError::InvalidElementIndex(element_number));
        }
        Ok(self.initial_element_size_formation() * FORMATION_RATIO.powi(element_number as i32 - 1))
    }

    /// Total node count, including the two duplicated interface nodes.
    pub fn node_total(&self) -> usize {
        CASING_ELEMENTS + SHEATH_ELEMENTS + FORMATION_ELEMENTS + 3
    }

    pub fn element_total(&self) -> usize {
        CASING_ELEMENTS + SHEATH_ELEMENTS + FORMATION_ELEMENTS + 2
    }

    /// Populates coordinates and connectivity. Pure function of the
    /// construction inputs; calling it again rebuilds identical data.
    pub fn generate(&mut self) -> Result<(), WellmeshError> {
        self.generate_coordinates()?;
        self.generate_connectivity();
        Ok(())
    }

    fn generate_coordinates(&mut self) -> Result<(), WellmeshError> {
        let mut x: Vec<f64> = Vec::with_capacity(self.node_total());

        // casing: uniform spacing, closing on the exact pipe radius
        let mut radius = self.internal_radius;
        x.push(radius);
        for _ in 1..CASING_ELEMENTS {
            radius += self.element_size_casing();
            x.push(radius);
        }
        x.push(self.pipe_radius);

        // casing-sheath interface node, then uniform sheath spacing
        x.push(self.pipe_radius);
        radius = self.pipe_radius;
        for _ in 1..SHEATH_ELEMENTS {
            radius += self.element_size_sheath();
            x.push(radius);
        }
        x.push(self.effective_well_radius);

        // sheath-formation interface node, then the geometric progression
        x.push(self.effective_well_radius);
        radius = self.effective_well_radius;
        for element in 1..FORMATION_ELEMENTS {
            radius += self.element_size_formation(element)?;
            x.push(radius);
        }
        x.push(self.formation_radius);

        self.coordinates = x;
        Ok(())
    }

    fn generate_connectivity(&mut self) {
        let mut connectivity: Vec<Element> = Vec::with_capacity(self.element_total());
        let mut node: usize = 0;

        for _ in 0..CASING_ELEMENTS {
            connectivity.push(Element {
                nodes: [node, node + 1],
                material: MATERIAL_CASING,
            });
            node += 1;
        }

        connectivity.push(Element {
            nodes: [node, node + 1],
            material: MATERIAL_INTERFACE,
        });
        node += 1;

        for _ in 0..SHEATH_ELEMENTS {
            connectivity.push(Element {
                nodes: [node, node + 1],
                material: MATERIAL_SHEATH,
            });
            node += 1;
        }

        connectivity.push(Element {
            nodes: [node, node + 1],
            material: MATERIAL_INTERFACE,
        });
        node += 1;

        for _ in 0..FORMATION_ELEMENTS {
            connectivity.push(Element {
                nodes: [node, node + 1],
                material: MATERIAL_FORMATION,
            });
            node += 1;
        }

        self.connectivity = connectivity;
    }

    /// Serializes the generated mesh to `path`.
    pub fn write(&self, path: &Path, decimal_places: usize) -> Result<(), WellmeshError> {
        writer::write_mesh(self, path, decimal_places)
    }
}

/// Parses the input json into a JsonValue object
fn load_input_file(input_file: &Path) -> Result<JsonValue, WellmeshError> {
    let file_string = match std::fs::read_to_string(input_file) {
        Ok(f) => f,
        Err(_err) => {
            return Err(WellmeshError::Input(format!(
                "Unable to open input file {}",
                input_file.display()
            )))
        }
    };

    let input_json = match json::parse(&file_string) {
        Ok(f) => f,
        Err(err) => {
            return Err(WellmeshError::Input(format!(
                "Error in input file json: {err}"
            )))
        }
    };

    if !input_json.has_key("geometry") {
        return Err(WellmeshError::Input(
            "Input json missing geometry section".to_string(),
        ));
    }

    Ok(input_json)
}

/// Parses the geometry section into a MeshConfig
fn parse_config(input_json: &JsonValue) -> Result<MeshConfig, WellmeshError> {
    let geometry = &input_json["geometry"];

    let internal_diameter = geometry["internal_diameter"].as_f64();
    let pipe_diameter = geometry["pipe_diameter"].as_f64();
    let well_diameter = geometry["well_diameter"].as_f64();

    if internal_diameter.is_none() {
        return Err(WellmeshError::Input(
            "Input json missing internal_diameter in geometry section".to_owned(),
        ));
    }
    if pipe_diameter.is_none() {
        return Err(WellmeshError::Input(
            "Input json missing pipe_diameter in geometry section".to_owned(),
        ));
    }
    if well_diameter.is_none() {
        return Err(WellmeshError::Input(
            "Input json missing well_diameter in geometry section".to_owned(),
        ));
    }

    let formation_diameter = if geometry.has_key("formation_diameter") {
        match geometry["formation_diameter"].as_f64() {
            Some(d) => d,
            None => {
                return Err(WellmeshError::Input(
                    "Bad value for formation_diameter in geometry section".to_owned(),
                ))
            }
        }
    } else {
        DEFAULT_FORMATION_DIAMETER
    };

    let decimal_places = if geometry.has_key("decimal_places") {
        match geometry["decimal_places"].as_usize() {
            Some(d) => d,
            None => {
                return Err(WellmeshError::Input(
                    "Bad value for decimal_places in geometry section".to_owned(),
                ))
            }
        }
    } else {
        DEFAULT_DECIMAL_PLACES
    };

    Ok(MeshConfig {
        internal_diameter: internal_diameter.unwrap(),
        pipe_diameter: pipe_diameter.unwrap(),
        well_diameter: well_diameter.unwrap(),
        formation_diameter,
        decimal_places,
    })
}

/// Parses the optional standoff section. The casing and well diameters come
/// from the geometry section; the standoff section holds the variant and
/// its own parameters.
fn parse_standoff(
    input_json: &JsonValue,
    config: &MeshConfig,
) -> Result<Option<Standoff>, WellmeshError> {
    if !input_json.has_key("standoff") {
        return Ok(None);
    }

    let standoff_json = &input_json["standoff"];

    let variant = match standoff_json["variant"].as_str() {
        Some(v) => v,
        None => {
            return Err(WellmeshError::Input(
                "Input json missing variant in standoff section".to_owned(),
            ))
        }
    };

    let gamma_max = if standoff_json.has_key("gamma_max") {
        match standoff_json["gamma_max"].as_f64() {
            Some(g) => g,
            None => {
                return Err(WellmeshError::Input(
                    "Bad value for gamma_max in standoff section".to_owned(),
                ))
            }
        }
    } else {
        0.0
    };

    let standoff = match variant {
        "rigid" => {
            let dc = match standoff_json["dc"].as_f64() {
                Some(dc) => dc,
                None => {
                    return Err(WellmeshError::Input(
                        "Input json missing dc in rigid standoff section".to_owned(),
                    ))
                }
            };
            Standoff::rigid(config.pipe_diameter, config.well_diameter, dc, gamma_max)
        }
        "flexible" => {
            let lateral_forces = match standoff_json["lateral_forces"].as_f64() {
                Some(f) => f,
                None => {
                    return Err(WellmeshError::Input(
                        "Input json missing lateral_forces in flexible standoff section".to_owned(),
                    ))
                }
            };
            let restoring_force = match standoff_json["restoring_force"].as_f64() {
                Some(f) => f,
                None => {
                    return Err(WellmeshError::Input(
                        "Input json missing restoring_force in flexible standoff section"
                            .to_owned(),
                    ))
                }
            };
            Standoff::flexible(
                config.pipe_diameter,
                config.well_diameter,
                lateral_forces,
                restoring_force,
                gamma_max,
            )
        }
        other => {
            return Err(WellmeshError::Input(format!(
                "Unrecognized standoff variant {other}"
            )))
        }
    };

    Ok(Some(standoff))
}

fn build_and_write(
    config: &MeshConfig,
    standoff: Option<(&Standoff, ThicknessSide)>,
    path: &Path,
    decimal_places: usize,
) -> Result<(), WellmeshError> {
    let mut mesh = match standoff {
        Some((standoff, side)) => Mesh::with_standoff(
            config.internal_diameter,
            config.pipe_diameter,
            config.well_diameter,
            config.formation_diameter,
            standoff,
            side,
        )?,
        None => Mesh::with_formation(
            config.internal_diameter,
            config.pipe_diameter,
            config.well_diameter,
            config.formation_diameter,
        )?,
    };

    mesh.generate()?;
    mesh.write(path, decimal_places)?;

    println!(
        "info: wrote {} ({} nodes, {} elements)",
        path.display(),
        mesh.coordinates.len(),
        mesh.connectivity.len()
    );

    Ok(())
}

/// Runs the mesher: parses the input json, builds the mesh (or the
/// thick/thin pair when a standoff is configured), and writes the output
/// files into `output_dir`.
pub fn run(
    input_file: &Path,
    output_dir: &Path,
    decimals_override: Option<usize>,
) -> Result<(), WellmeshError> {
    let input_json = load_input_file(input_file)?;
    let config = parse_config(&input_json)?;
    let standoff = parse_standoff(&input_json, &config)?;

    let decimal_places = decimals_override.unwrap_or(config.decimal_places);

    if let Err(err) = std::fs::create_dir_all(output_dir) {
        return Err(WellmeshError::Output(format!(
            "Unable to create output directory {}: {err}",
            output_dir.display()
        )));
    }

    match standoff {
        Some(standoff) => {
            let sides = [
                (ThicknessSide::Thick, "mesh_thick.dat"),
                (ThicknessSide::Thin, "mesh_thin.dat"),
            ];
            for (side, filename) in sides {
                build_and_write(
                    &config,
                    Some((&standoff, side)),
                    &output_dir.join(filename),
                    decimal_places,
                )?;
            }
        }
        None => {
            build_and_write(&config, None, &output_dir.join("mesh.dat"), decimal_places)?;
        }
    }

    Ok(())
}

use std::io::Write;
use std::path::Path;

use crate::{error::WellmeshError, mesher::Mesh};

const INDEX_WIDTH: usize = 8;
const RADIUS_WIDTH: usize = 18;

/// Writes a generated mesh to `path` in the solver's flat text layout:
/// a `coordinates` block, a `bar2` block, and a trailing `return` marker.
///
/// `decimal_places` controls only the text rendering of the radii. A failed
/// write removes the partial file, so the file's existence signals success.
pub fn write_mesh(mesh: &Mesh, path: &Path, decimal_places: usize) -> Result<(), WellmeshError> {
    let contents = render(mesh, decimal_places);

    let mut file = match std::fs::File::create(path) {
        Ok(f) => f,
        Err(err) => {
            return Err(WellmeshError::Output(format!(
                "Unable to create mesh file {}: {err}",
                path.display()
            )))
        }
    };

    if let Err(err) = file.write_all(contents.as_bytes()) {
        let _ = std::fs::remove_file(path);
        return Err(WellmeshError::Output(format!(
            "Failed to write mesh file {}: {err}",
            path.display()
        )));
    }

    Ok(())
}

fn render(mesh: &Mesh, decimal_places: usize) -> String {
    let mut out = String::new();

    out.push_str("coordinates\n");
    for (index, radius) in mesh.coordinates.iter().enumerate() {
        out.push_str(&format!(
            "{:>iw$} {:>rw$.prec$}\n",
            index + 1,
            radius,
            iw = INDEX_WIDTH,
            rw = RADIUS_WIDTH,
            prec = decimal_places,
        ));
    }
    out.push_str("end coordinates\n");

    out.push_str("bar2\n");
    for (index, element) in mesh.connectivity.iter().enumerate() {
        out.push_str(&format!(
            "{:>iw$} {:>iw$} {:>iw$} {:>iw$}\n",
            index + 1,
            element.nodes[0] + 1,
            element.nodes[1] + 1,
            element.material,
            iw = INDEX_WIDTH,
        ));
    }
    out.push_str("end bar2\n");

    out.push_str("return\n");
    out
}

//! Scene parameter loading from JSON files

use crate::{Result, SceneRequest};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Load a scene request from a JSON file.
///
/// Only the shape is checked here; parameter rules are applied by
/// [`crate::create_scene`].
pub fn load_request(path: impl AsRef<Path>) -> Result<SceneRequest> {
    let path = path.as_ref();
    info!("Loading scene parameters from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let request: SceneRequest = serde_json::from_reader(reader)?;

    debug!(
        "Loaded {} constellation entries, {} streets, {} ground stations",
        request.constellations.satellite_nums.len(),
        request.streets.len(),
        request.ground_stations.latitudes.len()
    );
    Ok(request)
}

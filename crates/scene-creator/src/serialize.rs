//! Scene output formats
//!
//! JSON is the primary format. The Pigi XML document is kept for legacy
//! viewers and must stay byte-for-byte stable.

use crate::{Result, Scene};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

/// Planets always present in a Pigi scene: name, obliquity (deg), scale, atmosphere
const PIGI_PLANETS: [(&str, &str, &str, u8); 8] = [
    ("Mercury", "0.1", "0.244", 0),
    ("Venus", "177", "0.605", 1),
    ("Earth", "23.4", "0.6371", 1),
    ("Mars", "25", "0.3371", 1),
    ("Jupiter", "3", "6.99", 0),
    ("Saturn", "27", "6.033", 0),
    ("Neptune", "30", "2.46", 0),
    ("Pluto", "120", "0.186", 0),
];

const PIGI_END: &str = "\t</Entities>\n</Pigi>";

fn pigi_start() -> String {
    let mut start = String::from("<Pigi>\n\t<Entities>\n");
    for (name, obliquity, scale, atmosphere) in PIGI_PLANETS {
        start.push_str(&format!(
            "\t\t<Entity Type=\"Planet\" Name=\"{name}\">\n\
             \t\t\t<PropertySection Name=\"UserProperties\">\n\
             \t\t\t\t<StringPropertyValue name=\"PlanetName\" value=\"{name}\"/>\n\
             \t\t\t\t<FloatPropertyValue name=\"obliquity\" value=\"{obliquity}\"/>\n\
             \t\t\t\t<FloatPropertyValue name=\"scale\" value=\"{scale}\"/>\n\
             \t\t\t\t<IntPropertyValue name=\"Atmosphere\" value=\"{atmosphere}\"/>\n\
             \t\t\t</PropertySection>\n\
             \t\t</Entity>\n"
        ));
    }
    start
}

/// One `as_dict` value per entity, in scene order.
pub fn scene_to_dict(scene: &Scene) -> Value {
    Value::Array(scene.iter().map(|entity| entity.as_dict()).collect())
}

pub fn scene_to_xml(scene: &Scene) -> String {
    let body: String = scene.iter().map(|entity| entity.as_xml()).collect();
    format!("{} {} {}", pigi_start(), body, PIGI_END)
}

/// Serialize a scene in the requested format.
pub fn render(scene: &Scene, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&scene_to_dict(scene))?),
        OutputFormat::Xml => Ok(scene_to_xml(scene)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneEntity;
    use constellations::{ConstellationSpec, WalkerConstellation};
    use ground_stations::GroundStation;

    fn small_scene() -> Scene {
        let spec = ConstellationSpec::new(4, 2, 1, 45.0, 780.0, 0.0, 60.0);
        vec![
            SceneEntity::Walker(WalkerConstellation::build(spec).unwrap()),
            SceneEntity::GroundStation(GroundStation::new("GS0", 10.0, 20.0, 0.0, 60.0)),
        ]
    }

    #[test]
    fn test_empty_scene_xml() {
        let xml = scene_to_xml(&Vec::new());
        assert!(xml.starts_with("<Pigi>\n\t<Entities>\n\t\t<Entity Type=\"Planet\" Name=\"Mercury\">\n"));
        assert!(xml.ends_with("\t\t</Entity>\n  \t</Entities>\n</Pigi>"));
        assert_eq!(xml.matches("Type=\"Planet\"").count(), 8);
        assert!(xml.contains("<FloatPropertyValue name=\"obliquity\" value=\"23.4\"/>"));
        assert!(xml.contains("<IntPropertyValue name=\"Atmosphere\" value=\"1\"/>"));
    }

    #[test]
    fn test_scene_xml_contains_entities_in_order() {
        let xml = scene_to_xml(&small_scene());
        let sat = xml.find("Name=\"Sat 1\"").unwrap();
        let station = xml.find("Name=\"GS0\"").unwrap();
        let pluto = xml.find("Name=\"Pluto\"").unwrap();
        assert!(pluto < sat && sat < station);
        assert!(xml.ends_with("</Pigi>"));
    }

    #[test]
    fn test_scene_to_dict() {
        let dict = scene_to_dict(&small_scene());
        let entries = dict.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["Type"], "constellation");
        assert_eq!(entries[0]["Sat 4"]["right_ascension"], 180.0);
        assert_eq!(entries[1]["Type"], "station");
    }

    #[test]
    fn test_render_formats() {
        let scene = small_scene();
        let json = render(&scene, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scene_to_dict(&scene));

        let xml = render(&scene, OutputFormat::Xml).unwrap();
        assert_eq!(xml, scene_to_xml(&scene));
    }
}

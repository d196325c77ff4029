// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::context::{RenderContext, DEFAULT_ENTRY_BIAS};
use crate::core::medium::Medium;
use crate::core::volume::Volume;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{normalize_or_self, Float, Vector3f, PI};
use crate::sensors::pinhole::Camera;
use crate::shapes::triangle_mesh::TriangleMesh;
use crate::volumes::const_volume::ConstantVolume;
use crate::volumes::helix_torus::HelixTorusVolume;
use crate::volumes::sierpinski::SierpinskiVolume;
use crate::volumes::voxelize::voxelize_mesh;
use crate::volumes::VolumeFilterMode;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    Mesh(ObjLoadError),
    Invalid(String),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl From<ObjLoadError> for SceneLoadError {
    fn from(err: ObjLoadError) -> Self {
        SceneLoadError::Mesh(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "io error: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "missing field: {}", field),
            SceneLoadError::Mesh(err) => write!(f, "mesh error: {}", err),
            SceneLoadError::Invalid(msg) => write!(f, "invalid scene: {}", msg),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Source of the medium's extinction.
#[derive(Debug, Clone, PartialEq)]
pub enum DensityField {
    Constant(Float),
    Sierpinski,
    HelixTorus,
    /// Closed OBJ mesh voxelized into a `resolution^3` grid.
    Grid {
        filename: PathBuf,
        resolution: usize,
        filter: VolumeFilterMode,
    },
}

/// Plain description of a render. `Default` is the built-in scene: a
/// Sierpinski sponge seen slightly from above under white ambient light.
#[derive(Debug, Clone)]
pub struct SceneSettings {
    pub width: usize,
    pub height: usize,
    pub output: PathBuf,

    pub camera_origin: Vector3f,
    pub camera_direction: Vector3f,
    /// Full vertical field of view, radians.
    pub fov_y: Float,
    pub near: Float,

    pub extent: Vector3f,
    pub albedo: Float,
    pub max_extinction: Float,
    pub field: DensityField,

    pub ambient: Vector3f,

    pub max_interactions: u32,
    pub samples_per_axis: u32,
    pub entry_bias: Float,

    pub seed: u64,
    pub threads: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        let origin = Vector3f::new(0.0, 0.1, -1.2);
        Self {
            width: 512,
            height: 512,
            output: PathBuf::from("volume.bmp"),
            camera_origin: origin,
            camera_direction: normalize_or_self(&(-origin)),
            fov_y: 0.5 * PI,
            near: 0.01,
            extent: Vector3f::new(1.0, 1.0, 1.0),
            albedo: 0.8,
            max_extinction: 200.0,
            field: DensityField::Sierpinski,
            ambient: Vector3f::new(4.0, 4.0, 4.0),
            max_interactions: 1024,
            samples_per_axis: 32,
            entry_bias: DEFAULT_ENTRY_BIAS,
            seed: 0,
            threads: crate::renderers::simple::default_thread_count(),
        }
    }
}

impl SceneSettings {
    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_origin, self.camera_direction, self.fov_y, self.near)
    }

    /// Builds the medium, voxelizing a mesh if the field asks for one.
    pub fn build_medium(&self) -> Result<Medium, SceneLoadError> {
        let bbox = AABB::centered(self.extent);
        let density: Box<dyn Volume> = match &self.field {
            DensityField::Constant(value) => Box::new(ConstantVolume::new_scalar(*value)),
            DensityField::Sierpinski => Box::new(SierpinskiVolume::new(bbox)),
            DensityField::HelixTorus => Box::new(HelixTorusVolume::new(bbox)),
            DensityField::Grid { filename, resolution, filter } => {
                let mut mesh = TriangleMesh::from_obj(filename)?;
                if mesh.is_empty() {
                    return Err(SceneLoadError::Invalid(format!("mesh {} has no triangles", filename.display())));
                }
                mesh.fit_to_bbox(&bbox);
                let mut grid = voxelize_mesh(&mesh, *resolution, bbox, self.threads);
                grid.set_filter_mode(*filter);
                Box::new(grid)
            }
        };
        Ok(Medium::new(self.extent, self.albedo, self.max_extinction, density))
    }

    pub fn build_context(&self) -> Result<RenderContext, SceneLoadError> {
        let context = RenderContext::new(self.camera(), self.build_medium()?, self.width, self.height)
            .with_ambient(self.ambient)
            .with_max_interactions(self.max_interactions)
            .with_samples_per_axis(self.samples_per_axis)
            .with_entry_bias(self.entry_bias);
        context.validate().map_err(SceneLoadError::Invalid)?;
        Ok(context)
    }
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneSettings, SceneLoadError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_scene(&xml, base_dir)
}

pub fn parse_scene(xml: &str, base_dir: &Path) -> Result<SceneSettings, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut settings = SceneSettings::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let attrs = read_attributes(&e, &defaults)?;
                match e.name().as_ref() {
                    b"default" => {
                        let name = attrs.get("name").ok_or(SceneLoadError::MissingField("default.name"))?;
                        let value = attrs.get("value").ok_or(SceneLoadError::MissingField("default.value"))?;
                        defaults.insert(name.clone(), value.clone());
                    }
                    b"film" => parse_film(&attrs, &mut settings)?,
                    b"sensor" => parse_sensor(&attrs, &mut settings)?,
                    b"medium" => parse_medium(&attrs, base_dir, &mut settings)?,
                    b"integrator" => parse_integrator(&attrs, &mut settings)?,
                    b"emitter" => {
                        if let Some(v) = attrs.get("ambient") {
                            settings.ambient = parse_vec3(v)?;
                        }
                    }
                    b"render" => {
                        if let Some(v) = attrs.get("seed") {
                            settings.seed = v.parse::<u64>()
                                .map_err(|_| SceneLoadError::Parse(format!("invalid seed: {}", v)))?;
                        }
                        if let Some(v) = attrs.get("threads") {
                            settings.threads = parse_usize(v)?.max(1);
                        }
                    }
                    b"scene" => {}
                    other => {
                        log::warn!("Ignoring unknown scene element <{}>.", String::from_utf8_lossy(other));
                    }
                }
            }
            Err(e) => {
                return Err(SceneLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(settings)
}

fn read_attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> Result<HashMap<String, String>, SceneLoadError> {
    let mut out = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| SceneLoadError::Parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().map_err(|err| SceneLoadError::Parse(err.to_string()))?;
        out.insert(key, resolve_value(&value, defaults));
    }
    Ok(out)
}

fn parse_film(attrs: &HashMap<String, String>, settings: &mut SceneSettings) -> Result<(), SceneLoadError> {
    if let Some(v) = attrs.get("width") {
        settings.width = parse_usize(v)?;
    }
    if let Some(v) = attrs.get("height") {
        settings.height = parse_usize(v)?;
    }
    if let Some(v) = attrs.get("output") {
        settings.output = PathBuf::from(v);
    }
    Ok(())
}

fn parse_sensor(attrs: &HashMap<String, String>, settings: &mut SceneSettings) -> Result<(), SceneLoadError> {
    if let Some(v) = attrs.get("origin") {
        settings.camera_origin = parse_vec3(v)?;
    }
    match (attrs.get("target"), attrs.get("direction")) {
        (Some(_), Some(_)) => {
            return Err(SceneLoadError::Parse("sensor takes either target or direction, not both".to_string()));
        }
        (Some(target), None) => {
            settings.camera_direction = normalize_or_self(&(parse_vec3(target)? - settings.camera_origin));
        }
        (None, Some(direction)) => {
            settings.camera_direction = normalize_or_self(&parse_vec3(direction)?);
        }
        (None, None) => {}
    }
    if let Some(v) = attrs.get("fov") {
        settings.fov_y = parse_float(v)?.to_radians();
    }
    if let Some(v) = attrs.get("near") {
        settings.near = parse_float(v)?;
    }
    Ok(())
}

fn parse_medium(attrs: &HashMap<String, String>, base_dir: &Path, settings: &mut SceneSettings) -> Result<(), SceneLoadError> {
    if let Some(v) = attrs.get("extent") {
        settings.extent = parse_vec3(v)?;
    }
    if let Some(v) = attrs.get("albedo") {
        settings.albedo = parse_float(v)?;
    }
    if let Some(v) = attrs.get("max_extinction") {
        settings.max_extinction = parse_float(v)?;
    }

    if let Some(field) = attrs.get("field") {
        settings.field = match field.as_str() {
            "constant" => {
                let density = match attrs.get("density") {
                    Some(v) => parse_float(v)?,
                    None => 1.0,
                };
                DensityField::Constant(density)
            }
            "sierpinski" => DensityField::Sierpinski,
            "helix" => DensityField::HelixTorus,
            "grid" => {
                let filename = attrs.get("filename").ok_or(SceneLoadError::MissingField("medium.filename"))?;
                let filename = if Path::new(filename).is_absolute() {
                    PathBuf::from(filename)
                } else {
                    base_dir.join(filename)
                };
                let resolution = match attrs.get("resolution") {
                    Some(v) => parse_usize(v)?,
                    None => 64,
                };
                let filter = match attrs.get("filter").map(|s| s.as_str()) {
                    None | Some("trilinear") => VolumeFilterMode::Trilinear,
                    Some("nearest") => VolumeFilterMode::Nearest,
                    Some(other) => return Err(SceneLoadError::Parse(format!("unsupported filter: {}", other))),
                };
                DensityField::Grid { filename, resolution, filter }
            }
            other => return Err(SceneLoadError::Parse(format!("unsupported medium field: {}", other))),
        };
    }
    Ok(())
}

fn parse_integrator(attrs: &HashMap<String, String>, settings: &mut SceneSettings) -> Result<(), SceneLoadError> {
    if let Some(kind) = attrs.get("type") {
        if kind != "volpath" {
            return Err(SceneLoadError::Parse(format!("unsupported integrator: {}", kind)));
        }
    }
    if let Some(v) = attrs.get("max_interactions") {
        settings.max_interactions = parse_u32(v)?;
    }
    if let Some(v) = attrs.get("samples_per_axis") {
        settings.samples_per_axis = parse_u32(v)?;
    }
    if let Some(v) = attrs.get("entry_bias") {
        settings.entry_bias = parse_float(v)?;
    }
    Ok(())
}

/// Expands `$name` tokens, where a name runs over ASCII alphanumerics and
/// `_`. Unknown names are kept as written.
fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..name_len];
        match defaults.get(name) {
            Some(value) if !name.is_empty() => out.push_str(value),
            _ => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SceneLoadError> {
    value.trim().parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse(format!("invalid vec3: {}", value)))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse(format!("invalid vec3: {}", value)))?;
    let z = parts.next().ok_or_else(|| SceneLoadError::Parse(format!("invalid vec3: {}", value)))?;
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

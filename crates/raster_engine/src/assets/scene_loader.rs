//! Line-oriented scene description loader
//!
//! A scene file has three parts: a camera section, optional light lines, and
//! an object section, separated by the `camera:` and `objects:` markers:
//!
//! ```text
//! camera:
//! position 0 0 5
//! orientation 0 1 0 0
//! near 1
//! far 10
//! left -0.5
//! right 0.5
//! top 0.5
//! bottom -0.5
//!
//! light -2 2 2 , 1 1 1 , 0.2
//!
//! objects:
//! cube cube.obj
//!
//! cube
//! ambient 0.2 0.1 0.2
//! diffuse 0.7 0.03 0.63
//! specular 0.1 0.1 0.1
//! shininess 0.2
//! s 1 1 1
//! t 0.4 -0.9 0
//! ```
//!
//! Mesh files resolve relative to the scene file's directory. Each object
//! block yields one world-space [`ObjectInstance`]; its transform lines
//! (`t`, `r`, `s`) compose by left-multiplication in file order, so the last
//! line listed is applied last. Blank lines end blocks; `#` starts a comment
//! anywhere.

use crate::assets::obj_loader::{ObjError, ObjLoader};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::camera::{Camera, CameraError, CameraParams};
use crate::render::lighting::Light;
use crate::render::material::Material;
use crate::render::mesh::{Mesh, ObjectInstance};
use crate::render::scene::Scene;
use crate::render::transform;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Scene file loading errors; all are fatal to the render
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file itself could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The camera section produced an unusable camera
    #[error(transparent)]
    Camera(#[from] CameraError),
    /// A referenced mesh file was malformed
    #[error("mesh load failed: {0}")]
    Obj(#[from] ObjError),
    /// The scene text itself was malformed
    #[error("scene parse error: {0}")]
    Parse(String),
    /// An object block referenced a name with no mapping entry
    #[error("unknown object name '{0}'")]
    UnknownName(String),
    /// Fewer meshes loaded than names mapped (some files were unopenable)
    #[error("loaded {meshes} meshes for {names} object names")]
    CountMismatch {
        /// Meshes actually loaded
        meshes: usize,
        /// Names in the mapping section
        names: usize,
    },
}

/// Loader for the scene description format
pub struct SceneLoader;

impl SceneLoader {
    /// Load and parse a scene file, producing a world-space [`Scene`]
    ///
    /// # Errors
    /// Any [`SceneError`]; the scene is unusable when one occurs.
    pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let lines: Vec<String> = BufReader::new(file).lines().collect::<Result<_, _>>()?;
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse_scene(&lines, parent)
    }

    /// Parse scene lines; `parent` is the directory mesh paths resolve against
    ///
    /// # Errors
    /// Any [`SceneError`]; see [`load_scene`](Self::load_scene).
    pub fn parse_scene(lines: &[String], parent: &Path) -> Result<Scene, SceneError> {
        let mut i = skip_to_marker(lines, 0, "camera:")
            .ok_or_else(|| SceneError::Parse("missing 'camera:' section".to_string()))?;

        // Camera keys and light lines run until the objects marker.
        let mut params = CameraParams::default();
        let mut lights = Vec::new();
        let mut in_lights = false;
        let mut found_objects = false;
        while i < lines.len() {
            let line = lines[i].trim();
            i += 1;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "objects:" {
                found_objects = true;
                break;
            }

            let (key, rest) = split_key(line);
            if key == "light" {
                in_lights = true;
                lights.push(parse_light(rest)?);
                continue;
            }
            if in_lights {
                log::warn!("ignoring key '{key}' in the lights section");
                continue;
            }
            match key {
                "position" => params.position = parse_vec3(rest, "position")?,
                "orientation" => {
                    let v = parse_numbers(rest, 4, "orientation")?;
                    params.axis = Vec3::new(v[0], v[1], v[2]);
                    params.angle = v[3];
                }
                "near" => params.near = parse_scalar(rest, "near")?,
                "far" => params.far = parse_scalar(rest, "far")?,
                "left" => params.left = parse_scalar(rest, "left")?,
                "right" => params.right = parse_scalar(rest, "right")?,
                "top" => params.top = parse_scalar(rest, "top")?,
                "bottom" => params.bottom = parse_scalar(rest, "bottom")?,
                other => log::warn!("ignoring unknown camera key '{other}'"),
            }
        }
        if !found_objects {
            return Err(SceneError::Parse("missing 'objects:' section".to_string()));
        }

        let object_lines = &lines[i..];
        let (mappings, blocks_start) = parse_mappings(object_lines);
        let meshes = load_meshes(&mappings, parent)?;

        let mut by_name = HashMap::new();
        for (idx, (name, _)) in mappings.iter().enumerate() {
            // First mapping wins on duplicate names.
            by_name.entry(name.as_str()).or_insert(idx);
        }

        let objects = build_instances(&object_lines[blocks_start..], &by_name, &meshes)?;
        let camera = Camera::from_params(&params)?;
        Ok(Scene::new(camera, objects, lights))
    }
}

/// Advance past preamble lines to the line after `marker`, if present
fn skip_to_marker(lines: &[String], from: usize, marker: &str) -> Option<usize> {
    for (offset, line) in lines[from..].iter().enumerate() {
        if line.trim() == marker {
            return Some(from + offset + 1);
        }
    }
    None
}

/// Split a trimmed line into its first token and the remainder
fn split_key(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((key, rest)) => (key, rest.trim_start()),
        None => (line, ""),
    }
}

fn parse_numbers(s: &str, n: usize, what: &str) -> Result<Vec<f64>, SceneError> {
    let values: Result<Vec<f64>, _> = s.split_whitespace().map(str::parse).collect();
    let values =
        values.map_err(|e| SceneError::Parse(format!("'{what}' has a bad number: {e}")))?;
    if values.len() != n {
        return Err(SceneError::Parse(format!(
            "'{what}' expects {n} numbers, got {}",
            values.len()
        )));
    }
    Ok(values)
}

fn parse_vec3(s: &str, what: &str) -> Result<Vec3, SceneError> {
    let v = parse_numbers(s, 3, what)?;
    Ok(Vec3::new(v[0], v[1], v[2]))
}

fn parse_scalar(s: &str, what: &str) -> Result<f64, SceneError> {
    Ok(parse_numbers(s, 1, what)?[0])
}

/// Parse a light line: `px py pz , r g b , atten`
fn parse_light(rest: &str) -> Result<Light, SceneError> {
    let groups: Vec<&str> = rest.split(',').collect();
    if groups.len() != 3 {
        return Err(SceneError::Parse(format!(
            "light expects 'x y z , r g b , atten', got '{rest}'"
        )));
    }
    let position = parse_vec3(groups[0], "light position")?;
    let color = parse_vec3(groups[1], "light color")?;
    let attenuation = parse_scalar(groups[2], "light attenuation")?;
    Ok(Light::new(position, color, attenuation))
}

/// Parse the name → mesh file mapping block
///
/// The block starts at the first non-blank, non-comment line and ends at the
/// first blank line after that. Returns the mappings and the index of the
/// first line past the block.
fn parse_mappings(lines: &[String]) -> (Vec<(String, String)>, usize) {
    let mut mappings = Vec::new();
    let mut started = false;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if line.is_empty() {
            if started {
                break;
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        started = true;
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(name), Some(path)) => mappings.push((name.to_string(), path.to_string())),
            _ => log::warn!("cannot read object mapping line: {line}"),
        }
    }
    (mappings, i)
}

/// Load each mapped mesh file, in mapping order
///
/// An unopenable file is logged and skipped, which then fails the
/// mesh-per-name count check; malformed file *content* is immediately fatal.
fn load_meshes(mappings: &[(String, String)], parent: &Path) -> Result<Vec<Mesh>, SceneError> {
    let mut meshes = Vec::with_capacity(mappings.len());
    for (name, file) in mappings {
        let mesh_path = parent.join(file);
        match ObjLoader::load_obj(&mesh_path) {
            Ok(mesh) => {
                log::info!("loaded mesh '{}' from {}", name, mesh_path.display());
                meshes.push(mesh);
            }
            Err(ObjError::Io(e)) => {
                log::error!("could not open mesh file {}: {e}", mesh_path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
    if meshes.len() != mappings.len() {
        return Err(SceneError::CountMismatch {
            meshes: meshes.len(),
            names: mappings.len(),
        });
    }
    Ok(meshes)
}

/// Accumulator for one object block
struct Block {
    name: Option<String>,
    material: Material,
    transform: Mat4,
    transform_count: usize,
}

impl Block {
    fn reset() -> Self {
        Self {
            name: None,
            material: Material::new(),
            transform: Mat4::identity(),
            transform_count: 0,
        }
    }
}

/// Process the per-instance blocks into world-space object instances
fn build_instances(
    lines: &[String],
    by_name: &HashMap<&str, usize>,
    meshes: &[Mesh],
) -> Result<Vec<ObjectInstance>, SceneError> {
    let mut out = Vec::new();
    let mut copy_counts: HashMap<String, usize> = HashMap::new();
    let mut block = Block::reset();

    let mut flush = |block: &mut Block, out: &mut Vec<ObjectInstance>| -> Result<(), SceneError> {
        let finished = std::mem::replace(block, Block::reset());
        let Some(name) = finished.name else {
            return Ok(());
        };
        if finished.transform_count == 0 {
            log::debug!("object block '{name}' has no transforms, skipping");
            return Ok(());
        }
        let &idx = by_name
            .get(name.as_str())
            .ok_or_else(|| SceneError::UnknownName(name.clone()))?;

        let mut mesh = meshes[idx].clone();
        transform::apply_to_mesh(&mut mesh, &finished.transform, true);

        let count = copy_counts.entry(name.clone()).or_insert(0);
        *count += 1;
        out.push(ObjectInstance {
            mesh,
            name: format!("{name}_copy{count}"),
            material: finished.material,
        });
        Ok(())
    };

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            flush(&mut block, &mut out)?;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let (key, rest) = split_key(line);
        match key {
            "ambient" | "diffuse" | "specular" => {
                if block.name.is_none() {
                    log::warn!("'{key}' before an object name, skipping line: {line}");
                    continue;
                }
                let value = parse_vec3(rest, key)?;
                match key {
                    "ambient" => block.material.ambient = value,
                    "diffuse" => block.material.diffuse = value,
                    _ => block.material.specular = value,
                }
            }
            "shininess" => {
                if block.name.is_none() {
                    log::warn!("'shininess' before an object name, skipping line: {line}");
                    continue;
                }
                block.material.shininess = parse_scalar(rest, "shininess")?;
            }
            "t" | "r" | "s" => {
                if block.name.is_none() {
                    log::warn!("transform before an object name, skipping line: {line}");
                    continue;
                }
                let step = match key {
                    "t" => {
                        let v = parse_vec3(rest, "translation")?;
                        Mat4::translation(v.x, v.y, v.z)
                    }
                    "r" => {
                        let v = parse_numbers(rest, 4, "rotation")?;
                        Mat4::rotation(Vec3::new(v[0], v[1], v[2]), v[3])
                    }
                    _ => {
                        let v = parse_vec3(rest, "scale")?;
                        Mat4::scaling(v.x, v.y, v.z)
                    }
                };
                block.transform = step * block.transform;
                block.transform_count += 1;
            }
            name => {
                flush(&mut block, &mut out)?;
                block.name = Some(name.to_string());
            }
        }
    }
    flush(&mut block, &mut out)?;

    Ok(out)
}

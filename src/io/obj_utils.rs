// Copyright @yucwang 2023

use std::fs;
use std::path::Path;

use wavefront_obj::{obj, ParseError};
use std::fmt;

#[derive(Debug)]
pub enum ObjLoadError {
    Io(std::io::Error),
    Parse(ParseError),
    Index(usize),
}

impl From<std::io::Error> for ObjLoadError {
    fn from(err: std::io::Error) -> Self {
        ObjLoadError::Io(err)
    }
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

impl fmt::Display for ObjLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjLoadError::Io(err) => write!(f, "io error: {}", err),
            ObjLoadError::Parse(err) => write!(f, "parse error: {}", err),
            ObjLoadError::Index(idx) => write!(f, "face references missing vertex {}", idx + 1),
        }
    }
}

impl std::error::Error for ObjLoadError {}

pub fn load_obj_from_str<S: AsRef<str>>(input: S) -> Result<obj::ObjSet, ParseError> {
    let geometry = positions_and_triangles(input.as_ref());
    obj::parse(geometry)
}

pub fn load_obj_from_file<P: AsRef<Path>>(path: P) -> Result<obj::ObjSet, ObjLoadError> {
    let data = fs::read_to_string(path)?;
    let obj_set = load_obj_from_str(data)?;
    Ok(obj_set)
}

/// Keeps `v` and `f` records only. Face corners are reduced to their vertex
/// index and polygons are fanned into triangles.
fn positions_and_triangles(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for line in input.lines() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                out.push_str(line.trim());
                out.push('\n');
            }
            Some("f") => {
                let corners: Vec<&str> = parts
                    .map(|c| c.split('/').next().unwrap_or(c))
                    .collect();
                if corners.len() < 3 {
                    continue;
                }
                let base = corners[0];
                for i in 1..(corners.len() - 1) {
                    out.push_str("f ");
                    out.push_str(base);
                    out.push(' ');
                    out.push_str(corners[i]);
                    out.push(' ');
                    out.push_str(corners[i + 1]);
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    out
}

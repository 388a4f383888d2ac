//! Projectile template catalog
//!
//! Maps a projectile type id to its immutable appearance + collider template
//! and a shared texture. Descriptors are JSON files:
//!
//! ```json
//! {
//!   "id": "small_orb",
//!   "texture": "bullets.png",
//!   "frames": [{ "x": 0, "y": 0, "w": 16, "h": 16 }],
//!   "collider": { "type": "circle", "radius": 4 },
//!   "render_scale": 1.0
//! }
//! ```
//!
//! The pool only sees the catalog through [`TemplateSource`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use crate::consts::DEFAULT_COLLIDER_RADIUS;
use crate::non_negative;
use crate::renderer::{TextureHandle, TextureLoader};

/// Sprite-sheet crop rectangle in texels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameRect {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub w: i32,
    #[serde(default)]
    pub h: i32,
}

impl FrameRect {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w.max(0) as f32, self.h.max(0) as f32)
    }
}

/// Collider declared by a template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColliderSpec {
    Circle { radius: f32 },
    Rect { w: f32, h: f32 },
}

impl ColliderSpec {
    /// Extent of the collider box (diameter for circles)
    pub fn size(&self) -> Vec2 {
        match *self {
            ColliderSpec::Circle { radius } => Vec2::splat(radius * 2.0),
            ColliderSpec::Rect { w, h } => Vec2::new(w, h),
        }
    }
}

impl Default for ColliderSpec {
    fn default() -> Self {
        ColliderSpec::Circle {
            radius: DEFAULT_COLLIDER_RADIUS,
        }
    }
}

/// Immutable appearance + collider description of one projectile type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileTemplate {
    pub id: String,
    pub texture: String,
    /// Empty or single-element means a static sprite
    pub frames: Vec<FrameRect>,
    pub collider: ColliderSpec,
    pub render_scale: f32,
}

/// On-disk descriptor shape; every field optional
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    id: String,
    #[serde(default)]
    texture: String,
    #[serde(default)]
    frames: Vec<FrameRect>,
    #[serde(default)]
    collider: Option<RawCollider>,
    #[serde(default = "default_render_scale")]
    render_scale: f32,
}

#[derive(Debug, Deserialize)]
struct RawCollider {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    radius: Option<f32>,
    w: Option<f32>,
    h: Option<f32>,
}

fn default_render_scale() -> f32 {
    1.0
}

impl RawCollider {
    fn into_spec(self, id: &str) -> ColliderSpec {
        match self.kind.as_deref().unwrap_or("circle") {
            "circle" => ColliderSpec::Circle {
                radius: non_negative(self.radius.unwrap_or(DEFAULT_COLLIDER_RADIUS)),
            },
            "rect" => ColliderSpec::Rect {
                w: non_negative(self.w.unwrap_or(0.0)),
                h: non_negative(self.h.unwrap_or(0.0)),
            },
            other => {
                log::warn!("Template '{}': unknown collider type '{}', using default circle", id, other);
                ColliderSpec::default()
            }
        }
    }
}

impl ProjectileTemplate {
    /// Parse one descriptor
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawDescriptor =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse { path: None, source })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDescriptor) -> Result<Self, CatalogError> {
        if raw.id.is_empty() {
            return Err(CatalogError::MissingId { path: None });
        }
        let collider = match raw.collider {
            Some(collider) => collider.into_spec(&raw.id),
            None => ColliderSpec::default(),
        };
        Ok(Self {
            collider,
            render_scale: non_negative(raw.render_scale),
            id: raw.id,
            texture: raw.texture,
            frames: raw.frames,
        })
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

/// Catalog loading failure
#[derive(Debug)]
pub enum CatalogError {
    DirectoryMissing(PathBuf),
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: Option<PathBuf>, source: serde_json::Error },
    MissingId { path: Option<PathBuf> },
    TextureUnavailable { id: String, texture: String },
    NoTemplates(PathBuf),
}

impl CatalogError {
    fn at(self, file: &Path) -> Self {
        match self {
            CatalogError::Parse { path: None, source } => CatalogError::Parse {
                path: Some(file.to_path_buf()),
                source,
            },
            CatalogError::MissingId { path: None } => CatalogError::MissingId {
                path: Some(file.to_path_buf()),
            },
            other => other,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryMissing(dir) => {
                write!(f, "template directory does not exist: {}", dir.display())
            }
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid descriptor {}: {source}", path.display()),
            Self::Parse { path: None, source } => write!(f, "invalid descriptor: {source}"),
            Self::MissingId { path: Some(path) } => {
                write!(f, "descriptor {} has no 'id'", path.display())
            }
            Self::MissingId { path: None } => write!(f, "descriptor has no 'id'"),
            Self::TextureUnavailable { id, texture } => {
                write!(f, "template '{id}': texture '{texture}' could not be loaded")
            }
            Self::NoTemplates(dir) => write!(f, "no templates found in {}", dir.display()),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Narrow interface the pool uses to configure pooled instances
pub trait TemplateSource {
    /// Apply the type's texture and collider to `projectile` in place.
    /// Returns false, leaving the projectile untouched, if the type cannot be resolved.
    fn configure_existing(&self, projectile: &mut Projectile, type_id: &str) -> bool;

    fn has_type(&self, type_id: &str) -> bool;

    fn list_types(&self) -> Vec<String>;
}

#[derive(Debug, Clone)]
struct TemplateEntry {
    template: Rc<ProjectileTemplate>,
    texture: TextureHandle,
}

/// Template registry with a per-path texture cache
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: BTreeMap<String, TemplateEntry>,
    textures: HashMap<String, TextureHandle>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` descriptor in `dir` (sorted by file name).
    /// Any bad file fails the whole load, as does an empty directory.
    pub fn load_dir(dir: impl AsRef<Path>, loader: &mut dyn TextureLoader) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CatalogError::DirectoryMissing(dir.to_path_buf()));
        }

        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut catalog = Self::new();
        for file in &files {
            let json = std::fs::read_to_string(file).map_err(|source| CatalogError::Io {
                path: file.clone(),
                source,
            })?;
            let template = ProjectileTemplate::from_json(&json).map_err(|e| e.at(file))?;
            catalog.insert(template, loader)?;
        }

        if catalog.is_empty() {
            return Err(CatalogError::NoTemplates(dir.to_path_buf()));
        }

        log::info!("Loaded {} projectile templates from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    pub fn from_templates(
        templates: impl IntoIterator<Item = ProjectileTemplate>,
        loader: &mut dyn TextureLoader,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for template in templates {
            catalog.insert(template, loader)?;
        }
        Ok(catalog)
    }

    /// Register a template, resolving its texture through the cache.
    /// A repeated id replaces the earlier template.
    pub fn insert(&mut self, template: ProjectileTemplate, loader: &mut dyn TextureLoader) -> Result<(), CatalogError> {
        let texture = match self.textures.get(&template.texture) {
            Some(texture) => texture.clone(),
            None => {
                let texture = loader.load_texture(&template.texture).ok_or_else(|| {
                    CatalogError::TextureUnavailable {
                        id: template.id.clone(),
                        texture: template.texture.clone(),
                    }
                })?;
                self.textures.insert(template.texture.clone(), texture.clone());
                texture
            }
        };

        if self.entries.contains_key(&template.id) {
            log::warn!("Duplicate projectile template '{}', replacing", template.id);
        }
        log::debug!("Registered projectile template '{}'", template.id);
        self.entries.insert(
            template.id.clone(),
            TemplateEntry {
                template: Rc::new(template),
                texture,
            },
        );
        Ok(())
    }

    pub fn get(&self, type_id: &str) -> Option<&ProjectileTemplate> {
        self.entries.get(type_id).map(|entry| entry.template.as_ref())
    }

    pub fn texture(&self, type_id: &str) -> Option<&TextureHandle> {
        self.entries.get(type_id).map(|entry| &entry.texture)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct textures loaded
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl TemplateSource for TemplateCatalog {
    fn configure_existing(&self, projectile: &mut Projectile, type_id: &str) -> bool {
        match self.entries.get(type_id) {
            Some(entry) => {
                projectile.apply_template(entry.template.clone(), entry.texture.clone());
                true
            }
            None => false,
        }
    }

    fn has_type(&self, type_id: &str) -> bool {
        self.entries.contains_key(type_id)
    }

    fn list_types(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

//! Asset slots: the three scene textures and the optional display mesh.
//!
//! Loading finishes outside the frame loop and writes into the store; the
//! renderer only ever asks what state a slot is in. A failed load is logged
//! and replaced by a placeholder for the rest of the session. Nothing is retried.
//!
//! Decoding is left to the graphics backend. The store only records what
//! arrived (byte counts for textures, a vertex/face scan for the mesh).

use std::collections::BTreeMap;
use std::path::Path;

/// Texture units used by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureSlot {
    Sky,
    Wall,
    Ground,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 3] = [Self::Sky, Self::Wall, Self::Ground];

    /// Texture unit index handed to the rasterizer.
    pub fn index(self) -> u32 {
        match self {
            Self::Sky => 0,
            Self::Wall => 1,
            Self::Ground => 2,
        }
    }

    /// File name looked up in an asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Sky => "sky.jpg",
            Self::Wall => "wall.jpg",
            Self::Ground => "ground.jpg",
        }
    }

    /// Flat RGBA used in place of the texture when it is missing.
    pub fn placeholder_color(self) -> [f32; 4] {
        let red = 100.0 + 50.0 * self.index() as f32;
        [red / 255.0, 100.0 / 255.0, 100.0 / 255.0, 1.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    /// Load not finished yet.
    Pending,
    /// Image data arrived.
    Ready { bytes: usize },
    /// Load failed; the slot renders as its placeholder color.
    Placeholder,
}

/// Summary of a loaded mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    pub name: String,
    pub vertex_count: u32,
    pub face_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshState {
    Pending,
    Ready(Mesh),
    /// Load failed; the mesh is simply not drawn.
    Failed,
}

/// Errors from asset loading. These never escape the store; they are logged
/// and turned into placeholders.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mesh {0} has no vertices")]
    EmptyMesh(String),
}

/// Load state of every scene asset.
#[derive(Debug, Clone)]
pub struct AssetStore {
    textures: BTreeMap<TextureSlot, TextureState>,
    mesh: MeshState,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    /// Every slot pending.
    pub fn new() -> Self {
        Self {
            textures: TextureSlot::ALL
                .into_iter()
                .map(|slot| (slot, TextureState::Pending))
                .collect(),
            mesh: MeshState::Pending,
        }
    }

    pub fn texture(&self, slot: TextureSlot) -> TextureState {
        self.textures
            .get(&slot)
            .copied()
            .unwrap_or(TextureState::Pending)
    }

    pub fn is_texture_ready(&self, slot: TextureSlot) -> bool {
        matches!(self.texture(slot), TextureState::Ready { .. })
    }

    /// Number of slots that have settled, whether loaded or replaced.
    pub fn textures_settled(&self) -> usize {
        self.textures
            .values()
            .filter(|s| !matches!(s, TextureState::Pending))
            .count()
    }

    /// The display mesh, if it loaded.
    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.mesh {
            MeshState::Ready(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_state(&self) -> &MeshState {
        &self.mesh
    }

    /// Record the outcome of a texture load. A slot that already failed stays a placeholder.
    pub fn complete_texture(&mut self, slot: TextureSlot, result: Result<usize, AssetError>) {
        if self.texture(slot) == TextureState::Placeholder {
            tracing::debug!(?slot, "ignoring load for failed texture slot");
            return;
        }
        let state = match result {
            Ok(bytes) => {
                tracing::debug!(?slot, bytes, "texture loaded");
                TextureState::Ready { bytes }
            }
            Err(e) => {
                tracing::warn!(?slot, "texture load failed, using placeholder: {e}");
                TextureState::Placeholder
            }
        };
        self.textures.insert(slot, state);
    }

    /// Record the outcome of a mesh load. A failed mesh stays failed.
    pub fn complete_mesh(&mut self, result: Result<Mesh, AssetError>) {
        if matches!(self.mesh, MeshState::Failed) {
            tracing::debug!("ignoring load for failed mesh");
            return;
        }
        self.mesh = match result {
            Ok(mesh) => {
                tracing::info!(
                    name = %mesh.name,
                    vertices = mesh.vertex_count,
                    faces = mesh.face_count,
                    "mesh loaded"
                );
                MeshState::Ready(mesh)
            }
            Err(e) => {
                tracing::warn!("mesh load failed, skipping model: {e}");
                MeshState::Failed
            }
        };
    }

    /// Read a texture file into a slot.
    pub fn load_texture_file(&mut self, slot: TextureSlot, path: impl AsRef<Path>) {
        let result = std::fs::read(path.as_ref())
            .map(|data| data.len())
            .map_err(AssetError::from);
        self.complete_texture(slot, result);
    }

    /// Load every texture slot from `dir` using the slot's file name.
    pub fn load_textures_from_dir(&mut self, dir: impl AsRef<Path>) {
        for slot in TextureSlot::ALL {
            self.load_texture_file(slot, dir.as_ref().join(slot.file_name()));
        }
    }

    /// Scan a Wavefront OBJ file for its vertex and face counts.
    pub fn load_mesh_file(&mut self, path: impl AsRef<Path>) {
        let result = scan_obj(path.as_ref());
        self.complete_mesh(result);
    }
}

fn scan_obj(path: &Path) -> Result<Mesh, AssetError> {
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();

    let mut vertex_count = 0;
    let mut face_count = 0;
    for line in text.lines() {
        match line.split_whitespace().next() {
            Some("v") => vertex_count += 1,
            Some("f") => face_count += 1,
            _ => {}
        }
    }
    if vertex_count == 0 {
        return Err(AssetError::EmptyMesh(name));
    }
    Ok(Mesh {
        name,
        vertex_count,
        face_count,
    })
}

pub fn crate_info() -> &'static str {
    "voxelwalk-assets v0.1.0"
}

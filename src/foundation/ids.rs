/// Index of a Path inside the owning character's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathHandle(pub(crate) u32);

/// Index of a Scene inside the owning character's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneHandle(pub(crate) u32);

impl PathHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl SceneHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A Path referenced either by its id or by the handle returned when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    Id(String),
    Handle(PathHandle),
}

/// A Scene referenced either by its id or by the handle returned when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Id(String),
    Handle(SceneHandle),
}

impl From<PathHandle> for PathKey {
    fn from(h: PathHandle) -> Self {
        Self::Handle(h)
    }
}

impl From<&str> for PathKey {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for PathKey {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<SceneHandle> for SceneKey {
    fn from(h: SceneHandle) -> Self {
        Self::Handle(h)
    }
}

impl From<&str> for SceneKey {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for SceneKey {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl std::fmt::Display for PathKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Handle(h) => write!(f, "#{}", h.0),
        }
    }
}

impl std::fmt::Display for SceneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Handle(h) => write!(f, "#{}", h.0),
        }
    }
}

use std::path::PathBuf;

/// Content-authoring problems found while building a level. Any of these
/// aborts construction.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("unknown tile tag {0}")]
    UnknownTile(u8),

    #[error("unknown thing tag {0}")]
    UnknownThing(u8),

    #[error("map width must be non-zero")]
    ZeroWidth,

    #[error("{len} tiles do not divide into rows of width {width}")]
    RaggedTiles { len: usize, width: usize },

    #[error("thing overlay has {things} cells but the map has {tiles}")]
    OverlayMismatch { tiles: usize, things: usize },

    #[error("switch at ({x}, {y}) must be placed on a wall tile")]
    SwitchNotOnWall { x: usize, y: usize },

    #[error("door at ({x}, {y}) cannot be placed on the map edge")]
    DoorOnEdge { x: usize, y: usize },

    #[error("level has no player start")]
    MissingPlayer,

    #[error("level has more than one player start, second at ({x}, {y})")]
    DuplicatePlayer { x: usize, y: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

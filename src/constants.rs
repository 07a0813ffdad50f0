/// Shared configuration for mesh to point cloud conversion

/// Default number of surface samples when --points is not given
pub const DEFAULT_POINT_COUNT: usize = 10_000;

/// Progress bar update granularity while sampling
pub const PROGRESS_UPDATE_INTERVAL: usize = 10_000;

/// Chunk size for parallel reductions over sampled points
pub const REDUCTION_CHUNK_SIZE: usize = 25_000;

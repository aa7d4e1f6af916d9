/// Package version plus the build stamp, e.g. `0.1.0+git.42.1a2b3c4d5e`.
pub const FULL: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    env!("SPRINTMESH_BUILD_STAMP")
);
